//! Colour maps for value-mapped surfaces and the named colour table used to
//! validate `--color`.

use crate::error::{EoplotError, Result};
use plotters::style::RGBColor;

/// Colour maps for heatmaps, contours, and comparative histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMap {
    #[default]
    Viridis,
    Plasma,
    Rainbow,
    BlueRed,
    Greys,
}

impl ColourMap {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "viridis" => Ok(Self::Viridis),
            "plasma" => Ok(Self::Plasma),
            "rainbow" => Ok(Self::Rainbow),
            "bluered" | "rdbu" => Ok(Self::BlueRed),
            "greys" | "grays" => Ok(Self::Greys),
            _ => Err(EoplotError::UnknownColourMap {
                name: name.to_string(),
            }),
        }
    }

    /// Map a normalized value (0.0 to 1.0) to an RGB colour.
    pub fn color(self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Viridis => lerp3(t, (68, 1, 84), (33, 104, 109), (253, 231, 37)),
            Self::Plasma => lerp3(t, (13, 8, 135), (180, 54, 121), (240, 175, 33)),
            Self::Rainbow => rainbow(t),
            Self::BlueRed => lerp3(t, (33, 102, 172), (247, 247, 247), (178, 24, 43)),
            Self::Greys => lerp3(t, (250, 250, 250), (130, 130, 130), (10, 10, 10)),
        }
    }
}

/// Piecewise linear ramp through three anchor colours.
fn lerp3(t: f64, lo: (u8, u8, u8), mid: (u8, u8, u8), hi: (u8, u8, u8)) -> RGBColor {
    let (a, b, u) = if t < 0.5 {
        (lo, mid, t * 2.0)
    } else {
        (mid, hi, (t - 0.5) * 2.0)
    };
    let ch = |x: u8, y: u8| (x as f64 + u * (y as f64 - x as f64)) as u8;
    RGBColor(ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}

fn rainbow(t: f64) -> RGBColor {
    // Hue sweep blue -> red.
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        _ => (x, 0.0, 1.0),
    };
    RGBColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Named colours recognized by `--color` and per-series style overrides.
const NAMED_COLOURS: [(&str, (u8, u8, u8)); 22] = [
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("brown", (165, 42, 42)),
    ("pink", (255, 192, 203)),
    ("olive", (128, 128, 0)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("maroon", (128, 0, 0)),
    ("lime", (0, 255, 0)),
    ("gold", (255, 215, 0)),
    ("silver", (192, 192, 192)),
    ("darkgreen", (0, 100, 0)),
    ("skyblue", (135, 206, 235)),
];

/// Look up a colour by name (case-insensitive; "grey" is accepted for "gray").
pub fn named_colour(name: &str) -> Option<RGBColor> {
    let lower = name.to_lowercase();
    let lower = if lower == "grey" { "gray" } else { lower.as_str() };
    NAMED_COLOURS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, (r, g, b))| RGBColor(*r, *g, *b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_map_endpoints() {
        let lo = ColourMap::Viridis.color(0.0);
        let hi = ColourMap::Viridis.color(1.0);
        assert_ne!(lo, hi);
        // Out-of-range values clamp instead of panicking.
        assert_eq!(ColourMap::Viridis.color(-1.0), lo);
        assert_eq!(ColourMap::Viridis.color(2.0), hi);
    }

    #[test]
    fn grey_is_a_recognized_colour() {
        assert!(named_colour("grey").is_some());
        assert!(named_colour("Gray").is_some());
        assert!(named_colour("not-a-colour").is_none());
    }
}
