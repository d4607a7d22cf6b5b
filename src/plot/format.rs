//! Shared axis formatting applied after a chart shape has drawn its data.
//!
//! Everything here is an explicit parameter; in particular the font size is
//! threaded through [`AxesStyle`] rather than mutated process-wide.

use super::types::CbarOrient;
use crate::parse::PlotConfig;
use plotters::style::FontTransform;

/// True only when both axes' names begin with "lon"/"lat" (either order is
/// normalized by the unpacker, so x is the longitude-like axis here).
pub fn is_map(xname: &str, yname: &str) -> bool {
    xname.to_lowercase().starts_with("lon") && yname.to_lowercase().starts_with("lat")
}

/// Resolved axis/title formatting for one plot.
#[derive(Debug, Clone)]
pub struct AxesStyle {
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
    pub font_px: u32,
    pub grid: bool,
    pub logx: bool,
    pub logy: bool,
    pub xstep: Option<f64>,
    pub ystep: Option<f64>,
    pub xtickangle: Option<f64>,
    pub ytickangle: Option<f64>,
    pub map: bool,
}

impl AxesStyle {
    /// Resolve from the configuration, deriving axis labels and title from
    /// the data's own metadata unless overridden.
    pub fn from_config(
        config: &PlotConfig,
        default_xlabel: &str,
        default_ylabel: &str,
        default_title: &str,
        map: bool,
    ) -> Self {
        Self {
            xlabel: config
                .xlabel
                .clone()
                .unwrap_or_else(|| default_xlabel.to_string()),
            ylabel: config
                .ylabel
                .clone()
                .unwrap_or_else(|| default_ylabel.to_string()),
            title: config
                .title
                .clone()
                .unwrap_or_else(|| default_title.to_string()),
            font_px: config.fontsize.map(|f| f as u32).unwrap_or(12),
            grid: config.grid,
            logx: config.logx,
            logy: config.logy,
            xstep: config.xstep,
            ystep: config.ystep,
            xtickangle: config.xtickangle,
            ytickangle: config.ytickangle,
            map,
        }
    }

    /// Label count for one axis: stepping from the minimum to the maximum +
    /// step when a step is set, else the default.
    pub fn tick_count(range: (f64, f64), step: Option<f64>, default: usize) -> usize {
        match step {
            Some(s) if s > 0.0 => (((range.1 - range.0) / s).floor() as usize + 1).clamp(2, 50),
            _ => default,
        }
    }

    /// The backend supports quarter-turn text only; angles of 45° or more
    /// map to a vertical label.
    pub fn rotation(angle: Option<f64>) -> FontTransform {
        match angle {
            Some(a) if a.abs() >= 45.0 => FontTransform::Rotate90,
            _ => FontTransform::None,
        }
    }
}

/// Apply overrides and log transform to a data range, widening degenerate
/// spans so the axis always has extent.
pub fn axis_range(
    data: Option<(f64, f64)>,
    min_override: Option<f64>,
    max_override: Option<f64>,
    log: bool,
) -> (f64, f64) {
    let (dlo, dhi) = data.unwrap_or((0.0, 1.0));
    let mut lo = min_override.unwrap_or(dlo);
    let mut hi = max_override.unwrap_or(dhi);
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        (lo, hi) = (0.0, 1.0);
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    if log {
        let lo_pos = if lo > 0.0 { lo } else { f64::MIN_POSITIVE };
        let hi_pos = if hi > 0.0 { hi } else { 1.0 };
        (lo_pos.log10(), hi_pos.log10())
    } else {
        (lo, hi)
    }
}

/// Tick label for a (possibly log10-transformed) axis value.
pub fn format_tick(v: f64, log: bool) -> String {
    if log {
        return format!("1e{v:.0}");
    }
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Degree-formatted tick label for map axes, e.g. "30°N" or "120°E".
pub fn degree_label(v: f64, longitude: bool) -> String {
    let (pos, neg) = if longitude { ("E", "W") } else { ("N", "S") };
    if v == 0.0 {
        "0°".to_string()
    } else if v > 0.0 {
        format!("{:.0}°{pos}", v.abs())
    } else {
        format!("{:.0}°{neg}", v.abs())
    }
}

/// Normalize a value into [0, 1] for colour mapping, log-aware.
pub fn colour_norm(v: f64, vmin: f64, vmax: f64, log: bool) -> f64 {
    if log {
        let lo = vmin.max(f64::MIN_POSITIVE).log10();
        let hi = vmax.max(f64::MIN_POSITIVE).log10();
        if hi <= lo {
            return 0.5;
        }
        ((v.max(f64::MIN_POSITIVE).log10() - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else if vmax <= vmin {
        0.5
    } else {
        ((v - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
    }
}

/// Colour bar tick values: explicit step, or log decades, or a linear split.
pub fn colourbar_ticks(vmin: f64, vmax: f64, step: Option<f64>, log: bool) -> Vec<f64> {
    if let Some(s) = step.filter(|s| *s > 0.0) {
        let mut ticks = Vec::new();
        let mut t = (vmin / s).ceil() * s;
        while t <= vmax + s * 1e-9 {
            ticks.push(t);
            t += s;
        }
        return ticks;
    }
    if log {
        let lo = vmin.max(f64::MIN_POSITIVE).log10().ceil() as i32;
        let hi = vmax.max(f64::MIN_POSITIVE).log10().floor() as i32;
        if lo <= hi {
            return (lo..=hi).map(|e| 10f64.powi(e)).collect();
        }
    }
    (0..=5)
        .map(|i| vmin + (vmax - vmin) * i as f64 / 5.0)
        .collect()
}

/// Colour bar geometry: fraction of the canvas given to the bar panel.
pub fn colourbar_split(orient: CbarOrient, width: u32, height: u32) -> (u32, u32) {
    match orient {
        CbarOrient::Vertical => ((width as f64 * 0.86) as u32, height),
        CbarOrient::Horizontal => (width, (height as f64 * 0.84) as u32),
    }
}
