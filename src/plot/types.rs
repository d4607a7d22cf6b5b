//! Plot type registry and public styling enums.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Chart shapes supported by this crate.
///
/// Every kind has a total unpack and draw implementation; resolving a name
/// through [`plot_types`] is the only way a kind enters the pipeline, so a
/// missing implementation is a compile-time error, not a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Multi-series line chart over a shared x axis.
    Line,
    /// Markers only.
    Scatter,
    /// 1-D frequency histogram of a single series.
    Histogram,
    /// 2-D data as colour-mapped cells on its own axes.
    Heatmap,
    /// Isolines over 2-D data.
    Contour,
    /// Data-vs-data scatter of exactly two series.
    ComparativeScatter,
    /// Density histogram comparing exactly two series.
    Histogram2d,
}

/// Registry row: a chart shape plus the series count it requires.
#[derive(Debug, Clone, Copy)]
pub struct PlotTypeEntry {
    pub kind: PlotKind,
    /// `None` accepts any number of series.
    pub expected_series: Option<usize>,
}

/// The static plot type registry, built once and immutable thereafter.
pub fn plot_types() -> &'static BTreeMap<&'static str, PlotTypeEntry> {
    static REGISTRY: OnceLock<BTreeMap<&'static str, PlotTypeEntry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        BTreeMap::from([
            (
                "line",
                PlotTypeEntry {
                    kind: PlotKind::Line,
                    expected_series: None,
                },
            ),
            (
                "scatter",
                PlotTypeEntry {
                    kind: PlotKind::Scatter,
                    expected_series: None,
                },
            ),
            (
                "histogram",
                PlotTypeEntry {
                    kind: PlotKind::Histogram,
                    expected_series: Some(1),
                },
            ),
            (
                "heatmap",
                PlotTypeEntry {
                    kind: PlotKind::Heatmap,
                    expected_series: Some(1),
                },
            ),
            (
                "contour",
                PlotTypeEntry {
                    kind: PlotKind::Contour,
                    expected_series: Some(1),
                },
            ),
            (
                "comparativescatter",
                PlotTypeEntry {
                    kind: PlotKind::ComparativeScatter,
                    expected_series: Some(2),
                },
            ),
            (
                "histogram2d",
                PlotTypeEntry {
                    kind: PlotKind::Histogram2d,
                    expected_series: Some(2),
                },
            ),
        ])
    })
}

/// Registered type names, for usage errors.
pub fn valid_type_names() -> Vec<&'static str> {
    plot_types().keys().copied().collect()
}

/// Line style for line-based series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

/// Accepted `--linestyle` values, for usage errors.
pub const LINE_STYLES: [&str; 4] = ["solid", "dashed", "dashdot", "dotted"];

impl LineStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dashdot" => Some(Self::DashDot),
            "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }
}

/// Colour bar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CbarOrient {
    #[default]
    Vertical,
    Horizontal,
}

/// Accepted `--cbarorient` values, for usage errors.
pub const CBAR_ORIENTS: [&str; 2] = ["vertical", "horizontal"];

impl CbarOrient {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contracts() {
        let types = plot_types();
        assert_eq!(types["histogram2d"].expected_series, Some(2));
        assert_eq!(types["comparativescatter"].expected_series, Some(2));
        assert_eq!(types["heatmap"].expected_series, Some(1));
        assert_eq!(types["line"].expected_series, None);
    }

    #[test]
    fn line_style_names_round_trip() {
        for name in LINE_STYLES {
            assert!(LineStyle::from_name(name).is_some());
        }
        assert!(LineStyle::from_name("wavy").is_none());
    }
}
