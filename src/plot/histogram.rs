//! Histogram bin-edge computation shared by the 1-D and comparative
//! histograms.

use crate::error::{EoplotError, Result};

/// Bins per axis when no explicit width is given.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// How to bin one axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinSpec {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub width: Option<f64>,
    pub log: bool,
}

/// Compute bin edges for one axis.
///
/// An explicit width steps edges from the minimum until the maximum is
/// covered (the last edge may pad past it); otherwise the range splits into
/// [`DEFAULT_BIN_COUNT`] even bins. Explicit min/max override the data range.
/// In log mode the spacing is even in log10 domain and non-positive samples
/// are ignored.
pub fn bin_edges(values: impl Iterator<Item = f64>, spec: &BinSpec) -> Result<Vec<f64>> {
    let (mut data_min, mut data_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite() && (!spec.log || *v > 0.0)) {
        data_min = data_min.min(v);
        data_max = data_max.max(v);
    }

    let mut min = spec.min.unwrap_or(data_min);
    let mut max = spec.max.unwrap_or(data_max);
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(EoplotError::EmptyData);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    if spec.log {
        if min <= 0.0 {
            return Err(EoplotError::EmptyData);
        }
        (min, max) = (min.log10(), max.log10());
    }

    let edges: Vec<f64> = match spec.width {
        Some(width) if width > 0.0 => {
            let mut n = ((max - min) / width).ceil() as usize;
            if min + n as f64 * width < max {
                n += 1;
            }
            (0..=n.max(1)).map(|i| min + i as f64 * width).collect()
        }
        _ => {
            let n = DEFAULT_BIN_COUNT;
            (0..=n)
                .map(|i| min + (max - min) * i as f64 / n as f64)
                .collect()
        }
    };

    Ok(if spec.log {
        edges.into_iter().map(|e| 10f64.powf(e)).collect()
    } else {
        edges
    })
}

/// Index of the bin containing `v`, with the last bin closed on the right.
pub fn bin_index(v: f64, edges: &[f64]) -> Option<usize> {
    let n = edges.len().checked_sub(1)?;
    if n == 0 || !v.is_finite() || v < edges[0] || v > edges[n] {
        return None;
    }
    let idx = edges[..n].partition_point(|e| *e <= v);
    Some(idx.saturating_sub(1).min(n - 1))
}

/// 1-D frequency counts over the given edges; non-finite samples are dropped.
pub fn histogram_counts(values: impl Iterator<Item = f64>, edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0usize; edges.len().saturating_sub(1)];
    for v in values {
        if let Some(i) = bin_index(v, edges) {
            counts[i] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_width_spans_min_to_max() {
        let spec = BinSpec {
            min: Some(0.0),
            max: Some(10.0),
            width: Some(2.5),
            log: false,
        };
        let edges = bin_edges([].into_iter(), &spec).unwrap();
        assert_eq!(edges, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn explicit_width_pads_past_max() {
        let spec = BinSpec {
            min: Some(0.0),
            max: Some(10.0),
            width: Some(3.0),
            log: false,
        };
        let edges = bin_edges([].into_iter(), &spec).unwrap();
        assert_eq!(edges.first(), Some(&0.0));
        assert!(*edges.last().unwrap() >= 10.0);
        for pair in edges.windows(2) {
            assert!((pair[1] - pair[0] - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn default_bin_count_is_ten() {
        let spec = BinSpec::default();
        let edges = bin_edges((0..=100).map(|i| i as f64), &spec).unwrap();
        assert_eq!(edges.len(), DEFAULT_BIN_COUNT + 1);
        assert_eq!(edges[0], 0.0);
        assert_eq!(*edges.last().unwrap(), 100.0);
    }

    #[test]
    fn log_mode_spaces_edges_in_decades() {
        let spec = BinSpec {
            min: Some(1.0),
            max: Some(1000.0),
            width: Some(1.0),
            log: true,
        };
        let edges = bin_edges([].into_iter(), &spec).unwrap();
        assert_eq!(edges.len(), 4);
        assert!((edges[1] - 10.0).abs() < 1e-9);
        assert!((edges[3] - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn last_bin_is_closed() {
        let edges = vec![0.0, 1.0, 2.0];
        assert_eq!(bin_index(2.0, &edges), Some(1));
        assert_eq!(bin_index(0.0, &edges), Some(0));
        assert_eq!(bin_index(2.1, &edges), None);
        assert_eq!(bin_index(-0.1, &edges), None);
    }

    #[test]
    fn counts_drop_invalid_samples() {
        let edges = vec![0.0, 1.0, 2.0];
        let counts = histogram_counts(
            [0.5, 1.5, f64::NAN, 1.9, f64::INFINITY].into_iter(),
            &edges,
        );
        assert_eq!(counts, vec![1, 2]);
    }
}
