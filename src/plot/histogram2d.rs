//! Comparative density histogram: two series binned against each other
//! (data-vs-data, not data-vs-axis).

use super::histogram::{BinSpec, bin_edges, bin_index};
use crate::error::{EoplotError, Result};
use ndarray::{Array2, ArrayD};

/// A computed 2-D histogram surface.
///
/// `counts` is indexed `[x bin, y bin]`; zero-count bins are NaN so the
/// colour mapping leaves them as background (a zero cannot be log-mapped).
#[derive(Debug, Clone)]
pub struct Histogram2d {
    pub xedges: Vec<f64>,
    pub yedges: Vec<f64>,
    pub counts: Array2<f64>,
    /// Number of jointly-valid sample pairs that fell into a bin.
    pub binned: usize,
}

impl Histogram2d {
    /// Total count over unmasked bins.
    pub fn total(&self) -> usize {
        self.counts
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| *v as usize)
            .sum()
    }

    /// Largest bin count, for colour normalization.
    pub fn max_count(&self) -> f64 {
        self.counts
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Align two series and histogram them against each other.
///
/// The second series is reshaped to the first's shape (same element count
/// required), validity masks are intersected, and only positions valid in
/// both series contribute. Bin edges are computed per axis from each series'
/// own valid data, honoring the given specs.
pub fn comparative_histogram(
    first: &ArrayD<f64>,
    second: &ArrayD<f64>,
    xspec: &BinSpec,
    yspec: &BinSpec,
) -> Result<Histogram2d> {
    if first.len() != second.len() {
        return Err(EoplotError::ShapeMismatch {
            expected: first.len(),
            actual: second.len(),
        });
    }

    let xedges = bin_edges(first.iter().copied(), xspec)?;
    let yedges = bin_edges(second.iter().copied(), yspec)?;

    let mut counts = Array2::<f64>::zeros((xedges.len() - 1, yedges.len() - 1));
    let mut binned = 0usize;
    for (a, b) in first.iter().zip(second.iter()) {
        if !a.is_finite() || !b.is_finite() {
            continue;
        }
        if let (Some(i), Some(j)) = (bin_index(*a, &xedges), bin_index(*b, &yedges)) {
            counts[[i, j]] += 1.0;
            binned += 1;
        }
    }
    if binned == 0 {
        return Err(EoplotError::EmptyData);
    }

    counts.mapv_inplace(|c| if c == 0.0 { f64::NAN } else { c });

    Ok(Histogram2d {
        xedges,
        yedges,
        counts,
        binned,
    })
}

/// Joint min/max of two series, for the y = x reference line.
pub fn joint_range(first: &ArrayD<f64>, second: &ArrayD<f64>) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for v in first.iter().chain(second.iter()).copied() {
        if v.is_finite() {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn bin_count_sums_to_jointly_valid_pairs() {
        let a = array![1.0, 2.0, f64::NAN, 4.0, 5.0].into_dyn();
        let b = array![1.0, f64::NAN, 3.0, 4.0, 5.0].into_dyn();
        let h = comparative_histogram(&a, &b, &BinSpec::default(), &BinSpec::default()).unwrap();
        // Positions 0, 3, 4 are valid in both series.
        assert_eq!(h.total(), 3);
        assert_eq!(h.binned, 3);
    }

    #[test]
    fn zero_count_bins_are_masked() {
        let a = array![0.0, 10.0].into_dyn();
        let b = array![0.0, 10.0].into_dyn();
        let h = comparative_histogram(&a, &b, &BinSpec::default(), &BinSpec::default()).unwrap();
        let masked = h.counts.iter().filter(|v| v.is_nan()).count();
        let kept = h.counts.iter().filter(|v| v.is_finite()).count();
        assert_eq!(kept, 2);
        assert_eq!(masked, h.counts.len() - 2);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let a = array![1.0, 2.0, 3.0].into_dyn();
        let b = array![1.0, 2.0].into_dyn();
        let err = comparative_histogram(&a, &b, &BinSpec::default(), &BinSpec::default());
        assert!(matches!(err, Err(EoplotError::ShapeMismatch { .. })));
    }

    #[test]
    fn different_shapes_with_equal_counts_align() {
        let a = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let b = array![1.0, 2.0, 3.0, 4.0].into_dyn();
        let h = comparative_histogram(&a, &b, &BinSpec::default(), &BinSpec::default()).unwrap();
        assert_eq!(h.total(), 4);
    }

    #[test]
    fn joint_range_spans_both_series() {
        let a = array![1.0, 5.0].into_dyn();
        let b = array![-2.0, 3.0, f64::NAN].into_dyn();
        assert_eq!(joint_range(&a, &b), Some((-2.0, 5.0)));
    }
}
