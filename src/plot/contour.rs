//! Isoline extraction for the contour chart shape.
//!
//! Levels come from an explicit step or are derived from the value range;
//! segments come from a marching-squares pass over the grid cells. Cells
//! touching an invalid sample are skipped.

use ndarray::Array2;

/// Contour levels: multiples of `step` inside the range when given,
/// otherwise eight levels evenly placed in the interior.
pub fn contour_levels(min: f64, max: f64, step: Option<f64>) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || min >= max {
        return Vec::new();
    }
    match step.filter(|s| *s > 0.0) {
        Some(s) => {
            let mut levels = Vec::new();
            let mut level = (min / s).ceil() * s;
            while level <= max {
                levels.push(level);
                level += s;
            }
            levels
        }
        None => {
            let n = 8;
            (1..=n)
                .map(|i| min + (max - min) * i as f64 / (n + 1) as f64)
                .collect()
        }
    }
}

/// Line segments tracing one level through the grid. `values` is indexed
/// `[y, x]`; `x`/`y` are the cell-center positions.
pub fn contour_segments(
    x: &[f64],
    y: &[f64],
    values: &Array2<f64>,
    level: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let (ny, nx) = values.dim();
    let mut segments = Vec::new();
    if nx < 2 || ny < 2 {
        return segments;
    }

    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let v00 = values[[j, i]];
            let v10 = values[[j, i + 1]];
            let v01 = values[[j + 1, i]];
            let v11 = values[[j + 1, i + 1]];
            if !(v00.is_finite() && v10.is_finite() && v01.is_finite() && v11.is_finite()) {
                continue;
            }

            // Corner positions of this cell.
            let (x0, x1) = (x[i], x[i + 1]);
            let (y0, y1) = (y[j], y[j + 1]);

            // Interpolated crossing on each cell edge.
            let t = |a: f64, b: f64| (level - a) / (b - a);
            let bottom = || (x0 + t(v00, v10) * (x1 - x0), y0);
            let top = || (x0 + t(v01, v11) * (x1 - x0), y1);
            let left = || (x0, y0 + t(v00, v01) * (y1 - y0));
            let right = || (x1, y0 + t(v10, v11) * (y1 - y0));

            let case = (usize::from(v00 >= level))
                | (usize::from(v10 >= level) << 1)
                | (usize::from(v11 >= level) << 2)
                | (usize::from(v01 >= level) << 3);

            match case {
                0 | 15 => {}
                1 | 14 => segments.push((left(), bottom())),
                2 | 13 => segments.push((bottom(), right())),
                3 | 12 => segments.push((left(), right())),
                4 | 11 => segments.push((right(), top())),
                5 => {
                    // Saddle: resolve by the cell-center mean.
                    if (v00 + v10 + v01 + v11) / 4.0 >= level {
                        segments.push((left(), top()));
                        segments.push((bottom(), right()));
                    } else {
                        segments.push((left(), bottom()));
                        segments.push((right(), top()));
                    }
                }
                6 | 9 => segments.push((bottom(), top())),
                7 | 8 => segments.push((left(), top())),
                10 => {
                    if (v00 + v10 + v01 + v11) / 4.0 >= level {
                        segments.push((left(), bottom()));
                        segments.push((right(), top()));
                    } else {
                        segments.push((left(), top()));
                        segments.push((bottom(), right()));
                    }
                }
                _ => unreachable!(),
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn levels_from_step_are_multiples() {
        assert_eq!(contour_levels(0.3, 2.7, Some(1.0)), vec![1.0, 2.0]);
        assert_eq!(contour_levels(0.0, 1.0, None).len(), 8);
        assert!(contour_levels(1.0, 1.0, None).is_empty());
    }

    #[test]
    fn single_crossing_produces_one_segment() {
        // One cell with the level crossing between left (0) and right (1).
        let values = array![[0.0, 1.0], [0.0, 1.0]];
        let segs = contour_segments(&[0.0, 1.0], &[0.0, 1.0], &values, 0.5);
        assert_eq!(segs.len(), 1);
        let ((ax, _), (bx, _)) = segs[0];
        assert!((ax - 0.5).abs() < 1e-9);
        assert!((bx - 0.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_cells_are_skipped() {
        let values = array![[0.0, f64::NAN], [0.0, 1.0]];
        let segs = contour_segments(&[0.0, 1.0], &[0.0, 1.0], &values, 0.5);
        assert!(segs.is_empty());
    }
}
