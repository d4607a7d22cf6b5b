//! Data unpacking: normalize data items into the (x, y, data) forms the
//! chart shapes draw. Every chart shape has a total unpacking path here;
//! there is no partial default to override.

use super::format::is_map;
use super::types::PlotKind;
use crate::error::{EoplotError, Result};
use crate::model::DataItem;
use ndarray::{Array2, ArrayD};

/// One axis-vs-data series ready for drawing.
#[derive(Debug, Clone)]
pub struct SeriesXY {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: String,
    pub xlabel: String,
}

/// 2-D data on its own axes, values indexed `[y, x]`.
#[derive(Debug, Clone)]
pub struct GridData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub values: Array2<f64>,
    pub xlabel: String,
    pub ylabel: String,
    pub label: String,
    pub units: String,
    pub map: bool,
}

/// Two aligned series compared against each other.
#[derive(Debug, Clone)]
pub struct ComparativeData {
    pub first: ArrayD<f64>,
    pub second: ArrayD<f64>,
    pub xlabel: String,
    pub ylabel: String,
}

/// Normalized plot input per chart shape.
#[derive(Debug, Clone)]
pub enum Unpacked {
    Series(Vec<SeriesXY>),
    Histogram { values: ArrayD<f64>, label: String },
    Grid(GridData),
    Comparative(ComparativeData),
}

/// Unpack data items for a chart shape.
pub fn unpack(kind: PlotKind, items: &[DataItem]) -> Result<Unpacked> {
    match kind {
        PlotKind::Line | PlotKind::Scatter => {
            let series = items
                .iter()
                .map(unpack_series)
                .collect::<Result<Vec<_>>>()?;
            Ok(Unpacked::Series(series))
        }
        PlotKind::Histogram => {
            let item = expect_items(items, 1)?;
            Ok(Unpacked::Histogram {
                values: item[0].values.clone(),
                label: item[0].label(),
            })
        }
        PlotKind::Heatmap | PlotKind::Contour => {
            let item = expect_items(items, 1)?;
            unpack_grid(&item[0]).map(Unpacked::Grid)
        }
        PlotKind::ComparativeScatter | PlotKind::Histogram2d => {
            let pair = expect_items(items, 2)?;
            Ok(Unpacked::Comparative(ComparativeData {
                first: pair[0].values.clone(),
                second: pair[1].values.clone(),
                xlabel: pair[0].label(),
                ylabel: pair[1].label(),
            }))
        }
    }
}

fn expect_items(items: &[DataItem], expected: usize) -> Result<&[DataItem]> {
    if items.len() != expected {
        return Err(EoplotError::InvalidNumberOfDatagroups {
            expected,
            actual: items.len(),
        });
    }
    Ok(items)
}

/// Axis-vs-data: x from the item's x coordinate (sample index when the item
/// carries no coordinates), y from the values.
fn unpack_series(item: &DataItem) -> Result<SeriesXY> {
    let y: Vec<f64> = item.values.iter().copied().collect();
    let coord = item
        .x_coord()
        .or_else(|| (!item.coords.is_empty()).then(|| item.coords[0].clone()));
    let (x, xlabel): (Vec<f64>, String) = match coord {
        Some(coord) => (
            coord.points.iter().copied().collect(),
            coord.metadata.label(),
        ),
        None => (
            (0..y.len()).map(|i| i as f64).collect(),
            "sample".to_string(),
        ),
    };
    if x.len() != y.len() {
        return Err(EoplotError::ShapeMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(SeriesXY {
        x,
        y,
        label: item.label(),
        xlabel,
    })
}

/// 2-D values against their x/y axes, transposing when the array is stored
/// x-major.
fn unpack_grid(item: &DataItem) -> Result<GridData> {
    let ndim = item.values.ndim();
    let values = item
        .values
        .clone()
        .into_dimensionality::<ndarray::Ix2>()
        .map_err(|_| EoplotError::NotTwoDimensional { ndim })?;

    let xcoord = item
        .x_coord()
        .ok_or_else(|| EoplotError::CoordinateNotFound {
            name: "x axis".to_string(),
        })?;
    let ycoord = item
        .y_coord()
        .ok_or_else(|| EoplotError::CoordinateNotFound {
            name: "y axis".to_string(),
        })?;
    let x: Vec<f64> = xcoord.points.iter().copied().collect();
    let y: Vec<f64> = ycoord.points.iter().copied().collect();

    let values = if values.shape() == [y.len(), x.len()] {
        values
    } else if values.shape() == [x.len(), y.len()] {
        values.reversed_axes().as_standard_layout().to_owned()
    } else {
        return Err(EoplotError::ShapeMismatch {
            expected: x.len() * y.len(),
            actual: values.len(),
        });
    };

    Ok(GridData {
        map: is_map(xcoord.name(), ycoord.name()),
        xlabel: xcoord.metadata.label(),
        ylabel: ycoord.metadata.label(),
        label: item.label(),
        units: item.metadata.units.clone(),
        x,
        y,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AxisTag, Coord, CoordList, Metadata};
    use ndarray::array;
    use std::sync::Arc;

    fn grid_item() -> DataItem {
        let lon = Arc::new(Coord::new(
            array![0.0, 10.0, 20.0].into_dyn(),
            Metadata::new("longitude", "degrees_east"),
            AxisTag::X,
        ));
        let lat = Arc::new(Coord::new(
            array![-5.0, 5.0].into_dyn(),
            Metadata::new("latitude", "degrees_north"),
            AxisTag::Y,
        ));
        let coords = CoordList::from_coords(vec![lon, lat]).unwrap();
        DataItem::new(
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn(),
            Metadata::new("tau", ""),
            coords,
        )
    }

    #[test]
    fn grid_unpack_detects_map_axes() {
        let grid = match unpack(PlotKind::Heatmap, &[grid_item()]).unwrap() {
            Unpacked::Grid(g) => g,
            other => panic!("expected grid, got {other:?}"),
        };
        assert!(grid.map);
        assert_eq!(grid.values.shape(), [2, 3]);
        assert_eq!(grid.x, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn grid_unpack_transposes_x_major_values() {
        let mut item = grid_item();
        item.values = array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]].into_dyn();
        let grid = match unpack(PlotKind::Heatmap, &[item]).unwrap() {
            Unpacked::Grid(g) => g,
            other => panic!("expected grid, got {other:?}"),
        };
        assert_eq!(grid.values.shape(), [2, 3]);
        assert_eq!(grid.values[[0, 2]], 3.0);
    }

    #[test]
    fn comparative_unpack_requires_two_groups() {
        let err = unpack(PlotKind::Histogram2d, &[grid_item()]);
        assert!(matches!(
            err,
            Err(EoplotError::InvalidNumberOfDatagroups {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn series_unpack_falls_back_to_sample_index() {
        let item = DataItem::new(
            array![5.0, 6.0, 7.0].into_dyn(),
            Metadata::new("tau", ""),
            CoordList::new(),
        );
        let series = match unpack(PlotKind::Line, &[item]).unwrap() {
            Unpacked::Series(s) => s,
            other => panic!("expected series, got {other:?}"),
        };
        assert_eq!(series[0].x, vec![0.0, 1.0, 2.0]);
    }
}
