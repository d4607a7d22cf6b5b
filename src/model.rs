use crate::error::{EoplotError, Result};
use ndarray::ArrayD;
use serde::Serialize;
use std::ops::Index;
use std::sync::Arc;

/// Descriptive record attached to an axis or data item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub standard_name: String,
    /// Display name; falls back to the standard name when unset.
    pub display_name: Option<String>,
    pub units: String,
}

impl Metadata {
    pub fn new(standard_name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            standard_name: standard_name.into(),
            display_name: None,
            units: units.into(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The name shown to the user.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.standard_name)
    }

    /// Axis-label form, e.g. `"temperature (K)"`.
    pub fn label(&self) -> String {
        if self.units.is_empty() {
            self.name().to_string()
        } else {
            format!("{} ({})", self.name(), self.units)
        }
    }
}

/// Role of a coordinate within a data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AxisTag {
    X,
    Y,
    Z,
    #[default]
    Unlabeled,
}

/// A labeled axis: ordered numeric points plus metadata and a role tag.
#[derive(Debug, Clone)]
pub struct Coord {
    pub points: ArrayD<f64>,
    pub metadata: Metadata,
    pub axis: AxisTag,
}

impl Coord {
    pub fn new(points: ArrayD<f64>, metadata: Metadata, axis: AxisTag) -> Self {
        Self {
            points,
            metadata,
            axis,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn standard_name(&self) -> &str {
        &self.metadata.standard_name
    }

    /// Minimum over finite points.
    pub fn min(&self) -> Option<f64> {
        self.points
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    /// Maximum over finite points.
    pub fn max(&self) -> Option<f64> {
        self.points
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

/// Ordered list of shared coordinates with unique standard names.
#[derive(Debug, Clone, Default)]
pub struct CoordList {
    coords: Vec<Arc<Coord>>,
}

impl CoordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from coordinates, rejecting duplicate standard names.
    pub fn from_coords(coords: Vec<Arc<Coord>>) -> Result<Self> {
        let mut list = Self::new();
        for c in coords {
            list.append(c)?;
        }
        Ok(list)
    }

    /// Append a coordinate. Fails when the standard name is already present.
    pub fn append(&mut self, coord: Arc<Coord>) -> Result<()> {
        if self
            .coords
            .iter()
            .any(|c| c.standard_name() == coord.standard_name())
        {
            return Err(EoplotError::DuplicateCoordinate {
                name: coord.standard_name().to_string(),
            });
        }
        self.coords.push(coord);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Coord>> {
        self.coords.iter()
    }

    /// All coordinates whose standard or display name matches, in insertion order.
    pub fn get_coords(&self, name: &str) -> Vec<Arc<Coord>> {
        self.coords
            .iter()
            .filter(|c| c.standard_name() == name || c.name() == name)
            .cloned()
            .collect()
    }

    /// The unique coordinate with this name.
    pub fn get_coord(&self, name: &str) -> Result<Arc<Coord>> {
        self.get_coords(name)
            .into_iter()
            .next()
            .ok_or_else(|| EoplotError::CoordinateNotFound {
                name: name.to_string(),
            })
    }

    /// Coordinate for an axis role: by tag first, then by name prefix.
    pub fn axis_coord(&self, tag: AxisTag, name_prefix: &str) -> Option<Arc<Coord>> {
        self.coords
            .iter()
            .find(|c| c.axis == tag)
            .or_else(|| {
                self.coords
                    .iter()
                    .find(|c| c.name().to_lowercase().starts_with(name_prefix))
            })
            .cloned()
    }
}

impl Index<usize> for CoordList {
    type Output = Arc<Coord>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.coords[idx]
    }
}

/// A named array of values with metadata and shared references to its axes.
///
/// Invalid samples are NaN; fill values are mapped at read time.
#[derive(Debug, Clone)]
pub struct DataItem {
    pub values: ArrayD<f64>,
    pub metadata: Metadata,
    pub coords: CoordList,
}

impl DataItem {
    pub fn new(values: ArrayD<f64>, metadata: Metadata, coords: CoordList) -> Self {
        Self {
            values,
            metadata,
            coords,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn label(&self) -> String {
        self.metadata.label()
    }

    /// The coordinate playing the x role for this item.
    pub fn x_coord(&self) -> Option<Arc<Coord>> {
        self.coords.axis_coord(AxisTag::X, "lon")
    }

    /// The coordinate playing the y role for this item.
    pub fn y_coord(&self) -> Option<Arc<Coord>> {
        self.coords.axis_coord(AxisTag::Y, "lat")
    }

    /// Number of finite samples.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Minimum over finite samples.
    pub fn min(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    /// Maximum over finite samples.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}
