//! Collocation: map data variables onto the coordinate points of a sample
//! file and write the result as CSV.

use crate::error::{EoplotError, Result};
use crate::io;
use crate::model::AxisTag;
use crate::parse::ColConfig;
use csv::WriterBuilder;
use log::info;
use std::path::Path;

/// One sample location from the sample file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub lat: f64,
    pub lon: f64,
}

/// Supported collocation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    NearestNeighbour,
}

impl Method {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "nn" | "nearest" => Ok(Self::NearestNeighbour),
            _ => Err(EoplotError::UnknownMethod {
                name: name.to_string(),
            }),
        }
    }
}

/// Great-circle distance in kilometres.
pub fn haversine(a: SamplePoint, b: SamplePoint) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Load the sample file's Latitude/Longitude point list.
pub fn load_sample_points(path: &Path) -> Result<Vec<SamplePoint>> {
    let items = io::read(path, &["Latitude".to_string(), "Longitude".to_string()])?;
    let lat = &items[0].values;
    let lon = &items[1].values;
    if lat.len() != lon.len() {
        return Err(EoplotError::ShapeMismatch {
            expected: lat.len(),
            actual: lon.len(),
        });
    }
    Ok(lat
        .iter()
        .zip(lon.iter())
        .map(|(&lat, &lon)| SamplePoint { lat, lon })
        .collect())
}

struct DataColumn {
    name: String,
    values: Vec<f64>,
}

/// Nearest-neighbour lookup: for each sample point, the value at the closest
/// valid data point.
fn nearest_neighbour(
    samples: &[SamplePoint],
    points: &[SamplePoint],
    values: &[f64],
) -> Vec<f64> {
    samples
        .iter()
        .map(|sample| {
            let mut best = f64::NAN;
            let mut best_dist = f64::INFINITY;
            for (p, v) in points.iter().zip(values.iter()) {
                if !v.is_finite() || !p.lat.is_finite() || !p.lon.is_finite() {
                    continue;
                }
                let d = haversine(*sample, *p);
                if d < best_dist {
                    best_dist = d;
                    best = *v;
                }
            }
            best
        })
        .collect()
}

fn collocate_file(
    samples: &[SamplePoint],
    filename: &Path,
    variable: &str,
    method: Method,
) -> Result<DataColumn> {
    let items = io::read(filename, &[variable.to_string()])?;
    let item = &items[0];

    let lat = item
        .coords
        .axis_coord(AxisTag::Y, "lat")
        .ok_or_else(|| EoplotError::CoordinateNotFound {
            name: "Latitude".to_string(),
        })?;
    let lon = item
        .coords
        .axis_coord(AxisTag::X, "lon")
        .ok_or_else(|| EoplotError::CoordinateNotFound {
            name: "Longitude".to_string(),
        })?;

    let values: Vec<f64> = item.values.iter().copied().collect();
    let points: Vec<SamplePoint> = lat
        .points
        .iter()
        .zip(lon.points.iter())
        .map(|(&lat, &lon)| SamplePoint { lat, lon })
        .collect();
    if points.len() != values.len() {
        return Err(EoplotError::ShapeMismatch {
            expected: points.len(),
            actual: values.len(),
        });
    }

    let values = match method {
        Method::NearestNeighbour => nearest_neighbour(samples, &points, &values),
    };
    Ok(DataColumn {
        name: variable.to_string(),
        values,
    })
}

/// Run a collocation request and return the number of sample rows written.
pub fn collocate(config: &ColConfig) -> Result<usize> {
    let samples = load_sample_points(&config.samplefile)?;
    info!(
        "collocating {} data file(s) onto {} sample points",
        config.datafiles.len(),
        samples.len()
    );

    let mut columns = Vec::new();
    for spec in &config.datafiles {
        let variable =
            spec.variable
                .as_deref()
                .ok_or_else(|| EoplotError::VariableNotFound {
                    name: format!("{} (no variable specified)", spec.filename.display()),
                })?;
        let method = match spec.method.as_deref() {
            Some(name) => Method::from_name(name)?,
            None => Method::default(),
        };
        columns.push(collocate_file(&samples, &spec.filename, variable, method)?);
    }

    let mut wtr = WriterBuilder::new().from_path(&config.output)?;
    let mut header = vec!["latitude".to_string(), "longitude".to_string()];
    header.extend(columns.iter().map(|c| c.name.clone()));
    wtr.write_record(&header)?;
    for (i, sample) in samples.iter().enumerate() {
        let mut row = vec![sample.lat.to_string(), sample.lon.to_string()];
        for column in &columns {
            let v = column.values[i];
            row.push(if v.is_finite() {
                v.to_string()
            } else {
                String::new()
            });
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_equator_degree() {
        let a = SamplePoint { lat: 0.0, lon: 0.0 };
        let b = SamplePoint { lat: 0.0, lon: 1.0 };
        let d = haversine(a, b);
        assert!((d - 111.2).abs() < 1.0, "got {d}");
    }

    #[test]
    fn nearest_neighbour_picks_closest_valid() {
        let samples = [SamplePoint { lat: 0.0, lon: 0.0 }];
        let points = [
            SamplePoint { lat: 0.0, lon: 0.1 },
            SamplePoint { lat: 0.0, lon: 5.0 },
        ];
        let out = nearest_neighbour(&samples, &points, &[f64::NAN, 7.0]);
        assert_eq!(out, vec![7.0]);
    }

    #[test]
    fn unknown_method_is_an_error() {
        assert!(Method::from_name("nn").is_ok());
        assert!(matches!(
            Method::from_name("li"),
            Err(EoplotError::UnknownMethod { .. })
        ));
    }
}
