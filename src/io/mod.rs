//! File readers: extract raw arrays from SD/VD dual-store scientific files
//! and wrap them into the data model.
//!
//! The container format is accessed through the `netcdf` bindings; the SD
//! ("scientific dataset") store maps to root-level variables and the VD
//! ("vector data") store to record variables in subgroups. Requested
//! variables are always augmented with the implicit coordinate variables
//! carried by ungridded products.

pub mod sd;
pub mod vd;

use crate::error::{EoplotError, Result};
use crate::model::{AxisTag, Coord, CoordList, DataItem, Metadata};
use log::debug;
use ndarray::{ArrayD, IxDyn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Coordinate variables fetched alongside every read.
pub const IMPLICIT_COORD_VARIABLES: [&str; 5] = [
    "Latitude",
    "Longitude",
    "TAI_start",
    "Profile_time",
    "Height",
];

/// A decoded variable before model wrapping.
#[derive(Debug, Clone)]
pub struct RawVariable {
    pub values: ArrayD<f64>,
    pub dims: Vec<String>,
    pub units: String,
    pub long_name: Option<String>,
}

/// Per-variable detail for `info` output.
#[derive(Debug, Clone, Serialize)]
pub struct VariableInfo {
    pub name: String,
    pub shape: Vec<usize>,
    pub units: String,
    pub long_name: Option<String>,
}

/// Decode one variable: values as f64 with fill values mapped to NaN and
/// `scale_factor`/`add_offset` applied.
pub(crate) fn decode_variable(var: &netcdf::Variable<'_>) -> Result<RawVariable> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let dims: Vec<String> = var
        .dimensions()
        .iter()
        .map(|d| d.name().to_string())
        .collect();

    let raw: Vec<f64> = var.get_values(..)?;

    let fill = attr_f64(var, "_FillValue").or_else(|| attr_f64(var, "missing_value"));
    let scale = attr_f64(var, "scale_factor").unwrap_or(1.0);
    let offset = attr_f64(var, "add_offset").unwrap_or(0.0);

    let values: Vec<f64> = raw
        .into_iter()
        .map(|v| {
            if !v.is_finite() || fill.is_some_and(|f| v == f) {
                f64::NAN
            } else {
                v * scale + offset
            }
        })
        .collect();

    let values = ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| EoplotError::NetCdf(e.to_string()))?;

    Ok(RawVariable {
        values,
        dims,
        units: attr_string(var, "units").unwrap_or_default(),
        long_name: attr_string(var, "long_name"),
    })
}

fn attr_f64(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    use netcdf::AttributeValue;
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        _ => None,
    }
}

fn attr_string(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    use netcdf::AttributeValue;
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(v) => Some(v),
        _ => None,
    }
}

/// Merged SD and VD variable name lists for a file.
pub fn file_variables(path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let sd_vars = sd::file_variables(path)?;
    let vd_vars = vd::file_variables(path)?;
    Ok((sd_vars, vd_vars))
}

/// Read raw variables, attempting the SD store first and falling back to the
/// VD store. Variables not found in the SD store are looked up in the VD
/// store; a failure of both surfaces a combined file-I/O error naming the
/// file. No further retries.
fn read_raw(path: &Path, variables: &[String]) -> Result<HashMap<String, RawVariable>> {
    match sd::read_sd(path, variables) {
        Ok(mut found) => {
            let missing: Vec<String> = variables
                .iter()
                .filter(|v| !found.contains_key(*v))
                .cloned()
                .collect();
            if !missing.is_empty() {
                match vd::read_vd(path, &missing) {
                    Ok(extra) => found.extend(extra),
                    Err(e) => debug!("VD store lookup failed for {}: {e}", path.display()),
                }
            }
            Ok(found)
        }
        Err(sd_err) => {
            debug!("SD store read failed for {}: {sd_err}", path.display());
            vd::read_vd(path, variables).map_err(|vd_err| EoplotError::FileIo {
                path: path.to_path_buf(),
                detail: format!("{sd_err}; {vd_err}"),
            })
        }
    }
}

fn axis_tag_for(name: &str) -> AxisTag {
    let lower = name.to_lowercase();
    if lower.starts_with("lon") {
        AxisTag::X
    } else if lower.starts_with("lat") {
        AxisTag::Y
    } else if lower.starts_with("height") || lower.starts_with("alt") || lower.starts_with("lev") {
        AxisTag::Z
    } else {
        AxisTag::Unlabeled
    }
}

/// Read the requested variables from a file into data items.
///
/// Coordinates come from the variable's own dimension coordinate variables
/// plus the implicit coordinate variables when present; all items from one
/// file share the same coordinate objects.
pub fn read(path: &Path, variables: &[String]) -> Result<Vec<DataItem>> {
    let mut requested: Vec<String> = variables.to_vec();
    for name in IMPLICIT_COORD_VARIABLES {
        if !requested.iter().any(|v| v == name) {
            requested.push(name.to_string());
        }
    }
    let raw = read_raw(path, &requested)?;

    // Dimension coordinate variables referenced by the requested variables.
    let (sd_names, vd_names) = file_variables(path)?;
    let mut all_names = requested.clone();
    for name in variables {
        if let Some(rv) = raw.get(name) {
            for dim in &rv.dims {
                let is_var = sd_names.iter().any(|n| n == dim) || vd_names.iter().any(|n| n == dim);
                if is_var && !all_names.contains(dim) {
                    all_names.push(dim.clone());
                }
            }
        }
    }
    let raw = if all_names.len() == requested.len() {
        raw
    } else {
        read_raw(path, &all_names)?
    };

    // Shared coordinate list: everything read that is not a requested data
    // variable becomes an axis, in request order.
    let mut coords = CoordList::new();
    for name in &all_names {
        if variables.iter().any(|v| v == name) {
            continue;
        }
        if let Some(rv) = raw.get(name) {
            coords.append(Arc::new(Coord::new(
                rv.values.clone(),
                Metadata::new(name.clone(), rv.units.clone()),
                axis_tag_for(name),
            )))?;
        }
    }

    let mut items = Vec::new();
    for name in variables {
        let rv = raw
            .get(name)
            .ok_or_else(|| EoplotError::VariableNotFound { name: name.clone() })?;
        let mut metadata = Metadata::new(name.clone(), rv.units.clone());
        if let Some(long_name) = &rv.long_name {
            metadata = metadata.with_display_name(long_name.clone());
        }
        items.push(DataItem::new(rv.values.clone(), metadata, coords.clone()));
    }
    Ok(items)
}

/// Per-variable detail used by the `info` subcommand.
pub fn describe(path: &Path, variables: &[String]) -> Result<Vec<VariableInfo>> {
    let raw = read_raw(path, variables)?;
    let mut out = Vec::new();
    for name in variables {
        let rv = raw
            .get(name)
            .ok_or_else(|| EoplotError::VariableNotFound { name: name.clone() })?;
        out.push(VariableInfo {
            name: name.clone(),
            shape: rv.values.shape().to_vec(),
            units: rv.units.clone(),
            long_name: rv.long_name.clone(),
        });
    }
    Ok(out)
}
