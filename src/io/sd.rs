//! Scientific-dataset (SD) store: variables held at the root of the file.

use super::RawVariable;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Names of all variables in the SD store.
pub fn file_variables(path: &Path) -> Result<Vec<String>> {
    let file = netcdf::open(path)?;
    Ok(file.variables().map(|v| v.name().to_string()).collect())
}

/// Read the requested variables from the SD store.
///
/// Variables absent from the store are skipped; opening or decoding failures
/// propagate so the caller can fall back to the VD store.
pub fn read_sd(path: &Path, variables: &[String]) -> Result<HashMap<String, RawVariable>> {
    let file = netcdf::open(path)?;
    let mut out = HashMap::new();
    for name in variables {
        if let Some(var) = file.variable(name) {
            out.insert(name.clone(), super::decode_variable(&var)?);
        }
    }
    Ok(out)
}
