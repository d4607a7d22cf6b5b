//! Vector-data (VD) store: record variables held in subgroups of the file.

use super::RawVariable;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Names of all variables in the VD store.
pub fn file_variables(path: &Path) -> Result<Vec<String>> {
    let file = netcdf::open(path)?;
    let mut names = Vec::new();
    if let Ok(groups) = file.groups() {
        for group in groups {
            collect_names(&group, &mut names);
        }
    }
    Ok(names)
}

fn collect_names(group: &netcdf::Group<'_>, names: &mut Vec<String>) {
    for var in group.variables() {
        names.push(var.name().to_string());
    }
    for child in group.groups() {
        collect_names(&child, names);
    }
}

/// Read the requested variables from the VD store.
pub fn read_vd(path: &Path, variables: &[String]) -> Result<HashMap<String, RawVariable>> {
    let file = netcdf::open(path)?;
    let mut out = HashMap::new();
    if let Ok(groups) = file.groups() {
        for group in groups {
            read_group(&group, variables, &mut out)?;
        }
    }
    Ok(out)
}

fn read_group(
    group: &netcdf::Group<'_>,
    variables: &[String],
    out: &mut HashMap<String, RawVariable>,
) -> Result<()> {
    for var in group.variables() {
        let name = var.name().to_string();
        if variables.iter().any(|v| *v == name) && !out.contains_key(&name) {
            out.insert(name, super::decode_variable(&var)?);
        }
    }
    for child in group.groups() {
        read_group(&child, variables, out)?;
    }
    Ok(())
}
