mod common;

use assert_cmd::prelude::*;
use common::{create_gridded_file, create_ungridded_file};
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("eoplot"));
}

#[test]
fn missing_file_fails_before_processing() {
    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args(["plot", "AOT_500:/no/such/file.nc"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid filename"));
}

#[test]
fn unknown_plot_type_lists_the_valid_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("swath.nc");
    create_ungridded_file(&path, 4).unwrap();

    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args([
        "plot",
        &format!("AOT_500:{}", path.display()),
        "--type",
        "piechart",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a valid plot type"))
        .stderr(predicate::str::contains("histogram2d"));
}

#[test]
fn malformed_col_spec_fails_with_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.nc");
    create_ungridded_file(&path, 4).unwrap();

    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args([
        "col",
        &path.display().to_string(),
        &format!("{}:onlyonecolon", path.display()),
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("filename:variable:method"));
}

#[test]
fn info_prints_variable_stores() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.nc");
    create_gridded_file(&path).unwrap();

    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args(["info", &path.display().to_string(), "-v", "temperature"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SD variables"))
        .stdout(predicate::str::contains("temperature"))
        .stdout(predicate::str::contains("K"));
}

#[test]
fn info_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.nc");
    create_gridded_file(&path).unwrap();

    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args(["info", &path.display().to_string(), "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let doc: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(
        doc["sd_variables"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "temperature")
    );
}

#[test]
fn plot_end_to_end_writes_the_output_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.nc");
    create_gridded_file(&path).unwrap();
    let out = dir.path().join("map.png");

    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args([
        "plot",
        &format!("temperature:{}", path.display()),
        "--type",
        "heatmap",
        "--grid",
        "--cmap",
        "viridis",
        "-o",
        &out.display().to_string(),
    ]);
    cmd.assert().success();
    assert!(out.exists());
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn histogram2d_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("swath.nc");
    create_ungridded_file(&path, 16).unwrap();
    let out = dir.path().join("hist2d.svg");

    let mut cmd = Command::cargo_bin("eoplot").unwrap();
    cmd.args([
        "plot",
        &format!("AOT_500:{}", path.display()),
        &format!("AOT_870:{}", path.display()),
        "--type",
        "histogram2d",
        "--cbarorient",
        "vertical",
        "-o",
        &out.display().to_string(),
    ]);
    cmd.assert().success();
    assert!(out.exists());
}
