mod common;

use common::create_ungridded_file;
use eoplot::colocate::{self, SamplePoint, haversine};
use eoplot::parse::{Command, parse_args};
use tempfile::TempDir;

#[test]
fn sample_points_come_from_the_implicit_coordinates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.nc");
    create_ungridded_file(&path, 5).unwrap();

    let points = colocate::load_sample_points(&path).unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(
        points[0],
        SamplePoint {
            lat: -30.0,
            lon: 10.0
        }
    );
}

#[test]
fn collocating_a_file_onto_itself_reproduces_the_values() {
    let dir = TempDir::new().unwrap();
    let sample = dir.path().join("sample.nc");
    let data = dir.path().join("data.nc");
    create_ungridded_file(&sample, 6).unwrap();
    create_ungridded_file(&data, 6).unwrap();
    let out = dir.path().join("out.csv");

    let parsed = parse_args(vec![
        "col".to_string(),
        sample.display().to_string(),
        format!("{}:AOT_500:nn", data.display()),
        "-o".to_string(),
        out.display().to_string(),
    ])
    .unwrap();
    let config = match parsed {
        Command::Col(config) => config,
        other => panic!("expected col command, got {other:?}"),
    };

    let rows = colocate::collocate(&config).unwrap();
    assert_eq!(rows, 6);

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    assert_eq!(
        rdr.headers().unwrap(),
        &csv::StringRecord::from(vec!["latitude", "longitude", "AOT_500"])
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 6);
    // Sample and data share coordinates, so the nearest neighbour is exact.
    let v: f64 = records[2][2].parse().unwrap();
    assert!((v - 0.2).abs() < 1e-9);
}

#[test]
fn unknown_method_fails_the_collocation() {
    let dir = TempDir::new().unwrap();
    let sample = dir.path().join("sample.nc");
    create_ungridded_file(&sample, 3).unwrap();
    let out = dir.path().join("out.csv");

    let parsed = parse_args(vec![
        "col".to_string(),
        sample.display().to_string(),
        format!("{}:AOT_500:li", sample.display()),
        "-o".to_string(),
        out.display().to_string(),
    ])
    .unwrap();
    let config = match parsed {
        Command::Col(config) => config,
        other => panic!("expected col command, got {other:?}"),
    };

    let err = colocate::collocate(&config);
    assert!(matches!(
        err,
        Err(eoplot::EoplotError::UnknownMethod { name }) if name == "li"
    ));
}

#[test]
fn haversine_is_symmetric_and_zero_at_identity() {
    let a = SamplePoint {
        lat: 52.5,
        lon: 13.4,
    };
    let b = SamplePoint {
        lat: 48.9,
        lon: 2.35,
    };
    assert_eq!(haversine(a, a), 0.0);
    assert!((haversine(a, b) - haversine(b, a)).abs() < 1e-9);
    // Berlin to Paris is roughly 880 km.
    assert!((haversine(a, b) - 880.0).abs() < 30.0);
}
