//! Shared fixtures: create small scientific files for integration tests.

use std::error::Error;
use std::path::Path;

/// An ungridded product: 1-D data variables over a `points` dimension plus
/// the implicit coordinate variables.
pub fn create_ungridded_file(path: &Path, n: usize) -> Result<(), Box<dyn Error>> {
    let mut file = netcdf::create(path)?;
    file.add_dimension("points", n)?;

    let coords: [(&str, &str, fn(usize) -> f64); 5] = [
        ("Latitude", "degrees_north", |i| -30.0 + i as f64),
        ("Longitude", "degrees_east", |i| 10.0 + 2.0 * i as f64),
        ("Height", "m", |i| 100.0 * i as f64),
        ("Profile_time", "s", |i| i as f64 * 0.16),
        ("TAI_start", "s", |_| 5.5e8),
    ];
    for (name, units, r#gen) in coords {
        let mut var = file.add_variable::<f64>(name, &["points"])?;
        var.put_attribute("units", units)?;
        let data: Vec<f64> = (0..n).map(r#gen).collect();
        var.put_values(&data, ..)?;
    }

    let mut aot = file.add_variable::<f64>("AOT_500", &["points"])?;
    aot.put_attribute("units", "1")?;
    aot.put_attribute("long_name", "Aerosol optical thickness at 500nm")?;
    let data: Vec<f64> = (0..n).map(|i| 0.1 + 0.05 * i as f64).collect();
    aot.put_values(&data, ..)?;

    let mut aot2 = file.add_variable::<f64>("AOT_870", &["points"])?;
    aot2.put_attribute("units", "1")?;
    aot2.put_attribute("_FillValue", -999.0f64)?;
    let data: Vec<f64> = (0..n)
        .map(|i| if i == 0 { -999.0 } else { 0.08 + 0.04 * i as f64 })
        .collect();
    aot2.put_values(&data, ..)?;

    Ok(())
}

/// A gridded product: a 2-D `temperature` variable over `lat`/`lon`
/// coordinate variables.
pub fn create_gridded_file(path: &Path) -> Result<(), Box<dyn Error>> {
    let (nlat, nlon) = (4usize, 5usize);
    let mut file = netcdf::create(path)?;
    file.add_dimension("lat", nlat)?;
    file.add_dimension("lon", nlon)?;

    let mut lat = file.add_variable::<f64>("lat", &["lat"])?;
    lat.put_attribute("units", "degrees_north")?;
    let data: Vec<f64> = (0..nlat).map(|i| -45.0 + 30.0 * i as f64).collect();
    lat.put_values(&data, ..)?;

    let mut lon = file.add_variable::<f64>("lon", &["lon"])?;
    lon.put_attribute("units", "degrees_east")?;
    let data: Vec<f64> = (0..nlon).map(|i| -120.0 + 60.0 * i as f64).collect();
    lon.put_values(&data, ..)?;

    let mut temp = file.add_variable::<f64>("temperature", &["lat", "lon"])?;
    temp.put_attribute("units", "K")?;
    let data: Vec<f64> = (0..nlat * nlon).map(|i| 250.0 + i as f64).collect();
    temp.put_values(&data, ..)?;

    Ok(())
}
