//! eoplot
//!
//! A lightweight Rust library for loading, inspecting, collocating, and
//! plotting gridded and ungridded earth-observation data. Pairs with the
//! `eoplot` CLI.
//!
//! ### Features
//! - Read variables from SD/VD dual-store scientific files (via the
//!   `netcdf` bindings), with implicit coordinate variables attached
//! - A coordinate/data model with shared axes and duplicate-name protection
//! - Line, scatter, histogram, heatmap, contour, and comparative charts
//!   rendered to SVG/PNG, with map-aware tick formatting and colour bars
//! - Nearest-neighbour collocation of data files onto a sample file's points
//!
//! ### Example
//! ```no_run
//! use eoplot::parse::{Command, parse_args};
//!
//! let command = parse_args(["plot", "AOT_500:aerosol.hdf", "--type", "scatter"])?;
//! if let Command::Plot(mut config) = command {
//!     let spec = &config.series[0];
//!     let items = eoplot::io::read(&spec.filename, &[spec.variable.clone()])?;
//!     let out = eoplot::plot::render_plot(&items, &mut config)?;
//!     println!("wrote {}", out.display());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod colocate;
pub mod error;
pub mod io;
pub mod model;
pub mod parse;
pub mod plot;

pub use error::{EoplotError, Result};
pub use model::{AxisTag, Coord, CoordList, DataItem, Metadata};
pub use parse::{Command, parse_args};
