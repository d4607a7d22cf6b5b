//! Error types for eoplot.
//!
//! One `thiserror` enum covers the data model, the file readers, and the
//! plotting pipeline. CLI usage errors are reported through `clap` and never
//! reach this enum.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for eoplot operations.
pub type Result<T> = std::result::Result<T, EoplotError>;

/// Errors that can occur in eoplot.
#[derive(Debug, Error)]
pub enum EoplotError {
    /// A coordinate with this standard name is already in the list.
    #[error("Duplicate coordinate: {name}")]
    DuplicateCoordinate { name: String },

    /// No coordinate with this name was found.
    #[error("Coordinate not found: {name}")]
    CoordinateNotFound { name: String },

    /// A comparative plot was given the wrong number of data groups.
    #[error("Invalid number of data groups: expected {expected}, got {actual}")]
    InvalidNumberOfDatagroups { expected: usize, actual: usize },

    /// Two series could not be aligned to a common shape.
    #[error("Cannot reshape data of {actual} values to match {expected} values")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Gridded chart shapes need 2-D values.
    #[error("Expected 2-D data, got {ndim} dimension(s)")]
    NotTwoDimensional { ndim: usize },

    /// Plot type name is not in the registry.
    #[error("'{name}' is not a valid plot type")]
    UnknownPlotType { name: String },

    /// Colour map name is not recognized.
    #[error("'{name}' is not a valid colour map")]
    UnknownColourMap { name: String },

    /// Collocation method name is not recognized.
    #[error("'{name}' is not a valid collocation method")]
    UnknownMethod { name: String },

    /// Variable missing from both the SD and VD stores.
    #[error("Variable not found: {name}")]
    VariableNotFound { name: String },

    /// Both variable stores failed for a file.
    #[error("{detail} for file: {path}")]
    FileIo { path: PathBuf, detail: String },

    /// Nothing valid to plot after masking.
    #[error("No valid data points to plot")]
    EmptyData,

    /// Failed to read the underlying scientific file.
    #[error("NetCDF error: {0}")]
    NetCdf(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Drawing backend failure.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<netcdf::Error> for EoplotError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCdf(err.to_string())
    }
}
