//! Plotting: chart strategies, shared formatting, and rendering.
//!
//! Chart shapes are concrete strategies resolved through the
//! [`types::plot_types`] registry; each has a total unpack
//! ([`unpack::unpack`]) and draw implementation, with shared axis formatting
//! applied as a separate step ([`format::AxesStyle`]).

pub mod colormap;
pub mod contour;
pub mod format;
pub mod histogram;
pub mod histogram2d;
pub mod render;
pub mod types;
pub mod unpack;

pub use colormap::ColourMap;
pub use render::render_plot;
pub use types::{CbarOrient, LineStyle, PlotKind, PlotTypeEntry, plot_types, valid_type_names};
