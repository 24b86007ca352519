//! Heuristic background removal for decoded rasters.
//!
//! Pixels are classified as background by color similarity: checker colors
//! sampled near the corners, colors picked by the user, the average border
//! color, or low brightness (shadows). Classified pixels are either made
//! transparent ([`process`]) or highlighted for review ([`preview_mask`]).

pub mod cluster;
pub mod color;
pub mod composite;
pub mod detect;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod preview;
pub mod raster;
pub mod region;
pub mod report;
pub mod session;

pub use color::Color;
pub use error::{BgError, Result};
pub use options::{PolicyBundle, ProcessingOptions};
pub use pipeline::{preview_mask, preview_with_report, process, process_with_report};
pub use raster::{Channels, Raster};
pub use report::RemovalReport;
pub use session::Session;
