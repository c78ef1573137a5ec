//! Route overlay rendering service.
//!
//! Loads an ESRI ASCII grid and an OSRM route response, composites the route
//! over a grayscale rendering of the grid and writes the result as PNG.

pub mod config;
pub mod pipeline;

pub use config::{resolve_style, StyleFile};
pub use pipeline::{run, write_atomic, RunOptions, RunSummary};
