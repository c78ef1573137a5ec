//! Image rendering for route overlays.
//!
//! Implements the rendering pipeline:
//! - Grayscale raster from gridded values
//! - Route polyline, waypoint markers and labels on a transparent layer
//! - Alpha compositing of the layer over the raster
//! - PNG encoding of the result

pub mod label;
pub mod overlay;
pub mod png;
pub mod raster;
pub mod style;

pub use label::LabelFont;
pub use overlay::{render, Compositor};
pub use raster::{build_raster, promote_to_rgba, value_range, ValueRange};
pub use style::OverlayStyle;
