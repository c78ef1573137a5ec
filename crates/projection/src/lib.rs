//! Coordinate transformations from geographic space to raster pixels.
//!
//! Only the north-up equirectangular grid model is supported: a grid defined
//! by its lower-left corner, a square cell size and a row count.

pub mod equirect;

pub use equirect::{project, GridProjector, PixelCoord};
