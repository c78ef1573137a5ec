//! Common types shared across the route-overlay crates.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod route;

pub use bbox::BoundingBox;
pub use error::{OverlayError, OverlayResult};
pub use grid::{is_nodata_value, GridDescriptor, GridValues};
pub use route::{GeoPoint, Route, Waypoint};
