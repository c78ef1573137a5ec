//! Readers for the two inputs of an overlay render.
//!
//! - [`asc`]: ESRI ASCII grids (`.asc`) holding elevation or shadow values
//! - [`osrm`]: OSRM `route` service responses holding the route geometry
//!   and snapped waypoints

pub mod asc;
pub mod osrm;

pub use asc::{load_asc, parse_asc, parse_header, AscHeader};
pub use osrm::{load_response, parse_response, RouteInput};
