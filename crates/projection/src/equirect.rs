//! Equirectangular (plate carrée) grid projection.
//!
//! The grid's origin is its lower-left (south-west) corner, but pixel row 0
//! is the northernmost row. Rows are therefore counted southwards from the
//! north edge at `origin_y + rows * cell_size`.
//!
//! No clamping is applied: coordinates outside the grid extent map to pixel
//! positions outside `[0, columns) x [0, rows)`, and the drawing layer is
//! expected to clip them.

use overlay_common::{GeoPoint, GridDescriptor};

/// Integer pixel position; may lie outside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: i64,
    pub y: i64,
}

impl PixelCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Convert geographic coordinates (lat/lon) to a pixel position on the grid.
///
/// `pixel_x = floor((lon - origin_x) / cell_size)` and
/// `pixel_y = floor((north_edge - lat) / cell_size)`.
pub fn project(lat: f64, lon: f64, descriptor: &GridDescriptor) -> PixelCoord {
    let x = ((lon - descriptor.origin_x) / descriptor.cell_size).floor();
    let y = ((descriptor.north_edge() - lat) / descriptor.cell_size).floor();

    // `as` saturates at the i64 range, which is far beyond any raster.
    PixelCoord::new(x as i64, y as i64)
}

/// Projector bound to one grid.
///
/// Stateless apart from the copied descriptor, so it can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridProjector {
    descriptor: GridDescriptor,
}

impl GridProjector {
    pub fn new(descriptor: GridDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &GridDescriptor {
        &self.descriptor
    }

    /// Convert lat/lon in grid units to a pixel position.
    pub fn project(&self, lat: f64, lon: f64) -> PixelCoord {
        project(lat, lon, &self.descriptor)
    }

    /// Project a `[lon, lat]` point.
    pub fn project_point(&self, point: GeoPoint) -> PixelCoord {
        self.project(point.lat, point.lon)
    }

    /// Geographic coordinate of a pixel's north-west corner.
    pub fn pixel_to_geo(&self, x: i64, y: i64) -> GeoPoint {
        let d = &self.descriptor;
        GeoPoint::new(
            d.origin_x + x as f64 * d.cell_size,
            d.north_edge() - y as f64 * d.cell_size,
        )
    }

    /// Whether a pixel position falls on the raster.
    pub fn contains_pixel(&self, pixel: PixelCoord) -> bool {
        pixel.x >= 0
            && pixel.y >= 0
            && pixel.x < self.descriptor.columns as i64
            && pixel.y < self.descriptor.rows as i64
    }

    /// Whether a geographic point lands on the raster.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.contains_pixel(self.project_point(point))
    }

    /// Get raster dimensions (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.descriptor.columns, self.descriptor.rows)
    }
}
