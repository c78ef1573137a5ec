//! Grayscale raster from gridded values.
//!
//! Cells equal to the nodata sentinel are masked out of the min/max
//! computation and rendered as 0. Valid cells are stretched linearly onto
//! 0-255.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use overlay_common::{is_nodata_value, GridDescriptor, GridValues, OverlayResult};

/// Range of the valid (non-nodata) cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub valid_count: usize,
}

impl ValueRange {
    /// True when every valid cell holds the same value.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Map a valid value onto 0-255.
    ///
    /// A degenerate range maps everything to 0 instead of dividing by zero.
    pub fn normalize(&self, value: f64) -> u8 {
        if self.is_degenerate() {
            return 0;
        }
        let scaled = (255.0 * (value - self.min) / (self.max - self.min)).round();
        scaled.clamp(0.0, 255.0) as u8
    }
}

/// Compute the min/max of the valid cells, or None if there are none.
///
/// A cell is valid unless it is the nodata sentinel or not finite.
pub fn value_range(values: &[f64], nodata: f64) -> Option<ValueRange> {
    range_of(values.iter().copied().filter(|v| !is_nodata_value(*v, nodata)))
}

fn range_of(values: impl Iterator<Item = f64>) -> Option<ValueRange> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |range: Option<ValueRange>, v| {
            Some(match range {
                None => ValueRange {
                    min: v,
                    max: v,
                    valid_count: 1,
                },
                Some(r) => ValueRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                    valid_count: r.valid_count + 1,
                },
            })
        })
}

/// Build an 8-bit grayscale raster (`columns x rows`) from a grid.
///
/// Pure: the same input always yields byte-identical output.
pub fn build_raster(grid: &GridValues) -> GrayImage {
    let d = grid.descriptor();
    let (width, height) = (d.columns as u32, d.rows as u32);
    let mut img = GrayImage::new(width, height);

    let Some(range) = range_of(grid.valid_values()) else {
        tracing::debug!(width, height, "grid has no valid cells, raster left black");
        return img;
    };

    tracing::debug!(
        width,
        height,
        min = range.min,
        max = range.max,
        valid_count = range.valid_count,
        degenerate = range.is_degenerate(),
        "normalizing grid"
    );

    for (pixel, &v) in img.pixels_mut().zip(grid.values()) {
        if !d.is_nodata(v) && v.is_finite() {
            *pixel = Luma([range.normalize(v)]);
        }
    }

    img
}

/// Like [`build_raster`], for a bare row-major slice.
///
/// Fails if the slice length does not match `columns * rows` or the
/// dimensions are not a valid grid.
pub fn build_raster_from_slice(
    values: &[f64],
    columns: usize,
    rows: usize,
    nodata: f64,
) -> OverlayResult<GrayImage> {
    let descriptor = GridDescriptor::new(columns, rows, 0.0, 0.0, 1.0, nodata)?;
    let grid = GridValues::new(descriptor, values.to_vec())?;
    Ok(build_raster(&grid))
}

/// Promote a grayscale raster to opaque RGBA (intensity copied into R, G and B).
pub fn promote_to_rgba(raster: &GrayImage) -> RgbaImage {
    let (width, height) = raster.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let Luma([v]) = *raster.get_pixel(x, y);
        Rgba([v, v, v, 255])
    })
}
