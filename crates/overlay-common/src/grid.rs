//! Grid descriptors for gridded elevation/shadow data.

use crate::{BoundingBox, OverlayError, OverlayResult};
use serde::{Deserialize, Serialize};

/// Geometry of a north-up equirectangular grid.
///
/// The origin is the lower-left (south-west) corner of the grid, while the
/// value matrix is stored north-to-south: row 0 is the northernmost row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    /// Number of columns (cells in X / longitude direction)
    pub columns: usize,
    /// Number of rows (cells in Y / latitude direction)
    pub rows: usize,
    /// X coordinate of the lower-left corner
    pub origin_x: f64,
    /// Y coordinate of the lower-left corner
    pub origin_y: f64,
    /// Edge length of one cell in coordinate units
    pub cell_size: f64,
    /// Sentinel marking missing cells
    pub nodata_value: f64,
}

impl GridDescriptor {
    /// Create a new grid descriptor, rejecting geometry that cannot be projected.
    pub fn new(
        columns: usize,
        rows: usize,
        origin_x: f64,
        origin_y: f64,
        cell_size: f64,
        nodata_value: f64,
    ) -> OverlayResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(OverlayError::InvalidGrid(format!(
                "grid must have at least one row and column, got {}x{}",
                columns, rows
            )));
        }
        if columns > u32::MAX as usize || rows > u32::MAX as usize {
            return Err(OverlayError::InvalidGrid(format!(
                "grid of {}x{} cells exceeds raster limits",
                columns, rows
            )));
        }
        if columns.checked_mul(rows).is_none() {
            return Err(OverlayError::InvalidGrid(format!(
                "grid of {}x{} cells overflows the address space",
                columns, rows
            )));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(OverlayError::InvalidGrid(format!(
                "cell size must be positive, got {}",
                cell_size
            )));
        }
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(OverlayError::InvalidGrid(format!(
                "origin must be finite, got ({}, {})",
                origin_x, origin_y
            )));
        }

        Ok(Self {
            columns,
            rows,
            origin_x,
            origin_y,
            cell_size,
            nodata_value,
        })
    }

    /// Y coordinate of the grid's north edge (top of row 0).
    pub fn north_edge(&self) -> f64 {
        self.origin_y + self.rows as f64 * self.cell_size
    }

    /// X coordinate of the grid's east edge.
    pub fn east_edge(&self) -> f64 {
        self.origin_x + self.columns as f64 * self.cell_size
    }

    /// Geographic extent covered by the grid.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.origin_x, self.origin_y, self.east_edge(), self.north_edge())
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Whether a cell value is this grid's nodata sentinel.
    pub fn is_nodata(&self, value: f64) -> bool {
        is_nodata_value(value, self.nodata_value)
    }
}

/// Whether `value` is the sentinel `nodata`.
///
/// Exact equality: values that went through a lossy conversion may no
/// longer match the sentinel.
pub fn is_nodata_value(value: f64, nodata: f64) -> bool {
    value == nodata
}

/// A descriptor together with its value matrix (row-major, north-to-south).
#[derive(Debug, Clone, PartialEq)]
pub struct GridValues {
    descriptor: GridDescriptor,
    values: Vec<f64>,
}

impl GridValues {
    /// Pair a descriptor with a flat row-major matrix.
    pub fn new(descriptor: GridDescriptor, values: Vec<f64>) -> OverlayResult<Self> {
        if values.len() != descriptor.len() {
            return Err(OverlayError::GridShape {
                expected: descriptor.len(),
                actual: values.len(),
            });
        }
        Ok(Self { descriptor, values })
    }

    /// Build from nested rows, failing on any ragged or missing row.
    pub fn from_rows(descriptor: GridDescriptor, rows: Vec<Vec<f64>>) -> OverlayResult<Self> {
        if rows.len() != descriptor.rows {
            return Err(OverlayError::GridShape {
                expected: descriptor.len(),
                actual: rows.iter().map(Vec::len).sum(),
            });
        }

        let mut values = Vec::with_capacity(descriptor.len());
        for row in rows {
            if row.len() != descriptor.columns {
                return Err(OverlayError::GridShape {
                    expected: descriptor.columns,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }

        Ok(Self { descriptor, values })
    }

    pub fn descriptor(&self) -> &GridDescriptor {
        &self.descriptor
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at (row, col), or None outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.descriptor.rows || col >= self.descriptor.columns {
            return None;
        }
        self.values.get(row * self.descriptor.columns + col).copied()
    }

    /// One row of the matrix; row 0 is the northernmost.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.descriptor.rows {
            return None;
        }
        let start = row * self.descriptor.columns;
        Some(&self.values[start..start + self.descriptor.columns])
    }

    /// Iterate over values that are not the nodata sentinel.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .copied()
            .filter(move |v| !self.descriptor.is_nodata(*v))
    }
}
