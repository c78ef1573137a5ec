//! Generators for synthetic grids with predictable values.

use overlay_common::{GridDescriptor, GridValues};

/// Sentinel used by every generated grid.
pub const TEST_NODATA: f64 = -9999.0;

/// Descriptor with unit cells anchored at the origin.
pub fn unit_descriptor(columns: usize, rows: usize) -> GridDescriptor {
    GridDescriptor::new(columns, rows, 0.0, 0.0, 1.0, TEST_NODATA)
        .expect("valid test descriptor")
}

/// Creates a grid where each cell holds `row * columns + col`.
///
/// The minimum (0) sits in the north-west corner and the maximum in the
/// south-east corner, so normalized output is 0 at (0, 0) and 255 at the
/// last pixel.
///
/// # Example
///
/// ```
/// use test_utils::create_ramp_grid;
///
/// let grid = create_ramp_grid(4, 3);
/// assert_eq!(grid.get(0, 0), Some(0.0));
/// assert_eq!(grid.get(2, 3), Some(11.0));
/// ```
pub fn create_ramp_grid(columns: usize, rows: usize) -> GridValues {
    let values = (0..columns * rows).map(|i| i as f64).collect();
    GridValues::new(unit_descriptor(columns, rows), values).expect("shape matches")
}

/// Creates a grid filled with a single value.
pub fn create_uniform_grid(columns: usize, rows: usize, value: f64) -> GridValues {
    GridValues::new(unit_descriptor(columns, rows), vec![value; columns * rows])
        .expect("shape matches")
}

/// Creates a smooth hill: highest in the middle, falling off towards the edges.
pub fn create_hill_grid(columns: usize, rows: usize) -> GridValues {
    let cx = (columns as f64 - 1.0) / 2.0;
    let cy = (rows as f64 - 1.0) / 2.0;
    let mut values = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            values.push(1000.0 - (dx * dx + dy * dy).sqrt());
        }
    }
    GridValues::new(unit_descriptor(columns, rows), values).expect("shape matches")
}

/// Ramp grid with the listed `(row, col)` cells replaced by [`TEST_NODATA`].
pub fn create_grid_with_nodata(
    columns: usize,
    rows: usize,
    holes: &[(usize, usize)],
) -> GridValues {
    let mut values: Vec<f64> = (0..columns * rows).map(|i| i as f64).collect();
    for &(row, col) in holes {
        values[row * columns + col] = TEST_NODATA;
    }
    GridValues::new(unit_descriptor(columns, rows), values).expect("shape matches")
}
