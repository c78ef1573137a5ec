//! Tests for grayscale raster construction.

use image::Luma;
use overlay_common::{GridDescriptor, GridValues};
use renderer::raster::{build_raster, build_raster_from_slice, promote_to_rgba, value_range};
use test_utils::{create_grid_with_nodata, create_hill_grid, create_ramp_grid, create_uniform_grid, TEST_NODATA};

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_masked_cell_is_black_and_range_excludes_it() {
    let descriptor = GridDescriptor::new(3, 2, 0.0, 0.0, 1.0, 5.0).unwrap();
    let grid = GridValues::from_rows(
        descriptor,
        vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
    )
    .unwrap();

    let range = value_range(grid.values(), 5.0).unwrap();
    assert_eq!(range.min, 1.0);
    assert_eq!(range.max, 6.0);

    let raster = build_raster(&grid);
    assert_eq!(raster.dimensions(), (3, 2));
    assert_eq!(raster.get_pixel(0, 0), &Luma([0]));
    assert_eq!(raster.get_pixel(2, 1), &Luma([255]));
    assert_eq!(raster.get_pixel(1, 1), &Luma([0]));
    // 255 * (2 - 1) / 5 = 51
    assert_eq!(raster.get_pixel(1, 0), &Luma([51]));
}

#[test]
fn test_row_zero_is_top_of_image() {
    let grid = create_ramp_grid(4, 3);
    let raster = build_raster(&grid);
    assert_eq!(raster.get_pixel(0, 0), &Luma([0]));
    assert_eq!(raster.get_pixel(3, 2), &Luma([255]));
    assert!(raster.get_pixel(0, 1)[0] > raster.get_pixel(3, 0)[0]);
}

#[test]
fn test_degenerate_range_is_all_zero() {
    let grid = create_uniform_grid(8, 6, 42.0);
    let raster = build_raster(&grid);
    assert!(raster.pixels().all(|p| p[0] == 0));
}

#[test]
fn test_all_nodata_is_all_zero() {
    let grid = create_uniform_grid(5, 5, TEST_NODATA);
    assert!(value_range(grid.values(), TEST_NODATA).is_none());

    let raster = build_raster(&grid);
    assert_eq!(raster.dimensions(), (5, 5));
    assert!(raster.pixels().all(|p| p[0] == 0));
}

#[test]
fn test_nodata_holes_do_not_shift_range() {
    let holes = [(0, 0), (3, 3)];
    let grid = create_grid_with_nodata(4, 4, &holes);
    let raster = build_raster(&grid);

    // Minimum valid cell is now (0, 1) = 1, maximum (3, 2) = 14
    assert_eq!(raster.get_pixel(1, 0), &Luma([0]));
    assert_eq!(raster.get_pixel(2, 3), &Luma([255]));
    assert_eq!(raster.get_pixel(0, 0), &Luma([0]));
    assert_eq!(raster.get_pixel(3, 3), &Luma([0]));
}

#[test]
fn test_single_valid_cell_is_degenerate() {
    let grid = create_grid_with_nodata(2, 1, &[(0, 0)]);
    let raster = build_raster(&grid);
    assert!(raster.pixels().all(|p| p[0] == 0));
}

// ============================================================================
// Purity
// ============================================================================

#[test]
fn test_build_raster_is_idempotent() {
    let grid = create_hill_grid(64, 48);
    let first = build_raster(&grid);
    let second = build_raster(&grid);
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_slice_and_grid_builders_agree() {
    let grid = create_hill_grid(20, 10);
    let from_grid = build_raster(&grid);
    let from_slice = build_raster_from_slice(grid.values(), 20, 10, TEST_NODATA).unwrap();
    assert_eq!(from_grid, from_slice);
}

#[test]
fn test_promoted_raster_is_opaque_gray() {
    let raster = build_raster(&create_ramp_grid(6, 6));
    let rgba = promote_to_rgba(&raster);
    for (gray, color) in raster.pixels().zip(rgba.pixels()) {
        assert_eq!(color.0, [gray[0], gray[0], gray[0], 255]);
    }
}
