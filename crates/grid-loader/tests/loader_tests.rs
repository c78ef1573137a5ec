//! Tests for loading grids and routes from disk.

use grid_loader::{load_asc, load_response, parse_asc, parse_response};
use overlay_common::{GeoPoint, OverlayError};
use test_utils::{
    assert_close, require_test_file, sample_descriptor, temp_test_dir, write_test_file, SAMPLE_ASC,
    SAMPLE_ASC_CENTER, SAMPLE_OSRM_RESPONSE,
};

// ============================================================================
// ASCII grids
// ============================================================================

#[test]
fn test_sample_grid_matches_descriptor() {
    let grid = parse_asc(SAMPLE_ASC).unwrap();
    assert_eq!(grid.descriptor(), &sample_descriptor());
    assert_eq!(grid.get(0, 0), Some(10.0));
    assert_eq!(grid.get(1, 1), Some(-9999.0));
    assert_eq!(grid.get(2, 3), Some(120.0));
    assert_eq!(grid.valid_values().count(), 11);
}

#[test]
fn test_center_registered_grid_lines_up_with_corner_grid() {
    let corner = parse_asc(SAMPLE_ASC).unwrap();
    let center = parse_asc(SAMPLE_ASC_CENTER).unwrap();

    let (a, b) = (corner.descriptor(), center.descriptor());
    assert_eq!(a.columns, b.columns);
    assert_close!(a.origin_x, b.origin_x, 1e-9);
    assert_close!(a.origin_y, b.origin_y, 1e-9);
    assert_eq!(b.nodata_value, -9999.0);
}

#[test]
fn test_short_grid_is_rejected() {
    let truncated = SAMPLE_ASC.trim_end().rsplit_once('\n').unwrap().0;
    let err = parse_asc(truncated).unwrap_err();
    assert!(matches!(
        err,
        OverlayError::GridShape {
            expected: 12,
            actual: 8
        }
    ));
}

#[test]
fn test_long_grid_is_rejected() {
    let extra = format!("{}130 140 150 160\n", SAMPLE_ASC);
    assert!(matches!(
        parse_asc(&extra).unwrap_err(),
        OverlayError::GridShape { .. }
    ));
}

#[test]
fn test_load_asc_from_disk() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "grid.asc", SAMPLE_ASC);
    let grid = load_asc(&path).unwrap();
    assert_eq!(grid.values().len(), 12);
}

#[test]
fn test_load_missing_file() {
    let dir = temp_test_dir();
    let err = load_asc(dir.path().join("nope.asc")).unwrap_err();
    assert!(matches!(err, OverlayError::Io(_)));
}

#[test]
fn test_bundled_sample_grid() {
    let path = require_test_file!("sample.asc");
    let grid = load_asc(path).unwrap();
    assert_eq!(grid, parse_asc(SAMPLE_ASC).unwrap());
}

// ============================================================================
// OSRM responses
// ============================================================================

#[test]
fn test_sample_response() {
    let input = parse_response(SAMPLE_OSRM_RESPONSE).unwrap();

    assert_eq!(input.route.len(), 4);
    assert_eq!(input.route.points[0], GeoPoint::new(8.5012, 47.3188));

    assert_eq!(input.waypoints.len(), 2);
    assert_eq!(input.waypoints[0].name.as_deref(), Some("Bahnhofstrasse"));
    assert_eq!(input.waypoints[1].name, None);
    assert_eq!(input.waypoints[1].label(), "(8.53870, 47.30540)");
}

#[test]
fn test_route_stays_inside_sample_grid() {
    let input = parse_response(SAMPLE_OSRM_RESPONSE).unwrap();
    let bbox = sample_descriptor().bbox();
    assert!(input
        .route
        .points
        .iter()
        .all(|p| bbox.contains_point(p.lon, p.lat)));
}

#[test]
fn test_load_response_from_disk() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "route.json", SAMPLE_OSRM_RESPONSE);
    let input = load_response(path).unwrap();
    assert_eq!(input, parse_response(SAMPLE_OSRM_RESPONSE).unwrap());
}
