//! Shared test helpers for the route-overlay workspace.
//!
//! - [`generators`]: synthetic grids (ramps, hills, grids with nodata holes)
//! - [`fixtures`]: canned `.asc` text, OSRM responses and grid descriptors
//! - [`paths`]: locating optional test data and scratch directories
//!
//! Pull it in as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a test data file or return early from the test.
///
/// Large real-world grids are not committed; tests that want them skip
/// quietly unless `TEST_DATA_DIR` points at a copy.
///
/// ```ignore
/// #[test]
/// fn test_real_grid() {
///     let path = test_utils::require_test_file!("shadows_zurich_city.asc");
///     let grid = grid_loader::load_asc(path).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: test file '{}' not found, set TEST_DATA_DIR to run this test",
                    $name
                );
                return;
            }
        }
    }};
}

/// Assert two coordinates agree to within `tolerance`.
///
/// Grid origins computed from center registration or summed cell sizes
/// rarely match a literal bit for bit.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right, tolerance): (f64, f64, f64) = ($left, $right, $tolerance);
        if (left - right).abs() > tolerance {
            panic!(
                "coordinates differ: {} vs {} (tolerance {})",
                left, right, tolerance
            );
        }
    }};
}
