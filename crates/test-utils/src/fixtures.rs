//! Canned grids and routes shared by the workspace tests.

use overlay_common::{GeoPoint, GridDescriptor, Route, Waypoint};

/// A 4x3 ESRI ASCII grid with one nodata cell in the middle row.
pub const SAMPLE_ASC: &str = "\
ncols        4
nrows        3
xllcorner    8.50
yllcorner    47.30
cellsize     0.01
NODATA_value -9999
10 20 30 40
50 -9999 70 80
90 100 110 120
";

/// Same grid as [`SAMPLE_ASC`] but cell-center registered and without
/// an explicit nodata line.
pub const SAMPLE_ASC_CENTER: &str = "\
NCOLS 4
NROWS 3
XLLCENTER 8.505
YLLCENTER 47.305
CELLSIZE 0.01
10 20 30 40
50 60 70 80
90 100 110 120
";

/// A trimmed OSRM `route` response crossing [`SAMPLE_ASC`] west to east.
pub const SAMPLE_OSRM_RESPONSE: &str = r#"{
  "code": "Ok",
  "routes": [
    {
      "distance": 2130.4,
      "duration": 301.2,
      "geometry": {
        "type": "LineString",
        "coordinates": [
          [8.5012, 47.3188],
          [8.5105, 47.3151],
          [8.5221, 47.3123],
          [8.5387, 47.3054]
        ]
      }
    }
  ],
  "waypoints": [
    { "name": "Bahnhofstrasse", "location": [8.5012, 47.3188] },
    { "name": "", "location": [8.5387, 47.3054] }
  ]
}"#;

/// Descriptor matching [`SAMPLE_ASC`].
pub fn sample_descriptor() -> GridDescriptor {
    GridDescriptor::new(4, 3, 8.50, 47.30, 0.01, -9999.0).expect("valid sample descriptor")
}

/// A Zurich-sized shadow grid: 400x300 cells of 0.0001 degrees.
pub fn zurich_descriptor() -> GridDescriptor {
    GridDescriptor::new(400, 300, 8.5230, 47.3574, 0.0001, -9999.0)
        .expect("valid zurich descriptor")
}

/// A route crossing [`zurich_descriptor`] from south-west to north-east.
pub fn zurich_route() -> Route {
    Route::new(vec![
        GeoPoint::new(8.5262, 47.3601),
        GeoPoint::new(8.5340, 47.3655),
        GeoPoint::new(8.5412, 47.3762),
        GeoPoint::new(8.5568, 47.3829),
    ])
}

/// Start and end of [`zurich_route`].
pub fn zurich_waypoints() -> Vec<Waypoint> {
    vec![Waypoint::new(8.5262, 47.3601), Waypoint::new(8.5568, 47.3829)]
}
