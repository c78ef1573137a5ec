//! OSRM `route` response reader.
//!
//! Only the first route is used. Its geometry must be GeoJSON
//! (`geometries=geojson`); encoded polylines are rejected.

use overlay_common::{GeoPoint, OverlayError, OverlayResult, Route, Waypoint};
use serde::Deserialize;
use std::path::Path;

/// Route geometry and snapped waypoints from one OSRM response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteInput {
    pub route: Route,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
    #[serde(default)]
    waypoints: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OsrmGeometry {
    GeoJson { coordinates: Vec<GeoPoint> },
    Encoded(String),
}

/// Parse an OSRM response body.
pub fn parse_response(json: &str) -> OverlayResult<RouteInput> {
    let response: OsrmResponse = serde_json::from_str(json)?;

    if let Some(code) = response.code.as_deref() {
        if code != "Ok" {
            return Err(OverlayError::InvalidRoute(format!(
                "routing service returned {}: {}",
                code,
                response.message.as_deref().unwrap_or("no message")
            )));
        }
    }

    let first = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| OverlayError::InvalidRoute("response contains no routes".to_string()))?;

    let points = match first.geometry {
        OsrmGeometry::GeoJson { coordinates } => coordinates,
        OsrmGeometry::Encoded(_) => {
            return Err(OverlayError::InvalidRoute(
                "encoded polyline geometry is not supported, request geometries=geojson"
                    .to_string(),
            ))
        }
    };

    let waypoints = response
        .waypoints
        .into_iter()
        .map(|mut wp| {
            wp.name = wp.name.filter(|n| !n.is_empty());
            wp
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        route_points = points.len(),
        waypoints = waypoints.len(),
        "parsed osrm response"
    );

    Ok(RouteInput {
        route: Route::new(points),
        waypoints,
    })
}

/// Read and parse an OSRM response saved to disk.
pub fn load_response(path: impl AsRef<Path>) -> OverlayResult<RouteInput> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let input = parse_response(&text)?;
    tracing::info!(
        path = %path.display(),
        route_points = input.route.len(),
        waypoints = input.waypoints.len(),
        "loaded route"
    );
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_response() {
        let json = r#"{"routes":[{"geometry":{"coordinates":[[1.0,2.0],[3.0,4.0]]}}]}"#;
        let input = parse_response(json).unwrap();
        assert_eq!(input.route.len(), 2);
        assert_eq!(input.route.points[1], GeoPoint::new(3.0, 4.0));
        assert!(input.waypoints.is_empty());
    }

    #[test]
    fn test_error_code() {
        let json = r#"{"code":"NoRoute","message":"Impossible route between points","routes":[]}"#;
        let err = parse_response(json).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidRoute(_)));
        assert!(err.to_string().contains("NoRoute"));
    }

    #[test]
    fn test_no_routes() {
        let err = parse_response(r#"{"code":"Ok","routes":[]}"#).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidRoute(_)));
    }

    #[test]
    fn test_polyline_geometry_rejected() {
        let json = r#"{"code":"Ok","routes":[{"geometry":"_p~iF~ps|U_ulLnnqC"}]}"#;
        assert!(matches!(
            parse_response(json).unwrap_err(),
            OverlayError::InvalidRoute(_)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_response("{not json").unwrap_err(),
            OverlayError::Json(_)
        ));
    }
}
