//! Route and waypoint types.
//!
//! Coordinates follow the GeoJSON convention: longitude first. Swapping the
//! order silently produces a transposed render, so the wire form is fixed to
//! `[lon, lat]` arrays.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// A geographic coordinate, serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.lon, p.lat]
    }
}

/// An ordered polyline of route points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    pub points: Vec<GeoPoint>,
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs; empty when the route has fewer than 2 points.
    pub fn segments(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Extent of the finite route points, or None if there are none.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let mut finite = self.points.iter().filter(|p| p.is_finite());
        let first = finite.next()?;
        let mut bbox = BoundingBox::point(first.lon, first.lat);
        for p in finite {
            bbox.extend(p.lon, p.lat);
        }
        Some(bbox)
    }
}

impl From<Vec<[f64; 2]>> for Route {
    fn from(pairs: Vec<[f64; 2]>) -> Self {
        Self::new(pairs.into_iter().map(GeoPoint::from).collect())
    }
}

/// A named stop along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Waypoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            location: GeoPoint::new(lon, lat),
            name: None,
        }
    }

    /// Display label derived from the waypoint's own coordinates.
    pub fn label(&self) -> String {
        format!("({:.5}, {:.5})", self.location.lon, self.location.lat)
    }
}
