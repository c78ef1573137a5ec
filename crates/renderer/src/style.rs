//! Style configuration for route overlays.

use overlay_common::{OverlayError, OverlayResult};
use serde::{Deserialize, Serialize};

/// Visual parameters of the overlay layer.
///
/// Colors are `[r, g, b, a]`. The defaults give a half-transparent red route,
/// half-transparent blue waypoint discs and opaque white labels.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Route stroke color
    pub route_color: [u8; 4],
    /// Route stroke width in pixels
    pub route_width: f32,
    /// Waypoint disc color
    pub marker_color: [u8; 4],
    /// Waypoint disc radius in pixels
    pub marker_radius: f32,
    /// Label text color
    pub label_color: [u8; 4],
    /// Label anchor offset from the marker center, [dx, dy] in pixels
    pub label_offset: [i32; 2],
    /// Label font size in pixels
    pub label_font_size: f32,
    /// Whether to draw waypoint labels at all
    pub labels_enabled: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            route_color: [255, 0, 0, 128],
            route_width: 3.0,
            marker_color: [0, 0, 255, 128],
            marker_radius: 5.0,
            label_color: [255, 255, 255, 255],
            label_offset: [10, -10],
            label_font_size: 11.0,
            labels_enabled: true,
        }
    }
}

impl OverlayStyle {
    /// Load style from a JSON string; missing fields keep their defaults.
    pub fn from_json(json_str: &str) -> OverlayResult<Self> {
        let style: Self = serde_json::from_str(json_str)?;
        style.validate()?;
        Ok(style)
    }

    /// Apply overrides from environment variables.
    ///
    /// Recognised: `OVERLAY_ROUTE_WIDTH`, `OVERLAY_MARKER_RADIUS`,
    /// `OVERLAY_LABELS` (`true`/`false`/`1`/`0`).
    pub fn from_env() -> Self {
        let mut style = Self::default();

        if let Ok(val) = std::env::var("OVERLAY_ROUTE_WIDTH") {
            if let Ok(width) = val.parse() {
                style.route_width = width;
            }
        }

        if let Ok(val) = std::env::var("OVERLAY_MARKER_RADIUS") {
            if let Ok(radius) = val.parse() {
                style.marker_radius = radius;
            }
        }

        if let Ok(val) = std::env::var("OVERLAY_LABELS") {
            style.labels_enabled = val.to_lowercase() == "true" || val == "1";
        }

        style
    }

    /// Validate the style.
    pub fn validate(&self) -> OverlayResult<()> {
        if !(self.route_width.is_finite() && self.route_width > 0.0) {
            return Err(OverlayError::Config(format!(
                "route_width must be positive, got {}",
                self.route_width
            )));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(OverlayError::Config(format!(
                "marker_radius must be positive, got {}",
                self.marker_radius
            )));
        }
        if !(self.label_font_size.is_finite() && self.label_font_size > 0.0) {
            return Err(OverlayError::Config(format!(
                "label_font_size must be positive, got {}",
                self.label_font_size
            )));
        }
        Ok(())
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` into RGBA. Six-digit colors are opaque.
pub fn parse_color(hex: &str) -> Option<[u8; 4]> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    let a = if hex.len() == 8 {
        u8::from_str_radix(&hex[6..8], 16).ok()?
    } else {
        255
    };

    Some([r, g, b, a])
}
