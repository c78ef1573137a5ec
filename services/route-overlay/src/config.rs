//! Style file loading.
//!
//! The style file is YAML. Every key is optional and colors are hex strings:
//!
//! ```yaml
//! route_color: "#ff000080"
//! route_width: 4
//! marker_radius: 6
//! labels_enabled: true
//! font: /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf
//! ```

use anyhow::{bail, Context, Result};
use renderer::style::parse_color;
use renderer::OverlayStyle;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides read from a YAML style file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleFile {
    pub route_color: Option<String>,
    pub route_width: Option<f32>,
    pub marker_color: Option<String>,
    pub marker_radius: Option<f32>,
    pub label_color: Option<String>,
    pub label_offset: Option<[i32; 2]>,
    pub label_font_size: Option<f32>,
    pub labels_enabled: Option<bool>,
    /// TrueType font for labels
    pub font: Option<PathBuf>,
}

impl StyleFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse style YAML")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read style file {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid style file {:?}", path.as_ref()))
    }

    /// Write every key present in the file over `style`.
    pub fn apply(&self, style: &mut OverlayStyle) -> Result<()> {
        if let Some(color) = &self.route_color {
            style.route_color = color_value("route_color", color)?;
        }
        if let Some(width) = self.route_width {
            style.route_width = width;
        }
        if let Some(color) = &self.marker_color {
            style.marker_color = color_value("marker_color", color)?;
        }
        if let Some(radius) = self.marker_radius {
            style.marker_radius = radius;
        }
        if let Some(color) = &self.label_color {
            style.label_color = color_value("label_color", color)?;
        }
        if let Some(offset) = self.label_offset {
            style.label_offset = offset;
        }
        if let Some(size) = self.label_font_size {
            style.label_font_size = size;
        }
        if let Some(enabled) = self.labels_enabled {
            style.labels_enabled = enabled;
        }
        Ok(())
    }
}

fn color_value(key: &str, value: &str) -> Result<[u8; 4]> {
    match parse_color(value) {
        Some(color) => Ok(color),
        None => bail!("{} must be #rrggbb or #rrggbbaa, got '{}'", key, value),
    }
}

/// Build the effective style.
///
/// Precedence, lowest first: built-in defaults, `OVERLAY_*` environment
/// variables, the style file, then `--no-labels`.
pub fn resolve_style(file: Option<&StyleFile>, no_labels: bool) -> Result<OverlayStyle> {
    let mut style = OverlayStyle::from_env();
    if let Some(file) = file {
        file.apply(&mut style)?;
    }
    if no_labels {
        style.labels_enabled = false;
    }
    style.validate()?;
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file = StyleFile::from_yaml("{}").unwrap();
        assert_eq!(file, StyleFile::default());

        let mut style = OverlayStyle::default();
        file.apply(&mut style).unwrap();
        assert_eq!(style, OverlayStyle::default());
    }

    #[test]
    fn test_apply_overrides() {
        let yaml = r##"
route_color: "#00ff00"
route_width: 5
label_offset: [4, 4]
labels_enabled: false
font: /tmp/font.ttf
"##;
        let file = StyleFile::from_yaml(yaml).unwrap();
        assert_eq!(file.font, Some(PathBuf::from("/tmp/font.ttf")));

        let mut style = OverlayStyle::default();
        file.apply(&mut style).unwrap();
        assert_eq!(style.route_color, [0, 255, 0, 255]);
        assert_eq!(style.route_width, 5.0);
        assert_eq!(style.label_offset, [4, 4]);
        assert!(!style.labels_enabled);
        assert_eq!(style.marker_color, [0, 0, 255, 128]);
    }

    #[test]
    fn test_bad_color_rejected() {
        let file = StyleFile::from_yaml("marker_color: blue").unwrap();
        let mut style = OverlayStyle::default();
        let err = file.apply(&mut style).unwrap_err();
        assert!(err.to_string().contains("marker_color"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(StyleFile::from_yaml("route_colour: \"#ff0000\"").is_err());
    }

    #[test]
    fn test_no_labels_wins() {
        let file = StyleFile {
            labels_enabled: Some(true),
            ..StyleFile::default()
        };
        let style = resolve_style(Some(&file), true).unwrap();
        assert!(!style.labels_enabled);
    }

    #[test]
    fn test_invalid_width_rejected() {
        let file = StyleFile {
            route_width: Some(0.0),
            ..StyleFile::default()
        };
        assert!(resolve_style(Some(&file), false).is_err());
    }
}
