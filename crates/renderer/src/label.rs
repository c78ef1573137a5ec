//! Text labels drawn with a TrueType font.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use overlay_common::{OverlayError, OverlayResult};
use rusttype::{point, Font, Scale};
use std::path::Path;

/// Embedded font data - DejaVu Sans Mono (a clean, readable monospace font)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// A loaded label font.
#[derive(Clone)]
pub struct LabelFont {
    font: Font<'static>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl LabelFont {
    /// The bundled DejaVu Sans Mono.
    pub fn embedded() -> OverlayResult<Self> {
        Font::try_from_bytes(FONT_DATA)
            .map(|font| Self { font })
            .ok_or_else(|| OverlayError::Font("embedded font data is invalid".to_string()))
    }

    /// Load a font from raw TrueType/OpenType bytes.
    pub fn from_bytes(data: Vec<u8>) -> OverlayResult<Self> {
        Font::try_from_vec(data)
            .map(|font| Self { font })
            .ok_or_else(|| OverlayError::Font("not a valid TrueType font".to_string()))
    }

    /// Load a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
            .map_err(|e| OverlayError::Font(format!("{}: {}", path.display(), e)))
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    /// Pixel width of `text` laid out at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scale = Scale::uniform(size);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .filter_map(|g| g.pixel_bounding_box())
            .map(|bb| bb.max.x as f32)
            .fold(0.0, f32::max)
    }
}

/// Draw `text` with its top-left corner at (x, y).
///
/// Glyph pixels off the canvas are clipped. Anchors so far away that no glyph
/// can reach the canvas are skipped outright, which also keeps the integer
/// arithmetic inside `draw_text_mut` from overflowing.
pub fn draw_label(
    img: &mut RgbaImage,
    text: &str,
    x: i64,
    y: i64,
    color: [u8; 4],
    size: f32,
    font: &LabelFont,
) -> bool {
    if text.is_empty() {
        return false;
    }

    let reach_x = font.text_width(text, size).ceil() as i64 + 1;
    let reach_y = (size * 2.0).ceil() as i64;
    let (width, height) = (img.width() as i64, img.height() as i64);

    if x.saturating_add(reach_x) < 0
        || x >= width
        || y.saturating_add(reach_y) < 0
        || y >= height
    {
        return false;
    }

    draw_text_mut(
        img,
        Rgba(color),
        x as i32,
        y as i32,
        Scale::uniform(size),
        font.font(),
        text,
    );
    true
}
