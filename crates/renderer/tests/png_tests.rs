//! Tests for PNG encoding of rasters and composites.
//!
//! Every encoded file is decoded again with the `image` crate, which checks
//! chunk CRCs and zlib framing.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use overlay_common::Route;
use renderer::png::{encode_gray_png, encode_png, encode_png_auto, encode_png_indexed};
use renderer::{build_raster, render};
use test_utils::{create_hill_grid, zurich_descriptor, zurich_route, zurich_waypoints};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Color type byte from the IHDR chunk.
fn color_type(png: &[u8]) -> u8 {
    png[25]
}

fn decode_rgba(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png)
        .expect("encoded PNG should decode")
        .to_rgba8()
}

// ============================================================================
// RGBA
// ============================================================================

#[test]
fn test_rgba_preserves_pixels() {
    let img = RgbaImage::from_fn(17, 9, |x, y| Rgba([(x * 15) as u8, (y * 28) as u8, 7, 200]));
    let png = encode_png(&img).unwrap();

    assert_eq!(&png[..8], &PNG_SIGNATURE);
    assert_eq!(color_type(&png), 6);
    assert_eq!(decode_rgba(&png), img);
}

#[test]
fn test_composite_survives_encoding() {
    let descriptor = zurich_descriptor();
    let raster = GrayImage::from_pixel(400, 300, Luma([90]));
    let composite = render(&raster, &zurich_route(), &zurich_waypoints(), &descriptor).unwrap();

    let png = encode_png_auto(&composite).unwrap();
    assert_eq!(decode_rgba(&png), composite);
}

// ============================================================================
// Indexed
// ============================================================================

#[test]
fn test_auto_uses_palette_for_few_colors() {
    let img = RgbaImage::from_fn(32, 32, |x, _| {
        if x < 16 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 128])
        }
    });
    let png = encode_png_auto(&img).unwrap();

    assert_eq!(color_type(&png), 3);
    assert_eq!(decode_rgba(&png), img);
}

#[test]
fn test_auto_falls_back_to_rgba_for_many_colors() {
    let img = RgbaImage::from_fn(64, 64, |x, y| Rgba([x as u8, y as u8, (x * y) as u8, 255]));
    let png = encode_png_auto(&img).unwrap();

    assert_eq!(color_type(&png), 6);
    assert_eq!(decode_rgba(&png), img);
}

#[test]
fn test_auto_is_smaller_for_gray_composite() {
    let grid = create_hill_grid(200, 150);
    let raster = build_raster(&grid);
    let composite = render(&raster, &Route::default(), &[], grid.descriptor()).unwrap();

    let auto = encode_png_auto(&composite).unwrap();
    let rgba = encode_png(&composite).unwrap();
    assert!(auto.len() <= rgba.len());
}

#[test]
fn test_indexed_rejects_wrong_length() {
    let palette = [[0, 0, 0, 255]];
    assert!(encode_png_indexed(4, 4, &palette, &[0; 15]).is_err());
}

// ============================================================================
// Grayscale
// ============================================================================

#[test]
fn test_gray_preserves_pixels() {
    let raster = build_raster(&create_hill_grid(40, 30));
    let png = encode_gray_png(&raster).unwrap();

    assert_eq!(color_type(&png), 0);
    let decoded = image::load_from_memory(&png).unwrap().to_luma8();
    assert_eq!(decoded, raster);
}
