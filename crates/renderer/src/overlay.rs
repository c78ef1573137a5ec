//! Route overlay compositing.
//!
//! The route polyline, waypoint discs and waypoint labels are drawn onto a
//! transparent layer the size of the raster, which is then alpha-composited
//! ("over") onto an RGBA copy of the raster. The input raster is never
//! modified.
//!
//! Drawing replaces layer pixels rather than blending them, so overlapping
//! segments and markers keep the style's alpha instead of accumulating it.
//! Later waypoints paint over earlier ones.

use image::{GrayImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use overlay_common::{GeoPoint, GridDescriptor, OverlayError, OverlayResult, Route, Waypoint};
use projection::{GridProjector, PixelCoord};
use tiny_skia::{BlendMode, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::label::{draw_label, LabelFont};
use crate::raster::promote_to_rgba;
use crate::style::OverlayStyle;

/// Render an overlay with the default style and the embedded label font.
pub fn render(
    raster: &GrayImage,
    route: &Route,
    waypoints: &[Waypoint],
    descriptor: &GridDescriptor,
) -> OverlayResult<RgbaImage> {
    Compositor::new(OverlayStyle::default())?.render(raster, route, waypoints, descriptor)
}

/// Draws route annotations and composites them over a raster.
#[derive(Debug, Clone)]
pub struct Compositor {
    style: OverlayStyle,
    font: Option<LabelFont>,
}

impl Compositor {
    /// Create a compositor; loads the embedded font when labels are enabled.
    pub fn new(style: OverlayStyle) -> OverlayResult<Self> {
        style.validate()?;
        let font = if style.labels_enabled {
            Some(LabelFont::embedded()?)
        } else {
            None
        };
        Ok(Self { style, font })
    }

    /// Create a compositor that labels waypoints with a caller-supplied font.
    pub fn with_font(style: OverlayStyle, font: LabelFont) -> OverlayResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            font: Some(font),
        })
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Composite the route and waypoints over `raster`.
    ///
    /// Points outside the grid extent are tolerated and simply clipped. An
    /// empty route or waypoint list contributes no marks.
    pub fn render(
        &self,
        raster: &GrayImage,
        route: &Route,
        waypoints: &[Waypoint],
        descriptor: &GridDescriptor,
    ) -> OverlayResult<RgbaImage> {
        let (width, height) = raster.dimensions();
        if width as usize != descriptor.columns || height as usize != descriptor.rows {
            return Err(OverlayError::Render(format!(
                "raster is {}x{} but grid descriptor is {}x{}",
                width, height, descriptor.columns, descriptor.rows
            )));
        }

        let mut output = promote_to_rgba(raster);
        let projector = GridProjector::new(*descriptor);
        let layer = self.draw_layer(width, height, route, waypoints, &projector)?;

        composite_over(&mut output, &layer);

        Ok(output)
    }

    /// Draw the transparent annotation layer.
    pub fn draw_layer(
        &self,
        width: u32,
        height: u32,
        route: &Route,
        waypoints: &[Waypoint],
        projector: &GridProjector,
    ) -> OverlayResult<RgbaImage> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            OverlayError::Render(format!("cannot allocate {}x{} layer", width, height))
        })?;

        let segments = self.draw_route(&mut pixmap, route, projector);
        let mut layer = pixmap_to_image(&pixmap)?;

        let mut markers = 0;
        for waypoint in waypoints {
            if self.draw_waypoint(&mut layer, waypoint, projector) {
                markers += 1;
            }
        }

        tracing::debug!(
            width,
            height,
            route_points = route.len(),
            segments_drawn = segments,
            waypoints = waypoints.len(),
            markers_drawn = markers,
            "overlay layer drawn"
        );

        Ok(layer)
    }

    /// Stroke each consecutive pair of route points; returns segments drawn.
    fn draw_route(&self, pixmap: &mut Pixmap, route: &Route, projector: &GridProjector) -> usize {
        let [r, g, b, a] = self.style.route_color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = false;
        paint.blend_mode = BlendMode::Source;

        let mut stroke = Stroke::default();
        stroke.width = self.style.route_width;
        stroke.line_cap = LineCap::Butt;

        let pad = f64::from(self.style.route_width) + 2.0;
        let clip = ClipRect {
            min_x: -pad,
            min_y: -pad,
            max_x: f64::from(pixmap.width()) + pad,
            max_y: f64::from(pixmap.height()) + pad,
        };

        let mut drawn = 0;
        for (start, end) in route.segments() {
            if !start.is_finite() || !end.is_finite() {
                tracing::debug!(?start, ?end, "skipping segment with non-finite coordinates");
                continue;
            }

            let p0 = pixel_center(projector.project_point(start));
            let p1 = pixel_center(projector.project_point(end));

            // A zero-length stroke with butt caps covers nothing, so a segment
            // inside a single cell is drawn as a square one stroke wide.
            if p0 == p1 {
                if outcode(p0, &clip) == INSIDE && self.fill_dot(pixmap, p0, &paint) {
                    drawn += 1;
                }
                continue;
            }

            let Some((p0, p1)) = clip_segment(p0, p1, &clip) else {
                continue;
            };

            let mut pb = PathBuilder::new();
            pb.move_to(p0.0 as f32, p0.1 as f32);
            pb.line_to(p1.0 as f32, p1.1 as f32);

            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                drawn += 1;
            }
        }

        drawn
    }

    fn fill_dot(&self, pixmap: &mut Pixmap, center: (f64, f64), paint: &Paint) -> bool {
        let width = self.style.route_width;
        let half = f64::from(width) / 2.0;
        let Some(rect) = Rect::from_xywh(
            (center.0 - half) as f32,
            (center.1 - half) as f32,
            width,
            width,
        ) else {
            return false;
        };
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
        true
    }

    /// Draw one waypoint's disc and label; false if it was entirely off-canvas.
    fn draw_waypoint(
        &self,
        layer: &mut RgbaImage,
        waypoint: &Waypoint,
        projector: &GridProjector,
    ) -> bool {
        let location: GeoPoint = waypoint.location;
        if !location.is_finite() {
            tracing::debug!(?location, "skipping waypoint with non-finite coordinates");
            return false;
        }

        let center = projector.project_point(location);
        let radius = self.style.marker_radius.round().max(1.0) as i64;
        let (width, height) = (i64::from(layer.width()), i64::from(layer.height()));

        let mut visible = false;
        if center.x >= -radius
            && center.y >= -radius
            && center.x < width + radius
            && center.y < height + radius
        {
            draw_filled_circle_mut(
                layer,
                (center.x as i32, center.y as i32),
                radius as i32,
                Rgba(self.style.marker_color),
            );
            visible = true;
        }

        let font = self.font.as_ref().filter(|_| self.style.labels_enabled);
        if let Some(font) = font {
            let [dx, dy] = self.style.label_offset;
            visible |= draw_label(
                layer,
                &waypoint.label(),
                center.x.saturating_add(i64::from(dx)),
                center.y.saturating_add(i64::from(dy)),
                self.style.label_color,
                self.style.label_font_size,
                font,
            );
        }

        visible
    }
}

/// Center of a pixel in continuous canvas coordinates.
fn pixel_center(p: PixelCoord) -> (f64, f64) {
    (p.x as f64 + 0.5, p.y as f64 + 0.5)
}

/// Porter-Duff "over" of a straight-alpha layer onto `dst`, in place.
///
/// Integer arithmetic with round-to-nearest, so an opaque destination stays
/// at alpha 255.
fn composite_over(dst: &mut RgbaImage, src: &RgbaImage) {
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        let a_s = u32::from(s[3]);
        if a_s == 0 {
            continue;
        }
        let a_d = u32::from(d[3]);
        // Both terms are scaled by 255 to keep the blend exact until rounding.
        let dst_weight = a_d * (255 - a_s);
        let src_weight = a_s * 255;
        let out_a255 = src_weight + dst_weight;

        for c in 0..3 {
            let blended = u32::from(s[c]) * src_weight + u32::from(d[c]) * dst_weight;
            d[c] = ((blended + out_a255 / 2) / out_a255) as u8;
        }
        d[3] = ((out_a255 + 127) / 255) as u8;
    }
}

/// Demultiply a tiny-skia pixmap into a straight-alpha RGBA image.
fn pixmap_to_image(pixmap: &Pixmap) -> OverlayResult<RgbaImage> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| OverlayError::Render("layer buffer size mismatch".to_string()))
}

#[derive(Debug, Clone, Copy)]
struct ClipRect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(p: (f64, f64), rect: &ClipRect) -> u8 {
    let mut code = INSIDE;
    if p.0 < rect.min_x {
        code |= LEFT;
    } else if p.0 > rect.max_x {
        code |= RIGHT;
    }
    if p.1 < rect.min_y {
        code |= BOTTOM;
    } else if p.1 > rect.max_y {
        code |= TOP;
    }
    code
}

/// Cohen-Sutherland clipping of a segment to `rect`.
///
/// Keeps far-off endpoints from reaching the rasterizer as huge floats while
/// preserving the direction of the visible part.
fn clip_segment(
    mut p0: (f64, f64),
    mut p1: (f64, f64),
    rect: &ClipRect,
) -> Option<((f64, f64), (f64, f64))> {
    let mut code0 = outcode(p0, rect);
    let mut code1 = outcode(p1, rect);

    // Each pass moves one endpoint onto an edge; rounding can cost an extra pass.
    for _ in 0..8 {
        if (code0 | code1) == 0 {
            return Some((p0, p1));
        }
        if (code0 & code1) != 0 {
            return None;
        }

        let code_out = if code0 != 0 { code0 } else { code1 };
        let dx = p1.0 - p0.0;
        let dy = p1.1 - p0.1;

        let new_point = if code_out & TOP != 0 {
            (p0.0 + dx * (rect.max_y - p0.1) / dy, rect.max_y)
        } else if code_out & BOTTOM != 0 {
            (p0.0 + dx * (rect.min_y - p0.1) / dy, rect.min_y)
        } else if code_out & RIGHT != 0 {
            (rect.max_x, p0.1 + dy * (rect.max_x - p0.0) / dx)
        } else {
            (rect.min_x, p0.1 + dy * (rect.min_x - p0.0) / dx)
        };

        if code_out == code0 {
            p0 = new_point;
            code0 = outcode(p0, rect);
        } else {
            p1 = new_point;
            code1 = outcode(p1, rect);
        }
    }

    None
}
