//! End-to-end render: files in, PNG out.

use anyhow::{Context, Result};
use grid_loader::{load_asc, load_response, RouteInput};
use overlay_common::GridDescriptor;
use projection::GridProjector;
use renderer::png::{encode_gray_png, encode_png_auto};
use renderer::{build_raster, Compositor, LabelFont};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{resolve_style, StyleFile};

/// Inputs and outputs of one render.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub grid: PathBuf,
    pub route: PathBuf,
    pub output: PathBuf,
    /// Also write the bare grayscale raster here
    pub raster_output: Option<PathBuf>,
    pub style: Option<PathBuf>,
    /// Label font; overrides the style file's `font`
    pub font: Option<PathBuf>,
    pub no_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub width: u32,
    pub height: u32,
    pub route_points: usize,
    pub waypoints: usize,
    /// Route points and waypoints that fall outside the grid
    pub points_outside: usize,
    /// False when the route's extent misses the grid entirely
    pub route_overlaps_grid: bool,
    pub bytes_written: usize,
}

pub fn run(opts: &RunOptions) -> Result<RunSummary> {
    let style_file = opts.style.as_ref().map(StyleFile::load).transpose()?;
    let style = resolve_style(style_file.as_ref(), opts.no_labels)?;

    let grid = load_asc(&opts.grid)
        .with_context(|| format!("Failed to load grid from {:?}", opts.grid))?;
    let input = load_response(&opts.route)
        .with_context(|| format!("Failed to load route from {:?}", opts.route))?;

    let descriptor = *grid.descriptor();
    let points_outside = report_outside_points(&input, &descriptor);
    let route_overlaps_grid = route_overlaps_grid(&input, &descriptor);

    let raster = build_raster(&grid);
    if let Some(path) = &opts.raster_output {
        let png = encode_gray_png(&raster)?;
        write_atomic(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "wrote raster");
    }

    let font_path = opts
        .font
        .as_ref()
        .or_else(|| style_file.as_ref().and_then(|f| f.font.as_ref()));
    let compositor = match font_path {
        Some(path) if style.labels_enabled => {
            let font = LabelFont::from_file(path)
                .with_context(|| format!("Failed to load font {:?}", path))?;
            Compositor::with_font(style, font)?
        }
        _ => Compositor::new(style)?,
    };

    let image = compositor.render(&raster, &input.route, &input.waypoints, &descriptor)?;
    let png = encode_png_auto(&image)?;
    write_atomic(&opts.output, &png)?;

    info!(
        path = %opts.output.display(),
        width = image.width(),
        height = image.height(),
        bytes = png.len(),
        "wrote overlay"
    );

    Ok(RunSummary {
        width: image.width(),
        height: image.height(),
        route_points: input.route.len(),
        waypoints: input.waypoints.len(),
        points_outside,
        route_overlaps_grid,
        bytes_written: png.len(),
    })
}

/// Warn about input that cannot appear on the raster; returns the count.
fn report_outside_points(input: &RouteInput, descriptor: &GridDescriptor) -> usize {
    let projector = GridProjector::new(*descriptor);

    let route_outside = input
        .route
        .points
        .iter()
        .filter(|p| !projector.contains(**p))
        .count();
    if route_outside > 0 {
        warn!(
            outside = route_outside,
            total = input.route.len(),
            "route points fall outside the grid extent"
        );
    }

    let mut waypoints_outside = 0;
    for wp in &input.waypoints {
        if !projector.contains(wp.location) {
            waypoints_outside += 1;
            warn!(
                lon = wp.location.lon,
                lat = wp.location.lat,
                name = wp.name.as_deref().unwrap_or(""),
                "waypoint outside the grid extent"
            );
        }
    }

    route_outside + waypoints_outside
}

/// Whether any part of the route's extent touches the grid's extent.
fn route_overlaps_grid(input: &RouteInput, descriptor: &GridDescriptor) -> bool {
    let grid_bbox = descriptor.bbox();
    match input.route.bbox() {
        Some(route_bbox) if route_bbox.intersects(&grid_bbox) => true,
        Some(route_bbox) => {
            warn!(
                route_min_lon = route_bbox.min_x,
                route_min_lat = route_bbox.min_y,
                route_max_lon = route_bbox.max_x,
                route_max_lat = route_bbox.max_y,
                grid_min_lon = grid_bbox.min_x,
                grid_min_lat = grid_bbox.min_y,
                grid_max_lon = grid_bbox.max_x,
                grid_max_lat = grid_bbox.max_y,
                "route lies entirely outside the grid; overlay will show no route"
            );
            false
        }
        None => false,
    }
}

/// Write `data` next to `path` and rename it into place.
///
/// Readers never see a partially written file. On failure the temporary
/// file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = fs::write(&tmp, data)
        .with_context(|| format!("Failed to write {:?}", tmp))
        .and_then(|_| {
            fs::rename(&tmp, path)
                .with_context(|| format!("Failed to move {:?} into place", tmp))
        });

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
