//! Route overlay CLI.
//!
//! Renders an OSRM route and its waypoints over a grayscale rendering of an
//! ESRI ASCII grid and writes the composite as PNG.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use route_overlay::{run, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "route-overlay")]
#[command(about = "Render a route over a grayscale grid raster")]
struct Args {
    /// ESRI ASCII grid (.asc)
    #[arg(long, env = "ROUTE_OVERLAY_GRID")]
    grid: PathBuf,

    /// OSRM route response (JSON, geometries=geojson)
    #[arg(long, env = "ROUTE_OVERLAY_ROUTE")]
    route: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "output_overlay_with_waypoints.png")]
    output: PathBuf,

    /// Also write the grayscale raster without annotations
    #[arg(long)]
    raster_output: Option<PathBuf>,

    /// YAML style file
    #[arg(long, env = "ROUTE_OVERLAY_STYLE")]
    style: Option<PathBuf>,

    /// TrueType font for waypoint labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Do not draw waypoint labels
    #[arg(long)]
    no_labels: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let opts = RunOptions {
        grid: args.grid,
        route: args.route,
        output: args.output,
        raster_output: args.raster_output,
        style: args.style,
        font: args.font,
        no_labels: args.no_labels,
    };

    info!(grid = ?opts.grid, route = ?opts.route, "Starting route overlay render");

    let summary = run(&opts)?;

    info!(
        width = summary.width,
        height = summary.height,
        route_points = summary.route_points,
        waypoints = summary.waypoints,
        points_outside = summary.points_outside,
        route_overlaps_grid = summary.route_overlaps_grid,
        bytes = summary.bytes_written,
        "Render complete"
    );

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
