//! Benchmarks for the renderer crate - raster building, compositing and PNG encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::RgbaImage;
use overlay_common::{GeoPoint, GridDescriptor, GridValues, Route, Waypoint};
use renderer::{build_raster, png, Compositor, OverlayStyle};

/// Elevation-like grid with a sprinkling of nodata cells.
fn generate_elevation_grid(columns: usize, rows: usize) -> GridValues {
    let descriptor = GridDescriptor::new(columns, rows, 8.50, 47.30, 0.0001, -9999.0).unwrap();
    let mut values = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            if (row * 31 + col * 17) % 97 == 0 {
                values.push(-9999.0);
            } else {
                let x = col as f64 / columns as f64 * std::f64::consts::PI * 6.0;
                let y = row as f64 / rows as f64 * std::f64::consts::PI * 4.0;
                values.push(400.0 + 80.0 * x.sin() * y.cos());
            }
        }
    }
    GridValues::new(descriptor, values).unwrap()
}

/// Zig-zag route with `points` vertices spanning the grid.
fn generate_route(descriptor: &GridDescriptor, points: usize) -> Route {
    let bbox = descriptor.bbox();
    Route::new(
        (0..points)
            .map(|i| {
                let t = i as f64 / (points - 1).max(1) as f64;
                let wiggle = if i % 2 == 0 { 0.3 } else { 0.7 };
                GeoPoint::new(
                    bbox.min_x + t * bbox.width(),
                    bbox.min_y + wiggle * bbox.height(),
                )
            })
            .collect(),
    )
}

// =============================================================================
// RASTER BENCHMARKS
// =============================================================================

fn bench_build_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_raster");

    for (columns, rows) in [(256, 256), (1000, 800), (2500, 2000)] {
        let grid = generate_elevation_grid(columns, rows);
        group.throughput(Throughput::Elements((columns * rows) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", columns, rows)),
            &grid,
            |b, grid| b.iter(|| build_raster(black_box(grid))),
        );
    }

    group.finish();
}

// =============================================================================
// COMPOSITE BENCHMARKS
// =============================================================================

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    let grid = generate_elevation_grid(1000, 800);
    let raster = build_raster(&grid);
    let descriptor = *grid.descriptor();
    let waypoints = vec![Waypoint::new(8.51, 47.33), Waypoint::new(8.59, 47.37)];

    let labeled = Compositor::new(OverlayStyle::default()).unwrap();
    let unlabeled = Compositor::new(OverlayStyle {
        labels_enabled: false,
        ..OverlayStyle::default()
    })
    .unwrap();

    for points in [2, 100, 5000] {
        let route = generate_route(&descriptor, points);
        group.bench_with_input(BenchmarkId::new("route_points", points), &route, |b, route| {
            b.iter(|| {
                unlabeled
                    .render(black_box(&raster), route, &waypoints, &descriptor)
                    .unwrap()
            })
        });
    }

    let route = generate_route(&descriptor, 100);
    group.bench_function("with_labels", |b| {
        b.iter(|| {
            labeled
                .render(black_box(&raster), &route, &waypoints, &descriptor)
                .unwrap()
        })
    });

    group.finish();
}

// =============================================================================
// PNG BENCHMARKS
// =============================================================================

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");

    let grid = generate_elevation_grid(1000, 800);
    let raster = build_raster(&grid);
    let route = generate_route(grid.descriptor(), 100);
    let composite: RgbaImage = Compositor::new(OverlayStyle::default())
        .unwrap()
        .render(&raster, &route, &[], grid.descriptor())
        .unwrap();

    group.throughput(Throughput::Elements(1000 * 800));
    group.bench_function("rgba", |b| b.iter(|| png::encode_png(black_box(&composite))));
    group.bench_function("auto", |b| b.iter(|| png::encode_png_auto(black_box(&composite))));
    group.bench_function("gray", |b| b.iter(|| png::encode_gray_png(black_box(&raster))));

    group.finish();
}

criterion_group!(benches, bench_build_raster, bench_composite, bench_png_encoding);
criterion_main!(benches);
