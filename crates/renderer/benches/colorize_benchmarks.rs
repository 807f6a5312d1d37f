//! Benchmarks for the renderer crate - normalization, palettes and export.
//!
//! Run with: cargo bench --package renderer --bench colorize_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use raster_source::{synthesize, SyntheticPattern};
use renderer::{canvas, export, gradient, normalize, palette::Palette};
use thermal_common::{BoundingBox, GridSize, RasterGrid};

/// Generate a land-surface-temperature grid in Kelvin with noise.
fn generate_temperature_grid(width: usize, height: usize) -> RasterGrid {
    let mut rng = rand::thread_rng();
    let mut data = vec![0.0f64; width * height];

    for y in 0..height {
        for x in 0..width {
            let lat_factor = (y as f64 / height as f64 - 0.5) * 30.0;
            let lon_factor = ((x as f64 / width as f64) * std::f64::consts::PI * 4.0).sin() * 5.0;
            let noise = rng.gen_range(-3.0..3.0);

            data[y * width + x] = 300.0 + lat_factor + lon_factor + noise;
        }
    }
    RasterGrid::new(width, height, data, BoundingBox::default()).expect("valid benchmark grid")
}

// =============================================================================
// NORMALIZE BENCHMARKS
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for (width, height) in [(256, 256), (512, 512), (1024, 1024)] {
        let grid = generate_temperature_grid(width, height);

        group.throughput(Throughput::Elements((width * height) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &grid,
            |b, grid| b.iter(|| normalize::normalize(black_box(grid))),
        );
    }

    group.finish();
}

// =============================================================================
// COLORIZE BENCHMARKS
// =============================================================================

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");

    let grid = generate_temperature_grid(512, 512);
    let normalized = normalize::normalize(&grid);
    group.throughput(Throughput::Elements(512 * 512));

    for palette in Palette::ALL {
        group.bench_with_input(
            BenchmarkId::new(palette.as_str(), "512x512"),
            &normalized,
            |b, normalized| b.iter(|| gradient::colorize_grid(black_box(normalized), palette)),
        );
    }

    group.finish();
}

// =============================================================================
// END-TO-END BENCHMARKS
// =============================================================================

fn bench_fallback_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback_render");
    group.throughput(Throughput::Elements(256 * 256));

    group.bench_function("synthesize_and_render", |b| {
        b.iter(|| {
            let grid = synthesize(GridSize::FALLBACK, SyntheticPattern::RadialGradient, BoundingBox::default());
            let image = gradient::render_thermal(&grid, Palette::FourBand);
            let mut surface = canvas::RgbaSurface::new(256, 256).expect("fits");
            canvas::write(&image, &mut surface).expect("sizes match");
            black_box(surface)
        });
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    let grid = generate_temperature_grid(512, 512);
    let image = gradient::render_thermal(&grid, Palette::SevenBand);
    let formats = [
        (export::ExportFormat::Png, None),
        (export::ExportFormat::GeoTiff, Some(BoundingBox::default())),
    ];

    for (format, bounds) in formats {
        let options = export::ExportOptions { format, bounds };
        group.bench_with_input(
            BenchmarkId::new(format.to_string(), "512x512"),
            &image,
            |b, image| b.iter(|| export::export(black_box(image), &options)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_colorize,
    bench_fallback_render,
    bench_export,
);
criterion_main!(benches);
