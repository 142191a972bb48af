//! Benchmarks for upload ingest.
//!
//! Run with: cargo bench -p glance-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glance_core::ImageIngest;
use std::io::Cursor;

fn encoded(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .expect("encoding a blank image cannot fail");
    buf.into_inner()
}

fn benchmark_decode_png(c: &mut Criterion) {
    let bytes = encoded(1920, 1080, image::ImageFormat::Png);
    let ingest = ImageIngest::default();

    c.bench_function("decode_png_1080p", |b| {
        b.iter(|| {
            let _ = ingest.decode(black_box(bytes.clone()));
        })
    });
}

fn benchmark_decode_jpeg(c: &mut Criterion) {
    let bytes = encoded(1920, 1080, image::ImageFormat::Jpeg);
    let ingest = ImageIngest::default();

    c.bench_function("decode_jpeg_1080p", |b| {
        b.iter(|| {
            let _ = ingest.decode(black_box(bytes.clone()));
        })
    });
}

fn benchmark_reject_garbage(c: &mut Criterion) {
    let bytes = vec![0x42u8; 4096];
    let ingest = ImageIngest::default();

    c.bench_function("reject_unrecognized", |b| {
        b.iter(|| {
            let _ = ingest.decode(black_box(bytes.clone()));
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode_png,
    benchmark_decode_jpeg,
    benchmark_reject_garbage,
);
criterion_main!(benches);
