//! Performance measurement for grid segmentation at varying image sizes

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use permcut::flow::segment;
use std::hint::black_box;

// Horizontal gradient with a dark disc in the center, a rough stand-in for
// a photographic foreground subject
fn synthetic_image(rows: usize, cols: usize) -> Array2<i64> {
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        let background = (col as i64 * 200) / cols.max(1) as i64 + 40;
        let dy = row as i64 - rows as i64 / 2;
        let dx = col as i64 - cols as i64 / 2;
        if dy * dy + dx * dx < (rows.min(cols) as i64 / 3).pow(2) {
            20
        } else {
            background
        }
    })
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    group.sample_size(10);

    for &(rows, cols) in &[(20usize, 30usize), (40, 60), (80, 120)] {
        let image = synthetic_image(rows, cols);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &image,
            |b, input| {
                b.iter(|| segment(black_box(input)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_segment);
criterion_main!(benches);
