//! Generation throughput benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use weft::prelude::*;

fn checkerboard_sample() -> Grid<u8> {
    Grid::from_fn(4, 4, |x, y| ((x + y) % 2) as u8)
}

fn overlapping_checkerboard(c: &mut Criterion) {
    let sample = checkerboard_sample();
    let model_options = OverlappingOptions {
        pattern_size: 2,
        periodic_input: true,
        symmetry: 1,
        ground: false,
    };
    let mut options = GeneratorOptions::new(24, 24);
    options.periodic_output = true;

    c.bench_function("overlapping_checkerboard_24x24", |b| {
        b.iter(|| {
            let spec = ModelSpec::Overlapping {
                sample: sample.clone(),
                options: model_options,
            };
            weft::run(black_box(spec), &options).unwrap()
        })
    });
}

fn tiled_alternation(c: &mut Criterion) {
    let options = GeneratorOptions::new(32, 32);

    c.bench_function("tiled_alternation_32x32", |b| {
        b.iter(|| {
            let spec: ModelSpec<u8> = ModelSpec::Tiled {
                tiles: vec![
                    Tile::new("a", Grid::new(1, 1, 0), Symmetry::X, 1.0),
                    Tile::new("b", Grid::new(1, 1, 1), Symmetry::X, 1.0),
                ],
                rules: vec![NeighborRule::new("a", 0, "b", 0)],
                options: TiledOptions::default(),
            };
            weft::run(black_box(spec), &options).unwrap()
        })
    });
}

criterion_group!(benches, overlapping_checkerboard, tiled_alternation);
criterion_main!(benches);
