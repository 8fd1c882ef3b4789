//! Criterion benchmarks for the spanning search and distance maps.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gridlight_core::{Cell, CostGrid, Dims, Raster, TargetSet};
use gridlight_paths::{GridGraph, SpanningOptions, connect, distance_map};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Random cost surface with roughly one target per 200 cells.
fn scenario(side: usize, seed: u64) -> (CostGrid, TargetSet) {
    let mut rng = StdRng::seed_from_u64(seed);
    let dims = Dims::new(side, side);
    let costs = Raster::from_fn(dims, |_| rng.random_range(0.5..5.0));
    let grid = CostGrid::new(costs).expect("finite costs");
    let targets = (0..dims.len() / 200 + 2)
        .map(|_| {
            Cell::new(
                rng.random_range(0..side as i32),
                rng.random_range(0..side as i32),
            )
        })
        .collect();
    (grid, targets)
}

fn bench_connect(c: &mut Criterion) {
    let mut group = c.benchmark_group("connect");
    for side in [64usize, 128, 256] {
        let (grid, targets) = scenario(side, 7);
        let graph = GridGraph::new(&grid);
        let opts = SpanningOptions::default()
            .with_progress_step(0)
            .with_record_connections(false);
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let report = connect(&graph, black_box(&targets), opts.clone()).unwrap();
                black_box(report.network().total_cost())
            });
        });
    }
    group.finish();
}

fn bench_distance_map(c: &mut Criterion) {
    let (grid, targets) = scenario(256, 11);
    let graph = GridGraph::new(&grid);
    c.bench_function("distance_map_256", |b| {
        b.iter(|| distance_map(&graph, black_box(targets.as_slice()), f64::INFINITY));
    });
}

criterion_group!(benches, bench_connect, bench_distance_map);
criterion_main!(benches);
