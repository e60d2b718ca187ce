use std::num::NonZero;

use cranes::{solve_dynamic_programming, solve_exhaustive, Grid, RandomGridOptions};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_grid(side: usize) -> Grid {
    let side = NonZero::new(side).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    Grid::random((side, side), &RandomGridOptions::default(), &mut rng)
}

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");
    for side in [4usize, 6, 8, 10] {
        let grid = random_grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &grid, |b, grid| {
            b.iter(|| criterion::black_box(solve_exhaustive(grid).total_cranes()))
        });
    }
    group.finish();
}

fn bench_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_programming");
    for side in [10usize, 50, 200] {
        let grid = random_grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &grid, |b, grid| {
            b.iter(|| criterion::black_box(solve_dynamic_programming(grid).total_cranes()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_exhaustive, bench_dynamic);
criterion_main!(benches);
