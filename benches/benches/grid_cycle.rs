// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use shoal_grid::Grid;

const WORLD: f64 = 1000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push((rng.next_f64() * WORLD, rng.next_f64() * WORLD));
    }
    out
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let points = gen_points(10_000, 0xCAFE_F00D_DEAD_BEEF);
    for &resolution in &[10usize, 32, 64] {
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("res{}", resolution), |b| {
            b.iter_batched(
                || Grid::<f64, u32>::new(WORLD, WORLD, resolution, 64).unwrap(),
                |mut grid| {
                    for (i, &(x, y)) in points.iter().enumerate() {
                        let _ = grid.insert(x, y, i as u32);
                    }
                    black_box(grid.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let points = gen_points(10_000, 0xBADC_F00D_1234_5678);
    let probes = gen_points(256, 0xC1A5_7E55_9999_ABCD);
    for &resolution in &[10usize, 32, 64] {
        let mut grid = Grid::<f64, u32>::new(WORLD, WORLD, resolution, 64).unwrap();
        for (i, &(x, y)) in points.iter().enumerate() {
            let _ = grid.insert(x, y, i as u32);
        }
        for &radius in &[25.0, 100.0] {
            group.throughput(Throughput::Elements(probes.len() as u64));
            group.bench_function(format!("res{}_r{}", resolution, radius), |b| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &(x, y) in &probes {
                        hits += grid.nearest_points(x, y, radius).count();
                    }
                    black_box(hits);
                })
            });
        }
    }
    group.finish();
}

// The reference per-frame pattern: clear, re-insert every point, probe.
fn bench_clear_reinsert_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");
    for &count in &[1_000usize, 10_000] {
        let points = gen_points(count, 0x5EED_5EED_0000_0001);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("clear_reinsert_query_n{}", count), |b| {
            let mut grid = Grid::<f64, u32>::new(WORLD, WORLD, 32, 64).unwrap();
            b.iter(|| {
                grid.clear();
                for (i, &(x, y)) in points.iter().enumerate() {
                    let _ = grid.insert(x, y, i as u32);
                }
                let hits = grid.nearest_points(500.0, 500.0, 75.0).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_query,
    bench_clear_reinsert_cycle
);
criterion_main!(benches);
