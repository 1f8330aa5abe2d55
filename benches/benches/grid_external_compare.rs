// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use shoal_grid::Grid;

use rstar::RTree;

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

fn gen_points(count: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push([rng.next_f64() * WORLD, rng.next_f64() * WORLD]);
    }
    out
}

// Build from scratch, then count exact hits within one probe radius. The
// shoal side post-filters its candidate set, which is what callers do.
fn bench_grid_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_external_compare");
    let probe = [500.0, 500.0];
    let radius = 75.0;
    for &count in &[1_000usize, 10_000] {
        let points = gen_points(count, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(format!("shoal_build_query_n{}", count), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut grid = Grid::<f64, u32>::new(WORLD, WORLD, 32, 64).unwrap();
                    for (i, &[x, y]) in points.iter().enumerate() {
                        let _ = grid.insert(x, y, i as u32);
                    }
                    let r2 = radius * radius;
                    let hits = grid
                        .nearest_points(probe[0], probe[1], radius)
                        .filter(|&i| {
                            let [x, y] = points[i as usize];
                            let (dx, dy) = (x - probe[0], y - probe[1]);
                            dx * dx + dy * dy <= r2
                        })
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", count), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let hits = tree
                        .locate_within_distance(probe, radius * radius)
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_external_compare);
criterion_main!(benches);
