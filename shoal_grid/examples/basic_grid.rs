// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Shoal Grid: insert points, probe a radius, inspect buckets.

use shoal_grid::{Grid, GridError};

fn main() -> Result<(), GridError> {
    // 1000×1000 world, 10×10 buckets of 100×100 world units each.
    let mut grid: Grid<f64, usize> = Grid::new(1000.0, 1000.0, 10, 16)?;

    // One point in the middle of every bucket, identified by its number.
    for i in 0..100 {
        let x = (i % 10) as f64 * 100.0 + 50.0;
        let y = (i / 10) as f64 * 100.0 + 50.0;
        grid.insert(x, y, i)?;
    }
    println!("grid: {grid:?}");

    // Probe a circle straddling four cells.
    let probe = (310.0, 310.0, 80.0);
    let buckets: Vec<usize> = grid.nearest_buckets(probe.0, probe.1, probe.2).collect();
    let candidates: Vec<usize> = grid.nearest_points(probe.0, probe.1, probe.2).collect();
    println!(
        "probe at ({}, {}) radius {}: buckets {buckets:?}, candidates {candidates:?}",
        probe.0, probe.1, probe.2
    );

    // The candidate list over-approximates the circle; prune by distance.
    let exact: Vec<usize> = candidates
        .into_iter()
        .filter(|&i| {
            let px = (i % 10) as f64 * 100.0 + 50.0;
            let py = (i / 10) as f64 * 100.0 + 50.0;
            let (dx, dy) = (px - probe.0, py - probe.1);
            dx * dx + dy * dy <= probe.2 * probe.2
        })
        .collect();
    println!("exact neighborhood: {exact:?}");

    // A probe centered off-world is clamped to the nearest edge buckets.
    let clamped: Vec<usize> = grid.nearest_buckets(-500.0, 500.0, 50.0).collect();
    println!("off-world probe clamps to buckets {clamped:?}");
    Ok(())
}
