// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweep a probe circle across a field of particles and compare the grid's
//! candidate count against the exact neighborhood.

use kurbo::Point;
use shoal_particles::ParticleSet;

// Deterministic xorshift; keeps the demo reproducible without an RNG crate.
struct Rng(u64);

impl Rng {
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
        (v as f64) / ((1_u64 << 53) as f64)
    }
}

fn main() -> Result<(), shoal_grid::GridError> {
    let mut set: ParticleSet<u32> = ParticleSet::new(1000.0, 1000.0, 10, 32)?;
    let mut rng = Rng(0x00C0_FFEE_0000_0001);
    for i in 0..1000 {
        let pos = Point::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0);
        set.insert(pos, i)?;
    }
    set.rebuild()?;
    println!("{set:?}");

    // Walk a probe along the diagonal, as if following the mouse.
    let radius = 75.0;
    for step in 0..10 {
        let center = Point::new(f64::from(step) * 111.0, f64::from(step) * 111.0);
        let candidates = set.candidates(center, radius).count();
        let exact = set.within(center, radius).count();
        println!(
            "probe ({:6.1}, {:6.1}) r={radius}: {candidates:3} candidates -> {exact:3} within",
            center.x, center.y
        );
    }
    Ok(())
}
