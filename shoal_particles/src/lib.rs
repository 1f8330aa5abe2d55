// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shoal Particles: a Kurbo-native particle set over a uniform bucket grid.
//!
//! [`ParticleSet`] owns positions and payloads for a dynamic set of 2D
//! particles and keeps them searchable through a [`shoal_grid::Grid`]. The
//! intended cycle per simulation update:
//!
//! 1. move particles with [`ParticleSet::set_position`] (or insert/remove);
//! 2. call [`ParticleSet::rebuild`] once to re-route every active particle;
//! 3. probe neighborhoods with [`ParticleSet::within`] (exact) or
//!    [`ParticleSet::candidates`] (superset, no distance filter).
//!
//! Unlike the raw grid, [`ParticleSet::within`] applies the exact distance
//! test, so its results are true circular neighborhoods, boundary included.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use shoal_particles::ParticleSet;
//!
//! let mut set: ParticleSet<&str> = ParticleSet::new(1000.0, 1000.0, 10, 16)?;
//! let a = set.insert(Point::new(50.0, 50.0), "a")?;
//! let _b = set.insert(Point::new(950.0, 950.0), "b")?;
//! set.rebuild()?;
//!
//! let near: Vec<_> = set.within(Point::new(60.0, 60.0), 25.0).collect();
//! assert_eq!(near, vec![(a, &"a")]);
//! # Ok::<(), shoal_grid::GridError>(())
//! ```
//!
//! Particles carry [`ParticleFlags`]: clearing `ACTIVE` keeps a particle out
//! of the index on the next rebuild, clearing `SEARCHABLE` keeps it indexed
//! but invisible to queries. Handles are generational: after a particle is
//! removed, its [`ParticleId`] goes dead and never resurrects, even when the
//! slot is reused. ([`ParticleSet::clear`] is the exception: it resets all
//! slots, so handles from before a clear must be discarded.)
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use bitflags::bitflags;
use core::fmt::Debug;
use kurbo::Point;
use shoal_grid::{Grid, GridError};

/// Generational handle for a particle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParticleId(u32, u32);

impl ParticleId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "particle ids use 32-bit indices by design"
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Flags controlling how a particle participates in indexing and queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ParticleFlags: u8 {
        /// Particle is routed into the grid at [`ParticleSet::rebuild`].
        const ACTIVE     = 0b0000_0001;
        /// Particle may appear in query results.
        const SEARCHABLE = 0b0000_0010;
    }
}

impl Default for ParticleFlags {
    fn default() -> Self {
        Self::ACTIVE | Self::SEARCHABLE
    }
}

#[derive(Clone, Debug)]
struct Particle<P> {
    pos: Point,
    flags: ParticleFlags,
    payload: P,
}

/// Generational slot. The generation outlives the particle so a reused slot
/// never revives a stale handle.
#[derive(Clone, Debug)]
struct Slot<P> {
    generation: u32,
    live: Option<Particle<P>>,
}

/// A dynamic set of 2D particles with payloads, indexed for radius queries.
///
/// Positions are validated against the world rectangle when they enter the
/// set, so [`ParticleSet::rebuild`] cannot trip over a stored point.
pub struct ParticleSet<P> {
    slots: Vec<Slot<P>>,
    free_list: Vec<usize>,
    grid: Grid<f64, usize>,
    live: usize,
}

impl<P> ParticleSet<P> {
    /// Create a set over a `world_w × world_h` world with `resolution` grid
    /// cells per axis, expecting about `capacity_hint` particles per cell.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidConfiguration`] for non-positive world extents or
    /// a zero resolution.
    pub fn new(
        world_w: f64,
        world_h: f64,
        resolution: usize,
        capacity_hint: usize,
    ) -> Result<Self, GridError> {
        Ok(Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            grid: Grid::new(world_w, world_h, resolution, capacity_hint)?,
            live: 0,
        })
    }

    /// Add a particle with default flags. Visible to queries after the next
    /// [`ParticleSet::rebuild`].
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `pos` lies outside the world rectangle.
    pub fn insert(&mut self, pos: Point, payload: P) -> Result<ParticleId, GridError> {
        self.grid.bucket_index(pos.x, pos.y)?;
        let particle = Particle {
            pos,
            flags: ParticleFlags::default(),
            payload,
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation += 1;
            slot.live = Some(particle);
            ParticleId::new(idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                live: Some(particle),
            });
            ParticleId::new(self.slots.len() - 1, 1)
        };
        self.live += 1;
        Ok(id)
    }

    /// Move a particle. Takes effect in queries after the next rebuild.
    /// Stale handles are ignored.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `pos` lies outside the world rectangle;
    /// the particle keeps its previous position.
    pub fn set_position(&mut self, id: ParticleId, pos: Point) -> Result<(), GridError> {
        self.grid.bucket_index(pos.x, pos.y)?;
        if let Some(p) = self.particle_mut(id) {
            p.pos = pos;
        }
        Ok(())
    }

    /// Replace a particle's flags. Stale handles are ignored.
    pub fn set_flags(&mut self, id: ParticleId, flags: ParticleFlags) {
        if let Some(p) = self.particle_mut(id) {
            p.flags = flags;
        }
    }

    /// Remove a particle. Its handle goes dead immediately: queries skip the
    /// slot even before the next rebuild. Stale handles are ignored.
    pub fn remove(&mut self, id: ParticleId) {
        let Some(slot) = self.slots.get_mut(id.idx()) else {
            return;
        };
        if slot.generation != id.1 || slot.live.is_none() {
            return;
        }
        slot.live = None;
        self.free_list.push(id.idx());
        self.live -= 1;
    }

    /// Current position, or `None` for a stale handle.
    pub fn position(&self, id: ParticleId) -> Option<Point> {
        self.particle(id).map(|p| p.pos)
    }

    /// Current flags, or `None` for a stale handle.
    pub fn flags(&self, id: ParticleId) -> Option<ParticleFlags> {
        self.particle(id).map(|p| p.flags)
    }

    /// Borrow a particle's payload.
    pub fn get(&self, id: ParticleId) -> Option<&P> {
        self.particle(id).map(|p| &p.payload)
    }

    /// Mutably borrow a particle's payload.
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut P> {
        self.particle_mut(id).map(|p| &mut p.payload)
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if the set holds no live particles.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Remove every particle and empty the grid. All outstanding handles
    /// must be discarded afterwards.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.grid.clear();
        self.live = 0;
    }

    /// Clear the grid and re-route every [`ParticleFlags::ACTIVE`] particle.
    ///
    /// Call once per update cycle, after moving particles and before
    /// querying. Bucket capacity reserved in earlier cycles is kept, so a
    /// steady-state rebuild allocates nothing.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] is propagated from the grid; positions are
    /// validated on entry, so this is not reachable through this API.
    pub fn rebuild(&mut self) -> Result<(), GridError> {
        self.grid.clear();
        for (idx, slot) in self.slots.iter().enumerate() {
            let Some(p) = slot.live.as_ref() else {
                continue;
            };
            if !p.flags.contains(ParticleFlags::ACTIVE) {
                continue;
            }
            self.grid.insert(p.pos.x, p.pos.y, idx)?;
        }
        Ok(())
    }

    /// Particles within exactly `radius` of `center`.
    ///
    /// Gathers the grid's candidates and prunes them by true distance, so
    /// the result is the exact circular neighborhood (boundary included).
    /// Skips particles without [`ParticleFlags::SEARCHABLE`]. Positions
    /// reflect the last [`ParticleSet::rebuild`]; removed particles never
    /// appear.
    pub fn within(&self, center: Point, radius: f64) -> impl Iterator<Item = (ParticleId, &P)> + '_ {
        let r2 = radius * radius;
        let mut out = Vec::new();
        for idx in self.grid.nearest_points(center.x, center.y, radius) {
            let Some((id, particle)) = self.resolve(idx) else {
                continue;
            };
            if !particle.flags.contains(ParticleFlags::SEARCHABLE) {
                continue;
            }
            if particle.pos.distance_squared(center) <= r2 {
                out.push((id, &particle.payload));
            }
        }
        out.into_iter()
    }

    /// The unfiltered candidate set for a radius probe: every searchable
    /// particle in a bucket whose cell intersects the probe's bounding
    /// square.
    ///
    /// A superset of [`ParticleSet::within`]; candidates from partially
    /// covered cells may lie outside the circle.
    pub fn candidates(
        &self,
        center: Point,
        radius: f64,
    ) -> impl Iterator<Item = (ParticleId, &P)> + '_ {
        let mut out = Vec::new();
        for idx in self.grid.nearest_points(center.x, center.y, radius) {
            let Some((id, particle)) = self.resolve(idx) else {
                continue;
            };
            if !particle.flags.contains(ParticleFlags::SEARCHABLE) {
                continue;
            }
            out.push((id, &particle.payload));
        }
        out.into_iter()
    }

    /// Direct access to the underlying grid, for diagnostics and bucket
    /// overlays.
    pub fn grid(&self) -> &Grid<f64, usize> {
        &self.grid
    }

    // --- internals ---

    fn resolve(&self, idx: usize) -> Option<(ParticleId, &Particle<P>)> {
        let slot = self.slots.get(idx)?;
        let p = slot.live.as_ref()?;
        Some((ParticleId::new(idx, slot.generation), p))
    }

    fn particle(&self, id: ParticleId) -> Option<&Particle<P>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.live.as_ref()
    }

    fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle<P>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.live.as_mut()
    }
}

impl<P> Debug for ParticleSet<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParticleSet")
            .field("slots_total", &self.slots.len())
            .field("live", &self.live)
            .field("free_list", &self.free_list.len())
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}
