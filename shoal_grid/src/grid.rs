// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform bucket grid over a bounded world rectangle.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::error::GridError;
use crate::types::Coord;

/// Strictly-positive check that also rejects NaN.
fn positive<T: Coord>(v: T) -> bool {
    matches!(v.partial_cmp(&T::zero()), Some(Ordering::Greater))
}

/// Uniform-grid spatial index for 2D points.
///
/// Partitions the world rectangle `[0, world_w) × [0, world_h)`, anchored at
/// the origin, into `resolution × resolution` cells and routes each inserted
/// value to the bucket containing its coordinates. Buckets are stored as a
/// single flat, row-major sequence: a point in cell column `cx` and row `cy`
/// lands at index `cy * resolution + cx`.
///
/// Radius queries are approximate by construction: [`Grid::nearest_points`]
/// returns every value inside the query circle plus values from cells the
/// circle only partially covers. Callers needing exact results apply their
/// own distance test to the candidates.
///
/// The grid stores values, not positions. `P` is by convention a handle or
/// index into point storage the caller owns; coordinates are consumed by the
/// routing arithmetic and discarded.
pub struct Grid<T: Coord, P: Copy + Debug> {
    world_w: T,
    world_h: T,
    resolution: usize,
    cell_w: T,
    cell_h: T,
    bucket_capacity: usize,
    buckets: Vec<Vec<P>>,
}

/// Clamped inclusive cell-coordinate span of a query window.
struct CellSpan {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl<T: Coord, P: Copy + Debug> Grid<T, P> {
    /// Create a grid over a `world_w × world_h` world with `resolution`
    /// cells per axis.
    ///
    /// Allocates exactly `resolution²` empty buckets, each pre-reserving
    /// room for `bucket_capacity` values so steady-state insert cycles pay
    /// no reallocation cost. The capacity is a hint, not a limit; buckets
    /// grow past it as needed.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidConfiguration`] if `world_w` or `world_h` is not
    /// strictly positive (NaN included) or `resolution` is zero.
    pub fn new(
        world_w: T,
        world_h: T,
        resolution: usize,
        bucket_capacity: usize,
    ) -> Result<Self, GridError> {
        if resolution == 0 || !positive(world_w) || !positive(world_h) {
            return Err(GridError::InvalidConfiguration);
        }
        let size = T::from_usize(resolution);
        let mut buckets = Vec::with_capacity(resolution * resolution);
        buckets.resize_with(resolution * resolution, || {
            Vec::with_capacity(bucket_capacity)
        });
        Ok(Self {
            world_w,
            world_h,
            resolution,
            cell_w: T::div(world_w, size),
            cell_h: T::div(world_h, size),
            bucket_capacity,
            buckets,
        })
    }

    /// Re-initialize in place, discarding all buckets and contents.
    ///
    /// Fully replaces the previous configuration; no partial state survives.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidConfiguration`] as for [`Grid::new`]; on error
    /// the grid is left exactly as it was.
    pub fn reset(
        &mut self,
        world_w: T,
        world_h: T,
        resolution: usize,
        bucket_capacity: usize,
    ) -> Result<(), GridError> {
        *self = Self::new(world_w, world_h, resolution, bucket_capacity)?;
        Ok(())
    }

    /// Insert `value` into the bucket containing `(x, y)`.
    ///
    /// Insertion order within a bucket is preserved, which keeps query
    /// output deterministic for a given insert sequence.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `(x, y)` lies outside the world
    /// rectangle. A failed insert leaves every bucket untouched.
    pub fn insert(&mut self, x: T, y: T, value: P) -> Result<(), GridError> {
        let index = self.bucket_index(x, y)?;
        self.buckets[index].push(value);
        Ok(())
    }

    /// Empty every bucket, keeping reserved capacity.
    ///
    /// This is the per-update-cycle reset for moving point sets: clear,
    /// re-insert every point at its new position, then query. Idempotent and
    /// safe on an already-empty grid.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Flat row-major index of the bucket containing `(x, y)`.
    ///
    /// Pure function of the grid configuration; in-bounds coordinates always
    /// produce an index in `[0, resolution²)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `(x, y)` lies outside the world
    /// rectangle. The check is per axis: a coordinate past the world's right
    /// edge is rejected even though the flat arithmetic alone would land the
    /// point in range on a later row.
    pub fn bucket_index(&self, x: T, y: T) -> Result<usize, GridError> {
        let cell_x = T::floor_to_i64(T::div(x, self.cell_w));
        let cell_y = T::floor_to_i64(T::div(y, self.cell_h));
        let size = i64::try_from(self.resolution).unwrap_or(i64::MAX);
        if cell_x < 0 || cell_x >= size || cell_y < 0 || cell_y >= size {
            return Err(GridError::OutOfBounds {
                cell_x,
                cell_y,
                resolution: self.resolution,
            });
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "both cell coordinates are checked against [0, resolution) above"
        )]
        let index = cell_y as usize * self.resolution + cell_x as usize;
        Ok(index)
    }

    /// Indices of every bucket whose cell intersects the axis-aligned
    /// bounding square of the query circle at `(x, y)` with `radius`.
    ///
    /// The window is clamped to the grid, never rejected: a query centered
    /// near or past the world boundary is silently truncated to the nearest
    /// in-bounds rows and columns, so off-world probes still return the
    /// closest buckets. Cells only partially covered by the circle are
    /// included. Each index appears exactly once, in row-major order.
    ///
    /// A zero radius yields the single bucket containing `(x, y)`; a radius
    /// whose bounding square spans the world yields every bucket.
    ///
    /// `radius` must be non-negative; debug builds assert.
    pub fn nearest_buckets(&self, x: T, y: T, radius: T) -> impl Iterator<Item = usize> + '_ {
        debug_assert!(radius >= T::zero(), "query radius must be non-negative");
        let span = self.cell_span(x, y, radius);
        let mut out = Vec::new();
        for cell_y in span.min_y..=span.max_y {
            for cell_x in span.min_x..=span.max_x {
                out.push(cell_y * self.resolution + cell_x);
            }
        }
        out.into_iter()
    }

    /// All values held by the buckets of [`Grid::nearest_buckets`], in
    /// bucket-visitation order.
    ///
    /// The result is a superset of the true circular neighborhood: every
    /// value within `radius` of `(x, y)` is present, along with values from
    /// partially covered cells that lie outside the circle. Apply an exact
    /// distance test to prune the false positives. A value inserted once
    /// appears at most once.
    pub fn nearest_points(&self, x: T, y: T, radius: T) -> impl Iterator<Item = P> + '_ {
        let mut out = Vec::new();
        for index in self.nearest_buckets(x, y, radius) {
            out.extend_from_slice(&self.buckets[index]);
        }
        out.into_iter()
    }

    /// Contents of the bucket at `index`, or `None` if out of range.
    pub fn bucket(&self, index: usize) -> Option<&[P]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Cells per axis. The grid always holds exactly `resolution()²` buckets.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Width of one cell in world units.
    pub fn cell_width(&self) -> T {
        self.cell_w
    }

    /// Height of one cell in world units.
    pub fn cell_height(&self) -> T {
        self.cell_h
    }

    /// World extent along x. Valid coordinates satisfy `0 <= x < world_width()`.
    pub fn world_width(&self) -> T {
        self.world_w
    }

    /// World extent along y. Valid coordinates satisfy `0 <= y < world_height()`.
    pub fn world_height(&self) -> T {
        self.world_h
    }

    /// Per-bucket preallocation hint the grid was configured with.
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Total number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of stored values across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True if no bucket holds any value.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Clamped inclusive cell span of the bounding square of a query circle.
    fn cell_span(&self, x: T, y: T, radius: T) -> CellSpan {
        let hi = T::from_usize(self.resolution - 1);
        // Corners of the bounding square, converted to continuous grid space
        // and clipped to stay inside the grid.
        let min_gx = T::clip(T::div(T::sub(x, radius), self.cell_w), T::zero(), hi);
        let min_gy = T::clip(T::div(T::sub(y, radius), self.cell_h), T::zero(), hi);
        let max_gx = T::clip(T::div(T::add(x, radius), self.cell_w), T::zero(), hi);
        let max_gy = T::clip(T::div(T::add(y, radius), self.cell_h), T::zero(), hi);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clipped grid coordinates lie in [0, resolution - 1], so their floors do too"
        )]
        let (min_x, min_y, max_x, max_y) = (
            T::floor_to_i64(min_gx) as usize,
            T::floor_to_i64(min_gy) as usize,
            T::floor_to_i64(max_gx) as usize,
            T::floor_to_i64(max_gy) as usize,
        );
        CellSpan {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Coord, P: Copy + Debug> Debug for Grid<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        f.debug_struct("Grid")
            .field("world_w", &self.world_w)
            .field("world_h", &self.world_h)
            .field("resolution", &self.resolution)
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("occupied", &occupied)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
