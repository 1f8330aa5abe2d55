// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shoal Grid: a uniform-grid spatial index for 2D point data.
//!
//! Shoal Grid accelerates approximate-radius nearest-neighbor lookups for
//! large, dynamic point sets such as particle systems.
//!
//! - A bounded rectangular world anchored at the origin is cut into a fixed
//!   `resolution × resolution` grid of buckets.
//! - [`Grid::insert`] routes a value to the bucket containing its
//!   coordinates; [`Grid::clear`] empties all buckets without giving up
//!   their capacity, so a moving point set can be re-indexed every update
//!   cycle at steady cost.
//! - [`Grid::nearest_buckets`] maps a query circle to the bucket indices its
//!   bounding square covers; [`Grid::nearest_points`] flattens those buckets
//!   into a candidate value list.
//!
//! It is generic over the coordinate scalar (`f32`/`f64` via [`Coord`]) and
//! over a `Copy` payload type, and does not depend on any geometry crate.
//! Higher layers decide what a value is, typically an index or handle into
//! point storage the caller owns.
//!
//! # Example
//!
//! ```rust
//! use shoal_grid::Grid;
//!
//! // A 1000×1000 world cut into a 10×10 grid of buckets.
//! let mut grid: Grid<f64, u32> = Grid::new(1000.0, 1000.0, 10, 16)?;
//! grid.insert(50.0, 50.0, 1)?;
//! grid.insert(950.0, 950.0, 2)?;
//!
//! // Candidate values near (60, 60). Only the nearby corner bucket is hit.
//! let near: Vec<u32> = grid.nearest_points(60.0, 60.0, 25.0).collect();
//! assert_eq!(near, vec![1]);
//! # Ok::<(), shoal_grid::GridError>(())
//! ```
//!
//! # Approximate results
//!
//! A radius query returns the full contents of every bucket whose cell
//! intersects the query circle's bounding square, so values outside the
//! circle can appear in the result. There are no false negatives; callers
//! wanting the exact circular neighborhood post-filter by true distance (the
//! `shoal_particles` crate does this).
//!
//! # Boundary clamping
//!
//! Query windows are clamped into the grid rather than rejected: probing
//! near or past the world edge returns the nearest in-bounds buckets instead
//! of erroring. This suits UI-style probing but surprises callers expecting
//! strict rejection, so it is worth internalizing:
//!
//! ```rust
//! use shoal_grid::Grid;
//!
//! let grid: Grid<f64, u8> = Grid::new(1000.0, 1000.0, 10, 0).unwrap();
//! let off_world: Vec<usize> = grid.nearest_buckets(-500.0, 500.0, 50.0).collect();
//! let clamped: Vec<usize> = grid.nearest_buckets(0.0, 500.0, 50.0).collect();
//! assert_eq!(off_world, clamped);
//! ```
//!
//! Inserts, by contrast, are strict: a point outside the world rectangle is
//! a recoverable [`GridError::OutOfBounds`], never a silent misfile.
//!
//! # Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates (configuration
//! rejects NaN world extents eagerly). Debug builds may assert.
//!
//! All operations are synchronous and single-threaded per grid instance;
//! mutation takes `&mut self`, queries take `&self` and allocate fresh
//! result buffers, so shared queries never alias.

#![no_std]

extern crate alloc;

pub mod error;
pub mod grid;
pub mod types;

pub use error::GridError;
pub use grid::Grid;
pub use types::Coord;
