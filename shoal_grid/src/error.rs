// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for grid configuration and insertion.

use thiserror::Error;

/// Errors produced by [`Grid`](crate::Grid) configuration and insertion.
///
/// Queries never fail: query windows reaching past the world boundary are
/// clamped to the nearest in-bounds cells (see
/// [`Grid::nearest_buckets`](crate::Grid::nearest_buckets)), and an empty
/// result is a valid outcome, not an error. All errors here are local and
/// recoverable; a failed call leaves the grid's contents untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// World dimensions or grid resolution were non-positive at
    /// initialization.
    #[error("world dimensions and grid resolution must be positive")]
    InvalidConfiguration,

    /// A point mapped to a cell outside the allocated grid.
    ///
    /// Raised when a coordinate handed to
    /// [`Grid::insert`](crate::Grid::insert) or
    /// [`Grid::bucket_index`](crate::Grid::bucket_index) lies outside the
    /// world rectangle. Callers may clamp the coordinate into bounds, drop
    /// the point, or grow the world and reset the grid.
    #[error("point maps to cell ({cell_x}, {cell_y}), outside a {resolution}x{resolution} grid")]
    OutOfBounds {
        /// Cell column the point mapped to (may be negative).
        cell_x: i64,
        /// Cell row the point mapped to (may be negative).
        cell_y: i64,
        /// Cells per axis of the rejecting grid.
        resolution: usize,
    },
}
