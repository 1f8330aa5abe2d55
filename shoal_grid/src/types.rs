// Copyright 2025 the Shoal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate scalar abstraction.

use core::fmt::Debug;

/// Numeric scalar abstraction for world coordinates.
///
/// This trait provides the minimal set of operations the grid needs: cell
/// size derivation, bounding-square arithmetic, clamping, and floor
/// conversion to a signed cell coordinate. Implemented for `f32` and `f64`.
///
/// Floating-point coordinates are assumed finite (no NaNs). Debug builds may
/// assert.
pub trait Coord: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Divide two scalar values: a / b.
    fn div(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Convert a cell count to the scalar type.
    fn from_usize(n: usize) -> Self;

    /// Clip `v` into `[lo, hi]`.
    fn clip(v: Self, lo: Self, hi: Self) -> Self;

    /// Floor toward negative infinity, as a signed cell coordinate.
    fn floor_to_i64(v: Self) -> i64;
}

impl Coord for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn div(a: Self, b: Self) -> Self {
        a / b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        n as Self
    }

    #[inline]
    fn clip(v: Self, lo: Self, hi: Self) -> Self {
        v.clamp(lo, hi)
    }

    #[inline]
    fn floor_to_i64(v: Self) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "cell coordinates fit i64 for any workable grid"
        )]
        let i = v as i64;
        if (i as Self) > v { i - 1 } else { i }
    }
}

impl Coord for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn div(a: Self, b: Self) -> Self {
        a / b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        n as Self
    }

    #[inline]
    fn clip(v: Self, lo: Self, hi: Self) -> Self {
        v.clamp(lo, hi)
    }

    #[inline]
    fn floor_to_i64(v: Self) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "cell coordinates fit i64 for any workable grid"
        )]
        let i = v as i64;
        if (i as Self) > v { i - 1 } else { i }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_matches_mathematical_floor() {
        assert_eq!(f64::floor_to_i64(2.9), 2);
        assert_eq!(f64::floor_to_i64(3.0), 3);
        assert_eq!(f64::floor_to_i64(-0.1), -1);
        assert_eq!(f64::floor_to_i64(-2.0), -2);
        assert_eq!(f32::floor_to_i64(-5.5), -6);
    }

    #[test]
    fn clip_is_inclusive_on_both_ends() {
        assert_eq!(f64::clip(-3.0, 0.0, 9.0), 0.0);
        assert_eq!(f64::clip(12.5, 0.0, 9.0), 9.0);
        assert_eq!(f64::clip(9.0, 0.0, 9.0), 9.0);
        assert_eq!(f64::clip(4.2, 0.0, 9.0), 4.2);
    }
}
