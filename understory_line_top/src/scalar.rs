// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction for line heights and vertical offsets.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Scalar type used for line heights, block heights, and pixel offsets.
///
/// Implemented for `f32` and `f64`. Values are expected to be finite; the
/// index never produces NaN on its own as long as the default line height is
/// positive.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity (typically `0.0`).
    fn zero() -> Self;

    /// Returns the maximum of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Returns the minimum of `self` and `other`.
    fn min(self, other: Self) -> Self;

    /// Constructs from a `usize` lossily.
    fn from_usize(value: usize) -> Self;

    /// Returns half of the value.
    fn half(self) -> Self {
        self / Self::from_usize(2)
    }

    /// Rounds to the nearest non-negative integer, with halves rounding up.
    ///
    /// Negative values and NaN map to `0`; values beyond `usize::MAX`
    /// saturate.
    fn round_half_up_to_usize(self) -> usize;

    /// Rounds up to the nearest non-negative integer.
    ///
    /// Negative values and NaN map to `0`; values beyond `usize::MAX`
    /// saturate.
    fn ceil_to_usize(self) -> usize;
}

impl Scalar for f32 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn round_half_up_to_usize(self) -> usize {
        if self.is_nan() || self <= 0.0 {
            return 0;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float to int casts saturate; the input is known to be positive"
        )]
        {
            (self + 0.5) as usize
        }
    }

    fn ceil_to_usize(self) -> usize {
        if self.is_nan() || self <= 0.0 {
            return 0;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float to int casts saturate; the input is known to be positive"
        )]
        let whole = self as usize;
        if (whole as Self) < self {
            whole.saturating_add(1)
        } else {
            whole
        }
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn round_half_up_to_usize(self) -> usize {
        if self.is_nan() || self <= 0.0 {
            return 0;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float to int casts saturate; the input is known to be positive"
        )]
        {
            (self + 0.5) as usize
        }
    }

    fn ceil_to_usize(self) -> usize {
        if self.is_nan() || self <= 0.0 {
            return 0;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float to int casts saturate; the input is known to be positive"
        )]
        let whole = self as usize;
        if (whole as Self) < self {
            whole.saturating_add(1)
        } else {
            whole
        }
    }
}
