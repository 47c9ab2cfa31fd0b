// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel coordinate scalar.
//!
//! Row heights, spacer extents, and viewport bounds all share one scalar type.
//! Only `f32` and `f64` implement it.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Scalar type used for row heights, spacer extents, and scroll positions.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity.
    fn zero() -> Self;

    /// Returns the maximum of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Lossy conversion from a row count or index.
    fn from_usize(value: usize) -> Self;

    /// Converts to `isize`, rounding toward zero.
    ///
    /// For non-negative inputs this is a floor. Callers clamp negative results
    /// to zero, where truncation and flooring agree.
    fn floor_to_isize(self) -> isize;

    /// Clamps negative values (and NaN) to zero.
    fn clamp_non_negative(self) -> Self {
        if self > Self::zero() {
            self
        } else {
            Self::zero()
        }
    }

    /// Returns `true` for finite values strictly greater than zero.
    fn is_positive_finite(self) -> bool {
        self.is_finite() && self > Self::zero()
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            fn max(self, other: Self) -> Self {
                Self::max(self, other)
            }

            fn is_finite(self) -> bool {
                Self::is_finite(self)
            }

            fn from_usize(value: usize) -> Self {
                value as Self
            }

            fn floor_to_isize(self) -> isize {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "Only used for row index approximation; results are clamped"
                )]
                {
                    self as isize
                }
            }
        }
    )*};
}

impl_scalar!(f32, f64);
