//! Scalar types and floating point tolerance helpers
//!
//! Every frame names the scalar type its quantities are written in. Only
//! `f32` and `f64` are supported; both implement [`Scalar`].

use approx::{RelativeEq, UlpsEq};
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Library default floating point tolerance for unit-norm checks, in ULPs
pub const MAX_NORMALIZED_ULP_DIFF: u32 = 4;

/// Floating point scalar usable as a frame's component type
pub trait Scalar:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + RelativeEq<Epsilon = Self>
    + UlpsEq<Epsilon = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    fn two() -> Self;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn abs(self) -> Self;
    fn is_finite(self) -> bool;

    /// Euclidean norm of three components without intermediate overflow
    fn hypot3(x: Self, y: Self, z: Self) -> Self;

    /// Number of representable values between `self` and `other`
    ///
    /// Returns `u64::MAX` if either value is not finite.
    fn ulp_diff(self, other: Self) -> u64;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            fn zero() -> Self {
                0.0
            }

            fn one() -> Self {
                1.0
            }

            fn two() -> Self {
                2.0
            }

            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            fn atan2(self, other: Self) -> Self {
                <$t>::atan2(self, other)
            }

            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            fn hypot3(x: Self, y: Self, z: Self) -> Self {
                x.hypot(y).hypot(z)
            }

            fn ulp_diff(self, other: Self) -> u64 {
                if !self.is_finite() || !other.is_finite() {
                    return u64::MAX;
                }

                let i = self.abs().to_bits() as u64;
                let j = other.abs().to_bits() as u64;

                if self.is_sign_negative() == other.is_sign_negative() {
                    i.abs_diff(j)
                } else {
                    i.saturating_add(j)
                }
            }

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_scalar!(f32);
impl_scalar!(f64);

/// Count of representable steps between two same-type floats
pub fn ulp_diff<T: Scalar>(a: T, b: T) -> u64 {
    a.ulp_diff(b)
}

/// Check whether two floats are within `max_ulps` representable steps
pub fn within_ulps<T: Scalar>(a: T, b: T, max_ulps: u32) -> bool {
    a.ulps_eq(&b, T::zero(), max_ulps)
}

/// Check whether a squared norm is one within [`MAX_NORMALIZED_ULP_DIFF`]
pub fn is_unit<T: Scalar>(squared_norm: T) -> bool {
    within_ulps(T::one(), squared_norm, MAX_NORMALIZED_ULP_DIFF)
}
