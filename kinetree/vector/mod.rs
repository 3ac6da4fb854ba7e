//! Frame-tagged vector algebra
//!
//! Three-component quantities bound to a [`Frame`] at the type level:
//!
//! - [`Vector<F>`]: a free vector written in frame `F`
//! - [`Position<F>`]: a displacement from a world's origin, written in `F`
//! - [`Velocity<B, E>`]: a velocity observed from frame `B`, written in `E`
//!
//! Arithmetic is only defined between quantities of the same kind and the
//! same frame(s); anything else fails to compile. Moving a quantity into
//! another frame goes through an [`Orientation`] or a [`World`].
//!
//! # Example
//!
//! ```rust
//! use kinetree::{frame, Frame, Vector, Orientation};
//! use std::f64::consts::FRAC_PI_2;
//!
//! frame!(struct N);
//! frame!(struct A);
//!
//! let ori = Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::x()).unwrap();
//! let v = Vector::<N>::new(1.0, 2.0, 3.0);
//! let in_a: Vector<A> = v.express(&ori);
//! assert!((in_a.z() + 2.0).abs() < 1e-12);
//! ```

use crate::error::KinematicsResult;
use crate::frame::Frame;
use crate::orientation::Orientation;
use crate::scalar::Scalar;
use crate::world::World;
use std::fmt;
use std::marker::PhantomData;

mod ops;
mod position;
mod velocity;

pub use ops::{cross_product, dot_product, magnitude, normalized};
pub use position::Position;
pub use velocity::Velocity;

/// A frame-tagged three-component quantity
///
/// Implemented by [`Vector`], [`Position`] and [`Velocity`]; the generic
/// vector operations in this module work on any of them.
pub trait FrameVector: Copy {
    /// Component scalar type
    type Scalar: Scalar;

    /// The `[x, y, z]` components
    fn components(&self) -> [Self::Scalar; 3];

    /// Build a value of this kind from components
    fn from_components(components: [Self::Scalar; 3]) -> Self;
}

/// Shared implementation of every frame-tagged vector kind
///
/// The kind must be a struct with fields `data: [S; 3]` and
/// `_frames: PhantomData<..>`.
macro_rules! impl_frame_vector {
    ([$($gen:tt)*] $ty:ty, $s:ty) => {
        impl<$($gen)*> $ty {
            /// Construct from components
            pub fn new(x: $s, y: $s, z: $s) -> Self {
                Self::from_components([x, y, z])
            }

            /// Construct from an `[x, y, z]` array
            pub fn from_components(data: [$s; 3]) -> Self {
                Self {
                    data,
                    _frames: ::std::marker::PhantomData,
                }
            }

            /// The zero quantity
            pub fn zero() -> Self {
                Self::from_components([<$s as $crate::scalar::Scalar>::zero(); 3])
            }

            /// Check whether every component is zero
            pub fn is_zero(&self) -> bool {
                self.data.iter().all(|c| *c == <$s as $crate::scalar::Scalar>::zero())
            }

            /// x component
            pub fn x(&self) -> $s {
                self.data[0]
            }

            /// y component
            pub fn y(&self) -> $s {
                self.data[1]
            }

            /// z component
            pub fn z(&self) -> $s {
                self.data[2]
            }

            /// Mutable x component
            pub fn x_mut(&mut self) -> &mut $s {
                &mut self.data[0]
            }

            /// Mutable y component
            pub fn y_mut(&mut self) -> &mut $s {
                &mut self.data[1]
            }

            /// Mutable z component
            pub fn z_mut(&mut self) -> &mut $s {
                &mut self.data[2]
            }

            /// The `[x, y, z]` components
            pub fn components(&self) -> [$s; 3] {
                self.data
            }

            /// Iterate over the components
            pub fn iter(&self) -> impl Iterator<Item = &$s> + '_ {
                self.data.iter()
            }
        }

        impl<$($gen)*> Default for $ty {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl<$($gen)*> $crate::vector::FrameVector for $ty {
            type Scalar = $s;

            fn components(&self) -> [$s; 3] {
                self.data
            }

            fn from_components(components: [$s; 3]) -> Self {
                <$ty>::from_components(components)
            }
        }

        impl<$($gen)*> ::std::ops::Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self::from_components($crate::vector::ops::zip_with(self.data, rhs.data, |a, b| a + b))
            }
        }

        impl<$($gen)*> ::std::ops::Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self::from_components($crate::vector::ops::zip_with(self.data, rhs.data, |a, b| a - b))
            }
        }

        impl<$($gen)*> ::std::ops::Neg for $ty {
            type Output = Self;

            fn neg(self) -> Self {
                Self::from_components(self.data.map(|a| -a))
            }
        }

        impl<$($gen)*> ::std::ops::Mul<$s> for $ty {
            type Output = Self;

            fn mul(self, a: $s) -> Self {
                Self::from_components(self.data.map(|x| x * a))
            }
        }

        impl<$($gen)*> ::std::ops::Div<$s> for $ty {
            type Output = Self;

            fn div(self, a: $s) -> Self {
                Self::from_components(self.data.map(|x| x / a))
            }
        }

        impl<$($gen)*> ::std::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<$($gen)*> ::std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<$($gen)*> ::std::ops::MulAssign<$s> for $ty {
            fn mul_assign(&mut self, a: $s) {
                *self = *self * a;
            }
        }

        impl<$($gen)*> ::std::ops::DivAssign<$s> for $ty {
            fn div_assign(&mut self, a: $s) {
                *self = *self / a;
            }
        }

        impl<$($gen)*> ::std::ops::Mul<$ty> for f64
        where
            $ty: $crate::vector::FrameVector<Scalar = f64>,
        {
            type Output = $ty;

            fn mul(self, v: $ty) -> $ty {
                let data = <$ty as $crate::vector::FrameVector>::components(&v);
                <$ty as $crate::vector::FrameVector>::from_components(data.map(|x| self * x))
            }
        }

        impl<$($gen)*> ::std::ops::Mul<$ty> for f32
        where
            $ty: $crate::vector::FrameVector<Scalar = f32>,
        {
            type Output = $ty;

            fn mul(self, v: $ty) -> $ty {
                let data = <$ty as $crate::vector::FrameVector>::components(&v);
                <$ty as $crate::vector::FrameVector>::from_components(data.map(|x| self * x))
            }
        }

        impl<$($gen)*> ::approx::AbsDiffEq for $ty {
            type Epsilon = $s;

            fn default_epsilon() -> $s {
                <$s as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: $s) -> bool {
                self.data
                    .iter()
                    .zip(other.data.iter())
                    .all(|(a, b)| ::approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl<$($gen)*> ::approx::RelativeEq for $ty {
            fn default_max_relative() -> $s {
                <$s as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: $s, max_relative: $s) -> bool {
                self.data
                    .iter()
                    .zip(other.data.iter())
                    .all(|(a, b)| ::approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }
    };
}

pub(crate) use impl_frame_vector;

/// A free vector expressed in frame `F`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<F: Frame> {
    data: [F::Scalar; 3],
    _frames: PhantomData<F>,
}

impl_frame_vector!([F: Frame] Vector<F>, F::Scalar);

impl<F: Frame> Vector<F> {
    /// Express this vector in frame `To`
    ///
    /// # Arguments
    /// * `orientation` - Orientation of `To` relative to `F`
    pub fn express<To>(&self, orientation: &Orientation<F, To>) -> Vector<To>
    where
        To: Frame<Scalar = F::Scalar>,
    {
        orientation.rotate(self)
    }

    /// Express this vector in frame `To` using the orientations held by a world
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld)
    /// if `F` or `To` is not part of `world`.
    pub fn express_in<To, R>(&self, world: &World<R>) -> KinematicsResult<Vector<To>>
    where
        To: Frame<Scalar = F::Scalar>,
        R: Frame<Scalar = F::Scalar>,
    {
        Ok(world.express::<F, To>()?.rotate(self))
    }
}

impl<F: Frame> fmt::Display for Vector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.data[0], self.data[1], self.data[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    frame!(struct N);
    frame!(struct A);
    frame!(struct I: f32);

    #[test]
    fn test_default_is_zero() {
        let v = Vector::<N>::default();
        assert!(v.is_zero());
        assert_eq!(v.components(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_construct_and_access() {
        let v = Vector::<N>::new(1.0, 2.0, 3.0);
        assert_eq!((v.x(), v.y(), v.z()), (1.0, 2.0, 3.0));
        assert_eq!(v.iter().copied().sum::<f64>(), 6.0);
    }

    #[test]
    fn test_set_values() {
        let mut v = Vector::<N>::zero();
        *v.x_mut() = 1.0;
        *v.y_mut() = 2.0;
        *v.z_mut() = 3.0;
        assert_eq!(v, Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_arithmetic() {
        let v = Vector::<N>::new(1.0, 2.0, 3.0);
        let u = Vector::<N>::new(0.5, -1.0, 4.0);

        assert_eq!(v + u, Vector::new(1.5, 1.0, 7.0));
        assert_eq!(v - u, Vector::new(0.5, 3.0, -1.0));
        assert_eq!(-v, Vector::new(-1.0, -2.0, -3.0));
        assert_eq!(v * 2.0, Vector::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * v, v * 2.0);
        assert_eq!(v / 2.0, Vector::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_compound_assignment() {
        let mut v = Vector::<N>::new(1.0, 2.0, 3.0);
        v += Vector::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vector::new(2.0, 3.0, 4.0));
        v -= Vector::new(2.0, 2.0, 2.0);
        assert_eq!(v, Vector::new(0.0, 1.0, 2.0));
        v *= 3.0;
        assert_eq!(v, Vector::new(0.0, 3.0, 6.0));
        v /= 3.0;
        assert_eq!(v, Vector::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn test_f32_scalar_multiplication() {
        let v = 2.0f32 * I::x();
        assert_eq!(v.components(), [2.0f32, 0.0, 0.0]);
    }

    #[test]
    fn test_express_with_orientation() {
        let ori = Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::x()).unwrap();
        let v = Vector::<N>::new(1.0, 1.0, 0.0);
        assert_relative_eq!(v.express(&ori), Vector::<A>::new(1.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let v = Vector::<N>::new(1.0, 2.5, -3.0);
        assert_eq!(v.to_string(), "(1, 2.5, -3)");
    }
}
