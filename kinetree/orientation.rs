//! Orientations relating two reference frames
//!
//! An [`Orientation<From, To>`] is a directed edge between two frames: the
//! unit quaternion that rotates `From` into alignment with `To`. Orientations
//! compose when the intermediate frame matches and invert into the opposite
//! edge:
//!
//! ```rust
//! use kinetree::{frame, Frame, Orientation};
//! use std::f64::consts::FRAC_PI_2;
//!
//! frame!(struct N);
//! frame!(struct A);
//! frame!(struct B);
//!
//! let n_a = Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::x()).unwrap();
//! let a_b = Orientation::<A, B>::from_angle_axis(FRAC_PI_2, &A::x()).unwrap();
//!
//! let n_b: Orientation<N, B> = n_a * a_b;
//! let b_n: Orientation<B, N> = n_b.inverse();
//! assert!((n_b.angle() - b_n.angle()).abs() < 1e-12);
//! ```

use crate::error::KinematicsResult;
use crate::frame::{Frame, FrameId};
use crate::quaternion::{rotate_components, Quaternion};
use crate::scalar::Scalar;
use crate::vector::{magnitude, normalized, Vector};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Mul;

/// Orientation of frame `To` relative to frame `From`
///
/// Defaults to the identity rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation<From: Frame, To: Frame<Scalar = From::Scalar>> {
    rotation: Quaternion<From::Scalar>,
    _frames: PhantomData<(From, To)>,
}

impl<From: Frame, To: Frame<Scalar = From::Scalar>> Orientation<From, To> {
    /// Identity orientation (`To` aligned with `From`)
    pub fn identity() -> Self {
        Self::from_rotation_unchecked(Quaternion::identity())
    }

    /// Orientation from a rotation quaternion
    ///
    /// # Errors
    /// [`KinematicsError::NotUnitNorm`](crate::error::KinematicsError::NotUnitNorm) if `rotation` is not a unit quaternion.
    pub fn from_quaternion(rotation: Quaternion<From::Scalar>) -> KinematicsResult<Self> {
        rotation.ensure_unit()?;
        Ok(Self::from_rotation_unchecked(rotation))
    }

    /// Orientation reached by rotating `From` by `angle` about `axis`
    ///
    /// # Errors
    /// [`KinematicsError::NotUnitNorm`](crate::error::KinematicsError::NotUnitNorm) if `axis` is not normalized,
    /// or if `angle` or `axis` is not finite.
    pub fn from_angle_axis(angle: From::Scalar, axis: &Vector<From>) -> KinematicsResult<Self> {
        Quaternion::from_angle_axis(angle, axis).map(Self::from_rotation_unchecked)
    }

    pub(crate) fn from_rotation_unchecked(rotation: Quaternion<From::Scalar>) -> Self {
        Self {
            rotation,
            _frames: PhantomData,
        }
    }

    /// Rotation angle
    ///
    /// Recovered from the quaternion, so it is subject to the numerical
    /// conditioning of `atan2` near the identity.
    pub fn angle(&self) -> From::Scalar {
        let v = self.vector_part();
        From::Scalar::two() * magnitude(&v).atan2(self.rotation.w())
    }

    /// Rotation axis, expressed in `From`
    ///
    /// The identity orientation has no axis; the zero vector is returned.
    pub fn axis(&self) -> Vector<From> {
        normalized(&self.vector_part())
    }

    /// Underlying rotation quaternion
    pub fn rotation(&self) -> &Quaternion<From::Scalar> {
        &self.rotation
    }

    /// Orientation of `From` relative to `To`
    pub fn inverse(&self) -> Orientation<To, From> {
        Orientation::from_rotation_unchecked(self.rotation.conjugate())
    }

    /// Re-express a vector written in `From` in `To`
    pub fn rotate(&self, v: &Vector<From>) -> Vector<To> {
        Vector::from_components(rotate_components(v.components(), &self.rotation.conjugate()))
    }

    /// Frame-erased form of this orientation
    pub fn edge(&self) -> Edge<From::Scalar> {
        Edge {
            from: From::id(),
            to: To::id(),
            rotation: self.rotation,
        }
    }

    fn vector_part(&self) -> Vector<From> {
        Vector::from_components(self.rotation.vector_part())
    }
}

impl<From: Frame, To: Frame<Scalar = From::Scalar>> Default for Orientation<From, To> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition through a shared intermediate frame
impl<From, To, C> Mul<Orientation<To, C>> for Orientation<From, To>
where
    From: Frame,
    To: Frame<Scalar = From::Scalar>,
    C: Frame<Scalar = From::Scalar>,
{
    type Output = Orientation<From, C>;

    fn mul(self, rhs: Orientation<To, C>) -> Orientation<From, C> {
        Orientation::from_rotation_unchecked(self.rotation * *rhs.rotation())
    }
}

impl<From: Frame, To: Frame<Scalar = From::Scalar>> fmt::Display for Orientation<From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.edge(), f)
    }
}

impl<From: Frame, To: Frame<Scalar = From::Scalar>> AbsDiffEq for Orientation<From, To> {
    type Epsilon = From::Scalar;

    fn default_epsilon() -> Self::Epsilon {
        Quaternion::<From::Scalar>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
    }
}

impl<From: Frame, To: Frame<Scalar = From::Scalar>> RelativeEq for Orientation<From, To> {
    fn default_max_relative() -> Self::Epsilon {
        Quaternion::<From::Scalar>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.rotation.relative_eq(&other.rotation, epsilon, max_relative)
    }
}

/// An orientation with its frames erased
///
/// Worlds store their edges in this form so that frames can be looked up at
/// runtime. Build one from a typed [`Orientation`] or, for frames only known
/// by name, with [`Edge::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    from: FrameId,
    to: FrameId,
    rotation: Quaternion<T>,
}

impl<T: Scalar> Edge<T> {
    /// Edge rotating `from` into `to`
    ///
    /// # Errors
    /// [`KinematicsError::NotUnitNorm`](crate::error::KinematicsError::NotUnitNorm) if `rotation` is not a unit quaternion.
    pub fn new(from: FrameId, to: FrameId, rotation: Quaternion<T>) -> KinematicsResult<Self> {
        rotation.ensure_unit()?;
        Ok(Self { from, to, rotation })
    }

    /// Source frame
    pub fn from_frame(&self) -> &FrameId {
        &self.from
    }

    /// Destination frame
    pub fn to_frame(&self) -> &FrameId {
        &self.to
    }

    /// Rotation from source to destination
    pub fn rotation(&self) -> &Quaternion<T> {
        &self.rotation
    }

    pub(crate) fn from_parts(from: FrameId, to: FrameId, rotation: Quaternion<T>) -> Self {
        Self { from, to, rotation }
    }

    /// Rotation angle
    pub fn angle(&self) -> T {
        let [x, y, z] = self.rotation.vector_part();
        T::two() * T::hypot3(x, y, z).atan2(self.rotation.w())
    }

    /// Rotation axis components, in the source frame
    ///
    /// Zero for the identity rotation.
    pub fn axis(&self) -> [T; 3] {
        let v = self.rotation.vector_part();
        let [x, y, z] = v;
        if v.iter().all(|c| *c == T::zero()) {
            return v;
        }
        let norm = T::hypot3(x, y, z);
        v.map(|c| c / norm)
    }

    pub(crate) fn into_parts(self) -> (FrameId, FrameId, Quaternion<T>) {
        (self.from, self.to, self.rotation)
    }
}

impl<T: Scalar> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.axis();
        write!(f, "[{}] <- ({}, {}, {}), θ: {}", self.to, x, y, z, self.angle())
    }
}

impl<A: Frame, B: Frame<Scalar = A::Scalar>> From<Orientation<A, B>> for Edge<A::Scalar> {
    fn from(orientation: Orientation<A, B>) -> Self {
        orientation.edge()
    }
}
