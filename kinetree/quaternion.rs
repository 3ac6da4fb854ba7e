//! Quaternion rotation primitive
//!
//! A limited four parameter quaternion. Unit quaternions represent the 3D
//! rotation group; this type does not try to implement the complete
//! quaternion algebra. Unlike the frame-tagged vectors, a quaternion is not
//! bound to a frame.

use crate::error::{KinematicsError, KinematicsResult};
use crate::frame::Frame;
use crate::scalar::{is_unit, Scalar};
use crate::vector::{dot_product, Vector};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;
use std::ops::Mul;

/// Relative size of the scalar part tolerated after a rotation sandwich
const MAX_ROTATED_SCALAR_RATIO: f64 = 1e-10;

/// Quaternion `w + x*i + y*j + z*k`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion<T> {
    w: T,
    x: T,
    y: T,
    z: T,
}

impl<T: Scalar> Quaternion<T> {
    /// Rotation identity quaternion
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Construct a quaternion from its components
    ///
    /// The result is not required to have unit norm.
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion (zero scalar part) from three components
    pub fn pure([x, y, z]: [T; 3]) -> Self {
        Self::new(T::zero(), x, y, z)
    }

    /// Pure quaternion from a frame vector, ignoring the frame
    pub fn from_vector<F: Frame<Scalar = T>>(v: &Vector<F>) -> Self {
        Self::pure(v.components())
    }

    /// Unit quaternion rotating by `angle` about `axis`
    ///
    /// The frame of `axis` is ignored. The axis must have unit norm unless the
    /// angle is zero, in which case the result is the identity regardless.
    ///
    /// # Errors
    /// [`KinematicsError::NotUnitNorm`] if `axis` is not normalized, or if
    /// `angle` or `axis` is not finite.
    pub fn from_angle_axis<F: Frame<Scalar = T>>(angle: T, axis: &Vector<F>) -> KinematicsResult<Self> {
        if angle != T::zero() {
            let squared = dot_product(axis, axis);
            if !is_unit(squared) {
                return Err(KinematicsError::NotUnitNorm {
                    ulps: T::one().ulp_diff(squared),
                });
            }
        }

        let half = angle / T::two();
        let (s, c) = (half.sin(), half.cos());
        let [x, y, z] = axis.components();

        let rotation = Self::new(c, x * s, y * s, z * s);
        let squared = rotation.squared_norm();
        if !squared.is_finite() {
            return Err(KinematicsError::NotUnitNorm {
                ulps: T::one().ulp_diff(squared),
            });
        }

        Ok(rotation)
    }

    /// Scalar component
    pub fn w(&self) -> T {
        self.w
    }

    /// i component
    pub fn x(&self) -> T {
        self.x
    }

    /// j component
    pub fn y(&self) -> T {
        self.y
    }

    /// k component
    pub fn z(&self) -> T {
        self.z
    }

    /// The `(x, y, z)` components
    pub fn vector_part(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    /// Quaternion conjugate; the inverse rotation for unit quaternions
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Squared norm, cheaper than the norm for unit checks
    pub fn squared_norm(&self) -> T {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Check whether this quaternion represents a rotation
    pub fn is_unit(&self) -> bool {
        is_unit(self.squared_norm())
    }

    /// Fail with [`KinematicsError::NotUnitNorm`] unless this is a unit quaternion
    pub fn ensure_unit(&self) -> KinematicsResult<()> {
        let squared = self.squared_norm();
        if is_unit(squared) {
            Ok(())
        } else {
            Err(KinematicsError::NotUnitNorm {
                ulps: T::one().ulp_diff(squared),
            })
        }
    }
}

impl<T: Scalar> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Hamilton product
///
/// The product of two rotation quaternions is the composed rotation.
impl<T: Scalar> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, p: Self) -> Self {
        let q = self;
        Self::new(
            q.w * p.w - q.x * p.x - q.y * p.y - q.z * p.z,
            q.w * p.x + q.x * p.w + q.y * p.z - q.z * p.y,
            q.w * p.y + q.y * p.w - q.x * p.z + q.z * p.x,
            q.w * p.z + q.z * p.w + q.x * p.y - q.y * p.x,
        )
    }
}

impl<T: Scalar> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

impl<T: Scalar> AbsDiffEq for Quaternion<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Quaternion<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

/// Rotate three components by a quaternion assumed to be a rotation
///
/// The zero vector is returned unchanged; the sandwich product of a zero
/// pure quaternion is degenerate.
pub(crate) fn rotate_components<T: Scalar>(v: [T; 3], q: &Quaternion<T>) -> [T; 3] {
    if v.iter().all(|c| *c == T::zero()) {
        return v;
    }

    let rotated = *q * Quaternion::pure(v) * q.conjugate();

    debug_assert!(
        (rotated.w * rotated.w / rotated.squared_norm()).to_f64() < MAX_ROTATED_SCALAR_RATIO,
        "rotation produced a non-pure quaternion: {}",
        rotated
    );

    rotated.vector_part()
}

/// Apply a rotation to a vector
///
/// Computes `q * v * conjugate(q)`; the result stays in the frame of `v`.
///
/// # Errors
/// [`KinematicsError::NotUnitNorm`] if `q` is not a unit quaternion.
pub fn rotate<F: Frame>(v: &Vector<F>, q: &Quaternion<F::Scalar>) -> KinematicsResult<Vector<F>> {
    if v.is_zero() {
        return Ok(*v);
    }

    q.ensure_unit()?;
    Ok(Vector::from_components(rotate_components(v.components(), q)))
}
