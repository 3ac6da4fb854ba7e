//! Position vectors

use super::{impl_frame_vector, Vector};
use crate::error::KinematicsResult;
use crate::frame::Frame;
use crate::orientation::Orientation;
use crate::world::World;
use std::fmt;
use std::marker::PhantomData;

/// A displacement from a world's origin, expressed in frame `E`
///
/// Frames have no origin of their own; a position is always relative to
/// wherever the world it is used with anchors its root. Positions cannot be
/// added to free vectors; convert explicitly with [`Position::to_vector`] or
/// [`Position::from`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position<E: Frame> {
    data: [E::Scalar; 3],
    _frames: PhantomData<E>,
}

impl_frame_vector!([E: Frame] Position<E>, E::Scalar);

impl<E: Frame> Position<E> {
    /// The displacement as a free vector
    pub fn to_vector(&self) -> Vector<E> {
        Vector::from_components(self.data)
    }

    /// Express this position in frame `To`
    ///
    /// # Arguments
    /// * `orientation` - Orientation of `To` relative to `E`
    pub fn express<To>(&self, orientation: &Orientation<E, To>) -> Position<To>
    where
        To: Frame<Scalar = E::Scalar>,
    {
        orientation.rotate(&self.to_vector()).into()
    }

    /// Express this position in frame `To` using the orientations held by a world
    pub fn express_in<To, R>(&self, world: &World<R>) -> KinematicsResult<Position<To>>
    where
        To: Frame<Scalar = E::Scalar>,
        R: Frame<Scalar = E::Scalar>,
    {
        Ok(self.to_vector().express_in::<To, R>(world)?.into())
    }
}

impl<E: Frame> From<Vector<E>> for Position<E> {
    fn from(v: Vector<E>) -> Self {
        Self::from_components(v.components())
    }
}

impl<E: Frame> From<Position<E>> for Vector<E> {
    fn from(r: Position<E>) -> Self {
        r.to_vector()
    }
}

impl<E: Frame> fmt::Display for Position<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<p>: {}", self.to_vector())
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

    #[test]
    fn test_position_from_vector() {
        let r = Position::from(Vector::<N>::new(1.0, 2.0, 3.0));
        assert_eq!(r, Position::<N>::new(1.0, 2.0, 3.0));
        assert_eq!(Vector::from(r), r.to_vector());
    }

    #[test]
    fn test_position_arithmetic() {
        let r = Position::<N>::new(1.0, 2.0, 3.0);
        let s = Position::<N>::new(1.0, 1.0, 1.0);
        assert_eq!(r - s, Position::new(0.0, 1.0, 2.0));
        assert_eq!(-(r + s) * 0.5, Position::new(-1.0, -1.5, -2.0));
    }

    #[test]
    fn test_position_expressed_in_different_frame() {
        let r = Position::<N>::new(1.0, 2.0, 3.0);
        let ori = Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::x()).unwrap();
        assert_relative_eq!(r.express(&ori), Position::<A>::new(1.0, 3.0, -2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::<N>::new(1.0, 0.0, 2.0).to_string(), "<p>: (1, 0, 2)");
    }
}
