//! Velocity vectors

use super::{impl_frame_vector, Vector};
use crate::error::KinematicsResult;
use crate::frame::{Frame, FrameId};
use crate::orientation::Orientation;
use crate::world::World;
use std::fmt;
use std::marker::PhantomData;

/// A velocity observed from frame `B` and expressed in frame `E`
///
/// The observation frame is the frame relative to which motion is measured;
/// the expression frame is the frame the components are written in.
/// Re-expressing a velocity rotates its components but keeps the observation
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity<B: Frame, E: Frame<Scalar = B::Scalar> = B> {
    data: [E::Scalar; 3],
    _frames: PhantomData<(B, E)>,
}

impl_frame_vector!([B: Frame, E: Frame<Scalar = B::Scalar>] Velocity<B, E>, E::Scalar);

impl<B: Frame, E: Frame<Scalar = B::Scalar>> Velocity<B, E> {
    /// Velocity observed from `B` with components taken from a vector in `E`
    pub fn from_vector(v: Vector<E>) -> Self {
        Self::from_components(v.components())
    }

    /// The components as a free vector in the expression frame
    pub fn to_vector(&self) -> Vector<E> {
        Vector::from_components(self.data)
    }

    /// Runtime identity of the observation frame
    pub fn observation_frame(&self) -> FrameId {
        B::id()
    }

    /// Runtime identity of the expression frame
    pub fn expression_frame(&self) -> FrameId {
        E::id()
    }

    /// Express this velocity in frame `E2`, keeping the observation frame
    ///
    /// # Arguments
    /// * `orientation` - Orientation of `E2` relative to `E`
    pub fn express<E2>(&self, orientation: &Orientation<E, E2>) -> Velocity<B, E2>
    where
        E2: Frame<Scalar = B::Scalar>,
    {
        Velocity::from_vector(orientation.rotate(&self.to_vector()))
    }

    /// Express this velocity in frame `E2` using the orientations held by a world
    pub fn express_in<E2, R>(&self, world: &World<R>) -> KinematicsResult<Velocity<B, E2>>
    where
        E2: Frame<Scalar = B::Scalar>,
        R: Frame<Scalar = B::Scalar>,
    {
        Ok(Velocity::from_vector(self.to_vector().express_in::<E2, R>(world)?))
    }
}

impl<B: Frame, E: Frame<Scalar = B::Scalar>> From<Vector<E>> for Velocity<B, E> {
    fn from(v: Vector<E>) -> Self {
        Self::from_vector(v)
    }
}

impl<B: Frame, E: Frame<Scalar = B::Scalar>> fmt::Display for Velocity<B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<v, {}>: {}", B::NAME, self.to_vector())
    }
}
