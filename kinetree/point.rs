//! Points bound to a world
//!
//! A [`Point<R>`] is a displacement from the origin of a world rooted at `R`,
//! stored in whichever of the world's frames it was given in, plus an optional
//! velocity. It can be queried in any frame the world contains.
//!
//! Frames are checked at runtime against the world passed to each call, so a
//! query naming a frame outside the world fails with
//! [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld).
//!
//! # Example
//!
//! ```rust
//! use kinetree::{frame, Frame, Orientation, Point, Position, World};
//! use std::f64::consts::FRAC_PI_2;
//!
//! frame!(struct N);
//! frame!(struct A);
//!
//! let world = World::<N>::builder()
//!     .orientation(Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::z()).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let p = Point::at(&world, Position::<A>::new(1.0, 0.0, 0.0)).unwrap();
//! let r = p.position::<N>(&world).unwrap();
//! assert!((r.y() - 1.0).abs() < 1e-12);
//! ```

use crate::error::KinematicsResult;
use crate::frame::{Frame, FrameId};
use crate::scalar::Scalar;
use crate::vector::{cross_product, Position, Vector, Velocity};
use crate::world::World;
use std::fmt;
use std::marker::PhantomData;

/// Stored velocity with its runtime frame tags
#[derive(Debug, Clone, PartialEq)]
struct TaggedVelocity<T> {
    observer: FrameId,
    frame: FrameId,
    data: [T; 3],
}

/// A point in a world rooted at `R`
#[derive(Debug, Clone, PartialEq)]
pub struct Point<R: Frame> {
    /// Frame the displacement is fixed in
    frame: FrameId,
    displacement: [R::Scalar; 3],
    velocity: Option<TaggedVelocity<R::Scalar>>,
    _world: PhantomData<R>,
}

impl<R: Frame> Default for Point<R> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<R: Frame> Point<R> {
    /// Point at the world origin, fixed in the root frame
    pub fn origin() -> Self {
        Self {
            frame: R::id(),
            displacement: [R::Scalar::zero(); 3],
            velocity: None,
            _world: PhantomData,
        }
    }

    /// Point displaced from the origin by `position`
    ///
    /// The displacement stays fixed in frame `E`, which need not be the root.
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld) if `E` is not part of `world`.
    pub fn at<E>(world: &World<R>, position: Position<E>) -> KinematicsResult<Self>
    where
        E: Frame<Scalar = R::Scalar>,
    {
        let mut point = Self::origin();
        point.set_position(world, position)?;
        Ok(point)
    }

    /// Replace the point's displacement
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld) if `E` is not part of `world`.
    pub fn set_position<E>(&mut self, world: &World<R>, position: Position<E>) -> KinematicsResult<()>
    where
        E: Frame<Scalar = R::Scalar>,
    {
        world.ensure_contains(&E::id())?;
        self.frame = E::id();
        self.displacement = position.components();
        Ok(())
    }

    /// Displacement components as stored
    pub fn position_raw(&self) -> [R::Scalar; 3] {
        self.displacement
    }

    /// Frame the stored displacement is expressed in
    pub fn position_frame(&self) -> &FrameId {
        &self.frame
    }

    /// Displacement from the origin, expressed in frame `To`
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld) if `To` or the stored frame is not
    /// part of `world`.
    pub fn position<To>(&self, world: &World<R>) -> KinematicsResult<Position<To>>
    where
        To: Frame<Scalar = R::Scalar>,
    {
        world
            .reexpress_ids(&self.frame, &To::id(), self.displacement)
            .map(Position::from_components)
    }

    /// Set the point's velocity as observed from `B`, expressed in `E`
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld) if `B` or `E` is not part of `world`.
    pub fn set_velocity<B, E>(&mut self, world: &World<R>, velocity: Velocity<B, E>) -> KinematicsResult<()>
    where
        B: Frame<Scalar = R::Scalar>,
        E: Frame<Scalar = R::Scalar>,
    {
        world.ensure_contains(&B::id())?;
        world.ensure_contains(&E::id())?;
        self.velocity = Some(TaggedVelocity {
            observer: B::id(),
            frame: E::id(),
            data: velocity.components(),
        });
        Ok(())
    }

    /// Frame the stored velocity is observed from
    ///
    /// The root frame when no velocity has been set.
    pub fn velocity_observer(&self) -> FrameId {
        self.velocity
            .as_ref()
            .map_or_else(R::id, |v| v.observer.clone())
    }

    /// Velocity as observed from `A`, expressed in `F`
    ///
    /// Applies `v_A = v_B + w_AB x r`, where `v_B` is the stored velocity and
    /// `r` the point's displacement. `w_AB` is approximated by
    /// [`World::static_angular_velocity`] between `A` and the stored
    /// observation frame; use [`Point::velocity_with`] when the angular
    /// velocity is known.
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld) if `A` or `F` is not part of `world`.
    pub fn velocity<A, F>(&self, world: &World<R>) -> KinematicsResult<Velocity<A, F>>
    where
        A: Frame<Scalar = R::Scalar>,
        F: Frame<Scalar = R::Scalar>,
    {
        let observer = self.velocity_observer();
        let omega = world.static_angular_velocity_ids(&A::id(), &observer)?;
        self.transport(world, Vector::from_components(omega))
    }

    /// Velocity as observed from `A`, expressed in `F`, with a known angular velocity
    ///
    /// # Arguments
    /// * `omega` - Angular velocity of the stored observation frame relative to
    ///   `A`, expressed in `A`
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`](crate::KinematicsError::FrameNotInWorld) if `A` or `F` is not part of `world`.
    pub fn velocity_with<A, F>(&self, world: &World<R>, omega: Vector<A>) -> KinematicsResult<Velocity<A, F>>
    where
        A: Frame<Scalar = R::Scalar>,
        F: Frame<Scalar = R::Scalar>,
    {
        world.ensure_contains(&A::id())?;
        self.transport(world, omega)
    }

    fn transport<A, F>(&self, world: &World<R>, omega: Vector<A>) -> KinematicsResult<Velocity<A, F>>
    where
        A: Frame<Scalar = R::Scalar>,
        F: Frame<Scalar = R::Scalar>,
    {
        let relative = match &self.velocity {
            Some(v) => world.reexpress_ids(&v.frame, &A::id(), v.data)?,
            None => [R::Scalar::zero(); 3],
        };

        let r = self.position::<A>(world)?.to_vector();
        let v = Vector::<A>::from_components(relative) + cross_product(&omega, &r);

        let expressed = world.reexpress_ids(&A::id(), &F::id(), v.components())?;
        Ok(Velocity::from_components(expressed))
    }
}

impl<R: Frame> fmt::Display for Point<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.displacement;
        write!(f, "point at <p>: ({}, {}, {})", x, y, z)
    }
}
