//! Kinematic worlds
//!
//! A [`World<R>`] owns a frame tree rooted at `R` together with one
//! orientation per tree edge. It answers "how is frame `To` oriented relative
//! to frame `From`" for any two frames it contains, by composing edge
//! orientations down to the root and back out.
//!
//! Edge orientations can be reassigned in place, e.g. once per simulation
//! step; every query re-reads the current values.
//!
//! # Example
//!
//! ```rust
//! use kinetree::{frame, Frame, Orientation, Vector, World};
//! use std::f64::consts::FRAC_PI_2;
//!
//! frame!(struct N);
//! frame!(struct A);
//! frame!(struct B);
//!
//! let world = World::<N>::builder()
//!     .orientation(Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::x()).unwrap())
//!     .orientation(Orientation::<A, B>::from_angle_axis(FRAC_PI_2, &A::x()).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let v = Vector::<N>::new(0.0, 1.0, 0.0).express_in::<B, N>(&world).unwrap();
//! assert!((v.y() + 1.0).abs() < 1e-12);
//! ```

mod config;
mod display;

pub use config::{AngleUnit, EdgeConfig, WorldConfig};

use crate::error::{KinematicsError, KinematicsResult};
use crate::frame::{Frame, FrameId};
use crate::orientation::{Edge, Orientation};
use crate::point::Point;
use crate::quaternion::{rotate_components, Quaternion};
use crate::tree::FrameTree;
use crate::vector::Vector;
use std::marker::PhantomData;

/// A frame tree rooted at `R` plus the orientation of every edge
#[derive(Debug, Clone)]
pub struct World<R: Frame> {
    tree: FrameTree,
    /// Rotation of the edge ending at each arena index (identity for the root)
    rotations: Vec<Quaternion<R::Scalar>>,
    _root: PhantomData<R>,
}

impl<R: Frame> Default for World<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Frame> World<R> {
    /// World holding only its root frame
    pub fn new() -> Self {
        Self {
            tree: FrameTree::new(R::id()),
            rotations: vec![Quaternion::identity()],
            _root: PhantomData,
        }
    }

    /// Start building a world edge by edge
    pub fn builder() -> WorldBuilder<R> {
        WorldBuilder::new()
    }

    /// Build a world from frame-erased edges
    ///
    /// Edges are attached in order; the first edge must leave the root.
    ///
    /// # Errors
    /// * [`KinematicsError::EmptyTree`] if `edges` is empty
    /// * [`KinematicsError::RootMismatch`] if the first edge does not start at `R`
    /// * any error of [`World::insert_edge`] for the first malformed edge
    pub fn from_edges<I>(edges: I) -> KinematicsResult<Self>
    where
        I: IntoIterator<Item = Edge<R::Scalar>>,
    {
        let mut edges = edges.into_iter().peekable();
        match edges.peek() {
            None => return Err(KinematicsError::EmptyTree),
            Some(first) if !first.from_frame().is::<R>() => {
                return Err(KinematicsError::RootMismatch {
                    expected: R::NAME.to_string(),
                    found: first.from_frame().to_string(),
                });
            }
            Some(_) => {}
        }

        let mut world = Self::new();
        for edge in edges {
            world.insert_edge(edge)?;
        }
        Ok(world)
    }

    /// Attach a new frame `To` below the existing frame `From`
    ///
    /// # Errors
    /// [`KinematicsError::ParentNotFound`] if `From` is not in the world,
    /// [`KinematicsError::ChildAlreadyPresent`] if `To` already is.
    pub fn insert<From, To>(&mut self, orientation: Orientation<From, To>) -> KinematicsResult<()>
    where
        From: Frame<Scalar = R::Scalar>,
        To: Frame<Scalar = R::Scalar>,
    {
        self.insert_edge(orientation.into())
    }

    /// Attach a new frame from a frame-erased edge
    ///
    /// The world is left unchanged on error.
    pub fn insert_edge(&mut self, edge: Edge<R::Scalar>) -> KinematicsResult<()> {
        let (from, to, rotation) = edge.into_parts();
        log::debug!("attaching frame '{}' to '{}'", to, from);

        let index = self.tree.insert(&from, to)?;
        debug_assert_eq!(index, self.rotations.len());
        self.rotations.push(rotation);
        Ok(())
    }

    /// Frame topology
    pub fn tree(&self) -> &FrameTree {
        &self.tree
    }

    /// Check whether frame `F` is part of this world
    pub fn contains<F: Frame>(&self) -> bool {
        self.tree.contains(&F::id())
    }

    /// All edges, parents before children
    pub fn edges(&self) -> Vec<Edge<R::Scalar>> {
        self.tree
            .frames()
            .into_iter()
            .filter_map(|frame| {
                let parent = self.tree.parent(frame)?;
                let index = self.tree.index_of(frame)?;
                Some(Edge::from_parts(parent.clone(), frame.clone(), self.rotations[index]))
            })
            .collect()
    }

    /// Stored orientation of the edge `From -> To`
    ///
    /// # Errors
    /// [`KinematicsError::EdgeNotFound`] unless `To` is a direct child of `From`.
    pub fn get<From, To>(&self) -> KinematicsResult<Orientation<From, To>>
    where
        From: Frame<Scalar = R::Scalar>,
        To: Frame<Scalar = R::Scalar>,
    {
        let index = self.edge_index(&From::id(), &To::id())?;
        Ok(Orientation::from_rotation_unchecked(self.rotations[index]))
    }

    /// Replace the orientation of the existing edge `From -> To`
    ///
    /// The topology is unchanged.
    ///
    /// # Errors
    /// [`KinematicsError::EdgeNotFound`] unless `To` is a direct child of `From`.
    pub fn set<From, To>(&mut self, orientation: Orientation<From, To>) -> KinematicsResult<()>
    where
        From: Frame<Scalar = R::Scalar>,
        To: Frame<Scalar = R::Scalar>,
    {
        let index = self.edge_index(&From::id(), &To::id())?;
        log::debug!("updating edge '{}' -> '{}'", From::NAME, To::NAME);
        self.rotations[index] = *orientation.rotation();
        Ok(())
    }

    /// Replace the rotation of an edge known only by frame ids
    ///
    /// # Errors
    /// * [`KinematicsError::NotUnitNorm`] if `rotation` is not a unit quaternion
    /// * [`KinematicsError::EdgeNotFound`] unless `to` is a direct child of `from`
    pub fn set_edge(&mut self, from: &FrameId, to: &FrameId, rotation: Quaternion<R::Scalar>) -> KinematicsResult<()> {
        rotation.ensure_unit()?;
        let index = self.edge_index(from, to)?;
        log::debug!("updating edge '{}' -> '{}'", from, to);
        self.rotations[index] = rotation;
        Ok(())
    }

    /// Orientation of frame `To` relative to the root
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`] if `To` is not in this world.
    pub fn express_root<To>(&self) -> KinematicsResult<Orientation<R, To>>
    where
        To: Frame<Scalar = R::Scalar>,
    {
        self.compose_from_root(&To::id())
            .map(Orientation::from_rotation_unchecked)
    }

    /// Orientation of frame `To` relative to frame `From`
    ///
    /// Composed as `express_root::<From>().inverse() * express_root::<To>()`.
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`] if either frame is not in this world.
    pub fn express<From, To>(&self) -> KinematicsResult<Orientation<From, To>>
    where
        From: Frame<Scalar = R::Scalar>,
        To: Frame<Scalar = R::Scalar>,
    {
        self.express_ids(&From::id(), &To::id())
            .map(Orientation::from_rotation_unchecked)
    }

    /// Rotation of frame `to` relative to frame `from`, by frame id
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`] if either frame is not in this world.
    pub fn express_ids(&self, from: &FrameId, to: &FrameId) -> KinematicsResult<Quaternion<R::Scalar>> {
        let from_root = self.compose_from_root(from)?;
        let to_root = self.compose_from_root(to)?;
        Ok(from_root.conjugate() * to_root)
    }

    /// Approximate angular velocity of `B` relative to `A`, expressed in `A`
    ///
    /// This is the rotation axis of the current (static) orientation of `B`
    /// relative to `A`, not a time derivative. Worlds store orientations only,
    /// so there is no rate to differentiate. Use
    /// [`Point::velocity_with`](crate::Point::velocity_with) to supply a real
    /// angular velocity.
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`] if either frame is not in this world.
    pub fn static_angular_velocity<A, B>(&self) -> KinematicsResult<Vector<A>>
    where
        A: Frame<Scalar = R::Scalar>,
        B: Frame<Scalar = R::Scalar>,
    {
        Ok(self.express::<A, B>()?.axis())
    }

    /// Re-express raw components written in `from` in `to`
    pub(crate) fn reexpress_ids(
        &self,
        from: &FrameId,
        to: &FrameId,
        components: [R::Scalar; 3],
    ) -> KinematicsResult<[R::Scalar; 3]> {
        let rotation = self.express_ids(from, to)?;
        Ok(rotate_components(components, &rotation.conjugate()))
    }

    /// Runtime counterpart of [`World::static_angular_velocity`]
    pub(crate) fn static_angular_velocity_ids(&self, a: &FrameId, b: &FrameId) -> KinematicsResult<[R::Scalar; 3]> {
        let rotation = self.express_ids(a, b)?;
        Ok(Edge::from_parts(a.clone(), b.clone(), rotation).axis())
    }

    /// A point at this world's origin
    pub fn point(&self) -> Point<R> {
        Point::origin()
    }

    /// Check that a frame id belongs to this world
    pub(crate) fn ensure_contains(&self, frame: &FrameId) -> KinematicsResult<()> {
        if self.tree.contains(frame) {
            Ok(())
        } else {
            Err(KinematicsError::FrameNotInWorld(frame.to_string()))
        }
    }

    /// Rotation composed along the path from the root to `frame`
    fn compose_from_root(&self, frame: &FrameId) -> KinematicsResult<Quaternion<R::Scalar>> {
        let index = self
            .tree
            .index_of(frame)
            .ok_or_else(|| KinematicsError::FrameNotInWorld(frame.to_string()))?;

        let path = self.tree.path_indices(index);
        log::trace!("composing {} edge(s) from '{}' to '{}'", path.len() - 1, R::NAME, frame);

        Ok(path[1..]
            .iter()
            .fold(Quaternion::identity(), |acc, &n| acc * self.rotations[n]))
    }

    /// Arena index of the edge `from -> to`
    fn edge_index(&self, from: &FrameId, to: &FrameId) -> KinematicsResult<usize> {
        let not_found = || KinematicsError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        };

        match self.tree.parent(to) {
            Some(parent) if parent == from => self.tree.index_of(to).ok_or_else(not_found),
            _ => Err(not_found()),
        }
    }
}

/// Builder for [`World`]
///
/// Collects edges in order and attaches them on [`WorldBuilder::build`].
/// Building with no edges yields a world holding only its root.
#[derive(Debug, Clone)]
pub struct WorldBuilder<R: Frame> {
    edges: Vec<Edge<R::Scalar>>,
    _root: PhantomData<R>,
}

impl<R: Frame> Default for WorldBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Frame> WorldBuilder<R> {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            _root: PhantomData,
        }
    }

    /// Add a typed orientation edge
    pub fn orientation<From, To>(mut self, orientation: Orientation<From, To>) -> Self
    where
        From: Frame<Scalar = R::Scalar>,
        To: Frame<Scalar = R::Scalar>,
    {
        self.edges.push(orientation.into());
        self
    }

    /// Add a frame-erased edge
    pub fn edge(mut self, edge: Edge<R::Scalar>) -> Self {
        self.edges.push(edge);
        self
    }

    /// Attach every edge in order
    ///
    /// # Errors
    /// The first tree error raised by an edge.
    pub fn build(self) -> KinematicsResult<World<R>> {
        let mut world = World::new();
        for edge in self.edges {
            world.insert_edge(edge)?;
        }
        log::debug!("built world rooted at '{}' with {} frame(s)", R::NAME, world.tree.len());
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame;
    use crate::vector::{normalized, Position};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

    frame!(struct N);
    frame!(struct A);
    frame!(struct B);
    frame!(struct C);
    frame!(struct Z);

    fn about<From, To>(angle: f64, axis: Vector<From>) -> Orientation<From, To>
    where
        From: Frame<Scalar = f64>,
        To: Frame<Scalar = f64>,
    {
        Orientation::from_angle_axis(angle, &axis).unwrap()
    }

    fn chain() -> World<N> {
        World::builder()
            .orientation(about::<N, A>(FRAC_PI_2, N::x()))
            .orientation(about::<A, B>(FRAC_PI_2, A::x()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_world_has_only_root() {
        let world = World::<N>::new();
        assert!(world.contains::<N>());
        assert!(!world.contains::<A>());
        assert_eq!(world.tree().len(), 1);
        assert!(world.edges().is_empty());
    }

    #[test]
    fn test_builder_shapes_tree() {
        let world = World::<N>::builder()
            .orientation(Orientation::<N, A>::identity())
            .orientation(Orientation::<A, B>::identity())
            .orientation(Orientation::<N, C>::identity())
            .build()
            .unwrap();

        assert_eq!(world.tree().path_to(&B::id()), vec![N::id(), A::id(), B::id()]);
        assert_eq!(world.tree().parent(&C::id()), Some(&N::id()));
    }

    #[test]
    fn test_builder_rejects_orphan_edge() {
        let result = World::<N>::builder()
            .orientation(Orientation::<A, B>::identity())
            .build();
        assert!(matches!(result, Err(KinematicsError::ParentNotFound(_))));
    }

    #[test]
    fn test_from_edges() {
        let world = World::<N>::from_edges([
            about::<N, A>(0.1, N::x()).edge(),
            about::<N, B>(0.2, N::y()).edge(),
        ])
        .unwrap();
        assert_eq!(world.edges().len(), 2);
        assert!(world.contains::<B>());
    }

    #[test]
    fn test_from_edges_errors() {
        let empty = World::<N>::from_edges(Vec::<Edge<f64>>::new());
        assert!(matches!(empty, Err(KinematicsError::EmptyTree)));

        let wrong_root = World::<N>::from_edges([Orientation::<A, B>::identity().edge()]);
        assert!(matches!(wrong_root, Err(KinematicsError::RootMismatch { .. })));
    }

    #[test]
    fn test_insert_duplicate_frame() {
        let mut world = chain();
        let result = world.insert(Orientation::<N, B>::identity());
        assert!(matches!(result, Err(KinematicsError::ChildAlreadyPresent(_))));
        assert_eq!(world.tree().len(), 3);
    }

    #[test]
    fn test_get_edge() {
        let world = World::<N>::builder()
            .orientation(Orientation::<N, A>::identity())
            .orientation(about::<A, B>(0.1, A::x()))
            .orientation(Orientation::<N, C>::identity())
            .build()
            .unwrap();

        let ori = world.get::<A, B>().unwrap();
        assert_relative_eq!(ori.angle(), 0.1, epsilon = 1e-15);
        assert_eq!(ori.axis(), A::x());

        assert!(matches!(world.get::<N, B>(), Err(KinematicsError::EdgeNotFound { .. })));
        assert!(matches!(world.get::<B, A>(), Err(KinematicsError::EdgeNotFound { .. })));
    }

    #[test]
    fn test_express_root_is_identity() {
        let world = chain();
        assert_eq!(world.express_root::<N>().unwrap(), Orientation::identity());
    }

    #[test]
    fn test_express_same_frame_is_identity() {
        let world = chain();
        assert_relative_eq!(world.express::<A, A>().unwrap().angle(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(world.express::<B, B>().unwrap().angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_express_composes_along_path() {
        let world = World::<N>::builder()
            .orientation(about::<N, A>(0.3, N::z()))
            .orientation(about::<A, B>(-0.8, normalized(&Vector::new(1.0, 2.0, 2.0))))
            .orientation(about::<N, C>(1.4, N::y()))
            .build()
            .unwrap();

        let a_b = world.express::<A, B>().unwrap();
        let b_c = world.express::<B, C>().unwrap();
        let a_c = world.express::<A, C>().unwrap();
        assert_relative_eq!(a_c, a_b * b_c, epsilon = 1e-12);
    }

    #[test]
    fn test_express_unknown_frame() {
        let world = chain();
        assert!(matches!(world.express::<N, Z>(), Err(KinematicsError::FrameNotInWorld(name)) if name == "Z"));
        assert!(matches!(world.express_root::<Z>(), Err(KinematicsError::FrameNotInWorld(_))));
    }

    #[test]
    fn test_express_vector_single_chain() {
        let world = World::<N>::builder()
            .orientation(about::<N, A>(FRAC_PI_2, N::x()))
            .build()
            .unwrap();

        let v = Vector::<N>::new(1.0, 0.0, 0.0);
        assert_eq!(v.express_in::<N, N>(&world).unwrap(), v);
        assert_relative_eq!(v.express_in::<A, N>(&world).unwrap(), Vector::new(1.0, 0.0, 0.0), epsilon = 1e-12);

        let v = Vector::<N>::new(1.0, 1.0, 0.0);
        assert_relative_eq!(v.express_in::<A, N>(&world).unwrap(), Vector::new(1.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_express_vector_two_chains() {
        let world = chain();
        let v = Vector::<N>::new(0.0, 1.0, 0.0);
        assert_relative_eq!(v.express_in::<B, N>(&world).unwrap(), Vector::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_express_vector_two_branches() {
        let world = World::<N>::builder()
            .orientation(about::<N, A>(FRAC_PI_2, N::x()))
            .orientation(about::<N, B>(-FRAC_PI_2, N::x()))
            .build()
            .unwrap();

        let v = Vector::<A>::new(0.0, 1.0, 0.0);
        assert_relative_eq!(v.express_in::<B, N>(&world).unwrap(), Vector::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_set_updates_express() {
        let mut world = chain();
        let r = Position::<N>::new(0.0, 1.0, 0.0);
        assert_relative_eq!(r.express_in::<B, N>(&world).unwrap(), Position::new(0.0, -1.0, 0.0), epsilon = 1e-12);

        world.set(about::<A, B>(-FRAC_PI_2, A::x())).unwrap();
        assert_relative_eq!(r.express_in::<B, N>(&world).unwrap(), Position::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_eq!(world.tree().len(), 3);
    }

    #[test]
    fn test_set_missing_edge() {
        let mut world = chain();
        let result = world.set(Orientation::<N, B>::identity());
        assert!(matches!(result, Err(KinematicsError::EdgeNotFound { .. })));
    }

    #[test]
    fn test_set_edge_by_id() {
        let mut world = chain();
        let rotation = *about::<N, A>(FRAC_PI_6, N::z()).rotation();
        world.set_edge(&N::id(), &A::id(), rotation).unwrap();
        assert_eq!(world.get::<N, A>().unwrap().rotation(), &rotation);

        let bad = Quaternion::new(1.0, 1.0, 0.0, 0.0);
        assert!(matches!(
            world.set_edge(&N::id(), &A::id(), bad),
            Err(KinematicsError::NotUnitNorm { .. })
        ));
    }

    #[test]
    fn test_express_ids_matches_typed() {
        let world = chain();
        let typed = world.express::<B, A>().unwrap();
        let by_id = world.express_ids(&B::id(), &A::id()).unwrap();
        assert_eq!(typed.rotation(), &by_id);
    }

    #[test]
    fn test_static_angular_velocity() {
        let world = chain();
        assert_relative_eq!(world.static_angular_velocity::<N, B>().unwrap(), N::x(), epsilon = 1e-12);
        assert!(world.static_angular_velocity::<A, A>().unwrap().is_zero());
    }

    #[test]
    fn test_edges_in_pre_order() {
        let world = World::<N>::builder()
            .orientation(Orientation::<N, A>::identity())
            .orientation(Orientation::<N, C>::identity())
            .orientation(Orientation::<A, B>::identity())
            .build()
            .unwrap();

        let targets: Vec<String> = world.edges().iter().map(|e| e.to_frame().to_string()).collect();
        assert_eq!(targets, vec!["A", "B", "C"]);
    }
}
