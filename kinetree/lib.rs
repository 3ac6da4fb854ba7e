//! # kinetree
//!
//! Frame-safe rigid-body kinematics: reference frames, the orientations that
//! relate them, and vectors that remember which frame they are written in.
//!
//! ## Structure
//!
//! ```text
//! kinetree/
//! ── scalar.rs       # f32/f64 scalar trait and ULP tolerance helpers
//! ── frame.rs        # Frame trait, frame! macro, runtime FrameId
//! ── quaternion.rs   # Rotation quaternion and rotate()
//! ── vector/         # Vector, Position, Velocity and generic ops
//! ── orientation.rs  # Orientation<From, To> and frame-erased Edge
//! ── tree.rs         # Arena frame tree with path queries
//! ── world/          # World<R>, builder, TOML descriptions, printing
//! ── point.rs        # Points bound to a world
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kinetree::{frame, Frame, Orientation, Vector, World};
//! use std::f64::consts::FRAC_PI_2;
//!
//! frame!(struct N);
//! frame!(struct A);
//!
//! let world = World::<N>::builder()
//!     .orientation(Orientation::<N, A>::from_angle_axis(FRAC_PI_2, &N::x()).unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Vectors in different frames cannot be mixed; express one in the other first
//! let v = Vector::<N>::new(1.0, 1.0, 0.0);
//! let in_a: Vector<A> = v.express_in::<A, N>(&world).unwrap();
//! assert!((in_a.z() + 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod frame;
pub mod orientation;
pub mod point;
pub mod quaternion;
pub mod scalar;
pub mod tree;
pub mod vector;
pub mod world;

pub use error::{KinematicsError, KinematicsResult};
pub use frame::{Frame, FrameId};
pub use orientation::{Edge, Orientation};
pub use point::Point;
pub use quaternion::{rotate, Quaternion};
pub use scalar::{Scalar, MAX_NORMALIZED_ULP_DIFF};
pub use tree::FrameTree;
pub use vector::{cross_product, dot_product, magnitude, normalized, FrameVector, Position, Vector, Velocity};
pub use world::{AngleUnit, EdgeConfig, World, WorldBuilder, WorldConfig};
