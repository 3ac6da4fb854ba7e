//! Reference frames
//!
//! A frame is a named, origin-less Cartesian coordinate identity. Frames
//! carry no runtime state; they exist as zero-sized marker types that tag
//! vectors, positions, velocities and orientations so quantities written in
//! different frames cannot be mixed.
//!
//! # Example
//!
//! ```rust
//! use kinetree::{frame, Frame};
//!
//! frame!(pub struct Inertial = "N");
//! frame!(pub struct Body);
//!
//! assert_eq!(Inertial::NAME, "N");
//! assert_eq!(Body::NAME, "Body");
//! let v = Inertial::x() + 2.0 * Inertial::y();
//! assert_eq!(v.components(), [1.0, 2.0, 0.0]);
//! ```

use crate::scalar::Scalar;
use crate::vector::Vector;
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

/// A Cartesian reference frame
///
/// Declare frames with the [`frame!`](crate::frame!) macro. Two frames are the
/// same entity iff their name and scalar type match.
pub trait Frame: Copy + fmt::Debug + Default + Eq + Hash + Send + Sync + 'static {
    /// Scalar type of every quantity expressed in this frame
    type Scalar: Scalar;

    /// Frame name
    const NAME: &'static str;

    /// Runtime identity of this frame
    fn id() -> FrameId {
        FrameId::of::<Self>()
    }

    /// Unit vector along the frame's x-axis
    fn x() -> Vector<Self> {
        Vector::new(Self::Scalar::one(), Self::Scalar::zero(), Self::Scalar::zero())
    }

    /// Unit vector along the frame's y-axis
    fn y() -> Vector<Self> {
        Vector::new(Self::Scalar::zero(), Self::Scalar::one(), Self::Scalar::zero())
    }

    /// Unit vector along the frame's z-axis
    fn z() -> Vector<Self> {
        Vector::new(Self::Scalar::zero(), Self::Scalar::zero(), Self::Scalar::one())
    }
}

/// Runtime frame identity
///
/// Used wherever a frame has to be stored without its type: tree nodes, world
/// edges, points and configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId {
    name: Cow<'static, str>,
    scalar: &'static str,
}

impl FrameId {
    /// Identity of a frame type
    pub fn of<F: Frame>() -> Self {
        Self {
            name: Cow::Borrowed(F::NAME),
            scalar: std::any::type_name::<F::Scalar>(),
        }
    }

    /// Identity of a frame known only by name
    pub fn named<T: Scalar>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            scalar: std::any::type_name::<T>(),
        }
    }

    /// Frame name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the frame's scalar type
    pub fn scalar(&self) -> &'static str {
        self.scalar
    }

    /// Check whether this is the identity of frame `F`
    pub fn is<F: Frame>(&self) -> bool {
        *self == FrameId::of::<F>()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Declare a frame marker type
///
/// ```rust
/// use kinetree::frame;
///
/// frame!(pub struct N);                  // f64, named "N"
/// frame!(pub struct Imu: f32);           // f32, named "Imu"
/// frame!(pub struct Base = "base_link"); // f64, named "base_link"
/// frame!(struct Cam: f32 = "camera");    // f32, named "camera"
/// ```
#[macro_export]
macro_rules! frame {
    ($(#[$meta:meta])* $vis:vis struct $name:ident: $scalar:ty = $label:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Frame for $name {
            type Scalar = $scalar;
            const NAME: &'static str = $label;
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<$name as $crate::Frame>::NAME)
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident: $scalar:ty) => {
        $crate::frame!($(#[$meta])* $vis struct $name: $scalar = stringify!($name));
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident = $label:expr) => {
        $crate::frame!($(#[$meta])* $vis struct $name: f64 = $label);
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident) => {
        $crate::frame!($(#[$meta])* $vis struct $name: f64 = stringify!($name));
    };
}
