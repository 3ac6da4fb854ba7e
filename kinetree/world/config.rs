//! World descriptions written in TOML
//!
//! ```toml
//! root = "N"
//! angle_unit = "degrees"
//! normalize_axes = true
//!
//! [[edges]]
//! from = "N"
//! to = "A"
//! angle = 90.0
//! axis = [1.0, 0.0, 0.0]
//! ```
//!
//! Frames are matched by name, so a description builds into any
//! `World<R>` whose root frame is named like `root`.

use super::World;
use crate::error::{KinematicsError, KinematicsResult};
use crate::frame::{Frame, FrameId};
use crate::orientation::Edge;
use crate::quaternion::Quaternion;
use crate::scalar::Scalar;
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// Unit of the `angle` field of every edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Radians => angle,
            AngleUnit::Degrees => angle.to_radians(),
        }
    }
}

/// One orientation edge: `to` is reached by rotating `from` by `angle` about `axis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Parent frame name
    pub from: String,
    /// Child frame name
    pub to: String,
    /// Rotation angle, in the description's [`AngleUnit`]
    pub angle: f64,
    /// Rotation axis, in the parent frame
    pub axis: [f64; 3],
}

/// Serializable description of a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Name of the root frame
    pub root: String,

    /// Unit of every edge angle
    ///
    /// Default: radians
    #[serde(default)]
    pub angle_unit: AngleUnit,

    /// Normalize edge axes before building
    ///
    /// When false, every axis of a non-zero rotation must already be a unit
    /// vector.
    ///
    /// Default: false
    #[serde(default)]
    pub normalize_axes: bool,

    /// Edges, applied in order
    #[serde(default)]
    pub edges: Vec<EdgeConfig>,
}

impl WorldConfig {
    /// Parse a description from TOML text
    pub fn from_toml_str(contents: &str) -> KinematicsResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Describe an existing world
    ///
    /// Angles are written in radians and edges in parent-first order.
    pub fn from_world<R: Frame>(world: &World<R>) -> Self {
        let edges = world
            .edges()
            .iter()
            .map(|edge| EdgeConfig {
                from: edge.from_frame().name().to_string(),
                to: edge.to_frame().name().to_string(),
                angle: edge.angle().to_f64(),
                axis: edge.axis().map(|c| c.to_f64()),
            })
            .collect();

        Self {
            root: R::NAME.to_string(),
            angle_unit: AngleUnit::Radians,
            normalize_axes: false,
            edges,
        }
    }

    /// Render the description as TOML
    pub fn to_toml_string(&self) -> KinematicsResult<String> {
        toml::to_string(self).map_err(|e| KinematicsError::InvalidConfig(e.to_string()))
    }

    /// Check the description for values no world can be built from
    ///
    /// # Errors
    /// [`KinematicsError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> KinematicsResult<()> {
        if self.root.is_empty() {
            return Err(KinematicsError::InvalidConfig("root frame name is empty".to_string()));
        }

        if let Some(first) = self.edges.first() {
            if first.from != self.root {
                return Err(KinematicsError::InvalidConfig(format!(
                    "first edge starts at '{}' instead of root '{}'",
                    first.from, self.root
                )));
            }
        }

        for (i, edge) in self.edges.iter().enumerate() {
            if edge.from.is_empty() || edge.to.is_empty() {
                return Err(KinematicsError::InvalidConfig(format!("edge {} has an empty frame name", i)));
            }
            if !edge.angle.is_finite() {
                return Err(KinematicsError::InvalidConfig(format!(
                    "edge {} -> {} has a non-finite angle",
                    edge.from, edge.to
                )));
            }
            let zero_axis = edge.axis.iter().all(|c| *c == 0.0);
            if edge.axis.iter().any(|c| !c.is_finite()) || (zero_axis && edge.angle != 0.0) {
                return Err(KinematicsError::InvalidConfig(format!(
                    "edge {} -> {} needs a finite, non-zero axis",
                    edge.from, edge.to
                )));
            }
        }

        Ok(())
    }

    /// Build a world rooted at `R`
    ///
    /// # Errors
    /// * [`KinematicsError::InvalidConfig`] if [`WorldConfig::validate`] fails
    /// * [`KinematicsError::RootMismatch`] if `root` is not the name of `R`
    /// * [`KinematicsError::NotUnitNorm`] for a non-unit axis when
    ///   `normalize_axes` is false
    /// * any tree error raised while attaching the edges
    pub fn build<R: Frame>(&self) -> KinematicsResult<World<R>> {
        self.validate()?;

        if self.root != R::NAME {
            return Err(KinematicsError::RootMismatch {
                expected: R::NAME.to_string(),
                found: self.root.clone(),
            });
        }

        let mut world = World::<R>::new();
        for edge in &self.edges {
            world.insert_edge(self.edge::<R>(edge)?)?;
        }

        log::debug!("built world '{}' with {} edge(s) from description", self.root, self.edges.len());
        Ok(world)
    }

    fn edge<R: Frame>(&self, edge: &EdgeConfig) -> KinematicsResult<Edge<R::Scalar>> {
        let mut axis = edge.axis;
        let norm = f64::hypot3(axis[0], axis[1], axis[2]);
        if self.normalize_axes && norm > 0.0 {
            axis = axis.map(|c| c / norm);
        }

        let angle = R::Scalar::from_f64(self.angle_unit.to_radians(edge.angle));
        let axis = Vector::<R>::from_components(axis.map(|c| R::Scalar::from_f64(c)));
        let rotation = Quaternion::from_angle_axis(angle, &axis)?;

        Edge::new(
            FrameId::named::<R::Scalar>(edge.from.clone()),
            FrameId::named::<R::Scalar>(edge.to.clone()),
            rotation,
        )
    }
}
