//! Error types shared by every kinetree module

use thiserror::Error;

/// Kinematics errors
#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("Value is not unit norm ({ulps} ULPs away from 1)")]
    NotUnitNorm { ulps: u64 },

    #[error("Parent frame '{0}' does not exist")]
    ParentNotFound(String),

    #[error("Frame '{0}' already exists")]
    ChildAlreadyPresent(String),

    #[error("Frame '{0}' is not part of this world")]
    FrameNotInWorld(String),

    #[error("No orientation edge from '{from}' to '{to}'")]
    EdgeNotFound { from: String, to: String },

    #[error("A frame tree needs at least one orientation edge")]
    EmptyTree,

    #[error("World root is '{found}' but '{expected}' was expected")]
    RootMismatch { expected: String, found: String },

    #[error("Invalid world configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse world configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for kinematics operations
pub type KinematicsResult<T> = Result<T, KinematicsError>;
