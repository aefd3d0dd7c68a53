//! Error types for model construction and stepping.
//!
//! Geometry and configuration errors abort model construction. Consistency
//! errors (`SelfConnection`, `UnsetUpdateMode`) only surface when
//! `debug_checks` is enabled and indicate a defect in the engine itself.

use thiserror::Error;

use crate::geodesic::BasePolyhedron;

/// Errors from geodesic point generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("geodesic frequency must be at least 1, got {0}")]
    InvalidFrequency(u32),

    #[error("unsupported base polyhedron {0:?}, only the icosahedron is available")]
    UnsupportedPolyhedron(BasePolyhedron),
}

/// Errors from loading or validating a simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors from loading a ball property table.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("preset not found: {0}")]
    NotFound(String),
}

/// Errors from building the particle/spring graph.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("particle {index} was evaluated as a spring candidate against itself")]
    SelfConnection { index: usize },

    #[error("property table `{table}` has {available} entries, {needed} shells need values")]
    PresetTooShort {
        table: &'static str,
        needed: usize,
        available: usize,
    },
}

/// Errors from advancing the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("particle {index} reached the apply phase without an update mode")]
    UnsetUpdateMode { index: usize },
}
