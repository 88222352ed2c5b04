//! Error types for orbitsim.
//!
//! Collisions are not errors: they end a run through
//! [`RunStatus::Collided`](crate::simulation::integrator::RunStatus).

use thiserror::Error;

/// Misuse of the vector primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("cannot normalize the zero vector")]
    ZeroVector,
}

/// Malformed run configuration, rejected before any stepping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("system has no bodies")]
    EmptySystem,

    #[error("body {body} has non-positive mass {mass}")]
    NonPositiveMass { body: usize, mass: f64 },

    #[error("body {body} has negative radius {radius}")]
    NegativeRadius { body: usize, radius: f64 },

    #[error("central body has non-positive mass {0}")]
    NonPositiveCentralMass(f64),

    #[error("central body has negative radius {0}")]
    NegativeCentralRadius(f64),

    #[error("time step must be positive, got {0}")]
    NonPositiveStep(f64),

    #[error("num_points must be at least 1")]
    NoSteps,

    #[error("points_inter must be at least 1")]
    ZeroSamplingInterval,

    #[error("{what} is not finite")]
    NonFinite { what: String },

    #[error("{what}: {source}")]
    Dimension {
        what: String,
        #[source]
        source: VectorError,
    },
}

/// Misuse of the trajectory recorder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("no trajectory for body {0}")]
    UnknownBody(usize),

    #[error("body {body}: expected step {expected}, got {found}")]
    OutOfOrder {
        body: usize,
        expected: usize,
        found: usize,
    },

    #[error("body {body}: step {step} not recorded ({len} positions)")]
    StepOutOfRange { body: usize, step: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),
}

pub type Result<T> = std::result::Result<T, Error>;
