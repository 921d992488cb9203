//! Error types for the simulator.

use thiserror::Error;

/// Errors raised while building or configuring a simulation.
///
/// Stepping never fails: degenerate geometry and non-finite values are
/// absorbed by the physics. These errors only surface when a body, an
/// ensemble or a configuration is constructed or mutated.
#[derive(Debug, Error)]
pub enum SimError {
    /// Mass that cannot divide a force.
    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    /// Time step that cannot advance a clock.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Ensemble index past the end of the simulation.
    #[error("no ensemble at index {index} (simulation has {count})")]
    UnknownEnsemble {
        /// Requested index.
        index: usize,
        /// Number of ensembles present.
        count: usize,
    },

    /// YAML parse failure.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an unknown ensemble error.
    #[must_use]
    pub const fn unknown_ensemble(index: usize, count: usize) -> Self {
        Self::UnknownEnsemble { index, count }
    }
}

/// Result alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
