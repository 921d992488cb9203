//! Gravitational N-body simulation of clustered point masses
//!
//! Bodies interact pairwise through gravity and, optionally, Coulomb
//! forces. Each tick accumulates forces across every ensemble, resolves
//! collisions by bouncing or merging, drops escaped bodies and integrates
//! the survivors with either the plain Euler path or one of the
//! [`quadrature`] rules.

pub mod body;
pub mod collisions;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod force;
pub mod forces;
pub mod presets;
pub mod record;
pub mod simulation;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod ensemble_test;
#[cfg(test)]
mod force_test;

pub use body::{Body, BodyId, Integration};
pub use config::SimulationConfig;
pub use ensemble::Ensemble;
pub use error::{Result, SimError};
pub use simulation::Simulation;
