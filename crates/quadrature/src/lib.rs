//! Quadrature rules over single time slices
//!
//! The simulator integrates acceleration into velocity and velocity into
//! position by asking a [`QuadratureRule`] for the area under a low-degree
//! [`Polynomial`] between two instants. The eight rules are interchangeable
//! and deliberately differ in accuracy.

pub mod polynomial;
pub mod rule;

#[cfg(test)]
mod polynomial_test;

pub use polynomial::Polynomial;
pub use rule::{DEFAULT_SAMPLES, QuadratureRule, RuleKind};
