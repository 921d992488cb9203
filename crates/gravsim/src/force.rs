//! Named two-dimensional forces
//!
//! A [`Force`] is stored as a magnitude and a direction in degrees, the way
//! pairwise laws naturally produce it, and decomposed into components only
//! when summed.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A force acting on one body
///
/// The angle is measured in degrees counter-clockwise from +x. The sign of
/// `magnitude` is not constrained; a negative magnitude points the opposite
/// way.
///
/// # Examples
///
/// ```
/// use gravsim::force::Force;
///
/// let f = Force::new(2.0, 90.0, "push");
/// assert!(f.x().abs() < 1e-12);
/// assert!((f.y() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Newtons
    pub magnitude: f64,
    /// Degrees from +x
    pub angle: f64,
    /// Diagnostic label
    pub label: String,
}

impl Force {
    pub fn new(magnitude: f64, angle: f64, label: impl Into<String>) -> Self {
        Self {
            magnitude,
            angle,
            label: label.into(),
        }
    }

    /// Builds a force from Cartesian components
    pub fn from_components(components: Vector2<f64>, label: impl Into<String>) -> Self {
        Self {
            magnitude: components.magnitude(),
            angle: components.y.atan2(components.x).to_degrees(),
            label: label.into(),
        }
    }

    pub fn x(&self) -> f64 {
        self.magnitude * self.angle.to_radians().cos()
    }

    pub fn y(&self) -> f64 {
        self.magnitude * self.angle.to_radians().sin()
    }

    pub fn components(&self) -> Vector2<f64> {
        Vector2::new(self.x(), self.y())
    }
}

/// Sums forces component by component
///
/// A component that is not finite contributes nothing instead of poisoning
/// the total.
pub fn net_force(forces: &[Force]) -> Vector2<f64> {
    forces.iter().fold(Vector2::zeros(), |acc, f| {
        let (x, y) = (f.x(), f.y());
        if !x.is_finite() || !y.is_finite() {
            trace!(label = %f.label, x, y, "dropping non-finite force component");
        }
        acc + Vector2::new(finite_or_zero(x), finite_or_zero(y))
    })
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
