//! Newtonian gravity between point masses

use crate::body::Body;
use crate::force::Force;
use crate::forces::PairForce;
use tracing::trace;
use units::GRAVITATIONAL_CONSTANT;

/// Inverse-square attraction `G·m₁·m₂/d²` pointing from one body to the other
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::forces::{Gravity, PairForce};
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new(Point2::new(0.0, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap();
/// let b = Body::new(Point2::new(1.0, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap();
///
/// let gravity = Gravity::new(1.0);
/// let f = gravity.force(&a, &b).unwrap();
/// assert_eq!(f.magnitude, 1.0);
/// assert_eq!(f.angle, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Gravitational constant in m³ kg⁻¹ s⁻²
    pub g: f64,
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(GRAVITATIONAL_CONSTANT)
    }
}

impl PairForce for Gravity {
    fn force(&self, on: &Body, from: &Body) -> Option<Force> {
        let d = on.distance_to(from);
        if d == 0.0 || !d.is_finite() {
            trace!(on = on.id.0, from = from.id.0, d, "skipping degenerate gravity pair");
            return None;
        }
        let magnitude = self.g * on.mass() * from.mass() / (d * d);
        Some(Force::new(magnitude, on.angle_to(from), "gravity"))
    }

    fn potential_energy(&self, a: &Body, b: &Body) -> f64 {
        let d = a.distance_to(b);
        if d == 0.0 {
            return 0.0;
        }
        -self.g * a.mass() * b.mass() / d
    }
}
