//! Coulomb interaction between point charges

use crate::body::Body;
use crate::force::Force;
use crate::forces::PairForce;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Coulomb's constant in N·m²·C⁻²
pub const COULOMB_CONSTANT: f64 = 8.9875517873681764e9;

/// Which way the signed Coulomb magnitude points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeConvention {
    /// `k·q₁·q₂/d²` along the direction to the other body, the same way
    /// gravity points. Like charges attract.
    #[default]
    Inherited,
    /// Like charges repel, opposite charges attract
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Electrostatic {
    pub k: f64,
    pub convention: ChargeConvention,
}

impl Electrostatic {
    pub fn new(k: f64, convention: ChargeConvention) -> Self {
        Self { k, convention }
    }

    fn sign(&self) -> f64 {
        match self.convention {
            ChargeConvention::Inherited => 1.0,
            ChargeConvention::Physical => -1.0,
        }
    }
}

impl Default for Electrostatic {
    fn default() -> Self {
        Self::new(COULOMB_CONSTANT, ChargeConvention::default())
    }
}

impl PairForce for Electrostatic {
    fn force(&self, on: &Body, from: &Body) -> Option<Force> {
        if on.charge == 0.0 || from.charge == 0.0 {
            return None;
        }
        let d = on.distance_to(from);
        if d == 0.0 || !d.is_finite() {
            trace!(on = on.id.0, from = from.id.0, d, "skipping degenerate charge pair");
            return None;
        }
        let magnitude = self.sign() * self.k * on.charge * from.charge / (d * d);
        Some(Force::new(magnitude, on.angle_to(from), "electrostatic"))
    }

    fn potential_energy(&self, a: &Body, b: &Body) -> f64 {
        let d = a.distance_to(b);
        if d == 0.0 {
            return 0.0;
        }
        -self.sign() * self.k * a.charge * b.charge / d
    }
}
