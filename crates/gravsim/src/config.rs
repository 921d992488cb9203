//! Simulation configuration loaded from YAML.
//!
//! Every field has a default, so a configuration file only needs to name
//! what it changes:
//!
//! ```yaml
//! time_step: 3600.0        # seconds per tick
//! integration: simpson     # euler, left, right, midpoint, trapezoid,
//!                          # simpson, minimum, maximum or random
//! collision_mode: elastic  # or inelastic
//! electrostatics: true
//! charge_convention: physical
//! seed: 7
//! ```

use crate::body::Integration;
use crate::collisions::{CollisionMode, DetectionPolicy};
use crate::error::{Result, SimError};
use crate::forces::{COULOMB_CONSTANT, ChargeConvention};
use quadrature::{QuadratureRule, RuleKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::Read;
use units::GRAVITATIONAL_CONSTANT;

/// Seconds per tick used by the original cluster scenarios (five hours)
pub const DEFAULT_TIME_STEP: f64 = 18_000.0;

/// Distance from an ensemble's dominant body beyond which a body is dropped
pub const DEFAULT_ESCAPE_DISTANCE: f64 = 1e20;

/// Integration path chosen for every body the simulation creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    #[default]
    Euler,
    Left,
    Right,
    Midpoint,
    Trapezoid,
    Simpson,
    Minimum,
    Maximum,
    Random,
}

impl IntegrationKind {
    /// The quadrature rule behind this choice, `None` for the Euler path
    pub fn rule_kind(&self) -> Option<RuleKind> {
        match self {
            IntegrationKind::Euler => None,
            IntegrationKind::Left => Some(RuleKind::Left),
            IntegrationKind::Right => Some(RuleKind::Right),
            IntegrationKind::Midpoint => Some(RuleKind::Midpoint),
            IntegrationKind::Trapezoid => Some(RuleKind::Trapezoid),
            IntegrationKind::Simpson => Some(RuleKind::Simpson),
            IntegrationKind::Minimum => Some(RuleKind::Minimum),
            IntegrationKind::Maximum => Some(RuleKind::Maximum),
            IntegrationKind::Random => Some(RuleKind::Random),
        }
    }

    /// Builds the per-body integration, drawing a random offset if needed
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Integration {
        match self.rule_kind() {
            None => Integration::Euler,
            Some(kind) => Integration::Quadrature(QuadratureRule::build(kind, rng)),
        }
    }
}

/// Physical constants and policies for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// m³ kg⁻¹ s⁻²
    pub gravitational_constant: f64,
    /// N·m²·C⁻²
    pub coulomb_constant: f64,
    pub electrostatics: bool,
    pub charge_convention: ChargeConvention,
    /// Seconds per tick
    pub time_step: f64,
    pub integration: IntegrationKind,
    pub collisions: bool,
    pub collision_mode: CollisionMode,
    pub detection: DetectionPolicy,
    /// Meters
    pub escape_distance: f64,
    /// Seeds the random rule and cluster generation when set
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            coulomb_constant: COULOMB_CONSTANT,
            electrostatics: false,
            charge_convention: ChargeConvention::default(),
            time_step: DEFAULT_TIME_STEP,
            integration: IntegrationKind::default(),
            collisions: true,
            collision_mode: CollisionMode::default(),
            detection: DetectionPolicy::default(),
            escape_distance: DEFAULT_ESCAPE_DISTANCE,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a YAML document
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::{IntegrationKind, SimulationConfig};
    ///
    /// let config = SimulationConfig::from_yaml_str("time_step: 60.0\nintegration: midpoint\n").unwrap();
    /// assert_eq!(config.time_step, 60.0);
    /// assert_eq!(config.integration, IntegrationKind::Midpoint);
    /// assert!(config.collisions);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates YAML from any reader, such as an open file
    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Rejects values that would stall or blow up a step
    pub fn validate(&self) -> Result<()> {
        crate::body::check_time_step(self.time_step)?;
        positive("gravitational_constant", self.gravitational_constant)?;
        positive("coulomb_constant", self.coulomb_constant)?;
        if self.escape_distance.is_nan() || self.escape_distance <= 0.0 {
            return Err(SimError::invalid_config(format!(
                "escape_distance must be positive, got {}",
                self.escape_distance
            )));
        }
        if let DetectionPolicy::Pixel(projection) = &self.detection {
            positive("pixels_per_meter", projection.pixels_per_meter)?;
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(format!(
            "{field} must be positive and finite, got {value}"
        )))
    }
}
