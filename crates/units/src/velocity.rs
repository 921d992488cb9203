use crate::length::Length;
use crate::mass::Mass;
use crate::time::Time;
use std::{
    f64::consts::TAU,
    ops::{Add, Div, Mul, Sub},
};

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻² (CODATA 2010)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67384e-11;

/// Calculate circular orbital velocity sqrt(G·M/r)
///
/// # Arguments
/// * `g` - Gravitational constant in m³ kg⁻¹ s⁻²
/// * `central_mass` - Mass of the body being orbited
/// * `radius` - Orbital radius
///
/// # Returns
/// Tangential speed for a circular orbit
///
/// # Examples
/// ```
/// use units::{Length, Mass, GRAVITATIONAL_CONSTANT, circular_orbital_velocity};
///
/// let v = circular_orbital_velocity(
///     GRAVITATIONAL_CONSTANT,
///     Mass::from_solar_masses(1.0),
///     Length::from_earth_orbits(1.0),
/// );
/// // Roughly 29.7 km/s
/// assert!((v.to_km_per_sec() - 29.7).abs() < 0.1);
/// ```
pub fn circular_orbital_velocity(g: f64, central_mass: Mass, radius: Length) -> Velocity {
    Velocity::from_meters_per_sec((g * central_mass.to_kg() / radius.to_meters()).sqrt())
}

/// Period of a circular orbit, 2π·sqrt(r³ / (G·M))
pub fn circular_orbital_period(g: f64, central_mass: Mass, radius: Length) -> Time {
    Time::from_seconds(TAU * (radius.powi(3) / (g * central_mass.to_kg())).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: m/s

impl Velocity {
    pub fn from_meters_per_sec(value: f64) -> Self {
        Self(value)
    }

    pub fn from_km_per_sec(value: f64) -> Self {
        Self(value * 1000.0)
    }

    pub fn to_meters_per_sec(&self) -> f64 {
        self.0
    }

    pub fn to_km_per_sec(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}
