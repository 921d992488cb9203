use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mean Sun-Earth separation used for scenario scaling (1.5 × 10¹¹ m)
pub const EARTH_ORBIT_M: f64 = 1.5e11;
pub const AU_TO_M: f64 = 1.495978707e11;
pub const EARTH_RADIUS_M: f64 = 6.371e6;
pub const KM_TO_M: f64 = 1000.0;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct stores meters. Positions, radii and escape bounds in the
/// simulator are all plain meters, so this type mostly exists to make scenario
/// definitions readable.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let orbit = Length::from_earth_orbits(1.0);
/// let radius = Length::from_earth_radii(1.0);
///
/// assert_eq!(orbit.to_meters(), 1.5e11);
/// assert!(radius < orbit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: meters

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_meters(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value * KM_TO_M)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value * AU_TO_M)
    }

    /// Creates a new `Length` in multiples of the rounded Earth orbit radius.
    pub fn from_earth_orbits(value: f64) -> Self {
        Self(value * EARTH_ORBIT_M)
    }

    /// Creates a new `Length` from a value in Earth radii.
    pub fn from_earth_radii(value: f64) -> Self {
        Self(value * EARTH_RADIUS_M)
    }

    pub fn to_meters(&self) -> f64 {
        self.0
    }

    pub fn to_km(&self) -> f64 {
        self.0 / KM_TO_M
    }

    pub fn to_au(&self) -> f64 {
        self.0 / AU_TO_M
    }

    pub fn to_earth_orbits(&self) -> f64 {
        self.0 / EARTH_ORBIT_M
    }

    pub fn to_earth_radii(&self) -> f64 {
        self.0 / EARTH_RADIUS_M
    }

    /// Raise to integer power
    pub fn powi(&self, n: i32) -> f64 {
        self.0.powi(n)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Ratio of two lengths
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}
