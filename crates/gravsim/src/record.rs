//! Flat body records for external serializers

use crate::body::Body;
use crate::error::Result;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// The persisted fields of a body, one scalar per column
///
/// Field names are stable so that snapshot writers and readers outside the
/// simulator can round-trip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub mass: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub ax: f64,
    pub ay: f64,
    pub display_radius: f64,
    pub radius: f64,
    pub charge: f64,
}

impl Body {
    pub fn to_record(&self) -> BodyRecord {
        BodyRecord {
            name: self.name.clone(),
            mass: self.mass(),
            x: self.position.x,
            y: self.position.y,
            vx: self.velocity.x,
            vy: self.velocity.y,
            ax: self.acceleration.x,
            ay: self.acceleration.y,
            display_radius: self.display_radius,
            radius: self.radius,
            charge: self.charge,
        }
    }

    /// Rebuilds a body from a record
    ///
    /// The mass check of [`Body::new`] applies, so a record with zero mass is
    /// rejected.
    pub fn from_record(record: &BodyRecord, time_step: f64) -> Result<Body> {
        Ok(Body::new(
            Point2::new(record.x, record.y),
            Vector2::new(record.vx, record.vy),
            record.mass,
            time_step,
        )?
        .with_name(record.name.clone())
        .with_acceleration(Vector2::new(record.ax, record.ay))
        .with_display_radius(record.display_radius)
        .with_radius(record.radius)
        .with_charge(record.charge))
    }
}
