//! Collision detection and resolution
//!
//! Contacts are found by scanning pairs under a [`DetectionPolicy`] and
//! resolved either by an elastic exchange or by merging the pair.

pub mod detection;
pub mod resolution;


pub use detection::{
    CollisionEvent, Contact, DetectionPolicy, PixelProjection, detect_collision, detect_collisions,
    null_zone, touching,
};
pub use resolution::{CollisionMode, Resolution, bounce, merge_bodies, resolve_collision};
