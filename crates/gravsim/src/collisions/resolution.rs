//! Collision resolution by elastic exchange or momentum-conserving merger
//!
//! Elastic resolution applies the one-dimensional two-body formula to each
//! axis independently. Inelastic resolution replaces the pair with a single
//! body that conserves:
//! - Total mass
//! - Total momentum
//! - Total charge
//! - Area of the physical disks

use crate::body::{Body, BodyId, Integration};
use crate::ensemble::{Ensemble, locate, pair_mut};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What happens when two bodies touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Exchange velocities, keep both bodies
    Elastic,
    /// Merge into one body
    #[default]
    Inelastic,
}

/// Terminal state of a resolved contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Bounced,
    /// The pair was replaced by the body with this id
    Merged(BodyId),
    /// Nothing was done: a body was missing or had no positive mass
    Skipped,
}

/// Per-axis elastic exchange
///
/// For each axis, `v₁' = 2(m₁v₁ + m₂v₂)/(m₁ + m₂) − v₁` and likewise for the
/// second body. Returns [`Resolution::Skipped`] when either mass is not
/// positive.
pub fn bounce(a: &mut Body, b: &mut Body) -> Resolution {
    if !a.has_positive_mass() || !b.has_positive_mass() {
        debug!(a = a.id.0, b = b.id.0, "not bouncing massless body");
        return Resolution::Skipped;
    }
    let total = a.mass() + b.mass();
    let shared: Vector2<f64> = (a.momentum() + b.momentum()) * 2.0 / total;
    a.velocity = shared - a.velocity;
    b.velocity = shared - b.velocity;
    debug!(a = a.id.0, b = b.id.0, "bounced");
    Resolution::Bounced
}

/// Merge two bodies into one placed where the first was
///
/// The merged body keeps the first body's position, clock and time step,
/// takes the larger display radius and a blend of both colors, and is
/// traced when either parent was. Its trajectory is the first parent's
/// followed by the second's. It integrates on the plain Euler path and
/// starts with zero acceleration.
///
/// # Arguments
///
/// * `a` - First body, whose place the merger takes
/// * `b` - Second body
/// * `new_id` - Id for the merged body
///
/// # Examples
///
/// ```
/// use gravsim::body::{Body, BodyId};
/// use gravsim::collisions::merge_bodies;
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new(Point2::new(1.0, 0.0), Vector2::new(0.0, 5.0), 1.0, 1.0).unwrap();
/// let b = Body::new(Point2::new(1.1, 0.0), Vector2::new(0.0, 3.0), 1.0, 1.0).unwrap();
///
/// let merged = merge_bodies(&a, &b, BodyId(2));
///
/// // Mass is conserved
/// assert!((merged.mass() - 2.0).abs() < 1e-10);
///
/// // Momentum is conserved
/// let p_initial = a.momentum() + b.momentum();
/// let p_final = merged.momentum();
/// assert!((p_final.x - p_initial.x).abs() < 1e-10);
/// assert!((p_final.y - p_initial.y).abs() < 1e-10);
/// ```
pub fn merge_bodies(a: &Body, b: &Body, new_id: BodyId) -> Body {
    let total_mass = a.mass() + b.mass();
    let velocity = (a.momentum() + b.momentum()) / total_mass;

    let mut merged = Body::unchecked(a.position, velocity, total_mass, a.time_step);
    merged.id = new_id;
    merged.name = a.name.clone();
    merged.charge = a.charge + b.charge;
    // 2D disks: area ~ r²
    merged.radius = (a.radius.powi(2) + b.radius.powi(2)).sqrt();
    merged.display_radius = a.display_radius.max(b.display_radius);
    merged.color = a.color.blend(b.color);
    merged.traced = a.traced || b.traced;
    merged.integration = Integration::Euler;
    merged.time = a.time;

    merged.trajectory = a.trajectory.iter().chain(&b.trajectory).copied().collect();
    merged.bounds = a.bounds;
    merged.bounds.include(b.bounds.min);
    merged.bounds.include(b.bounds.max);
    merged
}

/// Resolves a contact between the bodies with ids `a` and `b`
///
/// Bodies are looked up by id, so they may live in different ensembles. On
/// a merge the new body takes `a`'s place in its ensemble and `b` is removed
/// from its own. `new_id` is only used when a merge happens.
///
/// # Examples
///
/// ```
/// use gravsim::body::{Body, BodyId};
/// use gravsim::collisions::{CollisionMode, Resolution, resolve_collision};
/// use gravsim::ensemble::Ensemble;
/// use nalgebra::{Point2, Vector2};
///
/// let mut a = Body::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 2.0, 1.0).unwrap();
/// a.id = BodyId(0);
/// let mut b = Body::new(Point2::new(0.5, 0.0), Vector2::new(-1.0, 0.0), 2.0, 1.0).unwrap();
/// b.id = BodyId(1);
///
/// let mut left = Ensemble::new("left", Point2::origin(), 1.0);
/// left.push(a);
/// let mut right = Ensemble::new("right", Point2::origin(), 1.0);
/// right.push(b);
/// let mut ensembles = vec![left, right];
///
/// let outcome = resolve_collision(&mut ensembles, BodyId(0), BodyId(1), CollisionMode::Inelastic, BodyId(2));
///
/// assert_eq!(outcome, Resolution::Merged(BodyId(2)));
/// assert_eq!(ensembles[0].len(), 1);
/// assert!(ensembles[1].is_empty());
/// assert_eq!(ensembles[0].bodies[0].mass(), 4.0);
/// ```
pub fn resolve_collision(
    ensembles: &mut [Ensemble],
    a: BodyId,
    b: BodyId,
    mode: CollisionMode,
    new_id: BodyId,
) -> Resolution {
    let (Some(slot_a), Some(slot_b)) = (locate(ensembles, a), locate(ensembles, b)) else {
        debug!(a = a.0, b = b.0, "stale collision pair");
        return Resolution::Skipped;
    };
    let Some((body_a, body_b)) = pair_mut(ensembles, slot_a, slot_b) else {
        return Resolution::Skipped;
    };

    match mode {
        CollisionMode::Elastic => bounce(body_a, body_b),
        CollisionMode::Inelastic => {
            if !body_a.has_positive_mass() || !body_b.has_positive_mass() {
                debug!(a = a.0, b = b.0, "not merging massless body");
                return Resolution::Skipped;
            }
            let merged = merge_bodies(body_a, body_b, new_id);
            info!(
                a = a.0,
                b = b.0,
                merged = new_id.0,
                mass = merged.mass(),
                "bodies merged"
            );
            *body_a = merged;
            ensembles[slot_b.ensemble].bodies.remove(slot_b.index);
            Resolution::Merged(new_id)
        }
    }
}
