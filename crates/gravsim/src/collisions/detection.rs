//! Contact detection between pairs of bodies
//!
//! Two policies are available:
//! - Physical: centers within the sum of radii widened by the null zone
//! - Pixel: projected display disks overlapping on screen

use crate::body::{Body, BodyId};
use crate::ensemble::{Ensemble, Slot, pair_mut};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// World to screen mapping used by the pixel policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelProjection {
    pub pixels_per_meter: f64,
    /// World point drawn at pixel (0, 0)
    pub origin: Point2<f64>,
}

impl PixelProjection {
    pub fn new(pixels_per_meter: f64, origin: Point2<f64>) -> Self {
        Self {
            pixels_per_meter,
            origin,
        }
    }

    /// Rounds a world position to the nearest pixel
    pub fn project(&self, point: Point2<f64>) -> Point2<i64> {
        let scaled = (point - self.origin) * self.pixels_per_meter;
        Point2::new(scaled.x.round() as i64, scaled.y.round() as i64)
    }

    pub fn pixel_distance(&self, a: Point2<f64>, b: Point2<f64>) -> f64 {
        let (pa, pb) = (self.project(a), self.project(b));
        let dx = (pb.x - pa.x) as f64;
        let dy = (pb.y - pa.y) as f64;
        dx.hypot(dy)
    }
}

/// How contact between two bodies is decided
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionPolicy {
    /// Physical radii plus the distance both bodies cover in one step
    #[default]
    Physical,
    /// Display radii against rounded pixel distance
    Pixel(PixelProjection),
}

/// Outcome of checking one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Separate,
    /// First detection since the pair last separated
    New,
    /// Still touching the partner it was last resolved against
    AlreadyResolved,
}

/// A contact found during a scan, resolved in a second pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Center distance in meters when detected
    pub separation: f64,
}

/// Tolerance added to the radius sum so fast bodies cannot tunnel
///
/// `|v_a|·dt_a + |v_b|·dt_b`, each body using its own time step.
pub fn null_zone(a: &Body, b: &Body) -> f64 {
    a.reach() + b.reach()
}

/// True when the pair overlaps under `policy`, ignoring collision memory
pub fn touching(a: &Body, b: &Body, policy: &DetectionPolicy) -> bool {
    match policy {
        DetectionPolicy::Physical => a.distance_to(b) <= a.radius + b.radius + null_zone(a, b),
        DetectionPolicy::Pixel(projection) => {
            let d = projection.pixel_distance(a.position, b.position);
            a.display_radius + b.display_radius >= d + 1.0
        }
    }
}

/// Checks a pair and updates both bodies' collision memory
///
/// A new contact makes each body remember the other. While either still
/// remembers the other, further checks report [`Contact::AlreadyResolved`].
/// Once the pair is found apart, the memory pointing at the partner is
/// cleared so the next touch counts again.
///
/// # Examples
///
/// ```
/// use gravsim::body::{Body, BodyId};
/// use gravsim::collisions::{Contact, DetectionPolicy, detect_collision};
/// use nalgebra::{Point2, Vector2};
///
/// let mut a = Body::new(Point2::new(0.0, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap().with_radius(1.0);
/// let mut b = Body::new(Point2::new(1.5, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap().with_radius(1.0);
/// a.id = BodyId(1);
/// b.id = BodyId(2);
///
/// assert_eq!(detect_collision(&mut a, &mut b, &DetectionPolicy::Physical), Contact::New);
/// assert_eq!(detect_collision(&mut a, &mut b, &DetectionPolicy::Physical), Contact::AlreadyResolved);
/// ```
pub fn detect_collision(a: &mut Body, b: &mut Body, policy: &DetectionPolicy) -> Contact {
    if !touching(a, b, policy) {
        if a.last_partner == Some(b.id) {
            a.last_partner = None;
        }
        if b.last_partner == Some(a.id) {
            b.last_partner = None;
        }
        return Contact::Separate;
    }

    let remembered = a.last_partner.is_some() && b.last_partner.is_some();
    if remembered && (a.last_partner == Some(b.id) || b.last_partner == Some(a.id)) {
        return Contact::AlreadyResolved;
    }

    a.last_partner = Some(b.id);
    b.last_partner = Some(a.id);
    debug!(
        a = a.id.0,
        b = b.id.0,
        separation = a.distance_to(b),
        "new contact"
    );
    Contact::New
}

/// Checks every distinct pair across all ensembles
///
/// Collision memory is updated as pairs are visited. Only new contacts are
/// returned, closest first, so they can be resolved after the scan without
/// disturbing it.
pub fn detect_collisions(
    ensembles: &mut [Ensemble],
    policy: &DetectionPolicy,
) -> Vec<CollisionEvent> {
    let slots: Vec<Slot> = ensembles
        .iter()
        .enumerate()
        .flat_map(|(e, ensemble)| (0..ensemble.len()).map(move |index| Slot { ensemble: e, index }))
        .collect();

    let mut events = Vec::new();
    for (i, &first) in slots.iter().enumerate() {
        for &second in &slots[i + 1..] {
            let Some((a, b)) = pair_mut(ensembles, first, second) else {
                continue;
            };
            if detect_collision(a, b, policy) == Contact::New {
                events.push(CollisionEvent {
                    body_a: a.id,
                    body_b: b.id,
                    separation: a.distance_to(b),
                });
            }
        }
    }

    events.sort_by(|x, y| x.separation.total_cmp(&y.separation));
    events
}
