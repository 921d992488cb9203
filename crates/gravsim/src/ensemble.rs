//! Named groups of bodies and cluster generation
//!
//! Ensembles are peers. A simulation unions their bodies for interaction,
//! collisions and stepping, but each body is owned by exactly one ensemble.

use crate::body::{Body, BodyId, Color, check_time_step};
use crate::error::{Result, SimError};
use nalgebra::{Point2, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use units::{EARTH_ORBIT_M, Length};

/// Mass of every generated satellite in kilograms
pub const SATELLITE_MASS: f64 = 1e16;

/// Physical radius of every generated satellite in meters
pub const SATELLITE_RADIUS: f64 = 7_000.0;

const CENTER_DISPLAY_RADIUS: f64 = 5.0;
const SATELLITE_DISPLAY_RADIUS: f64 = 3.0;

/// How generated satellites move relative to the center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMode {
    /// Tangential launch around a 1e33 kg center
    #[default]
    Orbit,
    /// Faster launch tilted 10° inward around a 1e38 kg center
    Condense,
}

impl ClusterMode {
    pub fn center_mass(&self) -> f64 {
        match self {
            ClusterMode::Orbit => 1e33,
            ClusterMode::Condense => 1e38,
        }
    }

    pub fn center_radius(&self) -> f64 {
        match self {
            ClusterMode::Orbit => Length::from_earth_radii(1.0).to_meters(),
            ClusterMode::Condense => 100.0,
        }
    }

    /// Launch speed at one Earth-orbit radius from the center, m/s
    pub fn speed_scale(&self) -> f64 {
        match self {
            ClusterMode::Orbit => 8e4,
            ClusterMode::Condense => 3e6,
        }
    }

    /// Degrees added to the tangential direction
    pub fn angle_offset(&self) -> f64 {
        match self {
            ClusterMode::Orbit => 0.0,
            ClusterMode::Condense => -10.0,
        }
    }
}

/// Recipe for a randomly populated cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub name: String,
    /// Bodies including the center
    pub count: usize,
    /// Meters
    pub radius: f64,
    pub center: Point2<f64>,
    /// Drift shared by every body in the cluster, m/s
    pub center_velocity: Vector2<f64>,
    /// Seconds
    pub time_step: f64,
    pub mode: ClusterMode,
}

impl ClusterSpec {
    pub fn new(name: impl Into<String>, count: usize, radius: f64, center: Point2<f64>) -> Self {
        Self {
            name: name.into(),
            count,
            radius,
            center,
            center_velocity: Vector2::zeros(),
            time_step: crate::config::DEFAULT_TIME_STEP,
            mode: ClusterMode::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
        self.center_velocity = velocity;
        self
    }

    pub fn with_mode(mut self, mode: ClusterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }
}

/// Position of a body inside a list of ensembles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub ensemble: usize,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Ensemble {
    pub name: String,
    /// Construction-time center
    pub center: Point2<f64>,
    /// Construction-time placement radius in meters
    pub radius: f64,
    pub bodies: Vec<Body>,
}

impl Ensemble {
    pub fn new(name: impl Into<String>, center: Point2<f64>, radius: f64) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            bodies: Vec::new(),
        }
    }

    /// Populates a cluster: one heavy center plus `count - 1` satellites
    ///
    /// Satellites are placed uniformly inside `radius` around the center and
    /// launched at `speed_scale · d / EARTH_ORBIT` perpendicular to the line
    /// to the center, tilted inward in condense mode. Ids are left at the
    /// default; the simulation assigns them when the ensemble is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::ensemble::{ClusterSpec, Ensemble};
    /// use nalgebra::Point2;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaChaRng;
    ///
    /// let spec = ClusterSpec::new("alpha", 20, 1.5e11, Point2::origin());
    /// let mut rng = ChaChaRng::seed_from_u64(1);
    /// let cluster = Ensemble::generate(&spec, &mut rng).unwrap();
    ///
    /// assert_eq!(cluster.len(), 20);
    /// assert_eq!(cluster.dominant_index(), Some(0));
    /// ```
    pub fn generate<R: Rng + ?Sized>(spec: &ClusterSpec, rng: &mut R) -> Result<Ensemble> {
        check_time_step(spec.time_step)?;
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            return Err(SimError::invalid_config(format!(
                "cluster radius must be positive and finite, got {}",
                spec.radius
            )));
        }

        let mode = spec.mode;
        let mut ensemble = Ensemble::new(spec.name.clone(), spec.center, spec.radius);
        if spec.count == 0 {
            return Ok(ensemble);
        }

        let center = Body::new(
            spec.center,
            spec.center_velocity,
            mode.center_mass(),
            spec.time_step,
        )?
        .with_name(format!("Center of {} cluster", spec.name))
        .with_radius(mode.center_radius())
        .with_display_radius(CENTER_DISPLAY_RADIUS)
        .with_color(Color::pastel(rng));
        ensemble.push(center);

        for n in 1..spec.count {
            let offset = offset_within(rng, spec.radius);
            let speed = mode.speed_scale() * offset.magnitude() / EARTH_ORBIT_M;
            let inward = (-offset.y).atan2(-offset.x).to_degrees();
            let mut satellite = Body::launched(
                spec.center + offset,
                speed,
                inward + 90.0 + mode.angle_offset(),
                SATELLITE_MASS,
                spec.time_step,
            )?;
            satellite.velocity += spec.center_velocity;
            satellite.initial_velocity = satellite.velocity;
            let satellite = satellite
                .with_name(format!("{} {}", spec.name, n))
                .with_radius(SATELLITE_RADIUS)
                .with_display_radius(SATELLITE_DISPLAY_RADIUS)
                .with_color(Color::pastel(rng));
            ensemble.push(satellite);
        }

        debug!(name = %spec.name, count = spec.count, mode = ?mode, "generated cluster");
        Ok(ensemble)
    }

    pub fn push(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn find(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Index of the most massive body; the first wins ties
    pub fn dominant_index(&self) -> Option<usize> {
        self.bodies
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, b)| match best {
                Some((_, m)) if b.mass() <= m => best,
                _ => Some((i, b.mass())),
            })
            .map(|(i, _)| i)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.momentum())
    }

    /// Mass-weighted mean position, `None` when the ensemble has no mass
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * b.mass());
        Some(Point2::from(weighted / total))
    }

    /// Sets the velocity of the first body, the cluster's center
    pub fn set_center_velocity(&mut self, velocity: Vector2<f64>) {
        if let Some(center) = self.bodies.first_mut() {
            center.velocity = velocity;
        }
    }

    /// Moves every body and the nominal center by `offset`
    pub fn translate(&mut self, offset: Vector2<f64>) {
        self.center += offset;
        for body in &mut self.bodies {
            body.position += offset;
            body.bounds.include(body.position);
        }
    }

    /// Drops every body farther than `limit` from the dominant body
    ///
    /// Non-finite distances count as escaped.
    pub fn remove_escapees(&mut self, limit: f64) -> Vec<BodyId> {
        let Some(anchor) = self.dominant_index().map(|i| self.bodies[i].position) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        let name = &self.name;
        self.bodies.retain(|b| {
            let distance = (b.position - anchor).magnitude();
            let inside = distance <= limit;
            if !inside {
                warn!(id = b.id.0, ensemble = %name, distance, limit, "body escaped, removing");
                removed.push(b.id);
            }
            inside
        });
        removed
    }
}

/// Finds the ensemble and index holding `id`
pub fn locate(ensembles: &[Ensemble], id: BodyId) -> Option<Slot> {
    ensembles.iter().enumerate().find_map(|(e, ensemble)| {
        ensemble
            .bodies
            .iter()
            .position(|b| b.id == id)
            .map(|index| Slot { ensemble: e, index })
    })
}

/// Mutable access to two distinct bodies, in the order asked for
pub fn pair_mut(ensembles: &mut [Ensemble], a: Slot, b: Slot) -> Option<(&mut Body, &mut Body)> {
    if a == b {
        return None;
    }
    let (first, second) = if (a.ensemble, a.index) < (b.ensemble, b.index) {
        (a, b)
    } else {
        (b, a)
    };

    let (x, y) = if first.ensemble == second.ensemble {
        let bodies = &mut ensembles.get_mut(first.ensemble)?.bodies;
        if second.index >= bodies.len() {
            return None;
        }
        let (head, tail) = bodies.split_at_mut(second.index);
        (&mut head[first.index], &mut tail[0])
    } else {
        if second.ensemble >= ensembles.len() {
            return None;
        }
        let (head, tail) = ensembles.split_at_mut(second.ensemble);
        let x = head[first.ensemble].bodies.get_mut(first.index)?;
        let y = tail[0].bodies.get_mut(second.index)?;
        (x, y)
    };

    if first == a { Some((x, y)) } else { Some((y, x)) }
}

/// Center of mass of two bodies
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::ensemble::barycenter;
/// use nalgebra::{Point2, Vector2};
///
/// let heavy = Body::new(Point2::new(0.0, 0.0), Vector2::zeros(), 3.0, 1.0).unwrap();
/// let light = Body::new(Point2::new(4.0, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap();
/// assert_eq!(barycenter(&heavy, &light), Point2::new(1.0, 0.0));
/// ```
pub fn barycenter(a: &Body, b: &Body) -> Point2<f64> {
    let total = a.mass() + b.mass();
    Point2::from((a.position.coords * a.mass() + b.position.coords * b.mass()) / total)
}

// Rejection sampling keeps the spread uniform over the disk.
fn offset_within<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> Vector2<f64> {
    loop {
        let offset = Vector2::new(
            rng.random_range(-radius..=radius),
            rng.random_range(-radius..=radius),
        );
        let d = offset.magnitude();
        if d <= radius && d > 0.0 {
            return offset;
        }
    }
}
