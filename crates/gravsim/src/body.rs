use crate::error::{Result, SimError};
use crate::force::{Force, finite_or_zero, net_force};
use nalgebra::{Point2, Vector2};
use quadrature::{Polynomial, QuadratureRule};
use rand::Rng;
use serde::{Deserialize, Serialize};
use units::{Mass, Time};

/// Handle for a body, minted by the owning simulation and never reused
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BodyId(pub u64);

/// How a body turns acceleration into motion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Integration {
    /// `v += a·dt; x += v·dt`
    #[default]
    Euler,
    /// Integrate acceleration and then the resulting velocity with a rule
    Quadrature(QuadratureRule),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise average of two colors
    pub fn blend(self, other: Color) -> Color {
        let avg = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 2) as u8;
        Color::new(avg(self.r, other.r), avg(self.g, other.g), avg(self.b, other.b))
    }

    /// A light, low-saturation color with random hue
    pub fn pastel<R: Rng + ?Sized>(rng: &mut R) -> Color {
        let hue = rng.random::<f64>();
        let saturation = rng.random_range(0.4..0.6);
        from_hsv(hue, saturation, 0.9)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

fn from_hsv(hue: f64, saturation: f64, value: f64) -> Color {
    let sector = (hue * 6.0).floor();
    let f = hue * 6.0 - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - f * saturation);
    let t = value * (1.0 - (1.0 - f) * saturation);
    let (r, g, b) = match sector as i64 % 6 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::new(channel(r), channel(g), channel(b))
}

/// Running extent of every position a body has moved through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryBounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl TrajectoryBounds {
    pub fn at(point: Point2<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include(&mut self, point: Point2<f64>) {
        self.min = Point2::new(self.min.x.min(point.x), self.min.y.min(point.y));
        self.max = Point2::new(self.max.x.max(point.x), self.max.y.max(point.y));
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A point mass, and optionally a point charge, with its own clock
///
/// Positions are meters, velocities m/s and masses kg. The force list is
/// rebuilt by the interaction engine before each step; a body whose list is
/// empty simply coasts.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub acceleration: Vector2<f64>,
    /// Velocity at launch
    pub initial_velocity: Vector2<f64>,
    /// Acceleration at launch
    pub initial_acceleration: Vector2<f64>,
    mass: f64,
    /// Coulombs
    pub charge: f64,
    /// Physical radius in meters
    pub radius: f64,
    /// Radius in pixels, carried for presentation layers
    pub display_radius: f64,
    /// Air resistance coefficient; zero disables drag
    pub drag: f64,
    pub integration: Integration,
    /// Seconds per step, also used to widen the contact zone
    pub time_step: f64,
    /// Elapsed simulated seconds on this body's own clock
    pub time: f64,
    pub forces: Vec<Force>,
    /// Weak link to the body last resolved against
    pub last_partner: Option<BodyId>,
    pub bounds: TrajectoryBounds,
    pub trajectory: Vec<Point2<f64>>,
    pub color: Color,
    pub traced: bool,
}

impl Body {
    /// Creates a body at rest in acceleration
    ///
    /// # Arguments
    ///
    /// * `position` - Meters
    /// * `velocity` - Meters per second
    /// * `mass` - Kilograms, must be positive and finite
    /// * `time_step` - Seconds, must be positive and finite
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::Body;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let earth = Body::new(Point2::new(1.5e11, 0.0), Vector2::new(0.0, 29_780.0), 5.9742e24, 18_000.0)
    ///     .unwrap()
    ///     .with_name("Earth");
    /// assert_eq!(earth.mass(), 5.9742e24);
    ///
    /// assert!(Body::new(Point2::origin(), Vector2::zeros(), 0.0, 18_000.0).is_err());
    /// ```
    pub fn new(
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        time_step: f64,
    ) -> Result<Self> {
        check_mass(mass)?;
        check_time_step(time_step)?;
        Ok(Self::unchecked(position, velocity, mass, time_step))
    }

    /// Creates a body from a launch speed and a direction in degrees
    pub fn launched(
        position: Point2<f64>,
        speed: f64,
        angle_degrees: f64,
        mass: f64,
        time_step: f64,
    ) -> Result<Self> {
        let theta = angle_degrees.to_radians();
        let velocity = Vector2::new(speed * theta.cos(), speed * theta.sin());
        Self::new(position, velocity, mass, time_step)
    }

    /// A massless marker that is monitored but never accelerated
    pub fn placeholder(position: Point2<f64>) -> Self {
        Self::unchecked(position, Vector2::zeros(), 0.0, 1.0)
    }

    pub(crate) fn unchecked(
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        time_step: f64,
    ) -> Self {
        Self {
            id: BodyId::default(),
            name: String::new(),
            position,
            velocity,
            acceleration: Vector2::zeros(),
            initial_velocity: velocity,
            initial_acceleration: Vector2::zeros(),
            mass,
            charge: 0.0,
            radius: 0.0,
            display_radius: 1.0,
            drag: 0.0,
            integration: Integration::Euler,
            time_step,
            time: 0.0,
            forces: Vec::new(),
            last_partner: None,
            bounds: TrajectoryBounds::at(position),
            trajectory: Vec::new(),
            color: Color::default(),
            traced: false,
        }
    }

    pub fn with_acceleration(mut self, acceleration: Vector2<f64>) -> Self {
        self.acceleration = acceleration;
        self.initial_acceleration = acceleration;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_display_radius(mut self, display_radius: f64) -> Self {
        self.display_radius = display_radius;
        self
    }

    pub fn with_drag(mut self, drag: f64) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_integration(mut self, integration: Integration) -> Self {
        self.integration = integration;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn traced(mut self) -> Self {
        self.traced = true;
        self
    }

    /// Starts this body's clock at `time` seconds
    pub fn starting_at(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        check_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    /// True when the mass may divide a force
    pub fn has_positive_mass(&self) -> bool {
        Mass::from_kg(self.mass).is_positive()
    }

    pub fn clock(&self) -> Time {
        Time::from_seconds(self.time)
    }

    /// Replaces the force list and derives acceleration from it
    ///
    /// Bodies without positive mass keep their acceleration untouched.
    pub fn apply_forces(&mut self, forces: Vec<Force>) {
        self.forces = forces;
        if self.has_positive_mass() {
            let a = net_force(&self.forces) / self.mass;
            self.acceleration = Vector2::new(finite_or_zero(a.x), finite_or_zero(a.y));
        }
    }

    pub fn net_force(&self) -> Vector2<f64> {
        net_force(&self.forces)
    }

    /// Advances the body by `dt` seconds
    ///
    /// With `moving` false nothing changes, which lets a freshly created body
    /// be shown for a tick before it starts.
    pub fn step(&mut self, dt: f64, moving: bool) {
        if !moving {
            return;
        }
        if self.drag > 0.0 {
            let v = self.velocity;
            self.acceleration -= self.drag * v.abs().component_mul(&v);
        }

        let a = self.acceleration;
        match self.integration {
            Integration::Euler => {
                self.velocity += a * dt;
                self.position += self.velocity * dt;
            }
            Integration::Quadrature(rule) => {
                let (t0, t1) = (self.time, self.time + dt);
                let v0 = self.velocity;
                self.velocity = Vector2::new(
                    v0.x + rule.slice(&Polynomial::constant(a.x), t0, t1),
                    v0.y + rule.slice(&Polynomial::constant(a.y), t0, t1),
                );
                self.position += Vector2::new(
                    displacement(rule, v0.x, a.x, t0, t1),
                    displacement(rule, v0.y, a.y, t0, t1),
                );
            }
        }

        self.time += dt;
        self.bounds.include(self.position);
        self.trajectory.push(self.position);
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).magnitude()
    }

    /// Direction from this body to `other` in degrees from +x
    pub fn angle_to(&self, other: &Body) -> f64 {
        let d = other.position - self.position;
        d.y.atan2(d.x).to_degrees()
    }

    /// Distance this body covers in one of its own steps
    pub fn reach(&self) -> f64 {
        self.speed() * self.time_step
    }
}

// Area under the velocity line that starts at `v0` and changes at rate `a`.
fn displacement(rule: QuadratureRule, v0: f64, a: f64, t0: f64, t1: f64) -> f64 {
    rule.slice(&Polynomial::linear(v0 - a * t0, a), t0, t1)
}

fn check_mass(mass: f64) -> Result<()> {
    if Mass::from_kg(mass).is_positive() {
        Ok(())
    } else {
        Err(SimError::NonPositiveMass(mass))
    }
}

pub(crate) fn check_time_step(time_step: f64) -> Result<()> {
    if time_step.is_finite() && time_step > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimeStep(time_step))
    }
}
