//! Pairwise force laws and net-force accumulation
//!
//! Every body feels every other body across all ensembles. Forces are
//! computed against an immutable view of the bodies and only then written
//! back, so the order bodies are visited in never changes a result.

use crate::body::Body;
use crate::config::SimulationConfig;
use crate::ensemble::Ensemble;
use crate::force::Force;
use tracing::trace;

pub mod electrostatic;
pub mod gravity;

#[cfg(test)]
mod gravity_test;
#[cfg(test)]
mod mod_test;

pub use electrostatic::{COULOMB_CONSTANT, ChargeConvention, Electrostatic};
pub use gravity::Gravity;

/// A central force between two bodies
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::force::Force;
/// use gravsim::forces::PairForce;
/// use nalgebra::{Point2, Vector2};
///
/// // A constant pull toward the other body
/// struct Tether;
///
/// impl PairForce for Tether {
///     fn force(&self, on: &Body, from: &Body) -> Option<Force> {
///         Some(Force::new(5.0, on.angle_to(from), "tether"))
///     }
/// }
///
/// let a = Body::new(Point2::origin(), Vector2::zeros(), 1.0, 1.0).unwrap();
/// let b = Body::new(Point2::new(0.0, 3.0), Vector2::zeros(), 1.0, 1.0).unwrap();
/// assert_eq!(Tether.force(&a, &b).unwrap().angle, 90.0);
/// ```
pub trait PairForce: Send + Sync {
    /// Force exerted on `on` by `from`
    ///
    /// # Returns
    ///
    /// `None` when the pair contributes nothing, for example when both sit
    /// at the same point
    fn force(&self, on: &Body, from: &Body) -> Option<Force>;

    /// Potential energy of the pair, zero unless overridden
    fn potential_energy(&self, _a: &Body, _b: &Body) -> f64 {
        0.0
    }
}

/// The force laws active in a simulation
///
/// # Examples
///
/// ```
/// use gravsim::forces::{ChargeConvention, Electrostatic, ForceSet, Gravity};
///
/// let laws = ForceSet::new()
///     .with_law(Gravity::new(6.67384e-11))
///     .with_law(Electrostatic::new(8.99e9, ChargeConvention::Physical));
/// assert_eq!(laws.len(), 2);
/// ```
pub struct ForceSet {
    laws: Vec<Box<dyn PairForce>>,
}

impl ForceSet {
    /// Creates an empty set; bodies feel nothing
    pub fn new() -> Self {
        Self { laws: Vec::new() }
    }

    /// Adds a force law to the set
    pub fn with_law<F: PairForce + 'static>(mut self, law: F) -> Self {
        self.laws.push(Box::new(law));
        self
    }

    /// Gravity always, electrostatics when enabled
    pub fn from_config(config: &SimulationConfig) -> Self {
        let set = ForceSet::new().with_law(Gravity::new(config.gravitational_constant));
        if config.electrostatics {
            set.with_law(Electrostatic::new(
                config.coulomb_constant,
                config.charge_convention,
            ))
        } else {
            set
        }
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    /// Every force the `sources` exert on `on`
    ///
    /// `on` itself may appear among the sources and is skipped by identity.
    /// A body without positive mass feels nothing.
    pub fn forces_on<'a, I>(&self, on: &Body, sources: I) -> Vec<Force>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        if !on.has_positive_mass() {
            trace!(id = on.id.0, mass = on.mass(), "not accumulating onto massless body");
            return Vec::new();
        }
        sources
            .into_iter()
            .filter(|from| !std::ptr::eq(on, *from))
            .flat_map(|from| self.laws.iter().filter_map(move |law| law.force(on, from)))
            .collect()
    }

    /// Potential energy of every distinct pair, each counted once
    pub fn potential_energy(&self, bodies: &[&Body]) -> f64 {
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..]
                    .iter()
                    .flat_map(move |b| self.laws.iter().map(move |law| law.potential_energy(a, b)))
            })
            .sum()
    }
}

impl std::fmt::Debug for ForceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForceSet").field("laws", &self.laws.len()).finish()
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new().with_law(Gravity::default())
    }
}

/// Rebuilds the force list and acceleration of every body in `bodies`
///
/// Sources are `bodies` themselves plus every slice in `others`.
pub fn accumulate(bodies: &mut [Body], others: &[&[Body]], laws: &ForceSet) {
    let computed: Vec<Vec<Force>> = bodies
        .iter()
        .map(|on| {
            let sources = bodies
                .iter()
                .chain(others.iter().flat_map(|group| group.iter()));
            laws.forces_on(on, sources)
        })
        .collect();

    for (body, forces) in bodies.iter_mut().zip(computed) {
        body.apply_forces(forces);
    }
}

/// Rebuilds forces for every body against every body in every ensemble
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::ensemble::Ensemble;
/// use gravsim::forces::{ForceSet, Gravity, accumulate_forces};
/// use nalgebra::{Point2, Vector2};
///
/// let mut left = Ensemble::new("left", Point2::origin(), 1.0);
/// left.push(Body::new(Point2::new(0.0, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap());
/// let mut right = Ensemble::new("right", Point2::new(1.0, 0.0), 1.0);
/// right.push(Body::new(Point2::new(1.0, 0.0), Vector2::zeros(), 1.0, 1.0).unwrap());
///
/// let mut ensembles = vec![left, right];
/// accumulate_forces(&mut ensembles, &ForceSet::new().with_law(Gravity::new(1.0)));
///
/// assert_eq!(ensembles[0].bodies[0].acceleration.x, 1.0);
/// ```
pub fn accumulate_forces(ensembles: &mut [Ensemble], laws: &ForceSet) {
    let computed: Vec<Vec<Force>> = {
        let all: Vec<&Body> = ensembles.iter().flat_map(|e| e.bodies.iter()).collect();
        all.iter()
            .map(|on| laws.forces_on(on, all.iter().copied()))
            .collect()
    };

    let bodies = ensembles.iter_mut().flat_map(|e| e.bodies.iter_mut());
    for (body, forces) in bodies.zip(computed) {
        body.apply_forces(forces);
    }
}

/// Total pairwise potential energy across all ensembles
pub fn potential_energy(ensembles: &[Ensemble], laws: &ForceSet) -> f64 {
    let all: Vec<&Body> = ensembles.iter().flat_map(|e| e.bodies.iter()).collect();
    laws.potential_energy(&all)
}
