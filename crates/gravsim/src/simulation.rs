//! The step driver
//!
//! One call to [`Simulation::step`] runs the whole pipeline to completion:
//! accumulate forces across every ensemble, detect and resolve collisions
//! over the same global set, drop escaped bodies, then advance every
//! surviving body and the simulation clock.

use crate::body::{Body, BodyId, Integration};
use crate::collisions::{Resolution, detect_collisions, resolve_collision};
use crate::config::SimulationConfig;
use crate::ensemble::{ClusterSpec, Ensemble};
use crate::error::{Result, SimError};
use crate::forces::{ForceSet, accumulate_forces, potential_energy};
use nalgebra::{Point2, Vector2};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::collections::HashSet;
use tracing::{debug, trace};

/// What one step did besides moving bodies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub resolutions: Vec<Resolution>,
    pub escaped: Vec<BodyId>,
}

impl StepReport {
    pub fn merges(&self) -> usize {
        self.resolutions
            .iter()
            .filter(|r| matches!(r, Resolution::Merged(_)))
            .count()
    }
}

/// Complete state of a running simulation
#[derive(Debug)]
pub struct Simulation {
    pub config: SimulationConfig,
    pub ensembles: Vec<Ensemble>,
    /// Elapsed simulated seconds
    pub time: f64,
    next_id: u64,
    laws: ForceSet,
    rng: ChaChaRng,
}

impl Simulation {
    /// Creates an empty simulation
    ///
    /// The random stream is seeded from `config.seed` when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::SimulationConfig;
    /// use gravsim::simulation::Simulation;
    ///
    /// let sim = Simulation::new(SimulationConfig::default()).unwrap();
    /// assert_eq!(sim.body_count(), 0);
    /// assert_eq!(sim.time, 0.0);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaChaRng::seed_from_u64(seed),
            None => ChaChaRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            laws: ForceSet::from_config(&config),
            config,
            ensembles: Vec::new(),
            time: 0.0,
            next_id: 0,
            rng,
        })
    }

    /// Replaces the active force laws
    pub fn with_laws(mut self, laws: ForceSet) -> Self {
        self.laws = laws;
        self
    }

    fn mint_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    // The null zone reads the body's own time step, which must match the
    // configured one. A clock still at zero starts at the current time.
    fn adopt(&mut self, body: &mut Body) -> BodyId {
        let dt = self.config.time_step;
        if body.time_step != dt {
            trace!(
                name = %body.name,
                from = body.time_step,
                to = dt,
                "adopting simulation time step"
            );
            body.time_step = dt;
        }
        if body.time == 0.0 {
            body.time = self.time;
        }
        body.id = self.mint_id();
        body.id
    }

    /// Adds an ensemble, assigning a fresh id to each of its bodies
    ///
    /// Bodies take the configured time step and a fresh clock starts at the
    /// current simulation time.
    ///
    /// # Returns
    ///
    /// Index of the new ensemble
    pub fn add_ensemble(&mut self, mut ensemble: Ensemble) -> usize {
        for body in &mut ensemble.bodies {
            self.adopt(body);
        }
        self.ensembles.push(ensemble);
        self.ensembles.len() - 1
    }

    /// Adds a body to an existing ensemble and returns its id
    ///
    /// As with [`Simulation::add_ensemble`], the body takes the configured
    /// time step.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::Body;
    /// use gravsim::config::SimulationConfig;
    /// use gravsim::ensemble::Ensemble;
    /// use gravsim::simulation::Simulation;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    /// let home = sim.add_ensemble(Ensemble::new("home", Point2::origin(), 1e11));
    ///
    /// let body = Body::new(Point2::new(1e10, 0.0), Vector2::zeros(), 1e20, 18_000.0).unwrap();
    /// let id = sim.add_body(home, body).unwrap();
    ///
    /// assert_eq!(sim.find(id).map(|b| b.mass()), Some(1e20));
    /// assert!(sim.add_body(7, Body::placeholder(Point2::origin())).is_err());
    /// ```
    pub fn add_body(&mut self, ensemble_index: usize, mut body: Body) -> Result<BodyId> {
        let count = self.ensembles.len();
        if ensemble_index >= count {
            return Err(SimError::unknown_ensemble(ensemble_index, count));
        }
        let id = self.adopt(&mut body);
        self.ensembles[ensemble_index].push(body);
        Ok(id)
    }

    /// Generates a cluster from `spec` with the simulation's random stream
    ///
    /// Every generated body uses the configured integration path.
    pub fn generate_cluster(&mut self, spec: &ClusterSpec) -> Result<usize> {
        let mut ensemble = Ensemble::generate(spec, &mut self.rng)?;
        for body in &mut ensemble.bodies {
            body.integration = self.config.integration.build(&mut self.rng);
        }
        Ok(self.add_ensemble(ensemble))
    }

    /// A fresh integration following the configuration
    pub fn configured_integration(&mut self) -> Integration {
        self.config.integration.build(&mut self.rng)
    }

    pub fn find(&self, id: BodyId) -> Option<&Body> {
        self.ensembles.iter().find_map(|e| e.find(id))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.ensembles.iter().flat_map(|e| e.bodies.iter())
    }

    pub fn body_count(&self) -> usize {
        self.ensembles.iter().map(Ensemble::len).sum()
    }

    pub fn total_mass(&self) -> f64 {
        self.ensembles.iter().map(Ensemble::total_mass).sum()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.ensembles
            .iter()
            .fold(Vector2::zeros(), |acc, e| acc + e.total_momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies().map(Body::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        potential_energy(&self.ensembles, &self.laws)
    }

    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies()
            .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * b.mass());
        Some(Point2::from(weighted / total))
    }

    /// Advances the simulation by one time step
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::SimulationConfig;
    /// use gravsim::presets::sun_earth;
    ///
    /// let (mut sim, _, earth) = sun_earth(SimulationConfig::default()).unwrap();
    /// let start = sim.find(earth).unwrap().position;
    ///
    /// sim.step();
    ///
    /// assert_eq!(sim.time, 18_000.0);
    /// assert_ne!(sim.find(earth).unwrap().position, start);
    /// ```
    pub fn step(&mut self) -> StepReport {
        let dt = self.config.time_step;
        for body in self.ensembles.iter_mut().flat_map(|e| e.bodies.iter_mut()) {
            body.time_step = dt;
        }

        accumulate_forces(&mut self.ensembles, &self.laws);

        let resolutions = if self.config.collisions {
            self.collide()
        } else {
            Vec::new()
        };

        let limit = self.config.escape_distance;
        let escaped: Vec<BodyId> = self
            .ensembles
            .iter_mut()
            .flat_map(|e| e.remove_escapees(limit))
            .collect();

        step_bodies(&mut self.ensembles, dt);
        self.time += dt;

        let report = StepReport {
            resolutions,
            escaped,
        };
        debug!(
            time = self.time,
            bodies = self.body_count(),
            contacts = report.resolutions.len(),
            merges = report.merges(),
            escaped = report.escaped.len(),
            "step complete"
        );
        report
    }

    /// Runs `steps` consecutive steps
    pub fn run(&mut self, steps: usize) -> StepReport {
        (0..steps).fold(StepReport::default(), |mut total, _| {
            let report = self.step();
            total.resolutions.extend(report.resolutions);
            total.escaped.extend(report.escaped);
            total
        })
    }

    // Scan first, then resolve by id. A body consumed by a merge is not
    // revisited in the same pass.
    fn collide(&mut self) -> Vec<Resolution> {
        let events = detect_collisions(&mut self.ensembles, &self.config.detection);
        let mode = self.config.collision_mode;
        let mut consumed: HashSet<BodyId> = HashSet::new();
        let mut resolutions = Vec::with_capacity(events.len());

        for event in events {
            if consumed.contains(&event.body_a) || consumed.contains(&event.body_b) {
                continue;
            }
            let new_id = BodyId(self.next_id);
            let outcome = resolve_collision(
                &mut self.ensembles,
                event.body_a,
                event.body_b,
                mode,
                new_id,
            );
            if let Resolution::Merged(_) = outcome {
                self.next_id += 1;
                consumed.insert(event.body_a);
                consumed.insert(event.body_b);
            }
            resolutions.push(outcome);
        }
        resolutions
    }
}

/// Advances every body in every ensemble by `dt`
pub fn step_bodies(ensembles: &mut [Ensemble], dt: f64) {
    for body in ensembles.iter_mut().flat_map(|e| e.bodies.iter_mut()) {
        body.step(dt, true);
    }
}
