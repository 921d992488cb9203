//! Ready-made scenarios

use crate::body::{Body, BodyId, Color};
use crate::config::SimulationConfig;
use crate::ensemble::{ClusterMode, ClusterSpec, Ensemble};
use crate::error::Result;
use crate::simulation::Simulation;
use nalgebra::{Point2, Vector2};
use units::{Length, Mass, circular_orbital_velocity};

/// Sun and Earth on a circular orbit of one Earth-orbit radius
///
/// The Sun starts at rest at the origin and Earth on +x moving along +y at
/// `sqrt(G·M☉/r)`.
///
/// # Returns
///
/// The simulation with the Sun's and Earth's ids
pub fn sun_earth(config: SimulationConfig) -> Result<(Simulation, BodyId, BodyId)> {
    let dt = config.time_step;
    let g = config.gravitational_constant;
    let mut sim = Simulation::new(config)?;

    let sun_mass = Mass::from_solar_masses(1.0);
    let orbit = Length::from_earth_orbits(1.0);
    let speed = circular_orbital_velocity(g, sun_mass, orbit);

    let home = sim.add_ensemble(Ensemble::new("solar", Point2::origin(), orbit.to_meters()));

    let sun = Body::new(Point2::origin(), Vector2::zeros(), sun_mass.to_kg(), dt)?
        .with_name("Sun")
        .with_radius(6.96e8)
        .with_display_radius(8.0)
        .with_color(Color::new(255, 221, 87))
        .with_integration(sim.configured_integration());
    let sun = sim.add_body(home, sun)?;

    let earth = Body::new(
        Point2::new(orbit.to_meters(), 0.0),
        Vector2::new(0.0, speed.to_meters_per_sec()),
        Mass::from_earth_masses(1.0).to_kg(),
        dt,
    )?
    .with_name("Earth")
    .with_radius(Length::from_earth_radii(1.0).to_meters())
    .with_display_radius(3.0)
    .with_color(Color::new(86, 148, 235))
    .with_integration(sim.configured_integration())
    .traced();
    let earth = sim.add_body(home, earth)?;

    Ok((sim, sun, earth))
}

/// Two orbit-mode clusters drifting toward each other
///
/// Each cluster holds `count` bodies within one Earth-orbit radius of its
/// center; the centers start eight radii apart.
pub fn colliding_clusters(config: SimulationConfig, count: usize) -> Result<Simulation> {
    let dt = config.time_step;
    let radius = Length::from_earth_orbits(1.0).to_meters();
    let drift = 2_000.0;
    let mut sim = Simulation::new(config)?;

    for (name, x, vx) in [("west", -4.0 * radius, drift), ("east", 4.0 * radius, -drift)] {
        let spec = ClusterSpec::new(name, count, radius, Point2::new(x, 0.0))
            .with_velocity(Vector2::new(vx, 0.0))
            .with_mode(ClusterMode::Orbit)
            .with_time_step(dt);
        sim.generate_cluster(&spec)?;
    }
    Ok(sim)
}
