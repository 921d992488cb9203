//! Earth around the Sun, once with each integration path
//!
//! Runs one orbital period per path and reports how far the orbit drifted
//! and how well energy held.
//!
//! Run with: cargo run --package gravsim --example two_body_orbit

use gravsim::config::{IntegrationKind, SimulationConfig};
use gravsim::presets::sun_earth;
use units::{Length, Mass, circular_orbital_period};

fn main() -> gravsim::Result<()> {
    println!("Two-body orbit: Sun and Earth\n");
    println!("{}", "=".repeat(60));

    let base = SimulationConfig {
        seed: Some(7),
        ..Default::default()
    };
    let period = circular_orbital_period(
        base.gravitational_constant,
        Mass::from_solar_masses(1.0),
        Length::from_earth_orbits(1.0),
    );
    let steps = (period.to_seconds() / base.time_step).round() as usize;

    println!("  Orbital period: {:.2} days", period.to_days());
    println!("  Time step: {:.0} s ({} steps/orbit)", base.time_step, steps);
    println!();

    let kinds = [
        IntegrationKind::Euler,
        IntegrationKind::Left,
        IntegrationKind::Right,
        IntegrationKind::Midpoint,
        IntegrationKind::Trapezoid,
        IntegrationKind::Simpson,
        IntegrationKind::Minimum,
        IntegrationKind::Maximum,
        IntegrationKind::Random,
    ];

    for kind in kinds {
        let config = SimulationConfig {
            integration: kind,
            ..base.clone()
        };
        let (mut sim, sun, earth) = sun_earth(config)?;

        let distance = |sim: &gravsim::Simulation| {
            match (sim.find(sun), sim.find(earth)) {
                (Some(s), Some(e)) => s.distance_to(e),
                _ => f64::NAN,
            }
        };
        let r0 = distance(&sim);
        let e0 = sim.kinetic_energy() + sim.potential_energy();

        sim.run(steps);

        let r1 = distance(&sim);
        let e1 = sim.kinetic_energy() + sim.potential_energy();
        println!(
            "  {:<10} Δr={:.2e}  ΔE={:.2e}",
            format!("{kind:?}").to_lowercase(),
            ((r1 - r0) / r0).abs(),
            ((e1 - e0) / e0).abs()
        );
    }

    println!("\n{}", "=".repeat(60));
    Ok(())
}
