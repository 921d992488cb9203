//! Two generated clusters drifting into each other
//!
//! Bodies that touch merge, conserving mass and momentum. Prints the body
//! count and the conservation error as the clusters pass through.
//!
//! Run with: cargo run --package gravsim --example colliding_clusters

use gravsim::config::SimulationConfig;
use gravsim::presets::colliding_clusters;

fn main() -> gravsim::Result<()> {
    println!("Colliding clusters\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig {
        seed: Some(2024),
        ..Default::default()
    };
    let mut sim = colliding_clusters(config, 40)?;

    let m0 = sim.total_mass();
    let p0 = sim.total_momentum();
    println!("  Clusters: {}", sim.ensembles.len());
    println!("  Bodies: {}", sim.body_count());
    println!("  Total mass: {:.4e} kg", m0);

    let mut merges = 0;
    let mut escaped = 0;
    for block in 1..=20 {
        let report = sim.run(500);
        merges += report.merges();
        escaped += report.escaped.len();
        println!(
            "  t={:>8.1} days  bodies={:>3}  merges={:>3}  escaped={:>3}",
            sim.time / 86_400.0,
            sim.body_count(),
            merges,
            escaped
        );
        if block % 5 == 0 {
            if let Some(com) = sim.center_of_mass() {
                println!("    center of mass: ({:.3e}, {:.3e}) m", com.x, com.y);
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    let lost = sim.total_mass() - m0;
    println!("Mass change: {:.3e} kg (escapees only)", lost);
    println!(
        "Momentum change: {:.3e} kg·m/s",
        (sim.total_momentum() - p0).magnitude()
    );
    Ok(())
}
