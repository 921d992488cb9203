use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::Body;
use crate::config::SimulationConfig;
use crate::ensemble::Ensemble;
use crate::forces::{ForceSet, Gravity, accumulate, accumulate_forces, potential_energy};

fn body_at(x: f64, y: f64, mass: f64) -> Body {
    Body::new(Point2::new(x, y), Vector2::zeros(), mass, 1.0).unwrap()
}

fn unit_gravity() -> ForceSet {
    ForceSet::new().with_law(Gravity::new(1.0))
}

#[test]
fn test_two_unit_masses() {
    let mut bodies = vec![body_at(0.0, 0.0, 1.0), body_at(1.0, 0.0, 1.0)];
    accumulate(&mut bodies, &[], &unit_gravity());

    assert_eq!(bodies[0].forces.len(), 1);
    assert_relative_eq!(bodies[0].forces[0].magnitude, 1.0);
    assert_relative_eq!(bodies[0].forces[0].angle, 0.0);
    assert_relative_eq!(bodies[1].forces[0].magnitude, 1.0);
    assert_relative_eq!(bodies[1].forces[0].angle, 180.0, epsilon = 1e-12);

    assert_relative_eq!(bodies[0].acceleration.x, 1.0);
    assert_relative_eq!(bodies[1].acceleration.x, -1.0, epsilon = 1e-12);
}

#[test]
fn test_other_groups_act_but_are_not_updated() {
    let mut bodies = vec![body_at(0.0, 0.0, 1.0)];
    let others = vec![body_at(2.0, 0.0, 4.0)];
    accumulate(&mut bodies, &[others.as_slice()], &unit_gravity());

    assert_relative_eq!(bodies[0].acceleration.x, 1.0);
    assert!(others[0].forces.is_empty());
}

#[test]
fn test_coincident_pair_contributes_nothing() {
    let mut bodies = vec![
        body_at(0.0, 0.0, 1.0),
        body_at(0.0, 0.0, 1.0),
        body_at(0.0, 2.0, 4.0),
    ];
    accumulate(&mut bodies, &[], &unit_gravity());

    assert_eq!(bodies[0].forces.len(), 1);
    assert_relative_eq!(bodies[0].acceleration.y, 1.0);
    assert!(bodies[0].acceleration.x.abs() < 1e-12);
}

#[test]
fn test_forces_rebuilt_each_call() {
    let mut bodies = vec![body_at(0.0, 0.0, 1.0), body_at(1.0, 0.0, 1.0)];
    let laws = unit_gravity();
    accumulate(&mut bodies, &[], &laws);
    accumulate(&mut bodies, &[], &laws);
    assert_eq!(bodies[0].forces.len(), 1);
}

#[test]
fn test_massless_body_is_not_accelerated() {
    let mut bodies = vec![Body::placeholder(Point2::new(0.0, 0.0)), body_at(1.0, 0.0, 1.0)];
    accumulate(&mut bodies, &[], &unit_gravity());

    assert!(bodies[0].forces.is_empty());
    assert_eq!(bodies[0].acceleration, Vector2::zeros());
    // A zero-mass source exerts zero force
    assert_relative_eq!(bodies[1].acceleration.x, 0.0);
}

#[test]
fn test_accumulate_across_ensembles() {
    let mut left = Ensemble::new("left", Point2::origin(), 1.0);
    left.push(body_at(0.0, 0.0, 1.0));
    let mut right = Ensemble::new("right", Point2::new(3.0, 0.0), 1.0);
    right.push(body_at(1.0, 0.0, 1.0));
    right.push(body_at(-1.0, 0.0, 1.0));
    let mut ensembles = vec![left, right];

    accumulate_forces(&mut ensembles, &unit_gravity());

    // Pulled equally both ways
    assert_eq!(ensembles[0].bodies[0].forces.len(), 2);
    assert!(ensembles[0].bodies[0].acceleration.x.abs() < 1e-12);
    // 1/1² toward the origin plus 1/2² toward the far body
    assert_relative_eq!(ensembles[1].bodies[0].acceleration.x, -1.25, epsilon = 1e-12);
    assert_relative_eq!(ensembles[1].bodies[1].acceleration.x, 1.25, epsilon = 1e-12);
}

#[test]
fn test_from_config_adds_electrostatics_when_enabled() {
    let mut config = SimulationConfig::default();
    assert_eq!(ForceSet::from_config(&config).len(), 1);

    config.electrostatics = true;
    assert_eq!(ForceSet::from_config(&config).len(), 2);
}

#[test]
fn test_default_set_is_gravity() {
    let laws = ForceSet::default();
    assert_eq!(laws.len(), 1);
    assert!(ForceSet::new().is_empty());
}

#[test]
fn test_potential_energy_counts_pairs_once() {
    let mut group = Ensemble::new("trio", Point2::origin(), 1.0);
    group.push(body_at(0.0, 0.0, 1.0));
    group.push(body_at(1.0, 0.0, 1.0));
    group.push(body_at(0.0, 2.0, 2.0));

    // -(1·1/1 + 1·2/2 + 1·2/√5)
    let expected = -(1.0 + 1.0 + 2.0 / 5.0_f64.sqrt());
    assert_relative_eq!(potential_energy(&[group], &unit_gravity()), expected, epsilon = 1e-12);
}
