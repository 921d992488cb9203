use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::force::{Force, net_force};

#[test]
fn test_components_follow_angle() {
    let f = Force::new(2.0, 90.0, "up");
    assert_relative_eq!(f.x(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(f.y(), 2.0, epsilon = 1e-12);

    let g = Force::new(1.0, 225.0, "diagonal");
    assert_relative_eq!(g.x(), -0.5_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(g.y(), -0.5_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn test_from_components() {
    let f = Force::from_components(Vector2::new(3.0, 4.0), "pull");
    assert_relative_eq!(f.magnitude, 5.0, epsilon = 1e-12);
    assert_relative_eq!(f.angle, 4.0_f64.atan2(3.0).to_degrees(), epsilon = 1e-12);
    assert_eq!(f.label, "pull");
}

#[test]
fn test_negative_magnitude_points_backwards() {
    let f = Force::new(-3.0, 0.0, "push");
    assert_relative_eq!(f.x(), -3.0, epsilon = 1e-12);
}

#[test]
fn test_opposing_forces_cancel() {
    let forces = vec![Force::new(1.0, 0.0, "east"), Force::new(1.0, 180.0, "west")];
    let net = net_force(&forces);
    assert_relative_eq!(net.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(net.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_non_finite_components_contribute_nothing() {
    let forces = vec![
        Force::new(2.0, 0.0, "finite"),
        Force::new(f64::INFINITY, 0.0, "blown up"),
        Force::new(f64::NAN, 45.0, "undefined"),
    ];
    let net = net_force(&forces);
    assert_relative_eq!(net.x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(net.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_empty_force_list_is_zero() {
    assert_eq!(net_force(&[]), Vector2::zeros());
}
