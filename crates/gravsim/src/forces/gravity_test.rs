use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::Body;
use crate::forces::{Gravity, PairForce};

fn body_at(x: f64, y: f64, mass: f64) -> Body {
    Body::new(Point2::new(x, y), Vector2::zeros(), mass, 1.0).unwrap()
}

#[test]
fn test_unit_pair() {
    let a = body_at(0.0, 0.0, 1.0);
    let b = body_at(1.0, 0.0, 1.0);
    let gravity = Gravity::new(1.0);

    let on_a = gravity.force(&a, &b).unwrap();
    let on_b = gravity.force(&b, &a).unwrap();

    assert_relative_eq!(on_a.magnitude, 1.0);
    assert_relative_eq!(on_a.angle, 0.0);
    assert_relative_eq!(on_b.magnitude, 1.0);
    assert_relative_eq!(on_b.angle, 180.0, epsilon = 1e-12);
}

#[test]
fn test_symmetric_and_antiparallel() {
    let a = body_at(1.0e9, 2.0e9, 3.0e20);
    let b = body_at(-4.0e9, 7.0e9, 5.0e22);
    let gravity = Gravity::default();

    let on_a = gravity.force(&a, &b).unwrap();
    let on_b = gravity.force(&b, &a).unwrap();

    assert_relative_eq!(on_a.magnitude, on_b.magnitude, max_relative = 1e-12);
    assert_relative_eq!((on_a.angle - on_b.angle).abs(), 180.0, epsilon = 1e-9);

    let sum = on_a.components() + on_b.components();
    assert!(sum.magnitude() <= 1e-12 * on_a.magnitude);
}

#[test]
fn test_inverse_square() {
    let gravity = Gravity::new(1.0);
    let a = body_at(0.0, 0.0, 2.0);
    let near = body_at(0.0, 2.0, 3.0);
    let far = body_at(0.0, 4.0, 3.0);

    let f_near = gravity.force(&a, &near).unwrap().magnitude;
    let f_far = gravity.force(&a, &far).unwrap().magnitude;

    assert_relative_eq!(f_near, 1.5);
    assert_relative_eq!(f_near / f_far, 4.0);
}

#[test]
fn test_coincident_pair_is_skipped() {
    let a = body_at(5.0, 5.0, 1.0);
    let b = body_at(5.0, 5.0, 1.0);
    assert!(Gravity::new(1.0).force(&a, &b).is_none());
}

#[test]
fn test_potential_energy() {
    let a = body_at(0.0, 0.0, 2.0);
    let b = body_at(0.0, 4.0, 3.0);
    assert_relative_eq!(Gravity::new(1.0).potential_energy(&a, &b), -1.5);
    assert_eq!(Gravity::new(1.0).potential_energy(&a, &a.clone()), 0.0);
}
