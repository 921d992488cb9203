use approx::assert_relative_eq;

use crate::polynomial::Polynomial;

#[test]
fn test_constant_evaluates_everywhere() {
    let p = Polynomial::constant(4.5);
    assert_eq!(p.eval(-10.0), 4.5);
    assert_eq!(p.eval(0.0), 4.5);
    assert_eq!(p.eval(1e9), 4.5);
    assert_eq!(p.degree(), 0);
}

#[test]
fn test_linear_horner() {
    let p = Polynomial::linear(-1.0, 0.5);
    assert_eq!(p.eval(0.0), -1.0);
    assert_eq!(p.eval(4.0), 1.0);
    assert_eq!(p.degree(), 1);
}

#[test]
fn test_quadratic_horner() {
    // 1 + 2t + 3t²
    let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
    assert_eq!(p.eval(2.0), 17.0);
    assert_eq!(p.degree(), 2);
}

#[test]
fn test_degree_ignores_trailing_zeros() {
    let p = Polynomial::new(vec![3.0, 0.0, 0.0]);
    assert_eq!(p.degree(), 0);
}

#[test]
fn test_empty_is_zero_polynomial() {
    let p = Polynomial::new(Vec::new());
    assert_eq!(p.eval(12.0), 0.0);
    assert_eq!(p.degree(), 0);
    assert_eq!(p.definite_integral(0.0, 5.0), 0.0);
}

#[test]
fn test_definite_integral_linear() {
    // ∫₂⁵ (3 + 2t) dt = [3t + t²]₂⁵ = 40 - 10
    let p = Polynomial::linear(3.0, 2.0);
    assert_relative_eq!(p.definite_integral(2.0, 5.0), 30.0, epsilon = 1e-12);
}

#[test]
fn test_definite_integral_quadratic() {
    let p = Polynomial::new(vec![0.0, 0.0, 1.0]);
    assert_relative_eq!(p.definite_integral(0.0, 3.0), 9.0, epsilon = 1e-12);
}

#[test]
fn test_from_f64() {
    let p: Polynomial = 2.0.into();
    assert_eq!(p, Polynomial::constant(2.0));
}
