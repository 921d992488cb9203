//! Dense polynomials in one variable

use serde::{Deserialize, Serialize};

/// A polynomial with real coefficients stored lowest degree first
///
/// `coefficients[k]` multiplies `t^k`, so `[b, m]` is the line `b + m·t`.
///
/// # Examples
///
/// ```
/// use quadrature::Polynomial;
///
/// let v = Polynomial::linear(3.0, 2.0); // 3 + 2t
/// assert_eq!(v.eval(4.0), 11.0);
/// assert_eq!(v.degree(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from coefficients, lowest degree first
    ///
    /// An empty coefficient list is the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// The constant function `f(t) = c`
    pub fn constant(c: f64) -> Self {
        Self {
            coefficients: vec![c],
        }
    }

    /// The line `f(t) = intercept + slope·t`
    pub fn linear(intercept: f64, slope: f64) -> Self {
        Self {
            coefficients: vec![intercept, slope],
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Highest power with a non-zero coefficient (0 for constants and zero)
    pub fn degree(&self) -> usize {
        self.coefficients
            .iter()
            .rposition(|&c| c != 0.0)
            .unwrap_or(0)
    }

    /// Evaluates the polynomial at `t` using Horner's scheme
    pub fn eval(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }

    /// Exact antiderivative evaluated between `left` and `right`
    ///
    /// Used as the reference value when checking rule accuracy.
    pub fn definite_integral(&self, left: f64, right: f64) -> f64 {
        let antiderivative = |t: f64| {
            self.coefficients
                .iter()
                .enumerate()
                .rev()
                .fold(0.0, |acc, (k, &c)| acc * t + c / (k as f64 + 1.0))
                * t
        };
        antiderivative(right) - antiderivative(left)
    }
}

impl From<f64> for Polynomial {
    fn from(c: f64) -> Self {
        Polynomial::constant(c)
    }
}
