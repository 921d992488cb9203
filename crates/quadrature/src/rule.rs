use crate::polynomial::Polynomial;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of sub-steps walked by the minimum and maximum rules
pub const DEFAULT_SAMPLES: usize = 200;

/// Configuration tag naming one of the eight rules
///
/// `RuleKind` carries no per-rule data, so it can live in configuration
/// files. Turn it into a usable [`QuadratureRule`] with
/// [`QuadratureRule::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Left,
    Right,
    Midpoint,
    Trapezoid,
    Simpson,
    Minimum,
    Maximum,
    Random,
}

impl RuleKind {
    pub const ALL: [RuleKind; 8] = [
        RuleKind::Left,
        RuleKind::Right,
        RuleKind::Midpoint,
        RuleKind::Trapezoid,
        RuleKind::Simpson,
        RuleKind::Minimum,
        RuleKind::Maximum,
        RuleKind::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Left => "left",
            RuleKind::Right => "right",
            RuleKind::Midpoint => "midpoint",
            RuleKind::Trapezoid => "trapezoid",
            RuleKind::Simpson => "simpson",
            RuleKind::Minimum => "minimum",
            RuleKind::Maximum => "maximum",
            RuleKind::Random => "random",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strategy approximating the definite integral of a polynomial over one
/// sub-interval
///
/// Every variant answers the same question through [`slice`](Self::slice).
/// The endpoint, midpoint, trapezoid and Simpson rules are exact for
/// polynomials of degree one or less. Minimum and maximum use the sampled
/// extremum as the rectangle height, and the random rule evaluates at a
/// fixed fractional offset drawn once when the rule is built.
///
/// # Examples
///
/// ```
/// use quadrature::{Polynomial, QuadratureRule};
///
/// let velocity = Polynomial::linear(10.0, -2.0);
/// let distance = QuadratureRule::Trapezoid.slice(&velocity, 0.0, 3.0);
/// assert_eq!(distance, 21.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "lowercase")]
pub enum QuadratureRule {
    Left,
    Right,
    Midpoint,
    Trapezoid,
    Simpson,
    Minimum { samples: usize },
    Maximum { samples: usize },
    Random { offset: f64 },
}

impl QuadratureRule {
    /// Builds a rule from its configuration tag
    ///
    /// The random rule draws its offset from `rng` here and keeps it for
    /// every later slice. The other rules ignore `rng`.
    pub fn build<R: Rng + ?Sized>(kind: RuleKind, rng: &mut R) -> Self {
        match kind {
            RuleKind::Left => QuadratureRule::Left,
            RuleKind::Right => QuadratureRule::Right,
            RuleKind::Midpoint => QuadratureRule::Midpoint,
            RuleKind::Trapezoid => QuadratureRule::Trapezoid,
            RuleKind::Simpson => QuadratureRule::Simpson,
            RuleKind::Minimum => QuadratureRule::Minimum {
                samples: DEFAULT_SAMPLES,
            },
            RuleKind::Maximum => QuadratureRule::Maximum {
                samples: DEFAULT_SAMPLES,
            },
            RuleKind::Random => QuadratureRule::Random {
                offset: rng.random::<f64>(),
            },
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            QuadratureRule::Left => RuleKind::Left,
            QuadratureRule::Right => RuleKind::Right,
            QuadratureRule::Midpoint => RuleKind::Midpoint,
            QuadratureRule::Trapezoid => RuleKind::Trapezoid,
            QuadratureRule::Simpson => RuleKind::Simpson,
            QuadratureRule::Minimum { .. } => RuleKind::Minimum,
            QuadratureRule::Maximum { .. } => RuleKind::Maximum,
            QuadratureRule::Random { .. } => RuleKind::Random,
        }
    }

    /// Approximates the integral of `poly` over `[left, right]`
    ///
    /// # Arguments
    /// * `poly` - Integrand
    /// * `left` - Lower bound of the slice
    /// * `right` - Upper bound of the slice
    ///
    /// # Returns
    /// Signed area estimate; a reversed interval yields the negated value
    /// for the endpoint-symmetric rules
    pub fn slice(&self, poly: &Polynomial, left: f64, right: f64) -> f64 {
        let width = right - left;
        match *self {
            QuadratureRule::Left => width * poly.eval(left),
            QuadratureRule::Right => width * poly.eval(right),
            QuadratureRule::Midpoint => width * poly.eval(left + width / 2.0),
            QuadratureRule::Trapezoid => width * (poly.eval(left) + poly.eval(right)) / 2.0,
            QuadratureRule::Simpson => {
                let mid = QuadratureRule::Midpoint.slice(poly, left, right);
                let trap = QuadratureRule::Trapezoid.slice(poly, left, right);
                (2.0 * mid + trap) / 3.0
            }
            QuadratureRule::Minimum { samples } => {
                width * sample_extremum(poly, left, right, samples, f64::min)
            }
            QuadratureRule::Maximum { samples } => {
                width * sample_extremum(poly, left, right, samples, f64::max)
            }
            QuadratureRule::Random { offset } => width * poly.eval(left + width * offset),
        }
    }

    /// Composite sum of `subintervals` equal slices across `[left, right]`
    ///
    /// Zero subintervals yields 0.
    pub fn sum(&self, poly: &Polynomial, left: f64, right: f64, subintervals: usize) -> f64 {
        if subintervals == 0 {
            return 0.0;
        }
        let width = (right - left) / subintervals as f64;
        (0..subintervals)
            .map(|i| {
                let start = left + width * i as f64;
                self.slice(poly, start, start + width)
            })
            .sum()
    }
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadratureRule::Random { offset } => write!(f, "random({offset:.3})"),
            other => f.write_str(other.kind().name()),
        }
    }
}

// Walks both endpoints and every sub-step in between.
fn sample_extremum(
    poly: &Polynomial,
    left: f64,
    right: f64,
    samples: usize,
    pick: fn(f64, f64) -> f64,
) -> f64 {
    let samples = samples.max(1);
    let step = (right - left) / samples as f64;
    (1..=samples)
        .map(|i| poly.eval(left + step * i as f64))
        .fold(poly.eval(left), pick)
}
