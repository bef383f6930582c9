//! Membership shape evaluation
//!
//! Provides the two piecewise-linear shapes used by every fuzzy term:
//! - Triangular `(a, b, c)`: 0 at `a`, peak 1 at `b`, 0 at `c`
//! - Trapezoidal `(a, b, c, d)`: 0 at `a`, 1 across `[b, c]`, 0 at `d`
//!
//! Evaluation is total: any `f64` input yields a degree in `[0.0, 1.0]`.
//! Parameter ordering is checked once by [`MembershipShape::validate`] when a
//! rule table is loaded, never during evaluation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Piecewise-linear membership function
///
/// Serialized in rule tables as `{ triangular = [a, b, c] }` or
/// `{ trapezoidal = [a, b, c, d] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipShape {
    /// Triangle with feet at `a` and `c` and peak at `b`
    Triangular([f64; 3]),

    /// Trapezoid with feet at `a` and `d` and plateau `[b, c]`
    ///
    /// `a == b` (or `c == d`) gives a shoulder: the plateau starts (ends)
    /// with an immediate step instead of a ramp.
    Trapezoidal([f64; 4]),
}

impl MembershipShape {
    /// Calculate the membership degree of `x`
    ///
    /// Core points are checked before the feet, so `x == b` on a triangle is
    /// exactly 1.0 and a zero-width ramp never divides by zero.
    ///
    /// # Arguments
    /// * `x` - Value on the evaluation domain (already rescaled)
    ///
    /// # Returns
    /// Degree in `[0.0, 1.0]`; NaN evaluates to 0.0
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }

        let degree = match *self {
            MembershipShape::Triangular([a, b, c]) => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    rise(x, a, b)
                } else {
                    fall(x, b, c)
                }
            }
            MembershipShape::Trapezoidal([a, b, c, d]) => {
                if x >= b && x <= c {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    rise(x, a, b)
                } else {
                    fall(x, c, d)
                }
            }
        };

        degree.clamp(0.0, 1.0)
    }

    /// Check that parameters are finite and in non-decreasing order
    pub fn validate(&self) -> Result<()> {
        let points = self.points();

        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(Error::Config(format!(
                "{} shape has non-finite parameter {}",
                self.kind_name(),
                p
            )));
        }

        if points.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::Config(format!(
                "{} parameters must be non-decreasing, got {}",
                self.kind_name(),
                self
            )));
        }

        Ok(())
    }

    /// Closed interval outside which the degree is always 0
    pub fn support(&self) -> (f64, f64) {
        match *self {
            MembershipShape::Triangular([a, _, c]) => (a, c),
            MembershipShape::Trapezoidal([a, _, _, d]) => (a, d),
        }
    }

    /// Shape parameters in declaration order
    pub fn points(&self) -> Vec<f64> {
        match *self {
            MembershipShape::Triangular([a, b, c]) => vec![a, b, c],
            MembershipShape::Trapezoidal([a, b, c, d]) => vec![a, b, c, d],
        }
    }

    /// Shape kind as written in rule tables
    pub fn kind_name(&self) -> &'static str {
        match self {
            MembershipShape::Triangular(_) => "triangular",
            MembershipShape::Trapezoidal(_) => "trapezoidal",
        }
    }
}

impl std::fmt::Display for MembershipShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let points: Vec<String> = self.points().iter().map(|p| p.to_string()).collect();
        write!(f, "{}({})", self.kind_name(), points.join(", "))
    }
}

/// Rising edge from 0 at `from` to 1 at `to`; zero width is a step
fn rise(x: f64, from: f64, to: f64) -> f64 {
    let width = to - from;
    if width <= 0.0 {
        return 1.0;
    }
    (x - from) / width
}

/// Falling edge from 1 at `from` to 0 at `to`; zero width is a step
fn fall(x: f64, from: f64, to: f64) -> f64 {
    let width = to - from;
    if width <= 0.0 {
        return 0.0;
    }
    (to - x) / width
}
