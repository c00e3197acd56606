//! Knot vector construction.
//!
//! Knots are integer-valued and laid out in one of the styles of
//! [`KnotStyle`](crate::KnotStyle). Closed curves start from uniform knots and
//! then have their tail rewritten so the spacing pattern of the head repeats.

use crate::{KnotStyle, NurbsCurve, Result};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-decreasing knot vector of length `order + basis_count`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnotVector {
    knots: Vec<f64>,
}

impl KnotVector {
    /// Build the knot vector of a curve.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error; nothing is built for an invalid
    /// curve.
    ///
    /// # Example
    ///
    /// ```
    /// use nurbs_sampler::{ControlPoint, KnotVector, NurbsCurve};
    ///
    /// let points = (0..4)
    ///     .map(|i| ControlPoint::new(i as f64, 0.0, 0.0, 1.0))
    ///     .collect();
    /// let knots = KnotVector::build(&NurbsCurve::clamped(points, 3)).unwrap();
    ///
    /// assert_eq!(knots.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0]);
    /// ```
    pub fn build(curve: &NurbsCurve) -> Result<Self> {
        curve.validate()?;
        let style = curve.knot_style()?;

        let pnts = curve.point_count();
        let order = curve.order();
        let mut knots = vec![0.0; curve.knot_count()];

        match style {
            KnotStyle::Periodic => {
                uniform_knots(&mut knots[..pnts + order]);
                wrap_cyclic_knots(&mut knots, pnts, order);
            }
            KnotStyle::Uniform => uniform_knots(&mut knots),
            KnotStyle::Endpoint => endpoint_knots(&mut knots, pnts, order),
            KnotStyle::Bezier => bezier_knots(&mut knots, pnts, order),
        }

        debug!(
            style = ?style,
            order = order,
            points = pnts,
            knots = knots.len(),
            "Built knot vector"
        );

        Ok(Self { knots })
    }

    /// The knot values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }

    /// Number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Check if there are no knots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Check that no knot is smaller than its predecessor.
    #[must_use]
    pub fn is_non_decreasing(&self) -> bool {
        self.knots.windows(2).all(|w| w[0] <= w[1])
    }

    /// Multiplicity of the knot at `index`, counting equal neighbours on both sides.
    #[must_use]
    pub fn multiplicity_at(&self, index: usize) -> usize {
        let Some(&value) = self.knots.get(index) else {
            return 0;
        };
        let before = self.knots[..index]
            .iter()
            .rev()
            .take_while(|&&k| k == value)
            .count();
        let after = self.knots[index..]
            .iter()
            .take_while(|&&k| k == value)
            .count();
        before + after
    }
}

impl std::ops::Index<usize> for KnotVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.knots[index]
    }
}

fn uniform_knots(knots: &mut [f64]) {
    for (a, knot) in knots.iter_mut().enumerate() {
        *knot = a as f64;
    }
}

/// Clamped knots: `order` zeros, a unit ramp, then `order` copies of the top.
fn endpoint_knots(knots: &mut [f64], pnts: usize, order: usize) {
    let mut k = 0.0;
    for a in 1..=pnts + order {
        knots[a - 1] = k;
        if a >= order && a <= pnts {
            k += 1.0;
        }
    }
}

fn bezier_knots(knots: &mut [f64], pnts: usize, order: usize) {
    match order {
        4 => {
            for (a, knot) in knots.iter_mut().enumerate().take(pnts + order) {
                *knot = (0.34 + a as f64 / 3.0).floor();
            }
        }
        3 => {
            let mut k = 0.6;
            for (a, knot) in knots.iter_mut().enumerate().take(pnts + order) {
                if a >= order && a <= pnts {
                    k += 0.5;
                }
                *knot = f64::floor(k);
            }
        }
        // Rejected by `NurbsCurve::knot_style`.
        _ => {}
    }
}

/// Rewrite the tail of uniform knots so the head's spacing repeats.
fn wrap_cyclic_knots(knots: &mut [f64], pnts: usize, order: usize) {
    let order2 = order - 1;

    if order > 2 {
        let b = pnts + order2;
        let degenerate = (1..order2).all(|a| knots[b] == knots[b - a]);
        if degenerate {
            knots[pnts + order - 2] += 1.0;
        }
    }

    let mut b = order;
    for a in pnts + order2..pnts + order + order2 {
        knots[a] = knots[a - 1] + (knots[b] - knots[b - 1]);
        b -= 1;
    }
}
