//! B-spline basis evaluation.
//!
//! Basis functions are computed with the Cox–de Boor recursion, starting from
//! the single degree-0 function whose knot interval contains the parameter and
//! raising the degree in place. Values are indexed in knot space, so index `i`
//! belongs to control point `i` (modulo the point count for closed curves).

use crate::{CurveError, Result};

/// Basis functions that are nonzero at one parameter value.
///
/// Only indices in `start..=end` carry support; every other entry of
/// [`Self::values`] is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisWindow {
    start: usize,
    end: usize,
    parameter: f64,
    values: Vec<f64>,
}

impl BasisWindow {
    /// First index with a positive basis value.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last index with a positive basis value.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Parameter the window was evaluated at, after clamping to the knot range.
    #[must_use]
    pub fn parameter(&self) -> f64 {
        self.parameter
    }

    /// All basis values, indexed like the knot vector.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Basis value at `index`, zero outside the window.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Number of indices in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a window holds at least one index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(index, value)` pairs of the window, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        (self.start..=self.end).map(move |i| (i, self.values[i]))
    }

    /// Sum of the basis values in the window.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values[self.start..=self.end].iter().sum()
    }
}

/// Evaluate the basis functions of order `order` at parameter `t`.
///
/// `point_count` is the number of basis functions, which for a closed curve
/// includes the `order - 1` wrapped ones. Only the first `order + point_count`
/// entries of `knots` are read. `t` is clamped to the knot range.
///
/// # Errors
///
/// Returns [`CurveError::InvalidKnotVector`] if `order` or `point_count` is 0
/// or `knots` is too short, and [`CurveError::EmptySupport`] if no basis
/// function is positive at `t` (all knots equal, or `t` is NaN).
///
/// # Example
///
/// ```
/// use nurbs_sampler::basis;
///
/// // Quadratic Bézier knots
/// let knots = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
/// let window = basis::evaluate(0.5, 3, 3, &knots).unwrap();
///
/// assert_eq!((window.start(), window.end()), (0, 2));
/// assert!((window.value(1) - 0.5).abs() < 1e-12);
/// assert!((window.sum() - 1.0).abs() < 1e-12);
/// ```
pub fn evaluate(t: f64, order: usize, point_count: usize, knots: &[f64]) -> Result<BasisWindow> {
    if order == 0 || point_count == 0 {
        return Err(CurveError::invalid_knot_vector(format!(
            "order ({order}) and point count ({point_count}) must be positive"
        )));
    }

    let order_plus_points = order + point_count;
    if knots.len() < order_plus_points {
        return Err(CurveError::invalid_knot_vector(format!(
            "expected at least {} knots, got {}",
            order_plus_points,
            knots.len()
        )));
    }

    let knots = &knots[..order_plus_points];
    let last = order_plus_points - 1;

    // Float drift at the ends of the domain
    let t = if t < knots[0] {
        knots[0]
    } else if t > knots[last] {
        knots[last]
    } else {
        t
    };

    let mut basis = vec![0.0; order_plus_points];
    let mut lo = 0;
    let mut hi = 0;

    // Order 1: the first non-empty interval containing t
    if let Some(i) =
        (0..last).find(|&i| knots[i] != knots[i + 1] && t >= knots[i] && t <= knots[i + 1])
    {
        basis[i] = 1.0;
        lo = i.saturating_sub(order + 1);
        hi = i;
    }

    // Orders 2..=order, in place; basis[i + 1] is still the lower-order value
    for j in 2..=order {
        if hi + j >= order_plus_points {
            hi = last - j;
        }

        for i in lo..=hi {
            let left = if basis[i] == 0.0 {
                0.0
            } else {
                blend(t - knots[i], basis[i], knots[i + j - 1] - knots[i])
            };

            let right = if basis[i + 1] == 0.0 {
                0.0
            } else {
                blend(knots[i + j] - t, basis[i + 1], knots[i + j] - knots[i + 1])
            };

            basis[i] = left + right;
        }
    }

    let mut support: Option<(usize, usize)> = None;
    for i in lo..=hi {
        if basis[i] > 0.0 {
            support = Some(support.map_or((i, i), |(start, _)| (start, i)));
        }
    }

    let (start, end) = support.ok_or(CurveError::EmptySupport { parameter: t })?;

    // Clear values left over from lower orders outside the support
    for (i, value) in basis.iter_mut().enumerate() {
        if i < start || i > end {
            *value = 0.0;
        }
    }

    Ok(BasisWindow {
        start,
        end,
        parameter: t,
        values: basis,
    })
}

/// One Cox–de Boor term; a zero-width span contributes nothing.
fn blend(distance: f64, value: f64, span: f64) -> f64 {
    if span > 0.0 {
        distance * value / span
    } else {
        0.0
    }
}
