//! Polyline sampling of NURBS curves.
//!
//! The sampler builds the knot vector once, then walks the curve's parameter
//! domain in equal steps. At each step the active basis functions are scaled
//! by the control point weights and, unless they already sum to one, divided
//! by their sum before blending the control point positions.

use crate::basis;
use crate::{CurveError, KnotVector, NurbsCurve, Result, SampleParams, SampledPolyline};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

/// Result of a sampling pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    /// The sampled polyline.
    pub polyline: SampledPolyline,

    /// Steps whose rational weight sum was zero. Those points are blended
    /// without normalization and usually mean every active weight was zero.
    pub degenerate_steps: usize,
}

impl SampleReport {
    /// Parameter steps taken, one per sampled point.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.polyline.len()
    }

    /// Check if any step hit a zero weight sum.
    #[must_use]
    pub const fn has_degenerate_steps(&self) -> bool {
        self.degenerate_steps > 0
    }

    /// Consume the report, returning the polyline.
    #[must_use]
    pub fn into_polyline(self) -> SampledPolyline {
        self.polyline
    }
}

impl std::fmt::Display for SampleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sampled {} points ({:.3} length, {} degenerate steps)",
            self.steps(),
            self.polyline.arc_length(),
            self.degenerate_steps
        )
    }
}

/// Samples NURBS curves into polylines.
///
/// # Example
///
/// ```
/// use nurbs_sampler::{ControlPoint, CurveSampler, NurbsCurve};
///
/// let curve = NurbsCurve::clamped(
///     vec![
///         ControlPoint::new(0.0, 0.0, 0.0, 1.0),
///         ControlPoint::new(5.0, 5.0, 0.0, 1.0),
///         ControlPoint::new(10.0, 0.0, 0.0, 1.0),
///     ],
///     3,
/// )
/// .with_resolution(4);
///
/// let sampler = CurveSampler::default();
/// let polyline = sampler.sample(&curve).unwrap();
/// assert_eq!(polyline.len(), 8);
///
/// let mid = sampler.midpoint(&curve).unwrap();
/// assert!(mid.x > 0.0 && mid.x < 10.0);
/// assert!(mid.y > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurveSampler {
    params: SampleParams,
}

impl CurveSampler {
    /// Create a sampler with the given parameters.
    #[must_use]
    pub fn new(params: SampleParams) -> Self {
        Self { params }
    }

    /// The sampler's parameters.
    #[must_use]
    pub fn params(&self) -> &SampleParams {
        &self.params
    }

    /// Samples per segment for `curve`, falling back to the default resolution.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveDefinition`] if the resolved
    /// resolution is 0.
    pub fn resolution(&self, curve: &NurbsCurve) -> Result<usize> {
        match curve.resolution().unwrap_or(self.params.default_resolution) {
            0 => Err(CurveError::invalid_curve("resolution must be positive")),
            resolution => Ok(resolution),
        }
    }

    /// Number of points [`Self::sample`] emits for `curve`.
    ///
    /// This is `resolution × segment_count`, raised to 2 for open curves so
    /// both ends are always emitted.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error.
    pub fn step_count(&self, curve: &NurbsCurve) -> Result<usize> {
        curve.validate()?;
        self.steps_for(curve)
    }

    /// Step count for an already validated curve.
    fn steps_for(&self, curve: &NurbsCurve) -> Result<usize> {
        let steps = self
            .resolution(curve)?
            .checked_mul(curve.segment_count())
            .ok_or_else(|| CurveError::invalid_curve("resolution × segment count overflows"))?;
        Ok(if curve.is_cyclic() { steps } else { steps.max(2) })
    }

    /// Parameter range `(u_start, u_end)` the sampler walks.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error.
    pub fn domain(&self, curve: &NurbsCurve) -> Result<(f64, f64)> {
        let knots = KnotVector::build(curve)?;
        Ok(domain_of(curve, &knots))
    }

    /// Sample `curve` into a polyline.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error; see [`NurbsCurve::validate`].
    pub fn sample(&self, curve: &NurbsCurve) -> Result<SampledPolyline> {
        self.sample_with_report(curve).map(SampleReport::into_polyline)
    }

    /// Sample `curve` and report how many steps had a zero weight sum.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error; see [`NurbsCurve::validate`].
    pub fn sample_with_report(&self, curve: &NurbsCurve) -> Result<SampleReport> {
        let knots = KnotVector::build(curve)?;
        let steps = self.steps_for(curve)?;
        let (u_start, u_end) = domain_of(curve, &knots);

        let divisions = if curve.is_cyclic() { steps } else { steps - 1 };
        let u_step = (u_end - u_start) / divisions as f64;

        debug!(
            points = curve.point_count(),
            order = curve.order(),
            cyclic = curve.is_cyclic(),
            steps = steps,
            u_start = u_start,
            u_end = u_end,
            "Sampling NURBS curve"
        );

        let mut points: Vec<Point3<f64>> = Vec::new();
        points
            .try_reserve_exact(steps)
            .map_err(|_| CurveError::invalid_curve("too many samples to allocate"))?;
        let mut degenerate_steps = 0;

        for k in 0..steps {
            let u = u_start + k as f64 * u_step;
            let blended = blend_at(curve, &knots, u, self.params.weight_epsilon)?;
            if blended.degenerate {
                degenerate_steps += 1;
            }
            points.push(blended.point);
        }

        if degenerate_steps > 0 {
            warn!(
                degenerate_steps = degenerate_steps,
                steps = steps,
                "Zero rational weight sum; points left unnormalized"
            );
        }

        let polyline = SampledPolyline::new(points, curve.is_cyclic());

        debug!(
            points = polyline.len(),
            length = polyline.arc_length(),
            "Sampled NURBS curve"
        );

        Ok(SampleReport {
            polyline,
            degenerate_steps,
        })
    }

    /// Evaluate `curve` at the knot-space parameter `u`.
    ///
    /// `u` is clamped to the knot range; [`Self::domain`] gives the range the
    /// sampler itself walks.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error.
    pub fn point_at(&self, curve: &NurbsCurve, u: f64) -> Result<Point3<f64>> {
        let knots = KnotVector::build(curve)?;
        blend_at(curve, &knots, u, self.params.weight_epsilon).map(|b| b.point)
    }

    /// The sampled point at index `len / 2`.
    ///
    /// # Errors
    ///
    /// Returns the curve's validation error.
    pub fn midpoint(&self, curve: &NurbsCurve) -> Result<Point3<f64>> {
        let polyline = self.sample(curve)?;
        polyline
            .midpoint()
            .copied()
            .ok_or_else(|| CurveError::invalid_curve("curve produced no samples"))
    }
}

/// Sample `curve` with default parameters.
///
/// # Errors
///
/// Returns the curve's validation error.
pub fn sample(curve: &NurbsCurve) -> Result<SampledPolyline> {
    CurveSampler::default().sample(curve)
}

/// Midpoint of `curve` sampled with default parameters.
///
/// # Errors
///
/// Returns the curve's validation error.
pub fn midpoint(curve: &NurbsCurve) -> Result<Point3<f64>> {
    CurveSampler::default().midpoint(curve)
}

fn domain_of(curve: &NurbsCurve, knots: &KnotVector) -> (f64, f64) {
    let pnts = curve.point_count();
    let order = curve.order();
    let u_start = knots[order - 1];
    let u_end = if curve.is_cyclic() {
        knots[pnts + order - 1]
    } else {
        knots[pnts]
    };
    (u_start, u_end)
}

struct Blended {
    point: Point3<f64>,
    degenerate: bool,
}

fn blend_at(curve: &NurbsCurve, knots: &KnotVector, u: f64, epsilon: f64) -> Result<Blended> {
    let window = basis::evaluate(u, curve.order(), curve.basis_count(), knots.as_slice())?;
    let points = curve.points();
    let n = points.len();

    // Closed curves wrap basis index i onto control point i mod n
    let mut contributions: Vec<(usize, f64)> = window
        .iter()
        .map(|(i, b)| (i % n, b * points[i % n].weight))
        .collect();

    let sumdiv: f64 = contributions.iter().map(|&(_, c)| c).sum();
    let degenerate = sumdiv == 0.0;

    if !degenerate && (sumdiv < 1.0 - epsilon || sumdiv > 1.0 + epsilon) {
        for (_, c) in &mut contributions {
            *c /= sumdiv;
        }
    }

    let mut coords = Vector3::zeros();
    for (index, c) in contributions {
        if c != 0.0 {
            coords += points[index].position.coords * c;
        }
    }

    Ok(Blended {
        point: Point3::from(coords),
        degenerate,
    })
}
