//! NURBS curve definitions.
//!
//! A [`NurbsCurve`] is the read-only input of the sampler: weighted control
//! points, an order, and the flags that select how its knot vector is built.

use crate::{CurveError, Result};
use nalgebra::{Point3, Point4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A control point with a rational weight.
///
/// The position is stored unweighted; `weight` is the homogeneous `w`
/// coordinate. A weight of 1.0 everywhere gives a plain B-spline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    /// Cartesian position.
    pub position: Point3<f64>,
    /// Rational weight.
    pub weight: f64,
}

impl ControlPoint {
    /// Create a control point from coordinates and a weight.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, weight: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            weight,
        }
    }

    /// Create a control point with unit weight.
    #[must_use]
    pub fn unweighted(position: Point3<f64>) -> Self {
        Self {
            position,
            weight: 1.0,
        }
    }

    /// Create a control point from `(x, y, z, w)`, where `xyz` is not
    /// premultiplied by `w`.
    #[must_use]
    pub fn from_homogeneous(co: Point4<f64>) -> Self {
        Self::new(co.x, co.y, co.z, co.w)
    }

    /// The point as `(x, y, z, w)`.
    #[must_use]
    pub fn to_homogeneous(&self) -> Point4<f64> {
        Point4::new(self.position.x, self.position.y, self.position.z, self.weight)
    }

    fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite()) && self.weight.is_finite()
    }
}

/// How the knot vector of a curve is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KnotStyle {
    /// Closed curve; knot spacing wraps around.
    Periodic,
    /// Plain uniform knots, `knot[a] = a`.
    Uniform,
    /// Clamped uniform knots; the curve touches its first and last points.
    Endpoint,
    /// Piecewise-constant knots mimicking Bézier segments (orders 3 and 4).
    Bezier,
}

/// A NURBS curve as authored by the path generator.
///
/// # Example
///
/// ```
/// use nurbs_sampler::{ControlPoint, NurbsCurve};
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
/// assert!(curve.validate().is_ok());
/// assert_eq!(curve.segment_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NurbsCurve {
    points: Vec<ControlPoint>,
    order: usize,
    cyclic: bool,
    endpoint: bool,
    bezier: bool,
    resolution: Option<usize>,
}

impl NurbsCurve {
    /// Create an open curve with uniform knots and no explicit resolution.
    ///
    /// Nothing is checked here; see [`Self::validate`].
    #[must_use]
    pub fn new(points: Vec<ControlPoint>, order: usize) -> Self {
        Self {
            points,
            order,
            cyclic: false,
            endpoint: false,
            bezier: false,
            resolution: None,
        }
    }

    /// Create an open curve with endpoint (clamped) knots.
    #[must_use]
    pub fn clamped(points: Vec<ControlPoint>, order: usize) -> Self {
        Self::new(points, order).with_endpoint(true)
    }

    /// Create a closed curve with periodic knots.
    #[must_use]
    pub fn closed(points: Vec<ControlPoint>, order: usize) -> Self {
        Self::new(points, order).with_cyclic(true)
    }

    /// Create an open curve from unit-weight positions.
    #[must_use]
    pub fn from_positions(positions: impl IntoIterator<Item = Point3<f64>>, order: usize) -> Self {
        Self::new(
            positions.into_iter().map(ControlPoint::unweighted).collect(),
            order,
        )
    }

    /// Set the cyclic flag.
    #[must_use]
    pub fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    /// Set the endpoint flag (ignored for cyclic curves).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: bool) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the bezier flag (ignored for cyclic curves).
    #[must_use]
    pub fn with_bezier(mut self, bezier: bool) -> Self {
        self.bezier = bezier;
        self
    }

    /// Set the number of samples per segment.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Control points.
    #[must_use]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of control points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Order (degree + 1).
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.order.saturating_sub(1)
    }

    /// Whether the curve is closed.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Endpoint flag.
    #[must_use]
    pub fn endpoint(&self) -> bool {
        self.endpoint
    }

    /// Bezier flag.
    #[must_use]
    pub fn bezier(&self) -> bool {
        self.bezier
    }

    /// Samples per segment, if set on the curve.
    #[must_use]
    pub fn resolution(&self) -> Option<usize> {
        self.resolution
    }

    /// Number of segments: one per point when closed, one less when open.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.cyclic {
            self.points.len()
        } else {
            self.points.len().saturating_sub(1)
        }
    }

    /// Number of basis functions, counting the wrapped ones of a closed curve.
    #[must_use]
    pub fn basis_count(&self) -> usize {
        self.points.len() + if self.cyclic { self.degree() } else { 0 }
    }

    /// Length of the knot vector.
    #[must_use]
    pub fn knot_count(&self) -> usize {
        self.order + self.basis_count()
    }

    /// Resolve the knot style from the cyclic, endpoint and bezier flags.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnsupportedKnotStyle`] for the bezier style with
    /// an order other than 3 or 4, or when both endpoint and bezier are set.
    pub fn knot_style(&self) -> Result<KnotStyle> {
        if self.cyclic {
            return Ok(KnotStyle::Periodic);
        }
        match (self.endpoint, self.bezier) {
            (false, false) => Ok(KnotStyle::Uniform),
            (true, false) => Ok(KnotStyle::Endpoint),
            (false, true) if matches!(self.order, 3 | 4) => Ok(KnotStyle::Bezier),
            (endpoint, bezier) => Err(CurveError::unsupported_knot_style(
                endpoint, bezier, self.order,
            )),
        }
    }

    /// Check that a knot vector can be built for this curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveDefinition`] if the order is below 2,
    /// there are fewer than 2 points, an open curve has fewer points than its
    /// order, the resolution is 0, or any coordinate or weight is not finite.
    /// Returns [`CurveError::UnsupportedKnotStyle`] as for [`Self::knot_style`].
    pub fn validate(&self) -> Result<()> {
        let n = self.points.len();

        if self.order < 2 {
            return Err(CurveError::invalid_curve(format!(
                "order {} is below 2",
                self.order
            )));
        }

        if n < 2 {
            return Err(CurveError::invalid_curve(format!(
                "need at least 2 control points, got {n}"
            )));
        }

        if !self.cyclic && n < self.order {
            return Err(CurveError::invalid_curve(format!(
                "open curve of order {} needs at least {} control points, got {}",
                self.order, self.order, n
            )));
        }

        if self.resolution == Some(0) {
            return Err(CurveError::invalid_curve("resolution must be positive"));
        }

        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(CurveError::invalid_curve(format!(
                "control point {index} is not finite"
            )));
        }

        self.knot_style().map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<ControlPoint> {
        (0..n)
            .map(|i| ControlPoint::new(i as f64, 0.0, 0.0, 1.0))
            .collect()
    }

    #[test]
    fn test_homogeneous_conversion() {
        let cp = ControlPoint::from_homogeneous(Point4::new(1.0, 2.0, 3.0, 0.5));
        assert_eq!(cp.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(cp.weight, 0.5);
        assert_eq!(cp.to_homogeneous(), Point4::new(1.0, 2.0, 3.0, 0.5));
    }

    #[test]
    fn test_from_positions_uses_unit_weights() {
        let curve = NurbsCurve::from_positions([Point3::origin(), Point3::new(1.0, 2.0, 3.0)], 2);
        assert_eq!(curve.point_count(), 2);
        assert!(curve.points().iter().all(|p| p.weight == 1.0));
        assert_eq!(curve.knot_style().unwrap(), KnotStyle::Uniform);
        assert_eq!(curve.resolution(), None);
    }

    #[test]
    fn test_counts() {
        let open = NurbsCurve::clamped(points(5), 4);
        assert_eq!(open.segment_count(), 4);
        assert_eq!(open.basis_count(), 5);
        assert_eq!(open.knot_count(), 9);

        let closed = NurbsCurve::closed(points(5), 4);
        assert_eq!(closed.segment_count(), 5);
        assert_eq!(closed.basis_count(), 8);
        assert_eq!(closed.knot_count(), 12);
    }

    #[test]
    fn test_knot_style_selection() {
        assert_eq!(
            NurbsCurve::new(points(4), 4).knot_style().unwrap(),
            KnotStyle::Uniform
        );
        assert_eq!(
            NurbsCurve::clamped(points(4), 4).knot_style().unwrap(),
            KnotStyle::Endpoint
        );
        assert_eq!(
            NurbsCurve::new(points(4), 3)
                .with_bezier(true)
                .knot_style()
                .unwrap(),
            KnotStyle::Bezier
        );
        // Flags are ignored once the curve is closed
        assert_eq!(
            NurbsCurve::closed(points(4), 4)
                .with_endpoint(true)
                .with_bezier(true)
                .knot_style()
                .unwrap(),
            KnotStyle::Periodic
        );
    }

    #[test]
    fn test_bezier_style_rejects_other_orders() {
        let err = NurbsCurve::new(points(6), 5)
            .with_bezier(true)
            .knot_style()
            .unwrap_err();
        assert!(err.is_unsupported_knot_style());
    }

    #[test]
    fn test_endpoint_and_bezier_rejected() {
        let err = NurbsCurve::clamped(points(4), 4)
            .with_bezier(true)
            .validate()
            .unwrap_err();
        assert_eq!(err, CurveError::unsupported_knot_style(true, true, 4));
    }

    #[test]
    fn test_validate_rejects_bad_definitions() {
        assert!(NurbsCurve::clamped(points(3), 1).validate().unwrap_err().is_invalid_curve());
        assert!(NurbsCurve::clamped(points(1), 2).validate().unwrap_err().is_invalid_curve());
        assert!(NurbsCurve::clamped(points(3), 4).validate().unwrap_err().is_invalid_curve());
        assert!(
            NurbsCurve::clamped(points(3), 2)
                .with_resolution(0)
                .validate()
                .unwrap_err()
                .is_invalid_curve()
        );

        let mut bad = points(3);
        bad[1].weight = f64::NAN;
        assert!(NurbsCurve::clamped(bad, 2).validate().unwrap_err().is_invalid_curve());
    }

    #[test]
    fn test_closed_curve_may_have_fewer_points_than_order() {
        assert!(NurbsCurve::closed(points(3), 4).validate().is_ok());
    }
}
