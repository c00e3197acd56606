//! Property-based tests for knot construction, basis evaluation and sampling.
//!
//! Run with: cargo test -p nurbs-sampler -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use nurbs_sampler::{
    ControlPoint, CurveSampler, KnotStyle, KnotVector, NurbsCurve, Point3, basis, sample,
};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating random curves
// =============================================================================

/// Generate a control point with a weight that is never zero.
fn arb_control_point() -> impl Strategy<Value = ControlPoint> {
    (prop::array::uniform3(-100.0..100.0f64), 0.01..=1.0f64)
        .prop_map(|([x, y, z], w)| ControlPoint::new(x, y, z, w))
}

/// Generate an open curve with uniform or endpoint knots.
fn arb_open_curve() -> impl Strategy<Value = NurbsCurve> {
    (2usize..=5).prop_flat_map(|order| {
        (
            prop::collection::vec(arb_control_point(), order..=order + 6),
            any::<bool>(),
            1usize..=8,
        )
            .prop_map(move |(points, endpoint, resolution)| {
                NurbsCurve::new(points, order)
                    .with_endpoint(endpoint)
                    .with_resolution(resolution)
            })
    })
}

/// Generate a closed curve; the point count may be below the order.
fn arb_closed_curve() -> impl Strategy<Value = NurbsCurve> {
    (
        2usize..=5,
        prop::collection::vec(arb_control_point(), 2..=8),
        1usize..=6,
    )
        .prop_map(|(order, points, resolution)| {
            NurbsCurve::closed(points, order).with_resolution(resolution)
        })
}

/// Generate an open Bézier-style curve of order 3 or 4.
fn arb_bezier_curve() -> impl Strategy<Value = NurbsCurve> {
    (3usize..=4).prop_flat_map(|order| {
        (
            prop::collection::vec(arb_control_point(), order..=order + 7),
            1usize..=8,
        )
            .prop_map(move |(points, resolution)| {
                NurbsCurve::new(points, order)
                    .with_bezier(true)
                    .with_resolution(resolution)
            })
    })
}

fn arb_curve() -> impl Strategy<Value = NurbsCurve> {
    prop_oneof![arb_open_curve(), arb_closed_curve(), arb_bezier_curve()]
}

fn control_bounds(curve: &NurbsCurve) -> (Point3<f64>, Point3<f64>) {
    let mut min = curve.points()[0].position;
    let mut max = min;
    for cp in curve.points() {
        for axis in 0..3 {
            min[axis] = min[axis].min(cp.position[axis]);
            max[axis] = max[axis].max(cp.position[axis]);
        }
    }
    (min, max)
}

// =============================================================================
// Knot vectors
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every generated knot vector is non-decreasing and correctly sized.
    #[test]
    fn proptest_knots_non_decreasing(curve in arb_curve()) {
        let knots = KnotVector::build(&curve).unwrap();
        prop_assert_eq!(knots.len(), curve.knot_count());
        prop_assert!(knots.is_non_decreasing());
    }

    /// Bézier-style knots are non-decreasing for both supported orders.
    #[test]
    fn proptest_bezier_knots_non_decreasing(curve in arb_bezier_curve()) {
        prop_assert_eq!(curve.knot_style().unwrap(), KnotStyle::Bezier);

        let knots = KnotVector::build(&curve).unwrap();
        prop_assert_eq!(knots.len(), curve.knot_count());
        prop_assert!(knots.is_non_decreasing());
    }

    /// Endpoint knots repeat their boundary values `order` times.
    #[test]
    fn proptest_endpoint_knots_clamped(curve in arb_open_curve()) {
        let curve = curve.with_endpoint(true);
        prop_assert_eq!(curve.knot_style().unwrap(), KnotStyle::Endpoint);

        let knots = KnotVector::build(&curve).unwrap();
        let order = curve.order();
        let k = knots.as_slice();
        let n = k.len();
        prop_assert!(k[..order].iter().all(|&v| v == k[0]));
        prop_assert!(k[n - order..].iter().all(|&v| v == k[n - 1]));
        prop_assert!(k[order] > k[0]);
        prop_assert!(k[n - order - 1] < k[n - 1]);
    }
}

// =============================================================================
// Basis functions
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Basis values sum to one everywhere in the sampled domain.
    #[test]
    fn proptest_partition_of_unity(curve in arb_curve(), f in 0.0..=1.0f64) {
        let knots = KnotVector::build(&curve).unwrap();
        let (u_start, u_end) = CurveSampler::default().domain(&curve).unwrap();
        let u = u_start + f * (u_end - u_start);

        let window = basis::evaluate(u, curve.order(), curve.basis_count(), knots.as_slice())
            .unwrap();
        prop_assert!((window.sum() - 1.0).abs() < 1e-6);
    }

    /// The support window stays inside the basis index range.
    #[test]
    fn proptest_window_bounds(curve in arb_curve(), f in 0.0..=1.0f64) {
        let knots = KnotVector::build(&curve).unwrap();
        let (u_start, u_end) = CurveSampler::default().domain(&curve).unwrap();
        let u = u_start + f * (u_end - u_start);

        let window = basis::evaluate(u, curve.order(), curve.basis_count(), knots.as_slice())
            .unwrap();
        prop_assert!(window.start() <= window.end());
        prop_assert!(window.end() < curve.basis_count());
        prop_assert!(window.len() <= curve.order());
        prop_assert!(window.iter().all(|(_, v)| v > 0.0));
    }
}

// =============================================================================
// Sampling
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Positive weights never produce non-finite points.
    #[test]
    fn proptest_samples_finite(curve in arb_curve()) {
        let sampler = CurveSampler::default();
        let report = sampler.sample_with_report(&curve).unwrap();

        prop_assert_eq!(report.polyline.len(), sampler.step_count(&curve).unwrap());
        prop_assert_eq!(report.degenerate_steps, 0);
        for p in report.polyline.points() {
            prop_assert!(p.coords.iter().all(|c| c.is_finite()));
        }
    }

    /// Samples are convex combinations of the control points.
    #[test]
    fn proptest_samples_inside_control_bounds(curve in arb_curve()) {
        let (min, max) = control_bounds(&curve);
        let polyline = sample(&curve).unwrap();
        for p in polyline.points() {
            for axis in 0..3 {
                prop_assert!(p[axis] >= min[axis] - 1e-3);
                prop_assert!(p[axis] <= max[axis] + 1e-3);
            }
        }
    }

    /// Clamped curves start and end on their end control points.
    #[test]
    fn proptest_endpoint_curves_interpolate_ends(curve in arb_open_curve()) {
        let curve = curve.with_endpoint(true);
        let polyline = sample(&curve).unwrap();
        let first = curve.points()[0].position;
        let last = curve.points()[curve.point_count() - 1].position;

        prop_assert!((*polyline.first().unwrap() - first).norm() < 1e-3);
        prop_assert!((*polyline.last().unwrap() - last).norm() < 1e-3);
    }

    /// Bézier-style curves sample to finite points inside their control hull.
    #[test]
    fn proptest_bezier_curves_sample(curve in arb_bezier_curve()) {
        let sampler = CurveSampler::default();
        let report = sampler.sample_with_report(&curve).unwrap();
        let (min, max) = control_bounds(&curve);

        prop_assert_eq!(report.steps(), sampler.step_count(&curve).unwrap());
        prop_assert_eq!(report.degenerate_steps, 0);
        for p in report.polyline.points() {
            for axis in 0..3 {
                prop_assert!(p[axis].is_finite());
                prop_assert!(p[axis] >= min[axis] - 1e-3);
                prop_assert!(p[axis] <= max[axis] + 1e-3);
            }
        }
    }

    /// Closed curves meet themselves at the ends of the domain.
    #[test]
    fn proptest_closed_curves_periodic(curve in arb_closed_curve()) {
        let sampler = CurveSampler::default();
        let (u_start, u_end) = sampler.domain(&curve).unwrap();
        let start = sampler.point_at(&curve, u_start).unwrap();
        let end = sampler.point_at(&curve, u_end).unwrap();
        prop_assert!((start - end).norm() < 1e-9);
    }

    /// The midpoint is the sample at index `len / 2`.
    #[test]
    fn proptest_midpoint_is_middle_sample(curve in arb_curve()) {
        let sampler = CurveSampler::default();
        let polyline = sampler.sample(&curve).unwrap();
        let mid = sampler.midpoint(&curve).unwrap();
        prop_assert_eq!(mid, polyline[polyline.len() / 2]);
    }
}
