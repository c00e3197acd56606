//! Random camera-path generation.
//!
//! Paths are grown outward from the origin: point `i` is drawn uniformly from
//! the unit cube and scaled by `i`, so later points tend to lie further away
//! and the moving object travels across the frame.

use crate::{ControlPoint, NurbsCurve, Result};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`random_path`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomPathParams {
    /// Number of control points. Default: 5
    pub num_points: usize,

    /// Scale applied on top of the per-index growth. Default: 1.0
    pub spread: f64,

    /// Curve order. Default: 2 (straight segments between points)
    pub order: usize,

    /// Samples per segment, or `None` for the sampler's default.
    pub resolution: Option<usize>,

    /// Close the path into a loop. Default: false
    pub cyclic: bool,
}

impl Default for RandomPathParams {
    fn default() -> Self {
        Self {
            num_points: 5,
            spread: 1.0,
            order: 2,
            resolution: None,
            cyclic: false,
        }
    }
}

impl RandomPathParams {
    /// Set the number of control points.
    #[must_use]
    pub const fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Set the spread.
    #[must_use]
    pub const fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Set the curve order.
    #[must_use]
    pub const fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the samples per segment.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Set whether the path is closed.
    #[must_use]
    pub const fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }
}

/// Generate a random path with unit weights and endpoint knots.
///
/// # Errors
///
/// Returns the validation error of the generated curve, e.g. when
/// `num_points` is smaller than `order`.
///
/// # Example
///
/// ```
/// use nurbs_sampler::{RandomPathParams, midpoint, random_path};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let path = random_path(&mut rng, &RandomPathParams::default()).unwrap();
/// assert_eq!(path.point_count(), 5);
///
/// let mid = midpoint(&path).unwrap();
/// assert!(mid.coords.iter().all(|c| c.is_finite()));
/// ```
pub fn random_path<R: Rng>(rng: &mut R, params: &RandomPathParams) -> Result<NurbsCurve> {
    let points: Vec<ControlPoint> = (0..params.num_points)
        .map(|i| {
            let scale = i as f64 * params.spread;
            ControlPoint::unweighted(Point3::new(
                rng.gen_range(0.0..1.0) * scale,
                rng.gen_range(0.0..1.0) * scale,
                rng.gen_range(0.0..1.0) * scale,
            ))
        })
        .collect();

    let mut curve = NurbsCurve::clamped(points, params.order).with_cyclic(params.cyclic);
    if let Some(resolution) = params.resolution {
        curve = curve.with_resolution(resolution);
    }
    curve.validate()?;

    debug!(
        points = curve.point_count(),
        order = curve.order(),
        cyclic = curve.is_cyclic(),
        "Generated random path"
    );

    Ok(curve)
}

/// Generate a random path from a seed; the same seed gives the same path.
///
/// # Errors
///
/// See [`random_path`].
pub fn random_path_seeded(seed: u64, params: &RandomPathParams) -> Result<NurbsCurve> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_path(&mut rng, params)
}
