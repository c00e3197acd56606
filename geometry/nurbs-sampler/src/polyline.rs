//! Sampled polylines.
//!
//! A [`SampledPolyline`] is the dense approximation a sampler produces for a
//! curve: one point per parameter step, in parameter order.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered points sampled from a curve.
///
/// Arc lengths are measured along the emitted points only. For a closed
/// curve the segment from the last point back to the first is not included;
/// see [`Self::closing_length`].
///
/// # Example
///
/// ```
/// use nurbs_sampler::SampledPolyline;
/// use nalgebra::Point3;
///
/// let polyline = SampledPolyline::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///     ],
///     false,
/// );
///
/// assert!((polyline.arc_length() - 2.0).abs() < 1e-10);
/// assert_eq!(polyline.midpoint(), Some(&Point3::new(1.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampledPolyline {
    points: Vec<Point3<f64>>,
    /// Cumulative arc lengths at each point (precomputed).
    cumulative_lengths: Vec<f64>,
    closed: bool,
}

impl SampledPolyline {
    /// Create a polyline from sampled points.
    #[must_use]
    pub fn new(points: Vec<Point3<f64>>, closed: bool) -> Self {
        let cumulative_lengths = compute_cumulative_lengths(&points);
        Self {
            points,
            cumulative_lengths,
            closed,
        }
    }

    /// The sampled points.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consume the polyline, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the source curve was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get a point by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Point3<f64>> {
        self.points.get(index)
    }

    /// First point.
    #[must_use]
    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Last point.
    #[must_use]
    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// The point at index `len / 2`.
    #[must_use]
    pub fn midpoint(&self) -> Option<&Point3<f64>> {
        self.points.get(self.points.len() / 2)
    }

    /// Cumulative arc length at each point, starting at 0.
    #[must_use]
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative_lengths
    }

    /// Total length along the points.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.cumulative_lengths.last().copied().unwrap_or(0.0)
    }

    /// Distance from the last point back to the first, for closed curves.
    #[must_use]
    pub fn closing_length(&self) -> f64 {
        match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => (first - last).norm(),
            _ => 0.0,
        }
    }

    /// Point at arc length `s` along the polyline, clamped to its ends.
    #[must_use]
    pub fn point_at_length(&self, s: f64) -> Option<Point3<f64>> {
        let first = *self.points.first()?;
        let total = self.arc_length();
        if s <= 0.0 || self.points.len() == 1 {
            return Some(first);
        }
        if s >= total {
            return self.points.last().copied();
        }

        // First cumulative length >= s
        let hi = self.cumulative_lengths.partition_point(|&l| l < s);
        let seg_idx = hi.saturating_sub(1);
        let seg_start = self.cumulative_lengths[seg_idx];
        let seg_len = self.cumulative_lengths[seg_idx + 1] - seg_start;

        let local_t = if seg_len > 1e-10 {
            (s - seg_start) / seg_len
        } else {
            0.0
        };

        let p0 = self.points[seg_idx];
        let p1 = self.points[seg_idx + 1];
        Some(p0 + (p1 - p0) * local_t)
    }

    /// Axis-aligned bounds as `(min, max)`.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;

        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some((min, max))
    }
}

impl std::ops::Index<usize> for SampledPolyline {
    type Output = Point3<f64>;

    fn index(&self, index: usize) -> &Point3<f64> {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a SampledPolyline {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn compute_cumulative_lengths(points: &[Point3<f64>]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;

    if !points.is_empty() {
        cumulative.push(0.0);
    }
    for pair in points.windows(2) {
        total += (pair[1] - pair[0]).norm();
        cumulative.push(total);
    }

    cumulative
}
