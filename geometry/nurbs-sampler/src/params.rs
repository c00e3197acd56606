//! Parameters for curve sampling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`CurveSampler`](crate::CurveSampler).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleParams {
    /// Samples per segment for curves without their own resolution. Default: 12
    pub default_resolution: usize,

    /// How far the rational weight sum may stray from 1 before the blend is
    /// renormalized. Default: 1e-6
    pub weight_epsilon: f64,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            default_resolution: 12,
            weight_epsilon: 1e-6,
        }
    }
}

impl SampleParams {
    /// Create params with a specific fallback resolution.
    #[must_use]
    pub fn with_default_resolution(mut self, resolution: usize) -> Self {
        self.default_resolution = resolution;
        self
    }

    /// Create params with a specific renormalization tolerance.
    #[must_use]
    pub fn with_weight_epsilon(mut self, epsilon: f64) -> Self {
        self.weight_epsilon = epsilon.abs();
        self
    }
}
