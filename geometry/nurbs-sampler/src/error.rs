//! Error types for curve sampling.

use thiserror::Error;

/// Errors that can occur while building knots or sampling a curve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// The curve definition cannot produce a well-formed knot vector.
    #[error("invalid curve definition: {reason}")]
    InvalidCurveDefinition {
        /// Description of what's wrong with the curve.
        reason: String,
    },

    /// The requested knot style is not defined for this curve.
    #[error(
        "unsupported knot style (endpoint={endpoint}, bezier={bezier}) for order {order}"
    )]
    UnsupportedKnotStyle {
        /// Endpoint flag of the curve.
        endpoint: bool,
        /// Bezier flag of the curve.
        bezier: bool,
        /// Order of the curve.
        order: usize,
    },

    /// Knot slice handed to the basis evaluator is unusable.
    #[error("invalid knot vector: {reason}")]
    InvalidKnotVector {
        /// Description of what's wrong with the knot vector.
        reason: String,
    },

    /// No basis function is positive at the parameter.
    #[error("no basis function has support at parameter {parameter}")]
    EmptySupport {
        /// The (clamped) parameter value.
        parameter: f64,
    },
}

impl CurveError {
    /// Create an invalid curve definition error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurveDefinition {
            reason: reason.into(),
        }
    }

    /// Create an invalid knot vector error.
    #[must_use]
    pub fn invalid_knot_vector(reason: impl Into<String>) -> Self {
        Self::InvalidKnotVector {
            reason: reason.into(),
        }
    }

    /// Create an unsupported knot style error.
    #[must_use]
    pub fn unsupported_knot_style(endpoint: bool, bezier: bool, order: usize) -> Self {
        Self::UnsupportedKnotStyle {
            endpoint,
            bezier,
            order,
        }
    }

    /// Check if this is an invalid curve definition error.
    #[must_use]
    pub fn is_invalid_curve(&self) -> bool {
        matches!(self, Self::InvalidCurveDefinition { .. })
    }

    /// Check if this is an unsupported knot style error.
    #[must_use]
    pub fn is_unsupported_knot_style(&self) -> bool {
        matches!(self, Self::UnsupportedKnotStyle { .. })
    }
}
