//! NURBS curve sampling for generated camera and object paths.
//!
//! Synthetic video scenes move an object along a randomly generated path and
//! place an occluder near the path's spatial center. This crate turns such a
//! path, given as a NURBS curve, into a dense polyline without any help from a
//! modelling application:
//!
//! - [`KnotVector`] - knot construction for periodic, uniform, endpoint and
//!   Bézier-style curves
//! - [`basis::evaluate`] - Cox–de Boor basis functions and their support window
//! - [`CurveSampler`] - rational blending of control points into a
//!   [`SampledPolyline`]
//! - [`random_path`] - random paths in the shape the scene generator uses
//!
//! # Example
//!
//! ```
//! use nurbs_sampler::{ControlPoint, NurbsCurve, midpoint, sample};
//!
//! let curve = NurbsCurve::clamped(
//!     vec![
//!         ControlPoint::new(0.0, 0.0, 0.0, 1.0),
//!         ControlPoint::new(10.0, 0.0, 0.0, 1.0),
//!     ],
//!     2,
//! )
//! .with_resolution(1);
//!
//! let polyline = sample(&curve).unwrap();
//! assert_eq!(polyline.len(), 2);
//!
//! let mid = midpoint(&curve).unwrap();
//! assert_eq!(mid.x, 10.0);
//! ```
//!
//! # Parameterization
//!
//! Unlike curves parameterized over `[0, 1]`, parameters here live in knot
//! space. [`CurveSampler::domain`] reports the range a curve is sampled over.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for curves, params and
//!   polylines

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::cast_precision_loss,
    clippy::needless_range_loop,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::similar_names
)]

pub mod basis;
mod curve;
mod error;
mod knots;
mod params;
mod path;
mod polyline;
mod sampler;

// Re-export main types and functions
pub use basis::BasisWindow;
pub use curve::{ControlPoint, KnotStyle, NurbsCurve};
pub use error::CurveError;
pub use knots::KnotVector;
pub use params::SampleParams;
pub use path::{RandomPathParams, random_path, random_path_seeded};
pub use polyline::SampledPolyline;
pub use sampler::{CurveSampler, SampleReport, midpoint, sample};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Point4};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
