//! curvum - Parametric curves from control points
//!
//! Bézier, rational Bézier, B-spline and interpolating curves built from a
//! handful of control points, with the structural operations an editor needs:
//! sampling, subdivision, degree elevation and reduction, and joining two
//! Bézier curves with C0, C1 or C2 continuity.
//!
//! The evaluation engines in [`curves`] are pure functions over control-point
//! slices. [`Curve`] wraps them in an editable entity.

pub mod bounds;
pub mod config;
pub mod curve;
pub mod curves;
pub mod error;
pub mod hull;
pub mod linalg;
pub mod primitives;
pub mod snapshot;

pub use bounds::Aabb2;
pub use config::CurveConfig;
pub use curve::{create_curve, Curve, CurveKind};
pub use curves::{Continuity, SampleBoundary};
pub use error::{ConfigError, CurveError};
pub use primitives::{Affine2, Point2, Vec2};
pub use snapshot::CurveSnapshot;
