//! Error types for curve operations.

use crate::curve::CurveKind;
use thiserror::Error;

/// Errors signalled by structural curve operations and rational evaluation.
///
/// Evaluation of a B-spline with too few control points is not an error: it
/// falls back to the control polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The operation needs more control points than the curve has.
    #[error("operation needs at least {required} control points, curve has {actual}")]
    InsufficientPoints {
        /// Minimum number of control points.
        required: usize,
        /// Number of control points supplied.
        actual: usize,
    },

    /// A merge or join asked for a continuity order the operands cannot carry.
    #[error(
        "C{continuity} continuity needs at least {required} control points on each curve, got {actual}"
    )]
    InvalidContinuity {
        /// Requested continuity order.
        continuity: u8,
        /// Points needed on each operand.
        required: usize,
        /// Point count of the smaller operand.
        actual: usize,
    },

    /// Continuity orders above C2 are not supported.
    #[error("unsupported continuity order C{0}, expected 0, 1 or 2")]
    UnsupportedContinuity(u8),

    /// A Bézier-only operation was invoked on another curve kind.
    #[error("{operation} is only defined for Bézier curves, not {kind:?}")]
    TypeMismatch {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Kind of the offending curve.
        kind: CurveKind,
    },

    /// Weights produced a zero, negative or non-finite rational denominator.
    #[error("degenerate weights{}", index_suffix(.index))]
    DegenerateWeights {
        /// Offending weight index, when a single weight is to blame.
        index: Option<usize>,
    },

    /// Weight sequence and control-point sequence differ in length.
    #[error("{weights} weights supplied for {points} control points")]
    WeightMismatch {
        /// Number of control points.
        points: usize,
        /// Number of weights.
        weights: usize,
    },

    /// A linear system had no unique solution.
    #[error("linear system is singular")]
    SingularSystem,

    /// A control-point index was out of range.
    #[error("control point index {index} out of range for {len} points")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of control points.
        len: usize,
    },

    /// B-spline degree must be at least 1.
    #[error("invalid B-spline degree {0}, expected at least 1")]
    InvalidDegree(usize),

    /// Subdivision parameter was outside `[0, 1]` or not a number.
    #[error("curve parameter must lie in [0, 1]")]
    InvalidParameter,
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    }
}

/// Errors raised while loading or saving a [`CurveConfig`](crate::config::CurveConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("failed to parse curve configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize curve configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field held a value outside its valid range.
    #[error("invalid curve configuration: {0}")]
    Invalid(String),
}
