//! Rational (weighted) Bézier curves.
//!
//! Every control point carries a scalar weight. Evaluation blends the
//! weighted control points with the Bernstein basis and divides by the
//! weighted basis sum:
//!
//! ```text
//! C(t) = Σ wᵢ Bᵢ,ₙ(t) Pᵢ / Σ wᵢ Bᵢ,ₙ(t)
//! ```
//!
//! Structural operations run the polynomial algorithms on homogeneous
//! coordinates `(w·x, w·y, w)` and project back, so weights travel through
//! subdivision and degree changes with the same factors as the points.
//!
//! Weights are expected to be positive. They are not validated up front; a
//! zero, negative or non-finite denominator is reported as
//! [`CurveError::DegenerateWeights`] when it is met.

use super::bezier::{self, bernstein};
use super::unit_parameters;
use crate::error::CurveError;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Control points paired with their weights.
pub type WeightedPoints<F> = (Vec<Point2<F>>, Vec<F>);

fn check_lengths<F>(points: &[Point2<F>], weights: &[F]) -> Result<(), CurveError> {
    if points.len() != weights.len() {
        return Err(CurveError::WeightMismatch {
            points: points.len(),
            weights: weights.len(),
        });
    }
    Ok(())
}

/// Evaluates the rational curve at `t`.
///
/// # Errors
///
/// [`CurveError::WeightMismatch`] if the slices differ in length,
/// [`CurveError::InsufficientPoints`] for an empty curve and
/// [`CurveError::DegenerateWeights`] if the weighted basis sum at `t` is not
/// strictly positive.
pub fn evaluate_weighted_at<F: Float>(points: &[Point2<F>], weights: &[F], t: F) -> Result<Point2<F>, CurveError> {
    check_lengths(points, weights)?;
    let n = points.len().checked_sub(1).ok_or(CurveError::InsufficientPoints {
        required: 1,
        actual: 0,
    })?;

    let mut numerator = Vec2::zero();
    let mut denominator = F::zero();
    for (i, (p, &w)) in points.iter().zip(weights).enumerate() {
        let basis = bernstein(n, i, t) * w;
        numerator += p.to_vec() * basis;
        denominator = denominator + basis;
    }

    if !denominator.is_finite() || denominator <= F::zero() {
        return Err(CurveError::DegenerateWeights { index: None });
    }
    Ok(Point2::from_vec(numerator / denominator))
}

/// Samples the rational curve at `sample_count` parameters over `[0, 1]`.
///
/// An empty curve yields no samples.
pub fn evaluate_weighted<F: Float>(
    points: &[Point2<F>],
    weights: &[F],
    sample_count: usize,
) -> Result<Vec<Point2<F>>, CurveError> {
    check_lengths(points, weights)?;
    if points.is_empty() {
        return Ok(Vec::new());
    }
    unit_parameters(sample_count)
        .map(|t| evaluate_weighted_at(points, weights, t))
        .collect()
}

fn lift<F: Float>(points: &[Point2<F>], weights: &[F]) -> Vec<Point2<F>> {
    points
        .iter()
        .zip(weights)
        .map(|(p, &w)| Point2::new(p.x * w, p.y * w))
        .collect()
}

fn project<F: Float>(lifted: &[Point2<F>], weights: &[F]) -> Result<Vec<Point2<F>>, CurveError> {
    lifted
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(i, (p, &w))| {
            if !w.is_finite() || w <= F::zero() {
                Err(CurveError::DegenerateWeights { index: Some(i) })
            } else {
                Ok(Point2::new(p.x / w, p.y / w))
            }
        })
        .collect()
}

/// Splits the rational curve at `u` using De Casteljau in homogeneous form.
///
/// Returns `((left_points, left_weights), (right_points, right_weights))`
/// with the same orientation convention as [`bezier::split`].
pub fn split_weighted<F: Float>(
    points: &[Point2<F>],
    weights: &[F],
    u: F,
) -> Result<(WeightedPoints<F>, WeightedPoints<F>), CurveError> {
    check_lengths(points, weights)?;
    if !(u >= F::zero() && u <= F::one()) {
        return Err(CurveError::InvalidParameter);
    }
    if points.is_empty() {
        return Err(CurveError::InsufficientPoints {
            required: 1,
            actual: 0,
        });
    }

    let (left_h, right_h) = bezier::split(&lift(points, weights), u)?;

    let mt = F::one() - u;
    let mut table = vec![weights.to_vec()];
    while let Some(prev) = table.last().filter(|level| level.len() > 1) {
        let next = prev.windows(2).map(|w| mt * w[0] + u * w[1]).collect();
        table.push(next);
    }
    let left_w: Vec<F> = table.iter().map(|level| level[0]).collect();
    let right_w: Vec<F> = table.iter().rev().map(|level| level[level.len() - 1]).collect();

    let left = project(&left_h, &left_w)?;
    let right = project(&right_h, &right_w)?;
    Ok(((left, left_w), (right, right_w)))
}

/// Raises the degree of a rational curve by one without changing its shape.
///
/// Weights are elevated with the same factors as polynomial control points;
/// each new point is the weight-averaged blend of its two neighbours:
///
/// ```text
/// w'ᵢ = a·wᵢ₋₁ + (1-a)·wᵢ
/// P'ᵢ = (a·wᵢ₋₁·Pᵢ₋₁ + (1-a)·wᵢ·Pᵢ) / w'ᵢ      a = i/m
/// ```
pub fn elevate_weighted<F: Float>(points: &[Point2<F>], weights: &[F]) -> Result<WeightedPoints<F>, CurveError> {
    check_lengths(points, weights)?;
    let lifted = bezier::elevate_degree(&lift(points, weights));
    let new_weights = elevate_scalars(weights);
    let new_points = project(&lifted, &new_weights)?;
    Ok((new_points, new_weights))
}

fn elevate_scalars<F: Float>(values: &[F]) -> Vec<F> {
    bezier::elevate_degree(&as_points(values)).iter().map(|p| p.x).collect()
}

/// Lowers the degree of a rational curve by one with a least-squares fit.
///
/// The homogeneous control points `(w·x, w·y, w)` are reduced by the same
/// pinned-endpoint least-squares operator as [`bezier::reduce_degree`]; the
/// reduced `w` column becomes the new weights. Like its polynomial
/// counterpart this is an approximation that keeps both end points and
/// their weights.
///
/// # Errors
///
/// [`CurveError::InsufficientPoints`] for fewer than 3 points and
/// [`CurveError::DegenerateWeights`] if a derived weight is not positive.
pub fn reduce_weighted<F: Float>(points: &[Point2<F>], weights: &[F]) -> Result<WeightedPoints<F>, CurveError> {
    check_lengths(points, weights)?;
    let rows: Vec<Vec<F>> = points
        .iter()
        .zip(weights)
        .map(|(p, &w)| vec![p.x * w, p.y * w, w])
        .collect();

    let reduced = bezier::reduce_rows(&rows)?;
    let new_weights: Vec<F> = reduced.iter().map(|r| r[2]).collect();
    let lifted: Vec<Point2<F>> = reduced.iter().map(|r| Point2::new(r[0], r[1])).collect();
    let mut new_points = project(&lifted, &new_weights)?;

    // Pin the end points exactly rather than through the x·w / w round trip.
    let last = new_points.len() - 1;
    new_points[0] = points[0];
    new_points[last] = points[points.len() - 1];
    Ok((new_points, new_weights))
}

/// Rational counterpart of [`bezier::combine`].
///
/// The continuity conditions are imposed on the homogeneous curves, which
/// carries them over to the projected ones: the result starts where curve A
/// ends and matches its first (and second, for C2) derivative. B's weights
/// are first rescaled so that its first weight equals A's last one; a
/// uniform scale leaves B's shape unchanged.
///
/// # Errors
///
/// [`CurveError::WeightMismatch`] if a weight slice does not pair up with its
/// points, [`CurveError::InvalidContinuity`] for too short operands and
/// [`CurveError::DegenerateWeights`] if an end weight or a derived weight is
/// not positive.
pub fn combine_weighted<F: Float>(
    a_points: &[Point2<F>],
    a_weights: &[F],
    b_points: &[Point2<F>],
    b_weights: &[F],
    continuity: bezier::Continuity,
) -> Result<WeightedPoints<F>, CurveError> {
    check_lengths(a_points, a_weights)?;
    check_lengths(b_points, b_weights)?;

    let required = continuity.required_points();
    let shortest = a_points.len().min(b_points.len());
    if shortest < required {
        return Err(CurveError::InvalidContinuity {
            continuity: continuity.order(),
            required,
            actual: shortest,
        });
    }

    let joint = a_weights[a_weights.len() - 1];
    let first = b_weights[0];
    let scale = joint / first;
    if !scale.is_finite() || scale <= F::zero() {
        return Err(CurveError::DegenerateWeights { index: Some(0) });
    }
    let b_weights: Vec<F> = b_weights.iter().map(|&w| w * scale).collect();

    let lifted = bezier::combine(&lift(a_points, a_weights), &lift(b_points, &b_weights), continuity)?;
    let new_weights: Vec<F> = bezier::combine(&as_points(a_weights), &as_points(&b_weights), continuity)?
        .iter()
        .map(|p| p.x)
        .collect();
    let mut new_points = project(&lifted, &new_weights)?;
    new_points[0] = a_points[a_points.len() - 1];
    Ok((new_points, new_weights))
}

fn as_points<F: Float>(values: &[F]) -> Vec<Point2<F>> {
    values.iter().map(|&v| Point2::new(v, F::zero())).collect()
}
