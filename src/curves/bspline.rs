//! Uniform clamped B-splines.
//!
//! A spline of `m` control points and degree `p` lives on a clamped knot
//! vector over `[0, 1]`: `m - p + 1` evenly spaced values with the first and
//! last repeated `p` more times. Full end multiplicity makes the curve start
//! at the first control point and approach the last one.
//!
//! Two evaluators are provided. [`evaluate_direct`] sums every control point
//! weighted by its Cox–de Boor basis value; [`evaluate_de_boor`] locates the
//! knot span and runs De Boor's triangular recurrence over the `p + 1` local
//! points. They agree on `[0, 1)`.
//!
//! # Example
//!
//! ```
//! use curvum::{Point2, curves::bspline};
//!
//! let control_points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 2.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(3.0, 0.0),
//!     Point2::new(4.0, 1.0),
//! ];
//!
//! let a = bspline::evaluate_direct(&control_points, 3, 0.4).unwrap();
//! let b = bspline::evaluate_de_boor(&control_points, 3, 0.4).unwrap();
//! assert!(a.distance(b) < 1e-12);
//! ```

use super::unit_parameters;
use crate::error::CurveError;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Which trailing samples a B-spline sampler drops.
///
/// The direct evaluator returns the origin at `t = 1` because no half-open
/// base interval contains it, so at least the final sample is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleBoundary {
    /// Drop the `t = 1` sample.
    #[default]
    ExcludeEnd,
    /// Drop the last two samples.
    ExcludeLastTwo,
}

impl SampleBoundary {
    /// Number of trailing samples removed.
    pub fn dropped(self) -> usize {
        match self {
            SampleBoundary::ExcludeEnd => 1,
            SampleBoundary::ExcludeLastTwo => 2,
        }
    }
}

/// Builds the clamped uniform knot vector for `count` control points.
///
/// The result has `count + degree + 1` entries. Requires `degree >= 1` and
/// `count > degree`.
pub fn clamped_uniform_knots<F: Float>(count: usize, degree: usize) -> Result<Vec<F>, CurveError> {
    check_shape(count, degree)?;

    let interior = count - degree + 1;
    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat(F::zero()).take(degree));
    knots.extend(unit_parameters::<F>(interior));
    knots.extend(std::iter::repeat(F::one()).take(degree));
    Ok(knots)
}

fn check_shape(count: usize, degree: usize) -> Result<(), CurveError> {
    if degree == 0 {
        return Err(CurveError::InvalidDegree(degree));
    }
    if count < degree + 1 {
        return Err(CurveError::InsufficientPoints {
            required: degree + 1,
            actual: count,
        });
    }
    Ok(())
}

/// Evaluates every degree-`degree` basis function at `u`.
///
/// Returns `N[i, degree](u)` for `i` in `0..knots.len() - degree - 1`. The
/// table is built bottom-up from the piecewise-constant level, where
/// `N[i, 0](u) = 1` iff `knots[i] <= u < knots[i + 1]`, and each higher level
/// blends two neighbours of the level below. A knot span of zero width
/// contributes zero instead of dividing.
pub fn basis_functions<F: Float>(degree: usize, u: F, knots: &[F]) -> Vec<F> {
    if knots.len() < degree + 2 {
        return Vec::new();
    }

    let mut level: Vec<F> = knots
        .windows(2)
        .map(|w| if w[0] <= u && u < w[1] { F::one() } else { F::zero() })
        .collect();

    for q in 1..=degree {
        level = (0..knots.len() - q - 1)
            .map(|i| {
                let mut left = F::zero();
                let mut right = F::zero();
                let left_span = knots[i + q] - knots[i];
                if left_span != F::zero() {
                    left = (u - knots[i]) / left_span * level[i];
                }
                let right_span = knots[i + q + 1] - knots[i + 1];
                if right_span != F::zero() {
                    right = (knots[i + q + 1] - u) / right_span * level[i + 1];
                }
                left + right
            })
            .collect();
    }
    level
}

/// Cox–de Boor basis value `N[i, p](u)`; zero for an index past the end.
pub fn basis_function<F: Float>(i: usize, p: usize, u: F, knots: &[F]) -> F {
    basis_functions(p, u, knots).get(i).copied().unwrap_or_else(F::zero)
}

fn check_parameter<F: Float>(t: F) -> Result<(), CurveError> {
    if t >= F::zero() && t <= F::one() {
        Ok(())
    } else {
        Err(CurveError::InvalidParameter)
    }
}

/// Evaluates the spline at `t` as `Σ N[i, p](t) Pᵢ`.
///
/// All basis values vanish at `t = 1`, so this evaluator returns the
/// origin there.
pub fn evaluate_direct<F: Float>(points: &[Point2<F>], degree: usize, t: F) -> Result<Point2<F>, CurveError> {
    check_parameter(t)?;
    let knots = clamped_uniform_knots(points.len(), degree)?;
    Ok(direct_with_knots(points, degree, &knots, t))
}

fn direct_with_knots<F: Float>(points: &[Point2<F>], degree: usize, knots: &[F], t: F) -> Point2<F> {
    let sum = basis_functions(degree, t, knots)
        .into_iter()
        .zip(points)
        .fold(Vec2::zero(), |acc, (n, p)| acc + p.to_vec() * n);
    Point2::from_vec(sum)
}

/// Evaluates the spline at `t` with De Boor's algorithm.
///
/// `t = 1` maps to the last non-empty knot span, so the last control point is
/// returned there.
pub fn evaluate_de_boor<F: Float>(points: &[Point2<F>], degree: usize, t: F) -> Result<Point2<F>, CurveError> {
    check_parameter(t)?;
    let knots = clamped_uniform_knots(points.len(), degree)?;
    Ok(de_boor_with_knots(points, degree, &knots, t))
}

/// Finds `k` with `knots[k] <= t < knots[k + 1]`, mapping the end of the
/// domain to the last span.
fn find_knot_span<F: Float>(count: usize, degree: usize, knots: &[F], t: F) -> usize {
    if t >= knots[count] {
        return count - 1;
    }

    let mut low = degree;
    let mut high = count;
    while low < high {
        let mid = (low + high) / 2;
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    low - 1
}

fn de_boor_with_knots<F: Float>(points: &[Point2<F>], degree: usize, knots: &[F], t: F) -> Point2<F> {
    let p = degree;
    let k = find_knot_span(points.len(), p, knots, t);
    let mut d: Vec<Point2<F>> = points[k - p..=k].to_vec();

    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = k - p + j;
            let denom = knots[i + p - r + 1] - knots[i];
            let alpha = if denom.abs() < F::epsilon() {
                F::zero()
            } else {
                (t - knots[i]) / denom
            };
            d[j] = d[j - 1].blend(d[j], alpha);
        }
    }
    d[p]
}

fn sample_with<F, E>(
    points: &[Point2<F>],
    degree: usize,
    sample_count: usize,
    boundary: SampleBoundary,
    eval: E,
) -> Vec<Point2<F>>
where
    F: Float,
    E: Fn(&[Point2<F>], usize, &[F], F) -> Point2<F>,
{
    let knots = match clamped_uniform_knots::<F>(points.len(), degree) {
        Ok(knots) => knots,
        Err(err) => {
            log::debug!("B-spline falls back to its control polygon: {err}");
            return points.to_vec();
        }
    };

    let mut samples: Vec<Point2<F>> = unit_parameters(sample_count)
        .map(|t| eval(points, degree, &knots, t))
        .collect();
    samples.truncate(samples.len().saturating_sub(boundary.dropped()));
    log::trace!(
        "sampled B-spline of degree {degree}: {} points from {} control points",
        samples.len(),
        points.len()
    );
    samples
}

/// Samples the spline with [`evaluate_direct`] at `sample_count` evenly spaced
/// parameters, then drops trailing samples per `boundary`.
///
/// With fewer than `degree + 1` control points (or degree 0) the control
/// polygon is returned unchanged.
pub fn sample_direct<F: Float>(
    points: &[Point2<F>],
    degree: usize,
    sample_count: usize,
    boundary: SampleBoundary,
) -> Vec<Point2<F>> {
    sample_with(points, degree, sample_count, boundary, direct_with_knots::<F>)
}

/// Samples the spline with [`evaluate_de_boor`]; same contract as
/// [`sample_direct`].
pub fn sample_de_boor<F: Float>(
    points: &[Point2<F>],
    degree: usize,
    sample_count: usize,
    boundary: SampleBoundary,
) -> Vec<Point2<F>> {
    sample_with(points, degree, sample_count, boundary, de_boor_with_knots::<F>)
}
