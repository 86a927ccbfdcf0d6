//! Polynomial Bézier curves of arbitrary degree.
//!
//! A curve with `n + 1` control points has degree `n` and is evaluated with
//! the Bernstein basis or, equivalently, De Casteljau's recurrence. The
//! structural operations (subdivision, degree elevation and reduction, and
//! continuity-constrained joining) all work on plain control-point slices.
//!
//! # Example
//!
//! ```
//! use curvum::curves::bezier;
//! use curvum::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 2.0),
//!     Point2::new(2.0, 0.0),
//! ];
//!
//! let mid = bezier::evaluate_at(&points, 0.5).unwrap();
//! assert!((mid.x - 1.0).abs() < 1e-12 && (mid.y - 1.0).abs() < 1e-12);
//!
//! let (left, right) = bezier::split(&points, 0.5).unwrap();
//! assert_eq!(left.len(), 3);
//! assert_eq!(right[0], left[2]);
//! ```

use super::{scalar, unit_parameters};
use crate::error::CurveError;
use crate::linalg;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Binomial coefficient `C(n, k)` computed as a running product.
pub fn binomial<F: Float>(n: usize, k: usize) -> F {
    if k > n {
        return F::zero();
    }
    let k = k.min(n - k);
    (0..k).fold(F::one(), |acc, i| acc * scalar::<F>(n - i) / scalar::<F>(i + 1))
}

/// Bernstein basis polynomial `C(n, i) tⁱ (1 - t)ⁿ⁻ⁱ`; zero for `i > n`.
#[inline]
pub fn bernstein<F: Float>(n: usize, i: usize, t: F) -> F {
    if i > n {
        return F::zero();
    }
    binomial::<F>(n, i) * t.powi(i as i32) * (F::one() - t).powi((n - i) as i32)
}

/// Evaluates the curve at `t` as a Bernstein-weighted sum of control points.
///
/// Returns `None` for an empty control polygon. At `t = 0` and `t = 1` the
/// first and last control point are reproduced exactly.
pub fn evaluate_at<F: Float>(points: &[Point2<F>], t: F) -> Option<Point2<F>> {
    let n = points.len().checked_sub(1)?;
    let mut acc = Vec2::zero();
    for (i, p) in points.iter().enumerate() {
        acc += p.to_vec() * bernstein(n, i, t);
    }
    Some(Point2::from_vec(acc))
}

/// Samples the curve at `sample_count` parameters evenly spaced over `[0, 1]`.
///
/// An empty control polygon yields no samples.
pub fn evaluate<F: Float>(points: &[Point2<F>], sample_count: usize) -> Vec<Point2<F>> {
    if points.is_empty() {
        return Vec::new();
    }
    unit_parameters(sample_count)
        .filter_map(|t| evaluate_at(points, t))
        .collect()
}

/// Evaluates a single point with De Casteljau's algorithm.
///
/// Each of the `n` passes replaces adjacent pairs by their affine blend at
/// `t` until one point remains.
pub fn de_casteljau<F: Float>(points: &[Point2<F>], t: F) -> Option<Point2<F>> {
    if points.is_empty() {
        return None;
    }
    let mut work = points.to_vec();
    for level in 1..points.len() {
        for i in 0..points.len() - level {
            work[i] = work[i].blend(work[i + 1], t);
        }
    }
    Some(work[0])
}

/// Runs De Casteljau's algorithm keeping every level of the triangle.
///
/// Level 0 is the input; level `k` has `len - k` points; the last level holds
/// the curve point at `t`.
pub fn de_casteljau_table<F: Float>(points: &[Point2<F>], t: F) -> Vec<Vec<Point2<F>>> {
    let mut table: Vec<Vec<Point2<F>>> = Vec::with_capacity(points.len());
    if points.is_empty() {
        return table;
    }
    table.push(points.to_vec());
    while let Some(prev) = table.last().filter(|level| level.len() > 1) {
        let next = prev.windows(2).map(|w| w[0].blend(w[1], t)).collect();
        table.push(next);
    }
    table
}

/// Samples the curve using De Casteljau evaluation instead of Bernstein sums.
pub fn evaluate_de_casteljau<F: Float>(points: &[Point2<F>], sample_count: usize) -> Vec<Point2<F>> {
    if points.is_empty() {
        return Vec::new();
    }
    unit_parameters(sample_count)
        .filter_map(|t| de_casteljau(points, t))
        .collect()
}

/// Splits the curve at parameter `u`.
///
/// The left half is the first point of every De Casteljau level, the right
/// half the last point of every level read from the deepest level outwards,
/// so both start at the curve's beginning in their own direction of travel:
/// `left` runs from `P₀` to `C(u)` and `right` from `C(u)` to `Pₙ`. Each has
/// the same number of points as the input.
///
/// # Errors
///
/// [`CurveError::InvalidParameter`] if `u` is outside `[0, 1]`,
/// [`CurveError::InsufficientPoints`] for an empty polygon.
pub fn split<F: Float>(points: &[Point2<F>], u: F) -> Result<(Vec<Point2<F>>, Vec<Point2<F>>), CurveError> {
    if !(u >= F::zero() && u <= F::one()) {
        return Err(CurveError::InvalidParameter);
    }
    if points.is_empty() {
        return Err(CurveError::InsufficientPoints {
            required: 1,
            actual: 0,
        });
    }

    let table = de_casteljau_table(points, u);
    let left = table.iter().map(|level| level[0]).collect();
    let right = table.iter().rev().map(|level| level[level.len() - 1]).collect();
    Ok((left, right))
}

/// Raises the degree by one without changing the curve.
///
/// For `m` input points the result has `m + 1`:
/// `Q₀ = P₀`, `Qₘ = Pₘ₋₁` and `Qᵢ = (i/m)·Pᵢ₋₁ + (1 - i/m)·Pᵢ` in between.
pub fn elevate_degree<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    let m = points.len();
    if m == 0 {
        return Vec::new();
    }
    let mf = scalar::<F>(m);

    let mut elevated = Vec::with_capacity(m + 1);
    elevated.push(points[0]);
    for i in 1..m {
        let alpha = scalar::<F>(i) / mf;
        elevated.push(points[i].blend(points[i - 1], alpha));
    }
    elevated.push(points[m - 1]);
    elevated
}

/// Lowers the degree by one with a least-squares fit.
///
/// This is an approximation, not the inverse of [`elevate_degree`] in
/// general: the returned `m - 1` points are the ones whose elevation is
/// closest (in the least-squares sense) to the input, with both end points
/// held fixed. The fit is exact when the input is itself the elevation of a
/// lower-degree curve.
///
/// # Errors
///
/// [`CurveError::InsufficientPoints`] for fewer than 3 control points,
/// [`CurveError::SingularSystem`] if the normal equations cannot be solved.
pub fn reduce_degree<F: Float>(points: &[Point2<F>]) -> Result<Vec<Point2<F>>, CurveError> {
    let rows: Vec<Vec<F>> = points.iter().map(|p| vec![p.x, p.y]).collect();
    let reduced = reduce_rows(&rows)?;
    Ok(reduced.iter().map(|r| Point2::new(r[0], r[1])).collect())
}

/// Least-squares degree reduction over control points of any dimension.
///
/// Each row of `rows` is one control point; the rational engine passes
/// homogeneous `(w·x, w·y, w)` rows through the same operator.
pub(crate) fn reduce_rows<F: Float>(rows: &[Vec<F>]) -> Result<Vec<Vec<F>>, CurveError> {
    let m = rows.len();
    if m < 3 {
        return Err(CurveError::InsufficientPoints {
            required: 3,
            actual: m,
        });
    }

    let reduced_len = m - 1;
    let unknowns = reduced_len - 2;
    let first = rows[0].clone();
    let last = rows[m - 1].clone();
    if unknowns == 0 {
        return Ok(vec![first, last]);
    }

    // Row i of the elevation map: a·Q[i-1] + (1 - a)·Q[i] = P[i], a = i/(m-1).
    // Q[0] and Q[m-2] are pinned, so their terms move to the right-hand side
    // and the unknowns are Q[1..=m-3].
    let denom = scalar::<F>(reduced_len);
    let mut matrix = Vec::with_capacity(m - 2);
    let mut rhs = Vec::with_capacity(m - 2);
    for i in 1..m - 1 {
        let a = scalar::<F>(i) / denom;
        let b = F::one() - a;
        let mut row = vec![F::zero(); unknowns];
        let mut target = rows[i].clone();

        if i - 1 == 0 {
            for (t, f) in target.iter_mut().zip(&first) {
                *t = *t - a * *f;
            }
        } else {
            row[i - 2] = a;
        }

        if i == reduced_len - 1 {
            for (t, l) in target.iter_mut().zip(&last) {
                *t = *t - b * *l;
            }
        } else {
            row[i - 1] = b;
        }

        matrix.push(row);
        rhs.push(target);
    }

    let interior = linalg::least_squares(&matrix, &rhs, unknowns)?;

    let mut reduced = Vec::with_capacity(reduced_len);
    reduced.push(first);
    reduced.extend(interior);
    reduced.push(last);
    Ok(reduced)
}

/// Geometric continuity order requested when joining two curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continuity {
    /// Shared end point only.
    C0,
    /// Shared end point and first derivative.
    C1,
    /// Shared end point, first and second derivative.
    C2,
}

impl Continuity {
    /// Number of matched derivatives, including position.
    #[inline]
    pub fn order(self) -> u8 {
        match self {
            Continuity::C0 => 0,
            Continuity::C1 => 1,
            Continuity::C2 => 2,
        }
    }

    /// Minimum number of control points each operand needs.
    #[inline]
    pub fn required_points(self) -> usize {
        usize::from(self.order()) + 2
    }
}

impl TryFrom<u8> for Continuity {
    type Error = CurveError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        match order {
            0 => Ok(Continuity::C0),
            1 => Ok(Continuity::C1),
            2 => Ok(Continuity::C2),
            other => Err(CurveError::UnsupportedContinuity(other)),
        }
    }
}

/// Blends the start of `curve2` onto the end of `curve1`.
///
/// Returns `curve2`'s control points with its first `c + 1` points replaced so
/// that the curve continues `curve1` with the requested continuity. With
/// `d₁`, `d₂` the two degrees and `p` the control points of `curve1`:
///
/// - C0: `q₀ = pₙ`
/// - C1: `q₁ = pₙ + (d₁/d₂)(pₙ - pₙ₋₁)`
/// - C2: `q₂ = 2q₁ - q₀ + d₁(d₁-1)/(d₂(d₂-1)) · (pₙ - 2pₙ₋₁ + pₙ₋₂)`
///
/// # Errors
///
/// [`CurveError::InvalidContinuity`] unless both curves have at least
/// `c + 2` control points.
///
/// # Example
///
/// ```
/// use curvum::curves::bezier::{combine, Continuity};
/// use curvum::Point2;
///
/// let a = vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 1.0), Point2::new(3.0, 0.0)];
/// let b = vec![Point2::new(5.0, 0.0), Point2::new(6.0, 1.0), Point2::new(7.0, 1.0), Point2::new(8.0, 0.0)];
///
/// let joined = combine(&a, &b, Continuity::C0).unwrap();
/// assert_eq!(joined[0], a[3]);
/// assert_eq!(&joined[1..], &b[1..]);
/// ```
pub fn combine<F: Float>(
    curve1: &[Point2<F>],
    curve2: &[Point2<F>],
    continuity: Continuity,
) -> Result<Vec<Point2<F>>, CurveError> {
    let required = continuity.required_points();
    let shortest = curve1.len().min(curve2.len());
    if shortest < required {
        return Err(CurveError::InvalidContinuity {
            continuity: continuity.order(),
            required,
            actual: shortest,
        });
    }

    let n = curve1.len() - 1;
    let d1 = scalar::<F>(n);
    let d2 = scalar::<F>(curve2.len() - 1);
    let pn = curve1[n];

    let mut lead = vec![pn];
    if continuity.order() >= 1 {
        let q1 = pn + (pn - curve1[n - 1]) * (d1 / d2);
        lead.push(q1);
    }
    if continuity.order() >= 2 {
        let second = (pn - curve1[n - 1]) - (curve1[n - 1] - curve1[n - 2]);
        let ratio = d1 * (d1 - F::one()) / (d2 * (d2 - F::one()));
        let q1 = lead[1];
        let q2 = q1 + (q1 - pn) + second * ratio;
        lead.push(q2);
    }

    let skip = lead.len();
    lead.extend_from_slice(&curve2[skip..]);
    Ok(lead)
}

/// Control points of the derivative (hodograph) curve.
///
/// For a degree-`n` curve this is the degree-`n-1` curve with control points
/// `n·(Pᵢ₊₁ - Pᵢ)`, stored as points so it can be fed back into the
/// evaluators.
pub fn derivative<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    if points.len() < 2 {
        return Vec::new();
    }
    let n = scalar::<F>(points.len() - 1);
    points
        .windows(2)
        .map(|w| Point2::from_vec((w[1] - w[0]) * n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cubic() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 2.0),
            Point2::new(4.0, 0.0),
        ]
    }

    fn wavy() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 3.0),
            Point2::new(2.5, -1.0),
            Point2::new(4.0, 2.0),
            Point2::new(5.0, 0.5),
        ]
    }

    fn assert_points_eq(a: Point2<f64>, b: Point2<f64>, eps: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = eps);
        assert_relative_eq!(a.y, b.y, epsilon = eps);
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial::<f64>(4, 0), 1.0);
        assert_eq!(binomial::<f64>(4, 2), 6.0);
        assert_eq!(binomial::<f64>(5, 3), 10.0);
        assert_eq!(binomial::<f64>(3, 4), 0.0);
    }

    #[test]
    fn test_bernstein_partition_of_unity() {
        for &t in &[0.0, 0.2, 0.5, 0.77, 1.0] {
            let sum: f64 = (0..=5).map(|i| bernstein(5, i, t)).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bernstein_index_past_degree() {
        assert_eq!(bernstein::<f64>(3, 4, 0.5), 0.0);
        assert_eq!(bernstein::<f64>(0, 7, 1.0), 0.0);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 0.0),
        ];
        let mid = evaluate_at(&points, 0.5).unwrap();
        assert_points_eq(mid, Point2::new(1.0, 1.0), 1e-12);
    }

    #[test]
    fn test_endpoints_interpolated() {
        let points = wavy();
        let samples = evaluate(&points, 100);
        assert_eq!(samples.len(), 100);
        assert_points_eq(samples[0], points[0], 1e-9);
        assert_points_eq(samples[99], points[4], 1e-9);
    }

    #[test]
    fn test_evaluate_empty_and_single() {
        let empty: Vec<Point2<f64>> = vec![];
        assert!(evaluate(&empty, 10).is_empty());
        assert!(evaluate_at(&empty, 0.5).is_none());

        let single = vec![Point2::new(2.0, 3.0)];
        let samples = evaluate(&single, 4);
        assert!(samples.iter().all(|p| *p == single[0]));
    }

    #[test]
    fn test_samples_stay_in_convex_hull() {
        let points = wavy();
        let hull = crate::hull::convex_hull(&points);
        for p in evaluate(&points, 200) {
            assert!(crate::hull::hull_contains(&hull, p, 1e-9));
        }
    }

    #[test]
    fn test_de_casteljau_matches_bernstein() {
        let points = wavy();
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let a = evaluate_at(&points, t).unwrap();
            let b = de_casteljau(&points, t).unwrap();
            assert_points_eq(a, b, 1e-12);
        }
        assert_eq!(evaluate_de_casteljau(&points, 7).len(), 7);
    }

    #[test]
    fn test_de_casteljau_table_shape() {
        let table = de_casteljau_table(&cubic(), 0.3);
        let lengths: Vec<usize> = table.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![4, 3, 2, 1]);
        assert_points_eq(table[3][0], de_casteljau(&cubic(), 0.3).unwrap(), 1e-15);
    }

    #[test]
    fn test_split_continuity() {
        let points = wavy();
        for &u in &[0.1, 0.35, 0.5, 0.9] {
            let (left, right) = split(&points, u).unwrap();
            assert_eq!(left.len(), points.len());
            assert_eq!(right.len(), points.len());

            let at_u = de_casteljau(&points, u).unwrap();
            assert_points_eq(evaluate_at(&left, 1.0).unwrap(), at_u, 1e-12);
            assert_points_eq(evaluate_at(&right, 0.0).unwrap(), at_u, 1e-12);
            assert_eq!(left[0], points[0]);
            assert_eq!(*right.last().unwrap(), *points.last().unwrap());
        }
    }

    #[test]
    fn test_split_reproduces_subdomains() {
        let points = cubic();
        let u = 0.4;
        let (left, right) = split(&points, u).unwrap();
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            assert_points_eq(
                evaluate_at(&left, s).unwrap(),
                evaluate_at(&points, s * u).unwrap(),
                1e-12,
            );
            assert_points_eq(
                evaluate_at(&right, s).unwrap(),
                evaluate_at(&points, u + s * (1.0 - u)).unwrap(),
                1e-12,
            );
        }
    }

    #[test]
    fn test_split_rejects_bad_parameter() {
        assert_eq!(split(&cubic(), 1.5), Err(CurveError::InvalidParameter));
        assert_eq!(split(&cubic(), f64::NAN), Err(CurveError::InvalidParameter));
        let empty: Vec<Point2<f64>> = vec![];
        assert!(matches!(
            split(&empty, 0.5),
            Err(CurveError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn test_elevate_quadratic() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 0.0),
        ];
        let elevated = elevate_degree(&points);
        assert_eq!(elevated.len(), 4);
        assert_eq!(elevated[0], points[0]);
        assert_eq!(elevated[3], points[2]);
        assert_points_eq(elevated[1], Point2::new(2.0 / 3.0, 4.0 / 3.0), 1e-12);
    }

    #[test]
    fn test_elevation_is_exact() {
        let points = wavy();
        let elevated = elevate_degree(&points);
        let before = evaluate(&points, 64);
        let after = evaluate(&elevated, 64);
        for (a, b) in before.iter().zip(&after) {
            assert_points_eq(*a, *b, 1e-9);
        }
    }

    #[test]
    fn test_reduce_undoes_elevation() {
        let points = wavy();
        let reduced = reduce_degree(&elevate_degree(&points)).unwrap();
        assert_eq!(reduced.len(), points.len());
        for (a, b) in reduced.iter().zip(&points) {
            assert_points_eq(*a, *b, 1e-9);
        }
    }

    #[test]
    fn test_reduce_pins_endpoints() {
        let points = wavy();
        let reduced = reduce_degree(&points).unwrap();
        assert_eq!(reduced.len(), 4);
        assert_eq!(reduced[0], points[0]);
        assert_eq!(reduced[3], points[4]);
    }

    #[test]
    fn test_reduce_three_points() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 5.0),
            Point2::new(2.0, 0.0),
        ];
        let reduced = reduce_degree(&points).unwrap();
        assert_eq!(reduced, vec![points[0], points[2]]);
    }

    #[test]
    fn test_reduce_needs_three_points() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        assert_eq!(
            reduce_degree(&points),
            Err(CurveError::InsufficientPoints {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_continuity_try_from() {
        assert_eq!(Continuity::try_from(1), Ok(Continuity::C1));
        assert_eq!(
            Continuity::try_from(3),
            Err(CurveError::UnsupportedContinuity(3))
        );
        assert_eq!(Continuity::C2.required_points(), 4);
    }

    #[test]
    fn test_combine_c0() {
        let a = cubic();
        let b: Vec<Point2<f64>> = cubic()
            .iter()
            .map(|p| Point2::new(p.x + 10.0, p.y - 1.0))
            .collect();
        let merged = combine(&a, &b, Continuity::C0).unwrap();
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[0], a[3]);
        assert_eq!(&merged[1..], &b[1..]);
    }

    #[test]
    fn test_combine_c1_matches_tangent() {
        let a = wavy();
        let b = cubic();
        let merged = combine(&a, &b, Continuity::C1).unwrap();
        assert_eq!(&merged[2..], &b[2..]);

        let end_tangent = evaluate_at(&derivative(&a), 1.0).unwrap();
        let start_tangent = evaluate_at(&derivative(&merged), 0.0).unwrap();
        assert_points_eq(end_tangent, start_tangent, 1e-9);
    }

    #[test]
    fn test_combine_c2_matches_curvature() {
        let a = wavy();
        let b = vec![
            Point2::new(9.0, 0.0),
            Point2::new(10.0, 1.0),
            Point2::new(11.0, -1.0),
            Point2::new(12.0, 2.0),
            Point2::new(13.0, 0.0),
            Point2::new(14.0, 1.0),
        ];
        let merged = combine(&a, &b, Continuity::C2).unwrap();
        assert_eq!(merged.len(), b.len());
        assert_eq!(&merged[3..], &b[3..]);

        let d1a = derivative(&a);
        let d1m = derivative(&merged);
        assert_points_eq(
            evaluate_at(&d1a, 1.0).unwrap(),
            evaluate_at(&d1m, 0.0).unwrap(),
            1e-9,
        );
        assert_points_eq(
            evaluate_at(&derivative(&d1a), 1.0).unwrap(),
            evaluate_at(&derivative(&d1m), 0.0).unwrap(),
            1e-9,
        );
    }

    #[test]
    fn test_combine_rejects_short_curves() {
        let a = cubic();
        let short = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
        assert_eq!(
            combine(&a, &short, Continuity::C2),
            Err(CurveError::InvalidContinuity {
                continuity: 2,
                required: 4,
                actual: 3
            })
        );
        assert!(combine(&short, &a, Continuity::C1).is_ok());
    }

    #[test]
    fn test_derivative_of_line() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(2.0, 4.0)];
        let d = derivative(&line);
        assert_eq!(d, vec![Point2::new(2.0, 4.0)]);
    }

    #[test]
    fn test_f32_support() {
        let points: Vec<Point2<f32>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 0.0),
        ];
        let mid = de_casteljau(&points, 0.5).unwrap();
        assert_relative_eq!(mid.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(mid.y, 1.0, epsilon = 1e-6);
    }
}
