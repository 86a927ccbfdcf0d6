//! Curves that pass through their control points.
//!
//! Three constructions are available:
//!
//! - Lagrange polynomial interpolation of each coordinate over the point
//!   index.
//! - Natural cubic spline interpolation (zero second derivative at both
//!   ends) of each coordinate over the point index.
//! - A piecewise cubic Bézier curve through the points, C2 at interior joins,
//!   whose inner control points come from one banded linear solve.
//!
//! # Example
//!
//! ```
//! use curvum::{Point2, curves::interpolate};
//!
//! let through = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(2.0, 0.0),
//! ];
//!
//! let bezier = interpolate::cubic_bezier_interpolated(&through).unwrap();
//! assert_eq!(bezier.len(), 8);
//! assert_eq!(bezier[3], through[1]);
//! ```

use super::{bezier, scalar};
use crate::error::CurveError;
use crate::linalg::solve_tridiagonal;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Evaluates the Lagrange polynomial through `(x[j], y[j])` at every
/// abscissa in `x_interp`.
///
/// Quadratic in the node count per query. Nodes must be distinct.
pub fn lagrange<F: Float>(x: &[F], y: &[F], x_interp: &[F]) -> Vec<F> {
    x_interp
        .iter()
        .map(|&xi| {
            x.iter().zip(y).enumerate().fold(F::zero(), |acc, (j, (&xj, &yj))| {
                let basis = x
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != j)
                    .fold(F::one(), |l, (_, &xk)| l * (xi - xk) / (xj - xk));
                acc + yj * basis
            })
        })
        .collect()
}

/// `count` values evenly spaced over `[0, end]`, both ends included.
fn index_parameters<F: Float>(end: F, count: usize) -> impl Iterator<Item = F> {
    super::unit_parameters::<F>(count).map(move |t| t * end)
}

/// Samples the Lagrange curve through `points`, parameterised by point index,
/// at `sample_count` parameters over `[0, n - 1]`.
pub fn lagrange_curve<F: Float>(points: &[Point2<F>], sample_count: usize) -> Vec<Point2<F>> {
    if points.is_empty() {
        return Vec::new();
    }
    let nodes: Vec<F> = (0..points.len()).map(scalar).collect();
    let xs: Vec<F> = points.iter().map(|p| p.x).collect();
    let ys: Vec<F> = points.iter().map(|p| p.y).collect();
    let params: Vec<F> = index_parameters(scalar(points.len() - 1), sample_count).collect();

    let x_new = lagrange(&nodes, &xs, &params);
    let y_new = lagrange(&nodes, &ys, &params);
    x_new.into_iter().zip(y_new).map(|(x, y)| Point2::new(x, y)).collect()
}

/// A scalar natural cubic spline `s(t)`.
///
/// Stores the nodes, the values and the second derivative at every node.
/// Outside the node range the first or last cubic piece is extended.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline1<F> {
    nodes: Vec<F>,
    values: Vec<F>,
    second_derivatives: Vec<F>,
}

impl<F: Float> CubicSpline1<F> {
    /// Fits the natural cubic spline through `(x[i], y[i])`.
    ///
    /// `x` must be strictly increasing. One node gives a constant function and
    /// two nodes a straight line.
    ///
    /// # Errors
    ///
    /// [`CurveError::InsufficientPoints`] for no nodes and
    /// [`CurveError::SingularSystem`] if nodes repeat.
    pub fn natural(x: &[F], y: &[F]) -> Result<Self, CurveError> {
        debug_assert_eq!(x.len(), y.len());
        let n = x.len().min(y.len());
        if n == 0 {
            return Err(CurveError::InsufficientPoints {
                required: 1,
                actual: 0,
            });
        }

        let h: Vec<F> = x[..n].windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&hi| !(hi > F::zero())) {
            return Err(CurveError::SingularSystem);
        }

        let mut second_derivatives = vec![F::zero(); n];
        if n > 2 {
            let six = scalar::<F>(6);
            let two = scalar::<F>(2);
            let interior = n - 2;
            let mut sub = Vec::with_capacity(interior);
            let mut diag = Vec::with_capacity(interior);
            let mut sup = Vec::with_capacity(interior);
            let mut rhs = Vec::with_capacity(interior);
            for i in 1..n - 1 {
                sub.push(h[i - 1]);
                diag.push(two * (h[i - 1] + h[i]));
                sup.push(h[i]);
                rhs.push(six * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]));
            }
            let solved = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
            second_derivatives[1..n - 1].copy_from_slice(&solved);
        }

        Ok(Self {
            nodes: x[..n].to_vec(),
            values: y[..n].to_vec(),
            second_derivatives,
        })
    }

    /// Evaluates the spline at `t`.
    pub fn eval(&self, t: F) -> F {
        let n = self.nodes.len();
        if n == 1 {
            return self.values[0];
        }

        // Index of the piece containing t, clamped to the outer pieces.
        let upper = self.nodes.partition_point(|&node| node <= t);
        let i = upper.clamp(1, n - 1) - 1;

        let (x0, x1) = (self.nodes[i], self.nodes[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.second_derivatives[i], self.second_derivatives[i + 1]);
        let h = x1 - x0;
        let six = scalar::<F>(6);

        let a = x1 - t;
        let b = t - x0;
        m0 * a * a * a / (six * h)
            + m1 * b * b * b / (six * h)
            + (y0 / h - m0 * h / six) * a
            + (y1 / h - m1 * h / six) * b
    }

    /// Node abscissae.
    pub fn nodes(&self) -> &[F] {
        &self.nodes
    }
}

/// Fits a natural cubic spline; see [`CubicSpline1::natural`].
pub fn natural_cubic_spline<F: Float>(x: &[F], y: &[F]) -> Result<CubicSpline1<F>, CurveError> {
    CubicSpline1::natural(x, y)
}

/// Samples the natural cubic spline through `points`, fitting `x(t)` and
/// `y(t)` separately over the point index and sampling `[0, n - 1]`.
///
/// A single point is returned on its own, whatever `sample_count` is.
pub fn cubic_spline_curve<F: Float>(points: &[Point2<F>], sample_count: usize) -> Vec<Point2<F>> {
    match points.len() {
        0 => return Vec::new(),
        1 => return points.to_vec(),
        _ => {}
    }

    let nodes: Vec<F> = (0..points.len()).map(scalar).collect();
    let xs: Vec<F> = points.iter().map(|p| p.x).collect();
    let ys: Vec<F> = points.iter().map(|p| p.y).collect();

    // Integer nodes are strictly increasing, so neither fit can fail.
    let (Ok(sx), Ok(sy)) = (CubicSpline1::natural(&nodes, &xs), CubicSpline1::natural(&nodes, &ys)) else {
        return points.to_vec();
    };

    index_parameters(scalar(points.len() - 1), sample_count)
        .map(|t| Point2::new(sx.eval(t), sy.eval(t)))
        .collect()
}

/// Inner control points `(A, B)` of the piecewise cubic Bézier curve through
/// `points`.
///
/// Segment `i` runs `Pᵢ, Aᵢ, Bᵢ, Pᵢ₊₁`. The `Aᵢ` solve the banded system
///
/// ```text
/// 2A₀ + A₁            = P₀ + 2P₁
/// Aᵢ₋₁ + 4Aᵢ + Aᵢ₊₁   = 2(2Pᵢ + Pᵢ₊₁)
/// 2Aₙ₋₂ + 7Aₙ₋₁       = 8Pₙ₋₁ + Pₙ
/// ```
///
/// and `Bᵢ = 2Pᵢ₊₁ - Aᵢ₊₁`, `Bₙ₋₁ = (Aₙ₋₁ + Pₙ) / 2`. A single segment is the
/// straight line with its inner points at the thirds.
pub fn cubic_bezier_coefficients<F: Float>(
    points: &[Point2<F>],
) -> Result<(Vec<Point2<F>>, Vec<Point2<F>>), CurveError> {
    if points.len() < 2 {
        return Err(CurveError::InsufficientPoints {
            required: 2,
            actual: points.len(),
        });
    }
    let n = points.len() - 1;
    let two = scalar::<F>(2);

    if n == 1 {
        let step = (points[1] - points[0]) / scalar::<F>(3);
        return Ok((vec![points[0] + step], vec![points[1] - step]));
    }

    let p: Vec<Vec2<F>> = points.iter().map(|pt| pt.to_vec()).collect();
    let mut sub = vec![F::one(); n];
    let mut diag = vec![scalar::<F>(4); n];
    let sup = vec![F::one(); n];
    let mut rhs: Vec<Vec2<F>> = (0..n).map(|i| (p[i] * two + p[i + 1]) * two).collect();

    diag[0] = two;
    rhs[0] = p[0] + p[1] * two;
    sub[n - 1] = two;
    diag[n - 1] = scalar(7);
    rhs[n - 1] = p[n - 1] * scalar(8) + p[n];

    let a = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
    let b: Vec<Vec2<F>> = (0..n)
        .map(|i| {
            if i + 1 < n {
                p[i + 1] * two - a[i + 1]
            } else {
                (a[n - 1] + p[n]) / two
            }
        })
        .collect();

    Ok((
        a.into_iter().map(Point2::from_vec).collect(),
        b.into_iter().map(Point2::from_vec).collect(),
    ))
}

/// Control points of the piecewise cubic Bézier curve through `points`, four
/// per segment: `Pᵢ, Aᵢ, Bᵢ, Pᵢ₊₁`.
pub fn cubic_bezier_interpolated<F: Float>(points: &[Point2<F>]) -> Result<Vec<Point2<F>>, CurveError> {
    let (a, b) = cubic_bezier_coefficients(points)?;
    Ok(points
        .windows(2)
        .zip(a.into_iter().zip(b))
        .flat_map(|(ends, (ai, bi))| [ends[0], ai, bi, ends[1]])
        .collect())
}

/// Samples the piecewise cubic Bézier curve through `points`.
///
/// `sample_count` is split evenly across segments, with at least two
/// samples per segment, and never exceeded: a budget below two samples per
/// segment keeps only the leading segments' samples. Fewer than two points
/// are returned unchanged.
pub fn sample_cubic_bezier_interpolated<F: Float>(points: &[Point2<F>], sample_count: usize) -> Vec<Point2<F>> {
    let Ok(control) = cubic_bezier_interpolated(points) else {
        return points.to_vec();
    };
    let segments = points.len() - 1;
    let per_segment = (sample_count / segments).max(2);

    control
        .chunks_exact(4)
        .flat_map(|segment| bezier::evaluate(segment, per_segment))
        .take(sample_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 1.5),
            Point2::new(4.0, -1.0),
            Point2::new(6.0, 0.5),
        ]
    }

    #[test]
    fn test_lagrange_exact_at_nodes() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, -2.0, 0.5, 4.0];
        let out = lagrange(&x, &y, &x);
        for (a, b) in out.iter().zip(&y) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lagrange_reproduces_polynomial() {
        // Three nodes reproduce any quadratic.
        let x = [0.0, 1.0, 2.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v * v - v + 2.0).collect();
        let out = lagrange(&x, &y, &[0.5, 1.5, 4.0]);
        assert_relative_eq!(out[0], 2.25, epsilon = 1e-12);
        assert_relative_eq!(out[1], 7.25, epsilon = 1e-12);
        assert_relative_eq!(out[2], 46.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lagrange_curve_passes_through_points() {
        let points = zigzag();
        // 9 samples over [0, 4] hit every integer index.
        let samples = lagrange_curve(&points, 9);
        assert_eq!(samples.len(), 9);
        for (i, p) in points.iter().enumerate() {
            assert_relative_eq!(samples[2 * i].x, p.x, epsilon = 1e-10);
            assert_relative_eq!(samples[2 * i].y, p.y, epsilon = 1e-10);
        }
        assert!(lagrange_curve::<f64>(&[], 10).is_empty());
    }

    #[test]
    fn test_natural_spline_interpolates() {
        let x = [0.0, 1.0, 2.5, 4.0];
        let y = [0.0, 1.0, -1.0, 2.0];
        let spline = natural_cubic_spline(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_relative_eq!(spline.eval(*xi), *yi, epsilon = 1e-12);
        }
        assert_eq!(spline.nodes(), &x);
    }

    #[test]
    fn test_natural_spline_is_natural() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 2.0, 1.0, 3.0, 0.0];
        let spline = natural_cubic_spline(&x, &y).unwrap();
        // Second difference near the ends tends to zero.
        let h = 1e-4;
        let d2 = |t: f64| (spline.eval(t + h) - 2.0 * spline.eval(t) + spline.eval(t - h)) / (h * h);
        assert_relative_eq!(d2(h), 0.0, epsilon = 1e-2);
        assert_relative_eq!(d2(4.0 - h), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_natural_spline_reproduces_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let spline = natural_cubic_spline(&x, &y).unwrap();
        assert_relative_eq!(spline.eval(1.7), 4.4, epsilon = 1e-12);
    }

    #[test]
    fn test_natural_spline_errors() {
        assert_eq!(
            natural_cubic_spline::<f64>(&[], &[]),
            Err(CurveError::InsufficientPoints {
                required: 1,
                actual: 0
            })
        );
        assert_eq!(
            natural_cubic_spline(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]),
            Err(CurveError::SingularSystem)
        );
    }

    #[test]
    fn test_cubic_spline_curve_small_inputs() {
        let single = vec![Point2::new(2.0, 3.0)];
        assert_eq!(cubic_spline_curve(&single, 100), single);

        let line = vec![Point2::new(0.0, 0.0), Point2::new(2.0, 4.0)];
        let samples = cubic_spline_curve(&line, 5);
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[2].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(samples[2].y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_spline_curve_passes_through_points() {
        let points = zigzag();
        let samples = cubic_spline_curve(&points, 17);
        for (i, p) in points.iter().enumerate() {
            assert_relative_eq!(samples[4 * i].x, p.x, epsilon = 1e-10);
            assert_relative_eq!(samples[4 * i].y, p.y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_single_segment_is_line() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 6.0)];
        let (a, b) = cubic_bezier_coefficients(&points).unwrap();
        assert_eq!(a, vec![Point2::new(1.0, 2.0)]);
        assert_eq!(b, vec![Point2::new(2.0, 4.0)]);
    }

    #[test]
    fn test_interpolated_bezier_passes_through_points() {
        let points = zigzag();
        let control = cubic_bezier_interpolated(&points).unwrap();
        assert_eq!(control.len(), 4 * (points.len() - 1));
        for (i, segment) in control.chunks_exact(4).enumerate() {
            assert_eq!(segment[0], points[i]);
            assert_eq!(segment[3], points[i + 1]);
        }
    }

    #[test]
    fn test_interpolated_bezier_is_smooth() {
        let control = cubic_bezier_interpolated(&zigzag()).unwrap();
        let segments: Vec<&[Point2<f64>]> = control.chunks_exact(4).collect();
        for pair in segments.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            // C1: matching first derivative at the join.
            let d_left = left[3] - left[2];
            let d_right = right[1] - right[0];
            assert_relative_eq!(d_left.x, d_right.x, epsilon = 1e-10);
            assert_relative_eq!(d_left.y, d_right.y, epsilon = 1e-10);
            // C2: matching second difference.
            let s_left = (left[3] - left[2]) - (left[2] - left[1]);
            let s_right = (right[2] - right[1]) - (right[1] - right[0]);
            assert_relative_eq!(s_left.x, s_right.x, epsilon = 1e-10);
            assert_relative_eq!(s_left.y, s_right.y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_coefficients_need_two_points() {
        assert_eq!(
            cubic_bezier_coefficients(&[Point2::new(0.0, 0.0)]),
            Err(CurveError::InsufficientPoints {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_sample_budget() {
        let points = zigzag();
        let samples = sample_cubic_bezier_interpolated(&points, 100);
        assert_eq!(samples.len(), 100);
        assert_eq!(samples[0], points[0]);
        assert_eq!(samples[99], points[4]);

        // 13 / 4 segments = 3 samples each, 12 in total.
        assert_eq!(sample_cubic_bezier_interpolated(&points, 13).len(), 12);

        for budget in [0, 1, 5, 7] {
            let tiny = sample_cubic_bezier_interpolated(&points, budget);
            assert_eq!(tiny.len(), budget);
        }
        assert_eq!(sample_cubic_bezier_interpolated(&points, 5)[0], points[0]);

        let single = vec![Point2::new(1.0, 1.0)];
        assert_eq!(sample_cubic_bezier_interpolated(&single, 100), single);
    }
}
