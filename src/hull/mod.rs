//! Convex hull of a control polygon.
//!
//! Bézier curves lie inside the convex hull of their control points, which
//! makes the hull a useful overlay and a cheap containment check for sampled
//! points. No curve operation depends on it.
//!
//! # Example
//!
//! ```
//! use curvum::hull::convex_hull;
//! use curvum::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 0.5), // Interior point
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! let hull = convex_hull(&points);
//! assert_eq!(hull.len(), 4);
//! ```

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Computes the convex hull of a set of points using Andrew's monotone chain.
///
/// Returns the hull vertices in counter-clockwise order starting from the
/// lexicographically smallest point; the hull is implicitly closed. Collinear
/// points on hull edges are dropped.
///
/// Inputs with fewer than 3 points are returned as-is.
pub fn convex_hull<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });

    let mut lower: Vec<Point2<F>> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= F::zero() {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2<F>> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= F::zero() {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Returns `true` if `point` lies inside or on a CCW convex hull.
///
/// `tolerance` absorbs rounding for points that sit on a hull edge, such as
/// the endpoints of a sampled Bézier curve.
pub fn hull_contains<F: Float>(hull: &[Point2<F>], point: Point2<F>, tolerance: F) -> bool {
    match hull.len() {
        0 => false,
        1 => hull[0].distance(point) <= tolerance,
        2 => {
            let (a, b) = (hull[0], hull[1]);
            let len = a.distance(b);
            if len <= F::epsilon() {
                return a.distance(point) <= tolerance;
            }
            let off_line = cross(a, b, point).abs() / len;
            let along = (point - a).dot(b - a) / (len * len);
            off_line <= tolerance && along >= -tolerance && along <= F::one() + tolerance
        }
        n => (0..n).all(|i| {
            let a = hull[i];
            let b = hull[(i + 1) % n];
            let len = a.distance(b);
            len <= F::epsilon() || cross(a, b, point) / len >= -tolerance
        }),
    }
}

#[inline]
fn cross<F: Float>(o: Point2<F>, a: Point2<F>, b: Point2<F>) -> F {
    (a - o).cross(b - o)
}
