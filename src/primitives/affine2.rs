//! 2D rigid transforms applied to control points.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D affine transformation matrix.
///
/// Represented as a 2x3 matrix in row-major order:
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// Curves only need the rigid subset (translation and rotation), which is
/// what the constructors provide.
///
/// # Example
///
/// ```
/// use curvum::primitives::{Affine2, Point2};
///
/// // Quarter turn about (1, 1)
/// let t: Affine2<f64> = Affine2::rotation_degrees_around(90.0, Point2::new(1.0, 1.0));
/// let p = t.apply_point(Point2::new(2.0, 1.0));
/// assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2<F> {
    pub a: F,
    pub b: F,
    pub c: F,
    pub d: F,
    pub tx: F,
    pub ty: F,
}

impl<F: Float> Affine2<F> {
    /// Creates the identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self {
            a: F::one(),
            b: F::zero(),
            c: F::zero(),
            d: F::one(),
            tx: F::zero(),
            ty: F::zero(),
        }
    }

    /// Creates a translation transform.
    #[inline]
    pub fn translation(offset: Vec2<F>) -> Self {
        Self {
            tx: offset.x,
            ty: offset.y,
            ..Self::identity()
        }
    }

    /// Creates a rotation about the origin.
    ///
    /// Angle is in radians, positive is counter-clockwise in a y-up frame.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self {
            a: cos_a,
            b: -sin_a,
            c: sin_a,
            d: cos_a,
            tx: F::zero(),
            ty: F::zero(),
        }
    }

    /// Creates a rotation about `center`.
    pub fn rotation_around(angle: F, center: Point2<F>) -> Self {
        Self::translation(-center.to_vec())
            .then(Self::rotation(angle))
            .then(Self::translation(center.to_vec()))
    }

    /// Same as [`rotation_around`](Self::rotation_around) with the angle in degrees.
    #[inline]
    pub fn rotation_degrees_around(degrees: F, center: Point2<F>) -> Self {
        Self::rotation_around(degrees.to_radians(), center)
    }

    /// Applies this transform to a point.
    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Applies this transform to every point in place.
    pub fn apply_in_place(&self, points: &mut [Point2<F>]) {
        for p in points.iter_mut() {
            *p = self.apply_point(*p);
        }
    }

    /// Composes this transform with another (`self * other`).
    ///
    /// The resulting transform applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Returns a transform that applies `self` first, then `other`.
    #[inline]
    pub fn then(&self, other: Self) -> Self {
        other.compose(self)
    }
}

impl<F: Float> Default for Affine2<F> {
    fn default() -> Self {
        Self::identity()
    }
}
