//! The editable curve entity.
//!
//! A [`Curve`] owns an ordered list of control points together with the data
//! its kind needs: one weight per point for rational Bézier curves and a
//! degree for B-splines. Editing methods mutate it in place; [`Curve::sample`]
//! reads it and produces the points to draw.
//!
//! Structural operations (degree elevation and reduction, splitting, merging
//! and joining) are only defined for the Bézier kinds.
//!
//! # Example
//!
//! ```
//! use curvum::{Curve, CurveKind, Point2};
//! use curvum::curves::Continuity;
//!
//! let mut a = Curve::with_points(
//!     CurveKind::Bezier,
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Point2::new(2.0, 0.0)],
//! );
//! a.elevate_degree().unwrap();
//! assert_eq!(a.control_points().len(), 4);
//!
//! let mut b = Curve::with_points(
//!     CurveKind::Bezier,
//!     vec![Point2::new(5.0, 0.0), Point2::new(6.0, 1.0), Point2::new(7.0, 0.0)],
//! );
//! Curve::join(&a, &mut b, Continuity::C1).unwrap();
//! assert_eq!(b.control_points()[0], Point2::new(2.0, 0.0));
//! ```

use crate::bounds::Aabb2;
use crate::config::CurveConfig;
use crate::curves::{bezier, bspline, interpolate, rational, Continuity, SampleBoundary};
use crate::error::CurveError;
use crate::hull;
use crate::primitives::{Affine2, Point2, Vec2};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// The family a curve belongs to, which decides how it is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    /// The control polygon itself.
    Control,
    /// Polynomial Bézier curve.
    Bezier,
    /// Rational Bézier curve with one weight per control point.
    WeightedBezier,
    /// Piecewise cubic Bézier curve through every control point.
    CubicBezierInterpolated,
    /// Lagrange interpolating polynomial.
    Lagrange,
    /// Natural cubic spline through every control point.
    CubicSpline,
    /// Clamped uniform B-spline, direct basis evaluation.
    BSpline,
    /// Clamped uniform B-spline, De Boor evaluation.
    BSplineDeBoor,
}

impl CurveKind {
    /// Every kind, in declaration order.
    pub const ALL: [CurveKind; 8] = [
        CurveKind::Control,
        CurveKind::Bezier,
        CurveKind::WeightedBezier,
        CurveKind::CubicBezierInterpolated,
        CurveKind::Lagrange,
        CurveKind::CubicSpline,
        CurveKind::BSpline,
        CurveKind::BSplineDeBoor,
    ];

    /// `true` for the kinds that support structural operations.
    #[inline]
    pub fn is_bezier(self) -> bool {
        matches!(self, CurveKind::Bezier | CurveKind::WeightedBezier)
    }

    /// `true` for the B-spline kinds, which carry a degree.
    #[inline]
    pub fn is_bspline(self) -> bool {
        matches!(self, CurveKind::BSpline | CurveKind::BSplineDeBoor)
    }

    /// `true` if per-point weights affect the shape.
    #[inline]
    pub fn is_weighted(self) -> bool {
        self == CurveKind::WeightedBezier
    }
}

/// A curve defined by control points.
///
/// The weight list always has one entry per control point. Weights only
/// influence [`CurveKind::WeightedBezier`] curves; other kinds keep them at
/// their stored values so that retyping is lossless in the points.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve<F> {
    kind: CurveKind,
    control_points: Vec<Point2<F>>,
    weights: Vec<F>,
    degree: usize,
    sample_count: usize,
    boundary: SampleBoundary,
    bounds: Option<Aabb2<F>>,
    rotation: Option<F>,
}

/// Creates a curve of `kind` through `points`, with an optional B-spline
/// degree.
///
/// # Errors
///
/// [`CurveError::InvalidDegree`] if `degree` is `Some(0)`.
pub fn create_curve<F: Float>(
    kind: CurveKind,
    points: Vec<Point2<F>>,
    degree: Option<usize>,
) -> Result<Curve<F>, CurveError> {
    let mut curve = Curve::with_points(kind, points);
    if let Some(degree) = degree {
        curve.set_degree(degree)?;
    }
    Ok(curve)
}

impl<F: Float> Curve<F> {
    /// Creates an empty curve with default settings.
    pub fn new(kind: CurveKind) -> Self {
        Self::with_config(kind, &CurveConfig::default())
    }

    /// Creates an empty curve using the sampling defaults in `config`.
    pub fn with_config(kind: CurveKind, config: &CurveConfig) -> Self {
        Self {
            kind,
            control_points: Vec::new(),
            weights: Vec::new(),
            degree: config.default_degree.max(1),
            sample_count: config.sample_count,
            boundary: config.bspline_boundary,
            bounds: None,
            rotation: None,
        }
    }

    /// Creates a curve with default settings from initial control points.
    ///
    /// Every point starts with weight 1.
    pub fn with_points(kind: CurveKind, points: Vec<Point2<F>>) -> Self {
        let mut curve = Self::new(kind);
        curve.weights = vec![F::one(); points.len()];
        curve.control_points = points;
        curve.refresh_bounds();
        curve
    }

    /// Curve kind.
    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Control points in order.
    #[inline]
    pub fn control_points(&self) -> &[Point2<F>] {
        &self.control_points
    }

    /// One weight per control point.
    #[inline]
    pub fn weights(&self) -> &[F] {
        &self.weights
    }

    /// B-spline degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of parameter values the curve is sampled at.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// B-spline sampling boundary policy.
    #[inline]
    pub fn boundary(&self) -> SampleBoundary {
        self.boundary
    }

    /// Bounding box of the control points, `None` while the curve is empty.
    #[inline]
    pub fn bounding_box(&self) -> Option<Aabb2<F>> {
        self.bounds
    }

    /// Absolute angle in degrees of the last [`rotate`](Self::rotate), if any
    /// since the control points were last replaced.
    #[inline]
    pub fn rotation(&self) -> Option<F> {
        self.rotation
    }

    fn refresh_bounds(&mut self) {
        self.bounds = Aabb2::from_points(self.control_points.iter().copied());
    }

    fn check_index(&self, index: usize) -> Result<(), CurveError> {
        if index < self.control_points.len() {
            Ok(())
        } else {
            Err(CurveError::IndexOutOfBounds {
                index,
                len: self.control_points.len(),
            })
        }
    }

    /// Appends a control point with weight 1.
    pub fn add_point(&mut self, point: Point2<F>) {
        self.control_points.push(point);
        self.weights.push(F::one());
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.expand_to_include(point),
            None => Aabb2::from_point(point),
        });
    }

    /// Moves the control point at `index` to `position`.
    pub fn move_point(&mut self, index: usize, position: Point2<F>) -> Result<(), CurveError> {
        self.check_index(index)?;
        self.control_points[index] = position;
        self.refresh_bounds();
        Ok(())
    }

    /// Removes and returns the control point at `index` along with its weight.
    pub fn remove_point(&mut self, index: usize) -> Result<Point2<F>, CurveError> {
        self.check_index(index)?;
        let removed = self.control_points.remove(index);
        self.weights.remove(index);
        self.refresh_bounds();
        Ok(removed)
    }

    /// Sets the weight of the control point at `index`.
    ///
    /// The value is not validated; non-positive weights surface as
    /// [`CurveError::DegenerateWeights`] when the curve is sampled.
    pub fn set_weight(&mut self, index: usize, weight: F) -> Result<(), CurveError> {
        self.check_index(index)?;
        self.weights[index] = weight;
        Ok(())
    }

    /// Sets the B-spline degree; it must be at least 1.
    pub fn set_degree(&mut self, degree: usize) -> Result<(), CurveError> {
        if degree == 0 {
            return Err(CurveError::InvalidDegree(degree));
        }
        self.degree = degree;
        Ok(())
    }

    /// Sets the number of samples produced by [`sample`](Self::sample).
    pub fn set_sample_count(&mut self, sample_count: usize) {
        self.sample_count = sample_count;
    }

    /// Sets the B-spline sampling boundary policy.
    pub fn set_boundary(&mut self, boundary: SampleBoundary) {
        self.boundary = boundary;
    }

    /// Offsets every control point by `(dx, dy)`.
    pub fn translate(&mut self, dx: F, dy: F) {
        let offset = Vec2::new(dx, dy);
        for p in &mut self.control_points {
            *p = *p + offset;
        }
        self.bounds = self.bounds.map(|b| b.translated(offset));
    }

    /// Rotates the curve to the absolute angle `target_degrees`.
    ///
    /// The rotation applied is the difference to the previous target (the
    /// whole target on the first call) about the center of the bounding box,
    /// so repeating a target is a no-op. An empty curve has nothing to rotate
    /// and records no angle.
    pub fn rotate(&mut self, target_degrees: F) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let delta = target_degrees - self.rotation.unwrap_or_else(F::zero);
        self.rotation = Some(target_degrees);
        if delta == F::zero() {
            return;
        }
        Affine2::rotation_degrees_around(delta, bounds.center()).apply_in_place(&mut self.control_points);
        self.refresh_bounds();
    }

    /// Convex hull of the control points, when there are at least three.
    pub fn convex_hull(&self) -> Option<Vec<Point2<F>>> {
        (self.control_points.len() >= 3).then(|| hull::convex_hull(&self.control_points))
    }

    /// A new curve of `kind` with the same control points and settings.
    ///
    /// Weights are reset to 1 and rotation state is dropped.
    pub fn retype(&self, kind: CurveKind) -> Self {
        Self {
            kind,
            weights: vec![F::one(); self.control_points.len()],
            rotation: None,
            ..self.clone()
        }
    }

    /// The Bézier control sequence actually drawn.
    ///
    /// For [`CurveKind::CubicBezierInterpolated`] this is four points per
    /// segment between consecutive control points; every other kind returns
    /// its control points.
    pub fn expanded_control_points(&self) -> Vec<Point2<F>> {
        match self.kind {
            CurveKind::CubicBezierInterpolated => interpolate::cubic_bezier_interpolated(&self.control_points)
                .unwrap_or_else(|_| self.control_points.clone()),
            _ => self.control_points.clone(),
        }
    }

    /// Samples the curve according to its kind.
    ///
    /// # Errors
    ///
    /// Only rational curves fail, with [`CurveError::DegenerateWeights`]
    /// when the weights make the denominator vanish.
    pub fn sample(&self) -> Result<Vec<Point2<F>>, CurveError> {
        let points = &self.control_points;
        let n = self.sample_count;
        let samples = match self.kind {
            CurveKind::Control => points.clone(),
            CurveKind::Bezier => bezier::evaluate(points, n),
            CurveKind::WeightedBezier => rational::evaluate_weighted(points, &self.weights, n)?,
            CurveKind::CubicBezierInterpolated => interpolate::sample_cubic_bezier_interpolated(points, n),
            CurveKind::Lagrange => interpolate::lagrange_curve(points, n),
            CurveKind::CubicSpline => interpolate::cubic_spline_curve(points, n),
            CurveKind::BSpline => bspline::sample_direct(points, self.degree, n, self.boundary),
            CurveKind::BSplineDeBoor => bspline::sample_de_boor(points, self.degree, n, self.boundary),
        };
        log::trace!("sampled {:?} curve into {} points", self.kind, samples.len());
        Ok(samples)
    }

    fn require_bezier(&self, operation: &'static str) -> Result<(), CurveError> {
        if self.kind.is_bezier() {
            return Ok(());
        }
        log::warn!("{operation} rejected for {:?} curve", self.kind);
        Err(CurveError::TypeMismatch {
            operation,
            kind: self.kind,
        })
    }

    fn replace_points(&mut self, points: Vec<Point2<F>>, weights: Vec<F>) {
        self.control_points = points;
        self.weights = weights;
        self.rotation = None;
        self.refresh_bounds();
    }

    /// Weights as seen by rational operations: unit for polynomial kinds.
    fn effective_weights(&self) -> Vec<F> {
        if self.kind.is_weighted() {
            self.weights.clone()
        } else {
            vec![F::one(); self.control_points.len()]
        }
    }

    /// Raises the degree by one without changing the shape.
    pub fn elevate_degree(&mut self) -> Result<(), CurveError> {
        self.require_bezier("elevate_degree")?;
        if self.control_points.is_empty() {
            return Err(rejected(
                "elevate_degree",
                CurveError::InsufficientPoints {
                    required: 1,
                    actual: 0,
                },
            ));
        }

        let before = self.control_points.len();
        let (points, weights) = if self.kind.is_weighted() {
            rational::elevate_weighted(&self.control_points, &self.weights)
                .map_err(|err| rejected("elevate_degree", err))?
        } else {
            let points = bezier::elevate_degree(&self.control_points);
            let weights = vec![F::one(); points.len()];
            (points, weights)
        };
        self.replace_points(points, weights);
        log::debug!("elevated {:?} curve: {before} -> {} control points", self.kind, self.control_points.len());
        Ok(())
    }

    /// Lowers the degree by one with a least-squares fit.
    ///
    /// This is an approximation: end points are kept exactly, the interior is
    /// the best fit whose elevation matches the current control points.
    pub fn reduce_degree(&mut self) -> Result<(), CurveError> {
        self.require_bezier("reduce_degree")?;

        let before = self.control_points.len();
        let (points, weights) = if self.kind.is_weighted() {
            rational::reduce_weighted(&self.control_points, &self.weights)
        } else {
            bezier::reduce_degree(&self.control_points).map(|points| {
                let weights = vec![F::one(); points.len()];
                (points, weights)
            })
        }
        .map_err(|err| rejected("reduce_degree", err))?;

        self.replace_points(points, weights);
        log::debug!("reduced {:?} curve: {before} -> {} control points", self.kind, self.control_points.len());
        Ok(())
    }

    /// Splits the curve at `u` into two curves of the same kind.
    ///
    /// The first runs from the start to the split point, the second from the
    /// split point to the end. Both inherit this curve's settings.
    pub fn split(&self, u: F) -> Result<(Self, Self), CurveError> {
        self.require_bezier("split")?;

        let ((left, left_w), (right, right_w)) = if self.kind.is_weighted() {
            rational::split_weighted(&self.control_points, &self.weights, u)
        } else {
            bezier::split(&self.control_points, u).map(|(left, right)| {
                let left_w = vec![F::one(); left.len()];
                let right_w = vec![F::one(); right.len()];
                ((left, left_w), (right, right_w))
            })
        }
        .map_err(|err| rejected("split", err))?;

        let mut first = self.clone();
        first.replace_points(left, left_w);
        let mut second = self.clone();
        second.replace_points(right, right_w);
        log::debug!("split {:?} curve of {} control points", self.kind, self.control_points.len());
        Ok((first, second))
    }

    /// A new curve continuing `a` with `b`'s shape.
    ///
    /// The result is `b` with its leading control points replaced so that it
    /// starts where `a` ends and matches `a`'s derivatives up to
    /// `continuity`. It keeps `b`'s settings. If either operand is rational
    /// the result is rational and the derivatives are matched on the rational
    /// curves; see [`rational::combine_weighted`].
    pub fn merge(a: &Self, b: &Self, continuity: Continuity) -> Result<Self, CurveError> {
        a.require_bezier("merge")?;
        b.require_bezier("merge")?;

        let weighted = a.kind.is_weighted() || b.kind.is_weighted();
        let (points, weights) = if weighted {
            rational::combine_weighted(
                &a.control_points,
                &a.effective_weights(),
                &b.control_points,
                &b.effective_weights(),
                continuity,
            )
        } else {
            bezier::combine(&a.control_points, &b.control_points, continuity).map(|points| {
                let weights = vec![F::one(); points.len()];
                (points, weights)
            })
        }
        .map_err(|err| rejected("merge", err))?;

        let mut merged = b.clone();
        merged.kind = if weighted {
            CurveKind::WeightedBezier
        } else {
            CurveKind::Bezier
        };
        merged.replace_points(points, weights);
        log::debug!(
            "merged {} and {} control points with C{} continuity",
            a.control_points.len(),
            b.control_points.len(),
            continuity.order()
        );
        Ok(merged)
    }

    /// Like [`merge`](Self::merge), but replaces `b` in place; `a` is left
    /// untouched. On error `b` is unchanged.
    pub fn join(a: &Self, b: &mut Self, continuity: Continuity) -> Result<(), CurveError> {
        *b = Self::merge(a, b, continuity)?;
        Ok(())
    }
}

fn rejected(operation: &str, err: CurveError) -> CurveError {
    log::warn!("{operation} failed: {err}");
    err
}
