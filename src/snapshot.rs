//! Plain-data form of a curve for persistence.
//!
//! A [`CurveSnapshot`] holds exactly what is needed to rebuild a [`Curve`]:
//! its kind, its control points, the weights of a rational curve and the
//! degree of a B-spline. Choosing a container format (JSON, TOML, a binary
//! encoding) is left to the application; any serde format works.

use crate::curve::{Curve, CurveKind};
use crate::error::CurveError;
use crate::primitives::Point2;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Serializable `(kind, points, weights?, degree?)` description of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSnapshot<F> {
    /// Curve family.
    pub kind: CurveKind,
    /// Control points in order.
    pub points: Vec<Point2<F>>,
    /// One weight per point; present only for rational curves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<F>>,
    /// B-spline degree; present only for B-spline kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
}

impl<F: Float> Curve<F> {
    /// Captures the persistent part of this curve.
    ///
    /// Weights are recorded only for rational curves and the degree only for
    /// B-splines.
    pub fn snapshot(&self) -> CurveSnapshot<F> {
        let kind = self.kind();
        CurveSnapshot {
            kind,
            points: self.control_points().to_vec(),
            weights: kind.is_weighted().then(|| self.weights().to_vec()),
            degree: kind.is_bspline().then(|| self.degree()),
        }
    }

    /// Rebuilds a curve with default settings from a snapshot.
    ///
    /// # Errors
    ///
    /// [`CurveError::WeightMismatch`] if the weights do not pair up with the
    /// points and [`CurveError::InvalidDegree`] for a degree of 0.
    pub fn from_snapshot(snapshot: CurveSnapshot<F>) -> Result<Self, CurveError> {
        let CurveSnapshot {
            kind,
            points,
            weights,
            degree,
        } = snapshot;

        if let Some(weights) = &weights {
            if weights.len() != points.len() {
                return Err(CurveError::WeightMismatch {
                    points: points.len(),
                    weights: weights.len(),
                });
            }
        }

        let mut curve = Curve::with_points(kind, points);
        if let Some(degree) = degree {
            curve.set_degree(degree)?;
        }
        for (i, w) in weights.into_iter().flatten().enumerate() {
            curve.set_weight(i, w)?;
        }
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 2.0),
            Point2::new(4.0, 0.0),
        ]
    }

    #[test]
    fn test_snapshot_fields_follow_kind() {
        let bezier = Curve::with_points(CurveKind::Bezier, points()).snapshot();
        assert_eq!(bezier.weights, None);
        assert_eq!(bezier.degree, None);

        let spline = Curve::with_points(CurveKind::BSplineDeBoor, points()).snapshot();
        assert_eq!(spline.degree, Some(3));

        let mut weighted = Curve::with_points(CurveKind::WeightedBezier, points());
        weighted.set_weight(2, 0.5).unwrap();
        assert_eq!(weighted.snapshot().weights, Some(vec![1.0, 1.0, 0.5, 1.0]));
    }

    #[test]
    fn test_json_round_trip() {
        let mut curve = Curve::with_points(CurveKind::WeightedBezier, points());
        curve.set_weight(1, 2.5).unwrap();

        let json = serde_json::to_string(&curve.snapshot()).unwrap();
        let restored: CurveSnapshot<f64> = serde_json::from_str(&json).unwrap();
        let rebuilt = Curve::from_snapshot(restored).unwrap();

        assert_eq!(rebuilt.kind(), CurveKind::WeightedBezier);
        assert_eq!(rebuilt.control_points(), curve.control_points());
        assert_eq!(rebuilt.weights(), curve.weights());
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let json = r#"{"kind":"BSpline","points":[{"x":0.0,"y":0.0},{"x":1.0,"y":1.0}]}"#;
        let snapshot: CurveSnapshot<f64> = serde_json::from_str(json).unwrap();
        let curve = Curve::from_snapshot(snapshot).unwrap();
        assert_eq!(curve.kind(), CurveKind::BSpline);
        assert_eq!(curve.degree(), 3);
        assert_eq!(curve.weights(), &[1.0, 1.0]);
    }

    #[test]
    fn test_rejects_inconsistent_snapshot() {
        let snapshot = CurveSnapshot {
            kind: CurveKind::WeightedBezier,
            points: points(),
            weights: Some(vec![1.0, 2.0]),
            degree: None,
        };
        assert_eq!(
            Curve::from_snapshot(snapshot),
            Err(CurveError::WeightMismatch {
                points: 4,
                weights: 2
            })
        );

        let snapshot = CurveSnapshot {
            kind: CurveKind::BSpline,
            points: points(),
            weights: None,
            degree: Some(0),
        };
        assert_eq!(Curve::from_snapshot(snapshot), Err(CurveError::InvalidDegree(0)));
    }
}
