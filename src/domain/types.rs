//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and evaluation
//! - exported to JSON/text
//! - reloaded later (after external edits) for re-evaluation

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SplineError;

/// A 2D point (or a 2D vector, for derivative control polygons).
pub type Point2 = nalgebra::Vector2<f64>;

/// Serde adapter keeping points as `{"x": .., "y": ..}` objects in JSON.
pub mod xy_points {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Point2;

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(points: &[Point2], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(points.iter().map(|p| Xy { x: p.x, y: p.y }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point2>, D::Error> {
        let raw = Vec::<Xy>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|p| Point2::new(p.x, p.y)).collect())
    }
}

/// Check that a polygon of `control_points` points, `degree` and a knot
/// vector of `knots` entries describe a B-spline.
///
/// Requires `degree < control_points` and `knots == control_points + degree + 1`.
pub fn check_curve_shape(control_points: usize, degree: usize, knots: usize) -> Result<(), SplineError> {
    if control_points == 0 {
        return Err(SplineError::EmptyControlPolygon);
    }
    if degree >= control_points {
        return Err(SplineError::InvalidDegree { degree, control_points });
    }
    let expected = control_points + degree + 1;
    if knots != expected {
        return Err(SplineError::KnotCount { expected, found: knots });
    }
    Ok(())
}

/// A labeled group of raw sample points, as read from the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGroup {
    pub label: String,
    pub points: Vec<Point2>,
}

/// A B-spline curve: degree, knot vector and control polygon.
///
/// Fields are public because control points are expected to be edited after a
/// fit; every evaluation entry point re-validates the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BSplineCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    #[serde(with = "xy_points")]
    pub control_points: Vec<Point2>,
}

impl BSplineCurve {
    /// Build a curve, checking `knots.len() == control_points.len() + degree + 1`.
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point2>) -> Result<Self, SplineError> {
        let curve = Self {
            degree,
            knots,
            control_points,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> Result<(), SplineError> {
        check_curve_shape(self.control_points.len(), self.degree, self.knots.len())
    }
}

/// Curvature at one curve sample.
///
/// `Undefined` marks a zero-length tangent, where `|x'y'' - y'x''| / |r'|^3`
/// has no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curvature {
    Defined(f64),
    Undefined,
}

impl Curvature {
    pub fn value(self) -> Option<f64> {
        match self {
            Curvature::Defined(k) => Some(k),
            Curvature::Undefined => None,
        }
    }

    /// Hard accessor: an undefined sample becomes `DegenerateTangent`.
    pub fn try_value(self, index: usize) -> Result<f64, SplineError> {
        self.value().ok_or(SplineError::DegenerateTangent { index })
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Curvature::Defined(_))
    }
}

/// Goodness-of-fit diagnostics for one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitQuality {
    /// Root-mean-square distance between samples and the curve at their parameters.
    pub rms: f64,
    /// Largest sample-to-curve distance.
    pub max_error: f64,
    /// Largest defined curvature along the sampled curve.
    pub max_curvature: Option<f64>,
    /// Number of curve samples with undefined curvature.
    pub undefined_curvature: usize,
}

/// Everything computed for one successfully processed group.
#[derive(Debug, Clone)]
pub struct GroupFit {
    pub label: String,
    /// Raw samples (empty when the curve came from a JSON file without samples).
    pub samples: Vec<Point2>,
    pub curve: BSplineCurve,
    /// Curve sampled at `m` uniform parameters.
    pub points: Vec<Point2>,
    /// Curvature, index-aligned with `points`.
    pub curvature: Vec<Curvature>,
    pub quality: Option<FitQuality>,
}

/// A group that could not be processed, with the specific failure kind.
#[derive(Debug, Clone)]
pub struct GroupFailure {
    pub label: String,
    pub error: SplineError,
}

/// Fully-resolved run configuration.
///
/// This is derived from CLI flags (plus environment/defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Polynomial degree `p`.
    pub degree: usize,
    /// Number of control points `nC` per group.
    pub control_points: usize,
    /// Number of curve samples `m`.
    pub curve_samples: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub output: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
    pub export_curvature: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            degree: 3,
            control_points: 5,
            curve_samples: 100,
            plot: false,
            plot_width: 80,
            plot_height: 24,
            output: None,
            export_curve: None,
            export_curvature: None,
        }
    }
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub curves: Vec<CurveRecord>,
}

/// One labeled curve inside a `CurveFile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveRecord {
    pub label: String,
    #[serde(flatten)]
    pub curve: BSplineCurve,
    /// Source samples, kept so diagnostics can be recomputed after edits.
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "xy_points")]
    pub samples: Vec<Point2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_serialize_as_xy_objects() {
        let curve = BSplineCurve::new(1, vec![0.0, 0.0, 1.0, 1.0], vec![Point2::zeros(), Point2::new(1.5, -2.0)])
            .unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        assert!(json.contains(r#""control_points":[{"x":0.0,"y":0.0},{"x":1.5,"y":-2.0}]"#));
        let back: BSplineCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, curve);
    }

    #[test]
    fn huge_degree_is_rejected_without_overflow() {
        let json = r#"{"degree":18446744073709551615,"knots":[0,1],"control_points":[{"x":0,"y":0},{"x":1,"y":1}]}"#;
        let curve: BSplineCurve = serde_json::from_str(json).unwrap();
        assert_eq!(
            curve.validate(),
            Err(SplineError::InvalidDegree {
                degree: usize::MAX,
                control_points: 2,
            })
        );
    }

    #[test]
    fn degree_must_be_below_control_point_count() {
        let cps = vec![Point2::zeros(), Point2::new(1.0, 0.0)];
        let err = BSplineCurve::new(2, vec![0.0, 0.0, 0.0, 1.0, 1.0], cps).unwrap_err();
        assert_eq!(err, SplineError::InvalidDegree { degree: 2, control_points: 2 });
    }

    #[test]
    fn curve_rejects_wrong_knot_count() {
        let cps = vec![Point2::zeros(), Point2::new(1.0, 0.0)];
        let err = BSplineCurve::new(1, vec![0.0, 0.0, 1.0], cps).unwrap_err();
        assert_eq!(err, SplineError::KnotCount { expected: 4, found: 3 });
    }

    #[test]
    fn undefined_curvature_is_degenerate_tangent() {
        assert_eq!(
            Curvature::Undefined.try_value(7),
            Err(SplineError::DegenerateTangent { index: 7 })
        );
        assert_eq!(Curvature::Defined(0.5).try_value(0), Ok(0.5));
    }

    #[test]
    fn curve_file_round_trips_through_json() {
        let record = CurveRecord {
            label: "hub".to_string(),
            curve: BSplineCurve::new(1, vec![0.0, 0.0, 1.0, 1.0], vec![Point2::zeros(), Point2::new(1.0, 1.0)])
                .unwrap(),
            samples: Vec::new(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"degree\":1"));
        assert!(!json.contains("samples"));
        let back: CurveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.curve, record.curve);
    }
}
