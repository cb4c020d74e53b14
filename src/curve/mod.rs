//! B-spline curve evaluation, derivative reduction and curvature.
//!
//! The free functions operate on raw `(control_points, degree, knots)` so they
//! accept edited polygons directly; `BSplineCurve` gets thin method wrappers.

pub mod curvature;
pub mod derivative;
pub mod evaluate;

pub use curvature::*;
pub use derivative::*;
pub use evaluate::{evaluate_curve, point_at};

use crate::domain::{BSplineCurve, Curvature, Point2};
use crate::error::SplineError;

impl BSplineCurve {
    /// Sample the curve at `samples` uniform parameters.
    pub fn evaluate(&self, samples: usize) -> Result<Vec<Point2>, SplineError> {
        evaluate_curve(&self.control_points, self.degree, &self.knots, samples)
    }

    /// The derivative curve (degree `p-1`, one fewer control point).
    pub fn derivative(&self) -> Result<BSplineCurve, SplineError> {
        reduce(&self.control_points, self.degree, &self.knots)
    }

    /// Curvature at the same parameters as [`BSplineCurve::evaluate`].
    pub fn curvature(&self, samples: usize) -> Result<Vec<Curvature>, SplineError> {
        compute_curvature(&self.control_points, self.degree, &self.knots, samples)
    }
}
