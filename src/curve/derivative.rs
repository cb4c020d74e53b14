//! Derivative control polygons.
//!
//! The derivative of a degree-`p` B-spline is a degree-`p-1` B-spline with
//!
//! ```text
//! q_i = p (c_{i+1} - c_i) / (k[i+p+1] - k[i+1])     i = 0 .. nC-2
//! ```
//!
//! over the knot vector with its first and last knot removed. Applying the
//! reduction to the result gives the second derivative.

use crate::curve::evaluate::check_shape;
use crate::domain::{BSplineCurve, Point2};
use crate::error::SplineError;

/// Reduce `(control_points, degree, knots)` to its derivative curve.
///
/// A zero knot span (only possible with hand-edited knots) yields a zero
/// derivative vector, mirroring the zero-denominator rule of the basis.
pub fn reduce(control_points: &[Point2], degree: usize, knots: &[f64]) -> Result<BSplineCurve, SplineError> {
    check_shape(control_points, degree, knots)?;
    if degree == 0 || control_points.len() < 2 {
        return Err(SplineError::InvalidDegree {
            degree,
            control_points: control_points.len(),
        });
    }

    let p = degree as f64;
    let derivative: Vec<Point2> = control_points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let span = knots[i + degree + 1] - knots[i + 1];
            if span == 0.0 {
                Point2::zeros()
            } else {
                (pair[1] - pair[0]) * p / span
            }
        })
        .collect();

    Ok(BSplineCurve {
        degree: degree - 1,
        knots: knots[1..knots.len() - 1].to_vec(),
        control_points: derivative,
    })
}
