//! Curve sampling at uniform parameter steps.
//!
//! `C(u) = Σ_j N(j,p)(u) c_j`, sampled at `u_i = i / (m - 1)`.
//!
//! The half-open degree-0 basis makes every basis function vanish at `u = 1`,
//! so the final sample is overwritten with the last control point rather than
//! evaluated. Works for any degree, knot vector and (possibly edited) control
//! polygon.

use crate::domain::{Point2, check_curve_shape};
use crate::error::SplineError;
use crate::math::BasisEvaluator;

/// Evaluate the curve at a single parameter without shape validation.
///
/// At `u >= 1` this returns the origin like the raw basis sum; callers that
/// want the clamped endpoint go through [`evaluate_curve`].
pub fn point_at(control_points: &[Point2], degree: usize, knots: &[f64], u: f64) -> Point2 {
    let basis = BasisEvaluator::new(knots, degree);
    let mut sum = Point2::zeros();
    for (j, &c) in control_points.iter().enumerate() {
        let w = basis.value(j, u);
        if w != 0.0 {
            sum += w * c;
        }
    }
    sum
}

/// Sample the curve at `samples` uniform parameters in `[0, 1]`.
pub fn evaluate_curve(
    control_points: &[Point2],
    degree: usize,
    knots: &[f64],
    samples: usize,
) -> Result<Vec<Point2>, SplineError> {
    check_shape(control_points, degree, knots)?;
    if samples < 2 {
        return Err(SplineError::TooFewEvaluationPoints { requested: samples });
    }

    let last = (samples - 1) as f64;
    let mut out: Vec<Point2> = (0..samples - 1)
        .map(|i| point_at(control_points, degree, knots, i as f64 / last))
        .collect();
    out.push(control_points[control_points.len() - 1]);
    Ok(out)
}

pub(crate) fn check_shape(control_points: &[Point2], degree: usize, knots: &[f64]) -> Result<(), SplineError> {
    check_curve_shape(control_points.len(), degree, knots.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::clamped_knots;
    use approx::assert_abs_diff_eq;

    fn polygon() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.5, -1.0),
            Point2::new(4.0, 1.5),
            Point2::new(5.0, 0.0),
        ]
    }

    #[test]
    fn two_samples_are_the_endpoints() {
        let cps = polygon();
        let knots = clamped_knots(3, 5).unwrap();
        let out = evaluate_curve(&cps, 3, &knots, 2).unwrap();
        assert_eq!(out, vec![cps[0], cps[4]]);
    }

    #[test]
    fn last_sample_is_patched_to_last_control_point() {
        let cps = polygon();
        let knots = clamped_knots(3, 5).unwrap();
        assert_eq!(point_at(&cps, 3, &knots, 1.0), Point2::zeros());
        let out = evaluate_curve(&cps, 3, &knots, 100).unwrap();
        assert_eq!(out.len(), 100);
        assert_eq!(out[99], cps[4]);
    }

    #[test]
    fn curve_approaches_the_end_continuously() {
        let cps = polygon();
        let knots = clamped_knots(3, 5).unwrap();
        let near_end = point_at(&cps, 3, &knots, 1.0 - 1e-9);
        assert_abs_diff_eq!(near_end.x, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(near_end.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn degree_one_curve_walks_the_polygon() {
        let cps = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)];
        let knots = clamped_knots(1, 3).unwrap();
        let out = evaluate_curve(&cps, 1, &knots, 5).unwrap();
        assert_eq!(out[2], Point2::new(1.0, 1.0));
        assert_abs_diff_eq!(out[1].x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1].y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn bad_shapes_are_rejected() {
        let cps = polygon();
        let knots = clamped_knots(3, 5).unwrap();
        assert_eq!(
            evaluate_curve(&cps, 3, &knots, 1),
            Err(SplineError::TooFewEvaluationPoints { requested: 1 })
        );
        assert_eq!(
            evaluate_curve(&cps, 2, &knots, 10),
            Err(SplineError::KnotCount { expected: 8, found: 9 })
        );
        assert_eq!(evaluate_curve(&[], 0, &[0.0], 10), Err(SplineError::EmptyControlPolygon));
        assert_eq!(
            evaluate_curve(&cps[..2], usize::MAX, &[0.0, 1.0], 10),
            Err(SplineError::InvalidDegree {
                degree: usize::MAX,
                control_points: 2,
            })
        );
    }
}
