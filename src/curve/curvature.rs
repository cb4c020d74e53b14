//! Planar curvature along a sampled curve.
//!
//! `κ = |x' y'' - y' x''| / (x'² + y'²)^1.5`, with the first and second
//! derivative curves obtained by reducing the control polygon once and twice
//! and sampling both at the same `m` parameters as the curve itself.

use crate::curve::derivative::reduce;
use crate::curve::evaluate::evaluate_curve;
use crate::domain::{Curvature, Point2};
use crate::error::SplineError;

/// Combine sampled first and second derivatives into curvature values.
///
/// A zero tangent yields `Curvature::Undefined` instead of a division fault.
pub fn curvature_from_derivatives(first: &[Point2], second: &[Point2]) -> Vec<Curvature> {
    first
        .iter()
        .zip(second)
        .map(|(d1, d2)| {
            let speed_sq = d1.norm_squared();
            if speed_sq == 0.0 {
                Curvature::Undefined
            } else {
                Curvature::Defined(d1.perp(d2).abs() / speed_sq.powf(1.5))
            }
        })
        .collect()
}

/// Curvature at `samples` uniform parameters, index-aligned with
/// `evaluate_curve` output for the same curve.
///
/// Requires `degree >= 2` so the second derivative exists.
pub fn compute_curvature(
    control_points: &[Point2],
    degree: usize,
    knots: &[f64],
    samples: usize,
) -> Result<Vec<Curvature>, SplineError> {
    if degree < 2 {
        return Err(SplineError::InvalidDegree {
            degree,
            control_points: control_points.len(),
        });
    }

    let d1 = reduce(control_points, degree, knots)?;
    let d2 = reduce(&d1.control_points, d1.degree, &d1.knots)?;

    let first = evaluate_curve(&d1.control_points, d1.degree, &d1.knots, samples)?;
    let second = evaluate_curve(&d2.control_points, d2.degree, &d2.knots, samples)?;

    Ok(curvature_from_derivatives(&first, &second))
}

/// Like [`compute_curvature`], but any undefined sample is an error.
pub fn compute_curvature_strict(
    control_points: &[Point2],
    degree: usize,
    knots: &[f64],
    samples: usize,
) -> Result<Vec<f64>, SplineError> {
    compute_curvature(control_points, degree, knots, samples)?
        .into_iter()
        .enumerate()
        .map(|(i, k)| k.try_value(i))
        .collect()
}
