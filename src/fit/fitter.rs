//! Least-squares fitting of interior control points.
//!
//! Given:
//! - samples `s_0 .. s_{n-1}`
//! - degree `p`, control point count `nC`, and a knot vector
//!
//! we pin `c_0 = s_0` and `c_{nC-1} = s_{n-1}` and solve the normal equations
//! for the `nC - 2` interior control points:
//!
//! ```text
//! u_i    = i / (n - 1)                                   (uniform in index)
//! Q_i    = s_i - N(0)(u_i) s_0 - N(nC-1)(u_i) s_{n-1}    i = 1..n-2
//! A[l,k] = Σ_i N(l+1)(u_i) N(k+1)(u_i)
//! b[k]   = Σ_i Q_i N(k+1)(u_i)
//! ```
//!
//! `A` only depends on the parameterization, so it is assembled once and
//! solved against the x and y right-hand sides.
//!
//! Parameterization is uniform in sample index, not chord length; unevenly
//! spaced samples are under-weighted accordingly.

use nalgebra::{DMatrix, DVector};

use crate::curve::point_at;
use crate::domain::{BSplineCurve, Point2, check_curve_shape};
use crate::error::SplineError;
use crate::math::{BasisEvaluator, clamped_knots, solve_dense};

/// Curve parameter assigned to each of `n` samples: `u_i = i / (n - 1)`.
pub fn sample_parameters(n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![0.0; n];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}

/// Fit `control_points` control points of degree `degree` over `knots`.
///
/// The returned polygon always starts at `samples[0]` and ends at
/// `samples[n-1]` exactly.
pub fn fit_control_points(
    samples: &[Point2],
    control_points: usize,
    degree: usize,
    knots: &[f64],
) -> Result<Vec<Point2>, SplineError> {
    let n = samples.len();
    if n < 3 || control_points < 2 || control_points > n {
        return Err(SplineError::InsufficientSamples {
            samples: n,
            control_points,
        });
    }
    check_curve_shape(control_points, degree, knots.len())?;

    let first = samples[0];
    let last = samples[n - 1];
    let interior = control_points - 2;

    let mut out = Vec::with_capacity(control_points);
    out.push(first);
    if interior > 0 {
        let basis = BasisEvaluator::new(knots, degree);
        let params = sample_parameters(n);

        // Basis rows for the interior samples: rows[i][j] = N(j)(u_{i+1}).
        let rows: Vec<Vec<f64>> = params[1..n - 1].iter().map(|&u| basis.values(u)).collect();

        let mut a = DMatrix::<f64>::zeros(interior, interior);
        let mut bx = DVector::<f64>::zeros(interior);
        let mut by = DVector::<f64>::zeros(interior);

        for (row, sample) in rows.iter().zip(&samples[1..n - 1]) {
            let q = *sample - row[0] * first - row[control_points - 1] * last;
            for k in 0..interior {
                let nk = row[k + 1];
                for l in 0..interior {
                    a[(l, k)] += row[l + 1] * nk;
                }
                bx[k] += q.x * nk;
                by[k] += q.y * nk;
            }
        }

        let x = solve_dense(&a, &bx)?;
        let y = solve_dense(&a, &by)?;
        out.extend(x.iter().zip(y.iter()).map(|(&x, &y)| Point2::new(x, y)));
    }
    out.push(last);

    Ok(out)
}

/// Fit a clamped B-spline through `samples`, building the knot vector too.
pub fn fit_curve(samples: &[Point2], control_points: usize, degree: usize) -> Result<BSplineCurve, SplineError> {
    let knots = clamped_knots(degree, control_points)?;
    let cps = fit_control_points(samples, control_points, degree, &knots)?;
    Ok(BSplineCurve {
        degree,
        knots,
        control_points: cps,
    })
}

/// RMS and max distance between each sample and the curve at its parameter.
///
/// The final sample is compared against the clamped endpoint, matching how
/// the curve itself is sampled at `u = 1`.
pub fn fit_residuals(samples: &[Point2], curve: &BSplineCurve) -> Option<(f64, f64)> {
    let n = samples.len();
    if n == 0 || curve.validate().is_err() {
        return None;
    }

    let params = sample_parameters(n);
    let mut sum_sq = 0.0;
    let mut max: f64 = 0.0;
    for (i, (&u, &s)) in params.iter().zip(samples).enumerate() {
        let on_curve = if i + 1 == n {
            curve.control_points[curve.control_points.len() - 1]
        } else {
            point_at(&curve.control_points, curve.degree, &curve.knots, u)
        };
        let d = s.metric_distance(&on_curve);
        sum_sq += d * d;
        max = max.max(d);
    }

    Some(((sum_sq / n as f64).sqrt(), max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn linear_fit_interpolates_when_counts_match() {
        let samples = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let knots = clamped_knots(1, 3).unwrap();
        let cps = fit_control_points(&samples, 3, 1, &knots).unwrap();
        assert_eq!(cps, samples);
    }

    #[test]
    fn endpoints_are_pinned_exactly() {
        let samples: Vec<Point2> = (0..12)
            .map(|i| {
                let x = i as f64 * 0.37 + 0.1;
                Point2::new(x, (x * 1.3).sin() + 0.05 * x)
            })
            .collect();
        let curve = fit_curve(&samples, 5, 3).unwrap();
        assert_eq!(curve.control_points.len(), 5);
        assert_eq!(curve.control_points[0], samples[0]);
        assert_eq!(curve.control_points[4], samples[11]);
    }

    #[test]
    fn cubic_fit_reproduces_a_straight_line() {
        // Evenly spaced collinear samples lie on a degree-1 polynomial in u,
        // which a cubic B-spline represents exactly.
        let samples: Vec<Point2> = (0..9).map(|i| Point2::new(i as f64, 2.0 * i as f64 + 1.0)).collect();
        let curve = fit_curve(&samples, 5, 3).unwrap();
        let (rms, max) = fit_residuals(&samples, &curve).unwrap();
        assert_abs_diff_eq!(rms, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn two_control_points_skip_the_solve() {
        let samples = pts(&[(0.0, 0.0), (3.0, 5.0), (1.0, 1.0)]);
        let curve = fit_curve(&samples, 2, 1).unwrap();
        assert_eq!(curve.control_points, pts(&[(0.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn insufficient_samples_are_rejected() {
        let two = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(
            fit_curve(&two, 2, 1),
            Err(SplineError::InsufficientSamples { samples: 2, control_points: 2 })
        );

        let four = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        assert!(matches!(
            fit_curve(&four, 5, 3),
            Err(SplineError::InsufficientSamples { samples: 4, control_points: 5 })
        ));
        assert!(matches!(
            fit_control_points(&four, 1, 0, &[0.0, 1.0]),
            Err(SplineError::InsufficientSamples { .. })
        ));
    }

    #[test]
    fn mismatched_knots_are_rejected() {
        let samples = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        let err = fit_control_points(&samples, 3, 1, &[0.0, 0.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, SplineError::KnotCount { expected: 5, found: 4 });

        let err = fit_control_points(&samples, 3, usize::MAX, &[0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            SplineError::InvalidDegree {
                degree: usize::MAX,
                control_points: 3,
            }
        );
    }

    #[test]
    fn sample_parameters_are_uniform_in_index() {
        assert_eq!(sample_parameters(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
