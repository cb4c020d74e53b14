//! Clamped open knot vectors.
//!
//! For degree `p` and `nC` control points the vector has `nC + p + 1` entries:
//!
//! ```text
//! [0; p+1]  ++  [(i+1)/(nC-p) for i in 0..nC-p-1]  ++  [1; p+1]
//! ```
//!
//! When `nC == p + 1` there are no interior knots and the vector is just the
//! clamped endpoints (a single Bézier segment).

use crate::error::SplineError;

/// Build the clamped knot vector for `degree` and `control_points`.
pub fn clamped_knots(degree: usize, control_points: usize) -> Result<Vec<f64>, SplineError> {
    if control_points <= degree {
        return Err(SplineError::InvalidDegree {
            degree,
            control_points,
        });
    }

    let interior = control_points - degree - 1;
    let spans = (control_points - degree) as f64;

    let mut knots = Vec::with_capacity(control_points + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    knots.extend((0..interior).map(|i| (i + 1) as f64 / spans));
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    Ok(knots)
}
