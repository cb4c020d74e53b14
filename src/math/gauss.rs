//! Dense square linear solver.
//!
//! The fitter produces small symmetric normal-equation systems (one row per
//! interior control point), so plain Gaussian elimination with partial
//! pivoting on an augmented copy is enough:
//!
//! - at each step the row with the largest `|a[j][i]|` among unprocessed rows
//!   is swapped into the pivot position
//! - a pivot at or below `f64::EPSILON * max|A|` is treated as singular (the
//!   final pivot included)
//! - back-substitution yields `x`
//!
//! The caller's `A` and `b` are never modified.

use nalgebra::{DMatrix, DVector};

use crate::error::SplineError;

/// Solve `A x = b` for square `A`.
pub fn solve_dense(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, SplineError> {
    let m = a.nrows();
    if a.ncols() != m || b.len() != m {
        return Err(SplineError::DimensionMismatch {
            rows: a.nrows(),
            cols: a.ncols(),
            rhs: b.len(),
        });
    }
    if m == 0 {
        return Ok(DVector::zeros(0));
    }

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let threshold = f64::EPSILON * scale;

    // Augmented working copy [A | b].
    let mut ab = DMatrix::<f64>::zeros(m, m + 1);
    ab.view_mut((0, 0), (m, m)).copy_from(a);
    ab.set_column(m, b);

    for i in 0..m {
        let mut max = i;
        for j in (i + 1)..m {
            if ab[(j, i)].abs() > ab[(max, i)].abs() {
                max = j;
            }
        }
        ab.swap_rows(i, max);

        let pivot = ab[(i, i)];
        if !(pivot.abs() > threshold) {
            return Err(SplineError::SingularMatrix { column: i, pivot });
        }

        for j in (i + 1)..m {
            let alpha = ab[(j, i)] / pivot;
            for k in i..=m {
                ab[(j, k)] -= alpha * ab[(i, k)];
            }
        }
    }

    let mut x = DVector::<f64>::zeros(m);
    for i in (0..m).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..m {
            sum += ab[(i, j)] * x[j];
        }
        x[i] = (ab[(i, m)] - sum) / ab[(i, i)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn solves_two_by_two() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[3.0, 5.0]);
        let x = solve_dense(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn singular_matrix_is_reported() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        let err = solve_dense(&a, &b).unwrap_err();
        assert!(matches!(err, SplineError::SingularMatrix { column: 1, .. }));
    }

    #[test]
    fn zero_first_pivot_needs_swap() {
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.0]);
        let b = DVector::from_row_slice(&[5.0, 6.0, 4.0]);
        let x = solve_dense(&a, &b).unwrap();
        assert_abs_diff_eq!((&a * &x - &b).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let b = DVector::from_row_slice(&[1.0, 1.0]);
        assert_eq!(
            solve_dense(&a, &b),
            Err(SplineError::DimensionMismatch { rows: 2, cols: 3, rhs: 2 })
        );

        let a = DMatrix::<f64>::identity(2, 2);
        let b = DVector::from_row_slice(&[1.0, 1.0, 1.0]);
        assert!(matches!(
            solve_dense(&a, &b),
            Err(SplineError::DimensionMismatch { rhs: 3, .. })
        ));
    }

    #[test]
    fn inputs_are_untouched() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DVector::from_row_slice(&[1.0, 1.0]);
        let (a0, b0) = (a.clone(), b.clone());
        let _ = solve_dense(&a, &b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn empty_system_has_empty_solution() {
        let a = DMatrix::<f64>::zeros(0, 0);
        let b = DVector::<f64>::zeros(0);
        assert_eq!(solve_dense(&a, &b).unwrap().len(), 0);
    }
}
