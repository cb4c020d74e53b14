//! Cox–de Boor B-spline basis functions.
//!
//! The textbook recursion
//!
//! ```text
//! N(i,0)(u) = 1 if k[i] <= u < k[i+1] else 0
//! N(i,p)(u) = (u - k[i]) / (k[i+p] - k[i]) * N(i,p-1)(u)
//!           + (k[i+p+1] - u) / (k[i+p+1] - k[i+1]) * N(i+1,p-1)(u)
//! ```
//!
//! recomputes shared subterms exponentially in `p`. We evaluate the same
//! recursion bottom-up over a triangular table of `p+1` entries instead, which
//! produces bit-identical values.
//!
//! Numerical notes:
//! - A weight whose knot-span denominator is zero contributes exactly 0, so
//!   repeated (clamped) knots never divide by zero.
//! - The degree-0 interval is half-open. At `u = 1` every basis function is
//!   therefore 0; curve evaluation patches the final sample instead of
//!   changing this definition.

/// Evaluate basis function `i` of degree `p` at `u`.
///
/// Returns 0 when `i + p + 1` falls outside the knot vector.
pub fn basis(i: usize, p: usize, u: f64, knots: &[f64]) -> f64 {
    if i.saturating_add(p).saturating_add(1) >= knots.len() {
        return 0.0;
    }

    // n[j] holds N(i+j, k) for the current degree k.
    let mut n: Vec<f64> = (0..=p)
        .map(|j| {
            if knots[i + j] <= u && u < knots[i + j + 1] {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    for k in 1..=p {
        for j in 0..=(p - k) {
            let lo = i + j;
            let mut a = 0.0;
            let mut b = 0.0;
            if knots[lo + k] != knots[lo] {
                a = (u - knots[lo]) / (knots[lo + k] - knots[lo]) * n[j];
            }
            if knots[lo + k + 1] != knots[lo + 1] {
                b = (knots[lo + k + 1] - u) / (knots[lo + k + 1] - knots[lo + 1]) * n[j + 1];
            }
            n[j] = a + b;
        }
    }

    n[0]
}

/// Basis evaluation bound to one knot vector and degree.
#[derive(Debug, Clone, Copy)]
pub struct BasisEvaluator<'a> {
    knots: &'a [f64],
    degree: usize,
}

impl<'a> BasisEvaluator<'a> {
    pub fn new(knots: &'a [f64], degree: usize) -> Self {
        Self { knots, degree }
    }

    /// Number of basis functions the knot vector supports.
    pub fn count(&self) -> usize {
        self.knots.len().saturating_sub(self.degree).saturating_sub(1)
    }

    pub fn value(&self, i: usize, u: f64) -> f64 {
        basis(i, self.degree, u, self.knots)
    }

    /// All basis values `N(0..count, p)(u)` at once.
    pub fn values(&self, u: f64) -> Vec<f64> {
        (0..self.count()).map(|i| self.value(i, u)).collect()
    }
}
