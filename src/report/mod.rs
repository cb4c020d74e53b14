//! Reporting utilities: fit diagnostics and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{BSplineCurve, Curvature, FitQuality, Point2};
use crate::fit::fit_residuals;

/// Summarize how well `curve` follows `samples` and how its curvature behaves.
///
/// Returns `None` when there are no samples to compare against.
pub fn compute_quality(samples: &[Point2], curve: &BSplineCurve, curvature: &[Curvature]) -> Option<FitQuality> {
    let (rms, max_error) = fit_residuals(samples, curve)?;

    let max_curvature = curvature
        .iter()
        .filter_map(|k| k.value())
        .filter(|k| k.is_finite())
        .fold(None, |acc: Option<f64>, k| Some(acc.map_or(k, |m| m.max(k))));
    let undefined_curvature = curvature.iter().filter(|k| !k.is_defined()).count();

    Some(FitQuality {
        rms,
        max_error,
        max_curvature,
        undefined_curvature,
    })
}
