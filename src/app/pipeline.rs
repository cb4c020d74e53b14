//! Shared "fit pipeline" logic used by both `fit` and `eval`.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! samples -> control points -> curve samples -> derivative curves -> curvature -> diagnostics
//!
//! Groups are independent, so they are processed in parallel; each group's
//! computation is itself single-threaded and pure. A failing group is
//! reported with its error kind and never aborts the others.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{BSplineCurve, Curvature, CurveRecord, FitConfig, GroupFailure, GroupFit, Point2, SampleGroup};
use crate::error::SplineError;
use crate::fit::fit_curve;
use crate::report::compute_quality;

/// All computed outputs of one run, in input group order.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub fits: Vec<GroupFit>,
    pub failures: Vec<GroupFailure>,
}

impl RunOutput {
    fn collect(results: Vec<(String, Result<GroupFit, SplineError>)>) -> Self {
        let mut out = RunOutput::default();
        for (label, result) in results {
            match result {
                Ok(fit) => out.fits.push(fit),
                Err(error) => {
                    warn!(group = %label, %error, "group failed");
                    out.failures.push(GroupFailure { label, error });
                }
            }
        }
        out
    }
}

/// Fit every group with the configured degree / control point count.
pub fn fit_groups(groups: &[SampleGroup], config: &FitConfig) -> RunOutput {
    let results: Vec<(String, Result<GroupFit, SplineError>)> = groups
        .par_iter()
        .map(|group| (group.label.clone(), fit_group(group, config)))
        .collect();
    RunOutput::collect(results)
}

/// Fit one group and derive its curve samples, curvature and diagnostics.
pub fn fit_group(group: &SampleGroup, config: &FitConfig) -> Result<GroupFit, SplineError> {
    let curve = fit_curve(&group.points, config.control_points, config.degree)?;
    debug!(
        group = %group.label,
        samples = group.points.len(),
        control_points = curve.control_points.len(),
        "fitted control points"
    );
    evaluate_group(&group.label, curve, group.points.clone(), config.curve_samples)
}

/// Re-evaluate saved curves (control points possibly edited since the fit).
pub fn evaluate_records(records: &[CurveRecord], curve_samples: usize) -> RunOutput {
    let results: Vec<(String, Result<GroupFit, SplineError>)> = records
        .par_iter()
        .map(|r| {
            let result = evaluate_group(&r.label, r.curve.clone(), r.samples.clone(), curve_samples);
            (r.label.clone(), result)
        })
        .collect();
    RunOutput::collect(results)
}

/// Sample `curve` and its curvature at `curve_samples` parameters.
///
/// Curvature needs a second derivative; below degree 2 it is left empty.
pub fn evaluate_group(
    label: &str,
    curve: BSplineCurve,
    samples: Vec<Point2>,
    curve_samples: usize,
) -> Result<GroupFit, SplineError> {
    curve.validate()?;
    let points = curve.evaluate(curve_samples)?;

    let curvature: Vec<Curvature> = if curve.degree >= 2 {
        curve.curvature(curve_samples)?
    } else {
        debug!(group = %label, degree = curve.degree, "degree below 2, curvature skipped");
        Vec::new()
    };

    let undefined = curvature.iter().filter(|k| !k.is_defined()).count();
    if undefined > 0 {
        warn!(group = %label, undefined, "zero tangent: curvature undefined at some samples");
    }

    let quality = compute_quality(&samples, &curve, &curvature);
    if let Some(q) = &quality {
        debug!(group = %label, rms = q.rms, max_error = q.max_error, "fit quality");
    }

    Ok(GroupFit {
        label: label.to_string(),
        samples,
        curve,
        points,
        curvature,
        quality,
    })
}
