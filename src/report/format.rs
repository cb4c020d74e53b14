//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{FitConfig, GroupFailure, GroupFit};
use crate::io::RowError;

/// Format the full run summary (settings + per-group diagnostics + failures).
pub fn format_run_summary(
    source: &str,
    config: &FitConfig,
    fits: &[GroupFit],
    failures: &[GroupFailure],
    row_errors: &[RowError],
) -> String {
    let mut out = String::new();

    out.push_str("=== gaspath - B-spline path fit ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Settings: degree={} | control points={} | curve samples={}\n",
        config.degree, config.control_points, config.curve_samples
    ));
    out.push_str(&format!(
        "Groups: {} fitted, {} failed\n",
        fits.len(),
        failures.len()
    ));

    if !row_errors.is_empty() {
        out.push_str(&format!("Skipped input lines: {}\n", row_errors.len()));
        for e in row_errors {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }

    out.push('\n');
    out.push_str(&format_fit_table(fits));

    if !failures.is_empty() {
        out.push_str("\nFailed groups:\n");
        for f in failures {
            out.push_str(&format!("  {}: {}\n", truncate(&f.label, 24), f.error));
        }
    }

    out
}

/// Format one row of diagnostics per fitted group.
pub fn format_fit_table(fits: &[GroupFit]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<24} {:>7} {:>5} {:>12} {:>12} {:>12} {:>9}\n",
            "label", "samples", "cp", "rms", "max_err", "max_kappa", "undef_k"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<24} {:-<7} {:-<5} {:-<12} {:-<12} {:-<12} {:-<9}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for fit in fits {
        let (rms, max_err, max_k, undef) = match &fit.quality {
            Some(q) => (
                format!("{:.6}", q.rms),
                format!("{:.6}", q.max_error),
                q.max_curvature.map(|k| format!("{k:.6}")).unwrap_or_else(|| "-".to_string()),
                q.undefined_curvature.to_string(),
            ),
            None => {
                let max_k = fit
                    .curvature
                    .iter()
                    .filter_map(|k| k.value())
                    .fold(None, |acc: Option<f64>, k| Some(acc.map_or(k, |m| m.max(k))));
                let undef = fit.curvature.iter().filter(|k| !k.is_defined()).count();
                (
                    "-".to_string(),
                    "-".to_string(),
                    max_k.map(|k| format!("{k:.6}")).unwrap_or_else(|| "-".to_string()),
                    undef.to_string(),
                )
            }
        };

        out.push_str(
            format!(
                "{:<24} {:>7} {:>5} {:>12} {:>12} {:>12} {:>9}\n",
                truncate(&fit.label, 24),
                fit.samples.len(),
                fit.curve.control_points.len(),
                rms,
                max_err,
                max_k,
                undef,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BSplineCurve, Curvature, FitQuality, Point2};
    use crate::error::SplineError;

    fn fit(label: &str, quality: Option<FitQuality>) -> GroupFit {
        GroupFit {
            label: label.to_string(),
            samples: vec![Point2::zeros(); 3],
            curve: BSplineCurve {
                degree: 1,
                knots: vec![0.0, 0.0, 1.0, 1.0],
                control_points: vec![Point2::zeros(), Point2::new(1.0, 0.0)],
            },
            points: Vec::new(),
            curvature: vec![Curvature::Defined(0.25), Curvature::Undefined],
            quality,
        }
    }

    #[test]
    fn summary_lists_failures_and_skipped_lines() {
        let fits = vec![fit(
            "hub",
            Some(FitQuality {
                rms: 0.5,
                max_error: 1.0,
                max_curvature: Some(0.25),
                undefined_curvature: 1,
            }),
        )];
        let failures = vec![GroupFailure {
            label: "tiny".to_string(),
            error: SplineError::InsufficientSamples {
                samples: 2,
                control_points: 5,
            },
        }];
        let row_errors = vec![RowError {
            line: 3,
            message: "invalid coordinate 'x'".to_string(),
        }];

        let txt = format_run_summary("in.txt", &FitConfig::default(), &fits, &failures, &row_errors);
        assert!(txt.contains("Source: in.txt"));
        assert!(txt.contains("degree=3 | control points=5 | curve samples=100"));
        assert!(txt.contains("Groups: 1 fitted, 1 failed"));
        assert!(txt.contains("line 3: invalid coordinate 'x'"));
        assert!(txt.contains("tiny: insufficient samples"));
        assert!(txt.contains("0.500000"));
    }

    #[test]
    fn table_falls_back_to_curvature_without_quality() {
        let table = format_fit_table(&[fit("edited", None)]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("edited"));
        assert!(row.contains("0.250000"));
        assert!(row.ends_with(" 1"));
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
