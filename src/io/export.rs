//! Text exports.
//!
//! - curve samples in the line format consumed downstream
//! - per-sample curvature CSV
//! - labeled sample groups in the ingest format (for generated data)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{Curvature, GroupFit, SampleGroup};
use crate::error::AppError;

/// Render curve samples: label line, `x, y` lines (5 decimals), blank line.
pub fn format_curve_points(fits: &[GroupFit]) -> String {
    let mut out = String::new();
    for fit in fits {
        out.push_str(&fit.label);
        out.push('\n');
        for p in &fit.points {
            out.push_str(&format!("{:.5}, {:.5}\n", p.x, p.y));
        }
        out.push('\n');
    }
    out
}

/// Write curve samples for every fitted group.
pub fn write_curve_points(path: &Path, fits: &[GroupFit]) -> Result<(), AppError> {
    write_text(path, &format_curve_points(fits), "curve output")
}

/// Render `label,index,u,x,y,curvature` rows.
pub fn format_curvature_csv(fits: &[GroupFit]) -> String {
    let mut out = String::from("label,index,u,x,y,curvature\n");
    for fit in fits {
        let m = fit.points.len();
        let denom = (m.max(2) - 1) as f64;
        for (i, (p, k)) in fit.points.iter().zip(&fit.curvature).enumerate() {
            let k = match k {
                Curvature::Defined(v) => format!("{v:.10}"),
                Curvature::Undefined => "undefined".to_string(),
            };
            out.push_str(&format!(
                "{},{},{:.10},{:.10},{:.10},{}\n",
                fit.label,
                i,
                i as f64 / denom,
                p.x,
                p.y,
                k
            ));
        }
    }
    out
}

/// Write the curvature CSV.
pub fn write_curvature_csv(path: &Path, fits: &[GroupFit]) -> Result<(), AppError> {
    write_text(path, &format_curvature_csv(fits), "curvature CSV")
}

/// Render groups in the labeled input format.
pub fn format_groups(groups: &[SampleGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("label {}\n", group.label));
        for p in &group.points {
            out.push_str(&format!("{} {}\n", p.x, p.y));
        }
        out.push('\n');
    }
    out
}

/// Write groups in the labeled input format.
pub fn write_groups(path: &Path, groups: &[SampleGroup]) -> Result<(), AppError> {
    write_text(path, &format_groups(groups), "sample file")
}

fn write_text(path: &Path, text: &str, what: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create {what} '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write {what} '{}': {e}", path.display())))
}
