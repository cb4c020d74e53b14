//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of fitted curves:
//! - per label: degree, knot vector, control points
//! - the source samples, so diagnostics survive a round trip
//! - a generation timestamp
//!
//! Control points in a saved file may be edited by hand or by another tool;
//! `gaspath eval` re-evaluates them. The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, CurveRecord, GroupFit};
use crate::error::AppError;

pub const TOOL_NAME: &str = "gaspath";

/// Build the serializable curve file for a set of fits.
pub fn curve_file(fits: &[GroupFit]) -> CurveFile {
    CurveFile {
        tool: TOOL_NAME.to_string(),
        generated: Utc::now(),
        curves: fits
            .iter()
            .map(|fit| CurveRecord {
                label: fit.label.clone(),
                curve: fit.curve.clone(),
                samples: fit.samples.clone(),
            })
            .collect(),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, fits: &[GroupFit]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &curve_file(fits))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    if curve.curves.is_empty() {
        return Err(AppError::new(3, format!("Curve JSON '{}' has no curves.", path.display())));
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BSplineCurve, Point2};

    #[test]
    fn curve_file_keeps_labels_and_samples() {
        let fit = GroupFit {
            label: "hub".to_string(),
            samples: vec![Point2::zeros(), Point2::new(0.5, 0.5), Point2::new(1.0, 0.0)],
            curve: BSplineCurve {
                degree: 1,
                knots: vec![0.0, 0.0, 1.0, 1.0],
                control_points: vec![Point2::zeros(), Point2::new(1.0, 0.0)],
            },
            points: Vec::new(),
            curvature: Vec::new(),
            quality: None,
        };
        let file = curve_file(std::slice::from_ref(&fit));
        assert_eq!(file.tool, TOOL_NAME);

        let json = serde_json::to_string(&file).unwrap();
        let back: CurveFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.curves.len(), 1);
        assert_eq!(back.curves[0].label, "hub");
        assert_eq!(back.curves[0].curve, fit.curve);
        assert_eq!(back.curves[0].samples, fit.samples);
    }

    #[test]
    fn hand_written_json_without_samples_parses() {
        let json = r#"{
            "tool": "gaspath",
            "generated": "2024-01-01T00:00:00Z",
            "curves": [
                {"label": "x", "degree": 1, "knots": [0, 0, 1, 1],
                 "control_points": [{"x": 0, "y": 0}, {"x": 2, "y": 1}]}
            ]
        }"#;
        let file: CurveFile = serde_json::from_str(json).unwrap();
        assert!(file.curves[0].samples.is_empty());
        assert_eq!(file.curves[0].curve.control_points[1], Point2::new(2.0, 1.0));
    }
}
