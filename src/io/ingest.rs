//! Labeled point-group ingest.
//!
//! Input format (one token group per line):
//!
//! ```text
//! label inlet
//! 0.0 1.0
//! 0.5 1.2
//!
//! label outlet
//! ...
//! ```
//!
//! - blank lines are ignored, tokens are whitespace-separated
//! - `label <name>` starts a group; re-using a name resets that group in place
//! - coordinate lines use the first two tokens, extra tokens are ignored
//!
//! Lines that cannot be used are collected as row errors and reported
//! instead of aborting the whole file.

use std::fs;
use std::path::Path;

use crate::domain::{Point2, SampleGroup};
use crate::error::AppError;

/// A line-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: ordered groups + row errors.
#[derive(Debug, Clone, Default)]
pub struct IngestedData {
    pub groups: Vec<SampleGroup>,
    pub row_errors: Vec<RowError>,
    pub lines_read: usize,
}

impl IngestedData {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Read and parse a labeled group file.
pub fn load_groups(path: &Path) -> Result<IngestedData, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read input '{}': {e}", path.display())))?;
    let data = parse_groups(&text);
    if data.groups.is_empty() {
        return Err(AppError::new(
            3,
            format!("No labeled groups found in '{}'.", path.display()),
        ));
    }
    Ok(data)
}

/// Parse labeled groups from text.
pub fn parse_groups(text: &str) -> IngestedData {
    let mut data = IngestedData::default();
    let mut current: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        data.lines_read += 1;

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        if first == "label" {
            let Some(name) = tokens.next() else {
                data.row_errors.push(RowError {
                    line: line_no,
                    message: "label line without a name".to_string(),
                });
                current = None;
                continue;
            };
            current = Some(start_group(&mut data.groups, name));
            continue;
        }

        let Some(group) = current else {
            data.row_errors.push(RowError {
                line: line_no,
                message: "coordinates before any label".to_string(),
            });
            continue;
        };

        match parse_point(first, tokens.next()) {
            Ok(p) => data.groups[group].points.push(p),
            Err(message) => data.row_errors.push(RowError { line: line_no, message }),
        }
    }

    data
}

/// Open a group for `name`, resetting an existing group with the same name.
fn start_group(groups: &mut Vec<SampleGroup>, name: &str) -> usize {
    if let Some(idx) = groups.iter().position(|g| g.label == name) {
        groups[idx].points.clear();
        return idx;
    }
    groups.push(SampleGroup {
        label: name.to_string(),
        points: Vec::new(),
    });
    groups.len() - 1
}

fn parse_point(x: &str, y: Option<&str>) -> Result<Point2, String> {
    let Some(y) = y else {
        return Err(format!("expected '<x> <y>', got a single token '{x}'"));
    };
    let x = parse_coord(x)?;
    let y = parse_coord(y)?;
    Ok(Point2::new(x, y))
}

fn parse_coord(token: &str) -> Result<f64, String> {
    let v: f64 = token
        .parse()
        .map_err(|_| format!("invalid coordinate '{token}'"))?;
    if !v.is_finite() {
        return Err(format!("non-finite coordinate '{token}'"));
    }
    Ok(v)
}
