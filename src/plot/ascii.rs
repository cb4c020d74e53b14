//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - curve: `-` line
//! - samples: `o`
//! - control points: `#`
//!
//! The curvature panel plots κ against curve x; undefined samples are skipped.

use crate::domain::GroupFit;

/// Render the curve panel (samples, control points, curve) for one group.
pub fn render_curve_plot(fit: &GroupFit, width: usize, height: usize) -> String {
    let curve: Vec<(f64, f64)> = fit.points.iter().map(|p| (p.x, p.y)).collect();
    let samples: Vec<(f64, f64)> = fit.samples.iter().map(|p| (p.x, p.y)).collect();
    let controls: Vec<(f64, f64)> = fit.curve.control_points.iter().map(|p| (p.x, p.y)).collect();

    let header = format!("Curve: {}", fit.label);
    let markers = [(samples.as_slice(), 'o'), (controls.as_slice(), '#')];
    render_plot(&header, &curve, &markers, width, height)
}

/// Render the curvature panel (κ against curve x) for one group.
pub fn render_curvature_plot(fit: &GroupFit, width: usize, height: usize) -> String {
    let profile: Vec<(f64, f64)> = fit
        .points
        .iter()
        .zip(&fit.curvature)
        .filter_map(|(p, k)| k.value().map(|k| (p.x, k)))
        .collect();

    let header = format!("Curvature: {}", fit.label);
    render_plot(&header, &profile, &[], width, height)
}

fn render_plot(
    header: &str,
    line: &[(f64, f64)],
    markers: &[(&[(f64, f64)], char)],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let all = line
        .iter()
        .chain(markers.iter().flat_map(|(pts, _)| pts.iter()));
    let (x_min, x_max, y_min, y_max) = bounds(all).unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first so markers overlay it.
    draw_curve(&mut grid, line, x_min, x_max, y_min, y_max);

    for (pts, ch) in markers {
        for &(x, y) in pts.iter() {
            let col = map_x(x, x_min, x_max, width);
            let row = map_y(y, y_min, y_max, height);
            grid[row][col] = *ch;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{header} | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<(f64, f64, f64, f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min.is_finite() && y_min.is_finite() {
        Some((x_min, x_max, y_min, y_max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
