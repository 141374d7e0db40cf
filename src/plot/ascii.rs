//! ASCII plotting for terminal output.
//!
//! This is the "show it" step of a run: a fixed-size character grid, optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - B(R) curve: `-` line (log-scaled distance axis)
//! - breakpoints: `:` columns, drawn behind the curve

use crate::domain::{Breakpoints, CurveFile};

use super::{breakpoint_label, drawable_segments};

/// Render a preview for in-memory results.
pub fn render_ascii_plot(
    distances: &[f64],
    values: &[f64],
    breakpoints: &Breakpoints,
    width: usize,
    height: usize,
) -> String {
    let segments = drawable_segments(distances, values);
    render_plot(&segments, breakpoints, width, height)
}

/// Render a preview from a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_ascii_plot(
        &curve.grid.distance_km,
        &curve.grid.b,
        &curve.params.breakpoints,
        width,
        height,
    )
}

fn render_plot(
    segments: &[Vec<(f64, f64)>],
    breakpoints: &Breakpoints,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((r_min, r_max)) = r_range(segments) else {
        return "Plot: no drawable points (distances must be > 0 and B finite)\n".to_string();
    };
    let (mut lg_min, mut lg_max) = (r_min.log10(), r_max.log10());
    if lg_max <= lg_min {
        // Single distance: center it in half a decade either side.
        lg_min -= 0.5;
        lg_max += 0.5;
    }

    let (y_min, y_max) = y_range(segments).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so breakpoint markers only fill blank cells.
    for segment in segments {
        let cells: Vec<(usize, usize)> = segment
            .iter()
            .map(|&(r, b)| {
                (
                    map_x(r.log10(), lg_min, lg_max, width),
                    map_y(b, y_min, y_max, height),
                )
            })
            .collect();
        draw_polyline(&mut grid, &cells, '-');
    }

    let mut shown = Vec::new();
    for (i, l) in breakpoints.as_array().into_iter().enumerate() {
        if !(l.is_finite() && l >= r_min && l <= r_max) {
            continue;
        }
        let x = map_x(l.log10(), lg_min, lg_max, width);
        for row in grid.iter_mut() {
            if row[x] == ' ' {
                row[x] = ':';
            }
        }
        shown.push(breakpoint_label(i, l));
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: R=[{r_min:.1}, {r_max:.1}] km (log) | B=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    if !shown.is_empty() {
        out.push_str(&format!("Breakpoints: {}\n", shown.join(", ")));
    }

    out
}

fn r_range(segments: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    let mut min_r = f64::INFINITY;
    let mut max_r = f64::NEG_INFINITY;
    for &(r, _) in segments.iter().flatten() {
        min_r = min_r.min(r);
        max_r = max_r.max(r);
    }
    if min_r.is_finite() && max_r.is_finite() {
        Some((min_r, max_r))
    } else {
        None
    }
}

fn y_range(segments: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, b) in segments.iter().flatten() {
        min_y = min_y.min(b);
        max_y = max_y.max(b);
    }
    if min_y.is_finite() && max_y.is_finite() {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    if span < 1e-12 {
        return (min - 0.5, max + 0.5);
    }
    let pad = span * frac;
    (min - pad, max + pad)
}

fn map_x(v: f64, v_min: f64, v_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], cells: &[(usize, usize)], ch: char) {
    let mut prev = None;
    for &(x, y) in cells {
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => grid[y][x] = ch,
        }
        prev = Some((x, y));
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
