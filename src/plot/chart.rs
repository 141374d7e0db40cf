//! Plotters-powered B(R) chart exported as PNG.
//!
//! The chart mirrors the usual publication layout for this curve:
//! - log-scaled distance axis with plain-number tick labels
//! - the B(R) curve as a thick blue line
//! - dashed, color-coded markers at each breakpoint, listed in the legend
//! - light grid, axis titles and a bold title
//!
//! Sizes are specified in points (as for a printed figure) and converted to pixels
//! with the configured DPI, so a 10×6 in figure at 300 DPI is 3000×1800 px.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use super::drawable_segments;
use crate::domain::{Breakpoints, ChartConfig};
use crate::error::AppError;

pub const TITLE: &str = "Piecewise distance-correction term B(R)";
pub const X_DESC: &str = "Epicentral Distance R (km)";
pub const Y_DESC: &str = "B(R)";
pub const CURVE_LABEL: &str = "B(R)";

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);
const BREAKPOINT_COLORS: [RGBColor; 3] = [RED, DARK_GREEN, ORANGE];

/// Tick label for the log-scaled distance axis.
///
/// Values `>= 1` are truncated to an integer, smaller values keep one decimal.
pub fn format_tick(x: f64) -> String {
    if x >= 1.0 {
        format!("{}", x.trunc() as i64)
    } else {
        format!("{x:.1}")
    }
}

/// Legend label for breakpoint `index` (0-based), e.g. `l1 = 75.0 km`.
pub fn breakpoint_label(index: usize, value: f64) -> String {
    format!("l{} = {value:?} km", index + 1)
}

/// Pixel sizes derived from the figure DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChartStyle {
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
    title_px: f64,
    axis_desc_px: f64,
    tick_px: f64,
    legend_px: f64,
    curve_width: u32,
    marker_width: u32,
    dash: u32,
    dash_gap: u32,
    legend_line: i32,
    /// Width reserved for the legend sample line plus a gap before the label.
    legend_area: u32,
}

impl ChartStyle {
    fn from_config(config: &ChartConfig) -> Self {
        let px = |pt: f64| config.pt_to_px(pt).round().max(1.0);
        let margin = px(8.0) as u32;
        let legend_line = px(20.0) as i32;
        Self {
            margin,
            x_label_area: px(36.0) as u32,
            y_label_area: px(40.0) as u32,
            title_px: config.pt_to_px(14.0),
            axis_desc_px: config.pt_to_px(12.0),
            tick_px: config.pt_to_px(10.0),
            legend_px: config.pt_to_px(10.0),
            curve_width: px(2.0) as u32,
            marker_width: px(1.5) as u32,
            dash: px(5.5) as u32,
            dash_gap: px(2.5) as u32,
            legend_line,
            legend_area: legend_line as u32 + margin,
        }
    }

    /// Right margin wide enough for half of the last x tick label, which is
    /// centered on the right edge of the plotting area.
    fn right_margin(&self, x_max: f64) -> u32 {
        let chars = format_tick(x_max).chars().count() as f64;
        // Average sans-serif glyph is about 0.6 em wide.
        let half_label = (chars * 0.6 * self.tick_px / 2.0).ceil() as u32;
        self.margin + half_label
    }
}

/// Keep one point per horizontal pixel column of the log-scaled plotting area.
///
/// Wide strokes through many sub-pixel points leave spiky joints; thinning keeps
/// the first point of each column and always keeps the last point.
fn thin_by_column(points: &[(f64, f64)], (x0, x1): (f64, f64), columns: u32) -> Vec<(f64, f64)> {
    let (lg0, lg1) = (x0.log10(), x1.log10());
    let span = lg1 - lg0;
    if points.len() < 3 || columns == 0 || !(span.is_finite() && span > 0.0) {
        return points.to_vec();
    }
    let column = |x: f64| ((x.log10() - lg0) / span * columns as f64).floor() as i64;

    let mut out: Vec<(f64, f64)> = Vec::with_capacity(points.len().min(columns as usize + 1));
    let mut last_col = None;
    for &p in points {
        let col = column(p.0);
        if last_col != Some(col) {
            out.push(p);
            last_col = Some(col);
        }
    }
    if let (Some(&last), Some(&kept)) = (points.last(), out.last()) {
        if kept != last {
            out.push(last);
        }
    }
    out
}

/// Render the chart and write it to `config.output`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn render_chart(
    distances: &[f64],
    values: &[f64],
    breakpoints: &Breakpoints,
    config: &ChartConfig,
) -> Result<(), AppError> {
    let path = config.output.as_path();
    ensure_parent_exists(path)?;

    let (x0, x1) = x_range(distances, breakpoints).ok_or_else(|| {
        AppError::input("Log-scaled distance axis needs at least one positive, finite distance.")
    })?;
    let (y0, y1) = y_range(distances, values).unwrap_or((0.0, 1.0));
    let (y0, y1) = pad_range(y0, y1, 0.05);

    let segments = drawable_segments(distances, values);
    let style = ChartStyle::from_config(config);

    let root = BitMapBackend::new(path, config.pixel_size()).into_drawing_area();
    draw(&root, &segments, breakpoints, (x0, x1), (y0, y1), &style)
        .and_then(|()| root.present().map_err(Into::into))
        .map_err(|e| AppError::render(format!("Failed to render chart '{}': {e}", path.display())))?;

    log::info!(
        "rendered {} curve segment(s) to {} at {} DPI",
        segments.len(),
        path.display(),
        config.dpi
    );
    Ok(())
}

fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    segments: &[Vec<(f64, f64)>],
    breakpoints: &Breakpoints,
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
    style: &ChartStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(style.margin)
        .margin_right(style.right_margin(x1))
        .caption(
            TITLE,
            FontDesc::new(FontFamily::SansSerif, style.title_px, FontStyle::Bold),
        )
        .x_label_area_size(style.x_label_area)
        .y_label_area_size(style.y_label_area)
        .build_cartesian_2d((x0..x1).log_scale(), y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_label_formatter(&|v| format_tick(*v))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .label_style(FontDesc::new(
            FontFamily::SansSerif,
            style.tick_px,
            FontStyle::Normal,
        ))
        .axis_desc_style(FontDesc::new(
            FontFamily::SansSerif,
            style.axis_desc_px,
            FontStyle::Normal,
        ))
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .light_line_style(WHITE.mix(0.0).stroke_width(0))
        .draw()?;

    // 1) The curve. Non-finite values split it into separate segments; only the
    //    first one carries the legend entry.
    let curve_style = BLUE.filled().stroke_width(style.curve_width);
    let legend_line = style.legend_line;
    let columns = chart.plotting_area().dim_in_pixel().0;
    for (i, segment) in segments.iter().enumerate() {
        let points = thin_by_column(segment, (x0, x1), columns);
        let anno = chart.draw_series(LineSeries::new(points, curve_style))?;
        if i == 0 {
            anno.label(CURVE_LABEL).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_line, y)], curve_style)
            });
        }
    }

    // 2) Breakpoint markers.
    for (i, (&l, color)) in breakpoints
        .as_array()
        .iter()
        .zip(BREAKPOINT_COLORS)
        .enumerate()
    {
        if !(l.is_finite() && l >= x0 && l <= x1) {
            continue;
        }
        let marker_style = color.mix(0.7).stroke_width(style.marker_width);
        chart
            .draw_series(DashedLineSeries::new(
                vec![(l, y0), (l, y1)],
                style.dash,
                style.dash_gap,
                marker_style,
            ))?
            .label(breakpoint_label(i, l))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_line, y)], marker_style)
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .legend_area_size(style.legend_area)
        .label_font(FontDesc::new(
            FontFamily::SansSerif,
            style.legend_px,
            FontStyle::Normal,
        ))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn ensure_parent_exists(path: &Path) -> Result<(), AppError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(AppError::input(format!(
            "Cannot write chart '{}': directory '{}' does not exist.",
            path.display(),
            dir.display()
        ))),
        _ => Ok(()),
    }
}

/// Positive x-range covering the distances and any positive breakpoints.
fn x_range(distances: &[f64], breakpoints: &Breakpoints) -> Option<(f64, f64)> {
    let mut min_r = f64::INFINITY;
    let mut max_r = f64::NEG_INFINITY;
    for &r in distances.iter().filter(|r| r.is_finite() && **r > 0.0) {
        min_r = min_r.min(r);
        max_r = max_r.max(r);
    }
    if !(min_r.is_finite() && max_r.is_finite()) {
        return None;
    }
    for l in breakpoints.as_array() {
        if l.is_finite() && l > 0.0 {
            min_r = min_r.min(l);
            max_r = max_r.max(l);
        }
    }
    if max_r <= min_r {
        // Single distinct value: widen by a factor of two each side.
        return Some((min_r / 2.0, max_r * 2.0));
    }
    Some((min_r, max_r))
}

fn y_range(distances: &[f64], values: &[f64]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (&r, &b) in distances.iter().zip(values) {
        if r.is_finite() && r > 0.0 && b.is_finite() {
            min_y = min_y.min(b);
            max_y = max_y.max(b);
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CorrectionParams;
    use crate::math::linspace;
    use crate::models::evaluate;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kclass-bcurve-{}-{name}", std::process::id()))
    }

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        // IHDR: width and height are big-endian u32 right after the chunk type.
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (w, h)
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(1000.0), "1000");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(1.0), "1");
        assert_eq!(format_tick(1.9), "1");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(0.05), "0.1");
    }

    #[test]
    fn breakpoint_labels_keep_one_decimal() {
        assert_eq!(breakpoint_label(0, 75.0), "l1 = 75.0 km");
        assert_eq!(breakpoint_label(1, 264.0), "l2 = 264.0 km");
        assert_eq!(breakpoint_label(2, 812.5), "l3 = 812.5 km");
    }

    #[test]
    fn style_scales_with_dpi() {
        let low = ChartStyle::from_config(&ChartConfig {
            dpi: 72,
            ..ChartConfig::default()
        });
        let high = ChartStyle::from_config(&ChartConfig::default());
        assert_eq!(low.curve_width, 2);
        assert!(high.curve_width > low.curve_width);
        assert!((high.title_px - 14.0 * 300.0 / 72.0).abs() < 1e-9);
    }

    #[test]
    fn legend_area_fits_sample_line() {
        for dpi in [30, 72, 150, 300] {
            let style = ChartStyle::from_config(&ChartConfig {
                dpi,
                ..ChartConfig::default()
            });
            assert!(
                style.legend_area as i32 > style.legend_line,
                "dpi={dpi}: legend area {} vs sample {}",
                style.legend_area,
                style.legend_line
            );
        }
        let style = ChartStyle::from_config(&ChartConfig::default());
        assert_eq!(style.legend_line, 83);
        assert_eq!(style.legend_area, 83 + style.margin);
    }

    #[test]
    fn right_margin_leaves_room_for_last_tick_label() {
        let style = ChartStyle::from_config(&ChartConfig::default());
        // "1000" at ~41.7 px font: 4 * 0.6 * 41.67 / 2 ≈ 50 px.
        let extra = style.right_margin(1000.0) - style.margin;
        assert!((50..=51).contains(&extra), "extra={extra}");
        assert!(style.right_margin(1000.0) > style.right_margin(5.0));
    }

    #[test]
    fn thinning_keeps_one_point_per_column_and_endpoints() {
        let params = CorrectionParams::default();
        let r = linspace(1.0, 1000.0, 1000);
        let b = evaluate(&params, &r);
        let points: Vec<(f64, f64)> = r.iter().copied().zip(b).collect();

        let thinned = thin_by_column(&points, (1.0, 1000.0), 300);
        assert!(thinned.len() < points.len());
        assert!(thinned.len() <= 302);
        assert_eq!(thinned.first(), points.first());
        assert_eq!(thinned.last(), points.last());

        let col = |x: f64| (x.log10() / 3.0 * 300.0).floor() as i64;
        for pair in thinned[..thinned.len() - 1].windows(2) {
            assert_ne!(col(pair[0].0), col(pair[1].0));
        }

        // Sparse input is left alone.
        let sparse = [(1.0, 1.0), (10.0, 2.0), (100.0, 3.0)];
        assert_eq!(thin_by_column(&sparse, (1.0, 100.0), 300), sparse.to_vec());
    }

    #[test]
    fn x_range_includes_breakpoints_and_requires_positive_data() {
        let bp = Breakpoints::default();
        assert_eq!(x_range(&[1.0, 500.0], &bp), Some((1.0, 800.0)));
        assert_eq!(x_range(&[-3.0, 0.0], &bp), None);
        let single = Breakpoints {
            l1: 5.0,
            l2: 5.0,
            l3: 5.0,
        };
        assert_eq!(x_range(&[5.0], &single), Some((2.5, 10.0)));
    }

    #[test]
    fn missing_directory_is_an_input_error() {
        let config = ChartConfig {
            output: temp_path("no-such-dir").join("B_R_plot.png"),
            ..ChartConfig::default()
        };
        let err = render_chart(&[1.0, 2.0], &[1.0, 2.0], &Breakpoints::default(), &config)
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("does not exist"));
    }

    #[test]
    fn renders_png_and_overwrites_existing_file() {
        let output = temp_path("chart.png");
        std::fs::write(&output, b"stale").unwrap();

        let config = ChartConfig {
            output: output.clone(),
            dpi: 40,
            ..ChartConfig::default()
        };
        let params = CorrectionParams::default();
        let r = linspace(1.0, 1000.0, 200);
        let b = evaluate(&params, &r);
        render_chart(&r, &b, &params.breakpoints, &config).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_size(&bytes), config.pixel_size());
        assert_eq!(config.pixel_size(), (400, 240));
        let _ = std::fs::remove_file(&output);
    }
}
