//! Chart output: PNG export (`chart`) and terminal preview (`ascii`).

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;

/// Contiguous runs of drawable points (positive finite `R`, finite `B`).
///
/// The log axis cannot place `R <= 0`, and a NaN/inf `B` breaks the line.
pub(crate) fn drawable_segments(distances: &[f64], values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&r, &b) in distances.iter().zip(values) {
        if r.is_finite() && r > 0.0 && b.is_finite() {
            current.push((r, b));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
