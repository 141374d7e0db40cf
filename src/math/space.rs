//! Distance grid generation.
//!
//! `linspace` follows the usual numeric convention: endpoint inclusive, `num = 0`
//! gives an empty grid and `num = 1` gives `[start]`. The last element is pinned
//! to `stop` exactly so `B(r_max)` is evaluated at the requested distance.

use crate::domain::{SamplingConfig, Spacing};
use crate::error::AppError;

/// Generate `num` evenly spaced values between `start` and `stop` (inclusive).
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num as f64 - 1.0);
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Generate `num` log-spaced values between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, num: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0) {
        return Err(AppError::input(format!(
            "Invalid log-spaced range: min={min}, max={max} (must be finite and >0)."
        )));
    }

    let exponents = linspace(min.log10(), max.log10(), num);
    let mut out: Vec<f64> = exponents.into_iter().map(|e| 10f64.powf(e)).collect();
    // Pin endpoints so rounding in powf does not move them.
    if let Some(first) = out.first_mut() {
        *first = min;
    }
    if num > 1 {
        out[num - 1] = max;
    }
    Ok(out)
}

/// Build the distance grid for a run.
///
/// Bounds must be finite and at least one point must be requested. Non-positive
/// distances are allowed on a linear grid; they flow through the evaluator unchanged.
pub fn sample_distances(sampling: &SamplingConfig) -> Result<Vec<f64>, AppError> {
    let SamplingConfig {
        r_min,
        r_max,
        num_points,
        spacing,
    } = *sampling;

    if !(r_min.is_finite() && r_max.is_finite()) {
        return Err(AppError::input(format!(
            "Invalid distance range: r_min={r_min}, r_max={r_max} (must be finite)."
        )));
    }
    if num_points == 0 {
        return Err(AppError::input("Number of points must be >= 1."));
    }

    match spacing {
        Spacing::Linear => Ok(linspace(r_min, r_max, num_points)),
        Spacing::Log => log_space(r_min, r_max, num_points),
    }
}
