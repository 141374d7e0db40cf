//! Terminal formatting for run summaries and evaluation tables.

use std::path::Path;

use crate::domain::{CorrectionParams, Region, RunConfig, Spacing};
use crate::models::{BoundaryJump, boundary_jumps, region_counts, region_of};

/// Format the full run summary (parameters, grid, per-region counts, jumps).
pub fn format_run_summary(config: &RunConfig, distances: &[f64], values: &[f64]) -> String {
    let mut out = String::new();

    out.push_str("=== bcurve - distance-correction term B(R) ===\n");
    let s = &config.sampling;
    let spacing = match s.spacing {
        Spacing::Linear => "linear",
        Spacing::Log => "log",
    };
    out.push_str(&format!(
        "Grid: n={} | R=[{}, {}] km | spacing={spacing}\n",
        distances.len(),
        s.r_min,
        s.r_max,
    ));

    out.push_str("\nRegions:\n");
    out.push_str(&format_regions(&config.params, distances));

    out.push_str("\nBreakpoint jumps (B(l+) - B(l)):\n");
    for (i, j) in boundary_jumps(&config.params).iter().enumerate() {
        out.push_str(&format_jump(i, j));
    }

    if let (Some(&r0), Some(&b0), Some(&r1), Some(&b1)) =
        (distances.first(), values.first(), distances.last(), values.last())
    {
        out.push_str(&format!("\nEndpoints: B({r0}) = {b0:.4} | B({r1}) = {b1:.4}\n"));
    }

    out
}

fn format_regions(params: &CorrectionParams, distances: &[f64]) -> String {
    let bp = params.breakpoints;
    let counts = region_counts(params, distances);
    let bounds = [
        format!("(0, {}]", bp.l1),
        format!("({}, {}]", bp.l1, bp.l2),
        format!("({}, {}]", bp.l2, bp.l3),
        format!("({}, inf)", bp.l3),
    ];

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<16} {:>8} {:>8} {:>6}\n",
        "#", "R (km)", "a", "b", "n"
    ));
    for (region, bound) in Region::ALL.into_iter().zip(bounds) {
        let c = params.coefficients.get(region);
        out.push_str(&format!(
            "{:<4} {:<16} {:>8.3} {:>8.3} {:>6}\n",
            region.number(),
            bound,
            c.a,
            c.b,
            counts[region.number() - 1],
        ));
    }
    out
}

fn format_jump(index: usize, j: &BoundaryJump) -> String {
    format!(
        "  l{} = {} km: {:.4} -> {:.4} (jump {:+.4})\n",
        index + 1,
        j.breakpoint_km,
        j.left,
        j.right,
        j.jump(),
    )
}

/// Confirmation printed after the chart has been written.
pub fn format_saved_message(path: &Path) -> String {
    format!("Plot saved as '{}'", path.display())
}

/// Format `R, region, B` rows for explicit distances.
pub fn format_eval_table(params: &CorrectionParams, distances: &[f64], values: &[f64]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>12} {:>6} {:>12}\n", "R (km)", "region", "B(R)"));
    for (&r, &b) in distances.iter().zip(values) {
        let region = region_of(params, r)
            .map(|reg| reg.number().to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{r:>12.3} {region:>6} {b:>12.4}\n"));
    }
    out
}
