//! Shared "evaluate and render" pipeline.
//!
//! distance grid -> B(R) evaluation -> PNG chart -> optional exports
//!
//! The CLI handlers only deal with presentation (printing summaries and previews).

use crate::domain::{CorrectionParams, RunConfig};
use crate::error::AppError;
use crate::math::sample_distances;
use crate::models::{evaluate, region_counts};

/// All computed outputs of a single `bcurve plot` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub distances: Vec<f64>,
    pub values: Vec<f64>,
}

/// Build the distance grid and evaluate B(R) on it.
pub fn evaluate_grid(config: &RunConfig) -> Result<RunOutput, AppError> {
    let distances = sample_distances(&config.sampling)?;
    warn_on_unvalidated_input(&config.params, &distances);

    let values = evaluate(&config.params, &distances);
    log::debug!(
        "region counts: {:?}",
        region_counts(&config.params, &distances)
    );

    Ok(RunOutput { distances, values })
}

/// Execute the full pipeline: evaluate, render the chart, write optional exports.
pub fn run_plot(config: &RunConfig) -> Result<RunOutput, AppError> {
    let run = evaluate_grid(config)?;
    log::info!(
        "evaluated B(R) at {} distances in [{}, {}] km",
        run.distances.len(),
        config.sampling.r_min,
        config.sampling.r_max
    );

    crate::plot::render_chart(
        &run.distances,
        &run.values,
        &config.params.breakpoints,
        &config.chart,
    )?;

    if let Some(path) = &config.export_csv {
        crate::io::write_results_csv(path, &config.params, &run.distances, &run.values)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::write_curve_json(path, &config.params, &run.distances, &run.values)?;
    }

    Ok(run)
}

/// Breakpoints and distances are used as given; these are only warnings.
pub fn warn_on_unvalidated_input(params: &CorrectionParams, distances: &[f64]) {
    let bp = params.breakpoints;
    if !bp.is_monotonic() {
        log::warn!(
            "breakpoints are not increasing (l1={}, l2={}, l3={}); regions overlap or are empty",
            bp.l1,
            bp.l2,
            bp.l3
        );
    }

    let non_positive = distances.iter().filter(|r| **r <= 0.0).count();
    if non_positive > 0 {
        log::warn!("{non_positive} distance(s) <= 0 km; log10 yields -inf/NaN for them");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Breakpoints, SamplingConfig, Spacing};

    #[test]
    fn default_grid_matches_reference_values() {
        let run = evaluate_grid(&RunConfig::default()).unwrap();
        assert_eq!(run.distances.len(), 1000);
        assert_eq!(run.values.len(), 1000);
        assert_eq!(run.values[0], 1.32);
        assert_eq!(run.values[999], 8.0);
    }

    #[test]
    fn non_monotonic_breakpoints_still_evaluate() {
        let mut config = RunConfig::default();
        config.params.breakpoints = Breakpoints {
            l1: 500.0,
            l2: 264.0,
            l3: 800.0,
        };
        let run = evaluate_grid(&config).unwrap();
        assert_eq!(run.values.len(), 1000);
    }

    #[test]
    fn invalid_sampling_is_rejected() {
        let config = RunConfig {
            sampling: SamplingConfig {
                r_min: 0.0,
                r_max: 100.0,
                num_points: 10,
                spacing: Spacing::Log,
            },
            ..RunConfig::default()
        };
        assert!(evaluate_grid(&config).is_err());
    }

    #[test]
    fn run_plot_writes_chart_and_exports() {
        let dir = std::env::temp_dir().join(format!("kclass-bcurve-{}-pipeline", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = RunConfig::default();
        config.sampling.num_points = 100;
        config.chart.output = dir.join("B_R_plot.png");
        config.chart.dpi = 30;
        config.export_csv = Some(dir.join("b.csv"));
        config.export_curve = Some(dir.join("b.json"));

        let run = run_plot(&config).unwrap();
        assert_eq!(run.values.len(), 100);
        assert!(config.chart.output.is_file());
        assert!(dir.join("b.csv").is_file());
        assert!(dir.join("b.json").is_file());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
