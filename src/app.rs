//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - evaluates B(R) on the distance grid
//! - renders and saves the chart
//! - prints reports/previews
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, EvalArgs, ParamArgs, PlotArgs, ShowArgs};
use crate::domain::{
    Breakpoints, ChartConfig, Coefficients, CorrectionParams, LogLinear, RunConfig,
    SamplingConfig,
};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bcurve` binary.
pub fn run() -> Result<(), AppError> {
    crate::logging::init();

    // `bcurve` with no arguments runs the default scenario, i.e. `bcurve plot`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Plot(args) => handle_plot(args),
        Command::Eval(args) => handle_eval(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_plot(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, &run.distances, &run.values)
    );
    println!("{}", crate::report::format_saved_message(&config.chart.output));

    if config.preview {
        let plot = crate::plot::render_ascii_plot(
            &run.distances,
            &run.values,
            &config.params.breakpoints,
            config.preview_width,
            config.preview_height,
        );
        println!("\n{plot}");
    }

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let params = params_from_args(&args.params);
    pipeline::warn_on_unvalidated_input(&params, &args.distances);

    let values = crate::models::evaluate(&params, &args.distances);
    print!(
        "{}",
        crate::report::format_eval_table(&params, &args.distances, &values)
    );
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{plot}");
    Ok(())
}

pub fn params_from_args(args: &ParamArgs) -> CorrectionParams {
    CorrectionParams {
        breakpoints: Breakpoints {
            l1: args.l1,
            l2: args.l2,
            l3: args.l3,
        },
        coefficients: Coefficients {
            near: LogLinear::new(args.a1, args.b1),
            intermediate: LogLinear::new(args.a2, args.b2),
            far: LogLinear::new(args.a3, args.b3),
            teleseismic: LogLinear::new(args.a4, args.b4),
        },
    }
}

pub fn run_config_from_args(args: &PlotArgs) -> RunConfig {
    RunConfig {
        params: params_from_args(&args.params),
        sampling: SamplingConfig {
            r_min: args.r_min,
            r_max: args.r_max,
            num_points: args.num_points,
            spacing: args.spacing,
        },
        chart: ChartConfig {
            output: args.output.clone(),
            dpi: args.dpi,
            ..ChartConfig::default()
        },
        preview: !args.no_preview,
        preview_width: args.width,
        preview_height: args.height,
        export_csv: args.export_csv.clone(),
        export_curve: args.export_curve.clone(),
    }
}

/// Rewrite argv so `bcurve` defaults to `bcurve plot`.
///
/// Rules:
/// - `bcurve`                      -> `bcurve plot`
/// - `bcurve --l1 80 ...`          -> `bcurve plot --l1 80 ...`
/// - `bcurve --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("plot".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "plot" | "eval" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "plot flags".
    if arg1.starts_with('-') {
        argv.insert(1, "plot".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_plot() {
        assert_eq!(rewrite_args(argv(&["bcurve"])), argv(&["bcurve", "plot"]));
        assert_eq!(
            rewrite_args(argv(&["bcurve", "--l1", "80"])),
            argv(&["bcurve", "plot", "--l1", "80"])
        );
        assert_eq!(
            rewrite_args(argv(&["bcurve", "eval", "-d", "10"])),
            argv(&["bcurve", "eval", "-d", "10"])
        );
        assert_eq!(rewrite_args(argv(&["bcurve", "--help"])), argv(&["bcurve", "--help"]));
    }

    #[test]
    fn default_flags_match_default_config() {
        let cli = Cli::parse_from(rewrite_args(argv(&["bcurve"])));
        let Command::Plot(args) = cli.command else {
            panic!("expected plot command");
        };
        let config = run_config_from_args(&args);
        let expected = RunConfig::default();

        assert_eq!(config.params, expected.params);
        assert_eq!(config.sampling, expected.sampling);
        assert_eq!(config.chart, expected.chart);
        assert!(config.preview);
        assert!(config.export_csv.is_none());
    }

    #[test]
    fn parameter_flags_override_defaults() {
        let cli = Cli::parse_from(argv(&[
            "bcurve", "plot", "--l2", "300", "--b3", "-2.5", "--a4", "0.5", "-n", "50",
            "--spacing", "log", "-o", "out.png", "--no-preview",
        ]));
        let Command::Plot(args) = cli.command else {
            panic!("expected plot command");
        };
        let config = run_config_from_args(&args);

        assert_eq!(config.params.breakpoints.l2, 300.0);
        assert_eq!(config.params.coefficients.far, LogLinear::new(2.98, -2.5));
        assert_eq!(config.params.coefficients.teleseismic, LogLinear::new(0.5, 8.0));
        assert_eq!(config.sampling.num_points, 50);
        assert_eq!(config.sampling.spacing, crate::domain::Spacing::Log);
        assert_eq!(config.chart.output, std::path::PathBuf::from("out.png"));
        assert!(!config.preview);
    }

    #[test]
    fn negative_breakpoints_and_range_are_passed_through() {
        let cli = Cli::parse_from(argv(&[
            "bcurve", "plot", "--r-max", "-1", "--l1", "-5", "--l2", "-2", "--l3", "-0.5",
        ]));
        let Command::Plot(args) = cli.command else {
            panic!("expected plot command");
        };
        let config = run_config_from_args(&args);

        assert_eq!(config.sampling.r_max, -1.0);
        assert_eq!(
            config.params.breakpoints,
            Breakpoints {
                l1: -5.0,
                l2: -2.0,
                l3: -0.5,
            }
        );
    }

    #[test]
    fn eval_accepts_several_distances() {
        let cli = Cli::parse_from(argv(&["bcurve", "eval", "-d", "1", "75", "--distance", "1000"]));
        let Command::Eval(args) = cli.command else {
            panic!("expected eval command");
        };
        assert_eq!(args.distances, vec![1.0, 75.0, 1000.0]);
        assert_eq!(params_from_args(&args.params), CorrectionParams::default());
    }
}
