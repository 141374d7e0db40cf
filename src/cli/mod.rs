//! Command-line parsing for the B(R) plotter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the evaluation/rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Spacing;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "bcurve",
    version,
    about = "Piecewise distance-correction term B(R) for K-class magnitudes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate B(R) on a distance grid, save the PNG chart and print a preview.
    ///
    /// This is what runs when `bcurve` is invoked without a subcommand.
    Plot(PlotArgs),
    /// Print B(R) for explicit distances.
    Eval(EvalArgs),
    /// Preview a previously exported curve JSON in the terminal.
    Show(ShowArgs),
}

/// Breakpoints and per-region coefficients.
#[derive(Debug, Args, Clone)]
pub struct ParamArgs {
    /// Upper bound of region 1 (km).
    #[arg(long, default_value_t = 75.0, allow_negative_numbers = true)]
    pub l1: f64,

    /// Upper bound of region 2 (km).
    #[arg(long, default_value_t = 264.0, allow_negative_numbers = true)]
    pub l2: f64,

    /// Upper bound of region 3 (km).
    #[arg(long, default_value_t = 800.0, allow_negative_numbers = true)]
    pub l3: f64,

    /// Slope of region 1.
    #[arg(long, default_value_t = 2.11, allow_negative_numbers = true)]
    pub a1: f64,

    /// Slope of region 2.
    #[arg(long, default_value_t = 1.1, allow_negative_numbers = true)]
    pub a2: f64,

    /// Slope of region 3.
    #[arg(long, default_value_t = 2.98, allow_negative_numbers = true)]
    pub a3: f64,

    /// Slope of region 4.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub a4: f64,

    /// Intercept of region 1.
    #[arg(long, default_value_t = 1.32, allow_negative_numbers = true)]
    pub b1: f64,

    /// Intercept of region 2.
    #[arg(long, default_value_t = 3.21, allow_negative_numbers = true)]
    pub b2: f64,

    /// Intercept of region 3.
    #[arg(long, default_value_t = -1.34, allow_negative_numbers = true)]
    pub b3: f64,

    /// Intercept of region 4.
    #[arg(long, default_value_t = 8.0, allow_negative_numbers = true)]
    pub b4: f64,
}

/// Options for `bcurve plot`.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Smallest distance on the grid (km).
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub r_min: f64,

    /// Largest distance on the grid (km).
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub r_max: f64,

    /// Number of grid points.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub num_points: usize,

    /// Grid spacing.
    #[arg(long, value_enum, default_value_t = Spacing::Linear)]
    pub spacing: Spacing,

    /// PNG output path (overwritten if it exists; the directory must exist).
    #[arg(short = 'o', long, default_value = crate::domain::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// PNG resolution (dots per inch) for the 10x6 in figure.
    #[arg(long, default_value_t = crate::domain::DEFAULT_DPI)]
    pub dpi: u32,

    /// Do not print the terminal preview.
    #[arg(long)]
    pub no_preview: bool,

    /// Preview width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Preview height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the evaluated grid to CSV.
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Export parameters + evaluated grid to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for `bcurve eval`.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Distance(s) in km. Repeat the flag or pass several values.
    #[arg(
        short = 'd',
        long = "distance",
        required = true,
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub distances: Vec<f64>,
}

/// Options for `bcurve show`.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Curve JSON file produced by `bcurve plot --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Preview width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Preview height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
