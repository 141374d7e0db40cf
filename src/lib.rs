//! `kclass-bcurve` library crate.
//!
//! The binary (`bcurve`) is a thin wrapper around this library so that:
//!
//! - the B(R) evaluator is testable without spawning processes
//! - other magnitude tooling can reuse the evaluator and the chart renderer

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
