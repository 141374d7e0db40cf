//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the B(R) parameter set (`Breakpoints`, `LogLinear`, `Coefficients`, `CorrectionParams`)
//! - the correction regions (`Region`)
//! - run configuration (`SamplingConfig`, `ChartConfig`, `RunConfig`)
//! - the exported curve schema (`CurveFile`)

pub mod types;

pub use types::*;
