//! B(R) model implementations.
//!
//! The evaluator is a set of small, pure functions so that rendering, reporting
//! and exports can share it without carrying state around.

pub mod piecewise;

pub use piecewise::*;
