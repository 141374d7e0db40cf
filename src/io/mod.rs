//! Input/output helpers.
//!
//! - evaluated grid export to CSV (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
