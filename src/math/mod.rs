//! Mathematical utilities: distance grids.

pub mod space;

pub use space::*;
