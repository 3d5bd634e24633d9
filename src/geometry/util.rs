//! Geometric utility functions shared across the meshing pipeline.

pub mod conversions;
pub mod norms;

pub use conversions::*;
pub use norms::*;
