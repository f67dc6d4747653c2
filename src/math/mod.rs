//! Small numeric helpers shared by the chart builders.

pub mod ols;

pub use ols::*;
