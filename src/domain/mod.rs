//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the cleaned channel record and the immutable dataset that holds it
//! - metric/selector enums shared by the CLI, TUI, and chart builders
//! - fully-resolved chart requests (`ChartRequest`)
//! - aggregate row types produced by `stats`

pub mod types;

pub use types::*;
