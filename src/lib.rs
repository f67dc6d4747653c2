//! `yt-trends` library crate.
//!
//! The binary (`ytt`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the data-preparation and aggregation modules stay independent of the
//!   terminal front-end
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod query;
pub mod report;
pub mod stats;
pub mod tui;
