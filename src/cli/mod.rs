//! Command-line parsing for the YouTube channel statistics explorer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the ingest/aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::RankMetric;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ytt", version, about = "YouTube channel statistics explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (the default when no subcommand is given).
    Tui(DataArgs),
    /// Print the dataset summary and descriptive statistics.
    Summary(SummaryArgs),
    /// Print the most created category for each year.
    Trend(DataArgs),
    /// Print the top channels of one category.
    Rank(RankArgs),
}

/// Options shared by every subcommand: where the dataset comes from.
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// Path to the statistics CSV. Falls back to $YT_STATS_CSV, then the
    /// bundled default filename.
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
}

/// Options for `ytt summary`.
#[derive(Debug, Parser)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Export the descriptive statistics to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `ytt rank`.
#[derive(Debug, Parser)]
pub struct RankArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Category to rank within.
    #[arg(short = 'c', long)]
    pub category: String,

    /// Ranking metric.
    #[arg(long, value_enum, default_value_t = RankMetric::Subscribers)]
    pub by: RankMetric,

    /// How many channels to show.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Export the ranking to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}
