//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - exported to JSON/CSV
//! - rendered by either the CLI tables or the TUI charts

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Numeric channel attribute selectable in the chart pickers.
///
/// The user-facing labels and the underlying dataset column names both live
/// here so the selector vocabulary has exactly one source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Subscribers,
    #[value(name = "views")]
    VideoViews,
    Uploads,
    #[value(name = "earnings")]
    AverageMonthlyEarnings,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Subscribers,
        Metric::VideoViews,
        Metric::Uploads,
        Metric::AverageMonthlyEarnings,
    ];

    /// Dataset column name (as it appears in the source CSV header,
    /// lowercased; the derived column uses its computed name).
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Subscribers => "subscribers",
            Metric::VideoViews => "video views",
            Metric::Uploads => "uploads",
            Metric::AverageMonthlyEarnings => "average_monthly_earnings",
        }
    }

    /// Human-readable label shown in pickers and chart titles.
    pub fn display_label(self) -> &'static str {
        match self {
            Metric::Subscribers => "Subscribers",
            Metric::VideoViews => "Video views",
            Metric::Uploads => "Uploaded videos",
            Metric::AverageMonthlyEarnings => "Average monthly earnings",
        }
    }

    /// Extract this metric's value from a record.
    pub fn value_of(self, record: &ChannelRecord) -> f64 {
        match self {
            Metric::Subscribers => record.subscribers,
            Metric::VideoViews => record.video_views,
            Metric::Uploads => record.uploads,
            Metric::AverageMonthlyEarnings => record.average_monthly_earnings,
        }
    }

}

/// Metric allowed in the top-10 ranking view.
///
/// The ranking feature deliberately offers only the two "size" columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Subscribers,
    #[value(name = "views")]
    VideoViews,
}

impl RankMetric {
    pub fn to_metric(self) -> Metric {
        match self {
            RankMetric::Subscribers => Metric::Subscribers,
            RankMetric::VideoViews => Metric::VideoViews,
        }
    }

    pub fn display_label(self) -> &'static str {
        self.to_metric().display_label()
    }

    pub fn toggle(self) -> RankMetric {
        match self {
            RankMetric::Subscribers => RankMetric::VideoViews,
            RankMetric::VideoViews => RankMetric::Subscribers,
        }
    }
}

/// One cleaned channel record.
///
/// Invariants (established by `io::ingest`, never re-checked downstream):
/// - `category` is non-empty (`"Other"` stands in for missing values)
/// - `created_year` is present and not the 1970 bad-data sentinel
/// - `average_monthly_earnings == (highest + lowest) / 2`, computed once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Raw channel name as it appears in the CSV. Use this for lookups.
    pub name: String,
    /// Presentation name: ASCII letters only (spaces, digits, punctuation
    /// stripped). Display-only; never keyed on.
    pub display_name: String,
    pub category: String,
    pub created_year: i32,
    pub subscribers: f64,
    pub video_views: f64,
    pub uploads: f64,
    pub highest_monthly_earnings: f64,
    pub lowest_monthly_earnings: f64,
    pub average_monthly_earnings: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub name: Option<String>,
    pub message: String,
}

/// Summary stats about the rows that survived cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub n_categories: usize,
    pub year_min: i32,
    pub year_max: i32,
}

/// The cleaned table: built once at startup, read-only afterwards.
///
/// Aggregators borrow `records` and return new derived values; nothing
/// mutates the dataset after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<ChannelRecord>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
    /// Rows removed by the creation-year cleaning rules (missing or 1970).
    pub rows_dropped: usize,
}

impl Dataset {
    /// Sorted distinct category list.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = self.records.iter().map(|r| r.category.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

}

/// One synthetic row of the year-trend aggregation: the most created
/// category for a given year and how many channels it accounts for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTrendRow {
    pub year: i32,
    pub category: String,
    pub created: usize,
}

/// Per-category mean of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMean {
    pub category: String,
    pub mean: f64,
}

/// Five-number summary used by box plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Descriptive statistics for one metric over the whole dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// A fully-resolved chart request.
///
/// Every variant carries its complete parameters: nothing is pulled from
/// interaction-layer state at build time, and there are no magic numbers in
/// the dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartRequest {
    /// Default story: year trend with the earliest years truncated for a
    /// shared, decluttered chart.
    Overview,
    /// Average earnings against subscribers, views, and uploads, with a
    /// regression line per panel.
    Correlation,
    /// The most created category per year, every year.
    YearTrend,
    /// Box plot + histogram of outlier-trimmed average earnings by category.
    EarningsByCategory,
    Histogram { metric: Metric },
    Scatter { x: Metric, y: Metric },
    Pie { year: i32 },
    Bar { metric: Metric },
    Ranking { category: String, by: RankMetric },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, the environment, and defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    /// Ranking depth (fixed at 10 in the product, configurable in the CLI).
    pub top_n: usize,
    /// How many of the earliest trend years the overview chart discards.
    pub trend_skip_years: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(crate::io::ingest::DEFAULT_DATA_FILE),
            top_n: 10,
            trend_skip_years: 6,
        }
    }
}
