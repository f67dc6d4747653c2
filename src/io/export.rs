//! Export helpers for the CLI subcommands.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; nothing here is read back by the application.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{ChannelRecord, MetricSummary, RankMetric};
use crate::error::AppError;

/// Write a ranking table to CSV.
pub fn write_rankings_csv(
    path: &Path,
    rows: &[&ChannelRecord],
    category: &str,
    by: RankMetric,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "rank,channel,category,rank_metric,created_year,subscribers,video_views,uploads,average_monthly_earnings"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (idx, r) in rows.iter().enumerate() {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{:.2}",
            idx + 1,
            csv_field(&r.name),
            csv_field(category),
            by.to_metric().column_name(),
            r.created_year,
            r.subscribers,
            r.video_views,
            r.uploads,
            r.average_monthly_earnings,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the descriptive-statistics summary as pretty JSON.
pub fn write_summary_json(path: &Path, summaries: &[MetricSummary]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, summaries)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Quote a field when it contains CSV metacharacters.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
