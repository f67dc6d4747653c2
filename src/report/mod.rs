//! Formatted terminal output for the CLI subcommands.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{ChannelRecord, Dataset, MetricSummary, RankMetric, YearTrendRow};

/// Format the dataset header + descriptive statistics table.
pub fn format_summary(dataset: &Dataset, summaries: &[MetricSummary]) -> String {
    let mut out = String::new();

    out.push_str("=== ytt - YouTube channel statistics ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} dropped={} errors={}\n",
        dataset.rows_read,
        dataset.rows_used,
        dataset.rows_dropped,
        dataset.row_errors.len(),
    ));
    out.push_str(&format!(
        "Categories: {} | Created: {}-{}\n",
        dataset.stats.n_categories, dataset.stats.year_min, dataset.stats.year_max,
    ));

    out.push_str("\nDescriptive statistics:\n");
    out.push_str(&format!(
        "{:<26} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "metric", "mean", "std", "min", "25%", "50%", "75%", "max"
    ));
    out.push_str(&format!(
        "{:-<26} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", "", "", ""
    ));
    for s in summaries {
        out.push_str(&format!(
            "{:<26} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            truncate(s.metric.column_name(), 26),
            fmt_count(s.mean),
            fmt_count(s.std),
            fmt_count(s.min),
            fmt_count(s.q1),
            fmt_count(s.median),
            fmt_count(s.q3),
            fmt_count(s.max),
        ));
    }

    out
}

/// Format the year-trend table: most created category per year.
pub fn format_year_trend(rows: &[YearTrendRow]) -> String {
    let mut out = String::new();
    out.push_str("The most created category for each year:\n");
    out.push_str(&format!("{:<6} {:<28} {:>8}\n", "year", "category", "created"));
    out.push_str(&format!("{:-<6} {:-<28} {:-<8}\n", "", "", ""));
    for row in rows {
        out.push_str(&format!(
            "{:<6} {:<28} {:>8}\n",
            row.year,
            truncate(&row.category, 28),
            row.created
        ));
    }
    out
}

/// Format a top-N ranking table (aggregator order: largest first).
pub fn format_rankings(rows: &[&ChannelRecord], category: &str, by: RankMetric) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Top {} channels in {category} by {}:\n",
        rows.len(),
        by.display_label()
    ));
    out.push_str(&format!(
        "{:<4} {:<24} {:>12} {:>12} {:>6}\n",
        "#", "channel", "subs", "views", "year"
    ));
    out.push_str(&format!(
        "{:-<4} {:-<24} {:-<12} {:-<12} {:-<6}\n",
        "", "", "", "", ""
    ));
    for (idx, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<24} {:>12} {:>12} {:>6}\n",
            idx + 1,
            truncate(&r.name, 24),
            fmt_count(r.subscribers),
            fmt_count(r.video_views),
            r.created_year,
        ));
    }
    out
}

/// Compact human-scale number formatting for table cells.
pub fn fmt_count(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if a >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{v:.1}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearTrendRow;

    #[test]
    fn fmt_count_scales() {
        assert_eq!(fmt_count(12.0), "12.0");
        assert_eq!(fmt_count(4_500.0), "4.5K");
        assert_eq!(fmt_count(2_300_000.0), "2.30M");
        assert_eq!(fmt_count(245_000_000_000.0), "245.00B");
    }

    #[test]
    fn year_trend_table_lists_every_row() {
        let rows = vec![
            YearTrendRow { year: 2006, category: "Music".into(), created: 3 },
            YearTrendRow { year: 2007, category: "Gaming".into(), created: 5 },
        ];
        let table = format_year_trend(&rows);
        assert!(table.contains("2006"));
        assert!(table.contains("Gaming"));
        assert_eq!(table.lines().count(), 5);
    }

    #[test]
    fn truncate_marks_shortened_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-channel-name", 10), "a-very-lo.");
    }
}
