//! Shared request-to-figure pipeline used by both CLI and TUI front-ends.
//!
//! A [`ChartRequest`] is already fully resolved by the time it reaches this
//! module, so building a figure is a total function: every variant maps to
//! exactly one chart builder and the result is always renderable (possibly
//! empty).

use crate::chart::{self, Figure};
use crate::domain::{AppConfig, ChartRequest, Dataset};

/// Build the figure for a resolved chart request.
pub fn build_figure(dataset: &Dataset, config: &AppConfig, request: &ChartRequest) -> Figure {
    let records = &dataset.records;
    match request {
        ChartRequest::Overview => {
            Figure::Trend(chart::build_trend(records, config.trend_skip_years))
        }
        ChartRequest::Correlation => Figure::Correlation(chart::build_correlation(records)),
        ChartRequest::YearTrend => Figure::Trend(chart::build_trend(records, 0)),
        ChartRequest::EarningsByCategory => Figure::Earnings(chart::build_earnings(records)),
        ChartRequest::Histogram { metric } => {
            Figure::Histogram(chart::build_histogram(records, *metric))
        }
        ChartRequest::Scatter { x, y } => Figure::Scatter(chart::build_scatter(records, *x, *y)),
        ChartRequest::Pie { year } => Figure::Pie(chart::build_pie(records, *year)),
        ChartRequest::Bar { metric } => Figure::Bar(chart::build_bar(records, *metric)),
        ChartRequest::Ranking { category, by } => {
            Figure::Bar(chart::build_ranking(records, category, *by, config.top_n))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatasetStats, Metric, RankMetric};
    use crate::stats::summary::tests::rec;

    fn dataset() -> Dataset {
        let records: Vec<_> = (1..=12)
            .map(|v| rec(if v % 2 == 0 { "Music" } else { "Gaming" }, 2006 + v, v as f64))
            .collect();
        let n = records.len();
        Dataset {
            stats: DatasetStats {
                n_rows: n,
                n_categories: 2,
                year_min: 2007,
                year_max: 2018,
            },
            records,
            row_errors: Vec::new(),
            rows_read: n,
            rows_used: n,
            rows_dropped: 0,
        }
    }

    #[test]
    fn every_request_variant_builds_a_figure() {
        let ds = dataset();
        let config = AppConfig::default();
        let requests = [
            ChartRequest::Overview,
            ChartRequest::Correlation,
            ChartRequest::YearTrend,
            ChartRequest::EarningsByCategory,
            ChartRequest::Histogram { metric: Metric::Subscribers },
            ChartRequest::Scatter { x: Metric::Subscribers, y: Metric::VideoViews },
            ChartRequest::Pie { year: 2010 },
            ChartRequest::Bar { metric: Metric::Uploads },
            ChartRequest::Ranking { category: "Music".into(), by: RankMetric::Subscribers },
        ];
        for request in requests {
            let fig = build_figure(&ds, &config, &request);
            assert!(!fig.title().is_empty(), "{request:?}");
        }
    }

    #[test]
    fn overview_truncates_but_year_trend_does_not() {
        let ds = dataset();
        let config = AppConfig::default();

        let Figure::Trend(full) = build_figure(&ds, &config, &ChartRequest::YearTrend) else {
            panic!("expected a trend figure");
        };
        let Figure::Trend(overview) = build_figure(&ds, &config, &ChartRequest::Overview) else {
            panic!("expected a trend figure");
        };
        assert_eq!(full.rows.len(), 12);
        assert_eq!(overview.rows.len(), 12 - config.trend_skip_years);
    }
}
