//! Per-category means and descriptive statistics.

use std::collections::BTreeMap;

use crate::domain::{CategoryMean, ChannelRecord, Metric, MetricSummary};
use crate::stats::outliers::quantile;

/// Mean of `metric` per distinct category, in lexicographic category order.
///
/// Categories always come from existing rows, so every entry has at least
/// one observation and the mean is well-defined.
pub fn category_means(records: &[ChannelRecord], metric: Metric) -> Vec<CategoryMean> {
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = acc.entry(r.category.as_str()).or_insert((0.0, 0));
        entry.0 += metric.value_of(r);
        entry.1 += 1;
    }

    acc.into_iter()
        .map(|(category, (sum, count))| CategoryMean {
            category: category.to_string(),
            mean: sum / count as f64,
        })
        .collect()
}

/// Descriptive statistics (mean/std/min/quartiles/max) for one metric.
///
/// Returns `None` on an empty slice. The standard deviation is the sample
/// std (n-1 denominator).
pub fn metric_summary(records: &[ChannelRecord], metric: Metric) -> Option<MetricSummary> {
    if records.is_empty() {
        return None;
    }

    let mut values: Vec<f64> = records.iter().map(|r| metric.value_of(r)).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    Some(MetricSummary {
        metric,
        mean,
        std,
        min: values[0],
        q1: quantile(&values, 0.25)?,
        median: quantile(&values, 0.5)?,
        q3: quantile(&values, 0.75)?,
        max: values[values.len() - 1],
    })
}

/// Descriptive statistics for all selectable metrics.
pub fn dataset_summary(records: &[ChannelRecord]) -> Vec<MetricSummary> {
    Metric::ALL
        .iter()
        .filter_map(|&m| metric_summary(records, m))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record where every numeric column equals `v`.
    pub(crate) fn rec(category: &str, year: i32, v: f64) -> ChannelRecord {
        ChannelRecord {
            name: format!("{category}-{year}-{v}"),
            display_name: category.to_string(),
            category: category.to_string(),
            created_year: year,
            subscribers: v,
            video_views: v,
            uploads: v,
            highest_monthly_earnings: v,
            lowest_monthly_earnings: v,
            average_monthly_earnings: v,
        }
    }

    #[test]
    fn means_partition_the_total() {
        let records = vec![
            rec("Music", 2010, 10.0),
            rec("Music", 2011, 20.0),
            rec("Gaming", 2012, 5.0),
            rec("Gaming", 2013, 7.0),
            rec("Other", 2014, 100.0),
        ];

        let means = category_means(&records, Metric::Subscribers);
        assert_eq!(means.len(), 3);

        // Sum of per-category mean x count equals the column total.
        let counts: std::collections::BTreeMap<&str, usize> = [("Gaming", 2), ("Music", 2), ("Other", 1)].into();
        let weighted: f64 = means
            .iter()
            .map(|m| m.mean * counts[m.category.as_str()] as f64)
            .sum();
        let total: f64 = records.iter().map(|r| r.subscribers).sum();
        assert!((weighted - total).abs() < 1e-9);
    }

    #[test]
    fn means_are_category_sorted() {
        let records = vec![rec("Music", 2010, 1.0), rec("Gaming", 2010, 1.0)];
        let means = category_means(&records, Metric::Subscribers);
        assert_eq!(means[0].category, "Gaming");
        assert_eq!(means[1].category, "Music");
    }

    #[test]
    fn summary_basic_statistics() {
        let records: Vec<_> = [1.0, 2.0, 3.0, 4.0, 5.0]
            .iter()
            .map(|&v| rec("Music", 2010, v))
            .collect();

        let s = metric_summary(&records, Metric::Subscribers).unwrap();
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.q3, 4.0);
        // Sample std of 1..=5 is sqrt(2.5).
        assert!((s.std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn summary_of_empty_slice_is_none() {
        assert!(metric_summary(&[], Metric::Uploads).is_none());
    }
}
