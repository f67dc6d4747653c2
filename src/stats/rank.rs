//! Top-N channel ranking within a category.

use std::cmp::Ordering;

use crate::domain::{ChannelRecord, RankMetric};

/// Filter to `category`, sort descending by the ranking metric, and keep
/// the first `n` rows (fewer if the category is small).
///
/// Equal values order deterministically by channel name ascending. Display
/// reversal (largest bar last) is a chart-builder concern, not done here.
pub fn top_channels<'a>(
    records: &'a [ChannelRecord],
    category: &str,
    by: RankMetric,
    n: usize,
) -> Vec<&'a ChannelRecord> {
    let metric = by.to_metric();
    let mut filtered: Vec<&ChannelRecord> =
        records.iter().filter(|r| r.category == category).collect();

    filtered.sort_by(|a, b| {
        metric
            .value_of(b)
            .partial_cmp(&metric.value_of(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    filtered.truncate(n);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summary::tests::rec;

    fn sample() -> Vec<ChannelRecord> {
        let mut out = Vec::new();
        for v in 1..=15 {
            let mut r = rec("Music", 2010, v as f64);
            r.name = format!("music-{v:02}");
            out.push(r);
        }
        let mut g = rec("Gaming", 2011, 99.0);
        g.name = "gamer".to_string();
        out.push(g);
        out
    }

    #[test]
    fn returns_at_most_n_descending_rows_from_one_category() {
        let records = sample();
        let top = top_channels(&records, "Music", RankMetric::Subscribers, 10);

        assert_eq!(top.len(), 10);
        assert!(top.iter().all(|r| r.category == "Music"));
        assert!(top.windows(2).all(|w| w[0].subscribers >= w[1].subscribers));
        assert_eq!(top[0].subscribers, 15.0);
    }

    #[test]
    fn small_category_yields_fewer_rows() {
        let records = sample();
        let top = top_channels(&records, "Gaming", RankMetric::VideoViews, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "gamer");
    }

    #[test]
    fn unknown_category_yields_empty() {
        let records = sample();
        assert!(top_channels(&records, "Sports", RankMetric::Subscribers, 10).is_empty());
    }

    #[test]
    fn ties_order_by_name() {
        let mut records = Vec::new();
        for name in ["b", "a", "c"] {
            let mut r = rec("Music", 2010, 7.0);
            r.name = name.to_string();
            records.push(r);
        }
        let top = top_channels(&records, "Music", RankMetric::Subscribers, 10);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
