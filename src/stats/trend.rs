//! Year-trend aggregation: the most created category per year.

use std::collections::BTreeMap;

use crate::domain::{ChannelRecord, YearTrendRow};

/// Group records by creation year and emit, for each year, the category
/// with the most channels created that year.
///
/// Output is sorted ascending by year, one row per distinct year. Ties on
/// the count break deterministically toward the lexicographically smallest
/// category (the `BTreeMap` iteration order plus a strictly-greater
/// comparison guarantee this).
pub fn year_trend(records: &[ChannelRecord]) -> Vec<YearTrendRow> {
    let mut by_year: BTreeMap<i32, BTreeMap<&str, usize>> = BTreeMap::new();
    for r in records {
        *by_year
            .entry(r.created_year)
            .or_default()
            .entry(r.category.as_str())
            .or_default() += 1;
    }

    by_year
        .into_iter()
        .map(|(year, counts)| {
            let mut best: (&str, usize) = ("", 0);
            for (category, count) in counts {
                if count > best.1 {
                    best = (category, count);
                }
            }
            YearTrendRow {
                year,
                category: best.0.to_string(),
                created: best.1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summary::tests::rec;

    #[test]
    fn one_row_per_year_sorted_ascending() {
        let records = vec![
            rec("Music", 2012, 1.0),
            rec("Gaming", 2006, 1.0),
            rec("Gaming", 2012, 1.0),
            rec("Gaming", 2012, 1.0),
            rec("Music", 2006, 1.0),
            rec("Music", 2006, 1.0),
        ];

        let trend = year_trend(&records);
        assert_eq!(trend.len(), 2);
        assert_eq!(
            trend[0],
            YearTrendRow { year: 2006, category: "Music".to_string(), created: 2 }
        );
        assert_eq!(
            trend[1],
            YearTrendRow { year: 2012, category: "Gaming".to_string(), created: 2 }
        );
        assert!(trend.windows(2).all(|w| w[0].year < w[1].year));
    }

    #[test]
    fn ties_break_lexicographically() {
        let records = vec![
            rec("Music", 2010, 1.0),
            rec("Gaming", 2010, 1.0),
        ];
        let trend = year_trend(&records);
        assert_eq!(trend[0].category, "Gaming");
        assert_eq!(trend[0].created, 1);
    }

    #[test]
    fn empty_input_yields_empty_trend() {
        assert!(year_trend(&[]).is_empty());
    }
}
