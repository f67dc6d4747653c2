//! Tukey-fence outlier trimming, computed independently per category.

use std::collections::BTreeMap;

use crate::domain::{ChannelRecord, FiveNumber, Metric};

/// Minimum group size for quartile computation. Smaller groups are passed
/// through untrimmed rather than erroring or producing degenerate fences.
const MIN_GROUP_SIZE: usize = 4;

/// Linear-interpolation quantile of an ascending-sorted, non-empty slice.
///
/// Uses the type-7 estimator (the usual statistics-package default), so the
/// fences line up with what standard box plots show.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] * (1.0 - frac) + sorted[hi] * frac)
}

/// Tukey fences `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` for a sorted sample.
///
/// Returns `None` when the sample is too small to form quartiles.
pub fn tukey_fences(sorted: &[f64]) -> Option<(f64, f64)> {
    if sorted.len() < MIN_GROUP_SIZE {
        return None;
    }
    let q1 = quantile(sorted, 0.25)?;
    let q3 = quantile(sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - 1.5 * iqr, q3 + 1.5 * iqr))
}

/// Remove per-category outliers of `metric`.
///
/// Fences are computed independently within each category's subset; a row
/// survives when its value lies inside its own category's fences. Groups
/// with fewer than [`MIN_GROUP_SIZE`] rows are kept whole.
///
/// The output is a flat, category-ordered collection of borrowed rows;
/// group membership stays available through the category field.
pub fn trim_outliers<'a>(records: &'a [ChannelRecord], metric: Metric) -> Vec<&'a ChannelRecord> {
    let mut groups: BTreeMap<&str, Vec<&ChannelRecord>> = BTreeMap::new();
    for r in records {
        groups.entry(r.category.as_str()).or_default().push(r);
    }

    let mut out = Vec::with_capacity(records.len());
    for (_, group) in groups {
        let mut values: Vec<f64> = group.iter().map(|r| metric.value_of(r)).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        match tukey_fences(&values) {
            Some((lo, hi)) => {
                out.extend(
                    group
                        .into_iter()
                        .filter(|r| (lo..=hi).contains(&metric.value_of(r))),
                );
            }
            None => out.extend(group),
        }
    }
    out
}

/// Five-number summary of `metric` over a set of rows.
pub fn five_number(rows: &[&ChannelRecord], metric: Metric) -> Option<FiveNumber> {
    let mut values: Vec<f64> = rows.iter().map(|r| metric.value_of(r)).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(FiveNumber {
        min: values[0],
        q1: quantile(&values, 0.25)?,
        median: quantile(&values, 0.5)?,
        q3: quantile(&values, 0.75)?,
        max: values[values.len() - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summary::tests::rec;

    #[test]
    fn quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.25), Some(1.75));
    }

    #[test]
    fn extreme_value_is_trimmed() {
        let mut records: Vec<_> = [10.0, 11.0, 12.0, 13.0, 14.0]
            .iter()
            .map(|&v| rec("Music", 2010, v))
            .collect();
        records.push(rec("Music", 2010, 1000.0));

        let kept = trim_outliers(&records, Metric::AverageMonthlyEarnings);
        assert_eq!(kept.len(), 5);
        assert!(kept.iter().all(|r| r.average_monthly_earnings < 1000.0));
    }

    #[test]
    fn values_inside_the_iqr_always_survive() {
        let records: Vec<_> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 200.0]
            .iter()
            .map(|&v| rec("Music", 2010, v))
            .collect();

        let mut values: Vec<f64> = records.iter().map(|r| r.subscribers).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let q1 = quantile(&values, 0.25).unwrap();
        let q3 = quantile(&values, 0.75).unwrap();

        let kept = trim_outliers(&records, Metric::Subscribers);
        for r in &records {
            if r.subscribers > q1 && r.subscribers < q3 {
                assert!(kept.iter().any(|k| k.name == r.name));
            }
        }
    }

    #[test]
    fn tiny_group_passes_through_untrimmed() {
        let records = vec![
            rec("Comedy", 2010, 1.0),
            rec("Comedy", 2011, 2.0),
            rec("Comedy", 2012, 50_000.0),
        ];
        let kept = trim_outliers(&records, Metric::Subscribers);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn fences_are_per_category() {
        // The Music group is tight; the Gaming group is wide. A value that
        // would be an outlier in Music is normal in Gaming.
        let mut records: Vec<_> = [10.0, 11.0, 12.0, 13.0]
            .iter()
            .map(|&v| rec("Music", 2010, v))
            .collect();
        records.extend([100.0, 500.0, 1000.0, 5000.0].iter().map(|&v| rec("Gaming", 2010, v)));
        records.push(rec("Music", 2010, 900.0));

        let kept = trim_outliers(&records, Metric::Subscribers);
        assert!(!kept.iter().any(|r| r.category == "Music" && r.subscribers == 900.0));
        assert_eq!(kept.iter().filter(|r| r.category == "Gaming").count(), 4);
    }
}
