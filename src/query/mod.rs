//! Selector-to-query mapping.
//!
//! The interaction layer deals in user-facing label strings; this module
//! owns the fixed vocabulary and turns selections into fully-resolved
//! [`ChartRequest`] values. A null or unrecognized selection maps to `None`:
//! no chart is produced and no error is surfaced, by contract.

use crate::domain::{ChartRequest, Dataset, Metric, RankMetric};

/// Attribute picker vocabulary, in picker order.
pub const ATTRIBUTE_LABELS: [&str; 4] = [
    "Subscribers",
    "Video views",
    "Uploaded videos",
    "Average monthly earnings",
];

/// Year range offered by the pie-chart picker.
pub const PIE_YEAR_MIN: i32 = 2005;
pub const PIE_YEAR_MAX: i32 = 2022;

/// Categories withheld from the ranking picker. `Other` is a cleaning
/// sentinel, not a real category, so ranking inside it is meaningless.
pub const RANKING_EXCLUDED: [&str; 1] = ["Other"];

/// Resolve an attribute label from the fixed vocabulary.
pub fn metric_from_label(label: Option<&str>) -> Option<Metric> {
    match label? {
        "Subscribers" => Some(Metric::Subscribers),
        "Video views" => Some(Metric::VideoViews),
        "Uploaded videos" => Some(Metric::Uploads),
        "Average monthly earnings" => Some(Metric::AverageMonthlyEarnings),
        _ => None,
    }
}

pub fn histogram_request(label: Option<&str>) -> Option<ChartRequest> {
    Some(ChartRequest::Histogram {
        metric: metric_from_label(label)?,
    })
}

/// Both attribute selectors must resolve before a scatter chart triggers.
pub fn scatter_request(x_label: Option<&str>, y_label: Option<&str>) -> Option<ChartRequest> {
    Some(ChartRequest::Scatter {
        x: metric_from_label(x_label)?,
        y: metric_from_label(y_label)?,
    })
}

pub fn bar_request(label: Option<&str>) -> Option<ChartRequest> {
    Some(ChartRequest::Bar {
        metric: metric_from_label(label)?,
    })
}

/// Resolve a pie-chart year string (`"2005"`–`"2022"`).
pub fn pie_request(year_label: Option<&str>) -> Option<ChartRequest> {
    let year: i32 = year_label?.trim().parse().ok()?;
    if !(PIE_YEAR_MIN..=PIE_YEAR_MAX).contains(&year) {
        return None;
    }
    Some(ChartRequest::Pie { year })
}

/// Resolve a ranking request against the dataset's offered category list.
pub fn ranking_request(
    category: Option<&str>,
    by: RankMetric,
    offered: &[String],
) -> Option<ChartRequest> {
    let category = category?;
    if !offered.iter().any(|c| c == category) {
        return None;
    }
    Some(ChartRequest::Ranking {
        category: category.to_string(),
        by,
    })
}

/// Categories offered by the ranking picker: the dataset's sorted distinct
/// list minus the fixed exclusions.
pub fn ranking_categories(dataset: &Dataset) -> Vec<String> {
    dataset
        .categories()
        .into_iter()
        .filter(|c| !RANKING_EXCLUDED.contains(&c.as_str()))
        .collect()
}

/// Year labels offered by the pie picker.
pub fn pie_year_labels() -> Vec<String> {
    (PIE_YEAR_MIN..=PIE_YEAR_MAX).map(|y| y.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_vocabulary_resolves() {
        for label in ATTRIBUTE_LABELS {
            assert!(metric_from_label(Some(label)).is_some(), "{label}");
        }
        assert_eq!(
            metric_from_label(Some("Uploaded videos")),
            Some(Metric::Uploads)
        );
    }

    #[test]
    fn unrecognized_or_null_labels_are_a_no_op() {
        assert_eq!(metric_from_label(None), None);
        assert_eq!(metric_from_label(Some("Likes")), None);
        assert_eq!(histogram_request(Some("subscribers")), None); // case matters
        assert_eq!(bar_request(None), None);
    }

    #[test]
    fn scatter_needs_both_attributes() {
        assert_eq!(scatter_request(Some("Subscribers"), None), None);
        assert_eq!(scatter_request(None, Some("Video views")), None);
        assert_eq!(
            scatter_request(Some("Subscribers"), Some("Video views")),
            Some(ChartRequest::Scatter {
                x: Metric::Subscribers,
                y: Metric::VideoViews,
            })
        );
    }

    #[test]
    fn pie_years_are_bounded() {
        assert_eq!(pie_request(Some("2005")), Some(ChartRequest::Pie { year: 2005 }));
        assert_eq!(pie_request(Some("2022")), Some(ChartRequest::Pie { year: 2022 }));
        assert_eq!(pie_request(Some("2004")), None);
        assert_eq!(pie_request(Some("2023")), None);
        assert_eq!(pie_request(Some("not a year")), None);
        assert_eq!(pie_request(None), None);
    }

    #[test]
    fn ranking_respects_offered_list() {
        let offered = vec!["Gaming".to_string(), "Music".to_string()];
        assert!(ranking_request(Some("Music"), RankMetric::Subscribers, &offered).is_some());
        assert_eq!(
            ranking_request(Some("Other"), RankMetric::Subscribers, &offered),
            None
        );
        assert_eq!(ranking_request(None, RankMetric::VideoViews, &offered), None);
    }
}
