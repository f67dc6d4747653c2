//! Chart builders.
//!
//! A builder takes a prepared slice of the dataset plus chart parameters
//! and produces a [`Figure`]: a render-ready description with precomputed
//! series, bounds, and axis scales. All decisions happen here; the TUI
//! widget that draws a `Figure` contains layout code only.
//!
//! Builders never mutate the dataset and never fail: a degenerate but
//! well-formed request (say, a pie year with no surviving channels) yields
//! an empty figure, which the renderer shows as a hint instead of a chart.

pub mod axis;

pub use axis::AxisScale;

use crate::domain::{ChannelRecord, FiveNumber, Metric, RankMetric, YearTrendRow};
use crate::math::linear_fit;
use crate::stats::{category_means, five_number, top_channels, trim_outliers, year_trend};

/// A renderable chart description.
#[derive(Debug, Clone)]
pub enum Figure {
    Scatter(ScatterFigure),
    Histogram(HistogramFigure),
    Bar(BarFigure),
    Pie(PieFigure),
    Trend(TrendFigure),
    /// Three regression panels sharing one title.
    Correlation(CorrelationFigure),
    /// Box plot + histogram pair over the outlier-trimmed earnings column.
    Earnings(EarningsFigure),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Scatter(f) => &f.title,
            Figure::Histogram(f) => &f.title,
            Figure::Bar(f) => &f.title,
            Figure::Pie(f) => &f.title,
            Figure::Trend(f) => &f.title,
            Figure::Correlation(f) => &f.title,
            Figure::Earnings(f) => &f.title,
        }
    }

    /// True when there is nothing to draw for the selection.
    pub fn is_empty(&self) -> bool {
        match self {
            Figure::Scatter(f) => f.points.is_empty(),
            Figure::Histogram(f) => f.counts.iter().all(|&c| c == 0),
            Figure::Bar(f) => f.bars.is_empty(),
            Figure::Pie(f) => f.slices.is_empty(),
            Figure::Trend(f) => f.rows.is_empty(),
            Figure::Correlation(f) => f.panels.iter().all(|p| p.points.is_empty()),
            Figure::Earnings(f) => f.boxes.boxes.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    /// Two endpoints of the OLS regression line, when one could be fit.
    pub regression: Option<[(f64, f64); 2]>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

#[derive(Debug, Clone)]
pub struct HistogramFigure {
    pub title: String,
    pub x_label: String,
    pub bin_start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
    pub max_count: usize,
    pub x_scale: AxisScale,
}

/// Horizontal bars: one labelled value each, rendered top to bottom in the
/// order given.
#[derive(Debug, Clone)]
pub struct BarFigure {
    pub title: String,
    pub value_label: String,
    pub bars: Vec<(String, f64)>,
    pub max_value: f64,
    pub scale: AxisScale,
}

#[derive(Debug, Clone)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone)]
pub struct TrendFigure {
    pub title: String,
    pub rows: Vec<YearTrendRow>,
    pub max_created: usize,
}

#[derive(Debug, Clone)]
pub struct CorrelationFigure {
    pub title: String,
    pub panels: [ScatterFigure; 3],
}

#[derive(Debug, Clone)]
pub struct EarningsFigure {
    pub title: String,
    pub boxes: BoxPanel,
    pub histogram: HistogramFigure,
}

#[derive(Debug, Clone)]
pub struct BoxPanel {
    pub value_label: String,
    pub boxes: Vec<(String, FiveNumber)>,
    pub max_value: f64,
    pub scale: AxisScale,
}

/// Scatter of two metrics with a regression overlay.
pub fn build_scatter(records: &[ChannelRecord], x: Metric, y: Metric) -> ScatterFigure {
    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (x.value_of(r), y.value_of(r)))
        .collect();
    scatter_from_points(
        format!(
            "Correlation between {} and {}",
            x.display_label(),
            y.display_label()
        ),
        x.column_name(),
        y.column_name(),
        points,
    )
}

fn scatter_from_points(
    title: String,
    x_name: &str,
    y_name: &str,
    points: Vec<(f64, f64)>,
) -> ScatterFigure {
    let x_max = points.iter().map(|p| p.0).fold(0.0_f64, f64::max);
    let y_max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    // Both axes start at zero so magnitudes stay comparable across selections.
    let x_bounds = [0.0, pad_upper(x_max)];
    let y_bounds = [0.0, pad_upper(y_max)];

    let regression = linear_fit(&points).map(|(intercept, slope)| {
        let x0 = x_bounds[0];
        let x1 = x_bounds[1];
        [(x0, intercept + slope * x0), (x1, intercept + slope * x1)]
    });

    let x_scale = AxisScale::for_max(x_max);
    let y_scale = AxisScale::for_max(y_max);

    ScatterFigure {
        title,
        x_label: x_scale.axis_label(x_name),
        y_label: y_scale.axis_label(y_name),
        points,
        regression,
        x_bounds,
        y_bounds,
        x_scale,
        y_scale,
    }
}

/// Histogram of one metric over the given rows, Sturges binning.
pub fn build_histogram(records: &[ChannelRecord], metric: Metric) -> HistogramFigure {
    let values: Vec<f64> = records.iter().map(|r| metric.value_of(r)).collect();
    histogram_from_values(
        format!("Histogram of {}", metric.display_label()),
        metric.column_name(),
        &values,
    )
}

fn histogram_from_values(title: String, x_name: &str, values: &[f64]) -> HistogramFigure {
    let x_scale = AxisScale::for_max(values.iter().copied().fold(0.0_f64, f64::max));
    let x_label = x_scale.axis_label(x_name);

    if values.is_empty() {
        return HistogramFigure {
            title,
            x_label,
            bin_start: 0.0,
            bin_width: 1.0,
            counts: Vec::new(),
            max_count: 0,
            x_scale,
        };
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Sturges' rule. A constant column degenerates to one bin.
    let k = ((values.len() as f64).log2().ceil() as usize + 1).max(1);
    let span = max - min;
    let bin_width = if span > 0.0 { span / k as f64 } else { 1.0 };

    let mut counts = vec![0usize; k];
    for &v in values {
        let idx = (((v - min) / bin_width).floor() as usize).min(k - 1);
        counts[idx] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0);

    HistogramFigure {
        title,
        x_label,
        bin_start: min,
        bin_width,
        counts,
        max_count,
        x_scale,
    }
}

/// Per-category mean of one metric as horizontal bars.
pub fn build_bar(records: &[ChannelRecord], metric: Metric) -> BarFigure {
    let means = category_means(records, metric);
    let bars: Vec<(String, f64)> = means.into_iter().map(|m| (m.category, m.mean)).collect();
    let max_value = bars.iter().map(|b| b.1).fold(0.0_f64, f64::max);
    let scale = AxisScale::for_max(max_value);

    BarFigure {
        title: format!("Average {} per category", metric.display_label()),
        value_label: scale.axis_label(metric.column_name()),
        bars,
        max_value,
        scale,
    }
}

/// Category share of channels created in `year`, slices ascending by count.
pub fn build_pie(records: &[ChannelRecord], year: i32) -> PieFigure {
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for r in records.iter().filter(|r| r.created_year == year) {
        *counts.entry(r.category.as_str()).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label: label.to_string(),
            count,
            fraction: count as f64 / total as f64,
        })
        .collect();
    // Ascending count, smallest slice first.
    slices.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.label.cmp(&b.label)));

    PieFigure {
        title: format!("Category share of channels created in {year}"),
        slices,
    }
}

/// Year-trend bars, optionally discarding the earliest `skip_years` rows.
///
/// The truncation is display-only: the overview page uses it to declutter
/// a shared chart, the dedicated trend page passes zero.
pub fn build_trend(records: &[ChannelRecord], skip_years: usize) -> TrendFigure {
    let mut rows = year_trend(records);
    if skip_years > 0 && skip_years < rows.len() {
        rows.drain(..skip_years);
    } else if skip_years >= rows.len() {
        rows.clear();
    }
    let max_created = rows.iter().map(|r| r.created).max().unwrap_or(0);

    TrendFigure {
        title: "The most created category for each year".to_string(),
        rows,
        max_created,
    }
}

/// The three-panel correlation story: average earnings against each of the
/// other metrics, regression line per panel.
pub fn build_correlation(records: &[ChannelRecord]) -> CorrelationFigure {
    let panel = |y: Metric| {
        let points: Vec<(f64, f64)> = records
            .iter()
            .map(|r| (r.average_monthly_earnings, y.value_of(r)))
            .collect();
        scatter_from_points(
            y.display_label().to_string(),
            Metric::AverageMonthlyEarnings.column_name(),
            y.column_name(),
            points,
        )
    };

    CorrelationFigure {
        title: "Correlation between average earning & (subscribers, video views, uploaded videos)"
            .to_string(),
        panels: [
            panel(Metric::Subscribers),
            panel(Metric::VideoViews),
            panel(Metric::Uploads),
        ],
    }
}

/// Box plot + histogram over the per-category outlier-trimmed earnings.
pub fn build_earnings(records: &[ChannelRecord]) -> EarningsFigure {
    let trimmed = trim_outliers(records, Metric::AverageMonthlyEarnings);

    let mut boxes: Vec<(String, FiveNumber)> = Vec::new();
    let mut group: Vec<&ChannelRecord> = Vec::new();
    let mut current: Option<&str> = None;
    // `trim_outliers` output is category-ordered, so one linear pass groups it.
    for r in trimmed.iter().copied() {
        if current != Some(r.category.as_str()) {
            if let (Some(cat), Some(fx)) = (
                current,
                five_number(&group, Metric::AverageMonthlyEarnings),
            ) {
                boxes.push((cat.to_string(), fx));
            }
            group.clear();
            current = Some(r.category.as_str());
        }
        group.push(r);
    }
    if let (Some(cat), Some(fx)) = (current, five_number(&group, Metric::AverageMonthlyEarnings)) {
        boxes.push((cat.to_string(), fx));
    }

    let max_value = boxes.iter().map(|b| b.1.max).fold(0.0_f64, f64::max);
    let scale = AxisScale::for_max(max_value);

    let values: Vec<f64> = trimmed
        .iter()
        .map(|r| r.average_monthly_earnings)
        .collect();
    let histogram = histogram_from_values(
        "Histogram of average monthly earnings".to_string(),
        Metric::AverageMonthlyEarnings.column_name(),
        &values,
    );

    EarningsFigure {
        title: "Average earning for each category".to_string(),
        boxes: BoxPanel {
            value_label: scale.axis_label(Metric::AverageMonthlyEarnings.column_name()),
            boxes,
            max_value,
            scale,
        },
        histogram,
    }
}

/// Top-N ranking bars. The rows come back from the aggregator largest
/// first; we reverse here so the largest bar renders at the bottom edge of
/// the chart, matching the product's visual convention.
pub fn build_ranking(
    records: &[ChannelRecord],
    category: &str,
    by: RankMetric,
    n: usize,
) -> BarFigure {
    let metric = by.to_metric();
    let mut top = top_channels(records, category, by, n);
    top.reverse();

    let bars: Vec<(String, f64)> = top
        .iter()
        .map(|r| (r.display_name.clone(), metric.value_of(r)))
        .collect();
    let max_value = bars.iter().map(|b| b.1).fold(0.0_f64, f64::max);
    let scale = AxisScale::for_max(max_value);

    BarFigure {
        title: format!("Top {n} {category} channels by {}", by.display_label()),
        value_label: scale.axis_label(metric.column_name()),
        bars,
        max_value,
        scale,
    }
}

fn pad_upper(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    max * 1.05
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summary::tests::rec;

    #[test]
    fn histogram_counts_cover_every_row() {
        let records: Vec<_> = (1..=40).map(|v| rec("Music", 2010, v as f64)).collect();
        let fig = build_histogram(&records, Metric::Subscribers);
        assert_eq!(fig.counts.iter().sum::<usize>(), 40);
        assert!(fig.max_count >= 1);
        assert!(fig.bin_width > 0.0);
    }

    #[test]
    fn histogram_of_constant_column_is_one_bin() {
        let records: Vec<_> = (0..8).map(|_| rec("Music", 2010, 5.0)).collect();
        let fig = build_histogram(&records, Metric::Uploads);
        assert_eq!(fig.counts.iter().sum::<usize>(), 8);
        assert_eq!(fig.counts.iter().filter(|&&c| c > 0).count(), 1);
    }

    #[test]
    fn pie_fractions_sum_to_one_and_sort_ascending() {
        let records = vec![
            rec("Music", 2010, 1.0),
            rec("Music", 2010, 1.0),
            rec("Music", 2010, 1.0),
            rec("Gaming", 2010, 1.0),
            rec("Comedy", 2011, 1.0),
        ];
        let fig = build_pie(&records, 2010);
        assert_eq!(fig.slices.len(), 2);
        let total: f64 = fig.slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(fig.slices.windows(2).all(|w| w[0].count <= w[1].count));
        assert_eq!(fig.slices.last().unwrap().label, "Music");
    }

    #[test]
    fn pie_of_empty_year_is_empty_not_a_crash() {
        let records = vec![rec("Music", 2010, 1.0)];
        let fig = build_pie(&records, 2015);
        assert!(fig.slices.is_empty());
        assert!(Figure::Pie(fig).is_empty());
    }

    #[test]
    fn ranking_bars_are_reversed_for_display() {
        let mut records = Vec::new();
        for v in 1..=12 {
            let mut r = rec("Music", 2010, v as f64);
            r.name = format!("ch{v:02}");
            r.display_name = format!("ch{v:02}");
            records.push(r);
        }
        let fig = build_ranking(&records, "Music", RankMetric::Subscribers, 10);
        assert_eq!(fig.bars.len(), 10);
        // Ascending after the display reversal; the largest value is last.
        assert!(fig.bars.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(fig.bars.last().unwrap().1, 12.0);
        // Rows 1 and 2 fell outside the top 10.
        assert_eq!(fig.bars[0].1, 3.0);
    }

    #[test]
    fn scatter_carries_a_regression_line_within_bounds() {
        let records: Vec<_> = (1..=10).map(|v| rec("Music", 2010, v as f64)).collect();
        let fig = build_scatter(&records, Metric::Subscribers, Metric::VideoViews);
        assert_eq!(fig.points.len(), 10);
        let line = fig.regression.expect("collinear points fit a line");
        assert_eq!(line[0].0, fig.x_bounds[0]);
        assert_eq!(line[1].0, fig.x_bounds[1]);
        assert_eq!(fig.x_bounds[0], 0.0);
    }

    #[test]
    fn trend_overview_drops_the_earliest_years() {
        let records: Vec<_> = (2005..2015).map(|y| rec("Music", y, 1.0)).collect();
        let full = build_trend(&records, 0);
        assert_eq!(full.rows.len(), 10);

        let overview = build_trend(&records, 6);
        assert_eq!(overview.rows.len(), 4);
        assert_eq!(overview.rows[0].year, 2011);
    }

    #[test]
    fn earnings_figure_groups_by_category() {
        let mut records = Vec::new();
        for v in [10.0, 12.0, 14.0, 16.0, 18.0] {
            records.push(rec("Music", 2010, v));
            records.push(rec("Gaming", 2010, v * 2.0));
        }
        let fig = build_earnings(&records);
        assert_eq!(fig.boxes.boxes.len(), 2);
        assert_eq!(fig.boxes.boxes[0].0, "Gaming");
        assert_eq!(fig.boxes.boxes[1].0, "Music");
        assert_eq!(fig.histogram.counts.iter().sum::<usize>(), 10);
    }
}
