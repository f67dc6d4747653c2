//! Plotters-powered chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - one drawing vocabulary covers scatter, bars, boxes and pie sectors
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`. The widget is render-only: every series,
//! bound, and axis scale was computed by the chart builders, so `render()`
//! is layout code and nothing else.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{BarFigure, BoxPanel, Figure, HistogramFigure, PieFigure, ScatterFigure, TrendFigure};

pub struct FigureWidget<'a> {
    pub figure: &'a Figure,
}

impl<'a> Widget for FigureWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. Render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            hint(area, buf, "Chart area too small (resize terminal).");
            return;
        }

        if self.figure.is_empty() {
            hint(area, buf, "No data for the current selection.");
            return;
        }

        match self.figure {
            Figure::Scatter(f) => render_scatter(f, area, buf),
            Figure::Histogram(f) => render_histogram(f, area, buf),
            Figure::Bar(f) => render_bar(f, area, buf),
            Figure::Pie(f) => render_pie(f, area, buf),
            Figure::Trend(f) => render_trend(f, area, buf),
            Figure::Correlation(f) => {
                if area.width >= 60 {
                    for (i, panel) in f.panels.iter().enumerate() {
                        render_scatter(panel, column(area, i, 3), buf);
                    }
                } else if area.height >= 24 {
                    for (i, panel) in f.panels.iter().enumerate() {
                        render_scatter(panel, row(area, i, 3), buf);
                    }
                } else {
                    hint(area, buf, "Chart area too small for three panels.");
                }
            }
            Figure::Earnings(f) => {
                if area.width >= 70 {
                    let split = area.width * 3 / 5;
                    let left = Rect { width: split, ..area };
                    let right = Rect {
                        x: area.x + split,
                        width: area.width - split,
                        ..area
                    };
                    render_boxes(&f.boxes, left, buf);
                    render_histogram(&f.histogram, right, buf);
                } else {
                    render_boxes(&f.boxes, area, buf);
                }
            }
        }
    }
}

fn hint(area: Rect, buf: &mut Buffer, text: &str) {
    buf.set_string(area.x, area.y, text, Style::default().fg(Color::Yellow));
}

fn column(area: Rect, i: usize, of: usize) -> Rect {
    let w = area.width / of as u16;
    Rect {
        x: area.x + w * i as u16,
        width: if i + 1 == of { area.width - w * i as u16 } else { w },
        ..area
    }
}

fn row(area: Rect, i: usize, of: usize) -> Rect {
    let h = area.height / of as u16;
    Rect {
        y: area.y + h * i as u16,
        height: if i + 1 == of { area.height - h * i as u16 } else { h },
        ..area
    }
}

/// Sequential red palette, light to dark, mirroring the product's look.
fn reds(i: usize, n: usize) -> RGBColor {
    let t = if n <= 1 {
        1.0
    } else {
        i as f64 / (n - 1) as f64
    };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(lerp(252, 165), lerp(187, 15), lerp(161, 21))
}

fn render_scatter(f: &ScatterFigure, area: Rect, buf: &mut Buffer) {
    let [x0, x1] = f.x_bounds;
    let [y0, y1] = f.y_bounds;
    if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
        || x1 <= x0
        || y1 <= y0
    {
        return;
    }

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 8)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(f.x_label.as_str())
            .y_desc(f.y_label.as_str())
            .x_labels(5)
            .y_labels(5)
            .x_label_formatter(&|v| f.x_scale.format(*v))
            .y_label_formatter(&|v| f.y_scale.format(*v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        chart.draw_series(f.points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

        if let Some(line) = f.regression {
            chart.draw_series(LineSeries::new(
                line.iter().copied(),
                &RGBColor(255, 80, 80),
            ))?;
        }

        Ok(())
    });

    widget.render(area, buf);
}

fn render_histogram(f: &HistogramFigure, area: Rect, buf: &mut Buffer) {
    let k = f.counts.len();
    if k == 0 || !f.bin_start.is_finite() || f.bin_width <= 0.0 {
        return;
    }
    let x0 = f.bin_start;
    let x1 = f.bin_start + f.bin_width * k as f64;
    let y1 = (f.max_count as f64 * 1.1).max(1.0);

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 6)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(x0..x1, 0.0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(f.x_label.as_str())
            .y_desc("count")
            .x_labels(5)
            .y_labels(5)
            .x_label_formatter(&|v| f.x_scale.format(*v))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        chart.draw_series(f.counts.iter().enumerate().map(|(i, &c)| {
            let bx0 = x0 + i as f64 * f.bin_width;
            let bx1 = bx0 + f.bin_width;
            Rectangle::new([(bx0, 0.0), (bx1, c as f64)], RGBColor(222, 45, 38).filled())
        }))?;

        Ok(())
    });

    widget.render(area, buf);
}

fn render_bar(f: &BarFigure, area: Rect, buf: &mut Buffer) {
    let n = f.bars.len();
    if n == 0 || !f.max_value.is_finite() || f.max_value <= 0.0 {
        return;
    }
    let x1 = f.max_value * 1.08;
    let y0 = -0.6;
    let y1 = (n - 1) as f64 + 0.6;

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 14)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(0.0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(f.value_label.as_str())
            .x_labels(5)
            .y_labels(n)
            .x_label_formatter(&|v| f.scale.format(*v))
            .y_label_formatter(&|v| bar_tick_label(&f.bars, *v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        chart.draw_series(f.bars.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new(
                [(0.0, i as f64 - 0.35), (*value, i as f64 + 0.35)],
                reds(i, n).filled(),
            )
        }))?;

        Ok(())
    });

    widget.render(area, buf);
}

/// Map a y tick position back to the bar label at that row.
fn bar_tick_label(bars: &[(String, f64)], v: f64) -> String {
    let i = v.round();
    if i < 0.0 || (v - i).abs() > 0.3 {
        return String::new();
    }
    bars.get(i as usize)
        .map(|(label, _)| clip(label, 12))
        .unwrap_or_default()
}

fn render_pie(f: &PieFigure, area: Rect, buf: &mut Buffer) {
    let n = f.slices.len();
    if n == 0 {
        return;
    }

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .build_cartesian_2d(-1.7..1.7, -1.25..1.25)?;

        // Angles start at 12 o'clock and run clockwise.
        let mut start = -std::f64::consts::FRAC_PI_2;
        let centered = Pos::new(HPos::Center, VPos::Center);
        for (i, slice) in f.slices.iter().enumerate() {
            let sweep = slice.fraction * std::f64::consts::TAU;
            let steps = ((sweep / 0.05).ceil() as usize).max(2);
            let mut pts = Vec::with_capacity(steps + 2);
            pts.push((0.0, 0.0));
            for s in 0..=steps {
                let a = start + sweep * s as f64 / steps as f64;
                pts.push((a.cos(), -a.sin()));
            }
            chart.draw_series(std::iter::once(Polygon::new(pts, reds(i, n).filled())))?;

            let mid = start + sweep / 2.0;
            let label = format!("{} {:.1}%", clip(&slice.label, 14), slice.fraction * 100.0);
            chart.draw_series(std::iter::once(Text::new(
                label,
                (1.15 * mid.cos(), -1.1 * mid.sin()),
                ("sans-serif", 10).into_font().color(&WHITE).pos(centered),
            )))?;

            start += sweep;
        }

        Ok(())
    });

    widget.render(area, buf);
}

fn render_trend(f: &TrendFigure, area: Rect, buf: &mut Buffer) {
    let Some(first) = f.rows.first() else {
        return;
    };
    let Some(last) = f.rows.last() else {
        return;
    };
    let x0 = first.year as f64 - 1.0;
    let x1 = last.year as f64 + 1.0;
    let y1 = (f.max_created as f64 * 1.2).max(1.0);

    // One color per distinct category, in order of first appearance.
    let mut palette: Vec<&str> = Vec::new();
    for r in &f.rows {
        if !palette.contains(&r.category.as_str()) {
            palette.push(&r.category);
        }
    }

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 6)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(x0..x1, 0.0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("year")
            .y_desc("created")
            .x_labels(f.rows.len().min(10))
            .y_labels(5)
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        let centered = Pos::new(HPos::Center, VPos::Bottom);
        for r in &f.rows {
            let color_idx = palette
                .iter()
                .position(|&c| c == r.category.as_str())
                .unwrap_or(0);
            let x = r.year as f64;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.4, 0.0), (x + 0.4, r.created as f64)],
                reds(color_idx, palette.len()).filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                clip(&r.category, 8),
                (x, r.created as f64 + y1 * 0.02),
                ("sans-serif", 10).into_font().color(&WHITE).pos(centered),
            )))?;
        }

        Ok(())
    });

    widget.render(area, buf);
}

fn render_boxes(b: &BoxPanel, area: Rect, buf: &mut Buffer) {
    let n = b.boxes.len();
    if n == 0 || !b.max_value.is_finite() || b.max_value <= 0.0 {
        return;
    }
    let x1 = b.max_value * 1.05;
    let y0 = -0.6;
    let y1 = (n - 1) as f64 + 0.6;

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 14)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(0.0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(b.value_label.as_str())
            .x_labels(5)
            .y_labels(n)
            .x_label_formatter(&|v| b.scale.format(*v))
            .y_label_formatter(&|v| box_tick_label(&b.boxes, *v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        for (i, (_, fv)) in b.boxes.iter().enumerate() {
            let y = i as f64;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(fv.min, y), (fv.max, y)],
                WHITE,
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(fv.q1, y - 0.3), (fv.q3, y + 0.3)],
                RGBColor(222, 45, 38).filled(),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(fv.median, y - 0.3), (fv.median, y + 0.3)],
                WHITE,
            )))?;
        }

        Ok(())
    });

    widget.render(area, buf);
}

fn box_tick_label(boxes: &[(String, crate::domain::FiveNumber)], v: f64) -> String {
    let i = v.round();
    if i < 0.0 || (v - i).abs() > 0.3 {
        return String::new();
    }
    boxes
        .get(i as usize)
        .map(|(label, _)| clip(label, 12))
        .unwrap_or_default()
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
