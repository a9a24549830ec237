//! Speed chart widgets using egui_plot.
//!
//! The legend is drawn as a horizontal row above the plot rather than
//! inside it, so it never covers the finish-range samples.

use chrono::DateTime;
use egui::{Response, RichText, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::report::chart::{ChartSeries, ProgressionChart, SpeedChart};
use crate::ui::theme::color32;

const LINE_WIDTH: f32 = 3.0;
const MARKER_RADIUS: f32 = 4.0;

/// Per-test speed chart.
pub struct SpeedChartView<'a> {
    chart: &'a SpeedChart,
    height: f32,
}

impl<'a> SpeedChartView<'a> {
    pub fn new(chart: &'a SpeedChart) -> Self {
        Self {
            chart,
            height: 400.0,
        }
    }

    /// Show the chart in the UI.
    pub fn show(self, ui: &mut Ui) -> Response {
        if self.chart.is_empty() {
            return ui.label("No speed data to plot.");
        }

        ui.label(RichText::new(&self.chart.title).size(18.0).strong());
        legend_row(ui, self.chart.series.iter().map(|(_, s)| s));

        Plot::new("speed_chart")
            .height(self.height)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(self.chart.x_label.as_str())
            .y_axis_label(self.chart.y_label.as_str())
            .label_formatter(|name, value| {
                format!("{}\n{:.2} s, {:.2} m/s", name, value.x, value.y)
            })
            .show(ui, |plot_ui| {
                for (_, series) in &self.chart.series {
                    plot_ui.line(series_line(series));
                    plot_ui.points(series_points(series));
                }
            })
            .response
    }
}

/// Speed progression over test dates.
pub struct ProgressionChartView<'a> {
    chart: &'a ProgressionChart,
    height: f32,
}

impl<'a> ProgressionChartView<'a> {
    pub fn new(chart: &'a ProgressionChart) -> Self {
        Self {
            chart,
            height: 300.0,
        }
    }

    /// Show the chart in the UI.
    pub fn show(self, ui: &mut Ui) -> Response {
        ui.label(RichText::new(&self.chart.title).size(16.0).strong());
        legend_row(ui, [&self.chart.max_speed, &self.chart.avg_speed]);

        Plot::new("progression_chart")
            .height(self.height)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Speed (m/s)")
            .x_axis_formatter(|mark, _range| format_date_axis(mark.value))
            .label_formatter(|name, value| {
                format!("{}\n{}: {:.2} m/s", name, format_date_axis(value.x), value.y)
            })
            .show(ui, |plot_ui| {
                for series in [&self.chart.max_speed, &self.chart.avg_speed] {
                    plot_ui.line(series_line(series));
                    plot_ui.points(series_points(series));
                }
            })
            .response
    }
}

fn legend_row<'s>(ui: &mut Ui, series: impl IntoIterator<Item = &'s ChartSeries>) {
    ui.horizontal(|ui| {
        for s in series {
            ui.label(RichText::new("■").color(color32(s.color)));
            ui.label(s.name.as_str());
            ui.add_space(12.0);
        }
    });
}

fn series_line(series: &ChartSeries) -> Line<'static> {
    Line::new(series.name.clone(), PlotPoints::new(series.points.clone()))
        .color(color32(series.color))
        .width(LINE_WIDTH)
}

fn series_points(series: &ChartSeries) -> Points<'static> {
    Points::new(series.name.clone(), PlotPoints::new(series.points.clone()))
        .color(color32(series.color))
        .radius(MARKER_RADIUS)
}

/// Format a Unix-seconds axis value as a date.
fn format_date_axis(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
