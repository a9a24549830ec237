//! Chart models for the speed test and the progression view.
//!
//! These are plain data; `ui::widgets::speed_chart` draws them with egui_plot.

use chrono::{DateTime, Utc};

use crate::metrics::reports::ProgressionPoint;
use crate::performance::types::{RangeLabel, RangeSet};
use crate::storage::config::{HexColor, RangePalette};

/// Title of the per-test speed chart.
pub const SPEED_CHART_TITLE: &str = "100-Meter Speed Test";
/// Time axis label.
pub const TIME_AXIS_LABEL: &str = "Time (s)";
/// Speed axis label.
pub const SPEED_AXIS_LABEL: &str = "Speed (m/s)";

/// Progression line colours (max, avg).
const PROGRESSION_MAX_COLOR: HexColor = HexColor::rgb(137, 138, 196);
const PROGRESSION_AVG_COLOR: HexColor = HexColor::rgb(192, 201, 238);

/// One line-plus-markers trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend entry
    pub name: String,
    pub color: HexColor,
    /// `[x, y]` points in drawing order
    pub points: Vec<[f64; 2]>,
}

/// Speed over time, one series per present range.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Present ranges with their series
    pub series: Vec<(RangeLabel, ChartSeries)>,
}

impl SpeedChart {
    /// Build a chart from the present ranges.
    ///
    /// A range keeps its own label and colour regardless of which other
    /// ranges are missing.
    pub fn from_ranges(ranges: &RangeSet, palette: &RangePalette) -> Self {
        let series = ranges
            .present()
            .map(|(range, samples)| {
                (
                    range,
                    ChartSeries {
                        name: range.display_name().to_string(),
                        color: palette.color(range),
                        points: samples.samples().iter().map(|s| [s.time, s.speed]).collect(),
                    },
                )
            })
            .collect();

        Self {
            title: SPEED_CHART_TITLE.to_string(),
            x_label: TIME_AXIS_LABEL.to_string(),
            y_label: SPEED_AXIS_LABEL.to_string(),
            series,
        }
    }

    pub fn series_for(&self, range: RangeLabel) -> Option<&ChartSeries> {
        self.series.iter().find(|(r, _)| *r == range).map(|(_, s)| s)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Max and average speed over test dates for one runner.
///
/// X values are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionChart {
    pub title: String,
    pub max_speed: ChartSeries,
    pub avg_speed: ChartSeries,
    /// Earliest and latest test dates
    pub span: (DateTime<Utc>, DateTime<Utc>),
}

impl ProgressionChart {
    /// Build the chart, or `None` with fewer than two points.
    pub fn build(runner_name: &str, points: &[ProgressionPoint]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let first = points.iter().map(|p| p.test_date).min()?;
        let last = points.iter().map(|p| p.test_date).max()?;
        let x = |p: &ProgressionPoint| p.test_date.timestamp() as f64;

        Some(Self {
            title: format!("Speed Progression - {}", runner_name),
            max_speed: ChartSeries {
                name: "Max Speed".to_string(),
                color: PROGRESSION_MAX_COLOR,
                points: points.iter().map(|p| [x(p), p.max_speed]).collect(),
            },
            avg_speed: ChartSeries {
                name: "Avg Speed".to_string(),
                color: PROGRESSION_AVG_COLOR,
                points: points.iter().map(|p| [x(p), p.avg_speed]).collect(),
            },
            span: (first, last),
        })
    }
}
