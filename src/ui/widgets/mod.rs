//! UI widgets for reusable components.

pub mod metric_display;
pub mod speed_chart;

pub use metric_display::{MetricDisplay, MetricSize};
pub use speed_chart::{ProgressionChartView, SpeedChartView};
