//! Chart models and the Excel performance report.

pub mod chart;
pub mod spreadsheet;

pub use chart::{ChartSeries, ProgressionChart, SpeedChart};
pub use spreadsheet::{
    build_report_layout, generate_report, generate_report_filename, save_report, write_xlsx,
    ExportError, ReportLayout,
};
