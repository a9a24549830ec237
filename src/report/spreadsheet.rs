//! Excel performance report.
//!
//! The report is built in two steps: [`build_report_layout`] places every
//! cell on a grid, then [`write_xlsx`] serializes that grid with
//! `rust_xlsxwriter`. Keeping the grid separate lets tests inspect cell
//! positions without opening a workbook.
//!
//! Sheet layout (1-based rows):
//!
//! ```text
//! 1      title, merged A1:F1
//! 2      Test Date: YYYY-MM-DD HH:MM
//! 4      Performance Summary
//! 6      Range | Max Speed (m/s) | Avg Speed (m/s) | Time (s)
//! 7-10   one row per range, in that range's own slot
//! 13     Detailed Performance Data
//! 15     range name        (one 3-column block per present range)
//! 16     Time | Speed
//! 17..   samples
//! ```

use std::path::Path;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use thiserror::Error;

use crate::metrics::aggregator::aggregate;
use crate::performance::types::{RangeLabel, RangeSet};
use crate::storage::config::ReportSettings;

/// Worksheet name.
pub const SHEET_NAME: &str = "Performance Report";

const TITLE_ROW: u32 = 0;
const DATE_ROW: u32 = 1;
const SUMMARY_TITLE_ROW: u32 = 3;
const SUMMARY_HEADER_ROW: u32 = 5;
const SUMMARY_FIRST_ROW: u32 = 6;
const DETAIL_TITLE_ROW: u32 = 12;
const DETAIL_NAME_ROW: u32 = 14;
const DETAIL_HEADER_ROW: u32 = 15;
const DETAIL_FIRST_ROW: u32 = 16;

/// Last column of the merged title (F).
const TITLE_LAST_COL: u16 = 5;
/// Columns per detail block: time, speed, spacer.
const DETAIL_BLOCK_WIDTH: u16 = 3;

const SUMMARY_HEADERS: [&str; 4] = ["Range", "Max Speed (m/s)", "Avg Speed (m/s)", "Time (s)"];

/// Errors producing or saving a report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<XlsxError> for ExportError {
    fn from(e: XlsxError) -> Self {
        ExportError::Workbook(e.to_string())
    }
}

/// A cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Text length used for column sizing.
    fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{:.1}", n).len(),
            CellValue::Number(n) => n.to_string().len(),
        }
    }
}

/// Visual role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    /// Merged title bar
    Title,
    /// Section heading
    Section,
    /// Summary table header
    Header,
    /// Bold detail block label
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCell {
    /// 0-based row
    pub row: u32,
    /// 0-based column
    pub col: u16,
    pub value: CellValue,
    pub style: CellStyle,
}

/// Every cell of the report plus column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub cells: Vec<ReportCell>,
    /// Width per column, index = column
    pub column_widths: Vec<f64>,
}

impl ReportLayout {
    /// Cell at a 0-based position.
    pub fn cell(&self, row: u32, col: u16) -> Option<&ReportCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(usize::from(col)).copied()
    }

    fn push(&mut self, row: u32, col: u16, value: CellValue, style: CellStyle) {
        self.cells.push(ReportCell {
            row,
            col,
            value,
            style,
        });
    }

    fn text(&mut self, row: u32, col: u16, text: impl Into<String>, style: CellStyle) {
        self.push(row, col, CellValue::Text(text.into()), style);
    }

    fn number(&mut self, row: u32, col: u16, value: f64) {
        self.push(row, col, CellValue::Number(value), CellStyle::Plain);
    }
}

/// Round to `decimals` places, sending exact ties to the even digit.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Lay out the report for the present ranges.
///
/// Absent ranges leave their summary row empty and get no detail block.
pub fn build_report_layout(
    runner_name: &str,
    generated_at: NaiveDateTime,
    ranges: &RangeSet,
    settings: &ReportSettings,
) -> ReportLayout {
    let mut layout = ReportLayout {
        cells: Vec::new(),
        column_widths: Vec::new(),
    };

    layout.text(
        TITLE_ROW,
        0,
        format!("Running Performance Report - {}", runner_name),
        CellStyle::Title,
    );
    layout.text(
        DATE_ROW,
        0,
        format!("Test Date: {}", generated_at.format("%Y-%m-%d %H:%M")),
        CellStyle::Plain,
    );

    layout.text(SUMMARY_TITLE_ROW, 0, "Performance Summary", CellStyle::Section);
    for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
        layout.text(SUMMARY_HEADER_ROW, col as u16, *header, CellStyle::Header);
    }

    // Summary values share the speed precision, time included.
    let summary_decimals = settings.speed_decimals;
    let summary = aggregate(ranges, 0.0);
    for range in &summary.ranges {
        let row = summary_row(range.label);
        layout.text(row, 0, range.label.display_name(), CellStyle::Plain);
        layout.number(row, 1, round_to(range.max_speed, summary_decimals));
        layout.number(row, 2, round_to(range.avg_speed, summary_decimals));
        layout.number(row, 3, round_to(range.duration, summary_decimals));
    }

    layout.text(DETAIL_TITLE_ROW, 0, "Detailed Performance Data", CellStyle::Section);
    let mut col = 0u16;
    for (range, series) in ranges.present() {
        layout.text(DETAIL_NAME_ROW, col, range.key(), CellStyle::Label);
        layout.text(DETAIL_HEADER_ROW, col, "Time", CellStyle::Label);
        layout.text(DETAIL_HEADER_ROW, col + 1, "Speed", CellStyle::Label);

        for (i, sample) in series.samples().iter().enumerate() {
            let row = DETAIL_FIRST_ROW + i as u32;
            layout.number(row, col, round_to(sample.time, settings.time_decimals));
            layout.number(row, col + 1, round_to(sample.speed, settings.speed_decimals));
        }

        col += DETAIL_BLOCK_WIDTH;
    }

    layout.column_widths = column_widths(&layout.cells, settings.column_width_cap);
    layout
}

/// Longest cell text per column plus padding, capped.
fn column_widths(cells: &[ReportCell], cap: f64) -> Vec<f64> {
    let columns = cells.iter().map(|c| usize::from(c.col) + 1).max().unwrap_or(0);
    let mut longest = vec![0usize; columns];
    for cell in cells {
        let slot = &mut longest[usize::from(cell.col)];
        *slot = (*slot).max(cell.value.display_len());
    }
    longest
        .into_iter()
        .map(|len| (len as f64 + 2.0).min(cap))
        .collect()
}

/// Serialize a layout to `.xlsx` bytes.
pub fn write_xlsx(layout: &ReportLayout, settings: &ReportSettings) -> Result<Vec<u8>, ExportError> {
    let font = settings.font_name.as_str();
    let plain = Format::new();
    let title = Format::new()
        .set_font_name(font)
        .set_font_size(16.0)
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(settings.title_fill.to_u32()))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let section = Format::new().set_font_name(font).set_font_size(14.0).set_bold();
    let header = Format::new()
        .set_font_name(font)
        .set_bold()
        .set_background_color(Color::RGB(settings.header_fill.to_u32()));
    let label = Format::new().set_font_name(font).set_bold();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for cell in &layout.cells {
        let format = match cell.style {
            CellStyle::Plain => &plain,
            CellStyle::Title => &title,
            CellStyle::Section => &section,
            CellStyle::Header => &header,
            CellStyle::Label => &label,
        };

        match (&cell.value, cell.style) {
            (CellValue::Text(text), CellStyle::Title) => {
                worksheet.merge_range(cell.row, cell.col, cell.row, TITLE_LAST_COL, text, format)?;
            }
            (CellValue::Text(text), _) => {
                worksheet.write_string_with_format(cell.row, cell.col, text, format)?;
            }
            (CellValue::Number(n), _) => {
                worksheet.write_number_with_format(cell.row, cell.col, *n, format)?;
            }
        }
    }

    for (col, width) in layout.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Build and serialize the report in one call.
pub fn generate_report(
    runner_name: &str,
    generated_at: NaiveDateTime,
    ranges: &RangeSet,
    settings: &ReportSettings,
) -> Result<Vec<u8>, ExportError> {
    let layout = build_report_layout(runner_name, generated_at, ranges, settings);
    let bytes = write_xlsx(&layout, settings)?;
    tracing::debug!(
        "Generated report for '{}' ({} cells, {} bytes)",
        runner_name,
        layout.cells.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Default download name, `performance_report_<runner>_<YYYYmmdd_HHMMSS>.xlsx`.
pub fn generate_report_filename(runner_name: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "performance_report_{}_{}.xlsx",
        runner_name,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Write report bytes to disk.
pub fn save_report(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|e| ExportError::Io(e.to_string()))?;
    tracing::info!("Exported report to {}", path.display());
    Ok(())
}

/// Summary row (0-based) that holds a range.
fn summary_row(range: RangeLabel) -> u32 {
    SUMMARY_FIRST_ROW + range.index() as u32
}
