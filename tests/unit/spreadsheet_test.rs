//! Unit tests for the Excel report, read back with calamine.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use runsuite::performance::types::{RangeLabel, RangeSet, Sample, SampleSeries};
use runsuite::report::spreadsheet::{generate_report, save_report, SHEET_NAME};
use runsuite::storage::config::ReportSettings;

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn ranges() -> RangeSet {
    let first: SampleSeries = [(0.1234, 6.987), (0.5678, 7.4049), (1.0, 7.1)]
        .iter()
        .map(|&(t, v)| Sample::new(t, v))
        .collect();
    let last: SampleSeries = [(9.0001, 8.114), (9.5, 8.006)]
        .iter()
        .map(|&(t, v)| Sample::new(t, v))
        .collect();
    RangeSet::new()
        .with(RangeLabel::Meters0To25, first)
        .with(RangeLabel::Meters75To100, last)
}

fn read_back(bytes: Vec<u8>) -> calamine::Range<Data> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    workbook.worksheet_range(SHEET_NAME).unwrap()
}

fn number(sheet: &calamine::Range<Data>, row: u32, col: u32) -> f64 {
    match sheet.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        other => panic!("expected number at ({}, {}), got {:?}", row, col, other),
    }
}

fn text(sheet: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match sheet.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected text at ({}, {}), got {:?}", row, col, other),
    }
}

#[test]
fn test_detail_values_are_rounded_inputs() {
    let bytes = generate_report("T01", at(), &ranges(), &ReportSettings::default()).unwrap();
    let sheet = read_back(bytes);

    // First block: A/B from row 17.
    assert_eq!(number(&sheet, 16, 0), 0.123);
    assert_eq!(number(&sheet, 16, 1), 6.99);
    assert_eq!(number(&sheet, 17, 0), 0.568);
    assert_eq!(number(&sheet, 17, 1), 7.4);

    // Second block starts at column D.
    assert_eq!(text(&sheet, 14, 3), "75-100");
    assert_eq!(number(&sheet, 16, 3), 9.0);
    assert_eq!(number(&sheet, 16, 4), 8.11);
    assert_eq!(number(&sheet, 17, 4), 8.01);
}

#[test]
fn test_summary_section() {
    let bytes = generate_report("T01", at(), &ranges(), &ReportSettings::default()).unwrap();
    let sheet = read_back(bytes);

    assert_eq!(text(&sheet, 0, 0), "Running Performance Report - T01");
    assert_eq!(text(&sheet, 1, 0), "Test Date: 2025-04-02 09:30");
    assert_eq!(text(&sheet, 5, 1), "Max Speed (m/s)");

    assert_eq!(text(&sheet, 6, 0), "0-25m");
    assert_eq!(number(&sheet, 6, 1), 7.4);
    assert_eq!(number(&sheet, 6, 3), 1.0);
    assert_eq!(text(&sheet, 9, 0), "75-100m");
    assert_eq!(number(&sheet, 9, 1), 8.11);
}

#[test]
fn test_custom_precision() {
    let settings = ReportSettings {
        speed_decimals: 1,
        time_decimals: 1,
        ..ReportSettings::default()
    };
    let bytes = generate_report("T01", at(), &ranges(), &settings).unwrap();
    let sheet = read_back(bytes);

    assert_eq!(number(&sheet, 16, 0), 0.1);
    assert_eq!(number(&sheet, 16, 1), 7.0);
}

#[test]
fn test_save_report_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    let bytes = generate_report("T01", at(), &ranges(), &ReportSettings::default()).unwrap();

    save_report(&path, &bytes).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_exact_ties_round_to_even() {
    // Times on a 1/16 s grid land exactly on rounding ties.
    let series: SampleSeries = [(0.0625, 7.125), (0.1875, 7.375)]
        .iter()
        .map(|&(t, v)| Sample::new(t, v))
        .collect();
    let set = RangeSet::new().with(RangeLabel::Meters0To25, series);
    let sheet = read_back(generate_report("T01", at(), &set, &ReportSettings::default()).unwrap());

    assert_eq!(number(&sheet, 16, 0), 0.062);
    assert_eq!(number(&sheet, 16, 1), 7.12);
    assert_eq!(number(&sheet, 17, 0), 0.188);
    assert_eq!(number(&sheet, 17, 1), 7.38);

    // Summary max is 7.375 and the mean is an exact 7.25.
    assert_eq!(number(&sheet, 6, 1), 7.38);
    assert_eq!(number(&sheet, 6, 2), 7.25);
}
