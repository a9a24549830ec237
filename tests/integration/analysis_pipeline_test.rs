//! Integration tests for a full analysis run.
//!
//! Covers file upload through persistence and report export.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runsuite::auth::{AccessController, Role, Session};
use runsuite::performance::parser::read_performance_file;
use runsuite::performance::pipeline::{run_analysis, RangeSource, RangeUploads};
use runsuite::performance::types::RangeLabel;
use runsuite::report::spreadsheet::{generate_report, generate_report_filename, SHEET_NAME};
use runsuite::storage::config::{load_config_from, save_config_to, AppConfig};
use runsuite::storage::Database;

const FIRST_RANGE: &str = "time mass_A t x v
0.0 70.0 0.01 0.0 0.0
0.5 70.0 0.01 2.5 6.2
1.0 70.0 0.01 6.0 7.0
1.5 70.0 0.01 9.8 7.6
2.0 70.0 0.01 13.7 7.8
";

#[test]
fn test_upload_analyze_persist_export() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("0-25.txt");
    std::fs::write(&file, FIRST_RANGE).unwrap();

    let db = Database::open(&dir.path().join("running_analysis.db")).unwrap();
    let access = AccessController::new(&db);
    access.bootstrap_admin("admin", "admin123").unwrap();
    let coach = access.register("coach1", "pw", Role::Coach).unwrap();

    let admin = Session::login(access.authenticate("admin", "admin123").unwrap());
    let runner = access.create_runner(&admin, "T01", Some(coach.id)).unwrap();

    let uploads =
        RangeUploads::new().with(RangeLabel::Meters0To25, read_performance_file(&file).unwrap());
    let config = AppConfig::default();
    let outcome = run_analysis(
        &db,
        runner.id,
        uploads,
        &config.analysis,
        &config.report,
        &mut StdRng::seed_from_u64(2024),
    )
    .unwrap();

    assert_eq!(outcome.source(RangeLabel::Meters0To25), RangeSource::Uploaded);
    assert_eq!(outcome.source(RangeLabel::Meters25To50), RangeSource::Placeholder);
    assert_eq!(outcome.summary.ranges.len(), 4);
    assert_eq!(outcome.summary.range(RangeLabel::Meters0To25).unwrap().max_speed, 7.8);
    assert!(outcome.summary.max_speed >= outcome.summary.avg_speed);

    // The coach sees the stored record.
    let coach_session = Session::login(access.authenticate("coach1", "pw").unwrap());
    let records = access.visible_records(&coach_session).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record, outcome.record);
    assert_eq!(records[0].record.total_time, 12.0);

    // Export and read back.
    let now = Local::now().naive_local();
    let bytes = generate_report("T01", now, &outcome.ranges, &config.report).unwrap();
    let report_path = dir.path().join(generate_report_filename("T01", now));
    std::fs::write(&report_path, &bytes).unwrap();

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let sheet = workbook.worksheet_range(SHEET_NAME).unwrap();
    assert_eq!(
        sheet.get_value((16, 1)),
        Some(&Data::Float(0.0)),
        "first uploaded speed"
    );
    assert_eq!(sheet.get_value((20, 1)), Some(&Data::Float(7.8)));
    // All four ranges are present, so the last block starts at column J.
    assert_eq!(
        sheet.get_value((14, 9)),
        Some(&Data::String("75-100".to_string()))
    );
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("running_analysis.db");

    let runner_id = {
        let db = Database::open(&path).unwrap();
        let access = AccessController::new(&db);
        access.bootstrap_admin("admin", "admin123").unwrap();
        let admin = Session::login(access.authenticate("admin", "admin123").unwrap());
        let runner = access.create_runner(&admin, "T01", None).unwrap();

        let config = AppConfig::default();
        run_analysis(
            &db,
            runner.id,
            RangeUploads::new(),
            &config.analysis,
            &config.report,
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();
        runner.id
    };

    let db = Database::open(&path).unwrap();
    let access = AccessController::new(&db);
    assert!(!access.bootstrap_admin("admin", "admin123").unwrap());
    assert_eq!(db.count_users().unwrap(), 1);

    let admin = Session::login(access.authenticate("admin", "admin123").unwrap());
    let records = access.visible_records(&admin).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record.runner_id, runner_id);
    assert!(RangeLabel::ALL
        .iter()
        .all(|r| records[0].record.payload(*r).is_none()));
}

#[test]
fn test_configured_total_time_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.analysis.total_time_secs = 11.2;
    config.analysis.placeholder_samples = 10;
    save_config_to(&config, &config_path).unwrap();
    let config = load_config_from(&config_path).unwrap();

    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);
    access.bootstrap_admin("admin", "admin123").unwrap();
    let admin = Session::login(access.authenticate("admin", "admin123").unwrap());
    let runner = access.create_runner(&admin, "T01", None).unwrap();

    let outcome = run_analysis(
        &db,
        runner.id,
        RangeUploads::new(),
        &config.analysis,
        &config.report,
        &mut StdRng::seed_from_u64(9),
    )
    .unwrap();

    assert_eq!(outcome.record.total_time, 11.2);
    assert_eq!(outcome.summary.sample_count, 40);
}
