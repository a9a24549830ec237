//! Integration tests for the reports view data flow.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use runsuite::auth::{AccessController, Role, Session};
use runsuite::metrics::reports::{progression, summarize_records};
use runsuite::report::chart::ProgressionChart;
use runsuite::storage::models::{PerformanceRecord, RecordFilter, RecordListing};
use runsuite::storage::{Database, RecordStore};

fn seed(db: &Database) -> Session {
    let access = AccessController::new(db);
    access.register("admin", "pw", Role::Admin).unwrap();
    let admin = Session::login(access.authenticate("admin", "pw").unwrap());

    let t01 = access.create_runner(&admin, "T01", None).unwrap();
    let t02 = access.create_runner(&admin, "T02", None).unwrap();

    let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let tests = [
        (t01.id, 0, 9.0, 8.0),
        (t01.id, 7, 9.4, 8.3),
        (t01.id, 14, 9.8, 8.6),
        (t02.id, 3, 8.5, 7.9),
    ];
    for (runner_id, day, max, avg) in tests {
        let mut record = PerformanceRecord::new(runner_id, max, avg, 12.0);
        record.test_date = base + Duration::days(day);
        db.insert_performance_record(&record).unwrap();
    }

    admin
}

#[test]
fn test_summary_for_filtered_runner() {
    let db = Database::open_in_memory().unwrap();
    let admin = seed(&db);
    let records = AccessController::new(&db).visible_records(&admin).unwrap();
    assert_eq!(records.len(), 4);
    // Newest first.
    assert!(records[0].record.test_date > records[3].record.test_date);

    let filter = RecordFilter {
        runner_name: Some("T01".to_string()),
        ..RecordFilter::default()
    };
    let filtered: Vec<&RecordListing> = records.iter().filter(|l| filter.matches(l)).collect();
    let stats = summarize_records(&filtered);

    assert_eq!(stats.total_tests, 3);
    assert_eq!(stats.best_speed, 9.8);
    assert!((stats.avg_max_speed - 9.4).abs() < 1e-9);
    assert_eq!(stats.avg_total_time, 12.0);
}

#[test]
fn test_date_bounds_are_inclusive() {
    let db = Database::open_in_memory().unwrap();
    let admin = seed(&db);
    let records = AccessController::new(&db).visible_records(&admin).unwrap();

    let filter = RecordFilter {
        runner_name: None,
        from: NaiveDate::from_ymd_opt(2025, 3, 4),
        to: NaiveDate::from_ymd_opt(2025, 3, 8),
    };
    let names: Vec<&str> = records
        .iter()
        .filter(|l| filter.matches(l))
        .map(|l| l.runner_name.as_str())
        .collect();
    assert_eq!(names, vec!["T01", "T02"]);
}

#[test]
fn test_progression_chart_for_runner() {
    let db = Database::open_in_memory().unwrap();
    let admin = seed(&db);
    let records = AccessController::new(&db).visible_records(&admin).unwrap();

    let t01: Vec<&RecordListing> = records.iter().filter(|l| l.runner_name == "T01").collect();
    let points = progression(&t01);
    assert_eq!(points.len(), 3);
    assert!(points.windows(2).all(|w| w[0].test_date < w[1].test_date));

    let chart = ProgressionChart::build("T01", &points).unwrap();
    assert_eq!(chart.max_speed.points.last().unwrap()[1], 9.8);

    let t02: Vec<&RecordListing> = records.iter().filter(|l| l.runner_name == "T02").collect();
    assert!(ProgressionChart::build("T02", &progression(&t02)).is_none());
}
