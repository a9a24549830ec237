//! Statistics over stored performance records for the reports view.

use chrono::{DateTime, Utc};

use crate::storage::models::RecordListing;

/// Headline numbers for a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportStatistics {
    pub total_tests: usize,
    /// Mean of the records' max speeds
    pub avg_max_speed: f64,
    /// Best max speed
    pub best_speed: f64,
    /// Mean of the records' total times
    pub avg_total_time: f64,
}

/// Summarize records. All values are zero for an empty slice.
pub fn summarize_records(records: &[&RecordListing]) -> ReportStatistics {
    if records.is_empty() {
        return ReportStatistics::default();
    }

    let count = records.len() as f64;
    let max_speeds = records.iter().map(|l| l.record.max_speed);

    ReportStatistics {
        total_tests: records.len(),
        avg_max_speed: max_speeds.clone().sum::<f64>() / count,
        best_speed: max_speeds.fold(0.0, f64::max),
        avg_total_time: records.iter().map(|l| l.record.total_time).sum::<f64>() / count,
    }
}

/// One point of a runner's speed progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionPoint {
    pub test_date: DateTime<Utc>,
    pub max_speed: f64,
    pub avg_speed: f64,
}

/// Records as progression points, oldest first.
pub fn progression(records: &[&RecordListing]) -> Vec<ProgressionPoint> {
    let mut points: Vec<_> = records
        .iter()
        .map(|l| ProgressionPoint {
            test_date: l.record.test_date,
            max_speed: l.record.max_speed,
            avg_speed: l.record.avg_speed,
        })
        .collect();
    points.sort_by_key(|p| p.test_date);
    points
}
