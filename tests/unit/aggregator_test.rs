//! Unit tests for the metrics aggregator.

use runsuite::metrics::aggregator::{aggregate, DEFAULT_TOTAL_TIME_SECS};
use runsuite::performance::parser::parse_performance_data;
use runsuite::performance::types::{RangeLabel, RangeSet, Sample, SampleSeries};

fn series(points: &[(f64, f64)]) -> SampleSeries {
    points.iter().map(|&(t, v)| Sample::new(t, v)).collect()
}

#[test]
fn test_first_range_scenario() {
    let set = RangeSet::new().with(
        RangeLabel::Meters0To25,
        series(&[(0.0, 7.0), (1.0, 7.2), (2.0, 7.4)]),
    );
    let summary = aggregate(&set, DEFAULT_TOTAL_TIME_SECS);

    let range = summary.range(RangeLabel::Meters0To25).unwrap();
    assert_eq!(range.max_speed, 7.4);
    assert!((range.avg_speed - 7.2).abs() < 1e-9);
    assert_eq!(range.duration, 2.0);
}

#[test]
fn test_max_not_below_mean() {
    let inputs = [
        vec![(0.0, 1.0)],
        vec![(0.0, 9.1), (1.0, 3.3), (2.0, 5.5)],
        vec![(0.0, -2.0), (1.0, -1.0)],
    ];
    for points in inputs {
        let s = series(&points);
        assert!(s.max_speed().unwrap() >= s.mean_speed().unwrap());
    }
}

#[test]
fn test_pooled_max_is_max_of_maxima() {
    let a = series(&[(0.0, 7.1), (1.0, 7.9)]);
    let b = series(&[(3.0, 8.6), (4.0, 8.2)]);
    let set = RangeSet::new()
        .with(RangeLabel::Meters0To25, a.clone())
        .with(RangeLabel::Meters25To50, b.clone());

    let summary = aggregate(&set, DEFAULT_TOTAL_TIME_SECS);
    let expected = a.max_speed().unwrap().max(b.max_speed().unwrap());
    assert_eq!(summary.max_speed, expected);
    assert_eq!(summary.sample_count, 4);
}

#[test]
fn test_missing_ranges_excluded_from_pool() {
    let set = RangeSet::new().with(RangeLabel::Meters50To75, series(&[(6.0, 8.0), (7.0, 9.0)]));
    let summary = aggregate(&set, DEFAULT_TOTAL_TIME_SECS);

    assert_eq!(summary.ranges.len(), 1);
    assert!(summary.range(RangeLabel::Meters0To25).is_none());
    assert!((summary.avg_speed - 8.5).abs() < 1e-9);
    assert_eq!(summary.total_time, 12.0);
}

#[test]
fn test_header_only_file_treated_as_absent() {
    let rows = parse_performance_data("time mass_A t x v");
    let set = RangeSet::new()
        .with(RangeLabel::Meters75To100, SampleSeries::from_rows(&rows))
        .with(RangeLabel::Meters0To25, series(&[(0.0, 7.0)]));

    let summary = aggregate(&set, DEFAULT_TOTAL_TIME_SECS);
    assert!(summary.range(RangeLabel::Meters75To100).is_none());
    assert_eq!(summary.max_speed, 7.0);
}

#[test]
fn test_empty_input_yields_zeroes() {
    let summary = aggregate(&RangeSet::new(), 11.0);
    assert!(summary.ranges.is_empty());
    assert_eq!(summary.max_speed, 0.0);
    assert_eq!(summary.avg_speed, 0.0);
    assert_eq!(summary.total_time, 11.0);
}
