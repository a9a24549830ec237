//! Unit tests for the performance file parser.

use runsuite::performance::parser::{parse_line, parse_performance_data, parse_performance_lines};
use runsuite::performance::types::{RowOutcome, SampleSeries, SkipReason};

const SAMPLE: &str = "\
time\tmass_A\tt\tx\tv
0.00\t71.2\t0.01\t0.00\t0.00
0.50\t71.2\t0.01\t2.10\t6.85
bad line here
1.00\t71.2\t0.01\t5.60\t7.40
1.50 71.2 0.01
2.00\t71.2\t0.01\t9.30
";

#[test]
fn test_valid_rows_reproduce_exact_values() {
    let rows = parse_performance_data(SAMPLE);
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[1].time, 0.50);
    assert_eq!(rows[1].mass_a, 71.2);
    assert_eq!(rows[1].x, 2.10);
    assert_eq!(rows[1].v, 6.85);
}

#[test]
fn test_bad_rows_do_not_disturb_neighbours() {
    let rows = parse_performance_data(SAMPLE);
    let times: Vec<f64> = rows.iter().map(|r| r.time).collect();
    assert_eq!(times, vec![0.0, 0.5, 1.0, 2.0]);
    assert_eq!(rows[2].v, 7.40);
}

#[test]
fn test_missing_speed_defaults_to_zero() {
    let rows = parse_performance_data(SAMPLE);
    assert_eq!(rows[3].x, 9.30);
    assert_eq!(rows[3].v, 0.0);
}

#[test]
fn test_skip_reasons() {
    let outcomes = parse_performance_lines(SAMPLE);
    assert_eq!(outcomes.len(), 6);
    assert_eq!(
        outcomes[2],
        RowOutcome::Skipped(SkipReason::TooFewColumns { found: 3 })
    );
    assert_eq!(
        outcomes[4],
        RowOutcome::Skipped(SkipReason::TooFewColumns { found: 3 })
    );
    assert_eq!(
        parse_line("1.0 abc 0.1 2.0"),
        RowOutcome::Skipped(SkipReason::InvalidNumber { column: 2 })
    );
}

#[test]
fn test_parsing_is_idempotent() {
    assert_eq!(parse_performance_data(SAMPLE), parse_performance_data(SAMPLE));
}

#[test]
fn test_header_only_yields_empty_table() {
    assert!(parse_performance_data("time mass_A t x v\n").is_empty());
    assert!(parse_performance_data("").is_empty());
    assert!(parse_performance_data("   \n\n").is_empty());
}

#[test]
fn test_rows_project_to_time_and_speed() {
    let series = SampleSeries::from_rows(&parse_performance_data(SAMPLE));
    assert_eq!(series.len(), 4);
    assert_eq!(series.max_speed(), Some(7.40));
    assert_eq!(series.max_time(), Some(2.0));
}

#[test]
fn test_non_finite_values_are_skipped() {
    assert_eq!(
        parse_line("0.1 1 0 0 nan"),
        RowOutcome::Skipped(SkipReason::InvalidNumber { column: 5 })
    );
    assert_eq!(
        parse_line("inf 1 0 0 7.0"),
        RowOutcome::Skipped(SkipReason::InvalidNumber { column: 1 })
    );

    let rows = parse_performance_data("time mass_A t x v\n0.1 1 0 0 NaN\n0.2 1 0 1 7.5\n");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].v, 7.5);
}
