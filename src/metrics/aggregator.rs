//! Per-range and pooled speed statistics for one analysis run.

use serde::{Deserialize, Serialize};

use crate::performance::types::{RangeLabel, RangeSet};

/// Nominal 100 m duration stored as a run's total time.
///
/// The total time is not derived from the series; it is a fixed nominal
/// value that downstream reports expect as-is.
pub const DEFAULT_TOTAL_TIME_SECS: f64 = 12.0;

/// Statistics for a single range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub label: RangeLabel,
    /// Highest speed in m/s
    pub max_speed: f64,
    /// Arithmetic mean speed in m/s
    pub avg_speed: f64,
    /// Largest timestamp in the series, in seconds
    pub duration: f64,
}

/// Statistics for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// One entry per present range, in canonical order
    pub ranges: Vec<RangeSummary>,
    /// Highest speed over all pooled samples
    pub max_speed: f64,
    /// Mean over all pooled samples (unweighted)
    pub avg_speed: f64,
    /// Nominal total time in seconds
    pub total_time: f64,
    /// Number of pooled samples
    pub sample_count: usize,
}

impl PerformanceSummary {
    /// Summary for a given range, if it was present.
    pub fn range(&self, label: RangeLabel) -> Option<&RangeSummary> {
        self.ranges.iter().find(|r| r.label == label)
    }
}

/// Aggregate all present ranges.
///
/// Absent or empty ranges are excluded from both the per-range output and the
/// pooled statistics. With nothing present the pooled values are zero.
pub fn aggregate(ranges: &RangeSet, total_time: f64) -> PerformanceSummary {
    let mut summaries = Vec::new();
    let mut pooled_max: Option<f64> = None;
    let mut pooled_sum = 0.0;
    let mut pooled_count = 0usize;

    for (label, series) in ranges.present() {
        let (Some(max_speed), Some(avg_speed), Some(duration)) =
            (series.max_speed(), series.mean_speed(), series.max_time())
        else {
            continue;
        };

        summaries.push(RangeSummary {
            label,
            max_speed,
            avg_speed,
            duration,
        });

        pooled_max = Some(pooled_max.map_or(max_speed, |m| m.max(max_speed)));
        pooled_sum += series.speeds().sum::<f64>();
        pooled_count += series.len();
    }

    let avg_speed = if pooled_count > 0 {
        pooled_sum / pooled_count as f64
    } else {
        0.0
    };

    PerformanceSummary {
        ranges: summaries,
        max_speed: pooled_max.unwrap_or(0.0),
        avg_speed,
        total_time,
        sample_count: pooled_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::types::{Sample, SampleSeries};

    fn series(points: &[(f64, f64)]) -> SampleSeries {
        points.iter().map(|&(t, v)| Sample::new(t, v)).collect()
    }

    #[test]
    fn test_single_range() {
        let set = RangeSet::new().with(
            RangeLabel::Meters0To25,
            series(&[(0.0, 7.0), (1.0, 7.2), (2.0, 7.4)]),
        );
        let summary = aggregate(&set, DEFAULT_TOTAL_TIME_SECS);

        let range = summary.range(RangeLabel::Meters0To25).unwrap();
        assert_eq!(range.max_speed, 7.4);
        assert!((range.avg_speed - 7.2).abs() < 1e-9);
        assert_eq!(range.duration, 2.0);
        assert_eq!(summary.total_time, 12.0);
    }

    #[test]
    fn test_pooled_mean_is_unweighted() {
        let set = RangeSet::new()
            .with(RangeLabel::Meters0To25, series(&[(0.0, 6.0)]))
            .with(
                RangeLabel::Meters25To50,
                series(&[(3.0, 9.0), (4.0, 9.0), (5.0, 9.0)]),
            );
        let summary = aggregate(&set, 12.0);

        assert_eq!(summary.sample_count, 4);
        assert!((summary.avg_speed - 8.25).abs() < 1e-9);
        assert_eq!(summary.max_speed, 9.0);
    }

    #[test]
    fn test_nothing_present_defaults_to_zero() {
        let set = RangeSet::new().with(RangeLabel::Meters50To75, SampleSeries::default());
        let summary = aggregate(&set, 12.0);

        assert!(summary.ranges.is_empty());
        assert_eq!(summary.max_speed, 0.0);
        assert_eq!(summary.avg_speed, 0.0);
        assert_eq!(summary.sample_count, 0);
    }

    #[test]
    fn test_total_time_is_not_derived() {
        let set = RangeSet::new().with(RangeLabel::Meters75To100, series(&[(9.0, 8.0), (11.5, 8.2)]));
        assert_eq!(aggregate(&set, 10.5).total_time, 10.5);
    }
}
