//! Performance data types shared by the parser, aggregator, and renderers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One of the four 25-meter segments of a 100-meter sprint test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeLabel {
    /// 0-25 meters (acceleration)
    Meters0To25,
    /// 25-50 meters
    Meters25To50,
    /// 50-75 meters
    Meters50To75,
    /// 75-100 meters (finish)
    Meters75To100,
}

impl RangeLabel {
    /// All ranges in canonical order.
    pub const ALL: [RangeLabel; 4] = [
        RangeLabel::Meters0To25,
        RangeLabel::Meters25To50,
        RangeLabel::Meters50To75,
        RangeLabel::Meters75To100,
    ];

    /// Position of the range within the sprint (0-3).
    pub fn index(&self) -> usize {
        match self {
            RangeLabel::Meters0To25 => 0,
            RangeLabel::Meters25To50 => 1,
            RangeLabel::Meters50To75 => 2,
            RangeLabel::Meters75To100 => 3,
        }
    }

    /// Short key, e.g. `0-25`.
    pub fn key(&self) -> &'static str {
        match self {
            RangeLabel::Meters0To25 => "0-25",
            RangeLabel::Meters25To50 => "25-50",
            RangeLabel::Meters50To75 => "50-75",
            RangeLabel::Meters75To100 => "75-100",
        }
    }

    /// Display label with units, e.g. `0-25m`.
    pub fn display_name(&self) -> &'static str {
        match self {
            RangeLabel::Meters0To25 => "0-25m",
            RangeLabel::Meters25To50 => "25-50m",
            RangeLabel::Meters50To75 => "50-75m",
            RangeLabel::Meters75To100 => "75-100m",
        }
    }

    /// Look up a range by its short key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

impl std::fmt::Display for RangeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single parsed line of a performance file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    /// Sample timestamp in seconds
    pub time: f64,
    /// Mass-A channel reading
    pub mass_a: f64,
    /// Time delta column
    pub t: f64,
    /// Position in meters
    pub x: f64,
    /// Speed in m/s (0 when the column is absent)
    pub v: f64,
}

/// A (time, speed) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds
    pub time: f64,
    /// Meters per second
    pub speed: f64,
}

impl Sample {
    pub fn new(time: f64, speed: f64) -> Self {
        Self { time, speed }
    }
}

/// Ordered (time, speed) samples for one range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Project parsed rows onto (time, v).
    pub fn from_rows(rows: &[PerformanceRow]) -> Self {
        Self {
            samples: rows.iter().map(|r| Sample::new(r.time, r.v)).collect(),
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over speed values in order.
    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.speed)
    }

    /// Highest speed, `None` for an empty series.
    pub fn max_speed(&self) -> Option<f64> {
        self.speeds().reduce(f64::max)
    }

    /// Arithmetic mean speed, `None` for an empty series.
    pub fn mean_speed(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.speeds().sum::<f64>() / self.samples.len() as f64)
    }

    /// Largest timestamp, used as the range duration.
    pub fn max_time(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.time).reduce(f64::max)
    }
}

impl FromIterator<Sample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Series keyed by range. Iteration is always in canonical range order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSet {
    series: BTreeMap<RangeLabel, SampleSeries>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, range: RangeLabel, series: SampleSeries) {
        self.series.insert(range, series);
    }

    pub fn with(mut self, range: RangeLabel, series: SampleSeries) -> Self {
        self.insert(range, series);
        self
    }

    pub fn get(&self, range: RangeLabel) -> Option<&SampleSeries> {
        self.series.get(&range)
    }

    /// Ranges that hold at least one sample, with their series.
    pub fn present(&self) -> impl Iterator<Item = (RangeLabel, &SampleSeries)> {
        self.series
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(r, s)| (*r, s))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Why a line of a performance file was not turned into a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than four whitespace-separated tokens
    TooFewColumns { found: usize },
    /// A token could not be read as a float (1-based column)
    InvalidNumber { column: usize },
}

/// Outcome of parsing one data line.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(PerformanceRow),
    Skipped(SkipReason),
}

/// Errors reading a performance file from disk.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("File is not valid UTF-8: {0}")]
    Encoding(String),
}
