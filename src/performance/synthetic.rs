//! Placeholder series for ranges that received no upload.
//!
//! Each range gets evenly spaced samples over its nominal time window with
//! speeds drawn from a normal distribution around the range's typical speed.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::performance::types::{RangeLabel, Sample, SampleSeries};

/// Default number of samples in a placeholder series.
pub const DEFAULT_PLACEHOLDER_SAMPLES: usize = 50;

/// Nominal speed profile of a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeProfile {
    /// Window start in seconds
    pub start_secs: f64,
    /// Window end in seconds
    pub end_secs: f64,
    /// Mean speed in m/s
    pub mean_speed: f64,
    /// Standard deviation of speed in m/s
    pub speed_std_dev: f64,
}

impl RangeProfile {
    /// Profile for a given range.
    pub fn for_range(range: RangeLabel) -> Self {
        let (start_secs, end_secs, mean_speed, speed_std_dev) = match range {
            RangeLabel::Meters0To25 => (0.0, 3.0, 7.06, 0.2),
            RangeLabel::Meters25To50 => (3.0, 6.0, 8.57, 0.2),
            RangeLabel::Meters50To75 => (6.0, 9.0, 8.56, 0.2),
            RangeLabel::Meters75To100 => (9.0, 12.0, 8.11, 0.3),
        };
        Self {
            start_secs,
            end_secs,
            mean_speed,
            speed_std_dev,
        }
    }
}

/// Generate a placeholder series for `range` with `count` samples.
pub fn placeholder_series<R: Rng + ?Sized>(
    range: RangeLabel,
    count: usize,
    rng: &mut R,
) -> SampleSeries {
    let profile = RangeProfile::for_range(range);
    let noise = match Normal::new(profile.mean_speed, profile.speed_std_dev) {
        Ok(noise) => noise,
        // Only reachable with a negative or NaN deviation.
        Err(_) => return SampleSeries::default(),
    };

    linspace(profile.start_secs, profile.end_secs, count)
        .into_iter()
        .map(|time| Sample::new(time, noise.sample(rng)))
        .collect()
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
