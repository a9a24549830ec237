//! One analysis run: parse uploads, fill gaps, aggregate, chart, persist.

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::aggregator::{aggregate, PerformanceSummary};
use crate::performance::parser::parse_performance_data;
use crate::performance::synthetic::placeholder_series;
use crate::performance::types::{RangeLabel, RangeSet, SampleSeries};
use crate::report::chart::SpeedChart;
use crate::storage::config::{AnalysisSettings, ReportSettings};
use crate::storage::database::DatabaseError;
use crate::storage::models::PerformanceRecord;
use crate::storage::repository::RecordStore;

/// Errors from an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Runner not found: {0}")]
    UnknownRunner(Uuid),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Raw uploaded text per range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeUploads {
    contents: [Option<String>; 4],
}

impl RangeUploads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, range: RangeLabel, content: impl Into<String>) {
        self.contents[range.index()] = Some(content.into());
    }

    pub fn with(mut self, range: RangeLabel, content: impl Into<String>) -> Self {
        self.set(range, content);
        self
    }

    pub fn clear(&mut self, range: RangeLabel) {
        self.contents[range.index()] = None;
    }

    pub fn get(&self, range: RangeLabel) -> Option<&str> {
        self.contents[range.index()].as_deref()
    }

    pub fn is_uploaded(&self, range: RangeLabel) -> bool {
        self.contents[range.index()].is_some()
    }

    /// Payloads in range order, as stored with a record.
    pub fn into_payloads(self) -> [Option<String>; 4] {
        self.contents
    }
}

/// Where a range's series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSource {
    Uploaded,
    Placeholder,
}

/// Result of a completed analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub ranges: RangeSet,
    /// Source per range, indexed by [`RangeLabel::index`]
    pub sources: [RangeSource; 4],
    pub summary: PerformanceSummary,
    pub chart: SpeedChart,
    /// The stored record
    pub record: PerformanceRecord,
}

impl AnalysisOutcome {
    pub fn source(&self, range: RangeLabel) -> RangeSource {
        self.sources[range.index()]
    }
}

/// Build the series for every range.
///
/// Uploaded ranges are parsed; an upload with no valid rows stays as an
/// empty series and is left out downstream. Ranges without an upload get a
/// placeholder series.
pub fn build_range_set<R: Rng + ?Sized>(
    uploads: &RangeUploads,
    settings: &AnalysisSettings,
    rng: &mut R,
) -> (RangeSet, [RangeSource; 4]) {
    let mut ranges = RangeSet::new();
    let mut sources = [RangeSource::Placeholder; 4];

    for range in RangeLabel::ALL {
        let series = match uploads.get(range) {
            Some(content) => {
                sources[range.index()] = RangeSource::Uploaded;
                let rows = parse_performance_data(content);
                if rows.is_empty() {
                    tracing::warn!("Upload for {} contained no valid rows", range);
                }
                SampleSeries::from_rows(&rows)
            }
            None => placeholder_series(range, settings.placeholder_samples, rng),
        };
        ranges.insert(range, series);
    }

    (ranges, sources)
}

/// Run a full analysis for a runner and append the record to the store.
pub fn run_analysis<S, R>(
    store: &S,
    runner_id: Uuid,
    uploads: RangeUploads,
    analysis: &AnalysisSettings,
    report: &ReportSettings,
    rng: &mut R,
) -> Result<AnalysisOutcome, AnalysisError>
where
    S: RecordStore + ?Sized,
    R: Rng + ?Sized,
{
    if store.get_runner(&runner_id)?.is_none() {
        return Err(AnalysisError::UnknownRunner(runner_id));
    }

    let (ranges, sources) = build_range_set(&uploads, analysis, rng);
    let summary = aggregate(&ranges, analysis.total_time_secs);
    let chart = SpeedChart::from_ranges(&ranges, &report.palette);

    let mut record = PerformanceRecord::new(
        runner_id,
        summary.max_speed,
        summary.avg_speed,
        summary.total_time,
    );
    record.range_payloads = uploads.into_payloads();
    store.insert_performance_record(&record)?;

    tracing::info!(
        "Saved performance record {} for runner {} (max {:.2} m/s, {} samples)",
        record.id,
        runner_id,
        summary.max_speed,
        summary.sample_count
    );

    Ok(AnalysisOutcome {
        ranges,
        sources,
        summary,
        chart,
        record,
    })
}
