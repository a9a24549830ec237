//! Speed metrics for single tests and across stored records.

pub mod aggregator;
pub mod reports;

pub use aggregator::{aggregate, PerformanceSummary, RangeSummary, DEFAULT_TOTAL_TIME_SECS};
pub use reports::{progression, summarize_records, ProgressionPoint, ReportStatistics};
