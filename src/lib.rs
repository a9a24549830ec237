//! Running Analysis Suite
//!
//! A desktop dashboard for 100-meter sprint tests. Coaches upload per-range
//! performance files, the suite computes speed statistics, charts them,
//! exports an Excel report, and keeps a history of every test per runner.

pub mod auth;
pub mod metrics;
pub mod performance;
pub mod report;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use auth::{AccessController, Role, Session};
pub use metrics::aggregator::{aggregate, PerformanceSummary};
pub use performance::pipeline::{run_analysis, AnalysisOutcome};
pub use storage::config::AppConfig;
pub use storage::database::Database;
