//! Storage module for database and configuration.

pub mod config;
pub mod database;
pub mod models;
pub mod repository;
pub mod schema;

pub use config::{AnalysisSettings, AppConfig, HexColor, RangePalette, ReportSettings};
pub use database::{Database, DatabaseError};
pub use models::{
    CoachRunnerStats, PerformanceRecord, RecordFilter, RecordListing, Runner, RunnerListing, User,
};
pub use repository::RecordStore;
