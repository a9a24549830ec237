//! Integration test modules.

mod analysis_pipeline_test;
mod reports_view_test;
