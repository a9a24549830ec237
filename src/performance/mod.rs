//! Performance data: parsing uploads, placeholder series, and analysis runs.

pub mod parser;
pub mod pipeline;
pub mod synthetic;
pub mod types;

pub use parser::{parse_performance_data, parse_performance_file, parse_performance_lines};
pub use pipeline::{run_analysis, AnalysisError, AnalysisOutcome, RangeSource, RangeUploads};
pub use types::{PerformanceRow, RangeLabel, RangeSet, Sample, SampleSeries};
