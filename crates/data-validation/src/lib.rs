//! Data Validation Library
//!
//! Validates and cleans a single CSV dataset with Polars, producing a cleaned
//! copy of the data and a JSON report of what was found.
//!
//! # Overview
//!
//! Every run executes the same fixed sequence of stages:
//!
//! - **Loading**: every column is read as text, empty fields and NA markers
//!   become nulls
//! - **Missing Values**: null cells per column, counted before any change
//! - **Deduplication**: exact duplicate rows are dropped, first occurrence kept
//! - **Schema Inference**: each column is classified numeric or categorical
//! - **Outliers & Imputation**: numeric columns are coerced, IQR outliers are
//!   counted, and nulls are filled with the median
//! - **Normalization**: categorical nulls become `"UNKNOWN"`, distinct values
//!   are counted
//! - **Reporting**: the cleaned table is written as
//!   `cleaned_<file name>` and the report as `validation_report_<stem>.json`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let summary = data_validation::run("data/sales.csv", "out")?;
//! println!("report at {}", summary.report_path.display());
//! ```
//!
//! # Configuration
//!
//! Use [`ValidationConfig`] to adjust the two policy knobs:
//!
//! ```rust,ignore
//! use data_validation::{DegeneratePolicy, Pipeline, ValidationConfig};
//!
//! let config = ValidationConfig::builder()
//!     .numeric_threshold(0.95)                   // tolerate 5% unparseable cells
//!     .degenerate_policy(DegeneratePolicy::Fail) // abort on all-null numeric columns
//!     .build()?;
//!
//! let run = Pipeline::builder().config(config).build()?.execute("data.csv", "out")?;
//! println!("{} duplicate rows", run.report.duplicate_rows);
//! ```

pub mod cleaner;
pub mod column;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

use std::path::Path;

// Re-exports for convenient access
pub use cleaner::{CategoricalNormalizer, DataCleaner, MISSING_SENTINEL};
pub use column::{CategoricalColumn, NumericColumn, TypedColumn, TypedTable};
pub use config::{
    ConfigValidationError, DegeneratePolicy, ValidationConfig, ValidationConfigBuilder,
};
pub use error::{Result, ResultExt, ValidationError};
pub use imputers::StatisticalImputer;
pub use loader::load_csv;
pub use pipeline::{
    ClosureProgressReporter, IqrFences, OutlierDetector, Pipeline, PipelineBuilder,
    ProcessedDataset, ProgressReporter, ProgressUpdate, ValidationRun, ValidationStage,
};
pub use profiler::{DataProfiler, InferencePolicy};
pub use reporting::{OutputPaths, OutputWriter, ReportBuilder, ValidationReport};
pub use types::{ColumnKind, ColumnMap, ImputationOutcome, RunStatus, RunSummary};
pub use utils::parse_numeric;

/// Validate `input_path` with the default configuration and write the
/// cleaned data and report into `output_dir`.
pub fn run(input_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<RunSummary> {
    Pipeline::builder().build()?.run(input_path, output_dir)
}
