//! Main validation pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the validation workflow.

use crate::cleaner::DataCleaner;
use crate::column::TypedColumn;
use crate::config::{ConfigValidationError, ValidationConfig};
use crate::error::{Result, ResultExt, ValidationError};
use crate::loader::load_csv;
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ValidationStage,
};
use crate::profiler::DataProfiler;
use crate::reporting::{OutputWriter, ValidationReport};
use crate::types::{ImputationOutcome, RunSummary};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Cleaned table and report of an in-memory run.
#[derive(Debug, Clone)]
pub struct ProcessedDataset {
    pub data: DataFrame,
    pub report: ValidationReport,
}

/// Outcome of a file-to-file run.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    pub summary: RunSummary,
    pub report: ValidationReport,
}

/// The validation pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use data_validation::{DegeneratePolicy, Pipeline, ValidationConfig};
///
/// let config = ValidationConfig::builder()
///     .degenerate_policy(DegeneratePolicy::Fail)
///     .build()?;
///
/// let summary = Pipeline::builder()
///     .config(config)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run("data/sales.csv", "out")?;
/// ```
pub struct Pipeline {
    config: ValidationConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate `input` and write the cleaned copy and the report into
    /// `output_dir`.
    ///
    /// # Errors
    ///
    /// Input errors and [`ValidationError::DegenerateColumn`] abort before
    /// anything is written. Output errors leave no partial file at a
    /// target path.
    pub fn run(&self, input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<RunSummary> {
        self.execute(input, output_dir).map(|run| run.summary)
    }

    /// Like [`Pipeline::run`], also handing back the report.
    pub fn execute(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<ValidationRun> {
        let result = self.execute_internal(input.as_ref(), output_dir.as_ref());
        self.finish(result)
    }

    /// Run every stage except loading and writing on an in-memory table.
    pub fn process(&self, df: DataFrame) -> Result<ProcessedDataset> {
        let result = self.process_internal(df);
        self.finish(result)
    }

    fn finish<T>(&self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.report_progress(ProgressUpdate::complete("Validation completed successfully")),
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Validation error: {}", e);
            }
        }
        result
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn stage_started(&self, stage: ValidationStage, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.report_progress(ProgressUpdate::new(stage, 0.0, message));
    }

    fn stage_finished(&self, stage: ValidationStage, message: impl Into<String>) {
        self.report_progress(ProgressUpdate::new(stage, 1.0, message));
    }

    fn execute_internal(&self, input: &Path, output_dir: &Path) -> Result<ValidationRun> {
        let start_time = Instant::now();

        self.stage_started(
            ValidationStage::Loading,
            format!("Loading {}...", input.display()),
        );
        let df = load_csv(input, &self.config.null_markers)?;
        info!("Loaded {} rows x {} columns", df.height(), df.width());
        self.stage_finished(ValidationStage::Loading, "Data loaded");

        let ProcessedDataset { mut data, report } = self.process_internal(df)?;

        self.stage_started(
            ValidationStage::Writing,
            format!("Writing outputs to {}...", output_dir.display()),
        );
        let writer = OutputWriter::new(output_dir, self.config.report_indent);
        let summary = writer.write(input, &mut data, &report)?;
        self.stage_finished(ValidationStage::Writing, "Outputs written");

        info!("Validation finished in {:.2?}", start_time.elapsed());
        Ok(ValidationRun { summary, report })
    }

    fn process_internal(&self, df: DataFrame) -> Result<ProcessedDataset> {
        // Step 1: Missing values, on the table as loaded
        self.stage_started(ValidationStage::MissingValues, "Counting missing values...");
        let missing_values = DataProfiler::missing_values(&df);
        let total_missing: usize = missing_values.values().sum();
        debug!("{} missing cells", total_missing);
        self.stage_finished(
            ValidationStage::MissingValues,
            format!("Found {} missing cells", total_missing),
        );

        // Step 2: Duplicates
        self.stage_started(ValidationStage::Deduplication, "Removing duplicate rows...");
        let (df, duplicate_rows) = DataCleaner::remove_duplicates(df)?;
        self.stage_finished(
            ValidationStage::Deduplication,
            format!("Removed {} duplicate rows", duplicate_rows),
        );

        // Step 3: Schema inference
        self.stage_started(ValidationStage::SchemaInference, "Inferring column types...");
        let mut table = DataProfiler::infer_schema(df, &self.config.inference_policy())?;
        let inferred_schema = table.schema();
        self.stage_finished(
            ValidationStage::SchemaInference,
            format!("Classified {} columns", inferred_schema.len()),
        );

        let mut report = ValidationReport::builder()
            .missing_values(missing_values)
            .duplicate_rows(duplicate_rows)
            .inferred_schema(inferred_schema);

        // Step 4: Numeric columns
        self.stage_started(
            ValidationStage::Imputation,
            "Detecting outliers and imputing numeric columns...",
        );
        let numeric_total = table
            .columns()
            .iter()
            .filter(|c| matches!(c, TypedColumn::Numeric(_)))
            .count();
        let mut numeric_done = 0;
        for column in table.columns_mut() {
            let TypedColumn::Numeric(numeric) = column else {
                continue;
            };
            let name = numeric.series().name().to_string();

            let coerced = numeric
                .coerce()
                .context(format!("Failed to coerce column '{}'", name))?;
            if coerced > 0 {
                debug!("  {}: {} unparseable cells set to null", name, coerced);
            }

            let outliers = numeric
                .count_outliers()
                .context(format!("Failed to count outliers in '{}'", name))?;
            let outcome = numeric
                .impute(self.config.degenerate_policy)
                .context(format!("Failed to impute column '{}'", name))?;

            match &outcome {
                ImputationOutcome::Imputed { value, filled } => {
                    debug!(
                        "  {}: {} outliers, filled {} with median {}",
                        name, outliers, filled, value
                    );
                }
                ImputationOutcome::Skipped { reason } => {
                    warn!("Skipped imputation of '{}': {}", name, reason);
                }
                ImputationOutcome::Failed { reason } => {
                    return Err(ValidationError::DegenerateColumn {
                        column: name,
                        reason: reason.clone(),
                    });
                }
            }

            report = report.outliers(name.as_str(), outliers).imputation(name, outcome);

            numeric_done += 1;
            self.report_progress(ProgressUpdate::new(
                ValidationStage::Imputation,
                numeric_done as f32 / numeric_total as f32,
                format!("Imputed {}/{} numeric columns", numeric_done, numeric_total),
            ));
        }
        self.stage_finished(ValidationStage::Imputation, "Numeric columns processed");

        // Step 5: Categorical columns
        self.stage_started(ValidationStage::Normalization, "Normalizing categorical columns...");
        for column in table.columns_mut() {
            let TypedColumn::Categorical(categorical) = column else {
                continue;
            };
            let name = categorical.series().name().to_string();

            categorical
                .normalize()
                .context(format!("Failed to normalize column '{}'", name))?;
            let cardinality = categorical
                .cardinality()
                .context(format!("Failed to count values of '{}'", name))?;
            debug!("  {}: {} distinct values", name, cardinality);

            report = report.cardinality(name, cardinality);
        }
        self.stage_finished(ValidationStage::Normalization, "Categorical columns processed");

        // Step 6: Report
        self.stage_started(ValidationStage::ReportGeneration, "Assembling report...");
        let report = report.build()?;
        let data = table
            .into_frame()
            .context("Failed to reassemble cleaned table")?;
        self.stage_finished(ValidationStage::ReportGeneration, "Report assembled");

        Ok(ProcessedDataset { data, report })
    }
}

/// Builder for creating a [`Pipeline`] with custom configuration.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<ValidationConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during validation.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use data_validation::{ProgressReporter, ProgressUpdate};
    /// use std::sync::Arc;
    ///
    /// struct MyReporter;
    ///
    /// impl ProgressReporter for MyReporter {
    ///     fn report(&self, update: ProgressUpdate) {
    ///         println!("{}: {}", update.stage.display_name(), update.message);
    ///     }
    /// }
    ///
    /// let pipeline = Pipeline::builder()
    ///     .progress_reporter(Arc::new(MyReporter))
    ///     .build()?;
    /// ```
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
