//! Progress reporting for the validation pipeline.
//!
//! The pipeline emits a [`ProgressUpdate`] when each stage starts and
//! finishes. Attach a [`ProgressReporter`] (or a closure through
//! [`PipelineBuilder::on_progress`](crate::pipeline::PipelineBuilder::on_progress))
//! to receive them.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_validation::Pipeline;
//!
//! let summary = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run("data.csv", "out")?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the validation pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStage {
    /// Reading the input file
    Loading,
    /// Counting null cells per column
    MissingValues,
    /// Removing exact duplicate rows
    Deduplication,
    /// Classifying columns as numeric or categorical
    SchemaInference,
    /// Counting outliers and filling numeric nulls
    Imputation,
    /// Filling categorical nulls and counting distinct values
    Normalization,
    /// Assembling the report
    ReportGeneration,
    /// Persisting the cleaned data and the report
    Writing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl ValidationStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::MissingValues => "Counting Missing Values",
            Self::Deduplication => "Removing Duplicates",
            Self::SchemaInference => "Inferring Schema",
            Self::Imputation => "Imputing Values",
            Self::Normalization => "Normalizing Categories",
            Self::ReportGeneration => "Generating Report",
            Self::Writing => "Writing Outputs",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the typical weight of this stage in the overall pipeline (0.0 - 1.0).
    ///
    /// The weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.10,
            Self::MissingValues => 0.05,
            Self::Deduplication => 0.10,
            Self::SchemaInference => 0.15,
            Self::Imputation => 0.25,
            Self::Normalization => 0.15,
            Self::ReportGeneration => 0.05,
            Self::Writing => 0.15,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::MissingValues => 0.10,
            Self::Deduplication => 0.15,
            Self::SchemaInference => 0.25,
            Self::Imputation => 0.40,
            Self::Normalization => 0.65,
            Self::ReportGeneration => 0.80,
            Self::Writing => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// Progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: ValidationStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: ValidationStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let stage_progress = stage_progress.clamp(0.0, 1.0);
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress,
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: ValidationStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: ValidationStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates during validation.
///
/// Implementations must be `Send + Sync` so a pipeline can be shared with
/// or moved to a worker thread.
pub trait ProgressReporter: Send + Sync {
    /// Called at the start and end of every stage, then once with a
    /// terminal update. Implementations should be cheap and non-blocking.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
