//! Pipeline module.
//!
//! This module provides the validation pipeline and related components.

mod builder;
pub mod outliers;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder, ProcessedDataset, ValidationRun};
pub use outliers::{IQR_FENCE_MULTIPLIER, IqrFences, OutlierDetector};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, ValidationStage};
