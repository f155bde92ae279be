//! Custom error types for the validation pipeline.
//!
//! Input and output failures are distinct variants carrying the offending
//! path, so callers can tell "the upload was bad" apart from "the results
//! could not be saved". Everything that is merely a data-quality finding
//! (unparseable cells, outliers, missing values) is absorbed into the
//! report and never surfaces here.
//!
//! Errors are serializable as `{code, message}` for callers that forward
//! them over JSON.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the validation pipeline.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Input file does not exist or is not a regular file.
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Input file exists but could not be parsed as comma-separated data.
    #[error("Failed to read '{}' as CSV: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Output directory could not be created.
    #[error("Failed to create output directory '{}': {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write '{}': {reason}", path.display())]
    OutputWrite { path: PathBuf, reason: String },

    /// A numeric column had missing cells but no value to impute from,
    /// and the configured policy asked for the run to fail.
    #[error("Cannot impute column '{column}': {reason}")]
    DegenerateColumn { column: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A report section was never produced.
    #[error("Report is missing section '{0}'")]
    ReportIncomplete(&'static str),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ValidationError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "INPUT_NOT_FOUND",
            Self::InputUnreadable { .. } => "INPUT_UNREADABLE",
            Self::OutputDir { .. } => "OUTPUT_DIR",
            Self::OutputWrite { .. } => "OUTPUT_WRITE",
            Self::DegenerateColumn { .. } => "DEGENERATE_COLUMN",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ReportIncomplete(_) => "REPORT_INCOMPLETE",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// True when the failure is about the input file (missing or malformed).
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InputNotFound { .. } | Self::InputUnreadable { .. } => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }

    /// True when the failure happened while persisting results.
    pub fn is_output_error(&self) -> bool {
        match self {
            Self::OutputDir { .. } | Self::OutputWrite { .. } => true,
            Self::WithContext { source, .. } => source.is_output_error(),
            _ => false,
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ValidationError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let error = ValidationError::InputNotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert_eq!(error.error_code(), "INPUT_NOT_FOUND");
        assert_eq!(
            ValidationError::ReportIncomplete("outliers").error_code(),
            "REPORT_INCOMPLETE"
        );
    }

    #[test]
    fn test_input_and_output_classes_are_distinct() {
        let input = ValidationError::InputNotFound {
            path: PathBuf::from("in.csv"),
        };
        let output = ValidationError::OutputWrite {
            path: PathBuf::from("out/cleaned_in.csv"),
            reason: "disk full".to_string(),
        };

        assert!(input.is_input_error());
        assert!(!input.is_output_error());
        assert!(output.is_output_error());
        assert!(!output.is_input_error());
    }

    #[test]
    fn test_message_carries_path() {
        let error = ValidationError::InputNotFound {
            path: PathBuf::from("data/upload.csv"),
        };
        assert!(error.to_string().contains("data/upload.csv"));
    }

    #[test]
    fn test_error_serialization() {
        let error = ValidationError::DegenerateColumn {
            column: "score".to_string(),
            reason: "all values are missing".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("DEGENERATE_COLUMN"));
        assert!(json.contains("score"));
    }

    #[test]
    fn test_with_context_preserves_classification() {
        let error = ValidationError::OutputDir {
            path: PathBuf::from("/readonly/out"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .with_context("Preparing outputs");

        assert!(error.to_string().contains("Preparing outputs"));
        assert_eq!(error.error_code(), "OUTPUT_DIR");
        assert!(error.is_output_error());
    }
}
