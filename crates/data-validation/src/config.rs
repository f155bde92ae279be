//! Configuration types for the validation pipeline.
//!
//! The defaults reproduce the fixed cleaning rules exactly; the knobs only
//! exist for the two places where those rules are a policy rather than a
//! fact (how forgiving numeric inference is, and what to do with a numeric
//! column that has nothing to impute from).

use crate::profiler::InferencePolicy;
use serde::{Deserialize, Serialize};

/// Cell values read as missing.
///
/// This is the NA token set recognised by common dataframe CSV readers,
/// so an upload containing `NA`, `null` or a quoted empty field is
/// accounted for as missing rather than as a categorical value.
pub const DEFAULT_NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Default indentation (in spaces) of the JSON report.
pub const DEFAULT_REPORT_INDENT: usize = 4;

/// What to do with a numeric column that has missing cells but no
/// non-missing value to compute a median from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Leave the column unfilled and record the skip in the report.
    #[default]
    Skip,
    /// Abort the run with [`crate::ValidationError::DegenerateColumn`].
    Fail,
}

/// Configuration for the validation pipeline.
///
/// Use [`ValidationConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use data_validation::config::{DegeneratePolicy, ValidationConfig};
///
/// let config = ValidationConfig::builder()
///     .numeric_threshold(0.95)
///     .degenerate_policy(DegeneratePolicy::Fail)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum fraction of non-null cells that must parse as numbers for a
    /// column to be classified numeric (0.0 exclusive - 1.0).
    /// Default: 1.0 (every non-null cell must parse)
    pub numeric_threshold: f64,

    /// Handling of numeric columns with nothing to impute from.
    /// Default: Skip
    pub degenerate_policy: DegeneratePolicy,

    /// Cell values read as missing when loading CSV input.
    /// Default: [`DEFAULT_NULL_MARKERS`]
    pub null_markers: Vec<String>,

    /// Indentation of the JSON report, in spaces.
    /// Default: 4
    pub report_indent: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: InferencePolicy::STRICT_THRESHOLD,
            degenerate_policy: DegeneratePolicy::default(),
            null_markers: default_null_markers(),
            report_indent: DEFAULT_REPORT_INDENT,
        }
    }
}

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl ValidationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// The schema inference policy described by this configuration.
    pub fn inference_policy(&self) -> InferencePolicy {
        InferencePolicy::new(self.numeric_threshold)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.numeric_threshold > 0.0 && self.numeric_threshold <= 1.0) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "numeric_threshold".to_string(),
                value: self.numeric_threshold,
            });
        }

        if self.report_indent > 16 {
            return Err(ConfigValidationError::InvalidIndent(self.report_indent));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be greater than 0.0 and at most 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid report indent: {0} (must be at most 16)")]
    InvalidIndent(usize),
}

impl From<ConfigValidationError> for crate::ValidationError {
    fn from(err: ConfigValidationError) -> Self {
        crate::ValidationError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ValidationConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    numeric_threshold: Option<f64>,
    degenerate_policy: Option<DegeneratePolicy>,
    null_markers: Option<Vec<String>>,
    report_indent: Option<usize>,
}

impl ValidationConfigBuilder {
    /// Set the fraction of non-null cells that must parse as numbers for a
    /// column to be treated as numeric.
    ///
    /// # Arguments
    /// * `threshold` - Value in (0.0, 1.0]; 1.0 means all cells must parse
    pub fn numeric_threshold(mut self, threshold: f64) -> Self {
        self.numeric_threshold = Some(threshold);
        self
    }

    /// Set the handling of numeric columns with no values to impute from.
    pub fn degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = Some(policy);
        self
    }

    /// Replace the set of tokens read as missing values.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the JSON report indentation in spaces.
    pub fn report_indent(mut self, indent: usize) -> Self {
        self.report_indent = Some(indent);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ValidationConfig` or an error if validation fails.
    pub fn build(self) -> Result<ValidationConfig, ConfigValidationError> {
        let config = ValidationConfig {
            numeric_threshold: self
                .numeric_threshold
                .unwrap_or(InferencePolicy::STRICT_THRESHOLD),
            degenerate_policy: self.degenerate_policy.unwrap_or_default(),
            null_markers: self.null_markers.unwrap_or_else(default_null_markers),
            report_indent: self.report_indent.unwrap_or(DEFAULT_REPORT_INDENT),
        };

        config.validate()?;
        Ok(config)
    }
}
