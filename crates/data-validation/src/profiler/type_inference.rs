//! Numeric-vs-categorical column classification.

use crate::types::ColumnKind;
use crate::utils::count_numeric_cells;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Rule deciding whether a column is numeric.
///
/// A column is numeric when at least `numeric_threshold` of its non-null
/// cells parse as numbers. Nulls never count against a column, so an
/// all-null column is numeric. With the default threshold of 1.0 a single
/// unparseable cell makes the whole column categorical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferencePolicy {
    numeric_threshold: f64,
}

impl Default for InferencePolicy {
    fn default() -> Self {
        Self::strict()
    }
}

impl InferencePolicy {
    /// Threshold of the all-or-nothing rule.
    pub const STRICT_THRESHOLD: f64 = 1.0;

    pub fn new(numeric_threshold: f64) -> Self {
        Self { numeric_threshold }
    }

    /// Every non-null cell must parse.
    pub fn strict() -> Self {
        Self::new(Self::STRICT_THRESHOLD)
    }

    pub fn numeric_threshold(&self) -> f64 {
        self.numeric_threshold
    }

    /// Classify from precomputed counts.
    pub fn kind_for(&self, parsed: usize, non_null: usize) -> ColumnKind {
        if non_null == 0 || parsed as f64 / non_null as f64 >= self.numeric_threshold {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// Classify a column by attempting to parse every non-null cell.
    pub fn classify(&self, series: &Series) -> PolarsResult<ColumnKind> {
        let (parsed, non_null) = count_numeric_cells(series)?;
        Ok(self.kind_for(parsed, non_null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_numeric_strings_are_numeric() {
        let series = Series::new("age".into(), &["25", "30", "40.5"]);
        assert_eq!(
            InferencePolicy::strict().classify(&series).unwrap(),
            ColumnKind::Numeric
        );
    }

    #[test]
    fn test_single_bad_cell_forces_categorical() {
        let series = Series::new("age".into(), &["25", "30", "bad", "40", "200"]);
        assert_eq!(
            InferencePolicy::strict().classify(&series).unwrap(),
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_nulls_do_not_block_numeric() {
        let series = Series::new("score".into(), &[Some("1"), None, Some("3")]);
        assert_eq!(
            InferencePolicy::strict().classify(&series).unwrap(),
            ColumnKind::Numeric
        );
    }

    #[test]
    fn test_all_null_column_is_numeric() {
        let series = Series::new("empty".into(), &[None::<&str>, None, None]);
        assert_eq!(
            InferencePolicy::strict().classify(&series).unwrap(),
            ColumnKind::Numeric
        );
    }

    #[test]
    fn test_native_numeric_dtype_is_numeric() {
        let series = Series::new("x".into(), &[1i64, 2, 3]);
        assert_eq!(
            InferencePolicy::strict().classify(&series).unwrap(),
            ColumnKind::Numeric
        );
    }

    #[test]
    fn test_boolean_column_is_categorical() {
        let series = Series::new("flag".into(), &[true, false, true]);
        assert_eq!(
            InferencePolicy::strict().classify(&series).unwrap(),
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_relaxed_threshold_tolerates_noise() {
        let policy = InferencePolicy::new(0.8);
        assert_eq!(policy.kind_for(4, 5), ColumnKind::Numeric);
        assert_eq!(policy.kind_for(3, 5), ColumnKind::Categorical);
        assert_eq!(InferencePolicy::strict().kind_for(4, 5), ColumnKind::Categorical);
    }
}
