//! Categorical normalization.

use crate::utils::fill_string_nulls;
use polars::prelude::*;

/// Value written in place of a missing categorical cell.
pub const MISSING_SENTINEL: &str = "UNKNOWN";

/// Renders categorical columns as text with no nulls.
pub struct CategoricalNormalizer;

impl CategoricalNormalizer {
    /// Cast every cell to its text form and replace nulls with
    /// [`MISSING_SENTINEL`].
    pub fn normalize(series: &Series) -> PolarsResult<Series> {
        fill_string_nulls(series, MISSING_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_become_sentinel() {
        let series = Series::new("city".into(), &[Some("NY"), None, Some("LA")]);
        let normalized = CategoricalNormalizer::normalize(&series).unwrap();

        let values: Vec<Option<&str>> = normalized.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("NY"), Some(MISSING_SENTINEL), Some("LA")]);
    }

    #[test]
    fn test_non_text_cells_are_rendered_as_text() {
        let series = Series::new("flag".into(), &[Some(true), None]);
        let normalized = CategoricalNormalizer::normalize(&series).unwrap();

        assert_eq!(normalized.dtype(), &DataType::String);
        let values: Vec<Option<&str>> = normalized.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("true"), Some(MISSING_SENTINEL)]);
    }
}
