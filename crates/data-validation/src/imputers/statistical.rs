//! Median imputation for numeric columns.

use crate::config::DegeneratePolicy;
use crate::types::ImputationOutcome;
use crate::utils::fill_numeric_nulls;
use polars::prelude::*;

/// Reason recorded for a column that has missing cells and nothing else.
pub const NO_VALUES_REASON: &str = "no non-missing values to compute a median from";

/// Reason recorded for a column without any rows.
pub const EMPTY_COLUMN_REASON: &str = "column is empty";

/// Statistical imputation for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill the nulls of a float column with the median of its non-null values.
    ///
    /// The median is taken over every value, outliers included. A column
    /// with nulls but no values cannot be imputed; `policy` decides whether
    /// that is reported as [`ImputationOutcome::Skipped`] or
    /// [`ImputationOutcome::Failed`]. Either way the column is returned
    /// unchanged.
    pub fn median_fill(
        series: &Series,
        policy: DegeneratePolicy,
    ) -> PolarsResult<(Series, ImputationOutcome)> {
        let values = series.f64()?;
        let missing = values.null_count();

        let Some(median) = values.median() else {
            let reason = if missing == 0 {
                EMPTY_COLUMN_REASON
            } else {
                NO_VALUES_REASON
            };
            let outcome = match policy {
                DegeneratePolicy::Fail if missing > 0 => ImputationOutcome::Failed {
                    reason: reason.to_string(),
                },
                _ => ImputationOutcome::Skipped {
                    reason: reason.to_string(),
                },
            };
            return Ok((series.clone(), outcome));
        };

        let filled = if missing > 0 {
            fill_numeric_nulls(series, median)?
        } else {
            series.clone()
        };

        Ok((
            filled,
            ImputationOutcome::Imputed {
                value: median,
                filled: missing,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_series(values: &[Option<f64>]) -> Series {
        Series::new("x".into(), values)
    }

    #[test]
    fn test_median_fill_odd_count() {
        let series = float_series(&[Some(3.0), None, Some(1.0), Some(2.0)]);
        let (filled, outcome) =
            StatisticalImputer::median_fill(&series, DegeneratePolicy::Skip).unwrap();

        assert_eq!(
            outcome,
            ImputationOutcome::Imputed {
                value: 2.0,
                filled: 1
            }
        );
        let values: Vec<Option<f64>> = filled.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(3.0), Some(2.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_median_fill_without_nulls_reports_zero_filled() {
        let series = float_series(&[Some(1.0), Some(2.0)]);
        let (filled, outcome) =
            StatisticalImputer::median_fill(&series, DegeneratePolicy::Skip).unwrap();

        assert_eq!(
            outcome,
            ImputationOutcome::Imputed {
                value: 1.5,
                filled: 0
            }
        );
        assert!(filled.equals_missing(&series));
    }

    #[test]
    fn test_all_null_column_is_skipped() {
        let series = float_series(&[None, None]);
        let (filled, outcome) =
            StatisticalImputer::median_fill(&series, DegeneratePolicy::Skip).unwrap();

        assert_eq!(
            outcome,
            ImputationOutcome::Skipped {
                reason: NO_VALUES_REASON.to_string()
            }
        );
        assert_eq!(filled.null_count(), 2);
    }

    #[test]
    fn test_all_null_column_fails_under_fail_policy() {
        let series = float_series(&[None, None]);
        let (_, outcome) =
            StatisticalImputer::median_fill(&series, DegeneratePolicy::Fail).unwrap();

        assert!(matches!(outcome, ImputationOutcome::Failed { .. }));
    }

    #[test]
    fn test_empty_column_is_skipped_under_any_policy() {
        let series = float_series(&[]);
        for policy in [DegeneratePolicy::Skip, DegeneratePolicy::Fail] {
            let (_, outcome) = StatisticalImputer::median_fill(&series, policy).unwrap();
            assert_eq!(
                outcome,
                ImputationOutcome::Skipped {
                    reason: EMPTY_COLUMN_REASON.to_string()
                }
            );
        }
    }
}
