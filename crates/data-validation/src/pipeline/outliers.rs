//! Outlier detection module.
//!
//! Counts values outside the Tukey fences of a numeric column. Outliers are
//! only counted, never removed or capped.

use polars::prelude::*;

/// Multiplier applied to the interquartile range to place the fences.
pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;

/// Quartiles and fences of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Compute fences from the non-null values, with quartiles interpolated
    /// linearly. `None` when there are no values.
    pub fn from_values(values: &Float64Chunked) -> PolarsResult<Option<Self>> {
        let q1 = values.quantile(0.25, QuantileMethod::Linear)?;
        let q3 = values.quantile(0.75, QuantileMethod::Linear)?;

        Ok(q1.zip(q3).map(|(q1, q3)| {
            let iqr = q3 - q1;
            Self {
                q1,
                q3,
                iqr,
                lower: q1 - IQR_FENCE_MULTIPLIER * iqr,
                upper: q3 + IQR_FENCE_MULTIPLIER * iqr,
            }
        }))
    }

    /// Values sitting exactly on a fence are not outliers.
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Counts IQR outliers.
pub struct OutlierDetector;

impl OutlierDetector {
    /// Number of non-null values strictly outside the fences.
    ///
    /// `values` must be free of NaN.
    pub fn count(values: &Float64Chunked) -> PolarsResult<usize> {
        let Some(fences) = IqrFences::from_values(values)? else {
            return Ok(0);
        };
        Ok(values
            .into_iter()
            .flatten()
            .filter(|v| fences.is_outlier(*v))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(values: &[f64]) -> Float64Chunked {
        Float64Chunked::from_slice("x".into(), values)
    }

    #[test]
    fn test_single_extreme_value() {
        let values = values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let fences = IqrFences::from_values(&values).unwrap().unwrap();

        assert_eq!(fences.q1, 2.25);
        assert_eq!(fences.q3, 4.75);
        assert_eq!(fences.iqr, 2.5);
        assert_eq!(fences.upper, 8.5);
        assert_eq!(OutlierDetector::count(&values).unwrap(), 1);
    }

    #[test]
    fn test_unsorted_input_with_nulls() {
        let values: Float64Chunked = [
            Some(100.0),
            None,
            Some(3.0),
            Some(1.0),
            Some(5.0),
            Some(2.0),
            Some(4.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(OutlierDetector::count(&values).unwrap(), 1);
    }

    #[test]
    fn test_empty_and_single_value() {
        let empty = values(&[]);
        assert_eq!(OutlierDetector::count(&empty).unwrap(), 0);
        assert!(IqrFences::from_values(&empty).unwrap().is_none());
        assert_eq!(OutlierDetector::count(&values(&[42.0])).unwrap(), 0);
    }

    #[test]
    fn test_constant_column_has_no_outliers() {
        assert_eq!(OutlierDetector::count(&values(&[7.0; 10])).unwrap(), 0);
    }

    #[test]
    fn test_value_on_fence_is_not_outlier() {
        // q1 = 1, q3 = 3, iqr = 2, upper fence = 6
        let values = values(&[0.0, 1.0, 2.0, 3.0, 6.0]);
        let fences = IqrFences::from_values(&values).unwrap().unwrap();
        assert_eq!(fences.upper, 6.0);
        assert!(!fences.is_outlier(6.0));
        assert_eq!(OutlierDetector::count(&values).unwrap(), 0);
    }

    #[test]
    fn test_outliers_on_both_sides() {
        let values = values(&[-100.0, 10.0, 11.0, 12.0, 13.0, 14.0, 200.0]);
        assert_eq!(OutlierDetector::count(&values).unwrap(), 2);
    }
}
