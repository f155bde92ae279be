//! Shared utilities for the validation pipeline.
//!
//! Numeric parsing lives here so that schema inference and numeric
//! coercion agree exactly on what counts as a number.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    is_numeric_dtype(dtype) && !matches!(dtype, DataType::Float32 | DataType::Float64)
}

// =============================================================================
// Numeric Parsing Utilities
// =============================================================================

/// Parse a cell as a finite number.
///
/// Surrounding whitespace is ignored. Infinities and NaN literals are not
/// numeric values.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a cell written as an integer literal (`"42"`, `"-7"`).
///
/// Unlike [`parse_numeric`] this is exact for magnitudes beyond 2^53.
pub fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Count the non-null cells of a Series and how many of them parse as numbers.
///
/// Returns `(parsed, non_null)`.
pub fn count_numeric_cells(series: &Series) -> PolarsResult<(usize, usize)> {
    if is_numeric_dtype(series.dtype()) {
        let non_null = series.len() - series.null_count();
        return Ok((non_null, non_null));
    }

    let text = series.cast(&DataType::String)?;
    let mut parsed = 0;
    let mut non_null = 0;
    for cell in text.str()?.into_iter().flatten() {
        non_null += 1;
        if parse_numeric(cell).is_some() {
            parsed += 1;
        }
    }

    Ok((parsed, non_null))
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a float Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let filled: Vec<f64> = series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

/// Render every cell of a Series as text, replacing nulls with `fill_value`.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let text = series.cast(&DataType::String)?;
    let filled: Vec<String> = text
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value).to_string())
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

// =============================================================================
// Tests
// =============================================================================
