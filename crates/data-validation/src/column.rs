//! Typed columns.
//!
//! Once schema inference has run, each column travels as a [`TypedColumn`]
//! whose variant carries exactly the operations legal for its kind:
//! numeric columns are coerced, checked for outliers and imputed;
//! categorical columns are normalized and counted.

use crate::cleaner::CategoricalNormalizer;
use crate::config::DegeneratePolicy;
use crate::imputers::StatisticalImputer;
use crate::pipeline::OutlierDetector;
use crate::types::{ColumnKind, ColumnMap, ImputationOutcome};
use crate::utils::{is_integer_dtype, is_numeric_dtype, parse_integer, parse_numeric};
use polars::prelude::*;

/// A column together with its inferred kind.
#[derive(Debug, Clone)]
pub enum TypedColumn {
    Numeric(NumericColumn),
    Categorical(CategoricalColumn),
}

impl TypedColumn {
    pub fn new(series: Series, kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Numeric => Self::Numeric(NumericColumn::new(series)),
            ColumnKind::Categorical => Self::Categorical(CategoricalColumn::new(series)),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn name(&self) -> &str {
        self.series().name().as_str()
    }

    pub fn series(&self) -> &Series {
        match self {
            Self::Numeric(col) => col.series(),
            Self::Categorical(col) => col.series(),
        }
    }

    pub fn into_series(self) -> Series {
        match self {
            Self::Numeric(col) => col.into_series(),
            Self::Categorical(col) => col.into_series(),
        }
    }
}

/// A column classified as numeric.
///
/// Starts out holding the raw cells; [`NumericColumn::coerce`] turns it into
/// a float column, after which outliers can be counted and nulls imputed.
/// When every value is an integer literal an exact `Int64` copy is kept
/// alongside, and it replaces the floats if imputation fills nothing.
#[derive(Debug, Clone)]
pub struct NumericColumn {
    series: Series,
    integers: Option<Series>,
}

impl NumericColumn {
    pub fn new(series: Series) -> Self {
        Self {
            series,
            integers: None,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn into_series(self) -> Series {
        self.series
    }

    /// Convert every cell to a float; cells that fail to parse become null.
    ///
    /// Returns how many non-null cells were turned into nulls. Coercion can
    /// only add nulls, never remove them.
    pub fn coerce(&mut self) -> PolarsResult<usize> {
        let name = self.series.name().clone();
        let nulls_before = self.series.null_count();
        let dtype = self.series.dtype().clone();

        if is_numeric_dtype(&dtype) {
            self.integers = if is_integer_dtype(&dtype) {
                let integers = self.series.cast(&DataType::Int64)?;
                // a UInt64 beyond i64::MAX casts to null
                (integers.null_count() == nulls_before).then_some(integers)
            } else {
                None
            };
            let floats = self.series.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = floats
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect();
            self.series = Series::new(name, values);
        } else {
            let text = self.series.cast(&DataType::String)?;
            let mut floats = Vec::with_capacity(text.len());
            let mut integers = Vec::with_capacity(text.len());
            let mut integral = true;
            for cell in text.str()?.into_iter() {
                let value = cell.and_then(parse_numeric);
                let integer = match (cell, value) {
                    (Some(cell), Some(_)) => parse_integer(cell),
                    _ => None,
                };
                integral &= value.is_none() || integer.is_some();
                floats.push(value);
                integers.push(integer);
            }
            self.integers = integral.then(|| Series::new(name.clone(), integers));
            self.series = Series::new(name, floats);
        }

        Ok(self.series.null_count() - nulls_before)
    }

    /// Count IQR outliers among the non-null values.
    ///
    /// Must be called after [`NumericColumn::coerce`] and before imputation.
    pub fn count_outliers(&self) -> PolarsResult<usize> {
        OutlierDetector::count(self.series.f64()?)
    }

    /// Fill nulls with the median of the non-null values.
    ///
    /// A null-free column of integer literals is written back from its exact
    /// `Int64` copy.
    pub fn impute(&mut self, policy: DegeneratePolicy) -> PolarsResult<ImputationOutcome> {
        let (filled, outcome) = StatisticalImputer::median_fill(&self.series, policy)?;

        self.series = match (&outcome, self.integers.take()) {
            (ImputationOutcome::Imputed { filled: 0, .. }, Some(integers)) => integers,
            _ => filled,
        };

        Ok(outcome)
    }
}

/// A column classified as categorical.
#[derive(Debug, Clone)]
pub struct CategoricalColumn {
    series: Series,
}

impl CategoricalColumn {
    pub fn new(series: Series) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn into_series(self) -> Series {
        self.series
    }

    /// Render every cell as text, replacing nulls with the sentinel.
    pub fn normalize(&mut self) -> PolarsResult<()> {
        self.series = CategoricalNormalizer::normalize(&self.series)?;
        Ok(())
    }

    /// Number of distinct values.
    pub fn cardinality(&self) -> PolarsResult<usize> {
        self.series.n_unique()
    }
}

/// A table whose columns have been classified.
#[derive(Debug, Clone)]
pub struct TypedTable {
    height: usize,
    columns: Vec<TypedColumn>,
}

impl TypedTable {
    pub fn new(height: usize, columns: Vec<TypedColumn>) -> Self {
        Self { height, columns }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn columns(&self) -> &[TypedColumn] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [TypedColumn] {
        &mut self.columns
    }

    /// Inferred kind of every column, in column order.
    pub fn schema(&self) -> ColumnMap<ColumnKind> {
        self.columns
            .iter()
            .map(|col| (col.name().to_string(), col.kind()))
            .collect()
    }

    /// Reassemble the columns into a DataFrame.
    pub fn into_frame(self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .into_iter()
            .map(|col| Column::from(col.into_series()))
            .collect();
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(values: &[Option<&str>]) -> NumericColumn {
        NumericColumn::new(Series::new("x".into(), values))
    }

    fn floats(series: &Series) -> Vec<Option<f64>> {
        series.f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_coerce_turns_unparseable_cells_into_nulls() {
        let mut col = numeric(&[Some("1"), Some("oops"), None, Some("2.5")]);
        let coerced = col.coerce().unwrap();

        assert_eq!(coerced, 1);
        assert_eq!(floats(col.series()), vec![Some(1.0), None, None, Some(2.5)]);
    }

    #[test]
    fn test_outliers_counted_before_imputation() {
        let mut col = numeric(&[
            Some("1"),
            Some("2"),
            Some("3"),
            Some("4"),
            Some("5"),
            Some("100"),
            None,
        ]);
        col.coerce().unwrap();
        assert_eq!(col.count_outliers().unwrap(), 1);

        let outcome = col.impute(DegeneratePolicy::Skip).unwrap();
        // median of 1..5 and 100 includes the outlier
        assert_eq!(
            outcome,
            ImputationOutcome::Imputed {
                value: 3.5,
                filled: 1
            }
        );
        assert_eq!(col.series().null_count(), 0);
    }

    #[test]
    fn test_null_free_integer_column_stays_integral() {
        let mut col = numeric(&[Some("25"), Some("30"), Some("40")]);
        col.coerce().unwrap();
        col.impute(DegeneratePolicy::Skip).unwrap();

        assert_eq!(col.series().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_large_integers_are_written_back_exactly() {
        let mut col = numeric(&[Some("9007199254740993"), Some("1")]);
        col.coerce().unwrap();
        col.impute(DegeneratePolicy::Skip).unwrap();

        let ints: Vec<Option<i64>> = col.series().i64().unwrap().into_iter().collect();
        assert_eq!(ints, vec![Some(9_007_199_254_740_993), Some(1)]);
    }

    #[test]
    fn test_mixed_literals_stay_float() {
        let mut col = numeric(&[Some("1"), Some("2.5"), Some("3")]);
        col.coerce().unwrap();
        col.impute(DegeneratePolicy::Skip).unwrap();

        assert_eq!(col.series().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_imputed_integer_column_becomes_float() {
        let mut col = numeric(&[Some("1"), None, Some("2")]);
        col.coerce().unwrap();
        col.impute(DegeneratePolicy::Skip).unwrap();

        assert_eq!(col.series().dtype(), &DataType::Float64);
        assert_eq!(floats(col.series()), vec![Some(1.0), Some(1.5), Some(2.0)]);
    }

    #[test]
    fn test_native_float_input_with_nan() {
        let series = Series::new("x".into(), &[Some(1.0), Some(f64::NAN), None, Some(3.0)]);
        let mut col = NumericColumn::new(series);

        assert_eq!(col.coerce().unwrap(), 1);
        col.impute(DegeneratePolicy::Skip).unwrap();
        assert_eq!(
            floats(col.series()),
            vec![Some(1.0), Some(2.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_categorical_normalize_and_cardinality() {
        let series = Series::new("c".into(), &[Some("a"), Some("b"), None, Some("a")]);
        let mut col = CategoricalColumn::new(series);
        col.normalize().unwrap();

        assert_eq!(col.series().null_count(), 0);
        assert_eq!(col.cardinality().unwrap(), 3);
    }

    #[test]
    fn test_typed_table_round_trips_column_order() {
        let table = TypedTable::new(
            2,
            vec![
                TypedColumn::new(Series::new("b".into(), &["x", "y"]), ColumnKind::Categorical),
                TypedColumn::new(Series::new("a".into(), &["1", "2"]), ColumnKind::Numeric),
            ],
        );
        assert_eq!(
            table.schema().keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["b", "a"]
        );

        let df = table.into_frame().unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>(),
            vec!["b", "a"]
        );
    }
}
