//! The validation report.

use crate::error::{Result, ValidationError};
use crate::types::{ColumnKind, ColumnMap, ImputationOutcome};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Data-quality findings of one run.
///
/// Field order is the key order of the serialized report. The file carries
/// exactly five sections; per-column imputation outcomes stay in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Null cells per column, counted on the table as loaded.
    pub missing_values: ColumnMap<usize>,
    /// Rows removed as exact duplicates of an earlier row.
    pub duplicate_rows: usize,
    /// Inferred kind of every column.
    pub inferred_schema: ColumnMap<ColumnKind>,
    /// IQR outlier count per numeric column, taken before imputation.
    pub outliers: ColumnMap<usize>,
    /// Distinct values per categorical column, after normalization.
    pub categorical_cardinality: ColumnMap<usize>,
    /// What imputation did to each numeric column.
    #[serde(skip)]
    pub imputation: ColumnMap<ImputationOutcome>,
}

impl ValidationReport {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::default()
    }

    /// Total null cells across all columns of the loaded table.
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }

    /// Serialize as pretty-printed JSON indented by `indent` spaces.
    pub fn to_json_bytes(&self, indent: usize) -> Result<Vec<u8>> {
        let indent = vec![b' '; indent];
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        self.serialize(&mut ser)?;
        Ok(buf)
    }

    pub fn to_json(&self, indent: usize) -> Result<String> {
        let bytes = self.to_json_bytes(indent)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Collects report sections as the stages produce them.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    missing_values: Option<ColumnMap<usize>>,
    duplicate_rows: Option<usize>,
    inferred_schema: Option<ColumnMap<ColumnKind>>,
    outliers: ColumnMap<usize>,
    categorical_cardinality: ColumnMap<usize>,
    imputation: ColumnMap<ImputationOutcome>,
}

impl ReportBuilder {
    pub fn missing_values(mut self, missing: ColumnMap<usize>) -> Self {
        self.missing_values = Some(missing);
        self
    }

    pub fn duplicate_rows(mut self, count: usize) -> Self {
        self.duplicate_rows = Some(count);
        self
    }

    pub fn inferred_schema(mut self, schema: ColumnMap<ColumnKind>) -> Self {
        self.inferred_schema = Some(schema);
        self
    }

    pub fn outliers(mut self, column: impl Into<String>, count: usize) -> Self {
        self.outliers.insert(column.into(), count);
        self
    }

    pub fn cardinality(mut self, column: impl Into<String>, count: usize) -> Self {
        self.categorical_cardinality.insert(column.into(), count);
        self
    }

    pub fn imputation(mut self, column: impl Into<String>, outcome: ImputationOutcome) -> Self {
        self.imputation.insert(column.into(), outcome);
        self
    }

    /// Assemble the report.
    ///
    /// The per-column numeric and categorical sections may legitimately be
    /// empty; the table-wide sections may not.
    pub fn build(self) -> Result<ValidationReport> {
        Ok(ValidationReport {
            missing_values: self
                .missing_values
                .ok_or(ValidationError::ReportIncomplete("missing_values"))?,
            duplicate_rows: self
                .duplicate_rows
                .ok_or(ValidationError::ReportIncomplete("duplicate_rows"))?,
            inferred_schema: self
                .inferred_schema
                .ok_or(ValidationError::ReportIncomplete("inferred_schema"))?,
            outliers: self.outliers,
            categorical_cardinality: self.categorical_cardinality,
            imputation: self.imputation,
        })
    }
}
