//! Data profiling module.
//!
//! This module provides the two read-mostly stages of the pipeline:
//! - Missing-value accounting on the table as loaded
//! - Schema inference, which classifies every column and hands the table
//!   over as typed columns

mod type_inference;

pub use type_inference::InferencePolicy;

use crate::column::{TypedColumn, TypedTable};
use crate::error::Result;
use crate::types::ColumnMap;
use polars::prelude::*;
use tracing::debug;

/// Data profiler for the accounting and classification stages.
pub struct DataProfiler;

impl DataProfiler {
    /// Count null cells per column.
    ///
    /// Run this on the table exactly as loaded, before deduplication, so the
    /// counts describe the input file.
    pub fn missing_values(df: &DataFrame) -> ColumnMap<usize> {
        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }

    /// Classify every column and take ownership of the table as typed columns.
    pub fn infer_schema(df: DataFrame, policy: &InferencePolicy) -> Result<TypedTable> {
        let height = df.height();
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series().clone();
            let kind = policy.classify(&series)?;
            debug!("  {}: {}", series.name(), kind);
            columns.push(TypedColumn::new(series, kind));
        }

        Ok(TypedTable::new(height, columns))
    }
}
