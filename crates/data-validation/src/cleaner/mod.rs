//! Data cleaning module.
//!
//! This module provides:
//! - Exact duplicate row removal
//! - Categorical normalization (text rendering with a missing sentinel)

mod categorical;

pub use categorical::{CategoricalNormalizer, MISSING_SENTINEL};

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use tracing::debug;

/// Data cleaner for row-level cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Drop every row that exactly repeats an earlier row.
    ///
    /// Two rows are duplicates when every cell matches, with null equal to
    /// null. The first occurrence is kept and row order is preserved.
    /// Returns the deduplicated table and the number of rows removed.
    pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        if df.width() == 0 || before < 2 {
            return Ok((df, 0));
        }

        let deduped = df
            .unique_stable(None, UniqueKeepStrategy::First, None)
            .context("Failed to remove duplicate rows")?;
        let removed = before - deduped.height();

        if removed > 0 {
            let pct = (removed as f64 / before as f64) * 100.0;
            debug!("Removed {} duplicate rows ({:.1}%)", removed, pct);
        } else {
            debug!("No duplicate rows found");
        }

        Ok((deduped, removed))
    }
}
