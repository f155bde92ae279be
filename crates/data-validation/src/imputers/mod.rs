//! Imputation module for handling missing values.
//!
//! Numeric columns are filled with their median; see [`StatisticalImputer`].

mod statistical;

pub use statistical::{EMPTY_COLUMN_REASON, NO_VALUES_REASON, StatisticalImputer};
