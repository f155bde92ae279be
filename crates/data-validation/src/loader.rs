//! CSV loading.
//!
//! Every column is read as text: no value is reinterpreted before schema
//! inference gets to look at it, so the pipeline alone decides what is
//! numeric. Empty fields and the configured null markers become nulls,
//! whether or not they were quoted.

use crate::error::{Result, ValidationError};
use polars::io::csv::read::{CsvEncoding, NullValues};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Read a comma-separated, UTF-8 file with a header row into a DataFrame.
///
/// Rows with fewer fields than the header are padded with nulls.
///
/// # Errors
///
/// - [`ValidationError::InputNotFound`] if `path` is not an existing file
/// - [`ValidationError::InputUnreadable`] if the content is not valid CSV
///   (too many fields on a row, invalid UTF-8, no header, ...)
pub fn load_csv(path: impl AsRef<Path>, null_markers: &[String]) -> Result<DataFrame> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ValidationError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let null_values = if null_markers.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(
            null_markers.iter().map(|m| m.as_str().into()).collect(),
        ))
    };

    let parse_options = CsvParseOptions::default()
        .with_separator(b',')
        .with_quote_char(Some(b'"'))
        .with_encoding(CsvEncoding::Utf8)
        .with_missing_is_null(true)
        .with_null_values(null_values);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        // 0 disables dtype inference: every column is read as String
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .and_then(|df| mask_null_markers(df, null_markers))
        .map_err(|source| ValidationError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded {} with shape {:?}", path.display(), df.shape());
    Ok(df)
}

/// Null out cells equal to a marker.
///
/// The reader matches markers against raw field bytes, so quoted markers
/// such as `""` or `"NA"` reach this point as text.
fn mask_null_markers(df: DataFrame, null_markers: &[String]) -> PolarsResult<DataFrame> {
    if null_markers.is_empty() {
        return Ok(df);
    }
    let markers: HashSet<&str> = null_markers.iter().map(String::as_str).collect();

    let columns = df
        .get_columns()
        .iter()
        .map(|col| {
            let masked: StringChunked = col
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|cell| cell.filter(|value| !markers.contains(value)))
                .collect();
            Ok(Column::from(masked.with_name(col.name().clone()).into_series()))
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    DataFrame::new(columns)
}
