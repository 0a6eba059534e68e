//! Loading the raw customer CSV.

use crate::cleaner::replace_missing_markers;
use crate::error::{CleanupError, Result, ResultExt};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Load a CSV file with a header row into a [`DataFrame`].
///
/// Every row is scanned for schema inference, so a late non-numeric value
/// keeps its column textual instead of failing the read. Missing-value
/// markers in string columns are then replaced with null.
///
/// # Errors
///
/// Returns [`CleanupError::InputNotFound`] if `path` is not an existing file;
/// read and parse failures carry the path as context.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(CleanupError::InputNotFound(path.display().to_string()));
    }

    let context = format!("Reading {}", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(context.as_str())?
        .finish()
        .context(context.as_str())?;

    let (df, replaced) = replace_missing_markers(df)?;
    debug!(
        "Loaded {} rows x {} columns ({} missing markers)",
        df.height(),
        df.width(),
        replaced
    );

    Ok(df)
}
