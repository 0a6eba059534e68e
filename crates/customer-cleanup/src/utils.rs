//! Shared polars helpers used by the validation stages.

use crate::error::{CleanupError, Result};
use polars::prelude::*;

/// Look up a column by name, failing with [`CleanupError::ColumnNotFound`].
pub fn require_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|column| column.as_materialized_series())
        .map_err(|_| CleanupError::ColumnNotFound(name.to_string()))
}

/// Coerce any series to its textual representation.
///
/// Strings are returned as-is; every other dtype goes through a polars cast,
/// so integers become `"42"`, floats `"1.5"`, dates `"2024-01-15"`.
/// Nulls stay null.
pub fn stringify_series(series: &Series) -> Result<Series> {
    if series.dtype() == &DataType::String {
        return Ok(series.clone());
    }
    Ok(series.cast(&DataType::String)?)
}

/// Mask that is `true` where a value is present.
///
/// Null is missing for every dtype. An empty string is also missing for
/// string columns, and NaN for float columns.
pub fn present_mask(series: &Series) -> Result<BooleanChunked> {
    let dtype = series.dtype();
    if dtype == &DataType::String {
        let values = series.str()?;
        let mask: BooleanChunked = values
            .into_iter()
            .map(|value| matches!(value, Some(text) if !text.is_empty()))
            .collect();
        Ok(mask)
    } else if dtype.is_float() {
        let values = series.cast(&DataType::Float64)?;
        let mask: BooleanChunked = values
            .f64()?
            .into_iter()
            .map(|value| matches!(value, Some(number) if !number.is_nan()))
            .collect();
        Ok(mask)
    } else {
        Ok(series.is_not_null())
    }
}

/// Number of rows dropped between two row counts.
#[inline]
pub fn rows_removed(before: usize, after: usize) -> usize {
    before.saturating_sub(after)
}
