//! Missing-value marker handling for freshly loaded data.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Text values that mean "no value" when they make up an entire field.
///
/// Matching is exact and case-sensitive (`"NA"` is missing, `"na"` is not),
/// covering the placeholders common in spreadsheet and database exports.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check whether a raw field value is a missing-value marker.
#[inline]
pub fn is_missing_marker(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Replace missing-value markers with null in every string column, and NaN
/// with null in every float column.
///
/// Returns the updated frame and the number of values replaced.
pub fn replace_missing_markers(df: DataFrame) -> Result<(DataFrame, usize)> {
    let mut df = df;
    let column_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let mut total_replacements = 0;

    for col_name in &column_names {
        let series = df.column(col_name)?.as_materialized_series();
        let (cleaned, count) = match series.dtype() {
            DataType::String => null_out_markers(series)?,
            dtype if dtype.is_float() => null_out_nan(series)?,
            _ => continue,
        };
        if count > 0 {
            debug!("Column '{}': {} missing markers set to null", col_name, count);
            total_replacements += count;
            df.replace(col_name, cleaned)?;
        }
    }

    Ok((df, total_replacements))
}

fn null_out_markers(series: &Series) -> Result<(Series, usize)> {
    let values = series.str()?;
    let mut cleaned = Vec::with_capacity(values.len());
    let mut count = 0;

    for value in values.into_iter() {
        match value {
            Some(text) if is_missing_marker(text) => {
                cleaned.push(None);
                count += 1;
            }
            other => cleaned.push(other),
        }
    }

    Ok((Series::new(series.name().clone(), cleaned), count))
}

/// A `NaN` marker in an otherwise numeric column is read as a float NaN.
fn null_out_nan(series: &Series) -> Result<(Series, usize)> {
    let values = series.cast(&DataType::Float64)?;
    let values = values.f64()?;
    let count = values
        .into_iter()
        .filter(|value| value.is_some_and(f64::is_nan))
        .count();
    if count == 0 {
        return Ok((series.clone(), 0));
    }

    let cleaned: Vec<Option<f64>> = values
        .into_iter()
        .map(|value| value.filter(|number| !number.is_nan()))
        .collect();
    let cleaned = Series::new(series.name().clone(), cleaned).cast(series.dtype())?;
    Ok((cleaned, count))
}
