//! Email format check.
//!
//! The pattern is loose: one `@`, at least one `.` after it, and no `@`
//! anywhere else. Case and whitespace are not special.

use crate::error::Result;
use crate::utils::stringify_series;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("Invalid regex: email"));

/// Check a single textual value against the email pattern.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Mask that is `true` for rows whose value, rendered as text, is a valid email.
///
/// Non-string columns are stringified first; nulls never match.
pub fn email_mask(series: &Series) -> Result<BooleanChunked> {
    let text = stringify_series(series)?;
    let values = text.str()?;
    let mask: BooleanChunked = values
        .into_iter()
        .map(|value| value.is_some_and(is_valid_email))
        .collect();
    Ok(mask)
}
