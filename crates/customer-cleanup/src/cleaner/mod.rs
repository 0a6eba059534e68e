//! Row-level validation stages.
//!
//! Each stage is a [`RowFilter`]: it takes the survivors of the previous
//! stage and returns a subset of them, in the same relative order. Rows that
//! fail a check are dropped silently; only a missing column is an error.
//!
//! - [`Deduplicator`]: keep the first occurrence of each identical row
//! - [`RequiredFieldFilter`]: drop rows with a null or empty required field
//! - [`EmailFormatFilter`]: drop rows whose email fails the pattern
//! - [`DateNormalizer`]: parse dates, drop failures, rewrite as `Date`

pub mod dates;
pub mod email;
pub mod sanitizers;

pub use dates::{normalize_date_series, parse_date};
pub use email::{email_mask, is_valid_email};
pub use sanitizers::{MISSING_MARKERS, is_missing_marker, replace_missing_markers};

use crate::config::CleanupConfig;
use crate::error::Result;
use crate::pipeline::PipelineStage;
use crate::utils::{present_mask, require_series};
use polars::prelude::*;

/// A single validation stage over the working dataset.
pub trait RowFilter: Send + Sync {
    /// Which pipeline stage this filter implements.
    fn stage(&self) -> PipelineStage;

    /// Name used in logs and error context.
    fn name(&self) -> &'static str {
        self.stage().display_name()
    }

    /// Return the rows of `df` that pass this stage.
    fn apply(&self, df: DataFrame) -> Result<DataFrame>;
}

/// Removes rows identical in every column to an earlier row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator;

impl RowFilter for Deduplicator {
    fn stage(&self) -> PipelineStage {
        PipelineStage::Deduplication
    }

    fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        if df.width() == 0 || df.height() < 2 {
            return Ok(df);
        }
        // Stable variant keeps survivors in input order
        Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
    }
}

/// Removes rows where any of the configured columns is null or empty.
#[derive(Debug, Clone)]
pub struct RequiredFieldFilter {
    columns: Vec<String>,
}

impl RequiredFieldFilter {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl RowFilter for RequiredFieldFilter {
    fn stage(&self) -> PipelineStage {
        PipelineStage::RequiredFields
    }

    fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        let mut keep: Option<BooleanChunked> = None;

        for column in &self.columns {
            let present = present_mask(require_series(&df, column)?)?;
            keep = Some(match keep {
                Some(mask) => &mask & &present,
                None => present,
            });
        }

        match keep {
            Some(mask) => Ok(df.filter(&mask)?),
            None => Ok(df),
        }
    }
}

/// Removes rows whose email, rendered as text, fails the email pattern.
#[derive(Debug, Clone)]
pub struct EmailFormatFilter {
    column: String,
}

impl EmailFormatFilter {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl RowFilter for EmailFormatFilter {
    fn stage(&self) -> PipelineStage {
        PipelineStage::EmailValidation
    }

    fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        let mask = email_mask(require_series(&df, &self.column)?)?;
        Ok(df.filter(&mask)?)
    }
}

/// Parses the date column, drops unparseable rows and stores survivors as `Date`.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    column: String,
}

impl DateNormalizer {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl RowFilter for DateNormalizer {
    fn stage(&self) -> PipelineStage {
        PipelineStage::DateNormalization
    }

    fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        let normalized = normalize_date_series(require_series(&df, &self.column)?)?;
        let parsed = normalized.is_not_null();

        let mut df = df;
        df.replace(&self.column, normalized)?;
        Ok(df.filter(&parsed)?)
    }
}

/// The four stages in execution order for the given configuration.
pub fn standard_filters(config: &CleanupConfig) -> Vec<Box<dyn RowFilter>> {
    vec![
        Box::new(Deduplicator),
        Box::new(RequiredFieldFilter::new(config.required_columns())),
        Box::new(EmailFormatFilter::new(&config.email_column)),
        Box::new(DateNormalizer::new(&config.date_column)),
    ]
}
