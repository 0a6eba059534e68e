//! Customer Data Cleanup Library
//!
//! Batch validation of raw customer CSV exports built with Rust and Polars.
//!
//! # Overview
//!
//! A raw dataset flows through four stages, each operating on the survivors
//! of the previous one:
//!
//! - **Deduplication**: rows identical in every column are collapsed to their
//!   first occurrence
//! - **Required fields**: rows with a null or empty `customer_id`, `email` or
//!   `signup_date` are dropped
//! - **Email format**: rows whose email does not look like `local@domain.tld`
//!   are dropped
//! - **Date normalization**: `signup_date` is parsed from a range of common
//!   layouts and rewritten as a `Date`; unparseable rows are dropped
//!
//! The number of rows each stage removes is tallied and written alongside the
//! cleaned dataset as a plain-text summary.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use customer_cleanup::{CleanupConfig, ValidationPipeline, load_csv};
//! use std::path::Path;
//!
//! let df = load_csv(Path::new("sample_data/raw_customers_small.csv"))?;
//!
//! let result = ValidationPipeline::builder()
//!     .config(CleanupConfig::default())
//!     .on_progress(|update| println!("{}", update.message))
//!     .build()?
//!     .process(df)?;
//!
//! println!("Kept {} of {} rows", result.cleaned_count, result.original_count);
//! println!("Invalid emails: {}", result.tally.invalid_email);
//! ```
//!
//! To load, validate and write both outputs in one call, use
//! [`ValidationPipeline::run`].
//!
//! # Configuration
//!
//! Use [`CleanupConfig`] to pick the input and output locations:
//!
//! ```rust,ignore
//! use customer_cleanup::config::*;
//!
//! let config = CleanupConfig::builder()
//!     .input(InputSource::File("exports/customers.csv".into()))
//!     .output_dir("cleaned")
//!     .build()?;
//! ```
//!
//! # Modules
//!
//! - [`cleaner`]: the individual validation stages
//! - [`pipeline`]: the pipeline and progress reporting
//! - [`reporting`]: cleaned CSV and summary report output
//! - [`logging`]: console and process-log setup
//! - [`config`]: configuration types
//! - [`error`]: error types

pub mod cleaner;
pub mod config;
pub mod error;
pub mod file_io;
pub mod logging;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use cleaner::{
    DateNormalizer, Deduplicator, EmailFormatFilter, RequiredFieldFilter, RowFilter,
    is_valid_email, parse_date,
};
pub use config::{CleanupConfig, CleanupConfigBuilder, ConfigValidationError, InputSource, SamplePreset};
pub use error::{CleanupError, Result, ResultExt};
pub use file_io::load_csv;
pub use pipeline::{
    ClosureProgressReporter, PipelineBuilder, PipelineStage, ProgressReporter, ProgressUpdate,
    ValidationPipeline,
};
pub use reporting::{ReportGenerator, SummaryReport};
pub use types::{PipelineResult, RemovalTally};
