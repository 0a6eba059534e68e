//! Report generation module.
//!
//! This module writes the two run outputs: the cleaned dataset as CSV and the
//! plain-text [`SummaryReport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use customer_cleanup::CleanupConfig;
//! use customer_cleanup::reporting::{ReportGenerator, SummaryReport};
//!
//! let report = SummaryReport::from_result("data/customers.csv", &result);
//! println!("{}", report.render());
//!
//! let generator = ReportGenerator::from_config(&CleanupConfig::default());
//! generator.write_outputs(&mut result.cleaned, &report)?;
//! ```

mod generator;

pub use generator::{ReportGenerator, SummaryReport};
