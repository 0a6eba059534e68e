//! Pipeline module.
//!
//! This module provides the validation pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{PipelineBuilder, ValidationPipeline};
pub use progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};
