//! Stage identifiers and progress reporting for the validation pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use customer_cleanup::ValidationPipeline;
//!
//! let result = ValidationPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{}] removed {}", update.stage.display_name(), update.removed);
//!     })
//!     .build()?
//!     .process(df)?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the validation pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Removing exact duplicate rows
    Deduplication,
    /// Dropping rows with missing required fields
    RequiredFields,
    /// Dropping rows with malformed emails
    EmailValidation,
    /// Parsing and normalizing signup dates
    DateNormalization,
    /// Pipeline finished
    Complete,
}

impl PipelineStage {
    /// The four filtering stages, in the order they run.
    pub const FILTERS: [PipelineStage; 4] = [
        Self::Deduplication,
        Self::RequiredFields,
        Self::EmailValidation,
        Self::DateNormalization,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Deduplication => "Removing Duplicates",
            Self::RequiredFields => "Checking Required Fields",
            Self::EmailValidation => "Validating Emails",
            Self::DateNormalization => "Normalizing Dates",
            Self::Complete => "Complete",
        }
    }

    /// Overall progress once this stage has finished.
    pub fn completed_progress(&self) -> f32 {
        Self::FILTERS
            .iter()
            .position(|stage| stage == self)
            .map_or(1.0, |index| (index + 1) as f32 / Self::FILTERS.len() as f32)
    }
}

/// Progress update emitted after each stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Stage that just finished
    pub stage: PipelineStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Rows entering the stage
    pub rows_before: usize,

    /// Rows surviving the stage
    pub rows_after: usize,

    /// Rows removed by the stage
    pub removed: usize,

    /// Human-readable message
    pub message: String,
}

impl ProgressUpdate {
    /// Creates an update for a finished stage.
    pub fn stage_finished(stage: PipelineStage, rows_before: usize, rows_after: usize) -> Self {
        let removed = rows_before.saturating_sub(rows_after);
        Self {
            stage,
            progress: stage.completed_progress(),
            rows_before,
            rows_after,
            removed,
            message: format!(
                "{}: {} -> {} rows ({} removed)",
                stage.display_name(),
                rows_before,
                rows_after,
                removed
            ),
        }
    }

    /// Creates the final update.
    pub fn complete(original_rows: usize, cleaned_rows: usize) -> Self {
        let removed = original_rows.saturating_sub(cleaned_rows);
        Self {
            stage: PipelineStage::Complete,
            progress: 1.0,
            rows_before: original_rows,
            rows_after: cleaned_rows,
            removed,
            message: format!(
                "Validation complete: {} of {} rows kept",
                cleaned_rows, original_rows
            ),
        }
    }
}

/// Receives progress updates from the pipeline.
///
/// Implementations must be `Send + Sync` so the pipeline itself stays `Send`.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_stage_finished_counts() {
        let update = ProgressUpdate::stage_finished(PipelineStage::EmailValidation, 10, 7);
        assert_eq!(update.removed, 3);
        assert_eq!(update.progress, 0.75);
        assert_eq!(update.message, "Validating Emails: 10 -> 7 rows (3 removed)");
    }

    #[test]
    fn test_complete_update() {
        let update = ProgressUpdate::complete(5, 2);
        assert_eq!(update.stage, PipelineStage::Complete);
        assert_eq!(update.removed, 3);
        assert_eq!(update.progress, 1.0);
    }

    #[test]
    fn test_filter_stages_progress_increases() {
        let progress: Vec<f32> = PipelineStage::FILTERS
            .iter()
            .map(|s| s.completed_progress())
            .collect();
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(progress.last(), Some(&1.0));
    }

    #[test]
    fn test_stage_json_values() {
        let expectations = [
            (PipelineStage::Deduplication, "\"deduplication\""),
            (PipelineStage::RequiredFields, "\"required_fields\""),
            (PipelineStage::EmailValidation, "\"email_validation\""),
            (PipelineStage::DateNormalization, "\"date_normalization\""),
            (PipelineStage::Complete, "\"complete\""),
        ];

        for (stage, expected) in expectations {
            let json = serde_json::to_string(&stage).expect("Should serialize");
            assert_eq!(json, expected, "PipelineStage::{:?}", stage);
        }
    }

    #[test]
    fn test_closure_reporter_across_threads() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = Arc::new(ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let reporter_clone = reporter.clone();
        let handle = std::thread::spawn(move || {
            reporter_clone.report(ProgressUpdate::stage_finished(
                PipelineStage::Deduplication,
                4,
                3,
            ));
        });

        handle.join().expect("Thread should not panic");
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
