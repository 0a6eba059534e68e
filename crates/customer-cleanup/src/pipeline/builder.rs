//! The validation pipeline and its builder.

use crate::cleaner::{RowFilter, standard_filters};
use crate::config::CleanupConfig;
use crate::error::{Result, ResultExt};
use crate::file_io::load_csv;
use crate::logging::log_completion;
use crate::pipeline::progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate};
use crate::reporting::{ReportGenerator, SummaryReport};
use crate::types::{PipelineResult, RemovalTally};
use crate::utils::rows_removed;
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Deduplicate, check required fields, check emails, normalize dates.
///
/// Stages run strictly in that order, each on the survivors of the previous
/// one. Use [`ValidationPipeline::builder()`] to construct one.
///
/// # Example
///
/// ```rust,ignore
/// use customer_cleanup::{CleanupConfig, ValidationPipeline};
///
/// let pipeline = ValidationPipeline::builder()
///     .config(CleanupConfig::default())
///     .on_progress(|update| println!("{}", update.message))
///     .build()?;
///
/// let result = pipeline.process(df)?;
/// println!("{} rows kept", result.cleaned_count);
/// ```
pub struct ValidationPipeline {
    config: CleanupConfig,
    filters: Vec<Box<dyn RowFilter>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// Built once in main and handed around by value
static_assertions::assert_impl_all!(ValidationPipeline: Send);

impl ValidationPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Configuration the pipeline was built with.
    pub fn config(&self) -> &CleanupConfig {
        &self.config
    }

    /// Run the four validation stages over an in-memory dataset.
    ///
    /// # Errors
    ///
    /// Fails with `ColumnNotFound` if a required column is absent. Rows with
    /// malformed values are never an error; they are dropped and counted.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let original_count = df.height();
        let mut tally = RemovalTally::default();
        let mut df = df;

        debug!("Validating {} rows", original_count);

        for filter in &self.filters {
            let stage = filter.stage();
            let rows_before = df.height();

            df = filter.apply(df).context(filter.name())?;

            let rows_after = df.height();
            tally.record(stage, rows_removed(rows_before, rows_after));
            debug!("{}: {} -> {} rows", filter.name(), rows_before, rows_after);
            self.report_progress(ProgressUpdate::stage_finished(stage, rows_before, rows_after));
        }

        let cleaned_count = df.height();
        debug!("Removed {} of {} rows", tally.total(), original_count);
        self.report_progress(ProgressUpdate::complete(original_count, cleaned_count));

        Ok(PipelineResult {
            cleaned: df,
            original_count,
            cleaned_count,
            tally,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Load the configured input, validate it and write both output files.
    ///
    /// Nothing is written unless every stage succeeds. The completion entry
    /// is logged only after both files are on disk.
    pub fn run(&self) -> Result<SummaryReport> {
        let input_path = self.config.input.path();
        info!("Loading dataset from: {}", input_path.display());
        let df = load_csv(&input_path)?;
        info!("Dataset loaded: {:?}", df.shape());

        let mut result = self.process(df)?;
        let report = SummaryReport::from_result(self.config.input.display_path(), &result);

        let generator = ReportGenerator::from_config(&self.config);
        generator.write_outputs(&mut result.cleaned, &report)?;

        log_completion();
        Ok(report)
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for [`ValidationPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleanupConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the configuration (defaults to [`CleanupConfig::default()`]).
    pub fn config(mut self, config: CleanupConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Receive progress updates through a closure.
    pub fn on_progress<F>(self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter(Arc::new(ClosureProgressReporter::new(callback)))
    }

    /// Validate the configuration and build the pipeline.
    pub fn build(self) -> Result<ValidationPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(ValidationPipeline {
            filters: standard_filters(&config),
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanupError;
    use crate::pipeline::PipelineStage;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn scenario() -> DataFrame {
        df![
            "customer_id" => [1i64, 1, 2, 3, 4],
            "email" => ["a@b.com", "a@b.com", "bad", "c@d.com", "e@f.com"],
            "signup_date" => ["2024-01-01", "2024-01-01", "2024-01-02", "not-a-date", "2024-01-03"],
        ]
        .unwrap()
    }

    #[test]
    fn test_process_scenario() {
        let pipeline = ValidationPipeline::builder().build().unwrap();
        let result = pipeline.process(scenario()).unwrap();

        assert_eq!(result.original_count, 5);
        assert_eq!(result.cleaned_count, 2);
        assert_eq!(
            result.tally,
            RemovalTally {
                duplicates: 1,
                missing_required: 0,
                invalid_email: 1,
                invalid_date: 1,
            }
        );
        assert_eq!(result.tally.total(), result.rows_removed());
    }

    #[test]
    fn test_progress_reported_per_stage() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let pipeline = ValidationPipeline::builder()
            .on_progress(move |update| {
                seen_clone.lock().unwrap().push((update.stage, update.removed));
            })
            .build()
            .unwrap();
        pipeline.process(scenario()).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (PipelineStage::Deduplication, 1),
                (PipelineStage::RequiredFields, 0),
                (PipelineStage::EmailValidation, 1),
                (PipelineStage::DateNormalization, 1),
                (PipelineStage::Complete, 3),
            ]
        );
    }

    #[test]
    fn test_missing_column_aborts() {
        let df = df![
            "customer_id" => [1i64],
            "email" => ["a@b.com"],
        ]
        .unwrap();

        let pipeline = ValidationPipeline::builder().build().unwrap();
        let err = pipeline.process(df).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
        assert!(err.to_string().contains("Checking Required Fields"));
    }

    #[test]
    fn test_empty_dataset() {
        let df = df![
            "customer_id" => Vec::<i64>::new(),
            "email" => Vec::<String>::new(),
            "signup_date" => Vec::<String>::new(),
        ]
        .unwrap();

        let result = ValidationPipeline::builder()
            .build()
            .unwrap()
            .process(df)
            .unwrap();
        assert_eq!(result.cleaned_count, 0);
        assert_eq!(result.tally, RemovalTally::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CleanupConfig::default();
        config.email_column = String::new();

        let err = ValidationPipeline::builder().config(config).build().err();
        assert!(matches!(err, Some(CleanupError::InvalidConfig(_))));
    }

    #[test]
    fn test_custom_column_names() {
        let df = df![
            "id" => [1i64, 2],
            "contact" => ["a@b.com", "nope"],
            "joined" => ["2024-05-01", "2024-05-02"],
        ]
        .unwrap();

        let config = CleanupConfig::builder()
            .id_column("id")
            .email_column("contact")
            .date_column("joined")
            .build()
            .unwrap();

        let result = ValidationPipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .process(df)
            .unwrap();
        assert_eq!(result.cleaned_count, 1);
        assert_eq!(result.tally.invalid_email, 1);
    }
}
