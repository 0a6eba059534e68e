use crate::pipeline::PipelineStage;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Rows removed by each validation stage.
///
/// Each counter is `rows entering the stage - rows leaving it`, recorded once
/// right after the stage runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalTally {
    pub duplicates: usize,
    pub missing_required: usize,
    pub invalid_email: usize,
    pub invalid_date: usize,
}

impl RemovalTally {
    /// Record the removal count for a finished stage.
    ///
    /// `Complete` is not a filtering stage and is ignored.
    pub fn record(&mut self, stage: PipelineStage, removed: usize) {
        match stage {
            PipelineStage::Deduplication => self.duplicates = removed,
            PipelineStage::RequiredFields => self.missing_required = removed,
            PipelineStage::EmailValidation => self.invalid_email = removed,
            PipelineStage::DateNormalization => self.invalid_date = removed,
            PipelineStage::Complete => {}
        }
    }

    /// Rows removed across all stages.
    pub fn total(&self) -> usize {
        self.duplicates + self.missing_required + self.invalid_email + self.invalid_date
    }
}

/// Outcome of a pipeline run over one dataset.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Surviving rows, `signup_date` stored as `Date`.
    pub cleaned: DataFrame,
    /// Rows in the dataset handed to the pipeline.
    pub original_count: usize,
    /// Rows surviving all four stages.
    pub cleaned_count: usize,
    pub tally: RemovalTally,
    /// Wall-clock time spent in the stages.
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Rows removed overall.
    pub fn rows_removed(&self) -> usize {
        self.original_count.saturating_sub(self.cleaned_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut tally = RemovalTally::default();
        tally.record(PipelineStage::Deduplication, 1);
        tally.record(PipelineStage::EmailValidation, 2);
        tally.record(PipelineStage::DateNormalization, 3);
        tally.record(PipelineStage::Complete, 100);

        assert_eq!(tally.missing_required, 0);
        assert_eq!(tally.invalid_email, 2);
        assert_eq!(tally.total(), 6);
    }

    #[test]
    fn test_tally_json_field_names() {
        let tally = RemovalTally {
            duplicates: 1,
            missing_required: 0,
            invalid_email: 1,
            invalid_date: 1,
        };
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(
            json,
            r#"{"duplicates":1,"missing_required":0,"invalid_email":1,"invalid_date":1}"#
        );
    }

    #[test]
    fn test_rows_removed() {
        let result = PipelineResult {
            cleaned: DataFrame::empty(),
            original_count: 4,
            cleaned_count: 3,
            tally: RemovalTally::default(),
            duration_ms: 0,
        };
        assert_eq!(result.rows_removed(), 1);
    }
}
