use crate::config::CleanupConfig;
use crate::error::{Result, ResultExt};
use crate::types::{PipelineResult, RemovalTally};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Summary Report
// ============================================================================

/// Outcome of one cleanup run, written once as `summary_report.txt`.
///
/// The JSON form carries the same fields plus a generation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Input path exactly as it was given
    pub source: String,
    /// Rows in the loaded dataset
    pub original_rows: usize,
    /// Rows written to the cleaned CSV
    pub cleaned_rows: usize,
    /// `original_rows - cleaned_rows`
    pub rows_removed: usize,
    /// Per-stage breakdown of `rows_removed`
    pub removed: RemovalTally,
    /// Local time the report was built
    pub generated_at: String,
}

impl SummaryReport {
    pub fn new(
        source: impl Into<String>,
        original_rows: usize,
        cleaned_rows: usize,
        removed: RemovalTally,
    ) -> Self {
        Self {
            source: source.into(),
            original_rows,
            cleaned_rows,
            rows_removed: original_rows.saturating_sub(cleaned_rows),
            removed,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Build the report for a finished pipeline run.
    pub fn from_result(source: impl Into<String>, result: &PipelineResult) -> Self {
        Self::new(
            source,
            result.original_count,
            result.cleaned_count,
            result.tally,
        )
    }

    /// Render the fixed eight-line text layout, newline terminated.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset cleaned: {}", self.source)?;
        writeln!(f, "Original rows: {}", self.original_rows)?;
        writeln!(f, "Cleaned rows: {}", self.cleaned_rows)?;
        writeln!(f, "Rows removed: {}", self.rows_removed)?;
        writeln!(f, "- Duplicate rows: {}", self.removed.duplicates)?;
        writeln!(f, "- Missing required fields: {}", self.removed.missing_required)?;
        writeln!(f, "- Invalid email: {}", self.removed.invalid_email)?;
        writeln!(f, "- Invalid date: {}", self.removed.invalid_date)
    }
}

// ============================================================================
// Report Generator
// ============================================================================

/// Writes the cleaned dataset and the summary report into one directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    cleaned_path: PathBuf,
    report_path: PathBuf,
}

impl ReportGenerator {
    pub fn from_config(config: &CleanupConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            cleaned_path: config.cleaned_path(),
            report_path: config.report_path(),
        }
    }

    /// Write the cleaned dataset as CSV: header row, no index column,
    /// dates as `YYYY-MM-DD`. Overwrites any previous file.
    pub fn write_cleaned_csv(&self, df: &mut DataFrame) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Creating output directory")?;

        let output_path = self.cleaned_path.clone();
        let mut file = File::create(&output_path).context("Creating cleaned dataset")?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context("Writing cleaned dataset")?;

        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Write the text summary. Overwrites any previous file.
    pub fn write_summary(&self, report: &SummaryReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Creating output directory")?;

        let report_path = self.report_path.clone();
        let mut file = File::create(&report_path).context("Creating summary report")?;
        file.write_all(report.render().as_bytes())
            .context("Writing summary report")?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write the cleaned dataset first, then the summary.
    pub fn write_outputs(
        &self,
        df: &mut DataFrame,
        report: &SummaryReport,
    ) -> Result<(PathBuf, PathBuf)> {
        let cleaned_path = self.write_cleaned_csv(df)?;
        let report_path = self.write_summary(report)?;
        Ok((cleaned_path, report_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::{DateNormalizer, RowFilter};
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::tempdir;

    fn generator_in(output_dir: &Path) -> ReportGenerator {
        let config = CleanupConfig::builder()
            .output_dir(output_dir)
            .cleaned_file_name("clean.csv")
            .report_file_name("summary.txt")
            .build()
            .unwrap();
        ReportGenerator::from_config(&config)
    }

    fn sample_report() -> SummaryReport {
        SummaryReport::new(
            "sample_data/raw_customers_small.csv",
            5,
            2,
            RemovalTally {
                duplicates: 1,
                missing_required: 0,
                invalid_email: 1,
                invalid_date: 1,
            },
        )
    }

    #[test]
    fn test_render_layout() {
        let expected = "\
Dataset cleaned: sample_data/raw_customers_small.csv
Original rows: 5
Cleaned rows: 2
Rows removed: 3
- Duplicate rows: 1
- Missing required fields: 0
- Invalid email: 1
- Invalid date: 1
";
        assert_eq!(sample_report().render(), expected);
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["rows_removed"], 3);
        assert_eq!(json["removed"]["invalid_email"], 1);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_write_outputs_creates_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("output");
        let generator = generator_in(&output_dir);

        let df = df![
            "customer_id" => [1i64, 4],
            "signup_date" => ["2024-01-01", "01/03/2024"],
        ]
        .unwrap();
        let mut df = DateNormalizer::new("signup_date").apply(df).unwrap();

        let (cleaned, summary) = generator.write_outputs(&mut df, &sample_report()).unwrap();

        let csv = fs::read_to_string(cleaned).unwrap();
        assert_eq!(csv, "customer_id,signup_date\n1,2024-01-01\n4,2024-01-03\n");

        let text = fs::read_to_string(summary).unwrap();
        assert!(text.starts_with("Dataset cleaned: sample_data/raw_customers_small.csv\n"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_write_overwrites_previous_summary() {
        let dir = tempdir().unwrap();
        let generator = generator_in(dir.path());

        fs::write(dir.path().join("summary.txt"), "stale content that is longer\n".repeat(20))
            .unwrap();
        let path = generator.write_summary(&sample_report()).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), sample_report().render());
    }
}
