//! Configuration types for the customer cleanup pipeline.
//!
//! The input selection (bundled preset or explicit file) is resolved once at
//! process start into an [`InputSource`] and carried by value inside
//! [`CleanupConfig`]. Use the builder for anything beyond the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bundled sample datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SamplePreset {
    /// `sample_data/raw_customers_small.csv`
    #[default]
    Small,
    /// `sample_data/raw_customers_large.csv`
    Large,
}

impl SamplePreset {
    /// Preset name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }

    /// Path of the bundled file, relative to the working directory.
    pub fn path(&self) -> PathBuf {
        match self {
            Self::Small => PathBuf::from("sample_data/raw_customers_small.csv"),
            Self::Large => PathBuf::from("sample_data/raw_customers_large.csv"),
        }
    }
}

/// Where the raw dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Preset(SamplePreset),
    File(PathBuf),
}

impl Default for InputSource {
    fn default() -> Self {
        InputSource::Preset(SamplePreset::default())
    }
}

impl InputSource {
    /// Resolve the input from a preset choice and an optional file override.
    ///
    /// The explicit file always wins over the preset.
    pub fn resolve(preset: SamplePreset, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => InputSource::File(path),
            None => InputSource::Preset(preset),
        }
    }

    /// Path of the CSV file to load.
    pub fn path(&self) -> PathBuf {
        match self {
            Self::Preset(preset) => preset.path(),
            Self::File(path) => path.clone(),
        }
    }

    /// Source path as it appears in the summary report.
    pub fn display_path(&self) -> String {
        self.path().display().to_string()
    }

    /// The preset, if the input was selected by name.
    pub fn preset(&self) -> Option<SamplePreset> {
        match self {
            Self::Preset(preset) => Some(*preset),
            Self::File(_) => None,
        }
    }
}

/// Configuration for a cleanup run.
///
/// # Example
///
/// ```rust,ignore
/// use customer_cleanup::config::{CleanupConfig, InputSource};
///
/// let config = CleanupConfig::builder()
///     .input(InputSource::File("customers.csv".into()))
///     .output_dir("out")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Dataset to clean.
    /// Default: the `small` preset
    pub input: InputSource,

    /// Customer identifier column (required).
    /// Default: "customer_id"
    pub id_column: String,

    /// Email column (required, pattern-checked).
    /// Default: "email"
    pub email_column: String,

    /// Signup date column (required, normalized to a date).
    /// Default: "signup_date"
    pub date_column: String,

    /// Directory receiving the cleaned CSV and the summary report.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// File name of the cleaned CSV inside `output_dir`.
    /// Default: "clean_customers.csv"
    pub cleaned_file_name: String,

    /// File name of the text summary inside `output_dir`.
    /// Default: "summary_report.txt"
    pub report_file_name: String,

    /// Append-only log file for the completion entry.
    /// Default: "process.log"
    pub log_file: PathBuf,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            input: InputSource::default(),
            id_column: "customer_id".to_string(),
            email_column: "email".to_string(),
            date_column: "signup_date".to_string(),
            output_dir: PathBuf::from("output"),
            cleaned_file_name: "clean_customers.csv".to_string(),
            report_file_name: "summary_report.txt".to_string(),
            log_file: PathBuf::from("process.log"),
        }
    }
}

impl CleanupConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanupConfigBuilder {
        CleanupConfigBuilder::default()
    }

    /// Columns that must be present and non-empty, in check order.
    pub fn required_columns(&self) -> [&str; 3] {
        [
            self.id_column.as_str(),
            self.email_column.as_str(),
            self.date_column.as_str(),
        ]
    }

    /// Full path of the cleaned CSV.
    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }

    /// Full path of the text summary.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("id_column", &self.id_column),
            ("email_column", &self.email_column),
            ("date_column", &self.date_column),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
        }

        for (field, value) in [
            ("cleaned_file_name", &self.cleaned_file_name),
            ("report_file_name", &self.report_file_name),
        ] {
            if !is_plain_file_name(value) {
                return Err(ConfigValidationError::InvalidFileName {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }

        if self.cleaned_file_name == self.report_file_name {
            return Err(ConfigValidationError::OutputCollision(
                self.cleaned_file_name.clone(),
            ));
        }

        if self.log_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyLogFile);
        }

        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.trim().is_empty()
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),

    #[error("Invalid file name for '{field}': '{value}' (must be a bare file name)")]
    InvalidFileName { field: String, value: String },

    #[error("Cleaned data and summary report would both be written to '{0}'")]
    OutputCollision(String),

    #[error("Log file path must not be empty")]
    EmptyLogFile,
}

/// Builder for [`CleanupConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanupConfigBuilder {
    input: Option<InputSource>,
    id_column: Option<String>,
    email_column: Option<String>,
    date_column: Option<String>,
    output_dir: Option<PathBuf>,
    cleaned_file_name: Option<String>,
    report_file_name: Option<String>,
    log_file: Option<PathBuf>,
}

impl CleanupConfigBuilder {
    /// Set the dataset to clean.
    pub fn input(mut self, input: InputSource) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the customer identifier column.
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    /// Set the email column.
    pub fn email_column(mut self, column: impl Into<String>) -> Self {
        self.email_column = Some(column.into());
        self
    }

    /// Set the signup date column.
    pub fn date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = Some(column.into());
        self
    }

    /// Set the output directory for the cleaned CSV and summary report.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the cleaned CSV file name.
    pub fn cleaned_file_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_file_name = Some(name.into());
        self
    }

    /// Set the summary report file name.
    pub fn report_file_name(mut self, name: impl Into<String>) -> Self {
        self.report_file_name = Some(name.into());
        self
    }

    /// Set the append-only log file.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanupConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanupConfig, ConfigValidationError> {
        let defaults = CleanupConfig::default();
        let config = CleanupConfig {
            input: self.input.unwrap_or(defaults.input),
            id_column: self.id_column.unwrap_or(defaults.id_column),
            email_column: self.email_column.unwrap_or(defaults.email_column),
            date_column: self.date_column.unwrap_or(defaults.date_column),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            cleaned_file_name: self.cleaned_file_name.unwrap_or(defaults.cleaned_file_name),
            report_file_name: self.report_file_name.unwrap_or(defaults.report_file_name),
            log_file: self.log_file.unwrap_or(defaults.log_file),
        };

        config.validate()?;
        Ok(config)
    }
}
