//! CLI entry point for the customer data cleanup pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use customer_cleanup::logging::init_logging;
use customer_cleanup::{CleanupConfig, InputSource, SamplePreset, SummaryReport, ValidationPipeline};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// CLI-compatible sample dataset selector
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPreset {
    /// sample_data/raw_customers_small.csv
    Small,
    /// sample_data/raw_customers_large.csv
    Large,
}

impl From<CliPreset> for SamplePreset {
    fn from(cli: CliPreset) -> Self {
        match cli {
            CliPreset::Small => SamplePreset::Small,
            CliPreset::Large => SamplePreset::Large,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data Cleanup and Validation Automation",
    long_about = "Removes duplicate, incomplete, and malformed rows from a customer CSV export.\n\n\
                  Writes the cleaned dataset and a summary report to the output directory,\n\
                  and appends a completion entry to the process log.\n\n\
                  EXAMPLES:\n  \
                  # Bundled small sample\n  \
                  customer-cleanup\n\n  \
                  # Bundled large sample\n  \
                  customer-cleanup --data large\n\n  \
                  # Custom file, machine-readable summary\n  \
                  customer-cleanup --file exports/customers.csv --json"
)]
struct Args {
    /// Select which sample data to process
    #[arg(long, value_enum, default_value = "small")]
    data: CliPreset,

    /// Path to a custom CSV file to clean
    ///
    /// Takes precedence over --data
    #[arg(long)]
    file: Option<PathBuf>,

    /// Directory for the cleaned CSV and summary report
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Process log that receives the completion entry (appended)
    #[arg(long, default_value = "process.log")]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the summary as JSON to stdout instead of text
    ///
    /// Disables console logs; the process log is still written.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables (RUST_LOG) from .env file
    dotenv().ok();

    let config = CleanupConfig::builder()
        .input(InputSource::resolve(args.data.into(), args.file.clone()))
        .output_dir(&args.output_dir)
        .log_file(&args.log_file)
        .build()?;

    init_logging(&args.log_level, args.quiet, !args.json, &config.log_file)?;

    if let Some(preset) = config.input.preset()
        && !args.json
    {
        println!(
            "Processing data: {} ({})",
            preset.name(),
            config.input.display_path()
        );
    }

    let pipeline = ValidationPipeline::builder()
        .config(config)
        .on_progress(|update| debug!("[{:.0}%] {}", update.progress * 100.0, update.message))
        .build()?;

    run_pipeline(&pipeline, &args)
}

fn run_pipeline(pipeline: &ValidationPipeline, args: &Args) -> Result<()> {
    info!("{}", "=".repeat(80));
    info!("Starting customer data cleanup...");
    info!("{}", "=".repeat(80));

    match pipeline.run() {
        Ok(report) => handle_report(&report, pipeline, args),
        Err(e) => {
            if e.is_input_error() {
                error!("Input rejected: {}", e);
            } else {
                error!("Cleanup failed: {}", e);
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&e)?);
            }
            Err(anyhow!("Cleanup failed: {}", e))
        }
    }
}

/// Print the summary.
///
/// Output behavior:
/// - Default: the text report framed for the terminal
/// - `--json`: the report as JSON, nothing else on stdout
fn handle_report(report: &SummaryReport, pipeline: &ValidationPipeline, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("CLEANUP SUMMARY");
    println!("{}", "=".repeat(80));
    print!("{}", report.render());
    println!("{}", "=".repeat(80));
    println!(
        "Outputs written to: {}",
        pipeline.config().output_dir.display()
    );

    Ok(())
}
