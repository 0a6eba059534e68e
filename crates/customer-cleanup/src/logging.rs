//! Logging setup.
//!
//! Two sinks are installed:
//!
//! - a console layer on stderr, filtered by `RUST_LOG` or the CLI level
//! - the process log, which only receives events with the
//!   [`COMPLETION_TARGET`] target and appends them as
//!   `YYYY-MM-DD HH:MM:SS,mmm - LEVEL - message`

use crate::error::{CleanupError, Result};
use chrono::Local;
use std::fmt;
use std::path::Path;
use tracing::{Event, Subscriber, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Target of the events that go to the process log.
pub const COMPLETION_TARGET: &str = "customer_cleanup::process";

/// Event format of the process log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLogFormat;

impl<S, N> FormatEvent<S, N> for ProcessLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Layer writing [`COMPLETION_TARGET`] events to `make_writer`.
pub fn completion_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .event_format(ProcessLogFormat)
        .with_ansi(false)
        .with_writer(make_writer)
        .with_filter(filter_fn(|metadata| metadata.target() == COMPLETION_TARGET))
}

/// Open `path` for appending, creating its parent directory if needed.
pub fn open_log_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CleanupError::LoggingInit(format!("not a file path: {}", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(directory)
        .map_err(|e| CleanupError::LoggingInit(e.to_string()))
}

/// Install the global subscriber.
///
/// `--quiet` lowers the console to warnings; `RUST_LOG` overrides both.
/// With `console` off only the process log is written, which keeps stdout
/// and stderr free for JSON output.
pub fn init_logging(level: &str, quiet: bool, console: bool, log_file: &Path) -> Result<()> {
    let effective_level = if quiet { "warn" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(completion_layer(open_log_appender(log_file)?))
        .try_init()
        .map_err(|e| CleanupError::LoggingInit(e.to_string()))
}

/// Record a successful run in the process log.
pub fn log_completion() {
    info!(target: COMPLETION_TARGET, "Data cleanup completed successfully.");
}
