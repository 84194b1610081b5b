//! Logging initialization and configuration.
//!
//! Console output goes to stderr (stdout may carry CSV). When a log file is
//! configured, every event is also appended to it as plain text, including
//! provider responses under the `marketmap::responses` target.

use std::path::Path;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, registry::LookupSpan, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `verbose` - If true, enables DEBUG level logging; otherwise INFO level.
/// * `json_format` - If true, console logs are JSON; otherwise pretty-printed.
/// * `log_file` - Append-only API log, if any.
///
/// The RUST_LOG environment variable overrides the level.
pub fn init(verbose: bool, json_format: bool, log_file: Option<&Path>) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(file_layer(log_file))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .with(file_layer(log_file))
            .init();
    }
}

/// Initialize logging with settings from the MarketMap config.
pub fn init_from_config(
    config: &marketmap_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let verbose =
        verbose_override || config.logging.level == "debug" || config.logging.level == "trace";
    let json_format = json_logs_override || config.logging.format == "json";
    init(verbose, json_format, config.log_file().as_deref());
}

/// Plain-text layer appending to `path`. Never rotates.
fn file_layer<S>(path: Option<&Path>) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let path = path?;
    let file_name = path.file_name()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(log_dir(path));

    match appender {
        Ok(appender) => Some(fmt::layer().with_writer(appender).with_ansi(false)),
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", path.display());
            None
        }
    }
}

/// Directory holding `path`; a bare file name lives in the working directory.
fn log_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}
