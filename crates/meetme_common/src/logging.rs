//! Logging utilities for MeetMe.
//!
//! Sets up a `tracing` subscriber with an env filter and a formatted stdout layer,
//! plus an optional daily rolling log file.

use meetme_config::LoggingConfig;
use std::str::FromStr;
use tracing::{error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `meetme` crates.
///
/// `RUST_LOG` directives still apply on top of this. Calling it twice is harmless.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(meetme_filter(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `[logging]` section.
///
/// When `directory` is set a non-blocking daily file layer is added; the returned guard
/// flushes it and must be held for the lifetime of the process.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let parsed = parse_level(&config.level);
    let level = parsed.unwrap_or(Level::INFO);

    let Some(directory) = config.directory.as_deref() else {
        init_with_level(level);
        warn_unknown_level(&config.level, parsed);
        return None;
    };

    let appender = tracing_appender::rolling::daily(directory, "meetme.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(meetme_filter(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {}, writing to {}",
            level, directory
        );
    }
    warn_unknown_level(&config.level, parsed);
    Some(guard)
}

/// Parses a level name such as `info` or `DEBUG`.
fn parse_level(raw: &str) -> Option<Level> {
    Level::from_str(raw.trim()).ok()
}

// Emitted once a subscriber is installed so the fallback is visible.
fn warn_unknown_level(raw: &str, parsed: Option<Level>) {
    if parsed.is_none() {
        warn!("Unknown log level '{}', using info", raw);
    }
}

fn stdout_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
}

fn meetme_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("meetme={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the result unchanged so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
