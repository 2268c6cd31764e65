//! Logging utilities for the agenda application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace. It includes functions for initializing the tracing
//! subscriber and a helper for logging error results.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default level (INFO).
///
/// Call once at application start. The `RUST_LOG` environment variable
/// still takes precedence through the env filter.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
pub fn init_with_level(level: Level) {
    let filter =
        EnvFilter::from_default_env().add_directive(format!("agenda={}", level).parse().unwrap());

    // try_init so a second call (e.g. from tests) is harmless
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log the error arm of a result and pass the result through unchanged.
pub fn log_result<T, E: std::fmt::Display>(context: &str, result: Result<T, E>) -> Result<T, E> {
    if let Err(err) = &result {
        error!("{}: {}", context, err);
    }
    result
}
