use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging.level '{0}'; valid values: trace, debug, info, warn, error")]
    InvalidLevel(String),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Parse a configured level string into a `LevelFilter`.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(LoggingError::InvalidLevel(level.to_string())),
    }
}

/// Install the global tracing subscriber described by `logging_config`.
///
/// `RUST_LOG` directives are honored on top of the configured level. Records
/// emitted through the `log` facade (reqwest, hyper) are forwarded into
/// `tracing`.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), LoggingError> {
    let level_filter = parse_level(&logging_config.level)?;
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let installed = match logging_config.format.to_lowercase().as_str() {
        "json" => tracing::subscriber::set_global_default(
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().json().flatten_event(true)),
        ),
        // Anything else falls back to human-readable console output.
        _ => tracing::subscriber::set_global_default(
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().pretty()),
        ),
    };
    installed.map_err(|_| LoggingError::AlreadyInitialized)?;

    tracing_log::LogTracer::init().map_err(|_| LoggingError::AlreadyInitialized)
}
