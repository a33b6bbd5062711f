//! Structured logging and secret redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats, and keeps Gemini API keys out of log
//! sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{RelayError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Google API keys start with this prefix and are 39 characters long.
const API_KEY_PREFIX: &str = "AIza";
const API_KEY_LEN: usize = 39;

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| RelayError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
    };

    result.map_err(|e| RelayError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Sanitizes Google API keys out of a log message.
///
/// Any `AIza...` key is replaced with a `[REDACTED_API_KEY]` placeholder.
/// Use this on upstream bodies and URLs before they reach a log line.
pub fn sanitize(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(API_KEY_PREFIX) {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let key_len = candidate
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(candidate.len());

        if key_len >= API_KEY_LEN {
            result.push_str("[REDACTED_API_KEY]");
            rest = &candidate[key_len..];
        } else {
            result.push_str(API_KEY_PREFIX);
            rest = &candidate[API_KEY_PREFIX.len()..];
        }
    }

    result.push_str(rest);
    result
}
