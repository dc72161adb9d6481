//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after configuration is resolved.

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("failed to set subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// With `prefer_level`, `level` wins and `RUST_LOG` is only the fallback for
/// an invalid `level`; otherwise `RUST_LOG` wins when set.
pub fn init(level: &str, prefer_level: bool) -> Result<(), LoggerError> {
    let filter = if prefer_level {
        match EnvFilter::try_new(level) {
            Ok(filter) => filter,
            Err(level_err) => {
                EnvFilter::try_from_default_env().map_err(|env_err| LoggerError::InvalidLevel {
                    level: level.to_string(),
                    reason: format!("{level_err}; RUST_LOG parse failed: {env_err}"),
                })?
            }
        }
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .map_err(|e| LoggerError::InvalidLevel {
                level: level.to_string(),
                reason: e.to_string(),
            })?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// Validates a plain level name.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    if level.is_empty() {
        return Err(LoggerError::InvalidLevel {
            level: String::new(),
            reason: "log level must not be empty".into(),
        });
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| LoggerError::InvalidLevel {
            level: level.to_string(),
            reason: "unrecognised level".into(),
        })
}
