use crate::config::error::ConfigError;
use thiserror::Error;

/// Application-wide error type for everything outside notification delivery.
///
/// Delivery failures never surface here: senders absorb them and report
/// `false`. These variants cover configuration, argument validation and
/// launching wrapped processes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A wrapped program could not be started or waited on
    #[error("Failed to run '{program}'")]
    Process {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationError { field, message } => AppError::Validation {
                field,
                reason: message,
            },
            other => AppError::Configuration {
                key: "settings".to_string(),
                source: other.into(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
