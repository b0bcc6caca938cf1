//! Errors raised while locating, reading or validating configuration

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file selected with `--config` or `PUSHOVER_NOTIFY_CONFIG_FILE` does not exist
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The merged sources do not match the settings layout
    #[error("Invalid configuration: {0}")]
    Deserialize(#[source] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Both the directory and the single-file selector were set
    #[error(
        "PUSHOVER_NOTIFY_CONFIG_DIR ({}) and PUSHOVER_NOTIFY_CONFIG_FILE ({}) cannot both be set",
        .dir.display(),
        .file.display()
    )]
    ConflictingSources { dir: PathBuf, file: PathBuf },

    /// A source could not be read or parsed as TOML
    #[error("Failed to read configuration sources")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
