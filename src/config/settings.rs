//! Settings as loaded from TOML files and `PUSHOVER_NOTIFY_*` variables
//!
//! Every section and field is optional; missing values fall back to `Default`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::services::notifications::{
    CompletionNotifier, Credentials, PUSHOVER_API_URL, PushoverNotifier,
};

/// `[pushover]`: account and endpoint
///
/// Leaving either credential empty disables notifications; wrapped calls
/// then run without any instrumentation.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PushoverSettings {
    /// Application API token. Keep it in `local.toml` or
    /// `PUSHOVER_NOTIFY_PUSHOVER__API_TOKEN`, not in committed files.
    pub api_token: String,
    /// Recipient user or group key
    pub user_key: String,
    pub api_url: String,
}

impl Default for PushoverSettings {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            user_key: String::new(),
            api_url: PUSHOVER_API_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for PushoverSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverSettings")
            .field("credentials", &self.credentials())
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl PushoverSettings {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_token.clone(), self.user_key.clone())
    }

    /// Whether both credentials are present
    pub fn is_enabled(&self) -> bool {
        self.credentials().is_complete()
    }

    /// Builds the configured Pushover client
    pub fn notifier(&self) -> PushoverNotifier {
        PushoverNotifier::new(self.credentials()).with_api_url(self.api_url.clone())
    }

    /// Completion notifier for these settings, `None` when disabled
    pub fn completion_notifier(&self) -> Option<CompletionNotifier> {
        self.is_enabled()
            .then(|| CompletionNotifier::new(std::sync::Arc::new(self.notifier())))
    }
}

/// `[logger.console]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        let console = ConsoleConfig::default();
        Self {
            enabled: console.enabled,
            colored: console.colored,
        }
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

/// `[logger.file]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub enabled: bool,
    pub path: String,
    pub append: bool,
    /// `full`, `compact` or `json`
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        let file = FileConfig::default();
        Self {
            enabled: file.enabled,
            path: file.path.display().to_string(),
            append: file.append,
            format: file.format.to_string(),
        }
    }
}

impl FileSettings {
    /// Parses the format name into the logger's file output
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format: LogFormat = self
            .format
            .parse()
            .map_err(|e: anyhow::Error| ConfigError::validation("logger.file.format", e.to_string()))?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        })
    }
}

/// `[logger]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub level: String,
    pub console: ConsoleSettings,
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: LoggerConfig::default().level,
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Runtime logger configuration for `init_logger`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = self.console.into_console_config();
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", format!("{e:#}")))
    }
}

/// Root of the configuration tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pushover: PushoverSettings,
    pub logger: LoggerSettings,
}
