//! Validation of loaded settings
//!
//! Level and format names are checked with the same parsers the logger uses,
//! so anything accepted here also starts the logger.

use std::str::FromStr;

use reqwest::Url;
use tracing::Level;

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, PushoverSettings, Settings};
use crate::logger::LogFormat;

impl PushoverSettings {
    /// The endpoint must be an http or https URL
    ///
    /// Credentials are not checked: leaving either empty turns notifications off.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url).map_err(|e| {
            ConfigError::validation("pushover.api_url", format!("'{}' is not a URL: {e}", self.api_url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::validation(
                "pushover.api_url",
                format!("unsupported scheme '{other}', expected http or https"),
            )),
        }
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "a path is required when file logging is enabled",
            ));
        }

        LogFormat::from_str(&self.format)
            .map(drop)
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))
    }
}

impl LoggerSettings {
    /// Checks the level name, the file output, and that some output is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        Level::from_str(self.level.trim()).map_err(|_| {
            ConfigError::validation(
                "logger.level",
                format!(
                    "unknown level '{}', expected trace, debug, info, warn or error",
                    self.level
                ),
            )
        })?;

        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "enable console or file output",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Returns the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pushover.validate()?;
        self.logger.validate()
    }
}
