//! Runtime logger configuration, after settings have been parsed

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_LOG_PATH: &str = "logs/pushover-notify.log";

/// Where log lines go and how verbose they are
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// `trace`, `debug`, `info`, `warn` or `error`, any case
    pub level: String,
}

impl LoggerConfig {
    pub fn new(console: ConsoleConfig, file: FileConfig, level: impl Into<String>) -> Result<Self> {
        let config = Self {
            console,
            file,
            level: level.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }

    /// Fails on an unknown level, an enabled file output without a path,
    /// or when neither output is enabled
    pub fn validate(&self) -> Result<()> {
        self.parse_level()?;
        self.file.validate().context("Invalid file output")?;
        ensure!(
            self.console.enabled || self.file.enabled,
            "At least one output (console or file) must be enabled"
        );
        Ok(())
    }

    pub fn parse_level(&self) -> Result<Level> {
        Level::from_str(self.level.trim()).map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            )
        })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: DEFAULT_LEVEL.to_string(),
        }
    }
}

/// Console (stderr) output
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Colours are still suppressed when stderr is not a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// File output, off by default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    /// Truncate the file on start when false
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    /// Enabled file output writing to `path`
    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Checks the path only; the parent directory is created by `init_logger`
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.enabled || !self.path.as_os_str().is_empty(),
            "File path cannot be empty when file output is enabled"
        );
        Ok(())
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_LOG_PATH),
            append: true,
            format: LogFormat::Json,
        }
    }
}

/// Line format of the file output
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub const ALL: [LogFormat; 3] = [LogFormat::Full, LogFormat::Compact, LogFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid log format '{}'. Valid formats are: full, compact, json",
                    s
                )
            })
    }
}

/// Builder for [`LoggerConfig`], validated on `build`
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    console: Option<ConsoleConfig>,
    file: Option<FileConfig>,
    level: Option<String>,
}

impl LoggerConfigBuilder {
    pub fn console(mut self, config: ConsoleConfig) -> Self {
        self.console = Some(config);
        self
    }

    pub fn file(mut self, config: FileConfig) -> Self {
        self.file = Some(config);
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn build(self) -> Result<LoggerConfig> {
        LoggerConfig::new(
            self.console.unwrap_or_default(),
            self.file.unwrap_or_default(),
            self.level.unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logs_to_console_only() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.parse_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_level_parsing_is_case_insensitive() {
        let config = LoggerConfig {
            level: "WARN".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_level().unwrap(), Level::WARN);

        let config = LoggerConfig {
            level: "chatty".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_some_output_required() {
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: FileConfig::to_path("run.log"),
            level: "debug".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_file_needs_path() {
        assert!(FileConfig::to_path("").validate().is_err());
        assert!(FileConfig::default().with_path("").validate().is_ok());

        let file = FileConfig::to_path("logs/out.log")
            .with_format(LogFormat::Compact)
            .with_append(false);
        assert!(file.validate().is_ok());
        assert_eq!(file.format, LogFormat::Compact);
        assert!(!file.append);
    }

    #[test]
    fn test_log_format_names() {
        for format in LogFormat::ALL {
            assert_eq!(format.as_str().parse::<LogFormat>().unwrap(), format);
            assert_eq!(format.to_string(), format.as_str());
        }
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Full);
    }

    #[test]
    fn test_builder() {
        let config = LoggerConfig::builder()
            .level("debug")
            .console(ConsoleConfig::new(true, false))
            .build()
            .expect("valid builder config");

        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert!(!config.file.enabled);

        assert!(LoggerConfig::builder().level("loud").build().is_err());
    }
}
