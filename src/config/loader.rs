//! Locates configuration sources and merges them into [`Settings`]

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "PUSHOVER_NOTIFY_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "PUSHOVER_NOTIFY_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// `PUSHOVER_NOTIFY_PUSHOVER__API_TOKEN` sets `pushover.api_token`
const ENV_PREFIX: &str = "PUSHOVER_NOTIFY";
const ENV_SEPARATOR: &str = "__";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Resolves where settings come from
///
/// In directory mode, `default.toml` then `local.toml` are read from the
/// directory, both optional. In single-file mode only that file is read and
/// it must exist. Environment variables override either mode.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Single-file mode when set
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Picks the mode from `PUSHOVER_NOTIFY_CONFIG_DIR` or `PUSHOVER_NOTIFY_CONFIG_FILE`
    ///
    /// Fails with [`ConfigError::ConflictingSources`] when both are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        match (config_dir, config_file) {
            (Some(dir), Some(file)) => Err(ConfigError::ConflictingSources { dir, file }),
            (config_dir, config_file) => Ok(Self {
                config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
                config_file,
            }),
        }
    }

    /// Single-file mode for an explicit path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Reads every source for the current mode and validates the result
    ///
    /// # Errors
    /// A missing single file, unreadable TOML, values of the wrong type,
    /// or settings that fail [`Settings::validate`]
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self
            .build_config()?
            .try_deserialize()
            .map_err(ConfigError::Deserialize)?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.config_file {
            Some(file) => Self::add_file_source(Config::builder(), file, true)?,
            None => ["default.toml", "local.toml"].iter().try_fold(
                Config::builder(),
                |builder, name| Self::add_file_source(builder, &self.config_dir.join(name), false),
            )?,
        };

        Ok(Self::add_env_source(builder).build()?)
    }

    fn add_file_source(builder: Builder, path: &Path, required: bool) -> Result<Builder, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    /// Empty variables are ignored, so an unset-but-exported token does not
    /// clear one read from a file
    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true),
        )
    }
}
