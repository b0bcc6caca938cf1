//! Configuration management module for pushover-notify
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `local.toml` - Local overrides (not committed to version control)
//! 3. `PUSHOVER_NOTIFY_*` environment variables
//!
//! Every layer is optional: without any of them, notifications are simply disabled.

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ConsoleSettings, FileSettings, LoggerSettings, PushoverSettings, Settings};
