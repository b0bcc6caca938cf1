//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate that a notification text is not blank
///
/// Pushover rejects empty messages, so catch it before making a request.
pub fn validate_message_text(text: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Err("Text cannot be empty".to_string());
    }
    Ok(text.to_string())
}

/// Validate a credential passed on the command line
pub fn validate_credential(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.contains(char::is_whitespace) {
        return Err("Credentials cannot contain whitespace".to_string());
    }
    Ok(value.to_string())
}
