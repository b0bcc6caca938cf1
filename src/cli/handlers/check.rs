//! Check command handler
//!
//! Validates configuration and reports what a run would do, without sending anything.

use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and print a summary to stdout
    pub fn execute(&self) -> AppResult<()> {
        for line in self.report()? {
            println!("{}", line);
        }
        Ok(())
    }

    /// Summary lines describing the effective configuration
    pub fn report(&self) -> AppResult<Vec<String>> {
        self.config.validate()?;

        let pushover = &self.config.pushover;
        let mut lines = vec!["✓ Configuration is valid".to_string()];

        if pushover.is_enabled() {
            lines.push(format!("✓ Notifications enabled, endpoint: {}", pushover.api_url));
        } else {
            let missing: Vec<&str> = [
                ("api_token", pushover.api_token.is_empty()),
                ("user_key", pushover.user_key.is_empty()),
            ]
            .into_iter()
            .filter_map(|(name, empty)| empty.then_some(name))
            .collect();
            lines.push(format!(
                "✗ Notifications disabled, missing: {}",
                missing.join(", ")
            ));
        }

        lines.push(format!("✓ Log level: {}", self.config.logger.level));
        Ok(lines)
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_disabled() {
        let lines = CheckCommandHandler::new(Settings::default()).report().unwrap();
        assert_eq!(lines[0], "✓ Configuration is valid");
        assert_eq!(lines[1], "✗ Notifications disabled, missing: api_token, user_key");
    }

    #[test]
    fn test_report_partially_configured() {
        let mut settings = Settings::default();
        settings.pushover.api_token = "t".to_string();
        let lines = CheckCommandHandler::new(settings).report().unwrap();
        assert_eq!(lines[1], "✗ Notifications disabled, missing: user_key");
    }

    #[test]
    fn test_report_enabled() {
        let mut settings = Settings::default();
        settings.pushover.api_token = "t".to_string();
        settings.pushover.user_key = "u".to_string();
        let lines = CheckCommandHandler::new(settings).report().unwrap();
        assert_eq!(
            lines[1],
            "✓ Notifications enabled, endpoint: https://api.pushover.net/1/messages.json"
        );
    }

    #[test]
    fn test_report_invalid_config() {
        let mut settings = Settings::default();
        settings.logger.level = "shout".to_string();
        assert!(CheckCommandHandler::new(settings).report().is_err());
    }
}
