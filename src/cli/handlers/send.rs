//! Send command handler

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::notifications::{NotificationSender, PushoverNotifier};

/// Handler for the send command
pub struct SendCommandHandler {
    notifier: PushoverNotifier,
}

impl SendCommandHandler {
    pub fn new(config: &Settings) -> Self {
        Self {
            notifier: config.pushover.notifier(),
        }
    }

    /// Sends one notification
    ///
    /// # Returns
    /// Whether Pushover accepted the message; delivery problems are logged, not returned
    ///
    /// # Errors
    /// Validation error when credentials are missing or the endpoint is invalid
    pub fn execute(&self, title: &str, message: &str) -> AppResult<bool> {
        self.notifier.validate_config()?;

        let result = self.notifier.send_detailed(message, title);
        if result.success {
            tracing::info!(duration_ms = result.duration_ms, "Notification sent");
        }
        Ok(result.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn settings_for(url: String) -> Settings {
        let mut settings = Settings::default();
        settings.pushover.api_token = "app-token".to_string();
        settings.pushover.user_key = "user-key".to_string();
        settings.pushover.api_url = url;
        settings
    }

    #[test]
    fn test_send_without_credentials_is_validation_error() {
        let handler = SendCommandHandler::new(&Settings::default());
        assert!(matches!(
            handler.execute("title", "message"),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_send_reports_delivery() {
        let mut server = mockito::Server::new();
        let ok = server
            .mock("POST", "/1/messages.json")
            .match_body(mockito::Matcher::UrlEncoded("title".into(), "Deploy".into()))
            .with_status(200)
            .create();

        let handler = SendCommandHandler::new(&settings_for(format!("{}/1/messages.json", server.url())));
        assert!(handler.execute("Deploy", "done").unwrap());
        ok.assert();
    }

    #[test]
    fn test_send_reports_rejection() {
        let mut server = mockito::Server::new();
        let rejected = server
            .mock("POST", "/1/messages.json")
            .with_status(429)
            .create();

        let handler = SendCommandHandler::new(&settings_for(format!("{}/1/messages.json", server.url())));
        assert!(!handler.execute("Deploy", "done").unwrap());
        rejected.assert();
    }
}
