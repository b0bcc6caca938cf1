//! Pushover notification provider implementation.
//!
//! Sends push notifications through the Pushover message API with a single
//! form-encoded POST. Uses the global `HTTP_CLIENT` for connection pooling.
//!
//! Pushover API Reference: https://pushover.net/api

use super::provider::{NotificationResult, NotificationSender};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Default Pushover message endpoint
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Pushover account credentials
///
/// Both values are opaque strings handed out by Pushover: the application
/// token identifies the sending app, the user key identifies the recipient.
/// They are fixed for the lifetime of the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_token: String,
    user_key: String,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            user_key: user_key.into(),
        }
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    /// True only when both the token and the user key are non-empty
    pub fn is_complete(&self) -> bool {
        !self.api_token.is_empty() && !self.user_key.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "<empty>" } else { "<redacted>" }
        }

        f.debug_struct("Credentials")
            .field("api_token", &redact(&self.api_token))
            .field("user_key", &redact(&self.user_key))
            .finish()
    }
}

/// Form body of a Pushover message request
#[derive(Debug, Serialize)]
pub struct PushoverRequest<'a> {
    pub token: &'a str,
    pub user: &'a str,
    pub message: &'a str,
    pub title: &'a str,
}

impl<'a> PushoverRequest<'a> {
    pub fn new(credentials: &'a Credentials, message: &'a str, title: &'a str) -> Self {
        Self {
            token: credentials.api_token(),
            user: credentials.user_key(),
            message,
            title,
        }
    }
}

/// JSON envelope returned by the Pushover API
#[derive(Debug, Deserialize)]
struct PushoverResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Pushover notification provider
///
/// # Example
/// ```ignore
/// let notifier = PushoverNotifier::new(Credentials::new("app-token", "user-key"));
/// if !notifier.send("Backup finished", "Nightly job") {
///     // already logged; nothing else to do
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PushoverNotifier {
    credentials: Credentials,
    api_url: String,
}

impl PushoverNotifier {
    /// Creates a notifier that posts to the public Pushover endpoint
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: PUSHOVER_API_URL.to_string(),
        }
    }

    /// Overrides the message endpoint (self-hosted gateways, local stubs)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Validates notifier configuration
    ///
    /// Checks that:
    /// - both credentials are present
    /// - the endpoint is a valid http(s) URL
    pub fn validate_config(&self) -> AppResult<()> {
        if self.credentials.api_token().is_empty() {
            return Err(AppError::Validation {
                field: "api_token".to_string(),
                reason: "API token cannot be empty".to_string(),
            });
        }

        if self.credentials.user_key().is_empty() {
            return Err(AppError::Validation {
                field: "user_key".to_string(),
                reason: "User key cannot be empty".to_string(),
            });
        }

        validate_api_url(&self.api_url)
    }

    /// Extracts the Pushover error list from a response body, if it has one
    fn describe_errors(body: Option<&str>) -> Option<String> {
        let parsed: PushoverResponse = serde_json::from_str(body?).ok()?;
        if parsed.errors.is_empty() {
            None
        } else {
            Some(parsed.errors.join("; "))
        }
    }
}

/// Checks that an endpoint parses as an http or https URL
fn validate_api_url(api_url: &str) -> AppResult<()> {
    let url = Url::parse(api_url).map_err(|_| AppError::Validation {
        field: "api_url".to_string(),
        reason: "Invalid URL format".to_string(),
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(AppError::Validation {
            field: "api_url".to_string(),
            reason: "URL must use http or https protocol".to_string(),
        });
    }

    Ok(())
}

impl NotificationSender for PushoverNotifier {
    /// Sends a notification via Pushover
    ///
    /// Never returns an error: transport failures and non-2xx statuses are
    /// logged and reported through `success: false`.
    fn send_detailed(&self, message: &str, title: &str) -> NotificationResult {
        let start = Instant::now();
        let request = PushoverRequest::new(&self.credentials, message, title);

        let response = HTTP_CLIENT.post(&self.api_url).form(&request).send();
        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status = resp.status();
                let response_text = resp.text().ok();

                if status.is_success() {
                    tracing::debug!(
                        provider = self.name(),
                        status = status.as_u16(),
                        duration_ms,
                        "Notification delivered"
                    );
                } else {
                    let reason = Self::describe_errors(response_text.as_deref())
                        .unwrap_or_else(|| status.to_string());
                    tracing::warn!(
                        provider = self.name(),
                        status = status.as_u16(),
                        duration_ms,
                        "Failed to send notification: {}",
                        reason
                    );
                }

                NotificationResult {
                    success: status.is_success(),
                    status_code: Some(status.as_u16()),
                    response: response_text,
                    duration_ms,
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    duration_ms,
                    "Failed to send notification: {}",
                    e
                );
                NotificationResult::transport_failure(e, duration_ms)
            }
        }
    }

    fn name(&self) -> &'static str {
        "pushover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn notifier_for(server: &mockito::Server) -> PushoverNotifier {
        PushoverNotifier::new(Credentials::new("app-token", "user-key"))
            .with_api_url(format!("{}/1/messages.json", server.url()))
    }

    #[test]
    fn test_send_posts_form_fields() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/1/messages.json")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("token".into(), "app-token".into()),
                Matcher::UrlEncoded("user".into(), "user-key".into()),
                Matcher::UrlEncoded("message".into(), "Backup done\nin 3s".into()),
                Matcher::UrlEncoded("title".into(), "✅ Program Success".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":1,"request":"647d2300-702c-4b38-8b2f-d56326ae460b"}"#)
            .create();

        let sent = notifier_for(&server).send("Backup done\nin 3s", "✅ Program Success");

        assert!(sent);
        mock.assert();
    }

    #[test]
    fn test_send_detailed_reports_status_and_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/1/messages.json")
            .with_status(200)
            .with_body(r#"{"status":1}"#)
            .create();

        let result = notifier_for(&server).send_detailed("hello", "title");

        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.response.as_deref(), Some(r#"{"status":1}"#));
        mock.assert();
    }

    #[test]
    fn test_send_returns_false_on_client_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/1/messages.json")
            .with_status(400)
            .with_body(r#"{"user":"invalid","errors":["user identifier is invalid"],"status":0}"#)
            .create();

        let result = notifier_for(&server).send_detailed("hello", "title");

        assert!(!result.success);
        assert_eq!(result.status_code, Some(400));
        mock.assert();
    }

    #[test]
    fn test_send_returns_false_on_server_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/1/messages.json")
            .with_status(503)
            .create();

        assert!(!notifier_for(&server).send("hello", "title"));
        mock.assert();
    }

    #[test]
    fn test_send_returns_false_on_network_error() {
        // Nothing listens on port 1
        let notifier = PushoverNotifier::new(Credentials::new("t", "u"))
            .with_api_url("http://127.0.0.1:1/1/messages.json");

        let result = notifier.send_detailed("hello", "title");

        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(result.response.is_some());
    }

    #[test]
    fn test_describe_errors() {
        let body = r#"{"errors":["application token is invalid","message cannot be blank"],"status":0}"#;
        assert_eq!(
            PushoverNotifier::describe_errors(Some(body)).as_deref(),
            Some("application token is invalid; message cannot be blank")
        );
        assert_eq!(PushoverNotifier::describe_errors(Some(r#"{"status":1}"#)), None);
        assert_eq!(PushoverNotifier::describe_errors(Some("<html>")), None);
        assert_eq!(PushoverNotifier::describe_errors(None), None);
    }

    #[test]
    fn test_default_endpoint() {
        let notifier = PushoverNotifier::new(Credentials::new("t", "u"));
        assert_eq!(notifier.api_url(), "https://api.pushover.net/1/messages.json");
    }

    #[test]
    fn test_validate_config() {
        let valid = PushoverNotifier::new(Credentials::new("t", "u"));
        assert!(valid.validate_config().is_ok());

        let no_token = PushoverNotifier::new(Credentials::new("", "u"));
        assert!(matches!(
            no_token.validate_config(),
            Err(AppError::Validation { ref field, .. }) if field == "api_token"
        ));

        let no_user = PushoverNotifier::new(Credentials::new("t", ""));
        assert!(matches!(
            no_user.validate_config(),
            Err(AppError::Validation { ref field, .. }) if field == "user_key"
        ));

        let bad_url = PushoverNotifier::new(Credentials::new("t", "u")).with_api_url("not-a-url");
        assert!(bad_url.validate_config().is_err());

        let bad_scheme =
            PushoverNotifier::new(Credentials::new("t", "u")).with_api_url("ftp://example.com/");
        assert!(bad_scheme.validate_config().is_err());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let debug = format!("{:?}", Credentials::new("secret-token", ""));
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("<empty>"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("t", "u").is_complete());
        assert!(!Credentials::new("", "u").is_complete());
        assert!(!Credentials::new("t", "").is_complete());
        assert!(!Credentials::new("", "").is_complete());
    }
}
