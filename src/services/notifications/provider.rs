//! Core notification sender trait and types.
//!
//! This module provides the seam between the completion wrapper and the
//! concrete delivery channel, so the wrapper can be driven by any sender
//! (the Pushover client in production, a recorder in tests).

use serde::{Deserialize, Serialize};

/// Result of a notification send attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code, `None` when the request never got a response
    pub status_code: Option<u16>,
    /// Response body or transport error message
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    /// Result for a request that failed before any response arrived
    pub fn transport_failure(error: impl ToString, duration_ms: u64) -> Self {
        Self {
            success: false,
            status_code: None,
            response: Some(error.to_string()),
            duration_ms,
        }
    }
}

/// Trait for notification senders
///
/// Delivery is synchronous and infallible from the caller's point of view:
/// failures are logged by the implementation and reported as `false`.
/// All senders must be Send + Sync so a single instance can be shared
/// across threads and moved into `spawn_blocking`.
///
/// # Example Implementation
/// ```ignore
/// pub struct StderrSender;
///
/// impl NotificationSender for StderrSender {
///     fn send_detailed(&self, message: &str, title: &str) -> NotificationResult {
///         eprintln!("{title}: {message}");
///         NotificationResult { success: true, status_code: None, response: None, duration_ms: 0 }
///     }
///
///     fn name(&self) -> &'static str {
///         "stderr"
///     }
/// }
/// ```
pub trait NotificationSender: Send + Sync {
    /// Sends a notification and reports the full outcome
    fn send_detailed(&self, message: &str, title: &str) -> NotificationResult;

    /// Sends a notification, returning `true` on a successful delivery
    fn send(&self, message: &str, title: &str) -> bool {
        self.send_detailed(message, title).success
    }

    /// Returns the sender name for logging/debugging
    fn name(&self) -> &'static str;
}
