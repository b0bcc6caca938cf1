//! Push notifications for finished work.
//!
//! `NotificationSender` is the delivery seam, `PushoverNotifier` the Pushover
//! implementation, and `completion` the wrapper that reports how a call ended.

mod completion;
mod provider;
mod pushover_provider;

pub use completion::{
    CompletionNotifier, ExecutionOutcome, FAILURE_TITLE, OutcomeStatus, SUCCESS_TITLE, Wrapped,
    function_name, notify_on_completion, notify_on_completion_named, round_elapsed,
};
pub use provider::{NotificationResult, NotificationSender};
pub use pushover_provider::{Credentials, PUSHOVER_API_URL, PushoverNotifier, PushoverRequest};
