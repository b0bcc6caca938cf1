//! Service layer.

pub mod notifications;

pub use notifications::{CompletionNotifier, PushoverNotifier};
