//! pushover-notify library
//!
//! Pushover push notifications, and a completion wrapper that reports whether
//! a function succeeded or failed and how long it ran.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub use services::notifications::{
    CompletionNotifier, Credentials, NotificationSender, PushoverNotifier, Wrapped,
    notify_on_completion, notify_on_completion_named,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
