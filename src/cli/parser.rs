//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Push notifications for finished programs
#[derive(Parser, Debug)]
#[command(name = "pushover-notify")]
#[command(about = "Send Pushover notifications when programs finish")]
#[command(long_about = "
pushover-notify sends a Pushover push notification when a program finishes,
reporting success or failure together with how long it ran.

Credentials come from config/default.toml, config/local.toml,
PUSHOVER_NOTIFY_PUSHOVER__API_TOKEN / PUSHOVER_NOTIFY_PUSHOVER__USER_KEY,
or --token / --user. Without both, programs still run but nothing is sent.

EXAMPLES:
    # Run a backup and get notified when it is done
    pushover-notify run -- ./backup.sh --full

    # Give the notification a friendlier name
    pushover-notify run --name nightly-backup -- ./backup.sh

    # Send a one-off message
    pushover-notify send --title Deploy --message 'v1.4.2 is live'

    # Check which configuration would be used
    pushover-notify --config /etc/pushover-notify.toml check
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Use this TOML file instead of the layered config/ directory.
    /// The file must exist and be readable.
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Pushover application API token (overrides configuration)
    #[arg(long, global = true, value_name = "TOKEN", value_parser = super::validation::validate_credential)]
    pub token: Option<String>,

    /// Pushover user or group key (overrides configuration)
    #[arg(long, global = true, value_name = "KEY", value_parser = super::validation::validate_credential)]
    pub user: Option<String>,

    /// Enable verbose logging
    ///
    /// Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override
    ///
    /// Takes precedence over --verbose/--quiet and configuration files.
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a single notification
    ///
    /// Exits with a non-zero status when delivery fails.
    Send {
        /// Notification title
        #[arg(short, long, default_value = "pushover-notify", value_parser = super::validation::validate_message_text)]
        title: String,

        /// Notification body
        #[arg(short, long, value_parser = super::validation::validate_message_text)]
        message: String,
    },
    /// Run a program and notify when it finishes
    ///
    /// A non-zero exit status counts as failure. The program's exit code is
    /// passed through as this command's exit code.
    ///
    /// Examples:
    ///   pushover-notify run -- make release
    ///   pushover-notify run --name db-dump -- pg_dump -f dump.sql app
    Run {
        /// Name shown in the notification (defaults to the program name)
        #[arg(short, long)]
        name: Option<String>,

        /// Program and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
        command: Vec<String>,
    },
    /// Validate configuration and report whether notifications are enabled
    Check,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}
