//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{CheckCommandHandler, RunCommandHandler, SendCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Exit code used when a notification could not be delivered
pub const DELIVERY_FAILED_EXIT_CODE: i32 = 2;

/// Execute a CLI command with the given settings
///
/// # Returns
/// The process exit code: `0` on success, the child's own code for `run`,
/// [`DELIVERY_FAILED_EXIT_CODE`] when `send` was not accepted
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub fn execute_command(cli: &Cli, settings: Settings) -> AppResult<i32> {
    match &cli.command {
        Commands::Send { title, message } => {
            let delivered = SendCommandHandler::new(&settings).execute(title, message)?;
            Ok(if delivered { 0 } else { DELIVERY_FAILED_EXIT_CODE })
        }
        Commands::Run { name, command } => {
            RunCommandHandler::new(&settings).execute(name.as_deref(), command)
        }
        Commands::Check => {
            CheckCommandHandler::new(settings).execute()?;
            Ok(0)
        }
    }
}
