//! Run command handler
//!
//! Runs a child program inside a completion wrapper, so a non-zero exit or a
//! failure to start it produces a failure notification.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::services::notifications::{CompletionNotifier, Wrapped};
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Why a child program counts as failed
#[derive(Debug, Error)]
pub enum ChildFailure {
    #[error("exited with {0}")]
    Exit(ExitStatus),

    #[error("failed to start: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handler for the run command
pub struct RunCommandHandler {
    notifier: Option<CompletionNotifier>,
}

impl RunCommandHandler {
    pub fn new(config: &Settings) -> Self {
        Self {
            notifier: config.pushover.completion_notifier(),
        }
    }

    pub fn with_notifier(notifier: Option<CompletionNotifier>) -> Self {
        Self { notifier }
    }

    /// Runs `command` and returns the exit code to pass through
    ///
    /// # Errors
    /// Process error when the program cannot be started
    pub fn execute(&self, name: Option<&str>, command: &[String]) -> AppResult<i32> {
        let (program, args) = command.split_first().ok_or_else(|| AppError::Validation {
            field: "command".to_string(),
            reason: "No program given".to_string(),
        })?;

        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| program_name(program));

        tracing::debug!(program = %program, ?args, notify = self.notifier.is_some(), "Running program");

        let wrapped = Wrapped::new(self.notifier.clone(), name, || -> Result<ExitStatus, ChildFailure> {
            let status = Command::new(program).args(args).status()?;
            if status.success() {
                Ok(status)
            } else {
                Err(ChildFailure::Exit(status))
            }
        });

        match wrapped.call() {
            Ok(_) => Ok(0),
            Err(ChildFailure::Exit(status)) => Ok(status.code().unwrap_or(1)),
            Err(ChildFailure::Spawn(source)) => Err(AppError::Process {
                program: program.clone(),
                source,
            }),
        }
    }
}

/// File name of the program, used when no explicit name is given
fn program_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::{NotificationResult, NotificationSender};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct CapturingSender {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl NotificationSender for CapturingSender {
        fn send_detailed(&self, message: &str, title: &str) -> NotificationResult {
            self.sent
                .lock()
                .unwrap()
                .push((message.to_string(), title.to_string()));
            NotificationResult {
                success: true,
                status_code: Some(200),
                response: None,
                duration_ms: 0,
            }
        }

        fn name(&self) -> &'static str {
            "capturing"
        }
    }

    fn capturing_handler() -> (Arc<CapturingSender>, RunCommandHandler) {
        let sender = Arc::new(CapturingSender::default());
        let notifier = CompletionNotifier::new(sender.clone());
        (sender, RunCommandHandler::with_notifier(Some(notifier)))
    }

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name("/usr/bin/make"), "make");
        assert_eq!(program_name("./backup.sh"), "backup.sh");
        assert_eq!(program_name("cargo"), "cargo");
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let handler = RunCommandHandler::with_notifier(None);
        assert!(matches!(
            handler.execute(None, &[]),
            Err(AppError::Validation { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_program_notifies_success() {
        let (sender, handler) = capturing_handler();

        let code = handler.execute(None, &command(&["true"])).unwrap();

        assert_eq!(code, 0);
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "✅ Program Success");
        assert!(sent[0].0.starts_with("Program 'true' completed successfully!"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_passes_exit_code_through() {
        let (sender, handler) = capturing_handler();

        let code = handler
            .execute(Some("nightly"), &command(&["sh", "-c", "exit 3"]))
            .unwrap();

        assert_eq!(code, 3);
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent[0].1, "❌ Program Failed");
        assert!(sent[0].0.starts_with("Program 'nightly' failed!\nError: exited with"));
    }

    #[test]
    fn test_missing_program_is_process_error() {
        let (sender, handler) = capturing_handler();

        let result = handler.execute(None, &command(&["definitely-not-a-real-program-4821"]));

        assert!(matches!(result, Err(AppError::Process { ref program, .. }) if program == "definitely-not-a-real-program-4821"));
        let sent = sender.sent.lock().unwrap();
        assert!(sent[0].0.contains("Error: failed to start:"));
    }

    #[cfg(unix)]
    #[test]
    fn test_without_notifier_still_runs() {
        let handler = RunCommandHandler::with_notifier(None);
        assert_eq!(handler.execute(None, &command(&["sh", "-c", "exit 2"])).unwrap(), 2);
    }
}
