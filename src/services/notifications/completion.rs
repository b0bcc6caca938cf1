//! Completion notifications around arbitrary calls.
//!
//! [`CompletionNotifier`] times a call, reports the outcome through a
//! [`NotificationSender`], and hands the call's own result back untouched:
//! `Ok` values are returned, `Err` values are returned as the same value,
//! and panics are resumed with their original payload after the report.
//!
//! [`Wrapped`] is the decorator form. It is built from two credential strings;
//! when either is empty it degrades to [`Wrapped::Passthrough`], which holds
//! the original function and never sends anything.

use super::provider::NotificationSender;
use super::pushover_provider::{Credentials, PushoverNotifier};
use futures::FutureExt;
use std::any::Any;
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Title used when the wrapped call succeeds
pub const SUCCESS_TITLE: &str = "✅ Program Success";

/// Title used when the wrapped call fails
pub const FAILURE_TITLE: &str = "❌ Program Failed";

/// Rounds an elapsed duration to seconds with two decimal places
pub fn round_elapsed(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

/// Short name of a function type: the last path segment without generics
///
/// `<String as Default>::default` gives `default`, and
/// `core::option::Option<i32>::is_some` gives `is_some`.
pub fn function_name<F>() -> &'static str {
    let full = std::any::type_name::<F>();

    let mut depth = 0usize;
    let mut start = 0;
    let mut end = None;
    for (i, c) in full.char_indices() {
        match c {
            '<' => {
                if depth == 0 && end.is_none() {
                    end = Some(i);
                }
                depth += 1;
            }
            // `->` in fn pointer types closes nothing
            '>' if depth > 0 => depth -= 1,
            ':' if depth == 0 && full[i..].starts_with("::") => {
                start = i + 2;
                end = None;
            }
            _ => {}
        }
    }

    match &full[start..end.unwrap_or(full.len())] {
        "" => full,
        name => name,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    Success,
    /// Carries the `Display` text of the error or panic payload
    Failed(String),
}

/// What happened during one wrapped call
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    pub function_name: String,
    pub elapsed_seconds: f64,
    pub status: OutcomeStatus,
}

impl ExecutionOutcome {
    pub fn success(function_name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            function_name: function_name.into(),
            elapsed_seconds: round_elapsed(elapsed),
            status: OutcomeStatus::Success,
        }
    }

    pub fn failure(function_name: impl Into<String>, error: impl Display, elapsed: Duration) -> Self {
        Self {
            function_name: function_name.into(),
            elapsed_seconds: round_elapsed(elapsed),
            status: OutcomeStatus::Failed(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }

    pub fn title(&self) -> &'static str {
        match self.status {
            OutcomeStatus::Success => SUCCESS_TITLE,
            OutcomeStatus::Failed(_) => FAILURE_TITLE,
        }
    }

    /// Notification body
    pub fn message(&self) -> String {
        match &self.status {
            OutcomeStatus::Success => format!(
                "Program '{}' completed successfully!\nExecution time: {:.2} seconds",
                self.function_name, self.elapsed_seconds
            ),
            OutcomeStatus::Failed(error) => format!(
                "Program '{}' failed!\nError: {}\nExecution time: {:.2} seconds",
                self.function_name, error, self.elapsed_seconds
            ),
        }
    }
}

type CallResult<T, E> = std::thread::Result<Result<T, E>>;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

fn classify<T, E: Display>(name: &str, elapsed: Duration, result: &CallResult<T, E>) -> ExecutionOutcome {
    match result {
        Ok(Ok(_)) => ExecutionOutcome::success(name, elapsed),
        Ok(Err(error)) => ExecutionOutcome::failure(name, error, elapsed),
        Err(payload) => ExecutionOutcome::failure(name, panic_message(&**payload), elapsed),
    }
}

fn log_outcome(outcome: &ExecutionOutcome) {
    tracing::info!(
        function = %outcome.function_name,
        elapsed_seconds = outcome.elapsed_seconds,
        success = outcome.is_success(),
        "Execution finished"
    );
}

fn settle<T, E>(result: CallResult<T, E>) -> Result<T, E> {
    match result {
        Ok(result) => result,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Sends a success or failure notification once a call completes
#[derive(Clone)]
pub struct CompletionNotifier {
    sender: Arc<dyn NotificationSender>,
}

impl fmt::Debug for CompletionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionNotifier")
            .field("sender", &self.sender.name())
            .finish()
    }
}

impl CompletionNotifier {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// Builds a Pushover-backed notifier, or `None` when either credential is empty
    pub fn from_credentials(credentials: Credentials) -> Option<Self> {
        if !credentials.is_complete() {
            tracing::debug!("Pushover credentials not set, completion notifications disabled");
            return None;
        }
        Some(Self::new(Arc::new(PushoverNotifier::new(credentials))))
    }

    pub fn sender_name(&self) -> &'static str {
        self.sender.name()
    }

    /// Sends the notification for an outcome, returning whether it was delivered
    ///
    /// Safe to call from inside a Tokio runtime: the blocking send then runs
    /// on a separate thread. A panicking sender counts as a failed delivery.
    pub fn report(&self, outcome: &ExecutionOutcome) -> bool {
        log_outcome(outcome);

        if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::scope(|scope| {
                scope
                    .spawn(|| self.deliver(outcome))
                    .join()
                    .unwrap_or(false)
            })
        } else {
            self.deliver(outcome)
        }
    }

    fn deliver(&self, outcome: &ExecutionOutcome) -> bool {
        let message = outcome.message();
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.sender.send(&message, outcome.title())
        }))
        .unwrap_or_else(|payload| {
            tracing::warn!(
                provider = self.sender.name(),
                "Notification sender panicked: {}",
                panic_message(&*payload)
            );
            false
        })
    }

    /// Same as [`report`](Self::report), with the blocking send moved off the async runtime
    pub async fn report_async(&self, outcome: ExecutionOutcome) -> bool {
        log_outcome(&outcome);

        let notifier = self.clone();
        match tokio::task::spawn_blocking(move || notifier.deliver(&outcome)).await {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!("Notification task did not complete: {}", e);
                false
            }
        }
    }

    /// Runs `f`, notifies on completion, and returns its result unchanged
    ///
    /// A panic inside `f` is reported as a failure and then resumed.
    pub fn run<T, E, F>(&self, name: &str, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Display,
    {
        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(f));
        let outcome = classify(name, start.elapsed(), &result);

        self.report(&outcome);
        settle(result)
    }

    /// Async counterpart of [`run`](Self::run); must be polled inside a Tokio runtime
    pub async fn run_async<T, E, Fut>(&self, name: &str, future: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let start = Instant::now();
        let result = AssertUnwindSafe(future).catch_unwind().await;
        let outcome = classify(name, start.elapsed(), &result);

        self.report_async(outcome).await;
        settle(result)
    }

    /// Wraps a function, naming it after its type path
    pub fn wrap<F>(&self, func: F) -> Wrapped<F> {
        self.wrap_named(function_name::<F>(), func)
    }

    pub fn wrap_named<F>(&self, name: impl Into<Cow<'static, str>>, func: F) -> Wrapped<F> {
        Wrapped::Notifying {
            name: name.into(),
            func,
            notifier: self.clone(),
        }
    }
}

/// A function, optionally instrumented with completion notifications
pub enum Wrapped<F> {
    /// Notifications disabled; the original function, untouched
    Passthrough(F),
    Notifying {
        name: Cow<'static, str>,
        func: F,
        notifier: CompletionNotifier,
    },
}

impl<F> fmt::Debug for Wrapped<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wrapped::Passthrough(_) => f
                .debug_tuple("Passthrough")
                .field(&function_name::<F>())
                .finish(),
            Wrapped::Notifying { name, notifier, .. } => f
                .debug_struct("Notifying")
                .field("name", name)
                .field("notifier", notifier)
                .finish(),
        }
    }
}

impl<F> Wrapped<F> {
    /// Instruments `func` when a notifier is given, otherwise passes it through
    pub fn new(
        notifier: Option<CompletionNotifier>,
        name: impl Into<Cow<'static, str>>,
        func: F,
    ) -> Self {
        match notifier {
            Some(notifier) => notifier.wrap_named(name, func),
            None => Wrapped::Passthrough(func),
        }
    }

    /// Name of the wrapped function
    pub fn name(&self) -> &str {
        match self {
            Wrapped::Passthrough(_) => function_name::<F>(),
            Wrapped::Notifying { name, .. } => name,
        }
    }

    pub fn is_instrumented(&self) -> bool {
        matches!(self, Wrapped::Notifying { .. })
    }

    pub fn get_ref(&self) -> &F {
        match self {
            Wrapped::Passthrough(func) | Wrapped::Notifying { func, .. } => func,
        }
    }

    /// Returns the original function
    pub fn into_inner(self) -> F {
        match self {
            Wrapped::Passthrough(func) | Wrapped::Notifying { func, .. } => func,
        }
    }

    /// Calls the function through `call`, which receives it and forwards the arguments
    ///
    /// ```ignore
    /// let add = notify_on_completion(token, user, add);
    /// let sum = add.invoke(|f| f(2, 3))?;
    /// ```
    pub fn invoke<T, E, C>(&self, call: C) -> Result<T, E>
    where
        C: FnOnce(&F) -> Result<T, E>,
        E: Display,
    {
        match self {
            Wrapped::Passthrough(func) => call(func),
            Wrapped::Notifying {
                name,
                func,
                notifier,
            } => notifier.run(name, || call(func)),
        }
    }

    /// Calls a zero-argument function
    pub fn call<T, E>(&self) -> Result<T, E>
    where
        F: Fn() -> Result<T, E>,
        E: Display,
    {
        self.invoke(|func| func())
    }
}

/// Wraps `func` with Pushover completion notifications
///
/// Returns [`Wrapped::Passthrough`] when either credential is empty.
pub fn notify_on_completion<F>(api_token: &str, user_key: &str, func: F) -> Wrapped<F> {
    notify_on_completion_named(api_token, user_key, function_name::<F>(), func)
}

pub fn notify_on_completion_named<F>(
    api_token: &str,
    user_key: &str,
    name: impl Into<Cow<'static, str>>,
    func: F,
) -> Wrapped<F> {
    let notifier = CompletionNotifier::from_credentials(Credentials::new(api_token, user_key));
    Wrapped::new(notifier, name, func)
}
