//! Error types used by the gracevisor runtime and shutdown tasks.
//!
//! - [`RuntimeError`]: failures of the coordinator itself.
//! - [`TaskError`]: failures reported by individual shutdown tasks.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logs and metrics.

use std::any::Any;
use std::fmt::Display;

use thiserror::Error;

/// # Errors produced by the gracevisor runtime.
///
/// The coordinator fails only while installing its listener: outside a tokio
/// runtime, or when OS interrupt delivery cannot be subscribed to.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Registering the OS signal handlers failed.
    #[error("failed to register interrupt handler: {source}")]
    SignalRegistration {
        /// The underlying I/O error from the signal driver.
        #[from]
        source: std::io::Error,
    },

    /// `listen` was called outside a tokio runtime.
    #[error("no tokio runtime to listen on: {source}")]
    NoRuntime {
        /// Error from `Handle::try_current`.
        #[from]
        source: tokio::runtime::TryCurrentError,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use gracevisor::RuntimeError;
    ///
    /// let err = RuntimeError::from(std::io::Error::other("no signal driver"));
    /// assert_eq!(err.as_label(), "runtime_signal_registration");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::SignalRegistration { .. } => "runtime_signal_registration",
            RuntimeError::NoRuntime { .. } => "runtime_missing",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::SignalRegistration { source } => {
                format!("signal registration failed: {source}")
            }
            RuntimeError::NoRuntime { source } => format!("no runtime: {source}"),
        }
    }
}

/// # Errors produced by shutdown tasks.
///
/// Any error returned by a task ends the episode with
/// [`Outcome::TaskError`](crate::Outcome::TaskError), unless another terminal
/// condition fired first.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task could not finish its cleanup.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task gave up because its cancellation scope expired.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Builds a [`TaskError::Fail`] from anything printable.
    ///
    /// ```
    /// use gracevisor::TaskError;
    ///
    /// let err = TaskError::fail("listener already closed");
    /// assert_eq!(err.to_string(), "execution failed: listener already closed");
    /// ```
    pub fn fail(error: impl Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }
}

/// Extracts a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(TaskError::fail("x").as_label(), "task_failed");
        assert_eq!(TaskError::Canceled.as_label(), "task_canceled");

        let err = RuntimeError::from(std::io::Error::other("boom"));
        assert_eq!(err.as_label(), "runtime_signal_registration");
    }

    #[test]
    fn test_messages_carry_detail() {
        assert_eq!(TaskError::fail("disk full").as_message(), "error: disk full");
        assert_eq!(TaskError::Canceled.as_message(), "context cancelled");

        let err = RuntimeError::from(std::io::Error::other("boom"));
        assert!(err.as_message().contains("boom"));
        assert!(err.to_string().starts_with("failed to register interrupt handler"));
    }

    #[test]
    fn test_missing_runtime_is_reported() {
        let source = tokio::runtime::Handle::try_current().unwrap_err();
        let err = RuntimeError::from(source);
        assert_eq!(err.as_label(), "runtime_missing");
        assert!(err.to_string().starts_with("no tokio runtime"));
    }

    #[test]
    fn test_panic_message_downcasts() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");

        let boxed: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
