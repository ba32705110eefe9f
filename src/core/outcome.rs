//! # Terminal outcome of a shutdown episode.
//!
//! Exactly one [`Outcome`] is produced per episode. Abnormal outcomes map to
//! reserved process exit statuses:
//!
//! | Code | Outcome                           |
//! |------|-----------------------------------|
//! | 4    | [`Outcome::TimeoutExceeded`]      |
//! | 3    | [`Outcome::SecondInterrupt`]      |
//! | 2    | [`Outcome::TaskError`]            |
//!
//! [`Outcome::Success`] has no status: the host program decides how to exit.
//!
//! Code 3 covers any pair of interrupts, including `SIGTERM` followed by
//! Ctrl-C; see [`interrupts`](crate::interrupts).

use std::sync::Arc;
use std::time::Duration;

use crate::error::TaskError;

/// The graceful shutdown timeout was exceeded.
pub const STATUS_TIMEOUT_EXCEEDED: i32 = 4;
/// A second interrupt was received.
pub const STATUS_INTERRUPT_RECEIVED: i32 = 3;
/// One of the shutdown tasks returned an error.
pub const STATUS_TASK_ERROR: i32 = 2;

/// How a shutdown episode ended.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every task completed successfully within the grace period.
    Success,
    /// The grace period elapsed first; outstanding tasks were abandoned.
    TimeoutExceeded {
        /// Grace period captured when the episode started.
        grace: Duration,
    },
    /// Another interrupt arrived first; outstanding tasks were abandoned.
    SecondInterrupt,
    /// A task failed first; outstanding tasks were abandoned.
    TaskError {
        /// Name of the first task observed failing.
        task: Arc<str>,
        /// Its error.
        error: TaskError,
    },
}

impl Outcome {
    /// Process exit status for abnormal outcomes, `None` for success.
    ///
    /// ```
    /// use gracevisor::{Outcome, STATUS_INTERRUPT_RECEIVED};
    ///
    /// assert_eq!(Outcome::Success.exit_code(), None);
    /// assert_eq!(Outcome::SecondInterrupt.exit_code(), Some(STATUS_INTERRUPT_RECEIVED));
    /// ```
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Outcome::Success => None,
            Outcome::TimeoutExceeded { .. } => Some(STATUS_TIMEOUT_EXCEEDED),
            Outcome::SecondInterrupt => Some(STATUS_INTERRUPT_RECEIVED),
            Outcome::TaskError { .. } => Some(STATUS_TASK_ERROR),
        }
    }

    /// True for [`Outcome::Success`], the only outcome without an exit status.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Outcome::Success => "shutdown_success",
            Outcome::TimeoutExceeded { .. } => "shutdown_timeout_exceeded",
            Outcome::SecondInterrupt => "shutdown_second_interrupt",
            Outcome::TaskError { .. } => "shutdown_task_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let outcomes = [
            Outcome::TimeoutExceeded {
                grace: Duration::from_secs(1),
            },
            Outcome::SecondInterrupt,
            Outcome::TaskError {
                task: Arc::from("flush"),
                error: TaskError::fail("boom"),
            },
        ];
        let codes: Vec<i32> = outcomes.iter().filter_map(Outcome::exit_code).collect();
        assert_eq!(codes, vec![4, 3, 2]);
        assert!(outcomes.iter().all(|o| !o.is_success()));
        assert!(Outcome::Success.is_success());
    }
}
