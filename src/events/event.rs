//! # Runtime events emitted during a shutdown episode.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Episode start**: the first interrupt was observed
//! - **Task lifecycle**: a shutdown task started, stopped or failed
//! - **Terminal**: exactly one per episode, mirrors the resolved [`Outcome`](crate::Outcome)
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use gracevisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed)
//!     .with_task("flush")
//!     .with_reason("disk full")
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.task.as_deref(), Some("flush"));
//! assert_eq!(ev.timeout_ms, Some(5_000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Episode start ===
    /// First interrupt observed; tasks are about to be launched.
    ///
    /// Sets:
    /// - `timeout_ms`: grace period captured for this episode
    ShutdownRequested,

    // === Task lifecycle ===
    /// A shutdown task was launched.
    ///
    /// Sets:
    /// - `task`: task name
    TaskStarting,

    /// A shutdown task finished successfully.
    ///
    /// Sets:
    /// - `task`: task name
    TaskStopped,

    /// A shutdown task reported a failure (or panicked).
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: failure message
    TaskFailed,

    // === Terminal ===
    /// All tasks completed within the grace period.
    AllStoppedWithin,

    /// The grace period elapsed before all tasks completed.
    ///
    /// Sets:
    /// - `timeout_ms`: grace period of the episode
    GraceExceeded,

    /// A second interrupt arrived before all tasks completed.
    SecondInterrupt,

    /// A task failure ended the episode.
    ///
    /// Sets:
    /// - `task`: name of the failing task
    /// - `reason`: failure message
    AbortedOnError,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the task, if applicable.
    pub task: Option<Arc<str>>,
    /// Human-readable reason (error messages).
    pub reason: Option<Arc<str>>,
    /// Grace period in milliseconds (compact).
    pub timeout_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            reason: None,
            timeout_ms: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a grace period (stored as milliseconds, saturating).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// True for the four kinds that close an episode.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::AllStoppedWithin
                | EventKind::GraceExceeded
                | EventKind::SecondInterrupt
                | EventKind::AbortedOnError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::TaskStarting);
        let b = Event::new(EventKind::TaskStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_timeout_saturates() {
        let ev = Event::new(EventKind::GraceExceeded).with_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(ev.timeout_ms, Some(u32::MAX));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(Event::new(EventKind::GraceExceeded).is_terminal());
        assert!(Event::new(EventKind::AbortedOnError).is_terminal());
        assert!(!Event::new(EventKind::ShutdownRequested).is_terminal());
        assert!(!Event::new(EventKind::TaskFailed).is_terminal());
    }
}
