//! # Runtime configuration.
//!
//! Provides [`Config`] for the coordinator and the process-wide grace period.
//!
//! The grace period is the only value an episode depends on. It is read
//! **once**, at the moment the first interrupt is processed; later writes do not
//! affect an episode already in flight.
//!
//! ## Grace sources
//! - [`Grace::Global`] → the process-wide cell written by [`configure`] (default 10s)
//! - [`Grace::Shared`] → a caller-owned [`GraceCell`], useful for embedding and tests
//! - [`Grace::Fixed`] → a constant
//!
//! A zero grace period disables graceful waiting: the deadline is already due
//! when the tasks are launched.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default grace period applied when [`configure`] is never called.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(10);

static GLOBAL_GRACE: GraceCell = GraceCell::new(DEFAULT_GRACE);

/// Sets the process-wide grace period.
///
/// Call at startup, before the first interrupt is observed. A write racing
/// with the first interrupt may or may not be seen by that episode.
pub fn configure(timeout: Duration) {
    GLOBAL_GRACE.set(timeout);
}

/// Atomic duration cell (nanosecond resolution, saturating at `u64::MAX` ns).
#[derive(Debug)]
pub struct GraceCell {
    nanos: AtomicU64,
}

impl GraceCell {
    /// Creates a cell holding `d`.
    pub const fn new(d: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(to_nanos(d)),
        }
    }

    /// Returns the process-wide cell used by [`Grace::Global`].
    pub fn global() -> &'static GraceCell {
        &GLOBAL_GRACE
    }

    /// Overwrites the stored duration.
    pub fn set(&self, d: Duration) {
        self.nanos.store(to_nanos(d), Ordering::SeqCst);
    }

    /// Reads the stored duration.
    pub fn get(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

const fn to_nanos(d: Duration) -> u64 {
    let n = d.as_nanos();
    if n > u64::MAX as u128 {
        u64::MAX
    } else {
        n as u64
    }
}

/// Where an episode reads its grace period from.
#[derive(Clone, Debug, Default)]
pub enum Grace {
    /// The process-wide cell written by [`configure`].
    #[default]
    Global,
    /// A caller-owned cell.
    Shared(Arc<GraceCell>),
    /// A constant value.
    Fixed(Duration),
}

impl Grace {
    /// Returns the grace period in effect right now.
    pub fn current(&self) -> Duration {
        match self {
            Grace::Global => GraceCell::global().get(),
            Grace::Shared(cell) => cell.get(),
            Grace::Fixed(d) => *d,
        }
    }
}

/// Configuration for the coordinator.
///
/// ## Field semantics
/// - `grace`: source of the grace period, read once per episode
/// - `event_capacity`: ring buffer size of the event channel (min 1)
#[derive(Clone, Debug)]
pub struct Config {
    /// Source of the maximum time tasks get before the process is terminated.
    pub grace: Grace,

    /// Capacity of the event channel behind `Coordinator::subscribe`.
    ///
    /// Slow receivers that lag behind more than `event_capacity` messages will
    /// receive `Lagged` and skip older items.
    pub event_capacity: usize,
}

impl Config {
    /// Convenience constructor with a fixed grace period.
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            grace: Grace::Fixed(grace),
            ..Self::default()
        }
    }

    /// Returns the event capacity clamped to a minimum of 1.
    #[inline]
    pub fn event_capacity_clamped(&self) -> usize {
        self.event_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = Grace::Global` (10s unless [`configure`]d)
    /// - `event_capacity = 1024`
    fn default() -> Self {
        Self {
            grace: Grace::Global,
            event_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_set_get() {
        let cell = GraceCell::new(Duration::from_millis(50));
        assert_eq!(cell.get(), Duration::from_millis(50));
        cell.set(Duration::ZERO);
        assert_eq!(cell.get(), Duration::ZERO);
    }

    #[test]
    fn test_cell_saturates_huge_durations() {
        let cell = GraceCell::new(Duration::MAX);
        assert_eq!(cell.get(), Duration::from_nanos(u64::MAX));
    }

    #[test]
    fn test_shared_grace_tracks_cell() {
        let cell = Arc::new(GraceCell::new(Duration::from_secs(1)));
        let grace = Grace::Shared(cell.clone());
        cell.set(Duration::from_millis(7));
        assert_eq!(grace.current(), Duration::from_millis(7));
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(matches!(cfg.grace, Grace::Global));
        assert_eq!(cfg.event_capacity, 1024);

        let cfg = Config {
            event_capacity: 0,
            ..Config::with_grace(Duration::from_secs(2))
        };
        assert_eq!(cfg.event_capacity_clamped(), 1);
        assert_eq!(cfg.grace.current(), Duration::from_secs(2));
    }
}
