//! # Shutdown episode: one race from first interrupt to terminal outcome.
//!
//! ```text
//! first interrupt
//!   └─► grace = Grace::current()                (read once, fixed for the episode)
//!   └─► Scope::with_deadline(grace)             (root token + expiry watcher)
//!   └─► spawn run_task(task_i, root.child())    (all tasks, unordered)
//!   └─► select! (unbiased, first ready wins)
//!         ├─ root expired                ─► TimeoutExceeded
//!         ├─ interrupts.next()           ─► SecondInterrupt
//!         └─ drain(join set)
//!               ├─ first Err observed    ─► TaskError (first-error-wins)
//!               └─ set empty             ─► Success
//! ```
//!
//! ## Rules
//! - The scope exists before any task is spawned.
//! - The deadline is derived from the grace captured at episode start only.
//! - On every non-success outcome outstanding tasks are **detached**, never
//!   aborted; they may keep running until they observe their token.
//! - Only the deadline cancels the scope while the race is open. Success
//!   releases it afterwards; abnormal outcomes leave it to the deadline.
//! - Exact ties (e.g. the last task finishing at the deadline) resolve
//!   either way; exactly one outcome is produced.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    task::{Id, JoinSet},
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    core::{
        interrupts::Interrupts,
        outcome::Outcome,
        runner::{TaskReport, run_task},
    },
    error::TaskError,
    events::{Emitter, Event, EventKind},
    tasks::TaskRef,
};

/// Deadline-bound cancellation scope shared by all tasks of an episode.
struct Scope {
    root: CancellationToken,
}

impl Scope {
    /// Creates the root token and a detached watcher cancelling it at `now + grace`.
    ///
    /// A grace too large to be represented as an instant never expires.
    fn with_deadline(grace: Duration) -> Self {
        let root = CancellationToken::new();
        if let Some(deadline) = Instant::now().checked_add(grace) {
            let token = root.clone();
            tokio::spawn(async move {
                tokio::select! {
                    () = time::sleep_until(deadline) => token.cancel(),
                    () = token.cancelled() => {}
                }
            });
        }
        Self { root }
    }

    /// Token handed to one task.
    fn child(&self) -> CancellationToken {
        self.root.child_token()
    }

    /// Completes once the deadline has passed.
    async fn expired(&self) {
        self.root.cancelled().await
    }

    /// Releases the scope early (success path).
    fn release(self) {
        self.root.cancel();
    }
}

/// One shutdown episode, created when the first interrupt is observed.
pub(crate) struct Episode {
    grace: Duration,
    events: Emitter,
}

impl Episode {
    /// Starts an episode with the grace captured by the caller.
    pub(crate) fn begin(grace: Duration, events: Emitter) -> Self {
        info!(timeout = ?grace, "shutting down");
        events.emit(Event::new(EventKind::ShutdownRequested).with_timeout(grace));
        Self { grace, events }
    }

    /// Launches `tasks` and resolves the race. Also reports the outcome
    /// (one log line, one terminal event).
    pub(crate) async fn run<I>(self, tasks: Vec<TaskRef>, interrupts: &mut I) -> Outcome
    where
        I: Interrupts + ?Sized,
    {
        let outcome = self.race(tasks, interrupts).await;
        self.report(&outcome);
        outcome
    }

    async fn race<I>(&self, tasks: Vec<TaskRef>, interrupts: &mut I) -> Outcome
    where
        I: Interrupts + ?Sized,
    {
        let scope = Scope::with_deadline(self.grace);
        if tasks.is_empty() {
            scope.release();
            return Outcome::Success;
        }

        let mut set = JoinSet::new();
        let mut names = HashMap::with_capacity(tasks.len());
        for task in tasks {
            let name: Arc<str> = Arc::from(task.name());
            let handle = set.spawn(run_task(task, scope.child(), self.events.clone()));
            names.insert(handle.id(), name);
        }

        let outcome = tokio::select! {
            () = scope.expired() => Outcome::TimeoutExceeded { grace: self.grace },
            () = second_interrupt(interrupts) => Outcome::SecondInterrupt,
            res = drain(&mut set, &names) => match res {
                Ok(()) => Outcome::Success,
                Err((task, error)) => Outcome::TaskError { task, error },
            },
        };

        if outcome.is_success() {
            scope.release();
        } else {
            debug!(outstanding = set.len(), "abandoning shutdown tasks");
            set.detach_all();
        }
        outcome
    }

    fn report(&self, outcome: &Outcome) {
        let ev = match outcome {
            Outcome::Success => {
                info!("graceful shutdown complete");
                Event::new(EventKind::AllStoppedWithin)
            }
            Outcome::TimeoutExceeded { grace } => {
                error!(timeout = ?grace, "shutdown timeout exceeded");
                Event::new(EventKind::GraceExceeded).with_timeout(*grace)
            }
            Outcome::SecondInterrupt => {
                warn!("interrupt received; shutting down immediately");
                Event::new(EventKind::SecondInterrupt)
            }
            Outcome::TaskError { task, error } => {
                error!(task = %task, error = %error, "error during graceful shutdown");
                Event::new(EventKind::AbortedOnError)
                    .with_task(task.clone())
                    .with_reason(error.to_string())
            }
        };
        self.events.emit(ev);
    }
}

/// Completes on the next interrupt. Pending forever once the source is closed.
async fn second_interrupt<I>(interrupts: &mut I)
where
    I: Interrupts + ?Sized,
{
    if interrupts.next().await.is_none() {
        debug!("interrupt source closed; no second interrupt can arrive");
        std::future::pending::<()>().await;
    }
}

/// Joins tasks in completion order; stops at the first failure.
///
/// The runner catches task panics itself; `names` only serves join errors
/// that still get through.
async fn drain(
    set: &mut JoinSet<TaskReport>,
    names: &HashMap<Id, Arc<str>>,
) -> Result<(), (Arc<str>, TaskError)> {
    while let Some(joined) = set.join_next_with_id().await {
        match joined {
            Ok((_, (_, Ok(())))) => {}
            Ok((_, (task, Err(error)))) => return Err((task, error)),
            Err(join_err) => {
                let task = names
                    .get(&join_err.id())
                    .cloned()
                    .unwrap_or_else(|| Arc::from("<unknown>"));
                return Err((task, TaskError::fail(join_err)));
            }
        }
    }
    Ok(())
}
