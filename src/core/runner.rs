//! # Run a single shutdown task.
//!
//! Executes one [`Task`](crate::Task) with its child cancellation token and
//! publishes lifecycle events.
//!
//! ## Event flow
//! ```text
//! publish TaskStarting
//! task.spawn(ctx)
//!   ├─ Ok(())  → publish TaskStopped
//!   ├─ Err(e)  → publish TaskFailed{ reason = e }
//!   └─ panic   → caught → TaskError::Fail → publish TaskFailed
//!                (inside `spawn` itself or while polling its future)
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event: `TaskStopped` or `TaskFailed`.
//! - Events are published even when the episode already resolved (late results);
//!   nobody waits for them.
//! - A panic never escapes: it becomes a [`TaskError::Fail`] with the panic message.

use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    error::{TaskError, panic_message},
    events::{Emitter, Event, EventKind},
    tasks::TaskRef,
};

/// Result of one task run, tagged with the task name.
pub(crate) type TaskReport = (Arc<str>, Result<(), TaskError>);

/// Runs `task` once, publishing its lifecycle to `events`.
pub(crate) async fn run_task(task: TaskRef, ctx: CancellationToken, events: Emitter) -> TaskReport {
    let name: Arc<str> = Arc::from(task.name());
    events.emit(Event::new(EventKind::TaskStarting).with_task(Arc::clone(&name)));
    debug!(task = %name, "shutdown task starting");

    let guarded = async move { task.spawn(ctx).await };
    let res = match std::panic::AssertUnwindSafe(guarded).catch_unwind().await {
        Ok(res) => res,
        Err(payload) => Err(TaskError::Fail {
            error: format!("task panicked: {}", panic_message(payload.as_ref())),
        }),
    };

    match &res {
        Ok(()) => {
            debug!(task = %name, "shutdown task completed");
            events.emit(Event::new(EventKind::TaskStopped).with_task(Arc::clone(&name)));
        }
        Err(e) => {
            debug!(task = %name, error = %e, "shutdown task failed");
            events.emit(
                Event::new(EventKind::TaskFailed)
                    .with_task(Arc::clone(&name))
                    .with_reason(e.to_string()),
            );
        }
    }
    (name, res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{BoxTaskFuture, Task, TaskFn};

    struct PanicsInSpawn;

    impl Task for PanicsInSpawn {
        fn name(&self) -> &str {
            "eager"
        }

        fn spawn(&self, _ctx: CancellationToken) -> BoxTaskFuture {
            panic!("boom in spawn");
        }
    }

    #[tokio::test]
    async fn test_success_publishes_starting_then_stopped() {
        let events = Emitter::new(8);
        let mut rx = events.receiver();
        let task: TaskRef = TaskFn::arc("ok", |_ctx: CancellationToken| async {
            Ok::<(), TaskError>(())
        });

        let (name, res) = run_task(task, CancellationToken::new(), events).await;
        assert_eq!(&*name, "ok");
        assert_eq!(res, Ok(()));

        assert_eq!(rx.recv().await.unwrap().kind, EventKind::TaskStarting);
        assert_eq!(rx.recv().await.unwrap().kind, EventKind::TaskStopped);
    }

    #[tokio::test]
    async fn test_failure_carries_reason() {
        let events = Emitter::new(8);
        let mut rx = events.receiver();
        let task: TaskRef = TaskFn::arc("flush", |_ctx: CancellationToken| async {
            Err::<(), TaskError>(TaskError::fail("disk full"))
        });

        let (_, res) = run_task(task, CancellationToken::new(), events).await;
        assert_eq!(res, Err(TaskError::fail("disk full")));

        let _starting = rx.recv().await.unwrap();
        let failed = rx.recv().await.unwrap();
        assert_eq!(failed.kind, EventKind::TaskFailed);
        assert_eq!(failed.task.as_deref(), Some("flush"));
        assert_eq!(failed.reason.as_deref(), Some("execution failed: disk full"));
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let events = Emitter::new(8);
        let task: TaskRef = TaskFn::arc("buggy", |_ctx: CancellationToken| async {
            let slots: Vec<u8> = Vec::new();
            std::hint::black_box(slots[3]);
            Ok::<(), TaskError>(())
        });

        let (name, res) = run_task(task, CancellationToken::new(), events).await;
        assert_eq!(&*name, "buggy");
        match res {
            Err(TaskError::Fail { error }) => assert!(error.contains("index out of bounds")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_panic_inside_spawn_keeps_task_name() {
        let events = Emitter::new(8);
        let mut rx = events.receiver();

        let (name, res) = run_task(Arc::new(PanicsInSpawn), CancellationToken::new(), events).await;
        assert_eq!(&*name, "eager");
        assert_eq!(
            res,
            Err(TaskError::fail("task panicked: boom in spawn"))
        );

        let _starting = rx.recv().await.unwrap();
        let failed = rx.recv().await.unwrap();
        assert_eq!(failed.kind, EventKind::TaskFailed);
        assert_eq!(failed.task.as_deref(), Some("eager"));
    }
}
