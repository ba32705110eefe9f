//! # gracevisor
//!
//! **Gracevisor** coordinates graceful process shutdown for tokio programs.
//!
//! On the first interrupt it runs every registered cleanup task concurrently,
//! bounds them with a grace period, and resolves the episode into exactly one
//! outcome. Abnormal outcomes terminate the process with a distinct status.
//!
//! ## Architecture
//! ```text
//!   listen(tasks) ──► detached routine ──► Interrupts::next()   (Idle)
//!                                               │ first interrupt
//!                                               ▼
//!                        grace = Grace::current()   (captured once)
//!                        root token + expiry watcher at now + grace
//!                                               │
//!            ┌──────────────────┬───────────────┼──────────────────┐
//!            ▼                  ▼               ▼                  ▼
//!       run_task(#1)       run_task(#2)   run_task(#N)      Interrupts::next()
//!            │                  │               │                  │
//!            └──── JoinSet (completion order) ──┘                  │
//!                     │                 │                          │
//!              all Ok │     first Err   │       root expired       │ second interrupt
//!                     ▼                 ▼             ▼            ▼
//!                 Success          TaskError   TimeoutExceeded  SecondInterrupt
//!                 (return)         exit 2      exit 4           exit 3
//! ```
//!
//! Outstanding tasks are abandoned on abnormal outcomes: they are detached,
//! never aborted, and only the deadline cancels their token.
//!
//! ## Features
//! | Area              | Description                                         | Key types / traits                        |
//! |-------------------|-----------------------------------------------------|-------------------------------------------|
//! | **Coordination**  | One episode per first interrupt, one outcome each   | [`Coordinator`], [`Outcome`], [`listen`]  |
//! | **Tasks**         | Cancellation-aware cleanup units                    | [`Task`], [`TaskFn`], [`TaskRef`]         |
//! | **Configuration** | Process-wide or injected grace period               | [`configure`], [`Config`], [`Grace`]      |
//! | **Collaborators** | Injectable interrupt source and termination action  | [`Interrupts`], [`Terminate`]             |
//! | **Events**        | Lifecycle events, mirrored into `tracing`           | [`Event`], [`Coordinator::subscribe`]     |
//! | **Errors**        | Typed errors for tasks and the runtime              | [`TaskError`], [`RuntimeError`]           |
//!
//! Status messages are emitted with [`tracing`]; install a subscriber in the
//! binary to see them.
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use gracevisor::{TaskError, TaskFn, TaskRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     gracevisor::configure(Duration::from_secs(5));
//!
//!     let close: TaskRef = TaskFn::arc("close-listener", |ctx: CancellationToken| async move {
//!         if ctx.is_cancelled() {
//!             return Err(TaskError::Canceled);
//!         }
//!         Ok(())
//!     });
//!
//!     let handle = gracevisor::listen(vec![close])?;
//!     // ... run the service ...
//!     handle.wait().await;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::interrupts;
pub use crate::core::{
    ChannelInterrupts, Config, Coordinator, CoordinatorBuilder, DEFAULT_GRACE, Grace, GraceCell,
    InterruptSender, Interrupts, ListenHandle, OsInterrupts, Outcome, ProcessExit,
    STATUS_INTERRUPT_RECEIVED, STATUS_TASK_ERROR, STATUS_TIMEOUT_EXCEEDED, Terminate, configure,
};
pub use error::{RuntimeError, TaskError};
pub use events::{Event, EventKind};
pub use tasks::{BoxTaskFuture, Task, TaskFn, TaskRef};

/// Subscribes to OS interrupts and registers `tasks` with a coordinator using
/// the process-wide grace period and [`ProcessExit`].
///
/// Returns immediately; the waiting happens on a detached tokio task. Each call
/// installs an independent routine and subscription.
///
/// Outside a tokio runtime this returns [`RuntimeError::NoRuntime`].
pub fn listen(tasks: Vec<TaskRef>) -> Result<ListenHandle, RuntimeError> {
    Coordinator::builder(Config::default())
        .build()
        .listen_os(tasks)
}
