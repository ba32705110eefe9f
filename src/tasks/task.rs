//! # Shutdown task abstraction.
//!
//! A [`Task`] is one piece of cleanup work run when the first interrupt arrives
//! (closing a listener, flushing a buffer, draining a queue). It is started
//! exactly once per shutdown episode, never retried.
//!
//! A task receives a [`CancellationToken`] that is cancelled when the grace
//! period runs out. Tasks are expected to observe it and stop promptly; the
//! coordinator never stops them forcibly.

use std::{future::Future, pin::Pin, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Boxed future returned by [`Task::spawn`].
pub type BoxTaskFuture = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancellation-aware cleanup unit.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use gracevisor::{BoxTaskFuture, Task, TaskError};
///
/// struct FlushLogs;
///
/// impl Task for FlushLogs {
///     fn name(&self) -> &str { "flush-logs" }
///
///     fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture {
///         Box::pin(async move {
///             if ctx.is_cancelled() {
///                 return Err(TaskError::Canceled);
///             }
///             // flush...
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Creates the future that performs the cleanup.
    ///
    /// `ctx` is cancelled once the grace period elapses.
    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture;
}
