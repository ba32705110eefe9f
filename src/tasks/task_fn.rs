//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(CancellationToken) -> Fut` so that plain
//! async blocks can be registered as shutdown tasks.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use gracevisor::{TaskError, TaskFn, TaskRef};
//!
//! let t: TaskRef = TaskFn::arc("close-listener", |ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return Err(TaskError::Canceled);
//!     }
//!     // stop accepting connections...
//!     Ok(())
//! });
//!
//! assert_eq!(t.name(), "close-listener");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::task::{BoxTaskFuture, Task};

/// Function-backed task implementation.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`](crate::TaskRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture {
        Box::pin((self.f)(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskRef;

    #[tokio::test]
    async fn test_spawn_passes_token_through() {
        let t: TaskRef = TaskFn::arc("probe", |ctx: CancellationToken| async move {
            if ctx.is_cancelled() {
                Err(TaskError::Canceled)
            } else {
                Ok(())
            }
        });

        assert_eq!(t.name(), "probe");
        assert_eq!(t.spawn(CancellationToken::new()).await, Ok(()));

        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(t.spawn(token).await, Err(TaskError::Canceled));
    }

    #[tokio::test]
    async fn test_each_spawn_is_a_fresh_future() {
        let t = TaskFn::new("fail", |_ctx: CancellationToken| async {
            Err::<(), _>(TaskError::fail("nope"))
        });
        for _ in 0..2 {
            assert_eq!(t.spawn(CancellationToken::new()).await, Err(TaskError::fail("nope")));
        }
    }
}
