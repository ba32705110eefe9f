//! # Shutdown task abstractions.
//!
//! - [`Task`] - trait for implementing async, cancellation-aware cleanup work
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)

mod task;
mod task_fn;

pub use task::{BoxTaskFuture, Task, TaskRef};
pub use task_fn::TaskFn;
