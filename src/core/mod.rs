//! Runtime core: interrupt handling and the shutdown episode.
//!
//! Internal modules:
//! - [`coordinator`]: detached routine from first interrupt to terminal action;
//! - [`episode`]: the race between deadline, second interrupt, completion and failure;
//! - [`runner`]: runs one task, catches panics, publishes lifecycle events;
//! - [`interrupts`]: OS and in-process interrupt sources;
//! - [`config`]: grace period sources and coordinator settings;
//! - [`terminate`]: the process termination action;
//! - [`outcome`]: terminal outcomes and their exit statuses.

mod builder;
mod config;
mod coordinator;
mod episode;
pub mod interrupts;
mod outcome;
mod runner;
mod terminate;

pub use builder::CoordinatorBuilder;
pub use config::{Config, DEFAULT_GRACE, Grace, GraceCell, configure};
pub use coordinator::{Coordinator, ListenHandle};
pub use interrupts::{ChannelInterrupts, InterruptSender, Interrupts, OsInterrupts};
pub use outcome::{Outcome, STATUS_INTERRUPT_RECEIVED, STATUS_TASK_ERROR, STATUS_TIMEOUT_EXCEEDED};
pub use terminate::{ProcessExit, Terminate};
