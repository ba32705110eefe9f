//! Episode events: data model and the channel that carries them.
//!
//! - [`EventKind`], [`Event`]: classification and payload metadata
//! - `Emitter`: crate-private broadcast channel, mirrored to `tracing`
//!
//! Publishers are the coordinator routine (episode start, terminal outcome)
//! and the task runner (per-task start/stop/failure). Consumers hold a
//! receiver from `Coordinator::subscribe`.

mod emitter;
mod event;

pub(crate) use emitter::Emitter;
pub use event::{Event, EventKind};
