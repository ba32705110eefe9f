//! # Episode event channel.
//!
//! [`Emitter`] is shared by the coordinator routine and every task runner of an
//! episode. Each event is mirrored to `tracing` at `trace` level, then broadcast
//! to the receivers handed out by `Coordinator::subscribe`.
//!
//! Receivers are optional: with none attached, only the trace line remains.
//! A receiver lagging more than the configured capacity observes
//! `RecvError::Lagged` and skips the oldest events.

use tokio::sync::broadcast;
use tracing::trace;

use super::event::Event;

#[derive(Clone, Debug)]
pub(crate) struct Emitter {
    tx: broadcast::Sender<Event>,
}

impl Emitter {
    /// Creates the channel; `capacity` is clamped to at least 1.
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub(crate) fn emit(&self, ev: Event) {
        trace!(
            seq = ev.seq,
            kind = ?ev.kind,
            task = ev.task.as_deref(),
            reason = ev.reason.as_deref(),
            "episode event"
        );
        // No receivers is the common case for `gracevisor::listen`.
        let _ = self.tx.send(ev);
    }

    pub(crate) fn receiver(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_emit_reaches_every_receiver() {
        let emitter = Emitter::new(8);
        let mut a = emitter.receiver();
        let mut b = emitter.receiver();

        emitter.emit(Event::new(EventKind::ShutdownRequested).with_task("none"));

        assert_eq!(a.recv().await.map(|e| e.kind).ok(), Some(EventKind::ShutdownRequested));
        assert_eq!(b.recv().await.map(|e| e.kind).ok(), Some(EventKind::ShutdownRequested));
    }

    #[test]
    fn test_emit_without_receivers_is_a_noop() {
        let emitter = Emitter::new(0);
        emitter.emit(Event::new(EventKind::TaskStarting));
    }
}
