//! # Interrupt notification sources.
//!
//! The coordinator consumes interrupts through the [`Interrupts`] trait: the
//! first notification starts an episode, a second one escalates it. The same
//! subscription is used for both, so a notification delivered while tasks are
//! starting is not lost.
//!
//! ## Sources
//! - [`OsInterrupts`]: OS signal delivery.
//!   **Unix:** `SIGINT` (Ctrl-C in terminal) and `SIGTERM` (systemd/Kubernetes stop).
//!   **Other platforms:** Ctrl-C.
//! - [`ChannelInterrupts`]: in-process channel, fed by an [`InterruptSender`].
//!   Useful for tests and for hosts that translate their own stop requests.
//!
//! ## Escalation
//! On Unix both signals count as interrupts and are not told apart. A
//! supervisor's `SIGTERM` starts the episode, and a Ctrl-C (or a repeated
//! `SIGTERM`) arriving before it resolves ends it as
//! [`Outcome::SecondInterrupt`](crate::Outcome::SecondInterrupt), exit status 3.

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A stream of interrupt notifications.
#[async_trait]
pub trait Interrupts: Send + 'static {
    /// Waits for the next interrupt.
    ///
    /// Returns `None` once the source is closed and no more interrupts can arrive.
    async fn next(&mut self) -> Option<()>;
}

/// OS interrupt subscription.
///
/// Signal handlers are registered on construction; notifications arriving
/// between two calls to [`Interrupts::next`] are buffered by the signal driver.
#[derive(Debug)]
pub struct OsInterrupts {
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
    #[cfg(not(unix))]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl OsInterrupts {
    /// Registers the signal handlers.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(unix)]
    pub fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Registers the Ctrl-C handler.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(not(unix))]
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }
}

#[async_trait]
impl Interrupts for OsInterrupts {
    #[cfg(unix)]
    async fn next(&mut self) -> Option<()> {
        tokio::select! {
            v = self.sigint.recv() => v,
            v = self.sigterm.recv() => v,
        }
    }

    #[cfg(not(unix))]
    async fn next(&mut self) -> Option<()> {
        self.ctrl_c.recv().await
    }
}

/// Creates a connected in-process interrupt source.
///
/// The channel is unbounded: every [`InterruptSender::interrupt`] call is
/// delivered, in order.
pub fn channel() -> (InterruptSender, ChannelInterrupts) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InterruptSender { tx }, ChannelInterrupts { rx })
}

/// Sending half of [`channel`]. Cheap to clone.
#[derive(Clone, Debug)]
pub struct InterruptSender {
    tx: mpsc::UnboundedSender<()>,
}

impl InterruptSender {
    /// Delivers one interrupt. Returns `false` if the receiving side is gone.
    pub fn interrupt(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Receiving half of [`channel`].
///
/// Closes once every [`InterruptSender`] is dropped and buffered interrupts are drained.
#[derive(Debug)]
pub struct ChannelInterrupts {
    rx: mpsc::UnboundedReceiver<()>,
}

#[async_trait]
impl Interrupts for ChannelInterrupts {
    async fn next(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}
