//! # Coordinator: waits for an interrupt and drives one shutdown episode.
//!
//! ```text
//! listen(interrupts, tasks)  ── returns ListenHandle immediately
//!   └─► detached routine
//!         ├─ Idle:    interrupts.next()        (None → routine ends, no episode)
//!         ├─ Running: Episode::begin(grace.current()).run(tasks, &mut interrupts)
//!         └─ Terminal:
//!               ├─ Success           → return (host decides how to exit)
//!               └─ abnormal outcome  → Terminate::terminate(4 | 3 | 2)
//! ```
//!
//! The second-interrupt check reuses the subscription that delivered the first
//! interrupt.
//!
//! ## Caveat
//! Each `listen` call installs its own routine and, for [`Coordinator::listen_os`],
//! its own signal subscription. Nothing prevents two routines from running two
//! episodes for the same signal; call `listen` once per process.

use std::sync::Arc;

use tokio::{sync::broadcast, task::JoinHandle};
use tracing::debug;

use super::{
    builder::CoordinatorBuilder,
    config::Config,
    episode::Episode,
    interrupts::{Interrupts, OsInterrupts},
    outcome::Outcome,
    terminate::Terminate,
};
use crate::{
    error::RuntimeError,
    events::{Emitter, Event},
    tasks::TaskRef,
};

/// Graceful shutdown coordinator.
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use gracevisor::{Config, Coordinator, TaskError, TaskFn, TaskRef};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let coordinator = Coordinator::builder(Config::with_grace(Duration::from_secs(5))).build();
///
///     let flush: TaskRef = TaskFn::arc("flush", |_ctx: CancellationToken| async move {
///         // flush buffers...
///         Ok::<(), TaskError>(())
///     });
///
///     let handle = coordinator.listen_os(vec![flush])?;
///     // ... serve until interrupted ...
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct Coordinator {
    cfg: Config,
    events: Emitter,
    terminator: Arc<dyn Terminate>,
}

impl Coordinator {
    /// Returns a builder for a coordinator with the given configuration.
    pub fn builder(cfg: Config) -> CoordinatorBuilder {
        CoordinatorBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        events: Emitter,
        terminator: Arc<dyn Terminate>,
    ) -> Self {
        Self {
            cfg,
            events,
            terminator,
        }
    }

    /// Creates a receiver for runtime events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.receiver()
    }

    /// Registers `tasks` and waits for interrupts from `interrupts` on a
    /// detached routine. Returns immediately.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime. [`listen_os`](Self::listen_os)
    /// reports that case as [`RuntimeError::NoRuntime`] instead.
    pub fn listen<I: Interrupts>(&self, mut interrupts: I, tasks: Vec<TaskRef>) -> ListenHandle {
        let grace = self.cfg.grace.clone();
        let events = self.events.clone();
        let terminator = Arc::clone(&self.terminator);

        let inner = tokio::spawn(async move {
            if interrupts.next().await.is_none() {
                debug!("interrupt source closed before the first interrupt");
                return None;
            }

            let episode = Episode::begin(grace.current(), events);
            let outcome = episode.run(tasks, &mut interrupts).await;
            if let Some(status) = outcome.exit_code() {
                terminator.terminate(status);
            }
            Some(outcome)
        });
        ListenHandle { inner }
    }

    /// Like [`listen`](Self::listen), subscribing to OS interrupts first.
    ///
    /// Fails with [`RuntimeError::NoRuntime`] outside a tokio runtime and with
    /// [`RuntimeError::SignalRegistration`] when the OS refuses the handlers.
    pub fn listen_os(&self, tasks: Vec<TaskRef>) -> Result<ListenHandle, RuntimeError> {
        tokio::runtime::Handle::try_current()?;
        let interrupts = OsInterrupts::new()?;
        Ok(self.listen(interrupts, tasks))
    }
}

/// Handle to a listening routine.
///
/// Dropping it detaches the routine; it keeps listening.
#[derive(Debug)]
pub struct ListenHandle {
    inner: JoinHandle<Option<Outcome>>,
}

impl ListenHandle {
    /// Waits for the routine to end.
    ///
    /// Returns the episode outcome, or `None` if the interrupt source closed
    /// before any interrupt arrived. With the default [`ProcessExit`](crate::ProcessExit)
    /// action, abnormal outcomes end the process before this returns.
    pub async fn wait(self) -> Option<Outcome> {
        match self.inner.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => None,
        }
    }

    /// True once the routine has ended.
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}
