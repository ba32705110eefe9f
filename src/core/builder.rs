use std::sync::Arc;

use super::{
    config::Config,
    coordinator::Coordinator,
    terminate::{ProcessExit, Terminate},
};
use crate::events::Emitter;

/// Builder for constructing a [`Coordinator`] with injected collaborators.
pub struct CoordinatorBuilder {
    cfg: Config,
    terminator: Arc<dyn Terminate>,
}

impl CoordinatorBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Defaults to [`ProcessExit`] as termination action.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            terminator: Arc::new(ProcessExit),
        }
    }

    /// Replaces the termination action invoked on abnormal outcomes.
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminate>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Builds the coordinator. Does not need a runtime; `listen` does.
    pub fn build(self) -> Coordinator {
        let events = Emitter::new(self.cfg.event_capacity_clamped());
        Coordinator::new_internal(self.cfg, events, self.terminator)
    }
}
