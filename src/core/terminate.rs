//! # Process termination action.
//!
//! On an abnormal outcome the coordinator ends the process with a status code
//! identifying the cause. The action is injectable so hosts can run their own
//! finalization, and tests can observe the code without exiting.

/// Ends the process (or whatever the host maps termination to).
pub trait Terminate: Send + Sync + 'static {
    /// Called once per abnormal episode with one of the reserved status codes.
    fn terminate(&self, status: i32);
}

/// Terminates the process via [`std::process::exit`].
///
/// Destructors of live values do not run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessExit;

impl Terminate for ProcessExit {
    fn terminate(&self, status: i32) {
        std::process::exit(status)
    }
}

impl<F> Terminate for F
where
    F: Fn(i32) + Send + Sync + 'static,
{
    fn terminate(&self, status: i32) {
        self(status)
    }
}
