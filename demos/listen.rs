//! # Example: listen
//!
//! Registers three shutdown tasks and waits for Ctrl-C.
//!
//! - Press Ctrl-C once: tasks run; `flush-buffers` finishes, `drain-queue`
//!   needs longer than the grace period → exit status 4.
//! - Press Ctrl-C twice: exit status 3.
//! - Set `FAIL=1` to make `close-listener` fail → exit status 2.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example listen
//! ```

use std::time::Duration;

use gracevisor::{TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    gracevisor::configure(Duration::from_secs(2));

    let fail = std::env::var_os("FAIL").is_some();

    let close: TaskRef = TaskFn::arc("close-listener", move |_ctx: CancellationToken| async move {
        if fail {
            return Err(TaskError::fail("listener socket already closed"));
        }
        Ok(())
    });

    let flush: TaskRef = TaskFn::arc("flush-buffers", |ctx: CancellationToken| async move {
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(300)) => Ok(()),
            _ = ctx.cancelled() => Err(TaskError::Canceled),
        }
    });

    let drain: TaskRef = TaskFn::arc("drain-queue", |ctx: CancellationToken| async move {
        for _ in 0..50 {
            if ctx.is_cancelled() {
                return Err(TaskError::Canceled);
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    });

    let handle = gracevisor::listen(vec![close, flush, drain])?;
    tracing::info!("running; press Ctrl-C to shut down");

    if let Some(outcome) = handle.wait().await {
        tracing::info!(outcome = outcome.as_label(), "exiting");
    }
    Ok(())
}
