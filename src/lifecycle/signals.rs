//! OS signal handling.
//!
//! SIGINT and SIGTERM both request a graceful stop. There is no reload
//! signal: the target is fixed for the life of the process.

use std::io;

use crate::lifecycle::Shutdown;

/// Wait for SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        _ = term.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "Ctrl+C")
}

/// Trigger `shutdown` once a termination signal arrives.
///
/// If the handlers cannot be installed this never completes, leaving the
/// loop to run until the process is killed.
pub async fn forward_signals(shutdown: &Shutdown) {
    match wait_for_signal().await {
        Ok(name) => {
            tracing::info!(signal = name, "Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install signal handlers");
            std::future::pending::<()>().await;
        }
    }
}
