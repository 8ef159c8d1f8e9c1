//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT / SIGTERM (Ctrl+C on non-unix targets)
//! - Translate the first one into a [`Shutdown`] trigger

use crate::lifecycle::Shutdown;

/// Wait for a termination signal.
pub async fn wait_for_termination() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => {
                tracing::info!("SIGINT received, shutting down...");
            }
            _ = sigterm.recv() => {
                tracing::info!("SIGTERM received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown signal received...");
    }

    Ok(())
}

/// Trigger `shutdown` on the first termination signal.
///
/// If the handlers cannot be installed the node keeps running and only an
/// explicit trigger stops it.
pub async fn forward_to(shutdown: Shutdown) {
    match wait_for_termination().await {
        Ok(()) => shutdown.trigger(),
        Err(e) => tracing::error!(error = %e, "Failed to install signal handlers"),
    }
}
