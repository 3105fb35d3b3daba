// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) both request a graceful shutdown.
// A handler that fails to register is disabled, the other one still works.

use crate::logger;

/// Resolve once a shutdown signal arrives
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => Some(s),
        Err(e) => {
            logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
            None
        }
    };

    tokio::select! {
        Ok(()) = tokio::signal::ctrl_c() => {
            logger::log_info("[SIGNAL] SIGINT received, initiating graceful shutdown");
        }
        () = recv_or_pending(sigterm.as_mut()) => {
            logger::log_info("[SIGNAL] SIGTERM received, initiating graceful shutdown");
        }
    }
}

#[cfg(unix)]
async fn recv_or_pending(sig: Option<&mut tokio::signal::unix::Signal>) {
    match sig {
        Some(s) => {
            s.recv().await;
        }
        None => std::future::pending().await,
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_info("[SIGNAL] Ctrl+C received, initiating shutdown"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
