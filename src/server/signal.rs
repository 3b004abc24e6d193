// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Wake the accept loop
    pub fn request_shutdown(&self) {
        // notify_one keeps a permit if the loop is between polls
        self.shutdown.notify_one();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// This spawns a background task that listens for SIGINT/SIGTERM and
/// requests shutdown on the first one received. Each signal is registered
/// on its own, so a failed registration leaves the other one working.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let name = tokio::select! {
            name = wait_for_signal(signal(SignalKind::terminate()), "SIGTERM") => name,
            name = wait_for_signal(signal(SignalKind::interrupt()), "SIGINT (Ctrl+C)") => name,
        };
        logger::log_info(&format!("\n[SIGNAL] {name} received, shutting down..."));
        handler.request_shutdown();
    });
}

/// Resolve once the signal arrives; a failed registration never resolves
#[cfg(unix)]
async fn wait_for_signal(
    registration: std::io::Result<tokio::signal::unix::Signal>,
    name: &'static str,
) -> &'static str {
    match registration {
        Ok(mut stream) => {
            if stream.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
            name
        }
        Err(e) => {
            logger::log_error(&format!("Failed to register {name} handler: {e}"));
            std::future::pending().await
        }
    }
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_info("\n[SIGNAL] Ctrl+C received, shutting down...");
                handler.request_shutdown();
            }
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_shutdown_before_wait_is_not_lost() {
        let handler = SignalHandler::new();
        handler.request_shutdown();

        tokio::time::timeout(std::time::Duration::from_secs(1), handler.shutdown.notified())
            .await
            .expect("stored permit should wake the waiter");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_registration_does_not_end_wait() {
        let failed = Err(std::io::Error::from(std::io::ErrorKind::Other));
        let waited = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            wait_for_signal(failed, "SIGINT"),
        )
        .await;
        assert!(waited.is_err(), "a failed registration must keep waiting");
    }
}
