// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// On non-Unix platforms only Ctrl+C is handled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown coordination between the signal task and the accept loop
pub struct ShutdownSignal {
    notify: Notify,
    requested: AtomicBool,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            notify: Notify::new(),
            requested: AtomicBool::new(false),
        }
    }

    /// Mark shutdown as requested and wake all waiters
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Wait until shutdown is requested.
    ///
    /// The notified future is created before the flag check so a trigger
    /// landing between the two cannot be missed.
    pub async fn wait(&self) {
        let notified = self.notify.notified();
        if self.is_requested() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that listens for termination signals and
/// triggers the shared shutdown state.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<ShutdownSignal>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            crate::logger::log_error("Failed to register SIGTERM handler");
            return;
        };
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            crate::logger::log_error("Failed to register SIGINT handler");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                crate::logger::log_shutdown_requested("SIGTERM");
            }
            _ = sigint.recv() => {
                crate::logger::log_shutdown_requested("SIGINT");
            }
        }

        shutdown.trigger();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<ShutdownSignal>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_shutdown_requested("Ctrl+C");
            shutdown.trigger();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_after_trigger() {
        let shutdown = Arc::new(ShutdownSignal::new());
        let waiter = Arc::clone(&shutdown);

        let handle = tokio::spawn(async move {
            waiter.wait().await;
        });

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter must wake after trigger")
            .expect("waiter task must not panic");
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_if_already_triggered() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        assert!(shutdown.is_requested());
        tokio::time::timeout(Duration::from_millis(100), shutdown.wait())
            .await
            .expect("wait must not block after trigger");
    }
}
