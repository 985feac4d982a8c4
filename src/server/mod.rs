// Server module entry
// Accept loop with graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;
pub use signal::ShutdownSignal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Serve connections until shutdown is requested, then drain.
///
/// Accepted connections run in their own tasks; the loop itself only
/// accepts and hands off. On shutdown the listener is dropped first so no
/// new connections arrive while in-flight ones finish.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<ShutdownSignal>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => {
                break;
            }
        }
    }

    // Stop accepting before draining
    drop(listener);
    logger::log_shutdown_started();

    let drain_timeout = Duration::from_secs(config.performance.shutdown_timeout);
    wait_for_drain(&active_connections, drain_timeout).await;

    logger::log_shutdown_complete();
    Ok(())
}

/// Wait until the active connection count reaches zero or the timeout
/// elapses. Keep-alive connections with no request in flight still count,
/// so the wait is bounded.
async fn wait_for_drain(active_connections: &AtomicUsize, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown timeout reached with {remaining} connections still active"
            ));
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_when_idle() {
        let active = AtomicUsize::new(0);
        // Must return immediately, well within the test timeout
        tokio::time::timeout(
            Duration::from_secs(1),
            wait_for_drain(&active, Duration::from_secs(30)),
        )
        .await
        .expect("idle drain must not wait for the full timeout");
    }

    #[tokio::test]
    async fn test_drain_gives_up_at_deadline() {
        let active = AtomicUsize::new(1);
        tokio::time::timeout(
            Duration::from_secs(2),
            wait_for_drain(&active, Duration::from_millis(100)),
        )
        .await
        .expect("drain must stop at its deadline even with active connections");
    }

    #[tokio::test]
    async fn test_drain_observes_counter_reaching_zero() {
        let active = Arc::new(AtomicUsize::new(1));
        let decrement = Arc::clone(&active);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            decrement.fetch_sub(1, Ordering::SeqCst);
        });

        tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_drain(&active, Duration::from_secs(30)),
        )
        .await
        .expect("drain must return once the counter hits zero");
    }
}
