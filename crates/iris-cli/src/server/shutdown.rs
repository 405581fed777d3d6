//! Termination signals and the drain deadline.

use std::fmt;
use std::time::Duration;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Ctrl+C / SIGINT.
    Interrupt,
    /// SIGTERM, sent by process managers and container runtimes.
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        })
    }
}

/// Resolves once the server should stop accepting connections.
///
/// After the signal arrives, in-flight requests have `drain_timeout` to
/// complete before the process exits with status 1.
pub async fn shutdown_signal(drain_timeout: Duration) {
    let signal = wait_for_signal().await;
    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        %signal,
        drain_timeout_secs = drain_timeout.as_secs(),
        "Draining in-flight requests"
    );

    tokio::spawn(enforce_drain_deadline(drain_timeout));
}

async fn enforce_drain_deadline(drain_timeout: Duration) {
    tokio::time::sleep(drain_timeout).await;
    tracing::warn!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        drain_timeout_secs = drain_timeout.as_secs(),
        "Requests still running after the drain timeout, exiting"
    );
    std::process::exit(1);
}

/// Waits for the first termination signal.
///
/// A listener that cannot be installed is logged and never fires, so the
/// other one still works.
pub async fn wait_for_signal() -> Signal {
    tokio::select! {
        () = interrupt() => Signal::Interrupt,
        () = terminate() => Signal::Terminate,
    }
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log_listener_error(Signal::Interrupt, &err);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            log_listener_error(Signal::Terminate, &err);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

fn log_listener_error(signal: Signal, err: &std::io::Error) {
    tracing::error!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        %signal,
        error = %err,
        "Cannot listen for signal"
    );
}
