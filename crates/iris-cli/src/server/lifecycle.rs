//! Startup and exit bookkeeping for a single server run.

use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use super::{Result, ServerError};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// One run of the HTTP server, from bind to exit.
#[derive(Debug)]
pub struct Lifecycle {
    addr: SocketAddr,
    started_at: Instant,
}

impl Lifecycle {
    /// Marks the server as listening on `addr`.
    pub fn start(config: &ServerConfig, addr: SocketAddr) -> Self {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %addr,
            development = config.is_development(),
            "Accepting connections"
        );

        if config.binds_to_all_interfaces() {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %addr,
                "Listening on every interface; keep the port behind a firewall"
            );
        }

        Self {
            addr,
            started_at: Instant::now(),
        }
    }

    /// Time since [`Lifecycle::start`].
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Records how the serve loop ended and converts its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Runtime`] when the serve loop failed.
    pub fn finish(self, outcome: io::Result<()>) -> Result<()> {
        let uptime_secs = self.uptime().as_secs();

        let Err(source) = outcome else {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                addr = %self.addr,
                uptime_secs,
                "Server stopped"
            );
            return Ok(());
        };

        let err = ServerError::Runtime(source);
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            addr = %self.addr,
            uptime_secs,
            code = err.error_code(),
            error = %err,
            suggestion = err.suggestion(),
            "Server stopped unexpectedly"
        );
        Err(err)
    }
}
