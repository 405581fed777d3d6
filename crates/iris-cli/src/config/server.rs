//! Listener address and shutdown settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Port the capture extension expects the server on.
const DEFAULT_PORT: u16 = 3333;

/// Lowest port that does not need elevated privileges.
const MIN_UNPRIVILEGED_PORT: u16 = 1024;

const DEFAULT_SHUTDOWN_TIMEOUT: u64 = 30;

/// Accepted drain windows, in seconds.
const SHUTDOWN_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;

/// Where the server listens and how long it drains on exit.
///
/// Read from `HOST`, `PORT` and `SHUTDOWN_TIMEOUT`.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Interface to listen on; `0.0.0.0` exposes the server to the network.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Listening port, 1024 or higher.
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds in-flight requests may run after a shutdown signal.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT)]
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    /// Checks the port and the drain window.
    ///
    /// # Errors
    ///
    /// Fails for ports below 1024 and for shutdown timeouts outside
    /// 1 to 300 seconds.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.port >= MIN_UNPRIVILEGED_PORT,
            "PORT {} is privileged, choose {MIN_UNPRIVILEGED_PORT} or above",
            self.port
        );

        ensure!(
            SHUTDOWN_TIMEOUT_RANGE.contains(&self.shutdown_timeout),
            "SHUTDOWN_TIMEOUT {}s is outside {}..={}s",
            self.shutdown_timeout,
            SHUTDOWN_TIMEOUT_RANGE.start(),
            SHUTDOWN_TIMEOUT_RANGE.end()
        );

        Ok(())
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// True for `0.0.0.0` and `::`.
    #[must_use]
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Loopback on the default port, the setup the capture extension uses.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.host.is_loopback() && self.port == DEFAULT_PORT
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            shutdown_timeout_secs = self.shutdown_timeout,
            development = self.is_development(),
            "Server configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}
