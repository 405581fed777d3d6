//! Errors raised while starting or running the HTTP server.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Startup and runtime failures, each with a stable code for log search.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Flags or environment describe a server that cannot run.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not be opened.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The serve loop failed after startup.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Wraps a configuration validation failure, keeping its cause chain.
    pub fn invalid_config(err: &anyhow::Error) -> Self {
        Self::InvalidConfig(format!("{err:#}"))
    }

    pub fn bind_error(address: SocketAddr, source: io::Error) -> Self {
        Self::BindError { address, source }
    }

    /// Stable identifier: `E001` config, `E002` bind, `E003` runtime.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::BindError { .. } => "E002",
            Self::Runtime(_) => "E003",
        }
    }

    /// Kind of the underlying I/O failure, absent for config errors.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::BindError { source: err, .. } | Self::Runtime(err) => Some(err.kind()),
        }
    }

    /// Whether restarting with a different environment could succeed.
    pub fn is_recoverable(&self) -> bool {
        use io::ErrorKind::{AddrInUse, AddrNotAvailable, Interrupted, PermissionDenied, TimedOut};

        matches!(
            self.io_kind(),
            Some(PermissionDenied | AddrInUse | AddrNotAvailable | Interrupted | TimedOut)
        )
    }

    /// Operator hint for the log line that reports this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        use io::ErrorKind::{AddrInUse, AddrNotAvailable, Interrupted, PermissionDenied};

        let hint = match (self, self.io_kind()) {
            (Self::InvalidConfig(_), _) => "Run `iris --help` to see accepted values",
            (Self::BindError { .. }, Some(PermissionDenied)) => {
                "Ports below 1024 need elevated privileges; pick a higher PORT"
            }
            (Self::BindError { .. }, Some(AddrInUse)) => {
                "Another process holds this port; stop it or change PORT"
            }
            (Self::BindError { .. }, Some(AddrNotAvailable)) => {
                "HOST is not an address of this machine"
            }
            (Self::BindError { .. }, _) => "Check the network interfaces and firewall rules",
            (Self::Runtime(_), Some(Interrupted)) => "The listener was interrupted; restart iris",
            (Self::Runtime(_), _) => return None,
        };

        Some(hint)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::net::Ipv4Addr;

    use super::*;

    fn local(port: u16) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, port))
    }

    #[test]
    fn each_variant_has_its_own_code() {
        let codes: HashSet<_> = [
            ServerError::InvalidConfig("port".to_owned()),
            ServerError::bind_error(local(80), io::Error::other("denied")),
            ServerError::Runtime(io::Error::other("closed")),
        ]
        .iter()
        .map(ServerError::error_code)
        .collect();

        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn port_in_use_suggests_changing_port() {
        let err = ServerError::bind_error(
            local(3333),
            io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        );

        assert!(err.is_recoverable());
        assert!(err.suggestion().is_some_and(|s| s.contains("PORT")));
        assert_eq!(
            err.to_string(),
            "Failed to bind to 127.0.0.1:3333: address in use"
        );
    }

    #[test]
    fn invalid_config_keeps_cause_chain() {
        let cause = anyhow::anyhow!("port 80 is privileged").context("server config");
        let err = ServerError::invalid_config(&cause);

        assert!(!err.is_recoverable());
        assert_eq!(err.io_kind(), None);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: server config: port 80 is privileged"
        );
    }

    #[test]
    fn unknown_runtime_failure_has_no_hint() {
        let err = ServerError::Runtime(io::Error::other("boom"));
        assert_eq!(err.suggestion(), None);
    }
}
