//! HTTP server startup.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use super::lifecycle::Lifecycle;
use super::shutdown::shutdown_signal;
use super::{Result, ServerError};
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until shutdown.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    server_config
        .validate()
        .map_err(|err| ServerError::invalid_config(&err))?;

    let server_addr = server_config.server_addr();
    let listener = bind(server_addr).await?;

    let bound_addr = listener.local_addr().unwrap_or(server_addr);
    let lifecycle = Lifecycle::start(&server_config, bound_addr);

    let outcome = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(server_config.shutdown_timeout()))
    .await;

    lifecycle.finish(outcome)
}

async fn bind(server_addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(server_addr).await.map_err(|source| {
        let err = ServerError::bind_error(server_addr, source);
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            code = err.error_code(),
            recoverable = err.is_recoverable(),
            suggestion = err.suggestion(),
            error = %err,
            "Failed to bind"
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() -> anyhow::Result<()> {
        let taken = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: taken.local_addr()?.port(),
            ..ServerConfig::default()
        };

        // Ephemeral ports are above 1024 on every supported platform.
        let err = serve_http(Router::new(), config)
            .await
            .expect_err("port is taken");
        assert!(matches!(err, ServerError::BindError { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };

        let err = serve_http(Router::new(), config)
            .await
            .expect_err("privileged port");
        assert_eq!(err.error_code(), "E001");
    }
}
