#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use axum::Router;
use iris_server::handler::routes;
use iris_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use iris_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_inference_service};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "iris_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "iris_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "iris_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.log_format)?;
    cli.log();
    cli.validate()?;

    let inference = create_inference_service(&cli).context("failed to create Gemini client")?;
    let state = ServiceState::from_config(cli.service.clone(), inference)
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) catches panics and enforces timeouts
/// 2. Observability adds request ids and tracing spans
/// 3. Security adds CORS and response headers
/// 4. Routes (innermost)
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(&state)
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
