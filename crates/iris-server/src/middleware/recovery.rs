//! Turns timeouts, panics and layer failures into `{ "error": ... }` responses.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

/// Tracing target for recovered failures.
const TRACING_TARGET: &str = "iris_server::middleware::recovery";

/// Default request timeout in seconds. Kept above the inference timeout so
/// a slow provider reports its own error first.
const DEFAULT_REQUEST_TIMEOUT: u64 = 120;

/// Client-facing message for requests cut off by the timeout.
const TIMEOUT_MESSAGE: &str = "Request timeout";

/// Client-facing message for handler panics.
const PANIC_MESSAGE: &str = "An unexpected error occurred";

/// Request timeout and panic recovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is answered with a 500
    /// "Request timeout".
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl RecoveryConfig {
    /// Creates a configuration with a request timeout in seconds.
    pub const fn new(request_timeout: u64) -> Self {
        Self { request_timeout }
    }

    /// Request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Wraps every route in a timeout and a panic catcher.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    /// Same as [`with_recovery`] with [`RecoveryConfig::default`].
    ///
    /// [`with_recovery`]: RouterRecoveryExt::with_recovery
    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        // Order matters: the timeout error and caught panics both have to
        // surface inside HandleErrorLayer.
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    recover_error(&err)
                }))
                .layer(CatchPanicLayer::custom(recover_panic))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

/// Maps an error raised by a layer into an HTTP error.
fn recover_error(err: &BoxError) -> Error<'static> {
    if err.is::<Elapsed>() {
        tracing::error!(target: TRACING_TARGET, error = %err, "Request timed out");

        return ErrorKind::InternalServerError
            .with_message(TIMEOUT_MESSAGE)
            .with_context(err.to_string());
    }

    tracing::error!(target: TRACING_TARGET, error = %err, "Middleware failed");
    ErrorKind::InternalServerError.with_context(err.to_string())
}

/// Extracts a printable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&'static str>().copied())
        .unwrap_or("non-string panic payload")
}

fn recover_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    // Handlers may panic with a ready-made HTTP error.
    if let Some(error) = payload.downcast_ref::<Error<'static>>() {
        tracing::error!(target: TRACING_TARGET, error = %error, "Handler panicked");
        return error.clone().into_response();
    }

    tracing::error!(
        target: TRACING_TARGET,
        panic = %panic_message(payload.as_ref()),
        "Handler panicked"
    );

    ErrorKind::InternalServerError
        .with_message(PANIC_MESSAGE)
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;
    use crate::handler::ErrorResponse;

    #[tokio::test]
    async fn slow_handler_times_out() -> anyhow::Result<()> {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .with_recovery(&RecoveryConfig::new(1));
        let server = TestServer::new(router)?;

        let response = server.get("/slow").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<ErrorResponse>().error, TIMEOUT_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn panicking_handler_is_recovered() -> anyhow::Result<()> {
        async fn explode() -> &'static str {
            panic!("boom")
        }

        let router = Router::new()
            .route("/panic", get(explode))
            .with_default_recovery();
        let server = TestServer::new(router)?;

        let response = server.get("/panic").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<ErrorResponse>().error, PANIC_MESSAGE);
        Ok(())
    }

    #[test]
    fn panic_payloads_are_printable() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(7u8);

        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn default_timeout_exceeds_inference_timeout() {
        assert_eq!(
            RecoveryConfig::default().request_timeout(),
            Duration::from_secs(120)
        );
    }
}
