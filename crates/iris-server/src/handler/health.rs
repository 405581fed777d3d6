//! Liveness probe.

use axum::Json;
use axum::routing::{Router, get};

use super::response::Health;
use crate::service::ServiceState;

/// Tracing target for health checks.
const TRACING_TARGET: &str = "iris_server::handler::health";

async fn health() -> Json<Health> {
    tracing::trace!(target: TRACING_TARGET, "Health check");
    Json(Health::OK)
}

/// Returns a [`Router`] with the health route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::{default_state, serve};

    #[tokio::test]
    async fn health_is_ok() -> anyhow::Result<()> {
        let server = serve(routes(), default_state()?)?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "ok": true }));
        Ok(())
    }
}
