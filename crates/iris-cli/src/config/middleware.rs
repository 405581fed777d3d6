//! Settings for the layers wrapped around every route.

use anyhow::ensure;
use clap::Args;
use iris_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Cross-origin policy and request timeout.
///
/// ```bash
/// iris --cors-origins "chrome-extension://abcdef" --request-timeout 60
/// ```
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Rejects a zero request timeout, which would fail every request.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.recovery.request_timeout > 0,
            "REQUEST_TIMEOUT must be at least one second"
        );
        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            cors_origins = ?self.cors.allowed_origins,
            cors_any_origin = self.cors.allows_any_origin(),
            cors_credentials = self.cors.allow_credentials,
            cors_max_age_secs = self.cors.max_age_seconds,
            request_timeout_secs = self.recovery.request_timeout,
            "Middleware configuration"
        );
    }
}
