use axum::extract::FromRef;
use iris_core::inference::InferenceService;

use crate::service::{Analyzer, Result, ServiceConfig};

/// Application state.
///
/// Handlers extract the [`Analyzer`] through [`State`]; the router reads the
/// configuration while it is assembled.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    analyzer: Analyzer,
    config: ServiceConfig,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when the image settings are invalid.
    pub fn from_config(config: ServiceConfig, inference: InferenceService) -> Result<Self> {
        Ok(Self {
            analyzer: Analyzer::new(&config, inference)?,
            config,
        })
    }

    /// Returns the configuration the state was built from.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

impl FromRef<ServiceState> for Analyzer {
    fn from_ref(state: &ServiceState) -> Self {
        state.analyzer.clone()
    }
}
