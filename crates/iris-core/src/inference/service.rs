//! Inference service with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{InferenceProvider, TRACING_TARGET};
use crate::Result;
use crate::analysis::{AnalysisRequest, AnalysisResult};

/// Shared handle to an [`InferenceProvider`] with structured logging.
///
/// Cheap to clone; all clones share the same provider.
#[derive(Clone)]
pub struct InferenceService {
    provider: Arc<dyn InferenceProvider>,
}

impl fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceService")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl InferenceService {
    /// Create a new inference service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: InferenceProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Returns the name of the wrapped provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generates a description for the request.
    pub async fn infer(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            provider = self.provider.name(),
            image_bytes = request.image().data().len(),
            default_instruction = request.uses_default_instruction(),
            "Processing analysis request"
        );

        let result = self.provider.infer(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    provider = self.provider.name(),
                    text_len = response.text.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Analysis successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    provider = self.provider.name(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Analysis failed"
                );
            }
        }

        result
    }
}
