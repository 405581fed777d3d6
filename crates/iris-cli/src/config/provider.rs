//! Inference provider wiring.

use iris_core::inference::InferenceService;
use iris_gemini::{GeminiClient, GeminiCredentials};

use super::Cli;
use crate::TRACING_TARGET_CONFIG;

/// Creates the Gemini-backed inference service.
///
/// The client is built even without an API key; the analyzer rejects
/// requests before they reach it in that case.
pub fn create_inference_service(cli: &Cli) -> anyhow::Result<InferenceService> {
    let credentials = GeminiCredentials::from_optional(cli.service.gemini_api_key());
    let client = GeminiClient::new(cli.gemini.clone(), credentials)?;

    tracing::debug!(
        target: TRACING_TARGET_CONFIG,
        endpoint = %client.endpoint(),
        credentials = client.has_credentials(),
        "Gemini client created"
    );

    Ok(client.into_service())
}
