//! Gemini client implementation using reqwest.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use url::Url;

use super::{GeminiConfig, GeminiCredentials};
use crate::TRACING_TARGET;
use crate::error::{Error, Result};
use crate::typed::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Inner client that holds the HTTP client and configuration.
struct GeminiClientInner {
    http: Client,
    endpoint: Url,
    credentials: GeminiCredentials,
    config: GeminiConfig,
}

impl fmt::Debug for GeminiClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClientInner")
            .field("endpoint", &self.endpoint.as_str())
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use iris_gemini::{GeminiClient, GeminiConfig, GeminiCredentials};
///
/// let client = GeminiClient::new(GeminiConfig::default(), GeminiCredentials::api_key(key))?;
/// let service = client.into_service();
/// ```
#[derive(Clone, Debug)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: GeminiConfig, credentials: GeminiCredentials) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            model = config.model_name(),
            timeout_secs = config.timeout_secs,
            has_credentials = credentials.is_present(),
            "Creating Gemini client"
        );

        config.validate()?;
        let endpoint = config.endpoint()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent())
            .build()?;

        let inner = GeminiClientInner {
            http,
            endpoint,
            credentials,
            config,
        };

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %inner.endpoint,
            "Gemini client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.inner.config
    }

    /// Returns the resolved `generateContent` endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Returns true if an API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.inner.credentials.is_present()
    }

    /// Sends one `generateContent` request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reqwest`] on transport failures and timeouts,
    /// [`Error::Api`] for non-success statuses and [`Error::Serde`] when the
    /// success body cannot be decoded.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let started_at = Instant::now();

        let mut http_request = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .json(request);

        if let GeminiCredentials::ApiKey(key) = &self.inner.credentials {
            http_request = http_request.header(API_KEY_HEADER, key);
        }

        let response = http_request.send().await.map_err(|err| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                timeout = err.is_timeout(),
                elapsed_ms = started_at.elapsed().as_millis(),
                "Gemini request failed"
            );
            Error::Reqwest(err)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorResponse>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));

            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                message = %message,
                elapsed_ms = started_at.elapsed().as_millis(),
                "Gemini returned an error"
            );

            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            candidates = response.candidates.len(),
            finish_reason = response.finish_reason(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Gemini response received"
        );

        Ok(response)
    }
}
