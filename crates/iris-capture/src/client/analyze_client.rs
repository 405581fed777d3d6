use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, REQUEST_FAILED_MESSAGE, Result};
use crate::{CaptureHost, CaptureSource, CapturedImage, TRACING_TARGET};

/// Server the extension talks to by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Default end-to-end timeout, longer than the server's own.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug, Default, Deserialize)]
struct AnalyzeBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Submits captured images to an iris server.
#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    http: Client,
    base_url: Url,
}

impl AnalyzeClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = base_url.trim().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("iris-capture/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
        })
    }

    /// Returns the server root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns true if the server answers its health check.
    pub async fn health(&self) -> Result<bool> {
        let response = self.http.get(self.base_url.join("health")?).send().await?;
        Ok(response.status().is_success())
    }

    /// Posts `captured` with `instruction` and returns the description.
    ///
    /// A success without a description yields an empty string.
    ///
    /// # Errors
    ///
    /// [`Error::Server`] carries the server's `error` message, or
    /// `"Request failed"` when the body has none.
    pub async fn analyze(&self, captured: CapturedImage, instruction: &str) -> Result<String> {
        let CapturedImage { file_name, image } = captured;
        let size = image.len();

        let part = Part::bytes(image.data().to_vec())
            .file_name(file_name.clone())
            .mime_str(image.media_type())?;
        let form = Form::new()
            .part("image", part)
            .text("prompt", instruction.to_owned());

        tracing::debug!(
            target: TRACING_TARGET,
            file_name = %file_name,
            size,
            "Submitting image for analysis"
        );

        let response = self
            .http
            .post(self.base_url.join("analyze")?)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let parsed: AnalyzeBody = serde_json::from_slice(&body).unwrap_or_default();

        if !status.is_success() {
            let message = parsed
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_owned());

            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                message = %message,
                "Analysis request failed"
            );

            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed.description.unwrap_or_default())
    }

    /// Acquires an image from `source` and analyzes it with the source's
    /// default instruction.
    pub async fn capture_and_analyze(
        &self,
        source: CaptureSource,
        host: &dyn CaptureHost,
    ) -> Result<String> {
        let instruction = source.default_instruction();
        let captured = source.acquire(host).await?;
        self.analyze(captured, instruction).await
    }
}
