//! Gemini client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default API root for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Default multimodal model.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini client.
///
/// The API key is not part of the configuration; see [`GeminiCredentials`].
///
/// [`GeminiCredentials`]: crate::GeminiCredentials
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[builder(
    name = "GeminiConfigBuilder",
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
#[must_use = "config does nothing unless you use it"]
pub struct GeminiConfig {
    /// Base URL of the Generative Language API.
    #[cfg_attr(
        feature = "config",
        arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[builder(default = "DEFAULT_BASE_URL.to_owned()")]
    pub base_url: String,

    /// Model used for descriptions.
    #[cfg_attr(
        feature = "config",
        arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)
    )]
    #[builder(default = "DEFAULT_MODEL.to_owned()")]
    pub model: String,

    /// Request timeout in seconds, covering the whole upstream call.
    #[cfg_attr(
        feature = "config",
        arg(long = "gemini-timeout", env = "GEMINI_TIMEOUT", default_value_t = 60)
    )]
    #[builder(default = "60")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "gemini-connect-timeout",
            env = "GEMINI_CONNECT_TIMEOUT",
            default_value_t = 10
        )
    )]
    #[builder(default = "10")]
    pub connect_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the user agent sent with every request.
    pub fn user_agent(&self) -> String {
        format!("iris-gemini/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Returns the model name without a leading `models/`.
    pub fn model_name(&self) -> &str {
        let model = self.model.trim();
        model.strip_prefix("models/").unwrap_or(model)
    }

    /// Resolves the `generateContent` endpoint for the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL is not an absolute URL.
    pub fn endpoint(&self) -> Result<Url> {
        let mut base = self.base_url.trim().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base = Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;

        base.join(&format!("models/{}:generateContent", self.model_name()))
            .map_err(|e| Error::Config(format!("Invalid model '{}': {}", self.model, e)))
    }

    /// Validates values that clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.model_name().is_empty() {
            return Err(Error::Config("Model must not be empty".to_string()));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("Timeout must be greater than 0".to_string()));
        }

        if self.connect_timeout_secs == 0 {
            return Err(Error::Config(
                "Connect timeout must be greater than 0".to_string(),
            ));
        }

        self.endpoint().map(|_| ())
    }
}

impl GeminiConfigBuilder {
    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(timeout) = self.timeout_secs
            && timeout == 0
        {
            return Err("Timeout must be greater than 0".to_string());
        }

        if let Some(connect_timeout) = self.connect_timeout_secs
            && connect_timeout == 0
        {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if let Some(model) = &self.model
            && model.trim().trim_start_matches("models/").is_empty()
        {
            return Err("Model must not be empty".to_string());
        }

        if let Some(base_url) = &self.base_url
            && Url::parse(base_url.trim()).is_err()
        {
            return Err(format!("Invalid base URL '{base_url}'"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_endpoint() -> anyhow::Result<()> {
        let endpoint = GeminiConfig::default().endpoint()?;
        assert_eq!(
            endpoint.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        Ok(())
    }

    #[test]
    fn endpoint_tolerates_missing_slash_and_prefix() -> anyhow::Result<()> {
        let config = GeminiConfig::builder()
            .with_base_url("http://localhost:8080/v1beta")
            .with_model("models/gemini-2.0-flash")
            .build()?;

        assert_eq!(
            config.endpoint()?.as_str(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
        Ok(())
    }

    #[test]
    fn builder_rejects_invalid_values() {
        assert!(GeminiConfig::builder().with_timeout_secs(0u64).build().is_err());
        assert!(GeminiConfig::builder().with_model("  ").build().is_err());
        assert!(GeminiConfig::builder().with_base_url("not a url").build().is_err());
    }

    #[test]
    fn validate_rejects_invalid_values() {
        let config = GeminiConfig {
            base_url: "::".to_string(),
            ..GeminiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GeminiConfig {
            connect_timeout_secs: 0,
            ..GeminiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
