#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use iris_image::NormalizerConfig;
use serde::{Deserialize, Serialize};

use crate::service::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Default upload limit: 20 MiB.
    pub const MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;

    /// Default normalized image width.
    pub const IMAGE_MAX_WIDTH: u32 = iris_image::NormalizerConfig::DEFAULT_MAX_WIDTH;

    /// Default JPEG quality.
    pub const IMAGE_QUALITY: u8 = iris_image::NormalizerConfig::DEFAULT_QUALITY;
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Google Gemini API key. Requests fail with a configuration error
    /// while it is missing.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GOOGLE_GEMINI_API_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing)]
    #[builder(default)]
    pub gemini_api_key: Option<String>,

    /// Maximum accepted upload size in bytes.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_UPLOAD_SIZE", default_value_t = defaults::MAX_UPLOAD_SIZE)
    )]
    #[builder(default = "defaults::MAX_UPLOAD_SIZE")]
    pub max_upload_size: usize,

    /// Width normalized images are reduced to.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "IMAGE_MAX_WIDTH", default_value_t = defaults::IMAGE_MAX_WIDTH)
    )]
    #[builder(default = "defaults::IMAGE_MAX_WIDTH")]
    pub image_max_width: u32,

    /// JPEG quality of normalized images (1 to 100).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "IMAGE_QUALITY", default_value_t = defaults::IMAGE_QUALITY)
    )]
    #[builder(default = "defaults::IMAGE_QUALITY")]
    pub image_quality: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            max_upload_size: defaults::MAX_UPLOAD_SIZE,
            image_max_width: defaults::IMAGE_MAX_WIDTH,
            image_quality: defaults::IMAGE_QUALITY,
        }
    }
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Returns the API key if one is set and not blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns true if the inference credential is configured.
    pub fn has_credentials(&self) -> bool {
        self.gemini_api_key().is_some()
    }

    /// Builds the normalizer configuration.
    pub fn normalizer_config(&self) -> Result<NormalizerConfig> {
        NormalizerConfig::builder()
            .with_max_width(self.image_max_width)
            .with_quality(self.image_quality)
            .build()
            .map_err(|e| {
                Error::configuration()
                    .with_message(format!("Invalid image settings: {e}"))
                    .with_source(e)
            })
    }
}

impl ServiceConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(0) = self.max_upload_size {
            return Err("Max upload size must be greater than 0".to_string());
        }

        if let Some(0) = self.image_max_width {
            return Err("Image max width must be greater than 0".to_string());
        }

        if let Some(quality) = self.image_quality
            && !(1..=100).contains(&quality)
        {
            return Err("Image quality must be between 1 and 100".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.max_upload_size, 20 * 1024 * 1024);
        assert!(!config.has_credentials());

        let normalizer = config.normalizer_config().unwrap();
        assert_eq!(normalizer.max_width, 1280);
        assert_eq!(normalizer.quality, 72);
    }

    #[test]
    fn blank_key_is_missing() -> anyhow::Result<()> {
        let config = ServiceConfig::builder().with_gemini_api_key("   ").build()?;
        assert!(!config.has_credentials());

        let config = ServiceConfig::builder().with_gemini_api_key("key").build()?;
        assert_eq!(config.gemini_api_key(), Some("key"));
        Ok(())
    }

    #[test]
    fn key_is_never_serialized() -> anyhow::Result<()> {
        let config = ServiceConfig::builder().with_gemini_api_key("secret").build()?;
        let json = serde_json::to_string(&config)?;
        assert!(!json.contains("secret"));
        Ok(())
    }

    #[test]
    fn builder_rejects_invalid_values() {
        assert!(ServiceConfig::builder().with_max_upload_size(0usize).build().is_err());
        assert!(ServiceConfig::builder().with_image_quality(0u8).build().is_err());
        assert!(ServiceConfig::builder().with_image_quality(101u8).build().is_err());
    }
}
