//! Normalizer configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Bounds applied to every normalized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct NormalizerConfig {
    /// Maximum output width in pixels. Narrower images are left as is.
    #[builder(default = "NormalizerConfig::DEFAULT_MAX_WIDTH")]
    pub max_width: u32,
    /// JPEG quality, 1 to 100.
    #[builder(default = "NormalizerConfig::DEFAULT_QUALITY")]
    pub quality: u8,
}

impl NormalizerConfig {
    pub const DEFAULT_MAX_WIDTH: u32 = 1280;
    pub const DEFAULT_QUALITY: u8 = 72;

    /// Create a new configuration builder.
    pub fn builder() -> NormalizerConfigBuilder {
        NormalizerConfigBuilder::default()
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_WIDTH,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

impl NormalizerConfigBuilder {
    fn validate_config(&self) -> std::result::Result<(), String> {
        if self.max_width == Some(0) {
            return Err("Max width must be greater than 0".to_string());
        }

        if let Some(quality) = self.quality
            && !(1..=100).contains(&quality)
        {
            return Err(format!("JPEG quality {quality} is outside 1..=100"));
        }

        Ok(())
    }
}
