//! Image normalization pipeline.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use iris_core::image::{ImageBytes, NormalizedImage};

use crate::orientation::read_orientation;
use crate::{Error, NormalizerConfig, Result, TRACING_TARGET};

/// Converts uploads into bounded, upright JPEGs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageNormalizer {
    config: NormalizerConfig,
}

impl ImageNormalizer {
    /// Creates a normalizer with the given bounds.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes on the blocking thread pool.
    ///
    /// Dropping the returned future does not stop a decode that has already
    /// started; its result is discarded.
    pub async fn normalize(&self, image: ImageBytes) -> Result<NormalizedImage> {
        let normalizer = *self;
        tokio::task::spawn_blocking(move || normalizer.normalize_blocking(&image)).await?
    }

    /// Decodes, orients, resizes and re-encodes the image.
    ///
    /// Identical input always produces byte-identical output.
    pub fn normalize_blocking(&self, image: &ImageBytes) -> Result<NormalizedImage> {
        let decoded = image::load_from_memory(image.data()).map_err(|err| {
            tracing::debug!(
                target: TRACING_TARGET,
                declared_type = image.media_type(),
                size = image.len(),
                error = %err,
                "Failed to decode image"
            );
            Error::Decode(err)
        })?;

        let (source_width, source_height) = (decoded.width(), decoded.height());
        let orientation = read_orientation(image.data());
        let oriented = orientation.apply(decoded);
        let resized = self.fit_width(oriented);

        let rgb = resized.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut buffer = Vec::with_capacity(image.len().min(1 << 20));
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.config.quality);
            encoder.encode_image(&rgb).map_err(Error::Encode)?;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            declared_type = image.media_type(),
            source_width,
            source_height,
            orientation = ?orientation,
            width,
            height,
            input_bytes = image.len(),
            output_bytes = buffer.len(),
            "Image normalized"
        );

        Ok(NormalizedImage::new(buffer, width, height))
    }

    /// Shrinks the image to the configured width, keeping its aspect ratio.
    fn fit_width(&self, image: DynamicImage) -> DynamicImage {
        let max_width = self.config.max_width;
        let (width, height) = (image.width(), image.height());
        if width <= max_width {
            return image;
        }

        let scaled = (f64::from(height) * f64::from(max_width) / f64::from(width)).round();
        let target_height = (scaled as u32).max(1);
        image.resize_exact(max_width, target_height, FilterType::Lanczos3)
    }
}
