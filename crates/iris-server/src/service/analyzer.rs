//! Request orchestration.

use std::time::Instant;

use iris_core::analysis::{AnalysisRequest, AnalysisResult};
use iris_core::image::ImageBytes;
use iris_core::inference::InferenceService;
use iris_image::ImageNormalizer;

use crate::service::{Error, Result, ServiceConfig};

/// Tracing target for analysis orchestration.
const TRACING_TARGET: &str = "iris_server::service::analyzer";

/// Message returned when no API key is configured.
const MISSING_CREDENTIALS: &str = "Missing GOOGLE_GEMINI_API_KEY";

/// Message returned when the request carries no image.
const MISSING_IMAGE: &str = "No image provided";

/// Runs one analysis: credential check, image presence, normalization,
/// composition and inference, stopping at the first failure.
///
/// Credential presence is captured at construction and never re-read.
#[derive(Debug, Clone)]
pub struct Analyzer {
    credentials_present: bool,
    normalizer: ImageNormalizer,
    inference: InferenceService,
}

impl Analyzer {
    /// Creates an analyzer from the service configuration.
    pub fn new(config: &ServiceConfig, inference: InferenceService) -> Result<Self> {
        Ok(Self {
            credentials_present: config.has_credentials(),
            normalizer: ImageNormalizer::new(config.normalizer_config()?),
            inference,
        })
    }

    /// Returns true if the inference credential was configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials_present
    }

    /// Describes `image` following `instruction`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Configuration`] when no credential is configured;
    ///   nothing else is inspected.
    /// - [`ErrorKind::BadInput`] when `image` is `None` or not decodable.
    /// - [`ErrorKind::Provider`] when inference fails.
    ///
    /// [`ErrorKind::Configuration`]: iris_core::ErrorKind::Configuration
    /// [`ErrorKind::BadInput`]: iris_core::ErrorKind::BadInput
    /// [`ErrorKind::Provider`]: iris_core::ErrorKind::Provider
    pub async fn analyze(
        &self,
        image: Option<ImageBytes>,
        instruction: Option<&str>,
    ) -> Result<AnalysisResult> {
        if !self.credentials_present {
            return Err(Error::configuration().with_message(MISSING_CREDENTIALS));
        }

        let Some(image) = image else {
            return Err(Error::bad_input().with_message(MISSING_IMAGE));
        };

        let started_at = Instant::now();
        let declared_type = image.media_type().to_owned();
        let input_bytes = image.len();

        let normalized = self.normalizer.normalize(image).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            declared_type = %declared_type,
            input_bytes,
            output_bytes = normalized.data().len(),
            width = normalized.width(),
            height = normalized.height(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Image normalized"
        );

        let request = AnalysisRequest::compose(instruction, normalized);
        let result = self.inference.infer(&request).await?;

        tracing::info!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            provider = self.inference.provider_name(),
            text_len = result.text.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Analysis completed"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};
    use iris_core::ErrorKind;
    use iris_core::analysis::DEFAULT_INSTRUCTION;
    use iris_core::inference::MockProvider;

    use super::*;

    fn png(width: u32, height: u32) -> ImageBytes {
        let image = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        ImageBytes::new(buffer.into_inner(), "image/png")
    }

    fn analyzer(key: Option<&str>, mock: &MockProvider) -> Analyzer {
        let mut builder = ServiceConfig::builder();
        if let Some(key) = key {
            builder = builder.with_gemini_api_key(key);
        }
        Analyzer::new(&builder.build().unwrap(), mock.to_service()).unwrap()
    }

    #[tokio::test]
    async fn missing_credentials_come_first() {
        let mock = MockProvider::default();
        let analyzer = analyzer(None, &mock);

        for image in [None, Some(ImageBytes::untyped(b"garbage".to_vec())), Some(png(4, 4))] {
            let error = analyzer.analyze(image, None).await.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Configuration);
            assert_eq!(error.message(), "Missing GOOGLE_GEMINI_API_KEY");
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn missing_image_is_bad_input() {
        let mock = MockProvider::default();
        let error = analyzer(Some("key"), &mock)
            .analyze(None, Some("Describe"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::BadInput);
        assert_eq!(error.message(), "No image provided");
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn undecodable_image_never_reaches_provider() {
        let mock = MockProvider::default();
        let image = ImageBytes::new(b"%PDF-1.7 not an image".to_vec(), "image/png");
        let error = analyzer(Some("key"), &mock)
            .analyze(Some(image), None)
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::BadInput);
        assert_eq!(error.message(), "Unable to process image");
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn normalized_image_and_instruction_reach_provider() -> anyhow::Result<()> {
        let mock = MockProvider::with_response("A red rectangle.");
        let result = analyzer(Some("key"), &mock)
            .analyze(Some(png(3000, 1000)), Some("What color is this?"))
            .await?;

        assert_eq!(result.text, "A red rectangle.");
        assert_eq!(mock.calls(), 1);

        let request = mock.last_request().expect("provider was called");
        assert_eq!(request.instruction(), "What color is this?");
        assert_eq!(request.image().width(), 1280);
        assert_eq!(request.image().height(), 427);
        assert_eq!(request.image().media_type(), "image/jpeg");
        Ok(())
    }

    #[tokio::test]
    async fn blank_instruction_uses_default() -> anyhow::Result<()> {
        let mock = MockProvider::default();
        analyzer(Some("key"), &mock)
            .analyze(Some(png(10, 10)), Some("   "))
            .await?;

        let request = mock.last_request().expect("provider was called");
        assert_eq!(request.instruction(), DEFAULT_INSTRUCTION);
        Ok(())
    }

    #[tokio::test]
    async fn provider_failure_keeps_message() {
        let mock = MockProvider::with_failure("Quota exceeded for gemini-2.5-flash");
        let error = analyzer(Some("key"), &mock)
            .analyze(Some(png(10, 10)), None)
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Provider);
        assert_eq!(error.message(), "Quota exceeded for gemini-2.5-flash");
        assert_eq!(mock.calls(), 1);
    }
}
