//! [`InferenceProvider`] implementation for [`GeminiClient`].

use iris_core::analysis::{AnalysisRequest, AnalysisResult};
use iris_core::inference::{InferenceProvider, InferenceService};

use crate::GeminiClient;
use crate::typed::GenerateContentRequest;

impl GeminiClient {
    /// Converts this client into an [`InferenceService`].
    pub fn into_service(self) -> InferenceService {
        InferenceService::from_provider(self)
    }
}

#[async_trait::async_trait]
impl InferenceProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn infer(&self, request: &AnalysisRequest) -> iris_core::Result<AnalysisResult> {
        let body = GenerateContentRequest::from_analysis(request);
        let response = self.generate_content(&body).await?;
        Ok(AnalysisResult::new(request.request_id, response.text()))
    }
}
