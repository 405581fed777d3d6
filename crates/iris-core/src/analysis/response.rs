use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text produced for one [`AnalysisRequest`].
///
/// The text may be empty when the provider answered without any text.
///
/// [`AnalysisRequest`]: super::AnalysisRequest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Request ID this result corresponds to.
    pub request_id: Uuid,
    /// Generated description.
    pub text: String,
}

impl AnalysisResult {
    /// Creates a new result for the given request.
    pub fn new(request_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            request_id,
            text: text.into(),
        }
    }

    /// Returns true if the provider produced no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the result, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}
