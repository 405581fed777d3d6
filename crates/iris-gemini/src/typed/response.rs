use serde::{Deserialize, Serialize};

use super::Content;

/// Successful `generateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Returns the text of the first candidate, or an empty string.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(Content::text)
            .unwrap_or_default()
    }

    /// Returns the finish reason of the first candidate.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
    }
}

/// One generated answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_joins_first_candidate_parts() -> anyhow::Result<()> {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": { "role": "model", "parts": [{ "text": "A cat " }, { "text": "on a mat." }] },
                    "finishReason": "STOP"
                },
                { "content": { "role": "model", "parts": [{ "text": "ignored" }] } }
            ],
            "usageMetadata": { "promptTokenCount": 258, "candidatesTokenCount": 6, "totalTokenCount": 264 },
            "modelVersion": "gemini-2.5-flash"
        }))?;

        assert_eq!(response.text(), "A cat on a mat.");
        assert_eq!(response.finish_reason(), Some("STOP"));
        assert_eq!(
            response.usage_metadata.and_then(|usage| usage.total_token_count),
            Some(264)
        );
        Ok(())
    }

    #[test]
    fn missing_text_is_empty() -> anyhow::Result<()> {
        let empty: GenerateContentResponse = serde_json::from_value(json!({}))?;
        assert_eq!(empty.text(), "");

        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }],
            "promptFeedback": { "blockReason": "SAFETY" }
        }))?;
        assert_eq!(blocked.text(), "");
        Ok(())
    }

    #[test]
    fn parses_error_envelope() -> anyhow::Result<()> {
        let error: ApiErrorResponse = serde_json::from_value(json!({
            "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
        }))?;

        assert_eq!(error.error.code, Some(429));
        assert_eq!(error.error.message, "Resource has been exhausted");
        Ok(())
    }
}
