use iris_core::analysis::{self, AnalysisRequest};
use serde::{Deserialize, Serialize};

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Builds a single user turn from an analysis request.
    pub fn from_analysis(request: &AnalysisRequest) -> Self {
        let parts = request.parts().into_iter().map(Part::from).collect();
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Concatenates all text parts.
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(Part::as_text).collect()
    }
}

/// A piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    Other(serde_json::Value),
}

impl Part {
    /// Returns the text of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

impl From<analysis::Part> for Part {
    fn from(part: analysis::Part) -> Self {
        match part {
            analysis::Part::Text { text } => Self::Text { text },
            analysis::Part::InlineImage { media_type, data } => Self::InlineData {
                inline_data: Blob {
                    mime_type: media_type,
                    data,
                },
            },
        }
    }
}

/// Inline binary data, base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use iris_core::image::NormalizedImage;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_single_user_turn() -> anyhow::Result<()> {
        let image = NormalizedImage::new(vec![0xff, 0xd8, 0xff, 0xd9], 1, 1);
        let request = AnalysisRequest::compose(Some("Describe it."), image);
        let body = serde_json::to_value(GenerateContentRequest::from_analysis(&request))?;

        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "Describe it." },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/2Q==" } }
                    ]
                }]
            })
        );
        Ok(())
    }

    #[test]
    fn unknown_parts_are_kept() -> anyhow::Result<()> {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                { "text": "Hello " },
                { "functionCall": { "name": "noop", "args": {} } },
                { "text": "world" }
            ]
        }))?;

        assert!(matches!(content.parts[1], Part::Other(_)));
        assert_eq!(content.text(), "Hello world");
        Ok(())
    }
}
