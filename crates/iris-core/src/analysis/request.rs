//! Request type and the prompt composer.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image::NormalizedImage;

/// Instruction used when the caller supplies none.
pub const DEFAULT_INSTRUCTION: &str = "Describe this image in detail.";

/// One part of the single user turn sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Natural-language instruction.
    Text { text: String },
    /// Base64-encoded image content with its media type.
    InlineImage { media_type: String, data: String },
}

/// A provider-neutral inference request.
///
/// Built with [`AnalysisRequest::compose`]; the instruction is never empty and
/// the image is always a normalized JPEG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    instruction: String,
    image: NormalizedImage,
}

impl AnalysisRequest {
    /// Pairs an instruction with a normalized image.
    ///
    /// An absent, empty or whitespace-only instruction is replaced by
    /// [`DEFAULT_INSTRUCTION`]. A non-blank instruction is kept verbatim.
    pub fn compose(instruction: Option<&str>, image: NormalizedImage) -> Self {
        let instruction = instruction
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(DEFAULT_INSTRUCTION);

        Self {
            request_id: Uuid::now_v7(),
            instruction: instruction.to_owned(),
            image,
        }
    }

    /// Returns the effective instruction.
    #[inline]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Returns the normalized image.
    #[inline]
    pub fn image(&self) -> &NormalizedImage {
        &self.image
    }

    /// Returns true if the default instruction was substituted.
    pub fn uses_default_instruction(&self) -> bool {
        self.instruction == DEFAULT_INSTRUCTION
    }

    /// Returns the image encoded as standard, padded base64.
    pub fn image_base64(&self) -> String {
        STANDARD.encode(self.image.data())
    }

    /// Returns the ordered parts of the user turn: text first, then image.
    pub fn parts(&self) -> [Part; 2] {
        [
            Part::Text {
                text: self.instruction.clone(),
            },
            Part::InlineImage {
                media_type: self.image.media_type().to_owned(),
                data: self.image_base64(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> NormalizedImage {
        NormalizedImage::new(vec![0xff, 0xd8, 0xff, 0xd9], 1, 1)
    }

    #[test]
    fn absent_instruction_uses_default() {
        let request = AnalysisRequest::compose(None, image());
        assert_eq!(request.instruction(), DEFAULT_INSTRUCTION);
        assert!(request.uses_default_instruction());
    }

    #[test]
    fn blank_instruction_uses_default() {
        for blank in ["", "   ", "\n\t"] {
            let request = AnalysisRequest::compose(Some(blank), image());
            assert_eq!(request.instruction(), DEFAULT_INSTRUCTION);
        }
    }

    #[test]
    fn instruction_is_kept_verbatim() {
        let request = AnalysisRequest::compose(Some("  List the objects. "), image());
        assert_eq!(request.instruction(), "  List the objects. ");
        assert!(!request.uses_default_instruction());
    }

    #[test]
    fn parts_are_text_then_image() {
        let request = AnalysisRequest::compose(Some("What is this?"), image());
        let [text, inline] = request.parts();

        assert_eq!(
            text,
            Part::Text {
                text: "What is this?".to_owned()
            }
        );
        assert_eq!(
            inline,
            Part::InlineImage {
                media_type: "image/jpeg".to_owned(),
                data: "/9j/2Q==".to_owned(),
            }
        );
    }

    #[test]
    fn request_ids_are_unique() {
        let first = AnalysisRequest::compose(None, image());
        let second = AnalysisRequest::compose(None, image());
        assert_ne!(first.request_id, second.request_id);
    }
}
