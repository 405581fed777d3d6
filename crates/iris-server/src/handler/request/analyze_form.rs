use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use iris_core::image::{ImageBytes, UNKNOWN_MEDIA_TYPE};

const TRACING_TARGET: &str = "iris_server::handler::request";

/// Name of the file part carrying the image.
const IMAGE_FIELD: &str = "image";

/// Name of the text part carrying the instruction.
const PROMPT_FIELD: &str = "prompt";

/// Parts of a `POST /analyze` form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalyzeForm {
    /// First file part, or the part named `image`.
    pub image: Option<ImageBytes>,
    /// The `prompt` text part.
    pub prompt: Option<String>,
}

impl AnalyzeForm {
    /// Reads the whole form. Extra parts are skipped.
    ///
    /// A body that ends before its first part (for example a zero-byte body)
    /// is an empty form. Failures after the first part, and oversized bodies,
    /// are errors.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();
        let mut read_any_part = false;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) if !read_any_part && err.status() != StatusCode::PAYLOAD_TOO_LARGE => {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        error = %err.body_text(),
                        "Multipart body has no parts"
                    );
                    break;
                }
                Err(err) => return Err(err),
            };
            read_any_part = true;

            let name = field.name().map(str::to_owned);
            let is_image = field.file_name().is_some() || name.as_deref() == Some(IMAGE_FIELD);

            if is_image && form.image.is_none() {
                let media_type = field
                    .content_type()
                    .unwrap_or(UNKNOWN_MEDIA_TYPE)
                    .to_owned();
                let data = field.bytes().await?;
                form.image = Some(ImageBytes::new(data, media_type));
            } else if name.as_deref() == Some(PROMPT_FIELD) && form.prompt.is_none() {
                form.prompt = Some(field.text().await?);
            }
        }

        Ok(form)
    }
}
