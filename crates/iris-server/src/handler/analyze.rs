//! Image analysis handler.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{Router, post};

use super::request::AnalyzeForm;
use super::response::Description;
use crate::handler::Result;
use crate::service::{Analyzer, ServiceState};

/// Tracing target for analysis handlers.
const TRACING_TARGET: &str = "iris_server::handler::analyze";

/// Describes the uploaded image.
///
/// A body that is not `multipart/form-data`, or a multipart body without any
/// part, is treated as a form without an image. A multipart body that breaks
/// after its first part is rejected before anything else is checked.
#[tracing::instrument(skip_all)]
async fn analyze(
    State(analyzer): State<Analyzer>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Description>> {
    let form = match multipart {
        Ok(multipart) => AnalyzeForm::from_multipart(multipart).await?,
        Err(rejection) => {
            tracing::debug!(
                target: TRACING_TARGET,
                reason = %rejection.body_text(),
                "Request body is not multipart"
            );
            AnalyzeForm::default()
        }
    };

    tracing::debug!(
        target: TRACING_TARGET,
        has_image = form.image.is_some(),
        image_bytes = form.image.as_ref().map(|image| image.len()),
        media_type = form.image.as_ref().map(|image| image.media_type()),
        has_prompt = form.prompt.is_some(),
        "Analysis requested"
    );

    let result = analyzer
        .analyze(form.image, form.prompt.as_deref())
        .await?;

    Ok(Json(Description::from(result)))
}

/// Returns a [`Router`] with the analysis route.
///
/// Request bodies above `max_upload_size` bytes are answered with 413.
pub fn routes(max_upload_size: usize) -> Router<ServiceState> {
    Router::new()
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(max_upload_size))
}
