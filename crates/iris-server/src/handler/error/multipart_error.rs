//! Multipart parsing error to HTTP error conversion.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for multipart error conversions.
const TRACING_TARGET: &str = "iris_server::handler::error";

impl From<MultipartError> for HttpError<'static> {
    fn from(error: MultipartError) -> Self {
        let status = error.status();
        let body = error.body_text();

        tracing::warn!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            error = %body,
            "Failed to read multipart body"
        );

        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ErrorKind::PayloadTooLarge.with_context(body)
        } else {
            ErrorKind::BadRequest
                .with_message("Invalid multipart request")
                .with_context(body)
        }
    }
}
