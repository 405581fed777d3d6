//! Pipeline error to HTTP error conversion.

use std::error::Error as StdError;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for pipeline error conversions.
const TRACING_TARGET: &str = "iris_server::handler::error";

/// Renders the source chain as `a: b: c`.
fn source_chain(error: &(dyn StdError + 'static)) -> String {
    let mut chain = Vec::new();
    let mut current = error.source();
    while let Some(source) = current {
        chain.push(source.to_string());
        current = source.source();
    }
    chain.join(": ")
}

impl From<iris_core::Error> for HttpError<'static> {
    fn from(error: iris_core::Error) -> Self {
        use iris_core::ErrorKind as CoreErrorKind;

        let sources = source_chain(&error);

        match error.kind() {
            CoreErrorKind::BadInput => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    sources = %sources,
                    "Rejected analysis input"
                );
            }
            CoreErrorKind::Configuration => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Service is not configured"
                );
            }
            CoreErrorKind::Provider => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    sources = %sources,
                    "Inference provider failed"
                );
            }
            CoreErrorKind::CaptureUnavailable | CoreErrorKind::CaptureDenied => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind().as_str(),
                    "Capture failed"
                );
            }
        }

        let kind = if error.is_client_error() {
            ErrorKind::BadRequest
        } else {
            ErrorKind::InternalServerError
        };

        let error = kind.with_message(error.message().to_owned());
        if sources.is_empty() {
            error
        } else {
            error.with_context(sources)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn bad_input_is_a_client_error() {
        let error: HttpError = iris_core::Error::bad_input()
            .with_message("No image provided")
            .into();

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), Some("No image provided"));
        assert_eq!(error.context(), None);
    }

    #[test]
    fn configuration_is_a_server_error() {
        let error: HttpError = iris_core::Error::configuration()
            .with_message("Missing GOOGLE_GEMINI_API_KEY")
            .into();

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), Some("Missing GOOGLE_GEMINI_API_KEY"));
    }

    #[test]
    fn provider_sources_stay_in_context() {
        let io = std::io::Error::other("connection reset by peer");
        let error: HttpError = iris_core::Error::provider()
            .with_message("Failed to connect to Gemini")
            .with_source(io)
            .into();

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), Some("Failed to connect to Gemini"));
        assert_eq!(error.context(), Some("connection reset by peer"));
    }

    #[test]
    fn provider_without_message_uses_default() {
        let error: HttpError = iris_core::Error::provider().into();
        assert_eq!(error.message(), Some("Failed to analyze image"));
    }
}
