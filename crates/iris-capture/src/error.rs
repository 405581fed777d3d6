//! Error types for iris-capture.

use thiserror::Error;

/// Result type alias for iris-capture operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback when the server answers with an error but no message.
pub(crate) const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Errors raised while acquiring or submitting an image.
#[derive(Debug, Error)]
pub enum Error {
    /// The host offers no tab capture.
    #[error("Capture API not available. Use Upload instead.")]
    Unavailable,
    /// The host refused or failed the capture.
    #[error("{0}")]
    Denied(String),
    /// The host returned something that is not a usable data URL.
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
    /// The selected file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The base URL is not usable.
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),
    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl From<Error> for iris_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Unavailable => iris_core::Error::capture_unavailable(),
            Error::Denied(message) => iris_core::Error::capture_denied().with_message(message),
            Error::DataUrl(message) => iris_core::Error::capture_denied()
                .with_message(format!("Invalid capture data: {message}")),
            Error::Io { path, source } => iris_core::Error::bad_input()
                .with_message(format!("Unable to read {path}"))
                .with_source(source),
            Error::Url(e) => iris_core::Error::configuration()
                .with_message(format!("Invalid base URL: {e}"))
                .with_source(e),
            Error::Reqwest(e) => {
                let message = e.to_string();
                iris_core::Error::provider()
                    .with_message(message)
                    .with_source(e)
            }
            Error::Server { status, message } if (400..500).contains(&status) => {
                iris_core::Error::bad_input().with_message(message)
            }
            Error::Server { message, .. } => iris_core::Error::provider().with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use iris_core::ErrorKind;

    use super::*;

    #[test]
    fn unavailable_keeps_upload_hint() {
        let error: iris_core::Error = Error::Unavailable.into();
        assert_eq!(error.kind(), ErrorKind::CaptureUnavailable);
        assert_eq!(error.message(), Error::Unavailable.to_string());
    }

    #[test]
    fn denied_keeps_host_message() {
        let error: iris_core::Error = Error::Denied("Cannot access a chrome:// URL".into()).into();
        assert_eq!(error.kind(), ErrorKind::CaptureDenied);
        assert_eq!(error.message(), "Cannot access a chrome:// URL");
    }

    #[test]
    fn server_errors_follow_status() {
        let client: iris_core::Error = Error::Server {
            status: 400,
            message: "No image provided".into(),
        }
        .into();
        assert_eq!(client.kind(), ErrorKind::BadInput);

        let server: iris_core::Error = Error::Server {
            status: 500,
            message: "Missing GOOGLE_GEMINI_API_KEY".into(),
        }
        .into();
        assert_eq!(server.kind(), ErrorKind::Provider);
        assert_eq!(server.message(), "Missing GOOGLE_GEMINI_API_KEY");
    }
}
