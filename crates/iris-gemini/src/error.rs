//! Internal error types for iris-gemini.

use thiserror::Error;

/// Result type alias for iris-gemini operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for iris-gemini operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<Error> for iris_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Config(message) => iris_core::Error::configuration().with_message(message),
            Error::Reqwest(e) => {
                let message = if e.is_timeout() {
                    "Gemini request timed out".to_string()
                } else if e.is_connect() {
                    "Failed to connect to Gemini".to_string()
                } else {
                    e.to_string()
                };
                iris_core::Error::provider()
                    .with_message(message)
                    .with_source(e)
            }
            Error::Api { message, .. } => iris_core::Error::provider().with_message(message),
            Error::Serde(e) => iris_core::Error::provider()
                .with_message(format!("Invalid response from Gemini: {e}"))
                .with_source(e),
        }
    }
}
