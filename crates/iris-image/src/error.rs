//! Internal error types for iris-image.

use thiserror::Error;

/// Result type alias for iris-image operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for image normalization.
#[derive(Debug, Error)]
pub enum Error {
    /// The bytes are not a decodable raster image.
    #[error("Decode error: {0}")]
    Decode(#[source] image::ImageError),
    /// The normalized image could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[source] image::ImageError),
    /// The blocking normalization task panicked or was cancelled.
    #[error("Normalization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<Error> for iris_core::Error {
    fn from(err: Error) -> Self {
        iris_core::Error::bad_input()
            .with_message("Unable to process image")
            .with_source(err)
    }
}
