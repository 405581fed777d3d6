//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of a structured [`Error`], so any underlying failure
/// (decoder, transport, I/O) can be kept for logging without leaking its
/// concrete type through the public API.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of failures an analysis can end in.
///
/// Every failure in the pipeline is classified into exactly one kind at the
/// point where it occurs. The HTTP boundary maps [`ErrorKind::BadInput`] to a
/// client error and everything else to a server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The service is missing required settings (e.g. the provider credential).
    Configuration,
    /// The caller sent no image, or bytes that are not a decodable image.
    BadInput,
    /// The inference provider failed: transport, quota, timeout or rejection.
    Provider,
    /// The host environment does not offer tab capture.
    CaptureUnavailable,
    /// The host refused or failed the tab capture.
    CaptureDenied,
}

impl ErrorKind {
    /// Returns the kind as a snake_case string.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A structured error type for iris operations.
#[derive(Debug, Error)]
#[error("{kind:?}{}", message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional caller-facing message.
    pub message: Option<String>,
    /// Optional source error, kept for operator logs only.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new bad input error.
    pub fn bad_input() -> Self {
        Self::new(ErrorKind::BadInput)
    }

    /// Creates a new provider error.
    pub fn provider() -> Self {
        Self::new(ErrorKind::Provider)
    }

    /// Creates a new capture unavailable error.
    pub fn capture_unavailable() -> Self {
        Self::new(ErrorKind::CaptureUnavailable)
    }

    /// Creates a new capture denied error.
    pub fn capture_denied() -> Self {
        Self::new(ErrorKind::CaptureDenied)
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message, or a generic one derived from the kind.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| default_message(self.kind))
    }

    /// Returns true if the caller caused this error.
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind, ErrorKind::BadInput)
    }

    /// Returns true if repeating the same request later could succeed.
    ///
    /// Nothing in iris retries automatically; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Provider)
    }
}

fn default_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Configuration => "Service is not configured",
        ErrorKind::BadInput => "Invalid input",
        ErrorKind::Provider => "Failed to analyze image",
        ErrorKind::CaptureUnavailable => "Capture API not available. Use Upload instead.",
        ErrorKind::CaptureDenied => "Capture failed",
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ErrorKind::BadInput.as_str(), "bad_input");
        assert_eq!(ErrorKind::CaptureUnavailable.as_ref(), "capture_unavailable");
    }

    #[test]
    fn display_includes_message() {
        let error = Error::configuration().with_message("Missing GOOGLE_GEMINI_API_KEY");
        assert_eq!(
            error.to_string(),
            "Configuration: Missing GOOGLE_GEMINI_API_KEY"
        );
    }

    #[test]
    fn message_falls_back_to_kind_default() {
        assert_eq!(Error::provider().message(), "Failed to analyze image");
        assert_eq!(
            Error::bad_input().with_message("No image provided").message(),
            "No image provided"
        );
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::other("connection reset");
        let error = Error::provider().with_message("upstream").with_source(io);
        assert!(error.source().is_some());
    }

    #[test]
    fn classification() {
        assert!(Error::bad_input().is_client_error());
        assert!(!Error::configuration().is_client_error());
        assert!(Error::provider().is_retryable());
        assert!(!Error::bad_input().is_retryable());
    }
}
