//! HTTP error type returned by handlers and middleware.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Failure that renders as `{ "error": <message> }` with a status code.
///
/// `message` is what the caller sees; when absent the kind's default text is
/// used. `context` never leaves the server: it only shows up in [`Display`]
/// and therefore in logs.
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Default)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl<'a> Error<'a> {
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// Body sent to the client.
    fn to_response(&self) -> ErrorResponse<'_> {
        let response: ErrorResponse<'_> = self.kind.response();
        match self.message.as_deref() {
            Some(message) => response.with_error(message),
            None => response,
        }
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.to_response();
        write!(f, "{}: {}", response.status, response.error)?;

        match self.context.as_deref() {
            Some(context) => write!(f, " ({context})"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// A specialized [`Result`] type for HTTP handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every error response the server can produce.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No image, undecodable image or malformed form.
    BadRequest,
    /// Unknown route.
    NotFound,
    /// Upload above the configured limit.
    PayloadTooLarge,
    /// Configuration, provider, timeout or panic.
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Shorthand for `Error::from(self).with_message(message)`.
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error {
            kind: self,
            message: Some(message.into()),
            context: None,
        }
    }

    /// Shorthand for `Error::from(self).with_context(context)`.
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error {
            kind: self,
            message: None,
            context: Some(context.into()),
        }
    }

    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Default body and status for this kind.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::PayloadTooLarge => ErrorResponse::PAYLOAD_TOO_LARGE,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorKind {
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}
