//! Authentication credentials for Gemini.

use std::fmt;

/// Credentials sent with every Gemini request.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum GeminiCredentials {
    /// API key sent in the `x-goog-api-key` header.
    ApiKey(String),
    /// No credential; requests will be rejected upstream.
    #[default]
    None,
}

impl GeminiCredentials {
    /// Create API key credentials.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Builds credentials from an optional, possibly blank, key.
    pub fn from_optional(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some(key) if !key.is_empty() => Self::api_key(key),
            _ => Self::None,
        }
    }

    /// Returns true if a key is present.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::ApiKey(_))
    }
}

impl fmt::Debug for GeminiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::None => f.write_str("None"),
        }
    }
}
