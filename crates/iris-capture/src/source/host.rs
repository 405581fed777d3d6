//! Host environment abstraction for tab capture.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Encoding requested from the host for a tab capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CaptureFormat {
    #[default]
    Png,
    Jpeg,
}

impl CaptureFormat {
    /// Returns the media type of images in this format.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Returns the file name given to captures in this format.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Png => "capture.png",
            Self::Jpeg => "capture.jpg",
        }
    }
}

/// Failure reported by the host while capturing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    /// Creates a host error with the host's own message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the host's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An environment that can screenshot the visible tab of a window.
///
/// Browser integrations implement this; tests use an in-memory fake.
#[async_trait::async_trait]
pub trait CaptureHost: Send + Sync {
    /// Returns true if [`capture_visible_tab`] can be called.
    ///
    /// [`capture_visible_tab`]: CaptureHost::capture_visible_tab
    fn supports_tab_capture(&self) -> bool;

    /// Captures the visible area of a tab and returns it as a `data:` URL.
    ///
    /// `tab_id` of `None` targets the current window.
    async fn capture_visible_tab(
        &self,
        tab_id: Option<u32>,
        format: CaptureFormat,
    ) -> Result<String, HostError>;
}
