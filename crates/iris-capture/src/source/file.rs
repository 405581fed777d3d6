use std::path::Path;

use bytes::Bytes;
use iris_core::image::{ImageBytes, UNKNOWN_MEDIA_TYPE};

use crate::TRACING_TARGET;
use crate::error::{Error, Result};

/// A file the user picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    file_name: String,
    media_type: String,
    data: Bytes,
}

impl SelectedFile {
    /// Wraps bytes that were already read.
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Reads a file from disk, guessing its media type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let media_type = media_type_for(path);

        tracing::debug!(
            target: TRACING_TARGET,
            file_name = %file_name,
            media_type,
            size = data.len(),
            "Selected file read"
        );

        Ok(Self::new(file_name, media_type, data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Splits into the file name and the image payload.
    pub(crate) fn into_parts(self) -> (String, ImageBytes) {
        (self.file_name, ImageBytes::new(self.data, self.media_type))
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg" | "jpe") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => UNKNOWN_MEDIA_TYPE,
    }
}
