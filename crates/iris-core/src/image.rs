//! Image payloads flowing through the pipeline.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Media type sent for every normalized image.
pub const NORMALIZED_MEDIA_TYPE: &str = "image/jpeg";

/// Media type assumed when the sender declares none.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Raw image content as received from a caller, plus its declared media type.
///
/// The declared type is informational; decoding sniffs the actual format from
/// the bytes. Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    data: Bytes,
    media_type: String,
}

impl ImageBytes {
    /// Creates a new payload from bytes and a declared media type.
    pub fn new(data: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    /// Creates a payload whose media type is not known.
    pub fn untyped(data: impl Into<Bytes>) -> Self {
        Self::new(data, UNKNOWN_MEDIA_TYPE)
    }

    /// Returns the raw bytes.
    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the declared media type.
    #[inline]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the payload size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A re-encoded JPEG whose width is bounded by the normalizer.
///
/// Dimensions are those of the encoded image, after orientation correction
/// and resizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedImage {
    data: Bytes,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    /// Wraps already encoded JPEG bytes.
    pub fn new(data: impl Into<Bytes>, width: u32, height: u32) -> Self {
        Self {
            data: data.into(),
            width,
            height,
        }
    }

    /// Returns the encoded JPEG bytes.
    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the media type, always [`NORMALIZED_MEDIA_TYPE`].
    #[inline]
    pub fn media_type(&self) -> &'static str {
        NORMALIZED_MEDIA_TYPE
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Converts back into raw bytes, e.g. to normalize a second time.
    pub fn into_image_bytes(self) -> ImageBytes {
        ImageBytes::new(self.data, NORMALIZED_MEDIA_TYPE)
    }
}
