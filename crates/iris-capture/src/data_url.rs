//! Decoding of `data:` URLs returned by capture hosts.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use iris_core::image::ImageBytes;

use crate::error::{Error, Result};

/// Media type assumed when a capture declares none.
pub(crate) const CAPTURE_MEDIA_TYPE: &str = "image/png";

/// Decodes a base64 `data:<mime>[;params];base64,<payload>` URL.
///
/// The media type falls back to `image/png` when the URL declares none.
/// Percent-encoded (non-base64) payloads are rejected; capture hosts never
/// produce them.
pub fn decode_data_url(url: &str) -> Result<ImageBytes> {
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| Error::DataUrl("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::DataUrl("missing payload separator".to_string()))?;

    let mut params = header.split(';').map(str::trim);
    let media_type = params.next().unwrap_or_default();
    if !params.any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(Error::DataUrl("payload is not base64".to_string()));
    }

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::DataUrl(e.to_string()))?;

    if data.is_empty() {
        return Err(Error::DataUrl("payload is empty".to_string()));
    }

    let media_type = if media_type.is_empty() {
        CAPTURE_MEDIA_TYPE
    } else {
        media_type
    };

    Ok(ImageBytes::new(data, media_type.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_capture() -> anyhow::Result<()> {
        let image = decode_data_url("data:image/png;base64,iVBORw0KGgo=")?;
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(&image.data()[..4], &[0x89, b'P', b'N', b'G']);
        Ok(())
    }

    #[test]
    fn missing_media_type_defaults_to_png() -> anyhow::Result<()> {
        let image = decode_data_url("data:;base64,/9j/2Q==")?;
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.len(), 4);
        Ok(())
    }

    #[test]
    fn keeps_declared_type_and_ignores_params() -> anyhow::Result<()> {
        let image = decode_data_url("DATA:image/JPEG;name=shot.jpg;base64,/9j/2Q==")?;
        assert_eq!(image.media_type(), "image/jpeg");
        Ok(())
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(decode_data_url("https://example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:image/png,plain").is_err());
        assert!(decode_data_url("data:image/png;base64,***").is_err());
        assert!(decode_data_url("data:image/png;base64,").is_err());
    }
}
