//! EXIF orientation handling.

use std::io::Cursor;

use image::DynamicImage;

/// Orientation recorded in EXIF tag 0x0112.
///
/// Describes how the stored pixels must be transformed to be displayed
/// upright. Unknown values are treated as [`Orientation::Normal`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 1: stored upright.
    #[default]
    Normal,
    /// 2: mirrored horizontally.
    MirrorHorizontal,
    /// 3: rotated 180 degrees.
    Rotate180,
    /// 4: mirrored vertically.
    MirrorVertical,
    /// 5: mirrored horizontally, then rotated 270 degrees clockwise.
    Transpose,
    /// 6: needs a 90 degree clockwise rotation.
    Rotate90,
    /// 7: mirrored horizontally, then rotated 90 degrees clockwise.
    Transverse,
    /// 8: needs a 270 degree clockwise rotation.
    Rotate270,
}

impl Orientation {
    /// Maps the raw EXIF value.
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Self::MirrorHorizontal,
            3 => Self::Rotate180,
            4 => Self::MirrorVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// Returns true if applying this orientation swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Transforms the image so it is displayed upright.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => image,
            Self::MirrorHorizontal => image.fliph(),
            Self::Rotate180 => image.rotate180(),
            Self::MirrorVertical => image.flipv(),
            Self::Transpose => image.rotate90().fliph(),
            Self::Rotate90 => image.rotate90(),
            Self::Transverse => image.rotate270().fliph(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}

/// Reads the orientation from the container's EXIF block.
///
/// Missing or unreadable metadata yields [`Orientation::Normal`].
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    /// Builds an APP1 segment carrying only an Orientation tag.
    pub(crate) fn exif_app1(orientation: u16) -> Vec<u8> {
        let [hi, lo] = orientation.to_be_bytes();
        let mut segment = vec![0xFF, 0xE1, 0x00, 0x22];
        segment.extend_from_slice(b"Exif\0\0");
        // Big-endian TIFF header, first IFD at offset 8.
        segment.extend_from_slice(&[0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        // One entry: Orientation, SHORT, count 1.
        segment.extend_from_slice(&[0x00, 0x01]);
        segment.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        segment.extend_from_slice(&[hi, lo, 0x00, 0x00]);
        segment.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        segment
    }

    /// Inserts an EXIF segment right after the SOI marker of a JPEG.
    pub(crate) fn with_exif(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let mut out = jpeg[..2].to_vec();
        out.extend(exif_app1(orientation));
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    fn marked() -> DynamicImage {
        // 2x1 image: red on the left, blue on the right.
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn unknown_values_are_normal() {
        assert_eq!(Orientation::from_exif(0), Orientation::Normal);
        assert_eq!(Orientation::from_exif(1), Orientation::Normal);
        assert_eq!(Orientation::from_exif(99), Orientation::Normal);
    }

    #[test]
    fn rotations_swap_dimensions() {
        for value in 5..=8 {
            let orientation = Orientation::from_exif(value);
            assert!(orientation.swaps_dimensions());
            let rotated = orientation.apply(marked());
            assert_eq!((rotated.width(), rotated.height()), (1, 2));
        }
        for value in 1..=4 {
            let orientation = Orientation::from_exif(value);
            assert!(!orientation.swaps_dimensions());
            let kept = orientation.apply(marked());
            assert_eq!((kept.width(), kept.height()), (2, 1));
        }
    }

    #[test]
    fn mirror_swaps_pixels() {
        let mirrored = Orientation::MirrorHorizontal.apply(marked()).to_rgb8();
        assert_eq!(mirrored.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(mirrored.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn rotate90_moves_left_pixel_to_top() {
        let rotated = Orientation::Rotate90.apply(marked()).to_rgb8();
        assert_eq!(rotated.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(rotated.get_pixel(0, 1), &Rgb([0, 0, 255]));
    }

    #[test]
    fn missing_metadata_is_normal() {
        assert_eq!(read_orientation(b""), Orientation::Normal);
        assert_eq!(read_orientation(b"not an image"), Orientation::Normal);
    }

    #[test]
    fn reads_orientation_from_jpeg() -> anyhow::Result<()> {
        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90)
            .encode_image(&marked().to_rgb8())?;

        assert_eq!(read_orientation(&jpeg), Orientation::Normal);
        assert_eq!(read_orientation(&with_exif(&jpeg, 6)), Orientation::Rotate90);
        assert_eq!(read_orientation(&with_exif(&jpeg, 3)), Orientation::Rotate180);
        Ok(())
    }
}
