//! Image decoding with EXIF orientation handling.
//!
//! The browser hands us raw file bytes; the format is sniffed from the
//! content rather than trusted from the file name. JPEG photos straight off
//! a camera or phone usually carry an EXIF orientation tag, which we apply
//! here so the placed image matches what the user saw in their gallery.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, Raster};

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ExifOrientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for ExifOrientation {
    fn from(value: u32) -> Self {
        match value {
            1 => ExifOrientation::Normal,
            2 => ExifOrientation::FlipHorizontal,
            3 => ExifOrientation::Rotate180,
            4 => ExifOrientation::FlipVertical,
            5 => ExifOrientation::Transpose,
            6 => ExifOrientation::Rotate90CW,
            7 => ExifOrientation::Transverse,
            8 => ExifOrientation::Rotate270CW,
            _ => ExifOrientation::Normal,
        }
    }
}

/// Decode an image file from bytes, applying EXIF orientation correction.
///
/// The format (PNG or JPEG) is guessed from the content. Orientation
/// metadata, when present, is applied so the returned raster is upright.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be read or
/// decoded as a supported image format.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    // Extract EXIF orientation before decoding; PNG files simply have none
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(Raster::from_rgb_image(oriented.into_rgb8()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `ExifOrientation::Normal` if no EXIF data is found or the
/// orientation cannot be determined.
fn extract_orientation(bytes: &[u8]) -> ExifOrientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return ExifOrientation::from(value);
                }
            }
            ExifOrientation::Normal
        }
        Err(_) => ExifOrientation::Normal,
    }
}

/// Apply an EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: ExifOrientation) -> DynamicImage {
    match orientation {
        ExifOrientation::Normal => img,
        ExifOrientation::FlipHorizontal => img.fliph(),
        ExifOrientation::Rotate180 => img.rotate180(),
        ExifOrientation::FlipVertical => img.flipv(),
        ExifOrientation::Transpose => img.rotate90().fliph(),
        ExifOrientation::Rotate90CW => img.rotate90(),
        ExifOrientation::Transverse => img.rotate270().fliph(),
        ExifOrientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a small RGB image to PNG bytes for decode tests.
    fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let raster = Raster::filled(width, height, rgb);
        let img = raster.to_rgb_image().unwrap();
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png_round_trip() {
        let bytes = png_bytes(8, 5, [200, 100, 50]);
        let raster = decode_image(&bytes).unwrap();

        assert_eq!(raster.width, 8);
        assert_eq!(raster.height, 5);
        assert_eq!(&raster.pixels[0..3], &[200, 100, 50]);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(ExifOrientation::from(1), ExifOrientation::Normal);
        assert_eq!(ExifOrientation::from(6), ExifOrientation::Rotate90CW);
        // Invalid values default to Normal
        assert_eq!(ExifOrientation::from(99), ExifOrientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let raster = Raster::filled(10, 4, [0, 0, 0]);
        let img = DynamicImage::ImageRgb8(raster.to_rgb_image().unwrap());
        let rotated = apply_orientation(img, ExifOrientation::Rotate90CW);
        assert_eq!(rotated.width(), 4);
        assert_eq!(rotated.height(), 10);
    }

    #[test]
    fn test_png_has_no_orientation() {
        let bytes = png_bytes(6, 3, [1, 2, 3]);
        assert_eq!(extract_orientation(&bytes), ExifOrientation::Normal);
    }
}
