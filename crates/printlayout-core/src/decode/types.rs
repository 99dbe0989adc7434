//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The declared media type is not an image type.
    #[error("Not an image media type: {0}")]
    NotAnImage(String),
}

/// Filter type for image resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Returns true if a declared media type string names an image format.
///
/// Ingestion filters file batches with this check; anything that does not
/// start with `image/` is skipped silently rather than treated as an error.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// An owned raster with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 3) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a uniformly filled raster.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Aspect ratio as height / width.
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/jpeg"));
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/webp"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type(""));
    }

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_raster_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let raster = Raster::new(100, 50, pixels);

        assert_eq!(raster.width, 100);
        assert_eq!(raster.height, 50);
        assert_eq!(raster.byte_size(), 15000);
        assert!(!raster.is_empty());
    }

    #[test]
    fn test_raster_filled() {
        let raster = Raster::filled(2, 2, [10, 20, 30]);
        assert_eq!(raster.pixels, vec![10, 20, 30, 10, 20, 30, 10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_raster_aspect() {
        let raster = Raster::filled(200, 100, [0, 0, 0]);
        assert_eq!(raster.aspect(), 0.5);
    }

    #[test]
    fn test_raster_empty() {
        let raster = Raster::new(0, 0, vec![]);
        assert!(raster.is_empty());
    }

    #[test]
    fn test_raster_rgb_image_round_trip() {
        let raster = Raster::filled(4, 3, [1, 2, 3]);
        let img = raster.to_rgb_image().unwrap();
        let back = Raster::from_rgb_image(img);
        assert_eq!(back, raster);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::NotAnImage("application/pdf".to_string());
        assert_eq!(err.to_string(), "Not an image media type: application/pdf");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
