//! Surface export encoding.
//!
//! Encodes the rendered surface with the `image` crate's PNG and JPEG
//! encoders. Export happens entirely client-side: the bindings hand the
//! encoded bytes to the browser, which triggers the file save.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Raster;
use crate::session::LayoutSession;

/// JPEG quality used for export. Print output keeps maximum quality.
pub const EXPORT_JPEG_QUALITY: u8 = 100;

/// Errors that can occur during surface encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: &'static str, message: String },
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Parse from a format label ("png" or "jpeg").
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "png" => Some(ExportFormat::Png),
            "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    /// File extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    /// Media type of the encoded bytes.
    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    /// Download file name for an exported layout.
    pub fn file_name(self) -> String {
        format!("layout_image.{}", self.extension())
    }
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Encode a raster as JPEG bytes at the given quality (1-100, clamped).
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

fn validate(raster: &Raster) -> Result<(), EncodeError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
        });
    }

    let expected = (raster.width as usize) * (raster.height as usize) * 3;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }
    Ok(())
}

impl LayoutSession {
    /// Render the layout and encode it for download.
    ///
    /// JPEG export always uses [`EXPORT_JPEG_QUALITY`].
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
        let surface = self.render();
        match format {
            ExportFormat::Png => encode_png(&surface),
            ExportFormat::Jpeg => encode_jpeg(&surface, EXPORT_JPEG_QUALITY),
        }
    }
}
