//! Raster resampling for thumbnails and surface composition.
//!
//! All functions return new `Raster` instances without modifying the input.
//! The thumbnail list shown next to the canvas is a pure projection of the
//! placed images, regenerated from state through these functions.

use super::{DecodeError, FilterType, Raster};

/// Resample a raster to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if either target dimension is zero.
pub fn resize(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if raster.width == width && raster.height == height {
        return Ok(raster.clone());
    }

    let rgb_image = raster
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(Raster::from_rgb_image(resized))
}

/// Resample a raster to fit within a maximum edge length, preserving aspect
/// ratio. Rasters already within the bound are returned unchanged.
pub fn resize_to_fit(
    raster: &Raster,
    max_edge: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if raster.width <= max_edge && raster.height <= max_edge {
        return Ok(raster.clone());
    }

    let (new_width, new_height) = fit_dimensions(raster.width, raster.height, max_edge);
    resize(raster, new_width, new_height, filter)
}

/// Generate a thumbnail for the image list.
///
/// Bilinear filtering, fits within a `size x size` box.
pub fn generate_thumbnail(raster: &Raster, size: u32) -> Result<Raster, DecodeError> {
    resize_to_fit(raster, size, FilterType::Bilinear)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let raster = gradient_raster(100, 50);
        let resized = resize(&raster, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let raster = gradient_raster(100, 50);
        let resized = resize(&raster, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, raster);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let raster = gradient_raster(100, 50);

        assert!(resize(&raster, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&raster, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let raster = gradient_raster(600, 400);
        let resized = resize_to_fit(&raster, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 256);
        assert_eq!(resized.height, 171); // 400 * (256/600) ≈ 171
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let raster = gradient_raster(400, 600);
        let resized = resize_to_fit(&raster, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 171);
        assert_eq!(resized.height, 256);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let raster = gradient_raster(100, 50);
        let resized = resize_to_fit(&raster, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_generate_thumbnail() {
        let raster = gradient_raster(600, 400);
        let thumb = generate_thumbnail(&raster, 128).unwrap();

        assert!(thumb.width <= 128);
        assert!(thumb.height <= 128);
        assert!(thumb.width == 128 || thumb.height == 128);
    }

    #[test]
    fn test_fit_dimensions_square() {
        assert_eq!(fit_dimensions(400, 400, 256), (256, 256));
    }

    #[test]
    fn test_fit_dimensions_zero_input() {
        assert_eq!(fit_dimensions(0, 0, 256), (0, 0));
    }
}
