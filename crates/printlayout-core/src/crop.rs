//! Cropping support for the interactive crop widget.
//!
//! The widget itself lives in the browser; this module holds the two pieces
//! the engine owns. First, the widget settings the front end pushes in: an
//! aspect-ratio constraint and a drag-mode toggle. Second, a pixel-region
//! crop used to produce the cropped raster when the user confirms.
//!
//! # Coordinate System
//!
//! Crop regions are in source raster pixels, top-left origin. Regions
//! extending beyond the raster are clamped; the output is never smaller
//! than 1x1.

use serde::{Deserialize, Serialize};

use crate::decode::Raster;

/// Aspect-ratio constraint for the crop selection box.
///
/// Free-mode editing leaves the box unconstrained. When the user enters an
/// explicit millimeter target, the box is locked to that ratio so the
/// selection matches what will be printed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CropConstraint {
    /// No aspect lock.
    #[default]
    Free,
    /// Lock the selection to width : height.
    Ratio { width: f64, height: f64 },
}

impl CropConstraint {
    /// The width / height ratio to hand to the widget, if locked.
    pub fn ratio(&self) -> Option<f64> {
        match *self {
            CropConstraint::Free => None,
            CropConstraint::Ratio { width, height } => {
                if width > 0.0 && height > 0.0 {
                    Some(width / height)
                } else {
                    None
                }
            }
        }
    }
}

/// What dragging inside the widget does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropDragMode {
    /// Drag draws a new crop selection.
    #[default]
    Crop,
    /// Drag pans the image under the selection.
    Pan,
}

impl CropDragMode {
    /// Parse from a mode label ("crop" or "pan").
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "crop" => Some(CropDragMode::Crop),
            "pan" => Some(CropDragMode::Pan),
            _ => None,
        }
    }
}

/// Crop a pixel region out of a raster.
///
/// # Behavior
///
/// - Coordinates beyond the raster bounds are clamped
/// - Minimum output dimension is 1x1 pixels
/// - A region covering the whole raster returns a copy
pub fn crop_region(raster: &Raster, x: u32, y: u32, width: u32, height: u32) -> Raster {
    // Fast path: full-raster region returns a clone
    if x == 0 && y == 0 && width >= raster.width && height >= raster.height {
        return raster.clone();
    }

    let left = x.min(raster.width.saturating_sub(1));
    let top = y.min(raster.height.saturating_sub(1));
    let right = left.saturating_add(width).min(raster.width);
    let bottom = top.saturating_add(height).min(raster.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let mut output = vec![0u8; (out_width * out_height * 3) as usize];

    // Row-by-row copy; rows are contiguous in the source
    for row in 0..out_height {
        let src_y = top + row;
        let src_start = ((src_y * raster.width + left) * 3) as usize;
        let src_end = src_start + (out_width * 3) as usize;
        let dst_start = (row * out_width * 3) as usize;
        let dst_end = dst_start + (out_width * 3) as usize;

        output[dst_start..dst_end].copy_from_slice(&raster.pixels[src_start..src_end]);
    }

    Raster {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn test_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        Raster {
            width,
            height,
            pixels,
        }
    }

    proptest! {
        /// Property: output dimensions are positive and bounded by the input.
        #[test]
        fn prop_output_dimensions_bounded(
            (w, h) in (4u32..=64, 4u32..=64),
            (x, y, cw, ch) in (0u32..=80, 0u32..=80, 0u32..=80, 0u32..=80),
        ) {
            let raster = test_raster(w, h);
            let result = crop_region(&raster, x, y, cw, ch);

            prop_assert!(result.width >= 1 && result.width <= w);
            prop_assert!(result.height >= 1 && result.height <= h);
        }

        /// Property: pixel buffer length matches dimensions.
        #[test]
        fn prop_pixel_length_matches(
            (w, h) in (4u32..=64, 4u32..=64),
            (x, y, cw, ch) in (0u32..=80, 0u32..=80, 1u32..=80, 1u32..=80),
        ) {
            let raster = test_raster(w, h);
            let result = crop_region(&raster, x, y, cw, ch);

            prop_assert_eq!(
                result.pixels.len(),
                (result.width * result.height * 3) as usize
            );
        }

        /// Property: an in-bounds region copies exact pixel values.
        #[test]
        fn prop_in_bounds_pixels_copied(
            (w, h) in (8u32..=64, 8u32..=64),
        ) {
            let raster = test_raster(w, h);
            let result = crop_region(&raster, 2, 2, w / 2, h / 2);

            // First pixel is source (2, 2)
            let expected = ((2 * w + 2) % 256) as u8;
            prop_assert_eq!(result.pixels[0], expected);
        }

        /// Property: cropping is deterministic.
        #[test]
        fn prop_crop_deterministic(
            (w, h) in (4u32..=64, 4u32..=64),
            (x, y, cw, ch) in (0u32..=80, 0u32..=80, 0u32..=80, 0u32..=80),
        ) {
            let raster = test_raster(w, h);
            let a = crop_region(&raster, x, y, cw, ch);
            let b = crop_region(&raster, x, y, cw, ch);
            prop_assert_eq!(a, b);
        }
    }
}
