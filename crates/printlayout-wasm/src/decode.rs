//! Raster decoding WASM bindings.
//!
//! One-shot decoding helpers for JavaScript. The layout workflow normally
//! goes through `WasmLayoutSession::add_image`, but the crop modal also
//! needs to decode and thumbnail rasters outside of a session.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG/JPEG bytes to an RGB raster
//! - [`is_image_media_type`] - Check a declared media type for the ingestion filter
//! - [`generate_thumbnail`] - Downsample a raster for list display

use printlayout_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsRaster};

/// Decode an image file from bytes.
///
/// The format is guessed from the content (PNG or JPEG) and EXIF
/// orientation is applied, so a photo straight off a phone comes out
/// upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image format or the
/// file is corrupted.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const raster = decode_image(bytes);
/// console.log(`Decoded ${raster.width}x${raster.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(js_error)
}

/// Returns true if a declared media type names an image format.
///
/// The ingestion boundary accepts only files whose type starts with
/// `image/`; everything else is skipped silently.
#[wasm_bindgen]
pub fn is_image_media_type(media_type: &str) -> bool {
    decode::is_image_media_type(media_type)
}

/// Generate a thumbnail fitting within a `size` x `size` box, preserving
/// aspect ratio. Rasters already within the box are returned unchanged.
#[wasm_bindgen]
pub fn generate_thumbnail(raster: &JsRaster, size: u32) -> Result<JsRaster, JsValue> {
    decode::generate_thumbnail(&raster.to_raster(), size)
        .map(JsRaster::from_raster)
        .map_err(js_error)
}
