//! Raster encoding WASM bindings.
//!
//! Exposes the core PNG/JPEG encoders to JavaScript for the export
//! workflow. Session export normally goes through
//! `WasmLayoutSession::export`; these one-shot functions cover encoding a
//! standalone raster (for example the crop preview).
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@printlayout/wasm';
//!
//! const pngBytes = encode_png(raster);
//! const jpegBytes = encode_jpeg(raster, 100);
//! const blob = new Blob([pngBytes], { type: 'image/png' });
//! ```

use printlayout_core::encode;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsRaster};

/// Encode a raster as PNG bytes.
///
/// # Errors
///
/// Returns an error if the raster has zero dimensions or its pixel buffer
/// does not match width * height * 3.
#[wasm_bindgen]
pub fn encode_png(raster: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&raster.to_raster()).map_err(js_error)
}

/// Encode a raster as JPEG bytes.
///
/// # Arguments
///
/// * `raster` - The raster to encode
/// * `quality` - JPEG quality (1-100, clamped; export uses 100)
#[wasm_bindgen]
pub fn encode_jpeg(raster: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&raster.to_raster(), quality).map_err(js_error)
}
