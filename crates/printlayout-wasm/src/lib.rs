//! Printlayout WASM - WebAssembly bindings for Printlayout
//!
//! This crate exposes the printlayout-core layout engine to
//! JavaScript/TypeScript. The browser owns the DOM, file pickers, the
//! interactive crop widget, and the save dialog; everything else - the
//! placed-image state, drag snapping, crop reconciliation, rendering, and
//! export encoding - lives behind these bindings.
//!
//! # Module Structure
//!
//! - `session` - The stateful layout session (ingest, drag, crop, export)
//! - `types` - WASM-compatible wrapper types for raster data
//! - `decode` - One-shot raster decoding bindings
//! - `encode` - One-shot raster encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { WasmLayoutSession } from '@printlayout/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new WasmLayoutSession();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! session.add_image(bytes, file.type);
//! canvasCtx.putImageData(new ImageData(
//!   new Uint8ClampedArray(session.render_rgba()),
//!   session.surface_width,
//!   session.surface_height,
//! ), 0, 0);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

// Re-export public types
pub use decode::{decode_image, generate_thumbnail, is_image_media_type};
pub use encode::{encode_jpeg, encode_png};
pub use session::WasmLayoutSession;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Surface panic messages in the browser console instead of a bare
    // "unreachable executed" trap
    std::panic::set_hook(Box::new(|info| {
        web_sys::console::error_1(&info.to_string().into());
    }));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Maximum number of images that can be placed on the surface.
#[wasm_bindgen]
pub fn max_images() -> usize {
    printlayout_core::MAX_IMAGES
}
