//! Raster decoding and resampling.
//!
//! This module is the boundary to the file ingestion collaborator: the
//! browser supplies raw file bytes plus a declared media type, and the
//! engine turns them into owned RGB rasters. It also provides the
//! resampling used for thumbnails and for compositing placed images onto
//! the output surface.
//!
//! All operations are synchronous; the WASM bindings call them from the
//! single browser event-processing thread.

mod bitmap;
mod resize;
mod types;

pub use bitmap::{decode_image, ExifOrientation};
pub use resize::{generate_thumbnail, resize, resize_to_fit};
pub use types::{is_image_media_type, DecodeError, FilterType, Raster};
