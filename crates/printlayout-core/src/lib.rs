//! Printlayout Core - photo print layout engine
//!
//! This crate provides the core functionality for Printlayout: placing up
//! to four photos on a fixed-size print surface (L / 2L paper, portrait or
//! landscape), dragging them with millimeter grid snapping, reconciling
//! crop results against physical print sizes, and exporting the composed
//! surface as PNG or JPEG.
//!
//! All state lives in a [`LayoutSession`]; the browser front end (via the
//! WASM bindings crate) feeds it pointer events, file bytes, and crop
//! results, and redraws from [`LayoutSession::render`] after every
//! mutation.

pub mod crop;
pub mod decode;
pub mod drag;
pub mod encode;
pub mod paper;
pub mod render;
pub mod session;
pub mod units;

pub use crop::{crop_region, CropConstraint, CropDragMode};
pub use decode::{decode_image, generate_thumbnail, is_image_media_type, DecodeError, Raster};
pub use drag::{map_to_surface, DragSession, ViewRect};
pub use encode::{encode_jpeg, encode_png, EncodeError, ExportFormat, EXPORT_JPEG_QUALITY};
pub use paper::{CanvasConfig, Orientation, PaperSize};
pub use session::{
    CandidateFile, CropMode, ImageId, LayoutError, LayoutSession, PlacedImage, PlacedImageInfo,
    MAX_IMAGES,
};
pub use units::{mm_to_px, snap_to_grid, RESOLUTION_DPI};
