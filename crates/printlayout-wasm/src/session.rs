//! Layout session WASM bindings.
//!
//! [`WasmLayoutSession`] wraps the core session and is the single state
//! object the front end holds: file ingestion, paper selection, pointer
//! interaction, crop confirmation, and export all go through it. Every
//! mutation is followed by a `render_rgba()` call from JavaScript to
//! repaint the output canvas.
//!
//! # Example
//!
//! ```typescript
//! import { WasmLayoutSession } from '@printlayout/wasm';
//!
//! const session = new WasmLayoutSession();
//! session.set_paper('L');
//! session.set_orientation('landscape');
//!
//! session.check_capacity(files.length);       // throws on >4 images
//! for (const file of files) {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   session.add_image(bytes, file.type);      // non-images are skipped
//! }
//!
//! const rgba = session.render_rgba();
//! ctx.putImageData(new ImageData(
//!   new Uint8ClampedArray(rgba), session.surface_width, session.surface_height), 0, 0);
//! ```

use printlayout_core::{
    map_to_surface, CandidateFile, CropDragMode, CropMode, ExportFormat, ImageId, LayoutSession,
    Orientation, PaperSize, ViewRect,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, rgb_to_rgba, JsRaster};

/// Settings the front end pushes into the crop widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct CropWidgetOptions {
    /// Width / height lock for the selection box, absent in free mode.
    aspect_ratio: Option<f64>,
    drag_mode: CropDragMode,
}

/// A photo print layout session.
#[wasm_bindgen]
pub struct WasmLayoutSession {
    inner: LayoutSession,
}

impl Default for WasmLayoutSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmLayoutSession {
    /// Create a session with the default paper selection (L, landscape).
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLayoutSession {
        WasmLayoutSession {
            inner: LayoutSession::default(),
        }
    }

    /// Select the paper size ("L" or "2L"). Placed images are not
    /// repositioned; the caller should repaint.
    pub fn set_paper(&mut self, label: &str) -> Result<(), JsValue> {
        let paper = PaperSize::from_label(label)
            .ok_or_else(|| js_error(format!("unknown paper size: {label}")))?;
        self.inner.set_paper(paper);
        Ok(())
    }

    /// Select the orientation ("landscape" or "portrait").
    pub fn set_orientation(&mut self, label: &str) -> Result<(), JsValue> {
        let orientation = Orientation::from_label(label)
            .ok_or_else(|| js_error(format!("unknown orientation: {label}")))?;
        self.inner.set_orientation(orientation);
        Ok(())
    }

    /// Intrinsic surface width in pixels for the current paper selection.
    #[wasm_bindgen(getter)]
    pub fn surface_width(&self) -> u32 {
        self.inner.surface_dimensions().0
    }

    /// Intrinsic surface height in pixels for the current paper selection.
    #[wasm_bindgen(getter)]
    pub fn surface_height(&self) -> u32 {
        self.inner.surface_dimensions().1
    }

    /// Number of images currently placed.
    #[wasm_bindgen(getter)]
    pub fn image_count(&self) -> usize {
        self.inner.images().len()
    }

    /// Check that a batch of `batch_size` files fits the 4-image limit.
    ///
    /// Call this once per dropped/selected batch before `add_image`; the
    /// error message is suitable for a user-facing alert. The whole batch
    /// counts, so mixed batches are rejected outright.
    pub fn check_capacity(&self, batch_size: usize) -> Result<(), JsValue> {
        self.inner
            .check_capacity(batch_size)
            .map_err(js_error)
    }

    /// Ingest one file from an accepted batch.
    ///
    /// Files whose media type is not `image/*` are skipped silently and
    /// return `undefined`; accepted images return their new id. The image
    /// is placed at the default 40mm print width at a cascading offset.
    pub fn add_image(&mut self, bytes: &[u8], media_type: &str) -> Result<Option<u64>, JsValue> {
        let added = self
            .inner
            .add_images(&[CandidateFile { media_type, bytes }])
            .map_err(js_error)?;
        Ok(added.first().map(|id| id.0))
    }

    /// Remove an image from the layout.
    pub fn remove_image(&mut self, id: u64) -> Result<(), JsValue> {
        self.inner
            .remove_image(ImageId(id))
            .map_err(js_error)
    }

    /// Pointer-down in client coordinates.
    ///
    /// `rect_*` describe the canvas element's `getBoundingClientRect()`;
    /// they map the client point into surface pixel space regardless of
    /// CSS scaling. Touch input passes the primary touch point here too.
    /// Returns the id of the image now being dragged, if any was hit.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) -> Option<u64> {
        let (sx, sy) = self.surface_point(client_x, client_y, rect_left, rect_top, rect_width, rect_height);
        self.inner.pointer_down(sx, sy).map(|id| id.0)
    }

    /// Pointer-move in client coordinates. Returns true when the drag
    /// target moved and the canvas should repaint.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) -> bool {
        let (sx, sy) = self.surface_point(client_x, client_y, rect_left, rect_top, rect_width, rect_height);
        self.inner.pointer_move(sx, sy)
    }

    /// Pointer-up or pointer-leave: ends any drag unconditionally.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    /// Open the crop editor on one image. The session remembers the target
    /// until the crop is confirmed, the editor is closed, or the image is
    /// removed.
    pub fn open_editor(&mut self, id: u64) -> Result<(), JsValue> {
        self.inner
            .open_editor(ImageId(id))
            .map_err(js_error)
    }

    /// Id of the image currently open in the crop editor, if any.
    pub fn editing_target(&self) -> Option<u64> {
        self.inner.editing_target().map(|id| id.0)
    }

    /// Close the crop editor without applying anything.
    pub fn close_editor(&mut self) {
        self.inner.close_editor();
    }

    /// Widget settings for the crop editor's current mode: the aspect lock
    /// when an explicit print size is entered (omit the dimensions for
    /// free mode) and the drag-mode toggle ("crop" or "pan").
    pub fn crop_widget_options(
        &self,
        width_mm: Option<f64>,
        height_mm: Option<f64>,
        drag_mode: &str,
    ) -> Result<JsValue, JsValue> {
        let drag_mode = CropDragMode::from_label(drag_mode)
            .ok_or_else(|| js_error(format!("unknown drag mode: {drag_mode}")))?;
        let mode = match (width_mm, height_mm) {
            (Some(width_mm), Some(height_mm)) => CropMode::ExplicitMm {
                width_mm,
                height_mm,
            },
            _ => CropMode::Free,
        };
        serde_wasm_bindgen::to_value(&CropWidgetOptions {
            aspect_ratio: mode.constraint().ratio(),
            drag_mode,
        })
        .map_err(js_error)
    }

    /// Confirm a free-mode crop for the editor target: the display size
    /// keeps the physical scale that was in effect before the crop.
    ///
    /// `bytes` is the cropped raster re-encoded by the crop widget (for
    /// example via `canvas.toBlob`). The target is re-validated, so a crop
    /// completing after its image was deleted fails without side effects.
    /// The editor closes on success. Returns the id the crop was applied to.
    pub fn confirm_crop_free(&mut self, bytes: &[u8]) -> Result<u64, JsValue> {
        self.confirm_crop(bytes, CropMode::Free)
    }

    /// Confirm an explicit-size crop for the editor target: the image will
    /// print at exactly `width_mm` x `height_mm`. The cropped raster is
    /// stored at its native resolution, never resampled down to the
    /// display size.
    pub fn confirm_crop_mm(
        &mut self,
        bytes: &[u8],
        width_mm: f64,
        height_mm: f64,
    ) -> Result<u64, JsValue> {
        self.confirm_crop(
            bytes,
            CropMode::ExplicitMm {
                width_mm,
                height_mm,
            },
        )
    }

    /// Render the layout and return RGBA bytes for `ImageData` at
    /// `surface_width` x `surface_height`.
    pub fn render_rgba(&self) -> Vec<u8> {
        rgb_to_rgba(&self.inner.render().pixels)
    }

    /// Render the layout and encode it for download ("png" or "jpeg";
    /// JPEG uses maximum quality).
    pub fn export(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = parse_format(format)?;
        self.inner
            .export(format)
            .map_err(js_error)
    }

    /// Download file name for an export format ("layout_image.png" /
    /// "layout_image.jpeg").
    pub fn export_file_name(&self, format: &str) -> Result<String, JsValue> {
        Ok(parse_format(format)?.file_name())
    }

    /// Full-resolution raster of one placed image, for the crop widget.
    pub fn image_raster(&self, id: u64) -> Result<JsRaster, JsValue> {
        let image = self
            .inner
            .image(ImageId(id))
            .ok_or_else(|| js_error("image is not in the layout"))?;
        Ok(JsRaster::from_raster(image.raster().clone()))
    }

    /// Thumbnail of one placed image for the image list, fitting within a
    /// `size` x `size` box.
    pub fn thumbnail(&self, id: u64, size: u32) -> Result<JsRaster, JsValue> {
        let image = self
            .inner
            .image(ImageId(id))
            .ok_or_else(|| js_error("image is not in the layout"))?;
        printlayout_core::generate_thumbnail(image.raster(), size)
            .map(JsRaster::from_raster)
            .map_err(js_error)
    }

    /// Snapshot of every placed image (id, position, display size, raster
    /// dimensions) in z-order. The front end regenerates its image list
    /// from this projection instead of mutating the DOM ad hoc.
    pub fn image_list(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.image_infos())
            .map_err(js_error)
    }
}

impl WasmLayoutSession {
    fn surface_point(
        &self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) -> (f64, f64) {
        let rect = ViewRect {
            left: rect_left,
            top: rect_top,
            width: rect_width,
            height: rect_height,
        };
        map_to_surface(self.inner.surface_dimensions(), rect, client_x, client_y)
    }

    fn confirm_crop(&mut self, bytes: &[u8], mode: CropMode) -> Result<u64, JsValue> {
        let cropped =
            printlayout_core::decode_image(bytes).map_err(js_error)?;
        self.inner
            .confirm_crop(cropped, mode)
            .map(|id| id.0)
            .map_err(js_error)
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &LayoutSession {
        &self.inner
    }

    #[cfg(test)]
    pub(crate) fn inner_mut(&mut self) -> &mut LayoutSession {
        &mut self.inner
    }
}

fn parse_format(label: &str) -> Result<ExportFormat, JsValue> {
    ExportFormat::from_label(label)
        .ok_or_else(|| js_error(format!("unknown export format: {label}")))
}

/// Tests for session bindings.
///
/// Note: methods returning `Result<T, JsValue>` only run on wasm32
/// targets; the non-wasm tests below exercise the plain-typed surface and
/// the underlying core session. See `printlayout_core::session` for
/// comprehensive coverage of the layout logic.
#[cfg(test)]
mod tests {
    use super::*;
    use printlayout_core::Raster;

    #[test]
    fn test_new_session_defaults() {
        let session = WasmLayoutSession::new();
        assert_eq!(session.surface_width(), 1500);
        assert_eq!(session.surface_height(), 1051);
        assert_eq!(session.image_count(), 0);
    }

    #[test]
    fn test_pointer_flow_with_css_scaled_rect() {
        let mut session = WasmLayoutSession::new();
        let id = session
            .inner_mut()
            .add_raster(Raster::filled(10, 10, [0, 0, 0]))
            .unwrap();

        // Surface rendered at half size: client deltas double in surface space
        let hit = session.pointer_down(40.0, 40.0, 0.0, 0.0, 750.0, 525.5);
        assert_eq!(hit, Some(id.0));

        assert!(session.pointer_move(100.0, 100.0, 0.0, 0.0, 750.0, 525.5));
        session.pointer_up();

        let image = session.inner().image(id).unwrap();
        assert_eq!(image.x % 12.0, 0.0);
        assert_eq!(image.y % 12.0, 0.0);
    }

    #[test]
    fn test_pointer_down_miss_returns_none() {
        let mut session = WasmLayoutSession::new();
        let hit = session.pointer_down(10.0, 10.0, 0.0, 0.0, 1500.0, 1051.0);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_render_rgba_length_and_alpha() {
        let session = WasmLayoutSession::new();
        let rgba = session.render_rgba();

        assert_eq!(rgba.len(), 1500 * 1051 * 4);
        // Opaque white
        assert_eq!(&rgba[0..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_editor_target_tracking() {
        let mut session = WasmLayoutSession::new();
        let id = session
            .inner_mut()
            .add_raster(Raster::filled(10, 10, [0, 0, 0]))
            .unwrap();

        assert_eq!(session.editing_target(), None);
        session.inner_mut().open_editor(id).unwrap();
        assert_eq!(session.editing_target(), Some(id.0));

        session.close_editor();
        assert_eq!(session.editing_target(), None);
    }

    #[test]
    fn test_parse_format() {
        assert!(parse_format("png").is_ok());
        assert!(parse_format("jpeg").is_ok());
        assert!(parse_format("webp").is_err());
    }
}
