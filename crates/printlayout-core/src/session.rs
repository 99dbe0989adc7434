//! Layout session state.
//!
//! [`LayoutSession`] is the single owned state object for one editing
//! session: the paper selection plus the ordered sequence of placed images.
//! Sequence order is z-order - the last image added draws on top and is hit
//! first by pointer interaction. All mutation goes through methods here (or
//! the drag handlers in [`crate::drag`]); there is no ambient shared state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop::CropConstraint;
use crate::decode::{decode_image, is_image_media_type, DecodeError, Raster};
use crate::drag::DragSession;
use crate::paper::{CanvasConfig, Orientation, PaperSize};
use crate::units::{mm_to_px, DEFAULT_IMAGE_WIDTH_MM};

/// Maximum number of images that can be placed on the surface.
pub const MAX_IMAGES: usize = 4;

/// Default cascade step between placement positions, in surface pixels.
const PLACEMENT_STEP_PX: f64 = 50.0;

/// Errors surfaced by layout session operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// An ingestion batch would push the image count past the maximum.
    /// The whole batch is rejected; nothing is placed.
    #[error("cannot add {requested} more image(s): at most {max} images can be placed")]
    CapacityExceeded { requested: usize, max: usize },

    /// The referenced image is no longer in the layout.
    #[error("image {0} is not in the layout")]
    UnknownImage(ImageId),

    /// A crop was confirmed with no image selected for editing.
    #[error("no image selected for editing")]
    NoEditTarget,

    /// Explicit print size with a non-positive or non-finite dimension.
    #[error("invalid print size: {width_mm}mm x {height_mm}mm")]
    InvalidTargetSize { width_mm: f64, height_mm: f64 },

    /// An image file could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Stable identifier for a placed image.
///
/// Assigned from a session-owned counter at ingestion and never reused
/// within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub u64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A candidate file handed over by the ingestion boundary.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFile<'a> {
    /// Declared media type, e.g. "image/jpeg".
    pub media_type: &'a str,
    /// Raw file content.
    pub bytes: &'a [u8],
}

/// How a confirmed crop reconciles the image's display size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CropMode {
    /// Keep the physical scale (display pixels per raster pixel) that was
    /// in effect before the crop. Cropping tighter never changes how large
    /// the subject prints, only how much of it is shown.
    Free,
    /// Print the cropped image at exactly this physical size.
    #[serde(rename = "mm")]
    ExplicitMm { width_mm: f64, height_mm: f64 },
}

impl CropMode {
    /// Aspect-ratio constraint to push into the crop widget for this mode.
    pub fn constraint(&self) -> CropConstraint {
        match *self {
            CropMode::Free => CropConstraint::Free,
            CropMode::ExplicitMm {
                width_mm,
                height_mm,
            } => CropConstraint::Ratio {
                width: width_mm,
                height: height_mm,
            },
        }
    }
}

/// An image placed on the output surface.
///
/// Position and display size are in surface pixel space, top-left origin.
/// The raster is owned and replaced wholesale when a crop is applied; it is
/// kept at its native resolution and only scaled down at render time, so
/// print quality is preserved.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    id: ImageId,
    raster: Raster,
    /// Top-left position on the surface. May be negative or beyond the
    /// surface edge; nothing clamps placement.
    pub x: f64,
    pub y: f64,
    /// Display size on the surface, always positive.
    pub width: f64,
    pub height: f64,
}

impl PlacedImage {
    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// True if the surface point falls inside this image's bounding box.
    pub fn contains(&self, sx: f64, sy: f64) -> bool {
        sx >= self.x && sx <= self.x + self.width && sy >= self.y && sy <= self.y + self.height
    }

    /// Serializable snapshot for the front end's image list.
    pub fn info(&self) -> PlacedImageInfo {
        PlacedImageInfo {
            id: self.id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            raster_width: self.raster.width,
            raster_height: self.raster.height,
        }
    }
}

/// Plain-data description of a placed image, for state snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedImageInfo {
    pub id: ImageId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub raster_width: u32,
    pub raster_height: u32,
}

/// One photo print layout being edited.
#[derive(Debug, Clone, Default)]
pub struct LayoutSession {
    config: CanvasConfig,
    images: Vec<PlacedImage>,
    next_id: u64,
    editing: Option<ImageId>,
    pub(crate) drag: Option<DragSession>,
}

impl LayoutSession {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    /// Output surface dimensions in pixels for the current paper selection.
    pub fn surface_dimensions(&self) -> (u32, u32) {
        self.config.surface_dimensions()
    }

    /// Change the paper size. Placed images keep their absolute pixel
    /// coordinates, which may now lie outside the new surface.
    pub fn set_paper(&mut self, paper: PaperSize) {
        self.config.paper = paper;
    }

    /// Change the orientation. As with [`set_paper`](Self::set_paper),
    /// placed images are not repositioned or rescaled.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
    }

    /// Placed images in z-order (first entry at the bottom).
    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    pub fn image(&self, id: ImageId) -> Option<&PlacedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    pub(crate) fn image_mut(&mut self, id: ImageId) -> Option<&mut PlacedImage> {
        self.images.iter_mut().find(|img| img.id == id)
    }

    /// Test helper: force an image's placement and display size.
    #[cfg(test)]
    pub(crate) fn set_image_bounds(&mut self, id: ImageId, x: f64, y: f64, width: f64, height: f64) {
        let image = self.image_mut(id).expect("image exists");
        image.x = x;
        image.y = y;
        image.width = width;
        image.height = height;
    }

    /// Serializable snapshots of every placed image, in z-order.
    ///
    /// The front end's thumbnail list is regenerated from this projection
    /// rather than being mutated ad hoc.
    pub fn image_infos(&self) -> Vec<PlacedImageInfo> {
        self.images.iter().map(PlacedImage::info).collect()
    }

    /// Check whether a batch of `batch_size` files can be ingested.
    ///
    /// The whole batch counts against capacity before media types are
    /// inspected, so a batch mixing images with other files can still be
    /// rejected outright.
    pub fn check_capacity(&self, batch_size: usize) -> Result<(), LayoutError> {
        if self.images.len() + batch_size > MAX_IMAGES {
            return Err(LayoutError::CapacityExceeded {
                requested: batch_size,
                max: MAX_IMAGES,
            });
        }
        Ok(())
    }

    /// Ingest a batch of candidate files.
    ///
    /// The batch is rejected outright if it would exceed [`MAX_IMAGES`];
    /// no file from a rejected batch is placed. Files whose media type is
    /// not `image/*` are skipped silently. Each accepted image is decoded,
    /// given a fresh id, sized to a 40mm default print width preserving its
    /// aspect ratio, and placed at a cascading offset so sequential images
    /// do not fully overlap.
    ///
    /// Returns the ids of the newly placed images.
    ///
    /// # Errors
    ///
    /// [`LayoutError::CapacityExceeded`] before anything is placed, or a
    /// decode error for the file that failed (images placed earlier in the
    /// batch remain).
    pub fn add_images(&mut self, batch: &[CandidateFile<'_>]) -> Result<Vec<ImageId>, LayoutError> {
        self.check_capacity(batch.len())?;

        let mut added = Vec::new();
        for file in batch {
            if !is_image_media_type(file.media_type) {
                continue;
            }
            added.push(self.place(decode_image(file.bytes)?));
        }
        Ok(added)
    }

    /// Ingest a single already-decoded raster. Subject to the same capacity
    /// limit and placement rules as [`add_images`](Self::add_images).
    pub fn add_raster(&mut self, raster: Raster) -> Result<ImageId, LayoutError> {
        self.check_capacity(1)?;
        Ok(self.place(raster))
    }

    fn place(&mut self, raster: Raster) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;

        let offset = self.images.len() as f64 * PLACEMENT_STEP_PX;
        let width = mm_to_px(DEFAULT_IMAGE_WIDTH_MM) as f64;
        let height = width * raster.aspect();

        self.images.push(PlacedImage {
            id,
            raster,
            x: PLACEMENT_STEP_PX + offset,
            y: PLACEMENT_STEP_PX + offset,
            width,
            height,
        });
        id
    }

    /// Remove an image from the layout.
    pub fn remove_image(&mut self, id: ImageId) -> Result<(), LayoutError> {
        let before = self.images.len();
        self.images.retain(|img| img.id != id);
        if self.images.len() == before {
            return Err(LayoutError::UnknownImage(id));
        }
        // Neither an in-flight drag nor an open editor may dangle
        if self.drag.as_ref().is_some_and(|d| d.target == id) {
            self.drag = None;
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(())
    }

    /// Open the crop editor for one image. Editing is exclusive; opening
    /// replaces any previously selected target.
    pub fn open_editor(&mut self, id: ImageId) -> Result<(), LayoutError> {
        if self.image(id).is_none() {
            return Err(LayoutError::UnknownImage(id));
        }
        self.editing = Some(id);
        Ok(())
    }

    /// The image currently selected for editing, if any.
    pub fn editing_target(&self) -> Option<ImageId> {
        self.editing
    }

    /// Close the crop editor without applying anything.
    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    /// Confirm a crop for the image selected in the editor.
    ///
    /// Delegates to [`apply_crop`](Self::apply_crop) and closes the editor
    /// on success. Returns the id the crop was applied to.
    ///
    /// # Errors
    ///
    /// [`LayoutError::NoEditTarget`] if no image is selected; otherwise
    /// whatever [`apply_crop`](Self::apply_crop) surfaces.
    pub fn confirm_crop(&mut self, cropped: Raster, mode: CropMode) -> Result<ImageId, LayoutError> {
        let id = self.editing.ok_or(LayoutError::NoEditTarget)?;
        self.apply_crop(id, cropped, mode)?;
        self.editing = None;
        Ok(id)
    }

    /// Apply a confirmed crop to one image.
    ///
    /// This is the single commit point for crop results: the target is
    /// re-validated here so a crop whose asynchronous re-encode completed
    /// after the image was deleted fails cleanly instead of corrupting
    /// state. The image's raster is replaced wholesale by `cropped` (at its
    /// native resolution - rendering scales it down to the display size, so
    /// a high-resolution crop keeps its print quality). Position is left
    /// unchanged in both modes.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownImage`] if the target no longer exists, or
    /// [`LayoutError::InvalidTargetSize`] for a non-positive or non-finite
    /// explicit size; prior state is untouched in both cases.
    pub fn apply_crop(
        &mut self,
        id: ImageId,
        cropped: Raster,
        mode: CropMode,
    ) -> Result<(), LayoutError> {
        if let CropMode::ExplicitMm {
            width_mm,
            height_mm,
        } = mode
        {
            if !(width_mm.is_finite() && height_mm.is_finite() && width_mm > 0.0 && height_mm > 0.0)
            {
                return Err(LayoutError::InvalidTargetSize {
                    width_mm,
                    height_mm,
                });
            }
        }

        let image = self.image_mut(id).ok_or(LayoutError::UnknownImage(id))?;

        match mode {
            CropMode::ExplicitMm {
                width_mm,
                height_mm,
            } => {
                image.width = mm_to_px(width_mm) as f64;
                image.height = mm_to_px(height_mm) as f64;
            }
            CropMode::Free => {
                // Physical scale before this crop, from the raster being replaced
                let scale = image.width / image.raster.width as f64;
                image.width = cropped.width as f64 * scale;
                image.height = cropped.height as f64 * scale;
            }
        }

        image.raster = cropped;
        Ok(())
    }
}
