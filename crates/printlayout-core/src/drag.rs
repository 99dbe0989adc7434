//! Drag positioning with grid snapping.
//!
//! The interaction is a two-state machine (idle / dragging) driven by
//! pointer events. Mouse and touch input feed the same handlers: the
//! browser glue extracts client coordinates (the primary touch point when
//! touching) and maps them into surface pixel space with
//! [`map_to_surface`], so the transition logic stays independent of the
//! event binding.
//!
//! Positions snap to a 1mm grid per axis while dragging. There is no
//! bounds clamping - an image may be dragged partly or fully off the
//! printable surface.

use crate::session::{ImageId, LayoutSession};
use crate::units::{mm_to_px, snap_to_grid, SNAP_GRID_MM};

/// Active drag state. At most one exists per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// The image being dragged.
    pub target: ImageId,
    /// Pointer offset from the image's top-left corner, in surface pixels.
    /// Subtracted on every move so the image does not jump to the cursor.
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Rendered bounds of the surface element in CSS pixels.
///
/// The canvas element is usually CSS-scaled, so its rendered size differs
/// from its intrinsic pixel size; the per-axis ratio maps client
/// coordinates into surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map client coordinates to surface pixel coordinates.
///
/// `surface` is the intrinsic pixel size of the output surface; `rect` is
/// where and how large the element is rendered on the page.
pub fn map_to_surface(
    surface: (u32, u32),
    rect: ViewRect,
    client_x: f64,
    client_y: f64,
) -> (f64, f64) {
    let scale_x = surface.0 as f64 / rect.width;
    let scale_y = surface.1 as f64 / rect.height;
    ((client_x - rect.left) * scale_x, (client_y - rect.top) * scale_y)
}

impl LayoutSession {
    /// Topmost image whose bounding box contains the surface point.
    ///
    /// Images are tested in reverse z-order, so where boxes overlap the
    /// most recently added image wins.
    pub fn hit_test(&self, sx: f64, sy: f64) -> Option<ImageId> {
        self.images()
            .iter()
            .rev()
            .find(|img| img.contains(sx, sy))
            .map(|img| img.id())
    }

    /// The image currently being dragged, if any.
    pub fn drag_target(&self) -> Option<ImageId> {
        self.drag.as_ref().map(|d| d.target)
    }

    /// Pointer-down at a surface position: start dragging the topmost image
    /// under the pointer, or stay idle if nothing is hit.
    pub fn pointer_down(&mut self, sx: f64, sy: f64) -> Option<ImageId> {
        let id = self.hit_test(sx, sy)?;
        let image = self.image(id)?;
        self.drag = Some(DragSession {
            target: id,
            offset_x: sx - image.x,
            offset_y: sy - image.y,
        });
        Some(id)
    }

    /// Pointer-move at a surface position: reposition the drag target to
    /// the grid-snapped candidate. Each axis snaps independently to the
    /// nearest multiple of 1mm in pixels.
    ///
    /// Returns true if an image was repositioned (the caller redraws).
    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        let grid = mm_to_px(SNAP_GRID_MM);
        let x = snap_to_grid(sx - drag.offset_x, grid);
        let y = snap_to_grid(sy - drag.offset_y, grid);

        match self.image_mut(drag.target) {
            Some(image) => {
                image.x = x;
                image.y = y;
                true
            }
            None => false,
        }
    }

    /// Pointer-up or pointer-leave: end the drag unconditionally. The
    /// position is already live, so there is nothing to commit or roll
    /// back.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
