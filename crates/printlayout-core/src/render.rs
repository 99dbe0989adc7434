//! Output surface rendering.
//!
//! Rendering is a pure function of the session state: an opaque white
//! surface at the paper's pixel dimensions with every placed image
//! composited in z-order. Each raster is resampled to its display size at
//! draw time (never stored resampled), so a crop kept at native resolution
//! prints at full quality.

use crate::decode::{resize, FilterType, Raster};
use crate::session::LayoutSession;

impl LayoutSession {
    /// Render the layout to a surface raster.
    ///
    /// Idempotent: repeated calls with unchanged state produce
    /// bit-identical output. Images may extend past any surface edge; the
    /// overhang is clipped.
    pub fn render(&self) -> Raster {
        let (width, height) = self.surface_dimensions();
        let mut surface = Raster::filled(width, height, [255, 255, 255]);

        for image in self.images() {
            let target_w = image.width.round().max(1.0) as u32;
            let target_h = image.height.round().max(1.0) as u32;

            // Display size is kept positive by the session invariants, so
            // resampling only fails on a corrupt raster; skip that slot
            let Ok(scaled) = resize(image.raster(), target_w, target_h, FilterType::Bilinear)
            else {
                continue;
            };

            blit(
                &mut surface,
                &scaled,
                image.x.round() as i64,
                image.y.round() as i64,
            );
        }

        surface
    }
}

/// Copy `src` onto `dst` at (x, y), clipping to the destination bounds.
fn blit(dst: &mut Raster, src: &Raster, x: i64, y: i64) {
    let dst_w = dst.width as i64;
    let dst_h = dst.height as i64;

    // Visible extent of the source on the destination
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + src.width as i64).min(dst_w);
    let y1 = (y + src.height as i64).min(dst_h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let row_bytes = ((x1 - x0) * 3) as usize;
    for dy in y0..y1 {
        let sy = (dy - y) as u32;
        let sx = (x0 - x) as u32;
        let src_start = ((sy as i64 * src.width as i64 + sx as i64) * 3) as usize;
        let dst_start = ((dy * dst_w + x0) * 3) as usize;
        dst.pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&src.pixels[src_start..src_start + row_bytes]);
    }
}
