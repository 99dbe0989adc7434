//! Paper sizes and output surface dimensions.
//!
//! A paper size is an unordered pair of physical dimensions; orientation
//! decides which one becomes the width. The output surface is the paper
//! converted to pixels at the fixed print resolution.

use serde::{Deserialize, Serialize};

use crate::units::mm_to_px;

/// Supported print paper sizes.
///
/// Each size carries an unordered pair of physical dimensions in
/// millimeters. New sizes are added by extending this enum and
/// [`PaperSize::dimensions_mm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaperSize {
    /// L size photo print (89mm x 127mm).
    #[default]
    L,
    /// 2L size photo print (127mm x 178mm).
    #[serde(rename = "2L")]
    TwoL,
}

impl PaperSize {
    /// The physical dimension pair in millimeters, unordered.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::L => (89.0, 127.0),
            PaperSize::TwoL => (127.0, 178.0),
        }
    }

    /// Parse a paper size from its display label ("L" or "2L").
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "L" => Some(PaperSize::L),
            "2L" => Some(PaperSize::TwoL),
            _ => None,
        }
    }

    /// Display label for the size selector.
    pub fn label(self) -> &'static str {
        match self {
            PaperSize::L => "L",
            PaperSize::TwoL => "2L",
        }
    }
}

/// Orientation of the paper on the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    /// Parse an orientation from its form value.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "landscape" => Some(Orientation::Landscape),
            "portrait" => Some(Orientation::Portrait),
            _ => None,
        }
    }
}

/// Paper selection for the output surface.
///
/// The surface pixel dimensions are derived deterministically from the
/// paper size and orientation; nothing else contributes. Changing either
/// never repositions or rescales already placed images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub paper: PaperSize,
    pub orientation: Orientation,
}

impl CanvasConfig {
    pub fn new(paper: PaperSize, orientation: Orientation) -> Self {
        Self { paper, orientation }
    }

    /// Output surface dimensions in pixels.
    ///
    /// The longer physical edge goes to the width in landscape and to the
    /// height in portrait.
    pub fn surface_dimensions(&self) -> (u32, u32) {
        let (a, b) = self.paper.dimensions_mm();
        let (long, short) = if a >= b { (a, b) } else { (b, a) };

        let (w_mm, h_mm) = match self.orientation {
            Orientation::Landscape => (long, short),
            Orientation::Portrait => (short, long),
        };

        (mm_to_px(w_mm) as u32, mm_to_px(h_mm) as u32)
    }
}
