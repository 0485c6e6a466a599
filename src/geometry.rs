//! Viewport boxes and artboard-local frames.

use serde::{Deserialize, Serialize};

use crate::number::{self, round_to};

/// Decimal places kept in every frame coordinate
pub const FRAME_PRECISION: i32 = 2;

/// A measured box in viewport coordinates.
///
/// Deserializes from either `left`/`top` or `x`/`y`, including a full
/// `DOMRect` dump that carries both pairs (`left`/`top` win).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RectFields")]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Wire shape of a bounding box; `right`/`bottom` are ignored.
#[derive(Deserialize)]
struct RectFields {
    #[serde(default)]
    left: Option<f64>,
    #[serde(default)]
    top: Option<f64>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
}

impl From<RectFields> for Rect {
    fn from(f: RectFields) -> Self {
        Rect {
            left: f.left.or(f.x).unwrap_or(0.0),
            top: f.top.or(f.y).unwrap_or(0.0),
            width: f.width,
            height: f.height,
        }
    }
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when both dimensions are strictly positive, the only boxes that become layers.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Artboard-local geometry record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "rect", rename_all = "camelCase")]
pub struct Frame {
    pub constrain_proportions: bool,
    #[serde(serialize_with = "number::serialize")]
    pub height: f64,
    #[serde(serialize_with = "number::serialize")]
    pub width: f64,
    #[serde(serialize_with = "number::serialize")]
    pub x: f64,
    #[serde(serialize_with = "number::serialize")]
    pub y: f64,
}

impl Frame {
    /// Frame of `rect` measured from the top-left corner of `origin`.
    ///
    /// Nothing is clamped: boxes hanging off the artboard keep their
    /// negative or overflowing coordinates.
    pub fn relative_to(rect: &Rect, origin: &Rect) -> Self {
        to_frame(
            rect.left - origin.left,
            rect.top - origin.top,
            rect.width,
            rect.height,
        )
    }

    /// Frame spanning `(0, 0, width, height)` in its parent's space.
    pub fn local(width: f64, height: f64) -> Self {
        to_frame(0.0, 0.0, width, height)
    }
}

/// Build a frame from already-relative coordinates, rounding each to
/// [`FRAME_PRECISION`] places.
pub fn to_frame(x: f64, y: f64, width: f64, height: f64) -> Frame {
    Frame {
        constrain_proportions: false,
        height: round_to(height, FRAME_PRECISION),
        width: round_to(width, FRAME_PRECISION),
        x: round_to(x, FRAME_PRECISION),
        y: round_to(y, FRAME_PRECISION),
    }
}
