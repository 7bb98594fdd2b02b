use std::fmt;

use crate::foundation::error::{AtlasError, AtlasResult};

pub use kurbo::{Point, Vec2};

/// Zero-based index into the looping frame sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Next frame in a sequence of `max_frame + 1` frames, wrapping to 0 after the last.
    pub fn next_wrapping(self, max_frame: FrameIndex) -> FrameIndex {
        if self.0 >= max_frame.0 {
            FrameIndex(0)
        } else {
            FrameIndex(self.0 + 1)
        }
    }

    /// Reject frames past `max_frame` (inclusive bound).
    pub fn checked_within(self, max_frame: FrameIndex) -> AtlasResult<FrameIndex> {
        if self.0 > max_frame.0 {
            return Err(AtlasError::invalid_frame(self.0, max_frame.0));
        }
        Ok(self)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
        }
    }
}

impl Canvas {
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Map a percentage coordinate (0..100 per axis) onto the canvas, scaled
    /// by `zoom` about the top-left origin.
    pub fn percent_to_px(self, pct: Point, zoom: f64) -> Point {
        Point::new(
            pct.x / 100.0 * f64::from(self.width) * zoom,
            pct.y / 100.0 * f64::from(self.height) * zoom,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
