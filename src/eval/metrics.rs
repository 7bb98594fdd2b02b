use crate::foundation::core::FrameIndex;

/// Visible-glyph count at which coherence peaks.
pub const COHERENCE_PEAK_COUNT: usize = 3;

/// `1 - 1/(1 + count)`: 0 for an empty frame, approaching 1 as glyphs accumulate.
pub fn entropy(visible_count: usize) -> f64 {
    1.0 - 1.0 / (1.0 + visible_count as f64)
}

/// `1/(1 + |count - 3|)`: exactly 1 at three visible glyphs, symmetric falloff.
pub fn coherence(visible_count: usize) -> f64 {
    1.0 / (1.0 + visible_count.abs_diff(COHERENCE_PEAK_COUNT) as f64)
}

/// Scalar summary of one frame, derived purely from its visible-glyph count.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameMetrics {
    pub frame: FrameIndex,
    pub visible_count: usize,
    pub entropy: f64,
    pub coherence: f64,
}

impl FrameMetrics {
    pub fn from_count(frame: FrameIndex, visible_count: usize) -> Self {
        Self {
            frame,
            visible_count,
            entropy: entropy(visible_count),
            coherence: coherence(visible_count),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/metrics.rs"]
mod tests;
