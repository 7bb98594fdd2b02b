use crate::{
    catalog::model::Catalog,
    foundation::core::FrameIndex,
    foundation::error::AtlasResult,
};

/// Snapshot of the clock: current frame and play/pause flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameState {
    pub frame: FrameIndex,
    pub playing: bool,
}

/// Looping frame counter over `[0, max_frame]` with a play/pause flag.
///
/// Starts at frame 0, playing. The clock itself is synchronous; the recurring
/// timer that drives [`FrameClock::tick`] lives in [`crate::Ticker`] and is
/// owned by [`crate::AtlasSession`].
#[derive(Clone, Debug)]
pub struct FrameClock {
    frame: FrameIndex,
    max_frame: FrameIndex,
    playing: bool,
}

impl FrameClock {
    pub fn new(max_frame: FrameIndex) -> Self {
        Self {
            frame: FrameIndex(0),
            max_frame,
            playing: true,
        }
    }

    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.max_frame())
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn max_frame(&self) -> FrameIndex {
        self.max_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> FrameState {
        FrameState {
            frame: self.frame,
            playing: self.playing,
        }
    }

    /// Advance one frame, wrapping to 0 after `max_frame`.
    ///
    /// Returns the new frame, or `None` without touching state while paused.
    pub fn tick(&mut self) -> Option<FrameIndex> {
        if !self.playing {
            return None;
        }
        self.frame = self.frame.next_wrapping(self.max_frame);
        Some(self.frame)
    }

    /// Jump to `frame`. Out-of-range requests are rejected and leave the clock unchanged.
    pub fn set_frame(&mut self, frame: FrameIndex) -> AtlasResult<()> {
        self.frame = frame.checked_within(self.max_frame)?;
        Ok(())
    }

    /// Flip play/pause and return the new flag. The frame is untouched.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/state.rs"]
mod tests;
