use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;

/// Playback volume used for every frame tone.
pub const TONE_VOLUME: f32 = 0.4;

/// Per-frame audio cue: the tone resource keyed by frame index.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ToneCue {
    pub frame: FrameIndex,
    /// Relative resource name, `tone-<frame>.mp3`.
    pub resource: String,
    pub volume: f32,
}

impl ToneCue {
    pub fn for_frame(frame: FrameIndex) -> Self {
        Self {
            frame,
            resource: format!("tone-{}.mp3", frame.0),
            volume: TONE_VOLUME,
        }
    }
}

/// External audio playback collaborator.
///
/// Errors returned here are reported to the caller only for logging; the
/// presentation layer never lets them reach the clock or the engine.
pub trait AudioCueSink {
    fn play(&mut self, cue: &ToneCue) -> anyhow::Result<()>;
}

impl<S: AudioCueSink + ?Sized> AudioCueSink for Box<S> {
    fn play(&mut self, cue: &ToneCue) -> anyhow::Result<()> {
        (**self).play(cue)
    }
}

/// Sink that accepts and drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl AudioCueSink for SilentSink {
    fn play(&mut self, _cue: &ToneCue) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Sink that resolves cues against a directory of tone files.
///
/// Playback itself is delegated to the host; this sink only resolves and
/// checks the resource, failing when the tone file is missing.
#[derive(Clone, Debug)]
pub struct ToneDirSink {
    root: PathBuf,
    played: Vec<PathBuf>,
}

impl ToneDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            played: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved paths of every cue accepted so far.
    pub fn played(&self) -> &[PathBuf] {
        &self.played
    }
}

impl AudioCueSink for ToneDirSink {
    fn play(&mut self, cue: &ToneCue) -> anyhow::Result<()> {
        let path = self.root.join(&cue.resource);
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("resolve tone '{}'", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("tone '{}' is not a file", path.display());
        }
        tracing::info!(frame = cue.frame.0, volume = cue.volume, path = %path.display(), "tone");
        self.played.push(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
