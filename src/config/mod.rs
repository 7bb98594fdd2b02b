use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::{
    clock::ticker::DEFAULT_TICK_INTERVAL,
    foundation::core::Canvas,
    foundation::error::{AtlasError, AtlasResult},
    present::params::PresentationParams,
};

/// Runtime configuration for sessions and renderers.
///
/// Every field has a default, so an empty JSON object is a valid config. The
/// glyph catalog is deliberately not part of it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Milliseconds between clock ticks while playing.
    pub tick_interval_ms: u64,
    /// Raster output size.
    pub canvas: Canvas,
    /// Initial presentation controls.
    pub presentation: PresentationParams,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            canvas: Canvas::default(),
            presentation: PresentationParams::default(),
        }
    }
}

impl AtlasConfig {
    pub fn from_json_str(s: &str) -> AtlasResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| AtlasError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> AtlasResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> AtlasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AtlasError::serde(e.to_string()))
    }

    pub fn validate(&self) -> AtlasResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(AtlasError::config("tick_interval_ms must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(AtlasError::config("canvas width/height must be > 0"));
        }
        self.presentation
            .validate()
            .map_err(|e| AtlasError::config(e.to_string()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
