use crate::foundation::error::{AtlasError, AtlasResult};

/// Smallest accepted zoom factor.
pub const ZOOM_MIN: f64 = 0.5;
/// Largest accepted zoom factor.
pub const ZOOM_MAX: f64 = 2.0;
/// Slider granularity for zoom.
pub const ZOOM_STEP: f64 = 0.1;

/// Presentation-only controls. None of these feed into the metrics engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PresentationParams {
    /// Glyph layer scale about the top-left corner.
    pub zoom: f64,
    /// Coherence-driven radial overlay.
    pub show_overlay: bool,
    /// Entropy-driven displacement loop.
    pub show_distortion: bool,
    /// Per-frame tone cues.
    pub sound_on: bool,
}

impl Default for PresentationParams {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            show_overlay: true,
            show_distortion: true,
            sound_on: false,
        }
    }
}

impl PresentationParams {
    pub fn validate(&self) -> AtlasResult<()> {
        if !self.zoom.is_finite() || !(ZOOM_MIN..=ZOOM_MAX).contains(&self.zoom) {
            return Err(AtlasError::validation(format!(
                "zoom must be within [{ZOOM_MIN}, {ZOOM_MAX}], got {}",
                self.zoom
            )));
        }
        Ok(())
    }

    /// Set zoom, snapped to the slider step.
    pub fn set_zoom(&mut self, zoom: f64) -> AtlasResult<()> {
        let steps_per_unit = (1.0 / ZOOM_STEP).round();
        let snapped = (zoom * steps_per_unit).round() / steps_per_unit;
        let next = Self {
            zoom: snapped,
            ..*self
        };
        next.validate()?;
        self.zoom = snapped;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/params.rs"]
mod tests;
