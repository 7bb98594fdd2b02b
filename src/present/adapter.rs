use crate::{
    animation::ease::Ease,
    audio::cue::{AudioCueSink, ToneCue},
    eval::metrics::FrameMetrics,
    foundation::core::{Canvas, FrameIndex, Point, Vec2},
    foundation::error::AtlasResult,
    present::params::PresentationParams,
    session::atlas_session::{FrameChange, FrameObserver, FrameUpdate},
};

/// Overlay tint (green-500).
pub const OVERLAY_RGB: [u8; 3] = [34, 197, 94];
/// Fraction of the gradient radius at which the overlay reaches full transparency.
pub const OVERLAY_FALLOFF: f64 = 0.8;
/// Seconds for the overlay to ease from the previous alpha to the new one.
pub const OVERLAY_TRANSITION_SECS: f64 = 1.0;
/// Peak displacement in pixels per unit of entropy.
pub const DISTORTION_PX_PER_ENTROPY: f64 = 10.0;
/// Period of the displacement loop.
pub const DISTORTION_PERIOD_SECS: f64 = 1.8;
/// Stagger between consecutive glyph fade-ins.
pub const GLYPH_STAGGER_SECS: f64 = 0.1;
/// Duration of a single glyph fade-in.
pub const GLYPH_FADE_SECS: f64 = 0.3;

/// Radial coherence overlay centered on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Overlay {
    pub center: Point,
    /// Distance from center to the farthest canvas corner.
    pub radius: f64,
    pub rgb: [u8; 3],
    /// Alpha before the current transition started.
    pub from_alpha: f64,
    /// Target center alpha, equal to the frame's coherence.
    pub alpha: f64,
}

impl Overlay {
    /// Center alpha `t_secs` after the frame change.
    pub fn alpha_at(&self, t_secs: f64) -> f64 {
        Ease::InOutQuad.tween(self.from_alpha, self.alpha, t_secs, OVERLAY_TRANSITION_SECS)
    }

    /// Alpha at `p` for a given center alpha: linear falloff to 0 at [`OVERLAY_FALLOFF`] of the radius.
    pub fn alpha_at_point(&self, center_alpha: f64, p: Point) -> f64 {
        let reach = self.radius * OVERLAY_FALLOFF;
        if reach <= 0.0 {
            return 0.0;
        }
        let d = (p - self.center).hypot();
        (center_alpha * (1.0 - d / reach)).clamp(0.0, 1.0)
    }
}

/// Entropy-driven displacement loop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Distortion {
    /// Peak displacement in pixels.
    pub amplitude_px: f64,
    pub period_secs: f64,
}

impl Distortion {
    /// Offset at `t_secs`: keyframes x `[0, A, 0]`, y `[0, -A, 0]` per period.
    pub fn offset_at(&self, t_secs: f64) -> Vec2 {
        let k = Ease::InOutQuad.pulse(t_secs, self.period_secs) * self.amplitude_px;
        Vec2::new(k, -k)
    }
}

/// One visible glyph laid out on the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlyphPlacement {
    pub id: String,
    /// `"<marker> <id>"`; the marker is empty for role-less glyphs.
    pub label: String,
    /// Single-character marker for text output (`'·'` when the role is absent).
    pub ascii_marker: char,
    /// Catalog position in percent of the canvas.
    pub position: Point,
    /// Label center in canvas pixels.
    pub anchor: Point,
    pub fade_in_delay_secs: f64,
}

impl GlyphPlacement {
    /// Opacity `t_secs` after the frame change.
    pub fn opacity_at(&self, t_secs: f64) -> f64 {
        Ease::OutCubic.apply((t_secs - self.fade_in_delay_secs) / GLYPH_FADE_SECS)
    }
}

/// Everything a view needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PresentationFrame {
    pub frame: FrameIndex,
    pub playing: bool,
    pub metrics: FrameMetrics,
    pub canvas: Canvas,
    pub zoom: f64,
    pub overlay: Option<Overlay>,
    pub distortion: Option<Distortion>,
    pub glyphs: Vec<GlyphPlacement>,
}

impl PresentationFrame {
    /// Label for the play/pause control.
    pub fn control_label(&self) -> &'static str {
        if self.playing { "Pause" } else { "Play" }
    }
}

type View = Box<dyn FnMut(&PresentationFrame)>;

/// Turns session updates into [`PresentationFrame`]s and per-frame tone cues.
///
/// Audio failures are logged and dropped here; they never propagate back into
/// the session.
pub struct PresentationAdapter {
    params: PresentationParams,
    canvas: Canvas,
    sink: Box<dyn AudioCueSink>,
    views: Vec<View>,

    last: Option<PresentationFrame>,
    last_cued: Option<FrameIndex>,
    audio_failures: u64,
}

impl PresentationAdapter {
    pub fn new(
        params: PresentationParams,
        canvas: Canvas,
        sink: impl AudioCueSink + 'static,
    ) -> AtlasResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            canvas,
            sink: Box::new(sink),
            views: Vec::new(),
            last: None,
            last_cued: None,
            audio_failures: 0,
        })
    }

    /// Register a view called with every new presentation frame.
    pub fn with_view(mut self, view: impl FnMut(&PresentationFrame) + 'static) -> Self {
        self.views.push(Box::new(view));
        self
    }

    pub fn params(&self) -> &PresentationParams {
        &self.params
    }

    pub fn last(&self) -> Option<&PresentationFrame> {
        self.last.as_ref()
    }

    /// Number of cues the sink rejected.
    pub fn audio_failures(&self) -> u64 {
        self.audio_failures
    }

    pub fn set_zoom(&mut self, zoom: f64) -> AtlasResult<()> {
        self.params.set_zoom(zoom)?;
        self.refresh();
        Ok(())
    }

    pub fn toggle_overlay(&mut self) -> bool {
        self.params.show_overlay = !self.params.show_overlay;
        self.refresh();
        self.params.show_overlay
    }

    pub fn toggle_distortion(&mut self) -> bool {
        self.params.show_distortion = !self.params.show_distortion;
        self.refresh();
        self.params.show_distortion
    }

    /// Flip sound. Turning it on cues the current frame.
    pub fn toggle_sound(&mut self) -> bool {
        self.params.sound_on = !self.params.sound_on;
        if self.params.sound_on {
            if let Some(frame) = self.last.as_ref().map(|p| p.frame) {
                self.cue(frame);
            }
        } else {
            self.last_cued = None;
        }
        self.params.sound_on
    }

    /// Build the presentation for `update`, cueing audio if the frame changed.
    pub fn present(&mut self, update: &FrameUpdate<'_>) -> PresentationFrame {
        let frame = update.state.frame;
        let from_alpha = self
            .last
            .as_ref()
            .map_or(0.0, |p| p.metrics.coherence);
        let glyphs = update
            .eval
            .visible
            .iter()
            .enumerate()
            .map(|(i, g)| GlyphPlacement {
                id: g.id.clone(),
                label: g.label(),
                ascii_marker: g.role.map_or('·', |r| r.ascii_marker()),
                position: g.position,
                anchor: self.canvas.percent_to_px(g.position, self.params.zoom),
                fade_in_delay_secs: i as f64 * GLYPH_STAGGER_SECS,
            })
            .collect();

        let out = self.build(
            frame,
            update.state.playing,
            update.eval.metrics,
            from_alpha,
            glyphs,
        );

        let frame_changed = update.cause == FrameChange::Initial || self.last_cued != Some(frame);
        if self.params.sound_on && frame_changed {
            self.cue(frame);
        }
        self.last = Some(out.clone());
        out
    }

    fn build(
        &self,
        frame: FrameIndex,
        playing: bool,
        metrics: FrameMetrics,
        from_alpha: f64,
        glyphs: Vec<GlyphPlacement>,
    ) -> PresentationFrame {
        let center = self.canvas.center();
        let overlay = self.params.show_overlay.then(|| Overlay {
            center,
            radius: center.to_vec2().hypot(),
            rgb: OVERLAY_RGB,
            from_alpha,
            alpha: metrics.coherence,
        });
        let distortion = self.params.show_distortion.then(|| Distortion {
            amplitude_px: metrics.entropy * DISTORTION_PX_PER_ENTROPY,
            period_secs: DISTORTION_PERIOD_SECS,
        });
        PresentationFrame {
            frame,
            playing,
            metrics,
            canvas: self.canvas,
            zoom: self.params.zoom,
            overlay,
            distortion,
            glyphs,
        }
    }

    /// Rebuild the last frame after a presentation parameter changed.
    fn refresh(&mut self) {
        let Some(prev) = self.last.take() else {
            return;
        };
        let glyphs = prev
            .glyphs
            .into_iter()
            .map(|mut g| {
                g.anchor = self.canvas.percent_to_px(g.position, self.params.zoom);
                g
            })
            .collect();
        let from_alpha = prev.overlay.map_or(prev.metrics.coherence, |o| o.alpha);
        let out = self.build(prev.frame, prev.playing, prev.metrics, from_alpha, glyphs);
        for view in &mut self.views {
            view(&out);
        }
        self.last = Some(out);
    }

    fn cue(&mut self, frame: FrameIndex) {
        let cue = ToneCue::for_frame(frame);
        self.last_cued = Some(frame);
        if let Err(e) = self.sink.play(&cue) {
            self.audio_failures += 1;
            tracing::debug!(frame = frame.0, error = %e, "tone cue failed; ignoring");
        }
    }
}

impl FrameObserver for PresentationAdapter {
    fn on_frame(&mut self, update: &FrameUpdate<'_>) {
        let out = self.present(update);
        for view in &mut self.views {
            view(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/adapter.rs"]
mod tests;
