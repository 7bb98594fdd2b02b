//! Glyph Atlas: a looping, frame-driven reveal of a fixed glyph catalog.
//!
//! # Pipeline overview
//!
//! 1. **Catalog**: an immutable, ordered [`Catalog`] of [`GlyphRecord`]s plus the last frame of
//!    the sequence. [`Catalog::reference`] is the built-in five-glyph atlas.
//! 2. **Evaluate**: `Catalog + FrameIndex -> EvaluatedFrame` (which glyphs are visible, and the
//!    derived `entropy`/`coherence` scalars). Pure and deterministic; see [`Evaluator`].
//! 3. **Clock**: a [`FrameClock`] loops over `[0, max_frame]`. An [`AtlasSession`] owns it and a
//!    cancellable [`Ticker`], applies ticks on the caller's thread, and notifies
//!    [`FrameObserver`]s.
//! 4. **Present**: a [`PresentationAdapter`] observer maps metrics to an overlay, a displacement
//!    loop, glyph placements and per-frame [`ToneCue`]s.
//! 5. **Render**: [`render_rgba`]/[`write_png`] rasterize a [`PresentationFrame`];
//!    [`render_text`] draws it for a terminal.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit catalog**: the catalog is always passed in; nothing reads it from ambient state.
//! - **Metrics never cached**: every call recomputes from the catalog and frame.
//! - **Audio never fails the core**: sink errors stop at the presentation adapter.
#![forbid(unsafe_code)]

mod animation;
mod audio;
mod catalog;
mod clock;
mod config;
mod eval;
mod foundation;
mod present;
mod render;
mod session;

pub use animation::ease::Ease;
pub use audio::cue::{AudioCueSink, SilentSink, TONE_VOLUME, ToneCue, ToneDirSink};
pub use catalog::model::{Catalog, GlyphRecord, GlyphRole};
pub use catalog::reference::REFERENCE_MAX_FRAME;
pub use clock::state::{FrameClock, FrameState};
pub use clock::ticker::{DEFAULT_TICK_INTERVAL, TickMsg, Ticker};
pub use config::AtlasConfig;
pub use eval::evaluator::{EvaluatedFrame, Evaluator};
pub use eval::metrics::{COHERENCE_PEAK_COUNT, FrameMetrics, coherence, entropy};
pub use foundation::core::{Canvas, FrameIndex, Point, Vec2};
pub use foundation::error::{AtlasError, AtlasResult};
pub use present::adapter::{
    DISTORTION_PERIOD_SECS, Distortion, GlyphPlacement, OVERLAY_RGB, Overlay,
    PresentationAdapter, PresentationFrame,
};
pub use present::params::{PresentationParams, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
pub use render::raster::{render_rgba, write_png};
pub use render::text::{TextGrid, render_text};
pub use session::atlas_session::{
    AtlasSession, FrameChange, FrameObserver, FrameUpdate, SessionOpts,
};
