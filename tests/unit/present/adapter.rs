use super::*;
use crate::{
    catalog::model::{Catalog, GlyphRecord},
    clock::state::FrameState,
    eval::evaluator::Evaluator,
    present::params::{ZOOM_MAX, ZOOM_MIN},
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Recorder {
    cues: Rc<RefCell<Vec<u64>>>,
    fail: bool,
}

impl AudioCueSink for Recorder {
    fn play(&mut self, cue: &ToneCue) -> anyhow::Result<()> {
        self.cues.borrow_mut().push(cue.frame.0);
        if self.fail {
            anyhow::bail!("playback rejected");
        }
        Ok(())
    }
}

fn canvas() -> Canvas {
    Canvas {
        width: 200,
        height: 100,
    }
}

fn update<'a>(
    catalog: &'a Catalog,
    cause: FrameChange,
    frame: u64,
    playing: bool,
) -> FrameUpdate<'a> {
    FrameUpdate {
        cause,
        state: FrameState {
            frame: FrameIndex(frame),
            playing,
        },
        eval: Evaluator::evaluate(catalog, FrameIndex(frame)).unwrap(),
    }
}

#[test]
fn overlay_and_distortion_follow_metrics() {
    let cat = Catalog::reference();
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), Recorder::default())
            .unwrap();

    let p = adapter.present(&update(&cat, FrameChange::Initial, 2, true));
    let overlay = p.overlay.unwrap();
    assert_eq!(overlay.alpha, 1.0);
    assert_eq!(overlay.from_alpha, 0.0);
    assert_eq!(overlay.rgb, OVERLAY_RGB);
    assert_eq!(overlay.center, Point::new(100.0, 50.0));
    assert_eq!(overlay.alpha_at(OVERLAY_TRANSITION_SECS), 1.0);

    let d = p.distortion.unwrap();
    assert_eq!(d.amplitude_px, 7.5);
    assert_eq!(d.offset_at(0.0), Vec2::ZERO);
    let peak = d.offset_at(DISTORTION_PERIOD_SECS / 2.0);
    assert!((peak.x - 7.5).abs() < 1e-9 && (peak.y + 7.5).abs() < 1e-9);
    assert_eq!(p.control_label(), "Pause");
}

#[test]
fn overlay_transition_starts_from_previous_coherence() {
    let cat = Catalog::reference();
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), Recorder::default())
            .unwrap();
    adapter.present(&update(&cat, FrameChange::Initial, 2, true));
    let p = adapter.present(&update(&cat, FrameChange::Tick, 3, true));
    let overlay = p.overlay.unwrap();
    assert_eq!(overlay.from_alpha, 1.0);
    assert_eq!(overlay.alpha, 0.5);
    assert_eq!(overlay.alpha_at(0.0), 1.0);
}

#[test]
fn overlay_fades_radially() {
    let o = Overlay {
        center: Point::new(0.0, 0.0),
        radius: 10.0,
        rgb: OVERLAY_RGB,
        from_alpha: 0.0,
        alpha: 1.0,
    };
    assert_eq!(o.alpha_at_point(1.0, Point::ZERO), 1.0);
    assert!((o.alpha_at_point(1.0, Point::new(4.0, 0.0)) - 0.5).abs() < 1e-12);
    assert_eq!(o.alpha_at_point(1.0, Point::new(8.0, 0.0)), 0.0);
    assert_eq!(o.alpha_at_point(1.0, Point::new(10.0, 0.0)), 0.0);
}

#[test]
fn toggles_remove_layers() {
    let cat = Catalog::reference();
    let params = PresentationParams {
        show_overlay: false,
        show_distortion: false,
        ..PresentationParams::default()
    };
    let mut adapter = PresentationAdapter::new(params, canvas(), Recorder::default()).unwrap();
    let p = adapter.present(&update(&cat, FrameChange::Initial, 4, false));
    assert!(p.overlay.is_none());
    assert!(p.distortion.is_none());
    assert_eq!(p.control_label(), "Play");

    assert!(adapter.toggle_overlay());
    assert!(adapter.last().unwrap().overlay.is_some());
}

#[test]
fn glyphs_are_placed_with_zoom_and_stagger() {
    let cat = Catalog::reference();
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), Recorder::default())
            .unwrap();
    let p = adapter.present(&update(&cat, FrameChange::Initial, 2, true));
    assert_eq!(p.glyphs.len(), 3);
    assert_eq!(p.glyphs[0].label, "🌱 G1");
    assert!((p.glyphs[0].anchor.x - 142.0).abs() < 1e-9);
    assert!((p.glyphs[0].anchor.y - 88.0).abs() < 1e-9);
    assert_eq!(p.glyphs[2].fade_in_delay_secs, 0.2);
    assert_eq!(p.glyphs[2].opacity_at(0.0), 0.0);
    assert_eq!(p.glyphs[2].opacity_at(0.2 + GLYPH_FADE_SECS), 1.0);

    adapter.set_zoom(2.0).unwrap();
    let zoomed = adapter.last().unwrap();
    assert_eq!(zoomed.zoom, 2.0);
    assert!((zoomed.glyphs[0].anchor.x - 284.0).abs() < 1e-9);
    assert!((zoomed.glyphs[0].anchor.y - 176.0).abs() < 1e-9);
}

#[test]
fn repeated_zoom_changes_do_not_drift_anchors() {
    let cat = Catalog::reference();
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), Recorder::default())
            .unwrap();
    adapter.present(&update(&cat, FrameChange::Initial, 5, true));

    for _ in 0..200 {
        adapter.set_zoom(ZOOM_MIN).unwrap();
        adapter.set_zoom(1.3).unwrap();
        adapter.set_zoom(ZOOM_MAX).unwrap();
    }
    adapter.set_zoom(0.7).unwrap();

    let p = adapter.last().unwrap();
    assert_eq!(p.zoom, 0.7);
    assert!(!p.glyphs.is_empty());
    for placed in &p.glyphs {
        let record = cat.iter().find(|r| r.id == placed.id).unwrap();
        assert_eq!(placed.position, record.position);
        assert_eq!(placed.anchor, canvas().percent_to_px(record.position, 0.7));
    }
}

#[test]
fn role_less_glyph_has_blank_marker() {
    let cat = Catalog::new(
        vec![GlyphRecord::new("X", None, (50.0, 50.0), 0, 0)],
        FrameIndex(1),
    );
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), Recorder::default())
            .unwrap();
    let p = adapter.present(&update(&cat, FrameChange::Initial, 0, true));
    assert_eq!(p.glyphs[0].label, " X");
    assert_eq!(p.glyphs[0].ascii_marker, '·');
}

#[test]
fn cues_only_when_sound_on_and_frame_changes() {
    let cat = Catalog::reference();
    let rec = Recorder::default();
    let cues = Rc::clone(&rec.cues);
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), rec).unwrap();

    adapter.present(&update(&cat, FrameChange::Initial, 0, true));
    adapter.present(&update(&cat, FrameChange::Tick, 1, true));
    assert!(cues.borrow().is_empty());

    assert!(adapter.toggle_sound());
    adapter.present(&update(&cat, FrameChange::Tick, 2, true));
    adapter.present(&update(&cat, FrameChange::PlayToggled, 2, false));
    adapter.present(&update(&cat, FrameChange::Seek, 2, false));
    adapter.present(&update(&cat, FrameChange::Seek, 5, false));
    assert_eq!(*cues.borrow(), vec![1, 2, 5]);
}

#[test]
fn audio_failures_are_swallowed() {
    let cat = Catalog::reference();
    let rec = Recorder {
        fail: true,
        ..Recorder::default()
    };
    let params = PresentationParams {
        sound_on: true,
        ..PresentationParams::default()
    };
    let mut adapter = PresentationAdapter::new(params, canvas(), rec).unwrap();
    let p = adapter.present(&update(&cat, FrameChange::Initial, 3, true));
    assert_eq!(p.frame, FrameIndex(3));
    adapter.present(&update(&cat, FrameChange::Tick, 4, true));
    assert_eq!(adapter.audio_failures(), 2);
}

#[test]
fn observer_impl_feeds_views() {
    let cat = Catalog::reference();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    let mut adapter =
        PresentationAdapter::new(PresentationParams::default(), canvas(), Recorder::default())
            .unwrap()
            .with_view(move |p| sink.borrow_mut().push(p.frame.0));
    adapter.on_frame(&update(&cat, FrameChange::Initial, 0, true));
    adapter.on_frame(&update(&cat, FrameChange::Tick, 1, true));
    assert_eq!(*frames.borrow(), vec![0, 1]);
}
