use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn fast_opts() -> SessionOpts {
    SessionOpts {
        tick_interval: Duration::from_millis(5),
        autoplay: true,
    }
}

fn reference() -> Arc<Catalog> {
    Arc::new(Catalog::reference())
}

#[test]
fn starts_at_zero_playing_with_timer() {
    let sess = AtlasSession::new(reference(), SessionOpts::default()).unwrap();
    assert_eq!(sess.frame(), FrameIndex(0));
    assert!(sess.is_playing());
    assert!(sess.has_active_timer());
}

#[test]
fn zero_interval_is_rejected() {
    let opts = SessionOpts {
        tick_interval: Duration::ZERO,
        autoplay: true,
    };
    assert!(AtlasSession::new(reference(), opts).is_err());
}

#[test]
fn ticks_advance_and_wrap() {
    let mut sess = AtlasSession::new(reference(), fast_opts()).unwrap();
    let frames = sess.run_ticks(7, Duration::from_secs(10));
    let frames: Vec<u64> = frames.into_iter().map(|f| f.0).collect();
    assert_eq!(frames, vec![1, 2, 3, 4, 5, 0, 1]);
}

#[test]
fn pause_releases_timer_and_stops_ticks() {
    let mut sess = AtlasSession::new(reference(), fast_opts()).unwrap();
    assert!(sess.pump(Duration::from_secs(5)).is_some());

    assert!(!sess.toggle_play().unwrap());
    assert!(!sess.has_active_timer());
    let frame = sess.frame();

    // Queued messages from the released ticker must not advance the clock.
    assert_eq!(sess.pump(Duration::from_millis(50)), None);
    assert_eq!(sess.frame(), frame);

    assert!(sess.toggle_play().unwrap());
    assert!(sess.has_active_timer());
    assert_eq!(
        sess.pump(Duration::from_secs(5)),
        Some(frame.next_wrapping(FrameIndex(5)))
    );
}

#[test]
fn paused_session_never_ticks() {
    let opts = SessionOpts {
        tick_interval: Duration::from_millis(1),
        autoplay: false,
    };
    let mut sess = AtlasSession::new(reference(), opts).unwrap();
    assert!(!sess.is_playing());
    assert!(!sess.has_active_timer());
    assert!(sess.run_ticks(3, Duration::from_millis(30)).is_empty());
    assert_eq!(sess.frame(), FrameIndex(0));
}

#[test]
fn set_frame_out_of_range_leaves_state_and_skips_observers() {
    let mut sess = AtlasSession::new(
        reference(),
        SessionOpts {
            autoplay: false,
            ..SessionOpts::default()
        },
    )
    .unwrap();
    sess.set_frame(FrameIndex(2)).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sess.subscribe(move |u: &FrameUpdate<'_>| sink.borrow_mut().push(u.cause));

    let before = sess.state();
    let err = sess.set_frame(FrameIndex(6)).unwrap_err();
    assert!(err.is_invalid_frame());
    assert_eq!(sess.state(), before);
    assert_eq!(*seen.borrow(), vec![FrameChange::Initial]);
}

#[test]
fn observers_see_metrics_for_each_change() {
    let mut sess = AtlasSession::new(
        reference(),
        SessionOpts {
            autoplay: false,
            ..SessionOpts::default()
        },
    )
    .unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sess.subscribe(move |u: &FrameUpdate<'_>| {
        sink.borrow_mut().push((
            u.cause,
            u.state.frame.0,
            u.eval.visible_count(),
            u.eval.coherence(),
        ))
    });
    sess.set_frame(FrameIndex(2)).unwrap();
    sess.toggle_play().unwrap();
    sess.shutdown();

    assert_eq!(
        *seen.borrow(),
        vec![
            (FrameChange::Initial, 0, 1, 1.0 / 3.0),
            (FrameChange::Seek, 2, 3, 1.0),
            (FrameChange::PlayToggled, 2, 3, 1.0),
        ]
    );
}

#[test]
fn shutdown_stops_timer() {
    let mut sess = AtlasSession::new(reference(), fast_opts()).unwrap();
    sess.shutdown();
    assert!(!sess.has_active_timer());
    assert_eq!(sess.pump(Duration::from_millis(30)), None);
}
