use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::{
    catalog::model::Catalog,
    clock::state::{FrameClock, FrameState},
    clock::ticker::{DEFAULT_TICK_INTERVAL, TickMsg, Ticker},
    eval::evaluator::{EvaluatedFrame, Evaluator},
    foundation::core::FrameIndex,
    foundation::error::{AtlasError, AtlasResult},
};

/// Why observers are being notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FrameChange {
    /// First notification after subscribing.
    Initial,
    /// The timer advanced the clock.
    Tick,
    /// An explicit `set_frame` request.
    Seek,
    /// Play/pause flipped; the frame is unchanged.
    PlayToggled,
}

/// What observers receive after every state change.
#[derive(Clone, Debug)]
pub struct FrameUpdate<'a> {
    pub cause: FrameChange,
    pub state: FrameState,
    pub eval: EvaluatedFrame<'a>,
}

/// Subscriber to session state changes.
pub trait FrameObserver {
    fn on_frame(&mut self, update: &FrameUpdate<'_>);
}

impl<F> FrameObserver for F
where
    F: FnMut(&FrameUpdate<'_>),
{
    fn on_frame(&mut self, update: &FrameUpdate<'_>) {
        self(update)
    }
}

/// Options controlling session playback.
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Interval between ticks while playing.
    pub tick_interval: Duration,
    /// Start in the playing state (acquiring the timer immediately).
    pub autoplay: bool,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            autoplay: true,
        }
    }
}

/// Single execution context owning the frame clock and its timer.
///
/// Every mutation (ticks, seeks, play/pause) is applied on the thread that
/// calls into the session. The [`Ticker`] only posts messages; they take
/// effect when [`AtlasSession::pump`] receives them. The ticker is held only
/// while playing, and each acquisition gets a fresh generation so messages
/// from a released ticker are discarded.
pub struct AtlasSession {
    catalog: Arc<Catalog>,
    clock: FrameClock,
    opts: SessionOpts,

    ticker: Option<Ticker>,
    generation: u64,
    tick_tx: mpsc::SyncSender<TickMsg>,
    tick_rx: mpsc::Receiver<TickMsg>,

    observers: Vec<Box<dyn FrameObserver>>,
}

impl AtlasSession {
    pub fn new(catalog: Arc<Catalog>, opts: SessionOpts) -> AtlasResult<Self> {
        if opts.tick_interval.is_zero() {
            return Err(AtlasError::validation("tick interval must be > 0"));
        }
        let mut clock = FrameClock::for_catalog(&catalog);
        if !opts.autoplay {
            clock.toggle_play();
        }
        // One slot: ticks that arrive while one is pending are dropped by the ticker.
        let (tick_tx, tick_rx) = mpsc::sync_channel(1);
        let mut sess = Self {
            catalog,
            clock,
            opts,
            ticker: None,
            generation: 0,
            tick_tx,
            tick_rx,
            observers: Vec::new(),
        };
        if sess.clock.is_playing() {
            sess.acquire_ticker()?;
        }
        Ok(sess)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> FrameState {
        self.clock.state()
    }

    pub fn frame(&self) -> FrameIndex {
        self.clock.frame()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// `true` while a timer thread is held.
    pub fn has_active_timer(&self) -> bool {
        self.ticker.is_some()
    }

    /// Evaluate the current frame.
    pub fn current(&self) -> EvaluatedFrame<'_> {
        Evaluator::evaluate_unchecked(&self.catalog, self.clock.frame())
    }

    /// Register an observer and immediately notify it with the current frame.
    pub fn subscribe(&mut self, observer: impl FrameObserver + 'static) {
        let mut observer = Box::new(observer);
        let update = self.update(FrameChange::Initial);
        observer.on_frame(&update);
        self.observers.push(observer);
    }

    /// Jump to `frame`. Out-of-range frames are rejected; nothing changes and nobody is notified.
    pub fn set_frame(&mut self, frame: FrameIndex) -> AtlasResult<()> {
        if let Err(e) = self.clock.set_frame(frame) {
            tracing::debug!(frame = frame.0, error = %e, "set_frame rejected");
            return Err(e);
        }
        self.notify(FrameChange::Seek);
        Ok(())
    }

    /// Flip play/pause, acquiring or releasing the timer accordingly.
    ///
    /// On pause, the timer thread is stopped and joined before this returns.
    pub fn toggle_play(&mut self) -> AtlasResult<bool> {
        let playing = self.clock.toggle_play();
        if playing {
            if let Err(e) = self.acquire_ticker() {
                self.clock.toggle_play();
                return Err(e);
            }
        } else {
            self.release_ticker();
        }
        self.notify(FrameChange::PlayToggled);
        Ok(playing)
    }

    /// Wait up to `timeout` for the next live tick and apply it.
    ///
    /// Returns the new frame, or `None` if no live tick arrived in time
    /// (always the case while paused). Stale ticks are dropped.
    pub fn pump(&mut self, timeout: Duration) -> Option<FrameIndex> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let msg = match self.tick_rx.recv_timeout(remaining) {
                Ok(msg) => msg,
                Err(_) => return None,
            };
            if let Some(frame) = self.apply_tick(msg) {
                return Some(frame);
            }
        }
    }

    /// Apply ticks until `count` frame changes have happened or `timeout` elapses.
    ///
    /// Returns the frames reached, in order.
    pub fn run_ticks(&mut self, count: usize, timeout: Duration) -> Vec<FrameIndex> {
        let deadline = Instant::now() + timeout;
        let mut frames = Vec::with_capacity(count);
        while frames.len() < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.pump(remaining) {
                Some(f) => frames.push(f),
                None => break,
            }
        }
        frames
    }

    /// Stop the timer. Also happens on drop.
    pub fn shutdown(&mut self) {
        self.release_ticker();
    }

    fn apply_tick(&mut self, msg: TickMsg) -> Option<FrameIndex> {
        let live = self.ticker.as_ref().map(Ticker::generation);
        if live != Some(msg.generation) {
            tracing::trace!(generation = msg.generation, ?live, "discarding stale tick");
            return None;
        }
        let frame = self.clock.tick()?;
        tracing::debug!(frame = frame.0, "tick");
        self.notify(FrameChange::Tick);
        Some(frame)
    }

    fn acquire_ticker(&mut self) -> AtlasResult<()> {
        self.release_ticker();
        // A stale tick left in the slot would block the new ticker's first one.
        while self.tick_rx.try_recv().is_ok() {}
        self.generation += 1;
        let ticker = Ticker::start(self.opts.tick_interval, self.generation, self.tick_tx.clone())?;
        self.ticker = Some(ticker);
        Ok(())
    }

    fn release_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn update(&self, cause: FrameChange) -> FrameUpdate<'_> {
        FrameUpdate {
            cause,
            state: self.clock.state(),
            eval: self.current(),
        }
    }

    fn notify(&mut self, cause: FrameChange) {
        let mut observers = std::mem::take(&mut self.observers);
        {
            let update = self.update(cause);
            for obs in &mut observers {
                obs.on_frame(&update);
            }
        }
        self.observers = observers;
    }
}

impl Drop for AtlasSession {
    fn drop(&mut self) {
        self.release_ticker();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/atlas_session.rs"]
mod tests;
