use std::sync::mpsc::{self, RecvTimeoutError, TrySendError};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{AtlasError, AtlasResult};

/// Interval between ticks in the reference behavior.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1500);

/// Message delivered by a [`Ticker`] each interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickMsg {
    /// Generation of the ticker that produced this message.
    pub generation: u64,
}

/// Scoped recurring timer.
///
/// A background thread offers a [`TickMsg`] every `interval` until the handle
/// is cancelled or dropped. The channel is bounded: if the previous tick has
/// not been taken yet, the new one is dropped, so a receiver that falls
/// behind sees at most one pending tick and never a replayed backlog. Cancellation disconnects the stop channel, which
/// wakes the thread immediately, and then joins it, so once `cancel`/`drop`
/// returns the thread has exited and will send nothing further. Messages it
/// already queued carry the old generation and must be discarded by the
/// receiver.
pub struct Ticker {
    generation: u64,
    interval: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the timer thread.
    pub fn start(
        interval: Duration,
        generation: u64,
        tx: mpsc::SyncSender<TickMsg>,
    ) -> AtlasResult<Self> {
        if interval.is_zero() {
            return Err(AtlasError::validation("tick interval must be > 0"));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name(format!("glyph-atlas-ticker-{generation}"))
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => match tx.try_send(TickMsg { generation }) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                tracing::trace!(generation, "tick pending; dropping");
                            }
                            Err(TrySendError::Disconnected(_)) => break,
                        },
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .context("spawn ticker thread")?;

        tracing::debug!(generation, interval_ms = interval.as_millis() as u64, "ticker started");
        Ok(Self {
            generation,
            interval,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the timer and wait for its thread to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel and wakes the thread.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!(generation = self.generation, "ticker thread panicked");
            }
            tracing::debug!(generation = self.generation, "ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/ticker.rs"]
mod tests;
