//! Thread-safe session wrapper and background polling
//!
//! All session state stays behind one lock, so a UI thread delivering player
//! events and a poller thread delivering ticks never interleave inside a
//! transition. A poller is bound to the polling run that was active when it
//! started and exits as soon as that run ends: on `Ended`, on a new media
//! source, on a fresh `Play`, or on cancellation. Loading a track while a run
//! is in progress keeps the run, so the live poller picks up the new tracks
//! on its next tick.

use super::session::{LoadReport, PlaybackSession};
use crate::core::{Result, Track};
use crate::events::{FrameSink, MediaClock, PlayerEvent};
use crate::render::{PlainText, RenderFrame, TextDecorator};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Cloneable handle to a session behind a single lock
pub struct SharedSession<D = PlainText> {
    inner: Arc<Mutex<PlaybackSession<D>>>,
}

impl<D> Clone for SharedSession<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> std::fmt::Debug for SharedSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SharedSession").field("session", &*inner).finish()
    }
}

impl<D: TextDecorator> SharedSession<D> {
    /// Wrap a session
    pub fn new(session: PlaybackSession<D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session for direct access
    pub fn lock(&self) -> MutexGuard<'_, PlaybackSession<D>> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackSession<D>) -> R) -> R {
        let mut session = self.inner.lock();
        f(&mut *session)
    }

    /// Dispatch a player event under the lock
    pub fn handle(&self, event: PlayerEvent) -> Option<RenderFrame> {
        self.inner.lock().handle(event)
    }

    /// Load a track and resolve the frame for `time` in one transition
    ///
    /// # Errors
    ///
    /// Same as [`PlaybackSession::load_track`].
    pub fn load_track_at(
        &self,
        track: Track,
        raw: &str,
        time: f64,
    ) -> Result<(LoadReport, RenderFrame)> {
        self.inner.lock().load_track_at(track, raw, time)
    }
}

impl<D> SharedSession<D>
where
    D: TextDecorator + Send + 'static,
{
    /// Handle `Play` and, if polling started, spawn a poller for this run
    pub fn play<C, S>(&self, clock: C, sink: S) -> Option<PollerHandle>
    where
        C: MediaClock + Send + 'static,
        S: FrameSink + Send + 'static,
    {
        let polling = self.inner.lock().on_play();
        polling.then(|| self.spawn_poller(clock, sink))
    }

    /// Spawn a poller bound to the current polling run
    ///
    /// The poller sleeps `poll_interval` between ticks and hands each frame
    /// to `sink` outside the lock. If polling is not running the poller exits
    /// on its first tick.
    pub fn spawn_poller<C, S>(&self, clock: C, mut sink: S) -> PollerHandle
    where
        C: MediaClock + Send + 'static,
        S: FrameSink + Send + 'static,
    {
        let (generation, interval) = {
            let session = self.inner.lock();
            (session.poll_generation(), session.config().poll_interval)
        };
        let cancelled = Arc::new(AtomicBool::new(false));
        let token = Arc::clone(&cancelled);
        let shared = self.clone();

        let thread = thread::spawn(move || {
            debug!(generation, "poller started");
            loop {
                thread::sleep(interval);
                if token.load(Ordering::Acquire) {
                    break;
                }

                let frame = {
                    let mut session = shared.inner.lock();
                    if !session.is_polling() || session.poll_generation() != generation {
                        break;
                    }
                    session.on_tick(&clock)
                };
                if let Some(frame) = frame {
                    sink.present(frame);
                }
            }
            debug!(generation, "poller stopped");
        });

        PollerHandle {
            cancelled,
            thread: Some(thread),
        }
    }
}

/// Handle to a background poller
///
/// Dropping the handle cancels the poller without waiting for it.
#[derive(Debug)]
pub struct PollerHandle {
    cancelled: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Ask the poller to stop after its current sleep
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether the poller thread has exited
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel and wait for the poller thread to exit
    pub fn join(mut self) {
        self.cancel();
        if let Some(thread) = self.thread.take() {
            // A panicking sink only ends its own poller.
            let _ = thread.join();
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
