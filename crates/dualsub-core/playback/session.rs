//! Playback session: the single owner of tracks, alignment and state
//!
//! A `PlaybackSession` replaces the ambient globals a player would otherwise
//! keep (loaded tracks, mode, history) with one explicit object. Every
//! player event is a state transition that may emit a [`RenderFrame`].
//!
//! # Lifecycle
//!
//! - Loading a track replaces it in full, rebuilds alignment and resets the
//!   active index and history. A file with no usable entries is rejected and
//!   nothing changes. A polling run already in progress carries on with the
//!   new tracks; otherwise polling starts if media is loaded.
//! - Loading media clears both tracks and stops polling.
//! - Seeking, switching mode and reaching the end reset the active index and
//!   history.

use crate::align::{align_with, AlignParams};
use crate::core::{
    AlignedPair, DualSubError, Entry, PairHistory, Result, SessionConfig, Track,
};
use crate::events::{MediaClock, PlayerEvent};
use crate::formats::{parse_bytes, parse_detailed, ParsedTrack};
use crate::render::{render_entries, render_pair, PlainText, PresentationMode, RenderFrame, TextDecorator};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use super::resolver::{ActiveState, Resolution, Resolver, Tracks};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of a successful track load
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Track that was replaced
    pub track: Track,
    /// Entries parsed from the file
    pub entries: usize,
    /// Blocks skipped as malformed
    pub skipped: usize,
    /// Aligned pairs after the load, zero when the other track is empty
    pub pairs: usize,
}

/// Polling run state
///
/// Every start or stop bumps the generation, so a background poller bound
/// to an earlier run can tell that it is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PollState {
    running: bool,
    generation: u64,
}

impl PollState {
    fn start(&mut self) {
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Start a run unless one is in progress
    fn resume(&mut self) {
        if !self.running {
            self.start();
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.generation = self.generation.wrapping_add(1);
        }
    }
}

/// Owner of all subtitle state for one player
pub struct PlaybackSession<D = PlainText> {
    config: SessionConfig,
    resolver: Resolver,
    primary: Vec<Entry>,
    secondary: Vec<Entry>,
    pairs: Vec<AlignedPair>,
    mode: PresentationMode,
    state: ActiveState,
    media_loaded: bool,
    polling: PollState,
    decorator: D,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::build(SessionConfig::default(), PlainText)
    }
}

impl PlaybackSession {
    /// Create a session with an undecorated primary track
    ///
    /// # Errors
    ///
    /// Returns [`DualSubError::Config`] when `config` does not validate.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, PlainText))
    }
}

impl<D: TextDecorator> PlaybackSession<D> {
    fn build(config: SessionConfig, decorator: D) -> Self {
        Self {
            resolver: Resolver::from(&config),
            state: ActiveState::new(config.history_capacity),
            config,
            primary: Vec::new(),
            secondary: Vec::new(),
            pairs: Vec::new(),
            mode: PresentationMode::default(),
            media_loaded: false,
            polling: PollState::default(),
            decorator,
        }
    }

    /// Replace the decorator applied to primary text
    pub fn with_decorator<E: TextDecorator>(self, decorator: E) -> PlaybackSession<E> {
        PlaybackSession {
            config: self.config,
            resolver: self.resolver,
            primary: self.primary,
            secondary: self.secondary,
            pairs: self.pairs,
            mode: self.mode,
            state: self.state,
            media_loaded: self.media_loaded,
            polling: self.polling,
            decorator,
        }
    }

    /// Session configuration
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current presentation mode
    #[must_use]
    pub const fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Entries of one track, sorted by start
    #[must_use]
    pub fn entries(&self, track: Track) -> &[Entry] {
        match track {
            Track::Primary => &self.primary,
            Track::Secondary => &self.secondary,
        }
    }

    /// Aligned pairs, empty until both tracks are loaded
    #[must_use]
    pub fn pairs(&self) -> &[AlignedPair] {
        &self.pairs
    }

    /// Whether alignment has run
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// Active index and history
    #[must_use]
    pub const fn state(&self) -> &ActiveState {
        &self.state
    }

    /// Index of the active pair
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.state.active_index
    }

    /// Scroll-back history
    #[must_use]
    pub const fn history(&self) -> &PairHistory {
        &self.state.history
    }

    /// Whether a media source is loaded
    #[must_use]
    pub const fn media_loaded(&self) -> bool {
        self.media_loaded
    }

    /// Whether tick polling is running
    #[must_use]
    pub const fn is_polling(&self) -> bool {
        self.polling.running
    }

    /// Identifier of the current polling run
    #[must_use]
    pub const fn poll_generation(&self) -> u64 {
        self.polling.generation
    }

    /// Borrowed view of tracks and alignment
    #[must_use]
    pub fn tracks(&self) -> Tracks<'_> {
        Tracks {
            primary: &self.primary,
            secondary: &self.secondary,
            pairs: &self.pairs,
        }
    }

    /// Parse `raw` SubRip text into `track`
    ///
    /// # Errors
    ///
    /// Returns [`DualSubError::NoEntries`] when the text yields no entries;
    /// the session is left untouched.
    pub fn load_track(&mut self, track: Track, raw: &str) -> Result<LoadReport> {
        self.commit_track(track, parse_detailed(raw))
    }

    /// Decode and parse a subtitle file's bytes into `track`
    ///
    /// # Errors
    ///
    /// Returns [`DualSubError::InvalidEncoding`] for non-UTF-8 input and
    /// [`DualSubError::NoEntries`] for files without usable entries; the
    /// session is left untouched in both cases.
    pub fn load_track_bytes(&mut self, track: Track, bytes: &[u8]) -> Result<LoadReport> {
        let parsed = parse_bytes(bytes).map_err(|err| {
            warn!(%track, error = %err, "rejected subtitle file");
            err
        })?;
        self.commit_track(track, parsed)
    }

    /// Read and load a subtitle file from disk
    ///
    /// # Errors
    ///
    /// Returns [`DualSubError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::load_track_bytes`].
    pub fn load_track_file<P: AsRef<Path>>(&mut self, track: Track, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| {
            warn!(%track, path = %path.display(), error = %err, "failed to read subtitle file");
            DualSubError::io(format!("{}: {err}", path.display()))
        })?;
        self.load_track_bytes(track, &bytes)
    }

    /// Load `raw` into `track` and resolve the frame for `time`
    ///
    /// Use this while media is playing so the frame built from the replaced
    /// tracks is superseded at once.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_track`]; no frame is produced on error.
    pub fn load_track_at(
        &mut self,
        track: Track,
        raw: &str,
        time: f64,
    ) -> Result<(LoadReport, RenderFrame)> {
        let report = self.load_track(track, raw)?;
        Ok((report, self.on_time_update(time)))
    }

    fn commit_track(&mut self, track: Track, parsed: ParsedTrack) -> Result<LoadReport> {
        if parsed.entries.is_empty() {
            warn!(%track, skipped = parsed.skipped.len(), "subtitle file has no usable entries");
            return Err(DualSubError::NoEntries { track });
        }

        let entries = parsed.entries.len();
        let skipped = parsed.skipped.len();
        match track {
            Track::Primary => self.primary = parsed.entries,
            Track::Secondary => self.secondary = parsed.entries,
        }
        self.realign();
        self.state.reset();
        if self.media_loaded {
            self.polling.resume();
        }

        info!(%track, entries, skipped, pairs = self.pairs.len(), "loaded subtitle track");
        Ok(LoadReport {
            track,
            entries,
            skipped,
            pairs: self.pairs.len(),
        })
    }

    fn realign(&mut self) {
        if self.primary.is_empty() || self.secondary.is_empty() {
            self.pairs.clear();
        } else {
            self.pairs = align_with(
                &self.primary,
                &self.secondary,
                AlignParams::from(&self.config),
            );
        }
    }

    /// A new media source was loaded: drop every track and stop polling
    pub fn load_media(&mut self) -> RenderFrame {
        self.polling.stop();
        self.primary.clear();
        self.secondary.clear();
        self.pairs.clear();
        self.state.reset();
        self.media_loaded = true;
        info!("media loaded, subtitle state cleared");
        RenderFrame::empty(self.mode)
    }

    /// Playback started: begin polling if any track is loaded
    ///
    /// Returns whether polling is running afterwards.
    pub fn on_play(&mut self) -> bool {
        if !self.primary.is_empty() || !self.secondary.is_empty() {
            self.polling.start();
            debug!(generation = self.polling.generation, "polling started");
        }
        self.polling.running
    }

    /// Resolve `time` and build the frame to show
    pub fn on_time_update(&mut self, time: f64) -> RenderFrame {
        let tracks = Tracks {
            primary: &self.primary,
            secondary: &self.secondary,
            pairs: &self.pairs,
        };
        let resolution = self.resolver.resolve(time, tracks, self.mode, &mut self.state);

        match resolution {
            Resolution::Aligned(pair) => render_pair(
                pair,
                &self.pairs,
                &self.state.history,
                self.mode,
                &self.decorator,
            ),
            Resolution::Independent { primary, secondary } => {
                render_entries(primary, secondary, self.mode, &self.decorator)
            }
        }
    }

    /// Polling tick: resolve at the clock's time while polling and playing
    pub fn on_tick<C: MediaClock + ?Sized>(&mut self, clock: &C) -> Option<RenderFrame> {
        if self.polling.running && clock.is_playing() {
            Some(self.on_time_update(clock.current_time()))
        } else {
            None
        }
    }

    /// The user seeked: reset state and resolve immediately
    pub fn on_seek(&mut self, time: f64) -> RenderFrame {
        self.state.reset();
        self.on_time_update(time)
    }

    /// Playback ended: stop polling, reset state, clear the display
    pub fn on_ended(&mut self) -> RenderFrame {
        self.polling.stop();
        self.state.reset();
        debug!("playback ended, polling stopped");
        RenderFrame::empty(self.mode)
    }

    /// Switch presentation mode: reset state and resolve immediately
    pub fn set_mode(&mut self, mode: PresentationMode, time: f64) -> RenderFrame {
        if mode != self.mode {
            info!(from = %self.mode, to = %mode, "presentation mode changed");
        }
        self.mode = mode;
        self.state.reset();
        self.on_time_update(time)
    }

    /// Dispatch a player event, returning the frame to show if it changed
    pub fn handle(&mut self, event: PlayerEvent) -> Option<RenderFrame> {
        debug!(event = event.name(), "player event");
        match event {
            PlayerEvent::MediaLoaded => Some(self.load_media()),
            PlayerEvent::Play => {
                self.on_play();
                None
            }
            PlayerEvent::TimeUpdate { time } => Some(self.on_time_update(time)),
            PlayerEvent::Seeked { time } => Some(self.on_seek(time)),
            PlayerEvent::Ended => Some(self.on_ended()),
            PlayerEvent::ModeChanged { mode, time } => Some(self.set_mode(mode, time)),
        }
    }
}

impl<D> fmt::Debug for PlaybackSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("config", &self.config)
            .field("primary", &self.primary.len())
            .field("secondary", &self.secondary.len())
            .field("pairs", &self.pairs.len())
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("media_loaded", &self.media_loaded)
            .field("polling", &self.polling)
            .finish_non_exhaustive()
    }
}
