//! Playback-time resolution and transition tracking
//!
//! Finds what is on screen at a playback time and records transitions into
//! the scroll-back history. Two paths share one entry point:
//!
//! - **Aligned**: the first pair whose padded bounds contain the time becomes
//!   active. In dual-column mode a transition to a different pair pushes it
//!   onto the history.
//! - **Independent**: when no alignment exists, each track is searched on its
//!   own and history is left alone.

use crate::core::{AlignedPair, Entry, PairHistory, SessionConfig};
use crate::render::PresentationMode;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mutable resolution state: the active pair and the history
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveState {
    /// Index of the pair currently considered active
    pub active_index: Option<usize>,
    /// Recently activated pair indices, oldest first
    pub history: PairHistory,
}

impl ActiveState {
    /// Empty state with the given history capacity
    #[must_use]
    pub fn new(history_capacity: usize) -> Self {
        Self {
            active_index: None,
            history: PairHistory::new(history_capacity),
        }
    }

    /// Clear the active index and the history
    pub fn reset(&mut self) {
        self.active_index = None;
        self.history.clear();
    }
}

/// What is on screen at a playback time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// Alignment exists; the active pair, if any
    Aligned(Option<&'a AlignedPair>),
    /// No alignment; entries found independently in each track
    Independent {
        /// Entry from the primary track
        primary: Option<&'a Entry>,
        /// Entry from the secondary track
        secondary: Option<&'a Entry>,
    },
}

impl Resolution<'_> {
    /// Whether nothing is active
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(
            self,
            Self::Aligned(None)
                | Self::Independent {
                    primary: None,
                    secondary: None
                }
        )
    }
}

/// Borrowed view of the loaded tracks and their alignment
#[derive(Debug, Clone, Copy)]
pub struct Tracks<'a> {
    /// Primary track entries
    pub primary: &'a [Entry],
    /// Secondary track entries
    pub secondary: &'a [Entry],
    /// Aligned pairs, empty when alignment has not run
    pub pairs: &'a [AlignedPair],
}

/// Resolves playback times against loaded tracks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    tolerance: f64,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for Resolver {
    fn from(config: &SessionConfig) -> Self {
        Self::new(config.tolerance)
    }
}

impl Resolver {
    /// Resolver with the given tolerance pad in seconds
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Tolerance pad in seconds
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Resolve `time` and update `state`
    ///
    /// Transition rule on the aligned path:
    /// - no pair found: clear the active index, keep history
    /// - same pair as before: no change
    /// - new pair in dual-column mode: make it active and push it onto history
    /// - new pair in other modes: no change to state
    pub fn resolve<'a>(
        &self,
        time: f64,
        tracks: Tracks<'a>,
        mode: PresentationMode,
        state: &mut ActiveState,
    ) -> Resolution<'a> {
        if tracks.pairs.is_empty() {
            return Resolution::Independent {
                primary: self.find_entry(tracks.primary, time),
                secondary: self.find_entry(tracks.secondary, time),
            };
        }

        let found = self.find_pair(tracks.pairs, time);
        match found {
            None => {
                if state.active_index.take().is_some() {
                    trace!(time, "active pair cleared");
                }
            }
            Some(index) if Some(index) != state.active_index && mode.tracks_history() => {
                state.active_index = Some(index);
                let evicted = state.history.push(index);
                trace!(time, index, ?evicted, "active pair changed");
            }
            Some(_) => {}
        }

        Resolution::Aligned(found.map(|index| &tracks.pairs[index]))
    }

    /// First entry whose padded bounds contain `time`
    #[must_use]
    pub fn find_entry<'a>(&self, entries: &'a [Entry], time: f64) -> Option<&'a Entry> {
        entries
            .iter()
            .find(|entry| entry.contains(time, self.tolerance))
    }

    /// Position of the first pair whose padded bounds contain `time`
    #[must_use]
    pub fn find_pair(&self, pairs: &[AlignedPair], time: f64) -> Option<usize> {
        pairs
            .iter()
            .position(|pair| pair.contains(time, self.tolerance))
    }
}
