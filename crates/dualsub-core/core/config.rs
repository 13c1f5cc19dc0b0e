//! Session configuration
//!
//! Tunables for alignment, resolution and polling. Defaults reproduce the
//! behaviour players of dual subtitles expect: a 0.1 s tolerance pad, ten
//! rows of scroll-back and a 100 ms polling cadence.

use super::errors::{DualSubError, Result};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tolerance pad applied to entry and pair bounds
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Default number of history rows kept for the dual-column scroll-back
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Default polling cadence while media plays
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for a playback session
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Pad in seconds applied to both ends of an entry or pair when testing
    /// whether a playback time falls inside it
    pub tolerance: f64,

    /// Maximum number of indices kept in the history FIFO
    pub history_capacity: usize,

    /// Wall-clock cadence at which the resolver runs while playing
    pub poll_interval: Duration,

    /// Start-time difference in seconds under which a secondary entry is an
    /// alignment candidate even without overlap
    pub match_window: f64,

    /// Penalty per second of start-time difference in the alignment score
    pub time_diff_weight: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            match_window: 3.0,
            time_diff_weight: 0.1,
        }
    }
}

impl SessionConfig {
    /// Set the resolver tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the history capacity
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the polling cadence
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the alignment candidate window
    #[must_use]
    pub fn with_match_window(mut self, window: f64) -> Self {
        self.match_window = window;
        self
    }

    /// Set the alignment time-difference penalty
    #[must_use]
    pub fn with_time_diff_weight(mut self, weight: f64) -> Self {
        self.time_diff_weight = weight;
        self
    }

    /// Check that every field is usable
    ///
    /// # Errors
    ///
    /// Returns [`DualSubError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("tolerance", self.tolerance)?;
        check_non_negative("match_window", self.match_window)?;
        check_non_negative("time_diff_weight", self.time_diff_weight)?;

        if self.history_capacity == 0 {
            return Err(DualSubError::config("history_capacity must be at least 1"));
        }
        if self.poll_interval.is_zero() {
            return Err(DualSubError::config("poll_interval must be non-zero"));
        }
        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DualSubError::config(format!(
            "{field} must be a finite non-negative number, got {value}"
        )))
    }
}
