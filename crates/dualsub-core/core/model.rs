//! Timed subtitle data shared by the parser, aligner and resolver
//!
//! Times are floating-point seconds. Entries and pairs are immutable once
//! built; a reload replaces the whole sequence.

use super::timestamp::format_timestamp;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two subtitle tracks a file belongs to
///
/// The primary track drives alignment (one pair per primary entry) and is
/// the only one passed through the word decorator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Origin track, e.g. English captions
    Primary,
    /// Translation track, e.g. Russian captions
    Secondary,
}

impl Track {
    /// Lowercase name used in logs and error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed caption
///
/// `end > start` is expected but not enforced: the parser passes through
/// whatever the file says.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Caption text, lines joined with a single space
    pub text: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length of the entry in seconds (negative for inverted timings)
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check whether `time` falls within `[start - tolerance, end + tolerance]`
    #[must_use]
    pub fn contains(&self, time: f64, tolerance: f64) -> bool {
        time >= self.start - tolerance && time <= self.end + tolerance
    }

    /// Overlap in seconds with another entry, never negative
    #[must_use]
    pub fn overlap(&self, other: &Self) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --> {} {}",
            format_timestamp(self.start),
            format_timestamp(self.end),
            self.text
        )
    }
}

/// One primary entry combined with its best secondary match
///
/// `start`/`end` are the union of both entries' bounds, or the primary
/// entry's own bounds when nothing matched.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    /// Position of the primary entry in its track
    pub index: usize,
    /// Primary caption text
    pub primary_text: String,
    /// Matched secondary text, empty when unmatched
    pub secondary_text: String,
    /// Union start time in seconds
    pub start: f64,
    /// Union end time in seconds
    pub end: f64,
}

impl AlignedPair {
    /// Whether a secondary entry was matched to this pair
    #[must_use]
    pub fn has_secondary(&self) -> bool {
        !self.secondary_text.is_empty()
    }

    /// Check whether `time` falls within `[start - tolerance, end + tolerance]`
    #[must_use]
    pub fn contains(&self, time: f64, tolerance: f64) -> bool {
        time >= self.start - tolerance && time <= self.end + tolerance
    }
}
