//! SRT (SubRip) parsing into timed entries
//!
//! Block-oriented and forgiving: each blank-line separated block is parsed on
//! its own and malformed blocks are skipped, never failing the whole file.
//!
//! # Block layout
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! First caption text
//! ```
//!
//! The index line is optional. The timing line must appear among the first
//! three non-empty lines of the block and may use `,` or `.` before a fraction
//! of any width. Text lines are joined with a single space.

use crate::core::{to_seconds, DualSubError, Entry, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing line: `H:MM:SS<sep>fraction --> H:MM:SS<sep>fraction`
static TIMING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9]+):([0-9]+):([0-9]+)[,.]([0-9]+)\s*-->\s*([0-9]+):([0-9]+):([0-9]+)[,.]([0-9]+)",
    )
    .expect("timing line pattern is valid")
});

const BOM: char = '\u{FEFF}';
const TIMING_MARKER: &str = "-->";

/// Number of leading lines searched for the timing marker
const TIMING_SEARCH_LINES: usize = 3;

/// Minimum non-empty lines for a block: index or timing, timing, text
const MIN_BLOCK_LINES: usize = 3;

/// Why a block was left out of the parse result
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than three non-empty lines
    TooFewLines,
    /// No `-->` within the first three lines
    MissingTimingLine,
    /// A `-->` line that does not match the timing pattern
    MalformedTiming,
    /// Nothing left after the timing line
    EmptyText,
}

/// A block that did not produce an entry
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedBlock {
    /// Zero-based position of the block among non-blank blocks
    pub block: usize,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Result of parsing a whole file
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTrack {
    /// Entries sorted by start time
    pub entries: Vec<Entry>,
    /// Blocks that were dropped
    pub skipped: Vec<SkippedBlock>,
}

impl ParsedTrack {
    /// Number of non-blank blocks seen
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.entries.len() + self.skipped.len()
    }
}

/// Parse SubRip text into entries sorted by start time
///
/// Never fails: malformed blocks are skipped.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::parse;
///
/// let entries = parse("1\n00:00:01,000 --> 00:00:02,500\nHello\nworld\n");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].text, "Hello world");
/// assert_eq!(entries[0].end, 2.5);
/// ```
#[must_use]
pub fn parse(raw: &str) -> Vec<Entry> {
    parse_detailed(raw).entries
}

/// Parse SubRip text, also reporting which blocks were skipped and why
#[must_use]
pub fn parse_detailed(raw: &str) -> ParsedTrack {
    let raw = raw.strip_prefix(BOM).unwrap_or(raw);
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut track = ParsedTrack::default();
    let blocks = normalized
        .split("\n\n")
        .filter(|block| !block.trim().is_empty());

    for (block_index, block) in blocks.enumerate() {
        match parse_block(block) {
            Ok(entry) => track.entries.push(entry),
            Err(reason) => {
                debug!(block = block_index, ?reason, "skipping subtitle block");
                track.skipped.push(SkippedBlock {
                    block: block_index,
                    reason,
                });
            }
        }
    }

    // Stable: entries with equal start keep file order.
    track
        .entries
        .sort_by(|a, b| a.start.total_cmp(&b.start));
    track
}

/// Decode UTF-8 bytes and parse them
///
/// # Errors
///
/// Returns [`DualSubError::InvalidEncoding`] with the offset of the first
/// invalid byte when `bytes` is not UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedTrack> {
    let text = std::str::from_utf8(bytes).map_err(|err| DualSubError::InvalidEncoding {
        position: err.valid_up_to(),
    })?;
    Ok(parse_detailed(text))
}

fn parse_block(block: &str) -> std::result::Result<Entry, SkipReason> {
    let lines: Vec<&str> = block
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < MIN_BLOCK_LINES {
        return Err(SkipReason::TooFewLines);
    }

    let timing_index = lines
        .iter()
        .take(TIMING_SEARCH_LINES)
        .position(|line| line.contains(TIMING_MARKER))
        .ok_or(SkipReason::MissingTimingLine)?;

    let (start, end) = parse_timing_line(lines[timing_index]).ok_or(SkipReason::MalformedTiming)?;

    let text = lines[timing_index + 1..].join(" ");
    let text = text.trim();
    if text.is_empty() {
        return Err(SkipReason::EmptyText);
    }

    Ok(Entry::new(start, end, text))
}

fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let caps = TIMING_LINE.captures(line)?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let start = to_seconds(group(1), group(2), group(3), group(4)).ok()?;
    let end = to_seconds(group(5), group(6), group(7), group(8)).ok()?;
    Some((start, end))
}
