//! Greedy cross-track alignment
//!
//! Pairs every primary entry with at most one secondary entry by temporal
//! overlap. The pass walks the primary track in order and, for each entry,
//! scans the secondary entries that are still free:
//!
//! ```text
//! overlap   = max(0, min(p.end, s.end) - max(p.start, s.start))
//! time_diff = |p.start - s.start|
//! eligible  = overlap > 0 || time_diff < match_window
//! score     = overlap - time_diff_weight * time_diff
//! ```
//!
//! The best candidate must beat a running best that starts at zero, using a
//! strict comparison, so the lowest secondary index wins ties and a candidate
//! whose score is not positive never matches. A matched secondary entry is
//! consumed and cannot pair with a later primary entry.
//!
//! This is greedy and order-dependent, not an optimal bipartite matching: an
//! earlier primary entry may take a secondary entry that would have scored
//! higher against a later one. Pairings depend on exactly this bias, so it
//! must be preserved.

use crate::core::{AlignedPair, Entry, SessionConfig};
use tracing::info;

/// Scoring parameters for [`align_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignParams {
    /// Start-time difference under which a candidate is eligible without overlap
    pub match_window: f64,
    /// Penalty per second of start-time difference
    pub time_diff_weight: f64,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for AlignParams {
    fn from(config: &SessionConfig) -> Self {
        Self {
            match_window: config.match_window,
            time_diff_weight: config.time_diff_weight,
        }
    }
}

/// Align two tracks with the default scoring parameters
///
/// Returns one pair per primary entry, in primary order.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::{align, Entry};
///
/// let primary = vec![Entry::new(0.0, 2.0, "Hello")];
/// let secondary = vec![Entry::new(0.5, 2.5, "Привет")];
/// let pairs = align(&primary, &secondary);
///
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].secondary_text, "Привет");
/// assert_eq!((pairs[0].start, pairs[0].end), (0.0, 2.5));
/// ```
#[must_use]
pub fn align(primary: &[Entry], secondary: &[Entry]) -> Vec<AlignedPair> {
    align_with(primary, secondary, AlignParams::default())
}

/// Align two tracks with explicit scoring parameters
#[must_use]
pub fn align_with(primary: &[Entry], secondary: &[Entry], params: AlignParams) -> Vec<AlignedPair> {
    let mut consumed = vec![false; secondary.len()];
    let mut pairs = Vec::with_capacity(primary.len());
    let mut matched = 0usize;

    for (index, entry) in primary.iter().enumerate() {
        let best = best_match(entry, secondary, &consumed, params);

        let pair = match best {
            Some(j) => {
                consumed[j] = true;
                matched += 1;
                let other = &secondary[j];
                AlignedPair {
                    index,
                    primary_text: entry.text.clone(),
                    secondary_text: other.text.clone(),
                    start: entry.start.min(other.start),
                    end: entry.end.max(other.end),
                }
            }
            None => AlignedPair {
                index,
                primary_text: entry.text.clone(),
                secondary_text: String::new(),
                start: entry.start,
                end: entry.end,
            },
        };
        pairs.push(pair);
    }

    info!(
        pairs = pairs.len(),
        matched,
        unmatched_secondary = secondary.len() - matched,
        "synchronized subtitle pairs"
    );
    pairs
}

/// Index of the best free secondary entry for `entry`, if any
fn best_match(
    entry: &Entry,
    secondary: &[Entry],
    consumed: &[bool],
    params: AlignParams,
) -> Option<usize> {
    let mut best_score = 0.0;
    let mut best = None;

    for (j, candidate) in secondary.iter().enumerate() {
        if consumed[j] {
            continue;
        }

        let overlap = entry.overlap(candidate);
        let time_diff = (entry.start - candidate.start).abs();
        if !(overlap > 0.0 || time_diff < params.match_window) {
            continue;
        }

        let score = overlap - params.time_diff_weight * time_diff;
        if score > best_score {
            best_score = score;
            best = Some(j);
        }
    }

    best
}
