//! Bounded scroll-back history of activated pairs
//!
//! Keeps the indices of the most recently activated aligned pairs in
//! activation order, oldest first. Pushing past capacity evicts the oldest
//! index. Duplicates are allowed: the resolver only pushes on transitions,
//! so a pair that becomes active again after a gap appears twice.

use super::config::DEFAULT_HISTORY_CAPACITY;
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounded FIFO of aligned-pair indices
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StoredHistory"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairHistory {
    /// Maximum number of indices kept
    capacity: usize,

    /// Indices in activation order, oldest at the front
    indices: VecDeque<usize>,
}

/// Serialized form, rebuilt through [`PairHistory::new`] so the capacity
/// bound holds for restored histories too
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StoredHistory {
    capacity: usize,
    #[serde(default)]
    indices: Vec<usize>,
}

#[cfg(feature = "serde")]
impl From<StoredHistory> for PairHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut history = Self::new(stored.capacity);
        for index in stored.indices {
            history.push(index);
        }
        history
    }
}

impl Default for PairHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PairHistory {
    /// Create an empty history holding at most `capacity` indices
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            indices: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append an index, evicting the oldest one when over capacity
    ///
    /// Returns the evicted index, if any.
    pub fn push(&mut self, index: usize) -> Option<usize> {
        self.indices.push_back(index);
        if self.indices.len() > self.capacity {
            self.indices.pop_front()
        } else {
            None
        }
    }

    /// Remove every index
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Number of indices currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Maximum number of indices kept
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed index
    #[must_use]
    pub fn latest(&self) -> Option<usize> {
        self.indices.back().copied()
    }

    /// Indices oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        self.indices.iter().copied()
    }

    /// Copy of the indices, oldest first
    #[must_use]
    pub fn to_vec(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }
}
