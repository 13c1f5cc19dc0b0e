//! Presentation: mapping the active pair to a render-ready frame
//!
//! Pure functions from `(active pair or entries, history, mode)` to a
//! [`RenderFrame`]. The renderer owns pixels; frames only say which texts go
//! where.

pub mod decorate;
pub mod mode;

pub use decorate::{PlainText, TextDecorator};
pub use mode::PresentationMode;

use crate::core::{AlignedPair, Entry, PairHistory};
use decorate::decorate_non_empty;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One side-by-side row of the dual-column layout
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Decorated primary text, possibly empty
    pub primary: String,
    /// Secondary text, possibly empty
    pub secondary: String,
}

/// Layout-specific content of a frame
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameContent {
    /// Nothing to show
    Empty,
    /// One text block
    Single {
        /// Text to show
        text: String,
    },
    /// Primary above secondary
    Stacked {
        /// Decorated primary text, absent when empty
        primary: Option<String>,
        /// Secondary text, absent when empty
        secondary: Option<String>,
        /// Divider between the two, only when both are present
        divider: bool,
    },
    /// Side-by-side rows, history oldest first, then the current row
    Columns {
        /// Previously active pairs
        history: Vec<Row>,
        /// Active pair
        current: Option<Row>,
    },
}

/// Render structure handed to the renderer, tagged by mode
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Mode the frame was built for
    pub mode: PresentationMode,
    /// What to show
    pub content: FrameContent,
}

impl RenderFrame {
    /// An empty frame in `mode`
    #[must_use]
    pub const fn empty(mode: PresentationMode) -> Self {
        Self {
            mode,
            content: FrameContent::Empty,
        }
    }

    /// Whether the frame shows nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, FrameContent::Empty)
    }
}

/// Build a frame for the aligned case
///
/// `history` is only drawn in dual-column mode, where every history entry
/// except the current one (the most recent) is shown above the active pair.
/// Without an active pair every other mode renders empty.
pub fn render_pair<D: TextDecorator + ?Sized>(
    pair: Option<&AlignedPair>,
    pairs: &[AlignedPair],
    history: &PairHistory,
    mode: PresentationMode,
    decorator: &D,
) -> RenderFrame {
    let content = match (mode, pair) {
        (PresentationMode::DualColumn, _) => {
            let shown = if pair.is_some() {
                history.len().saturating_sub(1)
            } else {
                history.len()
            };
            let rows: Vec<Row> = history
                .iter()
                .take(shown)
                .filter_map(|index| pairs.get(index))
                .map(|past| pair_row(past, decorator))
                .collect();
            let current = pair.map(|p| pair_row(p, decorator));

            if rows.is_empty() && current.is_none() {
                FrameContent::Empty
            } else {
                FrameContent::Columns {
                    history: rows,
                    current,
                }
            }
        }
        (_, None) => FrameContent::Empty,
        (PresentationMode::PrimaryOnly, Some(p)) => FrameContent::Single {
            text: decorate_non_empty(decorator, &p.primary_text),
        },
        (PresentationMode::SecondaryOnly, Some(p)) => FrameContent::Single {
            text: p.secondary_text.clone(),
        },
        (PresentationMode::Sequential, Some(p)) => stacked(&p.primary_text, &p.secondary_text, decorator),
    };

    RenderFrame { mode, content }
}

/// Build a frame for the unaligned case from independently found entries
///
/// Empty when neither side has text. Sequential and dual-column both show a
/// single side-by-side row without history.
pub fn render_entries<D: TextDecorator + ?Sized>(
    primary: Option<&Entry>,
    secondary: Option<&Entry>,
    mode: PresentationMode,
    decorator: &D,
) -> RenderFrame {
    let primary_text = primary.map_or("", |e| e.text.as_str());
    let secondary_text = secondary.map_or("", |e| e.text.as_str());

    if primary_text.is_empty() && secondary_text.is_empty() {
        return RenderFrame::empty(mode);
    }

    let content = match mode {
        PresentationMode::PrimaryOnly => FrameContent::Single {
            text: decorate_non_empty(decorator, primary_text),
        },
        PresentationMode::SecondaryOnly => FrameContent::Single {
            text: secondary_text.to_string(),
        },
        PresentationMode::Sequential | PresentationMode::DualColumn => FrameContent::Columns {
            history: Vec::new(),
            current: Some(Row {
                primary: decorate_non_empty(decorator, primary_text),
                secondary: secondary_text.to_string(),
            }),
        },
    };

    RenderFrame { mode, content }
}

fn pair_row<D: TextDecorator + ?Sized>(pair: &AlignedPair, decorator: &D) -> Row {
    Row {
        primary: decorate_non_empty(decorator, &pair.primary_text),
        secondary: pair.secondary_text.clone(),
    }
}

fn stacked<D: TextDecorator + ?Sized>(primary: &str, secondary: &str, decorator: &D) -> FrameContent {
    let primary = (!primary.is_empty()).then(|| decorator.decorate(primary));
    let secondary = (!secondary.is_empty()).then(|| secondary.to_string());
    FrameContent::Stacked {
        divider: primary.is_some() && secondary.is_some(),
        primary,
        secondary,
    }
}
