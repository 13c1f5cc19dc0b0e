//! Presentation modes

use crate::core::DualSubError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Layout used to present the active pair
///
/// Parsed from and displayed as the names players use in their settings:
/// `english-only`, `russian-only`, `sequential` and `dual-column`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationMode {
    /// Primary text only, decorated
    #[cfg_attr(feature = "serde", serde(rename = "english-only"))]
    PrimaryOnly,
    /// Secondary text only, undecorated
    #[cfg_attr(feature = "serde", serde(rename = "russian-only"))]
    SecondaryOnly,
    /// Primary stacked above secondary
    Sequential,
    /// Primary and secondary side by side, with scroll-back history
    #[default]
    DualColumn,
}

impl PresentationMode {
    /// All modes in menu order
    pub const ALL: [Self; 4] = [
        Self::PrimaryOnly,
        Self::SecondaryOnly,
        Self::Sequential,
        Self::DualColumn,
    ];

    /// Canonical name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryOnly => "english-only",
            Self::SecondaryOnly => "russian-only",
            Self::Sequential => "sequential",
            Self::DualColumn => "dual-column",
        }
    }

    /// Whether resolution in this mode records history
    #[must_use]
    pub const fn tracks_history(self) -> bool {
        matches!(self, Self::DualColumn)
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresentationMode {
    type Err = DualSubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "english-only" | "primary-only" => Ok(Self::PrimaryOnly),
            "russian-only" | "secondary-only" => Ok(Self::SecondaryOnly),
            "sequential" => Ok(Self::Sequential),
            "dual-column" => Ok(Self::DualColumn),
            other => Err(DualSubError::UnknownMode(other.to_string())),
        }
    }
}
