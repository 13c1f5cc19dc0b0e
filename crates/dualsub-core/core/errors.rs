//! Error types for the dualsub-core crate
//!
//! Provides the `DualSubError` enum shared by every module. Follows the
//! same philosophy as the rest of the workspace:
//! - Use thiserror for structured error handling (no anyhow)
//! - Keep every failure local and recoverable
//! - Carry enough context for a single user-visible status message

use super::model::Track;
use std::fmt;
use thiserror::Error;

/// Main error type for dualsub-core operations
///
/// None of these errors is fatal. The worst outcome of any failure is that a
/// load is rejected and the previously loaded state keeps being displayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DualSubError {
    /// Subtitle file bytes are not valid UTF-8
    #[error("Invalid UTF-8 in subtitle file at byte {position}")]
    InvalidEncoding { position: usize },

    /// A subtitle file produced no usable entries
    #[error("No subtitle entries found in {track} track")]
    NoEntries { track: Track },

    /// A timestamp digit group could not be represented
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Presentation mode name outside the fixed set
    #[error("Unknown presentation mode: {0}")]
    UnknownMode(String),

    /// Session configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Reading a subtitle file failed
    #[error("IO error: {0}")]
    Io(String),
}

impl DualSubError {
    /// Create a new invalid timestamp error
    pub fn invalid_timestamp<T: fmt::Display>(value: T) -> Self {
        Self::InvalidTimestamp(value.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a new IO error
    pub fn io<T: fmt::Display>(message: T) -> Self {
        Self::Io(message.to_string())
    }

    /// Check if error is recoverable
    ///
    /// Always true: a failed load leaves the previous state in place.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }

    /// Get suggested action for this error
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEncoding { .. } => Some("Re-save the subtitle file as UTF-8"),
            Self::NoEntries { .. } => {
                Some("Check that the file is SubRip: index, 00:00:01,000 --> 00:00:02,000, text")
            }
            Self::InvalidTimestamp(_) => Some("Use timestamps like 00:01:30,500"),
            Self::UnknownMode(_) => {
                Some("Use one of english-only, russian-only, sequential, dual-column")
            }
            Self::Config { .. } | Self::Io(_) => None,
        }
    }
}

impl From<std::io::Error> for DualSubError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err)
    }
}

/// Result type alias for dualsub-core operations
pub type Result<T> = std::result::Result<T, DualSubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = DualSubError::NoEntries {
            track: Track::Secondary,
        };
        assert_eq!(err.to_string(), "No subtitle entries found in secondary track");

        let err = DualSubError::InvalidEncoding { position: 12 };
        assert_eq!(err.to_string(), "Invalid UTF-8 in subtitle file at byte 12");

        let err = DualSubError::config("history capacity must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: history capacity must be positive"
        );
    }

    #[test]
    fn every_error_is_recoverable() {
        let errors = [
            DualSubError::InvalidEncoding { position: 0 },
            DualSubError::NoEntries {
                track: Track::Primary,
            },
            DualSubError::invalid_timestamp("99999999999999999999"),
            DualSubError::UnknownMode("karaoke".to_string()),
            DualSubError::config("bad"),
            DualSubError::io("missing"),
        ];
        for err in &errors {
            assert!(err.is_recoverable());
        }
    }

    #[test]
    fn suggestions() {
        assert!(DualSubError::UnknownMode("x".to_string())
            .suggestion()
            .is_some_and(|s| s.contains("dual-column")));
        assert!(DualSubError::io("x").suggestion().is_none());
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DualSubError = io.into();
        assert!(matches!(err, DualSubError::Io(ref msg) if msg.contains("gone")));
    }
}
