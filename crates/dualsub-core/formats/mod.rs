//! Subtitle file formats
//!
//! SubRip is the only input format; both tracks are read with the same
//! parser.

pub mod srt;

pub use srt::{parse, parse_bytes, parse_detailed, ParsedTrack, SkipReason, SkippedBlock};
