//! # dualsub-core
//!
//! Aligns two independently timed subtitle tracks (for example English and
//! Russian captions of the same video) into time-coherent pairs and tracks
//! which pair is on screen as playback progresses.
//!
//! ## Pipeline
//!
//! - **Parse**: SubRip text becomes entries sorted by start time
//!   ([`parse`]), skipping malformed blocks
//! - **Align**: a greedy pass pairs each primary entry with its best free
//!   secondary entry ([`align`])
//! - **Resolve**: a playback time selects the active pair and feeds the
//!   scroll-back history ([`Resolver`])
//! - **Render**: the active pair and history become a mode-tagged
//!   [`RenderFrame`]
//!
//! [`PlaybackSession`] owns all of it and turns player events into frames.
//!
//! ## Quick Start
//!
//! ```rust
//! use dualsub_core::{FrameContent, PlaybackSession, Track};
//!
//! let mut session = PlaybackSession::default();
//! session.load_track(Track::Primary, "1\n00:00:00,000 --> 00:00:02,000\nHello\n")?;
//! session.load_track(Track::Secondary, "1\n00:00:00,500 --> 00:00:02,500\nПривет\n")?;
//!
//! let frame = session.on_time_update(1.0);
//! if let FrameContent::Columns { history, current } = frame.content {
//!     assert!(history.is_empty());
//!     let row = current.expect("a pair is active at 1.0s");
//!     assert_eq!((row.primary.as_str(), row.secondary.as_str()), ("Hello", "Привет"));
//! }
//! # Ok::<(), dualsub_core::DualSubError>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: serialization for entries, pairs, configuration and frames
//! - `multi-thread`: [`SharedSession`] and a cancelable background poller

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod align;
pub mod core;
pub mod events;
pub mod formats;
pub mod playback;
pub mod render;

pub use crate::core::{
    format_timestamp, to_seconds, AlignedPair, DualSubError, Entry, PairHistory, Result,
    SessionConfig, Track,
};
pub use align::{align, align_with, AlignParams};
pub use events::{FrameSink, MediaClock, PlayerEvent};
pub use formats::{parse, parse_bytes, parse_detailed, ParsedTrack, SkipReason, SkippedBlock};
pub use playback::{ActiveState, LoadReport, PlaybackSession, Resolution, Resolver, Tracks};
pub use render::{
    render_entries, render_pair, FrameContent, PlainText, PresentationMode, RenderFrame, Row,
    TextDecorator,
};

#[cfg(feature = "multi-thread")]
#[cfg_attr(docsrs, doc(cfg(feature = "multi-thread")))]
pub use playback::{PollerHandle, SharedSession};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
