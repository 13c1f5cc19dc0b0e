//! Playback-time resolution, session control and polling

pub mod resolver;
pub mod session;

#[cfg(feature = "multi-thread")]
pub mod shared;

pub use resolver::{ActiveState, Resolution, Resolver, Tracks};
pub use session::{LoadReport, PlaybackSession};

#[cfg(feature = "multi-thread")]
pub use shared::{PollerHandle, SharedSession};
