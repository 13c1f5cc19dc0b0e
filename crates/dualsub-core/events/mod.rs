//! Player events and the collaborator seams around a session
//!
//! The media player drives a session through [`PlayerEvent`]s and answers
//! time queries through [`MediaClock`]. Frames leave through a [`FrameSink`].

use crate::render::{PresentationMode, RenderFrame};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something the media player or the user did
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// A new media source was loaded
    MediaLoaded,
    /// Playback started or resumed
    Play,
    /// Periodic or on-demand playback position
    TimeUpdate {
        /// Playback time in seconds
        time: f64,
    },
    /// The user seeked
    Seeked {
        /// Playback time after the seek
        time: f64,
    },
    /// Playback reached the end
    Ended,
    /// The user picked another presentation mode
    ModeChanged {
        /// New mode
        mode: PresentationMode,
        /// Playback time at the switch
        time: f64,
    },
}

impl PlayerEvent {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MediaLoaded => "media_loaded",
            Self::Play => "play",
            Self::TimeUpdate { .. } => "time_update",
            Self::Seeked { .. } => "seeked",
            Self::Ended => "ended",
            Self::ModeChanged { .. } => "mode_changed",
        }
    }
}

/// Playback position source
pub trait MediaClock {
    /// Current playback time in seconds
    fn current_time(&self) -> f64;

    /// Whether playback is paused
    fn is_paused(&self) -> bool;

    /// Whether playback reached the end
    fn is_ended(&self) -> bool;

    /// Whether polling should resolve right now
    fn is_playing(&self) -> bool {
        !self.is_paused() && !self.is_ended()
    }
}

/// Receives frames for display
pub trait FrameSink {
    /// Show `frame`, replacing whatever was shown
    fn present(&mut self, frame: RenderFrame);
}

impl<F> FrameSink for F
where
    F: FnMut(RenderFrame),
{
    fn present(&mut self, frame: RenderFrame) {
        self(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock {
        paused: bool,
        ended: bool,
    }

    impl MediaClock for FixedClock {
        fn current_time(&self) -> f64 {
            1.0
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
        fn is_ended(&self) -> bool {
            self.ended
        }
    }

    #[test]
    fn playing_requires_not_paused_and_not_ended() {
        let cases = [
            (false, false, true),
            (true, false, false),
            (false, true, false),
            (true, true, false),
        ];
        for (paused, ended, playing) in cases {
            assert_eq!(FixedClock { paused, ended }.is_playing(), playing);
        }
    }

    #[test]
    fn closures_are_sinks() {
        let mut frames = Vec::new();
        let mut collect = |frame: RenderFrame| frames.push(frame);
        collect.present(RenderFrame::empty(PresentationMode::Sequential));
        assert_eq!(frames.len(), 1);

        let mut count = 0;
        let mut counter = |_frame: RenderFrame| count += 1;
        counter.present(RenderFrame::empty(PresentationMode::DualColumn));
        assert_eq!(count, 1);
    }

    #[test]
    fn event_names() {
        assert_eq!(PlayerEvent::Seeked { time: 1.0 }.name(), "seeked");
        assert_eq!(PlayerEvent::Ended.name(), "ended");
    }
}
