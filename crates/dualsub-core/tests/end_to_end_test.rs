//! End-to-end playback scenarios
//!
//! Drives a session the way a player does: load tracks, tick, seek, switch
//! modes, reach the end.

use dualsub_core::*;
use pretty_assertions::assert_eq;
use tracing_subscriber::EnvFilter;

const ENGLISH: &str = "\u{FEFF}1\r\n00:00:00,000 --> 00:00:02,000\r\nHello\r\n\r\n\
2\r\n00:00:05,000 --> 00:00:07,000\r\nHow are\r\nyou?\r\n\r\n\
3\r\n00:00:10,000 --> 00:00:11,000\r\nFine\r\n";

const RUSSIAN: &str = "1\n00:00:00.5 --> 00:00:02.5\nПривет\n\n\
2\n00:00:05,10 --> 00:00:07,000\nКак дела?\n\n\
garbage block\n\n\
3\n00:00:20,000 --> 00:00:21,000\nНичего\n";

/// Route session logs to the test output; `RUST_LOG=dualsub_core=debug`
/// shows skipped blocks and transitions.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn session() -> PlaybackSession {
    init_tracing();
    let mut session = PlaybackSession::default();
    session.load_media();
    session.load_track(Track::Primary, ENGLISH).unwrap();
    session.load_track(Track::Secondary, RUSSIAN).unwrap();
    session
}

fn row(primary: &str, secondary: &str) -> Row {
    Row {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
    }
}

#[test]
fn single_pair_scenario() {
    init_tracing();
    let mut session = PlaybackSession::default();
    session
        .load_track(Track::Primary, "1\n00:00:00,000 --> 00:00:02,000\nHello\n")
        .unwrap();
    session
        .load_track(Track::Secondary, "1\n00:00:00,500 --> 00:00:02,500\nПривет\n")
        .unwrap();

    let pairs = session.pairs();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].secondary_text, "Привет");
    let overlap = Entry::new(0.0, 2.0, "").overlap(&Entry::new(0.5, 2.5, ""));
    assert!((overlap - 1.5).abs() < 1e-9);

    let frame = session.on_time_update(1.0);
    assert_eq!(frame.mode, PresentationMode::DualColumn);
    assert_eq!(
        frame.content,
        FrameContent::Columns {
            history: Vec::new(),
            current: Some(row("Hello", "Привет")),
        }
    );
    assert_eq!(session.active_index(), Some(0));
}

#[test]
fn load_reports_counts() {
    let mut session = PlaybackSession::default();
    let report = session.load_track(Track::Secondary, RUSSIAN).unwrap();
    assert_eq!(
        report,
        LoadReport {
            track: Track::Secondary,
            entries: 3,
            skipped: 1,
            pairs: 0,
        }
    );

    let report = session.load_track(Track::Primary, ENGLISH).unwrap();
    assert_eq!(report.entries, 3);
    assert_eq!(report.pairs, 3);
}

#[test]
fn pairs_follow_primary_track() {
    let session = session();
    let summary: Vec<(usize, &str, &str)> = session
        .pairs()
        .iter()
        .map(|p| (p.index, p.primary_text.as_str(), p.secondary_text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, "Hello", "Привет"),
            (1, "How are you?", "Как дела?"),
            (2, "Fine", ""),
        ]
    );
}

#[test]
fn playback_builds_scroll_back() {
    let mut session = session();

    let mut time = 0.0;
    while time < 12.0 {
        session.on_time_update(time);
        time += 0.1;
    }
    let last = session.on_time_update(12.0);
    assert_eq!(session.history().to_vec(), vec![0, 1, 2]);

    // 12s is past the last pair: history remains, nothing is current.
    assert_eq!(
        last.content,
        FrameContent::Columns {
            history: vec![row("Hello", "Привет"), row("How are you?", "Как дела?"), row("Fine", "")],
            current: None,
        }
    );

    // Re-entering the last pair after the gap is a new transition, so it is
    // pushed again and its earlier activation stays in the scroll-back.
    let frame = session.on_time_update(10.5);
    assert_eq!(session.history().to_vec(), vec![0, 1, 2, 2]);
    assert_eq!(
        frame.content,
        FrameContent::Columns {
            history: vec![row("Hello", "Привет"), row("How are you?", "Как дела?"), row("Fine", "")],
            current: Some(row("Fine", "")),
        }
    );
}

#[test]
fn mode_switch_mid_playback() {
    let mut session = session();
    session.on_time_update(1.0);
    session.on_time_update(6.0);
    assert_eq!(session.history().len(), 2);

    let frame = session.set_mode(PresentationMode::PrimaryOnly, 6.0);
    assert!(session.history().is_empty());
    assert_eq!(
        frame,
        RenderFrame {
            mode: PresentationMode::PrimaryOnly,
            content: FrameContent::Single {
                text: "How are you?".to_string()
            },
        }
    );

    // Back to dual-column: the first resolution starts a fresh history.
    let frame = session.set_mode(PresentationMode::DualColumn, 6.0);
    assert_eq!(session.history().to_vec(), vec![1]);
    assert_eq!(
        frame.content,
        FrameContent::Columns {
            history: Vec::new(),
            current: Some(row("How are you?", "Как дела?")),
        }
    );
}

#[test]
fn gaps_render_empty_outside_dual_column() {
    let mut session = session();
    session.set_mode(PresentationMode::Sequential, 0.0);
    assert!(session.on_time_update(3.5).is_empty());
    assert!(session.on_seek(30.0).is_empty());
}

#[test]
fn seek_and_end() {
    let mut session = session();
    assert!(session.handle(PlayerEvent::Play).is_none());
    session.handle(PlayerEvent::TimeUpdate { time: 1.0 });
    session.handle(PlayerEvent::TimeUpdate { time: 6.0 });

    let frame = session.handle(PlayerEvent::Seeked { time: 10.2 }).unwrap();
    assert_eq!(session.history().to_vec(), vec![2]);
    assert_eq!(
        frame.content,
        FrameContent::Columns {
            history: Vec::new(),
            current: Some(row("Fine", "")),
        }
    );

    let frame = session.handle(PlayerEvent::Ended).unwrap();
    assert!(frame.is_empty());
    assert!(!session.is_polling());
    assert_eq!(session.active_index(), None);
}

#[test]
fn history_capacity_is_configurable() {
    let config = SessionConfig::default().with_history_capacity(2);
    let mut session = PlaybackSession::new(config).unwrap();
    session.load_track(Track::Primary, ENGLISH).unwrap();
    session.load_track(Track::Secondary, RUSSIAN).unwrap();

    for time in [1.0, 6.0, 10.5] {
        session.on_time_update(time);
    }
    assert_eq!(session.history().to_vec(), vec![1, 2]);
}

#[test]
fn dictionary_style_decorator() {
    let highlight = |text: &str| {
        text.split(' ')
            .map(|word| {
                if word.eq_ignore_ascii_case("hello") {
                    format!("<mark>{word}</mark>")
                } else {
                    word.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mut session = session().with_decorator(highlight);
    session.set_mode(PresentationMode::Sequential, 0.0);
    let frame = session.on_time_update(1.0);
    assert_eq!(
        frame.content,
        FrameContent::Stacked {
            primary: Some("<mark>Hello</mark>".to_string()),
            secondary: Some("Привет".to_string()),
            divider: true,
        }
    );
}
