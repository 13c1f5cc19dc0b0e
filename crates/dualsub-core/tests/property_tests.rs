//! Property-based tests for dualsub-core
//!
//! Uses proptest to check the parser, aligner and resolver invariants over
//! generated tracks.

use dualsub_core::*;
use proptest::prelude::*;
use std::collections::HashSet;

/// Generate an entry with start in [0, 600) and a duration that may be
/// negative, so inverted timings are exercised too
fn arb_entry() -> impl Strategy<Value = (u32, i32, String)> {
    (0u32..600_000, -2_000i32..8_000, "[a-zA-Z ]{1,20}")
}

fn srt_time(millis: i64) -> String {
    let millis = millis.max(0);
    format!(
        "{:02}:{:02}:{:02},{:03}",
        millis / 3_600_000,
        millis / 60_000 % 60,
        millis / 1000 % 60,
        millis % 1000
    )
}

fn to_srt(entries: &[(u32, i32, String)]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, (start, duration, text))| {
            let start = i64::from(*start);
            let end = start + i64::from(*duration);
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                srt_time(start),
                srt_time(end),
                text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn arb_track(max: usize) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec((0u32..120_000, 100u32..6_000), 0..max).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (start, duration))| {
                let start = f64::from(start) / 1000.0;
                let end = start + f64::from(duration) / 1000.0;
                Entry::new(start, end, format!("t{i}"))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn parse_is_sorted_and_bounded(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let srt = to_srt(&entries);
        let parsed = parse_detailed(&srt);

        prop_assert!(parsed.entries.len() <= entries.len());
        prop_assert_eq!(parsed.block_count(), entries.len());
        prop_assert!(parsed.entries.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn parse_never_panics(raw in ".{0,400}") {
        let entries = parse(&raw);
        prop_assert!(entries.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn alignment_is_one_to_one(primary in arb_track(30), secondary in arb_track(30)) {
        let pairs = align(&primary, &secondary);

        prop_assert_eq!(pairs.len(), primary.len());
        let mut used = HashSet::new();
        for (i, pair) in pairs.iter().enumerate() {
            prop_assert_eq!(pair.index, i);
            prop_assert_eq!(&pair.primary_text, &primary[i].text);
            if pair.has_secondary() {
                prop_assert!(used.insert(pair.secondary_text.clone()));
                prop_assert!(pair.start <= primary[i].start);
                prop_assert!(pair.end >= primary[i].end);
            } else {
                prop_assert_eq!((pair.start, pair.end), (primary[i].start, primary[i].end));
            }
        }
    }

    #[test]
    fn history_never_exceeds_capacity(
        primary in arb_track(40),
        times in prop::collection::vec(0.0f64..130.0, 1..200),
        capacity in 1usize..12,
    ) {
        let secondary = primary.clone();
        let pairs = align(&primary, &secondary);
        let resolver = Resolver::default();
        let mut state = ActiveState::new(capacity);
        let tracks = Tracks { primary: &primary, secondary: &secondary, pairs: &pairs };

        for time in times {
            let before = state.active_index;
            let found = resolver.resolve(time, tracks, PresentationMode::DualColumn, &mut state);
            prop_assert!(state.history.len() <= capacity);

            if let Resolution::Aligned(Some(pair)) = found {
                prop_assert_eq!(state.active_index, Some(pair.index));
                if before != Some(pair.index) {
                    prop_assert_eq!(state.history.latest(), Some(pair.index));
                }
            } else {
                prop_assert_eq!(state.active_index, None);
            }
        }
    }
}
