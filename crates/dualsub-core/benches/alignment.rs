//! Parse and alignment benchmarks
//!
//! Measures a full-length film's worth of captions through the parser and the
//! greedy aligner.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dualsub_core::{align, parse, Entry, PlaybackSession, Track};

fn synthetic_srt(count: usize, offset_ms: u64) -> String {
    let mut out = String::new();
    for i in 0..count {
        let start = i as u64 * 3_000 + offset_ms;
        let end = start + 2_400;
        out.push_str(&format!(
            "{}\n{:02}:{:02}:{:02},{:03} --> {:02}:{:02}:{:02},{:03}\nCaption number {i}\nsecond line\n\n",
            i + 1,
            start / 3_600_000,
            start / 60_000 % 60,
            start / 1000 % 60,
            start % 1000,
            end / 3_600_000,
            end / 60_000 % 60,
            end / 1000 % 60,
            end % 1000,
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for count in [100usize, 1_000, 2_000] {
        let srt = synthetic_srt(count, 0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &srt, |b, srt| {
            b.iter(|| parse(black_box(srt)));
        });
    }
    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    for count in [100usize, 1_000, 2_000] {
        let primary: Vec<Entry> = parse(&synthetic_srt(count, 0));
        let secondary: Vec<Entry> = parse(&synthetic_srt(count, 250));
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &(primary, secondary),
            |b, (primary, secondary)| {
                b.iter(|| align(black_box(primary), black_box(secondary)));
            },
        );
    }
    group.finish();
}

fn bench_ticks(c: &mut Criterion) {
    let mut session = PlaybackSession::default();
    session
        .load_track(Track::Primary, &synthetic_srt(2_000, 0))
        .expect("synthetic primary track parses");
    session
        .load_track(Track::Secondary, &synthetic_srt(2_000, 250))
        .expect("synthetic secondary track parses");

    c.bench_function("tick_resolution", |b| {
        let mut time = 0.0;
        b.iter(|| {
            time = (time + 0.1) % 6_000.0;
            black_box(session.on_time_update(black_box(time)))
        });
    });
}

criterion_group!(benches, bench_parse, bench_align, bench_ticks);
criterion_main!(benches);
