// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use understory_viewport::{LayoutSnapshot, Target, in_viewport};
use understory_visibility::{
    EventKind, ListenerCapability, ListenerRegistry, WatchOptions, Watcher,
};

type BenchWatcher = Watcher<LayoutSnapshot<u32>, ListenerRegistry<u32>>;

/// A column of `n` 40px-tall elements, the first few on screen.
fn column(n: u32) -> LayoutSnapshot<u32> {
    let mut layout = LayoutSnapshot::new(Size::new(1024.0, 768.0));
    for i in 0..n {
        let top = f64::from(i) * 40.0;
        layout.insert_element(i, Rect::new(0.0, top, 1024.0, top + 40.0));
    }
    layout
}

fn watching(n: u32) -> BenchWatcher {
    let mut watcher = Watcher::new(
        column(n),
        ListenerRegistry::new(ListenerCapability::Modern),
    );
    for i in 0..n {
        watcher
            .watch(WatchOptions::new(Target::Node(i)))
            .expect("every column entry is an element");
    }
    // Consume the initial checks.
    watcher.advance_to(150);
    watcher
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_viewport");

    for &n in &[256_u32, 4_096_u32] {
        let layout = column(n);
        group.bench_function(format!("in_viewport_column(n={n})"), |b| {
            b.iter(|| {
                let inside = (0..n)
                    .filter(|&i| in_viewport(&layout, &Target::Node(i), 0.0))
                    .count();
                black_box(inside);
            });
        });
    }

    group.finish();
}

fn bench_visibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_visibility");
    group.sample_size(50);

    for &n in &[64_u32, 1_024_u32] {
        // Listener cost alone: every watch gets one flag write per event.
        group.bench_function(format!("scroll_storm_dispatch(n={n},events=100)"), |b| {
            b.iter_batched(
                || watching(n),
                |mut watcher| {
                    for e in 0..100_u32 {
                        watcher.events_mut().dispatch(EventKind::Scroll, &e);
                    }
                    black_box(watcher);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("scroll_storm_then_tick(n={n},events=100)"), |b| {
            b.iter_batched(
                || watching(n),
                |mut watcher| {
                    watcher.layout_mut().scroll_by(Vec2::new(0.0, 400.0));
                    for e in 0..100_u32 {
                        watcher.events_mut().dispatch(EventKind::Scroll, &e);
                    }
                    let fired = watcher.advance_to(300);
                    black_box(fired);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("quiet_ticks(n={n},ticks=10)"), |b| {
            b.iter_batched(
                || watching(n),
                |mut watcher| {
                    let fired = watcher.advance_to(150 * 11);
                    black_box(fired);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_viewport, bench_visibility);
criterion_main!(benches);
