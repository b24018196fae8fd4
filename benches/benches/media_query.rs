// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for media-query parsing and evaluation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use understory_breakpoint::{DEFAULT_BREAKPOINTS, LayoutConfig, MediaQueryList, Viewport};
use understory_media::MediaObserver;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("breakpoint/parse");
    group.bench_function("range", |b| {
        b.iter(|| {
            black_box(MediaQueryList::parse(black_box(
                "screen and (min-width: 960px) and (max-width: 1279.98px)",
            )))
        });
    });
    group.bench_function("orientation_list", |b| {
        b.iter(|| {
            black_box(MediaQueryList::parse(black_box(
                "(orientation: portrait) and (max-width: 599.98px), \
                 (orientation: landscape) and (max-width: 959.98px)",
            )))
        });
    });
    group.bench_function("default_catalog", |b| {
        b.iter(|| black_box(LayoutConfig::default().build_registry()));
    });
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("breakpoint/evaluate");
    let queries: Vec<MediaQueryList> = DEFAULT_BREAKPOINTS
        .iter()
        .filter_map(|spec| MediaQueryList::parse(&spec.media_query).ok())
        .collect();
    let viewport = Viewport::new(1024.0, 768.0);
    group.bench_function("default_catalog", |b| {
        b.iter(|| {
            black_box(
                queries
                    .iter()
                    .filter(|query| query.matches(black_box(&viewport)))
                    .count(),
            )
        });
    });

    let config = LayoutConfig {
        add_orientation_breakpoints: true,
        ..LayoutConfig::default()
    };
    group.bench_function("observer_resize", |b| {
        let mut media = MediaObserver::from_config(&config).expect("catalog is valid");
        let a = Viewport::new(390.0, 844.0);
        let z = Viewport::new(1920.0, 1080.0);
        b.iter(|| {
            black_box(media.set_viewport(a));
            black_box(media.set_viewport(z));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate);
criterion_main!(benches);
