// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for breakpoint-driven style resolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use understory_breakpoint::{LayoutConfig, Viewport};
use understory_flex::{LAYOUT_ALIGN, bind_input, register_builders};
use understory_marshal::{InlineStyles, StyleContext, StyleKey, StyleMarshaller};

type Marshaller = StyleMarshaller<u32>;

/// `count` elements with a responsive layout and alignment each.
///
/// `distinct` controls how many different alignment values are in use, and
/// so how many builder runs the cache can save.
fn populated(count: u32, distinct: u32) -> Marshaller {
    const ALIGNS: [&str; 4] = ["start stretch", "center center", "end", "space-between center"];
    let mut m = Marshaller::from_config(&LayoutConfig::default(), InlineStyles::new())
        .unwrap();
    register_builders(&mut m);
    for element in 0..count {
        let align = ALIGNS[(element % distinct) as usize % ALIGNS.len()];
        bind_input(&mut m, element, "fxLayout", "row wrap").unwrap();
        bind_input(&mut m, element, "fxLayout.lt-md", "column").unwrap();
        bind_input(&mut m, element, "fxLayoutAlign", align).unwrap();
        bind_input(&mut m, element, "fxLayoutAlign.gt-sm", "center stretch").unwrap();
        bind_input(&mut m, element, "fxHide.xs", "").unwrap();
    }
    m
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal/set_viewport");
    for count in [16_u32, 256, 1024] {
        group.bench_function(BenchmarkId::new("toggle", count), |b| {
            let mut m = populated(count, 4);
            let wide = Viewport::new(1440.0, 900.0);
            let narrow = Viewport::new(390.0, 844.0);
            m.set_viewport(wide);
            b.iter(|| {
                black_box(m.set_viewport(narrow));
                black_box(m.set_viewport(wide));
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("marshal/activate_only");
    group.bench_function("overlaps/256", |b| {
        let mut m = populated(256, 4);
        b.iter(|| {
            black_box(m.activate_only("md", true).unwrap());
            black_box(m.activate_only("xs", true).unwrap());
        });
    });
    group.finish();
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal/register");
    for distinct in [1_u32, 4] {
        group.bench_function(BenchmarkId::new("populate_256", distinct), |b| {
            b.iter(|| black_box(populated(256, distinct)));
        });
    }
    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal/cache");
    let m = populated(64, 4);
    let cx = StyleContext::new().with("layout", "row wrap");

    group.bench_function("hit", |b| {
        b.iter(|| black_box(m.cache().get(LAYOUT_ALIGN, "center center", &cx)));
    });

    const MISSING: StyleKey = StyleKey::new("missing");
    group.bench_function("miss", |b| {
        b.iter(|| black_box(m.cache().get(MISSING, "center center", &cx)));
    });
    group.finish();
}

criterion_group!(benches, bench_viewport, bench_register, bench_cache);
criterion_main!(benches);
