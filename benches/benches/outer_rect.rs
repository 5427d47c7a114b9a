// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
use folio_selection::SelectionModel;
use folio_viewport::Viewport;
use kurbo::{Point, Rect, Size, Vec2};

/// A grid of `len` 20x20 elements on a 30px pitch.
fn grid(len: usize) -> ElementArena {
    let mut doc = ElementArena::new();
    let columns = (len as f64).sqrt().ceil() as usize;
    for i in 0..len {
        let x = (i % columns) as f64 * 30.0;
        let y = (i / columns) as f64 * 30.0;
        doc.insert(
            ElementKind::Rectangle,
            ElementFrame::new(Point::new(x, y), Size::new(20.0, 20.0)),
        );
    }
    doc
}

fn view() -> Viewport {
    Viewport::new(Rect::new(0.0, 0.0, 1920.0, 1080.0))
}

fn bench_marquee(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/marquee_update");

    // Boxes are cached once per gesture; each frame only filters the cache.
    for len in [256_usize, 1_024, 4_096] {
        let doc = grid(len);
        let view = view();
        let mut model = SelectionModel::new();
        model.cache_element_bounding_boxes(&doc, &view);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_function(BenchmarkId::new("frame", len), |b| {
            let mut grow = 0.0;
            b.iter(|| {
                grow = (grow + 7.0) % 2_000.0;
                black_box(model.marquee_update(Rect::new(-5.0, -5.0, grow, grow)));
            });
        });

        group.bench_function(BenchmarkId::new("cache", len), |b| {
            b.iter_batched(
                SelectionModel::new,
                |mut model| {
                    model.cache_element_bounding_boxes(&doc, &view);
                    black_box(model);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_outer_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/outer_rect");

    // Panning shifts the cache; zooming has to re-measure every element.
    for len in [64_usize, 512, 4_096] {
        let doc = grid(len);
        let view = view();
        let mut model = SelectionModel::new();
        model.select(&doc, &view, doc.ids(), false);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_function(BenchmarkId::new("translate_cache", len), |b| {
            b.iter(|| model.translate_cache(black_box(Vec2::new(1.0, -1.0))));
        });
        group.bench_function(BenchmarkId::new("remeasure", len), |b| {
            b.iter(|| model.remeasure(&doc, black_box(&view)));
        });
        group.bench_function(BenchmarkId::new("compute", len), |b| {
            b.iter(|| black_box(model.compute_outer_bounding_rect()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_marquee, bench_outer_rect);
criterion_main!(benches);
