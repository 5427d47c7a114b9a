// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
use folio_surface::{Key, PointerInput, Surface, SurfaceConfig};
use kurbo::{Point, Rect, Size};

fn bench_drag_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface/drag_frame");

    for len in [16_usize, 256, 2_048] {
        let mut doc = ElementArena::new();
        for i in 0..len {
            let origin = Point::new((i % 64) as f64 * 12.0, (i / 64) as f64 * 12.0);
            doc.insert(
                ElementKind::Rectangle,
                ElementFrame::new(origin, Size::new(10.0, 10.0)),
            );
        }
        let viewport = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let Ok(mut surface) = Surface::new(viewport, SurfaceConfig::default()) else {
            return;
        };
        surface.select(&doc, doc.ids(), false);
        surface.pointer_down(&doc, PointerInput::primary(Point::new(5.0, 5.0), 0));
        group.throughput(Throughput::Elements(len as u64));

        // One pointer-move of a running drag: every selected frame is rewritten.
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            let mut x = 10.0;
            b.iter(|| {
                x = if x > 500.0 { 10.0 } else { x + 3.0 };
                surface.pointer_move(&mut doc, PointerInput::primary(Point::new(x, 5.0), 1));
                black_box(surface.overlay());
            });
        });

        surface.key_down(&mut doc, Key::Escape);
    }

    group.finish();
}

criterion_group!(benches, bench_drag_frame);
criterion_main!(benches);
