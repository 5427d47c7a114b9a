// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_elements::ElementFrame;
use folio_geometry::linear_part;
use folio_selection::TransformSnapshot;
use kurbo::{Affine, Rect, Size, Vec2};

/// Which axes a resize mirrored (the pointer crossed the opposite edge).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flip {
    /// Mirrored left/right.
    pub x: bool,
    /// Mirrored top/bottom.
    pub y: bool,
}

/// Policy for distributing a resize over several selected elements.
pub trait GroupResize {
    /// Computes the new frame of one element.
    ///
    /// `from` is the document-space outer rectangle at gesture start and `to` its
    /// normalized replacement.
    fn resize(&self, snapshot: &TransformSnapshot, from: Rect, to: Rect, flip: Flip)
    -> ElementFrame;
}

/// Keeps every element at the same fractional position inside the outer
/// rectangle, using the ratios captured in each [`TransformSnapshot`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ProportionalResize;

impl GroupResize for ProportionalResize {
    fn resize(
        &self,
        snapshot: &TransformSnapshot,
        _from: Rect,
        to: Rect,
        flip: Flip,
    ) -> ElementFrame {
        let r = snapshot.ratio;
        let (rx0, rx1) = if flip.x { (1.0 - r.x1, 1.0 - r.x0) } else { (r.x0, r.x1) };
        let (ry0, ry1) = if flip.y { (1.0 - r.y1, 1.0 - r.y0) } else { (r.y0, r.y1) };
        let target = Rect::new(
            to.x0 + rx0 * to.width(),
            to.y0 + ry0 * to.height(),
            to.x0 + rx1 * to.width(),
            to.y0 + ry1 * to.height(),
        );
        fit_frame(snapshot, target, flip)
    }
}

/// Fits an element into `target` (document space, normalized).
///
/// The element's size is scaled by how much its document bounds must grow, its
/// centre moves to the centre of `target`, and mirrored axes flip the linear
/// part. A zero-sized snapshot (a freshly inserted element) takes the size of
/// `target` directly.
#[must_use]
pub fn fit_frame(snapshot: &TransformSnapshot, target: Rect, flip: Flip) -> ElementFrame {
    let old = snapshot.document_bounds;
    let size = snapshot.frame.size;
    let scaled = |extent: f64, old_extent: f64, new_extent: f64| {
        if old_extent.abs() <= f64::EPSILON || extent.abs() <= f64::EPSILON {
            new_extent
        } else {
            extent * new_extent / old_extent
        }
    };
    let new_size = Size::new(
        scaled(size.width, old.width(), target.width()),
        scaled(size.height, old.height(), target.height()),
    );

    let mirror = Affine::scale_non_uniform(
        if flip.x { -1.0 } else { 1.0 },
        if flip.y { -1.0 } else { 1.0 },
    );
    let linear = linear_part(snapshot.frame.transform) * mirror;
    let position = target.center() - Vec2::new(new_size.width * 0.5, new_size.height * 0.5);
    ElementFrame {
        transform: linear.with_translation(position.to_vec2()),
        size: new_size,
    }
}
