// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_elements::{ElementFrame, ElementId, ElementStore};
use folio_geometry::{element_bounds, linear_part, union_all};
use folio_selection::SelectionModel;
use folio_viewport::Viewport;
use kurbo::{Affine, Point, Rect, Vec2};

use crate::{Flip, GroupResize, HandleDirection, RotateMode, ShearEdge, TransformAxis, fit_frame};

/// A resize in progress, in canvas space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResizeGesture {
    /// The handle being dragged.
    pub direction: HandleDirection,
    /// Outer rectangle at gesture start.
    pub outer: Rect,
    /// Pointer travel since gesture start.
    pub delta: Vec2,
    /// Whether crossing the opposite edge mirrors the elements.
    pub allow_flip: bool,
}

impl ResizeGesture {
    /// Dimensions this gesture changes.
    #[must_use]
    pub fn axis(&self) -> TransformAxis {
        self.direction.axis()
    }

    /// The fixed corner and the dragged corner, in that order.
    ///
    /// Edge handles pin the dimension they do not change to the start rectangle.
    #[must_use]
    pub fn corners(&self) -> (Point, Point) {
        let anchor = self.direction.opposite().point_on(self.outer);
        let handle = self.direction.point_on(self.outer) + self.delta;
        match self.axis() {
            TransformAxis::Both => (anchor, handle),
            TransformAxis::Horizontal => (
                Point::new(anchor.x, self.outer.y0),
                Point::new(handle.x, self.outer.y1),
            ),
            TransformAxis::Vertical => (
                Point::new(self.outer.x0, anchor.y),
                Point::new(self.outer.x1, handle.y),
            ),
        }
    }

    /// Axes on which the dragged corner crossed the anchor.
    #[must_use]
    pub fn flip(&self) -> Flip {
        if !self.allow_flip {
            return Flip::default();
        }
        let (anchor, handle) = self.corners();
        let (sx, sy) = self.direction.signs();
        Flip {
            x: (handle.x - anchor.x) * f64::from(sx) < 0.0,
            y: (handle.y - anchor.y) * f64::from(sy) < 0.0,
        }
    }
}

/// Moves every active element by the document-space equivalent of the screen
/// travel `start -> end`, starting from their snapshots.
///
/// The outer rectangle becomes its `previous` value shifted by the canvas
/// delta. Returns the number of elements written.
pub fn move_elements<S>(
    store: &mut S,
    model: &mut SelectionModel,
    view: &Viewport,
    start: Point,
    end: Point,
) -> usize
where
    S: ElementStore + ?Sized,
{
    let screen_delta = end - start;
    let delta = view.screen_to_document_vec(screen_delta);
    let frames: Vec<_> = model
        .active()
        .into_iter()
        .filter_map(|id| model.snapshot(id).map(|s| (id, s.frame.translated(delta))))
        .collect();
    model.offset_outer(view.screen_to_canvas_vec(screen_delta));
    write_frames(store, frames)
}

/// Resizes the active elements into the rectangle spanned by `gesture`.
///
/// A single element is fitted directly; several go through `policy`. The outer
/// rectangle is set to the gesture rectangle. Returns the number of elements
/// written.
pub fn resize_elements<S, P>(
    store: &mut S,
    model: &mut SelectionModel,
    view: &Viewport,
    gesture: &ResizeGesture,
    policy: &P,
) -> usize
where
    S: ElementStore + ?Sized,
    P: GroupResize + ?Sized,
{
    let Some(from) = model.snapshot_bounds() else {
        return 0;
    };
    let (anchor, handle) = gesture.corners();
    let to_document = view.document_to_canvas().inverse();
    let to = Rect::from_points(to_document * anchor, to_document * handle);
    let flip = gesture.flip();

    let ids = model.active();
    let frames: Vec<_> = match ids.as_slice() {
        [only] => model
            .snapshot(*only)
            .map(|s| (*only, fit_frame(s, to, flip)))
            .into_iter()
            .collect(),
        _ => ids
            .iter()
            .filter_map(|&id| {
                model
                    .snapshot(id)
                    .map(|s| (id, policy.resize(s, from, to, flip)))
            })
            .collect(),
    };
    model.set_outer_current(Rect::from_points(anchor, handle));
    write_frames(store, frames)
}

/// Rotates the active elements by the angle swept from `start` to `end` around
/// `pivot` (all screen points). Returns that angle in degrees.
pub fn rotate_elements<S>(
    store: &mut S,
    model: &mut SelectionModel,
    view: &Viewport,
    pivot: Point,
    start: Point,
    end: Point,
    mode: RotateMode,
) -> f64
where
    S: ElementStore + ?Sized,
{
    let from = start - pivot;
    let to = end - pivot;
    if from.hypot2() <= f64::EPSILON || to.hypot2() <= f64::EPSILON {
        return 0.0;
    }
    let angle = to.atan2() - from.atan2();
    let rotation = Affine::rotate(angle);
    let about = Affine::rotate_about(angle, view.screen_to_document_point(pivot));

    let frames: Vec<_> = model
        .active()
        .into_iter()
        .filter_map(|id| {
            let snapshot = model.snapshot(id)?;
            let frame = snapshot.frame;
            let centre = frame_centre(&frame);
            let new_centre = match mode {
                RotateMode::Group => about * centre,
                RotateMode::Independent => centre,
            };
            Some((id, place(frame, rotation * linear_part(frame.transform), new_centre)))
        })
        .collect();
    apply_with_outer(store, model, view, frames);
    angle.to_degrees()
}

/// Skews the active elements along one axis, keeping the edge opposite to
/// `edge` of the outer rectangle fixed. The dragged edge follows the document
/// projection of `start -> end`. Returns the number of elements written.
pub fn shear_elements<S>(
    store: &mut S,
    model: &mut SelectionModel,
    view: &Viewport,
    edge: ShearEdge,
    start: Point,
    end: Point,
) -> usize
where
    S: ElementStore + ?Sized,
{
    let Some(bounds) = model.snapshot_bounds() else {
        return 0;
    };
    let drag = view.screen_to_document_vec(end - start);
    let opposite = edge.handle().opposite().point_on(bounds);
    let sign = match edge {
        ShearEdge::Top | ShearEdge::Left => -1.0,
        ShearEdge::Bottom | ShearEdge::Right => 1.0,
    };
    let skew = match edge {
        ShearEdge::Top | ShearEdge::Bottom => {
            let extent = sign * bounds.height();
            if extent.abs() <= f64::EPSILON {
                return 0;
            }
            Affine::new([1.0, 0.0, drag.x / extent, 1.0, 0.0, 0.0])
        }
        ShearEdge::Left | ShearEdge::Right => {
            let extent = sign * bounds.width();
            if extent.abs() <= f64::EPSILON {
                return 0;
            }
            Affine::new([1.0, drag.y / extent, 0.0, 1.0, 0.0, 0.0])
        }
    };
    let about =
        Affine::translate(opposite.to_vec2()) * skew * Affine::translate(-opposite.to_vec2());

    let frames: Vec<_> = model
        .active()
        .into_iter()
        .filter_map(|id| {
            let frame = model.snapshot(id)?.frame;
            let centre = frame_centre(&frame);
            Some((id, place(frame, skew * linear_part(frame.transform), about * centre)))
        })
        .collect();
    apply_with_outer(store, model, view, frames)
}

/// Document-space centre of an element box.
fn frame_centre(frame: &ElementFrame) -> Point {
    frame.document_affine() * Point::new(frame.size.width * 0.5, frame.size.height * 0.5)
}

/// A frame with the given linear part whose box is centred on `centre`.
fn place(frame: ElementFrame, linear: Affine, centre: Point) -> ElementFrame {
    let half = Vec2::new(frame.size.width * 0.5, frame.size.height * 0.5);
    ElementFrame {
        transform: linear.with_translation(centre.to_vec2() - half),
        size: frame.size,
    }
}

fn apply_with_outer<S>(
    store: &mut S,
    model: &mut SelectionModel,
    view: &Viewport,
    frames: Vec<(ElementId, ElementFrame)>,
) -> usize
where
    S: ElementStore + ?Sized,
{
    let to_canvas = view.document_to_canvas();
    if let Some(outer) = union_all(
        frames
            .iter()
            .map(|(_, f)| element_bounds(to_canvas, f.transform, f.size)),
    ) {
        model.set_outer_current(outer);
    }
    write_frames(store, frames)
}

fn write_frames<S>(store: &mut S, frames: Vec<(ElementId, ElementFrame)>) -> usize
where
    S: ElementStore + ?Sized,
{
    let mut written = 0;
    for (id, frame) in frames {
        match store.set_frame(id, frame) {
            Ok(()) => written += 1,
            Err(err) => tracing::trace!(%err, "transform skipped"),
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::*;

    fn gesture(direction: HandleDirection, delta: Vec2) -> ResizeGesture {
        ResizeGesture {
            direction,
            outer: Rect::new(0.0, 0.0, 50.0, 50.0),
            delta,
            allow_flip: true,
        }
    }

    #[test]
    fn corner_gesture_anchors_opposite_corner() {
        let g = gesture(HandleDirection::BottomRight, Vec2::new(30.0, 30.0));
        assert_eq!(g.corners(), (Point::new(0.0, 0.0), Point::new(80.0, 80.0)));
        let g = gesture(HandleDirection::TopLeft, Vec2::new(-5.0, 10.0));
        assert_eq!(g.corners(), (Point::new(50.0, 50.0), Point::new(-5.0, 10.0)));
    }

    #[test]
    fn edge_gestures_pin_the_other_axis() {
        let g = gesture(HandleDirection::Right, Vec2::new(10.0, 99.0));
        assert_eq!(g.corners(), (Point::new(0.0, 0.0), Point::new(60.0, 50.0)));
        let g = gesture(HandleDirection::Top, Vec2::new(99.0, -10.0));
        assert_eq!(g.corners(), (Point::new(0.0, 50.0), Point::new(50.0, -10.0)));
    }

    #[test]
    fn crossing_the_anchor_flips() {
        let g = gesture(HandleDirection::Right, Vec2::new(-70.0, 0.0));
        assert_eq!(g.flip(), Flip { x: true, y: false });
        let g = gesture(HandleDirection::TopLeft, Vec2::new(10.0, 80.0));
        assert_eq!(g.flip(), Flip { x: false, y: true });
        let g = ResizeGesture {
            allow_flip: false,
            ..gesture(HandleDirection::Right, Vec2::new(-70.0, 0.0))
        };
        assert_eq!(g.flip(), Flip::default());
    }
}
