// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `folio_overlay` crate.
//!
//! These check how the overlay composes the viewport rotation with per-box
//! rotation, and how handle visibility tracks the outer rectangle size.

use folio_overlay::{
    BoxRole, Handle, HandleLayout, OverlayInput, OverlayRect, OverlayStyle, draw_overlay,
};
use folio_transform::{HandleDirection, ShearEdge};
use kurbo::{Point, Rect, Shape};

fn outer_input(outer: Rect, rotate: f64) -> OverlayInput<'static> {
    OverlayInput {
        canvas_rotate_deg: rotate,
        canvas_anchor: Point::new(100.0, 100.0),
        boxes: &[],
        marquee: None,
        outer: Some(OverlayRect::from_rect(outer)),
        show_handles: true,
        active_handle: Some(Handle::Resize(HandleDirection::Right)),
    }
}

#[test]
fn canvas_rotation_applies_to_boxes_and_handles() {
    let scene = draw_overlay(
        &outer_input(Rect::new(100.0, 100.0, 200.0, 150.0), 90.0),
        &OverlayStyle::default(),
    );
    let outer = scene.boxes_with_role(BoxRole::Outer).next().unwrap();
    // (200, 100) rotates a quarter turn about (100, 100).
    let corner = outer.transform * Point::new(200.0, 100.0);
    assert!((corner - Point::new(100.0, 200.0)).hypot() < 1e-9);
    assert!(scene.handles.iter().all(|h| h.transform == outer.transform));
    let bbox = outer.path().bounding_box();
    assert!((bbox.width() - 50.0).abs() < 1e-9);
}

#[test]
fn active_handle_is_marked() {
    let scene = draw_overlay(
        &outer_input(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0),
        &OverlayStyle::default(),
    );
    let active: Vec<_> = scene.handles.iter().filter(|h| h.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].handle, Handle::Resize(HandleDirection::Right));
    assert!(scene.handle_fill.is_some());
}

#[test]
fn tiny_selection_keeps_only_corner_and_rotate_handles() {
    let scene = draw_overlay(
        &outer_input(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0),
        &OverlayStyle::default(),
    );
    assert_eq!(scene.handles.len(), 8);
    assert!(
        scene
            .handles
            .iter()
            .all(|h| !matches!(h.handle, Handle::Shear(_)))
    );
}

#[test]
fn marquee_is_drawn_last() {
    let boxes = [OverlayRect::from_rect(Rect::new(0.0, 0.0, 5.0, 5.0))];
    let scene = draw_overlay(
        &OverlayInput {
            canvas_rotate_deg: 0.0,
            canvas_anchor: Point::ZERO,
            boxes: &boxes,
            marquee: Some(OverlayRect::from_rect(Rect::new(50.0, 50.0, -10.0, -10.0))),
            outer: None,
            show_handles: true,
            active_handle: None,
        },
        &OverlayStyle::default(),
    );
    assert_eq!(scene.boxes.len(), 2);
    assert_eq!(scene.boxes[1].role, BoxRole::Marquee);
    assert_eq!(scene.boxes[1].rect, Rect::new(-10.0, -10.0, 50.0, 50.0));
    assert!(scene.handles.is_empty());
}

#[test]
fn hit_order_is_resize_rotate_shear() {
    let layout = HandleLayout::default();
    let outer = Rect::new(0.0, 0.0, 200.0, 100.0);
    assert_eq!(
        layout.hit(outer, Point::new(200.0, 100.0)),
        Some(Handle::Resize(HandleDirection::BottomRight))
    );
    assert_eq!(
        layout.hit(outer, Point::new(214.0, 114.0)),
        Some(Handle::Rotate(HandleDirection::BottomRight))
    );
    assert_eq!(
        layout.hit(outer, Point::new(-12.0, 50.0)),
        Some(Handle::Shear(ShearEdge::Left))
    );
    assert_eq!(layout.hit(outer, Point::new(100.0, 50.0)), None);
}
