// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `folio_elements` crate.
//!
//! These exercise the reference arena through the `ElementStore` trait, the way
//! the surface uses it.

use core::f64::consts::FRAC_PI_4;

use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
use folio_geometry::ParseMatrixError;
use kurbo::{Affine, Point, Rect, Size, Vec2};

fn boxed(x: f64, y: f64, w: f64, h: f64) -> ElementFrame {
    ElementFrame::new(Point::new(x, y), Size::new(w, h))
}

#[test]
fn translated_frames_move_only_the_translation() {
    let frame = boxed(10.0, 10.0, 100.0, 50.0);
    let moved = frame.translated(Vec2::new(20.0, -5.0));
    assert_eq!(moved.position(), Point::new(30.0, 5.0));
    assert_eq!(moved.size, frame.size);
    assert_eq!(moved.matrix_string(), "matrix(1, 0, 0, 1, 30, 5)");
}

#[test]
fn matrix_annotation_reads_back_into_a_frame() {
    let mut frame = boxed(0.0, 0.0, 40.0, 20.0);
    frame.transform = Affine::new([0.0, 1.0, -1.0, 0.0, 12.5, -3.0]);
    let text = frame.matrix_string();
    assert_eq!(
        ElementFrame::from_matrix_string(&text, frame.size),
        Ok(frame)
    );

    let plain = ElementFrame::from_matrix_string("none", Size::new(5.0, 5.0)).unwrap();
    assert_eq!(plain.position(), Point::ZERO);
    assert_eq!(
        ElementFrame::from_matrix_string("matrix(1, 0, 0, 1)", frame.size),
        Err(ParseMatrixError::WrongArity(4))
    );
}

#[test]
fn rotated_frames_hit_test_against_the_rotated_box() {
    let mut doc = ElementArena::new();
    let mut frame = boxed(0.0, 0.0, 100.0, 10.0);
    frame.transform = Affine::rotate(FRAC_PI_4);
    let id = doc.insert(ElementKind::Rectangle, frame);

    // The centre always hits; the unrotated far corner no longer does.
    assert_eq!(doc.hit_test(Point::new(50.0, 5.0)).as_slice(), &[id]);
    assert!(doc.hit_test(Point::new(99.0, 9.0)).is_empty());
}

#[test]
fn singular_frames_never_hit() {
    let mut doc = ElementArena::new();
    let mut frame = boxed(0.0, 0.0, 10.0, 10.0);
    frame.transform = Affine::scale_non_uniform(0.0, 1.0);
    doc.insert(ElementKind::Generic, frame);
    assert!(doc.hit_test(Point::new(5.0, 5.0)).is_empty());
}

#[test]
fn set_frame_is_visible_through_bounds() {
    let mut doc = ElementArena::new();
    let id = doc.insert(ElementKind::Image, boxed(0.0, 0.0, 10.0, 10.0));
    doc.set_frame(id, boxed(5.0, 5.0, 20.0, 30.0)).unwrap();
    assert_eq!(
        doc.frame(id).unwrap().document_bounds(),
        Rect::new(5.0, 5.0, 25.0, 35.0)
    );
}

#[test]
fn removing_keeps_stacking_order_of_the_rest() {
    let mut doc = ElementArena::new();
    let a = doc.insert(ElementKind::Rectangle, boxed(0.0, 0.0, 10.0, 10.0));
    let b = doc.insert(ElementKind::Rectangle, boxed(0.0, 0.0, 10.0, 10.0));
    let c = doc.insert(ElementKind::Rectangle, boxed(0.0, 0.0, 10.0, 10.0));
    assert!(doc.remove(b));
    assert_eq!(doc.ids(), vec![a, c]);
    let d = doc.insert(ElementKind::TextFrame, boxed(0.0, 0.0, 10.0, 10.0));
    assert_eq!(doc.hit_test(Point::new(1.0, 1.0)).as_slice(), &[d, c, a]);
    assert_eq!(doc.label(d), Some("Text frame"));
}
