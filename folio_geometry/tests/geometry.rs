// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `folio_geometry` crate.
//!
//! These cover the matrix annotation format and the element placement model
//! that the selection and transform crates build on.

use core::f64::consts::FRAC_PI_2;

use folio_geometry::{
    ParseMatrixError, compose, decompose, element_affine, element_bounds, format_matrix,
    parse_matrix, round_rect,
};
use kurbo::{Affine, Point, Rect, Size, Vec2};

#[test]
fn compose_applies_right_operand_first() {
    let scale = Affine::scale(2.0);
    let shift = Affine::translate((10.0, 0.0));
    assert_eq!(compose(shift, scale) * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
    assert_eq!(compose(scale, shift) * Point::new(1.0, 1.0), Point::new(22.0, 2.0));
}

#[test]
fn decompose_reports_flip_and_rotation() {
    let flipped = Affine::new([-1.0, 0.0, 0.0, 1.0, 5.0, 6.0]);
    let parts = decompose(flipped);
    assert!(parts.is_flipped());
    assert_eq!(parts.scale_x, 1.0);
    assert_eq!(parts.translation(), Vec2::new(5.0, 6.0));

    let turned = decompose(Affine::rotate(FRAC_PI_2) * Affine::scale_non_uniform(2.0, 3.0));
    assert!(!turned.is_flipped());
    assert!((turned.rotate_deg - 90.0).abs() < 1e-9);
    assert!((turned.scale_x - 2.0).abs() < 1e-9);
    assert!((turned.scale_y - 3.0).abs() < 1e-9);
    assert!(turned.skew_x_deg.abs() < 1e-9);
}

#[test]
fn matrix_annotation_survives_formatting() {
    let m = Affine::new([0.5, -0.25, 1.0, 2.0, 30.0, -4.5]);
    let text = format_matrix(m);
    assert_eq!(text, "matrix(0.5, -0.25, 1, 2, 30, -4.5)");
    assert_eq!(parse_matrix(&text), Ok(m));
    assert_eq!(parse_matrix("none"), Ok(Affine::IDENTITY));
}

#[test]
fn malformed_matrix_annotations_are_rejected() {
    assert_eq!(parse_matrix("rotate(45deg)"), Err(ParseMatrixError::NotAMatrix));
    assert_eq!(
        parse_matrix("matrix(1, 0, 0, 1)"),
        Err(ParseMatrixError::WrongArity(4))
    );
    assert!(matches!(
        parse_matrix("matrix(1, 0, 0, x, 0, 0)"),
        Err(ParseMatrixError::InvalidNumber(_))
    ));
}

#[test]
fn rotation_is_about_the_box_centre() {
    let size = Size::new(100.0, 50.0);
    let placed = element_affine(
        Affine::rotate(FRAC_PI_2).then_translate(Vec2::new(10.0, 10.0)),
        size,
    );
    // The centre does not move.
    let centre = placed * Point::new(50.0, 25.0);
    assert!((centre - Point::new(60.0, 35.0)).hypot() < 1e-9);

    let bounds = element_bounds(
        Affine::IDENTITY,
        Affine::rotate(FRAC_PI_2).then_translate(Vec2::new(10.0, 10.0)),
        size,
    );
    let bounds = round_rect(bounds, 6);
    assert_eq!(bounds, Rect::new(35.0, -15.0, 85.0, 85.0));
}

#[test]
fn bounds_follow_the_outer_frame() {
    let bounds = element_bounds(
        Affine::translate((100.0, 0.0)) * Affine::scale(2.0),
        Affine::translate((10.0, 10.0)),
        Size::new(100.0, 50.0),
    );
    assert_eq!(bounds, Rect::new(120.0, 20.0, 320.0, 120.0));
}
