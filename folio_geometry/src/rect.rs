// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};

use crate::element_affine;

/// Rounds `value` half-up to `precision` decimal digits.
///
/// Ties round towards positive infinity (`-2.5` becomes `-2`), matching the
/// rounding used by browser canvas code.
#[must_use]
pub fn round(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    if !factor.is_finite() {
        return value;
    }
    (value * factor + 0.5).floor() / factor
}

/// Rounds every edge of `rect` with [`round`].
#[must_use]
pub fn round_rect(rect: Rect, precision: u32) -> Rect {
    Rect::new(
        round(rect.x0, precision),
        round(rect.y0, precision),
        round(rect.x1, precision),
        round(rect.y1, precision),
    )
}

/// Builds a normalized rectangle from two opposite corners given in any order.
#[must_use]
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Returns `true` if `inner` lies entirely inside `outer`, edges included.
#[must_use]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    let outer = outer.abs();
    let inner = inner.abs();
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Returns the union of all rectangles, or `None` for an empty input.
#[must_use]
pub fn union_all<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().reduce(|acc, rect| acc.union(rect))
}

/// Axis-aligned bounding box of `rect` after applying `transform`.
#[must_use]
pub fn transformed_bbox(transform: Affine, rect: Rect) -> Rect {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
    .map(|pt| transform * pt);
    let mut bbox = Rect::from_points(corners[0], corners[1]);
    bbox = bbox.union_pt(corners[2]);
    bbox.union_pt(corners[3])
}

/// Axis-aligned bounds of an element box in the frame reached through `to_frame`.
///
/// `transform` and `size` are the element's own matrix and dimensions; see
/// [`element_affine`].
#[must_use]
pub fn element_bounds(to_frame: Affine, transform: Affine, size: Size) -> Rect {
    transformed_bbox(
        to_frame * element_affine(transform, size),
        Rect::from_origin_size(Point::ZERO, size),
    )
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_4;

    use super::*;

    #[test]
    fn round_is_half_up() {
        assert_eq!(round(1.005, 1), 1.0);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(0.125, 2), 0.13);
    }

    #[test]
    fn containment_includes_edges_and_rejects_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(contains_rect(outer, Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(contains_rect(outer, Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!contains_rect(outer, Rect::new(90.0, 10.0, 110.0, 20.0)));
        // Reversed corners are normalized first.
        assert!(contains_rect(
            Rect::new(100.0, 100.0, 0.0, 0.0),
            Rect::new(20.0, 20.0, 10.0, 10.0)
        ));
    }

    #[test]
    fn union_all_of_nothing_is_none() {
        assert_eq!(union_all(core::iter::empty()), None);
        let u = union_all([
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(5.0, -2.0, 6.0, 0.0),
        ]);
        assert_eq!(u, Some(Rect::new(0.0, -2.0, 6.0, 1.0)));
    }

    #[test]
    fn rotated_element_bounds_grow() {
        let size = Size::new(10.0, 10.0);
        let bounds = element_bounds(Affine::IDENTITY, Affine::rotate(FRAC_PI_4), size);
        let diagonal = 10.0 * core::f64::consts::SQRT_2;
        assert!((bounds.width() - diagonal).abs() < 1e-9);
        assert!((bounds.center().x - 5.0).abs() < 1e-9);
        assert!((bounds.center().y - 5.0).abs() < 1e-9);
    }
}
