// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_geometry::round_rect;
use kurbo::{Affine, BezPath, Point, Rect, Shape};
use peniko::Color;

use crate::{Handle, HandleLayout};

/// A rectangle to stroke, in canvas space, with an optional own rotation
/// about its centre.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayRect {
    /// Left.
    pub x1: f64,
    /// Top.
    pub y1: f64,
    /// Right.
    pub x2: f64,
    /// Bottom.
    pub y2: f64,
    /// Rotation about the centre, in degrees.
    pub rotate_deg: f64,
}

impl OverlayRect {
    /// An unrotated box covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            x1: rect.x0,
            y1: rect.y0,
            x2: rect.x1,
            y2: rect.y1,
            rotate_deg: 0.0,
        }
    }

    /// Returns a copy rotated by `degrees` about its centre.
    #[must_use]
    pub fn with_rotation(self, degrees: f64) -> Self {
        Self {
            rotate_deg: degrees,
            ..self
        }
    }

    /// The box as a normalized rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2, self.y2).abs()
    }
}

/// What a stroked box represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoxRole {
    /// One selected or target element.
    Element,
    /// The rubber band of a marquee gesture.
    Marquee,
    /// The outer bounding rectangle.
    Outer,
}

/// Colours and sizes of the overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Stroke of element boxes.
    pub element_color: Color,
    /// Stroke of the outer rectangle.
    pub outer_color: Color,
    /// Stroke and fill of the marquee.
    pub marquee_color: Color,
    /// Fill of handle squares.
    pub handle_fill: Color,
    /// Stroke of handle squares.
    pub handle_stroke: Color,
    /// Stroke width in canvas pixels.
    pub stroke_width: f64,
    /// Decimal digits kept when rounding box coordinates.
    pub precision: u32,
    /// Handle placement.
    pub handles: HandleLayout,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            element_color: Color::from_rgba8(0x1a, 0x73, 0xe8, 0x99),
            outer_color: Color::from_rgba8(0x1a, 0x73, 0xe8, 0xff),
            marquee_color: Color::from_rgba8(0x1a, 0x73, 0xe8, 0x66),
            handle_fill: Color::WHITE,
            handle_stroke: Color::from_rgba8(0x1a, 0x73, 0xe8, 0xff),
            stroke_width: 1.0,
            precision: 0,
            handles: HandleLayout::default(),
        }
    }
}

/// Everything the overlay needs to draw one frame.
#[derive(Clone, Debug)]
pub struct OverlayInput<'a> {
    /// Viewport rotation in degrees, applied to everything.
    pub canvas_rotate_deg: f64,
    /// Point the viewport rotation is about (canvas space).
    pub canvas_anchor: Point,
    /// Per-element boxes.
    pub boxes: &'a [OverlayRect],
    /// The marquee, if one is being dragged.
    pub marquee: Option<OverlayRect>,
    /// The outer rectangle, if anything is selected.
    pub outer: Option<OverlayRect>,
    /// Whether transform handles are drawn around `outer`.
    pub show_handles: bool,
    /// A handle to draw as pressed.
    pub active_handle: Option<Handle>,
}

/// One stroked rectangle of the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokedBox {
    /// What the box is.
    pub role: BoxRole,
    /// The rounded canvas rectangle before `transform`.
    pub rect: Rect,
    /// Canvas rotation followed by the box's own rotation.
    pub transform: Affine,
    /// Stroke colour.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

impl StrokedBox {
    /// Outline in screen space.
    #[must_use]
    pub fn path(&self) -> BezPath {
        self.transform * self.rect.to_path(0.1)
    }
}

/// One drawn handle.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleShape {
    /// Which handle.
    pub handle: Handle,
    /// Canvas square before `transform`.
    pub rect: Rect,
    /// The canvas rotation.
    pub transform: Affine,
    /// Drawn as pressed.
    pub active: bool,
}

/// Output of [`draw_overlay`]: the shapes of one overlay frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayScene {
    /// Stroked boxes, bottom to top.
    pub boxes: Vec<StrokedBox>,
    /// Handle squares, drawn above the boxes.
    pub handles: Vec<HandleShape>,
    /// Fill of handle squares.
    pub handle_fill: Option<Color>,
    /// Stroke of handle squares.
    pub handle_stroke: Option<Color>,
}

impl OverlayScene {
    /// Returns `true` if nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.handles.is_empty()
    }

    /// Boxes with the given role.
    pub fn boxes_with_role(&self, role: BoxRole) -> impl Iterator<Item = &StrokedBox> {
        self.boxes.iter().filter(move |b| b.role == role)
    }
}

/// Lays out one overlay frame.
///
/// Every rectangle is rotated by the canvas rotation about `canvas_anchor`,
/// then by its own `rotate_deg` about its centre. Handles follow the layout in
/// `style` and are hidden on tiny rectangles as [`HandleLayout`] describes.
#[must_use]
pub fn draw_overlay(input: &OverlayInput<'_>, style: &OverlayStyle) -> OverlayScene {
    let canvas = Affine::rotate_about(input.canvas_rotate_deg.to_radians(), input.canvas_anchor);
    let stroke = |role: BoxRole, r: &OverlayRect, color: Color| {
        let rect = round_rect(r.rect(), style.precision);
        StrokedBox {
            role,
            rect,
            transform: canvas * Affine::rotate_about(r.rotate_deg.to_radians(), rect.center()),
            color,
            width: style.stroke_width,
        }
    };

    let mut scene = OverlayScene::default();
    for r in input.boxes {
        scene
            .boxes
            .push(stroke(BoxRole::Element, r, style.element_color));
    }
    if let Some(outer) = &input.outer {
        scene
            .boxes
            .push(stroke(BoxRole::Outer, outer, style.outer_color));
        if input.show_handles {
            scene.handle_fill = Some(style.handle_fill);
            scene.handle_stroke = Some(style.handle_stroke);
            let rect = round_rect(outer.rect(), style.precision);
            scene.handles = style
                .handles
                .handles(rect)
                .into_iter()
                .map(|(handle, square)| HandleShape {
                    handle,
                    rect: square,
                    transform: canvas,
                    active: input.active_handle == Some(handle),
                })
                .collect();
        }
    }
    if let Some(marquee) = &input.marquee {
        scene
            .boxes
            .push(stroke(BoxRole::Marquee, marquee, style.marquee_color));
    }
    scene
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    fn input(boxes: &[OverlayRect]) -> OverlayInput<'_> {
        OverlayInput {
            canvas_rotate_deg: 0.0,
            canvas_anchor: Point::ZERO,
            boxes,
            marquee: None,
            outer: None,
            show_handles: true,
            active_handle: None,
        }
    }

    #[test]
    fn nothing_selected_draws_nothing() {
        assert!(draw_overlay(&input(&[]), &OverlayStyle::default()).is_empty());
    }

    #[test]
    fn coordinates_are_rounded() {
        let boxes = [OverlayRect::from_rect(Rect::new(0.4, 0.6, 10.49, 10.5))];
        let scene = draw_overlay(&input(&boxes), &OverlayStyle::default());
        assert_eq!(scene.boxes[0].rect, Rect::new(0.0, 1.0, 10.0, 11.0));
    }

    #[test]
    fn handles_need_outer_and_flag() {
        let mut inp = input(&[]);
        inp.outer = Some(OverlayRect::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let style = OverlayStyle::default();
        assert_eq!(draw_overlay(&inp, &style).handles.len(), 16);
        inp.show_handles = false;
        let scene = draw_overlay(&inp, &style);
        assert!(scene.handles.is_empty());
        assert_eq!(scene.boxes_with_role(BoxRole::Outer).count(), 1);
    }

    #[test]
    fn local_rotation_applies_about_the_centre() {
        let boxes = [OverlayRect::from_rect(Rect::new(0.0, 0.0, 20.0, 10.0)).with_rotation(90.0)];
        let scene = draw_overlay(&input(&boxes), &OverlayStyle::default());
        let centre = scene.boxes[0].transform * Point::new(10.0, 5.0);
        assert!((centre - Point::new(10.0, 5.0)).hypot() < 1e-9);
        let corner = scene.boxes[0].transform * Point::new(0.0, 0.0);
        assert!((corner - Point::new(15.0, -5.0)).hypot() < 1e-9);
    }
}
