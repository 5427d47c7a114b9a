// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_geometry::transformed_bbox;
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Default lower bound for [`Viewport::scale`].
pub const MIN_SCALE: f64 = 0.01;
/// Default upper bound for [`Viewport::scale`].
pub const MAX_SCALE: f64 = 10.0;

/// Translate/scale/rotate of the document plane inside the editing surface.
///
/// All setters clamp or normalize their input instead of failing: scale stays in
/// the configured range, rotation stays in `[0, 360)`, and non-finite input is
/// ignored.
#[derive(Clone, Debug)]
pub struct Viewport {
    viewport_rect: Rect,
    translate: Vec2,
    rotate: f64,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    document_to_canvas: Affine,
    canvas_to_screen: Affine,
    document_to_screen: Affine,
    screen_to_document: Affine,
}

impl Viewport {
    /// Creates an identity viewport over `viewport_rect` (screen coordinates).
    #[must_use]
    pub fn new(viewport_rect: Rect) -> Self {
        let mut vp = Self {
            viewport_rect,
            translate: Vec2::ZERO,
            rotate: 0.0,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            document_to_canvas: Affine::IDENTITY,
            canvas_to_screen: Affine::IDENTITY,
            document_to_screen: Affine::IDENTITY,
            screen_to_document: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// The last measured screen rectangle of the surface.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        self.viewport_rect
    }

    /// Records a new screen rectangle for the surface.
    pub fn set_viewport_rect(&mut self, rect: Rect) {
        if self.viewport_rect == rect {
            return;
        }
        self.viewport_rect = rect;
        self.rebuild_transforms();
    }

    /// Current translation, in pixels relative to the surface origin.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Current rotation in degrees, always in `[0, 360)`.
    #[must_use]
    pub fn rotate(&self) -> f64 {
        self.rotate
    }

    /// Current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the translation directly.
    pub fn set_translate(&mut self, translate: Vec2) {
        if !translate.is_finite() || translate == self.translate {
            return;
        }
        self.translate = translate;
        self.rebuild_transforms();
    }

    /// Sets the scale, clamped into the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        let clamped = self.clamp_scale(scale);
        if clamped == self.scale {
            return;
        }
        self.scale = clamped;
        self.rebuild_transforms();
    }

    /// Sets the rotation in degrees; the value is normalized into `[0, 360)`.
    pub fn set_rotate(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            return;
        }
        self.rotate = normalize_degrees(degrees);
        self.rebuild_transforms();
    }

    /// Changes the scale range. The bounds are reordered if needed and the
    /// current scale is clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// The configured `(min, max)` scale range.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Fits `document_size` plus `margin` on every side into `viewport_size`.
    ///
    /// The scale is the smaller of the width and height ratios, the document is
    /// centered, and rotation is reset to zero. Degenerate sizes leave the
    /// viewport unchanged.
    pub fn zoom_to_fit(&mut self, viewport_size: Size, document_size: Size, margin: f64) {
        let padded = Size::new(
            document_size.width + 2.0 * margin,
            document_size.height + 2.0 * margin,
        );
        if !(viewport_size.width > 0.0
            && viewport_size.height > 0.0
            && padded.width > 0.0
            && padded.height > 0.0)
        {
            tracing::trace!(?viewport_size, ?document_size, "zoom_to_fit skipped");
            return;
        }

        let fit = (viewport_size.width / padded.width).min(viewport_size.height / padded.height);
        let scale = self.clamp_scale(fit);
        self.scale = scale;
        self.rotate = 0.0;
        self.translate = Vec2::new(
            (viewport_size.width - document_size.width * scale) * 0.5,
            (viewport_size.height - document_size.height * scale) * 0.5,
        );
        self.rebuild_transforms();
    }

    /// Damping divisor applied to panning deltas.
    ///
    /// Above 100% zoom panning slows down gently; below it the divisor stays
    /// close to one.
    #[must_use]
    pub fn pan_damping(&self) -> f64 {
        if self.scale >= 1.0 {
            self.scale.powf(0.05)
        } else {
            self.scale.powf(0.000_005)
        }
    }

    /// Pans by a screen-space pixel delta, divided by [`Viewport::pan_damping`].
    ///
    /// Returns the change actually applied to the translation. Canvas-space
    /// geometry (such as cached selection boxes) moves by exactly that amount.
    pub fn pan(&mut self, delta: Vec2) -> Vec2 {
        if !delta.is_finite() || delta == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let applied = delta / self.pan_damping();
        self.translate += applied;
        self.rebuild_transforms();
        applied
    }

    /// Multiplies the scale by `multiplier`, keeping the document point under
    /// `pivot` (screen space) at the same screen position.
    ///
    /// Returns `true` if the scale changed.
    pub fn zoom(&mut self, multiplier: f64, pivot: Point) -> bool {
        if !(multiplier.is_finite() && multiplier > 0.0) || !pivot.is_finite() {
            return false;
        }
        let old_scale = self.scale;
        let new_scale = self.clamp_scale(old_scale * multiplier);
        if new_scale == old_scale {
            return false;
        }
        // translate' = translate + R * pivot_doc * (old - new)
        let pivot_doc = self.screen_to_document_point(pivot).to_vec2();
        let rotation = Affine::rotate(self.rotate.to_radians());
        self.translate += (rotation * (pivot_doc * (old_scale - new_scale)).to_point()).to_vec2();
        self.scale = new_scale;
        self.rebuild_transforms();
        true
    }

    /// Adds `delta_deg` to the rotation, keeping the document point under
    /// `pivot` (screen space) at the same screen position.
    pub fn rotate_by(&mut self, delta_deg: f64, pivot: Point) {
        if !delta_deg.is_finite() || delta_deg == 0.0 || !pivot.is_finite() {
            return;
        }
        let pivot_doc = self.screen_to_document_point(pivot);
        let old = Affine::rotate(self.rotate.to_radians()) * Affine::scale(self.scale);
        self.rotate = normalize_degrees(self.rotate + delta_deg);
        let new = Affine::rotate(self.rotate.to_radians()) * Affine::scale(self.scale);
        self.translate += (old * pivot_doc) - (new * pivot_doc);
        self.rebuild_transforms();
    }

    /// Maps document space into canvas space (no rotation).
    #[must_use]
    pub fn document_to_canvas(&self) -> Affine {
        self.document_to_canvas
    }

    /// Maps canvas space into screen space (the viewport rotation).
    #[must_use]
    pub fn canvas_to_screen(&self) -> Affine {
        self.canvas_to_screen
    }

    /// Maps document space into screen space.
    #[must_use]
    pub fn document_to_screen(&self) -> Affine {
        self.document_to_screen
    }

    /// Maps screen space into document space.
    #[must_use]
    pub fn screen_to_document(&self) -> Affine {
        self.screen_to_document
    }

    /// Converts a screen point into document coordinates.
    #[must_use]
    pub fn screen_to_document_point(&self, pt: Point) -> Point {
        self.screen_to_document * pt
    }

    /// Converts a document point into screen coordinates.
    #[must_use]
    pub fn document_to_screen_point(&self, pt: Point) -> Point {
        self.document_to_screen * pt
    }

    /// Converts a screen point into canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas_point(&self, pt: Point) -> Point {
        self.canvas_to_screen.inverse() * pt
    }

    /// Converts a screen-space displacement into a document-space one.
    #[must_use]
    pub fn screen_to_document_vec(&self, v: Vec2) -> Vec2 {
        (self.screen_to_document.with_translation(Vec2::ZERO) * v.to_point()).to_vec2()
    }

    /// Converts a screen-space displacement into a canvas-space one.
    #[must_use]
    pub fn screen_to_canvas_vec(&self, v: Vec2) -> Vec2 {
        (Affine::rotate(-self.rotate.to_radians()) * v.to_point()).to_vec2()
    }

    /// The transform a presentation layer applies to the document, relative to
    /// the surface origin: translate, then rotate, then scale.
    #[must_use]
    pub fn presentation_transform(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotate.to_radians())
            * Affine::scale(self.scale)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            viewport_rect: self.viewport_rect,
            translate: self.translate,
            rotate: self.rotate,
            scale: self.scale,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            visible_document_rect: visible_document_rect(self),
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if !scale.is_finite() {
            return self.scale;
        }
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        if clamped != scale {
            tracing::trace!(requested = scale, clamped, "scale clamped");
        }
        clamped
    }

    fn rebuild_transforms(&mut self) {
        let anchor = self.viewport_rect.origin().to_vec2() + self.translate;
        self.document_to_canvas = Affine::translate(anchor) * Affine::scale(self.scale);
        self.canvas_to_screen = Affine::rotate_about(self.rotate.to_radians(), anchor.to_point());
        self.document_to_screen = self.canvas_to_screen * self.document_to_canvas;
        self.screen_to_document = self.document_to_screen.inverse();
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative input.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

fn visible_document_rect(vp: &Viewport) -> Rect {
    transformed_bbox(vp.screen_to_document, vp.viewport_rect)
}

/// Debug snapshot of a [`Viewport`].
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Screen rectangle of the surface.
    pub viewport_rect: Rect,
    /// Translation in pixels.
    pub translate: Vec2,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
    /// Document-space bounds of everything visible through the surface.
    pub visible_document_rect: Rect,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{MAX_SCALE, MIN_SCALE, Viewport};

    fn surface() -> Viewport {
        Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn zoom_to_fit_centers_and_resets_rotation() {
        let mut vp = surface();
        vp.set_rotate(45.0);
        vp.zoom_to_fit(Size::new(800.0, 600.0), Size::new(400.0, 400.0), 50.0);

        assert_eq!(vp.rotate(), 0.0);
        assert!((vp.scale() - 1.2).abs() < 1e-12);
        // Document centre lands on the viewport centre.
        let centre = vp.document_to_screen_point(Point::new(200.0, 200.0));
        assert!((centre - Point::new(400.0, 300.0)).hypot() < 1e-9);
    }

    #[test]
    fn zoom_to_fit_is_idempotent() {
        let mut vp = surface();
        vp.zoom_to_fit(Size::new(800.0, 600.0), Size::new(1280.0, 720.0), 20.0);
        let first = (vp.translate(), vp.scale(), vp.rotate());
        vp.zoom_to_fit(Size::new(800.0, 600.0), Size::new(1280.0, 720.0), 20.0);
        assert_eq!(first, (vp.translate(), vp.scale(), vp.rotate()));
    }

    #[test]
    fn zoom_to_fit_ignores_degenerate_sizes() {
        let mut vp = surface();
        vp.set_translate(Vec2::new(3.0, 4.0));
        vp.zoom_to_fit(Size::new(0.0, 600.0), Size::new(10.0, 10.0), 0.0);
        assert_eq!(vp.translate(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn scale_is_clamped() {
        let mut vp = surface();
        vp.set_scale(1000.0);
        assert_eq!(vp.scale(), MAX_SCALE);
        vp.zoom(1e-9, Point::ZERO);
        assert_eq!(vp.scale(), MIN_SCALE);
        vp.set_scale(f64::NAN);
        assert_eq!(vp.scale(), MIN_SCALE);
    }

    #[test]
    fn rotation_is_normalized() {
        let mut vp = surface();
        vp.set_rotate(-90.0);
        assert_eq!(vp.rotate(), 270.0);
        vp.set_rotate(720.0);
        assert_eq!(vp.rotate(), 0.0);
        vp.rotate_by(-1e-20, Point::ZERO);
        assert!(vp.rotate() < 360.0);
    }

    #[test]
    fn pan_is_exact_at_unit_scale_and_damped_when_zoomed_in() {
        let mut vp = surface();
        assert_eq!(vp.pan(Vec2::new(10.0, -4.0)), Vec2::new(10.0, -4.0));

        vp.set_scale(4.0);
        let applied = vp.pan(Vec2::new(10.0, 0.0));
        assert!(applied.x < 10.0);
        assert!((applied.x - 10.0 / 4.0_f64.powf(0.05)).abs() < 1e-12);
    }

    #[test]
    fn rotate_keeps_pivot_fixed() {
        let mut vp = surface();
        vp.set_scale(2.0);
        let pivot = Point::new(123.0, 456.0);
        let doc = vp.screen_to_document_point(pivot);
        vp.rotate_by(33.0, pivot);
        assert!((vp.document_to_screen_point(doc) - pivot).hypot() < 1e-9);
        assert_eq!(vp.rotate(), 33.0);
    }

    #[test]
    fn zoom_keeps_pivot_fixed_under_rotation() {
        let mut vp = Viewport::new(Rect::new(40.0, 30.0, 840.0, 630.0));
        vp.set_rotate(30.0);
        vp.set_translate(Vec2::new(-12.0, 7.5));
        let pivot = Point::new(300.0, 200.0);
        let doc = vp.screen_to_document_point(pivot);
        assert!(vp.zoom(1.7, pivot));
        assert!((vp.document_to_screen_point(doc) - pivot).hypot() < 1e-6);
    }

    #[test]
    fn canvas_and_screen_agree_without_rotation() {
        let mut vp = surface();
        vp.set_translate(Vec2::new(5.0, 5.0));
        let p = Point::new(50.0, 60.0);
        assert_eq!(vp.screen_to_canvas_point(p), p);
        assert_eq!(vp.screen_to_canvas_vec(Vec2::new(1.0, 2.0)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn debug_info_reports_visible_document() {
        let mut vp = surface();
        vp.set_scale(2.0);
        let info = vp.debug_info();
        assert_eq!(info.visible_document_rect, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(info.min_scale, MIN_SCALE);
    }
}
