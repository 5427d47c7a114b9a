// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cursor_icon::CursorIcon;
use folio_transform::{HandleDirection, ShearEdge};
use kurbo::{Point, Rect, Vec2};

/// A transform handle around the outer rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Resize from a corner or mid-edge.
    Resize(HandleDirection),
    /// Rotate, placed diagonally outside a corner.
    Rotate(HandleDirection),
    /// Shear, placed outside a mid-edge.
    Shear(ShearEdge),
}

impl Handle {
    /// Cursor to show while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> CursorIcon {
        match self {
            Self::Resize(dir) => match dir {
                HandleDirection::TopLeft | HandleDirection::BottomRight => CursorIcon::NwseResize,
                HandleDirection::TopRight | HandleDirection::BottomLeft => CursorIcon::NeswResize,
                HandleDirection::Top | HandleDirection::Bottom => CursorIcon::NsResize,
                HandleDirection::Left | HandleDirection::Right => CursorIcon::EwResize,
            },
            Self::Rotate(_) => CursorIcon::Grab,
            Self::Shear(ShearEdge::Top | ShearEdge::Bottom) => CursorIcon::ColResize,
            Self::Shear(ShearEdge::Left | ShearEdge::Right) => CursorIcon::RowResize,
        }
    }
}

/// Placement of transform handles around an outer rectangle (canvas pixels).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandleLayout {
    /// Side length of every handle square.
    pub size: f64,
    /// Distance of rotate handles from their corner, along each axis.
    pub rotate_offset: f64,
    /// Distance of shear handles from their edge.
    pub shear_offset: f64,
    /// Below this width (height), the top/bottom (left/right) mid-edge handles
    /// are hidden.
    pub min_extent: f64,
}

impl Default for HandleLayout {
    fn default() -> Self {
        Self {
            size: 8.0,
            rotate_offset: 14.0,
            shear_offset: 12.0,
            min_extent: 20.0,
        }
    }
}

impl HandleLayout {
    /// Every visible handle and its hit rectangle, in hit-test order:
    /// resize, then rotate, then shear.
    #[must_use]
    pub fn handles(&self, outer: Rect) -> Vec<(Handle, Rect)> {
        let outer = outer.abs();
        let square = |centre: Point| Rect::from_center_size(centre, (self.size, self.size));
        let mut out = Vec::with_capacity(16);

        for dir in HandleDirection::ALL {
            if self.shows(dir, outer) {
                out.push((Handle::Resize(dir), square(dir.point_on(outer))));
            }
        }
        for dir in HandleDirection::CORNERS {
            let (sx, sy) = dir.signs();
            let offset = Vec2::new(f64::from(sx), f64::from(sy)) * self.rotate_offset;
            out.push((Handle::Rotate(dir), square(dir.point_on(outer) + offset)));
        }
        for edge in ShearEdge::ALL {
            let dir = edge.handle();
            if self.shows(dir, outer) {
                let (sx, sy) = dir.signs();
                let offset = Vec2::new(f64::from(sx), f64::from(sy)) * self.shear_offset;
                out.push((Handle::Shear(edge), square(dir.point_on(outer) + offset)));
            }
        }
        out
    }

    /// The first handle whose square contains `pt` (canvas space), edges included.
    #[must_use]
    pub fn hit(&self, outer: Rect, pt: Point) -> Option<Handle> {
        self.handles(outer)
            .into_iter()
            .find(|(_, rect)| {
                pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
            })
            .map(|(handle, _)| handle)
    }

    fn shows(&self, dir: HandleDirection, outer: Rect) -> bool {
        match dir {
            HandleDirection::Top | HandleDirection::Bottom => outer.width() >= self.min_extent,
            HandleDirection::Left | HandleDirection::Right => outer.height() >= self.min_extent,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    #[test]
    fn large_rect_has_sixteen_handles() {
        let handles = HandleLayout::default().handles(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(handles.len(), 16);
    }

    #[test]
    fn narrow_rect_hides_top_and_bottom_mid_handles() {
        let handles = HandleLayout::default().handles(Rect::new(0.0, 0.0, 10.0, 100.0));
        let kinds: Vec<_> = handles.iter().map(|(h, _)| *h).collect();
        assert!(!kinds.contains(&Handle::Resize(HandleDirection::Top)));
        assert!(!kinds.contains(&Handle::Shear(ShearEdge::Bottom)));
        assert!(kinds.contains(&Handle::Resize(HandleDirection::Left)));
        assert!(kinds.contains(&Handle::Resize(HandleDirection::TopLeft)));
    }

    #[test]
    fn hit_prefers_resize_over_rotate() {
        let layout = HandleLayout {
            rotate_offset: 2.0,
            ..HandleLayout::default()
        };
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            layout.hit(outer, Point::new(-1.0, -1.0)),
            Some(Handle::Resize(HandleDirection::TopLeft))
        );
        assert_eq!(
            layout.hit(outer, Point::new(-6.0, -6.0)),
            Some(Handle::Rotate(HandleDirection::TopLeft))
        );
        assert_eq!(layout.hit(outer, Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn shear_handles_sit_outside_edges() {
        let layout = HandleLayout::default();
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            layout.hit(outer, Point::new(50.0, 112.0)),
            Some(Handle::Shear(ShearEdge::Bottom))
        );
        assert_eq!(
            Handle::Shear(ShearEdge::Bottom).cursor(),
            cursor_icon::CursorIcon::ColResize
        );
    }
}
