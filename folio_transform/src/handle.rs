// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// Which dimensions a resize changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransformAxis {
    /// Width and height.
    Both,
    /// Width only.
    Horizontal,
    /// Height only.
    Vertical,
}

/// A resize handle position on the outer rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandleDirection {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Middle of the right edge.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Middle of the bottom edge.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the left edge.
    Left,
}

impl HandleDirection {
    /// All eight handles, clockwise from the top-left corner.
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    /// The four corners, clockwise from the top-left.
    pub const CORNERS: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Dimensions this handle changes.
    #[must_use]
    pub const fn axis(self) -> TransformAxis {
        match self {
            Self::Top | Self::Bottom => TransformAxis::Vertical,
            Self::Left | Self::Right => TransformAxis::Horizontal,
            _ => TransformAxis::Both,
        }
    }

    /// Returns `true` for the mid-edge handles.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Self::Top | Self::Right | Self::Bottom | Self::Left)
    }

    /// The handle on the other side of the rectangle.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::Top => Self::Bottom,
            Self::TopRight => Self::BottomLeft,
            Self::Right => Self::Left,
            Self::BottomRight => Self::TopLeft,
            Self::Bottom => Self::Top,
            Self::BottomLeft => Self::TopRight,
            Self::Left => Self::Right,
        }
    }

    /// Outward unit signs: `x` is `-1` on the left, `+1` on the right, `0` for
    /// top/bottom; likewise `y`.
    #[must_use]
    pub const fn signs(self) -> (i8, i8) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
            Self::Right => (1, 0),
            Self::BottomRight => (1, 1),
            Self::Bottom => (0, 1),
            Self::BottomLeft => (-1, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Where this handle sits on `rect`.
    #[must_use]
    pub fn point_on(self, rect: Rect) -> Point {
        let (sx, sy) = self.signs();
        let pick = |sign: i8, lo: f64, hi: f64| match sign {
            -1 => lo,
            1 => hi,
            _ => (lo + hi) * 0.5,
        };
        Point::new(pick(sx, rect.x0, rect.x1), pick(sy, rect.y0, rect.y1))
    }
}

/// The edge a shear handle belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShearEdge {
    /// Top edge: horizontal skew, bottom edge fixed.
    Top,
    /// Right edge: vertical skew, left edge fixed.
    Right,
    /// Bottom edge: horizontal skew, top edge fixed.
    Bottom,
    /// Left edge: vertical skew, right edge fixed.
    Left,
}

impl ShearEdge {
    /// All four edges, clockwise from the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The matching mid-edge resize handle, used for placement.
    #[must_use]
    pub const fn handle(self) -> HandleDirection {
        match self {
            Self::Top => HandleDirection::Top,
            Self::Right => HandleDirection::Right,
            Self::Bottom => HandleDirection::Bottom,
            Self::Left => HandleDirection::Left,
        }
    }
}

/// Where a rotation is centred.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotateMode {
    /// Rotate every element about the shared pivot.
    #[default]
    Group,
    /// Rotate every element about its own centre.
    Independent,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for dir in HandleDirection::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (sx, sy) = dir.signs();
            let (ox, oy) = dir.opposite().signs();
            assert_eq!((sx + ox, sy + oy), (0, 0), "{dir:?}");
        }
    }

    #[test]
    fn axes_follow_handle_kind() {
        assert_eq!(HandleDirection::TopRight.axis(), TransformAxis::Both);
        assert_eq!(HandleDirection::Left.axis(), TransformAxis::Horizontal);
        assert_eq!(HandleDirection::Bottom.axis(), TransformAxis::Vertical);
        assert!(HandleDirection::Bottom.is_edge());
        assert!(!HandleDirection::BottomLeft.is_edge());
    }

    #[test]
    fn handle_points_sit_on_the_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(HandleDirection::TopLeft.point_on(rect), Point::new(0.0, 0.0));
        assert_eq!(HandleDirection::Right.point_on(rect), Point::new(100.0, 20.0));
        assert_eq!(HandleDirection::Bottom.point_on(rect), Point::new(50.0, 40.0));
    }
}
