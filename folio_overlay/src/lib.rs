// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Overlay: selection boxes, marquee and transform handles.
//!
//! The overlay is stateless. [`draw_overlay`] turns a list of canvas-space
//! [`OverlayRect`]s plus the outer rectangle into an [`OverlayScene`] of stroked
//! boxes and handle squares, each carrying the transform a renderer applies:
//! the viewport rotation first, then the rectangle's own rotation about its
//! centre.
//!
//! Handles come from a [`HandleLayout`]: eight resize handles on the outer
//! rectangle, four rotate handles diagonally outside the corners and four shear
//! handles outside the mid-edges. Mid-edge handles disappear when the rectangle
//! is too small to hold them. [`HandleLayout::hit`] tests a canvas point against
//! them in the same order (resize, rotate, shear), and [`Handle::cursor`] picks
//! the matching [`CursorIcon`](cursor_icon::CursorIcon).
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use folio_overlay::{BoxRole, OverlayInput, OverlayRect, OverlayStyle, draw_overlay};
//!
//! let outer = OverlayRect::from_rect(Rect::new(10.0, 10.0, 110.0, 60.0));
//! let scene = draw_overlay(
//!     &OverlayInput {
//!         canvas_rotate_deg: 0.0,
//!         canvas_anchor: Point::ZERO,
//!         boxes: &[outer],
//!         marquee: None,
//!         outer: Some(outer),
//!         show_handles: true,
//!         active_handle: None,
//!     },
//!     &OverlayStyle::default(),
//! );
//! assert_eq!(scene.boxes_with_role(BoxRole::Outer).count(), 1);
//! assert_eq!(scene.handles.len(), 16);
//! ```

mod handle;
mod scene;

pub use handle::{Handle, HandleLayout};
pub use scene::{
    BoxRole, HandleShape, OverlayInput, OverlayRect, OverlayScene, OverlayStyle, StrokedBox,
    draw_overlay,
};
