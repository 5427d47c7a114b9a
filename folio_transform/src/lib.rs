// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Transform: write new element geometry for a running gesture.
//!
//! Every operation reads the pre-gesture [`TransformSnapshot`]s held by a
//! [`SelectionModel`] and writes fresh frames through an
//! [`ElementStore`](folio_elements::ElementStore). Repeated calls during one
//! gesture are therefore absolute, never cumulative, and cancelling is a matter of
//! writing the snapshots back.
//!
//! - [`move_elements`]: translate by the pointer travel.
//! - [`resize_elements`]: fit into the rectangle spanned by a [`ResizeGesture`];
//!   several elements are distributed by a [`GroupResize`] policy such as
//!   [`ProportionalResize`].
//! - [`rotate_elements`]: rotate by the angle swept around a pivot, in
//!   [`RotateMode::Group`] or [`RotateMode::Independent`].
//! - [`shear_elements`]: single-axis skew from a [`ShearEdge`].
//!
//! None of these decide which gesture is running; the caller does.
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
//! use folio_selection::SelectionModel;
//! use folio_transform::move_elements;
//! use folio_viewport::Viewport;
//!
//! let mut doc = ElementArena::new();
//! let id = doc.insert(ElementKind::Rectangle, ElementFrame::new(Point::new(10.0, 10.0), Size::new(100.0, 50.0)));
//! let view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut model = SelectionModel::new();
//! model.select(&doc, &view, [id], false);
//!
//! move_elements(&mut doc, &mut model, &view, Point::new(20.0, 20.0), Point::new(40.0, 15.0));
//! assert_eq!(doc.frame(id).unwrap().position(), Point::new(30.0, 5.0));
//! ```
//!
//! [`TransformSnapshot`]: folio_selection::TransformSnapshot
//! [`SelectionModel`]: folio_selection::SelectionModel

mod apply;
mod group;
mod handle;

pub use apply::{ResizeGesture, move_elements, resize_elements, rotate_elements, shear_elements};
pub use group::{Flip, GroupResize, ProportionalResize, fit_frame};
pub use handle::{HandleDirection, RotateMode, ShearEdge, TransformAxis};
