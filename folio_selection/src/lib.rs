// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Selection: what is selected on the editing surface, and where it is.
//!
//! Two layers:
//!
//! - [`Selection`]: an ordered, duplicate-free key set with a revision
//!   counter. Order is the order in which keys were picked.
//! - [`SelectionModel`]: the surface's selection state over
//!   [`ElementId`](folio_elements::ElementId)s. It adds tentative *targets*
//!   (marquee hits, a freshly inserted element), a cache of canvas-space element
//!   boxes, per-element transform snapshots for cancellation, and the *outer
//!   bounding rectangle* around everything selected.
//!
//! Element geometry is measured in batches: when the selection changes, before a
//! marquee ([`SelectionModel::cache_element_bounding_boxes`]), and after zoom.
//! Pointer-move frames only translate or replace the outer rectangle derived from
//! its `previous` snapshot.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
//! use folio_selection::SelectionModel;
//! use folio_viewport::Viewport;
//!
//! let mut doc = ElementArena::new();
//! let size = Size::new(20.0, 20.0);
//! let a = doc.insert(ElementKind::Rectangle, ElementFrame::new(Point::new(10.0, 10.0), size));
//! let b = doc.insert(ElementKind::Rectangle, ElementFrame::new(Point::new(200.0, 10.0), size));
//! let view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! let mut model = SelectionModel::new();
//! model.cache_element_bounding_boxes(&doc, &view);
//! model.marquee_update(Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(model.targets(), &[a]);
//! model.marquee_commit(&doc, &view);
//! assert_eq!(model.selected(), &[a]);
//! assert_eq!(model.outer().unwrap().current, Rect::new(10.0, 10.0, 30.0, 30.0));
//! # let _ = b;
//! ```

mod model;
mod selection;

pub use model::{ElementBox, OuterRect, SelectionModel, TransformSnapshot};
pub use selection::Selection;
