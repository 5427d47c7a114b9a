// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Elements: handles and frames for selectable document content.
//!
//! The editing surface never owns document content. It refers to elements through
//! small copyable [`ElementId`] handles into a table that lives elsewhere, and it
//! reads and writes element geometry through the [`ElementStore`] trait. This keeps
//! the selection, overlay and gesture layers free of back-references to the
//! document model.
//!
//! - [`ElementId`]: generational handle; stale ids never alias a live element.
//! - [`ElementFrame`]: an element's own transform matrix plus its width/height.
//! - [`ElementStore`]: the seam the surface talks to.
//! - [`ElementArena`]: a reference store for hosts and tests.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
//!
//! let mut doc = ElementArena::new();
//! let a = doc.insert(ElementKind::Rectangle, ElementFrame::new(Point::new(0.0, 0.0), Size::new(50.0, 50.0)));
//! let b = doc.insert(ElementKind::TextFrame, ElementFrame::new(Point::new(25.0, 25.0), Size::new(50.0, 50.0)));
//!
//! // Hits are ordered topmost first.
//! assert_eq!(doc.hit_test(Point::new(30.0, 30.0)).as_slice(), &[b, a]);
//! ```

mod arena;
mod types;

pub use arena::ElementArena;
pub use types::{ElementFrame, ElementId, ElementKind, HitList, StaleElement};

use kurbo::Point;

/// Access to the externally owned element table.
///
/// Implementors own the elements; the surface only holds [`ElementId`]s. Reads of
/// stale ids return `None`, writes return [`StaleElement`].
pub trait ElementStore {
    /// Returns `true` if `id` refers to a live element.
    fn contains(&self, id: ElementId) -> bool;

    /// Returns the current frame of `id`.
    fn frame(&self, id: ElementId) -> Option<ElementFrame>;

    /// Replaces the frame of `id`.
    fn set_frame(&mut self, id: ElementId, frame: ElementFrame) -> Result<(), StaleElement>;

    /// Human-readable type label, used in status messages.
    fn label(&self, id: ElementId) -> Option<&str>;

    /// All selectable elements, bottom-most first.
    fn ids(&self) -> Vec<ElementId>;

    /// Creates a default-styled element of `kind` with the given frame, on top of
    /// every existing element.
    fn insert(&mut self, kind: ElementKind, frame: ElementFrame) -> ElementId;

    /// Removes `id`. Returns `false` if it was not live.
    fn remove(&mut self, id: ElementId) -> bool;

    /// All elements whose box contains the document-space point, topmost first.
    fn hit_test(&self, pt: Point) -> HitList {
        let mut hits = HitList::new();
        for id in self.ids().into_iter().rev() {
            if self
                .frame(id)
                .is_some_and(|frame| frame.contains_document_point(pt))
            {
                hits.push(id);
            }
        }
        hits
    }
}
