// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_elements::ElementId;
use kurbo::Affine;

/// Notifications for collaborators outside the surface.
///
/// Collected while handling input and returned by
/// [`Surface::drain_events`](crate::Surface::drain_events) in the order they
/// happened.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// Text for the status bar.
    Status(String),
    /// The committed selection changed.
    SelectionChanged,
    /// The viewport moved; apply the new presentation transform.
    ViewportChanged(Affine),
    /// A move, resize, rotate, shear or insert finished and changed element
    /// geometry. Undo logs record a step here.
    GestureCommitted,
    /// The insert tool created an element.
    ElementInserted(ElementId),
    /// An element created by a cancelled insert was removed again.
    ElementRemoved(ElementId),
}
