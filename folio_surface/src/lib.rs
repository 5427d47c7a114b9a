// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Surface: the pointer gesture engine of the editing surface.
//!
//! [`Surface`] turns one stream of pointer, wheel and key input into
//! selection changes, element transforms and viewport motion:
//!
//! - Click selects; shift-click toggles; alt-click cycles through stacked
//!   elements under the pointer.
//! - Dragging a selected element past a small threshold moves the selection.
//! - Dragging over empty canvas draws a marquee that selects fully enclosed
//!   elements.
//! - Handles around the selection resize, rotate and shear it.
//! - Insert tools draw new elements.
//! - Space or middle-button drags pan; the wheel pans or zooms.
//! - Escape cancels the running gesture and restores everything it changed.
//!
//! The running gesture is a single tagged value, so two gestures can never be
//! active at once. [`Surface::gesture_flags`] exposes it as flags for callers
//! that want them.
//!
//! Time is supplied by the host: every pointer event carries `time_ms`, and
//! [`Surface::tick`] fires due timers. Tool and modifier state lives in an
//! [`InputContext`] that the host updates through [`Surface::sync_input`].
//! Notifications for the status bar, the presentation layer and the undo log
//! are collected as [`SurfaceEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use folio_elements::{ElementArena, ElementFrame, ElementKind, ElementStore};
//! use folio_surface::{PointerInput, Surface, SurfaceConfig, SurfaceEvent};
//!
//! let mut doc = ElementArena::new();
//! let id = doc.insert(
//!     ElementKind::Rectangle,
//!     ElementFrame::new(Point::new(10.0, 10.0), Size::new(100.0, 50.0)),
//! );
//! let mut surface = Surface::new(Rect::new(0.0, 0.0, 800.0, 600.0), SurfaceConfig::default())
//!     .unwrap();
//!
//! // Press inside the element, drag it by (20, -5), release.
//! surface.pointer_down(&doc, PointerInput::primary(Point::new(50.0, 30.0), 0));
//! surface.pointer_move(&mut doc, PointerInput::primary(Point::new(70.0, 25.0), 16));
//! surface.pointer_up(&doc, PointerInput::primary(Point::new(70.0, 25.0), 32));
//!
//! assert_eq!(doc.frame(id).unwrap().position(), Point::new(30.0, 5.0));
//! assert!(surface.drain_events().any(|e| e == SurfaceEvent::GestureCommitted));
//! ```

mod capture;
mod config;
mod events;
mod gesture;
mod input;
mod surface;
mod timer;

pub use capture::PointerCapture;
pub use config::{ConfigError, OverlayColors, SurfaceConfig};
pub use events::SurfaceEvent;
pub use gesture::{GestureFlags, GestureKind};
pub use input::{InputContext, Key, PointerButton, PointerInput, Tool};
pub use surface::Surface;

pub use folio_viewport::{Modifiers, WheelInput};
