// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Viewport: the translate/scale/rotate model of the editing surface.
//!
//! [`Viewport`] is a small, headless model of how the document plane is laid onto
//! the screen. It:
//! - Stores `translate`, `scale` (clamped) and `rotate` (degrees, normalized
//!   into `[0, 360)`), plus the last measured screen rectangle of the surface.
//! - Converts points and vectors between document, canvas and screen space.
//! - Implements zoom-to-fit, damped panning, and zoom/rotate about a pivot that
//!   stays visually fixed.
//! - Routes wheel input into zoom or pan ([`route_wheel`]).
//!
//! ## Coordinate frames
//!
//! - **Document**: element geometry.
//! - **Canvas**: screen pixels before the viewport rotation,
//!   `origin + translate + scale * document`.
//! - **Screen**: canvas rotated by `rotate` about `origin + translate`.
//!
//! Nothing here renders. After mutating a viewport, callers push
//! [`Viewport::presentation_transform`] to whatever displays the document.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use folio_viewport::Viewport;
//!
//! let mut view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! view.zoom_to_fit(Size::new(800.0, 600.0), Size::new(1600.0, 1200.0), 0.0);
//! assert_eq!(view.scale(), 0.5);
//!
//! let pivot = Point::new(400.0, 300.0);
//! let under_pivot = view.screen_to_document_point(pivot);
//! view.zoom(2.0, pivot);
//! let back = view.document_to_screen_point(under_pivot);
//! assert!((back - pivot).hypot() < 1e-9);
//! ```

mod viewport;
mod wheel;

pub use viewport::{MAX_SCALE, MIN_SCALE, Viewport, ViewportDebugInfo};
pub use wheel::{Modifiers, WheelAction, WheelInput, route_wheel};
