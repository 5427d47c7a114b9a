// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel routing: decide whether a wheel event zooms or pans.
//!
//! | Modifiers / delta | Result |
//! |---|---|
//! | ctrl or meta held | zoom about the pointer |
//! | shift held, or a horizontal delta | horizontal pan |
//! | otherwise | vertical pan |

use kurbo::{Point, Vec2};

use crate::Viewport;

bitflags::bitflags! {
    /// Modifier keys relevant to the editing surface.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift: additive selection, horizontal wheel pan.
        const SHIFT = 0b0000_0001;
        /// Alt/Option: cycle selection.
        const ALT   = 0b0000_0010;
        /// Control: wheel zoom.
        const CTRL  = 0b0000_0100;
        /// Meta/Command: wheel zoom.
        const META  = 0b0000_1000;
        /// Space bar held: pan mode.
        const SPACE = 0b0001_0000;
    }
}

/// One wheel event, in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Pixel delta as reported by the platform (positive `y` scrolls down).
    pub delta: Vec2,
    /// Pointer position.
    pub position: Point,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
}

/// What a wheel event should do to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelAction {
    /// Multiply the scale, keeping `pivot` fixed on screen.
    Zoom {
        /// Scale multiplier, always positive.
        multiplier: f64,
        /// Screen-space pivot.
        pivot: Point,
    },
    /// Pan by a screen-space delta (damped like [`Viewport::pan`]).
    Pan(Vec2),
}

/// Maps a wheel event onto a viewport action.
///
/// `zoom_sensitivity` converts one pixel of vertical delta into a logarithmic
/// zoom step; scrolling down zooms out.
#[must_use]
pub fn route_wheel(input: &WheelInput, zoom_sensitivity: f64) -> WheelAction {
    if input
        .modifiers
        .intersects(Modifiers::CTRL | Modifiers::META)
    {
        let step = if input.delta.y != 0.0 {
            input.delta.y
        } else {
            input.delta.x
        };
        return WheelAction::Zoom {
            multiplier: (-step * zoom_sensitivity).exp(),
            pivot: input.position,
        };
    }
    if input.modifiers.contains(Modifiers::SHIFT) || input.delta.x != 0.0 {
        let dx = if input.delta.x != 0.0 {
            input.delta.x
        } else {
            input.delta.y
        };
        return WheelAction::Pan(Vec2::new(-dx, 0.0));
    }
    WheelAction::Pan(Vec2::new(0.0, -input.delta.y))
}

impl Viewport {
    /// Applies a routed wheel action.
    ///
    /// Returns the translation change for a pan, or `None` for a zoom (which
    /// cannot be reproduced on cached geometry by translation alone).
    pub fn apply_wheel(&mut self, action: WheelAction) -> Option<Vec2> {
        match action {
            WheelAction::Zoom { multiplier, pivot } => {
                self.zoom(multiplier, pivot);
                None
            }
            WheelAction::Pan(delta) => Some(self.pan(delta)),
        }
    }
}
