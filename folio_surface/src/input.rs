// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary: tools, modifier state, pointer events and keys.

use folio_elements::ElementKind;
use folio_viewport::Modifiers;
use kurbo::Point;

/// The active editing tool, owned by the host's toolbar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Select and transform existing elements.
    #[default]
    Selection,
    /// Draw a new rectangle.
    Rectangle,
    /// Draw a new text frame.
    FrameText,
    /// Pan with the primary button.
    PanCanvas,
}

impl Tool {
    /// The element kind an insert tool creates, or `None` for other tools.
    #[must_use]
    pub const fn insert_kind(self) -> Option<ElementKind> {
        match self {
            Self::Rectangle => Some(ElementKind::Rectangle),
            Self::FrameText => Some(ElementKind::TextFrame),
            Self::Selection | Self::PanCanvas => None,
        }
    }
}

/// Live tool and modifier state.
///
/// The surface only reads it. Hosts write it through the setters from their
/// keybinding layer and hand the result to
/// [`Surface::sync_input`](crate::Surface::sync_input).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputContext {
    tool: Tool,
    modifiers: Modifiers,
}

impl InputContext {
    /// Selection tool, no modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Held modifiers.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Switches the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Replaces the held modifiers.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Presses or releases one modifier.
    pub fn set_modifier(&mut self, modifier: Modifiers, held: bool) {
        self.modifiers.set(modifier, held);
    }

    /// Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Space is held.
    #[must_use]
    pub fn space(&self) -> bool {
        self.modifiers.contains(Modifiers::SPACE)
    }
}

/// Mouse button or equivalent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button, pen contact, touch.
    Primary,
    /// Wheel button.
    Middle,
    /// Right button.
    Secondary,
}

/// One pointer event, in screen space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Platform pointer id.
    pub pointer_id: u64,
    /// Position.
    pub position: Point,
    /// Button pressed or released. Ignored on moves.
    pub button: PointerButton,
    /// Host clock, in milliseconds.
    pub time_ms: u64,
}

impl PointerInput {
    /// A primary-button event from pointer `1`.
    #[must_use]
    pub fn primary(position: Point, time_ms: u64) -> Self {
        Self {
            pointer_id: 1,
            position,
            button: PointerButton::Primary,
            time_ms,
        }
    }

    /// Returns a copy with a different button.
    #[must_use]
    pub fn with_button(self, button: PointerButton) -> Self {
        Self { button, ..self }
    }
}

/// Keys the surface reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Key {
    /// Cancel the running gesture, or clear the selection when idle.
    Escape,
}
