// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The running gesture as a single tagged value.

use folio_elements::{ElementId, ElementKind, HitList};
use folio_overlay::Handle;
use folio_selection::Selection;
use folio_transform::{HandleDirection, ShearEdge};
use kurbo::{Point, Rect};

use crate::timer::Timer;

bitflags::bitflags! {
    /// Flag view of the running gesture, for hosts and tests that think in
    /// terms of independent states.
    ///
    /// At most one bit of [`GestureFlags::EXCLUSIVE`] is ever set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureFlags: u16 {
        /// Dragging a marquee over the canvas.
        const MARQUEE_SELECTING = 1 << 0;
        /// A click selection waits for pointer-up.
        const DELAYED_SELECTING = 1 << 1;
        /// Pointer-up with alt held may still cycle through stacked elements.
        const READY_FOR_CYCLE   = 1 << 2;
        /// Drawing a new element.
        const INSERTING         = 1 << 3;
        /// Moving past the drag threshold will start a drag.
        const READY_TO_DRAG     = 1 << 4;
        /// Moving the selection.
        const DRAGGING          = 1 << 5;
        /// Resizing from a handle.
        const RESIZING          = 1 << 6;
        /// Rotating from a handle.
        const ROTATING          = 1 << 7;
        /// Shearing from a handle.
        const SHEARING          = 1 << 8;
        /// Panning the viewport.
        const PANNING           = 1 << 9;

        /// States of which at most one is active.
        const EXCLUSIVE = Self::MARQUEE_SELECTING.bits()
            | Self::INSERTING.bits()
            | Self::DRAGGING.bits()
            | Self::RESIZING.bits()
            | Self::ROTATING.bits()
            | Self::SHEARING.bits()
            | Self::PANNING.bits();
    }
}

/// Which gesture is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// No pointer is down, or the gesture was cancelled.
    Idle,
    /// A click that has not yet become a drag.
    Pending,
    /// Panning the viewport.
    Panning,
    /// Dragging a marquee.
    Marquee,
    /// Moving the selection.
    Dragging,
    /// Resizing the selection.
    Resizing,
    /// Rotating the selection.
    Rotating,
    /// Shearing the selection.
    Shearing,
    /// Drawing a new element.
    Inserting,
}

/// What a pending click does on pointer-up, unless it cycles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ClickAction {
    /// The click already selected (or kept) what it should.
    Nothing,
    /// Select the topmost candidate, or clear when there is none and the
    /// click is not additive.
    Select { additive: bool },
}

#[derive(Clone, Debug)]
pub(crate) struct PendingClick {
    /// Screen position of pointer-down.
    pub(crate) start: Point,
    /// Elements under `start`, topmost first.
    pub(crate) candidates: HitList,
    pub(crate) action: ClickAction,
    pub(crate) cycle_armed: bool,
    /// Disarms `cycle_armed` when it fires.
    pub(crate) timer: Timer,
    /// Selection before pointer-down, which may already have replaced it.
    pub(crate) prior: Selection<ElementId>,
}

#[derive(Clone, Debug)]
pub(crate) enum Gesture {
    Idle,
    Pending(PendingClick),
    Panning {
        last: Point,
        hid_boxes: bool,
    },
    Marquee {
        start: Point,
        end: Point,
        /// Selection before pointer-down cleared it.
        prior: Selection<ElementId>,
    },
    Dragging {
        start: Point,
    },
    Resizing {
        direction: HandleDirection,
        /// Canvas position of pointer-down.
        origin: Point,
        /// Outer rectangle at pointer-down.
        outer: Rect,
    },
    Rotating {
        /// Screen-space centre of the outer rectangle.
        pivot: Point,
        start: Point,
        corner: HandleDirection,
    },
    Shearing {
        edge: ShearEdge,
        start: Point,
    },
    Inserting {
        start: Point,
        /// Canvas position of pointer-down.
        origin: Point,
        kind: ElementKind,
        created: Option<ElementId>,
        prior: Selection<ElementId>,
    },
}

impl Gesture {
    pub(crate) fn kind(&self) -> GestureKind {
        match self {
            Self::Idle => GestureKind::Idle,
            Self::Pending(_) => GestureKind::Pending,
            Self::Panning { .. } => GestureKind::Panning,
            Self::Marquee { .. } => GestureKind::Marquee,
            Self::Dragging { .. } => GestureKind::Dragging,
            Self::Resizing { .. } => GestureKind::Resizing,
            Self::Rotating { .. } => GestureKind::Rotating,
            Self::Shearing { .. } => GestureKind::Shearing,
            Self::Inserting { .. } => GestureKind::Inserting,
        }
    }

    pub(crate) fn flags(&self) -> GestureFlags {
        match self {
            Self::Idle => GestureFlags::empty(),
            Self::Pending(click) => {
                let mut flags = GestureFlags::DELAYED_SELECTING | GestureFlags::READY_TO_DRAG;
                flags.set(GestureFlags::READY_FOR_CYCLE, click.cycle_armed);
                flags
            }
            Self::Panning { .. } => GestureFlags::PANNING,
            Self::Marquee { .. } => GestureFlags::MARQUEE_SELECTING,
            Self::Dragging { .. } => GestureFlags::DRAGGING,
            Self::Resizing { .. } => GestureFlags::RESIZING,
            Self::Rotating { .. } => GestureFlags::ROTATING,
            Self::Shearing { .. } => GestureFlags::SHEARING,
            Self::Inserting { .. } => GestureFlags::INSERTING,
        }
    }

    /// The handle held down by a transform gesture.
    pub(crate) fn active_handle(&self) -> Option<Handle> {
        match self {
            Self::Resizing { direction, .. } => Some(Handle::Resize(*direction)),
            Self::Rotating { corner, .. } => Some(Handle::Rotate(*corner)),
            Self::Shearing { edge, .. } => Some(Handle::Shear(*edge)),
            _ => None,
        }
    }

    /// Element geometry is being rewritten every frame.
    pub(crate) fn transforms(&self) -> bool {
        matches!(
            self,
            Self::Dragging { .. }
                | Self::Resizing { .. }
                | Self::Rotating { .. }
                | Self::Shearing { .. }
                | Self::Inserting { .. }
        )
    }

    /// Wheel input may pan or zoom.
    pub(crate) fn accepts_wheel(&self) -> bool {
        matches!(self, Self::Idle | Self::Panning { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gesture_sets_at_most_one_exclusive_flag() {
        let gestures = [
            Gesture::Idle,
            Gesture::Pending(PendingClick {
                start: Point::ZERO,
                candidates: HitList::new(),
                action: ClickAction::Nothing,
                cycle_armed: true,
                timer: Timer::default(),
                prior: Selection::new(),
            }),
            Gesture::Panning {
                last: Point::ZERO,
                hid_boxes: false,
            },
            Gesture::Dragging { start: Point::ZERO },
            Gesture::Shearing {
                edge: ShearEdge::Top,
                start: Point::ZERO,
            },
        ];
        for gesture in &gestures {
            let exclusive = gesture.flags() & GestureFlags::EXCLUSIVE;
            assert!(exclusive.bits().count_ones() <= 1, "{:?}", gesture.kind());
        }
        assert!(
            gestures[1]
                .flags()
                .contains(GestureFlags::DELAYED_SELECTING | GestureFlags::READY_FOR_CYCLE)
        );
    }

    #[test]
    fn only_idle_and_panning_take_wheel() {
        assert!(Gesture::Idle.accepts_wheel());
        assert!(
            Gesture::Panning {
                last: Point::ZERO,
                hid_boxes: true
            }
            .accepts_wheel()
        );
        assert!(!Gesture::Dragging { start: Point::ZERO }.accepts_wheel());
    }
}
