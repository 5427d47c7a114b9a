// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{ElementFrame, ElementId, ElementKind, ElementStore, StaleElement};

#[derive(Clone, Debug)]
struct Element {
    kind: ElementKind,
    label: String,
    frame: ElementFrame,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// A generational arena of elements with a stacking order.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`, or a freed slot is
///   reused with its generation incremented.
/// - New elements go on top of the stacking order.
/// - [`ElementStore::ids`] lists elements bottom-most first.
#[derive(Clone, Debug, Default)]
pub struct ElementArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    z_order: Vec<ElementId>,
}

impl ElementArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    /// Returns `true` if the arena holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// The kind of `id`, if live.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.get(id).map(|element| element.kind)
    }

    /// Overrides the status label of `id` (defaults to the kind label).
    pub fn set_label(
        &mut self,
        id: ElementId,
        label: impl Into<String>,
    ) -> Result<(), StaleElement> {
        let element = self.get_mut(id).ok_or(StaleElement(id))?;
        element.label = label.into();
        Ok(())
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.element.as_ref())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.element.as_mut())
    }
}

impl ElementStore for ElementArena {
    fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    fn frame(&self, id: ElementId) -> Option<ElementFrame> {
        self.get(id).map(|element| element.frame)
    }

    fn set_frame(&mut self, id: ElementId, frame: ElementFrame) -> Result<(), StaleElement> {
        let element = self.get_mut(id).ok_or(StaleElement(id))?;
        element.frame = frame;
        Ok(())
    }

    fn label(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|element| element.label.as_str())
    }

    fn ids(&self) -> Vec<ElementId> {
        self.z_order.clone()
    }

    fn insert(&mut self, kind: ElementKind, frame: ElementFrame) -> ElementId {
        let element = Element {
            kind,
            label: kind.label().to_owned(),
            frame,
        };
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.element = Some(element);
            ElementId(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                element: Some(element),
            });
            ElementId(idx, 1)
        };
        self.z_order.push(id);
        id
    }

    fn remove(&mut self, id: ElementId) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation() && slot.element.is_some())
        else {
            return false;
        };
        slot.element = None;
        self.free.push(id.slot());
        self.z_order.retain(|live| *live != id);
        true
    }
}
