// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_elements::{ElementFrame, ElementId, ElementStore, HitList};
use folio_geometry::{contains_rect, decompose, element_bounds, union_all};
use folio_viewport::Viewport;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};

use crate::Selection;

/// Cached canvas-space geometry of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBox {
    /// Axis-aligned bounds, used for containment and the outer rectangle.
    pub bounds: Rect,
    /// The element box before its own rotation, centred where the element is.
    pub oriented: Rect,
    /// The element's own rotation in degrees.
    pub rotate_deg: f64,
}

impl ElementBox {
    /// Measures `frame` in the canvas space of `view`.
    #[must_use]
    pub fn measure(frame: &ElementFrame, view: &Viewport) -> Self {
        let to_canvas = view.document_to_canvas();
        let parts = decompose(frame.transform);
        let half = Point::new(frame.size.width * 0.5, frame.size.height * 0.5);
        let centre = to_canvas * (frame.document_affine() * half);
        let size = Size::new(
            frame.size.width * parts.scale_x * view.scale(),
            frame.size.height * parts.scale_y * view.scale(),
        );
        Self {
            bounds: element_bounds(to_canvas, frame.transform, frame.size),
            oriented: Rect::from_center_size(centre, size),
            rotate_deg: parts.rotate_deg,
        }
    }

    /// Returns a copy shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            bounds: self.bounds + delta,
            oriented: self.oriented + delta,
            rotate_deg: self.rotate_deg,
        }
    }
}

/// The outer bounding rectangle and the snapshot it is updated from.
///
/// `previous` is taken at gesture start; drags and resizes derive `current`
/// from it instead of re-measuring elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OuterRect {
    /// What the overlay draws.
    pub current: Rect,
    /// The value at the start of the running gesture.
    pub previous: Rect,
}

/// Pre-gesture state of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// Frame to restore on cancel.
    pub frame: ElementFrame,
    /// Document-space bounds at snapshot time.
    pub document_bounds: Rect,
    /// `document_bounds` as fractions of the snapshot outer rectangle
    /// (`x0`, `y0`, `x1`, `y1` each in `0..=1`).
    pub ratio: Rect,
}

/// Selection state of the editing surface.
///
/// Holds the committed [`Selection`], the tentative target elements of a running
/// marquee or insert gesture, a cache of canvas-space element boxes, per-element
/// transform snapshots, and the outer bounding rectangle.
///
/// The outer rectangle is `Some` exactly when selected or target elements exist,
/// and it is always the union of their cached boxes when recomputed.
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    selected: Selection<ElementId>,
    targets: Vec<ElementId>,
    boxes: HashMap<ElementId, ElementBox>,
    cache_order: Vec<ElementId>,
    snapshots: HashMap<ElementId, TransformSnapshot>,
    snapshot_bounds: Option<Rect>,
    outer: Option<OuterRect>,
}

impl SelectionModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed selection.
    #[must_use]
    pub fn selection(&self) -> &Selection<ElementId> {
        &self.selected
    }

    /// Committed elements in selection order.
    #[must_use]
    pub fn selected(&self) -> &[ElementId] {
        self.selected.items()
    }

    /// Tentative elements of a running marquee or insert gesture.
    #[must_use]
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Returns `true` when neither selected nor target elements exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.targets.is_empty()
    }

    /// Selected elements followed by targets that are not also selected.
    #[must_use]
    pub fn active(&self) -> Vec<ElementId> {
        let mut ids = self.selected.items().to_vec();
        ids.extend(self.targets.iter().filter(|id| !self.selected.contains(id)));
        ids
    }

    /// The outer bounding rectangle, in canvas space.
    #[must_use]
    pub fn outer(&self) -> Option<OuterRect> {
        self.outer
    }

    /// The cached box of `id`, if measured.
    #[must_use]
    pub fn element_box(&self, id: ElementId) -> Option<&ElementBox> {
        self.boxes.get(&id)
    }

    /// The transform snapshot of `id`, if captured.
    #[must_use]
    pub fn snapshot(&self, id: ElementId) -> Option<&TransformSnapshot> {
        self.snapshots.get(&id)
    }

    /// Document-space outer rectangle at snapshot time.
    #[must_use]
    pub fn snapshot_bounds(&self) -> Option<Rect> {
        self.snapshot_bounds
    }

    /// Applies a click or batch selection.
    ///
    /// With `additive`, each id is toggled; otherwise the selection is replaced.
    /// Stale ids are skipped. Returns `true` if the selection changed.
    pub fn select<S, I>(&mut self, store: &S, view: &Viewport, ids: I, additive: bool) -> bool
    where
        S: ElementStore + ?Sized,
        I: IntoIterator<Item = ElementId>,
    {
        let before = self.selected.revision();
        let live = ids.into_iter().filter(|id| store.contains(*id));
        if additive {
            for id in live {
                self.selected.toggle(id);
            }
        } else {
            self.selected.replace_with(live);
        }
        let changed = self.selected.revision() != before;
        if changed {
            tracing::debug!(count = self.selected.len(), additive, "selection changed");
        }
        self.refresh(store, view);
        changed
    }

    /// Clears selection and targets. Returns `true` if anything was cleared.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.is_empty();
        self.selected.clear();
        self.targets.clear();
        self.boxes.clear();
        self.cache_order.clear();
        self.snapshots.clear();
        self.snapshot_bounds = None;
        self.outer = None;
        had_any
    }

    /// Puts back a previously saved selection, dropping targets.
    pub fn restore_selection<S>(&mut self, store: &S, view: &Viewport, saved: Selection<ElementId>)
    where
        S: ElementStore + ?Sized,
    {
        self.selected = saved;
        self.targets.clear();
        self.refresh(store, view);
    }

    /// Every element under a screen point, topmost first.
    #[must_use]
    pub fn find_at_point<S>(&self, store: &S, view: &Viewport, screen: Point) -> HitList
    where
        S: ElementStore + ?Sized,
    {
        store.hit_test(view.screen_to_document_point(screen))
    }

    /// Measures every element once, ahead of a marquee gesture.
    pub fn cache_element_bounding_boxes<S>(&mut self, store: &S, view: &Viewport)
    where
        S: ElementStore + ?Sized,
    {
        self.boxes.clear();
        self.cache_order = store.ids();
        for &id in &self.cache_order {
            if let Some(frame) = store.frame(id) {
                self.boxes.insert(id, ElementBox::measure(&frame, view));
            }
        }
        tracing::trace!(count = self.boxes.len(), "element boxes cached");
    }

    /// Recomputes the targets as the cached elements fully inside `marquee`
    /// (canvas space), bottom-most first. Returns `true` if they changed.
    pub fn marquee_update(&mut self, marquee: Rect) -> bool {
        let targets: Vec<ElementId> = self
            .cache_order
            .iter()
            .copied()
            .filter(|id| {
                self.boxes
                    .get(id)
                    .is_some_and(|b| contains_rect(marquee, b.bounds))
            })
            .collect();
        if targets == self.targets {
            return false;
        }
        self.targets = targets;
        self.compute_outer_bounding_rect();
        true
    }

    /// Merges the targets into the selection. Returns `false` if there were none.
    pub fn marquee_commit<S>(&mut self, store: &S, view: &Viewport) -> bool
    where
        S: ElementStore + ?Sized,
    {
        if self.targets.is_empty() {
            return false;
        }
        let targets = core::mem::take(&mut self.targets);
        self.selected
            .extend_with(targets.into_iter().filter(|id| store.contains(*id)));
        self.refresh(store, view);
        true
    }

    /// Drops the targets and recomputes the outer rectangle.
    pub fn discard_targets(&mut self) {
        if self.targets.is_empty() {
            return;
        }
        self.targets.clear();
        self.compute_outer_bounding_rect();
    }

    /// Replaces the targets (for example a freshly inserted element) and measures them.
    pub fn set_targets<S>(&mut self, store: &S, view: &Viewport, ids: &[ElementId])
    where
        S: ElementStore + ?Sized,
    {
        self.targets = ids.iter().copied().filter(|id| store.contains(*id)).collect();
        self.measure_active(store, view);
        self.compute_outer_bounding_rect();
    }

    /// Union of the cached boxes of every active element.
    ///
    /// Resets both `current` and `previous` of the outer rectangle.
    pub fn compute_outer_bounding_rect(&mut self) -> Option<Rect> {
        let union = union_all(
            self.active()
                .into_iter()
                .filter_map(|id| self.boxes.get(&id).map(|b| b.bounds)),
        );
        self.outer = union.map(|rect| OuterRect {
            current: rect,
            previous: rect,
        });
        union
    }

    /// Re-measures the active elements and recomputes the outer rectangle.
    ///
    /// Used after zoom or when input settles, where translation alone cannot
    /// reproduce the new geometry.
    pub fn remeasure<S>(&mut self, store: &S, view: &Viewport)
    where
        S: ElementStore + ?Sized,
    {
        self.measure_active(store, view);
        self.compute_outer_bounding_rect();
    }

    /// Shifts every cached box and the outer rectangle by a canvas delta.
    pub fn translate_cache(&mut self, delta: Vec2) {
        for b in self.boxes.values_mut() {
            *b = b.translated(delta);
        }
        if let Some(outer) = &mut self.outer {
            outer.current = outer.current + delta;
            outer.previous = outer.previous + delta;
        }
    }

    /// Snapshots the outer rectangle as `previous`.
    pub fn begin_outer_gesture(&mut self) {
        if let Some(outer) = &mut self.outer {
            outer.previous = outer.current;
        }
    }

    /// Sets `current` to `previous` shifted by `delta`.
    pub fn offset_outer(&mut self, delta: Vec2) {
        if let Some(outer) = &mut self.outer {
            outer.current = outer.previous + delta;
        }
    }

    /// Sets `current` directly.
    pub fn set_outer_current(&mut self, rect: Rect) {
        if let Some(outer) = &mut self.outer {
            outer.current = rect;
        }
    }

    /// Resets `current` to `previous`.
    pub fn restore_outer(&mut self) {
        if let Some(outer) = &mut self.outer {
            outer.current = outer.previous;
        }
    }

    /// Records the frame, document bounds and outer-rectangle ratio of every
    /// active element.
    pub fn capture_snapshots<S>(&mut self, store: &S)
    where
        S: ElementStore + ?Sized,
    {
        self.snapshots.clear();
        let frames: Vec<(ElementId, ElementFrame)> = self
            .active()
            .into_iter()
            .filter_map(|id| store.frame(id).map(|frame| (id, frame)))
            .collect();
        self.snapshot_bounds = union_all(frames.iter().map(|(_, f)| f.document_bounds()));
        let Some(outer) = self.snapshot_bounds else {
            return;
        };
        for (id, frame) in frames {
            let document_bounds = frame.document_bounds();
            self.snapshots.insert(
                id,
                TransformSnapshot {
                    frame,
                    document_bounds,
                    ratio: ratio_within(outer, document_bounds),
                },
            );
        }
    }

    /// Writes every snapshot frame back into `store`. Returns how many were restored.
    pub fn restore_snapshots<S>(&self, store: &mut S) -> usize
    where
        S: ElementStore + ?Sized,
    {
        let mut restored = 0;
        for (&id, snapshot) in &self.snapshots {
            if store.set_frame(id, snapshot.frame).is_ok() {
                restored += 1;
            }
        }
        restored
    }

    /// Drops ids that are no longer live. Returns `true` if the selection changed.
    pub fn prune<S>(&mut self, store: &S, view: &Viewport) -> bool
    where
        S: ElementStore + ?Sized,
    {
        let before = self.selected.revision();
        let targets_before = self.targets.len();
        self.selected.retain(|id| store.contains(*id));
        self.targets.retain(|id| store.contains(*id));
        let changed = self.selected.revision() != before || self.targets.len() != targets_before;
        if changed {
            self.refresh(store, view);
        }
        changed
    }

    /// The element to select next when cycling through `candidates`
    /// (topmost first): the one after the first selected candidate, wrapping
    /// around, or the topmost candidate if none is selected.
    #[must_use]
    pub fn cycle_next(&self, candidates: &[ElementId]) -> Option<ElementId> {
        let current = candidates.iter().position(|id| self.selected.contains(id));
        match current {
            Some(idx) => candidates.get((idx + 1) % candidates.len()).copied(),
            None => candidates.first().copied(),
        }
    }

    /// Status-bar text describing the selection.
    #[must_use]
    pub fn status_text<S>(&self, store: &S) -> String
    where
        S: ElementStore + ?Sized,
    {
        match self.selected.items() {
            [] => "Nothing selected".to_owned(),
            [only] => format!(
                "1 element selected ({})",
                store.label(*only).unwrap_or("element")
            ),
            many => format!("{} elements selected", many.len()),
        }
    }

    fn refresh<S>(&mut self, store: &S, view: &Viewport)
    where
        S: ElementStore + ?Sized,
    {
        if self.is_empty() {
            self.clear();
            return;
        }
        let active = self.active();
        self.boxes.retain(|id, _| active.contains(id));
        self.cache_order.retain(|id| active.contains(id));
        self.capture_snapshots(store);
        self.measure_active(store, view);
        self.compute_outer_bounding_rect();
    }

    fn measure_active<S>(&mut self, store: &S, view: &Viewport)
    where
        S: ElementStore + ?Sized,
    {
        for id in self.active() {
            match store.frame(id) {
                Some(frame) => {
                    self.boxes.insert(id, ElementBox::measure(&frame, view));
                }
                None => {
                    self.boxes.remove(&id);
                }
            }
        }
    }
}

fn ratio_within(outer: Rect, inner: Rect) -> Rect {
    let fraction = |value: f64, start: f64, extent: f64| {
        if extent.abs() <= f64::EPSILON {
            0.0
        } else {
            (value - start) / extent
        }
    };
    Rect::new(
        fraction(inner.x0, outer.x0, outer.width()),
        fraction(inner.y0, outer.y0, outer.height()),
        fraction(inner.x1, outer.x0, outer.width()),
        fraction(inner.y1, outer.y0, outer.height()),
    )
}
