// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use cursor_icon::CursorIcon;
use folio_elements::{ElementFrame, ElementId, ElementKind, ElementStore};
use folio_overlay::{Handle, OverlayInput, OverlayRect, OverlayScene, OverlayStyle, draw_overlay};
use folio_selection::SelectionModel;
use folio_transform::{
    GroupResize, HandleDirection, ProportionalResize, ResizeGesture, RotateMode, move_elements,
    resize_elements, rotate_elements, shear_elements,
};
use folio_viewport::{Viewport, WheelInput, route_wheel};
use kurbo::{Point, Rect, Size};

use crate::capture::PointerCapture;
use crate::gesture::{ClickAction, Gesture, GestureFlags, GestureKind, PendingClick};
use crate::timer::Timer;
use crate::{
    ConfigError, InputContext, Key, PointerButton, PointerInput, SurfaceConfig, SurfaceEvent, Tool,
};

/// The interactive editing surface.
///
/// Owns the viewport, the selection model and the running gesture. Elements
/// stay in the host's [`ElementStore`], which every handler borrows for the
/// duration of one input event.
pub struct Surface {
    config: SurfaceConfig,
    style: OverlayStyle,
    input: InputContext,
    viewport: Viewport,
    model: SelectionModel,
    gesture: Gesture,
    capture: PointerCapture,
    /// Re-measures boxes once pan and zoom input goes quiet.
    settle: Timer,
    boxes_hidden: bool,
    cursor: CursorIcon,
    last_pointer: Option<Point>,
    events: Vec<SurfaceEvent>,
    group_resize: Box<dyn GroupResize>,
    rotate_mode: RotateMode,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .field("model", &self.model)
            .field("gesture", &self.gesture)
            .field("capture", &self.capture)
            .field("boxes_hidden", &self.boxes_hidden)
            .field("cursor", &self.cursor)
            .field("rotate_mode", &self.rotate_mode)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Mounts a surface over `viewport_rect` (screen space).
    pub fn new(viewport_rect: Rect, config: SurfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut viewport = Viewport::new(viewport_rect);
        viewport.set_scale_limits(config.min_scale, config.max_scale);
        Ok(Self {
            style: config.overlay_style(),
            rotate_mode: config.rotate_mode(),
            config,
            input: InputContext::new(),
            viewport,
            model: SelectionModel::new(),
            gesture: Gesture::Idle,
            capture: PointerCapture::default(),
            settle: Timer::default(),
            boxes_hidden: false,
            cursor: CursorIcon::Default,
            last_pointer: None,
            events: Vec::new(),
            group_resize: Box::new(ProportionalResize),
        })
    }

    /// The configuration the surface was mounted with.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The selection model.
    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.model
    }

    /// The last input context passed to [`Surface::sync_input`].
    #[must_use]
    pub fn input(&self) -> &InputContext {
        &self.input
    }

    /// Cursor to show over the surface.
    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// The running gesture.
    #[must_use]
    pub fn gesture_kind(&self) -> GestureKind {
        self.gesture.kind()
    }

    /// The running gesture as flags.
    #[must_use]
    pub fn gesture_flags(&self) -> GestureFlags {
        self.gesture.flags()
    }

    /// Returns `true` while selection boxes are hidden by a space or
    /// middle-button pan.
    #[must_use]
    pub fn boxes_hidden(&self) -> bool {
        self.boxes_hidden
    }

    /// Returns `true` while a re-measure after pan or zoom input is pending.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_armed()
    }

    /// Returns `true` while a pointer is captured.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.capture.is_captured()
    }

    /// Replaces the policy that distributes a resize over several elements.
    pub fn set_group_resize<P>(&mut self, policy: P)
    where
        P: GroupResize + 'static,
    {
        self.group_resize = Box::new(policy);
    }

    /// Chooses whether rotation turns the selection as a group or each element
    /// about its own centre.
    pub fn set_rotate_mode(&mut self, mode: RotateMode) {
        self.rotate_mode = mode;
    }

    /// Takes the notifications collected since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = SurfaceEvent> + '_ {
        self.events.drain(..)
    }

    /// Adopts new tool and modifier state.
    ///
    /// Releasing space after a space pan shows the selection boxes again.
    pub fn sync_input(&mut self, ctx: InputContext) {
        let released_space = self.input.space() && !ctx.space();
        self.input = ctx;
        if released_space && !matches!(self.gesture, Gesture::Panning { .. }) {
            self.boxes_hidden = false;
        }
        if !self.capture.is_captured() {
            self.update_hover_cursor();
        }
    }

    /// Re-measures the surface after the host resized it and fits the document.
    pub fn resize_viewport<S>(&mut self, store: &S, viewport_rect: Rect, document_size: Size)
    where
        S: ElementStore + ?Sized,
    {
        self.viewport.set_viewport_rect(viewport_rect);
        self.zoom_to_fit(store, document_size);
    }

    /// Fits `document_size` into the viewport and resets rotation.
    pub fn zoom_to_fit<S>(&mut self, store: &S, document_size: Size)
    where
        S: ElementStore + ?Sized,
    {
        let size = self.viewport.viewport_rect().size();
        self.viewport
            .zoom_to_fit(size, document_size, self.config.fit_margin);
        self.model.remeasure(store, &self.viewport);
        self.viewport_changed();
    }

    /// Zooms about a screen point. Ignored while a gesture other than panning
    /// runs. Returns `true` if the scale changed.
    pub fn zoom<S>(&mut self, store: &S, multiplier: f64, pivot: Point) -> bool
    where
        S: ElementStore + ?Sized,
    {
        if !self.gesture.accepts_wheel() || !self.viewport.zoom(multiplier, pivot) {
            return false;
        }
        self.model.remeasure(store, &self.viewport);
        self.viewport_changed();
        true
    }

    /// Rotates the view about a screen point. Ignored while a gesture other
    /// than panning runs.
    pub fn rotate_view(&mut self, delta_deg: f64, pivot: Point) {
        if !self.gesture.accepts_wheel() {
            return;
        }
        let before = self.viewport.translate();
        self.viewport.rotate_by(delta_deg, pivot);
        // Canvas space is unrotated, so cached boxes only follow the new translation.
        self.model
            .translate_cache(self.viewport.translate() - before);
        self.viewport_changed();
    }

    /// Replaces the selection from outside the surface, for example from an
    /// outline panel. Returns `true` if it changed.
    pub fn select<S, I>(&mut self, store: &S, ids: I, additive: bool) -> bool
    where
        S: ElementStore + ?Sized,
        I: IntoIterator<Item = ElementId>,
    {
        let changed = self.model.select(store, &self.viewport, ids, additive);
        if changed {
            self.selection_changed(store);
        }
        changed
    }

    /// Drops selected elements that the host deleted.
    pub fn notify_removed<S>(&mut self, store: &S)
    where
        S: ElementStore + ?Sized,
    {
        if self.model.prune(store, &self.viewport) {
            self.selection_changed(store);
        }
    }

    /// Handles a button press.
    pub fn pointer_down<S>(&mut self, store: &S, input: PointerInput)
    where
        S: ElementStore + ?Sized,
    {
        if self.capture.is_captured() || !matches!(self.gesture, Gesture::Idle) {
            tracing::trace!(pointer_id = input.pointer_id, "pointer-down during a gesture ignored");
            return;
        }
        let pan = match input.button {
            PointerButton::Primary => self.input.space() || self.input.tool() == Tool::PanCanvas,
            PointerButton::Middle => true,
            PointerButton::Secondary => {
                tracing::trace!("secondary button ignored");
                return;
            }
        };
        if !self.capture.capture(input.pointer_id) {
            return;
        }
        self.last_pointer = Some(input.position);
        if pan {
            self.begin_pan(input);
            return;
        }
        self.settle_now(store);

        let screen = input.position;
        let canvas = self.viewport.screen_to_canvas_point(screen);
        if let Some(kind) = self.input.tool().insert_kind() {
            self.gesture = Gesture::Inserting {
                start: screen,
                origin: canvas,
                kind,
                created: None,
                prior: self.model.selection().clone(),
            };
            self.cursor = CursorIcon::Crosshair;
            tracing::debug!(?kind, "insert started");
            return;
        }

        let outer = self.model.outer().map(|outer| outer.current);
        if let Some(outer) = outer {
            if let Some(handle) = self.style.handles.hit(outer, canvas) {
                self.begin_transform(store, handle, screen, canvas, outer);
                return;
            }
        }

        let candidates = self.model.find_at_point(store, &self.viewport, screen);
        let prior = self.model.selection().clone();
        let shift = self.input.shift();
        let action = if outer.is_some_and(|outer| outer.contains(canvas)) {
            ClickAction::Select { additive: shift }
        } else if let Some(&top) = candidates.first() {
            if self.input.alt() {
                ClickAction::Select { additive: shift }
            } else {
                if self.model.select(store, &self.viewport, [top], shift) {
                    self.selection_changed(store);
                }
                ClickAction::Nothing
            }
        } else {
            if !shift && self.model.clear() {
                self.selection_changed(store);
            }
            self.model
                .cache_element_bounding_boxes(store, &self.viewport);
            self.gesture = Gesture::Marquee {
                start: canvas,
                end: canvas,
                prior,
            };
            tracing::debug!("marquee started");
            return;
        };

        self.gesture = Gesture::Pending(PendingClick {
            start: screen,
            candidates,
            action,
            cycle_armed: true,
            timer: Timer::started(input.time_ms, self.config.selection_delay_ms),
            prior,
        });
        tracing::debug!(?action, "click pending");
    }

    /// Handles pointer motion.
    pub fn pointer_move<S>(&mut self, store: &mut S, input: PointerInput)
    where
        S: ElementStore + ?Sized,
    {
        let screen = input.position;
        self.last_pointer = Some(screen);
        match self.capture.holder() {
            None => {
                self.update_hover_cursor();
                return;
            }
            Some(holder) if holder != input.pointer_id => {
                tracing::trace!(
                    pointer_id = input.pointer_id,
                    "move of uncaptured pointer ignored"
                );
                return;
            }
            Some(_) => {}
        }
        let canvas = self.viewport.screen_to_canvas_point(screen);

        match self.gesture {
            Gesture::Idle => {}
            Gesture::Pending(ref click) => {
                let travel = screen - click.start;
                let start = click.start;
                let threshold = self.config.drag_threshold;
                if travel.x.abs() > threshold || travel.y.abs() > threshold {
                    self.begin_drag(store, start, screen);
                }
            }
            Gesture::Panning { ref mut last, .. } => {
                let delta = screen - *last;
                *last = screen;
                let applied = self.viewport.pan(delta);
                self.model.translate_cache(applied);
                self.settle
                    .start(input.time_ms, self.config.settle_delay_ms);
                self.viewport_changed();
            }
            Gesture::Marquee {
                start,
                ref mut end,
                ..
            } => {
                *end = canvas;
                if self.model.marquee_update(Rect::from_points(start, canvas)) {
                    tracing::trace!(targets = self.model.targets().len(), "marquee targets");
                }
            }
            Gesture::Dragging { start } => {
                move_elements(store, &mut self.model, &self.viewport, start, screen);
            }
            Gesture::Resizing {
                direction,
                origin,
                outer,
            } => {
                let gesture = ResizeGesture {
                    direction,
                    outer,
                    delta: canvas - origin,
                    allow_flip: true,
                };
                resize_elements(
                    store,
                    &mut self.model,
                    &self.viewport,
                    &gesture,
                    &*self.group_resize,
                );
            }
            Gesture::Rotating { pivot, start, .. } => {
                rotate_elements(
                    store,
                    &mut self.model,
                    &self.viewport,
                    pivot,
                    start,
                    screen,
                    self.rotate_mode,
                );
            }
            Gesture::Shearing { edge, start } => {
                shear_elements(store, &mut self.model, &self.viewport, edge, start, screen);
            }
            Gesture::Inserting {
                start,
                origin,
                kind,
                created,
                ..
            } => {
                if created.is_none() {
                    let id = self.create_element(store, kind, start);
                    if let Gesture::Inserting { created, .. } = &mut self.gesture {
                        *created = Some(id);
                    }
                }
                let gesture = ResizeGesture {
                    direction: HandleDirection::BottomRight,
                    outer: Rect::from_points(origin, origin),
                    delta: canvas - origin,
                    allow_flip: false,
                };
                resize_elements(
                    store,
                    &mut self.model,
                    &self.viewport,
                    &gesture,
                    &*self.group_resize,
                );
            }
        }
    }

    /// Handles a button release, committing the running gesture.
    pub fn pointer_up<S>(&mut self, store: &S, input: PointerInput)
    where
        S: ElementStore + ?Sized,
    {
        if !self.capture.release(input.pointer_id) {
            return;
        }
        self.last_pointer = Some(input.position);
        let gesture = core::mem::replace(&mut self.gesture, Gesture::Idle);
        let kind = gesture.kind();
        match gesture {
            Gesture::Idle => {}
            Gesture::Pending(mut click) => {
                if click.timer.fire_if_due(input.time_ms) {
                    click.cycle_armed = false;
                }
                self.finish_click(store, click);
            }
            Gesture::Panning { hid_boxes, .. } => {
                self.boxes_hidden = hid_boxes && self.input.space();
            }
            Gesture::Marquee { .. } => {
                if self.model.marquee_commit(store, &self.viewport) {
                    self.selection_changed(store);
                } else {
                    self.model.discard_targets();
                }
            }
            Gesture::Dragging { .. }
            | Gesture::Resizing { .. }
            | Gesture::Rotating { .. }
            | Gesture::Shearing { .. } => {
                self.model.remeasure(store, &self.viewport);
                self.events.push(SurfaceEvent::GestureCommitted);
            }
            Gesture::Inserting { created, .. } => {
                if let Some(id) = created {
                    self.model.discard_targets();
                    self.model.select(store, &self.viewport, [id], false);
                    self.selection_changed(store);
                    self.events.push(SurfaceEvent::GestureCommitted);
                }
            }
        }
        tracing::debug!(?kind, "gesture finished");
        self.update_hover_cursor();
    }

    /// Handles a key press.
    pub fn key_down<S>(&mut self, store: &mut S, key: Key)
    where
        S: ElementStore + ?Sized,
    {
        match key {
            Key::Escape => self.cancel(store),
        }
    }

    /// Handles wheel input. Returns `false` if a gesture other than panning is
    /// running and the wheel was ignored.
    pub fn wheel<S>(&mut self, store: &S, input: &WheelInput, now_ms: u64) -> bool
    where
        S: ElementStore + ?Sized,
    {
        if !self.gesture.accepts_wheel() {
            tracing::trace!(gesture = ?self.gesture.kind(), "wheel ignored");
            return false;
        }
        let action = route_wheel(input, self.config.wheel_zoom_sensitivity);
        match self.viewport.apply_wheel(action) {
            Some(delta) => self.model.translate_cache(delta),
            None => self.model.remeasure(store, &self.viewport),
        }
        self.settle.start(now_ms, self.config.settle_delay_ms);
        self.viewport_changed();
        true
    }

    /// Fires expired timers.
    pub fn tick<S>(&mut self, store: &S, now_ms: u64)
    where
        S: ElementStore + ?Sized,
    {
        if let Gesture::Pending(click) = &mut self.gesture {
            if click.timer.fire_if_due(now_ms) {
                click.cycle_armed = false;
                tracing::trace!("cycle selection disarmed");
            }
        }
        if self.settle.fire_if_due(now_ms) {
            self.model.remeasure(store, &self.viewport);
            tracing::trace!("viewport settled");
        }
    }

    /// The overlay for the current state.
    ///
    /// Element boxes are left out while a transform rewrites them; only the
    /// outer rectangle follows the pointer.
    #[must_use]
    pub fn overlay(&self) -> OverlayScene {
        if self.boxes_hidden {
            return OverlayScene::default();
        }
        let boxes: Vec<OverlayRect> = if self.gesture.transforms() {
            Vec::new()
        } else {
            self.model
                .active()
                .into_iter()
                .filter_map(|id| self.model.element_box(id))
                .map(|b| OverlayRect::from_rect(b.oriented).with_rotation(b.rotate_deg))
                .collect()
        };
        let marquee = match &self.gesture {
            Gesture::Marquee { start, end, .. } => {
                Some(OverlayRect::from_rect(Rect::from_points(*start, *end)))
            }
            _ => None,
        };
        let show_handles = self.input.tool() == Tool::Selection
            && !matches!(
                self.gesture,
                Gesture::Marquee { .. } | Gesture::Dragging { .. } | Gesture::Inserting { .. }
            );
        let input = OverlayInput {
            canvas_rotate_deg: self.viewport.rotate(),
            canvas_anchor: self.viewport.document_to_canvas() * Point::ZERO,
            boxes: &boxes,
            marquee,
            outer: self
                .model
                .outer()
                .map(|outer| OverlayRect::from_rect(outer.current)),
            show_handles,
            active_handle: self.gesture.active_handle(),
        };
        draw_overlay(&input, &self.style)
    }

    fn begin_pan(&mut self, input: PointerInput) {
        let hid_boxes = !self.model.is_empty()
            && (input.button == PointerButton::Middle || self.input.space());
        self.boxes_hidden |= hid_boxes;
        self.gesture = Gesture::Panning {
            last: input.position,
            hid_boxes,
        };
        self.cursor = CursorIcon::Grabbing;
        self.events.push(SurfaceEvent::Status("Panning".to_owned()));
        tracing::debug!(button = ?input.button, hid_boxes, "pan started");
    }

    fn begin_transform<S>(
        &mut self,
        store: &S,
        handle: Handle,
        screen: Point,
        canvas: Point,
        outer: Rect,
    ) where
        S: ElementStore + ?Sized,
    {
        self.model.capture_snapshots(store);
        self.model.begin_outer_gesture();
        self.gesture = match handle {
            Handle::Resize(direction) => Gesture::Resizing {
                direction,
                origin: canvas,
                outer,
            },
            Handle::Rotate(corner) => Gesture::Rotating {
                pivot: self.viewport.canvas_to_screen() * outer.center(),
                start: screen,
                corner,
            },
            Handle::Shear(edge) => Gesture::Shearing {
                edge,
                start: screen,
            },
        };
        self.cursor = handle.cursor();
        tracing::debug!(?handle, "transform started");
    }

    fn begin_drag<S>(&mut self, store: &mut S, start: Point, screen: Point)
    where
        S: ElementStore + ?Sized,
    {
        // Dropping the pending click drops its deferred selection and timer.
        self.gesture = Gesture::Idle;
        if self.model.selection().is_empty() {
            tracing::trace!("drag with nothing selected ignored");
            return;
        }
        self.model.capture_snapshots(&*store);
        self.model.begin_outer_gesture();
        self.gesture = Gesture::Dragging { start };
        self.cursor = CursorIcon::Move;
        tracing::debug!(count = self.model.selected().len(), "drag started");
        move_elements(store, &mut self.model, &self.viewport, start, screen);
    }

    fn finish_click<S>(&mut self, store: &S, click: PendingClick)
    where
        S: ElementStore + ?Sized,
    {
        if click.cycle_armed && self.input.alt() {
            if let Some(next) = self.model.cycle_next(&click.candidates) {
                if self.model.select(store, &self.viewport, [next], false) {
                    self.selection_changed(store);
                }
            }
            return;
        }
        if let ClickAction::Select { additive } = click.action {
            let changed = match click.candidates.first() {
                Some(&top) => self.model.select(store, &self.viewport, [top], additive),
                None if !additive => self.model.clear(),
                None => false,
            };
            if changed {
                self.selection_changed(store);
            }
        }
    }

    fn create_element<S>(&mut self, store: &mut S, kind: ElementKind, start: Point) -> ElementId
    where
        S: ElementStore + ?Sized,
    {
        let position = self.viewport.screen_to_document_point(start);
        let id = store.insert(kind, ElementFrame::new(position, Size::ZERO));
        // The prior selection is kept by the gesture for cancellation.
        self.model.clear();
        self.model.set_targets(&*store, &self.viewport, &[id]);
        self.model.capture_snapshots(&*store);
        self.model.begin_outer_gesture();
        self.events.push(SurfaceEvent::ElementInserted(id));
        tracing::debug!(?id, ?kind, "element inserted");
        id
    }

    fn cancel<S>(&mut self, store: &mut S)
    where
        S: ElementStore + ?Sized,
    {
        let gesture = core::mem::replace(&mut self.gesture, Gesture::Idle);
        let kind = gesture.kind();
        match gesture {
            Gesture::Idle => {
                if self.model.clear() {
                    self.selection_changed(&*store);
                }
                return;
            }
            Gesture::Pending(click) => {
                let changed = self.model.selection() != &click.prior;
                self.model
                    .restore_selection(&*store, &self.viewport, click.prior);
                if changed {
                    self.selection_changed(&*store);
                }
            }
            Gesture::Panning { hid_boxes, .. } => {
                self.boxes_hidden = hid_boxes && self.input.space();
                self.events
                    .push(SurfaceEvent::Status("Panning cancelled".to_owned()));
            }
            Gesture::Marquee { prior, .. } => {
                let changed = self.model.selection() != &prior;
                self.model
                    .restore_selection(&*store, &self.viewport, prior);
                if changed {
                    self.selection_changed(&*store);
                }
            }
            Gesture::Dragging { .. }
            | Gesture::Resizing { .. }
            | Gesture::Rotating { .. }
            | Gesture::Shearing { .. } => {
                let restored = self.model.restore_snapshots(store);
                self.model.restore_outer();
                tracing::trace!(restored, "element frames restored");
            }
            Gesture::Inserting { created, prior, .. } => {
                if let Some(id) = created {
                    store.remove(id);
                    self.events.push(SurfaceEvent::ElementRemoved(id));
                    self.model.discard_targets();
                    self.model
                        .restore_selection(&*store, &self.viewport, prior);
                }
            }
        }
        tracing::debug!(?kind, "gesture cancelled");
        self.update_hover_cursor();
    }

    /// Runs a pending settle re-measure right away.
    fn settle_now<S>(&mut self, store: &S)
    where
        S: ElementStore + ?Sized,
    {
        if self.settle.is_armed() {
            self.settle.cancel();
            self.model.remeasure(store, &self.viewport);
        }
    }

    fn update_hover_cursor(&mut self) {
        self.cursor = if self.capture.is_captured() && !matches!(self.gesture, Gesture::Idle) {
            self.cursor
        } else if self.input.space() || self.input.tool() == Tool::PanCanvas {
            CursorIcon::Grab
        } else if self.input.tool().insert_kind().is_some() {
            CursorIcon::Crosshair
        } else {
            self.selection_cursor()
        };
    }

    fn selection_cursor(&self) -> CursorIcon {
        let (Some(pointer), Some(outer)) = (self.last_pointer, self.model.outer()) else {
            return CursorIcon::Default;
        };
        let canvas = self.viewport.screen_to_canvas_point(pointer);
        if let Some(handle) = self.style.handles.hit(outer.current, canvas) {
            handle.cursor()
        } else if outer.current.contains(canvas) {
            CursorIcon::Move
        } else {
            CursorIcon::Default
        }
    }

    fn selection_changed<S>(&mut self, store: &S)
    where
        S: ElementStore + ?Sized,
    {
        self.events.push(SurfaceEvent::SelectionChanged);
        self.events
            .push(SurfaceEvent::Status(self.model.status_text(store)));
    }

    fn viewport_changed(&mut self) {
        self.events.push(SurfaceEvent::ViewportChanged(
            self.viewport.presentation_transform(),
        ));
    }
}
