//! # Layout Store
//!
//! Owns the widget collection and the single pointer interaction, and is the
//! only place widgets are created, moved, resized or destroyed. The geometry
//! itself is delegated to the pure functions in [`crate::layout`]; the store
//! reads a snapshot of its own state, asks for an answer, and writes it back.
//!
//! ## Interaction Lifecycle
//!
//! ```text
//!            pointer_down(id)              pointer_up / pointer_leave
//!   Idle ─────────────────────→ Dragging ─────────────────────────→ Idle
//!     │      resize_start(id)                    (snap to preset)
//!     └───────────────────────→ Resizing ─────────────────────────→ Idle
//! ```
//!
//! Only one widget can be dragged or resized at a time. Every `pointer_move`
//! runs the full collision pass before returning, so a snapshot never sees a
//! half-resolved layout.

use serde::Serialize;

use crate::config::{default_viewport, LayoutConfig};
use crate::error::LayoutError;
use crate::feed::{self, FeedError, PayloadSource, RefreshRequest};
use crate::layout::{
    clamp_resize, next_free_position, resolve_drag_position, snap_to_preset, CanvasBounds,
};
use crate::model::{
    Geometry, Interaction, Point, Size, SizePreset, Widget, WidgetId, WidgetKind, WidgetPayload,
};
use crate::schedule::{Scheduler, TaskAction};

use std::time::Duration;

/// Everything the view needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub canvas: CanvasBounds,
    pub interaction: Interaction,
    pub widgets: Vec<Widget>,
}

#[derive(Debug)]
pub struct LayoutStore {
    config: LayoutConfig,
    viewport: Size,
    /// Creation order, which is also stacking order.
    widgets: Vec<Widget>,
    interaction: Interaction,
    /// Wider than a widget id so the counter can run one past `u32::MAX`.
    next_id: u64,
    scheduler: Scheduler,
    refresh_queue: Vec<RefreshRequest>,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(LayoutConfig::default(), default_viewport())
    }
}

impl LayoutStore {
    pub fn new(config: LayoutConfig, viewport: Size) -> Self {
        Self {
            config,
            viewport,
            widgets: Vec::new(),
            interaction: Interaction::Idle,
            next_id: 1,
            scheduler: Scheduler::new(),
            refresh_queue: Vec::new(),
        }
    }

    // ── Read access ─────────────────────────────────────────────

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Time on the store clock, as advanced by [`LayoutStore::advance`].
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds::compute(&self.widgets, self.viewport, &self.config)
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            canvas: self.bounds(),
            interaction: self.interaction,
            widgets: self.widgets.clone(),
        }
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    fn require(&self, id: WidgetId) -> Result<&Widget, LayoutError> {
        self.widget(id).ok_or(LayoutError::UnknownWidget(id))
    }

    // ── State entry points ──────────────────────────────────────

    /// Insert a fully built widget. The id counter moves past its id so later
    /// creations never collide with it.
    pub fn add(&mut self, widget: Widget) -> Result<(), LayoutError> {
        if self.widget(widget.id).is_some() {
            return Err(LayoutError::DuplicateWidget(widget.id));
        }
        self.next_id = self.next_id.max(u64::from(widget.id.0) + 1);
        self.widgets.push(widget);
        Ok(())
    }

    /// Take a widget out, cancelling its timers and any interaction on it.
    pub fn remove(&mut self, id: WidgetId) -> Result<Widget, LayoutError> {
        let index = self
            .widgets
            .iter()
            .position(|w| w.id == id)
            .ok_or(LayoutError::UnknownWidget(id))?;
        let widget = self.widgets.remove(index);

        let cancelled = self.scheduler.cancel_for_widget(id);
        self.refresh_queue.retain(|r| r.widget != id);
        if self.interaction.active_widget() == Some(id) {
            self.interaction = Interaction::Idle;
        }
        tracing::trace!(
            target: "dashlay::store",
            widget = %id,
            cancelled,
            pending = self.scheduler.pending(),
            "widget removed"
        );
        Ok(widget)
    }

    /// Overwrite one piece of a widget's geometry. No collision checks: callers
    /// pass values that already went through the layout functions.
    pub fn update_geometry(&mut self, id: WidgetId, geometry: Geometry) -> Result<(), LayoutError> {
        let cell_size = self.config.cell_size;
        let widget = self
            .widget_mut(id)
            .ok_or(LayoutError::UnknownWidget(id))?;
        match geometry {
            Geometry::Position(p) => widget.position = p,
            Geometry::Size(s) => widget.size = s,
            Geometry::Preset(preset) => {
                widget.preset = preset;
                widget.size = preset.pixel_size(cell_size);
            }
        }
        Ok(())
    }

    /// Replace the interaction state and sync the widgets' transient flags.
    ///
    /// Fails if the state names an unknown widget, or if a different widget
    /// is already mid-interaction.
    pub fn set_interaction(&mut self, state: Interaction) -> Result<(), LayoutError> {
        if let Some(id) = state.active_widget() {
            self.require(id)?;
            if let Some(active) = self.interaction.active_widget() {
                if active != id {
                    return Err(LayoutError::InteractionBusy { active });
                }
            }
        }

        self.interaction = state;
        for widget in &mut self.widgets {
            widget.is_dragging = false;
            widget.is_resizing = false;
        }
        match state {
            Interaction::Idle => {}
            Interaction::Dragging { id, .. } => {
                if let Some(w) = self.widget_mut(id) {
                    w.is_dragging = true;
                }
            }
            Interaction::Resizing { id, .. } => {
                if let Some(w) = self.widget_mut(id) {
                    w.is_resizing = true;
                }
            }
        }
        Ok(())
    }

    // ── Palette commands ────────────────────────────────────────

    /// Create a widget in the first free grid slot.
    ///
    /// `preset` defaults to the kind's palette size and `payload` to the
    /// kind's sample data. Live widgets are queued for an immediate fetch.
    pub fn create_widget(
        &mut self,
        kind: WidgetKind,
        preset: Option<SizePreset>,
        payload: Option<WidgetPayload>,
    ) -> Result<WidgetId, LayoutError> {
        let preset = preset.unwrap_or_else(|| kind.default_preset());
        if !kind.allowed_presets().contains(&preset) {
            return Err(LayoutError::PresetNotAllowed { kind, preset });
        }
        if let Some(p) = &payload {
            if p.kind() != kind {
                return Err(LayoutError::PayloadMismatch {
                    kind,
                    payload: p.kind().label(),
                });
            }
        }

        let id = u32::try_from(self.next_id)
            .map(WidgetId)
            .map_err(|_| LayoutError::IdsExhausted)?;
        self.next_id += 1;
        let payload = payload.unwrap_or_else(|| WidgetPayload::sample(kind, id.0));

        let (cols, rows) = preset.span();
        let position = next_free_position(
            cols,
            rows,
            &self.widgets,
            self.bounds().width,
            &self.config,
        );
        let widget = Widget::new(id, kind, preset, position, self.config.cell_size, payload);
        self.widgets.push(widget);

        self.scheduler
            .schedule_in(self.config.new_flag_delay(), TaskAction::ClearNewFlag(id));
        if kind.is_live() {
            self.refresh_queue.push(RefreshRequest { widget: id, kind });
            self.scheduler
                .schedule_in(self.config.refresh_interval(), TaskAction::RefreshPayload(id));
        }

        tracing::info!(
            target: "dashlay::store",
            widget = %id,
            %kind,
            %preset,
            x = position.x,
            y = position.y,
            "widget created"
        );
        Ok(id)
    }

    /// Delete a widget. The gap it leaves is not backfilled.
    pub fn delete_widget(&mut self, id: WidgetId) -> Result<Widget, LayoutError> {
        let widget = self.remove(id)?;
        tracing::info!(target: "dashlay::store", widget = %id, kind = %widget.kind, "widget deleted");
        Ok(widget)
    }

    /// Move a widget as if it had been dropped at `desired`.
    pub fn move_widget(&mut self, id: WidgetId, desired: Point) -> Result<Point, LayoutError> {
        let widget = self.require(id)?;
        let resolved = resolve_drag_position(
            widget,
            desired,
            &self.widgets,
            self.bounds(),
            &self.config,
        );
        self.update_geometry(id, Geometry::Position(resolved))?;
        Ok(resolved)
    }

    /// Resize a widget as if its handle had been dragged to `desired` and
    /// released. Kinds that can't be resized keep their preset.
    pub fn resize_widget(&mut self, id: WidgetId, desired: Size) -> Result<SizePreset, LayoutError> {
        let widget = self.require(id)?;
        if !widget.kind.is_resizable() {
            return Ok(widget.preset);
        }
        let bounds = self.bounds();
        let clamped = clamp_resize(widget, desired, &self.widgets, bounds, &self.config);
        let preset = snap_to_preset(widget, clamped, Some(&self.widgets), bounds, &self.config);
        self.update_geometry(id, Geometry::Preset(preset))?;
        Ok(preset)
    }

    /// The host window changed size. Widgets are not moved.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    // ── Pointer events ──────────────────────────────────────────

    /// Pointer pressed on a widget body: start dragging it.
    pub fn pointer_down(&mut self, id: WidgetId, pointer: Point) -> Result<(), LayoutError> {
        let origin = self.require(id)?.position;
        let offset = Point::new(pointer.x - origin.x, pointer.y - origin.y);
        self.set_interaction(Interaction::Dragging { id, offset })?;
        tracing::debug!(target: "dashlay::store", widget = %id, "drag started");
        Ok(())
    }

    /// Pointer pressed on a widget's resize handle. Returns false, and leaves
    /// everything as it was, for kinds that can't be resized.
    pub fn resize_start(&mut self, id: WidgetId, pointer: Point) -> Result<bool, LayoutError> {
        let widget = self.require(id)?;
        if !widget.kind.is_resizable() {
            tracing::debug!(
                target: "dashlay::store",
                widget = %id,
                kind = %widget.kind,
                "resize ignored for fixed-size kind"
            );
            return Ok(false);
        }
        let anchor_size = widget.size;
        self.set_interaction(Interaction::Resizing {
            id,
            anchor: pointer,
            anchor_size,
        })?;
        tracing::debug!(target: "dashlay::store", widget = %id, "resize started");
        Ok(true)
    }

    /// Pointer moved. Does nothing when idle.
    pub fn pointer_move(&mut self, pointer: Point) {
        let bounds = self.bounds();
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Dragging { id, offset } => {
                let Some(widget) = self.widget(id) else {
                    return;
                };
                let desired = Point::new(pointer.x - offset.x, pointer.y - offset.y);
                let resolved =
                    resolve_drag_position(widget, desired, &self.widgets, bounds, &self.config);
                tracing::trace!(
                    target: "dashlay::store",
                    widget = %id,
                    x = resolved.x,
                    y = resolved.y,
                    "drag move"
                );
                if let Some(w) = self.widget_mut(id) {
                    w.position = resolved;
                }
            }
            Interaction::Resizing {
                id,
                anchor,
                anchor_size,
            } => {
                let Some(widget) = self.widget(id) else {
                    return;
                };
                let desired = Size::new(
                    anchor_size.width + pointer.x - anchor.x,
                    anchor_size.height + pointer.y - anchor.y,
                );
                let clamped = clamp_resize(widget, desired, &self.widgets, bounds, &self.config);
                tracing::trace!(
                    target: "dashlay::store",
                    widget = %id,
                    width = clamped.width,
                    height = clamped.height,
                    "resize move"
                );
                if let Some(w) = self.widget_mut(id) {
                    w.size = clamped;
                }
            }
        }
    }

    /// Pointer released: end the interaction. A resize snaps to the closest
    /// allowed preset.
    pub fn pointer_up(&mut self) {
        if let Interaction::Resizing { id, .. } = self.interaction {
            if let Some(widget) = self.widget(id) {
                let preset = snap_to_preset(
                    widget,
                    widget.size,
                    Some(&self.widgets),
                    self.bounds(),
                    &self.config,
                );
                let cell_size = self.config.cell_size;
                if let Some(w) = self.widget_mut(id) {
                    w.preset = preset;
                    w.size = preset.pixel_size(cell_size);
                }
                tracing::debug!(target: "dashlay::store", widget = %id, %preset, "resize snapped");
            }
        } else if let Interaction::Dragging { id, .. } = self.interaction {
            tracing::debug!(target: "dashlay::store", widget = %id, "drag finished");
        }

        self.interaction = Interaction::Idle;
        for widget in &mut self.widgets {
            widget.is_dragging = false;
            widget.is_resizing = false;
        }
    }

    /// Pointer left the canvas. Same as releasing it.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    // ── Clock and data feed ─────────────────────────────────────

    /// Move the store clock forward and run every task that came due.
    pub fn advance(&mut self, elapsed: Duration) {
        for task in self.scheduler.advance(elapsed) {
            match task.action {
                TaskAction::ClearNewFlag(id) => match self.widget_mut(id) {
                    Some(w) => w.is_new = false,
                    None => {
                        tracing::debug!(target: "dashlay::store", widget = %id, "stale animation timer");
                    }
                },
                TaskAction::RefreshPayload(id) => {
                    let Some(kind) = self.widget(id).map(|w| w.kind) else {
                        continue;
                    };
                    self.queue_refresh(RefreshRequest { widget: id, kind });
                    self.scheduler
                        .schedule_in(self.config.refresh_interval(), TaskAction::RefreshPayload(id));
                }
            }
        }
    }

    fn queue_refresh(&mut self, request: RefreshRequest) {
        if !self.refresh_queue.contains(&request) {
            self.refresh_queue.push(request);
        }
    }

    /// Ask for an out-of-schedule refresh of a live widget. Returns false for
    /// static kinds.
    pub fn request_refresh(&mut self, id: WidgetId) -> Result<bool, LayoutError> {
        let kind = self.require(id)?.kind;
        if !kind.is_live() {
            return Ok(false);
        }
        self.queue_refresh(RefreshRequest { widget: id, kind });
        Ok(true)
    }

    /// Hand out every pending refresh request.
    pub fn take_refresh_requests(&mut self) -> Vec<RefreshRequest> {
        std::mem::take(&mut self.refresh_queue)
    }

    /// Store the outcome of a fetch. Results for widgets that were deleted in
    /// the meantime are dropped.
    pub fn apply_feed_result(
        &mut self,
        id: WidgetId,
        result: Result<serde_json::Value, FeedError>,
    ) -> bool {
        let Some(widget) = self.widget_mut(id) else {
            tracing::debug!(target: "dashlay::feed", widget = %id, "result for deleted widget dropped");
            return false;
        };
        if let Err(e) = &result {
            tracing::warn!(target: "dashlay::feed", widget = %id, error = %e, "payload fetch failed");
        }
        feed::apply_result(&mut widget.payload, result)
    }

    /// Serve every pending refresh from `source`. Returns how many widgets
    /// were updated.
    pub fn refresh_with(&mut self, source: &mut impl PayloadSource) -> usize {
        let mut updated = 0;
        for request in self.take_refresh_requests() {
            let Some(widget) = self.widget(request.widget) else {
                continue;
            };
            let result = source.fetch(request, &widget.payload);
            if self.apply_feed_result(request.widget, result) {
                updated += 1;
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::overlaps;
    use crate::model::payload::LiveData;
    use serde_json::json;

    fn store() -> LayoutStore {
        LayoutStore::new(LayoutConfig::default(), Size::new(1280.0, 800.0))
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut s = store();
        let a = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        let b = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        s.delete_widget(b).unwrap();
        let c = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        assert_eq!(a, WidgetId(1));
        assert_eq!(b, WidgetId(2));
        assert_eq!(c, WidgetId(3));
    }

    #[test]
    fn create_uses_kind_defaults() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::Chart, None, None).unwrap();
        let w = s.widget(id).unwrap();
        assert_eq!(w.preset, SizePreset::TwoByTwo);
        assert_eq!(w.size, Size::new(300.0, 300.0));
        assert!(w.is_new);
        assert_eq!(w.payload.kind(), WidgetKind::Chart);
    }

    #[test]
    fn create_rejects_bad_preset_and_payload() {
        let mut s = store();
        let err = s
            .create_widget(WidgetKind::Metric, Some(SizePreset::ThreeByThree), None)
            .unwrap_err();
        assert!(matches!(err, LayoutError::PresetNotAllowed { .. }));

        let payload = WidgetPayload::sample(WidgetKind::Funnel, 0);
        let err = s
            .create_widget(WidgetKind::Chart, None, Some(payload))
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::PayloadMismatch {
                kind: WidgetKind::Chart,
                payload: "funnel"
            }
        ));
        assert!(s.widgets().is_empty());
    }

    #[test]
    fn new_flag_clears_after_delay() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        s.advance(Duration::from_millis(400));
        assert!(s.widget(id).unwrap().is_new);
        s.advance(Duration::from_millis(100));
        assert!(!s.widget(id).unwrap().is_new);
    }

    #[test]
    fn new_flag_timer_is_a_no_op_after_delete() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        s.delete_widget(id).unwrap();
        s.advance(Duration::from_secs(1));
        assert!(s.widget(id).is_none());
        assert!(s.widgets().is_empty());
    }

    #[test]
    fn drag_follows_pointer_and_finalizes() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        s.pointer_down(id, Point::new(60.0, 140.0)).unwrap();
        assert!(s.widget(id).unwrap().is_dragging);

        s.pointer_move(Point::new(410.0, 410.0));
        assert_eq!(s.widget(id).unwrap().position, Point::new(400.0, 400.0));

        s.pointer_up();
        assert!(s.interaction().is_idle());
        assert!(!s.widget(id).unwrap().is_dragging);
    }

    #[test]
    fn drag_never_lands_on_a_neighbour() {
        let mut s = store();
        let a = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        let b = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        let b_pos = s.widget(b).unwrap().position;

        s.pointer_down(a, Point::new(50.0, 130.0)).unwrap();
        s.pointer_move(b_pos);
        s.pointer_up();

        let ra = s.widget(a).unwrap().rect();
        let rb = s.widget(b).unwrap().rect();
        assert!(!overlaps(ra, rb, 0.0));
    }

    #[test]
    fn second_interaction_is_rejected() {
        let mut s = store();
        let a = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        let b = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        s.pointer_down(a, Point::new(60.0, 140.0)).unwrap();
        let err = s.resize_start(b, Point::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, LayoutError::InteractionBusy { active } if active == a));
        assert!(!s.widget(b).unwrap().is_resizing);
    }

    #[test]
    fn resize_start_is_a_no_op_for_charts() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::LiveFunnel, None, None).unwrap();
        assert!(!s.resize_start(id, Point::new(0.0, 0.0)).unwrap());
        assert!(s.interaction().is_idle());
        assert!(!s.widget(id).unwrap().is_resizing);
    }

    #[test]
    fn resize_snaps_on_release() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        assert!(s.resize_start(id, Point::new(200.0, 280.0)).unwrap());
        assert!(s.widget(id).unwrap().is_resizing);

        s.pointer_move(Point::new(340.0, 290.0));
        let mid = s.widget(id).unwrap().size;
        assert_eq!(mid, Size::new(290.0, 160.0));

        s.pointer_leave();
        let w = s.widget(id).unwrap();
        assert_eq!(w.preset, SizePreset::TwoByOne);
        assert_eq!(w.size, Size::new(300.0, 150.0));
        assert!(!w.is_resizing);
    }

    #[test]
    fn deleting_the_active_widget_ends_the_interaction() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        s.pointer_down(id, Point::new(60.0, 140.0)).unwrap();
        s.delete_widget(id).unwrap();
        assert!(s.interaction().is_idle());
        s.pointer_move(Point::new(500.0, 500.0));
        s.pointer_up();
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut s = store();
        assert!(matches!(
            s.delete_widget(WidgetId(9)),
            Err(LayoutError::UnknownWidget(WidgetId(9)))
        ));
        assert!(s.pointer_down(WidgetId(9), Point::default()).is_err());
        assert!(s.move_widget(WidgetId(9), Point::default()).is_err());
    }

    #[test]
    fn add_rejects_duplicates_and_bumps_counter() {
        let mut s = store();
        let w = Widget::new(
            WidgetId(10),
            WidgetKind::Basic,
            SizePreset::OneByOne,
            Point::new(50.0, 130.0),
            150.0,
            WidgetPayload::sample(WidgetKind::Basic, 10),
        );
        s.add(w.clone()).unwrap();
        assert!(matches!(s.add(w), Err(LayoutError::DuplicateWidget(_))));
        let next = s.create_widget(WidgetKind::Basic, None, None).unwrap();
        assert_eq!(next, WidgetId(11));
    }

    #[test]
    fn create_after_the_last_id_fails_cleanly() {
        let mut s = store();
        let last = Widget::new(
            WidgetId(u32::MAX),
            WidgetKind::Basic,
            SizePreset::OneByOne,
            Point::new(50.0, 130.0),
            150.0,
            WidgetPayload::sample(WidgetKind::Basic, 0),
        );
        s.add(last).unwrap();
        let err = s.create_widget(WidgetKind::Basic, None, None).unwrap_err();
        assert!(matches!(err, LayoutError::IdsExhausted));
        assert_eq!(s.widgets().len(), 1);
        // Still exhausted; the counter never wraps back to a used id.
        assert!(matches!(
            s.create_widget(WidgetKind::Basic, None, None),
            Err(LayoutError::IdsExhausted)
        ));
    }

    #[test]
    fn live_widgets_are_refreshed_on_a_timer() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::LiveMetric, None, None).unwrap();
        let first = s.take_refresh_requests();
        assert_eq!(first, vec![RefreshRequest { widget: id, kind: WidgetKind::LiveMetric }]);

        s.advance(Duration::from_secs(299));
        assert!(s.take_refresh_requests().is_empty());
        s.advance(Duration::from_secs(1));
        assert_eq!(s.take_refresh_requests().len(), 1);
        s.advance(Duration::from_secs(300));
        assert_eq!(s.take_refresh_requests().len(), 1);
    }

    #[test]
    fn manual_refresh_is_deduplicated_and_skips_static_kinds() {
        let mut s = store();
        let live = s.create_widget(WidgetKind::LiveTrend, None, None).unwrap();
        let basic = s.create_widget(WidgetKind::Basic, None, None).unwrap();

        // Already queued by creation.
        assert!(s.request_refresh(live).unwrap());
        assert!(s.request_refresh(live).unwrap());
        assert!(!s.request_refresh(basic).unwrap());
        assert_eq!(
            s.take_refresh_requests(),
            vec![RefreshRequest { widget: live, kind: WidgetKind::LiveTrend }]
        );

        assert!(s.request_refresh(live).unwrap());
        assert_eq!(s.take_refresh_requests().len(), 1);
        assert!(!s.request_refresh(basic).unwrap());
        assert!(s.take_refresh_requests().is_empty());
    }

    #[test]
    fn refresh_with_source_fills_payload() {
        let mut s = store();
        let ok = s.create_widget(WidgetKind::LiveMetric, None, None).unwrap();
        let bad = s.create_widget(WidgetKind::LiveChart, None, None).unwrap();
        s.create_widget(WidgetKind::Metric, None, None).unwrap();

        let mut source = |request: RefreshRequest, _: &WidgetPayload| match request.kind {
            WidgetKind::LiveMetric => Ok(json!({ "totalWaivers": 12 })),
            _ => Err(FeedError::Status(502)),
        };
        assert_eq!(s.refresh_with(&mut source), 2);

        assert_eq!(
            s.widget(ok).unwrap().payload.live_data(),
            Some(&LiveData::Ready(json!({ "totalWaivers": 12 })))
        );
        assert!(matches!(
            s.widget(bad).unwrap().payload.live_data(),
            Some(LiveData::Failed { error, last: None }) if error == "API error: 502"
        ));
    }

    #[test]
    fn feed_results_for_deleted_widgets_are_dropped() {
        let mut s = store();
        let id = s.create_widget(WidgetKind::LiveTrend, None, None).unwrap();
        s.delete_widget(id).unwrap();
        assert!(s.take_refresh_requests().is_empty());
        assert!(!s.apply_feed_result(id, Ok(json!(1))));
        assert!(s.request_refresh(id).is_err());
    }

    #[test]
    fn canvas_grows_with_lowest_widget() {
        let mut s = LayoutStore::new(LayoutConfig::default(), Size::new(300.0, 400.0));
        // One column: every widget goes one row lower.
        for _ in 0..3 {
            s.create_widget(WidgetKind::Basic, None, None).unwrap();
        }
        let lowest = s.widgets().iter().map(|w| w.rect().bottom()).fold(0.0, f64::max);
        assert_eq!(s.bounds().height, lowest + 50.0);
        assert_eq!(s.bounds().width, 300.0);
    }

    #[test]
    fn snapshot_serializes_for_the_view() {
        let mut s = store();
        s.create_widget(WidgetKind::Metric, Some(SizePreset::TwoByOne), None)
            .unwrap();
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["interaction"]["state"], "idle");
        assert_eq!(json["widgets"][0]["preset"], "2x1");
        assert_eq!(json["widgets"][0]["kind"], "metric");
        assert_eq!(json["widgets"][0]["isNew"], true);
        assert_eq!(json["widgets"][0]["size"]["width"], 300.0);
        assert_eq!(json["canvas"]["width"], 1280.0);
    }
}
