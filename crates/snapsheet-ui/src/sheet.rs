//! The sheet controller.
//!
//! [`Sheet`] owns every piece of sheet state and is the only public way to
//! change it. Direct drags, content scrolls and imperative calls all end up
//! in the same few entry points, which start transitions on the
//! [`TransitionDriver`]. Lifecycle notifications are queued when a
//! transition settles and delivered at the start of the following
//! [`Sheet::update`].
//!
//! # Example
//!
//! ```ignore
//! use snapsheet_ui::*;
//!
//! let config = SheetConfig::new().snap_points([0.3, 0.6, 0.9].map(SnapPoint::from));
//! let mut sheet = Sheet::new(config, surface);
//! sheet.on_snap_point_change(|index| println!("settled at {index}"));
//!
//! sheet.open();
//! // Once per frame:
//! sheet.handle_events(&mut input_queue.drain());
//! sheet.update(frame_time.delta_seconds());
//! ```

use std::collections::VecDeque;

use snapsheet_core::profiling::profile_function;
use snapsheet_input::{HandleStatus, InputBatch, PointerSample, ScrollSample, SheetInput};

use crate::config::SheetConfig;
use crate::gesture::{GestureRelease, GestureTracker};
use crate::scroll_expand::{ScrollContext, ScrollExpandTracker, ScrollIntent};
use crate::snap::{SnapPoint, SnapPoints, SnapTarget};
use crate::surface::{PresentationSurface, SheetFrame};
use crate::transition::{CompletedTransition, TransitionDriver, TransitionKind, TransitionTargets};

/// Lifecycle state of a sheet.
///
/// `Opening`, `Transitioning` and `Closing` are the states with a transition
/// in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPhase {
    Closed,
    Opening,
    Open,
    Transitioning,
    Closing,
}

impl SheetPhase {
    pub fn is_visible(&self) -> bool {
        *self != SheetPhase::Closed
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SheetPhase::Opening | SheetPhase::Transitioning | SheetPhase::Closing
        )
    }
}

/// A settled transition waiting to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetNotification {
    Opened,
    Closed,
    SnapPointChanged(usize),
}

type Callback = Box<dyn FnMut()>;
type IndexCallback = Box<dyn FnMut(usize)>;

#[derive(Default)]
struct SheetCallbacks {
    on_open: Option<Callback>,
    on_close: Option<Callback>,
    on_snap_point_change: Option<IndexCallback>,
}

/// A draggable bottom sheet with optional snap points.
pub struct Sheet<S: PresentationSurface> {
    config: SheetConfig,
    surface: S,
    snap_points: Option<SnapPoints>,
    sheet_height: f32,
    phase: SheetPhase,
    current_index: Option<usize>,
    driver: TransitionDriver,
    gesture: GestureTracker,
    scroll: ScrollExpandTracker,
    callbacks: SheetCallbacks,
    pending: VecDeque<SheetNotification>,
}

impl<S: PresentationSurface> Sheet<S> {
    pub fn new(config: SheetConfig, surface: S) -> Self {
        let scroll = ScrollExpandTracker::new(config.scroll_expand_threshold, config.scroll_cooldown);
        let mut sheet = Self {
            config,
            surface,
            snap_points: None,
            sheet_height: 0.0,
            phase: SheetPhase::Closed,
            current_index: None,
            driver: TransitionDriver::new(0.0, 0.0),
            gesture: GestureTracker::new(),
            scroll,
            callbacks: SheetCallbacks::default(),
            pending: VecDeque::new(),
        };
        sheet.resolve_geometry();
        sheet.driver.jump_to(sheet.hidden_offset(), 0.0);
        sheet
    }

    // -- Callbacks --

    /// Called once each time an open transition settles.
    pub fn on_open(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.on_open = Some(Box::new(callback));
    }

    /// Called once each time a close transition settles.
    pub fn on_close(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.on_close = Some(Box::new(callback));
    }

    /// Called with the new index each time the sheet settles on a different snap point.
    pub fn on_snap_point_change(&mut self, callback: impl FnMut(usize) + 'static) {
        self.callbacks.on_snap_point_change = Some(Box::new(callback));
    }

    // -- Accessors --

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }

    pub fn is_transition_in_flight(&self) -> bool {
        self.driver.is_in_flight()
    }

    /// Snap index the sheet last settled at. `None` while closed or without snap points.
    pub fn current_snap_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Resolved snap heights, or `None` outside snap mode.
    pub fn snap_points(&self) -> Option<&SnapPoints> {
        self.snap_points.as_ref()
    }

    /// Current offset from the tallest height, 0 when fully expanded.
    pub fn offset(&self) -> f32 {
        self.driver.offset()
    }

    pub fn backdrop_opacity(&self) -> f32 {
        self.driver.backdrop_opacity()
    }

    /// Height the panel is laid out at.
    pub fn sheet_height(&self) -> f32 {
        self.sheet_height
    }

    /// Whether the host must keep calling [`Sheet::update`].
    pub fn needs_update(&self) -> bool {
        self.driver.is_in_flight() || !self.pending.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The frame that would be presented right now.
    pub fn frame(&self) -> SheetFrame {
        SheetFrame {
            offset: self.driver.offset(),
            backdrop_opacity: self.driver.backdrop_opacity(),
            visible: self.phase.is_visible(),
            sheet_height: self.sheet_height,
            style: self.config.style,
        }
    }

    // -- Imperative operations --

    /// Show the sheet and animate it to its initial position.
    ///
    /// Ignored unless the sheet is fully closed.
    pub fn open(&mut self) {
        if self.phase != SheetPhase::Closed {
            tracing::debug!(phase = ?self.phase, "open ignored");
            return;
        }

        self.resolve_geometry();
        self.surface.show();

        let backdrop = self.config.backdrop_opacity;
        let tween = self.config.tween();
        match self.snap_points.as_ref() {
            Some(snap) => {
                let index = snap.clamp_index(self.config.initial_snap_index);
                let offset = snap.offset_for_index(index);
                self.current_index = Some(index);
                self.driver.jump_to(offset, 0.0);
                self.driver
                    .begin(TransitionKind::Open, TransitionTargets::backdrop(backdrop), tween);
            }
            None => {
                self.current_index = None;
                self.driver.jump_to(self.sheet_height, 0.0);
                self.driver
                    .begin(TransitionKind::Open, TransitionTargets::both(0.0, backdrop), tween);
            }
        }

        self.phase = SheetPhase::Opening;
        self.present_frame();
    }

    /// Animate the sheet off the surface and hide it.
    ///
    /// Ignored when closed or already closing; supersedes any other transition.
    pub fn close(&mut self) {
        if matches!(self.phase, SheetPhase::Closed | SheetPhase::Closing) {
            tracing::debug!(phase = ?self.phase, "close ignored");
            return;
        }

        self.gesture.cancel();
        self.driver.begin(
            TransitionKind::Close,
            TransitionTargets::both(self.hidden_offset(), 0.0),
            self.config.tween(),
        );
        self.phase = SheetPhase::Closing;
        self.present_frame();
    }

    /// Alias of [`Sheet::open`].
    pub fn present(&mut self) {
        self.open();
    }

    /// Alias of [`Sheet::close`].
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Animate to the snap point at `index`.
    ///
    /// Ignored outside snap mode, for out-of-range indices, while the sheet
    /// is closed, opening or closing, and when `index` is already the
    /// target. Supersedes an in-flight snap.
    pub fn snap_to_point(&mut self, index: usize) {
        let Some(snap) = self.snap_points.as_ref() else {
            tracing::debug!(index, "snap_to_point ignored: no snap points");
            return;
        };
        if index >= snap.len() {
            tracing::debug!(index, count = snap.len(), "snap_to_point ignored: out of range");
            return;
        }
        if !matches!(self.phase, SheetPhase::Open | SheetPhase::Transitioning) {
            tracing::debug!(index, phase = ?self.phase, "snap_to_point ignored");
            return;
        }
        if self.target_index() == Some(index) && !self.gesture.is_active() {
            return;
        }

        self.gesture.cancel();
        self.start_snap(index);
    }

    /// Replace the snap configuration and re-resolve geometry.
    pub fn set_snap_points(&mut self, points: impl IntoIterator<Item = SnapPoint>) {
        self.config.snap_points = points.into_iter().collect();
        self.relayout();
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: SheetConfig) {
        self.scroll.set_threshold(config.scroll_expand_threshold);
        self.scroll.set_cooldown(config.scroll_cooldown);
        self.config = config;
        self.relayout();
    }

    /// Re-resolve geometry after the surface's viewport changed.
    pub fn handle_viewport_change(&mut self) {
        self.relayout();
    }

    // -- Direct drag --

    /// Start a drag on the handle. Refused while closed or in flight.
    pub fn handle_pointer_down(&mut self, sample: PointerSample) -> bool {
        if self.phase != SheetPhase::Open {
            tracing::debug!(phase = ?self.phase, "drag start suppressed");
            return false;
        }
        self.gesture.begin(sample, self.driver.offset());
        tracing::debug!(offset = self.driver.offset(), "drag started");
        true
    }

    pub fn handle_pointer_move(&mut self, sample: PointerSample) -> bool {
        let Some(offset) = self.gesture.update(sample, 0.0) else {
            return false;
        };
        if self.driver.drag_to(offset) {
            tracing::trace!(offset, "drag moved");
            self.present_frame();
        }
        true
    }

    pub fn handle_pointer_up(&mut self, sample: PointerSample) -> bool {
        let Some(release) = self.gesture.end(sample, 0.0) else {
            return false;
        };
        self.driver.drag_to(release.offset);
        self.settle_after_drag(release);
        true
    }

    /// The pointer stream was cancelled; return to the resting position.
    pub fn handle_pointer_cancel(&mut self) -> bool {
        if !self.gesture.cancel() {
            return false;
        }
        tracing::debug!("drag cancelled");
        match self.current_index {
            Some(index) if self.snap_points.is_some() => self.start_snap(index),
            _ => self.start_settle(),
        }
        true
    }

    // -- Content scroll --

    pub fn handle_scroll_begin_drag(&mut self, sample: ScrollSample) {
        self.scroll.begin_drag(sample);
    }

    /// Returns true when the scroll changed the sheet's target.
    pub fn handle_scroll(&mut self, sample: ScrollSample) -> bool {
        let Some(ctx) = self.scroll_context() else {
            self.scroll.observe(sample);
            return false;
        };
        match self.scroll.on_scroll(sample, ctx) {
            Some(intent) => self.apply_scroll_intent(intent),
            None => false,
        }
    }

    /// Returns true when the release collapsed or dismissed the sheet.
    pub fn handle_scroll_end_drag(&mut self, sample: ScrollSample) -> bool {
        let Some(ctx) = self.scroll_context() else {
            self.scroll.observe(sample);
            return false;
        };
        match self.scroll.end_drag(sample, ctx) {
            Some(intent) => self.apply_scroll_intent(intent),
            None => false,
        }
    }

    // -- Backdrop and batched input --

    pub fn handle_backdrop_press(&mut self) -> bool {
        if !self.config.close_on_backdrop_press || !self.phase.is_visible() {
            return false;
        }
        self.close();
        true
    }

    /// Route a batch of input to the matching handlers, consuming what the sheet used.
    pub fn handle_events(&mut self, events: &mut InputBatch) {
        profile_function!();
        events.dispatch(|event| {
            let used = match event {
                SheetInput::PointerDown(sample) => self.handle_pointer_down(*sample),
                SheetInput::PointerMove(sample) => self.handle_pointer_move(*sample),
                SheetInput::PointerUp(sample) => self.handle_pointer_up(*sample),
                SheetInput::PointerCancel => self.handle_pointer_cancel(),
                SheetInput::ScrollBeginDrag(sample) => {
                    self.handle_scroll_begin_drag(*sample);
                    return HandleStatus::handled();
                }
                SheetInput::Scroll(sample) => {
                    self.handle_scroll(*sample);
                    return HandleStatus::handled();
                }
                SheetInput::ScrollEndDrag(sample) => {
                    self.handle_scroll_end_drag(*sample);
                    return HandleStatus::handled();
                }
                SheetInput::BackdropPress => self.handle_backdrop_press(),
            };
            if used {
                HandleStatus::consumed()
            } else {
                HandleStatus::ignored()
            }
        });
    }

    // -- Frame loop --

    /// Advance the sheet by `delta_time` seconds.
    ///
    /// Notifications queued by transitions that settled during the previous
    /// update are delivered first.
    pub fn update(&mut self, delta_time: f32) {
        profile_function!();
        self.dispatch_notifications();

        let was_visible = self.phase.is_visible();
        if let Some(done) = self.driver.update(delta_time) {
            self.finish(done);
        }
        if was_visible {
            self.present_frame();
        }
        if was_visible && !self.phase.is_visible() {
            self.surface.hide();
        }
    }

    // -- Internals --

    fn resolve_geometry(&mut self) {
        let viewport = self.surface.viewport_size().extent();
        self.snap_points = SnapPoints::normalize(&self.config.snap_points, viewport);
        if self.snap_points.is_none() && self.config.has_snap_points() {
            tracing::warn!(viewport, "no usable snap points, falling back to a fixed height");
        }

        self.sheet_height = match self.snap_points.as_ref() {
            Some(snap) => snap.max(),
            None => self
                .config
                .height
                .or_else(|| self.surface.content_extent())
                .map_or(viewport, |height| height.min(viewport))
                .max(0.0),
        };
        tracing::debug!(
            viewport,
            sheet_height = self.sheet_height,
            snap = ?self.snap_points.as_ref().map(SnapPoints::pixels),
            "resolved sheet geometry"
        );
    }

    fn relayout(&mut self) {
        self.resolve_geometry();

        match self.phase {
            SheetPhase::Closed => {
                self.driver.jump_to(self.hidden_offset(), 0.0);
            }
            SheetPhase::Open | SheetPhase::Transitioning => {
                self.gesture.cancel();
                let target = self.target_index();
                self.driver.cancel();
                let index = self.snap_points.as_ref().map(|snap| {
                    snap.clamp_index(target.unwrap_or(self.config.initial_snap_index))
                });
                if let Some(index) = index
                    && self.current_index != Some(index)
                {
                    self.pending
                        .push_back(SheetNotification::SnapPointChanged(index));
                }
                self.current_index = index;
                self.driver
                    .jump_to(self.rest_offset(), self.config.backdrop_opacity);
                self.phase = SheetPhase::Open;
                self.present_frame();
            }
            SheetPhase::Opening => {
                let backdrop = self.driver.backdrop_opacity();
                let tween = self.config.tween();
                let opacity = self.config.backdrop_opacity;
                match self.snap_points.as_ref() {
                    Some(snap) => {
                        let index = snap
                            .clamp_index(self.current_index.unwrap_or(self.config.initial_snap_index));
                        self.current_index = Some(index);
                        self.driver.jump_to(snap.offset_for_index(index), backdrop);
                        self.driver
                            .begin(TransitionKind::Open, TransitionTargets::backdrop(opacity), tween);
                    }
                    None => {
                        self.current_index = None;
                        let offset = self.driver.offset().min(self.sheet_height);
                        self.driver.jump_to(offset, backdrop);
                        self.driver
                            .begin(TransitionKind::Open, TransitionTargets::both(0.0, opacity), tween);
                    }
                }
                tracing::debug!(index = ?self.current_index, "geometry changed while opening");
                self.present_frame();
            }
            SheetPhase::Closing => {
                self.current_index = match (self.snap_points.as_ref(), self.current_index) {
                    (Some(snap), Some(index)) => Some(snap.clamp_index(index)),
                    _ => None,
                };
                self.driver.begin(
                    TransitionKind::Close,
                    TransitionTargets::both(self.hidden_offset(), 0.0),
                    self.config.tween(),
                );
                tracing::debug!("geometry changed while closing");
                self.present_frame();
            }
        }
    }

    /// Offset at which the sheet is entirely off the surface.
    fn hidden_offset(&self) -> f32 {
        self.sheet_height
    }

    /// Offset the sheet rests at for its settled index.
    fn rest_offset(&self) -> f32 {
        match (self.snap_points.as_ref(), self.current_index) {
            (Some(snap), Some(index)) => snap.offset_for_index(index),
            _ => 0.0,
        }
    }

    /// Index the sheet is settled at or heading to.
    fn target_index(&self) -> Option<usize> {
        match self.driver.active_kind() {
            Some(TransitionKind::Snap { to, .. }) => Some(to),
            _ => self.current_index,
        }
    }

    fn start_snap(&mut self, index: usize) {
        let Some(snap) = self.snap_points.as_ref() else {
            return;
        };
        let index = snap.clamp_index(index);
        let target = snap.offset_for_index(index);
        self.driver.begin(
            TransitionKind::Snap {
                from: self.current_index,
                to: index,
            },
            TransitionTargets::offset(target),
            self.config.tween(),
        );
        self.phase = SheetPhase::Transitioning;
    }

    fn start_settle(&mut self) {
        let rest = self.rest_offset();
        self.driver.animate_to(rest, self.config.tween());
        self.phase = SheetPhase::Transitioning;
    }

    fn settle_after_drag(&mut self, release: GestureRelease) {
        let threshold = self.config.drag_threshold;
        let Some(snap) = self.snap_points.as_ref() else {
            if release.should_dismiss(threshold) {
                tracing::debug!(?release, "drag dismissed sheet");
                self.close();
            } else {
                self.start_settle();
            }
            return;
        };

        let settled = self.current_index.unwrap_or(0);
        let target = match snap.nearest_index(release.offset, threshold) {
            SnapTarget::Index(nearest) if nearest == settled && release.is_fling() => {
                if release.velocity > 0.0 {
                    settled.checked_sub(1).map_or(SnapTarget::Close, SnapTarget::Index)
                } else {
                    SnapTarget::Index((settled + 1).min(snap.last_index()))
                }
            }
            other => other,
        };
        tracing::debug!(?release, ?target, "drag released");

        match target {
            SnapTarget::Close => self.close(),
            SnapTarget::Index(index) => self.start_snap(index),
        }
    }

    fn scroll_context(&self) -> Option<ScrollContext> {
        if !self.config.enable_scroll_to_expand || self.gesture.is_active() {
            return None;
        }
        if !matches!(self.phase, SheetPhase::Open | SheetPhase::Transitioning) {
            return None;
        }
        let snap = self.snap_points.as_ref()?;
        Some(ScrollContext {
            current_index: self.target_index()?,
            last_index: snap.last_index(),
        })
    }

    fn apply_scroll_intent(&mut self, intent: ScrollIntent) -> bool {
        match intent {
            ScrollIntent::SnapTo(index) => {
                if self.target_index() == Some(index) {
                    return false;
                }
                self.start_snap(index);
            }
            ScrollIntent::Close => self.close(),
        }
        true
    }

    fn finish(&mut self, done: CompletedTransition) {
        match done.kind {
            TransitionKind::Open => {
                self.phase = SheetPhase::Open;
                self.pending.push_back(SheetNotification::Opened);
            }
            TransitionKind::Close => {
                self.phase = SheetPhase::Closed;
                self.current_index = None;
                self.scroll.reset();
                self.pending.push_back(SheetNotification::Closed);
            }
            TransitionKind::Snap { from, to } => {
                self.phase = SheetPhase::Open;
                self.current_index = Some(to);
                if from != Some(to) {
                    self.pending
                        .push_back(SheetNotification::SnapPointChanged(to));
                }
            }
            TransitionKind::Settle => {
                self.phase = SheetPhase::Open;
            }
        }
    }

    fn dispatch_notifications(&mut self) {
        while let Some(notification) = self.pending.pop_front() {
            tracing::debug!(?notification, "notifying");
            match notification {
                SheetNotification::Opened => {
                    if let Some(callback) = self.callbacks.on_open.as_mut() {
                        callback();
                    }
                }
                SheetNotification::Closed => {
                    if let Some(callback) = self.callbacks.on_close.as_mut() {
                        callback();
                    }
                }
                SheetNotification::SnapPointChanged(index) => {
                    if let Some(callback) = self.callbacks.on_snap_point_change.as_mut() {
                        callback(index);
                    }
                }
            }
        }
    }

    fn present_frame(&mut self) {
        let frame = self.frame();
        self.surface.present(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_core::geometry::Size;

    struct NullSurface {
        shown: bool,
    }

    impl PresentationSurface for NullSurface {
        fn show(&mut self) {
            self.shown = true;
        }

        fn hide(&mut self) {
            self.shown = false;
        }

        fn viewport_size(&self) -> Size<f32> {
            Size::new(320.0, 600.0)
        }

        fn present(&mut self, _frame: &SheetFrame) {}
    }

    fn sheet(config: SheetConfig) -> Sheet<NullSurface> {
        Sheet::new(config, NullSurface { shown: false })
    }

    #[test]
    fn test_phase_flags() {
        assert!(!SheetPhase::Closed.is_visible());
        assert!(!SheetPhase::Open.is_in_flight());
        assert!(SheetPhase::Opening.is_in_flight());
        assert!(SheetPhase::Transitioning.is_in_flight());
        assert!(SheetPhase::Closing.is_visible());
    }

    #[test]
    fn test_target_index_follows_in_flight_snap() {
        let mut sheet = sheet(SheetConfig::new().snap_points([0.5, 1.0].map(SnapPoint::from)));
        sheet.open();
        while sheet.needs_update() {
            sheet.update(0.05);
        }
        assert_eq!(sheet.target_index(), Some(0));

        sheet.snap_to_point(1);
        assert_eq!(sheet.current_snap_index(), Some(0));
        assert_eq!(sheet.target_index(), Some(1));
    }

    #[test]
    fn test_height_falls_back_to_viewport() {
        let sheet = sheet(SheetConfig::new());
        assert_eq!(sheet.sheet_height(), 600.0);
        assert_eq!(sheet.offset(), 600.0);
        assert!(!sheet.surface().shown);
    }

    #[test]
    fn test_explicit_height_clamped_to_viewport() {
        let sheet = sheet(SheetConfig::new().height(900.0));
        assert_eq!(sheet.sheet_height(), 600.0);
    }

    #[test]
    fn test_frame_reflects_state() {
        let mut sheet = sheet(SheetConfig::new().height(300.0));
        assert!(!sheet.frame().visible);

        sheet.open();
        let frame = sheet.frame();
        assert!(frame.visible);
        assert_eq!(frame.sheet_height, 300.0);
        assert_eq!(frame.offset, 300.0);
        assert!(sheet.surface().shown);
    }
}
