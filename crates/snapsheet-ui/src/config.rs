//! Sheet configuration.

use std::time::Duration;

use crate::animation::{EasingFunction, TweenSpec};
use crate::snap::SnapPoint;
use crate::style::SheetStyle;

pub const DEFAULT_DRAG_THRESHOLD: f32 = 125.0;
pub const DEFAULT_SCROLL_EXPAND_THRESHOLD: f32 = 50.0;
pub const DEFAULT_SCROLL_COOLDOWN: Duration = Duration::from_millis(450);
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
pub const DEFAULT_BACKDROP_OPACITY: f32 = 0.5;

/// Configuration for a [`Sheet`](crate::Sheet).
///
/// ```
/// use snapsheet_ui::{SheetConfig, SnapPoint};
///
/// let config = SheetConfig::new()
///     .snap_points([0.3, 0.6, 0.9].map(SnapPoint::from))
///     .initial_snap_index(1)
///     .drag_threshold(100.0);
/// assert!(config.has_snap_points());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Snap heights. Empty means a single fixed or content-sized height.
    pub snap_points: Vec<SnapPoint>,
    /// Snap index the sheet opens at; clamped to the resolved range.
    pub initial_snap_index: usize,
    /// Explicit height without snap points.
    pub height: Option<f32>,
    pub enable_scroll_to_expand: bool,
    /// Content scroll distance in px that triggers a snap step.
    pub scroll_expand_threshold: f32,
    /// Minimum time between two scroll-triggered snap changes.
    pub scroll_cooldown: Duration,
    /// Distance in px that separates dismissing from snapping back.
    pub drag_threshold: f32,
    pub animation_duration: Duration,
    pub easing: EasingFunction,
    /// Backdrop opacity while open.
    pub backdrop_opacity: f32,
    pub close_on_backdrop_press: bool,
    pub style: SheetStyle,
}

impl SheetConfig {
    pub fn new() -> Self {
        Self {
            snap_points: Vec::new(),
            initial_snap_index: 0,
            height: None,
            enable_scroll_to_expand: true,
            scroll_expand_threshold: DEFAULT_SCROLL_EXPAND_THRESHOLD,
            scroll_cooldown: DEFAULT_SCROLL_COOLDOWN,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            easing: EasingFunction::default(),
            backdrop_opacity: DEFAULT_BACKDROP_OPACITY,
            close_on_backdrop_press: true,
            style: SheetStyle::default(),
        }
    }

    pub fn snap_points(mut self, points: impl IntoIterator<Item = SnapPoint>) -> Self {
        self.snap_points = points.into_iter().collect();
        self
    }

    pub fn initial_snap_index(mut self, index: usize) -> Self {
        self.initial_snap_index = index;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn enable_scroll_to_expand(mut self, enable: bool) -> Self {
        self.enable_scroll_to_expand = enable;
        self
    }

    pub fn scroll_expand_threshold(mut self, threshold: f32) -> Self {
        self.scroll_expand_threshold = threshold;
        self
    }

    pub fn scroll_cooldown(mut self, cooldown: Duration) -> Self {
        self.scroll_cooldown = cooldown;
        self
    }

    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn backdrop_opacity(mut self, opacity: f32) -> Self {
        self.backdrop_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn close_on_backdrop_press(mut self, close: bool) -> Self {
        self.close_on_backdrop_press = close;
        self
    }

    pub fn style(mut self, style: SheetStyle) -> Self {
        self.style = style;
        self
    }

    pub fn has_snap_points(&self) -> bool {
        !self.snap_points.is_empty()
    }

    /// Tween used by every sheet transition.
    pub fn tween(&self) -> TweenSpec {
        TweenSpec::new(self.animation_duration, self.easing)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}
