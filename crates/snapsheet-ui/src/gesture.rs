//! Direct drag tracking for the sheet's handle.

use snapsheet_input::{PointerSample, VelocityTracker};

/// Fling speed (px/ms) above which a release counts as a flick.
pub const FLING_VELOCITY: f32 = 0.5;

/// Minimum speed (px/ms) for a half-threshold drag to still dismiss.
pub const SLOW_DISMISS_VELOCITY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSession {
    start_position: f32,
    start_offset: f32,
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    /// Pointer travel since the press, positive downward.
    pub delta: f32,
    /// Release velocity in px/ms, positive downward.
    pub velocity: f32,
    /// Sheet offset at release.
    pub offset: f32,
}

impl GestureRelease {
    /// Whether a sheet without snap points should be dismissed.
    pub fn should_dismiss(&self, drag_threshold: f32) -> bool {
        self.velocity > FLING_VELOCITY
            || (self.delta > drag_threshold / 2.0 && self.velocity > SLOW_DISMISS_VELOCITY)
            || self.delta > drag_threshold
    }

    pub fn is_fling(&self) -> bool {
        self.velocity.abs() > FLING_VELOCITY
    }
}

/// Turns a press/move/release stream into sheet offsets.
///
/// The tracker never decides whether a drag may start; the caller checks
/// for in-flight transitions before calling [`GestureTracker::begin`].
#[derive(Debug, Default)]
pub struct GestureTracker {
    session: Option<GestureSession>,
    velocity: VelocityTracker,
    last_offset: f32,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag at `sample` with the sheet resting at `current_offset`.
    pub fn begin(&mut self, sample: PointerSample, current_offset: f32) {
        self.velocity.reset();
        self.velocity.push(sample.timestamp, sample.position.y);
        self.last_offset = current_offset;
        self.session = Some(GestureSession {
            start_position: sample.position.y,
            start_offset: current_offset,
        });
    }

    /// Track a move. Returns the new sheet offset, never below `min_offset`.
    pub fn update(&mut self, sample: PointerSample, min_offset: f32) -> Option<f32> {
        let session = self.session?;
        self.velocity.push(sample.timestamp, sample.position.y);

        let delta = sample.position.y - session.start_position;
        let offset = (session.start_offset + delta).max(min_offset);
        self.last_offset = offset;
        Some(offset)
    }

    /// Finish the drag, returning the release summary.
    pub fn end(&mut self, sample: PointerSample, min_offset: f32) -> Option<GestureRelease> {
        let session = self.session?;
        let offset = self.update(sample, min_offset).unwrap_or(self.last_offset);
        self.session = None;

        Some(GestureRelease {
            delta: sample.position.y - session.start_position,
            velocity: self.velocity.velocity(),
            offset,
        })
    }

    /// Abandon the drag without a release decision.
    pub fn cancel(&mut self) -> bool {
        self.velocity.reset();
        self.session.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(y: f32, ms: u64) -> PointerSample {
        PointerSample::vertical(y, Duration::from_millis(ms))
    }

    #[test]
    fn test_update_without_session_is_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.update(at(10.0, 0), 0.0), None);
        assert_eq!(tracker.end(at(10.0, 0), 0.0), None);
    }

    #[test]
    fn test_offset_follows_pointer() {
        let mut tracker = GestureTracker::new();
        tracker.begin(at(500.0, 0), 300.0);
        assert_eq!(tracker.update(at(540.0, 16), 0.0), Some(340.0));
        assert_eq!(tracker.update(at(450.0, 32), 0.0), Some(250.0));
    }

    #[test]
    fn test_offset_clamped_at_min() {
        let mut tracker = GestureTracker::new();
        tracker.begin(at(500.0, 0), 100.0);
        assert_eq!(tracker.update(at(300.0, 16), 0.0), Some(0.0));
    }

    #[test]
    fn test_release_reports_delta_and_velocity() {
        let mut tracker = GestureTracker::new();
        tracker.begin(at(100.0, 0), 0.0);
        tracker.update(at(120.0, 10), 0.0);
        let release = tracker.end(at(140.0, 20), 0.0).unwrap();
        assert_eq!(release.delta, 40.0);
        assert_eq!(release.offset, 40.0);
        assert!((release.velocity - 2.0).abs() < 1e-4);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_dismiss_heuristic() {
        let threshold = 125.0;
        let release = |delta, velocity| GestureRelease {
            delta,
            velocity,
            offset: delta,
        };
        assert!(release(10.0, 0.6).should_dismiss(threshold));
        assert!(release(70.0, 0.2).should_dismiss(threshold));
        assert!(!release(70.0, 0.05).should_dismiss(threshold));
        assert!(release(130.0, 0.0).should_dismiss(threshold));
        assert!(!release(40.0, 0.3).should_dismiss(threshold));
    }

    #[test]
    fn test_cancel_ends_session() {
        let mut tracker = GestureTracker::new();
        tracker.begin(at(0.0, 0), 0.0);
        assert!(tracker.cancel());
        assert!(!tracker.is_active());
        assert!(!tracker.cancel());
    }
}
