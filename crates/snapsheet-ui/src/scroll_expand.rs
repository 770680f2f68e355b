//! Snap changes driven by the sheet's own scrollable content.
//!
//! Scrolling the content down while the sheet is not fully expanded grows
//! the sheet; pulling past the top of the content shrinks or dismisses it.
//! The tracker only produces intents. The sheet applies them through the
//! same entry points as every other transition.

use std::time::Duration;

use snapsheet_input::ScrollSample;

/// Scroll speed (px/ms) that expands regardless of distance travelled.
pub const EXPAND_VELOCITY: f32 = 0.8;

/// Above this speed an expand skips one snap point.
pub const SKIP_ONE_VELOCITY: f32 = 2.2;

/// Above this speed an expand jumps straight to the last snap point.
pub const JUMP_TO_END_VELOCITY: f32 = 3.5;

/// Pull-to-collapse speed above which the sheet closes outright.
pub const PULL_TO_CLOSE_VELOCITY: f32 = 1.0;

/// What the content scroll asks the sheet to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollIntent {
    SnapTo(usize),
    Close,
}

/// Snap state the tracker decides against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollContext {
    pub current_index: usize,
    pub last_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollSession {
    start_position: f32,
    last_position: f32,
    last_timestamp: Duration,
    /// Position at the start of the session or at the last trigger.
    anchor: f32,
    velocity_estimate: f32,
}

impl ScrollSession {
    fn new(sample: &ScrollSample) -> Self {
        Self {
            start_position: sample.offset,
            last_position: sample.offset,
            last_timestamp: sample.timestamp,
            anchor: sample.offset,
            velocity_estimate: sample.velocity.unwrap_or(0.0),
        }
    }

    /// Record `sample`, returning (movement since last sample, velocity).
    fn advance(&mut self, sample: &ScrollSample) -> (f32, f32) {
        let delta = sample.offset - self.last_position;
        let elapsed_ms = sample.timestamp.saturating_sub(self.last_timestamp).as_secs_f32() * 1000.0;
        self.velocity_estimate = match sample.velocity {
            Some(velocity) => velocity,
            None if elapsed_ms > 0.0 => delta / elapsed_ms,
            None => self.velocity_estimate,
        };
        self.last_position = sample.offset;
        self.last_timestamp = sample.timestamp;
        (delta, self.velocity_estimate)
    }
}

/// Derives expand/collapse intents from content scroll events.
#[derive(Debug)]
pub struct ScrollExpandTracker {
    threshold: f32,
    cooldown: Duration,
    session: Option<ScrollSession>,
    last_trigger: Option<Duration>,
}

impl ScrollExpandTracker {
    pub fn new(threshold: f32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            session: None,
            last_trigger: None,
        }
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn set_cooldown(&mut self, cooldown: Duration) {
        self.cooldown = cooldown;
    }

    /// Whether a trigger at `now` is past the cooldown of the previous one.
    ///
    /// The boundary is exclusive: a trigger exactly one cooldown later is still rejected.
    pub fn can_trigger(&self, now: Duration) -> bool {
        self.last_trigger
            .is_none_or(|last| now.saturating_sub(last) > self.cooldown)
    }

    /// Forget the current session and the cooldown latch.
    pub fn reset(&mut self) {
        self.session = None;
        self.last_trigger = None;
    }

    pub fn begin_drag(&mut self, sample: ScrollSample) {
        self.session = Some(ScrollSession::new(&sample));
    }

    /// Track a scroll event without deciding anything, e.g. while the sheet
    /// is not in a state that accepts scroll-driven changes.
    pub fn observe(&mut self, sample: ScrollSample) {
        self.session
            .get_or_insert_with(|| ScrollSession::new(&sample))
            .advance(&sample);
    }

    /// Handle a continuous scroll event.
    pub fn on_scroll(&mut self, sample: ScrollSample, ctx: ScrollContext) -> Option<ScrollIntent> {
        let session = self
            .session
            .get_or_insert_with(|| ScrollSession::new(&sample));
        let (delta, velocity) = session.advance(&sample);
        let anchor = session.anchor;

        if !self.can_trigger(sample.timestamp) {
            return None;
        }

        let intent = if delta > 0.0 && ctx.current_index < ctx.last_index {
            let travelled = sample.offset - anchor;
            if travelled > self.threshold || velocity > EXPAND_VELOCITY {
                Some(ScrollIntent::SnapTo(expand_target(ctx, velocity)))
            } else {
                None
            }
        } else if delta < 0.0 && sample.offset <= 0.0 {
            let overscroll = anchor.min(0.0) - sample.offset;
            if overscroll > self.threshold || velocity < -EXPAND_VELOCITY {
                Some(collapse_target(ctx, velocity))
            } else {
                None
            }
        } else {
            None
        };

        if let Some(intent) = intent {
            self.trigger(sample);
            tracing::debug!(?intent, velocity, offset = sample.offset, "scroll triggered snap change");
        }
        intent
    }

    /// Handle the end of a user-driven scroll: pull-to-collapse.
    ///
    /// Ends the session; the next scroll starts from its own sample.
    pub fn end_drag(&mut self, sample: ScrollSample, ctx: ScrollContext) -> Option<ScrollIntent> {
        let mut session = self
            .session
            .take()
            .unwrap_or_else(|| ScrollSession::new(&sample));
        let started_at_top = session.start_position <= 0.0;
        let (_, velocity) = session.advance(&sample);

        if !started_at_top || sample.offset > 0.0 || velocity >= 0.0 {
            return None;
        }
        if !self.can_trigger(sample.timestamp) {
            return None;
        }

        let intent = if velocity.abs() > PULL_TO_CLOSE_VELOCITY || ctx.current_index == 0 {
            ScrollIntent::Close
        } else {
            ScrollIntent::SnapTo(ctx.current_index - 1)
        };
        self.last_trigger = Some(sample.timestamp);
        tracing::debug!(?intent, velocity, "pull-to-collapse");
        Some(intent)
    }

    fn trigger(&mut self, sample: ScrollSample) {
        self.last_trigger = Some(sample.timestamp);
        if let Some(session) = self.session.as_mut() {
            session.anchor = sample.offset;
        }
    }
}

fn expand_target(ctx: ScrollContext, velocity: f32) -> usize {
    if velocity > JUMP_TO_END_VELOCITY {
        ctx.last_index
    } else if velocity > SKIP_ONE_VELOCITY {
        (ctx.current_index + 2).min(ctx.last_index)
    } else {
        ctx.current_index + 1
    }
}

fn collapse_target(ctx: ScrollContext, velocity: f32) -> ScrollIntent {
    if velocity < -JUMP_TO_END_VELOCITY {
        return match ctx.current_index {
            0 => ScrollIntent::Close,
            _ => ScrollIntent::SnapTo(0),
        };
    }
    let steps = if velocity <= -SKIP_ONE_VELOCITY { 2 } else { 1 };

    match ctx.current_index.checked_sub(steps) {
        Some(index) => ScrollIntent::SnapTo(index),
        None => ScrollIntent::Close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(450);

    fn ctx(current_index: usize) -> ScrollContext {
        ScrollContext {
            current_index,
            last_index: 2,
        }
    }

    fn sample(offset: f32, velocity: f32, ms: u64) -> ScrollSample {
        ScrollSample::new(offset, Some(velocity), Duration::from_millis(ms))
    }

    fn tracker() -> ScrollExpandTracker {
        ScrollExpandTracker::new(50.0, COOLDOWN)
    }

    #[test]
    fn test_fast_scroll_jumps_to_last_index() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.on_scroll(sample(10.0, 4.0, 16), ctx(0)),
            Some(ScrollIntent::SnapTo(2))
        );
    }

    #[test]
    fn test_medium_scroll_skips_one() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.on_scroll(sample(10.0, 3.0, 16), ScrollContext { current_index: 0, last_index: 3 }),
            Some(ScrollIntent::SnapTo(2))
        );
    }

    #[test]
    fn test_slow_scroll_needs_threshold_distance() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(t.on_scroll(sample(30.0, 0.3, 16), ctx(0)), None);
        assert_eq!(
            t.on_scroll(sample(60.0, 0.3, 32), ctx(0)),
            Some(ScrollIntent::SnapTo(1))
        );
    }

    #[test]
    fn test_no_expand_at_last_index() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(t.on_scroll(sample(200.0, 4.0, 16), ctx(2)), None);
    }

    #[test]
    fn test_cooldown_blocks_retrigger() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert!(t.on_scroll(sample(10.0, 1.0, 16), ctx(0)).is_some());
        assert_eq!(t.on_scroll(sample(20.0, 1.0, 32), ctx(1)), None);
        assert!(!t.can_trigger(Duration::from_millis(400)));
        assert_eq!(
            t.on_scroll(sample(30.0, 1.0, 500), ctx(1)),
            Some(ScrollIntent::SnapTo(2))
        );
    }

    #[test]
    fn test_overscroll_collapses() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.on_scroll(sample(-5.0, -1.0, 16), ctx(2)),
            Some(ScrollIntent::SnapTo(1))
        );
    }

    #[test]
    fn test_collapse_velocity_tiers() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.on_scroll(sample(-5.0, -4.0, 16), ctx(2)),
            Some(ScrollIntent::SnapTo(0))
        );

        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.on_scroll(sample(-5.0, -3.0, 16), ctx(2)),
            Some(ScrollIntent::SnapTo(0))
        );

        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.on_scroll(sample(-5.0, -3.0, 16), ctx(1)),
            Some(ScrollIntent::Close)
        );
    }

    #[test]
    fn test_hard_overscroll_at_first_index_closes() {
        let mut soft = tracker();
        soft.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            soft.on_scroll(sample(-5.0, -1.0, 16), ctx(0)),
            Some(ScrollIntent::Close)
        );

        let mut hard = tracker();
        hard.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            hard.on_scroll(sample(-5.0, -4.0, 16), ctx(0)),
            Some(ScrollIntent::Close)
        );
    }

    #[test]
    fn test_cooldown_boundary_is_exclusive() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert!(t.on_scroll(sample(10.0, 1.0, 100), ctx(0)).is_some());
        assert!(!t.can_trigger(Duration::from_millis(550)));
        assert!(t.can_trigger(Duration::from_millis(551)));
    }

    #[test]
    fn test_release_ends_session() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(t.end_drag(sample(200.0, 0.0, 300), ctx(0)), None);

        // A scroll without a new drag start must not measure from the old session.
        assert_eq!(t.on_scroll(sample(220.0, 0.1, 600), ctx(0)), None);
    }

    #[test]
    fn test_reaching_top_slowly_does_not_collapse() {
        let mut t = tracker();
        t.begin_drag(sample(400.0, 0.0, 0));
        assert_eq!(t.on_scroll(sample(0.0, -0.4, 16), ctx(2)), None);
    }

    #[test]
    fn test_pull_to_collapse_on_release() {
        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.end_drag(sample(-20.0, -0.5, 100), ctx(2)),
            Some(ScrollIntent::SnapTo(1))
        );

        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.end_drag(sample(-20.0, -1.5, 100), ctx(2)),
            Some(ScrollIntent::Close)
        );

        let mut t = tracker();
        t.begin_drag(sample(0.0, 0.0, 0));
        assert_eq!(
            t.end_drag(sample(-20.0, -0.5, 100), ctx(0)),
            Some(ScrollIntent::Close)
        );
    }

    #[test]
    fn test_release_away_from_top_is_ignored() {
        let mut t = tracker();
        t.begin_drag(sample(120.0, 0.0, 0));
        assert_eq!(t.end_drag(sample(0.0, -0.5, 100), ctx(2)), None);
    }

    #[test]
    fn test_velocity_estimated_when_missing() {
        let mut t = tracker();
        t.begin_drag(ScrollSample::new(0.0, None, Duration::from_millis(0)));
        // 20 px in 10 ms = 2.0 px/ms: over the expand velocity, one step.
        assert_eq!(
            t.on_scroll(ScrollSample::new(20.0, None, Duration::from_millis(10)), ctx(0)),
            Some(ScrollIntent::SnapTo(1))
        );
    }
}
