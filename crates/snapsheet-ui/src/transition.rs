//! The single writer of the sheet's offset and backdrop opacity.
//!
//! At most one transition is in flight. Beginning a new one stops both
//! channels and drops the previous transition, so a superseded transition
//! never reports completion.

use crate::animation::{AnimatedScalar, TweenSpec};

/// Monotonic identifier of a started transition.
pub type TransitionId = u64;

/// What a transition is for; decides what happens when it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Sheet appearing.
    Open,
    /// Sheet leaving the surface.
    Close,
    /// Moving between snap points. `from` is the index settled before the move.
    Snap { from: Option<usize>, to: usize },
    /// Returning to a rest offset without a snap change.
    Settle,
}

/// End values for a transition; `None` leaves that channel untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionTargets {
    pub offset: Option<f32>,
    pub backdrop: Option<f32>,
}

impl TransitionTargets {
    pub fn offset(offset: f32) -> Self {
        Self {
            offset: Some(offset),
            backdrop: None,
        }
    }

    pub fn backdrop(backdrop: f32) -> Self {
        Self {
            offset: None,
            backdrop: Some(backdrop),
        }
    }

    pub fn both(offset: f32, backdrop: f32) -> Self {
        Self {
            offset: Some(offset),
            backdrop: Some(backdrop),
        }
    }
}

/// A transition that ran to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedTransition {
    pub id: TransitionId,
    pub kind: TransitionKind,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    id: TransitionId,
    kind: TransitionKind,
    offset_pending: bool,
    backdrop_pending: bool,
}

#[derive(Debug)]
pub struct TransitionDriver {
    offset: AnimatedScalar,
    backdrop: AnimatedScalar,
    active: Option<ActiveTransition>,
    next_id: TransitionId,
}

impl TransitionDriver {
    pub fn new(offset: f32, backdrop: f32) -> Self {
        Self {
            offset: AnimatedScalar::new(offset),
            backdrop: AnimatedScalar::new(backdrop),
            active: None,
            next_id: 1,
        }
    }

    /// Current sheet offset from max.
    pub fn offset(&self) -> f32 {
        self.offset.current_value()
    }

    /// Current backdrop opacity.
    pub fn backdrop_opacity(&self) -> f32 {
        self.backdrop.current_value()
    }

    pub fn is_in_flight(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<TransitionKind> {
        self.active.map(|active| active.kind)
    }

    /// Start a transition, superseding any in-flight one.
    pub fn begin(
        &mut self,
        kind: TransitionKind,
        targets: TransitionTargets,
        spec: TweenSpec,
    ) -> TransitionId {
        if let Some(previous) = self.cancel() {
            tracing::debug!(?previous, next = ?kind, "superseding in-flight transition");
        }

        let id = self.next_id;
        self.next_id += 1;

        if let Some(offset) = targets.offset {
            self.offset.animate_to(offset, spec);
        }
        if let Some(backdrop) = targets.backdrop {
            self.backdrop.animate_to(backdrop, spec);
        }

        self.active = Some(ActiveTransition {
            id,
            kind,
            offset_pending: targets.offset.is_some(),
            backdrop_pending: targets.backdrop.is_some(),
        });
        tracing::debug!(id, ?kind, ?targets, from = self.offset(), "transition started");
        id
    }

    /// Animate only the offset to `target`.
    pub fn animate_to(&mut self, target: f32, spec: TweenSpec) -> TransitionId {
        self.begin(TransitionKind::Settle, TransitionTargets::offset(target), spec)
    }

    /// Stop the in-flight transition where it is. Its completion never fires.
    pub fn cancel(&mut self) -> Option<TransitionKind> {
        self.offset.stop();
        self.backdrop.stop();
        self.active.take().map(|active| active.kind)
    }

    /// Place both channels without animating, cancelling any transition.
    pub fn jump_to(&mut self, offset: f32, backdrop: f32) {
        self.cancel();
        self.offset.snap_to(offset);
        self.backdrop.snap_to(backdrop);
    }

    /// Write the offset directly for an active drag. Refused while in flight.
    pub fn drag_to(&mut self, offset: f32) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.offset.snap_to(offset);
        true
    }

    /// Advance the in-flight transition by `delta_time` seconds.
    ///
    /// Returns the transition on the update where its last channel lands.
    pub fn update(&mut self, delta_time: f32) -> Option<CompletedTransition> {
        let active = self.active.as_mut()?;

        if self.offset.update(delta_time) {
            active.offset_pending = false;
        }
        if self.backdrop.update(delta_time) {
            active.backdrop_pending = false;
        }

        if active.offset_pending || active.backdrop_pending {
            return None;
        }

        let done = self.active.take()?;
        tracing::debug!(id = done.id, kind = ?done.kind, offset = self.offset(), "transition settled");
        Some(CompletedTransition {
            id: done.id,
            kind: done.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;
    use std::time::Duration;

    fn linear(ms: u64) -> TweenSpec {
        TweenSpec::new(Duration::from_millis(ms), EasingFunction::Linear)
    }

    #[test]
    fn test_animate_to_completes_once() {
        let mut driver = TransitionDriver::new(600.0, 0.0);
        let id = driver.animate_to(0.0, linear(100));
        assert!(driver.is_in_flight());

        assert_eq!(driver.update(0.05), None);
        assert!((driver.offset() - 300.0).abs() < 0.01);

        let done = driver.update(0.05).unwrap();
        assert_eq!(done.id, id);
        assert_eq!(done.kind, TransitionKind::Settle);
        assert_eq!(driver.offset(), 0.0);
        assert!(!driver.is_in_flight());
        assert_eq!(driver.update(0.05), None);
    }

    #[test]
    fn test_superseded_transition_never_completes() {
        let mut driver = TransitionDriver::new(600.0, 0.0);
        driver.begin(
            TransitionKind::Snap { from: Some(0), to: 1 },
            TransitionTargets::offset(300.0),
            linear(100),
        );
        driver.update(0.05);
        let second = driver.begin(
            TransitionKind::Snap { from: Some(0), to: 2 },
            TransitionTargets::offset(0.0),
            linear(100),
        );

        let mut completions = Vec::new();
        for _ in 0..10 {
            if let Some(done) = driver.update(0.02) {
                completions.push(done);
            }
        }
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].id, second);
        assert_eq!(completions[0].kind, TransitionKind::Snap { from: Some(0), to: 2 });
        assert_eq!(driver.offset(), 0.0);
    }

    #[test]
    fn test_waits_for_every_channel() {
        let mut driver = TransitionDriver::new(0.0, 0.0);
        driver.begin(TransitionKind::Open, TransitionTargets::both(0.0, 0.5), linear(100));
        // Offset is already at its target but still runs the full duration.
        assert_eq!(driver.update(0.05), None);
        assert!(driver.update(0.05).is_some());
        assert_eq!(driver.backdrop_opacity(), 0.5);
    }

    #[test]
    fn test_drag_refused_while_in_flight() {
        let mut driver = TransitionDriver::new(100.0, 0.5);
        assert!(driver.drag_to(150.0));
        assert_eq!(driver.offset(), 150.0);

        driver.animate_to(0.0, linear(100));
        assert!(!driver.drag_to(200.0));
    }

    #[test]
    fn test_cancel_freezes_values() {
        let mut driver = TransitionDriver::new(0.0, 0.0);
        driver.begin(TransitionKind::Close, TransitionTargets::both(400.0, 0.0), linear(100));
        driver.update(0.025);
        assert_eq!(driver.cancel(), Some(TransitionKind::Close));
        let offset = driver.offset();
        assert_eq!(driver.update(1.0), None);
        assert_eq!(driver.offset(), offset);
    }

    #[test]
    fn test_empty_targets_complete_on_next_update() {
        let mut driver = TransitionDriver::new(0.0, 0.0);
        driver.begin(TransitionKind::Settle, TransitionTargets::default(), linear(100));
        assert!(driver.update(0.0).is_some());
    }
}
