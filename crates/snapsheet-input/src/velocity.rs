//! Vertical velocity estimation from timestamped samples.

use std::collections::VecDeque;
use std::time::Duration;

/// Samples older than this (relative to the newest) are ignored.
const HISTORY_WINDOW: Duration = Duration::from_millis(100);

/// Upper bound on retained samples.
const MAX_SAMPLES: usize = 20;

/// Tracks recent `(timestamp, position)` pairs and reports velocity in px/ms.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    history: VecDeque<(Duration, f32)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn push(&mut self, timestamp: Duration, position: f32) {
        // Out-of-order samples restart the estimate.
        if let Some(&(last, _)) = self.history.back()
            && timestamp < last
        {
            self.history.clear();
        }

        self.history.push_back((timestamp, position));
        if self.history.len() > MAX_SAMPLES {
            self.history.pop_front();
        }
        while let Some(&(first, _)) = self.history.front() {
            if timestamp.saturating_sub(first) > HISTORY_WINDOW {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity over the retained window in px/ms, 0.0 with fewer than two samples.
    pub fn velocity(&self) -> f32 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.history.front(), self.history.back()) else {
            return 0.0;
        };
        let elapsed_ms = t1.saturating_sub(t0).as_secs_f32() * 1000.0;
        if elapsed_ms <= f32::EPSILON {
            return 0.0;
        }
        (p1 - p0) / elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_empty_tracker_reports_zero() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_steady_motion() {
        let mut tracker = VelocityTracker::new();
        for i in 0..5 {
            tracker.push(ms(i * 10), i as f32 * 20.0);
        }
        assert!((tracker.velocity() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_old_samples_fall_out_of_window() {
        let mut tracker = VelocityTracker::new();
        tracker.push(ms(0), 0.0);
        tracker.push(ms(10), 500.0);
        // A pause, then slow motion.
        tracker.push(ms(300), 500.0);
        tracker.push(ms(350), 510.0);
        assert!((tracker.velocity() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_order_sample_resets() {
        let mut tracker = VelocityTracker::new();
        tracker.push(ms(50), 0.0);
        tracker.push(ms(60), 10.0);
        tracker.push(ms(10), 40.0);
        assert_eq!(tracker.velocity(), 0.0);
    }
}
