use std::time::{Duration, Instant};

use crate::profiling::profile_function;

/// Frame timing information handed to `update` each frame.
///
/// # Example
///
/// ```no_run
/// use snapsheet_core::FrameTimer;
///
/// let mut timer = FrameTimer::new();
/// loop {
///     let time = timer.tick();
///     let dt = time.delta_seconds();
///     // sheet.update(dt);
///     # let _ = dt;
///     # break;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameTime {
    /// Time elapsed since the last frame
    pub delta: Duration,
    /// Total time elapsed since the timer started
    pub elapsed: Duration,
    /// Total number of frames ticked
    pub frame_count: u64,
}

impl FrameTime {
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Returns delta time in seconds (f32)
    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Returns elapsed time in seconds (f32)
    #[inline]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock frame timer for host loops.
pub struct FrameTimer {
    start_time: Instant,
    last_frame_time: Instant,
    frame_count: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        profile_function!();
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time);
        let elapsed = now.duration_since(self.start_time);

        self.last_frame_time = now;
        self.frame_count += 1;

        FrameTime {
            delta,
            elapsed,
            frame_count: self.frame_count,
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames() {
        let mut timer = FrameTimer::new();
        let first = timer.tick();
        let second = timer.tick();
        assert_eq!(first.frame_count, 1);
        assert_eq!(second.frame_count, 2);
        assert!(second.elapsed >= first.elapsed);
    }

    #[test]
    fn test_delta_seconds() {
        let time = FrameTime {
            delta: Duration::from_millis(16),
            elapsed: Duration::from_secs(1),
            frame_count: 60,
        };
        assert!((time.delta_seconds() - 0.016).abs() < 1e-6);
        assert!((time.elapsed_seconds() - 1.0).abs() < 1e-6);
    }
}
