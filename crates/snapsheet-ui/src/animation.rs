//! Tween engine driving the sheet's scalar values.
//!
//! [`Animation`] interpolates one value over time with an easing curve.
//! [`AnimatedScalar`] owns a value plus at most one running animation and is
//! what the transition driver reads and writes.
//!
//! # Example
//!
//! ```
//! use snapsheet_ui::animation::{AnimatedScalar, EasingFunction, TweenSpec};
//! use std::time::Duration;
//!
//! let mut offset = AnimatedScalar::new(600.0);
//! offset.animate_to(0.0, TweenSpec::new(Duration::from_millis(200), EasingFunction::Linear));
//!
//! assert!(!offset.update(0.1));
//! assert!((offset.current_value() - 300.0).abs() < 0.01);
//! assert!(offset.update(0.1));
//! assert_eq!(offset.current_value(), 0.0);
//! ```

use std::time::Duration;

use snapsheet_core::math::lerp;

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    #[default]
    EaseInOut,
    /// Bounce effect
    Bounce,
    /// Elastic effect
    Elastic,
    /// Quadratic ease in
    QuadIn,
    /// Quadratic ease out
    QuadOut,
    /// Quadratic ease in-out
    QuadInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in-out
    CubicInOut,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn | EasingFunction::QuadIn => t * t,
            EasingFunction::EaseOut | EasingFunction::QuadOut => t * (2.0 - t),
            EasingFunction::EaseInOut | EasingFunction::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            EasingFunction::Bounce => {
                if t < 1.0 / 2.75 {
                    7.5625 * t * t
                } else if t < 2.0 / 2.75 {
                    let t = t - 1.5 / 2.75;
                    7.5625 * t * t + 0.75
                } else if t < 2.5 / 2.75 {
                    let t = t - 2.25 / 2.75;
                    7.5625 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / 2.75;
                    7.5625 * t * t + 0.984375
                }
            }
            EasingFunction::Elastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    let p = 0.3;
                    let s = p / 4.0;
                    let t = t - 1.0;
                    -(2.0f32.powf(10.0 * t) * ((t - s) * (2.0 * std::f32::consts::PI) / p).sin())
                }
            }
            EasingFunction::CubicIn => t * t * t,
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingFunction::CubicInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
        }
    }
}

/// Duration and easing for one tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl TweenSpec {
    pub fn new(duration: Duration, easing: EasingFunction) -> Self {
        Self { duration, easing }
    }

    /// A tween that lands on its target at the next update.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, EasingFunction::Linear)
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), EasingFunction::default())
    }
}

/// Animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// Animation is running
    Running,
    /// Animation is completed
    Completed,
}

/// A single scalar tween.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Start value
    from: f32,
    /// End value
    to: f32,
    /// Duration in seconds
    duration: f32,
    /// Elapsed time in seconds
    elapsed: f32,
    /// Easing function
    easing: EasingFunction,
    /// Animation state
    state: AnimationState,
}

impl Animation {
    /// Create a new animation running from 0.0 to 1.0 over one second.
    pub fn new() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration: 1.0,
            elapsed: 0.0,
            easing: EasingFunction::Linear,
            state: AnimationState::Running,
        }
    }

    /// Set the start value.
    pub fn from(mut self, value: f32) -> Self {
        self.from = value;
        self
    }

    /// Set the end value.
    pub fn to(mut self, value: f32) -> Self {
        self.to = value;
        self
    }

    /// Set the duration in seconds. Negative durations are treated as zero.
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Build from a [`TweenSpec`].
    pub fn with_spec(self, spec: TweenSpec) -> Self {
        self.duration(spec.duration.as_secs_f32()).easing(spec.easing)
    }

    /// The value this animation ends on.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Get the current value.
    pub fn value(&self) -> f32 {
        if self.state == AnimationState::Completed {
            return self.to;
        }
        let t = if self.duration <= 0.0 {
            0.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        lerp(self.from, self.to, self.easing.apply(t))
    }

    /// Get the current state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Update the animation by delta time.
    ///
    /// Returns true if the animation is still running.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if self.state == AnimationState::Completed {
            return false;
        }

        self.elapsed += delta_time.max(0.0);

        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = AnimationState::Completed;
            return false;
        }

        true
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

/// A scalar value with at most one animation writing to it.
///
/// Starting a new animation replaces the running one; the replaced animation
/// is dropped and can never report completion.
#[derive(Debug, Clone)]
pub struct AnimatedScalar {
    value: f32,
    animation: Option<Animation>,
}

impl AnimatedScalar {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    /// The value as of the last update.
    pub fn current_value(&self) -> f32 {
        self.value
    }

    /// Target of the running animation, if any.
    pub fn target(&self) -> Option<f32> {
        self.animation.as_ref().map(Animation::target)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Start animating from the current value to `target`.
    pub fn animate_to(&mut self, target: f32, spec: TweenSpec) {
        self.animation = Some(Animation::new().from(self.value).to(target).with_spec(spec));
    }

    /// Halt the running animation, keeping the value where it is.
    pub fn stop(&mut self) {
        self.animation = None;
    }

    /// Jump to `value`, discarding any running animation.
    pub fn snap_to(&mut self, value: f32) {
        self.animation = None;
        self.value = value;
    }

    /// Advance the running animation.
    ///
    /// Returns true exactly once: on the update where the animation lands on
    /// its target.
    pub fn update(&mut self, delta_time: f32) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let running = animation.update(delta_time);
        self.value = animation.value();
        if !running {
            self.animation = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_easing() {
        let easing = EasingFunction::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_easing_endpoints() {
        let easings = [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
            EasingFunction::Bounce,
            EasingFunction::Elastic,
            EasingFunction::CubicIn,
            EasingFunction::CubicOut,
            EasingFunction::CubicInOut,
        ];

        for easing in easings {
            assert!(easing.apply(0.0).abs() < 0.01, "start of {:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.01, "end of {:?}", easing);
        }
    }

    #[test]
    fn test_animation_update() {
        let mut anim = Animation::new().from(0.0).to(1.0).duration(1.0);

        // At start
        assert_eq!(anim.value(), 0.0);

        // Halfway
        assert!(anim.update(0.5));
        assert!((anim.value() - 0.5).abs() < 0.01);

        // Complete - should return false when done
        assert!(!anim.update(0.5));
        assert_eq!(anim.value(), 1.0);
        assert_eq!(anim.state(), AnimationState::Completed);
    }

    #[test]
    fn test_zero_duration_completes_on_next_update() {
        let mut anim = Animation::new().from(10.0).to(20.0).duration(0.0);
        assert_eq!(anim.value(), 10.0);
        assert!(!anim.update(0.0));
        assert_eq!(anim.value(), 20.0);
    }

    #[test]
    fn test_scalar_reports_completion_once() {
        let mut scalar = AnimatedScalar::new(0.0);
        scalar.animate_to(100.0, TweenSpec::new(Duration::from_millis(100), EasingFunction::Linear));

        assert!(!scalar.update(0.05));
        assert!(scalar.is_animating());
        assert!(scalar.update(0.05));
        assert!(!scalar.update(0.05));
        assert_eq!(scalar.current_value(), 100.0);
    }

    #[test]
    fn test_scalar_retarget_starts_from_current_value() {
        let mut scalar = AnimatedScalar::new(0.0);
        let spec = TweenSpec::new(Duration::from_millis(100), EasingFunction::Linear);
        scalar.animate_to(100.0, spec);
        scalar.update(0.05);
        assert!((scalar.current_value() - 50.0).abs() < 0.01);

        scalar.animate_to(0.0, spec);
        assert_eq!(scalar.target(), Some(0.0));
        scalar.update(0.05);
        assert!((scalar.current_value() - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_scalar_stop_freezes_value() {
        let mut scalar = AnimatedScalar::new(0.0);
        scalar.animate_to(100.0, TweenSpec::new(Duration::from_millis(100), EasingFunction::Linear));
        scalar.update(0.025);
        scalar.stop();
        let frozen = scalar.current_value();
        assert!(!scalar.update(1.0));
        assert_eq!(scalar.current_value(), frozen);
        assert!(!scalar.is_animating());
    }
}
