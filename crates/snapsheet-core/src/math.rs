//! Math types used across snapsheet.
//!
//! Pointer positions and velocities are carried as [`Vec2`] from [`glam`];
//! only the vertical axis drives the sheet, but hosts usually hand over
//! full positions.
//!
//! ```
//! use snapsheet_core::math::Vec2;
//!
//! let start = Vec2::new(10.0, 200.0);
//! let now = Vec2::new(12.0, 260.0);
//! assert_eq!((now - start).y, 60.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(100.0, 300.0, 0.0), 100.0);
        assert_eq!(lerp(100.0, 300.0, 1.0), 300.0);
        assert_eq!(lerp(100.0, 300.0, 0.5), 200.0);
    }
}
