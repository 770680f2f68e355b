//! Snapsheet Core
//!
//! Shared utilities for the snapsheet crates: logging, profiling hooks,
//! math re-exports, geometry, colors and frame timing.

pub mod color;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod time;

pub use color::Color;
pub use time::{FrameTime, FrameTimer};
