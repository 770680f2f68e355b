//! Test utilities for snapsheet.
//!
//! - [`MockSurface`] - a [`PresentationSurface`] that records every call
//! - [`run_until_settled`] / [`step`] - drive a sheet's frame loop with a fixed step
//!
//! # Example
//!
//! ```rust
//! use snapsheet_test_utils::{MockSurface, run_until_settled};
//! use snapsheet_ui::{Sheet, SheetConfig, SnapPoint};
//!
//! let surface = MockSurface::new(400.0, 1000.0);
//! let recorder = surface.clone();
//! let config = SheetConfig::new().snap_points([0.3, 0.6].map(SnapPoint::from));
//! let mut sheet = Sheet::new(config, surface);
//!
//! sheet.open();
//! run_until_settled(&mut sheet, 1.0 / 60.0);
//!
//! assert_eq!(recorder.count_shows(), 1);
//! assert_eq!(recorder.last_frame().map(|frame| frame.offset), Some(300.0));
//! ```

pub mod mock_surface;

pub use mock_surface::*;

use snapsheet_ui::{PresentationSurface, Sheet};

/// Upper bound on frames [`run_until_settled`] will step.
pub const MAX_SETTLE_FRAMES: usize = 10_000;

/// Step `sheet` until no transition is in flight and every notification
/// has been delivered. Returns the number of frames stepped.
pub fn run_until_settled<S: PresentationSurface>(sheet: &mut Sheet<S>, delta_time: f32) -> usize {
    let mut frames = 0;
    while sheet.needs_update() && frames < MAX_SETTLE_FRAMES {
        sheet.update(delta_time);
        frames += 1;
    }
    frames
}

/// Step `sheet` exactly `frames` times.
pub fn step<S: PresentationSurface>(sheet: &mut Sheet<S>, delta_time: f32, frames: usize) {
    for _ in 0..frames {
        sheet.update(delta_time);
    }
}
