//! Snapsheet - draggable bottom sheets with snap points
//!
//! The sheet is a headless state machine: the host forwards pointer and
//! scroll input, calls [`update`](ui::Sheet::update) once per frame, and
//! draws whatever [`SheetFrame`](ui::SheetFrame) it is handed.
//!
//! - **Snap points**: fractions, percentages or pixels of the viewport
//! - **Direct drag**: handle drags with fling detection and dismissal
//! - **Scroll-to-expand**: inner content scrolling steps the sheet between points
//! - **Transitions**: one animated transition at a time, newest request wins
//! - **Callbacks**: open, close and snap-change notifications after each settle
//!
//! # Quick Start
//!
//! ```ignore
//! use snapsheet::prelude::*;
//!
//! snapsheet::core::logging::init();
//!
//! let config = SheetConfig::new().snap_points([0.25, 0.5, 0.9].map(SnapPoint::from));
//! let mut sheet = Sheet::new(config, my_surface);
//! sheet.on_snap_point_change(|index| tracing::info!(index, "snapped"));
//! sheet.open();
//!
//! loop {
//!     let time = timer.tick();
//!     sheet.handle_events(&mut input_queue.drain());
//!     sheet.update(time.delta_seconds());
//! }
//! ```

// Re-export core types
pub use snapsheet_core as core;
pub use snapsheet_core::math;

// Re-export sub-crates based on features
#[cfg(feature = "input")]
pub use snapsheet_input as input;

#[cfg(feature = "ui")]
pub use snapsheet_ui as ui;

#[cfg(feature = "ui")]
pub use snapsheet_ui::{Sheet, SheetConfig, SheetPhase, SnapPoint};

/// Prelude module for convenient imports
pub mod prelude {
    pub use snapsheet_core::geometry::Size;
    pub use snapsheet_core::math::Vec2;
    pub use snapsheet_core::{Color, FrameTime, FrameTimer};

    #[cfg(feature = "input")]
    pub use snapsheet_input::{
        HandleStatus, InputBatch, InputQueue, PointerSample, ScrollSample, SheetInput,
    };

    #[cfg(feature = "ui")]
    pub use snapsheet_ui::{
        EasingFunction, PresentationSurface, Sheet, SheetConfig, SheetFrame, SheetNotification,
        SheetPhase, SheetStyle, SnapPoint, SnapPointError, SnapPoints, TweenSpec,
    };
}
