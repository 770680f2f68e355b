//! Snapsheet UI - a bottom sheet controller with snap points
//!
//! This crate holds the whole sheet state machine:
//! - Snap point parsing and normalization against the viewport
//! - Direct drag with fling detection
//! - Scroll-to-expand driven by the sheet's scrollable content
//! - A single transition driver that animates offset and backdrop together
//! - Lifecycle callbacks delivered once per settled transition
//!
//! Rendering is left to the host through [`PresentationSurface`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snapsheet_ui::{Sheet, SheetConfig, SnapPoint};
//!
//! let config = SheetConfig::new().snap_points(["40%", "80%"].map(|s| s.parse::<SnapPoint>().unwrap()));
//! let mut sheet = Sheet::new(config, surface);
//! sheet.open();
//!
//! // In the frame loop:
//! // sheet.handle_events(&mut input_batch);
//! // sheet.update(delta_time);
//! ```

pub mod animation;
pub mod config;
pub mod gesture;
pub mod scroll_expand;
pub mod sheet;
pub mod snap;
pub mod style;
pub mod surface;
pub mod transition;

pub use animation::{AnimatedScalar, Animation, AnimationState, EasingFunction, TweenSpec};
pub use config::SheetConfig;
pub use gesture::{GestureRelease, GestureTracker};
pub use scroll_expand::{ScrollContext, ScrollExpandTracker, ScrollIntent};
pub use sheet::{Sheet, SheetNotification, SheetPhase};
pub use snap::{SnapPoint, SnapPointError, SnapPoints, SnapTarget};
pub use style::SheetStyle;
pub use surface::{PresentationSurface, SheetFrame};
pub use transition::{CompletedTransition, TransitionDriver, TransitionKind, TransitionTargets};
