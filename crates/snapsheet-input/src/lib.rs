//! Pointer and scroll input for snapsheet.
//!
//! Hosts translate their platform events into [`SheetInput`] values, push
//! them into an [`InputQueue`], and hand the drained [`InputBatch`] to the
//! sheet once per frame. Handlers mark events consumed through
//! [`HandleStatus`] so the host can forward the rest elsewhere.

pub mod event;
pub mod velocity;

pub use event::{
    HandleStatus, InputBatch, InputQueue, InputStats, PointerSample, ScrollSample, SheetInput,
};
pub use velocity::VelocityTracker;
