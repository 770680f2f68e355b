use std::collections::VecDeque;
use std::time::Duration;

use snapsheet_core::math::Vec2;

/// One pointer position sample (touch or mouse).
///
/// Timestamps come from the host's event source and only need to be
/// monotonic within a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub timestamp: Duration,
}

impl PointerSample {
    pub fn new(position: Vec2, timestamp: Duration) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    /// Sample at `(0, y)`, for hosts that only track the vertical axis.
    pub fn vertical(y: f32, timestamp: Duration) -> Self {
        Self::new(Vec2::new(0.0, y), timestamp)
    }
}

/// One scroll sample from the sheet's inner scrollable content.
///
/// `offset` is the content offset (0 at the top). `velocity` is in px/ms,
/// positive while the content scrolls down; hosts whose scroll views do not
/// report velocity leave it `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub offset: f32,
    pub velocity: Option<f32>,
    pub timestamp: Duration,
}

impl ScrollSample {
    pub fn new(offset: f32, velocity: Option<f32>, timestamp: Duration) -> Self {
        Self {
            offset,
            velocity,
            timestamp,
        }
    }
}

/// Input routed to a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetInput {
    /// Pointer pressed on the drag handle.
    PointerDown(PointerSample),
    /// Pointer moved. Delivered even after leaving the handle's bounds.
    PointerMove(PointerSample),
    /// Pointer released.
    PointerUp(PointerSample),
    /// The platform cancelled the pointer stream.
    PointerCancel,
    /// Inner content began a user-driven scroll.
    ScrollBeginDrag(ScrollSample),
    /// Inner content scrolled.
    Scroll(ScrollSample),
    /// Inner content's user-driven scroll ended.
    ScrollEndDrag(ScrollSample),
    /// The backdrop behind the sheet was tapped.
    BackdropPress,
}

#[derive(Default, Debug, Clone)]
pub struct InputStats {
    pub events_received: usize,
    pub events_processed: usize,
    pub events_coalesced: usize,
}

/// Input queue with batching and move coalescing.
pub struct InputQueue {
    pending: VecDeque<SheetInput>,
    stats: InputStats,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(64),
            stats: InputStats::default(),
        }
    }

    /// Push an input, replacing a directly preceding pointer move.
    pub fn push(&mut self, input: SheetInput) {
        self.stats.events_received += 1;

        if let SheetInput::PointerMove(_) = input
            && let Some(SheetInput::PointerMove(_)) = self.pending.back()
        {
            self.pending.pop_back();
            self.stats.events_coalesced += 1;
        }

        self.pending.push_back(input);
    }

    /// Take every pending input as a batch, in arrival order.
    pub fn drain(&mut self) -> InputBatch {
        let events: Vec<SheetInput> = self.pending.drain(..).collect();
        self.stats.events_processed += events.len();
        tracing::trace!(count = events.len(), "drained sheet input");
        InputBatch { events }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn stats(&self) -> &InputStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = InputStats::default();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

pub struct InputBatch {
    events: Vec<SheetInput>,
}

impl InputBatch {
    pub fn new(events: Vec<SheetInput>) -> Self {
        Self { events }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SheetInput> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Run `handler` over every event; consumed events are removed.
    pub fn dispatch<H>(&mut self, mut handler: H)
    where
        H: FnMut(&SheetInput) -> HandleStatus,
    {
        self.events.retain(|event| {
            let status = handler(event);
            !status.is_consumed()
        });
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleStatus: u8 {
        const HANDLED = 0b00000001;
        const CONSUMED = 0b00000010;
    }
}

impl HandleStatus {
    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn consumed() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::CONSUMED.bits())
    }

    pub const fn handled() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_consecutive_moves_are_coalesced() {
        let mut queue = InputQueue::new();
        queue.push(SheetInput::PointerDown(PointerSample::vertical(0.0, ms(0))));
        queue.push(SheetInput::PointerMove(PointerSample::vertical(5.0, ms(8))));
        queue.push(SheetInput::PointerMove(PointerSample::vertical(9.0, ms(16))));
        queue.push(SheetInput::PointerUp(PointerSample::vertical(9.0, ms(20))));

        let batch = queue.drain();
        let events: Vec<_> = batch.iter().cloned().collect();
        assert_eq!(
            events,
            vec![
                SheetInput::PointerDown(PointerSample::vertical(0.0, ms(0))),
                SheetInput::PointerMove(PointerSample::vertical(9.0, ms(16))),
                SheetInput::PointerUp(PointerSample::vertical(9.0, ms(20))),
            ]
        );
        assert_eq!(queue.stats().events_received, 4);
        assert_eq!(queue.stats().events_coalesced, 1);
        assert_eq!(queue.stats().events_processed, 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_moves_split_by_other_input_are_kept() {
        let mut queue = InputQueue::new();
        queue.push(SheetInput::PointerMove(PointerSample::vertical(1.0, ms(0))));
        queue.push(SheetInput::BackdropPress);
        queue.push(SheetInput::PointerMove(PointerSample::vertical(2.0, ms(8))));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_dispatch_removes_consumed() {
        let mut batch = InputBatch::new(vec![
            SheetInput::BackdropPress,
            SheetInput::PointerCancel,
        ]);
        batch.dispatch(|event| match event {
            SheetInput::BackdropPress => HandleStatus::consumed(),
            _ => HandleStatus::handled(),
        });
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.iter().next(), Some(&SheetInput::PointerCancel));
    }

    #[test]
    fn test_handle_status_flags() {
        assert!(HandleStatus::consumed().is_handled());
        assert!(HandleStatus::consumed().is_consumed());
        assert!(!HandleStatus::handled().is_consumed());
        assert!(!HandleStatus::ignored().is_handled());
    }
}
