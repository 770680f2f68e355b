//! Mock presentation surface for testing.
//!
//! Records show, hide and present calls without drawing anything.

use std::sync::Arc;

use parking_lot::Mutex;
use snapsheet_core::geometry::Size;
use snapsheet_ui::{PresentationSurface, SheetFrame};

/// A recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Show,
    Hide,
    Present(SheetFrame),
}

#[derive(Debug)]
struct MockState {
    calls: Vec<SurfaceCall>,
    viewport: Size<f32>,
    content_extent: Option<f32>,
}

/// Mock implementation of [`PresentationSurface`].
///
/// Clones share one recording, so a test can keep a clone after moving the
/// surface into a sheet.
#[derive(Debug, Clone)]
pub struct MockSurface {
    state: Arc<Mutex<MockState>>,
}

impl MockSurface {
    /// Create a surface with the given viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                calls: Vec::new(),
                viewport: Size::new(width, height),
                content_extent: None,
            })),
        }
    }

    /// Report a measured content height for sheets without snap points.
    pub fn with_content_extent(self, extent: f32) -> Self {
        self.state.lock().content_extent = Some(extent);
        self
    }

    pub fn set_viewport(&self, width: f32, height: f32) {
        self.state.lock().viewport = Size::new(width, height);
    }

    pub fn set_content_extent(&self, extent: Option<f32>) {
        self.state.lock().content_extent = extent;
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.lock().calls.clone()
    }

    /// Every presented frame, oldest first.
    pub fn frames(&self) -> Vec<SheetFrame> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Present(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<SheetFrame> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Present(frame) => Some(*frame),
            _ => None,
        })
    }

    pub fn count_shows(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Show))
    }

    pub fn count_hides(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Hide))
    }

    pub fn count_presents(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Present(_)))
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn count(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: SurfaceCall) {
        self.state.lock().calls.push(call);
    }
}

impl PresentationSurface for MockSurface {
    fn show(&mut self) {
        self.record(SurfaceCall::Show);
    }

    fn hide(&mut self) {
        self.record(SurfaceCall::Hide);
    }

    fn viewport_size(&self) -> Size<f32> {
        self.state.lock().viewport
    }

    fn content_extent(&self) -> Option<f32> {
        self.state.lock().content_extent
    }

    fn present(&mut self, frame: &SheetFrame) {
        self.record(SurfaceCall::Present(*frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_ui::SheetStyle;

    fn frame(offset: f32) -> SheetFrame {
        SheetFrame {
            offset,
            backdrop_opacity: 0.0,
            visible: true,
            sheet_height: 500.0,
            style: SheetStyle::default(),
        }
    }

    #[test]
    fn test_clones_share_recording() {
        let mut surface = MockSurface::new(400.0, 800.0);
        let recorder = surface.clone();

        surface.show();
        surface.present(&frame(10.0));
        surface.present(&frame(5.0));
        surface.hide();

        assert_eq!(recorder.count_shows(), 1);
        assert_eq!(recorder.count_presents(), 2);
        assert_eq!(recorder.count_hides(), 1);
        assert_eq!(recorder.last_frame().map(|f| f.offset), Some(5.0));
    }

    #[test]
    fn test_viewport_updates_are_visible() {
        let surface = MockSurface::new(400.0, 800.0).with_content_extent(250.0);
        assert_eq!(surface.viewport_size().extent(), 800.0);
        assert_eq!(surface.content_extent(), Some(250.0));

        surface.set_viewport(400.0, 600.0);
        assert_eq!(surface.viewport_size().extent(), 600.0);
    }

    #[test]
    fn test_clear_calls() {
        let mut surface = MockSurface::new(1.0, 1.0);
        surface.show();
        surface.clear_calls();
        assert!(surface.calls().is_empty());
    }
}
