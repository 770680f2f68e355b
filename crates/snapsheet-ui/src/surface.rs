//! The host-side presentation surface.

use snapsheet_core::geometry::Size;

use crate::style::SheetStyle;

/// Everything the host needs to draw one frame of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFrame {
    /// Downward translation from the sheet's tallest height.
    pub offset: f32,
    pub backdrop_opacity: f32,
    pub visible: bool,
    /// Height the panel is laid out at.
    pub sheet_height: f32,
    pub style: SheetStyle,
}

/// Overlay host for a sheet.
///
/// Implementations show and hide the overlay, report the space available to
/// it, and draw each presented frame.
pub trait PresentationSurface {
    /// Mount the overlay.
    fn show(&mut self);

    /// Unmount the overlay.
    fn hide(&mut self);

    /// Safe area available to the sheet.
    fn viewport_size(&self) -> Size<f32>;

    /// Measured height of the sheet's content, if the host lays it out.
    fn content_extent(&self) -> Option<f32> {
        None
    }

    /// Draw the sheet in its current state.
    fn present(&mut self, frame: &SheetFrame);
}
