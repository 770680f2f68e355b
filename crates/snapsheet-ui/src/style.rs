//! Visual options. Nothing here affects sheet behavior.

use snapsheet_core::Color;

/// Appearance of the sheet panel, its drag handle and the backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetStyle {
    pub background_color: Color,
    pub border_radius: f32,
    pub show_handle: bool,
    pub handle_color: Color,
    /// Backdrop color; its alpha is scaled by the animated backdrop opacity.
    pub backdrop_color: Color,
}

impl SheetStyle {
    pub fn new() -> Self {
        Self {
            background_color: Color::WHITE,
            border_radius: 16.0,
            show_handle: true,
            handle_color: Color::from_hex(0xC7C7CC),
            backdrop_color: Color::BLACK,
        }
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = radius.max(0.0);
        self
    }

    pub fn show_handle(mut self, show: bool) -> Self {
        self.show_handle = show;
        self
    }

    pub fn handle_color(mut self, color: Color) -> Self {
        self.handle_color = color;
        self
    }

    pub fn backdrop_color(mut self, color: Color) -> Self {
        self.backdrop_color = color;
        self
    }

    /// Backdrop color as drawn at the given animated opacity.
    pub fn backdrop_at(&self, opacity: f32) -> Color {
        self.backdrop_color
            .with_alpha(self.backdrop_color.a * opacity.clamp(0.0, 1.0))
    }
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self::new()
    }
}
