//! Headless walkthrough of a sheet's lifecycle.
//!
//! This example shows how to:
//! - Configure snap points and callbacks
//! - Feed pointer and scroll input through an `InputQueue`
//! - Drive the sheet from a fixed-step frame loop
//!
//! Run with: cargo run -p snapsheet --example snap_cycle
//! Set RUST_LOG=snapsheet_ui=trace to see every drag step.

use std::time::Duration;

use snapsheet::core::profiling::ProfilingBackend;
use snapsheet::prelude::*;

/// Surface that logs what a real host would draw.
struct LogSurface {
    viewport: Size<f32>,
    presented: usize,
}

impl PresentationSurface for LogSurface {
    fn show(&mut self) {
        tracing::info!("surface: show");
    }

    fn hide(&mut self) {
        tracing::info!(frames = self.presented, "surface: hide");
    }

    fn viewport_size(&self) -> Size<f32> {
        self.viewport
    }

    fn present(&mut self, frame: &SheetFrame) {
        self.presented += 1;
        tracing::trace!(
            offset = frame.offset,
            backdrop = frame.backdrop_opacity,
            "surface: present"
        );
    }
}

/// Step at the wall-clock rate, like a host's frame loop would.
fn settle(sheet: &mut Sheet<LogSurface>, timer: &mut FrameTimer) {
    while sheet.needs_update() {
        snapsheet::core::profiling::new_frame();
        std::thread::sleep(Duration::from_millis(16));
        let time = timer.tick();
        sheet.update(time.delta_seconds());
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn main() {
    snapsheet::core::logging::init();
    snapsheet::core::profiling::init_profiling(ProfilingBackend::PuffinHttp);
    let mut timer = FrameTimer::new();

    let config = SheetConfig::new()
        .snap_points([0.3, 0.6, 0.9].map(SnapPoint::from))
        .easing(EasingFunction::CubicOut)
        .style(SheetStyle::new().border_radius(24.0));
    let surface = LogSurface {
        viewport: Size::new(390.0, 844.0),
        presented: 0,
    };

    let mut sheet = Sheet::new(config, surface);
    sheet.on_open(|| tracing::info!("opened"));
    sheet.on_close(|| tracing::info!("closed"));
    sheet.on_snap_point_change(|index| tracing::info!(index, "snap point changed"));

    sheet.open();
    settle(&mut sheet, &mut timer);

    // Imperative snap.
    sheet.snap_to_point(1);
    settle(&mut sheet, &mut timer);

    // A quick upward flick on the handle.
    let mut queue = InputQueue::new();
    queue.push(SheetInput::PointerDown(PointerSample::vertical(400.0, ms(2000))));
    queue.push(SheetInput::PointerMove(PointerSample::vertical(370.0, ms(2010))));
    queue.push(SheetInput::PointerUp(PointerSample::vertical(340.0, ms(2020))));
    let mut batch = queue.drain();
    sheet.handle_events(&mut batch);
    settle(&mut sheet, &mut timer);

    // Pull the content past its top edge.
    sheet.handle_scroll_begin_drag(ScrollSample::new(0.0, None, ms(3000)));
    sheet.handle_scroll_end_drag(ScrollSample::new(-60.0, Some(-1.4), ms(3080)));
    settle(&mut sheet, &mut timer);

    tracing::info!(phase = ?sheet.phase(), offset = sheet.offset(), "done");
}
