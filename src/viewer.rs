//! Live sketch viewer.
//!
//! Opens a window sized to the canvas config and draws one frame per
//! display refresh, resuming the interpreter from its saved byte offset
//! each time. Single-frame sketches replay every refresh, exactly like
//! multi-frame ones loop after their last frame.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use sdl2::keyboard::Keycode;

use crate::config::CanvasConfig;
use crate::display::{Display, InputEvent, RenderTarget};
use crate::error::SketchError;
use crate::raster::{Raster, RasterCanvas};
use crate::sketch::{run_frame, DrawSink, DrawState, FrameStatus};

/// [`DrawSink`] backend for the viewer: rasterizes like the file
/// converter, but honors the reserved presentation selectors by recording
/// them for the frame loop.
struct ViewerSink {
    canvas: RasterCanvas,
    pending_pause: u32,
}

impl ViewerSink {
    fn new(config: &CanvasConfig) -> Self {
        Self {
            canvas: RasterCanvas::new(Raster::filled(
                config.width,
                config.height,
                config.background,
            )),
            pending_pause: 0,
        }
    }

    fn take_pause(&mut self) -> u32 {
        std::mem::take(&mut self.pending_pause)
    }
}

impl DrawSink for ViewerSink {
    fn set_pixel(&mut self, x: i32, y: i32) {
        self.canvas.set_pixel(x, y);
    }

    fn set_color(&mut self, rgba: u32) {
        self.canvas.set_color(rgba);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.canvas.draw_line(x0, y0, x1, y1);
    }

    fn draw_block(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.canvas.draw_block(x0, y0, x1, y1);
    }

    // The frame loop presents after every run; an explicit show needs no
    // extra work here.

    fn pause(&mut self, ms: u32) {
        self.pending_pause = self.pending_pause.saturating_add(ms);
    }
}

/// Open a sketch file in a window and play it until escape or close.
pub fn view(path: &Path, config: &CanvasConfig) -> Result<(), SketchError> {
    let bytes = fs::read(path)?;
    let title = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("sketch");

    let (mut display, texture_creator) =
        Display::with_options(title, config.width, config.height).map_err(SketchError::Display)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)
        .map_err(SketchError::Display)?;

    let mut sink = ViewerSink::new(config);
    let mut state = DrawState::new();

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                _ => {},
            }
        }

        match run_frame(&mut state, &mut sink, &bytes)? {
            FrameStatus::NextFrame => log::debug!("frame boundary at offset {}", state.start),
            FrameStatus::EndOfStream => log::trace!("end of stream, replaying"),
        }

        display
            .present(&mut target, sink.canvas.raster())
            .map_err(SketchError::Display)?;

        let pause = sink.take_pause();
        if pause > 0 {
            thread::sleep(Duration::from_millis(u64::from(pause)));
        }
    }

    Ok(())
}
