//! The sketch state machine: one byte in, one state transition out.
//!
//! A single interpreter drives both file conversion and the live viewer;
//! the rendering backend is abstracted behind [`DrawSink`] so the two
//! cannot drift apart.

use super::opcode::{self, Opcode, Tool, ToolOp};
use super::state::DrawState;
use crate::error::SketchError;

/// Color register value at stream start: opaque white.
pub const DEFAULT_COLOR: u32 = 0xFFFF_FFFF;

/// Drawing capability the interpreter renders through.
///
/// Backends implement `set_pixel` and `set_color`; the line and block
/// primitives are derived from them. `show` and `pause` back the reserved
/// SHOW/PAUSE/NEXTFRAME selectors and default to no-ops, which is all a
/// file conversion needs.
pub trait DrawSink {
    /// Paint one pixel with the active color. Out-of-bounds coordinates
    /// must be ignored, not fail.
    fn set_pixel(&mut self, x: i32, y: i32);

    /// Replace the active color with a packed RGBA value.
    fn set_color(&mut self, rgba: u32);

    /// Draw an inclusive line between two points (Bresenham).
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        bresenham(self, x0, y0, x1, y1);
    }

    /// Fill the axis-aligned rectangle with inclusive corners (x0, y0) and
    /// (x1, y1), in any corner ordering.
    fn draw_block(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.set_pixel(x, y);
            }
        }
    }

    /// Present the frame drawn so far.
    fn show(&mut self) {}

    /// Hold the current frame for `ms` milliseconds.
    fn pause(&mut self, _ms: u32) {}
}

/// Inclusive Bresenham walk, shared by the trait default and sinks that
/// override `draw_line` with a fast path for special cases.
pub(crate) fn bresenham<S: DrawSink + ?Sized>(sink: &mut S, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -((y1 - y0).abs());
    let sx = if x0 < x1 { 1i32 } else { -1i32 };
    let sy = if y0 < y1 { 1i32 } else { -1i32 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        sink.set_pixel(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Execute one byte of the command sequence against `sink`.
pub fn obey<S: DrawSink>(
    state: &mut DrawState,
    sink: &mut S,
    byte: u8,
) -> Result<(), SketchError> {
    match Opcode::from_byte(byte) {
        Opcode::Dx => {
            state.tx = state.tx.saturating_add(opcode::operand(byte));
        },
        Opcode::Dy => {
            state.ty = state.ty.saturating_add(opcode::operand(byte));
            match state.tool {
                Tool::Line => sink.draw_line(state.x, state.y, state.tx, state.ty),
                Tool::Block => sink.draw_block(state.x, state.y, state.tx, state.ty),
                Tool::None => {},
            }
            state.x = state.tx;
            state.y = state.ty;
        },
        Opcode::Tool => {
            let operand = opcode::operand(byte);
            let Some(tool_op) = ToolOp::from_operand(operand) else {
                return Err(SketchError::MalformedStream(format!(
                    "unknown tool operand {}",
                    operand
                )));
            };
            match tool_op {
                ToolOp::Select(tool) => state.tool = tool,
                ToolOp::Colour => sink.set_color(state.data),
                ToolOp::TargetX => state.tx = state.data as i32,
                ToolOp::TargetY => state.ty = state.data as i32,
                ToolOp::Show => sink.show(),
                ToolOp::Pause => sink.pause(state.data),
                ToolOp::NextFrame => sink.show(),
            }
            state.data = 0;
        },
        Opcode::Data => {
            // High bits fall off the 32-bit accumulator, as they always have
            state.data = (state.data << 6) | opcode::unsigned_operand(byte);
        },
    }
    Ok(())
}

/// Interpret a complete stream against a fresh drawing state.
///
/// This is the strict entry point used for file conversion: unknown tool
/// operands and streams that end with unconsumed DATA accumulation are
/// rejected as [`SketchError::MalformedStream`].
pub fn run<S: DrawSink>(bytes: &[u8], sink: &mut S) -> Result<(), SketchError> {
    let mut state = DrawState::new();
    for &b in bytes {
        obey(&mut state, sink, b)?;
    }
    if state.data != 0 {
        return Err(SketchError::MalformedStream(
            "stream ends with unconsumed DATA bytes".into(),
        ));
    }
    Ok(())
}

/// Why a frame run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Hit a NEXTFRAME marker; `state.start` points past it.
    NextFrame,
    /// Ran off the end of the stream; the state was fully reset so the
    /// next call replays from the top (animations loop).
    EndOfStream,
}

/// Draw one frame, resuming at the saved byte offset `state.start`.
///
/// On a NEXTFRAME marker the offset advances past the marker and every
/// other register resets, so the following call draws the next frame. At
/// end-of-stream the whole state (offset included) resets and the sink is
/// asked to present. Trailing DATA accumulation is tolerated here: a frame
/// boundary may legitimately split a file mid-sequence.
pub fn run_frame<S: DrawSink>(
    state: &mut DrawState,
    sink: &mut S,
    bytes: &[u8],
) -> Result<FrameStatus, SketchError> {
    while state.start < bytes.len() {
        let b = bytes[state.start];
        obey(state, sink, b)?;
        state.start += 1;
        if Opcode::from_byte(b) == Opcode::Tool
            && opcode::operand(b) == ToolOp::NextFrame.operand()
        {
            state.reset_registers();
            return Ok(FrameStatus::NextFrame);
        }
    }
    *state = DrawState::new();
    sink.show();
    Ok(FrameStatus::EndOfStream)
}
