//! The sketch bytecode format: codec, drawing state and interpreter.

pub mod encoder;
pub mod interp;
pub mod opcode;
pub mod state;

pub use encoder::encode_raster;
pub use interp::{obey, run, run_frame, DrawSink, FrameStatus, DEFAULT_COLOR};
pub use opcode::{Opcode, Tool, ToolOp};
pub use state::DrawState;
