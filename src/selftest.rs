//! Built-in self-test, run when the program starts with no arguments.
//!
//! A quick smoke pass over the codec primitives; the full suite lives in
//! the unit tests. Stops at the first failing assertion.

use crate::convert::{is_pgm, is_sk};
use crate::pgm;
use crate::raster::{Raster, RasterCanvas};
use crate::sketch::{obey, opcode, DrawState, Opcode};

fn check(ok: bool, what: &'static str) -> Result<(), &'static str> {
    if ok {
        Ok(())
    } else {
        Err(what)
    }
}

/// Run every assertion; returns the first failing one.
pub fn run() -> Result<(), &'static str> {
    // Suffix classification, including spaced and too-short names
    check(is_pgm("somefile.pgm"), "is_pgm accepts somefile.pgm")?;
    check(!is_pgm("anotherfile.docx"), "is_pgm rejects .docx")?;
    check(
        is_pgm("i am annoying and i use spaces in my filenames.pgm"),
        "is_pgm accepts names with spaces",
    )?;
    check(!is_pgm("m"), "is_pgm rejects names shorter than the suffix")?;
    check(is_sk("somefile.sk"), "is_sk accepts somefile.sk")?;
    check(!is_sk("anotherfile.docx"), "is_sk rejects .docx")?;
    check(!is_sk("k"), "is_sk rejects names shorter than the suffix")?;

    // Opcode extraction: top two bits only
    check(Opcode::from_byte(0x00) == Opcode::Dx, "opcode of 0x00 is DX")?;
    check(Opcode::from_byte(0x3F) == Opcode::Dx, "opcode of 0x3F is DX")?;
    check(Opcode::from_byte(0x40) == Opcode::Dy, "opcode of 0x40 is DY")?;
    check(Opcode::from_byte(0x7F) == Opcode::Dy, "opcode of 0x7F is DY")?;
    check(
        Opcode::from_byte(0x80) == Opcode::Tool,
        "opcode of 0x80 is TOOL",
    )?;
    check(
        Opcode::from_byte(0xFF) == Opcode::Data,
        "opcode of 0xFF is DATA",
    )?;

    // Signed operand boundaries
    check(opcode::operand(0x00) == 0, "operand of 0x00 is 0")?;
    check(opcode::operand(0x1F) == 31, "operand of 0x1F is 31")?;
    check(opcode::operand(0x20) == -32, "operand of 0x20 is -32")?;
    check(opcode::operand(0x3F) == -1, "operand of 0x3F is -1")?;
    check(
        opcode::encode(Opcode::Dy, -32) == 0x60,
        "encode(DY, -32) is 0x60",
    )?;

    // Sample scaling
    check(pgm::scale_sample(1, 1) == 255, "scale_sample(1, 1) is 255")?;
    check(pgm::scale_sample(6, 255) == 6, "scale_sample(6, 255) is 6")?;
    check(pgm::scale_sample(1, 3) == 85, "scale_sample(1, 3) is 85")?;

    // DATA accumulation chains six bits at a time
    let mut state = DrawState::new();
    let mut canvas = RasterCanvas::new(Raster::new(1, 1));
    for value in [5, 9] {
        if obey(&mut state, &mut canvas, opcode::encode(Opcode::Data, value)).is_err() {
            return Err("DATA bytes interpret cleanly");
        }
    }
    check(state.data == (5 << 6) | 9, "accumulator chains DATA bytes")?;

    Ok(())
}
