//! Raster → sketch encoding.
//!
//! The strategy is column-major run-length color changes: walk columns
//! left to right, rows top to bottom, re-selecting the color only when a
//! sample differs from the last one emitted, and advance the pen one row
//! per sample with single-byte DY commands. Images with long vertical runs
//! of constant value compress well; no horizontal or block optimization is
//! attempted.

use super::opcode::{self, Opcode, Tool, ToolOp};
use crate::raster::Raster;

#[inline]
fn tool_byte(op: ToolOp) -> u8 {
    opcode::encode(Opcode::Tool, op.operand())
}

/// Emit `value` as minimal DATA accumulation bytes, most significant
/// 6-bit group first.
fn push_data(out: &mut Vec<u8>, value: u32) {
    let mut shift = 30u32;
    while shift > 0 && (value >> shift) & 0x3F == 0 {
        shift -= 6;
    }
    loop {
        out.push(opcode::encode(Opcode::Data, ((value >> shift) & 0x3F) as i32));
        if shift == 0 {
            break;
        }
        shift -= 6;
    }
}

/// Emit the color-set sub-protocol for one grayscale value: the value
/// packed as RGBA (R=G=B=gray, A=255) in DATA bytes, then TOOL/COLOUR.
///
/// Value 0 uses the minimal two-byte form that sets only the alpha field;
/// the accumulator is guaranteed clear at every call site because the
/// preceding command was always a consuming TOOL byte or a DY step.
fn push_color(out: &mut Vec<u8>, gray: u8) {
    if gray == 0 {
        out.push(opcode::encode(Opcode::Data, 3));
        out.push(opcode::encode(Opcode::Data, 63));
    } else {
        let g = gray as u32;
        let rgba = (g << 24) | (g << 16) | (g << 8) | 0xFF;
        for shift in [30, 24, 18, 12, 6, 0] {
            out.push(opcode::encode(Opcode::Data, ((rgba >> shift) & 0x3F) as i32));
        }
    }
    out.push(tool_byte(ToolOp::Colour));
}

/// Encode a raster as a sketch byte stream.
///
/// Interpreting the result on a canvas of the same dimensions reproduces
/// the raster exactly.
pub fn encode_raster(raster: &Raster) -> Vec<u8> {
    let mut out = Vec::new();
    let height = raster.height();
    let mut current: Option<u8> = None;

    for x in 0..raster.width() {
        // ty := 0 (the accumulator is empty between columns by construction)
        out.push(tool_byte(ToolOp::TargetY));
        // tx := column index
        push_data(&mut out, x);
        out.push(tool_byte(ToolOp::TargetX));
        // Warp the pen to the column top without drawing
        out.push(tool_byte(ToolOp::Select(Tool::None)));
        out.push(opcode::encode(Opcode::Dy, 0));
        out.push(tool_byte(ToolOp::Select(Tool::Line)));

        for (y, gray) in raster.column(x).enumerate() {
            if current != Some(gray) {
                current = Some(gray);
                push_color(&mut out, gray);
            }
            // +1 per row; 0 on the last row to finalize without overshoot
            let step = if y as u32 == height - 1 { 0 } else { 1 };
            out.push(opcode::encode(Opcode::Dy, step));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterCanvas;
    use crate::sketch::interp;

    fn round_trip(original: &Raster) -> Raster {
        let bytes = encode_raster(original);
        let mut canvas = RasterCanvas::new(Raster::new(original.width(), original.height()));
        interp::run(&bytes, &mut canvas).unwrap();
        canvas.into_raster()
    }

    #[test]
    fn test_column_preamble_byte_sequence() {
        // 1×2 all-black raster: one column, two rows
        let raster = Raster::new(1, 2);
        let bytes = encode_raster(&raster);
        assert_eq!(
            bytes,
            vec![
                0x85, // TOOL TargetY (ty := 0)
                0xC0, // DATA 0
                0x84, // TOOL TargetX (tx := 0)
                0x80, // TOOL None
                0x40, // DY 0: warp pen to (0, 0)
                0x81, // TOOL Line
                0xC3, 0xFF, // DATA: alpha-only form for gray 0
                0x83, // TOOL Colour
                0x41, // DY +1
                0x40, // DY 0 on the last row
            ]
        );
    }

    #[test]
    fn test_color_zero_uses_minimal_form() {
        let mut out = Vec::new();
        push_color(&mut out, 0);
        assert_eq!(out, vec![0xC3, 0xFF, 0x83]);
    }

    #[test]
    fn test_color_nonzero_emits_full_rgba() {
        let mut out = Vec::new();
        push_color(&mut out, 200);
        // 0xC8C8C8FF split into 2 + 5×6 bits, then TOOL/COLOUR
        assert_eq!(out.len(), 7);
        assert_eq!(out[6], 0x83);
        let mut data = 0u32;
        for &b in &out[..6] {
            assert_eq!(Opcode::from_byte(b), Opcode::Data);
            data = (data << 6) | opcode::unsigned_operand(b);
        }
        assert_eq!(data, 0xC8C8_C8FF);
    }

    #[test]
    fn test_push_data_is_minimal() {
        let mut one = Vec::new();
        push_data(&mut one, 63);
        assert_eq!(one, vec![0xC0 | 63]);

        let mut two = Vec::new();
        push_data(&mut two, 70);
        assert_eq!(two, vec![0xC0 | 1, 0xC0 | 6]);

        let mut zero = Vec::new();
        push_data(&mut zero, 0);
        assert_eq!(zero, vec![0xC0]);
    }

    #[test]
    fn test_round_trip_flat_raster() {
        let raster = Raster::filled(5, 4, 97);
        assert_eq!(round_trip(&raster), raster);
    }

    #[test]
    fn test_round_trip_patterned_raster() {
        let mut raster = Raster::new(7, 9);
        for y in 0..9 {
            for x in 0..7 {
                raster.set(x, y, ((x * 31 + y * 57) % 256) as u8);
            }
        }
        assert_eq!(round_trip(&raster), raster);
    }

    #[test]
    fn test_round_trip_vertical_runs_compress() {
        // Two columns of constant color emit the color once per change,
        // not once per row
        let flat = Raster::filled(2, 50, 10);
        let noisy = {
            let mut r = Raster::new(2, 50);
            for y in 0..50 {
                for x in 0..2 {
                    r.set(x, y, if (x + y) % 2 == 0 { 1 } else { 2 });
                }
            }
            r
        };
        let flat_bytes = encode_raster(&flat);
        let noisy_bytes = encode_raster(&noisy);
        assert!(flat_bytes.len() < noisy_bytes.len());
        assert_eq!(round_trip(&flat), flat);
        assert_eq!(round_trip(&noisy), noisy);
    }

    #[test]
    fn test_trailing_accumulator_is_always_consumed() {
        // Strict interpretation must accept every encoder output
        let mut raster = Raster::new(3, 3);
        raster.set(2, 2, 255);
        let bytes = encode_raster(&raster);
        let mut canvas = RasterCanvas::new(Raster::new(3, 3));
        assert!(interp::run(&bytes, &mut canvas).is_ok());
    }
}
