//! Byte-level codec for the sketch format.
//!
//! Every command is a single byte: the opcode lives in the top two bits,
//! the operand in the bottom six. The operand is read as a 6-bit two's
//! complement value for pen motion and tool selection, and as a 6-bit
//! unsigned value for DATA accumulation.

/// Command class packed into the top two bits of a sketch byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Move the target x position by the signed operand
    Dx,
    /// Move the target y position and apply the active tool
    Dy,
    /// Select a tool, or consume the accumulator via a selector operand
    Tool,
    /// Shift six more bits into the accumulator
    Data,
}

impl Opcode {
    /// Extract the opcode from a byte. Total over all 256 byte values.
    #[inline]
    pub fn from_byte(b: u8) -> Self {
        match b >> 6 {
            0 => Opcode::Dx,
            1 => Opcode::Dy,
            2 => Opcode::Tool,
            _ => Opcode::Data,
        }
    }

    /// The two opcode bits, unshifted.
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            Opcode::Dx => 0,
            Opcode::Dy => 1,
            Opcode::Tool => 2,
            Opcode::Data => 3,
        }
    }
}

/// Persistent drawing tools selectable by a TOOL byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    None,
    Line,
    Block,
}

/// Decoded meaning of a TOOL byte's operand.
///
/// Tool ids (0..=2) and selector values (3..=8) share the same 6-bit
/// numeric space; values outside it have no meaning and are rejected by
/// the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOp {
    /// Switch the active tool (operand 0, 1 or 2)
    Select(Tool),
    /// Consume the accumulator as the packed RGBA color (operand 3)
    Colour,
    /// Consume the accumulator as the absolute target x (operand 4)
    TargetX,
    /// Consume the accumulator as the absolute target y (operand 5)
    TargetY,
    /// Present the current frame (operand 6)
    Show,
    /// Pause for the accumulated number of milliseconds (operand 7)
    Pause,
    /// Frame boundary in multi-frame sketches (operand 8)
    NextFrame,
}

impl ToolOp {
    /// Map a signed TOOL operand to its meaning, `None` if out of range.
    pub fn from_operand(op: i32) -> Option<Self> {
        match op {
            0 => Some(ToolOp::Select(Tool::None)),
            1 => Some(ToolOp::Select(Tool::Line)),
            2 => Some(ToolOp::Select(Tool::Block)),
            3 => Some(ToolOp::Colour),
            4 => Some(ToolOp::TargetX),
            5 => Some(ToolOp::TargetY),
            6 => Some(ToolOp::Show),
            7 => Some(ToolOp::Pause),
            8 => Some(ToolOp::NextFrame),
            _ => None,
        }
    }

    /// The operand value that encodes this meaning.
    pub fn operand(self) -> i32 {
        match self {
            ToolOp::Select(Tool::None) => 0,
            ToolOp::Select(Tool::Line) => 1,
            ToolOp::Select(Tool::Block) => 2,
            ToolOp::Colour => 3,
            ToolOp::TargetX => 4,
            ToolOp::TargetY => 5,
            ToolOp::Show => 6,
            ToolOp::Pause => 7,
            ToolOp::NextFrame => 8,
        }
    }
}

/// Signed operand in [-32, 31]: the low six bits as two's complement.
#[inline]
pub fn operand(b: u8) -> i32 {
    let low = (b & 0x3F) as i32;
    if low >= 32 {
        low - 64
    } else {
        low
    }
}

/// Unsigned operand in [0, 63], used for DATA accumulation.
#[inline]
pub fn unsigned_operand(b: u8) -> u32 {
    (b & 0x3F) as u32
}

/// Pack an opcode and operand back into a byte.
///
/// The operand must fit the 6-bit field: [-32, 31] when read signed,
/// [0, 63] for DATA bytes. Both ranges map onto the same bit patterns,
/// so either convention may be passed for any opcode.
#[inline]
pub fn encode(op: Opcode, operand: i32) -> u8 {
    debug_assert!(
        (-32..64).contains(&operand),
        "operand {} does not fit six bits",
        operand
    );
    (op.bits() << 6) | (operand as u8 & 0x3F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_from_top_two_bits() {
        assert_eq!(Opcode::from_byte(0x00), Opcode::Dx);
        assert_eq!(Opcode::from_byte(0x1F), Opcode::Dx);
        assert_eq!(Opcode::from_byte(0x20), Opcode::Dx);
        assert_eq!(Opcode::from_byte(0x3F), Opcode::Dx);
        assert_eq!(Opcode::from_byte(0x40), Opcode::Dy);
        assert_eq!(Opcode::from_byte(0x5F), Opcode::Dy);
        assert_eq!(Opcode::from_byte(0x60), Opcode::Dy);
        assert_eq!(Opcode::from_byte(0x7F), Opcode::Dy);
        assert_eq!(Opcode::from_byte(0x80), Opcode::Tool);
        assert_eq!(Opcode::from_byte(0x81), Opcode::Tool);
        assert_eq!(Opcode::from_byte(0xC0), Opcode::Data);
        assert_eq!(Opcode::from_byte(0xFF), Opcode::Data);
    }

    #[test]
    fn test_opcode_depends_only_on_top_bits() {
        for b in 0..=255u8 {
            let expected = match b >> 6 {
                0 => Opcode::Dx,
                1 => Opcode::Dy,
                2 => Opcode::Tool,
                _ => Opcode::Data,
            };
            assert_eq!(Opcode::from_byte(b), expected);
        }
    }

    #[test]
    fn test_operand_boundaries() {
        assert_eq!(operand(0x00), 0);
        assert_eq!(operand(0x1F), 31);
        assert_eq!(operand(0x20), -32);
        assert_eq!(operand(0x3F), -1);
        // Top bits never leak into the operand
        assert_eq!(operand(0x40), 0);
        assert_eq!(operand(0x5F), 31);
        assert_eq!(operand(0x60), -32);
        assert_eq!(operand(0x7F), -1);
    }

    #[test]
    fn test_operand_range() {
        for b in 0..=255u8 {
            let v = operand(b);
            assert!((-32..=31).contains(&v), "operand({:#04x}) = {}", b, v);
            assert_eq!(unsigned_operand(b), (b & 0x3F) as u32);
        }
    }

    #[test]
    fn test_encode_round_trip() {
        for b in 0..=255u8 {
            let op = Opcode::from_byte(b);
            assert_eq!(encode(op, operand(b)), b);
            assert_eq!(encode(op, unsigned_operand(b) as i32), b);
        }
    }

    #[test]
    fn test_tool_op_mapping() {
        assert_eq!(ToolOp::from_operand(0), Some(ToolOp::Select(Tool::None)));
        assert_eq!(ToolOp::from_operand(1), Some(ToolOp::Select(Tool::Line)));
        assert_eq!(ToolOp::from_operand(2), Some(ToolOp::Select(Tool::Block)));
        assert_eq!(ToolOp::from_operand(3), Some(ToolOp::Colour));
        assert_eq!(ToolOp::from_operand(8), Some(ToolOp::NextFrame));
        assert_eq!(ToolOp::from_operand(9), None);
        assert_eq!(ToolOp::from_operand(-1), None);
        assert_eq!(ToolOp::from_operand(31), None);
        // Ids and selectors round-trip through their operand values
        for op in 0..=8 {
            assert_eq!(ToolOp::from_operand(op).unwrap().operand(), op);
        }
    }
}
