//! Decoded instructions and the classic listing layout.
//!
//! The text form keeps the fixed columns inspection tools have always
//! printed: line number, `-->` current marker, `>>` jump-target marker,
//! offset, mnemonic, argument, and the parenthesized resolved operand.

use std::fmt;
use std::sync::Arc;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the opcode.
    pub offset: u32,
    /// Raw opcode number.
    pub opcode: u8,
    /// Mnemonic, or the `<NN>` placeholder for unknown opcodes.
    pub mnemonic: Arc<str>,
    /// Decoded argument, extension prefixes folded in; present exactly when
    /// the opcode sits at or above the table's argument threshold.
    pub arg: Option<u32>,
    /// Symbolically resolved operand, when resolution succeeded.
    pub operand: Option<String>,
    /// Source line starting at this exact offset, if any.
    pub line: Option<u32>,
    /// True when some branch lands here.
    pub is_jump_target: bool,
    /// True when this is the instruction the scan was anchored on.
    pub is_current: bool,
}

impl fmt::Display for Instruction {
    /// Columns: line (3, right), current (`-->`), target (`>>`), offset
    /// (4, right), mnemonic (20, left), argument (5, right), `(operand)`.
    /// Trailing padding is trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(48);
        match self.line {
            Some(line) => text.push_str(&format!("{line:>3}")),
            None => text.push_str("   "),
        }
        text.push(' ');
        text.push_str(if self.is_current { "-->" } else { "   " });
        text.push(' ');
        text.push_str(if self.is_jump_target { ">>" } else { "  " });
        text.push(' ');
        text.push_str(&format!("{:>4}", self.offset));
        text.push(' ');
        text.push_str(&format!("{:<20}", self.mnemonic));
        if let Some(arg) = self.arg {
            text.push_str(&format!(" {arg:>5}"));
            if let Some(operand) = &self.operand {
                text.push_str(&format!(" ({operand})"));
            }
        }
        f.write_str(text.trim_end())
    }
}

/// Renders a scanned sequence as the classic listing: one line per
/// instruction, with a blank separator before each instruction that opens
/// a new source line (except at offset 0).
#[must_use]
pub fn render(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for inst in instructions {
        if inst.line.is_some() && inst.offset > 0 {
            out.push('\n');
        }
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
