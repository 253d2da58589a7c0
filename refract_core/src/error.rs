//! Decode-error taxonomy for the Refract bytecode toolkit.
//!
//! Only structural failures are errors: a stream that cannot be walked, or a
//! disassembly request on a value that carries no bytecode. Data-quality
//! problems (out-of-range operand indices, opcodes the table does not name)
//! are absorbed during the scan with degraded output, because partial
//! disassembly is more useful than none for an inspection tool.

use thiserror::Error;

/// Errors produced while decoding an instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefractError {
    /// An argument-bearing opcode sits closer than two bytes to the end of
    /// the buffer, so its argument cannot be read.
    #[error(
        "truncated argument for opcode {opcode} at offset {offset}: {missing} byte(s) missing"
    )]
    TruncatedArgument {
        /// Offset of the opcode whose argument is cut short.
        offset: u32,
        /// The opcode that required an argument.
        opcode: u8,
        /// How many of the two argument bytes the stream is short.
        missing: usize,
    },

    /// Disassembly was requested on a value that is neither a code object,
    /// a byte buffer, nor a container of such.
    #[error("don't know how to disassemble {type_name} objects")]
    UnsupportedInput {
        /// Type name of the rejected value.
        type_name: &'static str,
    },
}

impl RefractError {
    /// Creates a [`RefractError::TruncatedArgument`].
    #[must_use]
    pub fn truncated_argument(offset: u32, opcode: u8, missing: usize) -> Self {
        Self::TruncatedArgument {
            offset,
            opcode,
            missing,
        }
    }

    /// Creates a [`RefractError::UnsupportedInput`].
    #[must_use]
    pub fn unsupported_input(type_name: &'static str) -> Self {
        Self::UnsupportedInput { type_name }
    }
}

/// Result alias used throughout the toolkit.
pub type RefractResult<T> = Result<T, RefractError>;

// =============================================================================
// Tests
// =============================================================================
