//! Constant-pool values and their literal display form.
//!
//! The disassembler prints constants the way the source language would
//! `repr()` them, so listings read like the VM's own tooling. Nested code
//! objects render as a one-line summary and are never expanded inline.

use std::fmt;
use std::sync::Arc;

use crate::code::CodeObject;

/// A constant as it appears in a code object's pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The VM's null value.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// Text string.
    Str(Arc<str>),
    /// Raw byte string.
    Bytes(Box<[u8]>),
    /// Immutable tuple of constants.
    Tuple(Box<[Value]>),
    /// A nested code object.
    Code(Arc<CodeObject>),
}

impl Value {
    /// Builds a string constant.
    #[must_use]
    pub fn str(text: impl Into<Arc<str>>) -> Self {
        Value::Str(text.into())
    }

    /// Builds a byte-string constant.
    #[must_use]
    pub fn bytes(data: impl Into<Box<[u8]>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Builds a tuple constant.
    #[must_use]
    pub fn tuple(items: impl Into<Box<[Value]>>) -> Self {
        Value::Tuple(items.into())
    }

    /// Builds a nested-code constant.
    #[must_use]
    pub fn code(code: impl Into<Arc<CodeObject>>) -> Self {
        Value::Code(code.into())
    }

    /// The nested code object, if this constant is one.
    #[must_use]
    pub fn as_code(&self) -> Option<&Arc<CodeObject>> {
        match self {
            Value::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Type name used in diagnostics, in the source language's spelling.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Tuple(_) => "tuple",
            Value::Code(_) => "code",
        }
    }

    /// Literal rendering, as the source language's `repr()` would print it.
    #[must_use]
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write_float(f, *value),
            Value::Str(text) => write_str_literal(f, text),
            Value::Bytes(data) => write_bytes_literal(f, data),
            Value::Tuple(items) => write_tuple(f, items),
            Value::Code(code) => f.write_str(&code.summary()),
        }
    }
}

/// Floats keep a trailing `.0` when integral so they stay visually distinct
/// from integers, matching the source language's repr.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("nan")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "inf" } else { "-inf" })
    } else if value == value.trunc() && value.abs() < 1e16 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

fn write_str_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    use fmt::Write;

    f.write_char('\'')?;
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 || c as u32 == 0x7f => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

fn write_bytes_literal(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
    use fmt::Write;

    f.write_str("b'")?;
    for &byte in data {
        match byte {
            b'\\' => f.write_str("\\\\")?,
            b'\'' => f.write_str("\\'")?,
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            0x20..=0x7e => f.write_char(char::from(byte))?,
            _ => write!(f, "\\x{byte:02x}")?,
        }
    }
    f.write_char('\'')
}

fn write_tuple(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("(")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    if items.len() == 1 {
        f.write_str(",")?;
    }
    f.write_str(")")
}

// =============================================================================
// Tests
// =============================================================================
