//! Symbolic operand resolution.
//!
//! One rule everywhere: a lookup that misses (index out of range, table
//! not supplied) yields no formatted operand and the scan continues. The
//! numeric argument column always remains, so degraded listings stay
//! readable for foreign or damaged bytecode.

use std::sync::Arc;

use refract_core::{CodeObject, OpcodeTable, OperandKind, Value};

/// Optional lookup tables for raw-buffer scans.
///
/// Callers disassembling a fragment sometimes have the surrounding code
/// object's tables even when they lack the object itself; whatever is
/// missing simply loses its symbolic display.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideTables<'a> {
    /// Constant pool, if known.
    pub consts: Option<&'a [Value]>,
    /// Global/attribute names, if known.
    pub names: Option<&'a [Arc<str>]>,
    /// Local slot names, if known.
    pub varnames: Option<&'a [Arc<str>]>,
}

/// The resolved view the formatter reads from, whichever scan variant is
/// running. A missing table and an empty one behave identically, which is
/// exactly the degrade rule.
pub(crate) struct OperandSource<'a> {
    consts: &'a [Value],
    names: &'a [Arc<str>],
    varnames: &'a [Arc<str>],
    cellvars: &'a [Arc<str>],
    freevars: &'a [Arc<str>],
}

impl<'a> OperandSource<'a> {
    pub(crate) fn from_code(code: &'a CodeObject) -> Self {
        OperandSource {
            consts: &code.consts,
            names: &code.names,
            varnames: &code.varnames,
            cellvars: &code.cellvars,
            freevars: &code.freevars,
        }
    }

    pub(crate) fn from_side_tables(tables: &SideTables<'a>) -> Self {
        OperandSource {
            consts: tables.consts.unwrap_or(&[]),
            names: tables.names.unwrap_or(&[]),
            varnames: tables.varnames.unwrap_or(&[]),
            cellvars: &[],
            freevars: &[],
        }
    }

    /// Formats the operand for one instruction, or `None` when the opcode
    /// has nothing to resolve or the lookup degrades.
    ///
    /// `end_offset` is the offset immediately after the instruction, the
    /// base for relative-jump arithmetic. Merged arguments are 32-bit
    /// wrapping values, so the display target wraps the same way. Absolute
    /// jumps resolve to nothing: their argument column already displays
    /// the target.
    pub(crate) fn format(
        &self,
        table: &OpcodeTable,
        kind: OperandKind,
        arg: u32,
        end_offset: u32,
    ) -> Option<String> {
        match kind {
            OperandKind::None | OperandKind::AbsJump => None,
            OperandKind::Const => self.consts.get(arg as usize).map(Value::repr),
            OperandKind::Name => self.names.get(arg as usize).map(|name| name.to_string()),
            OperandKind::RelJump => Some(format!("to {}", end_offset.wrapping_add(arg))),
            OperandKind::Local => self.varnames.get(arg as usize).map(|name| name.to_string()),
            OperandKind::Compare => table.compare_label(arg as usize).map(|label| label.to_string()),
            OperandKind::FreeCell => self.free_cell_name(arg as usize).map(|name| name.to_string()),
        }
    }

    /// Cell variables precede free variables in the concatenated space.
    fn free_cell_name(&self, index: usize) -> Option<&Arc<str>> {
        if index < self.cellvars.len() {
            self.cellvars.get(index)
        } else {
            self.freevars.get(index - self.cellvars.len())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
