//! Instruction-stream scanning and the disassembly entry points.
//!
//! One forward walk per scan. The extension-prefix accumulator is a single
//! local slot owned by the loop: loaded into the next argument-bearing
//! instruction's argument, then cleared. Nothing leaks between calls, so
//! concurrent scans never interfere.

use std::sync::Arc;

use refract_core::{CodeObject, OpcodeTable, RefractError, RefractResult, Value};
use rustc_hash::FxHashMap;

use crate::instruction::{render, Instruction};
use crate::labels::find_labels;
use crate::lines::line_starts;
use crate::operand::{OperandSource, SideTables};
use crate::tree::CodeTree;

/// The already-resolved execution point of a traceback: which code object,
/// and the offset of the instruction that was executing. Walking a
/// traceback chain to find this pair is the caller's business.
#[derive(Debug, Clone)]
pub struct TracebackFrame {
    /// Code object the frame was executing.
    pub code: Arc<CodeObject>,
    /// Offset of the last-executed instruction.
    pub last_offset: u32,
}

/// Scans a code object into instruction records.
///
/// `current` anchors the `-->` marker (typically a traceback's last
/// executed offset); pass `None` for a plain listing. Fails only on a
/// stream that ends inside an argument.
pub fn scan(
    table: &OpcodeTable,
    code: &CodeObject,
    current: Option<u32>,
) -> RefractResult<Vec<Instruction>> {
    let lines = line_starts(code);
    let source = OperandSource::from_code(code);
    scan_stream(table, &code.code, &source, &lines, current, true)
}

/// Scans a bare buffer.
///
/// No line table, no current marker, and no extension-prefix folding: each
/// argument stands alone, matching the source format's string-mode
/// scanner. Jump targets are still discovered from the buffer itself, and
/// whatever side tables the caller supplies improve operand display.
pub fn scan_raw(
    table: &OpcodeTable,
    bytes: &[u8],
    tables: &SideTables<'_>,
) -> RefractResult<Vec<Instruction>> {
    let lines = FxHashMap::default();
    let source = OperandSource::from_side_tables(tables);
    scan_stream(table, bytes, &source, &lines, None, false)
}

fn scan_stream(
    table: &OpcodeTable,
    bytes: &[u8],
    source: &OperandSource<'_>,
    lines: &FxHashMap<u32, u32>,
    current: Option<u32>,
    merge_extensions: bool,
) -> RefractResult<Vec<Instruction>> {
    let labels = find_labels(table, bytes)?;
    let mut instructions = Vec::with_capacity(bytes.len() / 2);
    let mut extended: u32 = 0;
    let mut i: usize = 0;

    while i < bytes.len() {
        let offset = i as u32;
        let op = bytes[i];
        i += 1;

        let mut arg = None;
        let mut operand = None;
        if table.has_argument(op) {
            if bytes.len() - i < 2 {
                return Err(RefractError::truncated_argument(
                    offset,
                    op,
                    2 - (bytes.len() - i),
                ));
            }
            let raw = u32::from(bytes[i]) | (u32::from(bytes[i + 1]) << 8);
            i += 2;
            let merged = raw.wrapping_add(extended);
            extended = 0;
            if merge_extensions && table.is_extended_arg(op) {
                // High-order bits for the next argument; the prefix itself
                // shows only its numeric value.
                extended = merged.wrapping_mul(65_536);
            } else {
                operand = source.format(table, table.operand_kind(op), merged, i as u32);
            }
            arg = Some(merged);
        }

        instructions.push(Instruction {
            offset,
            opcode: op,
            mnemonic: table.display_name(op),
            arg,
            operand,
            line: lines.get(&offset).copied(),
            is_jump_target: labels.contains(offset),
            is_current: current == Some(offset),
        });
    }
    Ok(instructions)
}

/// Scans and renders a full listing for `code`.
pub fn disassemble(table: &OpcodeTable, code: &CodeObject) -> RefractResult<String> {
    Ok(render(&scan(table, code, None)?))
}

/// Scans and renders with the `-->` marker on `current`.
pub fn disassemble_at(
    table: &OpcodeTable,
    code: &CodeObject,
    current: u32,
) -> RefractResult<String> {
    Ok(render(&scan(table, code, Some(current))?))
}

/// Renders a traceback frame's code with the current marker on its last
/// executed instruction.
pub fn disassemble_traceback(
    table: &OpcodeTable,
    frame: &TracebackFrame,
) -> RefractResult<String> {
    disassemble_at(table, &frame.code, frame.last_offset)
}

/// Generic front door mirroring the classic `dis()` surface.
///
/// Code objects get a full listing; byte strings a raw-mode listing;
/// tuples one listing per disassemblable element, each under a
/// `Disassembly of <repr>:` header with other elements skipped. Anything
/// else is refused with [`RefractError::UnsupportedInput`].
pub fn disassemble_value(table: &OpcodeTable, value: &Value) -> RefractResult<String> {
    match value {
        Value::Code(code) => disassemble(table, code),
        Value::Bytes(bytes) => Ok(render(&scan_raw(table, bytes, &SideTables::default())?)),
        Value::Tuple(items) => {
            let mut out = String::new();
            for item in items.iter() {
                if !matches!(item, Value::Code(_) | Value::Bytes(_) | Value::Tuple(_)) {
                    continue;
                }
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("Disassembly of {}:\n", item.repr()));
                out.push_str(&disassemble_value(table, item)?);
            }
            Ok(out)
        }
        other => Err(RefractError::unsupported_input(other.type_name())),
    }
}

/// Walks the nested-code tree and renders every code object: the root
/// first, then each nested definition under its own header, depth-first in
/// constant-pool order.
pub fn disassemble_tree(table: &OpcodeTable, root: Arc<CodeObject>) -> RefractResult<String> {
    let tree = CodeTree::build(root);
    let mut out = String::new();
    for (id, depth) in tree.depth_first() {
        let node = tree.node(id);
        if depth == 0 {
            out.push_str(&disassemble(table, &node.code)?);
        } else {
            out.push('\n');
            out.push_str(&format!("Disassembly of {}:\n", node.code.summary()));
            out.push_str(&disassemble(table, &node.code)?);
        }
    }
    Ok(out)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use refract_core::opcodes::classic;

    fn code_with(bytes: &[u8], consts: &[Value]) -> CodeObject {
        let mut code = CodeObject::new("f", "f.py");
        code.code = bytes.into();
        code.consts = consts.into();
        code
    }

    #[test]
    fn test_two_instruction_stream() {
        let code = code_with(
            &[classic::LOAD_CONST, 0, 0, classic::RETURN_VALUE],
            &[Value::Int(42)],
        );
        let insts = scan(OpcodeTable::classic(), &code, None).unwrap();
        assert_eq!(insts.len(), 2);
        assert_eq!(insts[0].offset, 0);
        assert_eq!(&*insts[0].mnemonic, "LOAD_CONST");
        assert_eq!(insts[0].arg, Some(0));
        assert_eq!(insts[0].operand.as_deref(), Some("42"));
        assert_eq!(insts[1].offset, 3);
        assert_eq!(&*insts[1].mnemonic, "RETURN_VALUE");
        assert_eq!(insts[1].arg, None);
    }

    #[test]
    fn test_extension_prefix_merges_then_clears() {
        let code = code_with(
            &[
                classic::EXTENDED_ARG,
                2,
                0,
                classic::LOAD_CONST,
                1,
                0,
                classic::LOAD_CONST,
                0,
                0,
                classic::RETURN_VALUE,
            ],
            &[Value::Int(7)],
        );
        let insts = scan(OpcodeTable::classic(), &code, None).unwrap();
        assert_eq!(insts[0].arg, Some(2));
        assert_eq!(insts[0].operand, None);
        // 2 * 65536 + 1.
        assert_eq!(insts[1].arg, Some(131_073));
        assert_eq!(insts[1].operand, None); // merged index is out of range
        // Accumulator is gone for the instruction after the consumer.
        assert_eq!(insts[2].arg, Some(0));
        assert_eq!(insts[2].operand.as_deref(), Some("7"));
    }

    #[test]
    fn test_maximal_prefix_on_relative_jump_wraps() {
        // A saturated prefix merges to u32::MAX; the jump target display
        // wraps with the accumulator instead of overflowing.
        let code = code_with(
            &[
                classic::EXTENDED_ARG,
                0xff,
                0xff,
                classic::JUMP_FORWARD,
                0xff,
                0xff,
            ],
            &[],
        );
        let insts = scan(OpcodeTable::classic(), &code, None).unwrap();
        assert_eq!(insts[1].arg, Some(u32::MAX));
        assert_eq!(insts[1].operand.as_deref(), Some("to 5"));
    }

    #[test]
    fn test_current_marker() {
        let code = code_with(
            &[classic::LOAD_CONST, 0, 0, classic::RETURN_VALUE],
            &[Value::None],
        );
        let insts = scan(OpcodeTable::classic(), &code, Some(3)).unwrap();
        assert!(!insts[0].is_current);
        assert!(insts[1].is_current);
    }

    #[test]
    fn test_truncated_stream_is_fatal() {
        let code = code_with(&[classic::LOAD_CONST, 0], &[]);
        let err = scan(OpcodeTable::classic(), &code, None).unwrap_err();
        assert_eq!(
            err,
            RefractError::TruncatedArgument {
                offset: 0,
                opcode: classic::LOAD_CONST,
                missing: 1,
            }
        );
    }

    #[test]
    fn test_unknown_opcode_gets_placeholder() {
        let code = code_with(&[6, classic::RETURN_VALUE], &[]);
        let insts = scan(OpcodeTable::classic(), &code, None).unwrap();
        assert_eq!(&*insts[0].mnemonic, "<6>");
        assert_eq!(insts[0].arg, None);
    }

    #[test]
    fn test_raw_mode_does_not_merge_prefixes() {
        let bytes = [
            classic::EXTENDED_ARG,
            2,
            0,
            classic::JUMP_ABSOLUTE,
            1,
            0,
        ];
        let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();
        assert_eq!(insts[0].arg, Some(2));
        assert_eq!(insts[1].arg, Some(1));
        assert!(insts.iter().all(|i| i.line.is_none() && !i.is_current));
    }

    #[test]
    fn test_raw_mode_still_marks_jump_targets() {
        let bytes = [
            classic::JUMP_FORWARD,
            1,
            0,
            classic::POP_TOP,
            classic::RETURN_VALUE,
        ];
        let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();
        assert!(!insts[1].is_jump_target); // offset 3
        assert!(insts[2].is_jump_target); // offset 4 = 3 + 1
    }

    #[test]
    fn test_disassemble_value_dispatch() {
        let table = OpcodeTable::classic();
        let code = code_with(&[classic::RETURN_VALUE], &[]);
        assert!(disassemble_value(table, &Value::code(code))
            .unwrap()
            .contains("RETURN_VALUE"));
        assert!(disassemble_value(table, &Value::bytes([classic::POP_TOP]))
            .unwrap()
            .contains("POP_TOP"));
        let err = disassemble_value(table, &Value::Int(3)).unwrap_err();
        assert_eq!(err, RefractError::unsupported_input("int"));
    }

    #[test]
    fn test_disassemble_value_tuple_headers() {
        let table = OpcodeTable::classic();
        let inner = code_with(&[classic::RETURN_VALUE], &[]);
        let tuple = Value::tuple([Value::Int(1), Value::code(inner)]);
        let out = disassemble_value(table, &tuple).unwrap();
        assert!(out.starts_with("Disassembly of <code object f, file \"f.py\", line 1>:"));
        assert!(out.contains("RETURN_VALUE"));
    }
}
