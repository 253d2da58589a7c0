//! # Refract Dis
//!
//! Forensic disassembler for Refract bytecode: one forward scan turns a
//! code object (or a bare buffer) into structured instruction records with
//! source-line anchors, jump-target marks, an optional current-instruction
//! marker, and symbolically resolved operands. The classic fixed-column
//! text listing is rendered from those records.
//!
//! Nothing here executes code. Scans are pure functions over immutable
//! inputs: a malformed stream fails with a typed error, while data-quality
//! problems (bad operand indices, unknown opcodes) only degrade the
//! symbolic display, because partial output beats none when inspecting
//! foreign or damaged bytecode.
//!
//! # Example
//!
//! ```
//! use refract_core::{CodeObject, OpcodeTable, Value};
//! use refract_core::opcodes::classic;
//!
//! let mut code = CodeObject::new("answer", "demo.py");
//! code.code = Box::new([classic::LOAD_CONST, 0, 0, classic::RETURN_VALUE]);
//! code.consts = Box::new([Value::Int(42)]);
//!
//! let listing = refract_dis::disassemble(OpcodeTable::classic(), &code)?;
//! assert!(listing.contains("LOAD_CONST"));
//! assert!(listing.contains("(42)"));
//! # Ok::<(), refract_core::RefractError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod instruction;
pub mod labels;
pub mod lines;
pub mod operand;
pub mod scan;
pub mod tree;

pub use instruction::{render, Instruction};
pub use labels::{find_labels, LabelSet};
pub use lines::{decode_line_table, line_starts, LineBreakpoint};
pub use operand::SideTables;
pub use scan::{
    disassemble, disassemble_at, disassemble_traceback, disassemble_tree, disassemble_value,
    scan, scan_raw, TracebackFrame,
};
pub use tree::{CodeNode, CodeTree, NodeId};

/// Crate version, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
