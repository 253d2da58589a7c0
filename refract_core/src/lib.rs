//! # Refract Core
//!
//! Shared ground types for the Refract bytecode toolkit: constant-pool
//! values, immutable code objects, dialect opcode tables, and the decode
//! error taxonomy. The disassembler in `refract_dis` is built entirely on
//! these types.
//!
//! Nothing here executes bytecode, performs I/O, or keeps mutable state:
//! code objects are frozen at construction and opcode tables are plain
//! values (the classic dialect ships as a lazily-built static).
//!
//! # Key Types
//!
//! - [`Value`]: a constant-pool entry, with the source language's `repr()`
//!   rendering.
//! - [`CodeObject`] / [`CodeFlags`]: an instruction stream plus its side
//!   tables and metadata.
//! - [`OpcodeTable`] / [`OperandKind`]: per-opcode names and operand
//!   classification for one bytecode dialect.
//! - [`RefractError`] / [`RefractResult`]: structural decode failures.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod error;
pub mod opcodes;
pub mod value;

pub use code::{name_table, CodeFlags, CodeObject};
pub use error::{RefractError, RefractResult};
pub use opcodes::{OpcodeTable, OpcodeTableBuilder, OperandKind};
pub use value::Value;

/// Crate version, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
