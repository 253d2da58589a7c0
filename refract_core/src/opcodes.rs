//! Opcode tables: mnemonics, operand classification, and the classic set.
//!
//! The decoder is table-driven. A single [`OpcodeTable`] answers every
//! per-opcode question (name, operand classification, whether a two-byte
//! argument follows) so the scan loop itself stays branch-light.
//! Classification is resolved once when the table is built, never by
//! repeated set-membership tests per instruction.
//!
//! Tables are plain values: the bundled [`OpcodeTable::classic`] covers the
//! classic dialect, and callers decoding a different dialect of the same
//! format family supply their own table through the builder. Nothing
//! auto-detects versions.

use std::sync::{Arc, LazyLock};

/// How an instruction's argument is resolved for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperandKind {
    /// No symbolic resolution; the argument (if any) stands alone.
    #[default]
    None,
    /// Index into the constant pool.
    Const,
    /// Index into the global/attribute name table.
    Name,
    /// Relative jump: target is the offset after the instruction plus the
    /// argument.
    RelJump,
    /// Absolute jump: the argument is the target offset.
    AbsJump,
    /// Index into the local slot names.
    Local,
    /// Index into the comparison-operator labels.
    Compare,
    /// Index into the concatenated cell-then-free variable names.
    FreeCell,
}

/// Everything the decoder knows about one bytecode dialect.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    mnemonics: [Option<Arc<str>>; 256],
    kinds: [OperandKind; 256],
    have_argument: u8,
    extended_arg: u8,
    compare_labels: Box<[Arc<str>]>,
}

impl OpcodeTable {
    /// Starts an empty table with the given argument threshold and
    /// extension-prefix opcode.
    #[must_use]
    pub fn builder(have_argument: u8, extended_arg: u8) -> OpcodeTableBuilder {
        OpcodeTableBuilder {
            table: OpcodeTable {
                mnemonics: std::array::from_fn(|_| None),
                kinds: [OperandKind::None; 256],
                have_argument,
                extended_arg,
                compare_labels: Box::default(),
            },
        }
    }

    /// The classic dialect's table, built once on first use.
    #[must_use]
    pub fn classic() -> &'static OpcodeTable {
        LazyLock::force(&CLASSIC)
    }

    /// Mnemonic for `op`, if the table names it.
    #[must_use]
    pub fn mnemonic(&self, op: u8) -> Option<&Arc<str>> {
        self.mnemonics[op as usize].as_ref()
    }

    /// Display name for `op`: the mnemonic, or the `<NN>` placeholder for
    /// opcodes the table does not name.
    #[must_use]
    pub fn display_name(&self, op: u8) -> Arc<str> {
        match &self.mnemonics[op as usize] {
            Some(name) => Arc::clone(name),
            None => Arc::from(format!("<{op}>")),
        }
    }

    /// Operand classification for `op`.
    #[must_use]
    pub fn operand_kind(&self, op: u8) -> OperandKind {
        self.kinds[op as usize]
    }

    /// True when `op` carries a two-byte little-endian argument.
    #[must_use]
    pub fn has_argument(&self, op: u8) -> bool {
        op >= self.have_argument
    }

    /// The threshold below which opcodes are argument-less.
    #[must_use]
    pub const fn argument_threshold(&self) -> u8 {
        self.have_argument
    }

    /// True for the argument-extension prefix opcode.
    #[must_use]
    pub fn is_extended_arg(&self, op: u8) -> bool {
        op == self.extended_arg
    }

    /// Display label for comparison argument `index`.
    #[must_use]
    pub fn compare_label(&self, index: usize) -> Option<&Arc<str>> {
        self.compare_labels.get(index)
    }
}

/// Incremental [`OpcodeTable`] construction.
pub struct OpcodeTableBuilder {
    table: OpcodeTable,
}

impl OpcodeTableBuilder {
    /// Registers `op` under `mnemonic` with the given operand kind.
    ///
    /// Re-registration overwrites, except that a `Const` classification is
    /// never displaced by a non-`Const` one: when dialect extensions
    /// collide, constant indexing wins.
    #[must_use]
    pub fn op(mut self, op: u8, mnemonic: &str, kind: OperandKind) -> Self {
        let slot = op as usize;
        self.table.mnemonics[slot] = Some(Arc::from(mnemonic));
        if self.table.kinds[slot] != OperandKind::Const || kind == OperandKind::Const {
            self.table.kinds[slot] = kind;
        }
        self
    }

    /// Sets the comparison-operator display labels, indexed by argument.
    #[must_use]
    pub fn compare_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.table.compare_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Finishes the table.
    #[must_use]
    pub fn build(self) -> OpcodeTable {
        self.table
    }
}

// =============================================================================
// Classic dialect
// =============================================================================

/// Opcode numbers and fixed tables of the classic dialect.
pub mod classic {
    //! The stack-machine opcode set the toolkit decodes by default.
    //!
    //! Numbering leaves holes; decoding an unassigned number falls back to
    //! the `<NN>` placeholder mnemonic.

    /// Marker only; never executed.
    pub const STOP_CODE: u8 = 0;
    /// Discards the top of stack.
    pub const POP_TOP: u8 = 1;
    /// Swaps the two top stack items.
    pub const ROT_TWO: u8 = 2;
    /// Rotates the top three stack items.
    pub const ROT_THREE: u8 = 3;
    /// Duplicates the top of stack.
    pub const DUP_TOP: u8 = 4;
    /// Rotates the top four stack items.
    pub const ROT_FOUR: u8 = 5;
    /// Does nothing.
    pub const NOP: u8 = 9;
    /// TOS = +TOS.
    pub const UNARY_POSITIVE: u8 = 10;
    /// TOS = -TOS.
    pub const UNARY_NEGATIVE: u8 = 11;
    /// TOS = not TOS.
    pub const UNARY_NOT: u8 = 12;
    /// TOS = repr(TOS).
    pub const UNARY_CONVERT: u8 = 13;
    /// TOS = ~TOS.
    pub const UNARY_INVERT: u8 = 15;
    /// TOS = TOS1 ** TOS.
    pub const BINARY_POWER: u8 = 19;
    /// TOS = TOS1 * TOS.
    pub const BINARY_MULTIPLY: u8 = 20;
    /// TOS = TOS1 / TOS (classic division).
    pub const BINARY_DIVIDE: u8 = 21;
    /// TOS = TOS1 % TOS.
    pub const BINARY_MODULO: u8 = 22;
    /// TOS = TOS1 + TOS.
    pub const BINARY_ADD: u8 = 23;
    /// TOS = TOS1 - TOS.
    pub const BINARY_SUBTRACT: u8 = 24;
    /// TOS = TOS1[TOS].
    pub const BINARY_SUBSCR: u8 = 25;
    /// TOS = TOS1 // TOS.
    pub const BINARY_FLOOR_DIVIDE: u8 = 26;
    /// TOS = TOS1 / TOS (true division).
    pub const BINARY_TRUE_DIVIDE: u8 = 27;
    /// TOS1 //= TOS.
    pub const INPLACE_FLOOR_DIVIDE: u8 = 28;
    /// TOS1 /= TOS (true division).
    pub const INPLACE_TRUE_DIVIDE: u8 = 29;
    /// TOS = TOS[:].
    pub const SLICE_0: u8 = 30;
    /// TOS = TOS1[TOS:].
    pub const SLICE_1: u8 = 31;
    /// TOS = TOS1[:TOS].
    pub const SLICE_2: u8 = 32;
    /// TOS = TOS2[TOS1:TOS].
    pub const SLICE_3: u8 = 33;
    /// TOS[:] = TOS1.
    pub const STORE_SLICE_0: u8 = 40;
    /// TOS1[TOS:] = TOS2.
    pub const STORE_SLICE_1: u8 = 41;
    /// TOS1[:TOS] = TOS2.
    pub const STORE_SLICE_2: u8 = 42;
    /// TOS2[TOS1:TOS] = TOS3.
    pub const STORE_SLICE_3: u8 = 43;
    /// del TOS[:].
    pub const DELETE_SLICE_0: u8 = 50;
    /// del TOS1[TOS:].
    pub const DELETE_SLICE_1: u8 = 51;
    /// del TOS1[:TOS].
    pub const DELETE_SLICE_2: u8 = 52;
    /// del TOS2[TOS1:TOS].
    pub const DELETE_SLICE_3: u8 = 53;
    /// Stores a key/value pair into the map at TOS2.
    pub const STORE_MAP: u8 = 54;
    /// TOS1 += TOS.
    pub const INPLACE_ADD: u8 = 55;
    /// TOS1 -= TOS.
    pub const INPLACE_SUBTRACT: u8 = 56;
    /// TOS1 *= TOS.
    pub const INPLACE_MULTIPLY: u8 = 57;
    /// TOS1 /= TOS (classic division).
    pub const INPLACE_DIVIDE: u8 = 58;
    /// TOS1 %= TOS.
    pub const INPLACE_MODULO: u8 = 59;
    /// TOS1[TOS] = TOS2.
    pub const STORE_SUBSCR: u8 = 60;
    /// del TOS1[TOS].
    pub const DELETE_SUBSCR: u8 = 61;
    /// TOS = TOS1 << TOS.
    pub const BINARY_LSHIFT: u8 = 62;
    /// TOS = TOS1 >> TOS.
    pub const BINARY_RSHIFT: u8 = 63;
    /// TOS = TOS1 & TOS.
    pub const BINARY_AND: u8 = 64;
    /// TOS = TOS1 ^ TOS.
    pub const BINARY_XOR: u8 = 65;
    /// TOS = TOS1 | TOS.
    pub const BINARY_OR: u8 = 66;
    /// TOS1 **= TOS.
    pub const INPLACE_POWER: u8 = 67;
    /// TOS = iter(TOS).
    pub const GET_ITER: u8 = 68;
    /// Prints TOS in interactive mode.
    pub const PRINT_EXPR: u8 = 70;
    /// Prints TOS to standard output.
    pub const PRINT_ITEM: u8 = 71;
    /// Prints a newline to standard output.
    pub const PRINT_NEWLINE: u8 = 72;
    /// Prints TOS1 to the file-like object at TOS.
    pub const PRINT_ITEM_TO: u8 = 73;
    /// Prints a newline to the file-like object at TOS.
    pub const PRINT_NEWLINE_TO: u8 = 74;
    /// TOS1 <<= TOS.
    pub const INPLACE_LSHIFT: u8 = 75;
    /// TOS1 >>= TOS.
    pub const INPLACE_RSHIFT: u8 = 76;
    /// TOS1 &= TOS.
    pub const INPLACE_AND: u8 = 77;
    /// TOS1 ^= TOS.
    pub const INPLACE_XOR: u8 = 78;
    /// TOS1 |= TOS.
    pub const INPLACE_OR: u8 = 79;
    /// Terminates the innermost loop.
    pub const BREAK_LOOP: u8 = 80;
    /// Cleans up at the end of a with block.
    pub const WITH_CLEANUP: u8 = 81;
    /// Pushes the current local namespace.
    pub const LOAD_LOCALS: u8 = 82;
    /// Returns TOS to the caller.
    pub const RETURN_VALUE: u8 = 83;
    /// Imports all public names from the module at TOS.
    pub const IMPORT_STAR: u8 = 84;
    /// Executes dynamic code.
    pub const EXEC_STMT: u8 = 85;
    /// Yields TOS from a generator.
    pub const YIELD_VALUE: u8 = 86;
    /// Removes the innermost block from the block stack.
    pub const POP_BLOCK: u8 = 87;
    /// Ends a finally clause, re-raising if needed.
    pub const END_FINALLY: u8 = 88;
    /// Creates a class from name, bases, and namespace.
    pub const BUILD_CLASS: u8 = 89;

    /// First opcode number that carries a two-byte argument.
    pub const HAVE_ARGUMENT: u8 = 90;

    /// Stores TOS under the name at the argument index.
    pub const STORE_NAME: u8 = 90;
    /// Deletes the binding for the name at the argument index.
    pub const DELETE_NAME: u8 = 91;
    /// Unpacks TOS into its argument-count items.
    pub const UNPACK_SEQUENCE: u8 = 92;
    /// Advances the iterator at TOS or jumps past the loop.
    pub const FOR_ITER: u8 = 93;
    /// Appends TOS to the list argument-count slots down.
    pub const LIST_APPEND: u8 = 94;
    /// TOS.name = TOS1, name taken from the argument index.
    pub const STORE_ATTR: u8 = 95;
    /// del TOS.name, name taken from the argument index.
    pub const DELETE_ATTR: u8 = 96;
    /// Stores TOS under a global name.
    pub const STORE_GLOBAL: u8 = 97;
    /// Deletes a global name binding.
    pub const DELETE_GLOBAL: u8 = 98;
    /// Duplicates the top argument-count stack items.
    pub const DUP_TOPX: u8 = 99;
    /// Pushes the constant at the argument index.
    pub const LOAD_CONST: u8 = 100;
    /// Pushes the value bound to the name at the argument index.
    pub const LOAD_NAME: u8 = 101;
    /// Builds a tuple from the top argument-count items.
    pub const BUILD_TUPLE: u8 = 102;
    /// Builds a list from the top argument-count items.
    pub const BUILD_LIST: u8 = 103;
    /// Builds a set from the top argument-count items.
    pub const BUILD_SET: u8 = 104;
    /// Builds an empty map presized to the argument.
    pub const BUILD_MAP: u8 = 105;
    /// TOS = TOS.name, name taken from the argument index.
    pub const LOAD_ATTR: u8 = 106;
    /// Applies the comparison selected by the argument.
    pub const COMPARE_OP: u8 = 107;
    /// Imports the module named at the argument index.
    pub const IMPORT_NAME: u8 = 108;
    /// Loads an attribute from the module at TOS.
    pub const IMPORT_FROM: u8 = 109;
    /// Unconditional relative jump.
    pub const JUMP_FORWARD: u8 = 110;
    /// Jumps if TOS is false, else pops it.
    pub const JUMP_IF_FALSE_OR_POP: u8 = 111;
    /// Jumps if TOS is true, else pops it.
    pub const JUMP_IF_TRUE_OR_POP: u8 = 112;
    /// Unconditional absolute jump.
    pub const JUMP_ABSOLUTE: u8 = 113;
    /// Pops TOS and jumps if it is false.
    pub const POP_JUMP_IF_FALSE: u8 = 114;
    /// Pops TOS and jumps if it is true.
    pub const POP_JUMP_IF_TRUE: u8 = 115;
    /// Pushes the global bound to the name at the argument index.
    pub const LOAD_GLOBAL: u8 = 116;
    /// Continues the innermost loop at the absolute target.
    pub const CONTINUE_LOOP: u8 = 119;
    /// Pushes a loop block extending to the relative target.
    pub const SETUP_LOOP: u8 = 120;
    /// Pushes an exception handler at the relative target.
    pub const SETUP_EXCEPT: u8 = 121;
    /// Pushes a finally handler at the relative target.
    pub const SETUP_FINALLY: u8 = 122;
    /// Pushes the local slot at the argument index.
    pub const LOAD_FAST: u8 = 124;
    /// Stores TOS into the local slot at the argument index.
    pub const STORE_FAST: u8 = 125;
    /// Clears the local slot at the argument index.
    pub const DELETE_FAST: u8 = 126;
    /// Raises with argument-count exception operands.
    pub const RAISE_VARARGS: u8 = 130;
    /// Calls with positional and keyword counts packed in the argument.
    pub const CALL_FUNCTION: u8 = 131;
    /// Makes a function with argument-count default values.
    pub const MAKE_FUNCTION: u8 = 132;
    /// Builds a slice from the top two or three items.
    pub const BUILD_SLICE: u8 = 133;
    /// Makes a closure from captured cells and default values.
    pub const MAKE_CLOSURE: u8 = 134;
    /// Pushes the cell at the argument index.
    pub const LOAD_CLOSURE: u8 = 135;
    /// Pushes the value held by the cell at the argument index.
    pub const LOAD_DEREF: u8 = 136;
    /// Stores TOS into the cell at the argument index.
    pub const STORE_DEREF: u8 = 137;
    /// Calls with an extra iterable of positional arguments.
    pub const CALL_FUNCTION_VAR: u8 = 140;
    /// Calls with an extra mapping of keyword arguments.
    pub const CALL_FUNCTION_KW: u8 = 141;
    /// Calls with both extra argument containers.
    pub const CALL_FUNCTION_VAR_KW: u8 = 142;
    /// Enters a with block; handler at the relative target.
    pub const SETUP_WITH: u8 = 143;
    /// Supplies high-order argument bits to the next instruction.
    pub const EXTENDED_ARG: u8 = 145;
    /// Adds TOS to the set argument-count slots down.
    pub const SET_ADD: u8 = 146;
    /// Stores a key/value pair into the map argument-count slots down.
    pub const MAP_ADD: u8 = 147;

    /// Comparison-operator display labels, indexed by `COMPARE_OP` argument.
    pub const COMPARE_LABELS: [&str; 12] = [
        "<",
        "<=",
        "==",
        "!=",
        ">",
        ">=",
        "in",
        "not in",
        "is",
        "is not",
        "exception match",
        "BAD",
    ];
}

use OperandKind as K;

#[rustfmt::skip]
const CLASSIC_OPS: &[(u8, &str, OperandKind)] = &[
    (classic::STOP_CODE, "STOP_CODE", K::None),
    (classic::POP_TOP, "POP_TOP", K::None),
    (classic::ROT_TWO, "ROT_TWO", K::None),
    (classic::ROT_THREE, "ROT_THREE", K::None),
    (classic::DUP_TOP, "DUP_TOP", K::None),
    (classic::ROT_FOUR, "ROT_FOUR", K::None),
    (classic::NOP, "NOP", K::None),
    (classic::UNARY_POSITIVE, "UNARY_POSITIVE", K::None),
    (classic::UNARY_NEGATIVE, "UNARY_NEGATIVE", K::None),
    (classic::UNARY_NOT, "UNARY_NOT", K::None),
    (classic::UNARY_CONVERT, "UNARY_CONVERT", K::None),
    (classic::UNARY_INVERT, "UNARY_INVERT", K::None),
    (classic::BINARY_POWER, "BINARY_POWER", K::None),
    (classic::BINARY_MULTIPLY, "BINARY_MULTIPLY", K::None),
    (classic::BINARY_DIVIDE, "BINARY_DIVIDE", K::None),
    (classic::BINARY_MODULO, "BINARY_MODULO", K::None),
    (classic::BINARY_ADD, "BINARY_ADD", K::None),
    (classic::BINARY_SUBTRACT, "BINARY_SUBTRACT", K::None),
    (classic::BINARY_SUBSCR, "BINARY_SUBSCR", K::None),
    (classic::BINARY_FLOOR_DIVIDE, "BINARY_FLOOR_DIVIDE", K::None),
    (classic::BINARY_TRUE_DIVIDE, "BINARY_TRUE_DIVIDE", K::None),
    (classic::INPLACE_FLOOR_DIVIDE, "INPLACE_FLOOR_DIVIDE", K::None),
    (classic::INPLACE_TRUE_DIVIDE, "INPLACE_TRUE_DIVIDE", K::None),
    (classic::SLICE_0, "SLICE+0", K::None),
    (classic::SLICE_1, "SLICE+1", K::None),
    (classic::SLICE_2, "SLICE+2", K::None),
    (classic::SLICE_3, "SLICE+3", K::None),
    (classic::STORE_SLICE_0, "STORE_SLICE+0", K::None),
    (classic::STORE_SLICE_1, "STORE_SLICE+1", K::None),
    (classic::STORE_SLICE_2, "STORE_SLICE+2", K::None),
    (classic::STORE_SLICE_3, "STORE_SLICE+3", K::None),
    (classic::DELETE_SLICE_0, "DELETE_SLICE+0", K::None),
    (classic::DELETE_SLICE_1, "DELETE_SLICE+1", K::None),
    (classic::DELETE_SLICE_2, "DELETE_SLICE+2", K::None),
    (classic::DELETE_SLICE_3, "DELETE_SLICE+3", K::None),
    (classic::STORE_MAP, "STORE_MAP", K::None),
    (classic::INPLACE_ADD, "INPLACE_ADD", K::None),
    (classic::INPLACE_SUBTRACT, "INPLACE_SUBTRACT", K::None),
    (classic::INPLACE_MULTIPLY, "INPLACE_MULTIPLY", K::None),
    (classic::INPLACE_DIVIDE, "INPLACE_DIVIDE", K::None),
    (classic::INPLACE_MODULO, "INPLACE_MODULO", K::None),
    (classic::STORE_SUBSCR, "STORE_SUBSCR", K::None),
    (classic::DELETE_SUBSCR, "DELETE_SUBSCR", K::None),
    (classic::BINARY_LSHIFT, "BINARY_LSHIFT", K::None),
    (classic::BINARY_RSHIFT, "BINARY_RSHIFT", K::None),
    (classic::BINARY_AND, "BINARY_AND", K::None),
    (classic::BINARY_XOR, "BINARY_XOR", K::None),
    (classic::BINARY_OR, "BINARY_OR", K::None),
    (classic::INPLACE_POWER, "INPLACE_POWER", K::None),
    (classic::GET_ITER, "GET_ITER", K::None),
    (classic::PRINT_EXPR, "PRINT_EXPR", K::None),
    (classic::PRINT_ITEM, "PRINT_ITEM", K::None),
    (classic::PRINT_NEWLINE, "PRINT_NEWLINE", K::None),
    (classic::PRINT_ITEM_TO, "PRINT_ITEM_TO", K::None),
    (classic::PRINT_NEWLINE_TO, "PRINT_NEWLINE_TO", K::None),
    (classic::INPLACE_LSHIFT, "INPLACE_LSHIFT", K::None),
    (classic::INPLACE_RSHIFT, "INPLACE_RSHIFT", K::None),
    (classic::INPLACE_AND, "INPLACE_AND", K::None),
    (classic::INPLACE_XOR, "INPLACE_XOR", K::None),
    (classic::INPLACE_OR, "INPLACE_OR", K::None),
    (classic::BREAK_LOOP, "BREAK_LOOP", K::None),
    (classic::WITH_CLEANUP, "WITH_CLEANUP", K::None),
    (classic::LOAD_LOCALS, "LOAD_LOCALS", K::None),
    (classic::RETURN_VALUE, "RETURN_VALUE", K::None),
    (classic::IMPORT_STAR, "IMPORT_STAR", K::None),
    (classic::EXEC_STMT, "EXEC_STMT", K::None),
    (classic::YIELD_VALUE, "YIELD_VALUE", K::None),
    (classic::POP_BLOCK, "POP_BLOCK", K::None),
    (classic::END_FINALLY, "END_FINALLY", K::None),
    (classic::BUILD_CLASS, "BUILD_CLASS", K::None),
    (classic::STORE_NAME, "STORE_NAME", K::Name),
    (classic::DELETE_NAME, "DELETE_NAME", K::Name),
    (classic::UNPACK_SEQUENCE, "UNPACK_SEQUENCE", K::None),
    (classic::FOR_ITER, "FOR_ITER", K::RelJump),
    (classic::LIST_APPEND, "LIST_APPEND", K::None),
    (classic::STORE_ATTR, "STORE_ATTR", K::Name),
    (classic::DELETE_ATTR, "DELETE_ATTR", K::Name),
    (classic::STORE_GLOBAL, "STORE_GLOBAL", K::Name),
    (classic::DELETE_GLOBAL, "DELETE_GLOBAL", K::Name),
    (classic::DUP_TOPX, "DUP_TOPX", K::None),
    (classic::LOAD_CONST, "LOAD_CONST", K::Const),
    (classic::LOAD_NAME, "LOAD_NAME", K::Name),
    (classic::BUILD_TUPLE, "BUILD_TUPLE", K::None),
    (classic::BUILD_LIST, "BUILD_LIST", K::None),
    (classic::BUILD_SET, "BUILD_SET", K::None),
    (classic::BUILD_MAP, "BUILD_MAP", K::None),
    (classic::LOAD_ATTR, "LOAD_ATTR", K::Name),
    (classic::COMPARE_OP, "COMPARE_OP", K::Compare),
    (classic::IMPORT_NAME, "IMPORT_NAME", K::Name),
    (classic::IMPORT_FROM, "IMPORT_FROM", K::Name),
    (classic::JUMP_FORWARD, "JUMP_FORWARD", K::RelJump),
    (classic::JUMP_IF_FALSE_OR_POP, "JUMP_IF_FALSE_OR_POP", K::AbsJump),
    (classic::JUMP_IF_TRUE_OR_POP, "JUMP_IF_TRUE_OR_POP", K::AbsJump),
    (classic::JUMP_ABSOLUTE, "JUMP_ABSOLUTE", K::AbsJump),
    (classic::POP_JUMP_IF_FALSE, "POP_JUMP_IF_FALSE", K::AbsJump),
    (classic::POP_JUMP_IF_TRUE, "POP_JUMP_IF_TRUE", K::AbsJump),
    (classic::LOAD_GLOBAL, "LOAD_GLOBAL", K::Name),
    (classic::CONTINUE_LOOP, "CONTINUE_LOOP", K::AbsJump),
    (classic::SETUP_LOOP, "SETUP_LOOP", K::RelJump),
    (classic::SETUP_EXCEPT, "SETUP_EXCEPT", K::RelJump),
    (classic::SETUP_FINALLY, "SETUP_FINALLY", K::RelJump),
    (classic::LOAD_FAST, "LOAD_FAST", K::Local),
    (classic::STORE_FAST, "STORE_FAST", K::Local),
    (classic::DELETE_FAST, "DELETE_FAST", K::Local),
    (classic::RAISE_VARARGS, "RAISE_VARARGS", K::None),
    (classic::CALL_FUNCTION, "CALL_FUNCTION", K::None),
    (classic::MAKE_FUNCTION, "MAKE_FUNCTION", K::None),
    (classic::BUILD_SLICE, "BUILD_SLICE", K::None),
    (classic::MAKE_CLOSURE, "MAKE_CLOSURE", K::None),
    (classic::LOAD_CLOSURE, "LOAD_CLOSURE", K::FreeCell),
    (classic::LOAD_DEREF, "LOAD_DEREF", K::FreeCell),
    (classic::STORE_DEREF, "STORE_DEREF", K::FreeCell),
    (classic::CALL_FUNCTION_VAR, "CALL_FUNCTION_VAR", K::None),
    (classic::CALL_FUNCTION_KW, "CALL_FUNCTION_KW", K::None),
    (classic::CALL_FUNCTION_VAR_KW, "CALL_FUNCTION_VAR_KW", K::None),
    (classic::SETUP_WITH, "SETUP_WITH", K::RelJump),
    (classic::EXTENDED_ARG, "EXTENDED_ARG", K::None),
    (classic::SET_ADD, "SET_ADD", K::None),
    (classic::MAP_ADD, "MAP_ADD", K::None),
];

static CLASSIC: LazyLock<OpcodeTable> = LazyLock::new(|| {
    let mut builder = OpcodeTable::builder(classic::HAVE_ARGUMENT, classic::EXTENDED_ARG);
    for &(op, mnemonic, kind) in CLASSIC_OPS {
        builder = builder.op(op, mnemonic, kind);
    }
    builder.compare_labels(classic::COMPARE_LABELS).build()
});

// =============================================================================
// Tests
// =============================================================================
