//! Code objects: an immutable instruction stream plus the side tables
//! needed to read it.
//!
//! Loaders construct these field by field from whatever container format
//! they parse; the toolkit itself never reads files and never mutates a
//! code object after construction. All sequence fields are boxed slices:
//! the data is frozen, only shared.

use std::ops::BitOr;
use std::sync::Arc;

use crate::value::Value;

/// Behavioral flag bits carried by a [`CodeObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeFlags(u32);

impl CodeFlags {
    /// Locals are addressed by slot rather than by name lookup.
    pub const OPTIMIZED: CodeFlags = CodeFlags(0x1);
    /// A fresh local namespace is created per invocation.
    pub const NEWLOCALS: CodeFlags = CodeFlags(0x2);
    /// The code accepts a trailing `*args` parameter.
    pub const VARARGS: CodeFlags = CodeFlags(0x4);
    /// The code accepts a trailing `**kwargs` parameter.
    pub const VARKEYWORDS: CodeFlags = CodeFlags(0x8);
    /// Defined inside another function's scope.
    pub const NESTED: CodeFlags = CodeFlags(0x10);
    /// The code yields instead of returning.
    pub const GENERATOR: CodeFlags = CodeFlags(0x20);
    /// No free or cell variables anywhere in or below this code.
    pub const NOFREE: CodeFlags = CodeFlags(0x40);

    /// The empty flag set.
    #[must_use]
    pub const fn empty() -> Self {
        CodeFlags(0)
    }

    /// Builds a flag set from a raw bit pattern.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        CodeFlags(bits)
    }

    /// The raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: CodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// The union of both flag sets.
    #[must_use]
    pub const fn union(self, other: CodeFlags) -> Self {
        CodeFlags(self.0 | other.0)
    }

    /// True for generator code.
    #[must_use]
    pub const fn is_generator(self) -> bool {
        self.contains(Self::GENERATOR)
    }

    /// True when the code accepts `*args`.
    #[must_use]
    pub const fn has_varargs(self) -> bool {
        self.contains(Self::VARARGS)
    }

    /// True when the code accepts `**kwargs`.
    #[must_use]
    pub const fn has_varkeywords(self) -> bool {
        self.contains(Self::VARKEYWORDS)
    }
}

impl BitOr for CodeFlags {
    type Output = CodeFlags;

    fn bitor(self, rhs: CodeFlags) -> CodeFlags {
        self.union(rhs)
    }
}

/// An immutable unit of bytecode and everything needed to display it.
///
/// Fields are public: loaders and tests start from [`CodeObject::new`] and
/// fill in what they have. A disassembly pass only ever borrows a code
/// object read-only, so sharing one across threads needs no coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeObject {
    /// Function or block name.
    pub name: Arc<str>,
    /// Source file the code was compiled from.
    pub filename: Arc<str>,
    /// Number of positional parameters.
    pub argcount: u32,
    /// Number of local variable slots.
    pub nlocals: u32,
    /// Greatest value-stack depth the code can reach.
    pub stacksize: u32,
    /// Behavioral flags.
    pub flags: CodeFlags,
    /// Raw instruction stream.
    pub code: Box<[u8]>,
    /// Constant pool.
    pub consts: Box<[Value]>,
    /// Global and attribute names.
    pub names: Box<[Arc<str>]>,
    /// Local slot names.
    pub varnames: Box<[Arc<str>]>,
    /// Names closed over from enclosing scopes.
    pub freevars: Box<[Arc<str>]>,
    /// Names this code exposes to nested scopes.
    pub cellvars: Box<[Arc<str>]>,
    /// Source line of the first instruction.
    pub first_lineno: u32,
    /// Packed line table: flat (byte delta, line delta) pairs.
    pub lnotab: Box<[u8]>,
}

impl CodeObject {
    /// An empty skeleton with the given identity; callers fill the rest.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, filename: impl Into<Arc<str>>) -> Self {
        CodeObject {
            name: name.into(),
            filename: filename.into(),
            argcount: 0,
            nlocals: 0,
            stacksize: 0,
            flags: CodeFlags::empty(),
            code: Box::default(),
            consts: Box::default(),
            names: Box::default(),
            varnames: Box::default(),
            freevars: Box::default(),
            cellvars: Box::default(),
            first_lineno: 1,
            lnotab: Box::default(),
        }
    }

    /// One-line identity used wherever a code object is named in output.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "<code object {}, file \"{}\", line {}>",
            self.name, self.filename, self.first_lineno
        )
    }

    /// Nested code objects in constant-pool order.
    pub fn nested_codes(&self) -> impl Iterator<Item = &Arc<CodeObject>> {
        self.consts.iter().filter_map(Value::as_code)
    }

    /// Closure-name lookup in the concatenated index space: cell variables
    /// precede free variables.
    #[must_use]
    pub fn free_cell_name(&self, index: usize) -> Option<&Arc<str>> {
        if index < self.cellvars.len() {
            self.cellvars.get(index)
        } else {
            self.freevars.get(index - self.cellvars.len())
        }
    }

    /// The instruction bytes as lowercase hex, viewer-style.
    #[must_use]
    pub fn hex_dump(&self) -> String {
        self.code.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

/// Builds a name table from anything string-like; loader and test
/// convenience.
#[must_use]
pub fn name_table<I, S>(names: I) -> Box<[Arc<str>]>
where
    I: IntoIterator<Item = S>,
    S: Into<Arc<str>>,
{
    names.into_iter().map(Into::into).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_contains_and_union() {
        let flags = CodeFlags::OPTIMIZED | CodeFlags::NEWLOCALS;
        assert!(flags.contains(CodeFlags::OPTIMIZED));
        assert!(flags.contains(CodeFlags::NEWLOCALS));
        assert!(!flags.contains(CodeFlags::GENERATOR));
        assert_eq!(flags.bits(), 0x3);
        assert_eq!(CodeFlags::from_bits(0x20), CodeFlags::GENERATOR);
    }

    #[test]
    fn test_flag_predicates() {
        let flags = CodeFlags::VARARGS | CodeFlags::GENERATOR;
        assert!(flags.has_varargs());
        assert!(!flags.has_varkeywords());
        assert!(flags.is_generator());
        assert!(!CodeFlags::empty().is_generator());
    }

    #[test]
    fn test_new_is_empty() {
        let code = CodeObject::new("f", "f.py");
        assert_eq!(&*code.name, "f");
        assert_eq!(&*code.filename, "f.py");
        assert!(code.code.is_empty());
        assert!(code.consts.is_empty());
        assert_eq!(code.first_lineno, 1);
        assert_eq!(code.flags, CodeFlags::empty());
    }

    #[test]
    fn test_summary() {
        let mut code = CodeObject::new("outer", "mod.py");
        code.first_lineno = 12;
        assert_eq!(code.summary(), "<code object outer, file \"mod.py\", line 12>");
    }

    #[test]
    fn test_free_cell_name_ordering() {
        let mut code = CodeObject::new("f", "f.py");
        code.cellvars = name_table(["cell_a", "cell_b"]);
        code.freevars = name_table(["free_a"]);
        assert_eq!(code.free_cell_name(0).map(|n| &**n), Some("cell_a"));
        assert_eq!(code.free_cell_name(1).map(|n| &**n), Some("cell_b"));
        assert_eq!(code.free_cell_name(2).map(|n| &**n), Some("free_a"));
        assert_eq!(code.free_cell_name(3), None);
    }

    #[test]
    fn test_nested_codes_in_pool_order() {
        let mut code = CodeObject::new("outer", "mod.py");
        code.consts = Box::new([
            Value::Int(1),
            Value::code(CodeObject::new("first", "mod.py")),
            Value::str("skip"),
            Value::code(CodeObject::new("second", "mod.py")),
        ]);
        let nested: Vec<&str> = code.nested_codes().map(|c| &*c.name).collect();
        assert_eq!(nested, ["first", "second"]);
    }

    #[test]
    fn test_hex_dump() {
        let mut code = CodeObject::new("f", "f.py");
        code.code = Box::new([0x64, 0x00, 0x00, 0x53]);
        assert_eq!(code.hex_dump(), "64000053");
    }
}
