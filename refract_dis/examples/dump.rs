// Hand-assembles the classic closure pair
//
//     def make_adder(n):
//         def add(x):
//             return x + n
//         return add
//
// and runs it through every listing mode.

use std::sync::Arc;

use refract_core::opcodes::classic;
use refract_core::{name_table, CodeFlags, CodeObject, OpcodeTable, RefractResult, Value};
use refract_dis::{
    disassemble_traceback, disassemble_tree, render, scan_raw, SideTables, TracebackFrame,
};

fn build_add() -> CodeObject {
    let mut code = CodeObject::new("add", "adders.py");
    code.argcount = 1;
    code.nlocals = 1;
    code.stacksize = 2;
    code.flags = CodeFlags::OPTIMIZED | CodeFlags::NEWLOCALS | CodeFlags::NESTED;
    code.code = Box::new([
        classic::LOAD_FAST,
        0,
        0,
        classic::LOAD_DEREF,
        0,
        0,
        classic::BINARY_ADD,
        classic::RETURN_VALUE,
    ]);
    code.consts = Box::new([Value::None]);
    code.varnames = name_table(["x"]);
    code.freevars = name_table(["n"]);
    code.first_lineno = 2;
    code.lnotab = Box::new([0, 1]);
    code
}

fn build_make_adder(add: Arc<CodeObject>) -> CodeObject {
    let mut code = CodeObject::new("make_adder", "adders.py");
    code.argcount = 1;
    code.nlocals = 2;
    code.stacksize = 3;
    code.flags = CodeFlags::OPTIMIZED | CodeFlags::NEWLOCALS;
    code.code = Box::new([
        classic::LOAD_CLOSURE,
        0,
        0,
        classic::BUILD_TUPLE,
        1,
        0,
        classic::LOAD_CONST,
        1,
        0,
        classic::MAKE_CLOSURE,
        0,
        0,
        classic::STORE_FAST,
        1,
        0,
        classic::LOAD_FAST,
        1,
        0,
        classic::RETURN_VALUE,
    ]);
    code.consts = Box::new([Value::None, Value::code(add)]);
    code.varnames = name_table(["n", "add"]);
    code.cellvars = name_table(["n"]);
    code.first_lineno = 1;
    code.lnotab = Box::new([0, 1, 15, 2]);
    code
}

fn main() -> RefractResult<()> {
    let table = OpcodeTable::classic();
    let add = Arc::new(build_add());
    let make_adder = Arc::new(build_make_adder(add));

    println!("=== Nested listing ===");
    println!("{}", disassemble_tree(table, Arc::clone(&make_adder))?);

    println!("\n=== Traceback frame at MAKE_CLOSURE ===");
    let frame = TracebackFrame {
        code: Arc::clone(&make_adder),
        last_offset: 9,
    };
    println!("{}", disassemble_traceback(table, &frame)?);

    println!("\n=== Raw bytes, locals table only ===");
    println!("code: {}", make_adder.hex_dump());
    let tables = SideTables {
        consts: None,
        names: None,
        varnames: Some(&make_adder.varnames),
    };
    println!("{}", render(&scan_raw(table, &make_adder.code, &tables)?));

    Ok(())
}
