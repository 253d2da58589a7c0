//! Raw-buffer scans: bare byte strings with optional side tables.

use refract_core::opcodes::classic;
use refract_core::{name_table, OpcodeTable, RefractError, Value};
use refract_dis::{render, scan_raw, SideTables};

// =============================================================================
// Record shape
// =============================================================================

#[test]
fn test_raw_records_carry_no_line_or_current_state() {
    let bytes = [
        classic::LOAD_CONST,
        0,
        0,
        classic::LOAD_CONST,
        1,
        0,
        classic::BINARY_ADD,
        classic::RETURN_VALUE,
    ];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();

    assert_eq!(insts.len(), 4);
    for inst in &insts {
        assert_eq!(inst.line, None, "raw scans have no line table");
        assert!(!inst.is_current, "raw scans have no current instruction");
    }
}

#[test]
fn test_raw_listing_has_no_blank_separators() {
    let bytes = [
        classic::LOAD_CONST,
        0,
        0,
        classic::POP_TOP,
        classic::LOAD_CONST,
        1,
        0,
        classic::RETURN_VALUE,
    ];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();
    let listing = render(&insts);
    assert!(
        !listing.contains("\n\n"),
        "blank lines separate source lines, which raw scans lack"
    );
}

// =============================================================================
// Side tables
// =============================================================================

#[test]
fn test_side_tables_restore_symbolic_display() {
    let consts = [Value::Int(42)];
    let names = name_table(["print"]);
    let varnames = name_table(["x"]);
    let tables = SideTables {
        consts: Some(&consts),
        names: Some(&names),
        varnames: Some(&varnames),
    };
    let bytes = [
        classic::LOAD_CONST,
        0,
        0,
        classic::LOAD_NAME,
        0,
        0,
        classic::STORE_FAST,
        0,
        0,
    ];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &tables).unwrap();

    assert_eq!(insts[0].operand.as_deref(), Some("42"));
    assert_eq!(insts[1].operand.as_deref(), Some("print"));
    assert_eq!(insts[2].operand.as_deref(), Some("x"));
}

#[test]
fn test_partial_side_tables_degrade_per_table() {
    let consts = [Value::str("hi")];
    let tables = SideTables {
        consts: Some(&consts),
        names: None,
        varnames: None,
    };
    let bytes = [classic::LOAD_CONST, 0, 0, classic::LOAD_GLOBAL, 0, 0];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &tables).unwrap();

    assert_eq!(insts[0].operand.as_deref(), Some("'hi'"));
    assert_eq!(insts[1].operand, None, "missing name table degrades quietly");
}

#[test]
fn test_no_tables_yields_numeric_only_columns() {
    let bytes = [
        classic::LOAD_CONST,
        7,
        0,
        classic::LOAD_GLOBAL,
        2,
        0,
        classic::STORE_FAST,
        0,
        0,
        classic::RETURN_VALUE,
    ];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();
    let listing = render(&insts);

    assert!(listing.contains("LOAD_CONST               7"));
    assert!(listing.contains("LOAD_GLOBAL              2"));
    assert!(
        !listing.contains('('),
        "no table can resolve, so no parenthesized operands appear"
    );
}

#[test]
fn test_compare_labels_come_from_the_opcode_table() {
    // Comparison display never needs the code object, so even a bare
    // buffer shows the symbolic operator.
    let bytes = [classic::COMPARE_OP, 2, 0];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();

    assert_eq!(insts[0].operand.as_deref(), Some("=="));
    assert!(render(&insts).contains("COMPARE_OP               2 (==)"));
}

#[test]
fn test_relative_targets_need_no_tables() {
    let bytes = [classic::JUMP_FORWARD, 4, 0, classic::RETURN_VALUE];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();
    assert_eq!(insts[0].operand.as_deref(), Some("to 7"));
}

// =============================================================================
// Prefix handling
// =============================================================================

#[test]
fn test_raw_mode_never_folds_extension_prefixes() {
    let bytes = [classic::EXTENDED_ARG, 1, 0, classic::LOAD_CONST, 5, 0];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();

    assert_eq!(insts.len(), 2);
    assert_eq!(insts[0].arg, Some(1), "the prefix keeps its own argument");
    assert_eq!(
        insts[1].arg,
        Some(5),
        "the follower must not absorb the prefix"
    );
}

// =============================================================================
// Labels and errors
// =============================================================================

#[test]
fn test_jump_targets_are_still_marked_in_raw_listings() {
    let bytes = [
        classic::LOAD_CONST,
        0,
        0,
        classic::JUMP_ABSOLUTE,
        0,
        0,
        classic::RETURN_VALUE,
    ];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();

    assert!(insts[0].is_jump_target);
    assert!(!insts[1].is_jump_target);
    assert!(render(&insts).contains(">>    0 LOAD_CONST"));
}

#[test]
fn test_truncated_raw_buffer_is_fatal() {
    let bytes = [classic::RETURN_VALUE, classic::LOAD_CONST, 0];
    let err = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap_err();
    match err {
        RefractError::TruncatedArgument {
            offset,
            opcode,
            missing,
        } => {
            assert_eq!(offset, 1);
            assert_eq!(opcode, classic::LOAD_CONST);
            assert_eq!(missing, 1);
        }
        other => panic!("expected truncation error, got {other}"),
    }
}

#[test]
fn test_unknown_opcodes_render_as_numeric_placeholders() {
    let bytes = [6, classic::RETURN_VALUE];
    let insts = scan_raw(OpcodeTable::classic(), &bytes, &SideTables::default()).unwrap();
    assert_eq!(&*insts[0].mnemonic, "<6>");
    assert_eq!(insts[0].arg, None, "6 sits below the argument threshold");
}
