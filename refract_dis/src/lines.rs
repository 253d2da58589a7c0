//! Line-table decoding.
//!
//! The compiler packs offset-to-line information as a flat byte string of
//! (byte delta, line delta) pairs relative to a code object's first line.
//! Decoding recovers the offsets where the source line changes; the scanner
//! anchors its line column on exact offset matches only.

use refract_core::CodeObject;
use rustc_hash::FxHashMap;

/// An offset at which execution enters a new source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreakpoint {
    /// First instruction offset of the line.
    pub offset: u32,
    /// Source line number.
    pub line: u32,
}

/// Decodes a packed line table into its breakpoint sequence.
///
/// Both deltas are unsigned bytes. A pair with a zero byte delta only
/// accumulates its line delta (this is how one statement spans more than
/// 255 source lines); a pair with a zero line delta only extends the
/// current line's byte range. A breakpoint is emitted when a range closes
/// on a line different from the last one emitted, plus one trailing
/// breakpoint for the final range; an empty table therefore still yields
/// `(0, first_line)`. A dangling odd byte at the end is ignored.
#[must_use]
pub fn decode_line_table(first_line: u32, table: &[u8]) -> Vec<LineBreakpoint> {
    let mut breakpoints = Vec::new();
    let mut offset: u32 = 0;
    let mut line = first_line;
    let mut last_emitted: Option<u32> = None;

    for pair in table.chunks_exact(2) {
        let (byte_delta, line_delta) = (pair[0], pair[1]);
        if byte_delta != 0 {
            if last_emitted != Some(line) {
                breakpoints.push(LineBreakpoint { offset, line });
                last_emitted = Some(line);
            }
            offset += u32::from(byte_delta);
        }
        line += u32::from(line_delta);
    }
    if last_emitted != Some(line) {
        breakpoints.push(LineBreakpoint { offset, line });
    }
    breakpoints
}

/// Breakpoints keyed by exact offset, for per-instruction lookup during a
/// scan.
#[must_use]
pub fn line_starts(code: &CodeObject) -> FxHashMap<u32, u32> {
    decode_line_table(code.first_lineno, &code.lnotab)
        .into_iter()
        .map(|bp| (bp.offset, bp.line))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
