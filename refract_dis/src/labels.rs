//! Jump-target discovery.
//!
//! A first pass over the stream collects every branch target so the main
//! scan can mark them as it goes. Arguments are read raw here: the source
//! format computes labels without folding extension prefixes, and that
//! behavior is kept.

use refract_core::{OpcodeTable, OperandKind, RefractError, RefractResult};
use rustc_hash::FxHashSet;

/// The distinct branch targets of one instruction stream.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    targets: FxHashSet<u32>,
}

impl LabelSet {
    /// True when `offset` is the target of some branch.
    #[must_use]
    pub fn contains(&self, offset: u32) -> bool {
        self.targets.contains(&offset)
    }

    /// Number of distinct targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the stream has no branches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in ascending offset order, for deterministic output.
    #[must_use]
    pub fn sorted(&self) -> Vec<u32> {
        let mut offsets: Vec<u32> = self.targets.iter().copied().collect();
        offsets.sort_unstable();
        offsets
    }

    fn insert(&mut self, offset: u32) {
        self.targets.insert(offset);
    }
}

/// Collects every branch target in `bytes`.
///
/// Truncated argument bytes are as fatal here as they are for the scanner:
/// a stream that cannot be walked yields no label set.
pub fn find_labels(table: &OpcodeTable, bytes: &[u8]) -> RefractResult<LabelSet> {
    let mut labels = LabelSet::default();
    let mut i: usize = 0;
    while i < bytes.len() {
        let op = bytes[i];
        i += 1;
        if !table.has_argument(op) {
            continue;
        }
        if bytes.len() - i < 2 {
            return Err(RefractError::truncated_argument(
                (i - 1) as u32,
                op,
                2 - (bytes.len() - i),
            ));
        }
        let arg = u32::from(bytes[i]) | (u32::from(bytes[i + 1]) << 8);
        i += 2;
        match table.operand_kind(op) {
            OperandKind::RelJump => labels.insert(i as u32 + arg),
            OperandKind::AbsJump => labels.insert(arg),
            _ => {}
        }
    }
    Ok(labels)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use refract_core::opcodes::classic;

    fn classic_labels(bytes: &[u8]) -> LabelSet {
        find_labels(OpcodeTable::classic(), bytes).unwrap()
    }

    #[test]
    fn test_relative_target_is_offset_after_instruction_plus_arg() {
        // JUMP_FORWARD at 0 ends at 3; 3 + 4 = 7.
        let labels = classic_labels(&[classic::JUMP_FORWARD, 4, 0, classic::POP_TOP]);
        assert!(labels.contains(7));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_absolute_target_is_arg() {
        let labels = classic_labels(&[classic::JUMP_ABSOLUTE, 9, 0]);
        assert!(labels.contains(9));
        assert!(!labels.contains(12));
    }

    #[test]
    fn test_little_endian_argument() {
        // arg = 0x0102 = 258.
        let labels = classic_labels(&[classic::JUMP_ABSOLUTE, 0x02, 0x01]);
        assert!(labels.contains(258));
    }

    #[test]
    fn test_duplicate_targets_collapse() {
        let labels = classic_labels(&[
            classic::JUMP_ABSOLUTE,
            6,
            0,
            classic::JUMP_ABSOLUTE,
            6,
            0,
            classic::POP_TOP,
        ]);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.sorted(), [6]);
    }

    #[test]
    fn test_sorted_is_ascending() {
        let labels = classic_labels(&[
            classic::JUMP_ABSOLUTE,
            30,
            0,
            classic::JUMP_ABSOLUTE,
            6,
            0,
            classic::JUMP_FORWARD,
            1,
            0,
        ]);
        assert_eq!(labels.sorted(), [6, 10, 30]);
    }

    #[test]
    fn test_non_jump_arguments_produce_no_labels() {
        let labels = classic_labels(&[classic::LOAD_CONST, 0, 0, classic::RETURN_VALUE]);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_extension_prefix_is_not_folded_into_targets() {
        // The prefix's high bits do not reach label arithmetic: the target
        // stays the raw 16-bit argument.
        let labels = classic_labels(&[
            classic::EXTENDED_ARG,
            1,
            0,
            classic::JUMP_ABSOLUTE,
            5,
            0,
        ]);
        assert!(labels.contains(5));
        assert!(!labels.contains(65_541));
    }

    #[test]
    fn test_truncated_argument_is_fatal() {
        let err = find_labels(OpcodeTable::classic(), &[classic::JUMP_ABSOLUTE, 9]).unwrap_err();
        assert_eq!(
            err,
            RefractError::TruncatedArgument {
                offset: 0,
                opcode: classic::JUMP_ABSOLUTE,
                missing: 1,
            }
        );
    }
}
