//! Error taxonomy for the encoder.
//!
//! Every condition that depends on caller-supplied data surfaces as an [`AsmError`] variant rather
//! than a panic; `assert!`/`panic!` inside this crate remain reserved for bugs in the crate itself
//! (an internal table lookup that should have been exhaustive, and so on).

use thiserror::Error;

/// Errors the encoder can report while building or finalizing a buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An operand's kind is not among those the opcode accepts.
    #[error("invalid operand kind for this instruction (at offset {offset})")]
    InvalidOperandKind {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// Binary instruction received operands of incompatible widths.
    #[error("operand size mismatch (at offset {offset})")]
    OperandSizeMismatch {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// Memory operand has no explicit size where one is required.
    #[error("memory operand is missing an explicit size (at offset {offset})")]
    MissingOperandSize {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// Immediate does not fit the width the selected encoding requires.
    #[error("immediate value does not fit the required width (at offset {offset})")]
    ImmediateOutOfRange {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// One of AH/CH/DH/BH appears in an instruction that forces REX.
    #[error("high-byte register used where a REX prefix is required (at offset {offset})")]
    HighByteWithRex {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// Scale factor not in {1,2,4,8}.
    #[error("invalid SIB scale factor (at offset {offset})")]
    InvalidScale {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// e.g. RSP used as index, or a label combined with base/index.
    #[error("invalid memory operand shape (at offset {offset})")]
    InvalidMemoryForm {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },

    /// `bind` called on an already-bound label.
    #[error("label was already bound")]
    LabelRebind,

    /// `finalize` found a fixup whose target was never bound.
    #[error("label was never bound")]
    LabelUnbound,

    /// Resolved fixup value does not fit the fixup's width.
    #[error("relocation displacement does not fit its encoding (at offset {offset})")]
    DisplacementOverflow {
        /// Buffer offset of the fixup site.
        offset: usize,
    },

    /// Recognized mnemonic, but no encoder exists for this particular operand combination.
    #[error("no encoder for this operand combination (at offset {offset})")]
    UnsupportedInstruction {
        /// Buffer offset of the instruction that failed to encode.
        offset: usize,
    },
}

/// Convenience alias used throughout the encoder.
pub type AsmResult<T> = Result<T, AsmError>;
