//! The memory-reference operand: one sum-type member covering every addressing shape an x86
//! instruction can reference, rather than four parallel `Mem8`/`Mem16`/`Mem32`/`Mem64` structs.
//! Size lives as an explicit field instead of in the type, so there is no per-width type to probe
//! at encode time.

use crate::error::{AsmError, AsmResult};
use crate::label::LabelId;
use crate::reg::{Reg, Reg64, VecReg};

/// Index-register kind: a plain GP register, or (for AVX-512/AVX2 gather/scatter) a vector
/// register driving VSIB addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    Gp(Reg64),
    Vsib(VecReg),
}

impl Index {
    pub(crate) fn low3(&self) -> u8 {
        match self {
            Index::Gp(r) => r.low3(),
            Index::Vsib(r) => r.low3(),
        }
    }

    pub(crate) fn idx(&self) -> u8 {
        match self {
            Index::Gp(r) => r.idx(),
            Index::Vsib(r) => r.idx(),
        }
    }

    pub(crate) fn is_ext(&self) -> bool {
        match self {
            Index::Gp(r) => r.is_ext(),
            Index::Vsib(r) => r.is_ext(),
        }
    }

    /// High bit of a VSIB vector index, routed into EVEX.V' when applicable; `None` for a plain GP
    /// index (VEX/legacy SIB has no room for it, and none is needed).
    pub(crate) fn vsib_high_bit(&self) -> Option<bool> {
        match self {
            Index::Vsib(r) => Some(r.idx() & 0b1_0000 != 0),
            Index::Gp(_) => None,
        }
    }
}

impl From<Reg64> for Index {
    fn from(r: Reg64) -> Index {
        Index::Gp(r)
    }
}

impl From<VecReg> for Index {
    fn from(r: VecReg) -> Index {
        Index::Vsib(r)
    }
}

/// A memory reference operand: `[base + index*scale + disp]`, or `[rip + disp]`/`[label]`.
///
/// Base/index and label are mutually exclusive (enforced by [`MemOperand::validate`]): a label
/// reference always resolves to a RIP-relative (64-bit target) or absolute (32-bit target) fixup,
/// never combined with an explicit base or index register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemOperand {
    base: Option<Reg64>,
    index: Option<Index>,
    scale: u8,
    disp: i32,
    label: Option<LabelId>,
    /// Added to the resolved label target for `abs32`/`abs64` fixups; meaningless for `ripRel32`.
    addend: i32,
    size: Option<usize>,
}

impl MemOperand {
    fn raw(base: Option<Reg64>, index: Option<Index>, scale: u8, disp: i32) -> MemOperand {
        MemOperand {
            base,
            index,
            scale,
            disp,
            label: None,
            addend: 0,
            size: None,
        }
    }

    /// `[base]`.
    pub fn base(base: Reg64) -> MemOperand {
        MemOperand::raw(Some(base), None, 1, 0)
    }

    /// `[base + disp]`.
    pub fn base_disp(base: Reg64, disp: i32) -> MemOperand {
        MemOperand::raw(Some(base), None, 1, disp)
    }

    /// `[base + index*scale]`.
    pub fn base_index(base: Reg64, index: Reg64, scale: u8) -> MemOperand {
        MemOperand::raw(Some(base), Some(Index::Gp(index)), scale, 0)
    }

    /// `[base + index*scale + disp]`.
    pub fn base_index_disp(base: Reg64, index: Reg64, scale: u8, disp: i32) -> MemOperand {
        MemOperand::raw(Some(base), Some(Index::Gp(index)), scale, disp)
    }

    /// `[index*scale + disp]`, no base register (absolute-plus-index addressing).
    pub fn index_disp(index: Reg64, scale: u8, disp: i32) -> MemOperand {
        MemOperand::raw(None, Some(Index::Gp(index)), scale, disp)
    }

    /// `[disp32]` absolute, no base or index.
    pub fn disp_only(disp: i32) -> MemOperand {
        MemOperand::raw(None, None, 1, disp)
    }

    /// VSIB addressing used by gather/scatter: `[base? + vector_index*scale + disp]`.
    pub fn vsib(base: Option<Reg64>, index: VecReg, scale: u8, disp: i32) -> MemOperand {
        MemOperand::raw(base, Some(Index::Vsib(index)), scale, disp)
    }

    /// `[rip-relative label]` / `[label]` (absolute in 32-bit-target builds). `addend` is folded
    /// into the resolved address for `abs32`/`abs64` fixups; it is ignored for `ripRel32`.
    pub fn label(label: LabelId, addend: i32) -> MemOperand {
        MemOperand {
            base: None,
            index: None,
            scale: 1,
            disp: 0,
            label: Some(label),
            addend,
            size: None,
        }
    }

    /// Attach an explicit operand size in bytes, required whenever the opcode does not otherwise
    /// fix the size (e.g. `add [mem], imm`).
    pub fn with_size(mut self, size: usize) -> MemOperand {
        self.size = Some(size);
        self
    }

    pub fn base_reg(&self) -> Option<Reg64> {
        self.base
    }

    pub(crate) fn index_reg(&self) -> Option<Index> {
        self.index
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn disp(&self) -> i32 {
        self.disp
    }

    pub(crate) fn label_id(&self) -> Option<LabelId> {
        self.label
    }

    pub(crate) fn addend(&self) -> i32 {
        self.addend
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub(crate) fn base_is_ext(&self) -> bool {
        self.base.map(|b| b.is_ext()).unwrap_or(false)
    }

    pub(crate) fn index_is_ext(&self) -> bool {
        self.index.map(|i| i.is_ext()).unwrap_or(false)
    }

    /// Validate the shape invariants from the data model: scale range, label exclusivity, and
    /// `rsp` never used as an index.
    pub(crate) fn validate(&self, offset: usize) -> AsmResult<()> {
        if !matches!(self.scale, 1 | 2 | 4 | 8) {
            return Err(AsmError::InvalidScale { offset });
        }
        if self.index.is_none() && self.scale != 1 {
            return Err(AsmError::InvalidScale { offset });
        }
        if self.label.is_some() && (self.base.is_some() || self.index.is_some()) {
            return Err(AsmError::InvalidMemoryForm { offset });
        }
        if let Some(Index::Gp(r)) = self.index {
            if matches!(r, Reg64::rsp) {
                return Err(AsmError::InvalidMemoryForm { offset });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rsp_as_index() {
        let mem = MemOperand::base_index(Reg64::rax, Reg64::rsp, 1);
        assert_eq!(
            mem.validate(0),
            Err(AsmError::InvalidMemoryForm { offset: 0 })
        );
    }

    #[test]
    fn rejects_bad_scale() {
        let mem = MemOperand::base_index(Reg64::rax, Reg64::rcx, 3);
        assert_eq!(mem.validate(0), Err(AsmError::InvalidScale { offset: 0 }));
    }

    #[test]
    fn rejects_label_with_base() {
        let mut mem = MemOperand::label(0, 0);
        mem.base = Some(Reg64::rax);
        assert_eq!(
            mem.validate(0),
            Err(AsmError::InvalidMemoryForm { offset: 0 })
        );
    }
}
