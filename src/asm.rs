//! The `Assembler`: a single encoding session owning a [`CodeBuffer`] and a [`LabelManager`] by
//! value, with no back-references between them, plus the generic encode helpers every instruction
//! family in [`crate::insn`] is built on.

use crate::buffer::CodeBuffer;
use crate::error::{AsmError, AsmResult};
use crate::imm::Imm;
use crate::label::{FixupKind, Label, LabelId, LabelManager};
use crate::mem::MemOperand;
use crate::modrm;
use crate::prefix::{self, EvexFields, MandatoryPrefix, OpMap, VecLen};
use crate::reg::Reg;

/// Target address width. Fixed for the lifetime of an [`Assembler`] session; gates which register
/// extensions are reachable (no r8-r15/xmm8-31/REX in a 32-bit-target build, since there is no
/// encoding for them outside long mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    Bits32,
    Bits64,
}

/// Session-wide emission choices, read-only once a session starts: [`Assembler::new`] fixes them
/// once and the session never revisits them.
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions {
    pub bitness: Bitness,
    /// Take the `mov r32, imm32` zero-extension shortcut for a 64-bit destination whenever the
    /// immediate fits unsigned 32 bits (5 bytes instead of 10). Default on.
    pub mov_imm32_shortcut: bool,
    /// Prefer the 8-bit `rel8` branch form when the caller has not bound the target yet. Default
    /// off: the encoder otherwise always takes the safe `rel32` near form for an unbound label,
    /// and only drops to `rel8` when this is explicitly set.
    pub prefer_short_jmp: bool,
}

impl Default for EmitOptions {
    fn default() -> EmitOptions {
        EmitOptions {
            bitness: Bitness::Bits64,
            mov_imm32_shortcut: true,
            prefer_short_jmp: false,
        }
    }
}

/// The byte slice and exported label offsets produced by [`Assembler::finalize`].
pub struct FinalizedCode {
    bytes: Vec<u8>,
    labels: Vec<(LabelId, usize)>,
}

impl FinalizedCode {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Final offset a bound label resolved to, if it was ever bound.
    pub fn label_offset(&self, label: &Label) -> Option<usize> {
        self.labels
            .iter()
            .find(|(id, _)| *id == label.id)
            .map(|(_, off)| *off)
    }
}

/// A single x86/x64 encoding session. Owns the growing byte buffer and the label/fixup manager;
/// `finalize` consumes `self` by value, which statically rules out encoding after finalize instead
/// of needing a runtime flag check.
pub struct Assembler {
    buf: CodeBuffer,
    labels: LabelManager,
    opts: EmitOptions,
}

impl Assembler {
    pub fn new(opts: EmitOptions) -> Assembler {
        Assembler {
            buf: CodeBuffer::new(),
            labels: LabelManager::new(),
            opts,
        }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.opts
    }

    pub fn offset(&self) -> usize {
        self.buf.offset()
    }

    pub fn new_label(&mut self) -> Label {
        Label::new(self.labels.new_label())
    }

    /// Bind `label` to the current offset. Fails with [`AsmError::LabelRebind`] if already bound.
    pub fn bind(&mut self, label: &Label) -> AsmResult<()> {
        self.labels.bind(label.id, self.buf.offset())?;
        label.mark_bound();
        Ok(())
    }

    /// Resolve every pending fixup and hand back the finished byte slice. Consumes the session.
    pub fn finalize(mut self) -> AsmResult<FinalizedCode> {
        self.labels.resolve_all(&mut self.buf)?;
        let labels = self.labels.exported_offsets();
        log::debug!("finalize: {} byte(s) emitted", self.buf.offset());
        Ok(FinalizedCode {
            bytes: self.buf.into_bytes(),
            labels,
        })
    }

    // -- raw byte emission, for fixed-encoding instructions (RET, NOP, CLC, fences, ...) --

    pub(crate) fn raw_u8(&mut self, b: u8) {
        self.buf.emit_u8(b);
    }

    pub(crate) fn raw_bytes(&mut self, bytes: &[u8]) {
        self.buf.emit_bytes(bytes);
    }

    pub(crate) fn raw_imm(&mut self, imm: &Imm, width: u8) {
        self.buf.emit_bytes(&imm.bytes_at(width));
    }

    /// Whether the session's target is 64-bit long mode (gates RIP-relative label encoding and
    /// extended-register legality).
    pub(crate) fn is_long_mode(&self) -> bool {
        matches!(self.opts.bitness, Bitness::Bits64)
    }

    /// Reject r8-r15/xmm8-31/k-high/etc. register extensions outside long mode; there is no
    /// encoding for them in 32-bit mode.
    pub(crate) fn check_ext_allowed<T: Reg>(&self, r: T, offset: usize) -> AsmResult<()> {
        if !self.is_long_mode() && r.is_ext() {
            return Err(AsmError::InvalidOperandKind { offset });
        }
        Ok(())
    }

    pub(crate) fn check_fits(value: i64, width: u8, offset: usize) -> AsmResult<()> {
        if Imm::fits_signed(value, width) {
            Ok(())
        } else {
            Err(AsmError::ImmediateOutOfRange { offset })
        }
    }

    // -- legacy register-register --

    /// `reg_field` occupies ModR/M.reg (REX.R), `rm_field` occupies ModR/M.rm (REX.B).
    pub(crate) fn legacy_rr<T: Reg>(
        &mut self,
        mand: Option<u8>,
        rexw: bool,
        opc: &[u8],
        reg_field: T,
        rm_field: T,
        offset: usize,
    ) -> AsmResult<()> {
        let high = reg_field.is_high_byte() || rm_field.is_high_byte();
        let need_rex =
            rexw || reg_field.is_ext() || rm_field.is_ext() || reg_field.need_rex() || rm_field.need_rex();
        if high && need_rex {
            return Err(AsmError::HighByteWithRex { offset });
        }
        if let Some(p) = mand {
            self.buf.emit_u8(p);
        }
        if need_rex {
            self.buf
                .emit_u8(prefix::rex(rexw, reg_field.idx(), 0, rm_field.idx()));
        }
        self.buf.emit_bytes(opc);
        modrm::encode_reg(&mut self.buf, reg_field.low3(), rm_field.low3());
        Ok(())
    }

    /// Like `legacy_rr` but `reg_field` and `rm_field` are different register widths (`movzx`,
    /// `movsx`, `movsxd`): the destination always occupies ModR/M.reg, the narrower source ModR/M.rm.
    pub(crate) fn legacy_rr_mixed<D: Reg, S: Reg>(
        &mut self,
        mand: Option<u8>,
        rexw: bool,
        opc: &[u8],
        reg_field: D,
        rm_field: S,
        offset: usize,
    ) -> AsmResult<()> {
        let high = reg_field.is_high_byte() || rm_field.is_high_byte();
        let need_rex =
            rexw || reg_field.is_ext() || rm_field.is_ext() || reg_field.need_rex() || rm_field.need_rex();
        if high && need_rex {
            return Err(AsmError::HighByteWithRex { offset });
        }
        if let Some(p) = mand {
            self.buf.emit_u8(p);
        }
        if need_rex {
            self.buf
                .emit_u8(prefix::rex(rexw, reg_field.idx(), 0, rm_field.idx()));
        }
        self.buf.emit_bytes(opc);
        modrm::encode_reg(&mut self.buf, reg_field.low3(), rm_field.low3());
        Ok(())
    }

    /// Like `legacy_rr` but the ModR/M.reg field is a fixed opcode-extension digit rather than a
    /// register (unary arithmetic, shifts, `not`/`neg`, ...).
    pub(crate) fn legacy_r_ext<T: Reg>(
        &mut self,
        mand: Option<u8>,
        rexw: bool,
        opc: &[u8],
        ext: u8,
        rm_field: T,
        offset: usize,
    ) -> AsmResult<()> {
        let high = rm_field.is_high_byte();
        let need_rex = rexw || rm_field.is_ext() || rm_field.need_rex();
        if high && need_rex {
            return Err(AsmError::HighByteWithRex { offset });
        }
        if let Some(p) = mand {
            self.buf.emit_u8(p);
        }
        if need_rex {
            self.buf.emit_u8(prefix::rex(rexw, 0, 0, rm_field.idx()));
        }
        self.buf.emit_bytes(opc);
        modrm::encode_reg(&mut self.buf, ext, rm_field.low3());
        Ok(())
    }

    /// Opcode-plus-register form (`opc+rd`): register index baked into the low 3 bits of the final
    /// opcode byte (`PUSH`/`POP`/`BSWAP`/`MOV r,imm`/accumulator `XCHG`).
    pub(crate) fn legacy_o<T: Reg>(
        &mut self,
        rexw: bool,
        opc: u8,
        reg: T,
        offset: usize,
    ) -> AsmResult<()> {
        let high = reg.is_high_byte();
        let need_rex = rexw || reg.is_ext() || reg.need_rex();
        if high && need_rex {
            return Err(AsmError::HighByteWithRex { offset });
        }
        if need_rex {
            self.buf.emit_u8(prefix::rex(rexw, 0, 0, reg.idx()));
        }
        self.buf.emit_u8(opc + reg.low3());
        Ok(())
    }

    // -- legacy memory forms --

    fn mem_common(
        &mut self,
        mand: Option<u8>,
        rexw: bool,
        opc: &[u8],
        reg_field_idx: u8,
        reg_field_ext: bool,
        reg_high_byte: bool,
        mem: &MemOperand,
        offset: usize,
    ) -> AsmResult<()> {
        mem.validate(offset)?;
        let need_rex = rexw || reg_field_ext || mem.base_is_ext() || mem.index_is_ext();
        if reg_high_byte && need_rex {
            return Err(AsmError::HighByteWithRex { offset });
        }
        if let Some(p) = mand {
            self.buf.emit_u8(p);
        }
        if need_rex {
            let x_idx = if mem.index_is_ext() { 8 } else { 0 };
            let b_idx = if mem.base_is_ext() { 8 } else { 0 };
            self.buf.emit_u8(prefix::rex(rexw, reg_field_idx, x_idx, b_idx));
        }
        self.buf.emit_bytes(opc);
        let rip_relative = self.is_long_mode();
        modrm::encode_mem(&mut self.buf, &mut self.labels, reg_field_idx, mem, rip_relative, offset)
    }

    /// Memory operand with a real register in ModR/M.reg (`mov [mem], reg` / `mov reg, [mem]`).
    pub(crate) fn legacy_mem_reg<T: Reg>(
        &mut self,
        mand: Option<u8>,
        rexw: bool,
        opc: &[u8],
        reg_field: T,
        mem: &MemOperand,
        offset: usize,
    ) -> AsmResult<()> {
        self.mem_common(
            mand,
            rexw,
            opc,
            reg_field.idx(),
            reg_field.is_ext(),
            reg_field.is_high_byte(),
            mem,
            offset,
        )
    }

    /// Memory operand with a fixed opcode-extension digit in ModR/M.reg (`add [mem], imm`, `neg
    /// [mem]`, ...).
    pub(crate) fn legacy_mem_ext(
        &mut self,
        mand: Option<u8>,
        rexw: bool,
        opc: &[u8],
        ext: u8,
        mem: &MemOperand,
        offset: usize,
    ) -> AsmResult<()> {
        self.mem_common(mand, rexw, opc, ext, false, false, mem, offset)
    }

    // -- label / fixup helpers for control flow and RIP-relative data references --

    /// Emit a 4-byte placeholder and record a `rel32` fixup against `label`, measured from the
    /// byte following the placeholder (the start of the next instruction).
    pub(crate) fn fixup_rel32(&mut self, label: &Label) {
        let at = self.buf.offset();
        self.buf.emit_u32_le(0);
        self.labels.add_fixup(label.id, at, FixupKind::Rel32, 0);
    }

    /// Emit a 1-byte placeholder and record a `rel8` fixup. Only ever used when the caller has
    /// explicitly asked for the short form; `finalize` reports `DisplacementOverflow` if the bound
    /// target turns out to be out of `i8` range.
    pub(crate) fn fixup_rel8(&mut self, label: &Label) {
        let at = self.buf.offset();
        self.buf.emit_u8(0);
        self.labels.add_fixup(label.id, at, FixupKind::Rel8, 0);
    }

    /// A RIP-relative (64-bit target) or absolute (32-bit target) memory operand referring to
    /// `label`, for `lea`-style label loads.
    pub(crate) fn label_mem(&self, label: &Label, addend: i32) -> MemOperand {
        MemOperand::label(label.id, addend)
    }

    // -- VEX-encoded (AVX) --

    /// `dest`(ModR/M.reg) `,` `src1`(vvvv) `,` `src2`(ModR/M.rm): the canonical 3-operand
    /// non-destructive AVX shape. `vvvv = 0` (encoded as all-ones) for the 2-operand forms.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn vex_rvm_reg(
        &mut self,
        map: OpMap,
        w: bool,
        len: VecLen,
        pp: MandatoryPrefix,
        opc: u8,
        reg_idx: u8,
        vvvv: u8,
        rm_idx: u8,
    ) {
        let reg_ext = reg_idx >= 8;
        let rm_ext = rm_idx >= 8;
        if !rm_ext && matches!(map, OpMap::M0f) && !w {
            self.buf.emit_bytes(&prefix::vex2(reg_ext, vvvv, len.vex_l_bit(), pp));
        } else {
            self.buf
                .emit_bytes(&prefix::vex3(reg_ext, false, rm_ext, map, w, vvvv, len.vex_l_bit(), pp));
        }
        self.buf.emit_u8(opc);
        modrm::encode_reg(&mut self.buf, reg_idx & 0b111, rm_idx & 0b111);
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn vex_rvm_mem(
        &mut self,
        map: OpMap,
        w: bool,
        len: VecLen,
        pp: MandatoryPrefix,
        opc: u8,
        reg_idx: u8,
        vvvv: u8,
        mem: &MemOperand,
        offset: usize,
    ) -> AsmResult<()> {
        mem.validate(offset)?;
        let reg_ext = reg_idx >= 8;
        let x_ext = mem.index_is_ext();
        let b_ext = mem.base_is_ext();
        if !x_ext && !b_ext && matches!(map, OpMap::M0f) && !w {
            self.buf.emit_bytes(&prefix::vex2(reg_ext, vvvv, len.vex_l_bit(), pp));
        } else {
            self.buf
                .emit_bytes(&prefix::vex3(reg_ext, x_ext, b_ext, map, w, vvvv, len.vex_l_bit(), pp));
        }
        self.buf.emit_u8(opc);
        let rip_relative = self.is_long_mode();
        modrm::encode_mem(&mut self.buf, &mut self.labels, reg_idx & 0b111, mem, rip_relative, offset)
    }

    // -- EVEX-encoded (AVX-512) --

    pub(crate) fn evex_reg(&mut self, fields: EvexFields, opc: u8, reg_idx: u8, rm_idx: u8) {
        self.buf.emit_bytes(&prefix::evex(fields));
        self.buf.emit_u8(opc);
        modrm::encode_reg(&mut self.buf, reg_idx & 0b111, rm_idx & 0b111);
    }

    pub(crate) fn evex_mem(
        &mut self,
        fields: EvexFields,
        opc: u8,
        reg_idx: u8,
        mem: &MemOperand,
        offset: usize,
    ) -> AsmResult<()> {
        mem.validate(offset)?;
        self.buf.emit_bytes(&prefix::evex(fields));
        self.buf.emit_u8(opc);
        let rip_relative = self.is_long_mode();
        modrm::encode_mem(&mut self.buf, &mut self.labels, reg_idx & 0b111, mem, rip_relative, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::Reg64;

    #[test]
    fn mov_rax_rbx() {
        // `mov rax, rbx` -> 48 89 D8
        let mut asm = Assembler::new(EmitOptions::default());
        asm.legacy_rr(None, true, &[0x89], Reg64::rbx, Reg64::rax, 0)
            .unwrap();
        assert_eq!(asm.finalize().unwrap().into_bytes(), vec![0x48, 0x89, 0xd8]);
    }

    #[test]
    fn add_rbp_zero_rax() {
        // `add [rbp+0], rax` -> 48 01 45 00
        let mut asm = Assembler::new(EmitOptions::default());
        let mem = MemOperand::base(Reg64::rbp);
        asm.legacy_mem_reg(None, true, &[0x01], Reg64::rax, &mem, 0)
            .unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x48, 0x01, 0x45, 0x00]
        );
    }

    #[test]
    fn lea_rip_relative_label() {
        // `lea rax, [rip+0x10]` with the label bound 0x10 past the end of this instruction.
        let mut asm = Assembler::new(EmitOptions::default());
        let lbl = asm.new_label();
        let mem = asm.label_mem(&lbl, 0);
        asm.legacy_mem_reg(None, true, &[0x8d], Reg64::rax, &mem, 0)
            .unwrap();
        for _ in 0..0x10 {
            asm.raw_u8(0x90);
        }
        asm.bind(&lbl).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(&code[0..7], &[0x48, 0x8d, 0x05, 0x10, 0x00, 0x00, 0x00]);
    }
}
