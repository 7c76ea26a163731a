//! AVX (VEX-encoded) instruction family: xmm/ymm operands, non-destructive 3-operand shape.
//!
//! Builds on the same `vex_rvm_reg`/`vex_rvm_mem` helpers `insn/bmi.rs` uses for GPR-only BMI2, just
//! fed vector-register indices. `VecWidth` selects VEX.L the way `insn/bmi.rs`'s `GprWidth` selects
//! VEX.W — both are "read one bit off the operand type" knobs rather than a runtime parameter, so a
//! caller can never accidentally mix an `xmm` destination with an `L256` opcode.

use crate::asm::Assembler;
use crate::error::{AsmError, AsmResult};
use crate::imm::Imm;
use crate::insn::*;
use crate::mem::MemOperand;
use crate::prefix::{MandatoryPrefix, OpMap, VecLen};
use crate::reg::{Reg, Reg32, Reg64, VecReg, VecWidth};

fn vec_len(w: VecWidth) -> VecLen {
    match w {
        VecWidth::Xmm => VecLen::L128,
        VecWidth::Ymm => VecLen::L256,
        VecWidth::Zmm => unreachable!("zmm is only reachable via EVEX, see insn/avx512.rs"),
    }
}

fn reject_high16(asm: &Assembler, r: VecReg, offset: usize) -> AsmResult<()> {
    let _ = asm;
    if r.is_high16() {
        return Err(AsmError::InvalidOperandKind { offset });
    }
    Ok(())
}

macro_rules! vex_binop {
    ($tr:ident, $method:ident, $map:expr, $pp:expr, $opc:expr) => {
        impl $tr<VecReg, VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                reject_high16(self, dst, offset)?;
                reject_high16(self, src1, offset)?;
                reject_high16(self, src2, offset)?;
                self.vex_rvm_reg(
                    $map,
                    false,
                    vec_len(dst.width()),
                    $pp,
                    $opc,
                    dst.idx(),
                    src1.idx(),
                    src2.idx(),
                );
                Ok(())
            }
        }
        impl $tr<VecReg, VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src1: VecReg, src2: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                reject_high16(self, dst, offset)?;
                reject_high16(self, src1, offset)?;
                self.vex_rvm_mem(
                    $map,
                    false,
                    vec_len(dst.width()),
                    $pp,
                    $opc,
                    dst.idx(),
                    src1.idx(),
                    &src2,
                    offset,
                )
            }
        }
    };
}

vex_binop!(Vaddps, vaddps, OpMap::M0f, MandatoryPrefix::None, 0x58);
vex_binop!(Vsubps, vsubps, OpMap::M0f, MandatoryPrefix::None, 0x5c);
vex_binop!(Vmulps, vmulps, OpMap::M0f, MandatoryPrefix::None, 0x59);
vex_binop!(Vdivps, vdivps, OpMap::M0f, MandatoryPrefix::None, 0x5e);
vex_binop!(Vandps, vandps, OpMap::M0f, MandatoryPrefix::None, 0x54);
vex_binop!(Vxorps, vxorps, OpMap::M0f, MandatoryPrefix::None, 0x57);
vex_binop!(Vpxor, vpxor, OpMap::M0f, MandatoryPrefix::P66, 0xef);
vex_binop!(Vpand, vpand, OpMap::M0f, MandatoryPrefix::P66, 0xdb);
vex_binop!(Vpaddd, vpaddd, OpMap::M0f, MandatoryPrefix::P66, 0xfe);

impl Vmovaps<VecReg, VecReg> for Assembler {
    fn vmovaps(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::None,
            0x28,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}
impl Vmovaps<VecReg, MemOperand> for Assembler {
    fn vmovaps(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::None,
            0x28,
            dst.idx(),
            0,
            &src,
            offset,
        )
    }
}
impl Vmovaps<MemOperand, VecReg> for Assembler {
    fn vmovaps(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, src, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f,
            false,
            vec_len(src.width()),
            MandatoryPrefix::None,
            0x29,
            src.idx(),
            0,
            &dst,
            offset,
        )
    }
}

impl Vmovdqu<VecReg, VecReg> for Assembler {
    fn vmovdqu(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::PF3,
            0x6f,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}
impl Vmovdqu<VecReg, MemOperand> for Assembler {
    fn vmovdqu(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::PF3,
            0x6f,
            dst.idx(),
            0,
            &src,
            offset,
        )
    }
}
impl Vmovdqu<MemOperand, VecReg> for Assembler {
    fn vmovdqu(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, src, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f,
            false,
            vec_len(src.width()),
            MandatoryPrefix::PF3,
            0x7f,
            src.idx(),
            0,
            &dst,
            offset,
        )
    }
}

impl Vshufps<VecReg, VecReg, VecReg> for Assembler {
    /// Opcode map `0F` (not `0F3A`) — see `DESIGN.md` for why this differs from `vpshufd`'s map.
    fn vshufps(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::None,
            0xc6,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    /// `vshufps` with the real `imm8` shuffle-control operand the 3-operand
    /// [`Vshufps`] trait has no slot for.
    pub fn vshufps_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        control: Imm,
    ) -> AsmResult<()> {
        Vshufps::vshufps(self, dst, src1, src2)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

impl Vbroadcastss<VecReg, MemOperand> for Assembler {
    fn vbroadcastss(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x18,
            dst.idx(),
            0,
            &src,
            offset,
        )
    }
}

impl Vpbroadcastd<VecReg, VecReg> for Assembler {
    fn vpbroadcastd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x58,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Vpermilps<VecReg, VecReg, VecReg> for Assembler {
    fn vpermilps(&mut self, dst: VecReg, src: VecReg, control: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        reject_high16(self, control, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x0c,
            dst.idx(),
            src.idx(),
            control.idx(),
        );
        Ok(())
    }
}

impl Vperm2i128<VecReg, VecReg, VecReg> for Assembler {
    fn vperm2i128(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x46,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    /// `vperm2i128 dst, src1, src2, imm8` with the lane-select immediate.
    pub fn vperm2i128_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        control: Imm,
    ) -> AsmResult<()> {
        Vperm2i128::vperm2i128(self, dst, src1, src2)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

impl Vinsertf128<VecReg, VecReg, VecReg> for Assembler {
    fn vinsertf128(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x18,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    pub fn vinsertf128_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        control: Imm,
    ) -> AsmResult<()> {
        Vinsertf128::vinsertf128(self, dst, src1, src2)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

impl Vextractf128<VecReg, VecReg, Imm> for Assembler {
    /// Reversed MR-like shape: the wide `ymm` lives in ModR/M.reg, the narrow `xmm` destination in
    /// ModR/M.rm, no `vvvv` source at all.
    fn vextractf128(&mut self, dst: VecReg, src: VecReg, lane: Imm) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x19,
            src.idx(),
            0,
            dst.idx(),
        );
        self.raw_imm(&lane, 8);
        Ok(())
    }
}

impl Vgatherdps<VecReg, VecReg, MemOperand> for Assembler {
    /// `vgatherdps dst{mask}, [vsib]`: DDS shape, `mask` occupies `vvvv` and is consumed (zeroed) by
    /// the real instruction on completion — callers must reload it before reuse.
    fn vgatherdps(&mut self, dst: VecReg, mask: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, mask, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x92,
            dst.idx(),
            mask.idx(),
            &src,
            offset,
        )
    }
}

impl Vzeroupper for Assembler {
    fn vzeroupper(&mut self) -> AsmResult<()> {
        self.raw_bytes(&[0xc5, 0xf8, 0x77]);
        Ok(())
    }
}

impl Vzeroall for Assembler {
    fn vzeroall(&mut self) -> AsmResult<()> {
        self.raw_bytes(&[0xc5, 0xfc, 0x77]);
        Ok(())
    }
}

impl Vfmadd231sd<VecReg, VecReg, VecReg> for Assembler {
    fn vfmadd231sd(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f38,
            true,
            VecLen::L128,
            MandatoryPrefix::P66,
            0xb9,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Vfmadd231ps<VecReg, VecReg, VecReg> for Assembler {
    fn vfmadd231ps(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0xb8,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Vfmadd132sd<VecReg, VecReg, VecReg> for Assembler {
    fn vfmadd132sd(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f38,
            true,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x99,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Vmovd<VecReg, Reg32> for Assembler {
    fn vmovd(&mut self, dst: VecReg, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x6e,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}
impl Vmovd<Reg32, VecReg> for Assembler {
    fn vmovd(&mut self, dst: Reg32, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x7e,
            src.idx(),
            0,
            dst.idx(),
        );
        Ok(())
    }
}

impl Vmovq<VecReg, Reg64> for Assembler {
    fn vmovq(&mut self, dst: VecReg, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            true,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x6e,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}
impl Vmovq<Reg64, VecReg> for Assembler {
    fn vmovq(&mut self, dst: Reg64, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            true,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x7e,
            src.idx(),
            0,
            dst.idx(),
        );
        Ok(())
    }
}
impl Vmovq<VecReg, VecReg> for Assembler {
    /// `vmovq xmm1, xmm2/m64` load form (`VEX.128.F3.0F 7E /r`).
    fn vmovq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::PF3,
            0x7e,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}
impl Vmovq<MemOperand, VecReg> for Assembler {
    /// `vmovq xmm2/m64, xmm1` store form (`VEX.128.66.0F D6 /r`).
    fn vmovq(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, src, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::P66,
            0xd6,
            src.idx(),
            0,
            &dst,
            offset,
        )
    }
}

impl Vpermd<VecReg, VecReg, VecReg> for Assembler {
    /// ymm-only; `src1` (vvvv) holds the data being permuted, `src2` the index vector in ModR/M.rm.
    fn vpermd(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f38,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x36,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Vpermq<VecReg, VecReg, Imm> for Assembler {
    /// ymm-only, 2-operand-plus-`imm8` shape: no `vvvv` source, `vvvv` field is unused (all-ones).
    fn vpermq(&mut self, dst: VecReg, src: VecReg, order: Imm) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            true,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x00,
            dst.idx(),
            0,
            src.idx(),
        );
        self.raw_imm(&order, 8);
        Ok(())
    }
}

impl Vperm2f128<VecReg, VecReg, VecReg> for Assembler {
    fn vperm2f128(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x06,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    /// `vperm2f128 dst, src1, src2, imm8` with the lane-select immediate.
    pub fn vperm2f128_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        control: Imm,
    ) -> AsmResult<()> {
        Vperm2f128::vperm2f128(self, dst, src1, src2)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

impl Vinserti128<VecReg, VecReg, VecReg> for Assembler {
    fn vinserti128(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x38,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    pub fn vinserti128_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        control: Imm,
    ) -> AsmResult<()> {
        Vinserti128::vinserti128(self, dst, src1, src2)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

impl Vextracti128<VecReg, VecReg, Imm> for Assembler {
    /// Reversed MR-like shape, same as [`Vextractf128::vextractf128`].
    fn vextracti128(&mut self, dst: VecReg, src: VecReg, lane: Imm) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f3a,
            false,
            VecLen::L256,
            MandatoryPrefix::P66,
            0x39,
            src.idx(),
            0,
            dst.idx(),
        );
        self.raw_imm(&lane, 8);
        Ok(())
    }
}

impl Vpmaskmovd<VecReg, VecReg, MemOperand> for Assembler {
    /// Masked load: `vpmaskmovd dst, mask, [mem]`.
    fn vpmaskmovd(&mut self, dst: VecReg, mask: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, mask, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x8c,
            dst.idx(),
            mask.idx(),
            &src,
            offset,
        )
    }
}

impl Assembler {
    /// Masked store: `vpmaskmovd [mem], mask, src`. Not expressible through the load-shaped
    /// [`Vpmaskmovd`] trait (destination is memory, not a register), so this is a plain inherent
    /// method, mirroring the split `vgatherdps`/no-scatter-trait story.
    pub fn vpmaskmovd_store(&mut self, dst: MemOperand, mask: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, mask, offset)?;
        reject_high16(self, src, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            false,
            vec_len(src.width()),
            MandatoryPrefix::P66,
            0x8e,
            src.idx(),
            mask.idx(),
            &dst,
            offset,
        )
    }
}

impl Vgatherqps<VecReg, VecReg, MemOperand> for Assembler {
    fn vgatherqps(&mut self, dst: VecReg, mask: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, mask, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x93,
            dst.idx(),
            mask.idx(),
            &src,
            offset,
        )
    }
}

impl Vgatherdpd<VecReg, VecReg, MemOperand> for Assembler {
    fn vgatherdpd(&mut self, dst: VecReg, mask: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, mask, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            true,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x92,
            dst.idx(),
            mask.idx(),
            &src,
            offset,
        )
    }
}

impl Vgatherqpd<VecReg, VecReg, MemOperand> for Assembler {
    fn vgatherqpd(&mut self, dst: VecReg, mask: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, mask, offset)?;
        self.vex_rvm_mem(
            OpMap::M0f38,
            true,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0x93,
            dst.idx(),
            mask.idx(),
            &src,
            offset,
        )
    }
}

impl Vshufpd<VecReg, VecReg, VecReg> for Assembler {
    fn vshufpd(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        reject_high16(self, dst, offset)?;
        reject_high16(self, src1, offset)?;
        reject_high16(self, src2, offset)?;
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            vec_len(dst.width()),
            MandatoryPrefix::P66,
            0xc6,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    /// `vshufpd` with the real `imm8` shuffle-control operand, same split as [`Assembler::vshufps_imm`].
    pub fn vshufpd_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        control: Imm,
    ) -> AsmResult<()> {
        Vshufpd::vshufpd(self, dst, src1, src2)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::EmitOptions;

    #[test]
    fn vxorps_xmm1_xmm1_xmm1() {
        // `vxorps xmm1, xmm1, xmm1` -> C5 F0 57 C9
        let mut asm = Assembler::new(EmitOptions::default());
        Vxorps::vxorps(&mut asm, VecReg::xmm(1), VecReg::xmm(1), VecReg::xmm(1)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xc5, 0xf0, 0x57, 0xc9]
        );
    }

    #[test]
    fn vpaddd_ymm_selects_vex_l_bit() {
        let mut asm = Assembler::new(EmitOptions::default());
        Vpaddd::vpaddd(&mut asm, VecReg::ymm(0), VecReg::ymm(1), VecReg::ymm(2)).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        // VEX2 byte1 has the L bit (bit 2) set for ymm.
        assert_eq!(code[0], 0xc5);
        assert_eq!(code[1] & 0b100, 0b100);
    }

    #[test]
    fn vextractf128_xmm1_ymm0_lane1() {
        let mut asm = Assembler::new(EmitOptions::default());
        Vextractf128::vextractf128(&mut asm, VecReg::xmm(1), VecReg::ymm(0), Imm::from(1i32)).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(*code.last().unwrap(), 1);
    }

    #[test]
    fn vmovd_xmm1_eax() {
        // `vmovd xmm1, eax` -> C5 F9 6E C8
        let mut asm = Assembler::new(EmitOptions::default());
        Vmovd::vmovd(&mut asm, VecReg::xmm(1), Reg32::eax).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xc5, 0xf9, 0x6e, 0xc8]
        );
    }

    #[test]
    fn vmovq_xmm_to_xmm_load_form_uses_f3() {
        let mut asm = Assembler::new(EmitOptions::default());
        Vmovq::vmovq(&mut asm, VecReg::xmm(0), VecReg::xmm(1)).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(code[0], 0xc5);
        assert_eq!(code[1] & 0b11, 0b10); // pp = F3
        assert_eq!(code[2], 0x7e);
    }

    #[test]
    fn vpermq_ymm0_ymm1_imm() {
        // `vpermq ymm0, ymm1, 0x4e` -> C4 E3 FD 00 C1 4E
        let mut asm = Assembler::new(EmitOptions::default());
        Vpermq::vpermq(&mut asm, VecReg::ymm(0), VecReg::ymm(1), Imm::from(0x4eu8)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xc4, 0xe3, 0xfd, 0x00, 0xc1, 0x4e]
        );
    }

    #[test]
    fn vshufpd_differs_from_vshufps_by_mandatory_66() {
        let mut asm = Assembler::new(EmitOptions::default());
        asm.vshufpd_imm(VecReg::xmm(0), VecReg::xmm(1), VecReg::xmm(2), Imm::from(1u8))
            .unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(code[1] & 0b11, 0b01); // pp = 66
        assert_eq!(*code.last().unwrap(), 1);
    }
}
