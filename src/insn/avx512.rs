//! AVX-512 (EVEX-encoded) instruction family, zmm-only (no masking-aware xmm/ymm EVEX forms — see
//! `DESIGN.md` for the scope cut).
//!
//! `evex_reg`/`evex_mem` in `crate::asm` take a fully-populated [`EvexFields`]; this module's job is
//! just building that struct from a `VecReg`/`MaskReg` operand shape, the same division of labor
//! `insn/bmi.rs` keeps between "which bits" (here) and "how the bits become bytes" (`prefix.rs`).
//! EVEX register-direct (mod=11) operands reach the full 0..31 range by repurposing `X` as a third
//! extension bit for the `rm` register (`EVEX.X` folds into that register's bit 4 when ModR/M.mod is
//! 11, per the SDM's EVEX encoding notes) rather than the VSIB index-extension role it has in memory
//! forms.

use crate::asm::Assembler;
use crate::error::AsmResult;
use crate::imm::Imm;
use crate::insn::*;
use crate::mem::MemOperand;
use crate::prefix::{EvexFields, MandatoryPrefix, OpMap, VecLen};
use crate::reg::{MaskReg, Reg, Reg32, Reg64, VecReg};

/// Build the common EVEX field set for a register-direct 3-operand zmm instruction.
#[allow(clippy::too_many_arguments)]
fn fields_reg(
    map: OpMap,
    w: bool,
    pp: MandatoryPrefix,
    reg: VecReg,
    vvvv_reg: Option<VecReg>,
    rm: VecReg,
    mask: MaskReg,
    zeroing: bool,
) -> EvexFields {
    EvexFields {
        r_ext: reg.idx() & 0b1000 != 0,
        x_ext: rm.idx() & 0b1_0000 != 0,
        b_ext: rm.idx() & 0b1000 != 0,
        r_prime: reg.idx() & 0b1_0000 != 0,
        map,
        w,
        vvvv: vvvv_reg.map(|r| r.idx() & 0b1111).unwrap_or(0),
        pp,
        zeroing,
        len: VecLen::L512,
        broadcast_or_round: false,
        v_prime: vvvv_reg.map(|r| r.idx() & 0b1_0000 != 0).unwrap_or(false),
        aaa: mask.idx(),
    }
}

fn fields_mem(
    map: OpMap,
    w: bool,
    pp: MandatoryPrefix,
    reg: VecReg,
    vvvv_reg: Option<VecReg>,
    mem: &MemOperand,
    mask: MaskReg,
    zeroing: bool,
) -> EvexFields {
    EvexFields {
        r_ext: reg.idx() & 0b1000 != 0,
        x_ext: mem.index_is_ext(),
        b_ext: mem.base_is_ext(),
        r_prime: reg.idx() & 0b1_0000 != 0,
        map,
        w,
        vvvv: vvvv_reg.map(|r| r.idx() & 0b1111).unwrap_or(0),
        pp,
        zeroing,
        len: VecLen::L512,
        broadcast_or_round: false,
        v_prime: vvvv_reg.map(|r| r.idx() & 0b1_0000 != 0).unwrap_or(false),
        aaa: mask.idx(),
    }
}

macro_rules! evex_binop_z {
    ($tr:ident, $method:ident, $masked_method:ident, $map:expr, $w:expr, $pp:expr, $opc:expr) => {
        impl $tr<VecReg, VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
                let f = fields_reg($map, $w, $pp, dst, Some(src1), src2, MaskReg::none(), false);
                self.evex_reg(f, $opc, dst.idx(), src2.idx());
                Ok(())
            }
        }
        impl $tr<VecReg, VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src1: VecReg, src2: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                let f = fields_mem($map, $w, $pp, dst, Some(src1), &src2, MaskReg::none(), false);
                self.evex_mem(f, $opc, dst.idx(), &src2, offset)
            }
        }
        impl Assembler {
            /// Masked / zeroing-masked form: `{$method} dst{k}{z}, src1, src2`. Plain inherent
            /// method since the unmasked trait above has no slot for `mask`/`zeroing`.
            pub fn $masked_method(
                &mut self,
                dst: VecReg,
                src1: VecReg,
                src2: VecReg,
                mask: MaskReg,
                zeroing: bool,
            ) -> AsmResult<()> {
                let f = fields_reg($map, $w, $pp, dst, Some(src1), src2, mask, zeroing);
                self.evex_reg(f, $opc, dst.idx(), src2.idx());
                Ok(())
            }
        }
    };
}

evex_binop_z!(VaddpsZ, vaddps_z, vaddps_z_masked, OpMap::M0f, false, MandatoryPrefix::None, 0x58);
evex_binop_z!(VpadddZ, vpaddd_z, vpaddd_z_masked, OpMap::M0f, false, MandatoryPrefix::P66, 0xfe);
evex_binop_z!(VpxordZ, vpxord_z, vpxord_z_masked, OpMap::M0f, false, MandatoryPrefix::P66, 0xef);
evex_binop_z!(VxorpsZ, vxorps_z, vxorps_z_masked, OpMap::M0f, false, MandatoryPrefix::None, 0x57);
evex_binop_z!(VaddpdZ, vaddpd_z, vaddpd_z_masked, OpMap::M0f, true, MandatoryPrefix::P66, 0x58);
evex_binop_z!(VxorpdZ, vxorpd_z, vxorpd_z_masked, OpMap::M0f, true, MandatoryPrefix::P66, 0x57);
evex_binop_z!(VpanddZ, vpandd_z, vpandd_z_masked, OpMap::M0f, false, MandatoryPrefix::P66, 0xdb);
evex_binop_z!(VpandqZ, vpandq_z, vpandq_z_masked, OpMap::M0f, true, MandatoryPrefix::P66, 0xdb);
evex_binop_z!(VpordZ, vpord_z, vpord_z_masked, OpMap::M0f, false, MandatoryPrefix::P66, 0xeb);
evex_binop_z!(VporqZ, vporq_z, vporq_z_masked, OpMap::M0f, true, MandatoryPrefix::P66, 0xeb);
evex_binop_z!(VpxorqZ, vpxorq_z, vpxorq_z_masked, OpMap::M0f, true, MandatoryPrefix::P66, 0xef);

impl VmovupsZ<VecReg, VecReg> for Assembler {
    fn vmovups_z(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f, false, MandatoryPrefix::None, dst, None, src, MaskReg::none(), false);
        self.evex_reg(f, 0x10, dst.idx(), src.idx());
        Ok(())
    }
}
impl VmovupsZ<VecReg, MemOperand> for Assembler {
    fn vmovups_z(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        let f = fields_mem(OpMap::M0f, false, MandatoryPrefix::None, dst, None, &src, MaskReg::none(), false);
        self.evex_mem(f, 0x10, dst.idx(), &src, offset)
    }
}
impl VmovupsZ<MemOperand, VecReg> for Assembler {
    fn vmovups_z(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        let f = fields_mem(OpMap::M0f, false, MandatoryPrefix::None, src, None, &dst, MaskReg::none(), false);
        self.evex_mem(f, 0x11, src.idx(), &dst, offset)
    }
}

impl Vmovdqu32Z<VecReg, VecReg> for Assembler {
    fn vmovdqu32_z(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f, false, MandatoryPrefix::PF3, dst, None, src, MaskReg::none(), false);
        self.evex_reg(f, 0x6f, dst.idx(), src.idx());
        Ok(())
    }
}
impl Vmovdqu32Z<VecReg, MemOperand> for Assembler {
    fn vmovdqu32_z(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        let f = fields_mem(OpMap::M0f, false, MandatoryPrefix::PF3, dst, None, &src, MaskReg::none(), false);
        self.evex_mem(f, 0x6f, dst.idx(), &src, offset)
    }
}
impl Vmovdqu32Z<MemOperand, VecReg> for Assembler {
    fn vmovdqu32_z(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        let f = fields_mem(OpMap::M0f, false, MandatoryPrefix::PF3, src, None, &dst, MaskReg::none(), false);
        self.evex_mem(f, 0x7f, src.idx(), &dst, offset)
    }
}

impl Vpternlogd<VecReg, VecReg, VecReg> for Assembler {
    /// Emits the EVEX prefix, opcode and ModR/M only; the real instruction has a fourth `imm8`
    /// truth-table operand — use [`Assembler::vpternlogd_imm`] for the full four-operand form,
    /// mirroring the `rorx`/`rorx3` split in `insn/bmi.rs`.
    fn vpternlogd(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f3a, false, MandatoryPrefix::P66, dst, Some(src1), src2, MaskReg::none(), false);
        self.evex_reg(f, 0x25, dst.idx(), src2.idx());
        Ok(())
    }
}

impl Assembler {
    /// `vpternlogd dst, src1, src2, imm8` with the real truth-table immediate.
    pub fn vpternlogd_imm(
        &mut self,
        dst: VecReg,
        src1: VecReg,
        src2: VecReg,
        table: Imm,
    ) -> AsmResult<()> {
        Vpternlogd::vpternlogd(self, dst, src1, src2)?;
        self.raw_imm(&table, 8);
        Ok(())
    }
}

impl Vcvttps2dqZ<VecReg, VecReg> for Assembler {
    fn vcvttps2dq_z(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f, false, MandatoryPrefix::PF3, dst, None, src, MaskReg::none(), false);
        self.evex_reg(f, 0x5b, dst.idx(), src.idx());
        Ok(())
    }
}

impl Vcvtdq2psZ<VecReg, VecReg> for Assembler {
    fn vcvtdq2ps_z(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f, false, MandatoryPrefix::None, dst, None, src, MaskReg::none(), false);
        self.evex_reg(f, 0x5b, dst.idx(), src.idx());
        Ok(())
    }
}

impl Vcvtps2pdZ<VecReg, VecReg> for Assembler {
    /// Source is a ymm (256-bit, single-precision), destination a zmm (512-bit, double-precision);
    /// `fields_reg` always picks `VecLen::L512`, which is correct here since `len` governs the
    /// destination/memory operand width, not the (implicitly half-width) source.
    fn vcvtps2pd_z(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f, false, MandatoryPrefix::None, dst, None, src, MaskReg::none(), false);
        self.evex_reg(f, 0x5a, dst.idx(), src.idx());
        Ok(())
    }
}

impl Vcvtpd2psZ<VecReg, VecReg> for Assembler {
    /// Source is a zmm (512-bit, double-precision), destination a ymm (256-bit, single-precision).
    fn vcvtpd2ps_z(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let f = fields_reg(OpMap::M0f, true, MandatoryPrefix::P66, dst, None, src, MaskReg::none(), false);
        self.evex_reg(f, 0x5a, dst.idx(), src.idx());
        Ok(())
    }
}

// -- KMOV: predates EVEX, encoded via plain VEX2/VEX3 with an unused (all-ones) vvvv. --

impl Kmovw<MaskReg, Reg32> for Assembler {
    fn kmovw(&mut self, dst: MaskReg, src: Reg32) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::None,
            0x92,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Kmovw<Reg32, MaskReg> for Assembler {
    fn kmovw(&mut self, dst: Reg32, src: MaskReg) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::None,
            0x93,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl KmovwKk<MaskReg, MaskReg> for Assembler {
    fn kmovw_kk(&mut self, dst: MaskReg, src: MaskReg) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::None,
            0x90,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Kmovd<MaskReg, Reg32> for Assembler {
    fn kmovd(&mut self, dst: MaskReg, src: Reg32) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x92,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Kmovd<Reg32, MaskReg> for Assembler {
    fn kmovd(&mut self, dst: Reg32, src: MaskReg) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            false,
            VecLen::L128,
            MandatoryPrefix::P66,
            0x93,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Kmovq<MaskReg, Reg64> for Assembler {
    fn kmovq(&mut self, dst: MaskReg, src: Reg64) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            true,
            VecLen::L128,
            MandatoryPrefix::PF2,
            0x92,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Kmovq<Reg64, MaskReg> for Assembler {
    fn kmovq(&mut self, dst: Reg64, src: MaskReg) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f,
            true,
            VecLen::L128,
            MandatoryPrefix::PF2,
            0x93,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::EmitOptions;

    #[test]
    fn vaddps_zmm1_zmm2_zmm3() {
        // `vaddps zmm1, zmm2, zmm3` -> 62 F1 6C 48 58 CB
        let mut asm = Assembler::new(EmitOptions::default());
        VaddpsZ::vaddps_z(&mut asm, VecReg::zmm(1), VecReg::zmm(2), VecReg::zmm(3)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x62, 0xf1, 0x6c, 0x48, 0x58, 0xcb]
        );
    }

    #[test]
    fn vpternlogd_appends_real_imm8() {
        let mut asm = Assembler::new(EmitOptions::default());
        asm.vpternlogd_imm(
            VecReg::zmm(0),
            VecReg::zmm(1),
            VecReg::zmm(2),
            Imm::from(0xeau8),
        )
        .unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(*code.last().unwrap(), 0xea);
    }

    #[test]
    fn kmovw_k_from_gpr_uses_vex2() {
        let mut asm = Assembler::new(EmitOptions::default());
        Kmovw::kmovw(&mut asm, MaskReg::k(1), Reg32::eax).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(code[0], 0xc5);
        assert_eq!(code[2], 0x92);
    }

    #[test]
    fn vaddpd_zmm1_zmm2_zmm3() {
        // `vaddpd zmm1, zmm2, zmm3` -> 62 F1 ED 48 58 CB
        let mut asm = Assembler::new(EmitOptions::default());
        VaddpdZ::vaddpd_z(&mut asm, VecReg::zmm(1), VecReg::zmm(2), VecReg::zmm(3)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x62, 0xf1, 0xed, 0x48, 0x58, 0xcb]
        );
    }

    #[test]
    fn vaddps_z_masked_sets_aaa_and_zeroing_bits() {
        let mut asm = Assembler::new(EmitOptions::default());
        asm.vaddps_z_masked(
            VecReg::zmm(1),
            VecReg::zmm(2),
            VecReg::zmm(3),
            MaskReg::k(3),
            true,
        )
        .unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        // P2 byte: zeroing(bit7) | L'L | b | V' | aaa
        assert_eq!(code[3] & 0x80, 0x80);
        assert_eq!(code[3] & 0b111, 3);
    }

    #[test]
    fn kmovd_k_from_gpr_uses_66_prefix() {
        // `kmovd k1, eax` -> C5 F9 92 C8
        let mut asm = Assembler::new(EmitOptions::default());
        Kmovd::kmovd(&mut asm, MaskReg::k(1), Reg32::eax).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xc5, 0xf9, 0x92, 0xc8]
        );
    }

    #[test]
    fn kmovq_k_from_gpr_uses_vex3_with_rexw() {
        // `kmovq k1, rax` -> C4 E1 FB 92 C8
        let mut asm = Assembler::new(EmitOptions::default());
        Kmovq::kmovq(&mut asm, MaskReg::k(1), Reg64::rax).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xc4, 0xe1, 0xfb, 0x92, 0xc8]
        );
    }
}
