//! BMI1, BMI2 and ADX instruction families.
//!
//! BMI1/BMI2 are VEX-encoded general-purpose-register instructions (no xmm/ymm operands at all) —
//! the same `vex_rvm_reg`/`vex_rvm_mem` helpers the AVX families in `insn/avx.rs` use, just fed GPR
//! indices instead of vector register indices. ADX (`adcx`/`adox`) predates BMI2 and keeps the
//! legacy mandatory-prefix encoding instead, so it is built on `legacy_rr` like `insn/legacy.rs`.

use crate::asm::Assembler;
use crate::error::AsmResult;
use crate::imm::Imm;
use crate::insn::*;
use crate::mem::MemOperand;
use crate::prefix::{MandatoryPrefix, OpMap, VecLen};
use crate::reg::{Reg, Reg32, Reg64};

/// GPR width knobs for the VEX.W bit BMI2 uses to select 32- vs 64-bit operands.
trait GprWidth: Reg {
    const VEX_W: bool;
}
impl GprWidth for Reg32 {
    const VEX_W: bool = false;
}
impl GprWidth for Reg64 {
    const VEX_W: bool = true;
}

impl<T: GprWidth> Andn<T, T, T> for Assembler {
    fn andn(&mut self, dst: T, src1: T, src2: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::None,
            0xf2,
            dst.idx(),
            src1.idx(),
            src2.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Bextr<T, T, T> for Assembler {
    fn bextr(&mut self, dst: T, src: T, control: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::None,
            0xf7,
            dst.idx(),
            control.idx(),
            src.idx(),
        );
        Ok(())
    }
}

/// `BLSI`/`BLSMSK`/`BLSR` are "NDD" VEX forms: the destination lives in `vvvv`, and the ModR/M.reg
/// field carries a fixed opcode-extension digit instead of a register.
fn blsx<T: GprWidth>(asm: &mut Assembler, digit: u8, dst: T, src: T) {
    asm.vex_rvm_reg(
        OpMap::M0f38,
        T::VEX_W,
        VecLen::L128,
        MandatoryPrefix::None,
        0xf3,
        digit,
        dst.idx(),
        src.idx(),
    );
}

impl<T: GprWidth> Blsi<T, T> for Assembler {
    fn blsi(&mut self, dst: T, src: T) -> AsmResult<()> {
        blsx(self, 3, dst, src);
        Ok(())
    }
}

impl<T: GprWidth> Blsmsk<T, T> for Assembler {
    fn blsmsk(&mut self, dst: T, src: T) -> AsmResult<()> {
        blsx(self, 2, dst, src);
        Ok(())
    }
}

impl<T: GprWidth> Blsr<T, T> for Assembler {
    fn blsr(&mut self, dst: T, src: T) -> AsmResult<()> {
        blsx(self, 1, dst, src);
        Ok(())
    }
}

impl<T: GprWidth> Bzhi<T, T, T> for Assembler {
    fn bzhi(&mut self, dst: T, src: T, index: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::None,
            0xf5,
            dst.idx(),
            index.idx(),
            src.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Pdep<T, T, T> for Assembler {
    fn pdep(&mut self, dst: T, src1: T, mask: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::PF2,
            0xf5,
            dst.idx(),
            src1.idx(),
            mask.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Pext<T, T, T> for Assembler {
    fn pext(&mut self, dst: T, src1: T, mask: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::PF3,
            0xf5,
            dst.idx(),
            src1.idx(),
            mask.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Rorx<T, T> for Assembler {
    /// Emits the VEX prefix, opcode and ModR/M only; the real instruction has a third `imm8`
    /// operand the two-parameter [`Rorx`] trait has no slot for — use
    /// [`Assembler::rorx3`] for the full three-operand form.
    fn rorx(&mut self, dst: T, src: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f3a,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::PF2,
            0xf0,
            dst.idx(),
            0,
            src.idx(),
        );
        Ok(())
    }
}

impl Assembler {
    /// `rorx dst, src, imm8` with an explicit rotate count, the real 3-operand shape.
    pub fn rorx3<T: GprWidth>(&mut self, dst: T, src: T, count: Imm) -> AsmResult<()> {
        Rorx::rorx(self, dst, src)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}

impl<T: GprWidth> Sarx<T, T, T> for Assembler {
    fn sarx(&mut self, dst: T, src: T, count: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::PF3,
            0xf7,
            dst.idx(),
            count.idx(),
            src.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Shlx<T, T, T> for Assembler {
    fn shlx(&mut self, dst: T, src: T, count: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::P66,
            0xf7,
            dst.idx(),
            count.idx(),
            src.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Shrx<T, T, T> for Assembler {
    fn shrx(&mut self, dst: T, src: T, count: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::PF2,
            0xf7,
            dst.idx(),
            count.idx(),
            src.idx(),
        );
        Ok(())
    }
}

impl<T: GprWidth> Mulx<T, T, T> for Assembler {
    /// `mulx dst_hi, dst_lo, src`; implicit multiplicand is `rdx`/`edx`.
    fn mulx(&mut self, dst_hi: T, dst_lo: T, src: T) -> AsmResult<()> {
        self.vex_rvm_reg(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::PF2,
            0xf6,
            dst_hi.idx(),
            dst_lo.idx(),
            src.idx(),
        );
        Ok(())
    }
}

impl Adcx<Reg32, Reg32> for Assembler {
    fn adcx(&mut self, dst: Reg32, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0xf6], dst, src, offset)
    }
}

impl Adcx<Reg64, Reg64> for Assembler {
    fn adcx(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), true, &[0x0f, 0x38, 0xf6], dst, src, offset)
    }
}

impl Adox<Reg32, Reg32> for Assembler {
    fn adox(&mut self, dst: Reg32, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x38, 0xf6], dst, src, offset)
    }
}

impl Adox<Reg64, Reg64> for Assembler {
    fn adox(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), true, &[0x0f, 0x38, 0xf6], dst, src, offset)
    }
}

// Memory-operand second source is common (e.g. `andn r, r, [mem]`); expose the most-used one.
impl<T: GprWidth> Andn<T, T, MemOperand> for Assembler {
    fn andn(&mut self, dst: T, src1: T, src2: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        self.vex_rvm_mem(
            OpMap::M0f38,
            T::VEX_W,
            VecLen::L128,
            MandatoryPrefix::None,
            0xf2,
            dst.idx(),
            src1.idx(),
            &src2,
            offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::EmitOptions;

    #[test]
    fn andn_uses_vex3_for_0f38_map() {
        // `andn eax, ecx, edx`: opcode map 0F38 has no 2-byte VEX form, so this is always
        // 3-byte VEX (C4) regardless of whether REX.X/B would be needed.
        let mut asm = Assembler::new(EmitOptions::default());
        Andn::andn(&mut asm, Reg32::eax, Reg32::ecx, Reg32::edx).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(code[0], 0xc4);
        assert_eq!(code[3], 0xf2);
    }

    #[test]
    fn blsr_encodes_ndd_destination_in_vvvv() {
        let mut asm = Assembler::new(EmitOptions::default());
        Blsr::blsr(&mut asm, Reg64::rax, Reg64::rcx).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(code[code.len() - 2], 0xf3);
    }
}
