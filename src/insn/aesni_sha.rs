//! AES-NI and SHA instruction families: legacy-prefix `66 0F 38` map instructions over xmm
//! registers, same shape as the SSSE3/SSE4 entries in `insn/sse.rs`.

use crate::asm::Assembler;
use crate::error::AsmResult;
use crate::imm::Imm;
use crate::insn::*;
use crate::reg::VecReg;

macro_rules! aes_binop {
    ($tr:ident, $method:ident, $opc:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, $opc], dst, src, offset)
            }
        }
    };
}

aes_binop!(Aesenc, aesenc, 0xdc);
aes_binop!(Aesenclast, aesenclast, 0xdd);
aes_binop!(Aesdec, aesdec, 0xde);
aes_binop!(Aesdeclast, aesdeclast, 0xdf);
aes_binop!(Aesimc, aesimc, 0xdb);

impl Aeskeygenassist<VecReg, VecReg, Imm> for Assembler {
    fn aeskeygenassist(&mut self, dst: VecReg, src: VecReg, round_const: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x3a, 0xdf], dst, src, offset)?;
        self.raw_imm(&round_const, 8);
        Ok(())
    }
}

impl Sha1rnds4<VecReg, VecReg, Imm> for Assembler {
    fn sha1rnds4(&mut self, dst: VecReg, src: VecReg, func: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0x3a, 0xcc], dst, src, offset)?;
        self.raw_imm(&func, 8);
        Ok(())
    }
}

// SHA1NEXTE/MSG1/MSG2 share AES-NI's `0F 38` map but take no mandatory prefix at all (`NP`),
// unlike the AES-NI instructions above which all require `66`.
macro_rules! sha_binop {
    ($tr:ident, $method:ident, $opc:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(None, false, &[0x0f, 0x38, $opc], dst, src, offset)
            }
        }
    };
}

sha_binop!(Sha1nexte, sha1nexte, 0xc8);
sha_binop!(Sha1msg1, sha1msg1, 0xc9);
sha_binop!(Sha1msg2, sha1msg2, 0xca);

impl Sha256rnds2<VecReg, VecReg> for Assembler {
    /// Implicit `xmm0` round-constant operand, like `blendvpd` in `insn/sse.rs`.
    fn sha256rnds2(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0x38, 0xcb], dst, src, offset)
    }
}

impl Sha256msg1<VecReg, VecReg> for Assembler {
    fn sha256msg1(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0x38, 0xcc], dst, src, offset)
    }
}

impl Sha256msg2<VecReg, VecReg> for Assembler {
    fn sha256msg2(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0x38, 0xcd], dst, src, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::EmitOptions;

    #[test]
    fn aesenc_xmm0_xmm1() {
        // `aesenc xmm0, xmm1` -> 66 0F 38 DC C1
        let mut asm = Assembler::new(EmitOptions::default());
        Aesenc::aesenc(&mut asm, VecReg::xmm(0), VecReg::xmm(1)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x0f, 0x38, 0xdc, 0xc1]
        );
    }

    #[test]
    fn aeskeygenassist_appends_round_const() {
        let mut asm = Assembler::new(EmitOptions::default());
        Aeskeygenassist::aeskeygenassist(&mut asm, VecReg::xmm(0), VecReg::xmm(1), Imm::from(1u8))
            .unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(*code.last().unwrap(), 1);
    }
}
