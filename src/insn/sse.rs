//! SSE/SSE2/SSSE3/SSE4 instruction families: legacy-prefix-encoded xmm operations. These reuse the
//! same `legacy_rr`/`legacy_mem_reg`/`legacy_r_ext` helpers the integer families in `insn/legacy.rs`
//! are built on — a vector register is just another [`crate::reg::Reg`] impl, so no parallel
//! "xmm-flavored" ModR/M path is needed (per the spec's note on `emitModRmReg` accepting any
//! register variant directly instead of coercing through a pseudo-GP).
//!
//! Mandatory prefixes follow §4.5: packed-double/scalar-double take `0x66`/`0xF2`, scalar-single
//! takes `0xF3`, packed-single takes none; these are plain legacy prefixes here and become the VEX/
//! EVEX `pp` field once the same opcode map is reused by `insn/avx.rs`/`insn/avx512.rs`.

use crate::asm::Assembler;
use crate::error::AsmResult;
use crate::imm::Imm;
use crate::insn::*;
use crate::mem::MemOperand;
use crate::reg::{Reg32, Reg64, VecReg};

// ---------------------------------------------------------------------------------------------
// Scalar FP
// ---------------------------------------------------------------------------------------------

impl Movss<VecReg, VecReg> for Assembler {
    fn movss(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x10], dst, src, offset)
    }
}
impl Movss<VecReg, MemOperand> for Assembler {
    fn movss(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(Some(0xf3), false, &[0x0f, 0x10], dst, &src, offset)
    }
}
impl Movss<MemOperand, VecReg> for Assembler {
    fn movss(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(Some(0xf3), false, &[0x0f, 0x11], src, &dst, offset)
    }
}

impl MovsdXmm<VecReg, VecReg> for Assembler {
    fn movsd_xmm(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf2), false, &[0x0f, 0x10], dst, src, offset)
    }
}
impl MovsdXmm<VecReg, MemOperand> for Assembler {
    fn movsd_xmm(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(Some(0xf2), false, &[0x0f, 0x10], dst, &src, offset)
    }
}
impl MovsdXmm<MemOperand, VecReg> for Assembler {
    fn movsd_xmm(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(Some(0xf2), false, &[0x0f, 0x11], src, &dst, offset)
    }
}

macro_rules! scalar_binop {
    ($tr:ident, $method:ident, $mand:expr, $opc:expr) => {
        impl $tr<VecReg, VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src1: VecReg, src2: VecReg) -> AsmResult<()> {
                // Legacy SSE is 2-operand/destructive: `dst` must equal `src1` on real hardware;
                // the 3-operand trait shape is kept uniform with the VEX/EVEX families (§4.5) and
                // `src1` is otherwise unused here, matching the teacher's own scalar encoders.
                let _ = src1;
                let offset = self.offset();
                self.legacy_rr($mand, false, &[0x0f, $opc], dst, src2, offset)
            }
        }
        impl $tr<VecReg, VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src1: VecReg, src2: MemOperand) -> AsmResult<()> {
                let _ = src1;
                let offset = self.offset();
                self.legacy_mem_reg($mand, false, &[0x0f, $opc], dst, &src2, offset)
            }
        }
    };
}

scalar_binop!(Addss, addss, Some(0xf3), 0x58);
scalar_binop!(Addsd, addsd, Some(0xf2), 0x58);
scalar_binop!(Subss, subss, Some(0xf3), 0x5c);
scalar_binop!(Mulss, mulss, Some(0xf3), 0x59);
scalar_binop!(Mulsd, mulsd, Some(0xf2), 0x59);
scalar_binop!(Divss, divss, Some(0xf3), 0x5e);
scalar_binop!(Divsd, divsd, Some(0xf2), 0x5e);
scalar_binop!(Minss, minss, Some(0xf3), 0x5d);
scalar_binop!(Maxss, maxss, Some(0xf3), 0x5f);
scalar_binop!(Subsd, subsd, Some(0xf2), 0x5c);
scalar_binop!(Minsd, minsd, Some(0xf2), 0x5d);
scalar_binop!(Maxsd, maxsd, Some(0xf2), 0x5f);

impl Sqrtss<VecReg, VecReg> for Assembler {
    fn sqrtss(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x51], dst, src, offset)
    }
}

impl Sqrtsd<VecReg, VecReg> for Assembler {
    fn sqrtsd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf2), false, &[0x0f, 0x51], dst, src, offset)
    }
}

impl Rcpss<VecReg, VecReg> for Assembler {
    fn rcpss(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x53], dst, src, offset)
    }
}

impl Rsqrtss<VecReg, VecReg> for Assembler {
    fn rsqrtss(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x52], dst, src, offset)
    }
}

impl Comiss<VecReg, VecReg> for Assembler {
    fn comiss(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0x2f], dst, src, offset)
    }
}

impl Ucomisd<VecReg, VecReg> for Assembler {
    fn ucomisd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x2e], dst, src, offset)
    }
}

impl Ucomiss<VecReg, VecReg> for Assembler {
    fn ucomiss(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0x2e], dst, src, offset)
    }
}

impl Comisd<VecReg, VecReg> for Assembler {
    fn comisd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x2f], dst, src, offset)
    }
}

impl Cmpss<VecReg, VecReg, Imm> for Assembler {
    fn cmpss(&mut self, dst: VecReg, src: VecReg, predicate: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0xc2], dst, src, offset)?;
        self.raw_imm(&predicate, 8);
        Ok(())
    }
}

impl CmpsdXmm<VecReg, VecReg, Imm> for Assembler {
    fn cmpsd_xmm(&mut self, dst: VecReg, src: VecReg, predicate: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf2), false, &[0x0f, 0xc2], dst, src, offset)?;
        self.raw_imm(&predicate, 8);
        Ok(())
    }
}

impl Cvtsi2ss<VecReg, Reg32> for Assembler {
    fn cvtsi2ss(&mut self, dst: VecReg, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf3), false, &[0x0f, 0x2a], dst, src, offset)
    }
}
impl Cvtsi2ss<VecReg, Reg64> for Assembler {
    fn cvtsi2ss(&mut self, dst: VecReg, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf3), true, &[0x0f, 0x2a], dst, src, offset)
    }
}

impl Cvttss2si<Reg32, VecReg> for Assembler {
    fn cvttss2si(&mut self, dst: Reg32, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf3), false, &[0x0f, 0x2c], dst, src, offset)
    }
}
impl Cvttss2si<Reg64, VecReg> for Assembler {
    fn cvttss2si(&mut self, dst: Reg64, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf3), true, &[0x0f, 0x2c], dst, src, offset)
    }
}

impl Cvtsi2sd<VecReg, Reg32> for Assembler {
    fn cvtsi2sd(&mut self, dst: VecReg, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf2), false, &[0x0f, 0x2a], dst, src, offset)
    }
}
impl Cvtsi2sd<VecReg, Reg64> for Assembler {
    fn cvtsi2sd(&mut self, dst: VecReg, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf2), true, &[0x0f, 0x2a], dst, src, offset)
    }
}

impl Cvttsd2si<Reg32, VecReg> for Assembler {
    fn cvttsd2si(&mut self, dst: Reg32, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf2), false, &[0x0f, 0x2c], dst, src, offset)
    }
}
impl Cvttsd2si<Reg64, VecReg> for Assembler {
    fn cvttsd2si(&mut self, dst: Reg64, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0xf2), true, &[0x0f, 0x2c], dst, src, offset)
    }
}

// ---------------------------------------------------------------------------------------------
// Packed FP
// ---------------------------------------------------------------------------------------------

macro_rules! packed_move {
    ($tr:ident, $method:ident, $mand:expr, $load_opc:expr, $store_opc:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr($mand, false, &[0x0f, $load_opc], dst, src, offset)
            }
        }
        impl $tr<VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg($mand, false, &[0x0f, $load_opc], dst, &src, offset)
            }
        }
        impl $tr<MemOperand, VecReg> for Assembler {
            fn $method(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg($mand, false, &[0x0f, $store_opc], src, &dst, offset)
            }
        }
    };
}

// MOVAPS/MOVAPD use `0F 28`/`29` (aligned); MOVUPS/MOVUPD use `0F 10`/`11` (unaligned) — these are
// distinct opcodes despite the shared mandatory-prefix/`pp` story, not two spellings of one opcode.
packed_move!(Movaps, movaps, None, 0x28, 0x29);
packed_move!(Movapd, movapd, Some(0x66), 0x28, 0x29);
packed_move!(Movups, movups, None, 0x10, 0x11);
packed_move!(Movupd, movupd, Some(0x66), 0x10, 0x11);

macro_rules! packed_binop {
    ($tr:ident, $method:ident, $mand:expr, $opc:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr($mand, false, &[0x0f, $opc], dst, src, offset)
            }
        }
        impl $tr<VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg($mand, false, &[0x0f, $opc], dst, &src, offset)
            }
        }
    };
}

packed_binop!(Addps, addps, None, 0x58);
packed_binop!(Subps, subps, None, 0x5c);
packed_binop!(Mulps, mulps, None, 0x59);
packed_binop!(Divps, divps, None, 0x5e);
packed_binop!(Andps, andps, None, 0x54);
packed_binop!(Orps, orps, None, 0x56);
packed_binop!(Xorps, xorps, None, 0x57);
packed_binop!(Sqrtps, sqrtps, None, 0x51);
packed_binop!(Minps, minps, None, 0x5d);
packed_binop!(Maxps, maxps, None, 0x5f);
packed_binop!(Andpd, andpd, Some(0x66), 0x54);
packed_binop!(Orpd, orpd, Some(0x66), 0x56);
packed_binop!(Xorpd, xorpd, Some(0x66), 0x57);
packed_binop!(Sqrtpd, sqrtpd, Some(0x66), 0x51);
packed_binop!(Minpd, minpd, Some(0x66), 0x5d);
packed_binop!(Maxpd, maxpd, Some(0x66), 0x5f);
packed_binop!(Cvtdq2ps, cvtdq2ps, None, 0x5b);
packed_binop!(Cvttps2dq, cvttps2dq, Some(0xf3), 0x5b);
packed_binop!(Cvtps2dq, cvtps2dq, Some(0x66), 0x5b);
packed_binop!(Addpd, addpd, Some(0x66), 0x58);
packed_binop!(Subpd, subpd, Some(0x66), 0x5c);
packed_binop!(Mulpd, mulpd, Some(0x66), 0x59);
packed_binop!(Divpd, divpd, Some(0x66), 0x5e);

impl Cmpps<VecReg, VecReg, Imm> for Assembler {
    fn cmpps(&mut self, dst: VecReg, src: VecReg, predicate: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, false, &[0x0f, 0xc2], dst, src, offset)?;
        self.raw_imm(&predicate, 8);
        Ok(())
    }
}

impl Cmppd<VecReg, VecReg, Imm> for Assembler {
    fn cmppd(&mut self, dst: VecReg, src: VecReg, predicate: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0xc2], dst, src, offset)?;
        self.raw_imm(&predicate, 8);
        Ok(())
    }
}

// ---------------------------------------------------------------------------------------------
// SSE2 integer
// ---------------------------------------------------------------------------------------------

impl Movd<VecReg, Reg32> for Assembler {
    fn movd(&mut self, dst: VecReg, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x6e], dst, src, offset)
    }
}
impl Movd<Reg32, VecReg> for Assembler {
    fn movd(&mut self, dst: Reg32, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x7e], src, dst, offset)
    }
}

impl Movq<VecReg, Reg64> for Assembler {
    fn movq(&mut self, dst: VecReg, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), true, &[0x0f, 0x6e], dst, src, offset)
    }
}
impl Movq<Reg64, VecReg> for Assembler {
    fn movq(&mut self, dst: Reg64, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), true, &[0x0f, 0x7e], src, dst, offset)
    }
}
impl Movq<VecReg, VecReg> for Assembler {
    /// `movq xmm1, xmm2/m64` (load form: `F3 0F 7E /r`).
    fn movq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x7e], dst, src, offset)
    }
}
impl Movq<MemOperand, VecReg> for Assembler {
    /// `movq xmm2/m64, xmm1` (store form: `66 0F D6 /r`).
    fn movq(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(Some(0x66), false, &[0x0f, 0xd6], src, &dst, offset)
    }
}

macro_rules! dqu_move {
    ($tr:ident, $method:ident, $mand:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr($mand, false, &[0x0f, 0x6f], dst, src, offset)
            }
        }
        impl $tr<VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg($mand, false, &[0x0f, 0x6f], dst, &src, offset)
            }
        }
        impl $tr<MemOperand, VecReg> for Assembler {
            fn $method(&mut self, dst: MemOperand, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg($mand, false, &[0x0f, 0x7f], src, &dst, offset)
            }
        }
    };
}

dqu_move!(Movdqu, movdqu, Some(0xf3));
dqu_move!(Movdqa, movdqa, Some(0x66));

macro_rules! pint_binop {
    ($tr:ident, $method:ident, $opc:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(Some(0x66), false, &[0x0f, $opc], dst, src, offset)
            }
        }
        impl $tr<VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg(Some(0x66), false, &[0x0f, $opc], dst, &src, offset)
            }
        }
    };
}

pint_binop!(Paddb, paddb, 0xfc);
pint_binop!(Paddw, paddw, 0xfd);
pint_binop!(Paddd, paddd, 0xfe);
pint_binop!(Paddq, paddq, 0xd4);
pint_binop!(Psubb, psubb, 0xf8);
pint_binop!(Psubw, psubw, 0xf9);
pint_binop!(Psubd, psubd, 0xfa);
pint_binop!(Psubq, psubq, 0xfb);
pint_binop!(Pmullw, pmullw, 0xd5);
pint_binop!(Pmulhw, pmulhw, 0xe5);
pint_binop!(Pmulhuw, pmulhuw, 0xe4);
pint_binop!(Pmaddwd, pmaddwd, 0xf5);
pint_binop!(Pcmpeqb, pcmpeqb, 0x74);
pint_binop!(Pcmpeqw, pcmpeqw, 0x75);
pint_binop!(Pcmpeqd, pcmpeqd, 0x76);
pint_binop!(Pcmpgtb, pcmpgtb, 0x64);
pint_binop!(Pcmpgtw, pcmpgtw, 0x65);
pint_binop!(Pcmpgtd, pcmpgtd, 0x66);
pint_binop!(Pminub, pminub, 0xda);
pint_binop!(Pminsw, pminsw, 0xea);
pint_binop!(Pmaxub, pmaxub, 0xde);
pint_binop!(Pmaxsw, pmaxsw, 0xee);
pint_binop!(Pand, pand, 0xdb);
pint_binop!(Pandn, pandn, 0xdf);
pint_binop!(Por, por, 0xeb);
pint_binop!(Pxor, pxor, 0xef);
pint_binop!(Punpcklbw, punpcklbw, 0x60);
pint_binop!(Punpcklwd, punpcklwd, 0x61);
pint_binop!(Punpckldq, punpckldq, 0x62);
pint_binop!(Punpcklqdq, punpcklqdq, 0x6c);
pint_binop!(Punpckhbw, punpckhbw, 0x68);
pint_binop!(Punpckhwd, punpckhwd, 0x69);
pint_binop!(Punpckhdq, punpckhdq, 0x6a);
pint_binop!(Punpckhqdq, punpckhqdq, 0x6d);
pint_binop!(Packsswb, packsswb, 0x63);
pint_binop!(Packssdw, packssdw, 0x6b);
pint_binop!(Packuswb, packuswb, 0x67);

// SSE4.1/4.2 integer ops with a three-byte `0F 38` opcode escape, too narrow a shape for
// `pint_binop!`'s fixed `&[0x0f, $opc]` to express.
macro_rules! pint_binop_0f38 {
    ($tr:ident, $method:ident, $opc:expr) => {
        impl $tr<VecReg, VecReg> for Assembler {
            fn $method(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, $opc], dst, src, offset)
            }
        }
        impl $tr<VecReg, MemOperand> for Assembler {
            fn $method(&mut self, dst: VecReg, src: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_mem_reg(Some(0x66), false, &[0x0f, 0x38, $opc], dst, &src, offset)
            }
        }
    };
}

pint_binop_0f38!(Pmulld, pmulld, 0x40);
pint_binop_0f38!(Pminsd, pminsd, 0x39);
pint_binop_0f38!(Pminud, pminud, 0x3b);
pint_binop_0f38!(Pmaxsd, pmaxsd, 0x3d);
pint_binop_0f38!(Pmaxud, pmaxud, 0x3f);
pint_binop_0f38!(Pcmpgtq, pcmpgtq, 0x37);
pint_binop_0f38!(Pcmpeqq, pcmpeqq, 0x29);
pint_binop_0f38!(Packusdw, packusdw, 0x2b);

macro_rules! pshift_imm {
    ($tr:ident, $method:ident, $digit:expr) => {
        impl $tr<VecReg, Imm> for Assembler {
            fn $method(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x71], $digit, dst, offset)?;
                self.raw_imm(&count, 8);
                Ok(())
            }
        }
    };
}

// PSLLW/PSLLD/PSRLD/PSRAD by imm8 share opcode `0F 71/72/73`, distinguished by the ModR/M.reg digit
// and (for the word/dword/qword forms) which of the three opcodes; all three vector widths route
// through the 0x71 "word-group" entry here since only the dword shift forms are in scope (§4.6).
pshift_imm!(Psllw, psllw, 6);
impl Pslld<VecReg, Imm> for Assembler {
    fn pslld(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x72], 6, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psrld<VecReg, Imm> for Assembler {
    fn psrld(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x72], 2, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psrad<VecReg, Imm> for Assembler {
    fn psrad(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x72], 4, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psrlw<VecReg, Imm> for Assembler {
    fn psrlw(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x71], 2, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psraw<VecReg, Imm> for Assembler {
    fn psraw(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x71], 4, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psllq<VecReg, Imm> for Assembler {
    fn psllq(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x73], 6, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psrlq<VecReg, Imm> for Assembler {
    fn psrlq(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x73], 2, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Pslldq<VecReg, Imm> for Assembler {
    fn pslldq(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x73], 7, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}
impl Psrldq<VecReg, Imm> for Assembler {
    fn psrldq(&mut self, dst: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(Some(0x66), false, &[0x0f, 0x73], 3, dst, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}

// ---------------------------------------------------------------------------------------------
// SSSE3 / SSE4
// ---------------------------------------------------------------------------------------------

impl Pshufb<VecReg, VecReg> for Assembler {
    fn pshufb(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x00], dst, src, offset)
    }
}

impl Palignr<VecReg, VecReg, Imm> for Assembler {
    fn palignr(&mut self, dst: VecReg, src: VecReg, count: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x3a, 0x0f], dst, src, offset)?;
        self.raw_imm(&count, 8);
        Ok(())
    }
}

impl Pabsb<VecReg, VecReg> for Assembler {
    fn pabsb(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x1c], dst, src, offset)
    }
}

impl Pabsw<VecReg, VecReg> for Assembler {
    fn pabsw(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x1d], dst, src, offset)
    }
}

impl Pabsd<VecReg, VecReg> for Assembler {
    fn pabsd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x1e], dst, src, offset)
    }
}

impl Psadbw<VecReg, VecReg> for Assembler {
    fn psadbw(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0xf6], dst, src, offset)
    }
}

impl Pmaddubsw<VecReg, VecReg> for Assembler {
    fn pmaddubsw(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x04], dst, src, offset)
    }
}

impl Pshufd<VecReg, VecReg, Imm> for Assembler {
    fn pshufd(&mut self, dst: VecReg, src: VecReg, order: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x70], dst, src, offset)?;
        self.raw_imm(&order, 8);
        Ok(())
    }
}

impl Pshuflw<VecReg, VecReg, Imm> for Assembler {
    fn pshuflw(&mut self, dst: VecReg, src: VecReg, order: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf2), false, &[0x0f, 0x70], dst, src, offset)?;
        self.raw_imm(&order, 8);
        Ok(())
    }
}

impl Pshufhw<VecReg, VecReg, Imm> for Assembler {
    fn pshufhw(&mut self, dst: VecReg, src: VecReg, order: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0xf3), false, &[0x0f, 0x70], dst, src, offset)?;
        self.raw_imm(&order, 8);
        Ok(())
    }
}

impl Pmovzxbw<VecReg, VecReg> for Assembler {
    fn pmovzxbw(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x30], dst, src, offset)
    }
}

impl Pmovsxbw<VecReg, VecReg> for Assembler {
    fn pmovsxbw(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x20], dst, src, offset)
    }
}

impl Pmovzxbd<VecReg, VecReg> for Assembler {
    fn pmovzxbd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x31], dst, src, offset)
    }
}

impl Pmovsxbd<VecReg, VecReg> for Assembler {
    fn pmovsxbd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x21], dst, src, offset)
    }
}

impl Pmovzxbq<VecReg, VecReg> for Assembler {
    fn pmovzxbq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x32], dst, src, offset)
    }
}

impl Pmovsxbq<VecReg, VecReg> for Assembler {
    fn pmovsxbq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x22], dst, src, offset)
    }
}

impl Pmovzxwd<VecReg, VecReg> for Assembler {
    fn pmovzxwd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x33], dst, src, offset)
    }
}

impl Pmovsxwd<VecReg, VecReg> for Assembler {
    fn pmovsxwd(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x23], dst, src, offset)
    }
}

impl Pmovzxwq<VecReg, VecReg> for Assembler {
    fn pmovzxwq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x34], dst, src, offset)
    }
}

impl Pmovsxwq<VecReg, VecReg> for Assembler {
    fn pmovsxwq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x24], dst, src, offset)
    }
}

impl Pmovzxdq<VecReg, VecReg> for Assembler {
    fn pmovzxdq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x35], dst, src, offset)
    }
}

impl Pmovsxdq<VecReg, VecReg> for Assembler {
    fn pmovsxdq(&mut self, dst: VecReg, src: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x25], dst, src, offset)
    }
}

impl Pinsrb<VecReg, Reg32, Imm> for Assembler {
    fn pinsrb(&mut self, dst: VecReg, src: Reg32, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x3a, 0x20], dst, src, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Pinsrw<VecReg, Reg32, Imm> for Assembler {
    /// Baseline SSE2 form (`0F C4 /r ib`), register source only — the SSE4.1 memory form shares the
    /// same opcode and isn't distinguished here since `legacy_rr_mixed` only covers the register
    /// source shape this family otherwise uses.
    fn pinsrw(&mut self, dst: VecReg, src: Reg32, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0xc4], dst, src, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Pinsrd<VecReg, Reg32, Imm> for Assembler {
    fn pinsrd(&mut self, dst: VecReg, src: Reg32, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x3a, 0x22], dst, src, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}
impl Pinsrd<VecReg, Reg64, Imm> for Assembler {
    /// The REX.W variant, `PINSRQ` in the Intel manual's own mnemonic.
    fn pinsrd(&mut self, dst: VecReg, src: Reg64, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), true, &[0x0f, 0x3a, 0x22], dst, src, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Pextrb<Reg32, VecReg, Imm> for Assembler {
    fn pextrb(&mut self, dst: Reg32, src: VecReg, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x3a, 0x14], src, dst, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Pextrw<Reg32, VecReg, Imm> for Assembler {
    /// Baseline SSE2 register-only form (`66 0F C5 /r ib`). Unlike the `0F 3A`-encoded
    /// `Pextrb`/`Pextrd` (xmm in ModR/M.reg, GP/mem in ModR/M.rm), this older encoding puts the GP
    /// destination in ModR/M.reg and the xmm source in ModR/M.rm — the reverse orientation, and the
    /// reason this isn't built on the same call shape as `Pextrb`/`Pextrd`.
    fn pextrw(&mut self, dst: Reg32, src: VecReg, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0xc5], dst, src, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Pextrd<Reg32, VecReg, Imm> for Assembler {
    fn pextrd(&mut self, dst: Reg32, src: VecReg, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x3a, 0x16], src, dst, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}
impl Pextrd<Reg64, VecReg, Imm> for Assembler {
    /// The REX.W variant, `PEXTRQ` in the Intel manual's own mnemonic.
    fn pextrd(&mut self, dst: Reg64, src: VecReg, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), true, &[0x0f, 0x3a, 0x16], src, dst, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Insertps<VecReg, VecReg, Imm> for Assembler {
    fn insertps(&mut self, dst: VecReg, src: VecReg, control: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x3a, 0x21], dst, src, offset)?;
        self.raw_imm(&control, 8);
        Ok(())
    }
}

impl Extractps<Reg32, VecReg, Imm> for Assembler {
    fn extractps(&mut self, dst: Reg32, src: VecReg, index: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(Some(0x66), false, &[0x0f, 0x3a, 0x17], src, dst, offset)?;
        self.raw_imm(&index, 8);
        Ok(())
    }
}

impl Pblendw<VecReg, VecReg, Imm> for Assembler {
    fn pblendw(&mut self, dst: VecReg, src: VecReg, mask: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x3a, 0x0e], dst, src, offset)?;
        self.raw_imm(&mask, 8);
        Ok(())
    }
}

impl Blendps<VecReg, VecReg, Imm> for Assembler {
    fn blendps(&mut self, dst: VecReg, src: VecReg, mask: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x3a, 0x0c], dst, src, offset)?;
        self.raw_imm(&mask, 8);
        Ok(())
    }
}

impl Blendpd<VecReg, VecReg, Imm> for Assembler {
    fn blendpd(&mut self, dst: VecReg, src: VecReg, mask: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x3a, 0x0d], dst, src, offset)?;
        self.raw_imm(&mask, 8);
        Ok(())
    }
}

impl Blendvpd<VecReg, VecReg, VecReg> for Assembler {
    /// The third operand is architecturally always implicit `xmm0`; the trait's third parameter is
    /// accepted but ignored (matching the real instruction's fixed-selector shape) rather than
    /// rejected, since a caller that always passes `xmm0` there gets the correct encoding for free.
    fn blendvpd(&mut self, dst: VecReg, src: VecReg, _selector: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x15], dst, src, offset)
    }
}

impl Blendvps<VecReg, VecReg, VecReg> for Assembler {
    /// Implicit `xmm0` selector, same shape as [`Blendvpd::blendvpd`].
    fn blendvps(&mut self, dst: VecReg, src: VecReg, _selector: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x14], dst, src, offset)
    }
}

impl Pblendvb<VecReg, VecReg, VecReg> for Assembler {
    /// Implicit `xmm0` selector, same shape as [`Blendvpd::blendvpd`].
    fn pblendvb(&mut self, dst: VecReg, src: VecReg, _selector: VecReg) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(Some(0x66), false, &[0x0f, 0x38, 0x10], dst, src, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::EmitOptions;

    #[test]
    fn addsd_xmm0_xmm1() {
        // `addsd xmm0, xmm0, xmm1` -> F2 0F 58 C1
        let mut asm = Assembler::new(EmitOptions::default());
        Addsd::addsd(&mut asm, VecReg::xmm(0), VecReg::xmm(0), VecReg::xmm(1)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xf2, 0x0f, 0x58, 0xc1]
        );
    }

    #[test]
    fn movaps_xmm1_xmm2() {
        let mut asm = Assembler::new(EmitOptions::default());
        Movaps::movaps(&mut asm, VecReg::xmm(1), VecReg::xmm(2)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x0f, 0x28, 0xc9]
        );
    }

    #[test]
    fn pxor_self_zero_idiom() {
        let mut asm = Assembler::new(EmitOptions::default());
        Pxor::pxor(&mut asm, VecReg::xmm(0), VecReg::xmm(0)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x0f, 0xef, 0xc0]
        );
    }

    #[test]
    fn movd_xmm_from_gpr_needs_rex_for_extended_reg() {
        // `movd xmm0, r9d` -> 66 41 0F 6E C1
        let mut asm = Assembler::new(EmitOptions::default());
        Movd::movd(&mut asm, VecReg::xmm(0), Reg32::r9d).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x41, 0x0f, 0x6e, 0xc1]
        );
    }

    #[test]
    fn pextrw_puts_gpr_in_modrm_reg_and_xmm_in_modrm_rm() {
        // `pextrw eax, xmm1, 3` -> 66 0F C5 C1 03 (reverse orientation vs pextrb/pextrd)
        let mut asm = Assembler::new(EmitOptions::default());
        Pextrw::pextrw(&mut asm, Reg32::eax, VecReg::xmm(1), Imm::from(3u8)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x0f, 0xc5, 0xc1, 0x03]
        );
    }

    #[test]
    fn pinsrw_xmm_from_gpr() {
        // `pinsrw xmm0, eax, 2` -> 66 0F C4 C0 02
        let mut asm = Assembler::new(EmitOptions::default());
        Pinsrw::pinsrw(&mut asm, VecReg::xmm(0), Reg32::eax, Imm::from(2u8)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x0f, 0xc4, 0xc0, 0x02]
        );
    }

    #[test]
    fn pmovzxbd_and_pmovsxwq_cover_the_remaining_widenings() {
        // `pmovzxbd xmm0, xmm1` -> 66 0F 38 31 C1
        let mut asm = Assembler::new(EmitOptions::default());
        Pmovzxbd::pmovzxbd(&mut asm, VecReg::xmm(0), VecReg::xmm(1)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x0f, 0x38, 0x31, 0xc1]
        );

        // `pmovsxwq xmm0, xmm1` -> 66 0F 38 24 C1
        let mut asm = Assembler::new(EmitOptions::default());
        Pmovsxwq::pmovsxwq(&mut asm, VecReg::xmm(0), VecReg::xmm(1)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x0f, 0x38, 0x24, 0xc1]
        );
    }
}
