//! Legacy integer instruction families: data movement, arithmetic/logic, shifts, control flow,
//! and the small fixed-encoding instructions (flags, fences, `nop`, string ops).
//!
//! Register-width genericity is expressed the way the teacher's `EncodeRR<T>`/`EncodeR<T>` traits
//! did it — one encode helper parameterized over which legacy operand-size prefix and REX.W apply —
//! except collapsed to a single [`Width`] trait with associated constants, so one blanket `impl<T:
//! Width> Trait<T, T> for Assembler` covers all four GP widths instead of four near-identical impls.

use crate::asm::Assembler;
use crate::error::AsmResult;
use crate::imm::Imm;
use crate::insn::*;
use crate::label::Label;
use crate::mem::MemOperand;
use crate::reg::{Reg, Reg16, Reg32, Reg64, Reg8};

/// Per-GP-width encoding knobs: the legacy operand-size override (16-bit only), and the immediate
/// width the `mov r, imm` opcode-plus-register form and the ALU-group immediate forms use.
pub(crate) trait Width: Reg {
    const LEGACY_PREFIX: Option<u8> = None;
    const MOV_IMM_WIDTH: u8;
    const MOV_OI_OPC: u8 = 0xb8;
    /// Width of the immediate in the ALU-group `0x81 /digit` form; x86 has no true 64-bit ALU
    /// immediate, so 64-bit operands still take a sign-extended imm32 here.
    const ALU_IMM_WIDTH: u8;
    /// Byte size, used to size memory operands that don't otherwise carry one.
    const BYTES: usize;
}

impl Width for Reg8 {
    const MOV_IMM_WIDTH: u8 = 8;
    const MOV_OI_OPC: u8 = 0xb0;
    const ALU_IMM_WIDTH: u8 = 8;
    const BYTES: usize = 1;
}
impl Width for Reg16 {
    const LEGACY_PREFIX: Option<u8> = Some(0x66);
    const MOV_IMM_WIDTH: u8 = 16;
    const ALU_IMM_WIDTH: u8 = 16;
    const BYTES: usize = 2;
}
impl Width for Reg32 {
    const MOV_IMM_WIDTH: u8 = 32;
    const ALU_IMM_WIDTH: u8 = 32;
    const BYTES: usize = 4;
}
impl Width for Reg64 {
    const MOV_IMM_WIDTH: u8 = 64;
    const ALU_IMM_WIDTH: u8 = 32;
    const BYTES: usize = 8;
}

// ---------------------------------------------------------------------------------------------
// MOV
// ---------------------------------------------------------------------------------------------

impl<T: Width> Mov<T, T> for Assembler {
    fn mov(&mut self, dst: T, src: T) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(T::LEGACY_PREFIX, src.rexw(), &[0x89], src, dst, offset)
    }
}

impl<T: Width> Mov<MemOperand, T> for Assembler {
    fn mov(&mut self, dst: MemOperand, src: T) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0x88] } else { &[0x89] };
        self.legacy_mem_reg(T::LEGACY_PREFIX, src.rexw(), opc, src, &dst, offset)
    }
}

impl<T: Width> Mov<T, MemOperand> for Assembler {
    fn mov(&mut self, dst: T, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0x8a] } else { &[0x8b] };
        self.legacy_mem_reg(T::LEGACY_PREFIX, dst.rexw(), opc, dst, &src, offset)
    }
}

impl Mov<Reg64, Imm> for Assembler {
    /// Takes the `mov r32, imm32` zero-extension shortcut (5 bytes) when
    /// [`crate::asm::EmitOptions::mov_imm32_shortcut`] is enabled and the value fits unsigned 32
    /// bits; otherwise emits the full 10-byte `mov r64, imm64` opcode-plus-register form.
    fn mov(&mut self, dst: Reg64, src: Imm) -> AsmResult<()> {
        let offset = self.offset();
        if self.options().mov_imm32_shortcut && Imm::fits_unsigned(src.value(), 32) {
            self.legacy_o(false, 0xb8, dst, offset)?;
            self.raw_imm(&src, 32);
        } else {
            self.legacy_o(true, 0xb8, dst, offset)?;
            self.raw_imm(&src, 64);
        }
        Ok(())
    }
}

impl Mov<Reg32, Imm> for Assembler {
    fn mov(&mut self, dst: Reg32, src: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_o(false, 0xb8, dst, offset)?;
        self.raw_imm(&src, 32);
        Ok(())
    }
}

impl Mov<Reg16, Imm> for Assembler {
    fn mov(&mut self, dst: Reg16, src: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.raw_u8(0x66);
        self.legacy_o(false, 0xb8, dst, offset)?;
        self.raw_imm(&src, 16);
        Ok(())
    }
}

impl Mov<Reg8, Imm> for Assembler {
    fn mov(&mut self, dst: Reg8, src: Imm) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_o(false, 0xb0, dst, offset)?;
        self.raw_imm(&src, 8);
        Ok(())
    }
}

impl Mov<MemOperand, Imm> for Assembler {
    /// `mov [mem], imm`; `mem` must carry an explicit [`MemOperand::with_size`].
    fn mov(&mut self, dst: MemOperand, src: Imm) -> AsmResult<()> {
        let offset = self.offset();
        let size = dst.size().ok_or(crate::error::AsmError::MissingOperandSize { offset })?;
        let (opc, rexw, mand, width): (&[u8], bool, Option<u8>, u8) = match size {
            1 => (&[0xc6], false, None, 8),
            2 => (&[0xc7], false, Some(0x66), 16),
            4 => (&[0xc7], false, None, 32),
            8 => (&[0xc7], true, None, 32),
            _ => return Err(crate::error::AsmError::OperandSizeMismatch { offset }),
        };
        self.legacy_mem_ext(mand, rexw, opc, 0, &dst, offset)?;
        self.raw_imm(&src, width);
        Ok(())
    }
}

impl Movzx<Reg32, Reg8> for Assembler {
    fn movzx(&mut self, dst: Reg32, src: Reg8) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, false, &[0x0f, 0xb6], dst, src, offset)
    }
}

impl Movzx<Reg64, Reg8> for Assembler {
    fn movzx(&mut self, dst: Reg64, src: Reg8) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, true, &[0x0f, 0xb6], dst, src, offset)
    }
}

impl Movzx<Reg32, Reg16> for Assembler {
    fn movzx(&mut self, dst: Reg32, src: Reg16) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, false, &[0x0f, 0xb7], dst, src, offset)
    }
}

impl Movsx<Reg32, Reg8> for Assembler {
    fn movsx(&mut self, dst: Reg32, src: Reg8) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, false, &[0x0f, 0xbe], dst, src, offset)
    }
}

impl Movsx<Reg64, Reg8> for Assembler {
    fn movsx(&mut self, dst: Reg64, src: Reg8) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, true, &[0x0f, 0xbe], dst, src, offset)
    }
}

impl Movsx<Reg64, Reg16> for Assembler {
    fn movsx(&mut self, dst: Reg64, src: Reg16) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, true, &[0x0f, 0xbf], dst, src, offset)
    }
}

impl Movsxd<Reg64, Reg32> for Assembler {
    fn movsxd(&mut self, dst: Reg64, src: Reg32) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr_mixed(None, true, &[0x63], dst, src, offset)
    }
}

impl Lea<Reg64, MemOperand> for Assembler {
    fn lea(&mut self, dst: Reg64, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(None, true, &[0x8d], dst, &src, offset)
    }
}

impl Lea<Reg32, MemOperand> for Assembler {
    fn lea(&mut self, dst: Reg32, src: MemOperand) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_mem_reg(None, false, &[0x8d], dst, &src, offset)
    }
}

/// `lea dst, [label]` convenience, building the RIP-relative operand directly.
impl Assembler {
    pub fn lea_label(&mut self, dst: Reg64, label: &Label, addend: i32) -> AsmResult<()> {
        let mem = self.label_mem(label, addend);
        Lea::lea(self, dst, mem)
    }
}

// ---------------------------------------------------------------------------------------------
// PUSH / POP
// ---------------------------------------------------------------------------------------------

impl Push<Reg64> for Assembler {
    fn push(&mut self, op1: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_o(false, 0x50, op1, offset)
    }
}

impl Push<Reg16> for Assembler {
    fn push(&mut self, op1: Reg16) -> AsmResult<()> {
        let offset = self.offset();
        self.raw_u8(0x66);
        self.legacy_o(false, 0x50, op1, offset)
    }
}

impl Push<Imm> for Assembler {
    fn push(&mut self, op1: Imm) -> AsmResult<()> {
        if Imm::fits_signed(op1.value(), 8) {
            self.raw_u8(0x6a);
            self.raw_imm(&op1, 8);
        } else {
            self.raw_u8(0x68);
            self.raw_imm(&op1, 32);
        }
        Ok(())
    }
}

impl Pop<Reg64> for Assembler {
    fn pop(&mut self, op1: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_o(false, 0x58, op1, offset)
    }
}

impl Pop<Reg16> for Assembler {
    fn pop(&mut self, op1: Reg16) -> AsmResult<()> {
        let offset = self.offset();
        self.raw_u8(0x66);
        self.legacy_o(false, 0x58, op1, offset)
    }
}

// ---------------------------------------------------------------------------------------------
// ALU group: ADD/OR/ADC/SBB/AND/SUB/XOR/CMP share one opcode layout, `base = digit * 8`.
// ---------------------------------------------------------------------------------------------

struct AluOp {
    digit: u8,
}

impl AluOp {
    const fn new(digit: u8) -> AluOp {
        AluOp { digit }
    }

    fn rm_r(&self) -> u8 {
        self.digit * 8 + 1
    }
    fn r_rm(&self) -> u8 {
        self.digit * 8 + 3
    }
}

fn alu_rr<T: Width>(asm: &mut Assembler, op: &AluOp, dst: T, src: T) -> AsmResult<()> {
    let offset = asm.offset();
    asm.legacy_rr(T::LEGACY_PREFIX, src.rexw(), &[op.rm_r()], src, dst, offset)
}

fn alu_mr<T: Width>(asm: &mut Assembler, op: &AluOp, dst: &MemOperand, src: T) -> AsmResult<()> {
    let offset = asm.offset();
    asm.legacy_mem_reg(T::LEGACY_PREFIX, src.rexw(), &[op.rm_r()], src, dst, offset)
}

fn alu_rm<T: Width>(asm: &mut Assembler, op: &AluOp, dst: T, src: &MemOperand) -> AsmResult<()> {
    let offset = asm.offset();
    asm.legacy_mem_reg(T::LEGACY_PREFIX, dst.rexw(), &[op.r_rm()], dst, src, offset)
}

fn alu_ri<T: Width>(asm: &mut Assembler, op: &AluOp, dst: T, src: Imm) -> AsmResult<()> {
    let offset = asm.offset();
    // Accumulator short form (§4.5): `al`/`ax`/`eax`/`rax` get a one-byte opcode with no ModR/M,
    // ahead of the general imm8-sign-extend/imm16-32 forms below.
    if dst.idx() == 0 && !dst.is_high_byte() {
        log::trace!("alu_ri: accumulator short form for digit {}", op.digit);
        if T::BYTES == 1 {
            Assembler::check_fits(src.value(), 8, offset)?;
            asm.raw_u8(op.digit * 8 + 4);
            asm.raw_imm(&src, 8);
        } else {
            Assembler::check_fits(src.value(), T::ALU_IMM_WIDTH, offset)?;
            if let Some(p) = T::LEGACY_PREFIX {
                asm.raw_u8(p);
            }
            if dst.rexw() {
                asm.raw_u8(0x48);
            }
            asm.raw_u8(op.digit * 8 + 5);
            asm.raw_imm(&src, T::ALU_IMM_WIDTH);
        }
        return Ok(());
    }
    if T::BYTES == 1 {
        asm.legacy_r_ext(T::LEGACY_PREFIX, dst.rexw(), &[0x80], op.digit, dst, offset)?;
        asm.raw_imm(&src, 8);
    } else if Imm::fits_signed(src.value(), 8) {
        asm.legacy_r_ext(T::LEGACY_PREFIX, dst.rexw(), &[0x83], op.digit, dst, offset)?;
        asm.raw_imm(&src, 8);
    } else {
        Assembler::check_fits(src.value(), T::ALU_IMM_WIDTH, offset)?;
        asm.legacy_r_ext(T::LEGACY_PREFIX, dst.rexw(), &[0x81], op.digit, dst, offset)?;
        asm.raw_imm(&src, T::ALU_IMM_WIDTH);
    }
    Ok(())
}

fn alu_mi(asm: &mut Assembler, op: &AluOp, dst: &MemOperand, src: Imm) -> AsmResult<()> {
    let offset = asm.offset();
    let size = dst.size().ok_or(crate::error::AsmError::MissingOperandSize { offset })?;
    let mand = if size == 2 { Some(0x66) } else { None };
    let rexw = size == 8;
    if size == 1 {
        asm.legacy_mem_ext(mand, rexw, &[0x80], op.digit, dst, offset)?;
        asm.raw_imm(&src, 8);
    } else if Imm::fits_signed(src.value(), 8) {
        asm.legacy_mem_ext(mand, rexw, &[0x83], op.digit, dst, offset)?;
        asm.raw_imm(&src, 8);
    } else {
        let width = if size == 2 { 16 } else { 32 };
        Assembler::check_fits(src.value(), width, offset)?;
        asm.legacy_mem_ext(mand, rexw, &[0x81], op.digit, dst, offset)?;
        asm.raw_imm(&src, width);
    }
    Ok(())
}

macro_rules! alu_family {
    ($tr:ident, $method:ident, $digit:expr) => {
        impl<T: Width> $tr<T, T> for Assembler {
            fn $method(&mut self, dst: T, src: T) -> AsmResult<()> {
                alu_rr(self, &AluOp::new($digit), dst, src)
            }
        }
        impl<T: Width> $tr<MemOperand, T> for Assembler {
            fn $method(&mut self, dst: MemOperand, src: T) -> AsmResult<()> {
                alu_mr(self, &AluOp::new($digit), &dst, src)
            }
        }
        impl<T: Width> $tr<T, MemOperand> for Assembler {
            fn $method(&mut self, dst: T, src: MemOperand) -> AsmResult<()> {
                alu_rm(self, &AluOp::new($digit), dst, &src)
            }
        }
        impl<T: Width> $tr<T, Imm> for Assembler {
            fn $method(&mut self, dst: T, src: Imm) -> AsmResult<()> {
                alu_ri(self, &AluOp::new($digit), dst, src)
            }
        }
        impl $tr<MemOperand, Imm> for Assembler {
            fn $method(&mut self, dst: MemOperand, src: Imm) -> AsmResult<()> {
                alu_mi(self, &AluOp::new($digit), &dst, src)
            }
        }
    };
}

alu_family!(Add, add, 0);
alu_family!(Or, or, 1);
alu_family!(Adc, adc, 2);
alu_family!(Sbb, sbb, 3);
alu_family!(And, and, 4);
alu_family!(Sub, sub, 5);
alu_family!(Xor, xor, 6);
alu_family!(Cmp, cmp, 7);

// TEST has its own opcode layout (0x84/0x85 rr, 0xf6/0xf7 /0 for the immediate form; no r/m,r
// "reversed" form since the operation is symmetric).
impl<T: Width> Test<T, T> for Assembler {
    fn test(&mut self, dst: T, src: T) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0x84] } else { &[0x85] };
        self.legacy_rr(T::LEGACY_PREFIX, src.rexw(), opc, src, dst, offset)
    }
}

impl<T: Width> Test<T, Imm> for Assembler {
    fn test(&mut self, dst: T, src: Imm) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0xf6] } else { &[0xf7] };
        self.legacy_r_ext(T::LEGACY_PREFIX, dst.rexw(), opc, 0, dst, offset)?;
        self.raw_imm(&src, if T::BYTES == 1 { 8 } else { T::ALU_IMM_WIDTH });
        Ok(())
    }
}

// ---------------------------------------------------------------------------------------------
// Unary group: NEG/NOT share `0xf6`/`0xf7` with NOT=/digit 2, NEG=/digit 3; INC/DEC share
// `0xfe`/`0xff` with INC=/digit 0, DEC=/digit 1.
// ---------------------------------------------------------------------------------------------

macro_rules! unary_family {
    ($tr:ident, $method:ident, $opc8:expr, $opc:expr, $digit:expr) => {
        impl<T: Width> $tr<T> for Assembler {
            fn $method(&mut self, op1: T) -> AsmResult<()> {
                let offset = self.offset();
                let opc: &[u8] = if T::BYTES == 1 { &[$opc8] } else { &[$opc] };
                self.legacy_r_ext(T::LEGACY_PREFIX, op1.rexw(), opc, $digit, op1, offset)
            }
        }
        impl $tr<MemOperand> for Assembler {
            fn $method(&mut self, op1: MemOperand) -> AsmResult<()> {
                let offset = self.offset();
                let size = op1
                    .size()
                    .ok_or(crate::error::AsmError::MissingOperandSize { offset })?;
                let mand = if size == 2 { Some(0x66) } else { None };
                let opc: &[u8] = if size == 1 { &[$opc8] } else { &[$opc] };
                self.legacy_mem_ext(mand, size == 8, opc, $digit, &op1, offset)
            }
        }
    };
}

unary_family!(Not, not, 0xf6, 0xf7, 2);
unary_family!(Neg, neg, 0xf6, 0xf7, 3);
unary_family!(Inc, inc, 0xfe, 0xff, 0);
unary_family!(Dec, dec, 0xfe, 0xff, 1);

impl<T: Width> Mul<T> for Assembler {
    fn mul(&mut self, op1: T) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0xf6] } else { &[0xf7] };
        self.legacy_r_ext(T::LEGACY_PREFIX, op1.rexw(), opc, 4, op1, offset)
    }
}

impl<T: Width> Imul1<T> for Assembler {
    fn imul1(&mut self, op1: T) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0xf6] } else { &[0xf7] };
        self.legacy_r_ext(T::LEGACY_PREFIX, op1.rexw(), opc, 5, op1, offset)
    }
}

impl<T: Width> Div<T> for Assembler {
    fn div(&mut self, op1: T) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0xf6] } else { &[0xf7] };
        self.legacy_r_ext(T::LEGACY_PREFIX, op1.rexw(), opc, 6, op1, offset)
    }
}

impl<T: Width> Idiv<T> for Assembler {
    fn idiv(&mut self, op1: T) -> AsmResult<()> {
        let offset = self.offset();
        let opc: &[u8] = if T::BYTES == 1 { &[0xf6] } else { &[0xf7] };
        self.legacy_r_ext(T::LEGACY_PREFIX, op1.rexw(), opc, 7, op1, offset)
    }
}

impl Imul2<Reg64, Reg64> for Assembler {
    fn imul2(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, true, &[0x0f, 0xaf], dst, src, offset)
    }
}

impl Imul3<Reg64, Reg64, Imm> for Assembler {
    fn imul3(&mut self, dst: Reg64, src: Reg64, imm: Imm) -> AsmResult<()> {
        let offset = self.offset();
        if Imm::fits_signed(imm.value(), 8) {
            self.legacy_rr(None, true, &[0x6b], dst, src, offset)?;
            self.raw_imm(&imm, 8);
        } else {
            Assembler::check_fits(imm.value(), 32, offset)?;
            self.legacy_rr(None, true, &[0x69], dst, src, offset)?;
            self.raw_imm(&imm, 32);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------------------------
// Shifts: SHL/SHR/SAR/ROL/ROR share `0xd1`(by 1, unused here)/`0xd3`(by cl)/`0xc1`(by imm8), distinguished
// by the ModR/M.reg digit.
// ---------------------------------------------------------------------------------------------

macro_rules! shift_family {
    ($tr:ident, $method:ident, $digit:expr) => {
        impl<T: Width> $tr<T, Imm> for Assembler {
            fn $method(&mut self, dst: T, count: Imm) -> AsmResult<()> {
                let offset = self.offset();
                let opc: &[u8] = if T::BYTES == 1 { &[0xc0] } else { &[0xc1] };
                self.legacy_r_ext(T::LEGACY_PREFIX, dst.rexw(), opc, $digit, dst, offset)?;
                self.raw_imm(&count, 8);
                Ok(())
            }
        }
        impl<T: Width> $tr<T, Reg8> for Assembler {
            /// Shift by `cl` (the only register the ISA allows in this slot).
            fn $method(&mut self, dst: T, _cl: Reg8) -> AsmResult<()> {
                let offset = self.offset();
                let opc: &[u8] = if T::BYTES == 1 { &[0xd2] } else { &[0xd3] };
                self.legacy_r_ext(T::LEGACY_PREFIX, dst.rexw(), opc, $digit, dst, offset)
            }
        }
    };
}

shift_family!(Shl, shl, 4);
shift_family!(Shr, shr, 5);
shift_family!(Sar, sar, 7);
shift_family!(Rol, rol, 0);
shift_family!(Ror, ror, 1);

// ---------------------------------------------------------------------------------------------
// XCHG / CMOVcc / SETcc
// ---------------------------------------------------------------------------------------------

impl<T: Width> Xchg<T, T> for Assembler {
    fn xchg(&mut self, dst: T, src: T) -> AsmResult<()> {
        let offset = self.offset();
        // `xchg r, rax/eax/ax` takes the single-byte `0x90+r` form instead of `0x87 /r` (§4.5);
        // byte-sized `xchg` has no such shortcut (the ISA never special-cased `al` here).
        if T::BYTES != 1 {
            let other = if src.idx() == 0 {
                Some(dst)
            } else if dst.idx() == 0 {
                Some(src)
            } else {
                None
            };
            if let Some(other) = other {
                log::trace!("xchg: accumulator short form");
                if let Some(p) = T::LEGACY_PREFIX {
                    self.raw_u8(p);
                }
                return self.legacy_o(other.rexw(), 0x90, other, offset);
            }
        }
        let opc: &[u8] = if T::BYTES == 1 { &[0x86] } else { &[0x87] };
        self.legacy_rr(T::LEGACY_PREFIX, src.rexw(), opc, src, dst, offset)
    }
}

macro_rules! cmov_family {
    ($tr:ident, $method:ident, $cc:expr) => {
        impl $tr<Reg64, Reg64> for Assembler {
            fn $method(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(None, true, &[0x0f, $cc], dst, src, offset)
            }
        }
        impl $tr<Reg32, Reg32> for Assembler {
            fn $method(&mut self, dst: Reg32, src: Reg32) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(None, false, &[0x0f, $cc], dst, src, offset)
            }
        }
    };
}

cmov_family!(Cmovz, cmovz, 0x44);
cmov_family!(Cmovnz, cmovnz, 0x45);
cmov_family!(Cmovl, cmovl, 0x4c);
cmov_family!(Cmovg, cmovg, 0x4f);

macro_rules! setcc_family {
    ($tr:ident, $method:ident, $cc:expr) => {
        impl $tr<Reg8> for Assembler {
            fn $method(&mut self, dst: Reg8) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_r_ext(None, false, &[0x0f, $cc], 0, dst, offset)
            }
        }
    };
}

setcc_family!(Setz, setz, 0x94);
setcc_family!(Setnz, setnz, 0x95);
setcc_family!(Setl, setl, 0x9c);
setcc_family!(Setg, setg, 0x9f);

// ---------------------------------------------------------------------------------------------
// Sign-extend-accumulator family and the zero-operand "fixed encoding" instructions.
// ---------------------------------------------------------------------------------------------

macro_rules! fixed0 {
    ($tr:ident, $method:ident, $($b:expr),+) => {
        impl $tr for Assembler {
            fn $method(&mut self) -> AsmResult<()> {
                self.raw_bytes(&[$($b),+]);
                Ok(())
            }
        }
    };
}

fixed0!(Cqo, cqo, 0x48, 0x99);
fixed0!(Cdq, cdq, 0x99);
fixed0!(Cwd, cwd, 0x66, 0x99);
fixed0!(Cdqe, cdqe, 0x48, 0x98);
fixed0!(Cwde, cwde, 0x98);
fixed0!(Cbw, cbw, 0x66, 0x98);
fixed0!(Ret, ret, 0xc3);
fixed0!(Int3, int3, 0xcc);
fixed0!(Nop, nop, 0x90);
fixed0!(Clc, clc, 0xf8);
fixed0!(Stc, stc, 0xf9);
fixed0!(Cmc, cmc, 0xf5);
fixed0!(Cld, cld, 0xfc);
fixed0!(Std, std, 0xfd);
fixed0!(Mfence, mfence, 0x0f, 0xae, 0xf0);
fixed0!(Sfence, sfence, 0x0f, 0xae, 0xf8);
fixed0!(Lfence, lfence, 0x0f, 0xae, 0xe8);
fixed0!(Pause, pause, 0xf3, 0x90);
fixed0!(RepMovsb, rep_movsb, 0xf3, 0xa4);
fixed0!(RepStosb, rep_stosb, 0xf3, 0xaa);
fixed0!(RepeCmpsb, repe_cmpsb, 0xf3, 0xa6);
fixed0!(RepneScasb, repne_scasb, 0xf2, 0xae);

impl Int<Imm> for Assembler {
    fn int(&mut self, vector: Imm) -> AsmResult<()> {
        self.raw_u8(0xcd);
        self.raw_imm(&vector, 8);
        Ok(())
    }
}

impl NopN<usize> for Assembler {
    /// Emit a single multi-byte `nop` of exactly `len` bytes (1..=9), the canonical padding forms
    /// (`66 0F 1F ...`).
    fn nop_n(&mut self, len: usize) -> AsmResult<()> {
        const FORMS: [&[u8]; 10] = [
            &[],
            &[0x90],
            &[0x66, 0x90],
            &[0x0f, 0x1f, 0x00],
            &[0x0f, 0x1f, 0x40, 0x00],
            &[0x0f, 0x1f, 0x44, 0x00, 0x00],
            &[0x66, 0x0f, 0x1f, 0x44, 0x00, 0x00],
            &[0x0f, 0x1f, 0x80, 0x00, 0x00, 0x00, 0x00],
            &[0x0f, 0x1f, 0x84, 0x00, 0x00, 0x00, 0x00, 0x00],
            &[0x66, 0x0f, 0x1f, 0x84, 0x00, 0x00, 0x00, 0x00, 0x00],
        ];
        if len == 0 {
            return Ok(());
        }
        if len <= 9 {
            self.raw_bytes(FORMS[len]);
        } else {
            // No single encoding covers more than 9 bytes; chain maximal 9-byte forms.
            let mut remaining = len;
            while remaining > 9 {
                self.raw_bytes(FORMS[9]);
                remaining -= 9;
            }
            self.raw_bytes(FORMS[remaining]);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------------------------

impl Call<Reg64> for Assembler {
    fn call(&mut self, op1: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(None, false, &[0xff], 2, op1, offset)
    }
}

impl Call<&Label> for Assembler {
    fn call(&mut self, target: &Label) -> AsmResult<()> {
        self.raw_u8(0xe8);
        self.fixup_rel32(target);
        Ok(())
    }
}

impl Jmp<&Label> for Assembler {
    fn jmp(&mut self, target: &Label) -> AsmResult<()> {
        if self.options().prefer_short_jmp {
            self.raw_u8(0xeb);
            self.fixup_rel8(target);
        } else {
            self.raw_u8(0xe9);
            self.fixup_rel32(target);
        }
        Ok(())
    }
}

impl Jmp<Reg64> for Assembler {
    fn jmp(&mut self, op1: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_r_ext(None, false, &[0xff], 4, op1, offset)
    }
}

macro_rules! jcc_family {
    ($tr:ident, $method:ident, $cc:expr) => {
        impl $tr<&Label> for Assembler {
            fn $method(&mut self, target: &Label) -> AsmResult<()> {
                if self.options().prefer_short_jmp {
                    self.raw_u8(0x70 + $cc);
                    self.fixup_rel8(target);
                } else {
                    self.raw_bytes(&[0x0f, 0x80 + $cc]);
                    self.fixup_rel32(target);
                }
                Ok(())
            }
        }
    };
}

jcc_family!(Jz, jz, 0x4);
jcc_family!(Jnz, jnz, 0x5);
jcc_family!(Jl, jl, 0xc);
jcc_family!(Jge, jge, 0xd);

// ---------------------------------------------------------------------------------------------
// Bit/byte manipulation
// ---------------------------------------------------------------------------------------------

impl Bswap<Reg32> for Assembler {
    fn bswap(&mut self, op1: Reg32) -> AsmResult<()> {
        if op1.need_rex() {
            self.raw_u8(crate::prefix::rex(false, 0, 0, op1.idx()));
        }
        self.raw_bytes(&[0x0f, 0xc8 + op1.low3()]);
        Ok(())
    }
}

impl Bswap<Reg64> for Assembler {
    fn bswap(&mut self, op1: Reg64) -> AsmResult<()> {
        self.raw_u8(crate::prefix::rex(true, 0, 0, op1.idx()));
        self.raw_bytes(&[0x0f, 0xc8 + op1.low3()]);
        Ok(())
    }
}

impl Bsf<Reg64, Reg64> for Assembler {
    fn bsf(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, true, &[0x0f, 0xbc], dst, src, offset)
    }
}

impl Bsr<Reg64, Reg64> for Assembler {
    fn bsr(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.legacy_rr(None, true, &[0x0f, 0xbd], dst, src, offset)
    }
}

macro_rules! bt_family {
    ($tr:ident, $method:ident, $digit:expr, $rr_opc:expr) => {
        impl $tr<Reg64, Imm> for Assembler {
            fn $method(&mut self, dst: Reg64, bit: Imm) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_r_ext(None, true, &[0x0f, 0xba], $digit, dst, offset)?;
                self.raw_imm(&bit, 8);
                Ok(())
            }
        }
        impl $tr<Reg64, Reg64> for Assembler {
            fn $method(&mut self, dst: Reg64, bit: Reg64) -> AsmResult<()> {
                let offset = self.offset();
                self.legacy_rr(None, true, &[0x0f, $rr_opc], bit, dst, offset)
            }
        }
    };
}

bt_family!(Bt, bt, 4, 0xa3);
bt_family!(Bts, bts, 5, 0xab);
bt_family!(Btr, btr, 6, 0xb3);
bt_family!(Btc, btc, 7, 0xbb);

impl Popcnt<Reg64, Reg64> for Assembler {
    fn popcnt(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.raw_u8(0xf3);
        self.legacy_rr(None, true, &[0x0f, 0xb8], dst, src, offset)
    }
}

impl Lzcnt<Reg64, Reg64> for Assembler {
    fn lzcnt(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.raw_u8(0xf3);
        self.legacy_rr(None, true, &[0x0f, 0xbd], dst, src, offset)
    }
}

impl Tzcnt<Reg64, Reg64> for Assembler {
    fn tzcnt(&mut self, dst: Reg64, src: Reg64) -> AsmResult<()> {
        let offset = self.offset();
        self.raw_u8(0xf3);
        self.legacy_rr(None, true, &[0x0f, 0xbc], dst, src, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::EmitOptions;

    #[test]
    fn add_r64_imm8_sign_extends() {
        // `add rcx, 1` -> 48 83 C1 01 (rcx is not the accumulator, so the imm8 form applies)
        let mut asm = Assembler::new(EmitOptions::default());
        Add::add(&mut asm, Reg64::rcx, Imm::from(1i8)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x48, 0x83, 0xc1, 0x01]
        );
    }

    #[test]
    fn add_rax_imm_prefers_accumulator_short_form() {
        // `add rax, 1` -> 48 05 01 00 00 00: §4.5 puts the accumulator form ahead of the
        // imm8-sign-extend form whenever the destination is AX/EAX/RAX, even though it is longer.
        let mut asm = Assembler::new(EmitOptions::default());
        Add::add(&mut asm, Reg64::rax, Imm::from(1i8)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x48, 0x05, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn xchg_eax_ecx_uses_accumulator_short_form() {
        // `xchg ecx, eax` -> 91 (0x90+1), not `87 C8`.
        let mut asm = Assembler::new(EmitOptions::default());
        Xchg::xchg(&mut asm, Reg32::ecx, Reg32::eax).unwrap();
        assert_eq!(asm.finalize().unwrap().into_bytes(), vec![0x91]);
    }

    #[test]
    fn mov_r64_imm32_takes_shortcut() {
        // `mov rax, 1` with the shortcut enabled -> B8 01 00 00 00 (no REX.W)
        let mut asm = Assembler::new(EmitOptions::default());
        Mov::mov(&mut asm, Reg64::rax, Imm::from(1i32)).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0xb8, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn push_pop_rbp() {
        let mut asm = Assembler::new(EmitOptions::default());
        Push::push(&mut asm, Reg64::rbp).unwrap();
        Pop::pop(&mut asm, Reg64::rbp).unwrap();
        assert_eq!(asm.finalize().unwrap().into_bytes(), vec![0x55, 0x5d]);
    }

    #[test]
    fn ret_is_single_byte() {
        let mut asm = Assembler::new(EmitOptions::default());
        Ret::ret(&mut asm).unwrap();
        assert_eq!(asm.finalize().unwrap().into_bytes(), vec![0xc3]);
    }

    #[test]
    fn jmp_forward_label_takes_rel32() {
        let mut asm = Assembler::new(EmitOptions::default());
        let lbl = asm.new_label();
        Jmp::jmp(&mut asm, &lbl).unwrap();
        Ret::ret(&mut asm).unwrap();
        asm.bind(&lbl).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(&code[0..5], &[0xe9, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn cwd_and_cbw_use_the_operand_size_prefix() {
        let mut asm = Assembler::new(EmitOptions::default());
        Cwd::cwd(&mut asm).unwrap();
        Cbw::cbw(&mut asm).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            vec![0x66, 0x99, 0x66, 0x98]
        );
    }
}
