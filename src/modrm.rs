//! The ModR/M and SIB emitter. Given a 3-bit `reg` field (either a real register's low 3 bits or
//! an opcode-extension digit) and a register-or-memory operand, produces the ModR/M byte and, for
//! memory, the SIB byte and displacement that follow.

use crate::buffer::CodeBuffer;
use crate::error::{AsmError, AsmResult};
use crate::label::{FixupKind, LabelManager};
use crate::mem::{Index, MemOperand};

pub(crate) const fn modrm_byte(mode: u8, reg: u8, rm: u8) -> u8 {
    ((mode & 0b11) << 6) | ((reg & 0b111) << 3) | (rm & 0b111)
}

pub(crate) const fn sib_byte(scale: u8, index: u8, base: u8) -> u8 {
    ((scale & 0b11) << 6) | ((index & 0b111) << 3) | (base & 0b111)
}

fn scale_bits(scale: u8, offset: usize) -> AsmResult<u8> {
    match scale {
        1 => Ok(0b00),
        2 => Ok(0b01),
        4 => Ok(0b10),
        8 => Ok(0b11),
        _ => Err(AsmError::InvalidScale { offset }),
    }
}

/// Emit ModR/M for a register destination/source pair: `mod=11`, `reg`/`rm` both plain register
/// fields.
pub(crate) fn encode_reg(buf: &mut CodeBuffer, reg: u8, rm: u8) {
    buf.emit_u8(modrm_byte(0b11, reg, rm));
}

/// Emit ModR/M (+ SIB + displacement, + a label fixup if applicable) for a memory operand,
/// including the RBP/R13-zero-displacement and RSP/R12-always-SIB special cases.
pub(crate) fn encode_mem(
    buf: &mut CodeBuffer,
    labels: &mut LabelManager,
    reg: u8,
    mem: &MemOperand,
    rip_relative: bool,
    offset: usize,
) -> AsmResult<()> {
    mem.validate(offset)?;

    match (mem.base_reg(), mem.index_reg(), mem.label_id()) {
        // Case 1: label-only.
        (None, None, Some(label)) => {
            buf.emit_u8(modrm_byte(0b00, reg, 0b101));
            let at = buf.offset();
            buf.emit_u32_le(0);
            let kind = if rip_relative {
                FixupKind::RipRel32
            } else {
                FixupKind::Abs32
            };
            labels.add_fixup(label, at, kind, mem.addend() as i64);
            Ok(())
        }

        // Case 2: no base, no index, no label -> `[disp32]` via the SIB escape.
        (None, None, None) => {
            buf.emit_u8(modrm_byte(0b00, reg, 0b100));
            buf.emit_u8(sib_byte(0b00, 0b100, 0b101));
            buf.emit_u32_le(mem.disp() as u32);
            Ok(())
        }

        // Case 3: base and/or index present.
        (base, index, None) => {
            let base_low3 = base.map(|b| b.low3());
            let need_sib = index.is_some() || base_low3 == Some(0b100);
            let no_base_with_index = base.is_none() && index.is_some();

            let disp = mem.disp();
            let mode = if no_base_with_index {
                0b00
            } else if disp == 0 && base_low3 != Some(0b101) {
                0b00
            } else if i8::try_from(disp).is_ok() {
                0b01
            } else {
                0b10
            };

            let rm = if need_sib { 0b100 } else { base_low3.unwrap() };
            buf.emit_u8(modrm_byte(mode, reg, rm));

            if need_sib {
                let scale = scale_bits(mem.scale(), offset)?;
                let index_field = match index {
                    Some(Index::Gp(r)) => r.low3(),
                    Some(Index::Vsib(r)) => r.low3(),
                    None => 0b100,
                };
                let base_field = base_low3.unwrap_or(0b101);
                buf.emit_u8(sib_byte(scale, index_field, base_field));
            }

            if no_base_with_index {
                buf.emit_u32_le(disp as u32);
            } else {
                match mode {
                    0b00 => {}
                    0b01 => buf.emit_u8(disp as i8 as u8),
                    0b10 => buf.emit_u32_le(disp as u32),
                    _ => unreachable!(),
                }
            }
            Ok(())
        }

        (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => Err(AsmError::InvalidMemoryForm { offset }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::CodeBuffer;
    use crate::label::LabelManager;
    use crate::reg::Reg64;

    fn run(mem: &MemOperand) -> Vec<u8> {
        let mut buf = CodeBuffer::new();
        let mut labels = LabelManager::new();
        encode_mem(&mut buf, &mut labels, 0, mem, true, 0).unwrap();
        buf.into_bytes()
    }

    #[test]
    fn rbp_zero_disp_forces_disp8() {
        // `add [rbp+0], rax` body (sans REX/opcode): mod=01, disp8=00.
        let mem = MemOperand::base(Reg64::rbp);
        assert_eq!(run(&mem), vec![modrm_byte(0b01, 0, 0b101), 0x00]);
    }

    #[test]
    fn rsp_base_always_sib() {
        let mem = MemOperand::base(Reg64::rsp);
        assert_eq!(
            run(&mem),
            vec![modrm_byte(0b00, 0, 0b100), sib_byte(0, 0b100, 0b100)]
        );
    }

    #[test]
    fn plain_base_no_disp() {
        let mem = MemOperand::base(Reg64::rax);
        assert_eq!(run(&mem), vec![modrm_byte(0b00, 0, 0b000)]);
    }

    #[test]
    fn disp32_forced_when_too_big() {
        let mem = MemOperand::base_disp(Reg64::rax, 0x1000);
        assert_eq!(
            run(&mem),
            [
                vec![modrm_byte(0b10, 0, 0b000)],
                0x1000i32.to_le_bytes().to_vec()
            ]
            .concat()
        );
    }
}
