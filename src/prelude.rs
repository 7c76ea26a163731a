//! Crate prelude, which can be used to import the most important types at once.

pub use crate::asm::{Assembler, Bitness, EmitOptions};
pub use crate::imm::Imm;
pub use crate::label::Label;
pub use crate::mem::{Index, MemOperand};
pub use crate::reg::{MaskReg, Reg, Reg16, Reg32, Reg64, Reg8, VecReg, VecWidth};

pub use crate::insn::*;
