use jitx86_asm::prelude::*;
use jitx86_asm::{Reg16::*, Reg32::*, Reg64::*, Reg8::*};

macro_rules! mov {
    ($op1:expr, $op2:expr) => {{
        let mut asm = Assembler::new(EmitOptions::default());
        asm.mov($op1, $op2).unwrap();
        asm.finalize().unwrap().into_bytes()
    }};
}

macro_rules! mov_no_shortcut {
    ($op1:expr, $op2:expr) => {{
        let opts = EmitOptions {
            mov_imm32_shortcut: false,
            ..EmitOptions::default()
        };
        let mut asm = Assembler::new(opts);
        asm.mov($op1, $op2).unwrap();
        asm.finalize().unwrap().into_bytes()
    }};
}

#[rustfmt::skip]
#[test]
fn mov_rr() {
    // 64bit.
    assert_eq!(mov!(rcx, rdx), [0x48, 0x89, 0xd1]);
    assert_eq!(mov!(r11, rdx), [0x49, 0x89, 0xd3]);
    assert_eq!(mov!(rdi, r12), [0x4c, 0x89, 0xe7]);
    assert_eq!(mov!(r15, r12), [0x4d, 0x89, 0xe7]);

    // 32bit.
    assert_eq!(mov!(ecx,  edx),  [0x89, 0xd1]);
    assert_eq!(mov!(r11d, edx),  [0x41, 0x89, 0xd3]);
    assert_eq!(mov!(edi,  r12d), [0x44, 0x89, 0xe7]);
    assert_eq!(mov!(r15d, r12d), [0x45, 0x89, 0xe7]);

    // 16bit.
    assert_eq!(mov!(cx,   dx),   [0x66, 0x89, 0xd1]);
    assert_eq!(mov!(r11w, dx),   [0x66, 0x41, 0x89, 0xd3]);
    assert_eq!(mov!(di,   r12w), [0x66, 0x44, 0x89, 0xe7]);
    assert_eq!(mov!(r15w, r12w), [0x66, 0x45, 0x89, 0xe7]);

    // 8bit.
    assert_eq!(mov!(cl,   dl),   [0x88, 0xd1]);
    assert_eq!(mov!(ch,   dh),   [0x88, 0xf5]);
    assert_eq!(mov!(dil,  sil),  [0x40, 0x88, 0xf7]);
    assert_eq!(mov!(r11l, dl),   [0x41, 0x88, 0xd3]);
    assert_eq!(mov!(dil,  r12l), [0x44, 0x88, 0xe7]);
    assert_eq!(mov!(r15l, r12l), [0x45, 0x88, 0xe7]);
}

#[rustfmt::skip]
#[test]
fn mov_ri() {
    // 64bit, full 10-byte `mov r64, imm64` form (shortcut disabled).
    assert_eq!(mov_no_shortcut!(rdi, Imm::from(0xaabbu64)), [0x48, 0xbf, 0xbb, 0xaa, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(mov_no_shortcut!(r12, Imm::from(0xaabbu64)), [0x49, 0xbc, 0xbb, 0xaa, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

    // 64bit, default options take the 5-byte zero-extension shortcut.
    assert_eq!(mov!(rdi, Imm::from(0xaabbu64)), [0xbf, 0xbb, 0xaa, 0x00, 0x00]);
    assert_eq!(mov!(r12, Imm::from(0xaabbu64)), [0x41, 0xbc, 0xbb, 0xaa, 0x00, 0x00]);

    // 32bit.
    assert_eq!(mov!(edi,  Imm::from(0xaabbu32)), [0xbf, 0xbb, 0xaa, 0x00, 0x00]);
    assert_eq!(mov!(r12d, Imm::from(0xaabbu32)), [0x41, 0xbc, 0xbb, 0xaa, 0x00, 0x00]);

    // 16bit.
    assert_eq!(mov!(di,   Imm::from(0xaabbu16)), [0x66, 0xbf, 0xbb, 0xaa]);
    assert_eq!(mov!(r12w, Imm::from(0xaabbu16)), [0x66, 0x41, 0xbc, 0xbb, 0xaa]);

    // 8bit.
    assert_eq!(mov!(dil,  Imm::from(0xaau8)), [0x40, 0xb7, 0xaa]);
    assert_eq!(mov!(r12l, Imm::from(0xaau8)), [0x41, 0xb4, 0xaa]);
}

#[rustfmt::skip]
#[test]
fn mov_rm() {
    // 64bit.
    assert_eq!(mov!(rcx, MemOperand::base(rdx)), [0x48, 0x8b, 0x0a]);
    assert_eq!(mov!(r11, MemOperand::base(rsi)), [0x4c, 0x8b, 0x1e]);
    assert_eq!(mov!(rdi, MemOperand::base(r14)), [0x49, 0x8b, 0x3e]);
    assert_eq!(mov!(r15, MemOperand::base(r14)), [0x4d, 0x8b, 0x3e]);

    // 32bit.
    assert_eq!(mov!(ecx,  MemOperand::base(rdx)), [0x8b, 0x0a]);
    assert_eq!(mov!(r11d, MemOperand::base(rsi)), [0x44, 0x8b, 0x1e]);
    assert_eq!(mov!(edi,  MemOperand::base(r14)), [0x41, 0x8b, 0x3e]);
    assert_eq!(mov!(r15d, MemOperand::base(r14)), [0x45, 0x8b, 0x3e]);

    // 16bit.
    assert_eq!(mov!(cx,   MemOperand::base(rdx)), [0x66, 0x8b, 0x0a]);
    assert_eq!(mov!(r11w, MemOperand::base(rsi)), [0x66, 0x44, 0x8b, 0x1e]);
    assert_eq!(mov!(di,   MemOperand::base(r14)), [0x66, 0x41, 0x8b, 0x3e]);
    assert_eq!(mov!(r15w, MemOperand::base(r14)), [0x66, 0x45, 0x8b, 0x3e]);

    // 8bit.
    assert_eq!(mov!(cl,   MemOperand::base(rdx)), [0x8a, 0x0a]);
    assert_eq!(mov!(r11l, MemOperand::base(rsi)), [0x44, 0x8a, 0x1e]);
    assert_eq!(mov!(dil,  MemOperand::base(r14)), [0x41, 0x8a, 0x3e]);
    assert_eq!(mov!(r15l, MemOperand::base(r14)), [0x45, 0x8a, 0x3e]);
}

#[rustfmt::skip]
#[test]
fn mov_mr() {
    // 64bit.
    assert_eq!(mov!(MemOperand::base(rdx), rcx), [0x48, 0x89, 0x0a]);
    assert_eq!(mov!(MemOperand::base(rsi), r11), [0x4c, 0x89, 0x1e]);
    assert_eq!(mov!(MemOperand::base(r14), rdi), [0x49, 0x89, 0x3e]);
    assert_eq!(mov!(MemOperand::base(r14), r15), [0x4d, 0x89, 0x3e]);

    // 32bit.
    assert_eq!(mov!(MemOperand::base(rdx), ecx),  [0x89, 0x0a]);
    assert_eq!(mov!(MemOperand::base(rsi), r11d), [0x44, 0x89, 0x1e]);
    assert_eq!(mov!(MemOperand::base(r14), edi),  [0x41, 0x89, 0x3e]);
    assert_eq!(mov!(MemOperand::base(r14), r15d), [0x45, 0x89, 0x3e]);

    // 16bit.
    assert_eq!(mov!(MemOperand::base(rdx), cx),   [0x66, 0x89, 0x0a]);
    assert_eq!(mov!(MemOperand::base(rsi), r11w), [0x66, 0x44, 0x89, 0x1e]);
    assert_eq!(mov!(MemOperand::base(r14), di),   [0x66, 0x41, 0x89, 0x3e]);
    assert_eq!(mov!(MemOperand::base(r14), r15w), [0x66, 0x45, 0x89, 0x3e]);

    // 8bit.
    assert_eq!(mov!(MemOperand::base(rdx), cl),   [0x88, 0x0a]);
    assert_eq!(mov!(MemOperand::base(rsi), r11l), [0x44, 0x88, 0x1e]);
    assert_eq!(mov!(MemOperand::base(r14), dil),  [0x41, 0x88, 0x3e]);
    assert_eq!(mov!(MemOperand::base(r14), r15l), [0x45, 0x88, 0x3e]);
}
