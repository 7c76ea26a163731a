use jitx86_asm::prelude::*;

#[test]
#[should_panic]
fn unbound_label_panics_on_drop() {
    let mut asm = Assembler::new(EmitOptions::default());
    let _lbl = asm.new_label();
}

#[test]
#[should_panic]
fn unbound_label_panics_even_if_referenced() {
    let mut asm = Assembler::new(EmitOptions::default());
    let lbl = asm.new_label();
    asm.jmp(&lbl).unwrap();
}

#[test]
fn jmp_label() {
    {
        // Bind first.
        let mut asm = Assembler::new(EmitOptions::default());
        let lbl = asm.new_label();
        asm.bind(&lbl).unwrap();
        asm.jmp(&lbl).unwrap();
        // 0xfffffffb -> -5
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            [0xe9, 0xfb, 0xff, 0xff, 0xff]
        );
    }
    {
        // Bind later.
        let mut asm = Assembler::new(EmitOptions::default());
        let lbl = asm.new_label();
        asm.jmp(&lbl).unwrap();
        asm.bind(&lbl).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            [0xe9, 0x00, 0x00, 0x00, 0x00]
        );
    }
}

#[test]
fn jmp_label2() {
    {
        let mut asm = Assembler::new(EmitOptions::default());
        let lbl = asm.new_label();
        asm.jmp(&lbl).unwrap();
        asm.nop().unwrap();
        asm.nop().unwrap();
        asm.bind(&lbl).unwrap();
        assert_eq!(
            asm.finalize().unwrap().into_bytes(),
            [0xe9, 0x02, 0x00, 0x00, 0x00, 0x90, 0x90]
        );
    }
    {
        let mut asm = Assembler::new(EmitOptions::default());
        let lbl = asm.new_label();
        asm.jmp(&lbl).unwrap();
        for _ in 0..0x1ff {
            asm.nop().unwrap();
        }
        asm.bind(&lbl).unwrap();
        let code = asm.finalize().unwrap().into_bytes();
        assert_eq!(code[..5], [0xe9, 0xff, 0x01, 0x00, 0x00]);
    }
}
