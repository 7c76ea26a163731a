//! Add example.
//!
//! Jit compile a function at runtime (generate native host code) which calls a function defined in
//! the example based on the SystemV abi to demonstrate the [`jitx86_asm`] crate.

#[cfg(not(any(target_arch = "x86_64", target_os = "linux")))]
compile_error!("Only supported on x86_64 with SystemV abi");

use jitx86_asm::prelude::*;
use jitx86_asm::Runtime;

extern "C" fn add(a: u32, b: u32) -> u32 {
    a + b
}

fn main() {
    let _ = env_logger::try_init();

    let mut asm = Assembler::new(EmitOptions::default());

    // SystemV abi:
    //   rdi -> first argument
    //   rsi -> second argument
    //   rax -> return value

    asm.mov(Reg64::rsi, Imm::from(42u64)).unwrap();
    asm.mov(Reg64::rax, Imm::from(add as usize as u64)).unwrap();
    asm.call(Reg64::rax).unwrap();
    asm.ret().unwrap();

    let code = asm.finalize().unwrap().into_bytes();
    let rt = Runtime::new(&code);
    let add42 = unsafe { rt.as_fn::<extern "C" fn(u32) -> u32>() };

    // Disassemble JIT code and write to stdout.
    rt.disasm();

    let res = add42(5);
    assert_eq!(res, 47);
}
