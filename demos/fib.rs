//! Fibonacci example.
//!
//! Jit compile a function at runtime (generate native host code) to compute the fibonacci sequence
//! to demonstrate the [`jitx86_asm`] crate.

use jitx86_asm::prelude::*;
use jitx86_asm::Runtime;

const fn fib_rs(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fib_rs(n - 2) + fib_rs(n - 1),
    }
}

fn main() {
    let _ = env_logger::try_init();

    let mut asm = Assembler::new(EmitOptions::default());

    let lp = asm.new_label();
    let end = asm.new_label();

    // Reference implementation:
    //
    // int fib(int n) {
    //   int tmp = 0;
    //   int prv = 1;
    //   int sum = 0;
    // loop:
    //   if (n == 0) goto end;
    //   tmp = sum;
    //   sum += prv;
    //   prv = tmp;
    //   --n;
    //   goto loop;
    // end:
    //   return sum;
    // }

    // SystemV abi:
    //   rdi -> first argument
    //   rax -> return value
    let n = Reg64::rdi;
    let sum = Reg64::rax;

    let tmp = Reg64::rcx;
    let prv = Reg64::rdx;

    asm.mov(tmp, Imm::from(0u64)).unwrap();
    asm.mov(prv, Imm::from(1u64)).unwrap();
    asm.mov(sum, Imm::from(0u64)).unwrap();

    asm.bind(&lp).unwrap();
    asm.test(n, n).unwrap();
    asm.jz(&end).unwrap();
    asm.mov(tmp, sum).unwrap();
    asm.add(sum, prv).unwrap();
    asm.mov(prv, tmp).unwrap();
    asm.dec(n).unwrap();
    asm.jmp(&lp).unwrap();
    asm.bind(&end).unwrap();
    asm.ret().unwrap();

    // Move code into executable page and get function pointer to it.
    let code = asm.finalize().unwrap().into_bytes();
    let rt = Runtime::new(&code);
    let fib = unsafe { rt.as_fn::<extern "C" fn(u64) -> u64>() };

    // Disassemble JIT code and write to stdout.
    rt.disasm();

    for n in 0..15 {
        let fib_jit = fib(n);
        println!("fib({}) = {}", n, fib_jit);
        assert_eq!(fib_jit, fib_rs(n));
    }
}
