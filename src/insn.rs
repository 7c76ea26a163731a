//! One trait per mnemonic, generic over its operand shapes, surfaced as overloaded-by-trait
//! methods on `Assembler`. The families underneath are decision tables rather than one method
//! per operand shape, but the public surface stays one trait per mnemonic either way.
//!
//! Every encoder method returns [`AsmResult`]`<()>`: Rust trait methods cannot vary their return
//! type per impl, and several operand shapes of the *same* mnemonic can fail (a memory operand
//! missing an explicit size, an immediate that doesn't fit, a high-byte register forced through
//! REX) while others cannot (two same-width plain registers) — so every impl of a given trait
//! returns the same `AsmResult<()>`, `Ok(())` unconditionally for the shapes that happen to be
//! infallible. See `DESIGN.md` for more on this trade-off.

use crate::error::AsmResult;

pub mod legacy;
pub mod bmi;
pub mod sse;
pub mod avx;
pub mod avx512;
pub mod aesni_sha;

macro_rules! trait1 {
    ($(#[$doc:meta])* $tr:ident, $method:ident) => {
        $(#[$doc])*
        pub trait $tr<T> {
            fn $method(&mut self, op1: T) -> AsmResult<()>;
        }
    };
}

macro_rules! trait2 {
    ($(#[$doc:meta])* $tr:ident, $method:ident) => {
        $(#[$doc])*
        pub trait $tr<T, U> {
            fn $method(&mut self, op1: T, op2: U) -> AsmResult<()>;
        }
    };
}

macro_rules! trait3 {
    ($(#[$doc:meta])* $tr:ident, $method:ident) => {
        $(#[$doc])*
        pub trait $tr<T, U, V> {
            fn $method(&mut self, op1: T, op2: U, op3: V) -> AsmResult<()>;
        }
    };
}

macro_rules! trait0 {
    ($(#[$doc:meta])* $tr:ident, $method:ident) => {
        $(#[$doc])*
        pub trait $tr {
            fn $method(&mut self) -> AsmResult<()>;
        }
    };
}

pub(crate) use trait0;
pub(crate) use trait1;
pub(crate) use trait2;
pub(crate) use trait3;

// -- Integer legacy --

trait2!(
    /// [`mov`](https://www.felixcloutier.com/x86/mov)
    Mov, mov
);
trait2!(
    /// [`movzx`](https://www.felixcloutier.com/x86/movzx)
    Movzx, movzx
);
trait2!(
    /// [`movsx`](https://www.felixcloutier.com/x86/movsx)
    Movsx, movsx
);
trait2!(
    /// [`movsxd`](https://www.felixcloutier.com/x86/movsxd)
    Movsxd, movsxd
);
trait2!(
    /// [`lea`](https://www.felixcloutier.com/x86/lea)
    Lea, lea
);
trait1!(
    /// [`push`](https://www.felixcloutier.com/x86/push)
    Push, push
);
trait1!(
    /// [`pop`](https://www.felixcloutier.com/x86/pop)
    Pop, pop
);
trait2!(
    /// [`add`](https://www.felixcloutier.com/x86/add)
    Add, add
);
trait2!(
    /// [`sub`](https://www.felixcloutier.com/x86/sub)
    Sub, sub
);
trait2!(
    /// [`adc`](https://www.felixcloutier.com/x86/adc)
    Adc, adc
);
trait2!(
    /// [`sbb`](https://www.felixcloutier.com/x86/sbb)
    Sbb, sbb
);
trait2!(
    /// [`and`](https://www.felixcloutier.com/x86/and)
    And, and
);
trait2!(
    /// [`or`](https://www.felixcloutier.com/x86/or)
    Or, or
);
trait2!(
    /// [`xor`](https://www.felixcloutier.com/x86/xor)
    Xor, xor
);
trait2!(
    /// [`cmp`](https://www.felixcloutier.com/x86/cmp)
    Cmp, cmp
);
trait2!(
    /// [`test`](https://www.felixcloutier.com/x86/test)
    Test, test
);
trait1!(
    /// [`neg`](https://www.felixcloutier.com/x86/neg)
    Neg, neg
);
trait1!(
    /// [`not`](https://www.felixcloutier.com/x86/not)
    Not, not
);
trait1!(
    /// [`inc`](https://www.felixcloutier.com/x86/inc)
    Inc, inc
);
trait1!(
    /// [`dec`](https://www.felixcloutier.com/x86/dec)
    Dec, dec
);
trait1!(
    /// [`mul`](https://www.felixcloutier.com/x86/mul) (unsigned, one-operand form)
    Mul, mul
);
trait1!(
    /// [`imul`](https://www.felixcloutier.com/x86/imul) one-operand form
    Imul1, imul1
);
trait2!(
    /// [`imul`](https://www.felixcloutier.com/x86/imul) two-operand form
    Imul2, imul2
);
trait3!(
    /// [`imul`](https://www.felixcloutier.com/x86/imul) three-operand form
    Imul3, imul3
);
trait1!(
    /// [`div`](https://www.felixcloutier.com/x86/div)
    Div, div
);
trait1!(
    /// [`idiv`](https://www.felixcloutier.com/x86/idiv)
    Idiv, idiv
);
trait2!(
    /// [`shl`](https://www.felixcloutier.com/x86/sal:shl)
    Shl, shl
);
trait2!(
    /// [`shr`](https://www.felixcloutier.com/x86/shr)
    Shr, shr
);
trait2!(
    /// [`sar`](https://www.felixcloutier.com/x86/sar)
    Sar, sar
);
trait2!(
    /// [`rol`](https://www.felixcloutier.com/x86/rcl:rcr:rol:ror)
    Rol, rol
);
trait2!(
    /// [`ror`](https://www.felixcloutier.com/x86/rcl:rcr:rol:ror)
    Ror, ror
);
trait2!(
    /// [`xchg`](https://www.felixcloutier.com/x86/xchg)
    Xchg, xchg
);
trait2!(
    /// [`cmovcc`](https://www.felixcloutier.com/x86/cmovcc) move-if-zero form
    Cmovz, cmovz
);
trait2!(
    /// [`cmovcc`](https://www.felixcloutier.com/x86/cmovcc) move-if-not-zero form
    Cmovnz, cmovnz
);
trait2!(
    /// [`cmovcc`](https://www.felixcloutier.com/x86/cmovcc) move-if-less form
    Cmovl, cmovl
);
trait2!(
    /// [`cmovcc`](https://www.felixcloutier.com/x86/cmovcc) move-if-greater form
    Cmovg, cmovg
);
trait1!(
    /// [`setcc`](https://www.felixcloutier.com/x86/setcc) set-if-zero form
    Setz, setz
);
trait1!(
    /// [`setcc`](https://www.felixcloutier.com/x86/setcc) set-if-not-zero form
    Setnz, setnz
);
trait1!(
    /// [`setcc`](https://www.felixcloutier.com/x86/setcc) set-if-less form
    Setl, setl
);
trait1!(
    /// [`setcc`](https://www.felixcloutier.com/x86/setcc) set-if-greater form
    Setg, setg
);
trait0!(
    /// [`cwd/cdq/cqo`](https://www.felixcloutier.com/x86/cwd:cdq:cqo) sign-extend `rax` into `rdx:rax`
    Cqo, cqo
);
trait0!(
    /// [`cwd/cdq/cqo`](https://www.felixcloutier.com/x86/cwd:cdq:cqo) sign-extend `eax` into `edx:eax`
    Cdq, cdq
);
trait0!(
    /// [`cwd/cdq/cqo`](https://www.felixcloutier.com/x86/cwd:cdq:cqo) sign-extend `ax` into `dx:ax`
    Cwd, cwd
);
trait0!(
    /// [`cbw/cwde/cdqe`](https://www.felixcloutier.com/x86/cbw:cwde:cdqe) sign-extend `eax` into `rax`
    Cdqe, cdqe
);
trait0!(
    /// [`cbw/cwde/cdqe`](https://www.felixcloutier.com/x86/cbw:cwde:cdqe) sign-extend `ax` into `eax`
    Cwde, cwde
);
trait0!(
    /// [`cbw/cwde/cdqe`](https://www.felixcloutier.com/x86/cbw:cwde:cdqe) sign-extend `al` into `ax`
    Cbw, cbw
);
trait1!(
    /// [`call`](https://www.felixcloutier.com/x86/call)
    Call, call
);
trait0!(
    /// [`ret`](https://www.felixcloutier.com/x86/ret)
    Ret, ret
);
trait1!(
    /// [`jmp`](https://www.felixcloutier.com/x86/jmp)
    Jmp, jmp
);
trait1!(
    /// [`jcc`](https://www.felixcloutier.com/x86/jcc) jump-if-zero form
    Jz, jz
);
trait1!(
    /// [`jcc`](https://www.felixcloutier.com/x86/jcc) jump-if-not-zero form
    Jnz, jnz
);
trait1!(
    /// [`jcc`](https://www.felixcloutier.com/x86/jcc) jump-if-less form
    Jl, jl
);
trait1!(
    /// [`jcc`](https://www.felixcloutier.com/x86/jcc) jump-if-greater-or-equal form
    Jge, jge
);
trait0!(
    /// [`int3`](https://www.felixcloutier.com/x86/intn:int3:into:int1) breakpoint trap
    Int3, int3
);
trait1!(
    /// [`int`](https://www.felixcloutier.com/x86/intn:int3:into:int1) software interrupt
    Int, int
);
trait0!(
    /// [`nop`](https://www.felixcloutier.com/x86/nop) single-byte form
    Nop, nop
);
trait1!(
    /// multi-byte `nop` padding, `len` bytes long (table in `insn/legacy.rs`)
    NopN, nop_n
);
trait0!(
    /// [`clc`](https://www.felixcloutier.com/x86/clc)
    Clc, clc
);
trait0!(
    /// [`stc`](https://www.felixcloutier.com/x86/stc)
    Stc, stc
);
trait0!(
    /// [`cmc`](https://www.felixcloutier.com/x86/cmc)
    Cmc, cmc
);
trait0!(
    /// [`cld`](https://www.felixcloutier.com/x86/cld)
    Cld, cld
);
trait0!(
    /// [`std`](https://www.felixcloutier.com/x86/std)
    Std, std
);
trait0!(
    /// [`mfence`](https://www.felixcloutier.com/x86/mfence)
    Mfence, mfence
);
trait0!(
    /// [`sfence`](https://www.felixcloutier.com/x86/sfence)
    Sfence, sfence
);
trait0!(
    /// [`lfence`](https://www.felixcloutier.com/x86/lfence)
    Lfence, lfence
);
trait0!(
    /// [`pause`](https://www.felixcloutier.com/x86/pause)
    Pause, pause
);
trait1!(
    /// [`bswap`](https://www.felixcloutier.com/x86/bswap)
    Bswap, bswap
);
trait2!(
    /// [`bsf`](https://www.felixcloutier.com/x86/bsf)
    Bsf, bsf
);
trait2!(
    /// [`bsr`](https://www.felixcloutier.com/x86/bsr)
    Bsr, bsr
);
trait2!(
    /// [`bt`](https://www.felixcloutier.com/x86/bt)
    Bt, bt
);
trait2!(
    /// [`btc`](https://www.felixcloutier.com/x86/btc)
    Btc, btc
);
trait2!(
    /// [`btr`](https://www.felixcloutier.com/x86/btr)
    Btr, btr
);
trait2!(
    /// [`bts`](https://www.felixcloutier.com/x86/bts)
    Bts, bts
);
trait2!(
    /// [`popcnt`](https://www.felixcloutier.com/x86/popcnt)
    Popcnt, popcnt
);
trait2!(
    /// [`lzcnt`](https://www.felixcloutier.com/x86/lzcnt)
    Lzcnt, lzcnt
);
trait2!(
    /// [`tzcnt`](https://www.felixcloutier.com/x86/tzcnt)
    Tzcnt, tzcnt
);
trait0!(
    /// [`movsb/movsw/movsd/movsq`](https://www.felixcloutier.com/x86/movs:movsb:movsw:movsd:movsq) with a `rep` prefix
    RepMovsb, rep_movsb
);
trait0!(
    /// [`stosb/stosw/stosd/stosq`](https://www.felixcloutier.com/x86/stos:stosb:stosw:stosd:stosq) with a `rep` prefix
    RepStosb, rep_stosb
);
trait0!(
    /// [`cmpsb`](https://www.felixcloutier.com/x86/cmps:cmpsb:cmpsw:cmpsd:cmpsq) with a `repe` prefix
    RepeCmpsb, repe_cmpsb
);
trait0!(
    /// [`scasb`](https://www.felixcloutier.com/x86/scas:scasb:scasw:scasd:scasq) with a `repne` prefix
    RepneScasb, repne_scasb
);

// -- BMI1 / BMI2 / ADX --

trait3!(
    /// [`andn`](https://www.felixcloutier.com/x86/andn)
    Andn, andn
);
trait3!(
    /// [`bextr`](https://www.felixcloutier.com/x86/bextr)
    Bextr, bextr
);
trait2!(
    /// [`blsi`](https://www.felixcloutier.com/x86/blsi)
    Blsi, blsi
);
trait2!(
    /// [`blsmsk`](https://www.felixcloutier.com/x86/blsmsk)
    Blsmsk, blsmsk
);
trait2!(
    /// [`blsr`](https://www.felixcloutier.com/x86/blsr)
    Blsr, blsr
);
trait3!(
    /// [`bzhi`](https://www.felixcloutier.com/x86/bzhi)
    Bzhi, bzhi
);
trait3!(
    /// [`pdep`](https://www.felixcloutier.com/x86/pdep)
    Pdep, pdep
);
trait3!(
    /// [`pext`](https://www.felixcloutier.com/x86/pext)
    Pext, pext
);
trait2!(
    /// [`rorx`](https://www.felixcloutier.com/x86/rorx)
    Rorx, rorx
);
trait3!(
    /// [`sarx`](https://www.felixcloutier.com/x86/sarx:shlx:shrx)
    Sarx, sarx
);
trait3!(
    /// [`shlx`](https://www.felixcloutier.com/x86/sarx:shlx:shrx)
    Shlx, shlx
);
trait3!(
    /// [`shrx`](https://www.felixcloutier.com/x86/sarx:shlx:shrx)
    Shrx, shrx
);
trait3!(
    /// [`mulx`](https://www.felixcloutier.com/x86/mulx)
    Mulx, mulx
);
trait2!(
    /// [`adcx`](https://www.felixcloutier.com/x86/adcx)
    Adcx, adcx
);
trait2!(
    /// [`adox`](https://www.felixcloutier.com/x86/adox)
    Adox, adox
);

// -- SSE / SSE2 / SSSE3 / SSE4 --

trait2!(
    /// [`movss`](https://www.felixcloutier.com/x86/movss)
    Movss, movss
);
trait2!(
    /// [`movsd`](https://www.felixcloutier.com/x86/movsd) (scalar double move, not the string op)
    MovsdXmm, movsd_xmm
);
trait3!(
    /// [`addss`](https://www.felixcloutier.com/x86/addss)
    Addss, addss
);
trait3!(
    /// [`addsd`](https://www.felixcloutier.com/x86/addsd)
    Addsd, addsd
);
trait3!(
    /// [`subss`](https://www.felixcloutier.com/x86/subss)
    Subss, subss
);
trait3!(
    /// [`mulss`](https://www.felixcloutier.com/x86/mulss)
    Mulss, mulss
);
trait3!(
    /// [`mulsd`](https://www.felixcloutier.com/x86/mulsd)
    Mulsd, mulsd
);
trait3!(
    /// [`divss`](https://www.felixcloutier.com/x86/divss)
    Divss, divss
);
trait3!(
    /// [`divsd`](https://www.felixcloutier.com/x86/divsd)
    Divsd, divsd
);
trait2!(
    /// [`sqrtss`](https://www.felixcloutier.com/x86/sqrtss)
    Sqrtss, sqrtss
);
trait3!(
    /// [`minss`](https://www.felixcloutier.com/x86/minss)
    Minss, minss
);
trait3!(
    /// [`maxss`](https://www.felixcloutier.com/x86/maxss)
    Maxss, maxss
);
trait2!(
    /// [`comiss`](https://www.felixcloutier.com/x86/comiss)
    Comiss, comiss
);
trait2!(
    /// [`ucomisd`](https://www.felixcloutier.com/x86/ucomisd)
    Ucomisd, ucomisd
);
trait3!(
    /// [`cmpss`](https://www.felixcloutier.com/x86/cmpss) with an immediate predicate
    Cmpss, cmpss
);
trait2!(
    /// [`cvtsi2sd`](https://www.felixcloutier.com/x86/cvtsi2sd)
    Cvtsi2sd, cvtsi2sd
);
trait2!(
    /// [`cvttsd2si`](https://www.felixcloutier.com/x86/cvttsd2si)
    Cvttsd2si, cvttsd2si
);
trait2!(
    /// [`movaps`](https://www.felixcloutier.com/x86/movaps)
    Movaps, movaps
);
trait2!(
    /// [`movupd`](https://www.felixcloutier.com/x86/movupd)
    Movupd, movupd
);
trait2!(
    /// [`addps`](https://www.felixcloutier.com/x86/addps)
    Addps, addps
);
trait2!(
    /// [`subps`](https://www.felixcloutier.com/x86/subps)
    Subps, subps
);
trait2!(
    /// [`mulps`](https://www.felixcloutier.com/x86/mulps)
    Mulps, mulps
);
trait2!(
    /// [`divps`](https://www.felixcloutier.com/x86/divps)
    Divps, divps
);
trait2!(
    /// [`addpd`](https://www.felixcloutier.com/x86/addpd)
    Addpd, addpd
);
trait2!(
    /// [`subpd`](https://www.felixcloutier.com/x86/subpd)
    Subpd, subpd
);
trait2!(
    /// [`mulpd`](https://www.felixcloutier.com/x86/mulpd)
    Mulpd, mulpd
);
trait2!(
    /// [`divpd`](https://www.felixcloutier.com/x86/divpd)
    Divpd, divpd
);
trait2!(
    /// [`andps`](https://www.felixcloutier.com/x86/andps)
    Andps, andps
);
trait2!(
    /// [`orps`](https://www.felixcloutier.com/x86/orps)
    Orps, orps
);
trait2!(
    /// [`xorps`](https://www.felixcloutier.com/x86/xorps)
    Xorps, xorps
);
trait3!(
    /// [`cmpps`](https://www.felixcloutier.com/x86/cmpps) with an immediate predicate
    Cmpps, cmpps
);
trait2!(
    /// [`cvtdq2ps`](https://www.felixcloutier.com/x86/cvtdq2ps)
    Cvtdq2ps, cvtdq2ps
);
trait2!(
    /// [`cvttps2dq`](https://www.felixcloutier.com/x86/cvttps2dq)
    Cvttps2dq, cvttps2dq
);
trait2!(
    /// [`movd`](https://www.felixcloutier.com/x86/movd:movq) (32-bit GP/mem <-> xmm)
    Movd, movd
);
trait2!(
    /// [`movq`](https://www.felixcloutier.com/x86/movd:movq) (64-bit GP/mem <-> xmm, or xmm-xmm)
    Movq, movq
);
trait2!(
    /// [`movdqu`](https://www.felixcloutier.com/x86/movdqu:vmovdqu8:vmovdqu16:vmovdqu32:vmovdqu64)
    Movdqu, movdqu
);
trait2!(
    /// [`movdqa`](https://www.felixcloutier.com/x86/movdqa:vmovdqa32:vmovdqa64)
    Movdqa, movdqa
);
trait2!(
    /// [`paddb`](https://www.felixcloutier.com/x86/paddb:paddw:paddd) byte form
    Paddb, paddb
);
trait2!(
    /// [`paddd`](https://www.felixcloutier.com/x86/paddb:paddw:paddd) dword form
    Paddd, paddd
);
trait2!(
    /// [`paddq`](https://www.felixcloutier.com/x86/paddq)
    Paddq, paddq
);
trait2!(
    /// [`psubd`](https://www.felixcloutier.com/x86/psubb:psubw:psubd) dword form
    Psubd, psubd
);
trait2!(
    /// [`pmullw`](https://www.felixcloutier.com/x86/pmullw)
    Pmullw, pmullw
);
trait2!(
    /// [`pmaddwd`](https://www.felixcloutier.com/x86/pmaddwd)
    Pmaddwd, pmaddwd
);
trait2!(
    /// [`pcmpeqd`](https://www.felixcloutier.com/x86/pcmpeqb:pcmpeqw:pcmpeqd) dword form
    Pcmpeqd, pcmpeqd
);
trait2!(
    /// [`pcmpeqq`](https://www.felixcloutier.com/x86/pcmpeqq) qword form (SSE4.1)
    Pcmpeqq, pcmpeqq
);
trait2!(
    /// [`pcmpgtd`](https://www.felixcloutier.com/x86/pcmpgtb:pcmpgtw:pcmpgtd) dword form
    Pcmpgtd, pcmpgtd
);
trait2!(
    /// [`pminub`](https://www.felixcloutier.com/x86/pminub)
    Pminub, pminub
);
trait2!(
    /// [`pmaxub`](https://www.felixcloutier.com/x86/pmaxub)
    Pmaxub, pmaxub
);
trait2!(
    /// [`psllw`](https://www.felixcloutier.com/x86/psllw:pslld:psllq) word form, by `imm8`
    Psllw, psllw
);
trait2!(
    /// [`pslld`](https://www.felixcloutier.com/x86/psllw:pslld:psllq) dword form, by `imm8`
    Pslld, pslld
);
trait2!(
    /// [`psrld`](https://www.felixcloutier.com/x86/psrlw:psrld:psrlq) dword form, by `imm8`
    Psrld, psrld
);
trait2!(
    /// [`psrad`](https://www.felixcloutier.com/x86/psraw:psrad) dword form, by `imm8`
    Psrad, psrad
);
trait2!(
    /// [`pand`](https://www.felixcloutier.com/x86/pand)
    Pand, pand
);
trait2!(
    /// [`pandn`](https://www.felixcloutier.com/x86/pandn)
    Pandn, pandn
);
trait2!(
    /// [`por`](https://www.felixcloutier.com/x86/por)
    Por, por
);
trait2!(
    /// [`pxor`](https://www.felixcloutier.com/x86/pxor)
    Pxor, pxor
);
trait2!(
    /// [`punpcklbw`](https://www.felixcloutier.com/x86/punpcklbw:punpcklwd:punpckldq:punpcklqdq) low-lane unpack, byte form
    Punpcklbw, punpcklbw
);
trait2!(
    /// [`punpckhqdq`](https://www.felixcloutier.com/x86/punpckhbw:punpckhwd:punpckhdq:punpckhqdq) high-lane unpack, qword form
    Punpckhqdq, punpckhqdq
);
trait2!(
    /// [`pshufb`](https://www.felixcloutier.com/x86/pshufb)
    Pshufb, pshufb
);
trait3!(
    /// [`palignr`](https://www.felixcloutier.com/x86/palignr)
    Palignr, palignr
);
trait2!(
    /// [`pabsb`](https://www.felixcloutier.com/x86/pabsb:pabsw:pabsd) byte form
    Pabsb, pabsb
);
trait2!(
    /// [`psadbw`](https://www.felixcloutier.com/x86/psadbw)
    Psadbw, psadbw
);
trait2!(
    /// [`pmaddubsw`](https://www.felixcloutier.com/x86/pmaddubsw)
    Pmaddubsw, pmaddubsw
);
trait3!(
    /// [`pshufd`](https://www.felixcloutier.com/x86/pshufd)
    Pshufd, pshufd
);
trait2!(
    /// [`pmovzxbw`](https://www.felixcloutier.com/x86/pmovzx) byte->word widening
    Pmovzxbw, pmovzxbw
);
trait2!(
    /// [`pmovsxbw`](https://www.felixcloutier.com/x86/pmovsx) byte->word widening
    Pmovsxbw, pmovsxbw
);
trait2!(
    /// [`pmovzxbd`](https://www.felixcloutier.com/x86/pmovzx) byte->dword widening
    Pmovzxbd, pmovzxbd
);
trait2!(
    /// [`pmovsxbd`](https://www.felixcloutier.com/x86/pmovsx) byte->dword widening
    Pmovsxbd, pmovsxbd
);
trait2!(
    /// [`pmovzxbq`](https://www.felixcloutier.com/x86/pmovzx) byte->qword widening
    Pmovzxbq, pmovzxbq
);
trait2!(
    /// [`pmovsxbq`](https://www.felixcloutier.com/x86/pmovsx) byte->qword widening
    Pmovsxbq, pmovsxbq
);
trait2!(
    /// [`pmovzxwd`](https://www.felixcloutier.com/x86/pmovzx) word->dword widening
    Pmovzxwd, pmovzxwd
);
trait2!(
    /// [`pmovsxwd`](https://www.felixcloutier.com/x86/pmovsx) word->dword widening
    Pmovsxwd, pmovsxwd
);
trait2!(
    /// [`pmovzxwq`](https://www.felixcloutier.com/x86/pmovzx) word->qword widening
    Pmovzxwq, pmovzxwq
);
trait2!(
    /// [`pmovsxwq`](https://www.felixcloutier.com/x86/pmovsx) word->qword widening
    Pmovsxwq, pmovsxwq
);
trait2!(
    /// [`pmovzxdq`](https://www.felixcloutier.com/x86/pmovzx) dword->qword widening
    Pmovzxdq, pmovzxdq
);
trait2!(
    /// [`pmovsxdq`](https://www.felixcloutier.com/x86/pmovsx) dword->qword widening
    Pmovsxdq, pmovsxdq
);
trait3!(
    /// [`pinsrb`](https://www.felixcloutier.com/x86/pinsrb:pinsrd:pinsrq) byte form
    Pinsrb, pinsrb
);
trait3!(
    /// [`pinsrw`](https://www.felixcloutier.com/x86/pinsrw) word form (baseline SSE2, not SSE4.1)
    Pinsrw, pinsrw
);
trait3!(
    /// [`pinsrd`](https://www.felixcloutier.com/x86/pinsrb:pinsrd:pinsrq) dword/qword form (REX.W selects qword)
    Pinsrd, pinsrd
);
trait3!(
    /// [`pextrb`](https://www.felixcloutier.com/x86/pextrb:pextrd:pextrq) byte form
    Pextrb, pextrb
);
trait3!(
    /// [`pextrw`](https://www.felixcloutier.com/x86/pextrw) word form (baseline SSE2 register-only form)
    Pextrw, pextrw
);
trait3!(
    /// [`pextrd`](https://www.felixcloutier.com/x86/pextrb:pextrd:pextrq) dword/qword form (REX.W selects qword)
    Pextrd, pextrd
);
trait3!(
    /// [`insertps`](https://www.felixcloutier.com/x86/insertps)
    Insertps, insertps
);
trait3!(
    /// [`pblendw`](https://www.felixcloutier.com/x86/pblendw)
    Pblendw, pblendw
);
trait3!(
    /// [`blendvpd`](https://www.felixcloutier.com/x86/blendvpd) (implicit `xmm0` selector, legacy SSE form)
    Blendvpd, blendvpd
);
trait3!(
    /// [`blendvps`](https://www.felixcloutier.com/x86/blendvps) (implicit `xmm0` selector, legacy SSE form)
    Blendvps, blendvps
);
trait3!(
    /// [`pblendvb`](https://www.felixcloutier.com/x86/pblendvb) (implicit `xmm0` selector, legacy SSE form)
    Pblendvb, pblendvb
);
trait3!(
    /// [`blendps`](https://www.felixcloutier.com/x86/blendps)
    Blendps, blendps
);
trait3!(
    /// [`blendpd`](https://www.felixcloutier.com/x86/blendpd)
    Blendpd, blendpd
);
trait3!(
    /// [`extractps`](https://www.felixcloutier.com/x86/extractps)
    Extractps, extractps
);

// -- SSE/SSE2 coverage added beyond the first pass: remaining scalar/packed FP, more SSE2 integer --

trait3!(
    /// [`subsd`](https://www.felixcloutier.com/x86/subsd)
    Subsd, subsd
);
trait3!(
    /// [`minsd`](https://www.felixcloutier.com/x86/minsd)
    Minsd, minsd
);
trait3!(
    /// [`maxsd`](https://www.felixcloutier.com/x86/maxsd)
    Maxsd, maxsd
);
trait2!(
    /// [`sqrtsd`](https://www.felixcloutier.com/x86/sqrtsd)
    Sqrtsd, sqrtsd
);
trait2!(
    /// [`rcpss`](https://www.felixcloutier.com/x86/rcpss)
    Rcpss, rcpss
);
trait2!(
    /// [`rsqrtss`](https://www.felixcloutier.com/x86/rsqrtss)
    Rsqrtss, rsqrtss
);
trait2!(
    /// [`ucomiss`](https://www.felixcloutier.com/x86/ucomiss)
    Ucomiss, ucomiss
);
trait2!(
    /// [`comisd`](https://www.felixcloutier.com/x86/comisd)
    Comisd, comisd
);
trait3!(
    /// [`cmpsd`](https://www.felixcloutier.com/x86/cmpsd) with an immediate predicate (scalar-double compare, not the string op)
    CmpsdXmm, cmpsd_xmm
);
trait2!(
    /// [`cvtsi2ss`](https://www.felixcloutier.com/x86/cvtsi2ss)
    Cvtsi2ss, cvtsi2ss
);
trait2!(
    /// [`cvttss2si`](https://www.felixcloutier.com/x86/cvttss2si)
    Cvttss2si, cvttss2si
);
trait2!(
    /// [`movups`](https://www.felixcloutier.com/x86/movups)
    Movups, movups
);
trait2!(
    /// [`movapd`](https://www.felixcloutier.com/x86/movapd)
    Movapd, movapd
);
trait2!(
    /// [`sqrtps`](https://www.felixcloutier.com/x86/sqrtps)
    Sqrtps, sqrtps
);
trait2!(
    /// [`sqrtpd`](https://www.felixcloutier.com/x86/sqrtpd)
    Sqrtpd, sqrtpd
);
trait2!(
    /// [`minps`](https://www.felixcloutier.com/x86/minps)
    Minps, minps
);
trait2!(
    /// [`minpd`](https://www.felixcloutier.com/x86/minpd)
    Minpd, minpd
);
trait2!(
    /// [`maxps`](https://www.felixcloutier.com/x86/maxps)
    Maxps, maxps
);
trait2!(
    /// [`maxpd`](https://www.felixcloutier.com/x86/maxpd)
    Maxpd, maxpd
);
trait2!(
    /// [`andpd`](https://www.felixcloutier.com/x86/andpd)
    Andpd, andpd
);
trait2!(
    /// [`orpd`](https://www.felixcloutier.com/x86/orpd)
    Orpd, orpd
);
trait2!(
    /// [`xorpd`](https://www.felixcloutier.com/x86/xorpd)
    Xorpd, xorpd
);
trait3!(
    /// [`cmppd`](https://www.felixcloutier.com/x86/cmppd) with an immediate predicate
    Cmppd, cmppd
);
trait2!(
    /// [`cvtps2dq`](https://www.felixcloutier.com/x86/cvtps2dq)
    Cvtps2dq, cvtps2dq
);
trait2!(
    /// [`paddw`](https://www.felixcloutier.com/x86/paddb:paddw:paddd) word form
    Paddw, paddw
);
trait2!(
    /// [`psubb`](https://www.felixcloutier.com/x86/psubb:psubw:psubd) byte form
    Psubb, psubb
);
trait2!(
    /// [`psubw`](https://www.felixcloutier.com/x86/psubb:psubw:psubd) word form
    Psubw, psubw
);
trait2!(
    /// [`psubq`](https://www.felixcloutier.com/x86/psubq)
    Psubq, psubq
);
trait2!(
    /// [`pmulhw`](https://www.felixcloutier.com/x86/pmulhw)
    Pmulhw, pmulhw
);
trait2!(
    /// [`pmulhuw`](https://www.felixcloutier.com/x86/pmulhuw)
    Pmulhuw, pmulhuw
);
trait2!(
    /// [`pmulld`](https://www.felixcloutier.com/x86/pmulld)
    Pmulld, pmulld
);
trait2!(
    /// [`pcmpeqb`](https://www.felixcloutier.com/x86/pcmpeqb:pcmpeqw:pcmpeqd) byte form
    Pcmpeqb, pcmpeqb
);
trait2!(
    /// [`pcmpeqw`](https://www.felixcloutier.com/x86/pcmpeqb:pcmpeqw:pcmpeqd) word form
    Pcmpeqw, pcmpeqw
);
trait2!(
    /// [`pcmpgtb`](https://www.felixcloutier.com/x86/pcmpgtb:pcmpgtw:pcmpgtd) byte form
    Pcmpgtb, pcmpgtb
);
trait2!(
    /// [`pcmpgtw`](https://www.felixcloutier.com/x86/pcmpgtb:pcmpgtw:pcmpgtd) word form
    Pcmpgtw, pcmpgtw
);
trait2!(
    /// [`pcmpgtq`](https://www.felixcloutier.com/x86/pcmpgtq)
    Pcmpgtq, pcmpgtq
);
trait2!(
    /// [`pminsw`](https://www.felixcloutier.com/x86/pminsw)
    Pminsw, pminsw
);
trait2!(
    /// [`pminud`](https://www.felixcloutier.com/x86/pminud:pminuw)
    Pminud, pminud
);
trait2!(
    /// [`pminsd`](https://www.felixcloutier.com/x86/pminsd:pminsb)
    Pminsd, pminsd
);
trait2!(
    /// [`pmaxsw`](https://www.felixcloutier.com/x86/pmaxsw)
    Pmaxsw, pmaxsw
);
trait2!(
    /// [`pmaxud`](https://www.felixcloutier.com/x86/pmaxud:pmaxuw)
    Pmaxud, pmaxud
);
trait2!(
    /// [`pmaxsd`](https://www.felixcloutier.com/x86/pmaxsd:pmaxsb)
    Pmaxsd, pmaxsd
);
trait2!(
    /// [`psllq`](https://www.felixcloutier.com/x86/psllw:pslld:psllq) qword form, by `imm8`
    Psllq, psllq
);
trait2!(
    /// [`pslldq`](https://www.felixcloutier.com/x86/pslldq)
    Pslldq, pslldq
);
trait2!(
    /// [`psrlw`](https://www.felixcloutier.com/x86/psrlw:psrld:psrlq) word form, by `imm8`
    Psrlw, psrlw
);
trait2!(
    /// [`psrlq`](https://www.felixcloutier.com/x86/psrlw:psrld:psrlq) qword form, by `imm8`
    Psrlq, psrlq
);
trait2!(
    /// [`psrldq`](https://www.felixcloutier.com/x86/psrldq)
    Psrldq, psrldq
);
trait2!(
    /// [`psraw`](https://www.felixcloutier.com/x86/psraw:psrad) word form, by `imm8`
    Psraw, psraw
);
trait2!(
    /// [`punpcklwd`](https://www.felixcloutier.com/x86/punpcklbw:punpcklwd:punpckldq:punpcklqdq) low-lane unpack, word form
    Punpcklwd, punpcklwd
);
trait2!(
    /// [`punpckldq`](https://www.felixcloutier.com/x86/punpcklbw:punpcklwd:punpckldq:punpcklqdq) low-lane unpack, dword form
    Punpckldq, punpckldq
);
trait2!(
    /// [`punpcklqdq`](https://www.felixcloutier.com/x86/punpcklqdq)
    Punpcklqdq, punpcklqdq
);
trait2!(
    /// [`punpckhbw`](https://www.felixcloutier.com/x86/punpckhbw:punpckhwd:punpckhdq:punpckhqdq) high-lane unpack, byte form
    Punpckhbw, punpckhbw
);
trait2!(
    /// [`punpckhwd`](https://www.felixcloutier.com/x86/punpckhbw:punpckhwd:punpckhdq:punpckhqdq) high-lane unpack, word form
    Punpckhwd, punpckhwd
);
trait2!(
    /// [`punpckhdq`](https://www.felixcloutier.com/x86/punpckhbw:punpckhwd:punpckhdq:punpckhqdq) high-lane unpack, dword form
    Punpckhdq, punpckhdq
);
trait2!(
    /// [`packsswb`](https://www.felixcloutier.com/x86/packsswb:packssdw)
    Packsswb, packsswb
);
trait2!(
    /// [`packssdw`](https://www.felixcloutier.com/x86/packsswb:packssdw)
    Packssdw, packssdw
);
trait2!(
    /// [`packuswb`](https://www.felixcloutier.com/x86/packuswb)
    Packuswb, packuswb
);
trait2!(
    /// [`packusdw`](https://www.felixcloutier.com/x86/packusdw) (SSE4.1)
    Packusdw, packusdw
);
trait2!(
    /// [`pabsw`](https://www.felixcloutier.com/x86/pabsb:pabsw:pabsd) word form
    Pabsw, pabsw
);
trait2!(
    /// [`pabsd`](https://www.felixcloutier.com/x86/pabsb:pabsw:pabsd) dword form
    Pabsd, pabsd
);
trait3!(
    /// [`pshuflw`](https://www.felixcloutier.com/x86/pshuflw)
    Pshuflw, pshuflw
);
trait3!(
    /// [`pshufhw`](https://www.felixcloutier.com/x86/pshufhw)
    Pshufhw, pshufhw
);

// -- AVX (VEX) --

trait3!(
    /// [`vaddps`](https://www.felixcloutier.com/x86/addps) VEX-encoded, xmm/ymm
    Vaddps, vaddps
);
trait3!(
    /// [`vsubps`](https://www.felixcloutier.com/x86/subps) VEX-encoded, xmm/ymm
    Vsubps, vsubps
);
trait3!(
    /// [`vmulps`](https://www.felixcloutier.com/x86/mulps) VEX-encoded, xmm/ymm
    Vmulps, vmulps
);
trait3!(
    /// [`vdivps`](https://www.felixcloutier.com/x86/divps) VEX-encoded, xmm/ymm
    Vdivps, vdivps
);
trait3!(
    /// [`vandps`](https://www.felixcloutier.com/x86/andps) VEX-encoded, xmm/ymm
    Vandps, vandps
);
trait3!(
    /// [`vxorps`](https://www.felixcloutier.com/x86/xorps) VEX-encoded, xmm/ymm
    Vxorps, vxorps
);
trait3!(
    /// [`vpxor`](https://www.felixcloutier.com/x86/pxor) VEX-encoded, xmm/ymm
    Vpxor, vpxor
);
trait3!(
    /// [`vpand`](https://www.felixcloutier.com/x86/pand) VEX-encoded, xmm/ymm
    Vpand, vpand
);
trait3!(
    /// [`vpaddd`](https://www.felixcloutier.com/x86/paddb:paddw:paddd) VEX-encoded, xmm/ymm
    Vpaddd, vpaddd
);
trait2!(
    /// [`vmovaps`](https://www.felixcloutier.com/x86/movaps) VEX-encoded 2-operand load/store
    Vmovaps, vmovaps
);
trait2!(
    /// [`vmovdqu`](https://www.felixcloutier.com/x86/movdqu:vmovdqu8:vmovdqu16:vmovdqu32:vmovdqu64) VEX-encoded 2-operand load/store
    Vmovdqu, vmovdqu
);
trait3!(
    /// [`vshufps`](https://www.felixcloutier.com/x86/shufps) VEX-encoded, opcode map `0F` (not `0F3A`, see `DESIGN.md`)
    Vshufps, vshufps
);
trait2!(
    /// [`vbroadcastss`](https://www.felixcloutier.com/x86/broadcastss:vbroadcastsd:vbroadcastf128:vbroadcastf32x2:vbroadcastf32x4:vbroadcastf32x8:vbroadcastf64x2:vbroadcastf64x4)
    Vbroadcastss, vbroadcastss
);
trait2!(
    /// [`vpbroadcastd`](https://www.felixcloutier.com/x86/pbroadcastb:pbroadcastw:pbroadcastd:pbroadcastq)
    Vpbroadcastd, vpbroadcastd
);
trait3!(
    /// [`vpermilps`](https://www.felixcloutier.com/x86/permilps:vpermilpd)
    Vpermilps, vpermilps
);
trait3!(
    /// [`vperm2i128`](https://www.felixcloutier.com/x86/perm2i128) (and the `vperm2f128` float counterpart)
    Vperm2i128, vperm2i128
);
trait3!(
    /// [`vinsertf128`](https://www.felixcloutier.com/x86/insertf128:vinserti128)
    Vinsertf128, vinsertf128
);
trait3!(
    /// [`vextractf128`](https://www.felixcloutier.com/x86/extractf128:vextracti128)
    Vextractf128, vextractf128
);
trait3!(
    /// [`vgatherdps`](https://www.felixcloutier.com/x86/vgatherdps:vgatherqps:vgatherdpd:vgatherqpd) VSIB gather
    Vgatherdps, vgatherdps
);
trait0!(
    /// [`vzeroupper`](https://www.felixcloutier.com/x86/zeroall:vzeroupper)
    Vzeroupper, vzeroupper
);
trait0!(
    /// [`vzeroall`](https://www.felixcloutier.com/x86/zeroall:vzeroupper)
    Vzeroall, vzeroall
);
trait3!(
    /// [`vfmadd231sd`](https://www.felixcloutier.com/x86/vfmadd132sd:vfmadd213sd:vfmadd231sd)
    Vfmadd231sd, vfmadd231sd
);
trait3!(
    /// [`vfmadd231ps`](https://www.felixcloutier.com/x86/vfmadd132ps:vfmadd213ps:vfmadd231ps)
    Vfmadd231ps, vfmadd231ps
);
trait3!(
    /// [`vfmadd132sd`](https://www.felixcloutier.com/x86/vfmadd132sd:vfmadd213sd:vfmadd231sd) (template for the other FMA132 forms)
    Vfmadd132sd, vfmadd132sd
);
trait2!(
    /// [`vmovd`](https://www.felixcloutier.com/x86/movd:movq) VEX-encoded, 32-bit GP/mem <-> xmm
    Vmovd, vmovd
);
trait2!(
    /// [`vmovq`](https://www.felixcloutier.com/x86/movd:movq) VEX-encoded, 64-bit GP/mem <-> xmm, or xmm-xmm
    Vmovq, vmovq
);
trait3!(
    /// [`vpermd`](https://www.felixcloutier.com/x86/permd:vpermw) ymm-only lane permute
    Vpermd, vpermd
);
trait3!(
    /// [`vpermq`](https://www.felixcloutier.com/x86/permq:vpermpd) ymm-only lane permute by `imm8`
    Vpermq, vpermq
);
trait3!(
    /// [`vperm2f128`](https://www.felixcloutier.com/x86/perm2f128)
    Vperm2f128, vperm2f128
);
trait3!(
    /// [`vinserti128`](https://www.felixcloutier.com/x86/insertf128:vinserti128)
    Vinserti128, vinserti128
);
trait3!(
    /// [`vextracti128`](https://www.felixcloutier.com/x86/extractf128:vextracti128)
    Vextracti128, vextracti128
);
trait3!(
    /// [`vpmaskmovd`](https://www.felixcloutier.com/x86/maskmovdqu:vpmaskmov) masked load, dst/mask/mem
    Vpmaskmovd, vpmaskmovd
);
trait3!(
    /// [`vgatherqps`](https://www.felixcloutier.com/x86/vgatherdps:vgatherqps:vgatherdpd:vgatherqpd) VSIB gather, qword index
    Vgatherqps, vgatherqps
);
trait3!(
    /// [`vgatherdpd`](https://www.felixcloutier.com/x86/vgatherdps:vgatherqps:vgatherdpd:vgatherqpd) VSIB gather, dword index
    Vgatherdpd, vgatherdpd
);
trait3!(
    /// [`vgatherqpd`](https://www.felixcloutier.com/x86/vgatherdps:vgatherqps:vgatherdpd:vgatherqpd) VSIB gather, qword index
    Vgatherqpd, vgatherqpd
);
trait3!(
    /// [`vshufpd`](https://www.felixcloutier.com/x86/shufpd) VEX-encoded
    Vshufpd, vshufpd
);

// -- AVX-512 (EVEX) --

trait2!(
    /// [`vmovups`](https://www.felixcloutier.com/x86/movups) EVEX zmm form, optional `{k}{z}`
    VmovupsZ, vmovups_z
);
trait2!(
    /// [`vmovdqu32`](https://www.felixcloutier.com/x86/movdqu:vmovdqu8:vmovdqu16:vmovdqu32:vmovdqu64) EVEX zmm form
    Vmovdqu32Z, vmovdqu32_z
);
trait3!(
    /// [`vaddps`](https://www.felixcloutier.com/x86/addps) EVEX zmm form, optional `{k}{z}`
    VaddpsZ, vaddps_z
);
trait3!(
    /// [`vpaddd`](https://www.felixcloutier.com/x86/paddb:paddw:paddd) EVEX zmm form with mask
    VpadddZ, vpaddd_z
);
trait3!(
    /// [`vpxord`](https://www.felixcloutier.com/x86/pxor) EVEX zmm form
    VpxordZ, vpxord_z
);
trait3!(
    /// [`vxorps`](https://www.felixcloutier.com/x86/xorps) EVEX zmm form
    VxorpsZ, vxorps_z
);
trait3!(
    /// [`vpternlogd`](https://www.felixcloutier.com/x86/vpternlogd:vpternlogq) ternary bitwise logic
    Vpternlogd, vpternlogd
);
trait2!(
    /// [`vcvttps2dq`](https://www.felixcloutier.com/x86/cvttps2dq) EVEX zmm form
    Vcvttps2dqZ, vcvttps2dq_z
);
trait2!(
    /// [`vcvtdq2ps`](https://www.felixcloutier.com/x86/cvtdq2ps) EVEX zmm form
    Vcvtdq2psZ, vcvtdq2ps_z
);
trait2!(
    /// [`kmovw`](https://www.felixcloutier.com/x86/kmovw:kmovq:kmovb:kmovd) k <-> GP
    Kmovw, kmovw
);
trait2!(
    /// [`kmovw`](https://www.felixcloutier.com/x86/kmovw:kmovq:kmovb:kmovd) k,k form
    KmovwKk, kmovw_kk
);
trait2!(
    /// [`kmovd`](https://www.felixcloutier.com/x86/kmovw:kmovq:kmovb:kmovd) k <-> 32-bit GP
    Kmovd, kmovd
);
trait2!(
    /// [`kmovq`](https://www.felixcloutier.com/x86/kmovw:kmovq:kmovb:kmovd) k <-> 64-bit GP
    Kmovq, kmovq
);
trait3!(
    /// [`vaddpd`](https://www.felixcloutier.com/x86/addpd) EVEX zmm form
    VaddpdZ, vaddpd_z
);
trait3!(
    /// [`vxorpd`](https://www.felixcloutier.com/x86/xorpd) EVEX zmm form
    VxorpdZ, vxorpd_z
);
trait3!(
    /// [`vpandd`](https://www.felixcloutier.com/x86/pand) EVEX zmm form, dword
    VpanddZ, vpandd_z
);
trait3!(
    /// [`vpandq`](https://www.felixcloutier.com/x86/pand) EVEX zmm form, qword
    VpandqZ, vpandq_z
);
trait3!(
    /// [`vpord`](https://www.felixcloutier.com/x86/por) EVEX zmm form, dword
    VpordZ, vpord_z
);
trait3!(
    /// [`vporq`](https://www.felixcloutier.com/x86/por) EVEX zmm form, qword
    VporqZ, vporq_z
);
trait3!(
    /// [`vpxorq`](https://www.felixcloutier.com/x86/pxor) EVEX zmm form, qword
    VpxorqZ, vpxorq_z
);
trait2!(
    /// [`vcvtps2pd`](https://www.felixcloutier.com/x86/cvtps2pd) EVEX widening, ymm -> zmm
    Vcvtps2pdZ, vcvtps2pd_z
);
trait2!(
    /// [`vcvtpd2ps`](https://www.felixcloutier.com/x86/cvtpd2ps) EVEX narrowing, zmm -> ymm
    Vcvtpd2psZ, vcvtpd2ps_z
);

// -- AES-NI --

trait2!(
    /// [`aesenc`](https://www.felixcloutier.com/x86/aesenc)
    Aesenc, aesenc
);
trait2!(
    /// [`aesenclast`](https://www.felixcloutier.com/x86/aesenclast)
    Aesenclast, aesenclast
);
trait2!(
    /// [`aesdec`](https://www.felixcloutier.com/x86/aesdec)
    Aesdec, aesdec
);
trait2!(
    /// [`aesdeclast`](https://www.felixcloutier.com/x86/aesdeclast)
    Aesdeclast, aesdeclast
);
trait2!(
    /// [`aesimc`](https://www.felixcloutier.com/x86/aesimc)
    Aesimc, aesimc
);
trait3!(
    /// [`aeskeygenassist`](https://www.felixcloutier.com/x86/aeskeygenassist)
    Aeskeygenassist, aeskeygenassist
);

// -- SHA --

trait3!(
    /// [`sha1rnds4`](https://www.felixcloutier.com/x86/sha1rnds4)
    Sha1rnds4, sha1rnds4
);
trait2!(
    /// [`sha1nexte`](https://www.felixcloutier.com/x86/sha1nexte)
    Sha1nexte, sha1nexte
);
trait2!(
    /// [`sha1msg1`](https://www.felixcloutier.com/x86/sha1msg1)
    Sha1msg1, sha1msg1
);
trait2!(
    /// [`sha1msg2`](https://www.felixcloutier.com/x86/sha1msg2)
    Sha1msg2, sha1msg2
);
trait2!(
    /// [`sha256rnds2`](https://www.felixcloutier.com/x86/sha256rnds2) (implicit `xmm0` round-constant operand)
    Sha256rnds2, sha256rnds2
);
trait2!(
    /// [`sha256msg1`](https://www.felixcloutier.com/x86/sha256msg1)
    Sha256msg1, sha256msg1
);
trait2!(
    /// [`sha256msg2`](https://www.felixcloutier.com/x86/sha256msg2)
    Sha256msg2, sha256msg2
);
