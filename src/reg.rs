//! Register operands: general-purpose (8/16/32/64 bit), vector (xmm/ymm/zmm), and opmask (k0-k7).
//!
//! The high-byte GP registers (`ah`/`ch`/`dh`/`bh`) are modeled as a distinct variant of [`Reg8`]
//! rather than a flag on a shared struct, so that "a high-byte register used where REX is forced" is
//! a shape the encoder can reject at its entry point instead of a runtime probe deep inside prefix
//! formatting.

#![allow(non_camel_case_types)]

/// Shared behaviour every register-operand kind exposes to the generic encoder helpers in
/// [`crate::asm`].
pub trait Reg: Copy {
    /// Low 3 bits used directly in ModR/M.rm, ModR/M.reg, the opcode's `+r` encoding, or SIB.base /
    /// SIB.index, depending on call site.
    fn low3(&self) -> u8;

    /// Full 0..15 (GP) / 0..31 (vector) register number, including the REX/EVEX extension bit(s).
    fn idx(&self) -> u8;

    /// Whether this register requires a REX prefix purely due to its own identity: either its
    /// index is >= 8 (needs REX.R/X/B), or it is one of SPL/BPL/SIL/DIL (needs a REX prefix, even
    /// an all-zero one, to be distinguished from AH/CH/DH/BH in ModR/M).
    fn need_rex(&self) -> bool;

    /// Whether encoding this register requires REX.W (only ever true for 64-bit GP registers).
    fn rexw(&self) -> bool {
        false
    }

    /// Whether this register's index is in the "extended" range needing a REX/VEX/EVEX extension
    /// bit (idx >= 8).
    fn is_ext(&self) -> bool {
        self.idx() >= 8
    }

    /// Whether this is one of the legacy high-byte GP registers (`ah`/`ch`/`dh`/`bh`), which can
    /// only ever be encoded in the *absence* of any REX prefix.
    fn is_high_byte(&self) -> bool {
        false
    }
}

macro_rules! gp_reg {
    ($name:ident, $rexw:expr, $( $variant:ident = $idx:expr ),+ $(,)?) => {
        /// General-purpose register operand.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Construct from a raw 0..15 index, e.g. when decoding operands from a generic
            /// dispatcher. Panics on an out-of-range index.
            pub fn from_index(idx: u8) -> $name {
                match idx {
                    $( $idx => $name::$variant, )+
                    _ => panic!("invalid {} index: {}", stringify!($name), idx),
                }
            }
        }

        impl Reg for $name {
            fn low3(&self) -> u8 {
                self.idx() & 0b111
            }

            fn idx(&self) -> u8 {
                match self {
                    $( $name::$variant => $idx, )+
                }
            }

            fn need_rex(&self) -> bool {
                self.idx() >= 8
            }

            fn rexw(&self) -> bool {
                $rexw
            }
        }
    };
}

gp_reg!(
    Reg64, true,
    rax = 0, rcx = 1, rdx = 2, rbx = 3, rsp = 4, rbp = 5, rsi = 6, rdi = 7,
    r8 = 8, r9 = 9, r10 = 10, r11 = 11, r12 = 12, r13 = 13, r14 = 14, r15 = 15,
);

gp_reg!(
    Reg32, false,
    eax = 0, ecx = 1, edx = 2, ebx = 3, esp = 4, ebp = 5, esi = 6, edi = 7,
    r8d = 8, r9d = 9, r10d = 10, r11d = 11, r12d = 12, r13d = 13, r14d = 14, r15d = 15,
);

gp_reg!(
    Reg16, false,
    ax = 0, cx = 1, dx = 2, bx = 3, sp = 4, bp = 5, si = 6, di = 7,
    r8w = 8, r9w = 9, r10w = 10, r11w = 11, r12w = 12, r13w = 13, r14w = 14, r15w = 15,
);

/// 8-bit general-purpose register.
///
/// `Low` covers `al`..`r15l`, including `spl`/`bpl`/`sil`/`dil` (idx 4..7) which require a REX
/// prefix to be distinguished from the legacy high-byte registers. `High` covers the four legacy
/// high-byte registers `ah`/`ch`/`dh`/`bh`, which can only be encoded in the *absence* of any REX
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg8 {
    al,
    cl,
    dl,
    bl,
    spl,
    bpl,
    sil,
    dil,
    r8l,
    r9l,
    r10l,
    r11l,
    r12l,
    r13l,
    r14l,
    r15l,
    ah,
    ch,
    dh,
    bh,
}

impl Reg8 {
    /// Whether this is one of the legacy high-byte registers (`ah`/`ch`/`dh`/`bh`).
    pub fn is_high_byte(&self) -> bool {
        matches!(self, Reg8::ah | Reg8::ch | Reg8::dh | Reg8::bh)
    }
}

impl Reg for Reg8 {
    fn low3(&self) -> u8 {
        self.idx() & 0b111
    }

    fn idx(&self) -> u8 {
        match self {
            Reg8::al => 0,
            Reg8::cl => 1,
            Reg8::dl => 2,
            Reg8::bl => 3,
            Reg8::spl => 4,
            Reg8::bpl => 5,
            Reg8::sil => 6,
            Reg8::dil => 7,
            Reg8::r8l => 8,
            Reg8::r9l => 9,
            Reg8::r10l => 10,
            Reg8::r11l => 11,
            Reg8::r12l => 12,
            Reg8::r13l => 13,
            Reg8::r14l => 14,
            Reg8::r15l => 15,
            // ah/ch/dh/bh occupy ModR/M encodings 4..7 precisely when no REX prefix is present;
            // need_rex() below ensures that is the only context they are ever used in.
            Reg8::ah => 4,
            Reg8::ch => 5,
            Reg8::dh => 6,
            Reg8::bh => 7,
        }
    }

    fn need_rex(&self) -> bool {
        match self {
            Reg8::spl | Reg8::bpl | Reg8::sil | Reg8::dil => true,
            Reg8::r8l
            | Reg8::r9l
            | Reg8::r10l
            | Reg8::r11l
            | Reg8::r12l
            | Reg8::r13l
            | Reg8::r14l
            | Reg8::r15l => true,
            _ => false,
        }
    }

    fn is_high_byte(&self) -> bool {
        Reg8::is_high_byte(self)
    }
}

/// Vector register width, driving VEX.L / EVEX.L'L and the natural operand size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VecWidth {
    /// 128-bit XMM.
    Xmm,
    /// 256-bit YMM.
    Ymm,
    /// 512-bit ZMM, only reachable via EVEX.
    Zmm,
}

/// A vector register operand (`xmm0`..`xmm31`, `ymm0`..`ymm31`, `zmm0`..`zmm31`).
///
/// Indices 16..31 ("high-16") can only be addressed via EVEX (the extra bit lives in EVEX.R'/X'/
/// V'); a VEX-only encoder must reject them with [`crate::error::AsmError::InvalidOperandKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VecReg {
    idx: u8,
    width: VecWidth,
}

impl VecReg {
    /// Construct an XMM register operand, `idx` in 0..31.
    pub fn xmm(idx: u8) -> VecReg {
        assert!(idx < 32, "xmm index out of range: {idx}");
        VecReg {
            idx,
            width: VecWidth::Xmm,
        }
    }

    /// Construct a YMM register operand, `idx` in 0..31.
    pub fn ymm(idx: u8) -> VecReg {
        assert!(idx < 32, "ymm index out of range: {idx}");
        VecReg {
            idx,
            width: VecWidth::Ymm,
        }
    }

    /// Construct a ZMM register operand, `idx` in 0..31.
    pub fn zmm(idx: u8) -> VecReg {
        assert!(idx < 32, "zmm index out of range: {idx}");
        VecReg {
            idx,
            width: VecWidth::Zmm,
        }
    }

    /// Vector width of this operand.
    pub fn width(&self) -> VecWidth {
        self.width
    }

    /// Whether this register lies in the high-16 range (16..31), reachable only via EVEX.
    pub fn is_high16(&self) -> bool {
        self.idx >= 16
    }
}

impl Reg for VecReg {
    fn low3(&self) -> u8 {
        self.idx & 0b111
    }

    fn idx(&self) -> u8 {
        self.idx
    }

    fn need_rex(&self) -> bool {
        self.idx >= 8 && self.idx < 16
    }
}

/// An AVX-512 opmask register, `k0`..`k7`. `k0` used as a predicate means "no masking".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskReg(u8);

impl MaskReg {
    /// Construct `k0`..`k7`.
    pub fn k(idx: u8) -> MaskReg {
        assert!(idx < 8, "mask register index out of range: {idx}");
        MaskReg(idx)
    }

    /// Raw 0..7 index.
    pub fn idx(&self) -> u8 {
        self.0
    }

    /// `k0`, which as a predicate operand means "no masking applied".
    pub fn none() -> MaskReg {
        MaskReg(0)
    }
}

impl Reg for MaskReg {
    fn low3(&self) -> u8 {
        self.0 & 0b111
    }

    fn idx(&self) -> u8 {
        self.0
    }

    fn need_rex(&self) -> bool {
        false
    }
}
