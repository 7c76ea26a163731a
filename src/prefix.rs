//! Pure prefix formatting: legacy operand/address-size and mandatory bytes, REX, 2- and 3-byte VEX,
//! and 4-byte EVEX. Every function here is a pure `(bits) -> bytes` mapping; none of them decide
//! *whether* a given prefix applies. That choice belongs to the instruction family, made from the
//! opcode template and the concrete operand shapes it was handed.

/// Opcode-escape map, encoded as VEX/EVEX `mmmmm`/`mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpMap {
    /// `0F`.
    M0f,
    /// `0F 38`.
    M0f38,
    /// `0F 3A`.
    M0f3a,
}

impl OpMap {
    fn vex_bits(self) -> u8 {
        match self {
            OpMap::M0f => 0b00001,
            OpMap::M0f38 => 0b00010,
            OpMap::M0f3a => 0b00011,
        }
    }
}

/// Mandatory SSE-style legacy prefix folded into VEX/EVEX `pp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MandatoryPrefix {
    None,
    P66,
    PF3,
    PF2,
}

impl MandatoryPrefix {
    pub(crate) fn legacy_byte(self) -> Option<u8> {
        match self {
            MandatoryPrefix::None => None,
            MandatoryPrefix::P66 => Some(0x66),
            MandatoryPrefix::PF3 => Some(0xf3),
            MandatoryPrefix::PF2 => Some(0xf2),
        }
    }

    fn pp_bits(self) -> u8 {
        match self {
            MandatoryPrefix::None => 0b00,
            MandatoryPrefix::P66 => 0b01,
            MandatoryPrefix::PF3 => 0b10,
            MandatoryPrefix::PF2 => 0b11,
        }
    }
}

/// `0x66`: 16-bit operand size inside a 32-bit-default opcode context.
pub(crate) const OPERAND_SIZE_OVERRIDE: u8 = 0x66;
/// `0x67`: address-size override, used when a memory operand's addressing registers do not match
/// the session's natural address width.
pub(crate) const ADDRESS_SIZE_OVERRIDE: u8 = 0x67;
/// `0xf0`: `LOCK` prefix.
pub(crate) const LOCK: u8 = 0xf0;
/// `0xf2`/`0xf3`: used both as SSE mandatory prefixes and as legacy `REPNE`/`REP` prefixes on
/// string instructions.
pub(crate) const REPNE: u8 = 0xf2;
pub(crate) const REP: u8 = 0xf3;

/// Encode the REX byte: `0100WRXB`. Bit values are derived from the low bit-3 of each raw
/// register/memory index — only the caller needs to know *which* of W/R/X/B apply.
pub(crate) const fn rex(w: bool, r_idx: u8, x_idx: u8, b_idx: u8) -> u8 {
    let w = w as u8;
    let r = (r_idx >> 3) & 1;
    let x = (x_idx >> 3) & 1;
    let b = (b_idx >> 3) & 1;
    0b0100_0000 | (w << 3) | (r << 2) | (x << 1) | b
}

/// 2-byte VEX (`C5`): usable exactly when REX.X and REX.B would both be zero, the opcode map is
/// `0F`, and `W` is zero.
pub(crate) fn vex2(r_ext: bool, vvvv: u8, vex_l: bool, pp: MandatoryPrefix) -> [u8; 2] {
    let r = !r_ext as u8;
    let vvvv_inv = (!vvvv) & 0b1111;
    let l = vex_l as u8;
    let byte1 = (r << 7) | (vvvv_inv << 3) | (l << 2) | pp.pp_bits();
    [0xc5, byte1]
}

/// 3-byte VEX (`C4`).
pub(crate) fn vex3(
    r_ext: bool,
    x_ext: bool,
    b_ext: bool,
    map: OpMap,
    w: bool,
    vvvv: u8,
    vex_l: bool,
    pp: MandatoryPrefix,
) -> [u8; 3] {
    let r = !r_ext as u8;
    let x = !x_ext as u8;
    let b = !b_ext as u8;
    let byte1 = (r << 7) | (x << 6) | (b << 5) | map.vex_bits();
    let vvvv_inv = (!vvvv) & 0b1111;
    let l = vex_l as u8;
    let byte2 = ((w as u8) << 7) | (vvvv_inv << 3) | (l << 2) | pp.pp_bits();
    [0xc4, byte1, byte2]
}

/// Vector length for EVEX.L'L (also reused to select VEX.L for 256-bit forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VecLen {
    L128,
    L256,
    L512,
}

impl VecLen {
    fn evex_ll_bits(self) -> u8 {
        match self {
            VecLen::L128 => 0b00,
            VecLen::L256 => 0b01,
            VecLen::L512 => 0b10,
        }
    }

    pub(crate) fn vex_l_bit(self) -> bool {
        matches!(self, VecLen::L256)
    }
}

/// Everything the 4-byte EVEX prefix needs, gathered so the call site reads as one table row
/// instead of nine positional booleans.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EvexFields {
    pub r_ext: bool,
    pub x_ext: bool,
    pub b_ext: bool,
    /// High-16 extension of ModR/M.reg (EVEX.R').
    pub r_prime: bool,
    pub map: OpMap,
    pub w: bool,
    pub vvvv: u8,
    pub pp: MandatoryPrefix,
    pub zeroing: bool,
    pub len: VecLen,
    /// Embedded broadcast / static rounding / SAE control bit.
    pub broadcast_or_round: bool,
    /// High bit of `vvvv` (EVEX.V'), used for vector registers 16..31 in the source operand and
    /// for the high bit of a VSIB vector index.
    pub v_prime: bool,
    /// Opmask register 0..7; 0 means "no masking".
    pub aaa: u8,
}

/// 4-byte EVEX (`62`).
pub(crate) fn evex(f: EvexFields) -> [u8; 4] {
    let p0 = 0x62;
    let p1 = ((!f.r_ext as u8) << 7)
        | ((!f.x_ext as u8) << 6)
        | ((!f.b_ext as u8) << 5)
        | ((!f.r_prime as u8) << 4)
        | f.map.vex_bits() & 0b11;
    let vvvv_inv = (!f.vvvv) & 0b1111;
    let p2 = ((f.w as u8) << 7) | (vvvv_inv << 3) | (1 << 2) | f.pp.pp_bits();
    let p3 = ((f.zeroing as u8) << 7)
        | (f.len.evex_ll_bits() << 5)
        | ((f.broadcast_or_round as u8) << 4)
        | ((!f.v_prime as u8) << 3)
        | (f.aaa & 0b111);
    [p0, p1, p2, p3]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rex_byte_shape() {
        assert_eq!(rex(true, 0, 0, 0), 0x48);
        assert_eq!(rex(false, 0, 0, 0), 0x40);
    }

    #[test]
    fn vex2_vxorps_xmm1_xmm1_xmm1() {
        // `vxorps xmm1, xmm1, xmm1` -> C5 F0 57 C9
        let bytes = vex2(false, 1 /* xmm1 as vvvv */, false, MandatoryPrefix::None);
        assert_eq!(bytes, [0xc5, 0xf0]);
    }

    #[test]
    fn evex_vaddps_zmm1_zmm2_zmm3() {
        // `vaddps zmm1, zmm2, zmm3` -> 62 F1 6C 48 58 CB
        let bytes = evex(EvexFields {
            r_ext: false,
            x_ext: false,
            b_ext: false,
            r_prime: false,
            map: OpMap::M0f,
            w: false,
            vvvv: 2,
            pp: MandatoryPrefix::None,
            zeroing: false,
            len: VecLen::L512,
            broadcast_or_round: false,
            v_prime: false,
            aaa: 0,
        });
        assert_eq!(bytes, [0x62, 0xf1, 0x6c, 0x48]);
    }
}
