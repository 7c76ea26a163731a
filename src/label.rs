//! Label identifiers and the fixup manager that resolves forward references at finalize.
//!
//! Architecture note: the manager owns every label's bind state and pending fixups by value,
//! indexed by a plain integer id. [`Label`] itself is just a handle — an arena index — not a
//! back-reference into the manager; this avoids the cyclic `Assembler`/`Label`/`Emitter` references
//! that a naive port of a JIT assembler tends to accumulate.

use crate::error::{AsmError, AsmResult};
use std::cell::Cell;

/// Relocation kind recorded for a pending fixup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FixupKind {
    /// 1-byte `rip`-relative displacement (short jump/call forms).
    Rel8,
    /// 4-byte `rip`-relative displacement (near jump/call forms).
    Rel32,
    /// 4-byte displacement of a RIP-relative memory operand; numerically identical to `Rel32`, the
    /// distance being measured from the byte following the displacement field either way.
    RipRel32,
    /// 4-byte absolute address, truncated to `u32`, plus `addend`.
    Abs32,
    /// 8-byte absolute address plus `addend`.
    Abs64,
}

impl FixupKind {
    /// Width, in bytes, of the placeholder this fixup kind patches.
    pub(crate) fn width(self) -> usize {
        match self {
            FixupKind::Rel8 => 1,
            FixupKind::Rel32 | FixupKind::RipRel32 | FixupKind::Abs32 => 4,
            FixupKind::Abs64 => 8,
        }
    }
}

/// A pending relocation: "patch the bytes at `at_offset` once `label` is known."
#[derive(Debug, Clone, Copy)]
struct Fixup {
    at_offset: usize,
    kind: FixupKind,
    addend: i64,
}

/// Opaque identifier for a [`Label`], as minted by [`LabelManager::new_label`].
pub(crate) type LabelId = usize;

/// A label which is used as the target of jump/call instructions or RIP-relative memory operands.
///
/// ```rust
/// use jitx86_asm::prelude::*;
///
/// let mut asm = Assembler::new(EmitOptions::default());
/// let lbl = asm.new_label();
///
/// // Skip the mov instruction.
/// asm.jmp(&lbl).unwrap();
/// asm.mov(Reg64::rax, Reg64::rax).unwrap();
/// asm.bind(&lbl).unwrap();
/// ```
///
/// # Panics
///
/// Panics if the label is dropped while not yet bound. This is a safety-guard to catch a label
/// that was created and referenced but never bound to a location, which would otherwise silently
/// leave dangling relocations in the finalized buffer.
pub struct Label {
    pub(crate) id: LabelId,
    bound: Cell<bool>,
}

impl Label {
    pub(crate) fn new(id: LabelId) -> Label {
        Label {
            id,
            bound: Cell::new(false),
        }
    }

    pub(crate) fn mark_bound(&self) {
        self.bound.set(true);
    }

    /// Whether this label has been bound to a location yet.
    pub fn is_bound(&self) -> bool {
        self.bound.get()
    }
}

impl Drop for Label {
    fn drop(&mut self) {
        // Skip the check while already unwinding (e.g. a `?`-propagated AsmError dropping a still-live
        // Label) so the original error surfaces instead of being masked by a panic-in-drop abort.
        if std::thread::panicking() {
            return;
        }
        assert!(
            self.bound.get(),
            "Label dropped while still unbound; call Assembler::bind first"
        );
    }
}

/// Per-label bookkeeping owned by the manager.
struct LabelState {
    location: Option<usize>,
    fixups: Vec<Fixup>,
}

/// Issues label ids, records bind offsets, and resolves pending fixups at finalize.
///
/// Exactly one `LabelManager` is owned by each [`crate::Assembler`] session, alongside its
/// [`crate::buffer::CodeBuffer`].
#[derive(Default)]
pub(crate) struct LabelManager {
    labels: Vec<LabelState>,
}

impl LabelManager {
    pub(crate) fn new() -> LabelManager {
        LabelManager { labels: Vec::new() }
    }

    /// Mint a new, unbound label id.
    pub(crate) fn new_label(&mut self) -> LabelId {
        self.labels.push(LabelState {
            location: None,
            fixups: Vec::new(),
        });
        self.labels.len() - 1
    }

    /// Bind `id` to `offset`. Fails with [`AsmError::LabelRebind`] if already bound.
    pub(crate) fn bind(&mut self, id: LabelId, offset: usize) -> AsmResult<()> {
        let state = &mut self.labels[id];
        if state.location.is_some() {
            return Err(AsmError::LabelRebind);
        }
        state.location = Some(offset);
        log::trace!("label {id} bound at offset {offset}");
        Ok(())
    }

    /// Record a fixup against `id`: "once `id` is bound, patch the bytes at `at_offset`."
    ///
    /// A fixup against an already-bound label could be resolved immediately instead of deferred;
    /// the two strategies are externally indistinguishable (same final bytes), so this manager
    /// always defers to `resolve_all` for a single, uniform code path.
    pub(crate) fn add_fixup(&mut self, id: LabelId, at_offset: usize, kind: FixupKind, addend: i64) {
        self.labels[id].fixups.push(Fixup {
            at_offset,
            kind,
            addend,
        });
    }

    pub(crate) fn location_of(&self, id: LabelId) -> Option<usize> {
        self.labels[id].location
    }

    /// Every bound label as `(id, offset)`, handed to the caller through [`crate::FinalizedCode`]
    /// after a successful finalize.
    pub(crate) fn exported_offsets(&self) -> Vec<(LabelId, usize)> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.location.map(|loc| (id, loc)))
            .collect()
    }

    /// Resolve every pending fixup against its (now hopefully bound) label and patch `buffer`.
    ///
    /// Reports the first unbound label as [`AsmError::LabelUnbound`] or the first out-of-range
    /// displacement as [`AsmError::DisplacementOverflow`]; otherwise side-effect-free aside from the
    /// patches themselves.
    pub(crate) fn resolve_all(&mut self, buffer: &mut crate::buffer::CodeBuffer) -> AsmResult<()> {
        let mut patched = 0usize;
        for state in &mut self.labels {
            let Some(target) = state.location else {
                if !state.fixups.is_empty() {
                    return Err(AsmError::LabelUnbound);
                }
                continue;
            };

            for fixup in state.fixups.drain(..) {
                match fixup.kind {
                    FixupKind::Rel8 => {
                        let disp = target as i64 - (fixup.at_offset as i64 + 1);
                        let disp = i8::try_from(disp).map_err(|_| AsmError::DisplacementOverflow {
                            offset: fixup.at_offset,
                        })?;
                        buffer.patch_u8_at(fixup.at_offset, disp as u8);
                    }
                    FixupKind::Rel32 | FixupKind::RipRel32 => {
                        let disp = target as i64 - (fixup.at_offset as i64 + 4);
                        let disp = i32::try_from(disp).map_err(|_| AsmError::DisplacementOverflow {
                            offset: fixup.at_offset,
                        })?;
                        buffer.patch_u32_le_at(fixup.at_offset, disp as u32);
                    }
                    FixupKind::Abs32 => {
                        let val = target as i64 + fixup.addend;
                        buffer.patch_u32_le_at(fixup.at_offset, val as u32);
                    }
                    FixupKind::Abs64 => {
                        let val = (target as i64 + fixup.addend) as u64;
                        let bytes = val.to_le_bytes();
                        for (i, b) in bytes.iter().enumerate() {
                            buffer.patch_u8_at(fixup.at_offset + i, *b);
                        }
                    }
                }
                patched += 1;
            }
        }
        log::debug!("finalize: resolved {patched} fixup(s)");
        Ok(())
    }
}
