//! A simple runtime which can be used to execute emitted instructions.

use core::ffi::c_void;
use nix::sys::mman::{mmap, mprotect, munmap, MapFlags, ProtFlags};
use nix::unistd::{sysconf, SysconfVar};

/// A simple `mmap`ed runtime with executable pages.
///
/// This is a convenience for demos and tests, not a production JIT page allocator: it maps exactly
/// enough pages for one code blob, up front, and never grows, shrinks, or reuses them.
pub struct Runtime {
    buf: *mut c_void,
    len: usize,
    code_len: usize,
}

fn page_size() -> usize {
    sysconf(SysconfVar::PAGE_SIZE)
        .ok()
        .flatten()
        .map(|v| v as usize)
        .unwrap_or(4096)
}

fn round_up_to_page(n: usize, page: usize) -> usize {
    if n == 0 {
        page
    } else {
        (n + page - 1) / page * page
    }
}

impl Runtime {
    /// Create a new [Runtime], mapping as many pages as `code` requires (rounded up).
    pub fn new(code: impl AsRef<[u8]>) -> Runtime {
        let code = code.as_ref();
        let page = page_size();
        let len = core::num::NonZeroUsize::new(round_up_to_page(code.len(), page)).unwrap();
        let buf = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_WRITE,
                MapFlags::MAP_PRIVATE | MapFlags::MAP_ANONYMOUS,
                0, /* fd */
                0, /* off */
            )
            .unwrap()
        };
        unsafe { std::ptr::copy_nonoverlapping(code.as_ptr(), buf.cast(), code.len()) };
        unsafe {
            // Remove write permissions from code buffer and allow to read-execute from it.
            mprotect(buf, len.get(), ProtFlags::PROT_READ | ProtFlags::PROT_EXEC)
                .expect("Failed to RX mprotect Runtime code buffer");
        }

        log::debug!("runtime: mapped {} byte(s) ({} page(s))", len.get(), len.get() / page);

        Runtime {
            buf,
            len: len.get(),
            code_len: code.len(),
        }
    }

    /// Reinterpret the block of code as `F`.
    #[inline]
    pub unsafe fn as_fn<F>(&self) -> F {
        unsafe { std::mem::transmute_copy(&self.buf) }
    }

    /// Disassemble the mapped code with `ndisasm`, best-effort (see [`crate::disasm`]). Only the
    /// bytes originally copied in are shown, not the page-rounding padding.
    pub fn disasm(&self) {
        let code = unsafe { std::slice::from_raw_parts(self.buf.cast::<u8>(), self.code_len) };
        crate::disasm::disasm(code);
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        unsafe {
            munmap(self.buf, self.len).expect("Failed to munmap Runtime");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_page_boundary() {
        assert_eq!(round_up_to_page(1, 4096), 4096);
        assert_eq!(round_up_to_page(4096, 4096), 4096);
        assert_eq!(round_up_to_page(4097, 4096), 8192);
        assert_eq!(round_up_to_page(0, 4096), 4096);
    }
}
