//! Underlying anonymous-mapping primitive.
//!
//! The allocator's only OS interaction: one private, zero-initialized,
//! read-write anonymous mapping per arena. There is no unmap path; arenas
//! stay mapped until process exit.

use cfg_if::cfg_if;

/// Obtains a zero-initialized private anonymous mapping of `len` bytes.
///
/// A mapping failure is fatal: one line to stderr, then the process exits.
pub(crate) fn map_anonymous(len: usize) -> *mut u8 {
    let ptr = unsafe { os_map(len) };
    if ptr.is_null() {
        eprintln!("fitalloc: anonymous mapping of {len} bytes failed");
        std::process::exit(1);
    }
    ptr
}

cfg_if! {
    if #[cfg(unix)] {
        /// # Safety
        ///
        /// Safe if `len` is a valid mapping size for the platform.
        unsafe fn os_map(len: usize) -> *mut u8 {
            let ptr = libc::mmap(
                core::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            );
            if ptr == libc::MAP_FAILED {
                core::ptr::null_mut()
            } else {
                ptr as *mut u8
            }
        }
    } else if #[cfg(windows)] {
        /// # Safety
        ///
        /// Safe if `len` is a valid mapping size for the platform.
        unsafe fn os_map(len: usize) -> *mut u8 {
            use winapi::um::memoryapi::VirtualAlloc;
            use winapi::um::winnt::{MEM_COMMIT, MEM_RESERVE, PAGE_READWRITE};

            VirtualAlloc(core::ptr::null_mut(), len, MEM_RESERVE | MEM_COMMIT, PAGE_READWRITE)
                as *mut u8
        }
    }
}
