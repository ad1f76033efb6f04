#![cfg_attr(not(test), no_std)]
//! Reset vector for the emcpu monitor.
//!
//! The hart comes out of reset at `_start` with nothing set up. This crate:
//! 1. Points `gp` and `sp` at the linker-provided global pointer and stack top
//! 2. Zeroes `.bss` (`__bss_start`..`_end`)
//! 3. Jumps to the kernel's `kmain`, which never returns

/// Zero every word in `[start, end)`.
///
/// Volatile stores keep the compiler from turning this into a `memset` call
/// before the runtime is in a state to make one.
///
/// # Safety
/// `start..end` must be a writable, word-aligned region not in use by
/// anything else (in particular not the current stack).
pub unsafe fn zero_region(start: *mut u32, end: *mut u32) {
    let mut p = start;
    while p < end {
        p.write_volatile(0);
        p = p.add(1);
    }
}

#[cfg(target_arch = "riscv32")]
mod entry {
    extern "C" {
        static mut __bss_start: u32;
        static mut _end: u32;
    }

    extern "Rust" {
        /// Kernel entry, provided by the binary that links this crate.
        fn kmain() -> !;
    }

    core::arch::global_asm!(
        r#"
    .section .text.init, "ax"
    .global _start
_start:
    .option push
    .option norelax
    la gp, __global_pointer$
    .option pop
    la sp, _stack_top
    call _start_rust
1:
    wfi
    j 1b
"#
    );

    #[no_mangle]
    unsafe extern "C" fn _start_rust() -> ! {
        super::zero_region(
            core::ptr::addr_of_mut!(__bss_start),
            core::ptr::addr_of_mut!(_end),
        );
        kmain()
    }
}
