//! RV32 machine-mode support.
//!
//! This module provides:
//! - CSR access macros and bit layouts
//! - The trap vector (`trap_entry`) and its installation
//! - `RiscvHart`, the hardware implementation of `Hart`
pub mod csr;

#[cfg(target_arch = "riscv32")]
pub mod hart;
#[cfg(target_arch = "riscv32")]
pub mod trap;

#[cfg(target_arch = "riscv32")]
pub use hart::RiscvHart;

/// Read a CSR.
#[cfg(target_arch = "riscv32")]
macro_rules! csr_read {
    ($csr:literal) => {{
        let value: usize;
        unsafe {
            core::arch::asm!(concat!("csrr {0}, ", $csr), out(reg) value, options(nomem, nostack));
        }
        value
    }};
}

/// Write a CSR.
#[cfg(target_arch = "riscv32")]
macro_rules! csr_write {
    ($csr:literal, $value:expr) => {{
        let value: usize = $value;
        unsafe {
            core::arch::asm!(concat!("csrw ", $csr, ", {0}"), in(reg) value, options(nostack));
        }
    }};
}

/// Set bits in a CSR, returning its previous value.
#[cfg(target_arch = "riscv32")]
macro_rules! csr_set {
    ($csr:literal, $mask:expr) => {{
        let mask: usize = $mask;
        let prev: usize;
        unsafe {
            core::arch::asm!(concat!("csrrs {0}, ", $csr, ", {1}"), out(reg) prev, in(reg) mask, options(nostack));
        }
        prev
    }};
}

/// Clear bits in a CSR, returning its previous value.
#[cfg(target_arch = "riscv32")]
macro_rules! csr_clear {
    ($csr:literal, $mask:expr) => {{
        let mask: usize = $mask;
        let prev: usize;
        unsafe {
            core::arch::asm!(concat!("csrrc {0}, ", $csr, ", {1}"), out(reg) prev, in(reg) mask, options(nostack));
        }
        prev
    }};
}

#[cfg(target_arch = "riscv32")]
pub(crate) use {csr_clear, csr_read, csr_set, csr_write};

/// Wait for interrupt.
#[cfg(target_arch = "riscv32")]
#[inline(always)]
pub fn wfi() {
    unsafe { core::arch::asm!("wfi", options(nomem, nostack)); }
}

/// Install the trap vector, unmask every interrupt source, and enable
/// interrupts globally.
///
/// # Safety
/// Called once during boot, after `.bss` is cleared and before anything
/// relies on input.
#[cfg(target_arch = "riscv32")]
pub unsafe fn init() {
    trap::install();
    csr_write!("mie", csr::Mie::everything().bits());
    csr_set!("mstatus", csr::Mstatus::MIE.bits());
}
