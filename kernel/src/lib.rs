#![cfg_attr(not(test), no_std)]
//! emcpu monitor: a bare-metal trap handler and command shell for the emcpu
//! RV32 machine.
//!
//! Hardware-independent pieces (trap decoding, the line buffer, the main
//! loop, commands) build and test on the host; `arch::riscv` supplies the
//! real hart on riscv32 targets.

pub mod arch;
pub mod config;
pub mod device;
pub mod hart;
pub mod monitor;
pub mod sync;
pub mod trap;

#[cfg(test)]
pub mod mock;
