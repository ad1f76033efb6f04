//! Architecture support. emcpu is a single-hart RV32 machine running in
//! M-mode; only the CSR bit layouts are built on other targets.
pub mod riscv;
