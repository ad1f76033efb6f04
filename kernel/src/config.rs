//! Machine layout and monitor tunables.
//!
//! Everything here is fixed at build time; the monitor keeps no persistent
//! configuration.

/// Base address of device 0. Device `i` lives at `DEVICE_BASE + i * DEVICE_STRIDE`.
pub const DEVICE_BASE: usize = 0x8000_0000;

/// Distance between consecutive device register windows.
pub const DEVICE_STRIDE: usize = 0x1000;

/// Device index of the terminal (stdin/stdout).
pub const TERMINAL_DEVICE: u32 = 0;

/// Capacity of the interrupt-fed line buffer, in bytes.
pub const LINE_CAPACITY: usize = 128;

/// Address touched by the deferred fault probe (`test` command).
/// Nothing is mapped there, so the access faults.
pub const FAULT_PROBE_ADDR: usize = 0x0100_0000;

/// Text printed after the instruction counter on every prompt.
pub const PROMPT: &str = "emcpu $ ";

// A completed line needs at least its two terminating newlines.
static_assertions::const_assert!(LINE_CAPACITY >= 2);
