//! Trap cause decoding.
//!
//! `mcause` holds a signed value: non-negative for synchronous exceptions,
//! top bit set for interrupts with the interrupt number in the low bits.
//! Decoding is pure and total; codes without a handler decode to
//! `Unknown` / `Unrecognized`.
use core::fmt;

use crate::config::TERMINAL_DEVICE;

/// Exception codes.
pub const EXCP_INSN_ADDR_MISALIGNED: u32 = 0;
pub const EXCP_ILLEGAL_INSN: u32 = 2;
pub const EXCP_BREAKPOINT: u32 = 3;
pub const EXCP_LOAD_ACCESS_FAULT: u32 = 5;
pub const EXCP_STORE_AMO_ACCESS_FAULT: u32 = 7;

/// Set in `mcause` for interrupts.
pub const INTERRUPT_BIT: u32 = 1 << 31;

/// Interrupt numbers.
pub const IRQ_MACHINE_EXTERNAL: u32 = 11;
pub const IRQ_DEVICE_BASE: u32 = 16;

/// Interrupt number raised by device `index`.
pub const fn irq_device(index: u32) -> u32 {
    IRQ_DEVICE_BASE + index
}

/// Uncompressed `ebreak`. The hart emits exactly this word, never `c.ebreak`,
/// so a breakpoint always resumes `BREAKPOINT_LEN` bytes past `mepc`.
pub const EBREAK: u32 = 0x0010_0073;
pub const BREAKPOINT_LEN: usize = core::mem::size_of::<u32>();

// Low bits 0b11 mark a 32-bit instruction; anything else is compressed.
static_assertions::const_assert_eq!(EBREAK & 0b11, 0b11);
static_assertions::const_assert_eq!(BREAKPOINT_LEN, 4);

/// Raw `mcause` value.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct TrapCause(pub i32);

impl TrapCause {
    /// Cause from a register-width value (only the low 32 bits are architectural on emcpu).
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw as u32 as i32)
    }

    /// Cause value for interrupt number `irq`.
    pub const fn interrupt(irq: u32) -> Self {
        Self((INTERRUPT_BIT | irq) as i32)
    }

    /// Cause value for exception `code`.
    pub const fn exception(code: u32) -> Self {
        Self((code & !INTERRUPT_BIT) as i32)
    }

    pub const fn is_interrupt(self) -> bool {
        self.0 < 0
    }

    /// The cause with the interrupt bit masked off.
    pub const fn code(self) -> u32 {
        self.0 as u32 & !INTERRUPT_BIT
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrapCause({:#010x})", self.0 as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExceptionKind {
    InstructionAddressMisaligned,
    IllegalInstruction,
    Breakpoint,
    LoadAccessFault,
    StoreOrAtomicAccessFault,
    /// Any other exception code.
    Unknown(u32),
}

impl ExceptionKind {
    pub fn description(self) -> &'static str {
        match self {
            ExceptionKind::InstructionAddressMisaligned => "misaligned instruction address",
            ExceptionKind::IllegalInstruction => "illegal instruction",
            ExceptionKind::Breakpoint => "breakpoint",
            ExceptionKind::LoadAccessFault => "load access fault",
            ExceptionKind::StoreOrAtomicAccessFault => "store/amo access fault",
            ExceptionKind::Unknown(_) => "unknown exception",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptKind {
    /// Input is pending on the terminal device with this index.
    StdinReady(u32),
    /// Any other interrupt number.
    Unrecognized(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    Exception(ExceptionKind),
    Interrupt(InterruptKind),
}

impl Trap {
    /// Where execution continues after this trap is handled, or `None` if
    /// the trap is fatal.
    ///
    /// Breakpoints skip the 4-byte `ebreak`; interrupts resume in place.
    pub fn resume_pc(self, epc: usize) -> Option<usize> {
        match self {
            Trap::Exception(ExceptionKind::Breakpoint) => Some(epc.wrapping_add(BREAKPOINT_LEN)),
            Trap::Exception(_) => None,
            Trap::Interrupt(InterruptKind::StdinReady(_)) => Some(epc),
            Trap::Interrupt(InterruptKind::Unrecognized(_)) => None,
        }
    }
}

/// Decode a trap cause.
pub fn classify(cause: TrapCause) -> Trap {
    let code = cause.code();
    if cause.is_interrupt() {
        let kind = if code == irq_device(TERMINAL_DEVICE) {
            InterruptKind::StdinReady(TERMINAL_DEVICE)
        } else {
            InterruptKind::Unrecognized(code)
        };
        return Trap::Interrupt(kind);
    }

    let kind = match code {
        EXCP_INSN_ADDR_MISALIGNED => ExceptionKind::InstructionAddressMisaligned,
        EXCP_ILLEGAL_INSN => ExceptionKind::IllegalInstruction,
        EXCP_BREAKPOINT => ExceptionKind::Breakpoint,
        EXCP_LOAD_ACCESS_FAULT => ExceptionKind::LoadAccessFault,
        EXCP_STORE_AMO_ACCESS_FAULT => ExceptionKind::StoreOrAtomicAccessFault,
        other => ExceptionKind::Unknown(other),
    };
    Trap::Exception(kind)
}
