//! Trap handling.
//!
//! Every trap lands in `TrapContext::entry` with delivery masked by hardware.
//! The cause is decoded, routed to the exception or interrupt handler, and
//! the returned resume address is written back by the caller. Handlers either
//! fully resolve the condition or report a `Fatal`, in which case the
//! diagnostic is printed once and the hart is parked.
use core::fmt::{self, Write};

pub mod cause;

pub use cause::{classify, ExceptionKind, InterruptKind, Trap, TrapCause};

use crate::device::{Console, Port};
use crate::hart::Hart;
use crate::monitor::line::LineBuffer;
use crate::sync::IrqMutex;

/// An unrecoverable trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    Exception {
        kind: ExceptionKind,
        tval: usize,
        epc: usize,
    },
    UnimplementedInterrupt(u32),
    /// Stdin interrupt taken while the foreground held the line buffer.
    InputBusy,
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fatal::Exception { kind, tval, epc } => {
                write!(f, "{}", kind.description())?;
                if let ExceptionKind::Unknown(code) = kind {
                    write!(f, " {}", code)?;
                }
                write!(f, " (mtval {:#x}, mepc {:#x})", tval, epc)
            }
            Fatal::UnimplementedInterrupt(irq) => write!(f, "unimplemented interrupt {}", irq),
            Fatal::InputBusy => write!(f, "stdin interrupt while line buffer locked"),
        }
    }
}

/// React to a synchronous exception.
///
/// Breakpoints are reported on `out` and resume past the `ebreak`. Everything
/// else is fatal.
pub fn handle_exception<W: Write>(
    kind: ExceptionKind,
    tval: usize,
    epc: usize,
    out: &mut W,
) -> Result<usize, Fatal> {
    match Trap::Exception(kind).resume_pc(epc) {
        Some(resume) => {
            let _ = writeln!(out, "{} at {:#x}", kind.description(), epc);
            Ok(resume)
        }
        None => Err(Fatal::Exception { kind, tval, epc }),
    }
}

/// Move every pending byte from `port` into `line`, stopping at the first zero.
///
/// Bytes that do not fit are dropped by the buffer. Returns the number of
/// bytes read (not counting the zero).
pub fn drain_input<P: Port, const N: usize>(port: &P, line: &mut LineBuffer<N>) -> usize {
    let mut count = 0;
    loop {
        let byte = port.read_byte();
        if byte == 0 {
            return count;
        }
        let _ = line.push(byte);
        count += 1;
    }
}

/// Everything the trap path touches.
pub struct TrapContext<'a, H: Hart, P: Port, const N: usize> {
    pub input: &'a IrqMutex<LineBuffer<N>>,
    pub hart: &'a H,
    pub terminal: &'a P,
}

impl<'a, H: Hart, P: Port, const N: usize> TrapContext<'a, H, P, N> {
    pub fn new(input: &'a IrqMutex<LineBuffer<N>>, hart: &'a H, terminal: &'a P) -> Self {
        Self {
            input,
            hart,
            terminal,
        }
    }

    /// React to an asynchronous interrupt. Interrupts resume in place.
    pub fn handle_interrupt(&self, kind: InterruptKind, epc: usize) -> Result<usize, Fatal> {
        match kind {
            InterruptKind::StdinReady(device) => {
                let mut line = self.input.lock_from_trap().ok_or(Fatal::InputBusy)?;
                drain_input(self.terminal, &mut line);
                drop(line);
                self.hart.clear_pending(cause::irq_device(device));
                Ok(epc)
            }
            InterruptKind::Unrecognized(irq) => Err(Fatal::UnimplementedInterrupt(irq)),
        }
    }

    /// Decode and route one trap. Returns the resume address.
    pub fn handle(&self, cause: TrapCause, tval: usize, epc: usize) -> Result<usize, Fatal> {
        match classify(cause) {
            Trap::Exception(kind) => {
                handle_exception(kind, tval, epc, &mut Console::new(self.terminal))
            }
            Trap::Interrupt(kind) => self.handle_interrupt(kind, epc),
        }
    }

    /// Trap entry point. Fatal traps print their diagnostic and never return.
    pub fn entry(&self, cause: TrapCause, tval: usize, epc: usize) -> usize {
        #[cfg(feature = "trace-traps")]
        {
            let mut console = Console::new(self.terminal);
            let _ = writeln!(console, "[trap] cause={:?} mtval={:#x} mepc={:#x}", cause, tval, epc);
        }

        match self.handle(cause, tval, epc) {
            Ok(resume) => resume,
            Err(fatal) => {
                let _ = writeln!(Console::new(self.terminal), "{}", fatal);
                self.hart.halt()
            }
        }
    }
}
