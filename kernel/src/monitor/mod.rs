//! The monitor main loop.
//!
//! One foreground loop cycles through four phases forever:
//!
//! - `Prompting`: print `[minstret] emcpu $ `
//! - `Waiting`: `wfi` until any trap has been taken, unless a complete line
//!   is already buffered
//! - `Dispatching`: with traps masked, take a completed line out of the
//!   shared buffer; then, with traps unmasked again, run the command
//! - `DeferredAction`: run the side effect a command left behind, once
//!
//! The line is copied out and the buffer reset inside the critical section,
//! so bytes that arrive afterwards start a fresh line and a command that
//! blocks or halts never does so with traps masked.
use core::fmt::Write;

pub mod commands;
pub mod line;

use crate::config::PROMPT;
use crate::device::{Console, Port};
use crate::hart::Hart;
use crate::sync::IrqMutex;

use commands::{dispatch, Command, Context, Deferred, COMMANDS};
use line::{Completed, LineBuffer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Prompting,
    Waiting,
    Dispatching,
    DeferredAction,
}

pub struct Monitor<'a, H: Hart, P: Port, const N: usize> {
    input: &'a IrqMutex<LineBuffer<N>>,
    hart: &'a H,
    terminal: &'a P,
    commands: &'a [Command],
    pending: Option<Deferred>,
    scratch: [u8; N],
}

impl<'a, H: Hart, P: Port, const N: usize> Monitor<'a, H, P, N> {
    pub fn new(input: &'a IrqMutex<LineBuffer<N>>, hart: &'a H, terminal: &'a P) -> Self {
        Self::with_commands(input, hart, terminal, COMMANDS)
    }

    pub fn with_commands(
        input: &'a IrqMutex<LineBuffer<N>>,
        hart: &'a H,
        terminal: &'a P,
        commands: &'a [Command],
    ) -> Self {
        Self {
            input,
            hart,
            terminal,
            commands,
            pending: None,
            scratch: [0u8; N],
        }
    }

    /// The deferred action waiting to run, if any.
    pub fn pending(&self) -> Option<Deferred> {
        self.pending
    }

    /// Run the monitor. Never returns.
    pub fn run(mut self) -> ! {
        let mut phase = Phase::Prompting;
        loop {
            phase = self.advance(phase);
        }
    }

    /// Perform one phase and return the next.
    pub fn advance(&mut self, phase: Phase) -> Phase {
        match phase {
            Phase::Prompting => {
                self.prompt();
                Phase::Waiting
            }
            Phase::Waiting => {
                // `wfi` wakes on a pending interrupt even while masked; the
                // trap is taken when the guard drops.
                let line = self.input.lock(self.hart);
                if !line.is_complete() {
                    self.hart.wait_for_interrupt();
                }
                drop(line);
                Phase::Dispatching
            }
            Phase::Dispatching => {
                self.dispatch_completed();
                Phase::DeferredAction
            }
            Phase::DeferredAction => {
                if let Some(action) = self.pending.take() {
                    action.run(self.hart);
                }
                Phase::Prompting
            }
        }
    }

    fn prompt(&self) {
        let _ = write!(
            Console::new(self.terminal),
            "[{}] {}",
            self.hart.retired_instructions(),
            PROMPT
        );
    }

    fn dispatch_completed(&mut self) {
        // Guard is a temporary: the critical section ends with this statement.
        let completed = self.input.lock(self.hart).take(&mut self.scratch);

        let mut console = Console::new(self.terminal);
        match completed {
            Some(Completed::Line(len)) => {
                let mut ctx = Context {
                    out: &mut console,
                    hart: self.hart,
                    pending: &mut self.pending,
                    commands: self.commands,
                };
                dispatch(&self.scratch[..len], &mut ctx);
            }
            Some(Completed::Overlong { dropped }) => {
                let _ = writeln!(console, "input too long, discarded {} bytes", N + dropped);
            }
            None => {}
        }
    }
}
