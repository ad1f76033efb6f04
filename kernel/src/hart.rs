//! Processor services the monitor needs from the hart it runs on.
//!
//! The real implementation lives in `arch::riscv`; tests use `mock::MockHart`.

/// Control over the single hardware thread.
pub trait Hart {
    /// Mask all trap delivery. Returns whether delivery was enabled before.
    fn disable_interrupts(&self) -> bool;

    /// Restore the delivery state returned by `disable_interrupts`.
    fn restore_interrupts(&self, was_enabled: bool);

    /// Suspend until any trap is taken.
    fn wait_for_interrupt(&self);

    /// Clear the pending bit of interrupt number `irq`.
    fn clear_pending(&self, irq: u32);

    /// Free-running retired-instruction counter (low 32 bits).
    fn retired_instructions(&self) -> u32;

    /// Execute a breakpoint instruction.
    fn breakpoint(&self);

    /// Execute an all-zero (illegal) instruction word.
    fn illegal_instruction(&self);

    /// Read-modify-write the word at `addr`.
    ///
    /// # Safety
    /// `addr` is dereferenced. On emcpu, unmapped addresses raise an access
    /// fault, which is the intended use.
    unsafe fn probe(&self, addr: usize);

    /// Park the hart for good.
    fn halt(&self) -> !;
}
