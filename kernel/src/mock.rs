//! Host-side stand-ins for the terminal device and the hart.
//!
//! Used by the unit tests to drive the trap and monitor code without
//! hardware: input bytes are queued on a `MockPort`, output is captured, and
//! `MockHart` records every side effect the core asks the processor for.
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::device::Port;
use crate::hart::Hart;

/// Terminal device backed by an input queue and an output log.
pub struct MockPort {
    input: RefCell<VecDeque<u8>>,
    output: RefCell<Vec<u8>>,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            input: RefCell::new(VecDeque::new()),
            output: RefCell::new(Vec::new()),
        }
    }

    /// Queue bytes for the next reads.
    pub fn feed(&self, bytes: &[u8]) {
        self.input.borrow_mut().extend(bytes.iter().copied());
    }

    /// Everything written so far, lossily decoded.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output.borrow()).into_owned()
    }

    /// Output lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(String::from).collect()
    }

    pub fn clear_output(&self) {
        self.output.borrow_mut().clear();
    }

    /// Bytes written so far.
    pub fn output_len(&self) -> usize {
        self.output.borrow().len()
    }

    /// Forget everything written after the first `len` bytes.
    pub fn truncate_output(&self, len: usize) {
        self.output.borrow_mut().truncate(len);
    }

    pub fn pending_input(&self) -> usize {
        self.input.borrow().len()
    }
}

impl Port for MockPort {
    fn read_byte(&self) -> u8 {
        self.input.borrow_mut().pop_front().unwrap_or(0)
    }

    fn write_byte(&self, byte: u8) {
        self.output.borrow_mut().push(byte);
    }
}

/// Hart that records what it was asked to do.
pub struct MockHart {
    enabled: Cell<bool>,
    critical_sections: Cell<u32>,
    waits: Cell<u32>,
    instret: Cell<u32>,
    breakpoints: Cell<u32>,
    illegal: Cell<u32>,
    cleared: RefCell<Vec<u32>>,
    probes: RefCell<Vec<usize>>,
}

impl MockHart {
    pub fn new() -> Self {
        Self {
            enabled: Cell::new(true),
            critical_sections: Cell::new(0),
            waits: Cell::new(0),
            instret: Cell::new(0),
            breakpoints: Cell::new(0),
            illegal: Cell::new(0),
            cleared: RefCell::new(Vec::new()),
            probes: RefCell::new(Vec::new()),
        }
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Number of times delivery was masked.
    pub fn critical_sections(&self) -> u32 {
        self.critical_sections.get()
    }

    pub fn waits(&self) -> u32 {
        self.waits.get()
    }

    pub fn set_instret(&self, n: u32) {
        self.instret.set(n);
    }

    pub fn breakpoints(&self) -> u32 {
        self.breakpoints.get()
    }

    pub fn illegal_instructions(&self) -> u32 {
        self.illegal.get()
    }

    pub fn cleared(&self) -> Vec<u32> {
        self.cleared.borrow().clone()
    }

    pub fn probes(&self) -> Vec<usize> {
        self.probes.borrow().clone()
    }
}

impl Hart for MockHart {
    fn disable_interrupts(&self) -> bool {
        self.critical_sections.set(self.critical_sections.get() + 1);
        self.enabled.replace(false)
    }

    fn restore_interrupts(&self, was_enabled: bool) {
        self.enabled.set(was_enabled);
    }

    fn wait_for_interrupt(&self) {
        self.waits.set(self.waits.get() + 1);
    }

    fn clear_pending(&self, irq: u32) {
        self.cleared.borrow_mut().push(irq);
    }

    fn retired_instructions(&self) -> u32 {
        self.instret.get()
    }

    fn breakpoint(&self) {
        self.breakpoints.set(self.breakpoints.get() + 1);
    }

    fn illegal_instruction(&self) {
        self.illegal.set(self.illegal.get() + 1);
    }

    unsafe fn probe(&self, addr: usize) {
        self.probes.borrow_mut().push(addr);
    }

    fn halt(&self) -> ! {
        panic!("hart halted");
    }
}
