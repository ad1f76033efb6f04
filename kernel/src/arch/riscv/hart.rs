//! The one emcpu hart.
use super::csr::{Mie, Mstatus};
use super::{csr_clear, csr_read, csr_set, wfi};
use crate::hart::Hart;
use crate::trap::cause::EBREAK;

pub struct RiscvHart;

impl Hart for RiscvHart {
    fn disable_interrupts(&self) -> bool {
        let prev = csr_clear!("mstatus", Mstatus::MIE.bits());
        Mstatus::from_bits_retain(prev).contains(Mstatus::MIE)
    }

    fn restore_interrupts(&self, was_enabled: bool) {
        if was_enabled {
            csr_set!("mstatus", Mstatus::MIE.bits());
        }
    }

    fn wait_for_interrupt(&self) {
        wfi();
    }

    fn clear_pending(&self, irq: u32) {
        csr_clear!("mip", Mie::irq(irq).bits());
    }

    fn retired_instructions(&self) -> u32 {
        csr_read!("minstret") as u32
    }

    fn breakpoint(&self) {
        // Spelled out as a word: with the C extension the assembler would
        // emit the 2-byte `c.ebreak`, and the handler resumes 4 bytes on.
        unsafe { core::arch::asm!(".4byte {0}", const EBREAK, options(nomem, nostack)); }
    }

    fn illegal_instruction(&self) {
        unsafe { core::arch::asm!(".word 0", options(nomem, nostack)); }
    }

    unsafe fn probe(&self, addr: usize) {
        let p = addr as *mut u32;
        p.write_volatile(p.read_volatile().wrapping_add(1));
    }

    fn halt(&self) -> ! {
        // No trap may run again once parked.
        csr_clear!("mstatus", Mstatus::MIE.bits());
        loop {
            wfi();
        }
    }
}
