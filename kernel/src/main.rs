//! emcpu monitor: entry point.
//!
//! The reset vector (emcpu-boot) clears `.bss` and jumps to `kmain`. This
//! file owns the state shared between the main loop and the trap path, and
//! the `trap_handler` callback the trap vector calls.
#![cfg_attr(target_arch = "riscv32", no_std, no_main)]

#[cfg(target_arch = "riscv32")]
mod firmware {
    use core::panic::PanicInfo;

    use emcpu_boot as _;
    use emcpu_monitor::arch::riscv::{self, RiscvHart};
    use emcpu_monitor::config::LINE_CAPACITY;
    use emcpu_monitor::device::DevicePort;
    use emcpu_monitor::hart::Hart;
    use emcpu_monitor::kprintln;
    use emcpu_monitor::monitor::line::LineBuffer;
    use emcpu_monitor::monitor::Monitor;
    use emcpu_monitor::sync::IrqMutex;
    use emcpu_monitor::trap::{TrapCause, TrapContext};

    /// Written by the stdin interrupt, drained by the main loop.
    static INPUT: IrqMutex<LineBuffer<LINE_CAPACITY>> = IrqMutex::new(LineBuffer::new());
    static HART: RiscvHart = RiscvHart;
    static TERMINAL: DevicePort = DevicePort::terminal();

    /// Kernel entry point, called by the reset vector with a zeroed `.bss`.
    #[no_mangle]
    pub fn kmain() -> ! {
        unsafe { riscv::init(); }
        kprintln!("[boot] emcpu monitor v{}", env!("CARGO_PKG_VERSION"));

        Monitor::new(&INPUT, &HART, &TERMINAL).run()
    }

    /// Called by `trap_entry` with interrupts masked. Returns the new `mepc`.
    #[no_mangle]
    extern "C" fn trap_handler(cause: usize, tval: usize, epc: usize) -> usize {
        TrapContext::new(&INPUT, &HART, &TERMINAL).entry(TrapCause::from_raw(cause), tval, epc)
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        kprintln!("!!! MONITOR PANIC !!!");
        kprintln!("{}", info);
        HART.halt()
    }
}

#[cfg(not(target_arch = "riscv32"))]
fn main() {
    eprintln!("emcpu-monitor is firmware; build it for a riscv32 target");
}
