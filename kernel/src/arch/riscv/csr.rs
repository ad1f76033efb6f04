//! Machine-mode CSR bit layouts.
use bitflags::bitflags;

use crate::trap::cause::irq_device;

bitflags! {
    /// `mstatus` bits the monitor touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Mstatus: usize {
        /// Global machine interrupt enable.
        const MIE = 1 << 3;
    }
}

bitflags! {
    /// `mie` / `mip` interrupt source bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Mie: usize {
        const SSIE = 1 << 1;
        const MSIE = 1 << 3;
        const STIE = 1 << 5;
        const MTIE = 1 << 7;
        const SEIE = 1 << 9;
        const MEIE = 1 << 11;
        /// Terminal (device 0) input pending.
        const TERMINAL = 1 << 16;
    }
}

impl Mie {
    /// Every source, including device bits with no named flag.
    pub const fn everything() -> Self {
        Self::from_bits_retain(!0)
    }

    /// Bit of interrupt number `irq`.
    pub const fn irq(irq: u32) -> Self {
        Self::from_bits_retain(1 << (irq & 31))
    }

    /// Bit raised by device `index`.
    pub const fn device(index: u32) -> Self {
        Self::irq(irq_device(index))
    }
}
