//! Memory-mapped device ports.
//!
//! Every emcpu device exposes a single 32-bit register at
//! `DEVICE_BASE + index * DEVICE_STRIDE`. Reading it pops the next pending
//! input byte (zero when nothing is pending); writing it emits one byte.
use core::fmt;

use crate::config::{DEVICE_BASE, DEVICE_STRIDE, TERMINAL_DEVICE};

/// Byte-level access to a device.
pub trait Port {
    /// Pop the next pending byte, or 0 if none is available.
    fn read_byte(&self) -> u8;

    /// Emit one byte.
    fn write_byte(&self, byte: u8);
}

impl<P: Port + ?Sized> Port for &P {
    fn read_byte(&self) -> u8 {
        (**self).read_byte()
    }

    fn write_byte(&self, byte: u8) {
        (**self).write_byte(byte)
    }
}

/// Register window of one memory-mapped device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DevicePort {
    base: usize,
}

impl DevicePort {
    /// Port for device `index` in the standard device window.
    pub const fn new(index: u32) -> Self {
        Self {
            base: DEVICE_BASE + index as usize * DEVICE_STRIDE,
        }
    }

    /// The terminal device.
    pub const fn terminal() -> Self {
        Self::new(TERMINAL_DEVICE)
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    fn register(&self) -> *mut u32 {
        self.base as *mut u32
    }
}

impl Port for DevicePort {
    fn read_byte(&self) -> u8 {
        // Safety: the device window is always mapped on emcpu; the register
        // is 4-byte aligned by construction.
        unsafe { self.register().read_volatile() as u8 }
    }

    fn write_byte(&self, byte: u8) {
        // Safety: see read_byte.
        unsafe { self.register().write_volatile(byte as u32) }
    }
}

/// `core::fmt` sink over any port.
pub struct Console<P: Port> {
    port: P,
}

impl<P: Port> Console<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// Write raw bytes, unmodified.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.port.write_byte(b);
        }
    }
}

impl<P: Port> fmt::Write for Console<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// Print to the terminal device.
///
/// No lock is taken: the terminal register is stateless, and a trap handler
/// may print while the main loop is in the middle of a line.
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        {
            use core::fmt::Write;
            let mut console = $crate::device::Console::new($crate::device::DevicePort::terminal());
            let _ = write!(console, $($arg)*);
        }
    };
}

/// Print to the terminal device with a newline.
#[macro_export]
macro_rules! kprintln {
    () => ($crate::kprint!("\n"));
    ($($arg:tt)*) => {
        $crate::kprint!("{}\n", format_args!($($arg)*))
    };
}
