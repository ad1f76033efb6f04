//! Interrupt-masking mutex.
//!
//! On a single hart the only contender for shared state is the trap handler.
//! The foreground side masks trap delivery before taking the lock, so the
//! trap handler can never find it held. The trap side runs with delivery
//! already masked by hardware and must not mask again.
use core::ops::{Deref, DerefMut};

use spin::{Mutex, MutexGuard};

use crate::hart::Hart;

pub struct IrqMutex<T> {
    inner: Mutex<T>,
}

impl<T> IrqMutex<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Enter the critical section from foreground code.
    ///
    /// Trap delivery stays masked until the guard is dropped.
    pub fn lock<'a, H: Hart + ?Sized>(&'a self, hart: &'a H) -> IrqGuard<'a, T, H> {
        let was_enabled = hart.disable_interrupts();
        IrqGuard {
            guard: Some(self.inner.lock()),
            hart,
            was_enabled,
        }
    }

    /// Take the lock from inside the trap handler.
    ///
    /// Returns `None` if the foreground holds it, which means a synchronous
    /// trap was raised from inside a critical section.
    pub fn lock_from_trap(&self) -> Option<MutexGuard<'_, T>> {
        self.inner.try_lock()
    }
}

pub struct IrqGuard<'a, T, H: Hart + ?Sized> {
    guard: Option<MutexGuard<'a, T>>,
    hart: &'a H,
    was_enabled: bool,
}

impl<T, H: Hart + ?Sized> Deref for IrqGuard<'_, T, H> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only None during drop.
        match &self.guard {
            Some(g) => &**g,
            None => unreachable!(),
        }
    }
}

impl<T, H: Hart + ?Sized> DerefMut for IrqGuard<'_, T, H> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.guard {
            Some(g) => &mut **g,
            None => unreachable!(),
        }
    }
}

impl<T, H: Hart + ?Sized> Drop for IrqGuard<'_, T, H> {
    fn drop(&mut self) {
        // Release the lock before unmasking, or a pending trap would find it held.
        drop(self.guard.take());
        self.hart.restore_interrupts(self.was_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHart;

    #[test]
    fn foreground_lock_masks_until_dropped() {
        let hart = MockHart::new();
        let m = IrqMutex::new(0u32);
        {
            let mut g = m.lock(&hart);
            *g += 1;
            assert!(!hart.interrupts_enabled());
            assert!(m.lock_from_trap().is_none());
        }
        assert!(hart.interrupts_enabled());
        assert_eq!(*m.lock_from_trap().unwrap(), 1);
    }

    #[test]
    fn restores_previous_mask_state() {
        let hart = MockHart::new();
        hart.disable_interrupts();
        let m = IrqMutex::new(());
        drop(m.lock(&hart));
        assert!(!hart.interrupts_enabled());
    }
}
