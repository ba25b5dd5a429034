//! Critical section handling
//!
//! Wraps the `critical-section` crate in an RAII guard so scheduler state
//! can be borrowed through [`CsCell`](crate::core::cs_cell::CsCell) only
//! while interrupts (or, on the host, other threads) are held off.

use core::marker::PhantomData;

use critical_section::RestoreState;

/// RAII guard for critical sections
///
/// When this guard is created, the critical section is acquired.
/// When it is dropped, the previous state is restored.
pub struct CriticalSection {
    restore: RestoreState,
    // acquire/release must happen on the same context
    _not_send: PhantomData<*const ()>,
}

impl CriticalSection {
    /// Enter a critical section.
    ///
    /// Returns a guard that will restore the previous state when dropped.
    #[inline(always)]
    pub fn enter() -> Self {
        let restore = unsafe { critical_section::acquire() };
        CriticalSection {
            restore,
            _not_send: PhantomData,
        }
    }
}

impl Drop for CriticalSection {
    #[inline(always)]
    fn drop(&mut self) {
        unsafe { critical_section::release(self.restore) };
    }
}

/// Execute a closure inside a critical section
///
/// The closure receives the guard, which is needed to borrow
/// [`CsCell`](crate::core::cs_cell::CsCell) protected data.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&mut CriticalSection) -> R,
{
    let mut cs = CriticalSection::enter();
    f(&mut cs)
}

/// Check if currently executing in an ISR context
#[inline]
pub fn is_isr_context() -> bool {
    #[cfg(target_arch = "arm")]
    {
        let ipsr: u32;
        unsafe {
            core::arch::asm!(
                "mrs {}, IPSR",
                out(reg) ipsr,
                options(nomem, nostack, preserves_flags)
            );
        }
        ipsr != 0
    }

    #[cfg(not(target_arch = "arm"))]
    {
        false
    }
}
