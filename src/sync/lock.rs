//! Registry lock with bounded wait
//!
//! Serializes registrations. A caller that cannot take the lock within
//! its timeout gets [`SappError::LockUnavailable`] and must not touch the
//! registry.

use portable_atomic::{AtomicBool, Ordering};

use crate::config::CFG_LOCK_SPIN_MAX;
use crate::error::{SappError, SappResult};
use crate::types::OsTick;

/// Non-reentrant try-lock
pub struct RegistryLock {
    locked: AtomicBool,
}

/// Held registry lock, released on drop
pub struct RegistryGuard<'a> {
    lock: &'a RegistryLock,
}

impl RegistryLock {
    /// Create an unlocked lock
    pub const fn new() -> Self {
        RegistryLock {
            locked: AtomicBool::new(false),
        }
    }

    /// Take the lock without waiting
    pub fn try_lock(&self) -> Option<RegistryGuard<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RegistryGuard { lock: self })
    }

    /// Take the lock, waiting at most `timeout` ticks.
    ///
    /// `now` reads the tick counter. The wait also gives up after
    /// [`CFG_LOCK_SPIN_MAX`] attempts in case the tick is not running.
    /// A timeout of 0 tries exactly once.
    pub fn lock<F>(&self, timeout: OsTick, now: F) -> SappResult<RegistryGuard<'_>>
    where
        F: Fn() -> OsTick,
    {
        let start = now();
        let mut spins: u32 = 0;

        loop {
            if let Some(guard) = self.try_lock() {
                return Ok(guard);
            }

            if timeout == 0 || now().wrapping_sub(start) >= timeout || spins >= CFG_LOCK_SPIN_MAX {
                return Err(SappError::LockUnavailable);
            }

            spins += 1;
            core::hint::spin_loop();
        }
    }

    /// Check if the lock is currently held
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

impl Default for RegistryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RegistryGuard<'_> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}
