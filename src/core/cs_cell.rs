//! Critical section protected cell
//!
//! Zero-overhead wrapper for data that must be accessed within critical sections.

use core::cell::UnsafeCell;
use crate::critical::CriticalSection;

/// A cell that can only be accessed within a critical section.
pub struct CsCell<T>(UnsafeCell<T>);

unsafe impl<T: Send> Sync for CsCell<T> {}

impl<T> CsCell<T> {
    /// Create a new CsCell
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self(UnsafeCell::new(value))
    }

    /// Get a mutable reference to the inner value
    ///
    /// The borrow is tied to a unique borrow of the guard, so a cell
    /// cannot be borrowed twice inside one critical section.
    #[inline(always)]
    pub fn get<'a>(&'a self, _cs: &'a mut CriticalSection) -> &'a mut T {
        unsafe { &mut *self.0.get() }
    }
}
