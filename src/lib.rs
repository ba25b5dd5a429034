//! Cooperative sub-app scheduler for resource-constrained firmware
//!
//! Independently developed sub-apps register a `setup`/loop callback pair
//! under a unique name and are driven by one shared worker context:
//! - Fixed-capacity registry guarded by a lock with bounded wait
//! - Per-sub-app lifecycle: setup once, poll with self-chosen delay, teardown
//! - Per-sub-app periodic alarms that only hand work to the worker
//! - Status views for an operator command layer

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

// ============ Critical Section ============

#[cfg(target_arch = "arm")]
mod cs_impl {
    use cortex_m::interrupt;
    use cortex_m::register::primask;
    use critical_section::{set_impl, Impl, RawRestoreState};

    struct SingleCoreCriticalSection;
    set_impl!(SingleCoreCriticalSection);

    unsafe impl Impl for SingleCoreCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let was_active = primask::read().is_active();
            interrupt::disable();
            was_active
        }

        unsafe fn release(was_active: RawRestoreState) {
            if was_active {
                unsafe { interrupt::enable() }
            }
        }
    }
}

// ============ Modules ============

pub mod log;
mod lang_items;

pub mod core;
pub mod sync;
pub mod port;

// ============ Re-exports ============

pub use self::core::config;
pub use self::core::config::*;
pub use self::core::critical;
pub use self::core::error;
pub use self::core::error::{SappError, SappResult};
pub use self::core::kernel;
pub use self::core::kernel::{DefaultScheduler, Scheduler};
pub use self::core::types;
pub use self::core::types::*;
pub use self::core::task;
pub use self::core::task::SubApp;
pub use self::core::sched;
pub use self::core::status;
pub use self::core::status::SappStatus;
pub use self::core::time;

#[cfg(feature = "pac")]
pub use stm32_metapac as pac;
