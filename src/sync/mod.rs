//! Synchronization primitives
//!
//! Only the registry lock lives here; everything else the scheduler
//! shares is guarded by critical sections.

pub mod lock;

pub use lock::{RegistryGuard, RegistryLock};
