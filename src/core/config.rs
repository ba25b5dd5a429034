//! Compile-time configuration for the sub-app scheduler
//!
//! These constants control the resource limits and timing of the scheduler.

use crate::types::NameMatch;

/// Maximum number of sub-apps that can ever be registered
pub const CFG_SAPP_MAX: usize = 10;

/// Timer tick rate in Hz
pub const CFG_TICK_RATE_HZ: u32 = 1000;

/// Bounded wait on the registry lock, in milliseconds
pub const CFG_LOCK_TIMEOUT_MS: u32 = 10;

/// Upper bound on lock polling attempts.
///
/// Caps the lock wait when no tick source is running yet, e.g. when
/// sub-apps are started from `main` before SysTick is enabled.
pub const CFG_LOCK_SPIN_MAX: u32 = 100_000;

/// How `start` recognises an already registered sub-app
pub const CFG_NAME_MATCH: NameMatch = NameMatch::Content;

/// Width of the name column in the status report
pub const CFG_REPORT_NAME_WIDTH: usize = 20;

/// Width of the state column in the status report
pub const CFG_REPORT_STATE_WIDTH: usize = 15;
