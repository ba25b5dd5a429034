//! Time management module
//!
//! Per-sub-app periodic alarms counted down by the scheduler tick.
//! An alarm never runs sub-app code; expiry only tells the caller to hand
//! the sub-app to the dispatcher.

use portable_atomic::{AtomicU32, Ordering};

use crate::config::CFG_TICK_RATE_HZ;
use crate::types::{Millis, OsTick};

/// Ticks seen by any scheduler since boot
static UPTIME: AtomicU32 = AtomicU32::new(0);

/// Ticks since boot, used to stamp log lines
#[inline]
pub fn uptime() -> OsTick {
    UPTIME.load(Ordering::Relaxed)
}

#[inline]
pub(crate) fn uptime_increment() {
    UPTIME.fetch_add(1, Ordering::Relaxed);
}

/// Convert milliseconds to scheduler ticks
///
/// Rounds up and never returns less than one tick.
pub const fn ms_to_ticks(ms: Millis) -> OsTick {
    let ticks = (ms as u64 * CFG_TICK_RATE_HZ as u64).div_ceil(1000);
    if ticks == 0 {
        1
    } else if ticks > OsTick::MAX as u64 {
        OsTick::MAX
    } else {
        ticks as OsTick
    }
}

/// Periodic alarm owned by one task record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SappTimer {
    period_ms: Millis,
    period: OsTick,
    remain: OsTick,
    running: bool,
}

impl SappTimer {
    /// Create a stopped timer
    pub const fn new() -> Self {
        SappTimer {
            period_ms: 0,
            period: 0,
            remain: 0,
            running: false,
        }
    }

    /// (Re)program the timer to fire every `period_ms`.
    ///
    /// The timer may be armed anywhere inside the current tick period, so
    /// the first expiry waits one extra tick; it never fires earlier than
    /// `period_ms` from now. Later expiries follow every `period` ticks.
    pub fn start(&mut self, period_ms: Millis) {
        let period = ms_to_ticks(period_ms);
        self.period_ms = period_ms;
        self.period = period;
        self.remain = period.saturating_add(1);
        self.running = true;
    }

    /// Stop the timer; a stopped timer never expires
    pub fn stop(&mut self) {
        self.running = false;
        self.remain = 0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Programmed period in milliseconds
    #[inline]
    pub fn period_ms(&self) -> Millis {
        self.period_ms
    }

    /// Ticks left until the next expiry, 0 when stopped
    #[inline]
    pub fn remaining(&self) -> OsTick {
        self.remain
    }

    /// Advance by one tick.
    ///
    /// Returns `true` when the timer expired on this tick; it is then
    /// reloaded with its period.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remain = self.remain.saturating_sub(1);
        if self.remain == 0 {
            self.remain = self.period;
            return true;
        }
        false
    }
}

impl Default for SappTimer {
    fn default() -> Self {
        Self::new()
    }
}
