//! Status and introspection
//!
//! Read-only views of the registry for an operator-facing command layer.
//! Each record is copied inside a short critical section; the registry
//! lock is not taken, so a view may be one step stale.

use core::fmt;

use crate::config::{CFG_REPORT_NAME_WIDTH, CFG_REPORT_STATE_WIDTH};
use crate::kernel::Scheduler;
use crate::types::{Millis, SappState};

/// Snapshot of one registered sub-app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SappStatus {
    pub name: &'static str,
    /// `None` if the record holds an unknown state value
    pub state: Option<SappState>,
    pub delay_ms: Millis,
}

impl fmt::Display for SappStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.map_or("STATE_UNKNOWN", SappState::as_str);
        write!(
            f,
            "{:>nw$}, {:>sw$}, delay {} ms",
            self.name,
            state,
            self.delay_ms,
            nw = CFG_REPORT_NAME_WIDTH,
            sw = CFG_REPORT_STATE_WIDTH,
        )
    }
}

/// Operator report: registry usage followed by one line per sub-app
pub struct Report<'a, const N: usize> {
    sched: &'a Scheduler<N>,
}

impl<const N: usize> fmt::Display for Report<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (registered, capacity) = self.sched.usage();
        write!(f, "Number sapps registered: {} of {} allowed", registered, capacity)?;
        for status in self.sched.statuses() {
            write!(f, "\n{}", status)?;
        }
        Ok(())
    }
}

impl<const N: usize> Scheduler<N> {
    /// Status of the sub-app in slot `idx`, in registration order
    pub fn status(&self, idx: usize) -> Option<SappStatus> {
        let tcb = self.record(idx)?;
        Some(SappStatus {
            name: tcb.name?,
            state: tcb.state(),
            delay_ms: tcb.delay_ms,
        })
    }

    /// Status of every registered sub-app, in registration order
    pub fn statuses(&self) -> impl Iterator<Item = SappStatus> + '_ {
        (0..N).map_while(move |idx| self.status(idx))
    }

    /// Status of the sub-app called `name`
    pub fn status_of(&self, name: &str) -> Option<SappStatus> {
        self.status(self.index_of(name)?)
    }

    /// Human-readable report of all sub-apps
    pub fn report(&self) -> Report<'_, N> {
        Report { sched: self }
    }
}
