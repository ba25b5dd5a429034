//! Task record
//!
//! One record per registry slot. Registration (re)initializes it under
//! the registry lock; afterwards only the dispatcher's step logic and the
//! tick handler touch it.

use super::Handler;
use crate::time::SappTimer;
use crate::types::{Millis, SappState};

/// Sub-app task record
#[derive(Debug, Clone, Copy)]
pub struct SappTcb {
    /// Sub-app name, `None` while the slot is unallocated
    pub name: Option<&'static str>,
    /// Raw lifecycle state, decoded with [`SappState::from_raw`]
    pub state: u8,
    /// Current re-poll interval, 0 until the sub-app asks for one
    pub delay_ms: Millis,
    /// Registered callbacks
    pub handler: Option<Handler>,
    /// Re-poll alarm
    pub timer: SappTimer,
    /// A ready event for this record is queued
    pub pending: bool,
    /// `start` was called and the next step must run
    pub start_requested: bool,
}

impl SappTcb {
    /// Create a new, unallocated record
    pub const fn new() -> Self {
        SappTcb {
            name: None,
            state: SappState::Startup.raw(),
            delay_ms: 0,
            handler: None,
            timer: SappTimer::new(),
            pending: false,
            start_requested: false,
        }
    }

    /// Decoded lifecycle state, `None` if the raw value is unknown
    #[inline]
    pub fn state(&self) -> Option<SappState> {
        SappState::from_raw(self.state)
    }

    /// Check if the slot holds a sub-app
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.name.is_some()
    }

    /// Check if `start` may reinitialize this record
    #[inline]
    pub fn is_restartable(&self) -> bool {
        self.state().is_some_and(SappState::is_restartable)
    }

    /// Reinitialize for a (re)start.
    ///
    /// A fresh slot begins in `Startup`; a restarted one keeps its
    /// restartable state so that a `Disabled` sub-app falls straight
    /// through into `setup` on its next step.
    pub fn restart(&mut self, name: &'static str, handler: Handler) {
        if !self.is_allocated() {
            self.state = SappState::Startup.raw();
        }
        self.name = Some(name);
        self.handler = Some(handler);
        self.delay_ms = 0;
        self.timer = SappTimer::new();
        self.start_requested = true;
    }
}

impl Default for SappTcb {
    fn default() -> Self {
        Self::new()
    }
}
