//! Scheduler state and entry points
//!
//! A [`Scheduler`] owns the fixed-capacity registry of task records, the
//! ready queue feeding the worker context and the tick counter. It is
//! meant to live in a `static` and be shared by three contexts:
//!
//! - callers of [`Scheduler::start`] / [`Scheduler::start_app`]
//! - the periodic interrupt calling [`Scheduler::tick`]
//! - the single worker calling [`Scheduler::dispatch`] or [`Scheduler::run`]
//!
//! Sub-app callbacks only ever run on the worker, never inside a critical
//! section and never at interrupt priority.

use portable_atomic::{AtomicU32, Ordering};

use crate::config::{CFG_LOCK_TIMEOUT_MS, CFG_NAME_MATCH, CFG_SAPP_MAX};
use crate::critical::{critical_section, is_isr_context};
use crate::core::cs_cell::CsCell;
use crate::error::{SappError, SappResult};
use crate::sched::{self, ReadyQueue, Step};
use crate::sync::RegistryLock;
use crate::task::{Handler, LoopFn, SappTcb, SetupFn, SubApp};
use crate::time::ms_to_ticks;
use crate::types::{Millis, OsTick, SappState};

// ============ Registry ============

/// Task records plus allocation bookkeeping
pub(crate) struct Registry<const N: usize> {
    pub(crate) slots: [SappTcb; N],
    pub(crate) next_idx: usize,
    pub(crate) ready: ReadyQueue<N>,
}

impl<const N: usize> Registry<N> {
    const EMPTY: SappTcb = SappTcb::new();

    const fn new() -> Self {
        Self {
            slots: [Self::EMPTY; N],
            next_idx: 0,
            ready: ReadyQueue::new(),
        }
    }

    /// Index of the registered sub-app called `name`
    fn find(&self, name: &str) -> Option<usize> {
        self.slots[..self.next_idx]
            .iter()
            .position(|tcb| tcb.name.is_some_and(|n| CFG_NAME_MATCH.matches(n, name)))
    }

    /// Hand a slot to the dispatcher unless it is already queued
    fn make_ready(&mut self, idx: usize) {
        let tcb = &mut self.slots[idx];
        if tcb.pending {
            return;
        }
        match self.ready.push(idx) {
            Ok(()) => tcb.pending = true,
            Err(_) => {
                crate::error!("ready queue full, dropped slot {}", idx);
            }
        }
    }
}

/// Snapshot taken at the start of a step
struct Work {
    idx: usize,
    #[cfg_attr(not(feature = "defmt"), allow(dead_code))]
    name: &'static str,
    raw: u8,
    delay_ms: Millis,
    handler: Handler,
}

// ============ Scheduler ============

/// Cooperative scheduler for up to `N` sub-apps
pub struct Scheduler<const N: usize = CFG_SAPP_MAX> {
    lock: RegistryLock,
    ticks: AtomicU32,
    inner: CsCell<Registry<N>>,
}

/// Scheduler sized by [`CFG_SAPP_MAX`]
pub type DefaultScheduler = Scheduler<CFG_SAPP_MAX>;

impl<const N: usize> Scheduler<N> {
    /// Create an empty scheduler
    pub const fn new() -> Self {
        Self {
            lock: RegistryLock::new(),
            ticks: AtomicU32::new(0),
            inner: CsCell::new(Registry::new()),
        }
    }

    // ============ Registration ============

    /// Start (or restart) a sub-app from plain callbacks
    ///
    /// # Returns
    /// * `Ok(())` - The sub-app is queued for its next step
    /// * `Err(SappError::InvalidName)` - `name` is empty
    /// * `Err(SappError::LockUnavailable)` - Registry lock wait timed out
    /// * `Err(SappError::CapacityExceeded)` - No free slot for a new name
    /// * `Err(SappError::Busy)` - The sub-app is running and cannot restart
    pub fn start(&self, name: &'static str, setup: SetupFn, poll: LoopFn) -> SappResult<()> {
        self.register(name, Handler::Fns { setup, poll })
    }

    /// Start (or restart) a sub-app implemented as a [`SubApp`] object
    ///
    /// Same contract as [`Scheduler::start`].
    pub fn start_app(&self, name: &'static str, app: &'static dyn SubApp) -> SappResult<()> {
        self.register(name, Handler::App(app))
    }

    fn register(&self, name: &'static str, handler: Handler) -> SappResult<()> {
        if name.is_empty() {
            return Err(SappError::InvalidName);
        }

        // an interrupt must not spin on a lock its own thread may hold
        let timeout = if is_isr_context() { 0 } else { ms_to_ticks(CFG_LOCK_TIMEOUT_MS) };
        let _guard = self.lock.lock(timeout, || self.tick_count()).inspect_err(|_| {
            crate::error!("failed to take lock");
        })?;

        critical_section(|cs| {
            let reg = self.inner.get(cs);

            let idx = match reg.find(name) {
                Some(idx) => {
                    crate::debug!("found {} at idx {}", name, idx);
                    idx
                }
                None if reg.next_idx >= N => {
                    crate::error!("too many sapps running already");
                    return Err(SappError::CapacityExceeded);
                }
                None => {
                    crate::debug!("new {} at idx {}", name, reg.next_idx);
                    reg.next_idx += 1;
                    reg.next_idx - 1
                }
            };

            let tcb = &mut reg.slots[idx];
            if !tcb.is_restartable() {
                crate::error!("attempt to restart {} while busy in {}", name, tcb.state());
                return Err(SappError::Busy);
            }

            tcb.restart(name, handler);
            crate::info!("starting sapp {} at idx {}", name, idx);
            reg.make_ready(idx);
            Ok(())
        })
    }

    // ============ Timer ============

    /// Advance the scheduler clock by one tick.
    ///
    /// Call from the periodic interrupt at [`CFG_TICK_RATE_HZ`]. Expired
    /// sub-app timers only queue their sub-app for the worker.
    ///
    /// [`CFG_TICK_RATE_HZ`]: crate::config::CFG_TICK_RATE_HZ
    pub fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        crate::time::uptime_increment();

        critical_section(|cs| {
            let reg = self.inner.get(cs);
            for idx in 0..reg.next_idx {
                if reg.slots[idx].timer.tick() {
                    reg.make_ready(idx);
                }
            }
        });
    }

    /// Ticks since the scheduler was created
    #[inline]
    pub fn tick_count(&self) -> OsTick {
        self.ticks.load(Ordering::Relaxed)
    }

    // ============ Dispatcher ============

    /// Run one step for the sub-app at the head of the ready queue.
    ///
    /// Must only be called from the single worker context. Returns
    /// `false` if nothing was queued.
    pub fn dispatch(&self) -> bool {
        let Some(work) = critical_section(|cs| self.inner.get(cs).ready.pop()) else {
            return false;
        };

        if let Some(work) = self.take_work(work) {
            let step = sched::step(work.raw, work.delay_ms, |state| {
                self.enter(work.idx, state);
                work.handler.invoke(state)
            });
            self.finish(&work, step);
        }
        true
    }

    /// Dispatch until the ready queue is empty, returning the step count
    pub fn run_pending(&self) -> usize {
        let mut steps = 0;
        while self.dispatch() {
            steps += 1;
        }
        steps
    }

    /// Worker loop; sleeps while no sub-app is ready.
    ///
    /// A hand-off that lands between the empty check and the sleep is
    /// picked up on the next interrupt.
    pub fn run(&self) -> ! {
        loop {
            if !self.dispatch() {
                crate::port::wait_for_event();
            }
        }
    }

    /// Clear the pending marker and snapshot the record for a step
    fn take_work(&self, idx: usize) -> Option<Work> {
        critical_section(|cs| {
            let tcb = &mut self.inner.get(cs).slots[idx];
            tcb.pending = false;

            // stale expiry of a timer stopped by the previous step
            if tcb.state() == Some(SappState::Disabled) && !tcb.start_requested {
                return None;
            }
            tcb.start_requested = false;

            let raw = tcb.state;

            // claim the record before leaving the critical section, so a
            // concurrent start sees a busy sub-app from here on
            if matches!(tcb.state(), Some(SappState::Disabled | SappState::Setup)) {
                tcb.state = SappState::Setup.raw();
            }

            Some(Work {
                idx,
                name: tcb.name?,
                raw,
                delay_ms: tcb.delay_ms,
                handler: tcb.handler?,
            })
        })
    }

    /// Publish the state whose callback is about to run
    fn enter(&self, idx: usize, state: SappState) {
        critical_section(|cs| {
            let tcb = &mut self.inner.get(cs).slots[idx];
            tcb.state = state.raw();
            if state.is_idle() {
                tcb.timer.stop();
            }
        });
    }

    /// Write a step's outcome back and reprogram the timer
    fn finish(&self, work: &Work, step: Step) {
        let from = SappState::from_raw(work.raw);

        if step.anomaly {
            crate::error!("{} unknown state {}", work.name, work.raw);
        }
        if step.torn_down {
            crate::info!("{} {} -> {}", work.name, from, SappState::Fini);
            crate::info!("{} {} -> {}, delay {}", work.name, SappState::Fini, step.state, step.delay_ms);
        } else if from != Some(step.state) {
            crate::info!("{} {} -> {}, delay {}", work.name, from, step.state, step.delay_ms);
        }

        critical_section(|cs| {
            let reg = self.inner.get(cs);
            let tcb = &mut reg.slots[work.idx];
            tcb.state = step.state.raw();
            tcb.delay_ms = step.delay_ms;

            if step.state.is_idle() {
                tcb.timer.stop();
                return;
            }

            if step.delay_ms != work.delay_ms {
                tcb.timer.start(step.delay_ms);
            }

            // runnable but nothing armed: go again on the next step
            if !tcb.timer.is_running() {
                reg.make_ready(work.idx);
            }
        });
    }

    // ============ Introspection ============

    /// `(registered_count, capacity)`
    pub fn usage(&self) -> (usize, usize) {
        (critical_section(|cs| self.inner.get(cs).next_idx), N)
    }

    /// Check if the registry lock is currently held
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Copy of the record in slot `idx`, `None` if unallocated
    pub(crate) fn record(&self, idx: usize) -> Option<SappTcb> {
        critical_section(|cs| {
            let reg = self.inner.get(cs);
            reg.slots[..reg.next_idx].get(idx).copied()
        })
    }

    /// Index of the sub-app called `name`
    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        critical_section(|cs| self.inner.get(cs).find(name))
    }

    /// Number of ready events waiting for the worker
    pub fn queued(&self) -> usize {
        critical_section(|cs| self.inner.get(cs).ready.len())
    }
}

impl<const N: usize> Default for Scheduler<N> {
    fn default() -> Self {
        Self::new()
    }
}
