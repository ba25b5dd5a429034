//! Sub-app state machine
//!
//! Pure transition logic: given the state read at the start of a step and
//! the codes returned by the callbacks, compute where the sub-app ends up
//! and what its next re-poll delay is. Running the callbacks, programming
//! the timer and writing the record back is the kernel's job.
//!
//! | State    | Action            | Code    | Next              |
//! |----------|-------------------|---------|-------------------|
//! | Startup  | none              |         | Setup             |
//! | Disabled | falls into Setup  |         | (as Setup)        |
//! | Setup    | `setup()`         | `r < 0` | Fini              |
//! | Setup    | `setup()`         | `r == 0`| Disabled          |
//! | Setup    | `setup()`         | `r > 0` | Loop, delay `r`   |
//! | Loop     | loop callback     | `r < 0` | Fini              |
//! | Loop     | loop callback     | `r == 0`| Disabled          |
//! | Loop     | loop callback     | `r > 0` | Loop, delay `r`   |
//! | Fini     | teardown          |         | Disabled          |
//! | unknown  | none              |         | Disabled          |
//!
//! Two rows continue inside the same step: a `Disabled` sub-app (it was
//! restarted) runs `setup()` right away, and a sub-app that reaches `Fini`
//! runs its teardown right away, so teardown happens exactly once and the
//! sub-app is restartable as soon as the step ends.

mod rdy_list;

pub use rdy_list::ReadyQueue;

use crate::types::{Millis, SappState};

/// Meaning of a callback return code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Negative code: tear the sub-app down
    Abort,
    /// Zero: the sub-app finished normally
    Done,
    /// Positive code: poll again after this many milliseconds
    Continue(Millis),
}

impl Verdict {
    /// Classify a callback return code
    #[inline]
    pub const fn from_code(code: i32) -> Self {
        if code < 0 {
            Verdict::Abort
        } else if code == 0 {
            Verdict::Done
        } else {
            Verdict::Continue(code as Millis)
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// State the sub-app is left in
    pub state: SappState,
    /// Re-poll delay after the step
    pub delay_ms: Millis,
    /// The teardown ran during this step
    pub torn_down: bool,
    /// The step started from an unknown state value
    pub anomaly: bool,
}

impl Step {
    const fn new(state: SappState, delay_ms: Millis) -> Self {
        Step {
            state,
            delay_ms,
            torn_down: false,
            anomaly: false,
        }
    }
}

/// Apply a setup/loop return code to the current delay
fn resolve(code: i32, delay_ms: Millis) -> (SappState, Millis) {
    match Verdict::from_code(code) {
        Verdict::Abort => (SappState::Fini, delay_ms),
        Verdict::Done => (SappState::Disabled, delay_ms),
        Verdict::Continue(next) => (SappState::Loop, next),
    }
}

/// Run one step of the state machine.
///
/// `raw` is the state value read from the task record and `delay_ms` its
/// current delay. `invoke` is called with `Setup`, `Loop` or `Fini` each
/// time the step has to run that state's callback, and returns the
/// callback's code (ignored for `Fini`).
pub fn step<F>(raw: u8, delay_ms: Millis, mut invoke: F) -> Step
where
    F: FnMut(SappState) -> i32,
{
    let Some(state) = SappState::from_raw(raw) else {
        return Step {
            anomaly: true,
            ..Step::new(SappState::Disabled, delay_ms)
        };
    };

    let (next, delay_ms) = match state {
        SappState::Startup => return Step::new(SappState::Setup, delay_ms),
        // restarted while idle: run setup in this same step
        SappState::Disabled | SappState::Setup => resolve(invoke(SappState::Setup), delay_ms),
        SappState::Loop => resolve(invoke(SappState::Loop), delay_ms),
        SappState::Fini => (SappState::Fini, delay_ms),
    };

    if next != SappState::Fini {
        return Step::new(next, delay_ms);
    }

    invoke(SappState::Fini);
    Step {
        torn_down: true,
        ..Step::new(SappState::Disabled, delay_ms)
    }
}
