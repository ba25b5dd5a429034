//! Sub-app behaviour and task records
//!
//! A sub-app is a `setup`/loop callback pair. The return code of both
//! callbacks drives the scheduler:
//!
//! - negative: abort, the sub-app is torn down and goes idle
//! - zero: finished, the sub-app goes idle
//! - positive: keep polling, the value is the delay in milliseconds until
//!   the next loop call (it may change from call to call)
//!
//! Callbacks run on the single worker context and must return quickly.

mod tcb;

pub use tcb::SappTcb;

use crate::types::SappState;

/// Behaviour of a sub-app
///
/// Implemented by collaborators that keep their own state. Methods take
/// `&self` because the scheduler only holds a shared `'static` reference;
/// use atomics or a critical section for mutable state.
pub trait SubApp: Sync {
    /// Called once each time the sub-app enters setup
    fn setup(&self) -> i32;

    /// Called repeatedly while the sub-app is looping
    fn poll(&self) -> i32;

    /// Teardown, run once after a callback returned a negative code
    fn fini(&self) {}
}

/// Setup callback signature
pub type SetupFn = fn() -> i32;

/// Loop callback signature
pub type LoopFn = fn() -> i32;

/// The callbacks stored in a task record
#[derive(Clone, Copy)]
pub enum Handler {
    /// Plain function pointers
    Fns { setup: SetupFn, poll: LoopFn },
    /// A collaborator object
    App(&'static dyn SubApp),
}

impl Handler {
    /// Run the callback belonging to `state`.
    ///
    /// Returns the callback's code; teardown and states without a
    /// callback return 0.
    pub fn invoke(&self, state: SappState) -> i32 {
        match (self, state) {
            (Handler::Fns { setup, .. }, SappState::Setup) => setup(),
            (Handler::Fns { poll, .. }, SappState::Loop) => poll(),
            (Handler::App(app), SappState::Setup) => app.setup(),
            (Handler::App(app), SappState::Loop) => app.poll(),
            (Handler::App(app), SappState::Fini) => {
                app.fini();
                0
            }
            _ => 0,
        }
    }
}

impl core::fmt::Debug for Handler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Handler::Fns { .. } => f.write_str("Handler::Fns"),
            Handler::App(_) => f.write_str("Handler::App"),
        }
    }
}
