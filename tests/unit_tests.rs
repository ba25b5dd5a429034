//! Unit tests for core scheduler modules
//!
//! These tests run on the host (not embedded target) to verify
//! the core algorithms work correctly.

#[cfg(test)]
mod state_machine_tests {
    use sapp::sched::{step, Step, Verdict};
    use sapp::types::SappState;

    /// Run a step, recording which callbacks it invoked
    fn run(raw: u8, delay: u32, setup: i32, poll: i32) -> (Step, Vec<SappState>) {
        let mut calls = Vec::new();
        let out = step(raw, delay, |state| {
            calls.push(state);
            match state {
                SappState::Setup => setup,
                SappState::Loop => poll,
                _ => 0,
            }
        });
        (out, calls)
    }

    #[test]
    fn test_verdict_from_code() {
        assert_eq!(Verdict::from_code(-1), Verdict::Abort);
        assert_eq!(Verdict::from_code(i32::MIN), Verdict::Abort);
        assert_eq!(Verdict::from_code(0), Verdict::Done);
        assert_eq!(Verdict::from_code(1), Verdict::Continue(1));
        assert_eq!(Verdict::from_code(250), Verdict::Continue(250));
    }

    #[test]
    fn test_startup_moves_to_setup_without_callbacks() {
        let (out, calls) = run(SappState::Startup.raw(), 0, 50, 50);
        assert_eq!(out.state, SappState::Setup);
        assert_eq!(out.delay_ms, 0);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_setup_outcomes() {
        let (out, calls) = run(SappState::Setup.raw(), 0, 50, 0);
        assert_eq!(calls, [SappState::Setup]);
        assert_eq!((out.state, out.delay_ms), (SappState::Loop, 50));

        let (out, _) = run(SappState::Setup.raw(), 0, 0, 0);
        assert_eq!((out.state, out.delay_ms), (SappState::Disabled, 0));
        assert!(!out.torn_down);

        let (out, calls) = run(SappState::Setup.raw(), 0, -3, 0);
        assert_eq!(calls, [SappState::Setup, SappState::Fini]);
        assert_eq!(out.state, SappState::Disabled);
        assert!(out.torn_down);
    }

    #[test]
    fn test_disabled_falls_through_into_setup() {
        let (out, calls) = run(SappState::Disabled.raw(), 0, 20, 0);
        assert_eq!(calls, [SappState::Setup]);
        assert_eq!((out.state, out.delay_ms), (SappState::Loop, 20));
    }

    #[test]
    fn test_loop_outcomes() {
        let (out, calls) = run(SappState::Loop.raw(), 50, 0, 75);
        assert_eq!(calls, [SappState::Loop]);
        assert_eq!((out.state, out.delay_ms), (SappState::Loop, 75));

        // finishing keeps the last delay
        let (out, _) = run(SappState::Loop.raw(), 50, 0, 0);
        assert_eq!((out.state, out.delay_ms), (SappState::Disabled, 50));

        let (out, calls) = run(SappState::Loop.raw(), 50, 0, -1);
        assert_eq!(calls, [SappState::Loop, SappState::Fini]);
        assert_eq!((out.state, out.delay_ms), (SappState::Disabled, 50));
        assert!(out.torn_down);
    }

    #[test]
    fn test_fini_tears_down_once() {
        let (out, calls) = run(SappState::Fini.raw(), 10, 0, 0);
        assert_eq!(calls, [SappState::Fini]);
        assert_eq!(out.state, SappState::Disabled);
        assert!(out.torn_down);
    }

    #[test]
    fn test_unknown_state_is_an_anomaly() {
        let (out, calls) = run(0xAA, 40, 10, 10);
        assert!(calls.is_empty());
        assert!(out.anomaly);
        assert_eq!((out.state, out.delay_ms), (SappState::Disabled, 40));
    }
}

#[cfg(test)]
mod timer_tests {
    use sapp::time::{ms_to_ticks, SappTimer};

    #[test]
    fn test_ms_to_ticks() {
        // 1 kHz tick: one tick per millisecond
        assert_eq!(ms_to_ticks(1), 1);
        assert_eq!(ms_to_ticks(50), 50);
        assert_eq!(ms_to_ticks(0), 1);
        assert_eq!(ms_to_ticks(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_stopped_timer_never_expires() {
        let mut timer = SappTimer::new();
        assert!(!timer.is_running());
        for _ in 0..100 {
            assert!(!timer.tick());
        }
    }

    #[test]
    fn test_periodic_expiry() {
        let mut timer = SappTimer::new();
        timer.start(3);
        assert_eq!(timer.period_ms(), 3);

        // first expiry one tick late, then every period
        let fired: Vec<bool> = (0..10).map(|_| timer.tick()).collect();
        assert_eq!(
            fired,
            [false, false, false, true, false, false, true, false, false, true]
        );
        assert!(timer.is_running());
    }

    #[test]
    fn test_one_ms_timer_skips_the_next_tick() {
        let mut timer = SappTimer::new();
        timer.start(1);
        assert!(!timer.tick());
        assert!(timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_restart_and_stop() {
        let mut timer = SappTimer::new();
        timer.start(5);
        timer.tick();
        timer.tick();

        // reprogramming starts a full new period
        timer.start(2);
        assert_eq!(timer.remaining(), 3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());

        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.tick());
    }
}

#[cfg(test)]
mod ready_queue_tests {
    use sapp::sched::ReadyQueue;

    #[test]
    fn test_empty_queue() {
        let mut q: ReadyQueue<4> = ReadyQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.capacity(), 4);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_fifo_order_with_wraparound() {
        let mut q: ReadyQueue<3> = ReadyQueue::new();
        q.push(0).unwrap();
        q.push(1).unwrap();
        assert_eq!(q.pop(), Some(0));

        q.push(2).unwrap();
        q.push(0).unwrap();
        assert_eq!(q.len(), 3);
        assert_eq!(q.push(1), Err(1));

        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(0));
        assert!(q.is_empty());
    }

    #[test]
    fn test_zero_capacity() {
        let mut q: ReadyQueue<0> = ReadyQueue::new();
        assert_eq!(q.push(0), Err(0));
        assert_eq!(q.pop(), None);
    }
}

#[cfg(test)]
mod lock_tests {
    use std::cell::Cell;

    use sapp::error::SappError;
    use sapp::sync::RegistryLock;

    #[test]
    fn test_try_lock_is_exclusive() {
        let lock = RegistryLock::new();
        let guard = lock.try_lock().unwrap();
        assert!(lock.is_locked());
        assert!(lock.try_lock().is_none());

        drop(guard);
        assert!(!lock.is_locked());
        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn test_lock_times_out_on_clock() {
        let lock = RegistryLock::new();
        let _held = lock.try_lock().unwrap();

        let clock = Cell::new(0u32);
        let result = lock.lock(5, || {
            clock.set(clock.get() + 1);
            clock.get()
        });
        assert!(matches!(result, Err(SappError::LockUnavailable)));
        assert!(clock.get() >= 5);
    }

    #[test]
    fn test_zero_timeout_tries_once() {
        let lock = RegistryLock::new();
        let held = lock.try_lock().unwrap();
        assert!(matches!(lock.lock(0, || 0), Err(SappError::LockUnavailable)));

        drop(held);
        assert!(lock.lock(0, || 0).is_ok());
    }

    #[test]
    fn test_lock_gives_up_without_a_tick() {
        let lock = RegistryLock::new();
        let _held = lock.try_lock().unwrap();
        assert!(matches!(lock.lock(10, || 0), Err(SappError::LockUnavailable)));
    }
}

#[cfg(test)]
mod error_tests {
    use sapp::error::SappError;

    #[test]
    fn test_errno_values() {
        assert_eq!(SappError::LockUnavailable.errno(), -13);
        assert_eq!(SappError::CapacityExceeded.errno(), -11);
        assert_eq!(SappError::Busy.errno(), -16);
        assert_eq!(SappError::InvalidName.errno(), -22);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SappError::Busy.to_string(), "sapp is busy and cannot be restarted");
        let _ = format!("{:?}", SappError::CapacityExceeded);
    }
}

#[cfg(test)]
mod types_tests {
    use sapp::types::*;

    #[test]
    fn test_state_raw_roundtrip() {
        for state in [
            SappState::Startup,
            SappState::Disabled,
            SappState::Setup,
            SappState::Loop,
            SappState::Fini,
        ] {
            assert_eq!(SappState::from_raw(state.raw()), Some(state));
        }
        assert_eq!(SappState::from_raw(5), None);
    }

    #[test]
    fn test_restartable_states() {
        assert!(SappState::Startup.is_restartable());
        assert!(SappState::Disabled.is_restartable());
        assert!(!SappState::Setup.is_restartable());
        assert!(!SappState::Loop.is_restartable());
        assert!(!SappState::Fini.is_restartable());
    }

    #[test]
    fn test_state_names() {
        assert_eq!(SappState::Startup.as_str(), "STATE_STARTUP");
        assert_eq!(SappState::Loop.as_str(), "STATE_LOOP");
    }

    #[test]
    fn test_name_match_policies() {
        let literal: &'static str = "blinky";
        let copy: &'static str = Box::leak(String::from("blinky").into_boxed_str());

        assert!(NameMatch::Content.matches(literal, copy));
        assert!(NameMatch::Identity.matches(literal, literal));
        assert!(!NameMatch::Identity.matches(literal, copy));
        assert!(!NameMatch::Content.matches("blinky", "blink"));
    }
}

#[cfg(test)]
mod config_tests {
    use sapp::config::*;

    #[test]
    fn test_config_values() {
        assert_eq!(CFG_SAPP_MAX, 10);
        assert!(CFG_TICK_RATE_HZ >= 100, "Tick rate too slow for ms delays");
        assert!(CFG_LOCK_TIMEOUT_MS > 0);
        assert!(CFG_LOCK_SPIN_MAX > 0);
        assert_eq!(CFG_NAME_MATCH, sapp::types::NameMatch::Content);
    }
}
