//! Sub-app demo - LED blinker and a bounded worker on STM32F401
//!
//! SysTick drives the scheduler tick, `main` becomes the worker.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use cortex_m_rt::{entry, exception};
use sapp::{DefaultScheduler, Scheduler, SubApp, CFG_TICK_RATE_HZ};

use stm32_metapac as pac;

static SCHED: DefaultScheduler = Scheduler::new();

// ============ LED Control ============

fn led_init() {
    pac::RCC.ahb1enr().modify(|w| w.set_gpioaen(true));
    pac::GPIOA.moder().modify(|w| w.set_moder(5, pac::gpio::vals::Moder::OUTPUT));
    pac::GPIOA.otyper().modify(|w| w.set_ot(5, pac::gpio::vals::Ot::PUSHPULL));
}

fn led_set(on: bool) {
    if on {
        pac::GPIOA.bsrr().write(|w| w.set_bs(5, true));
    } else {
        pac::GPIOA.bsrr().write(|w| w.set_br(5, true));
    }
}

// ============ Sub-apps ============

/// Toggles the LED until disabled
struct Blinker {
    on: AtomicBool,
    enabled: AtomicBool,
}

impl SubApp for Blinker {
    fn setup(&self) -> i32 {
        self.enabled.store(true, Ordering::Relaxed);
        led_init();
        500
    }

    fn poll(&self) -> i32 {
        if !self.enabled.load(Ordering::Relaxed) {
            return -1;
        }
        let on = !self.on.fetch_xor(true, Ordering::Relaxed);
        led_set(on);
        500
    }

    fn fini(&self) {
        led_set(false);
    }
}

static BLINKER: Blinker = Blinker {
    on: AtomicBool::new(false),
    enabled: AtomicBool::new(false),
};

const WORK_MAX: u32 = 40;
static WORK_COUNT: AtomicU32 = AtomicU32::new(0);

fn work_setup() -> i32 {
    WORK_COUNT.store(0, Ordering::Relaxed);
    sapp::info!("work setup");
    100
}

fn work_loop() -> i32 {
    let n = WORK_COUNT.fetch_add(1, Ordering::Relaxed) + 1;
    if n % 10 == 0 {
        sapp::info!("working {}/{}", n, WORK_MAX);
    }
    if n >= WORK_MAX {
        // done: stop the blinker as well
        BLINKER.enabled.store(false, Ordering::Relaxed);
        return 0;
    }
    100
}

// ============ Tick ============

#[exception]
fn SysTick() {
    SCHED.tick();
}

// ============ Main ============

#[entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().expect("peripherals taken twice");

    SCHED.start_app("blinker", &BLINKER).expect("blinker start failed");
    SCHED.start("worker", work_setup, work_loop).expect("worker start failed");

    sapp::port::systick_init(cp.SYST, 16_000_000 / CFG_TICK_RATE_HZ);

    sapp::info!("Starting sapp worker");
    SCHED.run()
}
