//! Port layer - CPU-specific glue
//!
//! SysTick programming for the tick source and the idle wait used by the
//! worker loop.

/// Program SysTick to interrupt every `cnts` core clock cycles
///
/// The `SysTick` handler is expected to call
/// [`Scheduler::tick`](crate::kernel::Scheduler::tick).
#[cfg(target_arch = "arm")]
pub fn systick_init(mut syst: cortex_m::peripheral::SYST, cnts: u32) {
    use cortex_m::peripheral::syst::SystClkSource;

    syst.set_reload(cnts - 1);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_interrupt();
    syst.enable_counter();
}

/// Idle until something may have become ready
#[inline]
pub fn wait_for_event() {
    #[cfg(target_arch = "arm")]
    cortex_m::asm::wfi();

    #[cfg(not(target_arch = "arm"))]
    core::hint::spin_loop();
}
