//! Panic and fault handlers for firmware builds
//!
//! A panic or fault inside a sub-app callback takes the whole worker down,
//! so both handlers stop the core after logging what they can.

#[cfg(all(feature = "defmt", target_arch = "arm"))]
use defmt_rtt as _;

#[cfg(all(feature = "defmt", target_arch = "arm"))]
use panic_probe as _;

#[cfg(all(feature = "defmt", target_arch = "arm"))]
#[defmt::panic_handler]
fn defmt_panic() -> ! {
    cortex_m::asm::udf()
}

#[cfg(all(not(feature = "defmt"), target_arch = "arm"))]
#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {
        cortex_m::asm::udf();
    }
}

#[cfg(target_arch = "arm")]
#[cortex_m_rt::exception]
unsafe fn HardFault(ef: &cortex_m_rt::ExceptionFrame) -> ! {
    crate::error!("hard fault at pc={=u32:#x} lr={=u32:#x}", ef.pc(), ef.lr());
    loop {
        cortex_m::asm::udf();
    }
}

// log lines are stamped with scheduler ticks since boot
#[cfg(all(feature = "defmt", target_arch = "arm"))]
defmt::timestamp!("{=u32}", crate::time::uptime());
