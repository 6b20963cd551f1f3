//! Periodic indicator tick using ESP-IDF's esp_timer API.
//!
//! The callback runs in the esp_timer task (not a raw ISR), which is where
//! [`Indicator::on_tick`](crate::drivers::indicator::Indicator::on_tick)
//! executes. The tick function is passed through the timer's `arg`
//! pointer, so firmware can hand in any plain `fn()`.
//!
//! On the host no timer is started; tests drive `on_tick` directly.

use crate::drivers::hw_init::HwInitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// Tick period for a callback rate, at least 50 µs (esp_timer's floor for
/// periodic timers).
pub fn tick_period_us(frequency_hz: u32) -> u64 {
    (1_000_000 / u64::from(frequency_hz.max(1))).max(50)
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_trampoline(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was produced from a `fn()` in start_indicator_tick().
    let tick: fn() = unsafe { core::mem::transmute::<*mut core::ffi::c_void, fn()>(arg) };
    tick();
}

/// Start calling `tick` at `frequency_hz`. Call once, from the main task.
#[cfg(target_os = "espidf")]
pub fn start_indicator_tick(frequency_hz: u32, tick: fn()) -> Result<(), HwInitError> {
    let period_us = tick_period_us(frequency_hz);
    // SAFETY: TICK_TIMER is written here once, before the timer can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_trampoline),
            arg: tick as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"indicator".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TickTimerFailed(ret));
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, period_us);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TickTimerFailed(ret));
        }
    }
    info!("hw_timer: indicator tick every {} us", period_us);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_indicator_tick(frequency_hz: u32, _tick: fn()) -> Result<(), HwInitError> {
    log::info!(
        "hw_timer(sim): indicator tick not started ({} us period)",
        tick_period_us(frequency_hz)
    );
    Ok(())
}
