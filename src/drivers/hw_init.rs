//! One-shot peripheral setup and thin register helpers.
//!
//! Configures ADC1 for the two command pots and the status LED pins as
//! GPIO outputs. LEDC timers and channels are configured on demand by the
//! [`LedcTimer`](crate::adapters::hardware::LedcTimer) adapter through the
//! `ledc_*` helpers below. Everything here is raw ESP-IDF sys calls; the
//! host build gets no-op stubs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcTimerFailed(i32),
    LedcChannelFailed(i32),
    TickTimerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcTimerFailed(rc) => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::LedcChannelFailed(rc) => write!(f, "LEDC channel config failed (rc={})", rc),
            Self::TickTimerFailed(rc) => write!(f, "indicator tick timer failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

// ── Channel assignments ───────────────────────────────────────

pub const LEDC_TIMER_DRIVE: u32 = 0;
pub const LEDC_TIMER_INDICATOR: u32 = 1;

pub const LEDC_CH_DRIVE_LEFT: u32 = 0;
pub const LEDC_CH_DRIVE_RIGHT: u32 = 1;
pub const LEDC_CH_LED_LEFT: u32 = 2;
pub const LEDC_CH_LED_RIGHT: u32 = 3;

pub const ADC1_CH_LEFT: u32 = 0;
pub const ADC1_CH_RIGHT: u32 = 1;
/// Full-scale reading at 12-bit width.
pub const ADC_FULL_SCALE: u16 = 4095;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_status_outputs()?;
    }
    info!("hw_init: ADC and status GPIO configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: `ADC1_HANDLE` is written once by `init_adc()` before the control
/// loop starts and only read from the main task afterwards.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for channel in [ADC1_CH_LEFT, ADC1_CH_RIGHT] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }
    Ok(())
}

/// Raw 12-bit reading, or `None` on a read error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract; main-task access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.clamp(0, i32::from(ADC_FULL_SCALE)) as u16)
}

/// Host stub: mid-scale, i.e. a centred pot.
#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Option<u16> {
    Some(ADC_FULL_SCALE / 2)
}

// ── GPIO outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_status_outputs() -> Result<(), HwInitError> {
    for pin in [pins::LED_LEFT_GPIO, pins::LED_RIGHT_GPIO] {
        unsafe { configure_output(pin) }?;
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn configure_output(pin: i32) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pin, 0) };
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: register write to a pin configured as output; callable from
    // the main task and the esp_timer task.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM ──────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn ledc_timer_setup(
    timer: u32,
    frequency_hz: u32,
    resolution_bits: u32,
) -> Result<(), HwInitError> {
    let cfg = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: timer,
        duty_resolution: resolution_bits,
        freq_hz: frequency_hz,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: plain config struct, main task only.
    let ret = unsafe { ledc_timer_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcTimerFailed(ret));
    }
    info!("hw_init: LEDC timer {} at {} Hz, {}-bit", timer, frequency_hz, resolution_bits);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_timer_setup(
    _timer: u32,
    _frequency_hz: u32,
    _resolution_bits: u32,
) -> Result<(), HwInitError> {
    Ok(())
}

/// Route `gpio` to `channel` on `timer`, starting at duty 0.
#[cfg(target_os = "espidf")]
pub fn ledc_attach(channel: u32, timer: u32, gpio: i32) -> Result<(), HwInitError> {
    let cfg = ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel,
        timer_sel: timer,
        gpio_num: gpio,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    // SAFETY: plain config struct, main task only.
    let ret = unsafe { ledc_channel_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcChannelFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_attach(_channel: u32, _timer: u32, _gpio: i32) -> Result<(), HwInitError> {
    Ok(())
}

/// Stop `channel` and hand `gpio` back to the GPIO matrix as a plain output.
#[cfg(target_os = "espidf")]
pub fn ledc_detach(channel: u32, gpio: i32) -> Result<(), HwInitError> {
    // SAFETY: channel was attached by ledc_attach(); main task only.
    unsafe {
        ledc_stop(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, 0);
        gpio_reset_pin(gpio);
        configure_output(gpio)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_detach(_channel: u32, _gpio: i32) -> Result<(), HwInitError> {
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) {
    // SAFETY: duty register writes on an attached channel; main task only.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u32) {}
