//! Hardware adapters: bridges LEDC, GPIO and ADC to the port traits.
//!
//! This is the only module that turns domain values into register writes.
//! On non-espidf targets the underlying `hw_init` helpers are no-op stubs,
//! so the adapters still construct and run.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::{error, info};

use crate::app::ports::{CommandSource, OutputMode, PwmTimer, TimerChannel, TimerConfig};
use crate::drivers::hw_init;
use crate::pulse::PulseRange;

// ── Digital output ────────────────────────────────────────────

/// A GPIO configured as push-pull output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub const fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}

// ── LEDC timer ────────────────────────────────────────────────

/// One LEDC channel bound to a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcPin {
    pub channel: u32,
    pub gpio: i32,
}

/// An LEDC timer and two of its channels, presented as a [`PwmTimer`].
///
/// LEDC has no compare/top registers; it has a duty value at a fixed
/// resolution. Compare ticks are rescaled from the `0..=top` frame to
/// `0..2^bits` duty, and the output polarity is applied in software.
pub struct LedcTimer {
    timer: u32,
    resolution_bits: u32,
    pins: [LedcPin; 2],
    top: u32,
    mode: OutputMode,
}

impl LedcTimer {
    pub fn new(timer: u32, resolution_bits: u32, pins: [LedcPin; 2]) -> Self {
        Self {
            timer,
            resolution_bits,
            pins,
            top: 0,
            mode: OutputMode::Disconnected,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn top(&self) -> u32 {
        self.top
    }
}

/// LEDC duty for a compare value, i.e. the high time of the frame.
///
/// Non-inverting is high for `ticks + 1` counts, inverting is high for the
/// remaining `top - ticks`. `Disconnected` has no duty.
pub fn ledc_duty(mode: OutputMode, ticks: u32, top: u32, resolution_bits: u32) -> u32 {
    let frame = u64::from(top) + 1;
    let ticks = u64::from(ticks.min(top));
    let high = match mode {
        OutputMode::Disconnected => return 0,
        OutputMode::NonInverting => ticks + 1,
        OutputMode::Inverting => u64::from(top) - ticks,
    };
    let full = 1u64 << resolution_bits.min(20);
    ((high * full + frame / 2) / frame).min(full) as u32
}

impl PwmTimer for LedcTimer {
    fn configure(&mut self, config: TimerConfig) {
        self.top = config.top;
        if let Err(e) =
            hw_init::ledc_timer_setup(self.timer, config.frequency_hz, self.resolution_bits)
        {
            error!("ledc: timer {} setup failed: {}", self.timer, e);
        }
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        let was_attached = self.mode != OutputMode::Disconnected;
        let attach = mode != OutputMode::Disconnected;
        self.mode = mode;
        if attach == was_attached {
            return;
        }
        for pin in self.pins {
            let result = if attach {
                hw_init::ledc_attach(pin.channel, self.timer, pin.gpio)
            } else {
                hw_init::ledc_detach(pin.channel, pin.gpio)
            };
            if let Err(e) = result {
                error!("ledc: channel {} -> {:?} failed: {}", pin.channel, mode, e);
            }
        }
        info!("ledc: timer {} outputs {:?}", self.timer, mode);
    }

    fn set_compare(&mut self, channel: TimerChannel, ticks: u32) {
        if self.mode == OutputMode::Disconnected {
            return;
        }
        let duty = ledc_duty(self.mode, ticks, self.top, self.resolution_bits);
        hw_init::ledc_set(self.pins[channel.index()].channel, duty);
    }
}

// ── Command input ─────────────────────────────────────────────

/// Two potentiometers on ADC1, read as raw pulsewidths.
pub struct AnalogCommandInput {
    range: PulseRange,
}

impl AnalogCommandInput {
    pub fn new(range: PulseRange) -> Self {
        Self { range }
    }
}

/// Linear map of a 12-bit reading onto `min_us..=max_us`.
pub fn adc_to_pulsewidth(raw: u16, range: &PulseRange) -> f32 {
    let frac = f32::from(raw.min(hw_init::ADC_FULL_SCALE)) / f32::from(hw_init::ADC_FULL_SCALE);
    range.min_us + frac * (range.max_us - range.min_us)
}

impl CommandSource for AnalogCommandInput {
    /// `None` if either channel fails to convert.
    fn read(&mut self) -> Option<[f32; 2]> {
        let left = hw_init::adc1_read(hw_init::ADC1_CH_LEFT)?;
        let right = hw_init::adc1_read(hw_init::ADC1_CH_RIGHT)?;
        Some([
            adc_to_pulsewidth(left, &self.range),
            adc_to_pulsewidth(right, &self.range),
        ])
    }
}
