//! Drive PWM output (two ESC / servo channels on one timer).
//!
//! The timer is configured once, in [`PwmOutput::new`], for a fixed frame
//! rate with non-inverting output on both channels. After that only the
//! compare registers change.
//!
//! ## Pulsewidth handling
//!
//! - `pw <= 0` means "no signal yet" and is sent as neutral, never as a
//!   zero-length pulse (an ESC would read that as signal loss).
//! - Everything else is clamped to `[min_us, max_us]` here, at the boundary.

use log::info;

use crate::app::ports::{OutputMode, PwmTimer, TimerChannel, TimerConfig};
use crate::config::PwmConfig;
use crate::pulse::PulseRange;

pub struct PwmOutput<T: PwmTimer> {
    timer: T,
    range: PulseRange,
    counts_per_us: f32,
    last_ticks: [u32; 2],
}

impl<T: PwmTimer> PwmOutput<T> {
    /// Take ownership of the drive timer and configure it.
    pub fn new(mut timer: T, pwm: &PwmConfig, range: PulseRange) -> Self {
        let period_us = pwm.period_us();
        let top = Self::to_ticks(period_us as f32, pwm.counts_per_us);

        timer.configure(TimerConfig {
            frequency_hz: pwm.frequency_hz,
            top,
        });
        timer.set_output_mode(OutputMode::NonInverting);

        info!(
            "pwm_output: {} Hz frame ({} us, top={})",
            pwm.frequency_hz, period_us, top
        );

        Self {
            timer,
            range,
            counts_per_us: pwm.counts_per_us,
            last_ticks: [0; 2],
        }
    }

    /// Command `channel` to `pulsewidth` µs. Returns the compare value written.
    pub fn write(&mut self, channel: TimerChannel, pulsewidth: f32) -> u32 {
        let ticks = self.compare_ticks(pulsewidth);
        critical_section::with(|_| {
            self.timer.set_compare(channel, ticks);
        });
        self.last_ticks[channel.index()] = ticks;
        ticks
    }

    /// Compare value that produces `pulsewidth` after neutral substitution
    /// and clamping.
    pub fn compare_ticks(&self, pulsewidth: f32) -> u32 {
        // NaN fails the comparison and lands on neutral too.
        let pw = if pulsewidth > 0.0 {
            self.range.clamp(pulsewidth)
        } else {
            self.range.neutral_us
        };
        Self::to_ticks(pw, self.counts_per_us)
    }

    pub fn last_ticks(&self, channel: TimerChannel) -> u32 {
        self.last_ticks[channel.index()]
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// The counter runs `0..=n-1` for an n-count interval.
    fn to_ticks(us: f32, counts_per_us: f32) -> u32 {
        ((us * counts_per_us).round() as u32).saturating_sub(1)
    }
}
