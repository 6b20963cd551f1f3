//! System configuration parameters
//!
//! All tunable parameters for the thruster commander. The defaults match
//! the stock board: 50 Hz servo frame, 1 µs timer resolution, 1000–2000 µs
//! travel around a 1500 µs neutral.

use serde::{Deserialize, Serialize};

use crate::control::limiter::DEFAULT_MAX_RATE_US_PER_S;
use crate::error::ConfigError;
use crate::pulse::PulseRange;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterConfig {
    pub pulse: PulseRange,
    pub filter: FilterConfig,
    pub limiter: LimiterConfig,
    pub pwm: PwmConfig,
    pub blink: BlinkConfig,
    pub intensity: IntensityConfig,
    pub indicator: IndicatorConfig,
    /// Which status output the firmware drives.
    pub status: StatusStyle,
}

/// Single-pole low-pass filter on the raw command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Sample interval (seconds). Also the main-loop period.
    pub dt_s: f32,
    /// Time constant (seconds).
    pub tau_s: f32,
}

/// Slew-rate limit on the filtered command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Maximum rate of change (µs per second).
    pub max_rate_us_per_s: f32,
}

/// Drive PWM timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PwmConfig {
    /// Frame rate of the drive signal (Hz).
    pub frequency_hz: u32,
    /// Timer counts per microsecond (clock / prescaler / 1e6).
    pub counts_per_us: f32,
}

/// Cooperative blinker period range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// Period at full deflection (ms).
    pub fastest_period_ms: u32,
    /// Period just outside the deadzone (ms).
    pub slowest_period_ms: u32,
}

/// Dimmer brightness range (0 = dark).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityConfig {
    pub min: u8,
    pub max: u8,
}

/// Interrupt-driven indicator timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Rate at which the timer callback fires (Hz).
    pub tick_hz: u32,
    /// Time to play one full 16-bit pattern (ms).
    pub pattern_cycle_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusStyle {
    /// Two GPIO LEDs toggled from the main loop.
    Blinker,
    /// Timer-driven dimmer / pattern player.
    Indicator,
}

impl IndicatorConfig {
    /// Callback firings per pattern bit. Never zero.
    pub fn ticks_per_step(&self) -> u16 {
        let ticks = u64::from(self.tick_hz) * u64::from(self.pattern_cycle_ms) / 1000 / 16;
        ticks.clamp(1, u64::from(u16::MAX)) as u16
    }
}

impl PwmConfig {
    /// Frame period in microseconds.
    pub fn period_us(&self) -> u32 {
        1_000_000 / self.frequency_hz.max(1)
    }
}

impl Default for ThrusterConfig {
    fn default() -> Self {
        Self {
            pulse: PulseRange::default(),
            filter: FilterConfig {
                dt_s: 0.02,
                tau_s: 0.25,
            },
            limiter: LimiterConfig {
                max_rate_us_per_s: DEFAULT_MAX_RATE_US_PER_S,
            },
            pwm: PwmConfig {
                frequency_hz: 50,
                counts_per_us: 1.0,
            },
            blink: BlinkConfig {
                fastest_period_ms: 200,
                slowest_period_ms: 2000,
            },
            intensity: IntensityConfig { min: 0, max: 255 },
            indicator: IndicatorConfig {
                tick_hz: 488,
                pattern_cycle_ms: 2000,
            },
            status: StatusStyle::Blinker,
        }
    }
}

impl ThrusterConfig {
    /// Reject incoherent parameter sets. Runtime commands are clamped, but a
    /// bad configuration is refused outright at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pulse;
        let all_finite = [
            p.min_us,
            p.max_us,
            p.neutral_us,
            p.deadzone_us,
            p.half_range_us,
            self.filter.dt_s,
            self.filter.tau_s,
            self.limiter.max_rate_us_per_s,
            self.pwm.counts_per_us,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::NonFinite);
        }
        if p.min_us <= 0.0 || p.min_us >= p.max_us {
            return Err(ConfigError::PulseRangeInverted);
        }
        if p.neutral_us < p.min_us || p.neutral_us > p.max_us {
            return Err(ConfigError::NeutralOutOfRange);
        }
        if p.deadzone_us < 0.0 || p.deadzone_us >= p.half_range_us {
            return Err(ConfigError::DeadzoneExceedsHalfRange);
        }
        if self.filter.dt_s <= 0.0 || self.filter.tau_s < self.filter.dt_s {
            return Err(ConfigError::FilterUnstable);
        }
        if self.limiter.max_rate_us_per_s <= 0.0 {
            return Err(ConfigError::RateLimitNotPositive);
        }
        if self.pwm.frequency_hz == 0 || self.pwm.counts_per_us <= 0.0 {
            return Err(ConfigError::PwmTiming);
        }
        if p.max_us > self.pwm.period_us() as f32 {
            return Err(ConfigError::PulseExceedsFrame);
        }
        if self.blink.fastest_period_ms == 0
            || self.blink.fastest_period_ms > self.blink.slowest_period_ms
        {
            return Err(ConfigError::BlinkPeriods);
        }
        if self.intensity.min > self.intensity.max {
            return Err(ConfigError::IntensityInverted);
        }
        if self.indicator.tick_hz == 0 || self.indicator.pattern_cycle_ms == 0 {
            return Err(ConfigError::IndicatorTiming);
        }
        Ok(())
    }
}
