//! Per-channel conditioning chain: sanitise → low-pass → slew limit.

use crate::app::ports::MonotonicClock;
use crate::config::ThrusterConfig;
use crate::control::filter::LowPassFilter;
use crate::control::limiter::RateLimiter;
use crate::pulse::PulseRange;

/// Conditions one raw command stream into a drive pulsewidth.
///
/// The output is deliberately not clamped; the PWM driver clamps at the
/// boundary.
pub struct CommandChain<C: MonotonicClock> {
    range: PulseRange,
    filter: LowPassFilter,
    limiter: RateLimiter<C>,
}

impl<C: MonotonicClock> CommandChain<C> {
    /// Both stages start at neutral.
    pub fn new(config: &ThrusterConfig, clock: C) -> Self {
        let neutral = config.pulse.neutral_us;
        Self {
            range: config.pulse,
            filter: LowPassFilter::new(config.filter.dt_s, config.filter.tau_s, neutral),
            limiter: RateLimiter::new(clock, config.limiter.max_rate_us_per_s, neutral),
        }
    }

    pub fn step(&mut self, raw: f32) -> f32 {
        let filtered = self.filter.step(self.range.sanitize(raw));
        self.limiter.step(filtered)
    }

    pub fn output(&self) -> f32 {
        self.limiter.output()
    }

    pub fn filter(&self) -> &LowPassFilter {
        &self.filter
    }

    /// Return both stages to neutral, bypassing the slew limit.
    pub fn reset(&mut self) {
        let neutral = self.range.neutral_us;
        self.filter.reset(neutral);
        self.limiter.reset(neutral);
    }
}
