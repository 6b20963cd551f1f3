//! Pulsewidth domain: the commanded signal in microseconds.
//!
//! Every stage of the pipeline speaks pulsewidths. Upstream stages (filter,
//! limiter) may transiently produce values outside `[min_us, max_us]`; only
//! the consumers at the output boundary (PWM driver, mapper) clamp.
//!
//! ## Non-finite values
//!
//! Raw commands come from ADC arithmetic and can, in principle, be NaN or
//! infinite. These are pinned to the nearest bound: `+inf` → `max_us`,
//! `-inf` → `min_us`. NaN has no nearest bound and is treated as "no
//! command", i.e. `neutral_us`.

use serde::{Deserialize, Serialize};

/// Bounds and reference points of the pulsewidth domain (all µs).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseRange {
    /// Lowest pulsewidth ever sent to the drive (full reverse).
    pub min_us: f32,
    /// Highest pulsewidth ever sent to the drive (full forward).
    pub max_us: f32,
    /// Stopped.
    pub neutral_us: f32,
    /// Deviation from neutral treated as "no command" by the status mapping.
    pub deadzone_us: f32,
    /// Deviation from neutral at which the status mapping saturates.
    pub half_range_us: f32,
}

impl PulseRange {
    pub const fn new(
        min_us: f32,
        max_us: f32,
        neutral_us: f32,
        deadzone_us: f32,
        half_range_us: f32,
    ) -> Self {
        Self {
            min_us,
            max_us,
            neutral_us,
            deadzone_us,
            half_range_us,
        }
    }

    /// Pin non-finite values without otherwise constraining `pw`.
    pub fn sanitize(&self, pw: f32) -> f32 {
        if pw.is_nan() {
            self.neutral_us
        } else if pw == f32::INFINITY {
            self.max_us
        } else if pw == f32::NEG_INFINITY {
            self.min_us
        } else {
            pw
        }
    }

    /// Clamp into `[min_us, max_us]`.
    pub fn clamp(&self, pw: f32) -> f32 {
        self.sanitize(pw).clamp(self.min_us, self.max_us)
    }

    /// Absolute distance from neutral after clamping.
    pub fn deviation(&self, pw: f32) -> f32 {
        (self.clamp(pw) - self.neutral_us).abs()
    }

    /// Inclusive: a deviation of exactly `deadzone_us` is still "no command".
    pub fn in_deadzone(&self, pw: f32) -> bool {
        self.deviation(pw) <= self.deadzone_us
    }
}

impl Default for PulseRange {
    fn default() -> Self {
        Self::new(1000.0, 2000.0, 1500.0, 25.0, 500.0)
    }
}
