//! Pulsewidth → status mapping.
//!
//! Converts a commanded pulsewidth into either a blink period (cooperative
//! blinker) or a brightness level (indicator dimmer). Both are driven by the
//! deviation from neutral only, so forward and reverse look the same.
//!
//! | Deviation `d`                 | Period            | Intensity        |
//! |-------------------------------|-------------------|------------------|
//! | `d ≤ deadzone`                | 0 (solid on)      | `min` (dark)     |
//! | `deadzone < d < half_range`   | slowest → fastest | `min` → `max`    |
//! | `d ≥ half_range`              | fastest           | `max`            |
//!
//! The period axis is inverted on purpose: more command ⇒ shorter period ⇒
//! faster blink.

use crate::config::{BlinkConfig, IntensityConfig, ThrusterConfig};
use crate::pulse::PulseRange;

/// Stateless mapper. Cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseMapper {
    range: PulseRange,
    blink: BlinkConfig,
    intensity: IntensityConfig,
}

impl PulseMapper {
    pub fn new(range: PulseRange, blink: BlinkConfig, intensity: IntensityConfig) -> Self {
        Self {
            range,
            blink,
            intensity,
        }
    }

    pub fn from_config(config: &ThrusterConfig) -> Self {
        Self::new(config.pulse, config.blink, config.intensity)
    }

    /// Blink period in milliseconds; 0 means "steady on".
    pub fn pulsewidth_to_period(&self, pw: f32) -> u32 {
        let d = self.range.deviation(pw);
        if d <= self.range.deadzone_us {
            return 0;
        }
        let period = self.interpolate(
            d,
            self.blink.slowest_period_ms as f32,
            self.blink.fastest_period_ms as f32,
        );
        period.round() as u32
    }

    /// Brightness level; `intensity.min` inside the deadzone.
    pub fn pulsewidth_to_intensity(&self, pw: f32) -> u8 {
        let d = self.range.deviation(pw);
        if d <= self.range.deadzone_us {
            return self.intensity.min;
        }
        let level = self.interpolate(
            d,
            f32::from(self.intensity.min),
            f32::from(self.intensity.max),
        );
        level.round().clamp(0.0, 255.0) as u8
    }

    pub fn range(&self) -> &PulseRange {
        &self.range
    }

    /// Linear map of `d` from `[deadzone, half_range]` onto
    /// `[at_edge, at_full]`, saturating outside.
    fn interpolate(&self, d: f32, at_edge: f32, at_full: f32) -> f32 {
        let span = self.range.half_range_us - self.range.deadzone_us;
        let t = if span > 0.0 {
            ((d - self.range.deadzone_us) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        at_edge + t * (at_full - at_edge)
    }
}

impl Default for PulseMapper {
    fn default() -> Self {
        Self::from_config(&ThrusterConfig::default())
    }
}
