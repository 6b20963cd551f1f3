//! Single-pole low-pass filter on the raw command.
//!
//! Discrete first-order IIR at a fixed sample interval:
//!
//! ```text
//! y[n] = (dt/tau) · x[n] + (1 − dt/tau) · y[n−1]
//! ```
//!
//! Steady-state gain is 1; a step settles to ~63 % after `tau`.

/// Low-pass filter state. One instance per command channel.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    alpha: f32,
    input: f32,
    output: f32,
}

impl LowPassFilter {
    /// Filter seeded at `neutral` (no command).
    pub fn new(dt_s: f32, tau_s: f32, neutral: f32) -> Self {
        Self::with_prefill(dt_s, tau_s, neutral)
    }

    /// Filter whose history is pre-loaded with `prefill`, so the first
    /// output starts from there instead of ramping up from zero.
    pub fn with_prefill(dt_s: f32, tau_s: f32, prefill: f32) -> Self {
        Self {
            alpha: dt_s / tau_s,
            input: prefill,
            output: prefill,
        }
    }

    /// Advance one sample. Non-finite samples are dropped and the previous
    /// output is returned unchanged.
    pub fn step(&mut self, input: f32) -> f32 {
        if !input.is_finite() {
            return self.output;
        }
        self.input = input;
        self.output = self.alpha * input - (self.alpha - 1.0) * self.output;
        self.output
    }

    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn last_input(&self) -> f32 {
        self.input
    }

    /// Discard history and hold at `value`.
    pub fn reset(&mut self, value: f32) {
        self.input = value;
        self.output = value;
    }
}
