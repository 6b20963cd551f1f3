//! Slew-rate limiter on the filtered command.
//!
//! Each step measures wall-clock time since the previous step and bounds
//! the change in output to `max_rate · dt`. Elapsed time is measured, not
//! assumed, so a late main-loop iteration is allowed a proportionally
//! larger move.
//!
//! The first step measures from construction. If the limiter is built long
//! before it is first stepped, that first step may move a long way. This is
//! kept as-is: there is no cap on `dt`.

use crate::app::ports::MonotonicClock;

/// Default slew limit (µs per second).
pub const DEFAULT_MAX_RATE_US_PER_S: f32 = 50.0;

pub struct RateLimiter<C: MonotonicClock> {
    clock: C,
    max_rate: f32,
    last_output: f32,
    last_run_ms: u32,
}

impl<C: MonotonicClock> RateLimiter<C> {
    /// `max_rate` is in output units per second. The clock is read once
    /// here to timestamp the start value.
    pub fn new(clock: C, max_rate: f32, start_value: f32) -> Self {
        let last_run_ms = clock.now_ms();
        Self {
            clock,
            max_rate,
            last_output: start_value,
            last_run_ms,
        }
    }

    /// Bound `input` to the band reachable since the last step.
    ///
    /// NaN holds the previous output; infinities land on the band edge.
    pub fn step(&mut self, input: f32) -> f32 {
        let now = self.clock.now_ms();
        let dt = now.wrapping_sub(self.last_run_ms) as f32 / 1000.0;
        self.last_run_ms = now;

        let reach = dt * self.max_rate;
        let max = self.last_output + reach;
        let min = self.last_output - reach;

        let output = if input.is_nan() {
            self.last_output
        } else if input > max {
            max
        } else if input < min {
            min
        } else {
            input
        };

        self.last_output = output;
        output
    }

    pub fn output(&self) -> f32 {
        self.last_output
    }

    /// Jump to `value` and restart the timing reference from now.
    pub fn reset(&mut self, value: f32) {
        self.last_output = value;
        self.last_run_ms = self.clock.now_ms();
    }
}
