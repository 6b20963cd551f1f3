//! Port traits: the boundary between the signal path and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ control / drivers (domain)
//! ```
//!
//! The filter, limiter, blinker, indicator and PWM driver consume these
//! traits via generics, so none of them touch registers directly. Digital
//! outputs use `embedded_hal::digital::OutputPin` rather than a local trait.

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps at `u32::MAX` (~49 days); callers
/// use wrapping subtraction.
pub trait MonotonicClock {
    fn now_ms(&self) -> u32;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Hardware timer port
// ───────────────────────────────────────────────────────────────

/// One of the two compare channels of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerChannel {
    A,
    B,
}

impl TimerChannel {
    pub const ALL: [TimerChannel; 2] = [TimerChannel::A, TimerChannel::B];

    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// How the compare match drives the output pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pins detached from the timer; plain GPIO writes take effect.
    Disconnected,
    /// Output high from counter reset until compare match.
    NonInverting,
    /// Output low until compare match: a compare value of `top` is dark.
    Inverting,
}

/// Timer frame setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub frequency_hz: u32,
    /// Counter value at which the frame restarts.
    pub top: u32,
}

/// Fixed-frequency hardware timer with two compare channels.
///
/// `configure` runs once per timer at startup. `set_output_mode` may be
/// called again at runtime to switch polarity without restarting the
/// counter.
pub trait PwmTimer {
    fn configure(&mut self, config: TimerConfig);

    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write a compare register. `ticks` is in timer counts, `0..=top`.
    fn set_compare(&mut self, channel: TimerChannel, ticks: u32);
}

// ───────────────────────────────────────────────────────────────
// Command source port
// ───────────────────────────────────────────────────────────────

/// Raw command pair `[left, right]` in microseconds.
///
/// Values are unconditioned and may be out of range or non-finite; the
/// pipeline sanitises them. `None` means the input could not be read at
/// all, and the commander parks both channels at neutral.
pub trait CommandSource {
    fn read(&mut self) -> Option<[f32; 2]>;
}
