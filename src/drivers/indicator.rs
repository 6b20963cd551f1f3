//! Interrupt-driven status indicator.
//!
//! Two LEDs hang off the compare outputs of a small timer that serves two
//! purposes:
//!
//! - **Dimming**: the timer drives the pins in inverting PWM mode and the
//!   compare value sets brightness.
//! - **Blinking**: the pins are detached from the timer, and the timer's
//!   periodic callback plays a 16-bit pattern on them, one bit per step,
//!   LSB first.
//!
//! ## Execution contexts
//!
//! The main loop calls [`Indicator::set_dim_level`] and
//! [`Indicator::set_blink_pattern`]; the timer callback calls
//! [`Indicator::on_tick`]. They share mode, pattern, playback index and the
//! tick counter. Every read-modify-write of that state, and every pin
//! write that depends on it, happens inside one `critical_section::with`
//! block. Timer reconfiguration stays outside the critical section and is
//! ordered around the mode flag: playback stops before the timer takes the
//! pins, and the timer releases them before playback resumes. A pattern bit
//! is therefore never written while the timer drives the pins in PWM.
//!
//! The shared state lives inside the `Indicator` value. Firmware places that
//! value in a `static` so the timer callback can reach it; tests just own one.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::{OutputPin, PinState};
use log::debug;

use crate::app::ports::{OutputMode, PwmTimer, TimerChannel, TimerConfig};

/// Bits per pattern.
pub const PATTERN_LEN: u8 = 16;

/// Stock blink patterns, played LSB first.
pub mod patterns {
    /// One short blink.
    pub const SHORT_1: u16 = 0b0000_0001;
    /// Two short blinks.
    pub const SHORT_2: u16 = 0b0000_0101;
    /// Three short blinks.
    pub const SHORT_3: u16 = 0b0001_0101;
    /// Four short blinks.
    pub const SHORT_4: u16 = 0b0101_0101;
    /// One long blink.
    pub const LONG_1: u16 = 0b0000_0111;
    /// Two long blinks.
    pub const LONG_2: u16 = 0b0111_0111;
    /// Continuous short blinking.
    pub const SHORT_CONTINUOUS: u16 = 0b0101_0101_0101_0101;
    /// Continuous long blinking.
    pub const LONG_CONTINUOUS: u16 = 0b0111_0111_0111_0111;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    Dimming,
    Blinking,
}

/// State shared between the main loop and the timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorState {
    pub mode: IndicatorMode,
    pub pattern: u16,
    /// Next bit to play, `0..16`.
    pub index: u8,
    /// Callback firings since the last step.
    pub ticks: u16,
}

impl IndicatorState {
    const fn new() -> Self {
        Self {
            mode: IndicatorMode::Blinking,
            pattern: 0,
            index: 0,
            ticks: 0,
        }
    }

    /// Count one tick; on a step boundary return the bit to show.
    fn advance(&mut self, ticks_per_step: u16) -> Option<bool> {
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks < ticks_per_step {
            return None;
        }
        self.ticks = 0;
        if self.mode != IndicatorMode::Blinking {
            return None;
        }
        let bit = (self.pattern >> self.index) & 1 == 1;
        self.index = (self.index + 1) % PATTERN_LEN;
        Some(bit)
    }
}

pub struct Indicator {
    shared: Mutex<RefCell<IndicatorState>>,
    ticks_per_step: u16,
}

impl Indicator {
    /// `ticks_per_step` callback firings make one pattern bit (min 1).
    pub const fn new(ticks_per_step: u16) -> Self {
        Self {
            shared: Mutex::new(RefCell::new(IndicatorState::new())),
            ticks_per_step: if ticks_per_step == 0 { 1 } else { ticks_per_step },
        }
    }

    /// One-time timer setup; leaves the indicator blinking an empty pattern.
    /// The 8-bit frame gives 256 brightness steps in dimming mode.
    pub fn start<T: PwmTimer>(&self, timer: &mut T, frequency_hz: u32) {
        timer.configure(TimerConfig {
            frequency_hz,
            top: u32::from(u8::MAX),
        });
        timer.set_output_mode(OutputMode::Disconnected);
        critical_section::with(|cs| {
            let mut s = self.shared.borrow_ref_mut(cs);
            s.mode = IndicatorMode::Blinking;
            s.index = 0;
        });
        debug!("indicator: started at {} Hz, blinking", frequency_hz);
    }

    /// Show `level` (0 = dark, 255 = full) on `channel`, switching to
    /// dimming mode first if a pattern is playing.
    pub fn set_dim_level<T: PwmTimer>(&self, timer: &mut T, channel: TimerChannel, level: u8) {
        // Stop playback before the timer takes the pins over.
        let switched = critical_section::with(|cs| {
            let mut s = self.shared.borrow_ref_mut(cs);
            let switched = s.mode == IndicatorMode::Blinking;
            s.mode = IndicatorMode::Dimming;
            switched
        });
        if switched {
            timer.set_output_mode(OutputMode::Inverting);
            debug!("indicator: blinking -> dimming");
        }
        // Inverting: compare at top is dark.
        timer.set_compare(channel, u32::from(u8::MAX - level));
    }

    /// Play `pattern`, switching to blinking mode first if dimming.
    /// Playback restarts from bit 0 on a mode switch or a new pattern.
    pub fn set_blink_pattern<T: PwmTimer>(&self, timer: &mut T, pattern: u16) {
        // Only this context changes the mode, so the check cannot go stale.
        let switching = self.mode() == IndicatorMode::Dimming;
        if switching {
            // Release the pins before playback may write them.
            timer.set_output_mode(OutputMode::Disconnected);
        }
        critical_section::with(|cs| {
            let mut s = self.shared.borrow_ref_mut(cs);
            if switching {
                s.mode = IndicatorMode::Blinking;
                s.index = 0;
            }
            if s.pattern != pattern {
                s.index = 0;
                s.pattern = pattern;
            }
        });
        if switching {
            debug!("indicator: dimming -> blinking (0b{:016b})", pattern);
        }
    }

    /// Timer callback. Call at the fixed tick rate from interrupt (or timer
    /// task) context. Does not log.
    pub fn on_tick<A: OutputPin, B: OutputPin>(&self, a: &mut A, b: &mut B) {
        critical_section::with(|cs| {
            let mut s = self.shared.borrow_ref_mut(cs);
            if let Some(bit) = s.advance(self.ticks_per_step) {
                let state = PinState::from(bit);
                // Nowhere to report from interrupt context.
                let _ = a.set_state(state);
                let _ = b.set_state(state);
            }
        });
    }

    /// Copy of the shared state.
    pub fn snapshot(&self) -> IndicatorState {
        critical_section::with(|cs| *self.shared.borrow_ref(cs))
    }

    pub fn mode(&self) -> IndicatorMode {
        self.snapshot().mode
    }

    pub fn ticks_per_step(&self) -> u16 {
        self.ticks_per_step
    }
}
