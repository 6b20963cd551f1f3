//! Cooperative status LED blinker.
//!
//! No timer, no interrupt: the main loop calls [`StatusBlinker::update`]
//! every iteration and each channel toggles once half its period has
//! elapsed. A period of 0 means solid on.
//!
//! ```text
//!            period > 0                      half period elapsed
//!  SolidOn ─────────────▶ Blinking ◀───────────────────────────┐
//!     ▲                      │        (toggle, restamp)        │
//!     └──────────────────────┴─────────────────────────────────┘
//!            period == 0 (snap high immediately)
//! ```

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::MonotonicClock;
use crate::control::mapping::PulseMapper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkState {
    SolidOn,
    /// `high` is the level currently on the pin.
    Blinking { high: bool },
}

/// One LED channel.
pub struct Blinker<P: OutputPin> {
    pin: P,
    last_toggle_ms: u32,
    period_ms: u32,
    level: bool,
}

impl<P: OutputPin> Blinker<P> {
    /// Starts low with no period; the first update decides the state.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_toggle_ms: 0,
            period_ms: 0,
            level: false,
        }
    }

    /// Refresh the period and toggle if due.
    pub fn update(&mut self, period_ms: u32, now_ms: u32) {
        self.period_ms = period_ms;

        if period_ms == 0 {
            if !self.level {
                self.level = true;
                self.write();
            }
            return;
        }

        if now_ms.wrapping_sub(self.last_toggle_ms) >= period_ms / 2 {
            self.last_toggle_ms = now_ms;
            self.level = !self.level;
            self.write();
        }
    }

    pub fn state(&self) -> BlinkState {
        if self.period_ms == 0 {
            BlinkState::SolidOn
        } else {
            BlinkState::Blinking { high: self.level }
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn write(&mut self) {
        if let Err(e) = self.pin.set_state(PinState::from(self.level)) {
            warn!("blinker: LED write failed ({:?})", e);
        }
    }
}

/// Left/right status LEDs driven from the conditioned drive commands.
pub struct StatusBlinker<C: MonotonicClock, L: OutputPin, R: OutputPin> {
    clock: C,
    mapper: PulseMapper,
    left: Blinker<L>,
    right: Blinker<R>,
}

impl<C: MonotonicClock, L: OutputPin, R: OutputPin> StatusBlinker<C, L, R> {
    pub fn new(clock: C, mapper: PulseMapper, left: L, right: R) -> Self {
        Self {
            clock,
            mapper,
            left: Blinker::new(left),
            right: Blinker::new(right),
        }
    }

    /// Call once per main-loop iteration. Never blocks.
    pub fn update(&mut self, left_pw: f32, right_pw: f32) {
        let now = self.clock.now_ms();
        self.left.update(self.mapper.pulsewidth_to_period(left_pw), now);
        self.right.update(self.mapper.pulsewidth_to_period(right_pw), now);
    }

    pub fn left(&self) -> &Blinker<L> {
        &self.left
    }

    pub fn right(&self) -> &Blinker<R> {
        &self.right
    }
}
