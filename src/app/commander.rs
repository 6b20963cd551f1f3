//! Two-channel command pipeline.
//!
//! Owns a [`CommandChain`] per drive channel and the [`PwmOutput`]. Each
//! call to [`Commander::update`] conditions a raw command pair and writes
//! it to the drive timer; the returned [`Drive`] feeds the status output.
//!
//! Channel mapping: left → timer channel A, right → timer channel B.
//!
//! When the command source cannot be read, [`Commander::poll`] parks both
//! channels at neutral until it recovers.

use log::{info, warn};

use crate::app::ports::{CommandSource, MonotonicClock, PwmTimer, TimerChannel};
use crate::config::ThrusterConfig;
use crate::control::chain::CommandChain;
use crate::drivers::pwm_output::PwmOutput;

/// Conditioned pulsewidths for one control cycle (µs, not yet clamped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drive {
    pub left: f32,
    pub right: f32,
}

pub struct Commander<C: MonotonicClock + Clone, T: PwmTimer> {
    left: CommandChain<C>,
    right: CommandChain<C>,
    pwm: PwmOutput<T>,
    input_lost: bool,
}

impl<C: MonotonicClock + Clone, T: PwmTimer> Commander<C, T> {
    /// Configures the drive timer and parks both outputs at neutral.
    pub fn new(config: &ThrusterConfig, clock: C, timer: T) -> Self {
        let mut pwm = PwmOutput::new(timer, &config.pwm, config.pulse);
        for ch in TimerChannel::ALL {
            pwm.write(ch, config.pulse.neutral_us);
        }
        Self {
            left: CommandChain::new(config, clock.clone()),
            right: CommandChain::new(config, clock),
            pwm,
            input_lost: false,
        }
    }

    /// Condition `[left, right]` raw commands and drive the outputs.
    pub fn update(&mut self, raw: [f32; 2]) -> Drive {
        let drive = Drive {
            left: self.left.step(raw[0]),
            right: self.right.step(raw[1]),
        };
        self.pwm.write(TimerChannel::A, drive.left);
        self.pwm.write(TimerChannel::B, drive.right);
        drive
    }

    /// Read `source` and drive the outputs, or park at neutral if the read
    /// failed. Loss and recovery are logged once each.
    pub fn poll<S: CommandSource>(&mut self, source: &mut S) -> Drive {
        match source.read() {
            Some(raw) => {
                if self.input_lost {
                    self.input_lost = false;
                    info!("commander: command input restored");
                }
                self.update(raw)
            }
            None => {
                if !self.input_lost {
                    self.input_lost = true;
                    warn!("commander: command input lost, holding neutral");
                }
                self.neutral()
            }
        }
    }

    pub fn input_lost(&self) -> bool {
        self.input_lost
    }

    /// Return both channels to neutral immediately, bypassing the slew limit.
    pub fn neutral(&mut self) -> Drive {
        self.left.reset();
        self.right.reset();
        let drive = Drive {
            left: self.left.output(),
            right: self.right.output(),
        };
        self.pwm.write(TimerChannel::A, drive.left);
        self.pwm.write(TimerChannel::B, drive.right);
        drive
    }

    pub fn pwm(&self) -> &PwmOutput<T> {
        &self.pwm
    }
}
