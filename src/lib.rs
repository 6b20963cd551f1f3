//! Thruster commander firmware library.
//!
//! Conditions two raw pulsewidth commands (low-pass filter, slew-rate
//! limiter), drives them onto a 50 Hz servo/ESC PWM timer, and reports each
//! channel's deflection on a status LED. Everything above the adapters is
//! plain logic and runs on the host; ESP-IDF specifics are guarded by
//! `#[cfg(target_os = "espidf")]` inside each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pulse;

pub mod adapters;
pub mod drivers;
pub mod pins;
