//! Error types for the thruster commander firmware.
//!
//! The signal path itself never fails: out-of-range commands are clamped.
//! What can fail is startup: an incoherent configuration or a peripheral
//! that refuses to initialise. Both funnel into [`Error`]. All variants are
//! `Copy` so they can be logged and returned without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A floating-point parameter is NaN or infinite.
    NonFinite,
    /// `min_us` is not positive or not below `max_us`.
    PulseRangeInverted,
    /// Neutral lies outside `[min_us, max_us]`.
    NeutralOutOfRange,
    /// Deadzone is negative or not below the half-range.
    DeadzoneExceedsHalfRange,
    /// Sample interval not positive, or time constant shorter than it.
    FilterUnstable,
    /// Slew limit must be positive.
    RateLimitNotPositive,
    /// PWM frequency or timer resolution is zero.
    PwmTiming,
    /// `max_us` does not fit inside one PWM frame.
    PulseExceedsFrame,
    /// Blink periods are zero or reversed.
    BlinkPeriods,
    /// Intensity minimum above maximum.
    IntensityInverted,
    /// Indicator tick rate or cycle is zero.
    IndicatorTiming,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "non-finite parameter"),
            Self::PulseRangeInverted => write!(f, "pulse range inverted or non-positive"),
            Self::NeutralOutOfRange => write!(f, "neutral outside pulse range"),
            Self::DeadzoneExceedsHalfRange => write!(f, "deadzone not inside half-range"),
            Self::FilterUnstable => write!(f, "filter dt/tau unstable"),
            Self::RateLimitNotPositive => write!(f, "rate limit must be positive"),
            Self::PwmTiming => write!(f, "PWM frequency/resolution is zero"),
            Self::PulseExceedsFrame => write!(f, "max pulse longer than PWM frame"),
            Self::BlinkPeriods => write!(f, "blink periods zero or reversed"),
            Self::IntensityInverted => write!(f, "intensity range inverted"),
            Self::IndicatorTiming => write!(f, "indicator timing is zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
