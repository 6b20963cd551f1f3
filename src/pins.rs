//! GPIO / peripheral pin assignments for the thruster commander board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Drive outputs (ESC / servo signal)
// ---------------------------------------------------------------------------

/// Left thruster signal, drive timer channel A.
pub const DRIVE_LEFT_GPIO: i32 = 4;
/// Right thruster signal, drive timer channel B.
pub const DRIVE_RIGHT_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Command inputs (potentiometers, ADC1)
// ---------------------------------------------------------------------------

/// Left command pot. ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const INPUT_LEFT_GPIO: i32 = 1;
/// Right command pot. ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const INPUT_RIGHT_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Status LEDs
// ---------------------------------------------------------------------------

/// Left status LED. Plain GPIO in blinker style, indicator channel A otherwise.
pub const LED_LEFT_GPIO: i32 = 8;
/// Right status LED. Plain GPIO in blinker style, indicator channel B otherwise.
pub const LED_RIGHT_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Drive timer resolution (bits). 14 bits at 50 Hz ≈ 1.2 µs per count.
pub const DRIVE_PWM_RESOLUTION_BITS: u32 = 14;
/// Indicator timer resolution (bits). 8-bit gives 0 – 255 brightness.
pub const INDICATOR_PWM_RESOLUTION_BITS: u32 = 8;
