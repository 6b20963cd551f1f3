//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements                 | Connects to          |
//! |------------|----------------------------|----------------------|
//! | `hardware` | PwmTimer                   | ESP32 LEDC           |
//! |            | OutputPin (embedded-hal)   | ESP32 GPIO           |
//! |            | CommandSource              | ESP32 ADC1           |
//! | `time`     | MonotonicClock             | ESP32 system timer   |

pub mod hardware;
pub mod time;
