//! Output drivers, hardware initialisation, and the indicator tick.

pub mod blinker;
pub mod hw_init;
pub mod hw_timer;
pub mod indicator;
pub mod pwm_output;
