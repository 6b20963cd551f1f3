//! Fuzz target: raw command → `Commander` → compare registers
//!
//! Each 9-byte record is a clock step (1 byte, ms) and a left/right raw
//! pulsewidth (two little-endian `f32`, any bit pattern including NaN and
//! infinities). Asserts that no input ever produces a compare value
//! outside the configured pulse range, and that the status mapping stays
//! within its bounds.
//!
//! cargo fuzz run fuzz_pipeline

#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use thruster_cmd::app::commander::Commander;
use thruster_cmd::app::ports::{MonotonicClock, OutputMode, PwmTimer, TimerChannel, TimerConfig};
use thruster_cmd::config::ThrusterConfig;
use thruster_cmd::control::mapping::PulseMapper;

#[derive(Clone)]
struct FuzzClock<'a>(&'a Cell<u32>);

impl MonotonicClock for FuzzClock<'_> {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

struct NullTimer;

impl PwmTimer for NullTimer {
    fn configure(&mut self, _config: TimerConfig) {}
    fn set_output_mode(&mut self, _mode: OutputMode) {}
    fn set_compare(&mut self, _channel: TimerChannel, _ticks: u32) {}
}

fuzz_target!(|data: &[u8]| {
    let config = ThrusterConfig::default();
    let now = Cell::new(0u32);
    let mut commander = Commander::new(&config, FuzzClock(&now), NullTimer);
    let mapper = PulseMapper::from_config(&config);

    for record in data.chunks_exact(9) {
        now.set(now.get().wrapping_add(u32::from(record[0])));
        let left = f32::from_le_bytes([record[1], record[2], record[3], record[4]]);
        let right = f32::from_le_bytes([record[5], record[6], record[7], record[8]]);

        let drive = commander.update([left, right]);

        for ch in TimerChannel::ALL {
            let ticks = commander.pwm().last_ticks(ch);
            assert!((999..=1999).contains(&ticks), "compare {ticks} out of range");
        }
        for pw in [drive.left, drive.right] {
            let period = mapper.pulsewidth_to_period(pw);
            assert!(period == 0 || (200..=2000).contains(&period));
        }
    }
});
