//! Timer reconfiguration must never run inside a critical section: on the
//! device the LEDC driver calls it makes may log, and the section masks
//! interrupts.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thruster_cmd::app::ports::{OutputMode, PwmTimer, TimerChannel, TimerConfig};
use thruster_cmd::config::ThrusterConfig;
use thruster_cmd::drivers::indicator::{Indicator, patterns};
use thruster_cmd::drivers::pwm_output::PwmOutput;

/// Whether another thread can take the critical section right now.
fn critical_section_is_free() -> bool {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        critical_section::with(|_| ());
        let _ = tx.send(());
    });
    rx.recv_timeout(Duration::from_millis(200)).is_ok()
}

/// Records, for each reconfiguration call, whether the section was free.
#[derive(Default)]
struct SectionCheckTimer {
    calls: Vec<(&'static str, bool)>,
}

impl SectionCheckTimer {
    fn assert_all_outside(&self) {
        assert!(!self.calls.is_empty());
        for (call, free) in &self.calls {
            assert!(free, "{call} ran inside a critical section");
        }
    }
}

impl PwmTimer for SectionCheckTimer {
    fn configure(&mut self, _config: TimerConfig) {
        self.calls.push(("configure", critical_section_is_free()));
    }

    fn set_output_mode(&mut self, _mode: OutputMode) {
        self.calls.push(("set_output_mode", critical_section_is_free()));
    }

    fn set_compare(&mut self, _channel: TimerChannel, _ticks: u32) {}
}

#[test]
fn drive_timer_setup_runs_outside_the_critical_section() {
    let config = ThrusterConfig::default();
    let out = PwmOutput::new(SectionCheckTimer::default(), &config.pwm, config.pulse);
    assert_eq!(out.timer().calls.len(), 2);
    out.timer().assert_all_outside();
}

#[test]
fn indicator_mode_switches_run_outside_the_critical_section() {
    let ind = Indicator::new(1);
    let mut timer = SectionCheckTimer::default();
    ind.start(&mut timer, 488);
    ind.set_dim_level(&mut timer, TimerChannel::A, 40);
    ind.set_blink_pattern(&mut timer, patterns::SHORT_2);
    ind.set_dim_level(&mut timer, TimerChannel::B, 200);

    let names: Vec<_> = timer.calls.iter().map(|(call, _)| *call).collect();
    assert_eq!(
        names,
        ["configure", "set_output_mode", "set_output_mode", "set_output_mode", "set_output_mode"]
    );
    timer.assert_all_outside();
}
