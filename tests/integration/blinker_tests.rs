//! Cooperative blinker driven by the commander's output over simulated time.

use thruster_cmd::app::commander::Commander;
use thruster_cmd::config::ThrusterConfig;
use thruster_cmd::control::mapping::PulseMapper;
use thruster_cmd::drivers::blinker::{BlinkState, StatusBlinker};

use super::mock_hw::{MockClock, MockPin, MockTimer, new_log, pin_history};

#[test]
fn full_deflection_blinks_at_the_fastest_period() {
    let clock = MockClock::new(0);
    let log = new_log();
    let mut status = StatusBlinker::new(
        clock.clone(),
        PulseMapper::default(),
        MockPin::new(0, log.clone()),
        MockPin::new(1, log.clone()),
    );

    // One second of 10 ms loop iterations.
    for _ in 0..100 {
        clock.advance(10);
        status.update(1500.0, 2000.0);
    }

    assert_eq!(status.left().state(), BlinkState::SolidOn);
    assert_eq!(pin_history(&log, 0), vec![true]);

    // 200 ms period: a toggle every 100 ms.
    let right = pin_history(&log, 1);
    assert_eq!(right.len(), 10);
    assert!(right.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn deflection_just_outside_the_deadzone_blinks_slowest() {
    let mapper = PulseMapper::default();
    assert_eq!(mapper.pulsewidth_to_period(1525.0), 0);
    assert_eq!(mapper.pulsewidth_to_period(1525.01), 2000);
    assert_eq!(mapper.pulsewidth_to_period(1000.0), 200);
}

#[test]
fn status_follows_the_ramping_drive() {
    let mut config = ThrusterConfig::default();
    config.limiter.max_rate_us_per_s = 1.0e6;
    let clock = MockClock::new(0);
    let log = new_log();
    let mut cmd = Commander::new(&config, clock.clone(), MockTimer::new(log.clone()));
    let mut status = StatusBlinker::new(
        clock.clone(),
        PulseMapper::from_config(&config),
        MockPin::new(0, log.clone()),
        MockPin::new(1, log.clone()),
    );

    clock.advance(20);
    let drive = cmd.update([1500.0, 1500.0]);
    status.update(drive.left, drive.right);
    assert_eq!(status.left().state(), BlinkState::SolidOn);

    for _ in 0..300 {
        clock.advance(20);
        let drive = cmd.update([1100.0, 1500.0]);
        status.update(drive.left, drive.right);
    }
    let period = status.left().period_ms();
    assert!(period > 200 && period < 2000, "period {period}");
    assert_eq!(status.right().state(), BlinkState::SolidOn);
}
