//! Commander integration tests: raw command → conditioned drive → compare
//! register, on a mock timer and a manual clock.

use thruster_cmd::app::commander::Commander;
use thruster_cmd::app::ports::{OutputMode, TimerChannel, TimerConfig};
use thruster_cmd::config::ThrusterConfig;

use super::mock_hw::{HwEvent, MockClock, MockTimer, ScriptedSource, new_log};

const STEP_MS: u32 = 20;
const NEUTRAL_TICKS: u32 = 1499;

fn commander(config: &ThrusterConfig) -> (Commander<MockClock, MockTimer>, MockClock) {
    let clock = MockClock::new(0);
    let timer = MockTimer::new(new_log());
    (Commander::new(config, clock.clone(), timer), clock)
}

#[test]
fn startup_configures_frame_and_parks_at_neutral() {
    let log = new_log();
    let config = ThrusterConfig::default();
    let _cmd = Commander::new(&config, MockClock::new(0), MockTimer::new(log.clone()));

    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            HwEvent::Configure(TimerConfig { frequency_hz: 50, top: 19_999 }),
            HwEvent::Mode(OutputMode::NonInverting),
            HwEvent::Compare(TimerChannel::A, NEUTRAL_TICKS),
            HwEvent::Compare(TimerChannel::B, NEUTRAL_TICKS),
        ]
    );
}

#[test]
fn full_forward_ramps_at_the_slew_limit() {
    let config = ThrusterConfig::default();
    let (mut cmd, clock) = commander(&config);

    let mut prev = config.pulse.neutral_us;
    for _ in 0..100 {
        clock.advance(STEP_MS);
        let drive = cmd.update([2000.0, 2000.0]);
        // 50 µs/s over 20 ms.
        assert!(drive.left - prev <= 1.0 + 1e-3);
        assert!(drive.left >= prev);
        prev = drive.left;
    }
    assert!(prev > 1500.0 && prev <= 1600.5);
}

#[test]
fn overrange_command_is_clamped_at_the_output() {
    let mut config = ThrusterConfig::default();
    config.limiter.max_rate_us_per_s = 1.0e6;
    let (mut cmd, clock) = commander(&config);

    for _ in 0..500 {
        clock.advance(STEP_MS);
        cmd.update([3000.0, 500.0]);
    }
    assert_eq!(cmd.pwm().last_ticks(TimerChannel::A), 1999);
    assert_eq!(cmd.pwm().last_ticks(TimerChannel::B), 999);
}

#[test]
fn nan_command_holds_neutral() {
    let config = ThrusterConfig::default();
    let (mut cmd, clock) = commander(&config);

    for _ in 0..50 {
        clock.advance(STEP_MS);
        let drive = cmd.update([f32::NAN, f32::NAN]);
        assert!((drive.left - 1500.0).abs() < 1e-3);
        assert!((drive.right - 1500.0).abs() < 1e-3);
    }
    assert_eq!(cmd.pwm().timer().compare(TimerChannel::A), NEUTRAL_TICKS);
}

#[test]
fn left_drives_channel_a_and_right_drives_channel_b() {
    let config = ThrusterConfig::default();
    let (mut cmd, clock) = commander(&config);

    for _ in 0..50 {
        clock.advance(STEP_MS);
        cmd.update([1900.0, 1100.0]);
    }
    let timer = cmd.pwm().timer();
    assert!(timer.compare(TimerChannel::A) > NEUTRAL_TICKS);
    assert!(timer.compare(TimerChannel::B) < NEUTRAL_TICKS);
}

#[test]
fn neutral_bypasses_the_slew_limit() {
    let mut config = ThrusterConfig::default();
    config.limiter.max_rate_us_per_s = 1.0e6;
    let (mut cmd, clock) = commander(&config);

    for _ in 0..200 {
        clock.advance(STEP_MS);
        cmd.update([2000.0, 1000.0]);
    }
    let drive = cmd.neutral();
    assert_eq!(drive.left, 1500.0);
    assert_eq!(drive.right, 1500.0);
    assert_eq!(cmd.pwm().last_ticks(TimerChannel::A), NEUTRAL_TICKS);
    assert_eq!(cmd.pwm().last_ticks(TimerChannel::B), NEUTRAL_TICKS);
}

#[test]
fn clock_wrap_does_not_jump_the_output() {
    let config = ThrusterConfig::default();
    let clock = MockClock::new(u32::MAX - 10);
    let mut cmd = Commander::new(&config, clock.clone(), MockTimer::new(new_log()));

    clock.advance(STEP_MS);
    let drive = cmd.update([2000.0, 1500.0]);
    assert!(drive.left <= 1501.0 + 1e-3);
}

#[test]
fn lost_input_parks_at_neutral_then_ramps_on_recovery() {
    let config = ThrusterConfig::default();
    let (mut cmd, clock) = commander(&config);

    let forward = Some([2000.0, 1000.0]);
    let mut source = ScriptedSource::new(
        std::iter::repeat_n(forward, 50)
            .chain([None, None])
            .chain(std::iter::repeat_n(forward, 3)),
    );

    for _ in 0..50 {
        clock.advance(STEP_MS);
        cmd.poll(&mut source);
    }
    assert!(!cmd.input_lost());
    assert!(cmd.pwm().last_ticks(TimerChannel::A) > NEUTRAL_TICKS);
    assert!(cmd.pwm().last_ticks(TimerChannel::B) < NEUTRAL_TICKS);

    for _ in 0..2 {
        clock.advance(STEP_MS);
        let drive = cmd.poll(&mut source);
        assert_eq!(drive.left, 1500.0);
        assert_eq!(drive.right, 1500.0);
        assert!(cmd.input_lost());
    }
    assert_eq!(cmd.pwm().last_ticks(TimerChannel::A), NEUTRAL_TICKS);
    assert_eq!(cmd.pwm().last_ticks(TimerChannel::B), NEUTRAL_TICKS);

    // Recovery slews away from neutral instead of jumping back.
    clock.advance(STEP_MS);
    let drive = cmd.poll(&mut source);
    assert!(!cmd.input_lost());
    assert!(drive.left > 1500.0 && drive.left <= 1501.0 + 1e-3);
    assert!(drive.right < 1500.0 && drive.right >= 1499.0 - 1e-3);
}

#[test]
fn exhausted_source_holds_neutral() {
    let config = ThrusterConfig::default();
    let (mut cmd, clock) = commander(&config);
    let mut source = ScriptedSource::new([]);

    for _ in 0..10 {
        clock.advance(STEP_MS);
        let drive = cmd.poll(&mut source);
        assert_eq!(drive.left, 1500.0);
    }
    assert!(cmd.input_lost());
    assert_eq!(cmd.pwm().timer().compare(TimerChannel::A), NEUTRAL_TICKS);
}
