//! Thruster Commander Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  AnalogCommandInput  LedcTimer (drive)   Esp32TimeAdapter    │
//! │  (CommandSource)     (PwmTimer)          (MonotonicClock)    │
//! │  GpioOutput ×2       LedcTimer (LEDs)    esp_timer tick      │
//! │                                                              │
//! │  ────────────────── Port Trait Boundary ─────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  Commander: filter → rate limiter → PWM  (×2 channels) │  │
//! │  │  Status:    StatusBlinker  |  Indicator (dim / blink)  │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Result;
use log::info;

use thruster_cmd::adapters::hardware::{AnalogCommandInput, GpioOutput, LedcPin, LedcTimer};
use thruster_cmd::adapters::time::Esp32TimeAdapter;
use thruster_cmd::app::commander::Commander;
use thruster_cmd::app::status::apply_indicator;
use thruster_cmd::config::{StatusStyle, ThrusterConfig};
use thruster_cmd::control::mapping::PulseMapper;
use thruster_cmd::drivers::blinker::StatusBlinker;
use thruster_cmd::drivers::hw_init::{self, LEDC_TIMER_DRIVE, LEDC_TIMER_INDICATOR};
use thruster_cmd::drivers::hw_timer;
use thruster_cmd::drivers::indicator::Indicator;
use thruster_cmd::pins;

/// Reached from the esp_timer task through [`indicator_tick`].
static INDICATOR: OnceLock<Indicator> = OnceLock::new();

fn indicator_tick() {
    if let Some(indicator) = INDICATOR.get() {
        let mut left = GpioOutput::new(pins::LED_LEFT_GPIO);
        let mut right = GpioOutput::new(pins::LED_RIGHT_GPIO);
        indicator.on_tick(&mut left, &mut right);
    }
}

/// Validate the configuration and bring up ADC and status GPIO.
fn bring_up(config: &ThrusterConfig) -> thruster_cmd::error::Result<()> {
    config.validate()?;
    hw_init::init_peripherals()?;
    Ok(())
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Thruster Commander v{}           ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config + peripherals ───────────────────────────────
    let config = ThrusterConfig::default();
    bring_up(&config)?;
    info!(
        "pulse {}..{} us, neutral {} us, deadzone ±{} us, status {:?}",
        config.pulse.min_us,
        config.pulse.max_us,
        config.pulse.neutral_us,
        config.pulse.deadzone_us,
        config.status
    );

    // ── 3. Command pipeline ───────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let drive_timer = LedcTimer::new(
        LEDC_TIMER_DRIVE,
        pins::DRIVE_PWM_RESOLUTION_BITS,
        [
            LedcPin { channel: hw_init::LEDC_CH_DRIVE_LEFT, gpio: pins::DRIVE_LEFT_GPIO },
            LedcPin { channel: hw_init::LEDC_CH_DRIVE_RIGHT, gpio: pins::DRIVE_RIGHT_GPIO },
        ],
    );
    let mut commander = Commander::new(&config, clock, drive_timer);
    let mut input = AnalogCommandInput::new(config.pulse);
    let mapper = PulseMapper::from_config(&config);
    let loop_period = Duration::from_secs_f32(config.filter.dt_s);

    // ── 4. Status output + control loop ───────────────────────
    match config.status {
        StatusStyle::Blinker => {
            let mut status = StatusBlinker::new(
                clock,
                mapper,
                GpioOutput::new(pins::LED_LEFT_GPIO),
                GpioOutput::new(pins::LED_RIGHT_GPIO),
            );
            info!("Entering control loop (blinker status)");
            loop {
                let drive = commander.poll(&mut input);
                status.update(drive.left, drive.right);
                std::thread::sleep(loop_period);
            }
        }
        StatusStyle::Indicator => {
            let indicator =
                INDICATOR.get_or_init(|| Indicator::new(config.indicator.ticks_per_step()));
            let mut led_timer = LedcTimer::new(
                LEDC_TIMER_INDICATOR,
                pins::INDICATOR_PWM_RESOLUTION_BITS,
                [
                    LedcPin { channel: hw_init::LEDC_CH_LED_LEFT, gpio: pins::LED_LEFT_GPIO },
                    LedcPin { channel: hw_init::LEDC_CH_LED_RIGHT, gpio: pins::LED_RIGHT_GPIO },
                ],
            );
            indicator.start(&mut led_timer, config.indicator.tick_hz);
            hw_timer::start_indicator_tick(config.indicator.tick_hz, indicator_tick)?;
            info!("Entering control loop (indicator status)");
            loop {
                let drive = commander.poll(&mut input);
                apply_indicator(indicator, &mut led_timer, &mapper, drive);
                std::thread::sleep(loop_period);
            }
        }
    }
}
