//! Mock hardware for integration tests.
//!
//! Timers and pins push into one shared, ordered log so tests can assert
//! on interleavings, not just end state.

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use embedded_hal::digital::{ErrorType, OutputPin};
use thruster_cmd::app::ports::{
    CommandSource, MonotonicClock, OutputMode, PwmTimer, TimerChannel, TimerConfig,
};

// ── Hardware event record ─────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwEvent {
    Configure(TimerConfig),
    Mode(OutputMode),
    Compare(TimerChannel, u32),
    Pin { id: u8, high: bool },
}

pub type HwLog = Arc<Mutex<Vec<HwEvent>>>;

pub fn new_log() -> HwLog {
    Arc::new(Mutex::new(Vec::new()))
}

// ── MockClock ─────────────────────────────────────────────────

/// Manually advanced millisecond clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct MockClock(Rc<Cell<u32>>);

#[allow(dead_code)]
impl MockClock {
    pub fn new(start_ms: u32) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }
}

impl MonotonicClock for MockClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

// ── MockTimer ─────────────────────────────────────────────────

pub struct MockTimer {
    log: HwLog,
    pub compare: [u32; 2],
    pub mode: Option<OutputMode>,
    pub config: Option<TimerConfig>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new(log: HwLog) -> Self {
        Self {
            log,
            compare: [0; 2],
            mode: None,
            config: None,
        }
    }

    pub fn compare(&self, channel: TimerChannel) -> u32 {
        self.compare[channel.index()]
    }
}

impl PwmTimer for MockTimer {
    fn configure(&mut self, config: TimerConfig) {
        self.config = Some(config);
        push(&self.log, HwEvent::Configure(config));
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = Some(mode);
        push(&self.log, HwEvent::Mode(mode));
    }

    fn set_compare(&mut self, channel: TimerChannel, ticks: u32) {
        self.compare[channel.index()] = ticks;
        push(&self.log, HwEvent::Compare(channel, ticks));
    }
}

// ── ScriptedSource ────────────────────────────────────────────

/// Replays a fixed sequence of reads; `None` is a failed read. Once the
/// script runs out every read fails.
pub struct ScriptedSource {
    reads: VecDeque<Option<[f32; 2]>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(reads: impl IntoIterator<Item = Option<[f32; 2]>>) -> Self {
        Self {
            reads: reads.into_iter().collect(),
        }
    }
}

impl CommandSource for ScriptedSource {
    fn read(&mut self) -> Option<[f32; 2]> {
        self.reads.pop_front().flatten()
    }
}

// ── MockPin ───────────────────────────────────────────────────

pub struct MockPin {
    id: u8,
    log: HwLog,
    pub level: Option<bool>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn new(id: u8, log: HwLog) -> Self {
        Self {
            id,
            log,
            level: None,
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level = Some(false);
        push(&self.log, HwEvent::Pin { id: self.id, high: false });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level = Some(true);
        push(&self.log, HwEvent::Pin { id: self.id, high: true });
        Ok(())
    }
}

fn push(log: &HwLog, event: HwEvent) {
    log.lock().unwrap().push(event);
}

/// Pin writes recorded for `id`, oldest first.
#[allow(dead_code)]
pub fn pin_history(log: &HwLog, id: u8) -> Vec<bool> {
    log.lock()
        .unwrap()
        .iter()
        .filter_map(|e| match *e {
            HwEvent::Pin { id: pin, high } if pin == id => Some(high),
            _ => None,
        })
        .collect()
}
