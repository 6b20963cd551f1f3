//! Status output policy for the interrupt-driven indicator.
//!
//! While either channel is commanded outside the deadzone the indicator
//! dims each LED in proportion to its channel's deflection. With both
//! channels idle it plays a slow heartbeat pattern instead, so a powered,
//! idle unit is distinguishable from a dead one.

use crate::app::commander::Drive;
use crate::app::ports::{PwmTimer, TimerChannel};
use crate::control::mapping::PulseMapper;
use crate::drivers::indicator::{Indicator, patterns};

/// Pattern shown while both channels are idle.
pub const IDLE_PATTERN: u16 = patterns::SHORT_1;

pub fn apply_indicator<T: PwmTimer>(
    indicator: &Indicator,
    timer: &mut T,
    mapper: &PulseMapper,
    drive: Drive,
) {
    let range = mapper.range();
    if range.in_deadzone(drive.left) && range.in_deadzone(drive.right) {
        indicator.set_blink_pattern(timer, IDLE_PATTERN);
        return;
    }
    indicator.set_dim_level(
        timer,
        TimerChannel::A,
        mapper.pulsewidth_to_intensity(drive.left),
    );
    indicator.set_dim_level(
        timer,
        TimerChannel::B,
        mapper.pulsewidth_to_intensity(drive.right),
    );
}
