//! Application core: pure logic, no direct I/O.
//!
//! Wires the conditioning chain, PWM driver and status outputs together.
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], so the whole pipeline runs on the host against mocks.

pub mod commander;
pub mod ports;
pub mod status;
