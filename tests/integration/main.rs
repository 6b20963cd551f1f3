//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters. All tests run on the host (x86_64) with no
//! real hardware required.

mod blinker_tests;
mod commander_tests;
mod mock_hw;
mod timer_reconfig_tests;
