//! Signal conditioning: everything between the raw command and the outputs.
//!
//! ```text
//! raw ──▶ LowPassFilter ──▶ RateLimiter ──▶ PWM driver
//!                                      └──▶ PulseMapper ──▶ blinker / indicator
//! ```

pub mod chain;
pub mod filter;
pub mod limiter;
pub mod mapping;

pub use chain::CommandChain;
pub use filter::LowPassFilter;
pub use limiter::RateLimiter;
pub use mapping::PulseMapper;
