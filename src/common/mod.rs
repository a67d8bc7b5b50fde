//! Shared helpers: series math and clocks.

pub mod clock;
pub mod math;

pub use clock::{Clock, FixedClock, SystemClock};
