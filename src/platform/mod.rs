//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds)
//! - Keyboard input

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use input::{InputLatch, Key, KeyState};
