//! Monotonic time source
//!
//! The simulation never reads a clock; hosts sample one of these once per
//! frame and pass the value in with the frame's input.

use std::cell::Cell;

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin; never goes backwards
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Wall clock backed by `performance.now()`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl MonotonicClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|w| w.performance());
        if performance.is_none() {
            log::warn!("performance.now() unavailable - falling back to Date.now()");
        }
        Self { performance }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand-driven clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms.max(self.now.get()));
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_goes_back() {
        let clock = ManualClock::new(100.0);
        clock.advance(16.0);
        assert_eq!(clock.now_ms(), 116.0);
        clock.set(50.0);
        assert_eq!(clock.now_ms(), 116.0);
        clock.advance(-10.0);
        assert_eq!(clock.now_ms(), 116.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn monotonic_clock_is_non_decreasing() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
