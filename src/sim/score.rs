//! Score accumulator
//!
//! Score is climbed distance plus bonuses. Neither part ever decreases.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Accumulated scroll distance
    base: f64,
    /// Fast-climb and pickup rewards
    bonus: f64,
    /// When the camera last scrolled
    last_scroll_ms: f64,
}

impl Score {
    /// Start a run; the fast-climb window is measured from `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            base: 0.0,
            bonus: 0.0,
            last_scroll_ms: now_ms,
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    pub fn total(&self) -> u64 {
        (self.base + self.bonus).floor() as u64
    }

    pub fn add_distance(&mut self, amount: f32) {
        self.base += f64::from(amount.abs());
    }

    pub fn add_bonus(&mut self, amount: f64) {
        self.bonus += amount.max(0.0);
    }

    /// Record a camera scroll. Scrolling again within `window_ms` of the
    /// previous scroll earns `fast_bonus`; returns true when it did.
    pub fn record_scroll(&mut self, amount: f32, now_ms: f64, window_ms: f64, fast_bonus: f64) -> bool {
        self.add_distance(amount);
        let fast = now_ms - self.last_scroll_ms < window_ms;
        if fast {
            self.add_bonus(fast_bonus);
        }
        self.last_scroll_ms = now_ms;
        fast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_floors_sum() {
        let mut score = Score::new(0.0);
        score.add_distance(10.7);
        score.add_bonus(0.5);
        assert_eq!(score.total(), 11);
    }

    #[test]
    fn fast_climb_beats_slow_climb() {
        let mut fast = Score::new(0.0);
        let mut slow = Score::new(0.0);
        fast.record_scroll(15.0, 600.0, 500.0, 5.0);
        slow.record_scroll(15.0, 600.0, 500.0, 5.0);

        assert!(fast.record_scroll(15.0, 900.0, 500.0, 5.0));
        assert!(!slow.record_scroll(15.0, 1200.0, 500.0, 5.0));

        assert_eq!(fast.base(), slow.base());
        assert!(fast.bonus() > slow.bonus());
        assert!(fast.total() > slow.total());
    }

    #[test]
    fn first_scroll_measures_from_start() {
        let mut score = Score::new(1000.0);
        assert!(score.record_scroll(5.0, 1200.0, 500.0, 5.0));
        assert_eq!(score.bonus(), 5.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_never_decreases(
                steps in proptest::collection::vec((-30.0f32..30.0, 0.0f64..1000.0, -50.0f64..50.0), 1..200)
            ) {
                let mut score = Score::new(0.0);
                let mut now = 0.0;
                let mut last = score.total();
                for (amount, dt, bonus) in steps {
                    now += dt;
                    score.record_scroll(amount, now, 500.0, 5.0);
                    score.add_bonus(bonus);
                    prop_assert!(score.total() >= last);
                    last = score.total();
                }
            }
        }
    }
}
