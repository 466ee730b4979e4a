//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Values are per-frame unless the name says otherwise (`_ms`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Probabilities for the per-platform rolls.
///
/// Modifier chances are evaluated in priority order
/// (spring > star > chest > boot > enemy); a lower entry is only rolled when
/// every higher one missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierChances {
    pub moving: f64,
    pub spring: f64,
    pub star: f64,
    pub chest: f64,
    pub boot: f64,
    pub enemy: f64,
    /// Share of enemies that patrol instead of standing still
    pub patrol: f64,
}

impl Default for ModifierChances {
    fn default() -> Self {
        Self {
            moving: 0.25,
            spring: 0.08,
            star: 0.03,
            chest: 0.05,
            boot: 0.04,
            enemy: 0.12,
            patrol: 0.5,
        }
    }
}

impl ModifierChances {
    fn clamped(mut self) -> Self {
        for p in [
            &mut self.moving,
            &mut self.spring,
            &mut self.star,
            &mut self.chest,
            &mut self.boot,
            &mut self.enemy,
            &mut self.patrol,
        ] {
            *p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        }
        self
    }

    /// Chances with every roll disabled (plain static platforms)
    pub fn none() -> Self {
        Self {
            moving: 0.0,
            spring: 0.0,
            star: 0.0,
            chest: 0.0,
            boot: 0.0,
            enemy: 0.0,
            patrol: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub gravity: f32,
    pub friction: f32,
    /// Ground jump impulse (negative = up)
    pub base_jump: f32,
    /// Spring pad impulse (negative = up)
    pub spring_impulse: f32,
    /// Max horizontal speed reachable by steering
    pub player_speed: f32,

    // === Field ===
    pub platform_count: usize,
    /// Vertical distance between platform slots
    pub slot_spacing: f32,
    /// Tries per slot before accepting an overlapping placement
    pub placement_attempts: u32,
    /// Oscillation amplitude of moving platforms
    pub move_range: f32,
    pub move_speed: f32,
    pub fall_speed: f32,
    /// Standing time before a platform gives way
    pub fall_delay_ms: f64,
    /// Slack for landing on a vertically moving surface
    pub landing_threshold: f32,
    /// First platform indices that never roll an enemy
    pub safe_platforms: u64,
    pub patrol_speed: f32,
    pub chances: ModifierChances,

    // === Scoring ===
    pub fast_climb_window_ms: f64,
    pub fast_climb_bonus: f64,
    pub star_bonus: f64,
    pub chest_bonus: f64,
    /// Touching the floor only ends the run above this score
    pub floor_loss_min_score: u64,

    // === Power-ups ===
    pub invincibility_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.8,
            base_jump: -15.0,
            spring_impulse: -25.0,
            player_speed: 5.0,

            platform_count: 10,
            slot_spacing: 100.0,
            placement_attempts: 100,
            move_range: 20.0,
            move_speed: 0.5,
            fall_speed: 10.0,
            fall_delay_ms: 4000.0,
            landing_threshold: 5.0,
            safe_platforms: 2,
            patrol_speed: 1.2,
            chances: ModifierChances::default(),

            fast_climb_window_ms: 500.0,
            fast_climb_bonus: 5.0,
            star_bonus: 50.0,
            chest_bonus: 100.0,
            floor_loss_min_score: 10,

            invincibility_ms: 7000.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()
    }

    /// Reject values the simulation cannot work with and clamp probabilities
    pub fn validate(mut self) -> Result<Self> {
        let positive = [
            ("friction", self.friction as f64),
            ("player_speed", self.player_speed as f64),
            ("slot_spacing", self.slot_spacing as f64),
            ("move_speed", self.move_speed as f64),
            ("fall_speed", self.fall_speed as f64),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidTuning { field, value });
            }
        }
        let non_negative = [
            ("gravity", self.gravity as f64),
            ("move_range", self.move_range as f64),
            ("landing_threshold", self.landing_threshold as f64),
            ("patrol_speed", self.patrol_speed as f64),
            ("fall_delay_ms", self.fall_delay_ms),
            ("fast_climb_window_ms", self.fast_climb_window_ms),
            ("fast_climb_bonus", self.fast_climb_bonus),
            ("star_bonus", self.star_bonus),
            ("chest_bonus", self.chest_bonus),
            ("invincibility_ms", self.invincibility_ms),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidTuning { field, value });
            }
        }
        if self.platform_count == 0 {
            return Err(Error::InvalidTuning {
                field: "platform_count",
                value: 0.0,
            });
        }
        if self.placement_attempts == 0 {
            return Err(Error::InvalidTuning {
                field: "placement_attempts",
                value: 0.0,
            });
        }
        self.chances = self.chances.clamped();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let tuning = Tuning::default().validate().unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.7, "chances": { "spring": 0.5 } }"#)
            .unwrap();
        assert_eq!(tuning.gravity, 0.7);
        assert_eq!(tuning.chances.spring, 0.5);
        assert_eq!(tuning.chances.star, ModifierChances::default().star);
        assert_eq!(tuning.base_jump, -15.0);
    }

    #[test]
    fn probabilities_are_clamped() {
        let tuning = Tuning::from_json(r#"{ "chances": { "enemy": 3.0, "boot": -1.0 } }"#)
            .unwrap();
        assert_eq!(tuning.chances.enemy, 1.0);
        assert_eq!(tuning.chances.boot, 0.0);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let err = Tuning::from_json(r#"{ "slot_spacing": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTuning {
                field: "slot_spacing",
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_field() {
        let err = Tuning::from_json(r#"{ "platform_count": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTuning {
                field: "platform_count",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity: }"),
            Err(Error::Parse(_))
        ));
    }
}
