//! Game state and core simulation types
//!
//! One `GameState` is one run. There is no in-place reset: a new run is a
//! new `GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::PlatformField;
use super::player::Player;
use super::score::Score;
use crate::tuning::Tuning;

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended; ticks are ignored
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Touched an enemy without a shield
    EnemyHit,
    /// Fell back to the floor after climbing
    Fell,
}

/// Things that happened during a tick, drained by the host for sound and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    DoubleJumped,
    /// Touched down on a platform after being airborne
    Landed { platform: u64 },
    SpringLaunched { platform: u64 },
    StarCollected { platform: u64 },
    ChestOpened { platform: u64 },
    BootsCollected { platform: u64 },
    /// Two scrolls inside the fast-climb window
    FastClimb,
    PlatformFalling { platform: u64 },
    /// A platform left the bottom and came back on top as `platform`
    Recycled { platform: u64 },
    EnemyHit { platform: u64 },
    GameOver { score: u64, cause: GameOverCause },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub field: PlatformField,
    pub player: Player,
    pub score: Score,
    pub phase: GamePhase,
    /// Frames simulated so far
    pub frame: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run. `now_ms` anchors the score's fast-climb window.
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning, now_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = PlatformField::generate(&mut rng, viewport, &tuning);
        let player = Player::new(viewport, tuning.player_speed);
        log::info!(
            "New run: seed={seed}, viewport={}x{}, platforms={}",
            viewport.width,
            viewport.height,
            field.len()
        );
        Self {
            seed,
            rng,
            tuning,
            viewport,
            field,
            player,
            score: Score::new(now_ms),
            phase: GamePhase::Playing,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Host window changed size; later placement uses the new size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Take all events produced since the previous drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
