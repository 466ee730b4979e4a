//! Skyhop - A vertical-scrolling platform climber
//!
//! Core modules:
//! - `sim`: Simulation (platform field, player physics, collisions, scoring)
//! - `game`: Session orchestration (input -> tick -> cues -> leaderboard -> render)
//! - `renderer`: Drawing capability and the per-frame scene walker
//! - `audio`: Sound cue capability
//! - `platform`: Host abstraction (clock, keyboard)
//! - `persistence`: Key/value storage for scores and settings
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::{FrameOutcome, Game};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Fixed world geometry
pub mod consts {
    /// Player box (square)
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Player spawns this far above the floor
    pub const PLAYER_SPAWN_HEIGHT: f32 = 150.0;

    /// Platform thickness
    pub const PLATFORM_HEIGHT: f32 = 10.0;
    /// Lowest generated slot sits this far above the floor
    pub const FIRST_SLOT_OFFSET: f32 = 50.0;
    /// Platforms whose index is a multiple of this carry a visible label
    pub const LABEL_INTERVAL: u64 = 10;

    /// Enemy box (square)
    pub const ENEMY_SIZE: f32 = 20.0;

    /// Camera follows once the player is above this fraction of the viewport
    pub const SCROLL_ZONE_FRACTION: f32 = 0.25;

    /// Nominal frame duration used by headless hosts (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
