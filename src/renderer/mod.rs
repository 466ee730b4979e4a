//! Drawing capability
//!
//! The core never touches pixels. `render` walks the scene in paint order
//! and hands each entity to a `Draw` implementation supplied by the host.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasDraw;

use crate::sim::{Enemy, GameState, Platform, Player, Viewport};

pub trait Draw {
    /// Start a new frame
    fn clear(&mut self, viewport: Viewport);
    fn draw_platform(&mut self, platform: &Platform);
    fn draw_enemy(&mut self, enemy: &Enemy);
    fn draw_player(&mut self, player: &Player);
    /// HUD score readout
    fn draw_score(&mut self, score: u64);
}

/// Paint one frame: platforms, then enemies on top, then the player, then HUD
pub fn render<D: Draw + ?Sized>(state: &GameState, draw: &mut D) {
    draw.clear(state.viewport);
    for platform in state.field.iter() {
        draw.draw_platform(platform);
    }
    for enemy in state.field.iter().filter_map(Platform::enemy) {
        draw.draw_enemy(enemy);
    }
    draw.draw_player(&state.player);
    draw.draw_score(state.score.total());
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Platform { index: u64 },
    Enemy { platform_index: u64 },
    Player,
    Score(u64),
}

/// Draw target that only records what it was asked to paint
#[derive(Debug, Default)]
pub struct RecordingDraw {
    pub calls: Vec<DrawCall>,
}

impl RecordingDraw {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Draw for RecordingDraw {
    fn clear(&mut self, _viewport: Viewport) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    fn draw_platform(&mut self, platform: &Platform) {
        self.calls.push(DrawCall::Platform {
            index: platform.index,
        });
    }

    fn draw_enemy(&mut self, enemy: &Enemy) {
        self.calls.push(DrawCall::Enemy {
            platform_index: enemy.platform_index,
        });
    }

    fn draw_player(&mut self, _player: &Player) {
        self.calls.push(DrawCall::Player);
    }

    fn draw_score(&mut self, score: u64) {
        self.calls.push(DrawCall::Score(score));
    }
}
