//! Demo autopilot
//!
//! Plays the game from the state alone: pick the nearest safe platform
//! above, walk under it, jump. Used by the headless runner and attract mode.

use super::platform::Platform;
use super::state::GameState;
use crate::platform::KeyState;

/// Horizontal slack before the bot bothers steering
const STEER_DEADZONE: f32 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Index of the platform currently aimed at
    target: Option<u64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<u64> {
        self.target
    }

    /// Choose this frame's keys
    pub fn decide(&mut self, state: &GameState) -> KeyState {
        let player = &state.player;
        let feet = player.bottom();
        let reach = jump_reach(state);

        let target = state
            .field
            .iter()
            .filter(|p| is_safe(p))
            .filter(|p| p.surface_y() < feet - 1.0 && p.surface_y() > feet - reach)
            .max_by(|a, b| a.surface_y().total_cmp(&b.surface_y()));
        self.target = target.map(|p| p.index);

        let Some(target) = target else {
            // Nothing reachable: hop in place and hope the field scrolls
            return KeyState {
                jump: !player.jumping,
                ..Default::default()
            };
        };

        let centre = player.pos.x + player.size.x / 2.0;
        let goal = target.pos.x + target.width / 2.0;
        let dx = goal - centre;
        let under = dx.abs() < target.width / 2.0;

        let wants_double = player.jumping
            && player.can_double_jump
            && player.vel.y > 0.0
            && feet > target.surface_y();

        KeyState {
            left: dx < -STEER_DEADZONE,
            right: dx > STEER_DEADZONE,
            jump: (!player.jumping && under) || wants_double,
        }
    }
}

fn is_safe(platform: &Platform) -> bool {
    platform.enemy().is_none() && !platform.is_falling()
}

/// Apex height of a standing jump under the current tuning
fn jump_reach(state: &GameState) -> f32 {
    let tuning = &state.tuning;
    if tuning.gravity <= 0.0 {
        return f32::INFINITY;
    }
    let v = tuning.base_jump.abs();
    v * v / (2.0 * tuning.gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::field::PlatformField;
    use crate::sim::platform::Modifier;
    use crate::sim::state::{GameEvent, Viewport};
    use crate::sim::tick::tick;
    use crate::tuning::{ModifierChances, Tuning};
    use glam::Vec2;

    fn state_with(platforms: Vec<Platform>) -> GameState {
        let tuning = Tuning {
            chances: ModifierChances::none(),
            ..Tuning::default()
        };
        let mut state = GameState::new(1, Viewport::new(800.0, 600.0), tuning, 0.0);
        let mut field = PlatformField::empty();
        field.platforms = platforms;
        state.field = field;
        state
    }

    #[test]
    fn aims_for_nearest_platform_above() {
        let mut state = state_with(vec![
            Platform::plain(1, Vec2::new(100.0, 500.0), 100.0),
            Platform::plain(2, Vec2::new(600.0, 380.0), 100.0),
            Platform::plain(3, Vec2::new(100.0, 250.0), 100.0),
        ]);
        state.player.pos = Vec2::new(400.0, 480.0);
        let mut bot = Autopilot::new();
        let keys = bot.decide(&state);
        assert_eq!(bot.target(), Some(2));
        assert!(keys.right && !keys.left);
        assert!(!keys.jump, "not under the target yet");
    }

    #[test]
    fn jumps_when_under_target() {
        let mut state = state_with(vec![Platform::plain(2, Vec2::new(380.0, 380.0), 100.0)]);
        state.player.pos = Vec2::new(420.0, 480.0);
        let mut bot = Autopilot::new();
        assert!(bot.decide(&state).jump);
    }

    #[test]
    fn skips_enemy_platforms() {
        let mut guarded = Platform::plain(2, Vec2::new(380.0, 420.0), 100.0);
        guarded.modifier = Modifier::Enemy(Enemy::spawn(2, guarded.span(), EnemyKind::Static, 1.2));
        let mut state = state_with(vec![guarded, Platform::plain(3, Vec2::new(100.0, 360.0), 100.0)]);
        state.player.pos = Vec2::new(420.0, 480.0);
        let mut bot = Autopilot::new();
        let keys = bot.decide(&state);
        assert_eq!(bot.target(), Some(3));
        assert!(keys.left);
    }

    #[test]
    fn climbs_a_ladder_until_the_camera_scrolls() {
        // Player spawns with feet at 470; rungs every 100px straight above
        let ladder = (0..10)
            .map(|k| Platform::plain(k + 1, Vec2::new(350.0, 470.0 - 100.0 * k as f32), 100.0))
            .collect();
        let mut state = state_with(ladder);
        let mut bot = Autopilot::new();
        let mut now = 0.0;
        let mut recycled = 0;
        for _ in 0..600 {
            if state.is_over() {
                break;
            }
            let keys = bot.decide(&state);
            tick(&mut state, &keys.to_tick_input(now));
            recycled += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Recycled { .. }))
                .count();
            now += crate::consts::FRAME_MS;
        }
        assert!(state.score.base() > 0.0, "camera never scrolled");
        assert!(recycled > 0, "no rung was recycled");
    }
}
