//! Per-frame simulation step
//!
//! Order matters and is fixed:
//! 1. input, player physics, invincibility expiry
//! 2. camera scroll (score, platform motion + shift, recycling) when the
//!    player is near the top
//! 3. platform motion, every frame
//! 4. walls and floor (floor can end the run)
//! 5. platform landings, fall-through timers and pickups
//! 6. enemy movement and hits

use super::platform::{Modifier, Platform};
use super::player::{JumpKind, Player};
use super::score::Score;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::consts::SCROLL_ZONE_FRACTION;
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump pressed since the previous frame
    pub jump: bool,
    /// Monotonic host time for this frame
    pub now_ms: f64,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.frame += 1;
    let now = input.now_ms;

    let GameState {
        rng,
        tuning,
        viewport,
        field,
        player,
        score,
        phase,
        events,
        ..
    } = state;
    let viewport = *viewport;

    // Input
    player.steer(input.left, input.right);
    if input.jump {
        match player.jump(tuning.base_jump) {
            Some(JumpKind::Ground) => events.push(GameEvent::Jumped),
            Some(JumpKind::Double) => events.push(GameEvent::DoubleJumped),
            None => {}
        }
    }

    // Physics
    player.apply_physics(tuning.gravity, tuning.friction);
    player.check_invincibility(now);

    // Camera follow
    if player.pos.y < viewport.height * SCROLL_ZONE_FRACTION {
        let amount = player.vel.y.abs();
        player.pos.y += amount;
        if score.record_scroll(
            amount,
            now,
            tuning.fast_climb_window_ms,
            tuning.fast_climb_bonus,
        ) {
            events.push(GameEvent::FastClimb);
        }
        for platform in field.scroll(rng, amount, viewport, tuning) {
            events.push(GameEvent::Recycled { platform });
        }
    }

    // Platform motion runs every frame, scroll frames included
    field.update(tuning);

    // Walls and floor
    if player.constrain_to(viewport) && score.total() > tuning.floor_loss_min_score {
        end_run(phase, events, score.total(), GameOverCause::Fell);
        return;
    }

    // Landings
    for platform in field.iter_mut() {
        let on_top = platform.collides_with(player, tuning.landing_threshold);
        if platform.track_player(on_top, now, tuning.fall_delay_ms) {
            log::debug!("Platform {} gives way", platform.index);
            events.push(GameEvent::PlatformFalling {
                platform: platform.index,
            });
        }
        if on_top {
            land(platform, player, score, tuning, now, events);
        }
    }

    // Enemies
    for platform in field.iter_mut() {
        platform.update_enemy();
        let Some(enemy) = platform.enemy() else {
            continue;
        };
        if enemy.collides_with(&player.bounds()) && !player.invincible {
            events.push(GameEvent::EnemyHit {
                platform: platform.index,
            });
            end_run(phase, events, score.total(), GameOverCause::EnemyHit);
            return;
        }
    }
}

/// Snap the player onto a platform and apply its modifier
fn land(
    platform: &mut Platform,
    player: &mut Player,
    score: &mut Score,
    tuning: &Tuning,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    let index = platform.index;
    if player.land_on(platform) {
        events.push(GameEvent::Landed { platform: index });
    }

    match platform.modifier {
        Modifier::Spring => {
            player.spring_jump(tuning.spring_impulse);
            events.push(GameEvent::SpringLaunched { platform: index });
        }
        Modifier::Star => {
            score.add_bonus(tuning.star_bonus);
            player.activate_invincibility(now, tuning.invincibility_ms);
            events.push(GameEvent::StarCollected { platform: index });
        }
        Modifier::Chest => {
            score.add_bonus(tuning.chest_bonus);
            events.push(GameEvent::ChestOpened { platform: index });
        }
        Modifier::Boot => {
            player.equip_boots();
            events.push(GameEvent::BootsCollected { platform: index });
        }
        Modifier::None | Modifier::Enemy(_) => {}
    }
    platform.consume_pickup();
}

fn end_run(phase: &mut GamePhase, events: &mut Vec<GameEvent>, score: u64, cause: GameOverCause) {
    *phase = GamePhase::GameOver;
    log::info!("Game over ({cause:?}) with score {score}");
    events.push(GameEvent::GameOver { score, cause });
}
