//! Platforms: geometry, modifiers, oscillation and the fall-through timer

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, landing_contact};
use super::enemy::{Enemy, EnemyKind, PlatformSpan};
use super::player::Player;
use super::state::Viewport;
use super::width::choose_platform_width;
use crate::consts::{LABEL_INTERVAL, PLATFORM_HEIGHT};
use crate::tuning::Tuning;

/// The single special attachment a platform may carry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Modifier {
    #[default]
    None,
    /// Launches the player far higher than a jump
    Spring,
    /// Bonus points and temporary invincibility
    Star,
    /// Bonus points
    Chest,
    /// Grants a double jump
    Boot,
    /// Hazard standing on the platform
    Enemy(Enemy),
}

impl Modifier {
    /// Pickups disappear once collected; springs and enemies stay
    pub fn is_pickup(&self) -> bool {
        matches!(self, Modifier::Star | Modifier::Chest | Modifier::Boot)
    }
}

/// Fall-through state machine.
///
/// `Resting` -> `PlayerOnTop` when the player lands, back to `Resting` when
/// they leave, and `PlayerOnTop` -> `Falling` after standing for the fall
/// delay. `Falling` only ends when the platform is recycled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FallState {
    #[default]
    Resting,
    PlayerOnTop {
        landed_at_ms: f64,
    },
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Never reused, even across recycles
    pub index: u64,
    /// Height marker shown on every `LABEL_INTERVAL`th platform
    pub label: Option<u64>,
    /// Top-left corner, without oscillation
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Oscillation displacement added to `pos.y` for drawing and collisions
    pub offset_y: f32,
    pub moving: bool,
    /// Oscillation direction (+1 down, -1 up)
    pub direction: f32,
    pub modifier: Modifier,
    pub fall: FallState,
}

impl Platform {
    /// Build a platform with random width and x at height `y`, rolling
    /// oscillation and modifier
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        index: u64,
        y: f32,
        viewport: Viewport,
        tuning: &Tuning,
    ) -> Self {
        let width = choose_platform_width(rng, viewport.width);
        let x = rng.random::<f32>() * (viewport.width - width);
        Self::spawn_at(rng, index, Vec2::new(x, y), width, tuning)
    }

    /// Build a platform with fixed geometry, rolling oscillation and modifier
    pub fn spawn_at<R: Rng + ?Sized>(
        rng: &mut R,
        index: u64,
        pos: Vec2,
        width: f32,
        tuning: &Tuning,
    ) -> Self {
        let mut platform = Self::plain(index, pos, width);
        platform.moving = roll(rng, tuning.chances.moving);
        platform.direction = if roll(rng, 0.5) { 1.0 } else { -1.0 };
        platform.modifier = roll_modifier(rng, index, platform.span(), tuning);
        platform
    }

    /// Static platform with no modifier
    pub fn plain(index: u64, pos: Vec2, width: f32) -> Self {
        Self {
            index,
            label: label_for(index),
            pos,
            width,
            height: PLATFORM_HEIGHT,
            offset_y: 0.0,
            moving: false,
            direction: 1.0,
            modifier: Modifier::None,
            fall: FallState::Resting,
        }
    }

    /// Reuse this slot as a brand new platform at height `y`.
    ///
    /// Every roll is redone and any enemy is dropped, not carried over.
    pub fn recycle<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        index: u64,
        y: f32,
        viewport: Viewport,
        tuning: &Tuning,
    ) {
        *self = Self::spawn(rng, index, y, viewport, tuning);
    }

    /// Current walking surface (base `y` plus oscillation)
    #[inline]
    pub fn surface_y(&self) -> f32 {
        self.pos.y + self.offset_y
    }

    pub fn span(&self) -> PlatformSpan {
        PlatformSpan {
            left: self.pos.x,
            width: self.width,
            surface_y: self.surface_y(),
        }
    }

    /// Box at the current (oscillated) position
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(
            Vec2::new(self.pos.x, self.surface_y()),
            Vec2::new(self.width, self.height),
        )
    }

    pub fn has_spring(&self) -> bool {
        matches!(self.modifier, Modifier::Spring)
    }

    pub fn has_star(&self) -> bool {
        matches!(self.modifier, Modifier::Star)
    }

    pub fn has_chest(&self) -> bool {
        matches!(self.modifier, Modifier::Chest)
    }

    pub fn has_boot(&self) -> bool {
        matches!(self.modifier, Modifier::Boot)
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        match &self.modifier {
            Modifier::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.fall == FallState::Falling
    }

    pub fn is_player_on_top(&self) -> bool {
        matches!(self.fall, FallState::PlayerOnTop { .. })
    }

    /// Remove a collected pickup. Springs and enemies are left in place.
    pub fn consume_pickup(&mut self) {
        if self.modifier.is_pickup() {
            self.modifier = Modifier::None;
        }
    }

    /// Landing test against the player's pre- and post-step positions
    pub fn collides_with(&self, player: &Player, threshold: f32) -> bool {
        let surface = self.bounds();
        player.bounds().overlaps_x(&surface)
            && landing_contact(
                player.prev_y + player.size.y,
                player.bottom(),
                player.vel.y,
                surface.min.y,
                threshold,
            )
    }

    /// Per-frame motion: sink while falling, otherwise oscillate if moving
    pub fn update(&mut self, tuning: &Tuning) {
        if self.is_falling() {
            self.pos.y += tuning.fall_speed;
            self.offset_y = 0.0;
            return;
        }
        if self.moving {
            self.offset_y += self.direction * tuning.move_speed;
            if self.offset_y.abs() > tuning.move_range {
                self.direction = -self.direction;
            }
        }
    }

    /// Camera scroll
    pub fn shift(&mut self, dy: f32) {
        self.pos.y += dy;
    }

    /// Drive the fall-through timer with this frame's landing result.
    ///
    /// Returns true on the frame the platform starts falling.
    pub fn track_player(&mut self, on_top: bool, now_ms: f64, fall_delay_ms: f64) -> bool {
        match self.fall {
            FallState::Falling => false,
            FallState::Resting => {
                if on_top {
                    self.fall = FallState::PlayerOnTop {
                        landed_at_ms: now_ms,
                    };
                }
                false
            }
            FallState::PlayerOnTop { landed_at_ms } => {
                if !on_top {
                    self.fall = FallState::Resting;
                    false
                } else if now_ms - landed_at_ms >= fall_delay_ms {
                    self.fall = FallState::Falling;
                    self.moving = false;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Move this platform's enemy (if any) against the current span
    pub fn update_enemy(&mut self) {
        let span = self.span();
        if let Modifier::Enemy(enemy) = &mut self.modifier {
            enemy.update(span);
        }
    }
}

fn label_for(index: u64) -> Option<u64> {
    index.is_multiple_of(LABEL_INTERVAL).then_some(index)
}

#[inline]
fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.random::<f64>() < chance
}

/// Priority-exclusive modifier draw: each candidate is only rolled when
/// every higher-priority one missed.
fn roll_modifier<R: Rng + ?Sized>(
    rng: &mut R,
    index: u64,
    span: PlatformSpan,
    tuning: &Tuning,
) -> Modifier {
    let chances = &tuning.chances;
    if roll(rng, chances.spring) {
        Modifier::Spring
    } else if roll(rng, chances.star) {
        Modifier::Star
    } else if roll(rng, chances.chest) {
        Modifier::Chest
    } else if roll(rng, chances.boot) {
        Modifier::Boot
    } else if index >= tuning.safe_platforms && roll(rng, chances.enemy) {
        let kind = if roll(rng, chances.patrol) {
            EnemyKind::Patrol
        } else {
            EnemyKind::Static
        };
        Modifier::Enemy(Enemy::spawn(index, span, kind, tuning.patrol_speed))
    } else {
        Modifier::None
    }
}
