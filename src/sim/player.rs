//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::platform::Platform;
use super::state::Viewport;
use crate::consts::{PLAYER_SIZE, PLAYER_SPAWN_HEIGHT};

/// Which jump a jump request produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    /// Mid-air jump granted by boots
    Double,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// `pos.y` before the current physics step
    pub prev_y: f32,
    pub vel: Vec2,
    /// Max horizontal speed reachable by steering
    pub speed: f32,
    /// Airborne after a jump or spring
    pub jumping: bool,
    pub invincible: bool,
    pub invincible_until_ms: f64,
    /// Boots equipped
    pub has_double_jump: bool,
    /// Double jump still available during this airtime
    pub can_double_jump: bool,
}

impl Player {
    /// Spawn centred horizontally, a little above the floor
    pub fn new(viewport: Viewport, speed: f32) -> Self {
        let y = viewport.height - PLAYER_SPAWN_HEIGHT;
        Self {
            pos: Vec2::new(viewport.width / 2.0, y),
            size: Vec2::splat(PLAYER_SIZE),
            prev_y: y,
            vel: Vec2::ZERO,
            speed,
            jumping: false,
            invincible: false,
            invincible_until_ms: 0.0,
            has_double_jump: false,
            can_double_jump: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Accelerate one unit per frame toward the held direction
    pub fn steer(&mut self, left: bool, right: bool) {
        if right && self.vel.x < self.speed {
            self.vel.x += 1.0;
        }
        if left && self.vel.x > -self.speed {
            self.vel.x -= 1.0;
        }
    }

    /// One Euler step. Must run before any collision test this frame.
    pub fn apply_physics(&mut self, gravity: f32, friction: f32) {
        self.prev_y = self.pos.y;
        self.vel.x *= friction;
        self.vel.y += gravity;
        self.pos += self.vel;
    }

    /// Ground jump, or the boots' double jump when already airborne.
    ///
    /// Horizontal speed eats into the ground jump; the double jump is always
    /// exactly `base_jump` and uses up the boots.
    pub fn jump(&mut self, base_jump: f32) -> Option<JumpKind> {
        if !self.jumping {
            self.jumping = true;
            self.vel.y = base_jump - self.vel.x.abs();
            Some(JumpKind::Ground)
        } else if self.has_double_jump && self.can_double_jump {
            self.vel.y = base_jump;
            self.can_double_jump = false;
            self.has_double_jump = false;
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    /// Snap onto a platform surface. Returns true if the player was airborne.
    pub fn land_on(&mut self, platform: &Platform) -> bool {
        let was_airborne = self.jumping;
        self.jumping = false;
        self.vel.y = 0.0;
        self.pos.y = platform.surface_y() - self.size.y;
        self.rearm_double_jump();
        was_airborne
    }

    pub fn spring_jump(&mut self, impulse: f32) {
        self.jumping = true;
        self.vel.y = impulse;
    }

    pub fn equip_boots(&mut self) {
        self.has_double_jump = true;
        self.can_double_jump = true;
    }

    fn rearm_double_jump(&mut self) {
        if self.has_double_jump {
            self.can_double_jump = true;
        }
    }

    pub fn activate_invincibility(&mut self, now_ms: f64, duration_ms: f64) {
        self.invincible = true;
        self.invincible_until_ms = now_ms + duration_ms;
    }

    pub fn check_invincibility(&mut self, now_ms: f64) {
        if self.invincible && now_ms > self.invincible_until_ms {
            self.invincible = false;
        }
    }

    /// Keep inside the side walls and above the floor.
    ///
    /// Returns true when the player is standing on the floor.
    pub fn constrain_to(&mut self, viewport: Viewport) -> bool {
        if self.pos.x >= viewport.width - self.size.x {
            self.pos.x = viewport.width - self.size.x;
        }
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.y >= viewport.height - self.size.y {
            self.pos.y = viewport.height - self.size.y;
            self.jumping = false;
            self.vel.y = 0.0;
            self.rearm_double_jump();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_JUMP: f32 = -15.0;

    fn player() -> Player {
        Player::new(Viewport::new(800.0, 600.0), 5.0)
    }

    #[test]
    fn spawns_above_floor() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(400.0, 450.0));
        assert!(!p.jumping);
    }

    #[test]
    fn physics_records_previous_y() {
        let mut p = player();
        p.vel = Vec2::new(4.0, -15.0);
        p.apply_physics(0.5, 0.8);
        assert_eq!(p.prev_y, 450.0);
        assert!((p.vel.x - 3.2).abs() < 1e-6);
        assert_eq!(p.vel.y, -14.5);
        assert_eq!(p.pos.y, 435.5);
        assert!((p.pos.x - 403.2).abs() < 1e-4);
    }

    #[test]
    fn steering_caps_at_speed() {
        let mut p = player();
        for _ in 0..10 {
            p.steer(false, true);
        }
        assert_eq!(p.vel.x, 5.0);
        p.steer(true, false);
        assert_eq!(p.vel.x, 4.0);
    }

    #[test]
    fn horizontal_speed_reduces_jump() {
        let mut p = player();
        p.vel.x = -3.0;
        assert_eq!(p.jump(BASE_JUMP), Some(JumpKind::Ground));
        assert_eq!(p.vel.y, -18.0);
        assert!(p.jumping);
    }

    #[test]
    fn no_second_jump_without_boots() {
        let mut p = player();
        p.jump(BASE_JUMP);
        p.vel.y = 2.0;
        assert_eq!(p.jump(BASE_JUMP), None);
        assert_eq!(p.vel.y, 2.0);
    }

    #[test]
    fn boots_allow_exactly_one_double_jump() {
        let mut p = player();
        p.equip_boots();
        p.vel.x = 2.0;

        assert_eq!(p.jump(BASE_JUMP), Some(JumpKind::Ground));
        assert_eq!(p.vel.y, -17.0);
        p.vel.y = 1.0;

        assert_eq!(p.jump(BASE_JUMP), Some(JumpKind::Double));
        assert_eq!(p.vel.y, BASE_JUMP);
        assert!(!p.has_double_jump, "double jump uses up the boots");

        p.vel.y = 3.0;
        assert_eq!(p.jump(BASE_JUMP), None);
        assert_eq!(p.vel.y, 3.0);
    }

    #[test]
    fn landing_rearms_double_jump_while_boots_held() {
        let mut p = player();
        p.equip_boots();
        p.jump(BASE_JUMP);
        p.can_double_jump = false;

        let platform = Platform::plain(1, Vec2::new(350.0, 300.0), 120.0);
        assert!(p.land_on(&platform));
        assert!(p.can_double_jump);
        assert_eq!(p.pos.y, 280.0);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn landing_after_using_boots_does_not_rearm() {
        let mut p = player();
        p.equip_boots();
        p.jump(BASE_JUMP);
        p.jump(BASE_JUMP);

        let platform = Platform::plain(1, Vec2::new(350.0, 300.0), 120.0);
        p.land_on(&platform);
        assert!(!p.can_double_jump);
        p.jump(BASE_JUMP);
        assert_eq!(p.jump(BASE_JUMP), None);
    }

    #[test]
    fn floor_contact_rearms_and_reports() {
        let mut p = player();
        p.equip_boots();
        p.can_double_jump = false;
        p.jumping = true;
        p.pos.y = 590.0;
        p.vel.y = 6.0;
        assert!(p.constrain_to(Viewport::new(800.0, 600.0)));
        assert_eq!(p.pos.y, 580.0);
        assert!(!p.jumping);
        assert!(p.can_double_jump);
    }

    #[test]
    fn walls_clamp_horizontally() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut p = player();
        p.pos.x = 900.0;
        assert!(!p.constrain_to(viewport));
        assert_eq!(p.pos.x, 780.0);
        p.pos.x = -4.0;
        p.constrain_to(viewport);
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn spring_overrides_velocity() {
        let mut p = player();
        p.vel.y = 3.0;
        p.spring_jump(-25.0);
        assert_eq!(p.vel.y, -25.0);
        assert!(p.jumping);
    }

    #[test]
    fn invincibility_expires_after_deadline() {
        let mut p = player();
        p.activate_invincibility(1000.0, 7000.0);
        p.check_invincibility(8000.0);
        assert!(p.invincible, "still active exactly at the deadline");
        p.check_invincibility(8000.5);
        assert!(!p.invincible);
    }
}
