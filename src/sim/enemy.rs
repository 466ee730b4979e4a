//! Enemy hazards
//!
//! An enemy always stands on exactly one platform. The platform owns it; the
//! enemy only remembers which platform by index and is handed the platform's
//! current span every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::ENEMY_SIZE;

/// Enemy behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Stands at the platform's centre
    Static,
    /// Walks back and forth across the platform
    Patrol,
}

/// The part of a platform an enemy needs: where it can walk and where the
/// walking surface currently is (base `y` plus oscillation offset).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpan {
    pub left: f32,
    pub width: f32,
    pub surface_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Index of the platform this enemy stands on
    pub platform_index: u64,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (zero for static enemies)
    pub velocity: f32,
}

impl Enemy {
    /// Place a new enemy at the centre of a platform, feet on its surface
    pub fn spawn(platform_index: u64, span: PlatformSpan, kind: EnemyKind, patrol_speed: f32) -> Self {
        let size = Vec2::splat(ENEMY_SIZE);
        let x = span.left + span.width / 2.0 - size.x / 2.0;
        Self {
            platform_index,
            kind,
            pos: Vec2::new(x, span.surface_y - size.y),
            size,
            velocity: match kind {
                EnemyKind::Static => 0.0,
                EnemyKind::Patrol => patrol_speed,
            },
        }
    }

    /// Advance one frame against the owning platform's current span
    pub fn update(&mut self, span: PlatformSpan) {
        if self.kind == EnemyKind::Patrol {
            self.pos.x += self.velocity;

            let left = span.left;
            let right = span.left + span.width - self.size.x;
            if self.pos.x <= left || self.pos.x >= right {
                self.velocity = -self.velocity;
                // min/max rather than clamp: a platform narrower than the
                // enemy has right < left
                self.pos.x = self.pos.x.min(right).max(left);
            }
        }

        self.pos.y = span.surface_y - self.size.y;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    /// Plain box overlap with the given body
    pub fn collides_with(&self, body: &Aabb) -> bool {
        self.bounds().overlaps(body)
    }
}
